use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error};

use crate::{
    config::ToolConfig,
    error::Error,
    types::{ExecuteResponse, ExecutionRequest, ExecutionResult},
};

/// Headroom added on top of a per-request timeout so the remote side can
/// report its own timeout before the HTTP call gives up.
const TIMEOUT_BUFFER: Duration = Duration::from_secs(5);

/// Client for a remote code execution endpoint.
///
/// Holds only the HTTP client and the read-only configuration, so a single
/// instance can serve concurrent invocations without locking.
pub struct ExecClient {
    client: Client,
    config: ToolConfig,
}

impl ExecClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ToolConfig) -> Result<Self, Error> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(Error::Http)?;

        Ok(Self { client, config })
    }

    /// Send one execution request and return the extracted output.
    ///
    /// Exactly one HTTP POST per call; nothing is cached or retried. The
    /// request is rejected before any network activity when the code string
    /// is empty.
    pub async fn execute(&self, request: &ExecutionRequest) -> Result<ExecutionResult, Error> {
        if request.code.trim().is_empty() {
            return Err(Error::InvalidInput(
                "code must be a non-empty string".to_string(),
            ));
        }

        debug!(
            "sending {:?} execution request to {} ({} dependencies)",
            request.language,
            self.config.endpoint,
            request.dependencies.len()
        );

        let mut req = self.client.post(&self.config.endpoint).json(request);

        if let Some(api_key) = &self.config.api_key {
            req = req.header("x-api-key", api_key);
        }

        if let Some(secs) = request.timeout {
            req = req.timeout(Duration::from_secs(secs) + TIMEOUT_BUFFER);
        }

        let response = req.send().await?;

        let status = response.status();
        debug!("execution service responded with status {}", status);

        if !status.is_success() {
            return Err(Error::Remote {
                status: status.as_u16(),
                message: response.text().await?,
            });
        }

        let body: ExecuteResponse = response.json().await?;

        if let Some(message) = body.error {
            error!("remote execution error: {}", message);
            return Err(Error::Remote {
                status: status.as_u16(),
                message,
            });
        }

        Ok(ExecutionResult {
            output: body.joined_output(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(endpoint: String) -> ToolConfig {
        ToolConfig::new(endpoint)
    }

    #[tokio::test]
    async fn test_successful_execution() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({
                    "output": [{"text": "7499"}]
                })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = ExecClient::new(test_config(mock_server.uri())).unwrap();
        let request = ExecutionRequest::new("print(nth_prime(888))");
        let result = client.execute(&request).await.unwrap();

        assert_eq!(result.output, "7499");
    }

    #[tokio::test]
    async fn test_joins_multiple_output_segments() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({
                    "output": [{"text": "Hello, "}, {"text": "World!"}]
                })),
            )
            .mount(&mock_server)
            .await;

        let client = ExecClient::new(test_config(mock_server.uri())).unwrap();
        let result = client
            .execute(&ExecutionRequest::new("print('Hello, World!')"))
            .await
            .unwrap();

        assert_eq!(result.output, "Hello, World!");
    }

    #[tokio::test]
    async fn test_sends_api_key_header() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(header("x-api-key", "test_api_key"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"output": [{"text": "ok"}]})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = test_config(mock_server.uri()).with_api_key("test_api_key");
        let client = ExecClient::new(config).unwrap();
        let result = client.execute(&ExecutionRequest::new("print('ok')")).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_empty_code_makes_no_request() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = ExecClient::new(test_config(mock_server.uri())).unwrap();

        for code in ["", "   \n\t"] {
            let result = client.execute(&ExecutionRequest::new(code)).await;
            assert!(matches!(result, Err(Error::InvalidInput(_))));
        }

        let requests = mock_server.received_requests().await.unwrap();
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn test_error_status_surfaces_as_remote() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(422).set_body_string("unsupported dependency"))
            .mount(&mock_server)
            .await;

        let client = ExecClient::new(test_config(mock_server.uri())).unwrap();
        let result = client.execute(&ExecutionRequest::new("print(1)")).await;

        match result {
            Err(Error::Remote { status, message }) => {
                assert_eq!(status, 422);
                assert_eq!(message, "unsupported dependency");
            }
            other => panic!("expected remote error, got {:?}", other.map(|r| r.output)),
        }
    }

    #[tokio::test]
    async fn test_error_payload_surfaces_as_remote() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "output": [],
                "error": "SyntaxError: invalid syntax"
            })))
            .mount(&mock_server)
            .await;

        let client = ExecClient::new(test_config(mock_server.uri())).unwrap();
        let result = client.execute(&ExecutionRequest::new("print(")).await;

        match result {
            Err(Error::Remote { status, message }) => {
                assert_eq!(status, 200);
                assert_eq!(message, "SyntaxError: invalid syntax");
            }
            other => panic!("expected remote error, got {:?}", other.map(|r| r.output)),
        }
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        // Port 1 is never bound; the connection is refused immediately.
        let client = ExecClient::new(test_config("http://127.0.0.1:1".to_string())).unwrap();
        let result = client.execute(&ExecutionRequest::new("print(1)")).await;

        assert!(matches!(result, Err(Error::Http(_))));
    }

    #[tokio::test]
    async fn test_timeout_is_transport_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
            .mount(&mock_server)
            .await;

        let config = test_config(mock_server.uri()).with_timeout(Duration::from_secs(1));
        let client = ExecClient::new(config).unwrap();
        let result = client.execute(&ExecutionRequest::new("print(1)")).await;

        assert!(matches!(result, Err(Error::Http(_))));
    }

    #[tokio::test]
    async fn test_request_timeout_overrides_client_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"output": [{"text": "late"}]}))
                    .set_delay(Duration::from_millis(2500)),
            )
            .mount(&mock_server)
            .await;

        // The client-level 1s timeout alone would expire during the delay.
        let config = test_config(mock_server.uri()).with_timeout(Duration::from_secs(1));
        let client = ExecClient::new(config).unwrap();
        let request =
            ExecutionRequest::new("print('late')").with_timeout(Duration::from_secs(3));
        let result = client.execute(&request).await.unwrap();

        assert_eq!(result.output, "late");
    }

    #[tokio::test]
    async fn test_request_timeout_bounds_the_wait() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
            .mount(&mock_server)
            .await;

        // Request timeout of zero leaves only the buffer; the 30s delay
        // must surface as a timeout long before the 60s client limit.
        let config = test_config(mock_server.uri()).with_timeout(Duration::from_secs(60));
        let client = ExecClient::new(config).unwrap();
        let request = ExecutionRequest::new("print(1)").with_timeout(Duration::from_secs(0));
        let result = client.execute(&request).await;

        assert!(matches!(result, Err(Error::Http(_))));
    }

    #[tokio::test]
    async fn test_malformed_body_is_transport_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let client = ExecClient::new(test_config(mock_server.uri())).unwrap();
        let result = client.execute(&ExecutionRequest::new("print(1)")).await;

        assert!(matches!(result, Err(Error::Http(_))));
    }

    #[tokio::test]
    async fn test_invalid_endpoint_rejected_at_construction() {
        let result = ExecClient::new(test_config("not a url".to_string()));
        assert!(matches!(result, Err(Error::Configuration(_))));
    }
}
