use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::error::Error;

/// Environment variable naming the remote execution endpoint.
pub const ENV_URL: &str = "CODE_EXEC_URL";

/// Environment variable holding the optional API key.
pub const ENV_API_KEY: &str = "CODE_EXEC_API_KEY";

/// Environment variable overriding the request timeout, in seconds.
pub const ENV_TIMEOUT: &str = "CODE_EXEC_TIMEOUT_SECS";

/// Default timeout for the outbound HTTP call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// URL of the remote execution endpoint, posted to verbatim
    pub endpoint: String,

    /// API key sent as `x-api-key` with every request
    #[serde(default)]
    pub api_key: Option<String>,

    /// Timeout for the HTTP call
    #[serde(with = "crate::types::duration_serde")]
    pub timeout: Duration,

    /// Environment variables already set on the execution environment,
    /// advertised in the tool description
    #[serde(default)]
    pub env_vars: Vec<String>,

    /// Libraries already installed on the execution environment,
    /// advertised in the tool description
    #[serde(default)]
    pub preinstalled_libraries: Vec<String>,

    /// Extra instruction appended to the tool description
    #[serde(default)]
    pub custom_instruction: Option<String>,
}

impl ToolConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
            env_vars: Vec::new(),
            preinstalled_libraries: Vec::new(),
            custom_instruction: None,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_env_vars(mut self, env_vars: Vec<String>) -> Self {
        self.env_vars = env_vars;
        self
    }

    pub fn with_preinstalled_libraries(mut self, libraries: Vec<String>) -> Self {
        self.preinstalled_libraries = libraries;
        self
    }

    pub fn with_custom_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.custom_instruction = Some(instruction.into());
        self
    }

    /// Load configuration from `CODE_EXEC_*` environment variables.
    ///
    /// `CODE_EXEC_URL` is required; the API key and timeout are optional.
    pub fn from_env() -> Result<Self, Error> {
        let endpoint = env::var(ENV_URL).map_err(|_| Error::MissingEnvVar(ENV_URL.to_string()))?;

        let mut config = Self::new(endpoint);

        if let Ok(api_key) = env::var(ENV_API_KEY) {
            config.api_key = Some(api_key);
        }

        if let Ok(secs) = env::var(ENV_TIMEOUT) {
            let secs: u64 = secs.parse().map_err(|_| {
                Error::Configuration(format!("{} must be a whole number of seconds", ENV_TIMEOUT))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Check that the endpoint is a well-formed http(s) URL.
    pub fn validate(&self) -> Result<(), Error> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::Configuration("endpoint URL is empty".to_string()));
        }

        let url = reqwest::Url::parse(&self.endpoint)
            .map_err(|e| Error::Configuration(format!("invalid endpoint URL: {}", e)))?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(Error::Configuration(format!(
                "unsupported URL scheme: {}",
                scheme
            ))),
        }
    }
}
