use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    client::ExecClient,
    config::ToolConfig,
    error::Error,
    types::{ExecutionRequest, ExecutionResult, Language},
};

/// Name under which the tool registers with the agent framework.
pub const TOOL_NAME: &str = "run_remote_code";

const BASE_DESCRIPTION: &str = "Run general purpose code in a remote execution environment. \
    Use this to access the internet or for any computation you need. The output is everything \
    the code prints. The code must be a single self-contained file. List any third-party \
    packages it needs in the `dependencies` array.";

/// A callable capability exposed to an LLM agent.
///
/// Agent frameworks register implementations by name and invoke them with
/// JSON arguments matching [`Tool::schema`].
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the tool registers under.
    fn name(&self) -> &str;

    /// Description shown to the model.
    fn description(&self) -> &str;

    /// JSON schema of the accepted arguments.
    fn schema(&self) -> Value;

    /// Execute the tool with the given arguments.
    async fn invoke(&self, args: Value) -> Result<Value, Error>;
}

/// Tool that runs agent-written code on a remote execution service.
pub struct CodeExecutionTool {
    client: ExecClient,
    description: String,
}

impl CodeExecutionTool {
    /// Create the tool, building its HTTP client and description once.
    pub fn new(config: ToolConfig) -> Result<Self, Error> {
        let description = build_description(&config);
        let client = ExecClient::new(config)?;

        Ok(Self {
            client,
            description,
        })
    }

    /// Create the tool from `CODE_EXEC_*` environment variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::new(ToolConfig::from_env()?)
    }

    /// Execute a code string with default metadata.
    pub async fn execute(&self, code: impl Into<String>) -> Result<ExecutionResult, Error> {
        self.client.execute(&ExecutionRequest::new(code)).await
    }

    /// Execute a request carrying explicit language, dependency and
    /// timeout metadata.
    pub async fn execute_request(
        &self,
        request: &ExecutionRequest,
    ) -> Result<ExecutionResult, Error> {
        self.client.execute(request).await
    }
}

fn build_description(config: &ToolConfig) -> String {
    let mut description = BASE_DESCRIPTION.to_string();

    if !config.env_vars.is_empty() {
        description.push_str(&format!(
            " The following environment variables are already set on the execution environment \
             and can be used: {}.",
            config.env_vars.join(", ")
        ));
    }

    if !config.preinstalled_libraries.is_empty() {
        description.push_str(&format!(
            " The following libraries are already installed on the execution environment and do \
             not need to be listed in `dependencies`: {}.",
            config.preinstalled_libraries.join(", ")
        ));
    }

    if let Some(instruction) = &config.custom_instruction {
        description.push(' ');
        description.push_str(instruction);
    }

    description
}

/// Arguments accepted by [`CodeExecutionTool`] invocations.
#[derive(Debug, Deserialize)]
struct ToolArgs {
    code: String,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    dependencies: Vec<String>,
}

#[async_trait]
impl Tool for CodeExecutionTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "code": {
                    "type": "string",
                    "description": "Code to execute remotely"
                },
                "language": {
                    "type": "string",
                    "description": "Language of the code (defaults to python)"
                },
                "dependencies": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Packages that must be installed before the code runs"
                }
            },
            "required": ["code"]
        })
    }

    async fn invoke(&self, args: Value) -> Result<Value, Error> {
        let args: ToolArgs = serde_json::from_value(args)
            .map_err(|e| Error::InvalidInput(format!("malformed tool arguments: {}", e)))?;

        let mut request = ExecutionRequest::new(args.code).with_dependencies(args.dependencies);

        if let Some(language) = args.language {
            let language: Language = language.parse().map_err(Error::InvalidInput)?;
            request = request.with_language(language);
        }

        let result = self.client.execute(&request).await?;

        Ok(json!({ "output": result.output }))
    }
}
