use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Languages the remote execution service accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Rust,
    Go,
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "python" => Ok(Language::Python),
            "javascript" => Ok(Language::JavaScript),
            "typescript" => Ok(Language::TypeScript),
            "rust" => Ok(Language::Rust),
            "go" => Ok(Language::Go),
            _ => Err(format!("Unsupported language: {}", s)),
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::Python
    }
}

/// Code execution request, serialized as the body of the outbound POST.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// Source code to execute
    pub code: String,
    /// Programming language
    #[serde(default)]
    pub language: Language,
    /// Names of packages the code needs installed
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    /// Per-request execution timeout in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

impl ExecutionRequest {
    /// Create a request for the default language (Python).
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            language: Language::default(),
            dependencies: Vec::new(),
            timeout: None,
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn with_dependencies(mut self, dependencies: Vec<String>) -> Self {
        self.dependencies = dependencies;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout.as_secs());
        self
    }
}

/// One structured segment of remote output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSegment {
    /// Text produced by the executed code
    pub text: String,
}

/// Response body returned by the execution service.
///
/// The `output` list of segments is the service's wire contract; callers
/// normally want [`ExecuteResponse::joined_output`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecuteResponse {
    /// Output segments in document order
    #[serde(default)]
    pub output: Vec<OutputSegment>,
    /// Error reported by the remote runtime, if any
    #[serde(default)]
    pub error: Option<String>,
}

impl ExecuteResponse {
    /// Concatenate the text of all output segments in order.
    pub fn joined_output(&self) -> String {
        self.output
            .iter()
            .map(|segment| segment.text.as_str())
            .collect::<Vec<_>>()
            .join("")
    }
}

/// Execution result handed back to the calling agent framework.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// Joined text of all output segments
    pub output: String,
}

pub(crate) mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
