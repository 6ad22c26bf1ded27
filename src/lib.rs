//! # Code Exec Tool
//!
//! An LLM-agent tool that runs agent-written code on a remote execution
//! service. The crate is an integration shim: the hard part (sandboxed,
//! isolated code execution) lives behind a URL in an external cloud
//! platform. This crate accepts a code string from the agent, forwards it
//! over HTTP(S), and returns the textual result.
//!
//! ## Features
//!
//! - A [`Tool`] capability trait (name / description / schema / invoke)
//!   that agent frameworks can register
//! - One HTTP POST per invocation, with no internal retries and no shared
//!   mutable state, so concurrent invocations are independent
//! - Typed errors separating bad input, transport failures, and errors
//!   reported by the remote runtime
//! - Configuration from builder calls or `CODE_EXEC_*` environment
//!   variables, validated once at construction
//!
//! ## Example
//!
//! ```rust,no_run
//! use code_exec_tool::{CodeExecutionTool, ToolConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ToolConfig::new("https://executor.example.com")
//!         .with_preinstalled_libraries(vec!["numpy".to_string()]);
//!
//!     let tool = CodeExecutionTool::new(config)?;
//!
//!     let result = tool.execute("print(7 * 11 * 13)").await?;
//!     println!("{}", result.output);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! [`Error`] keeps the three failure classes apart so the agent can decide
//! what to do next: [`Error::InvalidInput`] is surfaced before any network
//! activity, [`Error::Http`] covers transport failures the caller may retry,
//! and [`Error::Remote`] carries the status and message the execution
//! service reported for the submitted code.

mod client;
mod config;
mod error;
mod tool;
mod types;

pub use client::ExecClient;
pub use config::{ToolConfig, DEFAULT_TIMEOUT, ENV_API_KEY, ENV_TIMEOUT, ENV_URL};
pub use error::Error;
pub use tool::{CodeExecutionTool, Tool, TOOL_NAME};
pub use types::{ExecuteResponse, ExecutionRequest, ExecutionResult, Language, OutputSegment};

/// Result type for remote execution operations
pub type Result<T> = std::result::Result<T, Error>;
