//! Error types for relmgr with contextual messages and exit codes
//!
//! One unified error type covers the three failure classes the tools know:
//! configuration problems, artifact fetch failures, and plain I/O. Each class
//! maps to its own exit code and carries a suggestion for the operator.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for relmgr
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, missing files)
  User = 1,
  /// System error (network, I/O)
  System = 2,
  /// Validation failure (config contents rejected)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for relmgr
#[derive(Debug)]
pub enum ToolError {
  /// Configuration errors
  Config(ConfigError),

  /// Artifact retrieval errors
  Fetch(FetchError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ToolError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ToolError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ToolError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ToolError::Message { message, context, help } => ToolError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ToolError::Config(ConfigError::InvalidPattern { .. }) => ExitCode::Validation,
      ToolError::Config(_) => ExitCode::User,
      ToolError::Fetch(_) => ExitCode::System,
      ToolError::Io(_) => ExitCode::System,
      ToolError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ToolError::Config(e) => e.help_message(),
      ToolError::Fetch(e) => e.help_message(),
      ToolError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ToolError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ToolError::Config(e) => write!(f, "{}", e),
      ToolError::Fetch(e) => write!(f, "{}", e),
      ToolError::Io(e) => write!(f, "I/O error: {}", e),
      ToolError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ToolError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ToolError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ToolError {
  fn from(err: io::Error) -> Self {
    ToolError::Io(err)
  }
}

impl From<String> for ToolError {
  fn from(msg: String) -> Self {
    ToolError::message(msg)
  }
}

impl From<&str> for ToolError {
  fn from(msg: &str) -> Self {
    ToolError::message(msg)
  }
}

impl From<toml_edit::de::Error> for ToolError {
  fn from(err: toml_edit::de::Error) -> Self {
    ToolError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for ToolError {
  fn from(err: serde_json::Error) -> Self {
    ToolError::message(format!("JSON error: {}", err))
  }
}

impl From<regex::Error> for ToolError {
  fn from(err: regex::Error) -> Self {
    ToolError::Config(ConfigError::InvalidPattern {
      pattern: String::new(),
      reason: err.to_string(),
    })
  }
}

impl From<reqwest::Error> for ToolError {
  fn from(err: reqwest::Error) -> Self {
    ToolError::Fetch(FetchError::Transport {
      url: err.url().map(|u| u.to_string()).unwrap_or_default(),
      reason: err.to_string(),
    })
  }
}

impl From<std::string::FromUtf8Error> for ToolError {
  fn from(err: std::string::FromUtf8Error) -> Self {
    ToolError::message(format!("UTF-8 conversion error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// Config file was requested explicitly but does not exist
  NotFound { path: PathBuf },

  /// An allow/deny pattern does not compile
  InvalidPattern { pattern: String, reason: String },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::NotFound { .. } => {
        Some("Create a relmgr.toml or omit --config to use the built-in defaults.".to_string())
      }
      ConfigError::InvalidPattern { .. } => {
        Some("Fix the pattern under [changelog] removed_name_deny in relmgr.toml.".to_string())
      }
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::NotFound { path } => {
        write!(f, "Configuration file not found: {}", path.display())
      }
      ConfigError::InvalidPattern { pattern, reason } => {
        write!(f, "Invalid filter pattern '{}': {}", pattern, reason)
      }
    }
  }
}

/// Artifact retrieval errors
#[derive(Debug)]
pub enum FetchError {
  /// Remote returned a non-success status
  Status { url: String, status: u16 },

  /// Transport-level failure (DNS, TLS, timeout)
  Transport { url: String, reason: String },

  /// Local source file missing
  SourceMissing { path: PathBuf },
}

impl FetchError {
  fn help_message(&self) -> Option<String> {
    match self {
      FetchError::Status { .. } => {
        Some("Check the build numbers and labels; the remote has no artifact for this combination.".to_string())
      }
      FetchError::Transport { .. } => Some("Check network connectivity and the configured base URL.".to_string()),
      FetchError::SourceMissing { path } => Some(format!("Expected a source artifact at: {}", path.display())),
    }
  }
}

impl fmt::Display for FetchError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      FetchError::Status { url, status } => {
        write!(f, "Fetch of {} failed with status {}", url, status)
      }
      FetchError::Transport { url, reason } => {
        write!(f, "Fetch of {} failed: {}", url, reason)
      }
      FetchError::SourceMissing { path } => {
        write!(f, "Local source artifact not found: {}", path.display())
      }
    }
  }
}

/// Result type alias for relmgr
pub type ToolResult<T> = Result<T, ToolError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ToolResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ToolResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ToolError>,
{
  fn context(self, ctx: impl Into<String>) -> ToolResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ToolResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ToolError) {
  eprintln!("\nError: {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("Help: {}\n", help);
  }
}

/// Convert anyhow::Error to ToolError (for transition period)
impl From<anyhow::Error> for ToolError {
  fn from(err: anyhow::Error) -> Self {
    ToolError::message(err.to_string())
  }
}
