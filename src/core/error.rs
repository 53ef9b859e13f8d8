//! Error types for release-registry with contextual messages and exit codes
//!
//! Validation problems inside a release store are never errors in this sense:
//! they are reported as findings. `RegistryError` covers the things that stop a
//! command from producing a report at all (bad CLI input, unreadable config,
//! I/O failures while writing the report) plus faults raised inside a rule,
//! which the rule runner converts back into findings.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for release-registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, unknown version)
  User = 1,
  /// System error (I/O)
  System = 2,
  /// Validation failure (blocking findings in strict mode)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for release-registry
#[derive(Debug)]
pub enum RegistryError {
  /// Configuration errors
  Config(ConfigError),

  /// Registry index errors
  Index(IndexError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl RegistryError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    RegistryError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    RegistryError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      RegistryError::Message { message, context, help } => RegistryError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      RegistryError::Io(err) => RegistryError::Message {
        message: format!("{}: {}", ctx_str, err),
        context: None,
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      RegistryError::Config(_) => ExitCode::User,
      RegistryError::Index(_) => ExitCode::User,
      RegistryError::Io(_) => ExitCode::System,
      RegistryError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      RegistryError::Config(e) => e.help_message(),
      RegistryError::Index(e) => e.help_message(),
      RegistryError::Message { help, .. } => help.clone(),
      RegistryError::Io(_) => None,
    }
  }
}

impl fmt::Display for RegistryError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RegistryError::Config(e) => write!(f, "{}", e),
      RegistryError::Index(e) => write!(f, "{}", e),
      RegistryError::Io(e) => write!(f, "I/O error: {}", e),
      RegistryError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for RegistryError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      RegistryError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<ConfigError> for RegistryError {
  fn from(err: ConfigError) -> Self {
    RegistryError::Config(err)
  }
}

impl From<IndexError> for RegistryError {
  fn from(err: IndexError) -> Self {
    RegistryError::Index(err)
  }
}

impl From<io::Error> for RegistryError {
  fn from(err: io::Error) -> Self {
    RegistryError::Io(err)
  }
}

impl From<String> for RegistryError {
  fn from(msg: String) -> Self {
    RegistryError::message(msg)
  }
}

impl From<&str> for RegistryError {
  fn from(msg: &str) -> Self {
    RegistryError::message(msg)
  }
}

impl From<serde_json::Error> for RegistryError {
  fn from(err: serde_json::Error) -> Self {
    RegistryError::message(format!("JSON error: {}", err))
  }
}

impl From<toml_edit::de::Error> for RegistryError {
  fn from(err: toml_edit::de::Error) -> Self {
    RegistryError::message(format!("TOML deserialization error: {}", err))
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// A required setting is empty or unusable
  InvalidField { field: String, reason: String },

  /// The registry root does not exist
  RootNotFound { root: PathBuf },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::InvalidField { field, .. } => Some(format!("Fix `{}` in registry.toml or remove it to use the default.", field)),
      ConfigError::RootNotFound { .. } => Some("Pass an existing directory with --root.".to_string()),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::InvalidField { field, reason } => {
        write!(f, "Invalid configuration value for `{}`: {}", field, reason)
      }
      ConfigError::RootNotFound { root } => {
        write!(f, "Registry root does not exist: {}", root.display())
      }
    }
  }
}

/// Registry index errors
///
/// The validate command downgrades these to a `global` finding; other
/// commands treat them as fatal.
#[derive(Debug, Clone)]
pub enum IndexError {
  /// Index file does not exist
  NotFound { path: PathBuf },

  /// Index file exists but could not be read or parsed
  Unreadable { path: PathBuf, reason: String },

  /// Requested version cannot be resolved against the index
  UnknownVersion { version: String },
}

impl IndexError {
  fn help_message(&self) -> Option<String> {
    match self {
      IndexError::NotFound { .. } => Some("Create the index or point --index at it.".to_string()),
      IndexError::Unreadable { .. } => Some("Run `release-registry validate` to see the full report.".to_string()),
      IndexError::UnknownVersion { .. } => Some("List registered versions with `release-registry list`.".to_string()),
    }
  }
}

impl fmt::Display for IndexError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      IndexError::NotFound { path } => write!(f, "index file does not exist: {}", path.display()),
      IndexError::Unreadable { path, reason } => {
        write!(f, "failed to parse index {}: {}", path.display(), reason)
      }
      IndexError::UnknownVersion { version } => write!(f, "version '{}' cannot be resolved", version),
    }
  }
}

/// Result type alias for release-registry
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> RegistryResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<RegistryError>,
{
  fn with_context<F>(self, f: F) -> RegistryResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &RegistryError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
