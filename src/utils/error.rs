use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Number parsing error: {0}")]
    ParseError(#[from] std::num::ParseIntError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Unknown pattern: {name}")]
    UnknownPattern { name: String },

    #[error("Unknown variant: {name}")]
    UnknownVariant { name: String },

    #[error("Invalid argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },

    #[error("Unknown memento class {kind}")]
    UnknownMemento { kind: String },

    #[error("Nothing to restore: {what} history is empty")]
    EmptyHistory { what: String },

    #[error("No connection after {attempts} attempts")]
    ConnectionLost { attempts: u32 },

    #[error("{component} does not support {operation}")]
    UnsupportedOperation {
        component: String,
        operation: String,
    },

    #[error("Cannot build {product}: missing {part}")]
    MissingPart { product: String, part: String },

    #[error("Demo '{demo}' failed: {details}")]
    DemoFailed { demo: String, details: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Io,
    Pattern,
    Execution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a run whose worst problem has this severity.
    /// Low-severity problems still count as success.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl PatternError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PatternError::IoError(_) | PatternError::SerializationError(_) => ErrorCategory::Io,
            PatternError::ConfigError { .. }
            | PatternError::ConfigValidationError { .. }
            | PatternError::InvalidConfigValueError { .. }
            | PatternError::MissingConfigError { .. }
            | PatternError::UnknownPattern { .. }
            | PatternError::UnknownVariant { .. } => ErrorCategory::Configuration,
            PatternError::DemoFailed { .. } => ErrorCategory::Execution,
            PatternError::ParseError(_)
            | PatternError::InvalidArgument { .. }
            | PatternError::UnknownMemento { .. }
            | PatternError::EmptyHistory { .. }
            | PatternError::ConnectionLost { .. }
            | PatternError::UnsupportedOperation { .. }
            | PatternError::MissingPart { .. } => ErrorCategory::Pattern,
        }
    }

    /// Pattern errors are part of what the demos illustrate, so they never
    /// rank above `Medium`.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Pattern => match self {
                PatternError::ConnectionLost { .. } | PatternError::ParseError(_) => {
                    ErrorSeverity::Medium
                }
                _ => ErrorSeverity::Low,
            },
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Execution => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            PatternError::UnknownPattern { .. } => {
                "Run with --list to see the available pattern names".to_string()
            }
            PatternError::UnknownVariant { .. } => {
                "Use 'textbook' or 'illustrative' as variant names".to_string()
            }
            PatternError::ConfigError { .. }
            | PatternError::ConfigValidationError { .. }
            | PatternError::InvalidConfigValueError { .. }
            | PatternError::MissingConfigError { .. } => {
                "Check the command line flags or the TOML catalogue file".to_string()
            }
            PatternError::InvalidArgument { .. } => {
                "Pass a value inside the documented range".to_string()
            }
            PatternError::ConnectionLost { .. } => {
                "Raise --proxy-max-retries or rely on the direct fallback".to_string()
            }
            PatternError::IoError(_) => "Make sure standard output is writable".to_string(),
            _ => "Re-run with --verbose for details".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Io => format!("Output problem: {}", self),
            ErrorCategory::Pattern => format!("The demo stopped: {}", self),
            ErrorCategory::Execution => format!("Execution failed: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, PatternError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_errors_are_low_or_medium() {
        let invalid = PatternError::InvalidArgument {
            argument: "room_quality".to_string(),
            reason: "out of range".to_string(),
        };
        assert_eq!(invalid.category(), ErrorCategory::Pattern);
        assert_eq!(invalid.severity(), ErrorSeverity::Low);

        let lost = PatternError::ConnectionLost { attempts: 3 };
        assert_eq!(lost.severity(), ErrorSeverity::Medium);
        assert_eq!(lost.to_string(), "No connection after 3 attempts");
    }

    #[test]
    fn test_configuration_errors_are_high() {
        let err = PatternError::UnknownPattern {
            name: "singletn".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("--list"));
        assert!(err.user_friendly_message().starts_with("Configuration problem"));
    }

    #[test]
    fn test_io_errors_convert_and_are_critical() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: PatternError = io.into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.severity().exit_code(), 3);
    }

    #[test]
    fn test_low_severity_exits_successfully() {
        assert_eq!(ErrorSeverity::Low.exit_code(), 0);
        assert_eq!(ErrorSeverity::Medium.exit_code(), 2);
        assert_eq!(ErrorSeverity::High.exit_code(), 1);
    }
}
