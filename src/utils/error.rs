use thiserror::Error;

#[derive(Error, Debug)]
pub enum CartError {
    #[error("Invalid domain format: '{input}'")]
    InvalidFormat { input: String },

    #[error("Duplicate domain: {domain} is already added")]
    Duplicate { domain: String },

    #[error("Availability check failed for {domain}: {message}")]
    ProbeFailure { domain: String, message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Purchase unavailable: {available} of {required} domains available ({total} in cart)")]
    PurchaseUnavailable {
        available: usize,
        total: usize,
        required: usize,
    },

    #[error("Unknown command: {input}")]
    UnknownCommand { input: String },

    #[error("Missing argument for '{command}': expected {expected}")]
    MissingArgument {
        command: String,
        expected: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 使用者輸入問題，購物車不變
    Input,
    /// 可用性檢查端點
    Network,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CartError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CartError::InvalidFormat { .. }
            | CartError::Duplicate { .. }
            | CartError::PurchaseUnavailable { .. }
            | CartError::UnknownCommand { .. }
            | CartError::MissingArgument { .. } => ErrorCategory::Input,
            CartError::ProbeFailure { .. } | CartError::ApiError(_) => ErrorCategory::Network,
            CartError::ConfigValidationError { .. } | CartError::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            CartError::IoError(_) | CartError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 所有購物車操作錯誤都可恢復，只有設定與系統錯誤會中止程式
    pub fn is_recoverable(&self) -> bool {
        self.severity() <= ErrorSeverity::Medium
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CartError::InvalidFormat { .. } => {
                "Enter a valid domain (e.g., example.com, example.xyz, example.app).".to_string()
            }
            CartError::Duplicate { domain } => format!("{} is already added.", domain),
            CartError::ProbeFailure { domain, .. } => {
                format!("Failed to check availability of {}.", domain)
            }
            CartError::ApiError(_) => "Failed to reach the availability service.".to_string(),
            CartError::PurchaseUnavailable {
                available,
                required,
                ..
            } => format!(
                "Purchase needs exactly {} available domains ({} available).",
                required, available
            ),
            CartError::UnknownCommand { input } => {
                format!("Unknown command '{}'. Type 'help' for a list of commands.", input)
            }
            CartError::MissingArgument { command, expected } => {
                format!("'{}' needs {}.", command, expected)
            }
            CartError::ConfigValidationError { .. } | CartError::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
            CartError::IoError(_) | CartError::SerializationError(_) => {
                format!("Internal error: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CartError::InvalidFormat { .. } => {
                "Use a single label of letters, digits or hyphens followed by .com, .xyz or .app"
            }
            CartError::Duplicate { .. } => {
                "Delete the domain first if you want to check its availability again"
            }
            CartError::ProbeFailure { .. } | CartError::ApiError(_) => {
                "Check that the availability endpoint is running, then delete and re-add the domain"
            }
            CartError::PurchaseUnavailable { .. } => {
                "Use 'prune' and 'best' to reach the required number of available domains"
            }
            CartError::UnknownCommand { .. } | CartError::MissingArgument { .. } => {
                "Type 'help' to list the supported commands"
            }
            CartError::ConfigValidationError { .. } | CartError::InvalidConfigValueError { .. } => {
                "Check the command line flags and the TOML configuration file"
            }
            CartError::IoError(_) | CartError::SerializationError(_) => {
                "Re-run with --verbose and inspect the logs"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_recoverable() {
        let invalid = CartError::InvalidFormat {
            input: "-bad.com".to_string(),
        };
        let duplicate = CartError::Duplicate {
            domain: "example.com".to_string(),
        };

        assert_eq!(invalid.category(), ErrorCategory::Input);
        assert_eq!(duplicate.severity(), ErrorSeverity::Low);
        assert!(invalid.is_recoverable());
        assert!(duplicate.is_recoverable());
    }

    #[test]
    fn test_probe_failure_is_recoverable_network_error() {
        let err = CartError::ProbeFailure {
            domain: "example.com".to_string(),
            message: "HTTP 500".to_string(),
        };

        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(err.is_recoverable());
        assert_eq!(
            err.user_friendly_message(),
            "Failed to check availability of example.com."
        );
    }

    #[test]
    fn test_config_errors_are_fatal() {
        let err = CartError::InvalidConfigValueError {
            field: "required".to_string(),
            value: "0".to_string(),
            reason: "Value must be at least 1".to_string(),
        };

        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_duplicate_message_names_domain() {
        let err = CartError::Duplicate {
            domain: "example.com".to_string(),
        };
        assert_eq!(err.user_friendly_message(), "example.com is already added.");
    }
}
