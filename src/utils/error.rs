use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpinnerError {
    #[error("No participants: at least one name is required to create groups")]
    NoParticipantsError,

    #[error("Invalid split specification: {mode} value must be at least 1 (got {value})")]
    InvalidSplitError { mode: String, value: usize },

    #[error("Invalid constraint '{id}': {reason}")]
    InvalidConstraintError { id: String, reason: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("AI provider error ({provider}): {message}")]
    AiProviderError {
        provider: String,
        status: Option<u16>,
        message: String,
    },

    #[error("AI response error: {message}")]
    AiResponseError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Saved list not found: {id}")]
    ListNotFoundError { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Network,
    Storage,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SpinnerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SpinnerError::NoParticipantsError
            | SpinnerError::InvalidSplitError { .. }
            | SpinnerError::InvalidConstraintError { .. } => ErrorCategory::Input,
            SpinnerError::ConfigValidationError { .. }
            | SpinnerError::InvalidConfigValueError { .. }
            | SpinnerError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SpinnerError::ApiError(_) | SpinnerError::AiProviderError { .. } => {
                ErrorCategory::Network
            }
            SpinnerError::IoError(_) | SpinnerError::ListNotFoundError { .. } => {
                ErrorCategory::Storage
            }
            SpinnerError::AiResponseError { .. } | SpinnerError::SerializationError(_) => {
                ErrorCategory::Data
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SpinnerError::ListNotFoundError { .. } => ErrorSeverity::Low,
            // AI 服務失敗可稍後重試
            SpinnerError::ApiError(_)
            | SpinnerError::AiProviderError { .. }
            | SpinnerError::AiResponseError { .. } => ErrorSeverity::Medium,
            SpinnerError::IoError(_) => ErrorSeverity::Critical,
            _ => ErrorSeverity::High,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            SpinnerError::NoParticipantsError => {
                "Provide names with --names, --input or --load-list".to_string()
            }
            SpinnerError::InvalidSplitError { mode, .. } => {
                format!("Use a {} value of 1 or more", mode)
            }
            SpinnerError::InvalidConstraintError { .. } => {
                "List at least two comma-separated names per constraint".to_string()
            }
            SpinnerError::ApiError(_) => "Check your network connection and try again".to_string(),
            SpinnerError::AiProviderError { status, .. } => match status {
                Some(429) => "AI usage limit reached, wait a moment before retrying".to_string(),
                Some(401) | Some(403) => "Check the AI provider API key".to_string(),
                _ => "Check the AI provider settings and try again".to_string(),
            },
            SpinnerError::AiResponseError { .. } => {
                "The AI returned an unexpected format, try again".to_string()
            }
            SpinnerError::IoError(_) => "Check file paths and permissions".to_string(),
            SpinnerError::SerializationError(_) => {
                "The saved lists file may be corrupted, check its JSON content".to_string()
            }
            SpinnerError::ConfigValidationError { field, .. }
            | SpinnerError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' setting in your configuration", field)
            }
            SpinnerError::MissingConfigError { field } => {
                format!("Set '{}' in the config file or environment", field)
            }
            SpinnerError::ListNotFoundError { .. } => {
                "Run with --list-saved to see available lists".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Cannot create groups: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Network => format!("AI service unavailable: {}", self),
            ErrorCategory::Storage => format!("Storage problem: {}", self),
            ErrorCategory::Data => format!("Unexpected data: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, SpinnerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_error_is_input_error() {
        let err = SpinnerError::InvalidSplitError {
            mode: "group count".to_string(),
            value: 0,
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.to_string().contains("got 0"));
    }

    #[test]
    fn test_rate_limit_suggestion() {
        let err = SpinnerError::AiProviderError {
            provider: "gemini".to_string(),
            status: Some(429),
            message: "rate limit".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.recovery_suggestion().contains("limit"));
    }
}
