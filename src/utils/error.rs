use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("HTTP request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Lead submission failed: {message}")]
    SubmissionError { message: String },

    #[error("Submission is only possible from the final step (current position: {position})")]
    NotReadyToSubmit { position: String },

    #[error("This quote request has already been submitted")]
    AlreadySubmitted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Storage,
    Submission,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl QuoteError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            QuoteError::ApiError(_) => ErrorCategory::Network,
            QuoteError::CsvError(_) | QuoteError::IoError(_) | QuoteError::SerializationError(_) => {
                ErrorCategory::Storage
            }
            QuoteError::TomlError(_)
            | QuoteError::ConfigError { .. }
            | QuoteError::ConfigValidationError { .. }
            | QuoteError::InvalidConfigValueError { .. }
            | QuoteError::MissingConfigError { .. } => ErrorCategory::Configuration,
            QuoteError::SubmissionError { .. }
            | QuoteError::NotReadyToSubmit { .. }
            | QuoteError::AlreadySubmitted => ErrorCategory::Submission,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            QuoteError::AlreadySubmitted => ErrorSeverity::Low,
            QuoteError::ApiError(_) | QuoteError::SubmissionError { .. } => ErrorSeverity::Medium,
            QuoteError::TomlError(_)
            | QuoteError::ConfigError { .. }
            | QuoteError::ConfigValidationError { .. }
            | QuoteError::InvalidConfigValueError { .. }
            | QuoteError::MissingConfigError { .. }
            | QuoteError::NotReadyToSubmit { .. }
            | QuoteError::CsvError(_)
            | QuoteError::SerializationError(_) => ErrorSeverity::High,
            QuoteError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("The configuration could not be used: {}", self),
            ErrorCategory::Network => "A remote service could not be reached.".to_string(),
            ErrorCategory::Storage => format!("Reading or writing data failed: {}", self),
            ErrorCategory::Submission => format!("The quote request was not sent: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            QuoteError::ApiError(_) | QuoteError::SubmissionError { .. } => {
                "Check the endpoint URL and network connectivity, then submit again"
            }
            QuoteError::TomlError(_)
            | QuoteError::ConfigError { .. }
            | QuoteError::ConfigValidationError { .. }
            | QuoteError::InvalidConfigValueError { .. }
            | QuoteError::MissingConfigError { .. } => {
                "Fix the configuration file; every missing pricing value falls back to its default"
            }
            QuoteError::NotReadyToSubmit { .. } => "Complete every step before submitting",
            QuoteError::AlreadySubmitted => "Start a new session for another request",
            QuoteError::CsvError(_) | QuoteError::IoError(_) | QuoteError::SerializationError(_) => {
                "Check that input files exist and output directories are writable"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, QuoteError>;
