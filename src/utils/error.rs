use thiserror::Error;

#[derive(Error, Debug)]
pub enum PricingError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV export error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid input for '{field}': {reason}")]
    InvalidInputError { field: String, reason: String },

    #[error("Missing required field: {field}")]
    MissingRequiredField { field: String },

    #[error("Unsupported tax regime: '{value}'")]
    UnsupportedRegime { value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Output,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit status for a failed run. Every failure is non-zero.
    pub fn exit_code(&self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl PricingError {
    pub fn missing(field: &str) -> Self {
        Self::MissingRequiredField {
            field: field.to_string(),
        }
    }

    pub fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidInputError {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::InvalidInputError { .. }
            | Self::MissingRequiredField { .. }
            | Self::UnsupportedRegime { .. } => ErrorCategory::Input,
            Self::SerializationError(_) | Self::CsvError(_) => ErrorCategory::Output,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::MissingRequiredField { .. } => ErrorSeverity::Medium,
            Self::InvalidInputError { .. }
            | Self::UnsupportedRegime { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. } => ErrorSeverity::High,
            Self::SerializationError(_) | Self::CsvError(_) | Self::IoError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::MissingRequiredField { field } => {
                format!("Fill in all required fields ({} is empty)", field)
            }
            Self::UnsupportedRegime { value } => format!(
                "'{}' is not a supported tax regime",
                value
            ),
            Self::InvalidInputError { field, reason } => format!("{}: {}", field, reason),
            Self::ConfigValidationError { field, message } => {
                format!("Configuration problem in {}: {}", field, message)
            }
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value {} is invalid: {}", field, reason)
            }
            Self::IoError(e) => format!("Could not read or write a file: {}", e),
            Self::SerializationError(e) => format!("Could not produce JSON output: {}", e),
            Self::CsvError(e) => format!("Could not produce CSV output: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::MissingRequiredField { .. } => "Provide the missing value and submit again",
            Self::UnsupportedRegime { .. } => {
                "Use one of: MEI, Simples Nacional, Lucro Presumido, Autônomo"
            }
            Self::InvalidInputError { .. } => "Check the value ranges and submit again",
            Self::ConfigValidationError { .. } | Self::InvalidConfigValueError { .. } => {
                "Fix the configuration file and run again"
            }
            Self::IoError(_) => "Check that the file exists and is readable",
            Self::SerializationError(_) | Self::CsvError(_) => "Try the text output format",
        }
    }
}

pub type Result<T> = std::result::Result<T, PricingError>;
