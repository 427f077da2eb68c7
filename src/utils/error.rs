use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Source workbook unavailable at '{path}': {message}")]
    SourceUnavailable { path: String, message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Duplicate entry: {message}")]
    Duplicate { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Source,
    Data,
    Storage,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AtlasError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => ErrorCategory::Configuration,
            Self::SourceUnavailable { .. } => ErrorCategory::Source,
            Self::NotFound { .. } | Self::Duplicate { .. } | Self::ValidationError { .. } => {
                ErrorCategory::Data
            }
            Self::IoError(_) => ErrorCategory::Storage,
            Self::ZipError(_) | Self::CsvError(_) | Self::SerializationError(_) => {
                ErrorCategory::Output
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Data => match self {
                Self::NotFound { .. } => ErrorSeverity::Low,
                _ => ErrorSeverity::Medium,
            },
            ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Source | ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::SourceUnavailable { .. } => {
                "Check that the workbook path points to a readable .xlsx file and the sheet index exists"
            }
            Self::NotFound { .. } => "Verify the country exists and has at least one bachelor program",
            Self::Duplicate { .. } => "Use a different name or duration, or update the existing entry",
            Self::ValidationError { .. } => "Correct the offending field and retry",
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::ConfigValidationError { .. } => {
                "Review the command-line flags or TOML configuration file"
            }
            Self::IoError(_) => "Check file permissions and available disk space",
            Self::ZipError(_) | Self::CsvError(_) | Self::SerializationError(_) => {
                "Retry the export; disable compression if the problem persists"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::SourceUnavailable { path, .. } => {
                format!("Could not open the education matrix workbook '{}'", path)
            }
            Self::NotFound { message } => format!("No data: {}", message),
            Self::Duplicate { message } => format!("Already exists: {}", message),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AtlasError>;
