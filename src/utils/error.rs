use thiserror::Error;

#[derive(Error, Debug)]
pub enum EduError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Form element '{id}' not found")]
    MissingElement { id: String },

    #[error("Invalid input '{value}' for '{field}': {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Catalog error: {message}")]
    CatalogError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Network,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EduError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EduError::ConfigValidationError { .. }
            | EduError::MissingConfigError { .. }
            | EduError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            EduError::MissingElement { .. } | EduError::InvalidInput { .. } => {
                ErrorCategory::Input
            }
            EduError::HttpError(_) => ErrorCategory::Network,
            EduError::CsvError(_) | EduError::SerializationError(_) | EduError::CatalogError { .. } => {
                ErrorCategory::Data
            }
            EduError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給使用者看的訊息，不含內部細節
    pub fn user_friendly_message(&self) -> String {
        match self {
            EduError::MissingElement { id } => {
                format!("The form is missing the '{}' field", id)
            }
            EduError::InvalidInput { field, reason, .. } => {
                format!("Please check '{}': {}", field, reason)
            }
            EduError::HttpError(_) => "Could not download the learning catalog".to_string(),
            EduError::CatalogError { .. }
            | EduError::CsvError(_)
            | EduError::SerializationError(_) => {
                "The learning catalog could not be read".to_string()
            }
            EduError::ConfigValidationError { .. }
            | EduError::MissingConfigError { .. }
            | EduError::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
            EduError::IoError(_) => "A file could not be read or written".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            EduError::MissingElement { .. } => "Provide every preference field",
            EduError::InvalidInput { .. } => {
                "Use beginner/intermediate/advanced and a whole number of minutes"
            }
            EduError::HttpError(_) => "Check the catalog URL and your network connection",
            EduError::CatalogError { .. }
            | EduError::CsvError(_)
            | EduError::SerializationError(_) => {
                "Verify the catalog file format (JSON array or CSV with a header row)"
            }
            EduError::ConfigValidationError { .. }
            | EduError::MissingConfigError { .. }
            | EduError::InvalidConfigValueError { .. } => "Fix the configuration file and retry",
            EduError::IoError(_) => "Check file paths and permissions",
        }
    }

    pub(crate) fn invalid_input(field: &str, value: &str, reason: impl Into<String>) -> Self {
        EduError::InvalidInput {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EduError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_low_severity() {
        let err = EduError::invalid_input("availableTime", "abc", "not a number");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.user_friendly_message().contains("availableTime"));
    }

    #[test]
    fn test_catalog_errors_are_high_severity() {
        let err = EduError::CatalogError {
            message: "empty file".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.to_string(), "Catalog error: empty file");
    }
}
