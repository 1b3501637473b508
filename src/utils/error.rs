use thiserror::Error;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("Invalid {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Container not found: {id}")]
    ContainerNotFound { id: String },

    #[error("Container {container_id} moved since it was read: expected {expected}, found {actual}")]
    StaleLocation {
        container_id: String,
        expected: String,
        actual: String,
    },

    #[error("Malformed row {row} in table '{table}': {message}")]
    MalformedRow {
        table: String,
        row: usize,
        message: String,
    },

    #[error("Partial write: {message}")]
    PartialWrite { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl From<reqwest::Error> for InventoryError {
    fn from(err: reqwest::Error) -> Self {
        InventoryError::StoreUnavailable {
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Store,
    Input,
    Data,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl InventoryError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        InventoryError::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn store_unavailable(message: impl Into<String>) -> Self {
        InventoryError::StoreUnavailable {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            InventoryError::StoreUnavailable { .. } | InventoryError::PartialWrite { .. } => {
                ErrorCategory::Store
            }
            InventoryError::ValidationError { .. }
            | InventoryError::ContainerNotFound { .. }
            | InventoryError::StaleLocation { .. } => ErrorCategory::Input,
            InventoryError::MalformedRow { .. }
            | InventoryError::CsvError(_)
            | InventoryError::SerializationError(_) => ErrorCategory::Data,
            InventoryError::ConfigError { .. }
            | InventoryError::InvalidConfigValueError { .. }
            | InventoryError::MissingConfigError { .. } => ErrorCategory::Configuration,
            InventoryError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Store | ErrorCategory::Data | ErrorCategory::Configuration => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Input errors can be fixed by resubmitting; everything else needs an operator.
    pub fn is_recoverable(&self) -> bool {
        self.category() == ErrorCategory::Input
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            InventoryError::StoreUnavailable { .. } => {
                "Check network access and that the store credentials are valid, then retry"
                    .to_string()
            }
            InventoryError::ValidationError { field, .. } => {
                format!("Correct the '{}' field and submit again", field)
            }
            InventoryError::ContainerNotFound { .. } => {
                "Reload the container list and pick an existing container".to_string()
            }
            InventoryError::StaleLocation { .. } => {
                "Reload the container and confirm the move from its current location".to_string()
            }
            InventoryError::MalformedRow { table, .. } => {
                format!("Fix the offending row in the '{}' table", table)
            }
            InventoryError::PartialWrite { .. } => {
                "Compare the containers and movements tables and repair the last movement by hand"
                    .to_string()
            }
            InventoryError::ConfigError { .. }
            | InventoryError::InvalidConfigValueError { .. }
            | InventoryError::MissingConfigError { .. } => {
                "Review the configuration file and environment variables".to_string()
            }
            InventoryError::IoError(_) => "Check file permissions and disk space".to_string(),
            InventoryError::CsvError(_) | InventoryError::SerializationError(_) => {
                "Check that the stored data is well formed".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            InventoryError::StoreUnavailable { .. } => {
                "Could not reach the inventory store".to_string()
            }
            InventoryError::ValidationError { field, message } => {
                format!("Invalid value for {}: {}", field, message)
            }
            InventoryError::ContainerNotFound { id } => {
                format!("Container '{}' does not exist", id)
            }
            InventoryError::StaleLocation {
                container_id,
                actual,
                ..
            } => format!(
                "Container '{}' was moved by someone else and is now at {}",
                container_id, actual
            ),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InventoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_recoverable() {
        let err = InventoryError::ContainerNotFound {
            id: "C9".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_store_errors_are_not_recoverable() {
        let err = InventoryError::store_unavailable("connection refused");
        assert_eq!(err.category(), ErrorCategory::Store);
        assert!(!err.is_recoverable());
        assert_eq!(err.to_string(), "Store unavailable: connection refused");
    }

    #[test]
    fn test_every_error_is_at_least_medium_severity() {
        let io = InventoryError::IoError(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert_eq!(io.severity(), ErrorSeverity::Critical);

        let partial = InventoryError::PartialWrite {
            message: "movement lost".to_string(),
        };
        assert_eq!(partial.severity(), ErrorSeverity::High);

        let missing = InventoryError::MissingConfigError {
            field: "store.csv".to_string(),
        };
        assert!(missing.severity() > ErrorSeverity::Medium);
    }

    #[test]
    fn test_validation_message_names_field() {
        let err = InventoryError::validation("length_feet", "must not be negative");
        assert_eq!(
            err.user_friendly_message(),
            "Invalid value for length_feet: must not be negative"
        );
        assert!(err.recovery_suggestion().contains("length_feet"));
    }
}
