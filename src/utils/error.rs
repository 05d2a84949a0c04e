use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

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

    #[error("Reference data error: {message}")]
    ReferenceDataError { message: String },

    #[error("Not found: {what}")]
    NotFoundError { what: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    ReferenceData,
    Storage,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl ErrorSeverity {
    /// Process exit code for a failed command.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

impl PlannerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PlannerError::ConfigValidationError { .. }
            | PlannerError::InvalidConfigValueError { .. }
            | PlannerError::MissingConfigError { .. } => ErrorCategory::Configuration,
            PlannerError::CsvError(_) | PlannerError::ReferenceDataError { .. } => {
                ErrorCategory::ReferenceData
            }
            PlannerError::IoError(_) => ErrorCategory::Storage,
            PlannerError::SerializationError(_) | PlannerError::NotFoundError { .. } => {
                ErrorCategory::Input
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::ReferenceData => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PlannerError::IoError(_) => "Check that the file exists and is readable",
            PlannerError::SerializationError(_) => {
                "Check that the snapshot file is valid JSON with the expected fields"
            }
            PlannerError::CsvError(_) => {
                "Check the course table columns: code,name,category,institutions,subjects"
            }
            PlannerError::ConfigValidationError { .. } => "Fix the TOML syntax in the config file",
            PlannerError::InvalidConfigValueError { .. } => {
                "Adjust the value to the documented range"
            }
            PlannerError::MissingConfigError { .. } => "Add the missing field to the config file",
            PlannerError::ReferenceDataError { .. } => {
                "Verify the reference tables, or remove the override to use the built-in tables"
            }
            PlannerError::NotFoundError { .. } => "Check the student id and the data directory",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PlannerError::IoError(e) => format!("Could not access a file: {}", e),
            PlannerError::SerializationError(e) => format!("Could not read student data: {}", e),
            PlannerError::CsvError(e) => format!("Could not read a course table: {}", e),
            PlannerError::NotFoundError { what } => format!("Nothing found for {}", what),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
