use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssemblyError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned {status} for {url}")]
    ApiStatusError { status: u16, url: String },

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid period {field} '{value}': {reason}")]
    PeriodFormatError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Network,
    InputData,
    Output,
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AssemblyError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::ApiError(_) | Self::ApiStatusError { .. } => ErrorCategory::Network,
            Self::SerializationError(_) | Self::PeriodFormatError { .. } => {
                ErrorCategory::InputData
            }
            Self::ZipError(_) | Self::CsvError(_) | Self::IoError(_) => ErrorCategory::Output,
            Self::ProcessingError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::InputData => ErrorSeverity::High,
            ErrorCategory::Output | ErrorCategory::Internal => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::ApiError(_) | Self::ApiStatusError { .. } => {
                "Check that the data URL is reachable and returns JSON, then retry".to_string()
            }
            Self::PeriodFormatError { .. } => {
                "Project periods must use MM.YYYY, or \"present\" for the end date".to_string()
            }
            Self::SerializationError(_) => {
                "Check the data file against the expected personal_info / skills / projects layout"
                    .to_string()
            }
            Self::InvalidConfigValueError { field, .. }
            | Self::ConfigValidationError { field, .. }
            | Self::MissingConfigError { field } => {
                format!("Fix the `{}` setting and run again", field)
            }
            Self::IoError(_) => {
                "Verify the input path exists and the output directory is writable".to_string()
            }
            Self::ZipError(_) | Self::CsvError(_) => {
                "Remove any partial bundle in the output directory and retry".to_string()
            }
            Self::ProcessingError { .. } => {
                "Run with --verbose to see which record failed".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Network => format!("Could not fetch CV data: {}", self),
            ErrorCategory::InputData => format!("CV data is invalid: {}", self),
            ErrorCategory::Output => format!("Could not write the CV bundle: {}", self),
            ErrorCategory::Internal => format!("Unexpected failure: {}", self),
        }
    }

    /// Process exit code for the binaries.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, AssemblyError>;
