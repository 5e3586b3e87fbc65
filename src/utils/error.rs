use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("API request failed: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("API request to {endpoint} failed with HTTP {status}")]
    HttpStatusError { endpoint: String, status: u16 },

    #[error("No grade data available")]
    EmptyDataError,

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Export payload is not a spreadsheet package: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// The user-facing error kinds a notification can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Network,
    EmptyData,
    Internal,
}

impl TrackerError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ValidationError { .. } => ErrorKind::Validation,
            Self::NetworkError(_) | Self::HttpStatusError { .. } | Self::ZipError(_) => {
                ErrorKind::Network
            }
            Self::EmptyDataError => ErrorKind::EmptyData,
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::CsvError(_)
            | Self::IoError(_)
            | Self::SerializationError(_) => ErrorKind::Internal,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { message } => format!("Invalid input: {}", message),
            Self::NetworkError(_) | Self::HttpStatusError { .. } => {
                "Could not reach the grade server".to_string()
            }
            Self::ZipError(_) => "The server returned an unreadable report".to_string(),
            Self::EmptyDataError => "No grade data yet".to_string(),
            Self::ConfigError { .. }
            | Self::MissingConfigError { .. }
            | Self::InvalidConfigValueError { .. } => format!("Configuration problem: {}", self),
            Self::CsvError(_) | Self::IoError(_) => format!("Could not write output: {}", self),
            Self::SerializationError(_) => "The server sent malformed data".to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Validation => "Select a subject and enter numeric credits and grade",
            ErrorKind::Network => "Check that the backend is running, then submit again",
            ErrorKind::EmptyData => "Add at least one grade before computing the overall GPA",
            ErrorKind::Internal => "Check the configuration file and output directory",
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
