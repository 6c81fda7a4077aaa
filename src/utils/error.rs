use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

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

    #[error("Compression failed: {message}")]
    CompressionError { message: String },

    #[error("Prompt failed: {message}")]
    PromptError { message: String },

    #[error("Download of {url} failed with status {status}")]
    DownloadError { url: String, status: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Persistence,
    Encoding,
    Interaction,
    Network,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl GeneratorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            GeneratorError::ConfigError { .. }
            | GeneratorError::ConfigValidationError { .. }
            | GeneratorError::InvalidConfigValueError { .. }
            | GeneratorError::MissingConfigError { .. } => ErrorCategory::Configuration,
            GeneratorError::IoError(_) | GeneratorError::SerializationError(_) => {
                ErrorCategory::Persistence
            }
            GeneratorError::CompressionError { .. } => ErrorCategory::Encoding,
            GeneratorError::PromptError { .. } => ErrorCategory::Interaction,
            GeneratorError::HttpError(_) | GeneratorError::DownloadError { .. } => {
                ErrorCategory::Network
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Interaction => ErrorSeverity::High,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Persistence | ErrorCategory::Encoding => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Configuration => {
                "Check the config file and command line flags, then run again"
            }
            ErrorCategory::Persistence => {
                "Make sure the output directory is writable and data.json is valid JSON"
            }
            ErrorCategory::Encoding => "Inspect the generated .puml file for unusual content",
            ErrorCategory::Interaction => "Run the generator from an interactive terminal",
            ErrorCategory::Network => {
                "Check the rendering server address or open the printed URL manually"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            GeneratorError::IoError(e) => format!("Could not read or write a file: {}", e),
            GeneratorError::SerializationError(e) => {
                format!("The saved model could not be encoded: {}", e)
            }
            GeneratorError::HttpError(e) => format!("Could not reach the diagram server: {}", e),
            GeneratorError::DownloadError { url, status } => {
                format!("The diagram server answered {} for {}", status, url)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GeneratorError>;
