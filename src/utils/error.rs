use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl GenerateError {
    pub fn processing(message: impl Into<String>) -> Self {
        Self::ProcessingError {
            message: message.into(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GenerateError::IoError(_) => {
                "Check that the output directory exists, is writable and has free space"
            }
            GenerateError::SerializationError(_) => "Re-run the generator; records have a fixed shape",
            GenerateError::ProcessingError { .. } => "Re-run the generator from scratch",
            GenerateError::InvalidConfigValueError { .. } => "Fix the command line arguments",
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerateError>;
