use thiserror::Error;

/// Input problems caught before any request leaves the process.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a prompt.")]
    MissingPrompt,
    #[error("Please upload at least one image to edit.")]
    MissingReferenceImage,
    #[error("Batch size must be between 1 and 4, got {0}")]
    BatchSizeOutOfRange(u8),
    #[error("Batch size is fixed to 1 for the selected model")]
    BatchSizeLocked,
    #[error("Unsupported aspect ratio: {0}")]
    UnsupportedAspectRatio(String),
    #[error("Reference images are only used by {0}.")]
    UploadsNotAccepted(String),
}

#[derive(Debug, Error)]
pub enum StudioError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Upload error: {0}")]
    Upload(String),
    #[error("Request error: {0}")]
    Request(String),
    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },
    #[error("Response error: {0}")]
    Response(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("A generation is already in progress")]
    Busy,
    /// Transport or service failure wrapped with the message the user sees.
    /// The underlying cause is kept as the error source for diagnostics.
    #[error("{user_message}")]
    Generation {
        user_message: String,
        #[source]
        source: Box<StudioError>,
    },
}

impl StudioError {
    pub fn generation(user_message: impl Into<String>, source: StudioError) -> Self {
        StudioError::Generation {
            user_message: user_message.into(),
            source: Box::new(source),
        }
    }

    /// Message safe to put in front of the user. Raw service details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            StudioError::Validation(e) => e.to_string(),
            StudioError::Generation { user_message, .. } => user_message.clone(),
            StudioError::Upload(_) => "Error reading uploaded files.".to_string(),
            StudioError::Busy => "A generation is already in progress.".to_string(),
            other => other.to_string(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, StudioError::Validation(_))
    }
}

impl From<reqwest::Error> for StudioError {
    fn from(e: reqwest::Error) -> Self {
        StudioError::Request(e.to_string())
    }
}

impl From<serde_json::Error> for StudioError {
    fn from(e: serde_json::Error) -> Self {
        StudioError::Serialization(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;
