use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("failed to reach generation endpoint: {0}")]
    Connect(String),

    #[error("generation endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected generation failure: {0}")]
    Unexpected(String),
}

impl GenerationError {
    /// Short text shown to the user in place of a generated value.
    pub fn label(&self) -> String {
        match self {
            GenerationError::Connect(_) => "Error connecting to generation service".to_owned(),
            GenerationError::Status { status, .. } => format!("HTTP error: {status}"),
            GenerationError::Unexpected(_) => "Unexpected error".to_owned(),
        }
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() || err.is_request() {
            GenerationError::Connect(err.to_string())
        } else {
            GenerationError::Unexpected(err.to_string())
        }
    }
}
