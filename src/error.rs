// Error type shared by the reader, publishers and session loop

/// Every error ends the teleop session; there is no retry path.
#[derive(Debug, thiserror::Error)]
pub enum TeleopError {
    #[error("Terminal IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Zenoh error: {0}")]
    Zenoh(zenoh::Error),

    #[error("Failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Key reader task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

// zenoh::Error is a boxed trait object, so it cannot go through #[from]
impl From<zenoh::Error> for TeleopError {
    fn from(e: zenoh::Error) -> Self {
        TeleopError::Zenoh(e)
    }
}
