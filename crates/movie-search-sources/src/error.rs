use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum SourceError {
    /// The API answered `Response: "False"` (no match, unknown id, too many results)
    #[error("{0}")]
    NotFound(String),

    /// The API rejected the key (HTTP 401)
    #[error("API key rejected: {0}")]
    Unauthorized(String),

    /// Connection, timeout or TLS failure
    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected response status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl SourceError {
    /// Failures of the transport or the payload, as opposed to an answer from the API
    pub fn is_network(&self) -> bool {
        matches!(
            self,
            SourceError::Transport(_) | SourceError::Status { .. } | SourceError::Decode(_)
        )
    }
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SourceError::Decode(err.to_string())
        } else {
            SourceError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Decode(err.to_string())
    }
}
