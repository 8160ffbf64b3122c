/// Errors surfaced by every client call.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Http {
        status: u16,
        /// Machine-readable `code` from the error body, when present.
        code: Option<String>,
        message: String,
    },

    /// A 2xx body that did not match the expected shape.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The call needs a session and none is active.
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("WebSocket error: {0}")]
    WebSocket(String),
}

impl ClientError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::NotAuthenticated) || self.status() == Some(401)
    }
}
