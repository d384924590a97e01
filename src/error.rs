//! Failures talking to the activity service and the text users see for them.

/// Shown in place of the activity list when the catalog cannot be loaded.
pub const LOAD_FAILED: &str = "Failed to load activities. Please try again later.";

/// Shown when the server rejects a mutation without a `detail`.
pub const GENERIC_ERROR: &str = "An error occurred";

pub const SIGNUP_FAILED: &str = "Failed to sign up. Please try again.";
pub const UNREGISTER_FAILED: &str = "Failed to unregister. Please try again.";

pub type Result<T> = core::result::Result<T, ServiceError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The request never produced a response (network down, CORS, aborted).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Status { status: u16, detail: Option<String> },

    /// The body was not the JSON we expected.
    #[error("decode error: {0}")]
    Decode(String),
}

impl ServiceError {
    /// Server-provided explanation, if the failure carried one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

impl From<gloo_net::Error> for ServiceError {
    fn from(e: gloo_net::Error) -> Self {
        match e {
            gloo_net::Error::SerdeError(e) => Self::Decode(e.to_string()),
            other => Self::Transport(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ServiceError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
