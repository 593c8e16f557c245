use eventra_core::{CoreError, Ui};

/// Shown when the backend rejects a call without saying why.
pub const FALLBACK_MESSAGE: &str = "Failed";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The gateway gave up on the session and already redirected to login.
    #[error("Authentication required")]
    AuthRequired,
    /// Non-success answer from the backend, carrying its message verbatim.
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Network(#[from] CoreError),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Handler-boundary reporting for a user action.
    pub fn report(&self, ui: &dyn Ui) {
        match self {
            ClientError::AuthRequired => tracing::debug!("Action abandoned after logout"),
            ClientError::Validation(msg) => ui.alert(msg),
            ClientError::Network(e) => tracing::error!("Request failed: {}", e),
        }
    }

    /// Reporting for background loads, which never alert.
    pub fn log(&self, what: &str) {
        match self {
            ClientError::Network(e) => tracing::error!("Loading {} failed: {}", what, e),
            other => tracing::debug!("Loading {} skipped: {}", what, other),
        }
    }
}
