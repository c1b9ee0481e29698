use payloads::{ClientError, RequestStatus};

#[derive(Debug, thiserror::Error)]
pub enum ActionError {
    #[error("Authentication data not found.")]
    NotAuthenticated,
    /// The control for this action should have been disabled.
    #[error("{status} requests cannot be {action}")]
    Unavailable {
        action: &'static str,
        status: RequestStatus,
    },
    #[error(transparent)]
    Client(#[from] ClientError),
}
