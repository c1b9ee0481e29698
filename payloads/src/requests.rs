use crate::{RequestId, UserId};
use serde::{Deserialize, Serialize};

/// Input shared by every request state transition.
///
/// The backend takes both ids from the URL, so nothing is sent in the body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DonationAction {
    pub donor_id: UserId,
    pub request_id: RequestId,
}

/// `?donor_id=` query string appended to transition and listing endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DonorQuery {
    pub donor_id: UserId,
}

/// `?user_id=` query string for the dashboard summary.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UserQuery {
    pub user_id: UserId,
}
