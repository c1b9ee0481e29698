//! Cache keys shared by queries and the mutations that invalidate them.

use payloads::UserId;

use crate::cache::QueryKey;

pub const DASHBOARD: &str = "dashboard";
pub const AVAILABLE_REQUESTS: &str = "available-requests";
pub const DONOR_DETAILS: &str = "donor-details";

/// Per-user dashboard entry. Anonymous sessions get their own key so a later
/// sign-in never reuses their (empty) state.
pub fn dashboard(user_id: Option<UserId>) -> QueryKey {
    with_user(QueryKey::new(DASHBOARD), user_id)
}

pub fn available_requests(donor_id: Option<UserId>) -> QueryKey {
    with_user(QueryKey::new(AVAILABLE_REQUESTS), donor_id)
}

pub fn donor_details(donor_id: UserId) -> QueryKey {
    QueryKey::new(DONOR_DETAILS).with(donor_id)
}

fn with_user(key: QueryKey, user_id: Option<UserId>) -> QueryKey {
    match user_id {
        Some(user_id) => key.with(user_id),
        None => key.with("anonymous"),
    }
}
