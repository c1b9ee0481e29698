use payloads::{APIClient, DonationRequest, UserId, responses};
use std::rc::Rc;

use crate::cache::{Query, QueryClient};
use crate::keys;

/// The requester's dashboard, keyed by user. Disabled without a user id.
pub fn dashboard_query(
    client: &QueryClient,
    api: Rc<APIClient>,
    user_id: Option<UserId>,
) -> Query<responses::Dashboard> {
    let key = keys::dashboard(user_id);
    let Some(user_id) = user_id else {
        return Query::disabled(key);
    };
    client.query(key, move || {
        let api = api.clone();
        async move { api.dashboard(user_id).await.map_err(|e| e.to_string()) }
    })
}

pub fn available_requests_query(
    client: &QueryClient,
    api: Rc<APIClient>,
    donor_id: Option<UserId>,
) -> Query<Vec<DonationRequest>> {
    let key = keys::available_requests(donor_id);
    let Some(donor_id) = donor_id else {
        return Query::disabled(key);
    };
    client.query(key, move || {
        let api = api.clone();
        async move {
            api.available_requests(donor_id)
                .await
                .map_err(|e| e.to_string())
        }
    })
}

pub fn donor_details_query(
    client: &QueryClient,
    api: Rc<APIClient>,
    donor_id: UserId,
) -> Query<responses::DonorDetails> {
    client.query(keys::donor_details(donor_id), move || {
        let api = api.clone();
        async move {
            api.donor_details(donor_id).await.map_err(|e| e.to_string())
        }
    })
}
