//! The request state transitions, one HTTP call each.
//!
//! Accept and cancel-donation go to the donations host; the rest go to the
//! requests host. Callers pass whichever [`APIClient`] fits.

use payloads::{APIClient, requests::DonationAction};
use std::rc::Rc;

use crate::cache::{QueryClient, QueryKey};
use crate::keys;
use crate::mutation::Mutation;

pub type RequestMutation = Mutation<DonationAction>;

pub fn accept_request(client: &QueryClient, api: Rc<APIClient>) -> RequestMutation {
    Mutation::new(
        "accept-request",
        client,
        vec![QueryKey::new(keys::AVAILABLE_REQUESTS)],
        move |action: DonationAction| {
            let api = api.clone();
            async move { api.accept_request(&action).await }
        },
    )
}

pub fn cancel_donation(client: &QueryClient, api: Rc<APIClient>) -> RequestMutation {
    Mutation::new(
        "cancel-donation",
        client,
        vec![QueryKey::new(keys::AVAILABLE_REQUESTS)],
        move |action: DonationAction| {
            let api = api.clone();
            async move { api.cancel_donation(&action).await }
        },
    )
}

pub fn approve_request(client: &QueryClient, api: Rc<APIClient>) -> RequestMutation {
    Mutation::new(
        "approve-request",
        client,
        vec![QueryKey::new(keys::DASHBOARD)],
        move |action: DonationAction| {
            let api = api.clone();
            async move { api.approve_request(&action).await }
        },
    )
}

pub fn cancel_request(client: &QueryClient, api: Rc<APIClient>) -> RequestMutation {
    Mutation::new(
        "cancel-request",
        client,
        vec![QueryKey::new(keys::DASHBOARD)],
        move |action: DonationAction| {
            let api = api.clone();
            async move { api.cancel_request(&action).await }
        },
    )
}

pub fn delete_request(client: &QueryClient, api: Rc<APIClient>) -> RequestMutation {
    Mutation::new(
        "delete-request",
        client,
        vec![QueryKey::new(keys::DASHBOARD)],
        move |action: DonationAction| {
            let api = api.clone();
            async move { api.delete_request(&action).await }
        },
    )
}
