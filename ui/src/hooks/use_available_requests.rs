use dashboard::AvailableRequests;
use std::rc::Rc;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::contexts::toast::use_toast;
use crate::{State, get_api_client, get_donation_api_client};

use super::use_query_client;

#[hook]
pub fn use_available_requests() -> AvailableRequests {
    let client = use_query_client();
    let (state, _) = use_store::<State>();
    let toasts = use_toast();

    let page = use_memo(
        (client, state.user().cloned()),
        move |(client, user)| {
            AvailableRequests::new(
                client,
                Rc::new(get_api_client()),
                Rc::new(get_donation_api_client()),
                user.clone(),
                Rc::new(toasts),
            )
        },
    );

    let update = use_force_update();
    use_effect_with(page.clone(), move |page| {
        let subscription = page.subscribe(move || update.force_update());
        let page = (**page).clone();
        yew::platform::spawn_local(async move { page.load().await });
        move || drop(subscription)
    });

    (*page).clone()
}
