use yew::prelude::*;

use crate::components::AvailableRequestsTable;
use crate::hooks::use_available_requests;

/// Requests from other users that the signed in donor can help with.
#[function_component]
pub fn AvailablePage() -> Html {
    let page = use_available_requests();
    let version = page.version();

    html! {
        <section class="space-y-6">
            <h2 class="text-2xl font-bold">{"Available Requests"}</h2>
            <AvailableRequestsTable {page} {version} />
        </section>
    }
}
