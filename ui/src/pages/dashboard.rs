use yew::prelude::*;

use crate::components::MyRequestsTable;
use crate::hooks::use_my_requests;

#[function_component]
pub fn DashboardPage() -> Html {
    let page = use_my_requests();
    let version = page.version();

    html! {
        <section class="space-y-6">
            <h2 class="text-2xl font-bold">{"My Requests"}</h2>
            <MyRequestsTable {page} {version} />
        </section>
    }
}
