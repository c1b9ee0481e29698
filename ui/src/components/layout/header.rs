use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use crate::hooks::use_logout;
use crate::{Route, State};

#[function_component]
pub fn Header() -> Html {
    let (state, _) = use_store::<State>();
    let on_logout = use_logout();

    let link_class = "text-sm font-medium text-gray-600 dark:text-gray-300 hover:text-gray-900 dark:hover:text-white";

    html! {
        <header class="bg-white dark:bg-gray-800 border-b border-gray-200 dark:border-gray-700">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <div class="flex items-center space-x-8">
                        <h1 class="text-xl font-semibold text-red-600 dark:text-red-400">{"Blood Donation"}</h1>
                        <nav class="flex space-x-4">
                            <Link<Route> to={Route::Dashboard} classes={classes!(link_class)}>{"My Requests"}</Link<Route>>
                            <Link<Route> to={Route::Available} classes={classes!(link_class)}>{"Available Requests"}</Link<Route>>
                        </nav>
                    </div>
                    <div class="flex items-center space-x-4">
                        {match state.user_id() {
                            Some(user_id) => html! {
                                <span class="text-sm text-gray-500 dark:text-gray-400">
                                    {format!("User #{user_id}")}
                                </span>
                            },
                            None => html! {},
                        }}
                        if state.is_authenticated() {
                            <button onclick={on_logout} class={link_class}>{"Log out"}</button>
                        }
                    </div>
                </div>
            </div>
        </header>
    }
}
