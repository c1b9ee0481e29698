use dashboard::QueryClient;
use payloads::APIClient;
use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod contexts;
mod hooks;
mod logs;
mod pages;
mod state;

use components::{Header, ToastContainer};
use contexts::toast::ToastProvider;
pub use state::{AuthState, State};

fn page_origin() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_default()
}

fn api_client_at(address: String) -> APIClient {
    APIClient {
        address,
        inner_client: reqwest::Client::new(),
    }
}

/// Client for the requests backend, configurable at build time with
/// `BACKEND_URL` and falling back to the page origin.
pub fn get_api_client() -> APIClient {
    let address = option_env!("BACKEND_URL")
        .map(|url| url.to_string())
        .unwrap_or_else(page_origin);
    api_client_at(address)
}

/// Client for the accept and cancel-donation endpoints, which may be served
/// from a separate host (`DONATION_BACKEND_URL`).
pub fn get_donation_api_client() -> APIClient {
    let address = option_env!("DONATION_BACKEND_URL")
        .or(option_env!("BACKEND_URL"))
        .map(|url| url.to_string())
        .unwrap_or_else(page_origin);
    api_client_at(address)
}

#[function_component]
pub fn App() -> Html {
    logs::init_logging();
    let query_client = use_state(QueryClient::new);

    html! {
        <ToastProvider>
            <ContextProvider<QueryClient> context={(*query_client).clone()}>
                <BrowserRouter>
                    <AppContent />
                </BrowserRouter>
            </ContextProvider<QueryClient>>
        </ToastProvider>
    }
}

#[function_component]
fn AppContent() -> Html {
    hooks::use_authentication();

    html! {
        <div class="min-h-screen bg-white dark:bg-gray-900 text-gray-900 dark:text-gray-100 transition-colors">
            <Header />
            <main class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8">
                <Switch<Route> render={switch} />
            </main>
            <ToastContainer />
        </div>
    }
}

#[derive(Clone, Routable, PartialEq)]
pub enum Route {
    #[at("/")]
    Dashboard,
    #[at("/available")]
    Available,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(routes: Route) -> Html {
    match routes {
        Route::Dashboard => html! { <pages::DashboardPage /> },
        Route::Available => html! { <pages::AvailablePage /> },
        Route::NotFound => html! { <pages::NotFoundPage /> },
    }
}
