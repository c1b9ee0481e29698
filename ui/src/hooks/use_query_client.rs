use dashboard::QueryClient;
use yew::prelude::*;

/// The app-wide query cache provided by `App`.
#[hook]
pub fn use_query_client() -> QueryClient {
    use_context::<QueryClient>()
        .expect("use_query_client must be used within App")
}
