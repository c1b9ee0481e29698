use dashboard::{Query, QuerySnapshot};
use yew::prelude::*;

/// Re-render whenever `query` changes, fetching it on mount if nothing is
/// cached yet.
#[hook]
pub fn use_query_snapshot<T>(query: Query<T>) -> QuerySnapshot<T>
where
    T: Clone + 'static,
{
    let update = use_force_update();

    use_effect_with(query.clone(), move |query| {
        let subscription = query.subscribe(move |_| update.force_update());
        let query = query.clone();
        yew::platform::spawn_local(async move { query.ensure_fetched().await });
        move || drop(subscription)
    });

    query.snapshot()
}
