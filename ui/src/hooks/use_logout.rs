use crate::{Route, State};
use yew::prelude::*;
use yew_router::prelude::*;
use yewdux::prelude::*;

use super::use_authentication::clear_stored_user;

#[hook]
pub fn use_logout() -> Callback<MouseEvent> {
    let (_, dispatch) = use_store::<State>();
    let navigator = use_navigator();

    Callback::from(move |_| {
        clear_stored_user();
        dispatch.reduce_mut(|state| state.logout());
        if let Some(navigator) = &navigator {
            navigator.push(&Route::Dashboard);
        }
    })
}
