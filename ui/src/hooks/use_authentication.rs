use payloads::UserData;
use yew::prelude::*;
use yewdux::prelude::*;

use crate::{AuthState, State};

/// localStorage key holding the signed in user's data as JSON.
pub const USER_DATA_KEY: &str = "user-data";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

/// Read the stored user, treating unreadable data as signed out.
pub fn stored_user() -> Option<UserData> {
    let raw = local_storage()?.get_item(USER_DATA_KEY).ok()??;
    match serde_json::from_str(&raw) {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::warn!("Ignoring malformed {USER_DATA_KEY}: {e}");
            None
        }
    }
}

pub fn clear_stored_user() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(USER_DATA_KEY);
    }
}

/// Hook to restore authentication data on startup
#[hook]
pub fn use_authentication() {
    let (_state, dispatch) = use_store::<State>();

    use_effect_with((), move |_| {
        let auth_state = match stored_user() {
            Some(user) => AuthState::LoggedIn(user),
            None => AuthState::LoggedOut,
        };
        dispatch.reduce_mut(|state| state.auth_state = auth_state);
    });
}
