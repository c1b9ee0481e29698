use payloads::{UserData, UserId};
use yewdux::prelude::*;

#[derive(Clone, PartialEq, Default)]
pub enum AuthState {
    #[default]
    Unknown,
    LoggedOut,
    LoggedIn(UserData),
}

#[derive(Default, Clone, PartialEq, Store)]
pub struct State {
    /// Managed by use_authentication
    pub auth_state: AuthState,
}

impl State {
    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth_state, AuthState::LoggedIn(_))
    }

    /// Stored user data, if any. Its `user_id` may still be missing.
    pub fn user(&self) -> Option<&UserData> {
        match &self.auth_state {
            AuthState::LoggedIn(user) => Some(user),
            _ => None,
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        self.user().and_then(|user| user.user_id)
    }

    pub fn logout(&mut self) {
        self.auth_state = AuthState::LoggedOut;
    }
}
