mod available;
mod client;
mod donor;
mod my_requests;

use dashboard::{MyRequests, Notification, Notifier, QueryClient};
use payloads::{UserData, UserId};
use std::cell::RefCell;
use std::rc::Rc;
use test_helpers::TestApp;

/// Collects notifications instead of showing them.
#[derive(Default)]
pub struct RecordingNotifier {
    seen: RefCell<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn seen(&self) -> Vec<Notification> {
        self.seen.borrow().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.borrow_mut().push(notification);
    }
}

pub fn signed_in(id: i64) -> Option<UserData> {
    Some(UserData {
        user_id: Some(UserId(id)),
        token: Some("token".into()),
    })
}

pub fn my_requests(
    app: &TestApp,
    user: Option<UserData>,
) -> (MyRequests, Rc<RecordingNotifier>) {
    let notifier = Rc::new(RecordingNotifier::default());
    let page = MyRequests::new(
        &QueryClient::new(),
        Rc::new(app.api_client()),
        user,
        notifier.clone(),
    );
    (page, notifier)
}
