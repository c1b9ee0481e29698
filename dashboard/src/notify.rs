use std::cell::Cell;
use std::rc::Rc;

use crate::cache::Query;
use crate::observer::Subscription;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Default,
    Success,
    Destructive,
}

/// A user facing message, shown by whatever toast mechanism the front-end
/// provides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub variant: Variant,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn new(
        variant: Variant,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            variant,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn destructive(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(Variant::Destructive, title, description)
    }

    pub fn success(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(Variant::Success, title, description)
    }

    pub fn authentication_failed() -> Self {
        Self::destructive(
            "Authentication failed",
            "Authentication data not found.",
        )
    }

    pub fn fetch_failed() -> Self {
        Self::destructive(
            "Something went wrong",
            "Could not get the data from server.",
        )
    }
}

pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Show [`Notification::fetch_failed`] each time `query` moves into the
/// error state, and once on attach if it has already failed. Refetches that
/// fail again while the error is still showing do not repeat it.
pub fn notify_fetch_failures<T: Clone + 'static>(
    query: &Query<T>,
    notifier: Rc<dyn Notifier>,
) -> Subscription {
    let current = query.snapshot();
    let failed = Cell::new(!current.is_loading && current.is_error());
    if failed.get() {
        notifier.notify(Notification::fetch_failed());
    }
    query.subscribe(move |snapshot| {
        // A refetch clears the error while it runs
        if snapshot.is_loading {
            return;
        }
        let is_error = snapshot.is_error();
        if is_error && !failed.get() {
            notifier.notify(Notification::fetch_failed());
        }
        failed.set(is_error);
    })
}
