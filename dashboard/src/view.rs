use crate::cache::{FetchState, Query};

/// What the list area of a page should show.
#[derive(Debug, Clone, PartialEq)]
pub enum ListView<R> {
    Loading,
    /// The fetch failed; a notification has already been shown, so the list
    /// area stays blank.
    Failed,
    Empty,
    Rows(Vec<R>),
}

impl<R> ListView<R> {
    /// Derive the list area straight from the cached query. Rows are built
    /// from the cached data in reverse server order (most recent first).
    pub fn from_query<T, I>(
        query: &Query<T>,
        items: impl FnOnce(&T) -> &[I],
        row: impl Fn(&I) -> R,
    ) -> Self
    where
        T: Clone + 'static,
    {
        let snapshot = query.snapshot();
        if snapshot.is_error() {
            return Self::Failed;
        }
        match &snapshot.data {
            // An enabled query is about to fetch even if it has not started
            FetchState::NotFetched if query.is_enabled() => Self::Loading,
            FetchState::NotFetched => Self::Empty,
            FetchState::Fetched(data) => {
                let items = items(data);
                if items.is_empty() {
                    Self::Empty
                } else {
                    Self::Rows(items.iter().rev().map(row).collect())
                }
            }
        }
    }

    pub fn rows(&self) -> &[R] {
        match self {
            Self::Rows(rows) => rows,
            _ => &[],
        }
    }
}

/// A secondary button such as Cancel or Delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionControl {
    /// Allowed for the row's current status.
    pub enabled: bool,
    /// This row's action is in flight.
    pub busy: bool,
}

impl ActionControl {
    pub fn new(enabled: bool, busy: bool) -> Self {
        Self { enabled, busy }
    }

    pub fn is_clickable(&self) -> bool {
        self.enabled && !self.busy
    }
}
