//! Client side cache of fetched server data.
//!
//! Every cached read is a [`Query`] registered on a shared [`QueryClient`]
//! under a [`QueryKey`]. Mutations invalidate keys by prefix, which refetches
//! every live query under that prefix. Views learn about new states through
//! [`Query::subscribe`] rather than polling.

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::Future;
use std::rc::{Rc, Weak};

use crate::observer::{Observers, Subscription};

/// Hierarchical cache key, e.g. `dashboard/42`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new(root: impl Into<String>) -> Self {
        Self(vec![root.into()])
    }

    pub fn with(mut self, part: impl ToString) -> Self {
        self.0.push(part.to_string());
        self
    }

    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.starts_with(&prefix.0)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// Distinguishes "never fetched" from "fetched, possibly empty".
#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    NotFetched,
    Fetched(T),
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::NotFetched
    }
}

impl<T> FetchState<T> {
    pub fn is_fetched(&self) -> bool {
        matches!(self, Self::Fetched(_))
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Self::NotFetched => None,
            Self::Fetched(data) => Some(data),
        }
    }
}

/// The observable state of a query at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct QuerySnapshot<T> {
    /// Last successfully fetched data. Kept through failed refetches.
    pub data: FetchState<T>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> Default for QuerySnapshot<T> {
    fn default() -> Self {
        Self {
            data: FetchState::NotFetched,
            is_loading: false,
            error: None,
        }
    }
}

impl<T> QuerySnapshot<T> {
    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    /// Returns true if this is the initial load (data not yet fetched,
    /// currently loading, and no error).
    pub fn is_initial_loading(&self) -> bool {
        self.is_loading && !self.data.is_fetched() && self.error.is_none()
    }
}

type Fetcher<T> = Box<dyn Fn() -> LocalBoxFuture<'static, Result<T, String>>>;

trait ActiveQuery {
    fn refetch(self: Rc<Self>) -> LocalBoxFuture<'static, ()>;
}

struct Entry {
    key: QueryKey,
    query: Weak<dyn ActiveQuery>,
    any: Weak<dyn Any>,
}

/// Registry of live queries, shared by everything that reads or mutates
/// server data.
#[derive(Clone, Default)]
pub struct QueryClient {
    entries: Rc<RefCell<Vec<Entry>>>,
}

impl PartialEq for QueryClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.entries, &other.entries)
    }
}

impl QueryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the live query cached under `key`, or register a new one that
    /// fetches with `fetch_fn`.
    ///
    /// Queries stay registered for as long as a [`Query`] handle to them is
    /// alive.
    pub fn query<T, F, Fut>(&self, key: QueryKey, fetch_fn: F) -> Query<T>
    where
        T: Clone + 'static,
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<T, String>> + 'static,
    {
        if let Some(existing) = self.find::<T>(&key) {
            return existing;
        }

        let fetcher: Fetcher<T> = Box::new(move || fetch_fn().boxed_local());
        let inner = Rc::new(QueryInner {
            key: key.clone(),
            fetcher: Some(fetcher),
            snapshot: RefCell::new(QuerySnapshot::default()),
            observers: Observers::default(),
            fetches: Cell::new(0),
            generation: Cell::new(0),
        });

        let query: Weak<dyn ActiveQuery> = Rc::downgrade(&inner) as _;
        let any: Weak<dyn Any> = Rc::downgrade(&inner) as _;
        self.entries.borrow_mut().push(Entry { key, query, any });

        Query { inner }
    }

    fn find<T: Clone + 'static>(&self, key: &QueryKey) -> Option<Query<T>> {
        let mut entries = self.entries.borrow_mut();
        entries.retain(|entry| entry.query.strong_count() > 0);
        entries
            .iter()
            .filter(|entry| &entry.key == key)
            .find_map(|entry| {
                entry.any.upgrade()?.downcast::<QueryInner<T>>().ok()
            })
            .map(|inner| Query { inner })
    }

    /// Keys of every live query.
    pub fn keys(&self) -> Vec<QueryKey> {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.query.strong_count() > 0)
            .map(|entry| entry.key.clone())
            .collect()
    }

    /// Mark everything under `prefix` stale and refetch it, returning the
    /// number of queries refetched.
    ///
    /// Completes once every refetch has settled.
    pub async fn invalidate(&self, prefix: &QueryKey) -> usize {
        let matching: Vec<Rc<dyn ActiveQuery>> = {
            let mut entries = self.entries.borrow_mut();
            entries.retain(|entry| entry.query.strong_count() > 0);
            entries
                .iter()
                .filter(|entry| entry.key.starts_with(prefix))
                .filter_map(|entry| entry.query.upgrade())
                .collect()
        };

        tracing::debug!(%prefix, count = matching.len(), "Invalidating queries");

        let count = matching.len();
        for query in matching {
            query.refetch().await;
        }
        count
    }
}

struct QueryInner<T> {
    key: QueryKey,
    /// None for queries that must not run, e.g. without a signed in user.
    fetcher: Option<Fetcher<T>>,
    snapshot: RefCell<QuerySnapshot<T>>,
    observers: Observers<QuerySnapshot<T>>,
    fetches: Cell<usize>,
    /// Bumped by every fetch; only the latest one may settle the snapshot.
    generation: Cell<u64>,
}

impl<T: Clone + 'static> QueryInner<T> {
    async fn run(self: Rc<Self>) {
        let Some(fetcher) = &self.fetcher else {
            return;
        };

        self.fetches.set(self.fetches.get() + 1);
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        self.update(|snapshot| {
            snapshot.is_loading = true;
            snapshot.error = None;
        });

        let result = fetcher().await;
        if self.generation.get() != generation {
            tracing::debug!(key = %self.key, "Dropping superseded fetch");
            return;
        }

        match result {
            Ok(data) => {
                tracing::debug!(key = %self.key, "Query fetched");
                self.update(|snapshot| {
                    snapshot.data = FetchState::Fetched(data);
                    snapshot.is_loading = false;
                    snapshot.error = None;
                });
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "Query failed");
                self.update(|snapshot| {
                    snapshot.is_loading = false;
                    snapshot.error = Some(e);
                });
            }
        }
    }

    fn update(&self, change: impl FnOnce(&mut QuerySnapshot<T>)) {
        let snapshot = {
            let mut snapshot = self.snapshot.borrow_mut();
            change(&mut snapshot);
            snapshot.clone()
        };
        self.observers.notify(&snapshot);
    }
}

impl<T: Clone + 'static> ActiveQuery for QueryInner<T> {
    fn refetch(self: Rc<Self>) -> LocalBoxFuture<'static, ()> {
        self.run().boxed_local()
    }
}

/// Handle to a cached read. Clones share the same state.
pub struct Query<T> {
    inner: Rc<QueryInner<T>>,
}

impl<T> Clone for Query<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> PartialEq for Query<T> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone + 'static> Query<T> {
    /// A query that never fetches and is not registered for invalidation.
    pub fn disabled(key: QueryKey) -> Self {
        Self {
            inner: Rc::new(QueryInner {
                key,
                fetcher: None,
                snapshot: RefCell::new(QuerySnapshot::default()),
                observers: Observers::default(),
                fetches: Cell::new(0),
                generation: Cell::new(0),
            }),
        }
    }

    pub fn key(&self) -> &QueryKey {
        &self.inner.key
    }

    pub fn is_enabled(&self) -> bool {
        self.inner.fetcher.is_some()
    }

    pub fn snapshot(&self) -> QuerySnapshot<T> {
        self.inner.snapshot.borrow().clone()
    }

    /// How many fetches this query has started.
    pub fn fetch_count(&self) -> usize {
        self.inner.fetches.get()
    }

    pub fn subscribe(
        &self,
        callback: impl Fn(&QuerySnapshot<T>) + 'static,
    ) -> Subscription {
        self.inner.observers.subscribe(callback)
    }

    pub async fn fetch(&self) {
        self.inner.clone().run().await
    }

    /// Fetch unless data is already cached or a fetch is underway.
    pub async fn ensure_fetched(&self) {
        let needs_fetch = {
            let snapshot = self.inner.snapshot.borrow();
            !snapshot.data.is_fetched() && !snapshot.is_loading
        };
        if needs_fetch {
            self.fetch().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use futures::executor::block_on;
    use std::collections::VecDeque;

    fn counting_query(
        client: &QueryClient,
        key: QueryKey,
        calls: Rc<Cell<u32>>,
    ) -> Query<u32> {
        client.query(key, move || {
            let calls = calls.clone();
            async move {
                calls.set(calls.get() + 1);
                Ok(calls.get())
            }
        })
    }

    #[test]
    fn key_prefixes() {
        let dashboard = QueryKey::new("dashboard");
        let user = QueryKey::new("dashboard").with(42);
        assert!(user.starts_with(&dashboard));
        assert!(user.starts_with(&user));
        assert!(!dashboard.starts_with(&user));
        assert!(!QueryKey::new("available-requests").starts_with(&dashboard));
        assert_eq!(user.to_string(), "dashboard/42");
    }

    #[test]
    fn fetch_replaces_data_and_notifies() {
        let client = QueryClient::new();
        let calls = Rc::new(Cell::new(0));
        let query = counting_query(&client, QueryKey::new("a"), calls.clone());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _subscription = {
            let seen = seen.clone();
            query.subscribe(move |snapshot| {
                seen.borrow_mut()
                    .push((snapshot.is_loading, snapshot.data.as_ref().copied()))
            })
        };

        block_on(query.fetch());
        block_on(query.fetch());

        assert_eq!(query.snapshot().data, FetchState::Fetched(2));
        assert_eq!(
            *seen.borrow(),
            vec![(true, None), (false, Some(1)), (true, Some(1)), (false, Some(2))]
        );
        assert_eq!(query.fetch_count(), 2);
    }

    #[test]
    fn failed_fetch_keeps_previous_data() {
        let client = QueryClient::new();
        let fail = Rc::new(Cell::new(false));
        let query: Query<&'static str> = {
            let fail = fail.clone();
            client.query(QueryKey::new("flaky"), move || {
                let fail = fail.get();
                async move {
                    if fail { Err("boom".to_string()) } else { Ok("data") }
                }
            })
        };

        block_on(query.fetch());
        fail.set(true);
        block_on(query.fetch());

        let snapshot = query.snapshot();
        assert!(snapshot.is_error());
        assert_eq!(snapshot.data, FetchState::Fetched("data"));
        assert!(!snapshot.is_loading);
    }

    #[test]
    fn same_key_shares_the_cached_query() {
        let client = QueryClient::new();
        let calls = Rc::new(Cell::new(0));
        let first = counting_query(&client, QueryKey::new("k"), calls.clone());
        let second = counting_query(&client, QueryKey::new("k"), calls.clone());
        assert!(first == second);

        block_on(first.fetch());
        block_on(second.ensure_fetched());
        assert_eq!(calls.get(), 1);
        assert_eq!(second.snapshot().data, FetchState::Fetched(1));
    }

    #[test]
    fn invalidate_refetches_matching_live_queries() {
        let client = QueryClient::new();
        let calls = Rc::new(Cell::new(0));
        let alice = counting_query(
            &client,
            QueryKey::new("dashboard").with(1),
            calls.clone(),
        );
        let other_calls = Rc::new(Cell::new(0));
        let _other = counting_query(
            &client,
            QueryKey::new("available-requests"),
            other_calls.clone(),
        );

        let refetched = block_on(client.invalidate(&QueryKey::new("dashboard")));

        assert_eq!(refetched, 1);
        assert_eq!(alice.fetch_count(), 1);
        assert_eq!(other_calls.get(), 0);
    }

    #[test]
    fn dropped_queries_are_forgotten() {
        let client = QueryClient::new();
        let calls = Rc::new(Cell::new(0));
        let query = counting_query(&client, QueryKey::new("gone"), calls.clone());
        drop(query);

        assert!(client.keys().is_empty());
        assert_eq!(block_on(client.invalidate(&QueryKey::new("gone"))), 0);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn overlapping_fetches_keep_the_latest_result() {
        let client = QueryClient::new();
        let (first_tx, first_rx) = oneshot::channel::<u32>();
        let (second_tx, second_rx) = oneshot::channel::<u32>();
        let gates = Rc::new(RefCell::new(VecDeque::from([first_rx, second_rx])));
        let query: Query<u32> = {
            let gates = gates.clone();
            client.query(QueryKey::new("dashboard"), move || {
                let gate = gates.borrow_mut().pop_front();
                async move {
                    match gate {
                        Some(gate) => gate.await.map_err(|e| e.to_string()),
                        None => Err("no response queued".to_string()),
                    }
                }
            })
        };

        // Release the older response only once the newer one has landed.
        let (landed_tx, landed_rx) = oneshot::channel::<()>();
        let landed_tx = RefCell::new(Some(landed_tx));
        let seen = Rc::new(RefCell::new(Vec::new()));
        let _subscription = {
            let seen = seen.clone();
            query.subscribe(move |snapshot| {
                let data = snapshot.data.as_ref().copied();
                seen.borrow_mut().push((snapshot.is_loading, data));
                if data == Some(2) {
                    if let Some(tx) = landed_tx.borrow_mut().take() {
                        let _ = tx.send(());
                    }
                }
            })
        };

        let driver = async move {
            let _ = second_tx.send(2);
            let _ = landed_rx.await;
            let _ = first_tx.send(1);
        };
        block_on(async {
            futures::join!(query.fetch(), query.fetch(), driver);
        });

        let snapshot = query.snapshot();
        assert_eq!(snapshot.data, FetchState::Fetched(2));
        assert!(!snapshot.is_loading);
        assert!(!snapshot.is_error());
        assert_eq!(
            *seen.borrow(),
            vec![(true, None), (true, None), (false, Some(2))]
        );
        assert_eq!(query.fetch_count(), 2);
    }

    #[test]
    fn disabled_query_never_fetches() {
        let query = Query::<u32>::disabled(QueryKey::new("dashboard"));
        block_on(query.fetch());
        assert!(!query.is_enabled());
        assert_eq!(query.fetch_count(), 0);
        assert_eq!(query.snapshot(), QuerySnapshot::default());
    }
}
