use futures::FutureExt;
use futures::future::LocalBoxFuture;
use payloads::ClientError;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::Future;
use std::rc::Rc;

use crate::cache::{QueryClient, QueryKey};
use crate::observer::{Observers, Subscription};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MutationStatus {
    #[default]
    Idle,
    Pending,
    Success,
    Error(String),
}

impl MutationStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Published for every invocation, so observers can track state per input
/// rather than per mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationEvent<I> {
    Started(I),
    Settled { input: I, error: Option<String> },
}

type Runner<I> = Box<dyn Fn(I) -> LocalBoxFuture<'static, Result<(), ClientError>>>;

struct MutationInner<I> {
    name: &'static str,
    client: QueryClient,
    invalidates: Vec<QueryKey>,
    runner: Runner<I>,
    status: RefCell<MutationStatus>,
    in_flight: Cell<usize>,
    observers: Observers<MutationEvent<I>>,
}

/// A remote state change followed by cache invalidation.
///
/// Failures are reported to the caller and kept in [`Mutation::status`];
/// nothing is retried or rolled back.
pub struct Mutation<I> {
    inner: Rc<MutationInner<I>>,
}

impl<I> Clone for Mutation<I> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<I> PartialEq for Mutation<I> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<I: Clone + fmt::Debug + 'static> Mutation<I> {
    pub fn new<F, Fut>(
        name: &'static str,
        client: &QueryClient,
        invalidates: Vec<QueryKey>,
        run: F,
    ) -> Self
    where
        F: Fn(I) -> Fut + 'static,
        Fut: Future<Output = Result<(), ClientError>> + 'static,
    {
        Self {
            inner: Rc::new(MutationInner {
                name,
                client: client.clone(),
                invalidates,
                runner: Box::new(move |input| run(input).boxed_local()),
                status: RefCell::new(MutationStatus::Idle),
                in_flight: Cell::new(0),
                observers: Observers::default(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    pub fn invalidates(&self) -> &[QueryKey] {
        &self.inner.invalidates
    }

    /// Status of the most recently settled invocation, or Pending while any
    /// invocation is outstanding.
    pub fn status(&self) -> MutationStatus {
        self.inner.status.borrow().clone()
    }

    pub fn is_pending(&self) -> bool {
        self.inner.in_flight.get() > 0
    }

    pub fn subscribe(
        &self,
        callback: impl Fn(&MutationEvent<I>) + 'static,
    ) -> Subscription {
        self.inner.observers.subscribe(callback)
    }

    /// Run the mutation. On success the configured keys are invalidated, and
    /// the resulting refetches complete before this returns.
    pub async fn mutate(&self, input: I) -> Result<(), ClientError> {
        let inner = &self.inner;
        tracing::debug!(mutation = inner.name, ?input, "Mutation started");

        inner.in_flight.set(inner.in_flight.get() + 1);
        *inner.status.borrow_mut() = MutationStatus::Pending;
        inner.observers.notify(&MutationEvent::Started(input.clone()));

        let result = (inner.runner)(input.clone()).await;

        if result.is_ok() {
            for key in &inner.invalidates {
                inner.client.invalidate(key).await;
            }
        }

        inner.in_flight.set(inner.in_flight.get() - 1);
        let settled = match &result {
            Ok(()) => MutationStatus::Success,
            Err(e) => {
                tracing::warn!(mutation = inner.name, ?input, "Mutation failed: {e}");
                MutationStatus::Error(e.to_string())
            }
        };
        *inner.status.borrow_mut() = if inner.in_flight.get() > 0 {
            MutationStatus::Pending
        } else {
            settled
        };

        inner.observers.notify(&MutationEvent::Settled {
            input,
            error: result.as_ref().err().map(ToString::to_string),
        });

        result
    }
}
