//! Client state for the donation dashboard, independent of any UI framework.
//!
//! Data flows one way: a page controller reads a cached [`Query`], the user
//! triggers a [`Mutation`], the mutation invalidates its cache keys, the
//! affected queries refetch, and observers re-render from the new snapshot.
//!
//! Everything here is single threaded (`Rc`/`RefCell`), matching the browser
//! event loop it runs on.

pub mod available;
pub mod cache;
pub mod donor;
pub mod error;
pub mod keys;
pub mod mutation;
pub mod mutations;
pub mod my_requests;
pub mod notify;
pub mod observer;
pub mod pending;
pub mod queries;
pub mod view;

pub use available::{AvailableRequests, AvailableRow, DonorAction};
pub use cache::{FetchState, Query, QueryClient, QueryKey, QuerySnapshot};
pub use donor::DonorLookup;
pub use error::ActionError;
pub use mutation::{Mutation, MutationEvent, MutationStatus};
pub use my_requests::{
    ApproveControl, ApproveLabel, MyRequests, RequestMutations, RequestRow,
    RowAction,
};
pub use notify::{Notification, Notifier, Variant};
pub use observer::Subscription;
pub use pending::PendingActions;
pub use view::{ActionControl, ListView};
