//! The donor's view: open requests they can accept, and the ones they have
//! already accepted and may withdraw from.

use payloads::{
    APIClient, DonationRequest, RequestId, UserData, UserId,
    requests::DonationAction,
};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::cache::{Query, QueryClient};
use crate::error::ActionError;
use crate::my_requests::check;
use crate::mutation::MutationEvent;
use crate::mutations::{self, RequestMutation};
use crate::notify::{Notification, Notifier, notify_fetch_failures};
use crate::observer::{Observers, Subscription};
use crate::pending::PendingActions;
use crate::queries;
use crate::view::{ActionControl, ListView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DonorAction {
    Accept,
    CancelDonation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AvailableRow {
    pub request: DonationRequest,
    /// The signed in donor is the one who accepted this request.
    pub accepted_by_me: bool,
    pub accept: ActionControl,
    pub cancel_donation: ActionControl,
}

impl AvailableRow {
    pub fn new(
        request: &DonationRequest,
        me: Option<UserId>,
        pending: &PendingActions<DonorAction>,
    ) -> Self {
        let status = request.blood_request_type;
        let accepted_by_me =
            me.is_some() && request.accepted_donor().user_id() == me;
        Self {
            request: request.clone(),
            accepted_by_me,
            accept: ActionControl::new(
                status.accept_enabled(),
                pending.contains(request.id, DonorAction::Accept),
            ),
            cancel_donation: ActionControl::new(
                status.cancel_enabled() && accepted_by_me,
                pending.contains(request.id, DonorAction::CancelDonation),
            ),
        }
    }
}

struct Inner {
    user: Option<UserData>,
    requests: Query<Vec<DonationRequest>>,
    accept: RequestMutation,
    cancel_donation: RequestMutation,
    pending: RefCell<PendingActions<DonorAction>>,
    notifier: Rc<dyn Notifier>,
    changes: Observers<()>,
    subscriptions: RefCell<Vec<Subscription>>,
    version: Cell<u64>,
}

impl Inner {
    fn changed(&self) {
        self.version.set(self.version.get() + 1);
        self.changes.notify(&());
    }
}

/// Controller for the "Available Requests" page. Clones share state.
#[derive(Clone)]
pub struct AvailableRequests {
    inner: Rc<Inner>,
}

impl PartialEq for AvailableRequests {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl AvailableRequests {
    /// `donations_api` serves the accept and cancel-donation endpoints, which
    /// may live on a different host than the listing.
    pub fn new(
        client: &QueryClient,
        api: Rc<APIClient>,
        donations_api: Rc<APIClient>,
        user: Option<UserData>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        let user_id = user.as_ref().and_then(|u| u.user_id);
        let inner = Rc::new(Inner {
            requests: queries::available_requests_query(client, api, user_id),
            accept: mutations::accept_request(client, donations_api.clone()),
            cancel_donation: mutations::cancel_donation(client, donations_api),
            user,
            pending: RefCell::new(PendingActions::default()),
            notifier,
            changes: Observers::default(),
            subscriptions: RefCell::new(Vec::new()),
            version: Cell::new(0),
        });

        let weak: Weak<Inner> = Rc::downgrade(&inner);
        let mut subscriptions = vec![
            notify_fetch_failures(&inner.requests, inner.notifier.clone()),
            inner.requests.subscribe({
                let weak = weak.clone();
                move |_| {
                    if let Some(inner) = weak.upgrade() {
                        inner.changed();
                    }
                }
            }),
        ];

        for (action, mutation) in [
            (DonorAction::Accept, &inner.accept),
            (DonorAction::CancelDonation, &inner.cancel_donation),
        ] {
            let weak = weak.clone();
            subscriptions.push(mutation.subscribe(move |event| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                match event {
                    MutationEvent::Started(input) => {
                        inner.pending.borrow_mut().start(input.request_id, action)
                    }
                    MutationEvent::Settled { input, .. } => {
                        inner.pending.borrow_mut().settle(input.request_id, action)
                    }
                }
                inner.changed();
            }));
        }

        *inner.subscriptions.borrow_mut() = subscriptions;
        Self { inner }
    }

    fn user_id(&self) -> Option<UserId> {
        self.inner.user.as_ref().and_then(|u| u.user_id)
    }

    pub fn query(&self) -> &Query<Vec<DonationRequest>> {
        &self.inner.requests
    }

    /// Bumped on every change, so front-ends can compare cheaply.
    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        self.inner.changes.subscribe(move |_| callback())
    }

    pub async fn load(&self) {
        self.inner.requests.ensure_fetched().await
    }

    pub fn is_pending(&self, request_id: RequestId, action: DonorAction) -> bool {
        self.inner.pending.borrow().contains(request_id, action)
    }

    pub fn list(&self) -> ListView<AvailableRow> {
        let me = self.user_id();
        let pending = self.inner.pending.borrow();
        ListView::from_query(
            &self.inner.requests,
            |requests| requests.as_slice(),
            |request| AvailableRow::new(request, me, &pending),
        )
    }

    fn require_user(&self) -> Result<UserId, ActionError> {
        self.user_id().ok_or_else(|| {
            self.inner
                .notifier
                .notify(Notification::authentication_failed());
            ActionError::NotAuthenticated
        })
    }

    /// Commit the signed in donor to `request`.
    pub async fn accept(
        &self,
        request: &DonationRequest,
    ) -> Result<(), ActionError> {
        let donor_id = self.require_user()?;
        check(request, "accepted", |s| s.accept_enabled())?;

        let action = DonationAction {
            donor_id,
            request_id: request.id,
        };
        self.inner.accept.mutate(action).await?;
        self.inner.notifier.notify(Notification::success(
            "Request accepted",
            "Thank you for volunteering to donate.",
        ));
        Ok(())
    }

    /// Withdraw the signed in donor from a request they accepted.
    pub async fn cancel_donation(
        &self,
        request: &DonationRequest,
    ) -> Result<(), ActionError> {
        let donor_id = self.require_user()?;
        let mine = request.accepted_donor().user_id() == Some(donor_id);
        check(request, "withdrawn from", |s| s.cancel_enabled() && mine)?;

        let action = DonationAction {
            donor_id,
            request_id: request.id,
        };
        self.inner.cancel_donation.mutate(action).await?;
        self.inner.notifier.notify(Notification::success(
            "Donation cancelled",
            "You are no longer committed to this request.",
        ));
        Ok(())
    }
}
