//! The requester's list of their own donation requests.
//!
//! [`MyRequests`] owns the dashboard query and the approve, cancel and delete
//! mutations, tracks in-flight actions per row, and derives everything the
//! page renders from the cached query result.

use payloads::{
    APIClient, AcceptedDonor, DonationRequest, RequestId, UserData, UserId,
    requests::DonationAction, responses::Dashboard,
};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::cache::{Query, QueryClient, QuerySnapshot};
use crate::error::ActionError;
use crate::mutation::MutationEvent;
use crate::mutations::{self, RequestMutation};
use crate::notify::{Notification, Notifier, notify_fetch_failures};
use crate::observer::{Observers, Subscription};
use crate::pending::PendingActions;
use crate::queries;
use crate::view::{ActionControl, ListView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowAction {
    Approve,
    Cancel,
    Delete,
}

/// The mutations a requester can run against their own requests.
#[derive(Clone, PartialEq)]
pub struct RequestMutations {
    pub approve: RequestMutation,
    pub cancel: RequestMutation,
    pub delete: RequestMutation,
}

impl RequestMutations {
    pub fn new(client: &QueryClient, api: Rc<APIClient>) -> Self {
        Self {
            approve: mutations::approve_request(client, api.clone()),
            cancel: mutations::cancel_request(client, api.clone()),
            delete: mutations::delete_request(client, api),
        }
    }

    fn iter(&self) -> [(RowAction, &RequestMutation); 3] {
        [
            (RowAction::Approve, &self.approve),
            (RowAction::Cancel, &self.cancel),
            (RowAction::Delete, &self.delete),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApproveLabel {
    Unavailable,
    Approve,
    /// Shown as a spinner.
    Approving,
    Approved,
}

impl ApproveLabel {
    pub fn text(&self) -> &'static str {
        match self {
            Self::Unavailable => "Unavailable",
            Self::Approve => "Approve",
            Self::Approving => "Approving",
            Self::Approved => "Approved",
        }
    }

    pub fn shows_success_glyph(&self) -> bool {
        matches!(self, Self::Approved)
    }

    pub fn shows_spinner(&self) -> bool {
        matches!(self, Self::Approving)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproveControl {
    pub label: ApproveLabel,
    pub enabled: bool,
    pub busy: bool,
}

impl ApproveControl {
    pub fn is_clickable(&self) -> bool {
        self.enabled && !self.busy
    }
}

/// One rendered row of the request table.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestRow {
    pub request: DonationRequest,
    pub donor: AcceptedDonor,
    pub approve: ApproveControl,
    pub cancel: ActionControl,
    pub delete: ActionControl,
}

impl RequestRow {
    pub fn new(
        request: &DonationRequest,
        pending: &PendingActions<RowAction>,
    ) -> Self {
        use payloads::RequestStatus::*;

        let status = request.blood_request_type;
        let approving = pending.contains(request.id, RowAction::Approve);
        let label = match status {
            Pending => ApproveLabel::Unavailable,
            Running if approving => ApproveLabel::Approving,
            Running => ApproveLabel::Approve,
            Completed => ApproveLabel::Approved,
        };

        Self {
            request: request.clone(),
            donor: request.accepted_donor(),
            approve: ApproveControl {
                label,
                enabled: status.approve_enabled(),
                busy: approving,
            },
            cancel: ActionControl::new(
                status.cancel_enabled(),
                pending.contains(request.id, RowAction::Cancel),
            ),
            delete: ActionControl::new(
                status.delete_enabled(),
                pending.contains(request.id, RowAction::Delete),
            ),
        }
    }
}

struct Inner {
    user: Option<UserData>,
    dashboard: Query<Dashboard>,
    mutations: RequestMutations,
    pending: RefCell<PendingActions<RowAction>>,
    notifier: Rc<dyn Notifier>,
    changes: Observers<()>,
    subscriptions: RefCell<Vec<Subscription>>,
    /// Bumped on every change, so front-ends can compare cheaply.
    version: Cell<u64>,
}

impl Inner {
    fn changed(&self) {
        self.version.set(self.version.get() + 1);
        self.changes.notify(&());
    }
}

/// Controller for the "My Requests" page. Clones share state.
#[derive(Clone)]
pub struct MyRequests {
    inner: Rc<Inner>,
}

impl PartialEq for MyRequests {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl MyRequests {
    pub fn new(
        client: &QueryClient,
        api: Rc<APIClient>,
        user: Option<UserData>,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        let user_id = user.as_ref().and_then(|u| u.user_id);
        let dashboard = queries::dashboard_query(client, api.clone(), user_id);
        let mutations = RequestMutations::new(client, api);
        Self::with_parts(user, dashboard, mutations, notifier)
    }

    /// Assemble a controller from an existing query and mutations, e.g. ones
    /// shared with another page.
    pub fn with_parts(
        user: Option<UserData>,
        dashboard: Query<Dashboard>,
        mutations: RequestMutations,
        notifier: Rc<dyn Notifier>,
    ) -> Self {
        let inner = Rc::new(Inner {
            user,
            dashboard,
            mutations,
            pending: RefCell::new(PendingActions::default()),
            notifier,
            changes: Observers::default(),
            subscriptions: RefCell::new(Vec::new()),
            version: Cell::new(0),
        });

        let mut subscriptions = vec![notify_fetch_failures(
            &inner.dashboard,
            inner.notifier.clone(),
        )];

        let weak: Weak<Inner> = Rc::downgrade(&inner);
        subscriptions.push(inner.dashboard.subscribe({
            let weak = weak.clone();
            move |_| {
                if let Some(inner) = weak.upgrade() {
                    inner.changed();
                }
            }
        }));

        for (action, mutation) in inner.mutations.iter() {
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

    pub fn user(&self) -> Option<&UserData> {
        self.inner.user.as_ref()
    }

    fn user_id(&self) -> Option<UserId> {
        self.inner.user.as_ref().and_then(|u| u.user_id)
    }

    pub fn dashboard(&self) -> &Query<Dashboard> {
        &self.inner.dashboard
    }

    pub fn mutations(&self) -> &RequestMutations {
        &self.inner.mutations
    }

    pub fn snapshot(&self) -> QuerySnapshot<Dashboard> {
        self.inner.dashboard.snapshot()
    }

    pub fn version(&self) -> u64 {
        self.inner.version.get()
    }

    /// Called after every state change of the query or of a row action.
    pub fn subscribe(&self, callback: impl Fn() + 'static) -> Subscription {
        self.inner.changes.subscribe(move |_| callback())
    }

    pub async fn load(&self) {
        self.inner.dashboard.ensure_fetched().await
    }

    pub async fn refresh(&self) {
        self.inner.dashboard.fetch().await
    }

    pub fn is_pending(&self, request_id: RequestId, action: RowAction) -> bool {
        self.inner.pending.borrow().contains(request_id, action)
    }

    pub fn pending_rows(&self, action: RowAction) -> Vec<RequestId> {
        self.inner.pending.borrow().rows(action)
    }

    pub fn list(&self) -> ListView<RequestRow> {
        let pending = self.inner.pending.borrow();
        ListView::from_query(
            &self.inner.dashboard,
            |dashboard| dashboard.my_requests.as_slice(),
            |request| RequestRow::new(request, &pending),
        )
    }

    /// Approve the donation of the donor who accepted `request`.
    ///
    /// Without a signed in user this shows an authentication notification and
    /// sends nothing.
    pub async fn approve(
        &self,
        request: &DonationRequest,
    ) -> Result<(), ActionError> {
        let Some(user_id) = self.user_id() else {
            self.inner
                .notifier
                .notify(Notification::authentication_failed());
            return Err(ActionError::NotAuthenticated);
        };
        check(request, "approved", |s| s.approve_enabled())?;

        let action = DonationAction {
            donor_id: user_id,
            request_id: request.id,
        };
        self.inner.mutations.approve.mutate(action).await?;
        Ok(())
    }

    /// Cancel a running request. Does nothing without a signed in user.
    pub async fn cancel(
        &self,
        request: &DonationRequest,
    ) -> Result<(), ActionError> {
        if self.user_id().is_none() {
            return Err(ActionError::NotAuthenticated);
        }
        check(request, "cancelled", |s| s.cancel_enabled())?;
        self.inner
            .mutations
            .cancel
            .mutate(owner_action(request))
            .await?;
        Ok(())
    }

    /// Delete a request. Does nothing without a signed in user.
    pub async fn delete(
        &self,
        request: &DonationRequest,
    ) -> Result<(), ActionError> {
        if self.user_id().is_none() {
            return Err(ActionError::NotAuthenticated);
        }
        check(request, "deleted", |s| s.delete_enabled())?;
        self.inner
            .mutations
            .delete
            .mutate(owner_action(request))
            .await?;
        Ok(())
    }
}

fn owner_action(request: &DonationRequest) -> DonationAction {
    DonationAction {
        donor_id: request.donor.id,
        request_id: request.id,
    }
}

pub(crate) fn check(
    request: &DonationRequest,
    action: &'static str,
    allowed: impl Fn(&payloads::RequestStatus) -> bool,
) -> Result<(), ActionError> {
    let status = request.blood_request_type;
    if allowed(&status) {
        Ok(())
    } else {
        Err(ActionError::Unavailable { action, status })
    }
}
