//! In-memory state behind the mock donation backend.

use payloads::{
    DonationRequest, RequestId, RequestStatus, UserId, responses::DonorDetails,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Every route the mock backend serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Dashboard,
    AvailableRequests,
    DonorDetails,
    Accept,
    CancelDonation,
    Approve,
    CancelRequest,
    Delete,
}

/// A request the backend received, recorded before it was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub endpoint: Endpoint,
    pub method: String,
    pub request_id: Option<RequestId>,
    /// `donor_id` or `user_id` from the query string, or the path id for
    /// donor lookups.
    pub user_id: Option<UserId>,
    pub content_type: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Request not found")]
    RequestNotFound,
    #[error("Donor not found")]
    DonorNotFound,
    #[error("{status} request cannot be {action}")]
    InvalidTransition {
        action: &'static str,
        status: RequestStatus,
    },
    #[error("Request was accepted by another donor")]
    NotAcceptedDonor,
    #[error("Only the requester can change this request")]
    NotOwner,
    #[error("Injected failure")]
    Injected,
}

#[derive(Default)]
pub struct BackendState {
    requests: Vec<DonationRequest>,
    donors: HashMap<UserId, DonorDetails>,
    calls: Vec<Call>,
    failing: HashSet<Endpoint>,
    delays: HashMap<RequestId, Duration>,
}

impl BackendState {
    fn request_mut(
        &mut self,
        request_id: RequestId,
    ) -> Result<&mut DonationRequest, StoreError> {
        self.requests
            .iter_mut()
            .find(|r| r.id == request_id)
            .ok_or(StoreError::RequestNotFound)
    }

    fn owned_mut(
        &mut self,
        request_id: RequestId,
        owner: UserId,
    ) -> Result<&mut DonationRequest, StoreError> {
        let request = self.request_mut(request_id)?;
        if request.donor.id != owner {
            return Err(StoreError::NotOwner);
        }
        Ok(request)
    }
}

fn require(
    request: &DonationRequest,
    action: &'static str,
    allowed: bool,
) -> Result<(), StoreError> {
    if allowed {
        Ok(())
    } else {
        Err(StoreError::InvalidTransition {
            action,
            status: request.blood_request_type,
        })
    }
}

/// Shared handle to the backend state. Clones point at the same data, so a
/// test can keep one while the server holds another.
#[derive(Clone, Default)]
pub struct MockBackend {
    state: Arc<Mutex<BackendState>>,
}

impl MockBackend {
    fn state(&self) -> MutexGuard<'_, BackendState> {
        self.state.lock().expect("mock backend state poisoned")
    }

    pub fn insert_request(&self, request: DonationRequest) {
        let mut state = self.state();
        state.requests.retain(|r| r.id != request.id);
        state.requests.push(request);
    }

    pub fn insert_donor(&self, donor: DonorDetails) {
        self.state().donors.insert(donor.id, donor);
    }

    pub fn requests(&self) -> Vec<DonationRequest> {
        self.state().requests.clone()
    }

    pub fn request(&self, request_id: RequestId) -> Option<DonationRequest> {
        self.state()
            .requests
            .iter()
            .find(|r| r.id == request_id)
            .cloned()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn count(&self, endpoint: Endpoint) -> usize {
        self.state()
            .calls
            .iter()
            .filter(|c| c.endpoint == endpoint)
            .count()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    /// Make every subsequent call to `endpoint` answer 500.
    pub fn fail(&self, endpoint: Endpoint) {
        self.state().failing.insert(endpoint);
    }

    pub fn recover(&self, endpoint: Endpoint) {
        self.state().failing.remove(&endpoint);
    }

    /// Hold transitions on `request_id` for `delay` before answering.
    pub fn delay(&self, request_id: RequestId, delay: Duration) {
        self.state().delays.insert(request_id, delay);
    }

    pub(crate) fn delay_for(&self, request_id: RequestId) -> Option<Duration> {
        self.state().delays.get(&request_id).copied()
    }

    /// Record `call`, then fail it if its endpoint was set to fail.
    pub(crate) fn record(&self, call: Call) -> Result<(), StoreError> {
        let mut state = self.state();
        let failing = state.failing.contains(&call.endpoint);
        state.calls.push(call);
        if failing {
            return Err(StoreError::Injected);
        }
        Ok(())
    }

    /// Requests created by `user_id`.
    pub fn dashboard(&self, user_id: UserId) -> Vec<DonationRequest> {
        self.state()
            .requests
            .iter()
            .filter(|r| r.donor.id == user_id)
            .cloned()
            .collect()
    }

    /// Other users' requests that are still open, plus the ones `donor_id`
    /// already accepted.
    pub fn available(&self, donor_id: UserId) -> Vec<DonationRequest> {
        self.state()
            .requests
            .iter()
            .filter(|r| r.donor.id != donor_id)
            .filter(|r| {
                r.blood_request_type == RequestStatus::Pending
                    || r.accepted_donor().user_id() == Some(donor_id)
            })
            .cloned()
            .collect()
    }

    pub fn donor_details(
        &self,
        donor_id: UserId,
    ) -> Result<DonorDetails, StoreError> {
        self.state()
            .donors
            .get(&donor_id)
            .cloned()
            .ok_or(StoreError::DonorNotFound)
    }

    pub fn accept(
        &self,
        request_id: RequestId,
        donor_id: UserId,
    ) -> Result<(), StoreError> {
        let mut state = self.state();
        let request = state.request_mut(request_id)?;
        require(request, "accepted", request.blood_request_type.accept_enabled())?;
        request.blood_request_type = RequestStatus::Running;
        request.accepted_donor_id = Some(donor_id.to_string());
        Ok(())
    }

    pub fn cancel_donation(
        &self,
        request_id: RequestId,
        donor_id: UserId,
    ) -> Result<(), StoreError> {
        let mut state = self.state();
        let request = state.request_mut(request_id)?;
        require(request, "withdrawn from", request.blood_request_type.cancel_enabled())?;
        if request.accepted_donor().user_id() != Some(donor_id) {
            return Err(StoreError::NotAcceptedDonor);
        }
        request.blood_request_type = RequestStatus::Pending;
        request.accepted_donor_id = None;
        Ok(())
    }

    pub fn approve(
        &self,
        request_id: RequestId,
        owner: UserId,
    ) -> Result<(), StoreError> {
        let mut state = self.state();
        let request = state.owned_mut(request_id, owner)?;
        require(request, "approved", request.blood_request_type.approve_enabled())?;
        request.blood_request_type = RequestStatus::Completed;
        Ok(())
    }

    pub fn cancel_request(
        &self,
        request_id: RequestId,
        owner: UserId,
    ) -> Result<(), StoreError> {
        let mut state = self.state();
        let request = state.owned_mut(request_id, owner)?;
        require(request, "cancelled", request.blood_request_type.cancel_enabled())?;
        request.blood_request_type = RequestStatus::Pending;
        request.accepted_donor_id = None;
        Ok(())
    }

    pub fn delete(
        &self,
        request_id: RequestId,
        owner: UserId,
    ) -> Result<(), StoreError> {
        let mut state = self.state();
        let request = state.owned_mut(request_id, owner)?;
        require(request, "deleted", request.blood_request_type.delete_enabled())?;
        state.requests.retain(|r| r.id != request_id);
        Ok(())
    }
}
