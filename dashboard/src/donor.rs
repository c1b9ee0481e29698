use payloads::{APIClient, AcceptedDonor, RequestStatus, responses::DonorDetails};
use std::rc::Rc;

use crate::cache::{Query, QueryClient};
use crate::queries;

/// What the donor details popup of a row can show.
#[derive(Clone, PartialEq)]
pub enum DonorLookup {
    /// The request is still pending, so nobody has accepted it.
    AwaitingDonor,
    NotAssigned,
    /// `accepted_donor_id` was not an integer.
    Unknown(String),
    Found(Query<DonorDetails>),
}

impl DonorLookup {
    pub fn new(
        client: &QueryClient,
        api: Rc<APIClient>,
        donor: &AcceptedDonor,
        status: RequestStatus,
    ) -> Self {
        if status == RequestStatus::Pending {
            return Self::AwaitingDonor;
        }
        match donor {
            AcceptedDonor::NotAssigned => Self::NotAssigned,
            AcceptedDonor::Malformed(raw) => Self::Unknown(raw.clone()),
            AcceptedDonor::Assigned(donor_id) => Self::Found(
                queries::donor_details_query(client, api, *donor_id),
            ),
        }
    }

    /// Placeholder text when there is nothing to fetch.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::AwaitingDonor => Some("No donor yet"),
            Self::NotAssigned => Some("No donor assigned"),
            Self::Unknown(_) => Some("Unknown donor"),
            Self::Found(_) => None,
        }
    }

    pub fn query(&self) -> Option<&Query<DonorDetails>> {
        match self {
            Self::Found(query) => Some(query),
            _ => None,
        }
    }
}
