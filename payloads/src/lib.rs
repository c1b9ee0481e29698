pub mod api_client;
pub mod requests;
pub mod responses;

pub use api_client::{APIClient, ClientError};
pub use reqwest::StatusCode;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct UserId(pub i64);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(transparent)]
pub struct RequestId(pub i64);

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum BloodGroup {
    #[serde(rename = "A+")]
    #[display("A+")]
    APositive,
    #[serde(rename = "A-")]
    #[display("A-")]
    ANegative,
    #[serde(rename = "B+")]
    #[display("B+")]
    BPositive,
    #[serde(rename = "B-")]
    #[display("B-")]
    BNegative,
    #[serde(rename = "AB+")]
    #[display("AB+")]
    ABPositive,
    #[serde(rename = "AB-")]
    #[display("AB-")]
    ABNegative,
    #[serde(rename = "O+")]
    #[display("O+")]
    OPositive,
    #[serde(rename = "O-")]
    #[display("O-")]
    ONegative,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum Gender {
    #[serde(alias = "male")]
    Male,
    #[serde(alias = "female")]
    Female,
    #[serde(alias = "other")]
    Other,
}

/// Lifecycle of a donation request as reported by the backend.
///
/// The backend owns the transitions (Pending -> Running -> Completed). The
/// client only mirrors the current value to decide which controls are live.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
pub enum RequestStatus {
    /// Waiting for a donor to accept.
    Pending,
    /// A donor has accepted; the requester can approve or cancel.
    Running,
    /// Approved by the requester.
    Completed,
}

impl RequestStatus {
    pub fn approve_enabled(&self) -> bool {
        matches!(self, Self::Running)
    }

    pub fn cancel_enabled(&self) -> bool {
        matches!(self, Self::Running)
    }

    pub fn delete_enabled(&self) -> bool {
        !matches!(self, Self::Completed)
    }

    /// Donors can only pick up requests nobody has accepted yet.
    pub fn accept_enabled(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// The user who created a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorRef {
    pub id: UserId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationRequest {
    pub id: RequestId,
    pub date_of_donation: Date,
    pub blood_group: BloodGroup,
    pub gender: Gender,
    pub district: String,
    /// String-encoded user id, only present once a donor has accepted.
    #[serde(default)]
    pub accepted_donor_id: Option<String>,
    pub donor: DonorRef,
    pub blood_request_type: RequestStatus,
}

impl DonationRequest {
    pub fn accepted_donor(&self) -> AcceptedDonor {
        AcceptedDonor::from_raw(self.accepted_donor_id.as_deref())
    }
}

/// Classification of the optional `accepted_donor_id` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcceptedDonor {
    NotAssigned,
    Assigned(UserId),
    /// The backend sent something that is not an integer id.
    Malformed(String),
}

impl AcceptedDonor {
    pub fn from_raw(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            None | Some("") => Self::NotAssigned,
            Some(value) => match value.parse::<i64>() {
                Ok(id) => Self::Assigned(UserId(id)),
                Err(_) => Self::Malformed(value.to_string()),
            },
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        match self {
            Self::Assigned(id) => Some(*id),
            Self::NotAssigned | Self::Malformed(_) => None,
        }
    }
}

/// Session data for the signed in user, as persisted by the login flow.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub token: Option<String>,
}
