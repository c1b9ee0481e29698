use crate::{BloodGroup, DonationRequest, UserId};
use serde::{Deserialize, Serialize};

/// Summary shown on the requester's dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(default)]
    pub my_requests: Vec<DonationRequest>,
}

/// Contact details for a donor who accepted a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorDetails {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub blood_group: Option<BloodGroup>,
    #[serde(default)]
    pub district: Option<String>,
}
