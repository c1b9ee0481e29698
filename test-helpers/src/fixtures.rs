//! Sample requests and donors shared by the integration tests and the
//! dev-server.

use jiff::civil::{Date, date};
use payloads::{
    BloodGroup, DonationRequest, DonorRef, Gender, RequestId, RequestStatus,
    UserId, responses::DonorDetails,
};

use crate::MockBackend;

const DISTRICTS: [&str; 4] = ["Dhaka", "Chattogram", "Sylhet", "Khulna"];
const GROUPS: [BloodGroup; 4] = [
    BloodGroup::APositive,
    BloodGroup::ONegative,
    BloodGroup::BPositive,
    BloodGroup::ABNegative,
];

fn donation_date(id: i64) -> Date {
    date(2025, 3, (id.rem_euclid(28) + 1) as i8)
}

/// A request created by `owner` that nobody has accepted.
pub fn request(id: i64, owner: i64, status: RequestStatus) -> DonationRequest {
    let slot = id.rem_euclid(4) as usize;
    DonationRequest {
        id: RequestId(id),
        date_of_donation: donation_date(id),
        blood_group: GROUPS[slot],
        gender: if id % 2 == 0 { Gender::Female } else { Gender::Male },
        district: DISTRICTS[slot].to_string(),
        accepted_donor_id: None,
        donor: DonorRef { id: UserId(owner) },
        blood_request_type: status,
    }
}

/// A request created by `owner` and accepted by `donor`.
pub fn running(id: i64, owner: i64, donor: i64) -> DonationRequest {
    DonationRequest {
        accepted_donor_id: Some(donor.to_string()),
        ..request(id, owner, RequestStatus::Running)
    }
}

pub fn donor_details(id: i64, name: &str) -> DonorDetails {
    DonorDetails {
        id: UserId(id),
        name: name.to_string(),
        phone: Some(format!("+880 1700 0000{id:02}")),
        email: Some(format!("{}@example.com", name.to_lowercase())),
        blood_group: Some(GROUPS[id.rem_euclid(4) as usize]),
        district: Some(DISTRICTS[id.rem_euclid(4) as usize].to_string()),
    }
}

/// Data served by the dev-server: one requester with requests in every
/// status, and a donor who accepted one of them.
pub struct DevDataset {
    pub requester: UserId,
    pub donor: UserId,
}

impl DevDataset {
    pub fn create(backend: &MockBackend) -> Self {
        let (requester, donor, neighbour) = (1, 2, 3);

        backend.insert_donor(donor_details(donor, "Rahim"));
        backend.insert_donor(donor_details(neighbour, "Karim"));

        backend.insert_request(request(101, requester, RequestStatus::Pending));
        backend.insert_request(running(102, requester, donor));
        backend.insert_request(request(103, requester, RequestStatus::Completed));
        backend.insert_request(DonationRequest {
            accepted_donor_id: Some("not-a-number".into()),
            ..request(104, requester, RequestStatus::Running)
        });
        backend.insert_request(request(201, neighbour, RequestStatus::Pending));
        backend.insert_request(running(202, neighbour, donor));

        Self {
            requester: UserId(requester),
            donor: UserId(donor),
        }
    }

    pub fn print_summary(&self) {
        tracing::info!("📋 Sign in by storing one of these in localStorage:");
        tracing::info!(
            r#"   requester: localStorage.setItem("user-data", '{{"userId":{}}}')"#,
            self.requester
        );
        tracing::info!(
            r#"   donor:     localStorage.setItem("user-data", '{{"userId":{}}}')"#,
            self.donor
        );
    }
}
