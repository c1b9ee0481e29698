use dashboard::{DonorLookup, QueryClient};
use payloads::{AcceptedDonor, RequestStatus, UserId};
use std::rc::Rc;
use test_helpers::{fixtures, spawn_app};

#[tokio::test]
async fn assigned_donor_details_are_fetched() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.backend.insert_donor(fixtures::donor_details(20, "Rahim"));

    let client = QueryClient::new();
    let lookup = DonorLookup::new(
        &client,
        Rc::new(app.api_client()),
        &AcceptedDonor::Assigned(UserId(20)),
        RequestStatus::Running,
    );
    assert_eq!(lookup.message(), None);

    let query = lookup.query().expect("donor query");
    query.ensure_fetched().await;
    let details = query.snapshot().data.as_ref().cloned().expect("fetched");
    assert_eq!(details.name, "Rahim");
    Ok(())
}

#[tokio::test]
async fn placeholders_without_a_usable_donor() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let client = QueryClient::new();
    let api = Rc::new(app.api_client());

    let lookup = |donor: AcceptedDonor, status| {
        DonorLookup::new(&client, api.clone(), &donor, status)
    };

    assert_eq!(
        lookup(AcceptedDonor::Assigned(UserId(1)), RequestStatus::Pending)
            .message(),
        Some("No donor yet")
    );
    assert_eq!(
        lookup(AcceptedDonor::NotAssigned, RequestStatus::Running).message(),
        Some("No donor assigned")
    );
    assert_eq!(
        lookup(AcceptedDonor::Malformed("abc".into()), RequestStatus::Completed)
            .message(),
        Some("Unknown donor")
    );
    assert!(app.backend.calls().is_empty());
    Ok(())
}
