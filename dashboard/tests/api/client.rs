use payloads::{RequestId, RequestStatus, StatusCode, UserId, requests::DonationAction};
use test_helpers::{Endpoint, assert_status_code, fixtures, spawn_app};

fn action(donor_id: i64, request_id: i64) -> DonationAction {
    DonationAction {
        donor_id: UserId(donor_id),
        request_id: RequestId(request_id),
    }
}

#[tokio::test]
async fn dashboard_lists_only_own_requests() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.backend
        .insert_request(fixtures::request(1, 10, RequestStatus::Pending));
    app.backend
        .insert_request(fixtures::request(2, 11, RequestStatus::Pending));

    let dashboard = app.client.dashboard(UserId(10)).await?;

    assert_eq!(dashboard.my_requests.len(), 1);
    assert_eq!(dashboard.my_requests[0].id, RequestId(1));
    Ok(())
}

#[tokio::test]
async fn transitions_carry_ids_in_the_url() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.backend
        .insert_request(fixtures::request(4, 10, RequestStatus::Pending));

    app.client.accept_request(&action(20, 4)).await?;
    app.client.cancel_donation(&action(20, 4)).await?;
    app.client.delete_request(&action(10, 4)).await?;

    let calls = app.backend.calls();
    let endpoints: Vec<_> = calls.iter().map(|c| c.endpoint).collect();
    assert_eq!(
        endpoints,
        vec![Endpoint::Accept, Endpoint::CancelDonation, Endpoint::Delete]
    );
    for call in calls {
        assert_eq!(call.request_id, Some(RequestId(4)));
        assert_eq!(call.method, "PUT");
        assert_eq!(call.content_type.as_deref(), Some("application/json"));
    }
    assert!(app.backend.requests().is_empty());
    Ok(())
}

#[tokio::test]
async fn rejected_transitions_surface_status_codes() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.backend
        .insert_request(fixtures::request(1, 10, RequestStatus::Completed));

    assert_status_code(
        app.client.approve_request(&action(10, 1)).await,
        StatusCode::BAD_REQUEST,
    );
    assert_status_code(
        app.client.cancel_request(&action(11, 1)).await,
        StatusCode::FORBIDDEN,
    );
    assert_status_code(
        app.client.accept_request(&action(20, 99)).await,
        StatusCode::NOT_FOUND,
    );
    assert_status_code(
        app.client.donor_details(UserId(5)).await,
        StatusCode::NOT_FOUND,
    );
    Ok(())
}

#[tokio::test]
async fn available_excludes_requests_taken_by_others() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.backend
        .insert_request(fixtures::request(1, 10, RequestStatus::Pending));
    app.backend.insert_request(fixtures::running(2, 10, 30));
    app.backend.insert_request(fixtures::running(3, 10, 20));

    let available = app.client.available_requests(UserId(20)).await?;

    let ids: Vec<_> = available.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![RequestId(1), RequestId(3)]);
    Ok(())
}
