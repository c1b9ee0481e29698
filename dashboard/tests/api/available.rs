use dashboard::{
    ActionError, AvailableRequests, ListView, MyRequests, Notification,
    QueryClient, Variant,
};
use payloads::{RequestId, RequestStatus, UserData};
use std::rc::Rc;
use test_helpers::{Endpoint, TestApp, fixtures, spawn_app};

use crate::{RecordingNotifier, signed_in};

fn available(
    app: &TestApp,
    client: &QueryClient,
    user: Option<UserData>,
) -> (AvailableRequests, Rc<RecordingNotifier>) {
    let notifier = Rc::new(RecordingNotifier::default());
    let api = Rc::new(app.api_client());
    let page =
        AvailableRequests::new(client, api.clone(), api, user, notifier.clone());
    (page, notifier)
}

#[tokio::test]
async fn accept_moves_request_to_running() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.backend
        .insert_request(fixtures::request(1, 10, RequestStatus::Pending));
    app.backend
        .insert_request(fixtures::request(2, 20, RequestStatus::Pending));

    let (page, notifier) = available(&app, &QueryClient::new(), signed_in(20));
    page.load().await;

    let rows = page.list().rows().to_vec();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].accept.is_clickable());
    assert!(!rows[0].cancel_donation.enabled);

    page.accept(&rows[0].request).await?;

    let list = page.list();
    let row = &list.rows()[0];
    assert_eq!(row.request.blood_request_type, RequestStatus::Running);
    assert!(row.accepted_by_me);
    assert!(!row.accept.enabled);
    assert!(row.cancel_donation.is_clickable());

    assert_eq!(app.backend.count(Endpoint::AvailableRequests), 2);
    let seen = notifier.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].variant, Variant::Success);
    Ok(())
}

#[tokio::test]
async fn cancel_donation_reopens_request() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.backend.insert_request(fixtures::running(1, 10, 20));

    let (page, _) = available(&app, &QueryClient::new(), signed_in(20));
    page.load().await;
    let request = page.list().rows()[0].request.clone();

    page.cancel_donation(&request).await?;

    let stored = app.backend.request(RequestId(1)).expect("stored");
    assert_eq!(stored.blood_request_type, RequestStatus::Pending);
    assert_eq!(stored.accepted_donor_id, None);
    assert!(page.list().rows()[0].accept.is_clickable());
    Ok(())
}

#[tokio::test]
async fn cannot_withdraw_from_someone_elses_donation() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (page, _) = available(&app, &QueryClient::new(), signed_in(20));

    let result = page.cancel_donation(&fixtures::running(1, 10, 30)).await;

    assert!(matches!(result, Err(ActionError::Unavailable { .. })));
    assert_eq!(app.backend.count(Endpoint::CancelDonation), 0);
    Ok(())
}

#[tokio::test]
async fn accept_requires_a_user() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (page, notifier) = available(&app, &QueryClient::new(), None);

    page.load().await;
    assert_eq!(page.list(), ListView::Empty);

    let result = page
        .accept(&fixtures::request(1, 10, RequestStatus::Pending))
        .await;
    assert!(matches!(result, Err(ActionError::NotAuthenticated)));
    assert_eq!(notifier.seen(), vec![Notification::authentication_failed()]);
    assert!(app.backend.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn donor_actions_leave_the_dashboard_cached() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.backend
        .insert_request(fixtures::request(1, 10, RequestStatus::Pending));
    app.backend
        .insert_request(fixtures::request(2, 20, RequestStatus::Pending));

    let client = QueryClient::new();
    let api = Rc::new(app.api_client());
    let mine = MyRequests::new(
        &client,
        api,
        signed_in(20),
        Rc::new(RecordingNotifier::default()),
    );
    mine.load().await;

    let (page, _) = available(&app, &client, signed_in(20));
    page.load().await;
    let request = page.list().rows()[0].request.clone();
    page.accept(&request).await?;

    assert_eq!(mine.dashboard().fetch_count(), 1);
    assert_eq!(page.query().fetch_count(), 2);
    Ok(())
}
