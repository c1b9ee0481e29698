use dashboard::{ActionError, ApproveLabel, ListView, Notification, RowAction};
use payloads::{RequestId, RequestStatus, UserData};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use test_helpers::{Endpoint, fixtures, spawn_app};

use crate::{my_requests, signed_in};

#[tokio::test]
async fn rows_follow_status_most_recent_first() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.backend.insert_request(fixtures::running(1, 10, 20));
    app.backend
        .insert_request(fixtures::request(2, 10, RequestStatus::Completed));
    app.backend
        .insert_request(fixtures::request(3, 99, RequestStatus::Pending));

    let (page, notifier) = my_requests(&app, signed_in(10));
    assert_eq!(page.list(), ListView::Loading);
    page.load().await;

    let list = page.list();
    let rows = list.rows();
    let ids: Vec<_> = rows.iter().map(|r| r.request.id).collect();
    assert_eq!(ids, vec![RequestId(2), RequestId(1)]);

    let completed = &rows[0];
    assert_eq!(completed.approve.label, ApproveLabel::Approved);
    assert!(completed.approve.label.shows_success_glyph());
    assert!(!completed.approve.enabled);
    assert!(!completed.cancel.enabled);
    assert!(!completed.delete.enabled);

    let running = &rows[1];
    assert_eq!(running.approve.label, ApproveLabel::Approve);
    assert!(running.approve.is_clickable());
    assert!(running.cancel.is_clickable());
    assert!(running.delete.is_clickable());

    assert!(notifier.seen().is_empty());
    Ok(())
}

#[tokio::test]
async fn approve_completes_and_refetches_once() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.backend.insert_request(fixtures::running(1, 10, 20));

    let (page, _) = my_requests(&app, signed_in(10));
    page.load().await;
    assert_eq!(page.dashboard().fetch_count(), 1);

    let request = page.list().rows()[0].request.clone();
    page.approve(&request).await?;

    assert_eq!(page.dashboard().fetch_count(), 2);
    assert_eq!(app.backend.count(Endpoint::Dashboard), 2);
    assert_eq!(app.backend.count(Endpoint::Approve), 1);

    let list = page.list();
    let row = &list.rows()[0];
    assert_eq!(row.request.blood_request_type, RequestStatus::Completed);
    assert_eq!(row.approve.label, ApproveLabel::Approved);
    assert!(!page.is_pending(RequestId(1), RowAction::Approve));
    Ok(())
}

#[tokio::test]
async fn approve_sends_the_signed_in_user() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.backend.insert_request(fixtures::running(7, 10, 20));

    let (page, _) = my_requests(&app, signed_in(10));
    page.load().await;
    let request = page.list().rows()[0].request.clone();
    page.approve(&request).await?;

    let call = app
        .backend
        .calls()
        .into_iter()
        .find(|c| c.endpoint == Endpoint::Approve)
        .expect("approve call");
    assert_eq!(call.request_id, Some(RequestId(7)));
    assert_eq!(call.user_id, Some(payloads::UserId(10)));
    assert_eq!(call.content_type.as_deref(), Some("application/json"));
    Ok(())
}

#[tokio::test]
async fn approve_without_user_id_notifies_and_sends_nothing()
-> anyhow::Result<()> {
    let app = spawn_app().await;
    let user = UserData {
        user_id: None,
        token: Some("token".into()),
    };
    let (page, notifier) = my_requests(&app, Some(user));

    let request = fixtures::running(1, 10, 20);
    let result = page.approve(&request).await;

    assert!(matches!(result, Err(ActionError::NotAuthenticated)));
    assert_eq!(notifier.seen(), vec![Notification::authentication_failed()]);
    assert_eq!(app.backend.count(Endpoint::Approve), 0);
    Ok(())
}

#[tokio::test]
async fn signed_out_page_is_empty_and_silent() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.backend.insert_request(fixtures::running(1, 10, 20));
    let (page, notifier) = my_requests(&app, None);

    page.load().await;
    assert_eq!(page.list(), ListView::Empty);

    let request = fixtures::running(1, 10, 20);
    assert!(matches!(
        page.cancel(&request).await,
        Err(ActionError::NotAuthenticated)
    ));
    assert!(matches!(
        page.delete(&request).await,
        Err(ActionError::NotAuthenticated)
    ));

    assert!(notifier.seen().is_empty());
    assert!(app.backend.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn actions_outside_their_status_are_refused() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let (page, _) = my_requests(&app, signed_in(10));

    let pending = fixtures::request(1, 10, RequestStatus::Pending);
    let completed = fixtures::request(2, 10, RequestStatus::Completed);

    assert!(matches!(
        page.approve(&pending).await,
        Err(ActionError::Unavailable { status: RequestStatus::Pending, .. })
    ));
    assert!(matches!(
        page.cancel(&pending).await,
        Err(ActionError::Unavailable { .. })
    ));
    assert!(matches!(
        page.delete(&completed).await,
        Err(ActionError::Unavailable { .. })
    ));
    assert!(app.backend.calls().is_empty());
    Ok(())
}

#[tokio::test]
async fn cancel_and_delete_use_the_request_owner() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.backend.insert_request(fixtures::running(1, 10, 20));
    app.backend
        .insert_request(fixtures::request(2, 10, RequestStatus::Pending));

    let (page, _) = my_requests(&app, signed_in(10));
    page.load().await;

    page.cancel(&fixtures::running(1, 10, 20)).await?;
    let cancelled = app.backend.request(RequestId(1)).expect("still stored");
    assert_eq!(cancelled.blood_request_type, RequestStatus::Pending);
    assert_eq!(cancelled.accepted_donor_id, None);

    page.delete(&fixtures::request(2, 10, RequestStatus::Pending))
        .await?;
    assert!(app.backend.request(RequestId(2)).is_none());

    let ids: Vec<_> = page.list().rows().iter().map(|r| r.request.id).collect();
    assert_eq!(ids, vec![RequestId(1)]);
    assert_eq!(app.backend.count(Endpoint::Dashboard), 3);
    Ok(())
}

#[tokio::test]
async fn failed_mutation_leaves_list_untouched() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.backend.insert_request(fixtures::running(1, 10, 20));
    app.backend.fail(Endpoint::Approve);

    let (page, notifier) = my_requests(&app, signed_in(10));
    page.load().await;
    let request = page.list().rows()[0].request.clone();

    let result = page.approve(&request).await;
    assert!(matches!(result, Err(ActionError::Client(_))));

    assert_eq!(app.backend.count(Endpoint::Dashboard), 1);
    assert!(!page.is_pending(RequestId(1), RowAction::Approve));
    assert_eq!(page.list().rows()[0].approve.label, ApproveLabel::Approve);
    assert!(notifier.seen().is_empty());
    Ok(())
}

#[tokio::test]
async fn concurrent_approvals_track_each_row() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.backend.insert_request(fixtures::running(1, 10, 20));
    app.backend.insert_request(fixtures::running(2, 10, 30));
    app.backend.delay(RequestId(1), Duration::from_millis(300));
    app.backend.delay(RequestId(2), Duration::from_millis(20));

    let (page, _) = my_requests(&app, signed_in(10));
    page.load().await;

    let seen = Rc::new(RefCell::new(Vec::new()));
    let _subscription = {
        let seen = seen.clone();
        let observed = page.clone();
        page.subscribe(move || {
            let rows = observed.pending_rows(RowAction::Approve);
            let mut seen = seen.borrow_mut();
            if seen.last() != Some(&rows) {
                seen.push(rows);
            }
        })
    };

    let first = fixtures::running(1, 10, 20);
    let second = fixtures::running(2, 10, 30);
    let (a, b) = tokio::join!(page.approve(&first), page.approve(&second));
    a?;
    b?;

    assert_eq!(
        *seen.borrow(),
        vec![
            vec![RequestId(1)],
            vec![RequestId(1), RequestId(2)],
            vec![RequestId(1)],
            vec![],
        ]
    );
    assert_eq!(app.backend.count(Endpoint::Dashboard), 3);
    let labels: Vec<_> =
        page.list().rows().iter().map(|r| r.approve.label).collect();
    assert_eq!(labels, vec![ApproveLabel::Approved, ApproveLabel::Approved]);
    Ok(())
}

#[tokio::test]
async fn fetch_failure_notifies_once_and_shows_nothing() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.backend.insert_request(fixtures::running(1, 10, 20));
    app.backend.fail(Endpoint::Dashboard);

    let (page, notifier) = my_requests(&app, signed_in(10));
    page.load().await;
    page.refresh().await;

    assert_eq!(page.list(), ListView::Failed);
    assert_eq!(notifier.seen(), vec![Notification::fetch_failed()]);

    app.backend.recover(Endpoint::Dashboard);
    page.refresh().await;
    assert_eq!(page.list().rows().len(), 1);
    Ok(())
}

#[tokio::test]
async fn no_requests_shows_empty_state() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.backend
        .insert_request(fixtures::request(1, 99, RequestStatus::Pending));

    let (page, notifier) = my_requests(&app, signed_in(10));
    page.load().await;

    assert_eq!(page.list(), ListView::Empty);
    assert!(notifier.seen().is_empty());
    Ok(())
}
