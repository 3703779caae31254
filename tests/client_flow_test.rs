mod common;

use learnhub::client::tips::DISMISSED_TIPS_KEY;
use learnhub::client::{
    ApiClient, FeedItem, KeyValueStore, MemoryStore, NotificationCenter, NotificationPoller,
    TipDeck,
};
use learnhub::notification::NotificationKind;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn poller_mirrors_server_and_keeps_stale_mirror_on_failure() {
    let state = common::test_state().await;
    let alice = common::create_user(&state, "Alice", "alice@example.com", "student").await;
    for message in ["one", "two"] {
        state
            .notification_repository
            .create(alice.id, None, message, None, NotificationKind::Info)
            .await
            .unwrap();
    }

    let server = common::spawn_server(state.clone(), "127.0.0.1:0").await;
    let addr = server.addr;

    let token = common::token_for(&state, &alice);
    let poller = NotificationPoller::new(ApiClient::new(format!("http://{}", addr), &token));

    poller.poll_once().await.expect("first poll");
    assert_eq!(poller.snapshot().await.len(), 2);

    // each successful poll replaces the mirror wholesale
    state
        .notification_repository
        .create(alice.id, None, "three", None, NotificationKind::Info)
        .await
        .unwrap();
    poller.poll_once().await.expect("second poll");
    let mirror = poller.snapshot().await;
    assert_eq!(mirror.len(), 3);
    assert_eq!(mirror[2].message, "three");

    // a failed fetch leaves the prior mirror untouched
    server.shutdown().await;
    assert!(poller.poll_once().await.is_err());
    assert_eq!(poller.snapshot().await.len(), 3);

    // the next successful poll restores a fresh mirror
    let server = common::spawn_server(state.clone(), &addr.to_string()).await;
    assert_eq!(server.addr, addr);

    poller.poll_once().await.expect("poll after restart");
    assert_eq!(poller.snapshot().await.len(), 3);

    server.shutdown().await;
}

#[tokio::test]
async fn mark_read_is_optimistic_and_propagates_to_server() {
    let state = common::test_state().await;
    let alice = common::create_user(&state, "Alice", "alice@example.com", "student").await;
    let unread = state
        .notification_repository
        .create(alice.id, None, "unread", None, NotificationKind::Info)
        .await
        .unwrap();

    let server = common::spawn_server(state.clone(), "127.0.0.1:0").await;

    let token = common::token_for(&state, &alice);
    let poller =
        NotificationPoller::new(ApiClient::new(format!("http://{}", server.addr), &token));
    poller.poll_once().await.unwrap();

    let request = poller.mark_read(unread.id).await;

    // the local flip is visible before the server round trip completes
    assert!(poller.snapshot().await[0].is_read);

    request.await.unwrap();
    let stored = state
        .notification_repository
        .find_by_id(unread.id)
        .await
        .unwrap()
        .unwrap();
    assert!(stored.is_read);

    server.shutdown().await;
}

#[tokio::test]
async fn failed_mark_read_keeps_the_optimistic_flip() {
    let state = common::test_state().await;
    let alice = common::create_user(&state, "Alice", "alice@example.com", "student").await;
    let unread = state
        .notification_repository
        .create(alice.id, None, "unread", None, NotificationKind::Info)
        .await
        .unwrap();

    let server = common::spawn_server(state.clone(), "127.0.0.1:0").await;

    let token = common::token_for(&state, &alice);
    let poller =
        NotificationPoller::new(ApiClient::new(format!("http://{}", server.addr), &token));
    poller.poll_once().await.unwrap();

    server.shutdown().await;

    // request fails server-side; the flip is not rolled back
    poller.mark_read(unread.id).await.await.unwrap();
    assert!(poller.snapshot().await[0].is_read);

    let stored = state
        .notification_repository
        .find_by_id(unread.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!stored.is_read);
}

#[tokio::test]
async fn spawned_poller_fetches_immediately_and_stops_on_cancel() {
    let state = common::test_state().await;
    let alice = common::create_user(&state, "Alice", "alice@example.com", "student").await;
    state
        .notification_repository
        .create(alice.id, None, "hello", None, NotificationKind::Info)
        .await
        .unwrap();

    let server = common::spawn_server(state.clone(), "127.0.0.1:0").await;

    let token = common::token_for(&state, &alice);
    let poller =
        NotificationPoller::new(ApiClient::new(format!("http://{}", server.addr), &token));

    let cancel = CancellationToken::new();
    let handle = poller.spawn(cancel.clone());

    // first fetch happens right away, well before the 30s interval
    let mut fetched = false;
    for _ in 0..50 {
        if !poller.snapshot().await.is_empty() {
            fetched = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(fetched, "spawned poller never issued its first fetch");

    cancel.cancel();
    tokio::time::timeout(Duration::from_secs(1), handle)
        .await
        .expect("poller loop should stop on cancel")
        .unwrap();

    server.shutdown().await;
}

#[tokio::test]
async fn badge_scenario_end_to_end() {
    let state = common::test_state().await;
    let alice = common::create_user(&state, "Alice", "alice@example.com", "student").await;

    let read = state
        .notification_repository
        .create(alice.id, None, "seen already", None, NotificationKind::Info)
        .await
        .unwrap();
    state
        .notification_repository
        .mark_as_read(read.id)
        .await
        .unwrap();
    let unread = state
        .notification_repository
        .create(alice.id, None, "fresh", None, NotificationKind::Reminder)
        .await
        .unwrap();

    let server = common::spawn_server(state.clone(), "127.0.0.1:0").await;

    let token = common::token_for(&state, &alice);
    let poller =
        NotificationPoller::new(ApiClient::new(format!("http://{}", server.addr), &token));
    poller.poll_once().await.unwrap();

    let session_store = Arc::new(MemoryStore::new());
    let mut center = NotificationCenter::new(poller, TipDeck::load(session_store.clone()));

    // 1 unread notification + 5 visible tips
    assert_eq!(center.badge().await, 6);

    // tips render first, then server notifications
    let feed = center.feed().await;
    assert_eq!(feed.len(), 7);
    assert!(matches!(feed[0], FeedItem::Tip(_)));
    assert!(matches!(feed[5], FeedItem::Notification(_)));

    center.dismiss_tip("tip2");
    assert_eq!(center.badge().await, 5);
    assert_eq!(
        session_store.get(DISMISSED_TIPS_KEY).as_deref(),
        Some(r#"["tip2"]"#)
    );

    center.mark_read(unread.id).await.await.unwrap();
    assert_eq!(center.badge().await, 4);

    server.shutdown().await;
}
