use std::collections::HashSet;
use std::sync::Arc;

use super::topic::Topic;
use super::{ChatMessage, ConnectionId, ConnectionStats, Hub, MessageType, Session};
use crate::utils::error::HubError;

#[test]
fn test_topic_new() {
    let topic = Topic::new("public");
    assert_eq!(topic.name, "public");
    assert!(topic.is_empty());
}

#[test]
fn test_topic_subscribe_is_idempotent() {
    let mut topic = Topic::new("public");
    let id = ConnectionId::new();
    topic.subscribe(id);
    topic.subscribe(id);
    assert_eq!(topic.len(), 1);
    assert!(topic.unsubscribe(&id));
    assert!(!topic.unsubscribe(&id));
}

#[test]
fn test_session_first_join_only_once() {
    let mut session = Session::new();
    assert_eq!(session.display_name(), None);
    assert!(session.set_display_name("Nova"));
    assert!(!session.set_display_name("Nova Trent"));
    assert_eq!(session.display_name(), Some("Nova Trent"));
}

#[test]
fn test_hub_new_is_empty() {
    let hub = Hub::default();
    assert_eq!(hub.topic(), "public");
    assert_eq!(hub.registered(), 0);
    assert_eq!(hub.stats().active(), 0);
}

#[test]
fn test_join_and_send_scenario() {
    let hub = Hub::default();
    let a = hub.connect();

    let joined = hub.join(&a, "Nova").unwrap();
    assert_eq!(joined.kind, MessageType::Join);
    assert_eq!(joined.content, "Nova ist dem Chat beigetreten!");
    assert_eq!(joined.sender, "Nova");
    assert!(joined.timestamp > 0);

    let chat = hub.send(&a, "hi").unwrap();
    assert_eq!(chat.kind, MessageType::Chat);
    assert_eq!(chat.sender, "Nova");
    assert_eq!(chat.content, "hi");
    assert!(chat.timestamp >= joined.timestamp);
}

#[test]
fn test_n_sends_produce_n_messages_in_order() {
    let hub = Hub::default();
    let a = hub.connect();
    hub.join(&a, "Nova").unwrap();

    let messages: Vec<ChatMessage> = (0..20)
        .map(|i| hub.send(&a, &format!("message {i}")).unwrap())
        .collect();

    assert_eq!(messages.len(), 20);
    for (i, msg) in messages.iter().enumerate() {
        assert_eq!(msg.kind, MessageType::Chat);
        assert_eq!(msg.sender, "Nova");
        assert_eq!(msg.content, format!("message {i}"));
    }
    assert!(messages.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    assert_eq!(hub.stats().messages_accepted(), 20);
}

#[test]
fn test_send_before_join_fails() {
    let hub = Hub::default();
    let a = hub.connect();

    let err = hub.send(&a, "too early").unwrap_err();
    assert_eq!(err, HubError::NotJoined(a));
    assert_eq!(hub.stats().messages_accepted(), 0);
}

#[test]
fn test_unknown_connection_is_rejected() {
    let hub = Hub::default();
    let ghost = ConnectionId::new();

    assert_eq!(
        hub.join(&ghost, "Ghost").unwrap_err(),
        HubError::UnknownConnection(ghost)
    );
    assert_eq!(
        hub.send(&ghost, "boo").unwrap_err(),
        HubError::UnknownConnection(ghost)
    );
    assert_eq!(hub.stats().active(), 0);
}

#[test]
fn test_broadcast_with_no_connections_is_empty() {
    let hub = Hub::default();
    let msg = ChatMessage::chat("Nova", "anyone?", 1);
    assert!(hub.broadcast(&msg).is_empty());
}

#[test]
fn test_broadcast_includes_unjoined_connections() {
    let hub = Hub::default();
    let a = hub.connect();
    let b = hub.connect();
    let msg = hub.join(&a, "Nova").unwrap();

    assert_eq!(hub.broadcast(&msg), HashSet::from([a, b]));
}

#[test]
fn test_disconnect_is_idempotent() {
    let stats = Arc::new(ConnectionStats::new());
    let hub = Hub::new("public", stats.clone());
    let a = hub.connect();
    let b = hub.connect();
    hub.join(&a, "Nova").unwrap();
    hub.join(&b, "Elyndra").unwrap();
    assert_eq!(stats.active(), 2);

    let leave = hub.disconnect(&a).unwrap();
    assert_eq!(leave.kind, MessageType::Leave);
    assert_eq!(leave.sender, "Nova");
    assert_eq!(leave.content, "Nova hat den Chat verlassen!");
    assert_eq!(stats.active(), 1);

    assert!(hub.disconnect(&a).is_none());
    assert_eq!(stats.active(), 1);
    assert!(!hub.is_registered(&a));
    assert_eq!(hub.broadcast(&leave), HashSet::from([b]));
}

#[test]
fn test_disconnect_without_join_is_silent() {
    let hub = Hub::default();
    let a = hub.connect();

    assert!(hub.disconnect(&a).is_none());
    assert_eq!(hub.registered(), 0);
    assert_eq!(hub.stats().active(), 0);
}

#[test]
fn test_rejoin_renames_without_double_count() {
    let hub = Hub::default();
    let a = hub.connect();
    hub.join(&a, "Nova").unwrap();
    let again = hub.join(&a, "Nova Trent").unwrap();

    assert_eq!(again.content, "Nova Trent ist dem Chat beigetreten!");
    assert_eq!(hub.display_name(&a).as_deref(), Some("Nova Trent"));
    assert_eq!(hub.stats().active(), 1);
    assert_eq!(hub.stats().total_joined(), 1);
}

#[test]
fn test_duplicate_display_names_are_allowed() {
    let hub = Hub::default();
    let a = hub.connect();
    let b = hub.connect();
    hub.join(&a, "Nova").unwrap();
    hub.join(&b, "Nova").unwrap();

    assert_eq!(hub.stats().active(), 2);
    assert_eq!(hub.send(&b, "me too").unwrap().sender, "Nova");
}

#[test]
fn test_stats_are_scoped_to_their_hub() {
    let first = Hub::default();
    let second = Hub::default();
    let a = first.connect();
    first.join(&a, "Nova").unwrap();

    assert_eq!(first.stats().active(), 1);
    assert_eq!(second.stats().active(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_two_connections_interleaved() {
    let hub = Arc::new(Hub::default());
    let a = hub.connect();
    let b = hub.connect();

    let tasks = [(a, "Nova"), (b, "Elyndra")].map(|(id, name)| {
        let hub = hub.clone();
        tokio::spawn(async move {
            let join = hub.join(&id, name).unwrap();
            let chat = hub.send(&id, &format!("hello from {name}")).unwrap();
            let recipients = hub.broadcast(&chat);
            (name, join, chat, recipients)
        })
    });

    for (name, join, chat, recipients) in futures::future::join_all(tasks)
        .await
        .into_iter()
        .map(Result::unwrap)
    {
        assert_eq!(join.sender, name);
        assert_eq!(chat.sender, name);
        assert_eq!(chat.content, format!("hello from {name}"));
        assert!(chat.timestamp >= join.timestamp);
        assert_eq!(recipients, HashSet::from([a, b]));
    }
}

#[test]
fn test_try_connect_respects_limit() {
    let hub = Hub::default();
    let first = hub.try_connect(2).unwrap();
    hub.try_connect(2).unwrap();
    assert!(hub.try_connect(2).is_none());
    assert_eq!(hub.registered(), 2);

    hub.disconnect(&first);
    assert!(hub.try_connect(2).is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_try_connect_limit_is_exact_under_contention() {
    const LIMIT: usize = 16;

    let hub = Arc::new(Hub::default());
    let attempts = (0..200).map(|_| {
        let hub = hub.clone();
        tokio::spawn(async move { hub.try_connect(LIMIT).is_some() })
    });
    let admitted = futures::future::join_all(attempts)
        .await
        .into_iter()
        .map(Result::unwrap)
        .filter(|admitted| *admitted)
        .count();

    assert_eq!(admitted, LIMIT);
    assert_eq!(hub.registered(), LIMIT);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_counter_survives_concurrent_connect_and_disconnect() {
    const K: usize = 200;
    const J: usize = 120;

    let stats = Arc::new(ConnectionStats::new());
    let hub = Arc::new(Hub::new("public", stats.clone()));

    let joins = (0..K).map(|i| {
        let hub = hub.clone();
        tokio::spawn(async move {
            let id = hub.connect();
            hub.join(&id, &format!("user-{i}")).unwrap();
            id
        })
    });
    let ids: Vec<ConnectionId> = futures::future::join_all(joins)
        .await
        .into_iter()
        .map(Result::unwrap)
        .collect();
    assert_eq!(stats.active(), K);

    // every id disconnected twice, from competing tasks
    let leaves = ids[..J].iter().flat_map(|id| [*id, *id]).map(|id| {
        let hub = hub.clone();
        tokio::spawn(async move { hub.disconnect(&id).is_some() })
    });
    let announced = futures::future::join_all(leaves)
        .await
        .into_iter()
        .map(Result::unwrap)
        .filter(|announced| *announced)
        .count();

    assert_eq!(announced, J);
    assert_eq!(stats.active(), K - J);
    assert_eq!(hub.registered(), K - J);
    assert_eq!(stats.total_joined(), K as u64);
}
