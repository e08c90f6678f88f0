// tests/chat_tests.rs

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use alerta_common::models::actor::{Actor, ActorRole};
use alerta_common::{ChatError, Error};
use alerta_core::services::{AlertLifecycleService, ChatLogService};
use alerta_core::test_utils::{init_test_tracing, sample_new_alert, MemoryAlertRepo, MemoryChatRepo};
use alerta_core::utils::time::ManualClock;

fn base_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap()
}

fn setup() -> (
    Arc<ManualClock>,
    AlertLifecycleService,
    ChatLogService,
) {
    init_test_tracing();
    let alert_repo = Arc::new(MemoryAlertRepo::new());
    let chat_repo = Arc::new(MemoryChatRepo::new());
    let clock = Arc::new(ManualClock::new(base_time()));
    let lifecycle = AlertLifecycleService::new(alert_repo.clone(), clock.clone());
    let chat = ChatLogService::new(alert_repo, chat_repo, clock.clone());
    (clock, lifecycle, chat)
}

#[tokio::test]
async fn test_append_and_list_one_message() -> Result<(), Error> {
    let (_clock, lifecycle, chat) = setup();
    let alert = lifecycle.create_alert(sample_new_alert(HashSet::new())).await?;

    let sender = Uuid::new_v4();
    let msg = chat
        .append(alert.alert_id, sender, "Pedro", "  all clear on my side  ")
        .await
        .unwrap();

    // Text is stored trimmed, stamped with the injected clock.
    assert_eq!(msg.message, "all clear on my side");
    assert_eq!(msg.timestamp, base_time());
    assert_eq!(msg.alert_id, alert.alert_id);

    let listed = chat.list(alert.alert_id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].message_id, msg.message_id);
    Ok(())
}

#[tokio::test]
async fn test_blank_message_rejected() -> Result<(), Error> {
    let (_clock, lifecycle, chat) = setup();
    let alert = lifecycle.create_alert(sample_new_alert(HashSet::new())).await?;

    for blank in ["", "   ", "\n\t"] {
        let result = chat.append(alert.alert_id, Uuid::new_v4(), "Pedro", blank).await;
        assert!(matches!(result, Err(ChatError::EmptyMessage)));
    }
    Ok(())
}

#[tokio::test]
async fn test_closed_alert_rejects_writes_but_stays_readable() -> Result<(), Error> {
    let (_clock, lifecycle, chat) = setup();
    let alert = lifecycle.create_alert(sample_new_alert(HashSet::new())).await?;
    let sender = Uuid::new_v4();

    chat.append(alert.alert_id, sender, "Pedro", "on my way").await.unwrap();

    let actor = Actor::new(Uuid::new_v4(), ActorRole::Admin);
    lifecycle.resolve(alert.alert_id, &actor).await.unwrap();

    let late = chat.append(alert.alert_id, sender, "Pedro", "too late").await;
    assert!(matches!(late, Err(ChatError::AlertTerminal(_))));

    // History remains readable on a closed alert.
    let listed = chat.list(alert.alert_id).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].message, "on my way");
    Ok(())
}

#[tokio::test]
async fn test_unknown_alert_not_found() {
    let (_clock, _lifecycle, chat) = setup();

    let append = chat.append(Uuid::new_v4(), Uuid::new_v4(), "Pedro", "hi").await;
    assert!(matches!(append, Err(ChatError::NotFound(_))));

    let list = chat.list(Uuid::new_v4()).await;
    assert!(matches!(list, Err(ChatError::NotFound(_))));
}

#[tokio::test]
async fn test_list_reorders_out_of_order_arrivals() -> Result<(), Error> {
    let (clock, lifecycle, chat) = setup();
    let alert = lifecycle.create_alert(sample_new_alert(HashSet::new())).await?;
    let sender = Uuid::new_v4();

    // Arrival order t3, t1, t2 simulates network reordering: the store
    // receives timestamps out of sequence.
    clock.set(base_time() + Duration::minutes(3));
    chat.append(alert.alert_id, sender, "Pedro", "third").await.unwrap();
    clock.set(base_time() + Duration::minutes(1));
    chat.append(alert.alert_id, sender, "Pedro", "first").await.unwrap();
    clock.set(base_time() + Duration::minutes(2));
    chat.append(alert.alert_id, sender, "Pedro", "second").await.unwrap();

    let listed = chat.list(alert.alert_id).await.unwrap();
    let texts: Vec<&str> = listed.iter().map(|m| m.message.as_str()).collect();
    assert_eq!(texts, ["first", "second", "third"]);
    Ok(())
}

#[tokio::test]
async fn test_list_is_repeatable() -> Result<(), Error> {
    let (clock, lifecycle, chat) = setup();
    let alert = lifecycle.create_alert(sample_new_alert(HashSet::new())).await?;
    let sender = Uuid::new_v4();

    // Two messages sharing a timestamp keep their insertion order.
    chat.append(alert.alert_id, sender, "Pedro", "one").await.unwrap();
    chat.append(alert.alert_id, sender, "Pedro", "two").await.unwrap();
    clock.advance(Duration::seconds(30));
    chat.append(alert.alert_id, sender, "Pedro", "three").await.unwrap();

    let first_read = chat.list(alert.alert_id).await.unwrap();
    let second_read = chat.list(alert.alert_id).await.unwrap();

    let ids = |msgs: &[alerta_common::models::chat::AlertChatMessage]| {
        msgs.iter().map(|m| m.message_id).collect::<Vec<_>>()
    };
    assert_eq!(ids(&first_read), ids(&second_read));
    assert_eq!(first_read[0].message, "one");
    assert_eq!(first_read[1].message, "two");
    Ok(())
}

#[tokio::test]
async fn test_emitter_messages_are_distinguishable() -> Result<(), Error> {
    let (_clock, lifecycle, chat) = setup();
    let alert = lifecycle.create_alert(sample_new_alert(HashSet::new())).await?;

    let from_emitter = chat
        .append(alert.alert_id, alert.emitter_id, "Maria Lopez", "help needed")
        .await
        .unwrap();
    let from_contact = chat
        .append(alert.alert_id, Uuid::new_v4(), "Pedro", "on my way")
        .await
        .unwrap();

    assert!(from_emitter.is_from_emitter(alert.emitter_id));
    assert!(!from_contact.is_from_emitter(alert.emitter_id));
    Ok(())
}
