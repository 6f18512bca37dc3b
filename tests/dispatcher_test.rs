//! Command routing integration tests
//! Run with: cargo test --test dispatcher_test

mod common;

use std::sync::Arc;

use common::{ensure_init, RecordingBot};
use families_bot::application::messaging::dispatcher::Dispatched;
use families_bot::application::messaging::{templates, MessageDispatcher};
use families_bot::application::services::Outcome;
use families_bot::domain::entities::{Message, Service, User};
use families_bot::infrastructure::storage::MemoryRosterStore;

fn dispatcher(bot: &Arc<RecordingBot>) -> MessageDispatcher<MemoryRosterStore, RecordingBot> {
    ensure_init();
    MessageDispatcher::new("/", MemoryRosterStore::new(), Arc::clone(bot))
}

fn user(id: i64, username: &str) -> Option<User> {
    Some(User::new(id).with_username(username))
}

/// Join text reaches the coordinator with the sender as member
#[tokio::test]
async fn test_join_text_is_routed() {
    let bot = Arc::new(RecordingBot::new());
    let dispatcher = dispatcher(&bot);

    let result = dispatcher.process_text(7, "Join Yandex+", user(7, "kim")).await.unwrap();
    let Dispatched::Membership(report) = result else {
        panic!("expected membership dispatch, got {:?}", result);
    };
    assert_eq!(
        report.outcome,
        Outcome::Joined { service: Service::YandexPlus, size: 1, capacity: 8 }
    );
    assert!(bot.sent_to(7)[0].starts_with("@kim has joined the Yandex+ family"));
}

/// Sender without a username is listed by first name
#[tokio::test]
async fn test_member_name_falls_back_to_first_name() {
    let bot = Arc::new(RecordingBot::new());
    let dispatcher = dispatcher(&bot);

    let sender = User::new(9).with_name("Lena", None::<String>);
    dispatcher.process_text(9, "Join Netflix", Some(sender)).await.unwrap();

    let roster = dispatcher.coordinator().snapshot(Service::Netflix).await;
    assert_eq!(roster[0].display_name, "Lena");
    assert_eq!(roster[0].chat_id, 9);
}

/// Unknown services get the invalid-service notice and no roster notifications
#[tokio::test]
async fn test_invalid_service_reply() {
    let bot = Arc::new(RecordingBot::new());
    let dispatcher = dispatcher(&bot);

    let result = dispatcher.process_text(3, "Join Foo", user(3, "ann")).await.unwrap();
    assert!(matches!(
        result,
        Dispatched::Membership(ref report) if report.outcome == Outcome::InvalidService("Foo".to_string())
    ));
    assert!(bot.sent().is_empty());
    let replies = bot.replies();
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].0, 3);
    assert_eq!(replies[0].1.text, templates::INVALID_SERVICE);
}

/// /start answers with the join keyboard
#[tokio::test]
async fn test_start_command_shows_keyboard() {
    let bot = Arc::new(RecordingBot::new());
    let dispatcher = dispatcher(&bot);

    dispatcher.process_text(4, "/start", user(4, "ann")).await.unwrap();

    let replies = bot.replies();
    let keyboard = replies[0].1.keyboard.as_ref().unwrap();
    assert_eq!(keyboard.rows.concat().len(), Service::ALL.len());
    assert!(keyboard.rows[0][0].starts_with("Join "));
}

/// Unknown slash commands are answered, not dropped
#[tokio::test]
async fn test_unknown_command_reply() {
    let bot = Arc::new(RecordingBot::new());
    let dispatcher = dispatcher(&bot);

    let result = dispatcher.process_text(4, "/subscribe", user(4, "ann")).await.unwrap();
    assert!(matches!(result, Dispatched::Command(ref reply) if reply.text == "Unknown command: /subscribe"));
}

/// Free text and malformed commands never reach the coordinator
#[tokio::test]
async fn test_unparseable_text_is_ignored() {
    let bot = Arc::new(RecordingBot::new());
    let dispatcher = dispatcher(&bot);

    for text in ["hello", "join Netflix", "Join", "Leave  GPT"] {
        let result = dispatcher.process_text(5, text, user(5, "ann")).await.unwrap();
        assert_eq!(result, Dispatched::Ignored, "{:?}", text);
    }
    assert!(bot.sent().is_empty());
    assert!(bot.replies().is_empty());
}

/// Membership requests need a sender to build the member from
#[tokio::test]
async fn test_membership_without_sender_is_ignored() {
    let bot = Arc::new(RecordingBot::new());
    let dispatcher = dispatcher(&bot);

    let message = Message::new(
        6,
        families_bot::domain::entities::Content::Membership {
            action: families_bot::domain::entities::Action::Join,
            service: "GPT".to_string(),
        },
    );
    assert_eq!(dispatcher.process(message).await.unwrap(), Dispatched::Ignored);
    assert!(dispatcher.coordinator().snapshot(Service::Gpt).await.is_empty());
}
