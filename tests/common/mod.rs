//! Shared test doubles
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Mutex, Once};

use families_bot::application::errors::BotError;
use families_bot::domain::entities::Reply;
use families_bot::domain::traits::{Bot, BotInfo, Notifier};

static INIT: Once = Once::new();

pub fn ensure_init() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Records every send; chats listed in `failing` get a delivery error instead
#[derive(Default)]
pub struct RecordingBot {
    sent: Mutex<Vec<(i64, String)>>,
    replies: Mutex<Vec<(i64, Reply)>>,
    failing: HashSet<i64>,
}

impl RecordingBot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_for(chats: &[i64]) -> Self {
        Self {
            failing: chats.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<(i64, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, chat_id: i64) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter(|(id, _)| *id == chat_id)
            .map(|(_, text)| text)
            .collect()
    }

    pub fn replies(&self) -> Vec<(i64, Reply)> {
        self.replies.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.sent.lock().unwrap().clear();
        self.replies.lock().unwrap().clear();
    }
}

#[async_trait]
impl Notifier for RecordingBot {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), BotError> {
        if self.failing.contains(&chat_id) {
            return Err(BotError::Delivery(format!("chat {} unreachable", chat_id)));
        }
        self.sent.lock().unwrap().push((chat_id, text.to_string()));
        Ok(())
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn start(&self) -> Result<(), BotError> {
        Ok(())
    }

    async fn send_reply(&self, chat_id: i64, reply: &Reply) -> Result<(), BotError> {
        self.replies.lock().unwrap().push((chat_id, reply.clone()));
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        BotInfo {
            id: "test".to_string(),
            name: "families-bot".to_string(),
            username: "test_bot".to_string(),
        }
    }
}
