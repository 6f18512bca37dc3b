use async_trait::async_trait;

use super::Notifier;
use crate::application::errors::BotError;
use crate::domain::entities::Reply;

/// Bot trait - abstraction for messaging platform adapters
#[async_trait]
pub trait Bot: Notifier {
    /// Prepare the adapter before the message loop starts
    async fn start(&self) -> Result<(), BotError>;

    /// Send a command reply, with its keyboard if it has one
    async fn send_reply(&self, chat_id: i64, reply: &Reply) -> Result<(), BotError>;

    /// Get bot info
    fn bot_info(&self) -> BotInfo;
}

/// Bot information
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub username: String,
}
