use async_trait::async_trait;
use std::sync::Arc;

use crate::application::errors::BotError;

/// Delivers a single text message to one chat.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), BotError>;
}

#[async_trait]
impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), BotError> {
        (**self).send(chat_id, text).await
    }
}
