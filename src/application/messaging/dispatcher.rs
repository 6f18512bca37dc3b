//! Message dispatcher - Routes inbound messages to the coordinator or commands

use std::sync::Arc;

use chrono::Utc;
use tracing::Instrument;

use super::parser::MessageParser;
use super::templates;
use crate::application::errors::{BotError, CommandError};
use crate::application::services::{CommandService, MembershipCoordinator, Outcome, RequestReport};
use crate::domain::entities::{Content, Member, Message, Reply, User};
use crate::domain::traits::{Bot, RosterStore};

/// What the dispatcher did with a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    Membership(RequestReport),
    Command(Reply),
    Ignored,
}

/// Routes parsed messages to their handlers and sends the replies
pub struct MessageDispatcher<S: RosterStore, B: Bot> {
    parser: MessageParser,
    commands: CommandService,
    coordinator: MembershipCoordinator<S, Arc<B>>,
    bot: Arc<B>,
}

impl<S: RosterStore, B: Bot> MessageDispatcher<S, B> {
    pub fn new(prefix: impl Into<String>, store: S, bot: Arc<B>) -> Self {
        let prefix = prefix.into();
        let mut commands = CommandService::new(prefix.clone());
        commands.register_defaults();

        Self {
            parser: MessageParser::new(prefix),
            commands,
            coordinator: MembershipCoordinator::new(store, Arc::clone(&bot)),
            bot,
        }
    }

    pub fn commands(&self) -> &CommandService {
        &self.commands
    }

    pub fn coordinator(&self) -> &MembershipCoordinator<S, Arc<B>> {
        &self.coordinator
    }

    /// Parse and process raw inbound text
    pub async fn process_text(&self, chat_id: i64, text: &str, sender: Option<User>) -> Result<Dispatched, BotError> {
        let message = self.parser.parse(chat_id, text, sender);
        self.process(message).await
    }

    /// Route a message inside a span carrying its id; logs handling time on completion
    pub async fn process(&self, message: Message) -> Result<Dispatched, BotError> {
        let span = tracing::debug_span!("message", id = %message.id, chat_id = message.chat_id);
        let result = self.route(&message).instrument(span.clone()).await;

        let elapsed = Utc::now().signed_duration_since(message.timestamp);
        span.in_scope(|| tracing::debug!("Handled in {} ms", elapsed.num_milliseconds()));
        result
    }

    async fn route(&self, message: &Message) -> Result<Dispatched, BotError> {
        match &message.content {
            Content::Membership { action, service } => {
                let Some(sender) = &message.sender else {
                    tracing::warn!("[{}] Membership request without a sender, ignoring", message.chat_id);
                    return Ok(Dispatched::Ignored);
                };
                let requester = Member::from_user(sender, message.chat_id);
                let report = self.coordinator.handle_request(*action, service, requester).await?;

                if let Outcome::InvalidService(_) = report.outcome {
                    self.reply(message.chat_id, &Reply::text(templates::INVALID_SERVICE)).await;
                }
                Ok(Dispatched::Membership(report))
            }
            Content::Command { name, .. } => {
                let reply = match self.commands.handle(message) {
                    Ok(Some(reply)) => reply,
                    Ok(None) => return Ok(Dispatched::Ignored),
                    Err(CommandError::NotFound(_)) => {
                        Reply::text(format!("Unknown command: {}{}", self.commands.prefix(), name))
                    }
                };
                self.reply(message.chat_id, &reply).await;
                Ok(Dispatched::Command(reply))
            }
            Content::Text(text) => {
                tracing::debug!("[{}] Ignoring text: {}", message.chat_id, text.chars().take(50).collect::<String>());
                Ok(Dispatched::Ignored)
            }
            Content::Empty => Ok(Dispatched::Ignored),
        }
    }

    async fn reply(&self, chat_id: i64, reply: &Reply) {
        if let Err(e) = self.bot.send_reply(chat_id, reply).await {
            tracing::error!("Failed to send reply to {}: {}", chat_id, e);
        }
    }
}
