//! Console adapter for development/testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::application::errors::BotError;
use crate::domain::entities::{Reply, User};
use crate::domain::traits::{Bot, BotInfo, Notifier};

/// Name used for input lines without a `name:` prefix
const DEFAULT_USER: &str = "console";

/// Console bot adapter for local development.
///
/// Each input line may start with `name:` to speak as a different user,
/// so several members can be simulated from one terminal.
pub struct ConsoleAdapter {
    info: BotInfo,
    users: Mutex<HashMap<String, i64>>,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            info: BotInfo {
                id: "console".to_string(),
                name: "families-bot".to_string(),
                username: "console".to_string(),
            },
            users: Mutex::new(HashMap::new()),
        }
    }

    /// Stable id per user name, assigned in order of first appearance
    fn user_id(&self, name: &str) -> Result<i64, BotError> {
        let mut users = self.users.lock()
            .map_err(|_| BotError::Internal("Lock poisoned".to_string()))?;
        let next = users.len() as i64 + 1;
        Ok(*users.entry(name.to_string()).or_insert(next))
    }

    /// Split an input line into chat id, sender and text
    pub fn parse_line(&self, line: &str) -> Result<Option<(i64, User, String)>, BotError> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (name, text) = match line.split_once(':') {
            Some((name, text)) if !name.trim().is_empty() && !name.contains(char::is_whitespace) => {
                (name.trim(), text.trim())
            }
            _ => (DEFAULT_USER, line),
        };
        if text.is_empty() {
            return Ok(None);
        }

        let id = self.user_id(name)?;
        Ok(Some((id, User::new(id).with_username(name), text.to_string())))
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for ConsoleAdapter {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), BotError> {
        println!("[BOT -> {}] {}", chat_id, text);
        Ok(())
    }
}

#[async_trait]
impl Bot for ConsoleAdapter {
    async fn start(&self) -> Result<(), BotError> {
        tracing::info!("Starting console bot (dev mode)");
        Ok(())
    }

    async fn send_reply(&self, chat_id: i64, reply: &Reply) -> Result<(), BotError> {
        println!("[BOT -> {}] {}", chat_id, reply.text);
        if let Some(keyboard) = &reply.keyboard {
            for row in &keyboard.rows {
                println!("  [Buttons] {}", row.join(" | "));
            }
        }
        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_with_user_prefix() {
        let console = ConsoleAdapter::new();
        let (id, user, text) = console.parse_line("alice: Join Netflix").unwrap().unwrap();
        assert_eq!(id, 1);
        assert_eq!(user.display_name(), "alice");
        assert_eq!(text, "Join Netflix");

        let (bob_id, _, _) = console.parse_line("bob: Join Netflix").unwrap().unwrap();
        let (alice_again, _, _) = console.parse_line("alice: Leave Netflix").unwrap().unwrap();
        assert_eq!(bob_id, 2);
        assert_eq!(alice_again, 1);
    }

    #[test]
    fn test_parse_line_defaults_to_console_user() {
        let console = ConsoleAdapter::new();
        let (_, user, text) = console.parse_line("/start").unwrap().unwrap();
        assert_eq!(user.display_name(), DEFAULT_USER);
        assert_eq!(text, "/start");
        assert!(console.parse_line("   ").unwrap().is_none());
        assert!(console.parse_line("alice:").unwrap().is_none());
    }
}
