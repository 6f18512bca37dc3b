use std::fmt;
use std::str::FromStr;

use super::User;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Returned when a word is neither `Join` nor `Leave`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown action: {0}")]
pub struct UnknownAction(pub String);

/// Membership action requested by a user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Join,
    Leave,
}

impl Action {
    /// Past-tense verb used in roster updates
    pub fn verb(self) -> &'static str {
        match self {
            Action::Join => "joined",
            Action::Leave => "left",
        }
    }
}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Join" => Ok(Action::Join),
            "Leave" => Ok(Action::Leave),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Join => f.write_str("Join"),
            Action::Leave => f.write_str("Leave"),
        }
    }
}

/// Message content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Command { name: String, args: Vec<String> },
    /// `Join <service>` / `Leave <service>`; the service token is validated later
    Membership { action: Action, service: String },
    Empty,
}

/// Represents an incoming message
#[derive(Debug, Clone)]
pub struct Message {
    pub id: String,
    pub chat_id: i64,
    pub sender: Option<User>,
    pub content: Content,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(chat_id: i64, content: Content) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            chat_id,
            sender: None,
            content,
            timestamp: Utc::now(),
        }
    }

    pub fn from_text(chat_id: i64, text: impl Into<String>) -> Self {
        Self::new(chat_id, Content::Text(text.into()))
    }

    pub fn from_command(chat_id: i64, name: impl Into<String>, args: Vec<String>) -> Self {
        Self::new(chat_id, Content::Command { name: name.into(), args })
    }

    pub fn with_sender_opt(mut self, user: Option<User>) -> Self {
        if let Some(u) = user {
            self.sender = Some(u);
        }
        self
    }
}
