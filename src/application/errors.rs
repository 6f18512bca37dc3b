//! Application layer errors

use thiserror::Error;

use crate::domain::entities::Service;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Delivery error: {0}")]
    Delivery(String),

    #[error("Roster error: {0}")]
    Roster(#[from] RosterError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Structural roster errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RosterError {
    #[error("{member} is not in the {service} roster")]
    MemberAbsent { service: Service, member: String },

    #[error("{service} roster is full ({capacity} members)")]
    Full { service: Service, capacity: usize },
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Command not found: {0}")]
    NotFound(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// A notification that could not be delivered to one recipient
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to deliver to chat {chat_id}: {reason}")]
pub struct DeliveryFailure {
    pub chat_id: i64,
    pub reason: String,
}
