//! Domain layer - Core business objects with no external dependencies
//! 
//! This layer contains:
//! - Entities: Services, members, users, inbound messages, commands
//! - Traits: Abstractions for infrastructure (Notifier, Bot, RosterStore)

pub mod entities;
pub mod traits;
