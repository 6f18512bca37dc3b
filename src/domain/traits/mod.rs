//! Domain traits - Abstractions for infrastructure implementations

pub mod bot;
pub mod notifier;
pub mod store;

pub use bot::{Bot, BotInfo};
pub use notifier::Notifier;
pub use store::RosterStore;
