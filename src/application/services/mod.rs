//! Application services - Business logic orchestration

pub mod command_service;
pub mod membership_service;

pub use command_service::CommandService;
pub use membership_service::{MembershipCoordinator, Outcome, RequestReport};
