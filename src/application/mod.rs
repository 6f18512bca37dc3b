//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: Membership coordination and slash commands
//! - Errors: Domain-specific errors
//! - Messaging: Parsing, routing and notification templates

pub mod errors;
pub mod services;
pub mod messaging;
