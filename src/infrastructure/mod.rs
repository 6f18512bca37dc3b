//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Storage: In-memory roster store
//! - Adapters: Platform integrations (Telegram, console)

pub mod config;
pub mod storage;
pub mod adapters;
