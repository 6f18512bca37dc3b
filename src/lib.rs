//! Waitlist bot for shared subscription "families".
//!
//! Users join or leave a per-service roster; when a roster reaches the
//! service's capacity every member is told the family is formed and the
//! roster starts over.

pub mod domain;
pub mod application;
pub mod infrastructure;
