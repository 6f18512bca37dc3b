//! Domain entities - Core business objects with no external dependencies

pub mod user;
pub mod member;
pub mod service;
pub mod message;
pub mod command;

pub use user::User;
pub use member::Member;
pub use service::{Service, UnknownService};
pub use message::{Action, Content, Message, UnknownAction};
pub use command::{Command, CommandRegistry, Keyboard, Reply};
