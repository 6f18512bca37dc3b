//! Message handling - Parsing, routing and outbound texts

pub mod dispatcher;
pub mod parser;
pub mod templates;

pub use dispatcher::MessageDispatcher;
pub use parser::MessageParser;
