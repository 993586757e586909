//! Message handling - Parsing and dispatching of inbound commands

pub mod dispatcher;
pub mod parser;

pub use dispatcher::Dispatcher;
pub use parser::MessageParser;
