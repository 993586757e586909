//! Domain entities - Core business objects with no external dependencies

pub mod user;
pub mod message;
pub mod command;
pub mod weather;

pub use user::User;
pub use message::{Message, Content, Sender, Update};
pub use command::{Command, CommandInfo};
pub use weather::{Coordinates, Weather};
