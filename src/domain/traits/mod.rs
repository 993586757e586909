//! Domain traits - Abstractions for infrastructure implementations

pub mod bot;
pub mod store;
pub mod weather;

pub use bot::{Bot, BotInfo};
pub use store::UserStore;
pub use weather::WeatherProvider;
