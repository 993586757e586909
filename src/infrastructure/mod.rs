//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Database: SQLite user store
//! - Weather: OpenWeather client
//! - Adapters: Platform integrations (Telegram)

pub mod config;
pub mod database;
pub mod weather;
pub mod adapters;
