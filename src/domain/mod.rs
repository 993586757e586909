//! Domain layer - Core business logic with no external dependencies
//! 
//! This layer contains:
//! - Entities: Core business objects (User, Message, Command, Weather)
//! - Traits: Abstractions for infrastructure (Bot, UserStore, WeatherProvider)

pub mod entities;
pub mod traits;
