//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Services: The update polling loop
//! - Errors: Domain-specific errors
//! - Messaging: Message parsing and command dispatching

pub mod errors;
pub mod services;
pub mod messaging;
