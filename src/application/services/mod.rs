//! Application services - Business logic orchestration

pub mod event_loop;

pub use event_loop::EventLoop;
