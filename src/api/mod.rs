//! HTTP handlers and request routing

pub mod event_handler;
pub mod handler;
pub mod helpers;
pub mod interactive_handler;
pub mod parsing;

pub use handler::build_router;
