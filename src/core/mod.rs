pub mod config;
pub mod dedup;
pub mod models;
pub mod pending;
pub mod state;
pub mod traits;
