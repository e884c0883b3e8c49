//! All AI/LLM functionality

pub mod client;
pub mod drafts;
pub mod prompt_builder;

// Re-export main types for convenience
pub use client::LlmClient;
pub use drafts::generate_drafts;
