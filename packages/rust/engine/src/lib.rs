//! Query matching and response composition for CodeTutor.
//!
//! This crate ties the topic table, tokenizer, and conversation history into
//! the one programmatic entry point: [`ResponseEngine::generate_response`].

pub mod history;
pub mod respond;
pub mod store;

pub use history::History;
pub use respond::ResponseEngine;
pub use store::{KnowledgeStore, Topic};
