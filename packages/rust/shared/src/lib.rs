//! Shared types, error model, and configuration for CodeTutor.
//!
//! This crate is the foundation depended on by all other CodeTutor crates.
//! It provides:
//! - [`TutorError`] — the unified error type
//! - Domain types ([`TopicDef`], [`TopicFile`], [`ConversationTurn`])
//! - Configuration ([`AppConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, EngineConfig, TokenizerConfig, TopicsConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from,
};
pub use error::{Result, TutorError};
pub use types::{ConversationTurn, TopicDef, TopicFile};
