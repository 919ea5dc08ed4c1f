//! AI Translator & Critic
//!
//! Translates user text with a remote LLM, asks a second model to critique the
//! translation, and serves both through a small HTML front end.

#![forbid(unsafe_code)]

pub mod cli;
pub mod core;
pub mod server;

// Re-export key types for convenience
pub use core::{
    client::{LiveClient, LlmBackend, LlmClient, MockClient},
    config::AppConfig,
    errors::{ErrorKind, LlmError},
    models::{BackendMode, CritiqueRequest, Language, LanguageSelection, LlmResult, TranslationRequest},
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
