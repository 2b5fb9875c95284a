//! # punk-core
//!
//! Core types for the chat client: [`Role`], [`Message`], and tracing
//! initialization. Transport-agnostic; used by punk-llm, punk-session,
//! punk-accounting, and the CLI.

pub mod logger;
pub mod types;

pub use logger::init_tracing;
pub use types::{Message, Role};
