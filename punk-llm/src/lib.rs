//! # punk-llm
//!
//! Chat completion clients for the two supported provider families:
//! OpenAI-style `chat/completions` and Google-style `generateContent`.
//!
//! [`ChatClient`] speaks the raw wire shapes over reqwest; the
//! [`CompletionApi`] trait is the seam the session uses so tests can inject
//! a mock client. [`list_models`] fetches the provider's model catalogue for
//! display.
//!
//! ## External interactions
//!
//! - **LLM APIs**: HTTPS requests to the configured (or stock) base URLs;
//!   subject to each provider's auth, quota, and rate limits.
//! - **Token accounting**: when a response carries no usage figure the
//!   content is estimated with `punk-tokenizer`.

pub mod client;
pub mod models;
pub mod provider;

pub use client::{ChatClient, Completion, CompletionApi};
pub use models::{list_models, ModelListItem};
pub use provider::{Provider, ProviderSettings};
