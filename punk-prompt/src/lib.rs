//! # punk-prompt
//!
//! Reusable prompts and template resolution.
//!
//! A [`Prompt`] is a named piece of text the user can inject as the system
//! prompt or as message input. Prompts flagged as templates contain the
//! [`PLACEHOLDER`] marker and are never sent verbatim — they are resolved
//! against the user's typed input first with [`resolve`].
//!
//! ## Usage
//!
//! Used by `punk-session` (template activation and submit flow), `punk-store`
//! (persisted prompt list and system prompt), and the CLI.

pub mod library;
pub mod template;

pub use library::PromptLibrary;
pub use template::{resolve, resolve_preview, PLACEHOLDER, PREVIEW_INPUT};

use serde::{Deserialize, Serialize};

/// Id of the distinguished system prompt. It always exists and is only ever
/// edited or replaced, never deleted.
pub const SYSTEM_PROMPT_ID: &str = "system";

/// Display name of the system prompt entry.
pub const SYSTEM_PROMPT_NAME: &str = "System Prompt";

/// Default system instruction when the user has not set one.
pub const DEFAULT_SYSTEM_MESSAGE: &str = "You are a helpful assistant.";

/// Preset system prompts offered out of the box: (name, content).
pub const PRESET_SYSTEM_PROMPTS: &[(&str, &str)] = &[
    ("Helpful Assistant", "You are a helpful assistant."),
    (
        "Code Explainer",
        "You are an expert programmer. Explain the following code clearly and concisely. Provide examples where helpful.",
    ),
    (
        "Sarcastic Bot",
        "You are a witty and sarcastic chatbot. Respond to user queries with a touch of humor and irony, but still try to be helpful in your own unique way.",
    ),
    (
        "ELI5 Explainer",
        "Explain complex topics like I'm 5 years old, using simple language and analogies.",
    ),
    (
        "Creative Storyteller",
        "You are a master storyteller. Weave engaging narratives based on user prompts.",
    ),
];

/// A reusable piece of text with a cached token estimate.
///
/// Invariant: `tokens == estimate_tokens(content)` at all times after any
/// edit — every constructor and update path recomputes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub name: String,
    pub content: String,
    pub tokens: u32,
    /// When true, `content` contains the placeholder and is always resolved
    /// against user input before being sent.
    #[serde(rename = "isTemplate", default)]
    pub is_template: bool,
}

impl Prompt {
    /// Creates a prompt, trimming name and content and estimating tokens.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
        is_template: bool,
    ) -> Self {
        let content = content.into().trim().to_string();
        Self {
            id: id.into(),
            name: name.into().trim().to_string(),
            tokens: punk_tokenizer::estimate_tokens(&content),
            content,
            is_template,
        }
    }

    /// The default system prompt.
    pub fn default_system() -> Self {
        Self::new(
            SYSTEM_PROMPT_ID,
            SYSTEM_PROMPT_NAME,
            DEFAULT_SYSTEM_MESSAGE,
            false,
        )
    }

    /// Replaces the content, re-estimating the cached token count.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into().trim().to_string();
        self.tokens = punk_tokenizer::estimate_tokens(&self.content);
    }

    /// True for the distinguished system prompt.
    pub fn is_system(&self) -> bool {
        self.id == SYSTEM_PROMPT_ID
    }
}

impl Default for Prompt {
    fn default() -> Self {
        Self::default_system()
    }
}
