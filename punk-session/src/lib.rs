//! # punk-session
//!
//! The chat session state machine. [`ChatSession`] owns all mutable chat
//! state — the append-only transcript, the prompt library, the staged
//! template, and the single-in-flight-request flag — and mutates it only in
//! response to discrete actions, so no locking is needed.
//!
//! Template handling follows the client's two-field design: while a template
//! is staged, the transcript records what the user *typed* while the provider
//! receives the template *resolved* against that input. The divergence is
//! deliberate; do not unify the two.

pub mod export;

pub use export::{export_transcript, ExportDocument, ExportError, ExportOptions};

use punk_accounting::{format_cost, TokenRates, UsageStats};
use punk_core::Message;
use punk_llm::CompletionApi;
use punk_prompt::{resolve, resolve_preview, Prompt, PromptLibrary};
use punk_tokenizer::estimate_tokens;
use tracing::{info, warn};

/// Fixed assistant message appended when the provider cannot be reached,
/// whether because no API key is configured or because the request failed.
pub const CONFIG_REQUIRED_MESSAGE: &str = "Configuration Required: Please enter your API key in the configuration settings to enable the LLM model.";

/// Result of selecting a prompt: what the input box should now show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSelection {
    /// The system prompt was replaced; the input box is untouched.
    SystemUpdated,
    /// A plain prompt overwrote the input box (any staged template cleared).
    InputReplaced(String),
    /// A template was staged; the input box shows the resolved preview.
    TemplateStaged(String),
}

/// Errors from submitting input. Provider failures are not errors here —
/// they surface as an assistant message in the transcript.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SendError {
    #[error("A request is already in flight")]
    Pending,
    #[error("Nothing to send")]
    EmptyInput,
}

/// One user's conversation: transcript, prompts, template state.
#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<Message>,
    library: PromptLibrary,
    active_template: Option<Prompt>,
    last_user_input: String,
    pending: bool,
}

impl ChatSession {
    pub fn new(library: PromptLibrary) -> Self {
        Self {
            library,
            ..Self::default()
        }
    }

    /// The transcript so far. Append-only; cleared only as a whole.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn library(&self) -> &PromptLibrary {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut PromptLibrary {
        &mut self.library
    }

    pub fn active_template(&self) -> Option<&Prompt> {
        self.active_template.as_ref()
    }

    /// True while a request is in flight; further submissions are rejected.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// The raw input of the most recent submission (export metadata).
    pub fn last_user_input(&self) -> &str {
        &self.last_user_input
    }

    /// Applies a prompt selection.
    ///
    /// The system prompt id replaces the system prompt content. A template
    /// prompt is staged and the returned preview resolves it against what the
    /// user has typed so far (or the preview placeholder when nothing is
    /// typed). Any other prompt overwrites the input box and clears a staged
    /// template.
    pub fn select_prompt(&mut self, prompt: &Prompt, typed: &str) -> PromptSelection {
        if prompt.is_system() {
            // Blank content cannot come from the library (rejected at
            // creation); a hand-built blank prompt is ignored.
            if let Err(e) = self.library.set_system_content(&prompt.content) {
                warn!(error = %e, "system prompt not replaced");
            } else {
                info!(tokens = self.library.system().tokens, "system prompt replaced");
            }
            self.active_template = None;
            return PromptSelection::SystemUpdated;
        }
        if prompt.is_template {
            self.active_template = Some(prompt.clone());
            info!(template = %prompt.name, "template staged");
            return PromptSelection::TemplateStaged(resolve_preview(&prompt.content, typed));
        }
        self.active_template = None;
        PromptSelection::InputReplaced(prompt.content.clone())
    }

    /// Re-resolves the staged template against the latest typed input, for
    /// preview panels. `None` when no template is staged.
    pub fn preview(&self, typed: &str) -> Option<String> {
        self.active_template
            .as_ref()
            .map(|t| resolve_preview(&t.content, typed))
    }

    /// Returns to the idle template state.
    pub fn clear_template(&mut self) {
        self.active_template = None;
    }

    /// Destroys the whole transcript and resets template state.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.active_template = None;
        self.last_user_input.clear();
    }

    /// Submits user input.
    ///
    /// The transcript records the trimmed raw input with its own token
    /// estimate; the provider receives the template resolution of that input
    /// when a template is staged. On provider failure (including a missing
    /// API key) the fixed configuration message is appended instead of a
    /// reply. The staged template deactivates after every attempt, and the
    /// pending flag always clears. Returns the appended assistant message.
    pub async fn send(
        &mut self,
        raw_input: &str,
        client: &dyn CompletionApi,
    ) -> Result<&Message, SendError> {
        if self.pending {
            return Err(SendError::Pending);
        }
        let trimmed = raw_input.trim();
        if trimmed.is_empty() {
            return Err(SendError::EmptyInput);
        }
        self.pending = true;
        self.last_user_input = trimmed.to_string();

        let processed = match &self.active_template {
            Some(template) => resolve(&template.content, trimmed),
            None => trimmed.to_string(),
        };

        // What the user typed goes into the transcript; what the template
        // produced goes over the wire.
        self.messages
            .push(Message::user(trimmed, Some(estimate_tokens(trimmed))));

        let history = self.wire_history(&processed);
        info!(history_len = history.len(), "submitting user input");

        let reply = match client.complete(&history).await {
            Ok(completion) => Message::assistant(completion.content, Some(completion.tokens)),
            Err(e) => {
                warn!(error = %e, "completion failed");
                Message::assistant(
                    CONFIG_REQUIRED_MESSAGE,
                    Some(estimate_tokens(CONFIG_REQUIRED_MESSAGE)),
                )
            }
        };
        let idx = self.messages.len();
        self.messages.push(reply);

        self.active_template = None;
        self.pending = false;
        Ok(&self.messages[idx])
    }

    /// Recomputes usage from scratch over the transcript and the current
    /// system prompt.
    pub fn usage(&self, rates: &TokenRates) -> UsageStats {
        UsageStats::compute(&self.messages, rates, self.library.system().tokens)
    }

    /// Exports the transcript as a plain-text document.
    pub fn export(
        &self,
        file_name: &str,
        model_name: &str,
        rates: &TokenRates,
    ) -> Result<ExportDocument, ExportError> {
        let user_input = if self.last_user_input.is_empty() {
            "No input"
        } else {
            &self.last_user_input
        };
        let cost = format_cost(self.usage(rates).total_cost());
        export_transcript(
            &self.messages,
            file_name,
            &ExportOptions {
                model_name,
                template: self.active_template.as_ref(),
                user_input,
                cost: &cost,
            },
        )
    }

    /// System message first, then all prior non-system transcript messages,
    /// then the processed input as the final user turn. The just-appended
    /// display message is excluded — its wire counterpart is `processed`.
    fn wire_history(&self, processed: &str) -> Vec<Message> {
        let mut history = Vec::with_capacity(self.messages.len() + 1);
        history.push(Message::system(
            self.library.system().content.clone(),
            None,
        ));
        let prior = self.messages.len().saturating_sub(1);
        history.extend(
            self.messages[..prior]
                .iter()
                .filter(|m| m.role != punk_core::Role::System)
                .cloned(),
        );
        history.push(Message::user(processed, None));
        history
    }
}
