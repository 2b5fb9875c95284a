//! Plain-text transcript export.
//!
//! The output layout (including the trailing double spaces in the metadata
//! block and the `---` separators) matches the documents the original client
//! produced, so existing saved transcripts and new ones diff cleanly.

use chrono::Local;
use punk_core::Message;
use punk_prompt::Prompt;
use thiserror::Error;

/// Export failure reasons. No content is produced on failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExportError {
    #[error("No messages to save")]
    EmptyTranscript,
}

/// Metadata recorded at the top of the exported document.
#[derive(Debug, Clone)]
pub struct ExportOptions<'a> {
    pub model_name: &'a str,
    /// The staged template, when one is active at export time.
    pub template: Option<&'a Prompt>,
    /// The raw input of the most recent submission.
    pub user_input: &'a str,
    /// Pre-formatted total cost string.
    pub cost: &'a str,
}

/// A produced export: the suggested file name and the full document text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub file_name: String,
    pub content: String,
}

/// Renders the transcript as a plain-text document.
///
/// A `--- Metadata ---` block (model, template or "None", user input, cost)
/// is followed by a `--- Conversation ---` block listing each message as
/// `[local timestamp] ROLE:` and its content, separated by `---` markers.
/// An empty transcript is a failure and produces nothing.
pub fn export_transcript(
    messages: &[Message],
    file_name: &str,
    options: &ExportOptions<'_>,
) -> Result<ExportDocument, ExportError> {
    if messages.is_empty() {
        return Err(ExportError::EmptyTranscript);
    }

    let template_block = match options.template {
        Some(template) => format!("Prompt Template:  \n{}\n{}", template.name, template.content),
        None => "Prompt Template: None".to_string(),
    };
    let metadata = format!(
        "--- Metadata ---\nModel Name: {}\n{}\n\nUser Input: {}  \nCost: {}  \n\n",
        options.model_name, template_block, options.user_input, options.cost
    );

    let conversation = messages
        .iter()
        .map(|msg| {
            let time = msg.timestamp.with_timezone(&Local);
            format!(
                "[{}] {}:\n{}\n",
                time.format("%Y-%m-%d %H:%M:%S"),
                msg.role.as_str().to_uppercase(),
                msg.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n---\n\n");

    Ok(ExportDocument {
        file_name: format!("{file_name}.txt"),
        content: format!("{metadata}--- Conversation ---\n{conversation}"),
    })
}
