//! Tests for the plain-text transcript export.
//! External interactions: none (pure formatting tests).

mod common;

use common::MockClient;
use punk_accounting::TokenRates;
use punk_core::Message;
use punk_prompt::Prompt;
use punk_session::{export_transcript, ChatSession, ExportError, ExportOptions};

/// **Test: Exporting an empty transcript fails and produces no content.**
#[test]
fn empty_transcript_fails() {
    let result = export_transcript(
        &[],
        "conversation",
        &ExportOptions {
            model_name: "gemini-2.0-flash",
            template: None,
            user_input: "No input",
            cost: "$0.000000",
        },
    );
    assert_eq!(result.unwrap_err(), ExportError::EmptyTranscript);
}

/// **Test: The metadata block carries model, "Prompt Template: None", the
/// user input, and the cost with the original's trailing-space layout.**
#[test]
fn metadata_without_template() {
    let messages = vec![Message::user("hi", Some(2))];
    let doc = export_transcript(
        &messages,
        "conversation",
        &ExportOptions {
            model_name: "gpt-4o",
            template: None,
            user_input: "hi",
            cost: "$0.000123",
        },
    )
    .unwrap();

    assert_eq!(doc.file_name, "conversation.txt");
    assert!(doc.content.starts_with(
        "--- Metadata ---\nModel Name: gpt-4o\nPrompt Template: None\n\nUser Input: hi  \nCost: $0.000123  \n\n"
    ));
    assert!(doc.content.contains("--- Conversation ---\n"));
}

/// **Test: An active template is recorded with its name and content.**
#[test]
fn metadata_with_template() {
    let template = Prompt::new("1", "Pirate", "Explain like a pirate: {query}", true);
    let messages = vec![Message::user("tides", Some(2))];
    let doc = export_transcript(
        &messages,
        "c",
        &ExportOptions {
            model_name: "gemini-2.0-flash",
            template: Some(&template),
            user_input: "tides",
            cost: "$0.000001",
        },
    )
    .unwrap();

    assert!(doc
        .content
        .contains("Prompt Template:  \nPirate\nExplain like a pirate: {query}\n"));
}

/// **Test: Each message renders as "[timestamp] ROLE:" plus content; turns
/// are separated by the `---` marker.**
#[test]
fn conversation_layout() {
    let messages = vec![
        Message::user("question", Some(2)),
        Message::assistant("answer", Some(2)),
    ];
    let doc = export_transcript(
        &messages,
        "c",
        &ExportOptions {
            model_name: "m",
            template: None,
            user_input: "question",
            cost: "$0.000000",
        },
    )
    .unwrap();

    assert!(doc.content.contains("] USER:\nquestion\n"));
    assert!(doc.content.contains("] ASSISTANT:\nanswer\n"));
    assert!(doc.content.contains("\n---\n\n"));
}

/// **Test: Session export fills metadata from session state — last input,
/// formatted total cost — and fails on an empty transcript.**
#[tokio::test]
async fn session_export_uses_session_state() {
    let rates = TokenRates::default();
    let mut session = ChatSession::default();
    assert_eq!(
        session.export("empty", "gemini-2.0-flash", &rates).unwrap_err(),
        ExportError::EmptyTranscript
    );

    let client = MockClient::replying("the reply", 4);
    session.send("the question", &client).await.unwrap();

    let doc = session.export("saved", "gemini-2.0-flash", &rates).unwrap();
    assert_eq!(doc.file_name, "saved.txt");
    assert!(doc.content.contains("User Input: the question  \n"));
    assert!(doc.content.contains("Cost: $0.0000"));
    assert!(doc.content.contains("the reply"));
}
