//! The interactive chat loop.
//!
//! Reads lines from stdin; lines starting with `/` are commands, everything
//! else is submitted to the active provider. Token usage and cost are shown
//! after each exchange. Prompt and system-prompt changes persist through the
//! store on mutation and on exit.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use punk_accounting::{format_cost, TokenRates};
use punk_llm::ChatClient;
use punk_prompt::{PromptLibrary, PRESET_SYSTEM_PROMPTS};
use punk_session::{ChatSession, PromptSelection, SendError};
use punk_store::{AppState, JsonFileStore, Store};
use punk_tokenizer::estimate_tokens;
use tracing::info;

const HELP: &str = "\
Commands:
  /prompts                 list saved prompts and system presets
  /new <name> = <content>  save a prompt
  /template <name> = <c>   save a template (use {query} for the input slot)
  /delete <name>           delete a saved prompt
  /use <name>              load a prompt (templates stay active until sent)
  /system <preset|text>    replace the system prompt
  /clear-template          deactivate the staged template
  /clear                   clear the conversation
  /save <name>             export the transcript to <name>.txt
  /usage                   show token usage and cost
  /quit                    exit";

pub async fn run(store: &JsonFileStore) -> Result<()> {
    let mut state = store.load();
    let provider = state.provider;
    let mut settings = state.active_settings().clone();
    settings.api_key = crate::effective_api_key(&state, provider);

    let rates = TokenRates::for_model(&settings.model);
    let client = ChatClient::new(provider, settings.clone());
    let library = PromptLibrary::new(state.system_prompt.clone(), state.prompts.clone());
    let mut session = ChatSession::new(library);

    println!("PromptPunk — {} via {}", settings.model, provider);
    if settings.configured() {
        println!("API configured. Type a message, or /help for commands.");
    } else {
        println!("No API key set; configure one with `punk config api-key <key>`.");
    }

    // A prompt loaded with /use waits here until the user presses Enter to
    // send it or types something else instead.
    let mut staged_input: Option<String> = None;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if session.active_template().is_some() {
            print!("(template) > ");
        } else {
            print!("> ");
        }
        io::stdout().flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            if let Some(staged) = staged_input.take() {
                submit(&mut session, &client, &rates, &staged).await;
            }
            continue;
        }

        if let Some(command) = trimmed.strip_prefix('/') {
            if !handle_command(command, &mut session, &rates, &settings.model, &mut staged_input)? {
                break;
            }
            sync_state(store, &mut state, &session)?;
            continue;
        }

        staged_input = None;
        if let Some(preview) = session.preview(trimmed) {
            println!("[sending] {preview}");
        }
        submit(&mut session, &client, &rates, trimmed).await;
    }

    sync_state(store, &mut state, &session)?;
    info!("chat session ended");
    Ok(())
}

async fn submit(session: &mut ChatSession, client: &ChatClient, rates: &TokenRates, input: &str) {
    println!("({} tokens)", estimate_tokens(input));
    match session.send(input, client).await {
        Ok(reply) => {
            let tokens = reply.tokens.unwrap_or(0);
            println!("\n{}\n({tokens} tokens)\n", reply.content);
        }
        Err(SendError::Pending) => println!("A request is already in flight."),
        Err(SendError::EmptyInput) => {}
    }
    print_usage(session, rates);
}

fn print_usage(session: &ChatSession, rates: &TokenRates) {
    let stats = session.usage(rates);
    println!(
        "Input: {} | Output: {} | Total: {} | Cost: {}",
        stats.input_tokens,
        stats.output_tokens,
        stats.total_tokens(),
        format_cost(stats.total_cost())
    );
}

/// Runs one slash command. Returns false when the loop should exit.
fn handle_command(
    command: &str,
    session: &mut ChatSession,
    rates: &TokenRates,
    model: &str,
    staged_input: &mut Option<String>,
) -> Result<bool> {
    let (name, arg) = match command.split_once(' ') {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match name {
        "help" => println!("{HELP}"),
        "quit" | "exit" => return Ok(false),
        "clear" => {
            session.clear();
            *staged_input = None;
            println!("Conversation cleared.");
        }
        "clear-template" => {
            session.clear_template();
            println!("Template cleared.");
        }
        "usage" => print_usage(session, rates),
        "prompts" => {
            let library = session.library();
            println!("System prompt ({} tokens):", library.system().tokens);
            println!("  {}", library.system().content);
            if library.prompts().is_empty() {
                println!("No saved prompts.");
            } else {
                println!("Saved prompts:");
                for p in library.prompts() {
                    let kind = if p.is_template { "template" } else { "prompt" };
                    println!("  {} [{kind}, {} tokens]", p.name, p.tokens);
                }
            }
            println!("System presets:");
            for (preset, _) in PRESET_SYSTEM_PROMPTS {
                println!("  {preset}");
            }
        }
        "new" | "template" => match arg.split_once('=') {
            Some((prompt_name, content)) => {
                let is_template = name == "template";
                match session
                    .library_mut()
                    .create(prompt_name.trim(), content.trim(), is_template)
                {
                    Ok(p) => println!("Saved {} ({} tokens).", p.name, p.tokens),
                    Err(e) => println!("{e}"),
                }
            }
            None => println!("Usage: /{name} <name> = <content>"),
        },
        "delete" => {
            let Some(id) = session.library().find_by_name(arg).map(|p| p.id.clone()) else {
                println!("No prompt named {arg:?}.");
                return Ok(true);
            };
            match session.library_mut().delete(&id) {
                Ok(()) => println!("Deleted."),
                Err(e) => println!("{e}"),
            }
        }
        "use" => {
            let Some(prompt) = session.library().find_by_name(arg).cloned() else {
                println!("No prompt named {arg:?}.");
                return Ok(true);
            };
            let typed = staged_input.take().unwrap_or_default();
            match session.select_prompt(&prompt, &typed) {
                PromptSelection::TemplateStaged(preview) => {
                    println!("Template {:?} active. Preview:\n{preview}", prompt.name);
                    println!("Type your input and it will be processed with this template.");
                }
                PromptSelection::InputReplaced(content) => {
                    println!("Input loaded (press Enter to send):\n{content}");
                    *staged_input = Some(content);
                }
                PromptSelection::SystemUpdated => {}
            }
        }
        "system" => {
            if arg.is_empty() {
                println!("Usage: /system <preset name or text>");
                return Ok(true);
            }
            let is_preset = PRESET_SYSTEM_PROMPTS
                .iter()
                .any(|(preset, _)| preset.eq_ignore_ascii_case(arg));
            let result = if is_preset {
                session.library_mut().apply_preset(arg)
            } else {
                session.library_mut().set_system_content(arg)
            };
            match result {
                Ok(system) => println!(
                    "System prompt set ({} tokens): {}",
                    system.tokens, system.content
                ),
                Err(e) => println!("{e}"),
            }
        }
        "save" => {
            let file_name = if arg.is_empty() { "conversation" } else { arg };
            match session.export(file_name, model, rates) {
                Ok(doc) => {
                    std::fs::write(&doc.file_name, &doc.content)
                        .with_context(|| format!("Failed to write {}", doc.file_name))?;
                    println!("Saved {}.", doc.file_name);
                }
                Err(e) => println!("Could not save: {e}"),
            }
        }
        other => println!("Unknown command /{other}; try /help."),
    }
    Ok(true)
}

/// Writes library changes back into the persisted state.
fn sync_state(store: &JsonFileStore, state: &mut AppState, session: &ChatSession) -> Result<()> {
    state.system_prompt = session.library().system().clone();
    state.prompts = session.library().prompts().to_vec();
    store.save(state).context("Failed to save state")?;
    Ok(())
}
