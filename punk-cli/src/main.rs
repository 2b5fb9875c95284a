//! punk CLI: interactive chat, model listing, and configuration. State is a
//! JSON file; API keys can also come from env (.env supported).

mod chat;

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use punk_llm::{list_models, Provider};
use punk_store::{AppState, JsonFileStore, Store};

#[derive(Parser)]
#[command(name = "punk")]
#[command(about = "PromptPunk chat CLI: chat, models, config", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the persisted state file.
    #[arg(long, default_value = "punk-chat.json")]
    state: PathBuf,

    /// Log file path (console stays clean for the conversation).
    #[arg(long, default_value = "punk-chat.log")]
    log_file: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat session (type /help inside for commands).
    Chat,
    /// List models available from a provider (active provider by default).
    Models {
        #[arg(short, long)]
        provider: Option<String>,
    },
    /// Show or change the persisted configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the active provider and per-provider settings.
    Show,
    /// Set the active provider (openai or google).
    Provider { name: String },
    /// Set the API key for the active provider.
    ApiKey { key: String },
    /// Set the model for the active provider.
    Model { name: String },
    /// Set the chat base URL for the active provider.
    BaseUrl { url: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    punk_core::init_tracing(&cli.log_file)
        .with_context(|| format!("Failed to open log file {}", cli.log_file))?;

    let store = JsonFileStore::new(&cli.state);

    match cli.command {
        Commands::Chat => chat::run(&store).await,
        Commands::Models { provider } => handle_models(&store, provider).await,
        Commands::Config { action } => handle_config(&store, action),
    }
}

/// Resolves the API key for a provider: persisted key first, then the
/// provider's environment variable.
pub(crate) fn effective_api_key(state: &AppState, provider: Provider) -> String {
    let persisted = &state.settings_for(provider).api_key;
    if !persisted.trim().is_empty() {
        return persisted.clone();
    }
    let var = match provider {
        Provider::OpenAi => "OPENAI_API_KEY",
        Provider::Google => "GOOGLE_API_KEY",
    };
    std::env::var(var).unwrap_or_default()
}

/// Fetches and prints the model catalogue. A fetch failure is reported
/// inline and becomes the exit code; it never touches any transcript.
async fn handle_models(store: &JsonFileStore, provider: Option<String>) -> Result<()> {
    let state = store.load();
    let provider = match provider {
        Some(name) => Provider::from_str(&name)?,
        None => state.provider,
    };
    let key = effective_api_key(&state, provider);

    match list_models(provider, &key).await {
        Ok(models) => {
            println!("Models for {provider}:");
            for model in models {
                if model.id == model.name {
                    println!("  {}", model.id);
                } else {
                    println!("  {}  ({})", model.name, model.id);
                }
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("Could not fetch models: {e}");
            std::process::exit(1);
        }
    }
}

fn handle_config(store: &JsonFileStore, action: ConfigAction) -> Result<()> {
    let mut state = store.load();
    match action {
        ConfigAction::Show => {
            println!("Active provider: {}", state.provider);
            for provider in [Provider::OpenAi, Provider::Google] {
                let settings = state.settings_for(provider);
                println!(
                    "  {provider}: model={} base_url={} api_key={}",
                    settings.model,
                    settings.base_url,
                    if settings.configured() { "SET" } else { "NOT SET" }
                );
            }
            println!("Theme: {}", state.theme);
            return Ok(());
        }
        ConfigAction::Provider { name } => {
            state.provider = Provider::from_str(&name)?;
            println!("Active provider set to {}", state.provider);
        }
        ConfigAction::ApiKey { key } => {
            let provider = state.provider;
            state.settings_for_mut(provider).api_key = key;
            println!("API key set for {provider}");
        }
        ConfigAction::Model { name } => {
            let provider = state.provider;
            state.settings_for_mut(provider).model = name;
            println!("Model set for {provider}");
        }
        ConfigAction::BaseUrl { url } => {
            let provider = state.provider;
            state.settings_for_mut(provider).base_url = url;
            println!("Base URL set for {provider}");
        }
    }
    store.save(&state).context("Failed to save state")?;
    Ok(())
}
