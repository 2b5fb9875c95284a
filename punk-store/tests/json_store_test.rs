//! Unit tests for `punk_store::JsonFileStore`.
//!
//! Verifies defaulting behavior for missing/malformed files and the
//! save/load round trip. External interactions: temporary files on disk.

use punk_llm::Provider;
use punk_prompt::Prompt;
use punk_store::{AppState, JsonFileStore, Store};

fn store_in(dir: &tempfile::TempDir) -> JsonFileStore {
    JsonFileStore::new(dir.path().join("state.json"))
}

/// **Test: A missing state file loads as the default state, not an error.**
#[test]
fn missing_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let state = store_in(&dir).load();
    assert_eq!(state, AppState::default());
    assert_eq!(state.provider, Provider::Google);
    assert_eq!(state.theme, "dark");
}

/// **Test: Malformed JSON loads as the default state, not an error.**
#[test]
fn malformed_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), "{not json at all").unwrap();
    assert_eq!(store.load(), AppState::default());
}

/// **Test: Save then load round-trips the full state.**
#[test]
fn save_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);

    let mut state = AppState::default();
    state.provider = Provider::OpenAi;
    state.openai.api_key = "sk-test".to_string();
    state.openai.model = "gpt-4o-mini".to_string();
    state.system_prompt.set_content("You are terse.");
    state
        .prompts
        .push(Prompt::new("1700000000000", "Summarize", "Summarize: {query}", true));
    state.theme = "light".to_string();

    store.save(&state).unwrap();
    assert_eq!(store.load(), state);
}

/// **Test: Save creates missing parent directories.**
#[test]
fn save_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().join("nested/deeper/state.json"));
    store.save(&AppState::default()).unwrap();
    assert_eq!(store.load(), AppState::default());
}

/// **Test: The JSON document uses the original entry names.**
#[test]
fn json_uses_original_entry_names() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    store.save(&AppState::default()).unwrap();

    let raw = std::fs::read_to_string(store.path()).unwrap();
    assert!(raw.contains("\"llm_provider\""));
    assert!(raw.contains("\"llm_system_prompt\""));
    assert!(raw.contains("\"llm_prompts\""));
    assert!(raw.contains("\"theme\""));
}

/// **Test: A partial document fills missing entries with defaults.**
#[test]
fn partial_document_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let store = store_in(&dir);
    std::fs::write(store.path(), r#"{"llm_provider": "openai"}"#).unwrap();

    let state = store.load();
    assert_eq!(state.provider, Provider::OpenAi);
    assert_eq!(state.google.model, "gemini-2.0-flash");
    assert_eq!(state.system_prompt, Prompt::default_system());
}
