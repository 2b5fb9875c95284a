//! The persisted state document.

use punk_llm::{Provider, ProviderSettings};
use punk_prompt::Prompt;
use serde::{Deserialize, Serialize};

fn default_theme() -> String {
    "dark".to_string()
}

/// Everything the client persists between runs. Field names mirror the
/// storage entries of the original browser client (`llm_provider`,
/// `llm_system_prompt`, `llm_prompts`); the per-provider key/model/base-url
/// strings are grouped into one object per provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    #[serde(rename = "llm_provider", default)]
    pub provider: Provider,
    #[serde(default = "openai_defaults")]
    pub openai: ProviderSettings,
    #[serde(default = "google_defaults")]
    pub google: ProviderSettings,
    #[serde(rename = "llm_system_prompt", default)]
    pub system_prompt: Prompt,
    #[serde(rename = "llm_prompts", default)]
    pub prompts: Vec<Prompt>,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn openai_defaults() -> ProviderSettings {
    ProviderSettings::defaults_for(Provider::OpenAi)
}

fn google_defaults() -> ProviderSettings {
    ProviderSettings::defaults_for(Provider::Google)
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            openai: openai_defaults(),
            google: google_defaults(),
            system_prompt: Prompt::default_system(),
            prompts: Vec::new(),
            theme: default_theme(),
        }
    }
}

impl AppState {
    /// Settings of the active provider.
    pub fn active_settings(&self) -> &ProviderSettings {
        self.settings_for(self.provider)
    }

    pub fn settings_for(&self, provider: Provider) -> &ProviderSettings {
        match provider {
            Provider::OpenAi => &self.openai,
            Provider::Google => &self.google,
        }
    }

    pub fn settings_for_mut(&mut self, provider: Provider) -> &mut ProviderSettings {
        match provider {
            Provider::OpenAi => &mut self.openai,
            Provider::Google => &mut self.google,
        }
    }
}
