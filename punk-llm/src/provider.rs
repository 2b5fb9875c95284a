//! Provider identity and per-provider connection settings.

use serde::{Deserialize, Serialize};

/// Stock OpenAI API base URL.
pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
/// Stock Google Generative Language API base URL.
pub const GOOGLE_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// The remote LLM vendor family, which determines request/response shape and
/// base endpoint. Two supported; `google` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OpenAi,
    #[default]
    Google,
}

impl Provider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Google => "google",
        }
    }

    /// Default model for the provider.
    pub fn default_model(&self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-4o",
            Provider::Google => "gemini-2.0-flash",
        }
    }

    /// Stock API base URL for the provider.
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Provider::OpenAi => OPENAI_API_BASE,
            Provider::Google => GOOGLE_API_BASE,
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Provider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "google" => Ok(Provider::Google),
            other => anyhow::bail!("Unsupported provider: {other} (expected openai or google)"),
        }
    }
}

/// Connection settings for one provider: API key, model, base URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSettings {
    #[serde(default)]
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl ProviderSettings {
    /// Settings with the provider's stock model and base URL and no API key.
    pub fn defaults_for(provider: Provider) -> Self {
        Self {
            api_key: String::new(),
            model: provider.default_model().to_string(),
            base_url: provider.default_base_url().to_string(),
        }
    }

    /// A provider is configured once it has a non-empty API key.
    pub fn configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    /// **Test: Provider round-trips through its string form; google is default.**
    #[test]
    fn provider_string_forms() {
        assert_eq!(Provider::from_str("openai").unwrap(), Provider::OpenAi);
        assert_eq!(Provider::from_str("GOOGLE").unwrap(), Provider::Google);
        assert!(Provider::from_str("anthropic").is_err());
        assert_eq!(Provider::default(), Provider::Google);
    }

    /// **Test: Per-provider defaults carry the stock model and base URL.**
    #[test]
    fn provider_defaults() {
        let openai = ProviderSettings::defaults_for(Provider::OpenAi);
        assert_eq!(openai.model, "gpt-4o");
        assert_eq!(openai.base_url, OPENAI_API_BASE);
        assert!(!openai.configured());

        let google = ProviderSettings::defaults_for(Provider::Google);
        assert_eq!(google.model, "gemini-2.0-flash");
        assert_eq!(google.base_url, GOOGLE_API_BASE);
    }

    /// **Test: A blank API key does not count as configured.**
    #[test]
    fn blank_key_not_configured() {
        let mut settings = ProviderSettings::defaults_for(Provider::Google);
        settings.api_key = "   ".to_string();
        assert!(!settings.configured());
        settings.api_key = "key".to_string();
        assert!(settings.configured());
    }
}
