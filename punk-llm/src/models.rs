//! Model catalogue listing for the configuration surface.

use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::provider::Provider;

/// One entry in a provider's model list: the id used for API calls and the
/// name shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelListItem {
    pub id: String,
    pub name: String,
}

/// Fetches the available models for a provider.
///
/// Always uses the provider's stock base URL — the catalogue endpoint is not
/// affected by a custom chat base URL. Failures are returned to the caller
/// for inline display; they never touch the transcript.
pub async fn list_models(provider: Provider, api_key: &str) -> Result<Vec<ModelListItem>> {
    if api_key.trim().is_empty() {
        anyhow::bail!("API key is not configured to fetch models");
    }
    info!(provider = %provider, "fetching model list");
    let http = Client::new();
    match provider {
        Provider::OpenAi => list_openai(&http, api_key).await,
        Provider::Google => list_google(&http, api_key).await,
    }
}

async fn list_openai(http: &Client, api_key: &str) -> Result<Vec<ModelListItem>> {
    let url = format!("{}/models", Provider::OpenAi.default_base_url());
    let response = http.get(&url).bearer_auth(api_key).send().await?;
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        anyhow::bail!("Failed to fetch OpenAI models ({}): {}", status, error_text);
    }
    let body: OpenAiModelsResponse = response.json().await?;
    let mut models: Vec<ModelListItem> = body
        .data
        .into_iter()
        .map(|m| ModelListItem {
            name: m.id.clone(),
            id: m.id,
        })
        .collect();
    models.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(models)
}

async fn list_google(http: &Client, api_key: &str) -> Result<Vec<ModelListItem>> {
    let url = format!(
        "{}/models?key={}",
        Provider::Google.default_base_url(),
        api_key
    );
    let response = http.get(&url).send().await?;
    if !response.status().is_success() {
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        anyhow::bail!("Failed to fetch Google models ({}): {}", status, error_text);
    }
    let body: GoogleModelsResponse = response.json().await?;
    Ok(map_google_models(body))
}

/// Keeps models that support `generateContent`; if that filter empties the
/// list, falls back to listing everything rather than showing nothing.
fn map_google_models(body: GoogleModelsResponse) -> Vec<ModelListItem> {
    let to_item = |m: &GoogleModel| ModelListItem {
        id: m.name.clone(),
        name: m.display_name.clone().unwrap_or_else(|| m.name.clone()),
    };

    let mut models: Vec<ModelListItem> = body
        .models
        .iter()
        .filter(|m| {
            m.supported_generation_methods
                .iter()
                .any(|method| method == "generateContent")
        })
        .map(to_item)
        .collect();
    if models.is_empty() {
        warn!("no models supporting generateContent; listing all");
        models = body.models.iter().map(to_item).collect();
    }
    models.sort_by(|a, b| a.name.cmp(&b.name));
    models
}

#[derive(Debug, Deserialize)]
struct OpenAiModelsResponse {
    #[serde(default)]
    data: Vec<OpenAiModel>,
}

#[derive(Debug, Deserialize)]
struct OpenAiModel {
    id: String,
}

#[derive(Debug, Deserialize)]
struct GoogleModelsResponse {
    #[serde(default)]
    models: Vec<GoogleModel>,
}

#[derive(Debug, Deserialize)]
struct GoogleModel {
    name: String,
    #[serde(rename = "displayName", default)]
    display_name: Option<String>,
    #[serde(rename = "supportedGenerationMethods", default)]
    supported_generation_methods: Vec<String>,
}
