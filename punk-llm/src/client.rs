//! Chat completion client: OpenAI `chat/completions` and Google
//! `generateContent` wire shapes over reqwest.

use anyhow::Result;
use async_trait::async_trait;
use punk_core::{Message, Role};
use punk_tokenizer::estimate_tokens;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::provider::{Provider, ProviderSettings};

/// Sampling temperature sent with every request.
const TEMPERATURE: f64 = 0.7;

/// One completion from a provider: the text plus a token count — the
/// provider's usage figure when available, otherwise estimated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub content: String,
    pub tokens: u32,
}

/// The seam between the session and the provider HTTP client. Lets tests
/// drive the session with a mock instead of the network.
#[async_trait]
pub trait CompletionApi: Send + Sync {
    /// Sends the full wire history and returns a single completion.
    async fn complete(&self, messages: &[Message]) -> Result<Completion>;
}

/// Provider HTTP client.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: Client,
    provider: Provider,
    settings: ProviderSettings,
}

impl ChatClient {
    pub fn new(provider: Provider, settings: ProviderSettings) -> Self {
        Self {
            http: Client::new(),
            provider,
            settings,
        }
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    async fn complete_openai(&self, messages: &[Message]) -> Result<Completion> {
        let request = OpenAiRequest {
            model: &self.settings.model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role,
                    content: &m.content,
                })
                .collect(),
            temperature: TEMPERATURE,
        };

        let url = format!("{}/chat/completions", self.settings.base_url);
        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!(%status, "chat completion request failed");
            anyhow::bail!("API request failed ({}): {}", status, error_text);
        }

        let body: OpenAiResponse = response.json().await?;
        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("No response from provider"))?;
        let content = choice.message.content.unwrap_or_default();
        let tokens = body
            .usage
            .and_then(|u| u.completion_tokens)
            .unwrap_or_else(|| estimate_tokens(&content));
        Ok(Completion { content, tokens })
    }

    async fn complete_google(&self, messages: &[Message]) -> Result<Completion> {
        let system_instruction = messages
            .iter()
            .find(|m| m.role == Role::System)
            .filter(|m| !m.content.is_empty())
            .map(|m| SystemInstruction {
                parts: vec![Part {
                    text: m.content.clone(),
                }],
            });

        let mut contents: Vec<Content> = messages
            .iter()
            .filter(|m| m.role != Role::System)
            .map(|m| Content {
                role: if m.role == Role::User { "user" } else { "model" },
                parts: vec![Part {
                    text: m.content.clone(),
                }],
            })
            .collect();
        if contents.is_empty() {
            contents.push(Content {
                role: "user",
                parts: vec![Part {
                    text: "Hello".to_string(),
                }],
            });
        }

        let request = GoogleRequest {
            contents,
            system_instruction,
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        };

        // The API expects a "models/"-qualified name in the path.
        let model = &self.settings.model;
        let model_path = if model.starts_with("models/") {
            model.clone()
        } else {
            format!("models/{model}")
        };
        let url = format!(
            "{}/{}:generateContent?key={}",
            self.settings.base_url, model_path, self.settings.api_key
        );

        let response = self.http.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            warn!(%status, "generateContent request failed");
            anyhow::bail!("API request failed ({}): {}", status, error_text);
        }

        let body: GoogleResponse = response.json().await?;
        let content = body
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .unwrap_or_default();
        // No usage figure on this path; estimate.
        let tokens = estimate_tokens(&content);
        Ok(Completion { content, tokens })
    }
}

#[async_trait]
impl CompletionApi for ChatClient {
    async fn complete(&self, messages: &[Message]) -> Result<Completion> {
        if !self.settings.configured() {
            anyhow::bail!("API key is not configured");
        }
        info!(
            provider = %self.provider,
            model = %self.settings.model,
            history_len = messages.len(),
            "sending chat completion request"
        );
        match self.provider {
            Provider::OpenAi => self.complete_openai(messages).await,
            Provider::Google => self.complete_google(messages).await,
        }
    }
}

// --- OpenAI wire shapes ---

#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: Role,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    completion_tokens: Option<u32>,
}

// --- Google wire shapes ---

#[derive(Debug, Serialize)]
struct GoogleRequest {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct GoogleResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Test: The OpenAI body carries model, lowercase roles, and temperature.**
    #[test]
    fn openai_request_shape() {
        let request = OpenAiRequest {
            model: "gpt-4o",
            messages: vec![
                WireMessage {
                    role: Role::System,
                    content: "be terse",
                },
                WireMessage {
                    role: Role::User,
                    content: "hi",
                },
            ],
            temperature: TEMPERATURE,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert_eq!(json["temperature"], 0.7);
    }

    /// **Test: OpenAI responses parse content and the completion token figure.**
    #[test]
    fn openai_response_parses() {
        let body = r#"{
            "choices": [{"message": {"role": "assistant", "content": "hello"}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 4, "total_tokens": 16}
        }"#;
        let parsed: OpenAiResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("hello")
        );
        assert_eq!(parsed.usage.unwrap().completion_tokens, Some(4));
    }

    /// **Test: The Google body uses camelCase systemInstruction/generationConfig
    /// and user/model roles; systemInstruction is omitted when absent.**
    #[test]
    fn google_request_shape() {
        let request = GoogleRequest {
            contents: vec![
                Content {
                    role: "user",
                    parts: vec![Part {
                        text: "hi".to_string(),
                    }],
                },
                Content {
                    role: "model",
                    parts: vec![Part {
                        text: "hello".to_string(),
                    }],
                },
            ],
            system_instruction: Some(SystemInstruction {
                parts: vec![Part {
                    text: "be terse".to_string(),
                }],
            }),
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][1]["role"], "model");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be terse");
        assert_eq!(json["generationConfig"]["temperature"], 0.7);

        let bare = GoogleRequest {
            contents: vec![],
            system_instruction: None,
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        };
        let json = serde_json::to_value(&bare).unwrap();
        assert!(json.get("systemInstruction").is_none());
    }

    /// **Test: Google responses parse the first candidate's first part.**
    #[test]
    fn google_response_parses() {
        let body = r#"{
            "candidates": [{"content": {"parts": [{"text": "answer"}], "role": "model"}}]
        }"#;
        let parsed: GoogleResponse = serde_json::from_str(body).unwrap();
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text);
        assert_eq!(text.as_deref(), Some("answer"));

        let empty: GoogleResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.candidates.is_empty());
    }

    /// **Test: An unconfigured client refuses to send at all.**
    #[tokio::test]
    async fn unconfigured_client_does_not_send() {
        let client = ChatClient::new(
            Provider::Google,
            ProviderSettings::defaults_for(Provider::Google),
        );
        let err = client.complete(&[]).await.unwrap_err();
        assert!(err.to_string().contains("API key is not configured"));
    }
}
