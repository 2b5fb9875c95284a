//! Shared test double: a mock completion client that records the wire
//! history it was handed and replies with a canned completion or an error.

use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use punk_core::Message;
use punk_llm::{Completion, CompletionApi};

pub struct MockClient {
    pub reply: String,
    pub tokens: u32,
    pub fail: bool,
    pub hang: bool,
    pub calls: Mutex<Vec<Vec<Message>>>,
}

impl MockClient {
    pub fn replying(reply: &str, tokens: u32) -> Self {
        Self {
            reply: reply.to_string(),
            tokens,
            fail: false,
            hang: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::replying("", 0)
        }
    }

    /// A client whose request never completes.
    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::replying("", 0)
        }
    }

    /// The histories `complete` was called with, in order.
    pub fn calls(&self) -> Vec<Vec<Message>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionApi for MockClient {
    async fn complete(&self, messages: &[Message]) -> Result<Completion> {
        self.calls.lock().unwrap().push(messages.to_vec());
        if self.hang {
            std::future::pending::<()>().await;
        }
        if self.fail {
            anyhow::bail!("API request failed (503): upstream unavailable");
        }
        Ok(Completion {
            content: self.reply.clone(),
            tokens: self.tokens,
        })
    }
}
