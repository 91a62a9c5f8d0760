use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::client::{LlmClient, LlmError};

/// Canned LLM for tests. Returns the same reply to every prompt and keeps
/// the prompts it was sent.
#[derive(Clone)]
pub struct MockLlmClient {
    reply: Arc<dyn Fn() -> Result<String, LlmError> + Send + Sync>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockLlmClient {
    /// A client that always answers `response`.
    pub fn with_response(response: impl Into<String>) -> Self {
        let response = response.into();
        Self::with_reply(move || Ok(response.clone()))
    }

    /// A client whose reply is produced by `reply` on every call.
    pub fn with_reply(
        reply: impl Fn() -> Result<String, LlmError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            reply: Arc::new(reply),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Prompts received so far, oldest first.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().await.push(prompt.to_string());
        (self.reply)()
    }
}
