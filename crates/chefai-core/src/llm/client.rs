use async_trait::async_trait;
use thiserror::Error;

/// Errors from a completion call. None of them are retried.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("failed to connect to the LLM API: {0}")]
    Connection(#[source] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("unexpected response format from the LLM API")]
    UnexpectedFormat,
}

/// A language model that turns one prompt into one block of text.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send `prompt` as a single user message and return the reply text.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;
}

const _: () = {
    fn _assert_object_safe(_: &dyn LlmClient) {}
};
