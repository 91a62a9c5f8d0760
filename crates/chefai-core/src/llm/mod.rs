//! LLM API access.
//!
//! [`LlmClient`] is the seam the generator talks to. [`OpenAiClient`] sends
//! one chat-completions request per call; [`MockLlmClient`] returns canned
//! output for tests.

mod client;
mod mock;
mod openai;

pub use client::{LlmClient, LlmError};
pub use mock::MockLlmClient;
pub use openai::{LlmConfig, OpenAiClient};
