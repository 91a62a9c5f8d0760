//! Recipe-post generation: prompt, LLM call, response parsing, draft
//! assembly, and persistence behind the [`store::DraftStore`] seam.
//!
//! ```text
//! GenerateRequest
//!     |
//!     v
//! Generator::generate --checks--> roles / settings / sanitize
//!     |
//!     +--> prompt::build_recipe_prompt --> LlmClient::complete
//!     |                                        |
//!     |            response::parse_response <--+
//!     |                   |
//!     |            draft::assemble_draft (anchors + kses)
//!     |                   |
//!     +--------> DraftStore::insert_draft
//! ```

pub mod anchors;
pub mod dashboard;
pub mod draft;
pub mod generator;
pub mod llm;
pub mod prompt;
pub mod render;
pub mod response;
pub mod roles;
pub mod sanitize;
pub mod settings;
pub mod store;

pub use generator::{GenerateError, GenerateOutcome, GenerateRequest, Generator};
