//! The generate-recipe request handler.
//!
//! One call runs the whole pipeline once: permission and input checks, a
//! single LLM request, response parsing, draft assembly, and persistence.
//! Errors from any stage are returned as-is; nothing is retried.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::draft::assemble_draft;
use crate::llm::{LlmClient, LlmError};
use crate::prompt::build_recipe_prompt;
use crate::response::{ResponseFormatError, parse_response};
use crate::roles::{Capability, Operator};
use crate::sanitize::{esc_url_raw, sanitize_text_field};
use crate::settings::ApiSettings;
use crate::store::DraftStore;

/// Default edit-link template; `{id}` is replaced by the post ID.
pub const DEFAULT_EDIT_LINK_TEMPLATE: &str = "http://localhost/wp-admin/post.php?post={id}&action=edit";

/// Raw request input, before sanitization.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    pub keyword: String,
    pub author_signature: String,
    pub internal_link_1: String,
    pub internal_link_2: String,
}

/// Result of a successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutcome {
    pub post_id: Uuid,
    pub edit_link: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("you do not have permission to {0}")]
    PermissionDenied(Capability),

    #[error("the LLM API key is not configured; set llm_api_key in the settings first")]
    MissingApiKey,

    #[error("keyword and author signature are required")]
    MissingFields,

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Format(#[from] ResponseFormatError),

    #[error("failed to store draft")]
    Store(#[source] anyhow::Error),
}

impl GenerateError {
    /// HTTP-style status code for hosts that surface errors over HTTP.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::PermissionDenied(_) => 403,
            Self::MissingApiKey | Self::MissingFields | Self::Format(_) => 400,
            Self::Llm(_) => 502,
            Self::Store(_) => 500,
        }
    }
}

/// Build an edit link from `template` by substituting `{id}`.
pub fn edit_link(template: &str, post_id: Uuid) -> String {
    template.replace("{id}", &post_id.to_string())
}

/// Runs generation requests against one LLM and one store.
pub struct Generator {
    api: ApiSettings,
    llm: Arc<dyn LlmClient>,
    store: Arc<dyn DraftStore>,
    edit_link_template: String,
}

impl Generator {
    pub fn new(
        api: ApiSettings,
        llm: Arc<dyn LlmClient>,
        store: Arc<dyn DraftStore>,
        edit_link_template: impl Into<String>,
    ) -> Self {
        Self {
            api,
            llm,
            store,
            edit_link_template: edit_link_template.into(),
        }
    }

    /// Generate and store a recipe draft on behalf of `operator`.
    pub async fn generate(
        &self,
        operator: &Operator,
        request: &GenerateRequest,
    ) -> Result<GenerateOutcome, GenerateError> {
        if !operator.can(Capability::PublishPosts) {
            warn!(user_id = operator.user_id, role = %operator.role, "generation refused");
            return Err(GenerateError::PermissionDenied(Capability::PublishPosts));
        }

        if self.api.llm_api_key.trim().is_empty() {
            return Err(GenerateError::MissingApiKey);
        }

        let keyword = sanitize_text_field(&request.keyword);
        let author = sanitize_text_field(&request.author_signature);
        let link1 = esc_url_raw(&request.internal_link_1);
        let link2 = esc_url_raw(&request.internal_link_2);

        if keyword.is_empty() || author.is_empty() {
            return Err(GenerateError::MissingFields);
        }

        info!(%keyword, %author, "generating recipe");

        let prompt = build_recipe_prompt(&keyword, &author);
        let raw = self.llm.complete(&prompt).await?;
        let parsed = parse_response(&raw)?;
        let draft = assemble_draft(parsed, &keyword, &link1, &link2, operator.user_id);

        let post_id = self
            .store
            .insert_draft(&draft)
            .await
            .map_err(GenerateError::Store)?;

        info!(%post_id, %keyword, "recipe draft created");

        Ok(GenerateOutcome {
            post_id,
            edit_link: edit_link(&self.edit_link_template, post_id),
            message: "Recipe generated successfully as a draft!".to_string(),
        })
    }
}
