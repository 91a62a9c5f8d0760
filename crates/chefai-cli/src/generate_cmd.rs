//! `chefai generate` command: create a recipe draft from a keyword.

use std::sync::Arc;

use anyhow::Result;
use sqlx::PgPool;

use chefai_core::llm::{LlmClient, OpenAiClient};
use chefai_core::store::PgDraftStore;
use chefai_core::{GenerateOutcome, GenerateRequest, Generator};

use crate::config::ChefaiConfig;

/// Run one generation with `llm` and store the draft in `pool`.
pub async fn generate_draft(
    pool: &PgPool,
    config: &ChefaiConfig,
    llm: Arc<dyn LlmClient>,
    request: &GenerateRequest,
) -> Result<GenerateOutcome> {
    let generator = Generator::new(
        config.settings.api.clone(),
        llm,
        Arc::new(PgDraftStore::new(pool.clone())),
        config.edit_link_template.clone(),
    );
    let outcome = generator.generate(&config.operator, request).await?;
    tracing::info!(post_id = %outcome.post_id, keyword = %request.keyword, "recipe draft stored");
    Ok(outcome)
}

/// Run the generate command against the configured LLM endpoint.
pub async fn run_generate(
    pool: &PgPool,
    config: &ChefaiConfig,
    request: &GenerateRequest,
) -> Result<()> {
    let llm = OpenAiClient::new(config.settings.api.llm_api_key.clone(), config.llm.clone())?;
    let outcome = generate_draft(pool, config, Arc::new(llm), request).await?;

    println!("{}", outcome.message);
    println!("  post: {}", outcome.post_id);
    println!("  edit: {}", outcome.edit_link);
    Ok(())
}

#[cfg(test)]
mod tests {
    use chefai_core::GenerateError;
    use chefai_core::llm::MockLlmClient;
    use chefai_core::response::DELIMITER;
    use chefai_core::roles::{Operator, Role};
    use chefai_core::settings::Settings;
    use chefai_db::config::DbConfig;
    use chefai_db::queries::posts;
    use chefai_test_utils::{create_test_db, drop_test_db};

    use super::*;

    fn config(role: Role, api_key: &str) -> ChefaiConfig {
        let mut settings = Settings::default();
        settings.api.llm_api_key = api_key.to_string();
        ChefaiConfig {
            db_config: DbConfig::new("unused"),
            settings,
            llm: Default::default(),
            edit_link_template: "/edit/{id}".to_string(),
            operator: Operator::new(3, role),
        }
    }

    fn request() -> GenerateRequest {
        GenerateRequest {
            keyword: "pumpkin bread".to_string(),
            author_signature: "Chef Lu".to_string(),
            ..GenerateRequest::default()
        }
    }

    fn response() -> String {
        ["<p>Bake it.</p>", "Pumpkin Bread", "Soft.", "bread", "{}", "{}", "{}"].join(DELIMITER)
    }

    #[tokio::test]
    async fn stores_draft_and_builds_edit_link() {
        let (pool, db_name) = create_test_db().await;

        let llm = Arc::new(MockLlmClient::with_response(response()));
        let outcome = generate_draft(&pool, &config(Role::Author, "sk-test"), llm, &request())
            .await
            .unwrap();

        assert_eq!(outcome.edit_link, format!("/edit/{}", outcome.post_id));
        let post = posts::get_post(&pool, outcome.post_id).await.unwrap().unwrap();
        assert_eq!(post.title, "pumpkin bread");
        assert_eq!(post.author_id, 3);

        pool.close().await;
        drop_test_db(&db_name).await;
    }

    #[tokio::test]
    async fn subscriber_cannot_generate() {
        let (pool, db_name) = create_test_db().await;

        let llm = Arc::new(MockLlmClient::with_response(response()));
        let err = generate_draft(&pool, &config(Role::Subscriber, "sk-test"), llm, &request())
            .await
            .unwrap_err();

        assert!(matches!(
            err.downcast_ref::<GenerateError>(),
            Some(GenerateError::PermissionDenied(_))
        ));
        let counts = posts::count_posts_by_status(&pool, "post").await.unwrap();
        assert_eq!(counts.total(), 0);

        pool.close().await;
        drop_test_db(&db_name).await;
    }
}
