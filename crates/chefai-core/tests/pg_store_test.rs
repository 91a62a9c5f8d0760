//! Integration tests for `PgDraftStore`, the dashboard, and a full
//! generation run against PostgreSQL.

use std::sync::Arc;

use chefai_core::dashboard::{RECENT_LIMIT, load_dashboard};
use chefai_core::draft::{DraftPost, SchemaBlocks};
use chefai_core::llm::MockLlmClient;
use chefai_core::render::footer_for_post;
use chefai_core::response::DELIMITER;
use chefai_core::roles::{Operator, Role};
use chefai_core::settings::ApiSettings;
use chefai_core::store::{
    DraftStore, META_GENERATED, META_SCHEMA_FAQ, META_SCHEMA_RECIPE, META_SCHEMA_VIDEO,
    META_SEO_DESCRIPTION, META_SEO_TITLE, PgDraftStore,
};
use chefai_core::{GenerateRequest, Generator};
use chefai_db::models::PostStatus;
use chefai_db::queries::posts::{self, NewPost};
use chefai_db::queries::{post_meta, tags};
use chefai_test_utils::{create_test_db, drop_test_db};
use uuid::Uuid;

fn draft(title: &str) -> DraftPost {
    DraftPost {
        title: title.to_string(),
        content: "<p>Grate the carrots.</p>".to_string(),
        status: PostStatus::Draft,
        post_type: "post".to_string(),
        author_id: 9,
        meta_title: "Carrot Cake".to_string(),
        meta_description: "Moist and easy.".to_string(),
        tags: vec!["Cake".to_string(), "Carrot".to_string()],
        schemas: SchemaBlocks {
            recipe: r#"{"@type":"Recipe"}"#.to_string(),
            faq: r#"{"@type":"FAQPage"}"#.to_string(),
            video: String::new(),
        },
    }
}

#[tokio::test]
async fn insert_draft_stores_post_tags_and_meta() {
    let (pool, db_name) = create_test_db().await;
    let store = PgDraftStore::new(pool.clone());

    let id = store.insert_draft(&draft("carrot cake")).await.unwrap();

    let post = posts::get_post(&pool, id).await.unwrap().expect("post stored");
    assert_eq!(post.title, "carrot cake");
    assert_eq!(post.status, PostStatus::Draft);
    assert_eq!(post.author_id, 9);

    let names: Vec<String> = tags::list_tags_for_post(&pool, id)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();
    assert_eq!(names, vec!["Cake", "Carrot"]);

    let meta = post_meta::list_meta(&pool, id).await.unwrap();
    assert_eq!(meta.len(), 6);
    let get = |key: &str| {
        meta.iter()
            .find(|m| m.meta_key == key)
            .map(|m| m.meta_value.as_str())
            .unwrap_or_else(|| panic!("missing meta {key}"))
    };
    assert_eq!(get(META_GENERATED), "1");
    assert_eq!(get(META_SEO_TITLE), "Carrot Cake");
    assert_eq!(get(META_SEO_DESCRIPTION), "Moist and easy.");
    assert_eq!(get(META_SCHEMA_RECIPE), r#"{"@type":"Recipe"}"#);
    assert_eq!(get(META_SCHEMA_FAQ), r#"{"@type":"FAQPage"}"#);
    assert_eq!(get(META_SCHEMA_VIDEO), "");

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn failed_insert_leaves_nothing_behind() {
    let (pool, db_name) = create_test_db().await;
    let store = PgDraftStore::new(pool.clone());

    // PostgreSQL text columns reject NUL, so the last meta write fails.
    let mut bad = draft("broken");
    bad.schemas.video = "bad\0value".to_string();

    assert!(store.insert_draft(&bad).await.is_err());

    let counts = posts::count_posts_by_status(&pool, "post").await.unwrap();
    assert_eq!(counts.total(), 0);

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn schema_blocks_and_footer() {
    let (pool, db_name) = create_test_db().await;
    let store = PgDraftStore::new(pool.clone());

    let id = store.insert_draft(&draft("carrot cake")).await.unwrap();

    let blocks = store.schema_blocks(id).await.unwrap().expect("post exists");
    assert_eq!(blocks.recipe, r#"{"@type":"Recipe"}"#);
    assert_eq!(blocks.video, "");

    let footer = footer_for_post(&store, id).await.unwrap().unwrap();
    assert_eq!(
        footer,
        "\n{\"@type\":\"Recipe\"}\n\n{\"@type\":\"FAQPage\"}\n"
    );

    assert!(store.schema_blocks(Uuid::new_v4()).await.unwrap().is_none());
    assert!(footer_for_post(&store, Uuid::new_v4()).await.unwrap().is_none());

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn post_without_schema_meta_has_empty_blocks() {
    let (pool, db_name) = create_test_db().await;
    let mut conn = pool.acquire().await.unwrap();
    let post = posts::insert_post(
        &mut conn,
        &NewPost {
            title: "hand written",
            content: "",
            status: PostStatus::Publish,
            post_type: "post",
            author_id: 1,
        },
    )
    .await
    .unwrap();
    drop(conn);

    let store = PgDraftStore::new(pool.clone());
    let blocks = store.schema_blocks(post.id).await.unwrap().unwrap();
    assert_eq!(blocks, SchemaBlocks::default());
    assert_eq!(footer_for_post(&store, post.id).await.unwrap().unwrap(), "");

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn dashboard_counts_and_lists_generated_posts() {
    let (pool, db_name) = create_test_db().await;
    let store = PgDraftStore::new(pool.clone());

    let mut conn = pool.acquire().await.unwrap();
    posts::insert_post(
        &mut conn,
        &NewPost {
            title: "published by hand",
            content: "",
            status: PostStatus::Publish,
            post_type: "post",
            author_id: 1,
        },
    )
    .await
    .unwrap();
    drop(conn);

    let mut ids = Vec::new();
    for i in 0..6 {
        ids.push(store.insert_draft(&draft(&format!("recipe {i}"))).await.unwrap());
    }

    let dashboard = load_dashboard(&pool).await.unwrap();
    assert_eq!(dashboard.counts.publish, 1);
    assert_eq!(dashboard.counts.draft, 6);
    assert_eq!(dashboard.counts.total(), 7);

    assert_eq!(dashboard.recent.len() as i64, RECENT_LIMIT);
    assert_eq!(dashboard.recent[0].title, "recipe 5");
    assert!(dashboard.recent.iter().all(|p| p.title != "published by hand"));
    assert!(dashboard.recent.iter().all(|p| p.id != ids[0]));

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn generator_end_to_end() {
    let (pool, db_name) = create_test_db().await;
    let store = Arc::new(PgDraftStore::new(pool.clone()));

    let response = [
        "<h2>Intro</h2><p>Try [ANCHOR_LINK_2:our soups].</p><iframe src=\"x\"></iframe>",
        "Tomato Soup",
        "A bright,\nsimple soup.",
        "soup, tomato, , vegetarian",
        r#"{"@type":"Recipe","author":"Chef Ana"}"#,
        r#"{"@type":"FAQPage"}"#,
        r#"{"@type":"VideoObject"}"#,
    ]
    .join(DELIMITER);
    let llm = Arc::new(MockLlmClient::with_response(response));

    let generator = Generator::new(
        ApiSettings {
            llm_api_key: "sk-test".to_string(),
            ..ApiSettings::default()
        },
        llm.clone(),
        store.clone(),
        "https://blog.example/wp-admin/post.php?post={id}&action=edit",
    );

    let outcome = generator
        .generate(
            &Operator::new(5, Role::Editor),
            &GenerateRequest {
                keyword: "tomato soup".to_string(),
                author_signature: "Chef Ana".to_string(),
                internal_link_1: String::new(),
                internal_link_2: "https://blog.example/soups".to_string(),
            },
        )
        .await
        .unwrap();

    assert_eq!(
        outcome.edit_link,
        format!(
            "https://blog.example/wp-admin/post.php?post={}&action=edit",
            outcome.post_id
        )
    );

    let post = posts::get_post(&pool, outcome.post_id).await.unwrap().unwrap();
    assert_eq!(post.title, "tomato soup");
    assert_eq!(post.author_id, 5);
    assert_eq!(
        post.content,
        "<h2>Intro</h2><p>Try <a href=\"https://blog.example/soups\">our soups</a>.</p>"
    );

    let desc = post_meta::get_meta(&pool, outcome.post_id, META_SEO_DESCRIPTION)
        .await
        .unwrap();
    assert_eq!(desc.as_deref(), Some("A bright,\nsimple soup."));

    let tag_count = tags::list_tags_for_post(&pool, outcome.post_id)
        .await
        .unwrap()
        .len();
    assert_eq!(tag_count, 3);

    let footer = footer_for_post(store.as_ref(), outcome.post_id)
        .await
        .unwrap()
        .unwrap();
    assert!(footer.starts_with("\n{\"@type\":\"Recipe\""));
    assert!(footer.ends_with("{\"@type\":\"VideoObject\"}\n"));

    assert_eq!(llm.prompts().await.len(), 1);

    pool.close().await;
    drop_test_db(&db_name).await;
}
