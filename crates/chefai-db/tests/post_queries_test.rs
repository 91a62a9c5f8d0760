//! Integration tests for post, post-meta, and tag queries.
//!
//! Each test runs against its own temporary database on the shared
//! PostgreSQL instance from `chefai-test-utils`.

use chefai_db::config::DbConfig;
use chefai_db::models::PostStatus;
use chefai_db::pool;
use chefai_db::queries::posts::{self, NewPost};
use chefai_db::queries::{post_meta, tags};
use chefai_test_utils::{create_test_db, drop_test_db, pg_url};

fn new_post(title: &str, status: PostStatus) -> NewPost<'_> {
    NewPost {
        title,
        content: "<p>body</p>",
        status,
        post_type: "post",
        author_id: 7,
    }
}

#[tokio::test]
async fn insert_and_get_post() {
    let (pool, db_name) = create_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let post = posts::insert_post(&mut conn, &new_post("Carrot cake", PostStatus::Draft))
        .await
        .expect("insert_post should succeed");
    drop(conn);

    assert_eq!(post.title, "Carrot cake");
    assert_eq!(post.status, PostStatus::Draft);
    assert_eq!(post.post_type, "post");
    assert_eq!(post.author_id, 7);

    let fetched = posts::get_post(&pool, post.id)
        .await
        .unwrap()
        .expect("post should exist");
    assert_eq!(fetched.id, post.id);
    assert_eq!(fetched.content, "<p>body</p>");

    let missing = posts::get_post(&pool, uuid::Uuid::new_v4()).await.unwrap();
    assert!(missing.is_none());

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn set_meta_overwrites_previous_value() {
    let (pool, db_name) = create_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let post = posts::insert_post(&mut conn, &new_post("Soup", PostStatus::Draft))
        .await
        .unwrap();
    post_meta::set_meta(&mut conn, post.id, "_seo_title", "first")
        .await
        .unwrap();
    post_meta::set_meta(&mut conn, post.id, "_seo_title", "second")
        .await
        .unwrap();
    post_meta::set_meta(&mut conn, post.id, "_seo_metadesc", "desc")
        .await
        .unwrap();
    drop(conn);

    let value = post_meta::get_meta(&pool, post.id, "_seo_title").await.unwrap();
    assert_eq!(value.as_deref(), Some("second"));

    let all = post_meta::list_meta(&pool, post.id).await.unwrap();
    let keys: Vec<&str> = all.iter().map(|m| m.meta_key.as_str()).collect();
    assert_eq!(keys, vec!["_seo_metadesc", "_seo_title"]);

    let absent = post_meta::get_meta(&pool, post.id, "_nope").await.unwrap();
    assert!(absent.is_none());

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn set_post_tags_replaces_and_shares_tags() {
    let (pool, db_name) = create_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let first = posts::insert_post(&mut conn, &new_post("Cake", PostStatus::Draft))
        .await
        .unwrap();
    let second = posts::insert_post(&mut conn, &new_post("Pie", PostStatus::Draft))
        .await
        .unwrap();

    let names = vec![
        "Dessert".to_string(),
        "dessert".to_string(),
        "Carrot Cake".to_string(),
        "  ".to_string(),
    ];
    let linked = tags::set_post_tags(&mut conn, first.id, &names).await.unwrap();
    assert_eq!(linked.len(), 2, "duplicates and blanks are skipped");

    let shared = tags::set_post_tags(&mut conn, second.id, &["DESSERT".to_string()])
        .await
        .unwrap();
    assert_eq!(shared[0].id, linked[0].id, "same slug reuses the tag row");

    tags::set_post_tags(&mut conn, first.id, &["Baking".to_string()])
        .await
        .unwrap();
    drop(conn);

    let first_tags = tags::list_tags_for_post(&pool, first.id).await.unwrap();
    let slugs: Vec<&str> = first_tags.iter().map(|t| t.slug.as_str()).collect();
    assert_eq!(slugs, vec!["baking"]);

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn counts_and_recent_generated_posts() {
    let (pool, db_name) = create_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let mut generated = Vec::new();
    for i in 0..7 {
        let title = format!("Recipe {i}");
        let post = posts::insert_post(&mut conn, &new_post(&title, PostStatus::Draft))
            .await
            .unwrap();
        post_meta::set_meta(&mut conn, post.id, "_is_chefai_recipe", "1")
            .await
            .unwrap();
        generated.push(post.id);
    }
    posts::insert_post(&mut conn, &new_post("Handwritten", PostStatus::Publish))
        .await
        .unwrap();
    posts::insert_post(&mut conn, &new_post("Waiting", PostStatus::Pending))
        .await
        .unwrap();
    drop(conn);

    let counts = posts::count_posts_by_status(&pool, "post").await.unwrap();
    assert_eq!(counts.draft, 7);
    assert_eq!(counts.publish, 1);
    assert_eq!(counts.pending, 1);
    assert_eq!(counts.total(), 8);

    let recent = posts::list_recent_with_meta(&pool, "_is_chefai_recipe", 5)
        .await
        .unwrap();
    assert_eq!(recent.len(), 5);
    assert!(recent.iter().all(|p| generated.contains(&p.id)));
    assert!(recent.iter().all(|p| p.title != "Handwritten"));

    let table_counts = pool::table_counts(&pool).await.unwrap();
    let posts_row = table_counts.iter().find(|(t, _)| t == "posts").unwrap();
    assert_eq!(posts_row.1, 9);

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn table_counts_follow_schema_and_flag_missing_tables() {
    let (pool, db_name) = create_test_db().await;

    let names: Vec<String> = pool::table_counts(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|(table, _)| table)
        .collect();
    assert_eq!(names, pool::TABLES);

    sqlx::query("DROP TABLE post_tags")
        .execute(&pool)
        .await
        .unwrap();
    let msg = pool::table_counts(&pool).await.unwrap_err().to_string();
    assert_eq!(msg, "table post_tags is missing; run `chefai db-init` first");

    pool.close().await;
    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn ensure_database_exists_is_idempotent() {
    let db_name = format!("chefai_bootstrap_{}", uuid::Uuid::new_v4().simple());
    let config = DbConfig::new(format!("{}/{db_name}", pg_url().await));

    pool::ensure_database_exists(&config).await.unwrap();
    pool::ensure_database_exists(&config).await.unwrap();

    let db = pool::create_pool(&config).await.unwrap();
    pool::run_migrations(&db).await.unwrap();
    assert!(pool::table_counts(&db).await.unwrap().iter().all(|(_, n)| *n == 0));
    db.close().await;

    drop_test_db(&db_name).await;
}

#[tokio::test]
async fn ensure_database_exists_rejects_unsafe_names() {
    let config = DbConfig::new(format!("{}/recipes-prod", pg_url().await));
    let msg = pool::ensure_database_exists(&config)
        .await
        .unwrap_err()
        .to_string();
    assert!(msg.contains("letters, digits, and underscores"), "{msg}");
}
