mod config;
mod generate_cmd;
mod schema_cmd;
mod settings_cmd;
mod show_cmd;
mod status_cmd;
#[cfg(test)]
mod test_util;

use clap::{Parser, Subcommand};

use chefai_core::GenerateRequest;
use chefai_core::settings::mask_secret;
use chefai_db::config::DbConfig;
use chefai_db::pool;

use config::ChefaiConfig;

#[derive(Parser)]
#[command(name = "chefai", about = "Generate SEO-ready recipe drafts with an LLM")]
struct Cli {
    /// Database URL (overrides CHEFAI_DATABASE_URL env var)
    #[arg(long, global = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a chefai config file (no database required)
    Init {
        /// PostgreSQL connection URL
        #[arg(long, default_value = DbConfig::DEFAULT_URL)]
        db_url: String,
        /// API key for the chat-completions endpoint
        #[arg(long)]
        llm_api_key: Option<String>,
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
    /// Create and migrate the chefai database
    DbInit,
    /// Generate a recipe and store it as a draft
    Generate {
        /// Main keyword; becomes the post title
        keyword: String,
        /// Author signature used for the intro and the recipe schema
        #[arg(long)]
        author: String,
        /// URL for the first internal-link placeholder
        #[arg(long, default_value = "")]
        link1: String,
        /// URL for the second internal-link placeholder
        #[arg(long, default_value = "")]
        link2: String,
    },
    /// Show post counts and recently generated recipes
    Status,
    /// Show a stored post with its metadata and tags
    Show {
        /// Post ID
        post_id: String,
    },
    /// Print the JSON-LD footer for a post's single view
    Schema {
        /// Post ID
        post_id: String,
    },
    /// View or change settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Print current settings (API keys masked)
    Show,
    /// Change one setting (requires the administrator role)
    Set {
        /// llm_api_key, youtube_api_key, image_api_key, or primary_color
        key: String,
        value: String,
    },
}

/// Execute the `chefai init` command: write config file.
fn cmd_init(db_url: &str, llm_api_key: Option<&str>, force: bool) -> anyhow::Result<()> {
    let path = config::config_path();

    if path.exists() && !force {
        anyhow::bail!(
            "config file already exists at {}\nUse --force to overwrite.",
            path.display()
        );
    }

    let mut cfg = config::ConfigFile::default();
    cfg.database.url = db_url.to_string();
    if let Some(key) = llm_api_key {
        cfg.api.llm_api_key = key.to_string();
    }
    cfg.set_settings(cfg.settings());

    config::save_config(&cfg)?;

    println!("Config written to {}", path.display());
    println!("  database.url = {db_url}");
    println!("  api.llm_api_key = {}", mask_secret(&cfg.api.llm_api_key));
    println!("  operator.role = {}", cfg.operator.role);
    println!();
    println!("Next: run `chefai db-init` to create and migrate the database.");

    Ok(())
}

/// Execute the `chefai db-init` command: create database and run migrations.
async fn cmd_db_init(cli_db_url: Option<&str>) -> anyhow::Result<()> {
    let resolved = ChefaiConfig::resolve(cli_db_url)?;

    println!("Initializing chefai database...");

    pool::ensure_database_exists(&resolved.db_config).await?;
    let db_pool = pool::create_pool(&resolved.db_config).await?;
    pool::run_migrations(&db_pool).await?;

    let counts = pool::table_counts(&db_pool).await?;
    println!("Database ready. Tables:");
    for (table, count) in &counts {
        println!("  {table}: {count} rows");
    }

    db_pool.close().await;

    println!("chefai db-init complete.");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            db_url,
            llm_api_key,
            force,
        } => {
            cmd_init(&db_url, llm_api_key.as_deref(), force)?;
        }
        Commands::DbInit => {
            cmd_db_init(cli.database_url.as_deref()).await?;
        }
        Commands::Generate {
            keyword,
            author,
            link1,
            link2,
        } => {
            let resolved = ChefaiConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let request = GenerateRequest {
                keyword,
                author_signature: author,
                internal_link_1: link1,
                internal_link_2: link2,
            };
            let result = generate_cmd::run_generate(&db_pool, &resolved, &request).await;
            db_pool.close().await;
            result?;
        }
        Commands::Status => {
            let resolved = ChefaiConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = status_cmd::run_status(&db_pool).await;
            db_pool.close().await;
            result?;
        }
        Commands::Show { post_id } => {
            let resolved = ChefaiConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = show_cmd::run_show(&db_pool, &post_id).await;
            db_pool.close().await;
            result?;
        }
        Commands::Schema { post_id } => {
            let resolved = ChefaiConfig::resolve(cli.database_url.as_deref())?;
            let db_pool = pool::create_pool(&resolved.db_config).await?;
            let result = schema_cmd::run_schema(&db_pool, &post_id).await;
            db_pool.close().await;
            result?;
        }
        Commands::Settings { command } => match command {
            SettingsCommands::Show => settings_cmd::run_show()?,
            SettingsCommands::Set { key, value } => settings_cmd::run_set(&key, &value)?,
        },
    }

    Ok(())
}
