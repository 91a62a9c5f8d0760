//! Configuration file management for chefai.
//!
//! Provides a TOML-based config file at `~/.config/chefai/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use chefai_core::generator::DEFAULT_EDIT_LINK_TEMPLATE;
use chefai_core::llm::LlmConfig;
use chefai_core::roles::{Operator, Role};
use chefai_core::settings::{ApiSettings, FrontendSettings, Settings};
use chefai_db::config::DbConfig;

/// Environment variable that overrides `[api] llm_api_key`.
pub const API_KEY_ENV_VAR: &str = "CHEFAI_LLM_API_KEY";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub database: DatabaseSection,
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub site: SiteSection,
    #[serde(default)]
    pub operator: OperatorSection,
    #[serde(default)]
    pub frontend: FrontendSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: DbConfig::DEFAULT_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSection {
    /// Edit-link template; `{id}` is replaced by the new post's ID.
    pub edit_link_template: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            edit_link_template: DEFAULT_EDIT_LINK_TEMPLATE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatorSection {
    pub user_id: i64,
    pub role: Role,
}

impl Default for OperatorSection {
    fn default() -> Self {
        Self {
            user_id: 1,
            role: Role::Administrator,
        }
    }
}

impl ConfigFile {
    /// The sanitized settings held in this file.
    pub fn settings(&self) -> Settings {
        let mut settings = Settings {
            api: self.api.clone(),
            frontend: self.frontend.clone(),
        };
        settings.sanitize();
        settings
    }

    /// Replace the settings sections with `settings`.
    pub fn set_settings(&mut self, settings: Settings) {
        self.api = settings.api;
        self.frontend = settings.frontend;
    }

    pub fn operator(&self) -> Operator {
        Operator::new(self.operator.user_id, self.operator.role)
    }
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the chefai config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/chefai` or `~/.config/chefai`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("chefai");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("chefai")
}

/// Return the path to the chefai config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Load the config file, or the defaults if there is none yet.
pub fn load_config_or_default() -> Result<ConfigFile> {
    if config_path().exists() {
        load_config()
    } else {
        Ok(ConfigFile::default())
    }
}

/// Serialize and write the config file, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    // API keys live in this file.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct ChefaiConfig {
    pub db_config: DbConfig,
    pub settings: Settings,
    pub llm: LlmConfig,
    pub edit_link_template: String,
    pub operator: Operator,
}

impl ChefaiConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - DB URL: `cli_db_url` > `CHEFAI_DATABASE_URL` env > `[database] url` > `DbConfig::DEFAULT_URL`
    /// - LLM API key: `CHEFAI_LLM_API_KEY` env > `[api] llm_api_key` > empty
    ///
    /// A config file that exists but does not parse is an error; a missing
    /// one means defaults.
    pub fn resolve(cli_db_url: Option<&str>) -> Result<Self> {
        let file_config = load_config_or_default()?;

        let db_url = if let Some(url) = cli_db_url {
            url.to_string()
        } else if let Ok(url) = std::env::var(DbConfig::ENV_VAR) {
            url
        } else {
            file_config.database.url.clone()
        };

        let mut settings = file_config.settings();
        if let Ok(key) = std::env::var(API_KEY_ENV_VAR) {
            settings.api.llm_api_key = key.trim().to_string();
        }

        Ok(Self {
            db_config: DbConfig::new(db_url),
            settings,
            llm: file_config.llm.clone(),
            edit_link_template: file_config.site.edit_link_template.clone(),
            operator: file_config.operator(),
        })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
