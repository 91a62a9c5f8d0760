//! Operator-editable settings and their sanitization.
//!
//! Storage is the CLI config file; this module only defines the values and
//! the rules applied whenever one is written.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sanitize::{sanitize_hex_color, sanitize_text_field};

/// Default front-end accent colour.
pub const DEFAULT_PRIMARY_COLOR: &str = "#0073aa";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("unknown setting {0:?} (expected llm_api_key, youtube_api_key, image_api_key, or primary_color)")]
    UnknownKey(String),

    #[error("invalid colour {0:?} (expected #rgb or #rrggbb)")]
    InvalidColor(String),
}

/// API credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    pub llm_api_key: String,
    pub youtube_api_key: String,
    pub image_api_key: String,
}

/// Front-end appearance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendSettings {
    pub primary_color: String,
}

impl Default for FrontendSettings {
    fn default() -> Self {
        Self {
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
        }
    }
}

/// All settings, grouped by section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api: ApiSettings,
    pub frontend: FrontendSettings,
}

/// Names accepted by [`Settings::set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    LlmApiKey,
    YoutubeApiKey,
    ImageApiKey,
    PrimaryColor,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        Self::LlmApiKey,
        Self::YoutubeApiKey,
        Self::ImageApiKey,
        Self::PrimaryColor,
    ];

    /// Whether the value should be masked when displayed.
    pub fn is_secret(self) -> bool {
        !matches!(self, Self::PrimaryColor)
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::LlmApiKey => "llm_api_key",
            Self::YoutubeApiKey => "youtube_api_key",
            Self::ImageApiKey => "image_api_key",
            Self::PrimaryColor => "primary_color",
        };
        f.write_str(s)
    }
}

impl FromStr for SettingKey {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.to_string() == s)
            .ok_or_else(|| SettingsError::UnknownKey(s.to_owned()))
    }
}

impl Settings {
    /// Sanitize every value in place. An invalid colour falls back to
    /// [`DEFAULT_PRIMARY_COLOR`].
    pub fn sanitize(&mut self) {
        self.api.llm_api_key = sanitize_text_field(&self.api.llm_api_key);
        self.api.youtube_api_key = sanitize_text_field(&self.api.youtube_api_key);
        self.api.image_api_key = sanitize_text_field(&self.api.image_api_key);
        self.frontend.primary_color = sanitize_hex_color(&self.frontend.primary_color)
            .unwrap_or_else(|| DEFAULT_PRIMARY_COLOR.to_string());
    }

    /// Set one value after sanitizing it. Unlike [`Settings::sanitize`], an
    /// invalid colour is rejected.
    pub fn set(&mut self, key: SettingKey, value: &str) -> Result<(), SettingsError> {
        match key {
            SettingKey::LlmApiKey => self.api.llm_api_key = sanitize_text_field(value),
            SettingKey::YoutubeApiKey => self.api.youtube_api_key = sanitize_text_field(value),
            SettingKey::ImageApiKey => self.api.image_api_key = sanitize_text_field(value),
            SettingKey::PrimaryColor => {
                self.frontend.primary_color = sanitize_hex_color(value)
                    .ok_or_else(|| SettingsError::InvalidColor(value.to_owned()))?;
            }
        }
        Ok(())
    }

    pub fn get(&self, key: SettingKey) -> &str {
        match key {
            SettingKey::LlmApiKey => &self.api.llm_api_key,
            SettingKey::YoutubeApiKey => &self.api.youtube_api_key,
            SettingKey::ImageApiKey => &self.api.image_api_key,
            SettingKey::PrimaryColor => &self.frontend.primary_color,
        }
    }
}

/// Mask a secret for display, keeping its first four characters.
pub fn mask_secret(value: &str) -> String {
    if value.is_empty() {
        return "(not set)".to_string();
    }
    let visible: String = value.chars().take(4).collect();
    format!("{visible}****")
}
