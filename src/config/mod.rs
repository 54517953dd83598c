//! Configuration management for snapquiz

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::groq::GroqModel;
use crate::theme::Theme;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Vision-capable model used for page transcription
    pub vision_model: GroqModel,

    /// Text model used for structured generation
    pub logic_model: GroqModel,

    /// Max tokens per upstream call
    pub max_tokens: u32,

    /// Temperature for the structured-generation step; kept low to bias
    /// toward well-formed JSON over creativity
    pub temperature: f32,

    /// Per-call timeout for upstream requests, in seconds
    pub request_timeout_secs: u64,

    /// Retries per upstream call for transient failures
    pub max_retries: u32,

    /// Base retry backoff in milliseconds, doubled per attempt
    pub retry_backoff_ms: u64,

    /// Port the HTTP API listens on
    pub port: u16,

    /// Deployment host whose subdomains may call the API cross-origin
    pub trusted_origin_suffix: String,

    /// Selected theme name
    pub theme: String,

    /// Custom theme overrides (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_theme: Option<Theme>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vision_model: GroqModel::Llama4Scout,
            logic_model: GroqModel::Llama33Versatile,
            max_tokens: 4096,
            temperature: 0.4,
            request_timeout_secs: 120,
            max_retries: 2,
            retry_backoff_ms: 500,
            port: 3001,
            trusted_origin_suffix: "vercel.app".to_string(),
            theme: "Midnight".to_string(),
            custom_theme: None,
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "snapquiz").context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Upstream request timeout as a [`Duration`]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Get the active theme
    pub fn active_theme(&self) -> Theme {
        self.custom_theme.clone().unwrap_or_else(Theme::midnight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_the_two_stage_models() {
        let config = Config::default();
        assert_eq!(config.vision_model, GroqModel::Llama4Scout);
        assert_eq!(config.logic_model, GroqModel::Llama33Versatile);
        assert!(config.vision_model.supports_vision());
    }

    #[test]
    fn default_temperature_is_low() {
        let config = Config::default();
        assert!((config.temperature - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn config_serializes_to_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("vercel.app"));
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let json = r#"{"port": 8080}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.trusted_origin_suffix, "vercel.app");
    }

    #[test]
    fn config_round_trips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = Config::default();
        config.port = 4000;
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded: Config =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.port, 4000);
    }
}
