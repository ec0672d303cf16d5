use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    CONFIG_APP_NAME, DEFAULT_API_KEY_ENV, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL,
    ENV_PREFIX, LOCAL_CONFIG_PATH,
};
use crate::utils::GenFinError;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Generation model configuration
    #[serde(default)]
    pub model: ModelSettings,

    /// UI configuration
    #[serde(default)]
    pub ui: UIConfig,
}

/// Generation model settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    /// Gemini model identifier
    pub name: String,
    /// Environment variable containing the API key
    pub api_key_env: String,
    /// Inline API key, used when the environment variable is unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// API base URL
    pub base_url: String,
    /// Temperature for generation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    /// HTTP timeout; unset means wait for as long as the service takes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_GEMINI_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            temperature: None,
            max_output_tokens: None,
            timeout_secs: None,
        }
    }
}

/// UI configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UIConfig {
    /// Show chat history sidebar by default
    pub show_sidebar: bool,
    /// Show the quotes band under the header
    pub show_quotes: bool,
}

impl Default for UIConfig {
    fn default() -> Self {
        Self {
            show_sidebar: true,
            show_quotes: true,
        }
    }
}

/// Load configuration from multiple sources
pub fn load_config() -> Result<Config> {
    let global_config = get_config_dir()?.join("config.toml");
    let local_config = PathBuf::from(LOCAL_CONFIG_PATH);

    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if global_config.exists() {
        figment = figment.merge(Toml::file(&global_config));
    }

    if local_config.exists() {
        figment = figment.merge(Toml::file(&local_config));
    }

    extract(figment)
}

/// Load configuration from an explicit file, skipping discovery
pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(GenFinError::ConfigError(format!(
            "Config file not found: {}",
            path.display()
        ))
        .into());
    }

    let figment = Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(path));
    extract(figment)
}

fn extract(figment: Figment) -> Result<Config> {
    // GENFIN_MODEL__NAME=gemini-1.5-flash -> model.name
    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .context("Failed to load configuration")
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", CONFIG_APP_NAME) {
        let config_dir = proj_dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;
        Ok(config_dir.to_path_buf())
    } else {
        // Fallback to home directory
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        let config_dir = PathBuf::from(home).join(".config").join(CONFIG_APP_NAME);
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }
}

/// Save configuration to file
pub fn save_config(config: &Config, path: Option<PathBuf>) -> Result<()> {
    let path = if let Some(p) = path {
        p
    } else {
        get_config_dir()?.join("config.toml")
    };

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Create a default configuration file if it doesn't exist
pub fn init_config() -> Result<Vec<PathBuf>> {
    let mut created = Vec::new();
    let config_file = get_config_dir()?.join("config.toml");

    if !config_file.exists() {
        save_config(&Config::default(), Some(config_file.clone()))?;
        created.push(config_file);
    }

    let local_example = PathBuf::from(format!("{LOCAL_CONFIG_PATH}.example"));
    if !local_example.exists() {
        if let Some(parent) = local_example.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let example_config = r#"# GenFin Project Configuration
# This file overrides global settings when genfin runs from this directory

[model]
name = "gemini-1.5-pro"
api_key_env = "GEMINI_API_KEY"
# temperature = 0.4
# max_output_tokens = 2048
# timeout_secs = 120

[ui]
show_sidebar = true
show_quotes = true
"#;
        std::fs::write(&local_example, example_config)?;
        created.push(local_example);
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.model.name, "gemini-1.5-pro");
        assert_eq!(config.model.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.model.timeout_secs, None);
        assert!(config.ui.show_sidebar);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "[model]\nname = \"gemini-1.5-flash\"\ntemperature = 0.25\n\n[ui]\nshow_quotes = false\n",
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.model.name, "gemini-1.5-flash");
        assert_eq!(config.model.temperature, Some(0.25));
        assert_eq!(config.model.base_url, DEFAULT_GEMINI_BASE_URL);
        assert!(!config.ui.show_quotes);
        assert!(config.ui.show_sidebar);
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("saved.toml");

        let mut config = Config::default();
        config.model.max_output_tokens = Some(1024);
        config.ui.show_sidebar = false;
        save_config(&config, Some(path.clone())).unwrap();

        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let err = load_config_from(&temp.path().join("nope.toml")).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<GenFinError>(),
            Some(GenFinError::ConfigError(msg)) if msg.contains("nope.toml")
        ));
    }
}
