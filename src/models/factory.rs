use anyhow::Result;
use tracing::info;

use super::gemini::GeminiModel;
use super::traits::Generator;
use crate::app::{Config, ModelSettings};

/// Factory for creating generator instances from configuration
pub struct ModelFactory;

impl ModelFactory {
    /// Create the configured generator
    ///
    /// A missing key is not an error here; the generator reports it on first use.
    pub fn create(config: &Config) -> Result<Box<dyn Generator>> {
        let api_key = Self::resolve_api_key(&config.model);
        if api_key.is_none() {
            info!(
                "no API key found in {} or config; answers will carry a warning",
                config.model.api_key_env
            );
        }

        let model = GeminiModel::new(&config.model, api_key)?;
        info!(model = model.name(), "generator ready");
        Ok(Box::new(model))
    }

    /// Environment variable first, then the inline config value
    pub fn resolve_api_key(settings: &ModelSettings) -> Option<String> {
        std::env::var(&settings.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| settings.api_key.clone().filter(|k| !k.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_key_used_when_env_missing() {
        let settings = ModelSettings {
            api_key_env: "GENFIN_TEST_UNSET_KEY_VAR".to_string(),
            api_key: Some("inline-key".to_string()),
            ..ModelSettings::default()
        };

        assert_eq!(
            ModelFactory::resolve_api_key(&settings).as_deref(),
            Some("inline-key")
        );
    }

    #[test]
    fn test_blank_keys_ignored() {
        let settings = ModelSettings {
            api_key_env: "GENFIN_TEST_UNSET_KEY_VAR".to_string(),
            api_key: Some("  ".to_string()),
            ..ModelSettings::default()
        };

        assert_eq!(ModelFactory::resolve_api_key(&settings), None);
    }

    #[test]
    fn test_create_without_key_succeeds() {
        let mut config = Config::default();
        config.model.api_key_env = "GENFIN_TEST_UNSET_KEY_VAR".to_string();

        assert!(ModelFactory::create(&config).is_ok());
    }
}
