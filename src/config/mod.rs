mod types;

pub use types::*;

use crate::{Error, Result};
use std::{env, path::Path};
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    debug!("Loading configuration from: {}", config_path);

    let mut config = load_from_path(&config_path).await?;
    apply_overrides(&mut config, |key| env::var(key).ok());
    config.validate()?;

    Ok(config)
}

pub async fn load_from_path(path: impl AsRef<Path>) -> Result<Config> {
    let config_str = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;

    Ok(config)
}

/// Applies `LLM_API_KEY` and `LLM_BASE_URL` on top of the file values.
pub fn apply_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(api_key) = lookup("LLM_API_KEY") {
        debug!("Using LLM API key from environment");
        config.llm.api_key = api_key;
    }
    if let Some(base_url) = lookup("LLM_BASE_URL") {
        debug!("Using LLM base URL from environment: {}", base_url);
        config.llm.base_url = base_url;
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        let llm = &self.llm;

        if llm.base_url.trim().is_empty() {
            return Err(Error::config("llm.base_url must not be empty"));
        }
        if llm.model.trim().is_empty() {
            return Err(Error::config("llm.model must not be empty"));
        }
        if !(0.0..=2.0).contains(&llm.temperature) {
            return Err(Error::config(format!(
                "llm.temperature must be within [0, 2], got {}",
                llm.temperature
            )));
        }
        if !(llm.top_p > 0.0 && llm.top_p <= 1.0) {
            return Err(Error::config(format!(
                "llm.top_p must be within (0, 1], got {}",
                llm.top_p
            )));
        }
        if llm.timeout_secs == Some(0) {
            return Err(Error::config("llm.timeout_secs must be greater than 0"));
        }

        Ok(())
    }
}
