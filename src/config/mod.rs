mod types;

pub use types::*;

use crate::{Error, Result};
use std::env;
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
    load_from(&config_path).await
}

pub async fn load_from(config_path: &str) -> Result<Config> {
    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(config_path).await?;
    let config: Config = serde_yaml::from_str(&config_str)?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    let base_url = config.backend.base_url.trim();
    if base_url.is_empty() {
        return Err(Error::config("backend.base_url must not be empty"));
    }
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(Error::config(format!(
            "backend.base_url must be an http(s) URL, got '{}'",
            base_url
        )));
    }
    if let Some(field) = config.form.fields.iter().find(|f| f.name.trim().is_empty()) {
        return Err(Error::config(format!(
            "form field names must not be empty (default '{}')",
            field.default
        )));
    }
    Ok(())
}
