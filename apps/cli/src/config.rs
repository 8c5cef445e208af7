use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;

pub const DEFAULT_CONFIG_PATH: &str = "faceauth.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_url: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: "http://127.0.0.1:8000/api".into(),
        }
    }
}

/// Defaults, then the config file, then environment variables.
pub fn load_settings(config_path: &Path) -> anyhow::Result<ClientSettings> {
    load_settings_with_env(config_path, |key| std::env::var(key).ok())
}

pub fn load_settings_with_env(
    config_path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    if config_path.exists() {
        let raw = fs::read_to_string(config_path)
            .with_context(|| format!("failed to read config '{}'", config_path.display()))?;
        let file_cfg = toml::from_str::<HashMap<String, String>>(&raw)
            .with_context(|| format!("failed to parse config '{}'", config_path.display()))?;
        if let Some(v) = file_cfg.get("api_url") {
            settings.api_url = v.clone();
        }
    }

    if let Some(v) = env("FACEAUTH_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_url = v;
    }

    Ok(settings)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
