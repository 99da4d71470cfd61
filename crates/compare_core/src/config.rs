use serde::{Deserialize, Serialize};

const CONFIG_FILE_PATH: &str = "compare.toml";

const DEFAULT_API_BASE: &str = "http://localhost:8000";

/// Client configuration, loaded from `compare.toml` in the working
/// directory and then overridden by environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

/// Environment wins over file and default; empty values are ignored.
fn apply_env_overrides(config: &mut Config, api_base: Option<String>, api_key: Option<String>) {
    if let Some(api_base) = api_base.filter(|value| !value.is_empty()) {
        config.api_base = api_base;
    }
    if let Some(api_key) = api_key.filter(|value| !value.is_empty()) {
        config.api_key = Some(api_key);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        let mut config = Config {
            api_base: default_api_base(),
            api_key: None,
        };

        if std::path::Path::new(CONFIG_FILE_PATH).exists() {
            if let Ok(content) = std::fs::read_to_string(CONFIG_FILE_PATH) {
                if let Ok(file_config) = toml::from_str::<Config>(&content) {
                    config = file_config;
                }
            }
        }

        apply_env_overrides(
            &mut config,
            std::env::var("COMPARE_API_BASE").ok(),
            std::env::var("COMPARE_API_KEY").ok(),
        );
        config
    }

    /// Config with an explicit base URL, bypassing file and environment.
    pub fn with_api_base(api_base: impl Into<String>) -> Self {
        Config {
            api_base: api_base.into(),
            api_key: None,
        }
    }
}
