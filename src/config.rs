use crate::constants::{
    API_KEY_ENV, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_MODEL, DEFAULT_TYPING_INTERVAL_MS,
    GEMINI_API_URL,
};
use crate::errors::{ChatError, ChatResult};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: String,
    pub model: String,
    pub api_base_url: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub typing_interval_ms: u64,
    pub request_timeout_secs: u64,
    pub log_level: String,
    pub bot_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            api_base_url: GEMINI_API_URL.to_string(),
            temperature: 0.7,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            typing_interval_ms: DEFAULT_TYPING_INTERVAL_MS,
            request_timeout_secs: 60,
            log_level: "info".to_string(),
            bot_name: "chatGPT".to_string(),
        }
    }
}

impl Config {
    pub fn typing_interval(&self) -> Duration {
        Duration::from_millis(self.typing_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Loads the configuration from `~/.config/gemchat/config.json`, writing the
/// defaults there on first run. `GEMINI_API_KEY` overrides the stored key.
pub fn load_config() -> ChatResult<Config> {
    let config_path = get_config_path()?;
    let config = load_from_path(&config_path)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn load_from_path(config_path: &Path) -> ChatResult<Config> {
    let mut config = if config_path.exists() {
        let config_str = fs::read_to_string(config_path)
            .map_err(|e| ChatError::config_error(format!("Failed to read config file: {}", e)))?;

        serde_json::from_str::<Config>(&config_str)
            .map_err(|e| ChatError::config_error(format!("Failed to parse config: {}", e)))?
    } else {
        let config = Config::default();
        save_to_path(&config, config_path)?;
        config
    };

    // Environment wins so keys never have to live in the file
    if let Ok(key) = env::var(API_KEY_ENV) {
        if !key.trim().is_empty() {
            config.api_key = key.trim().to_string();
        }
    }

    Ok(config)
}

fn get_config_path() -> ChatResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| ChatError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("gemchat").join("config.json"))
}

pub fn validate_config(config: &Config) -> ChatResult<()> {
    if config.api_key.trim().is_empty() {
        return Err(ChatError::config_error(format!(
            "API key is required (set {} or edit the config file)",
            API_KEY_ENV
        )));
    }

    if config.model.trim().is_empty() {
        return Err(ChatError::config_error("Model name is required"));
    }

    if !(0.0..=2.0).contains(&config.temperature) {
        return Err(ChatError::config_error(
            "Temperature must be between 0.0 and 2.0",
        ));
    }

    if config.max_output_tokens == 0 {
        return Err(ChatError::config_error(
            "max_output_tokens must be greater than 0",
        ));
    }

    if config.typing_interval_ms == 0 {
        return Err(ChatError::config_error(
            "typing_interval_ms must be greater than 0",
        ));
    }

    Ok(())
}

pub fn save_config(updated_config: &Config) -> ChatResult<()> {
    validate_config(updated_config)?;
    save_to_path(updated_config, &get_config_path()?)
}

fn save_to_path(config: &Config, config_path: &Path) -> ChatResult<()> {
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ChatError::config_error(format!("Failed to create config directory: {}", e))
        })?;
    }

    let config_str = serde_json::to_string_pretty(config)
        .map_err(|e| ChatError::config_error(format!("Failed to serialize config: {}", e)))?;

    fs::write(config_path, config_str)
        .map_err(|e| ChatError::config_error(format!("Failed to write config file: {}", e)))?;

    Ok(())
}
