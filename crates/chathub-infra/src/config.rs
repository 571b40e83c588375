//! Configuration loader for ChatHub.
//!
//! Reads `config.toml` from the data directory (`~/.chathub/` by default)
//! and deserializes it into [`ChatHubConfig`]. Falls back to defaults when
//! the file is missing or malformed.

use std::path::Path;

use chathub_types::config::ChatHubConfig;

/// Name of the config file inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ChatHubConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config, with defaults for absent fields.
pub async fn load_config(data_dir: &Path) -> ChatHubConfig {
    let config_path = data_dir.join(CONFIG_FILE);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ChatHubConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ChatHubConfig::default();
        }
    };

    match toml::from_str::<ChatHubConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ChatHubConfig::default()
        }
    }
}
