use std::path::PathBuf;

use s3viewer::client::TransportSettings;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    IOError(#[from] std::io::Error),
    #[error("Home directory not found")]
    HomeDirNotFound,
    #[error(transparent)]
    TomlParse(#[from] toml::de::Error),
}
/// Contents of `config.toml`. Every key is optional.
///
/// ```toml
/// max_pages = 5
///
/// [transport]
/// connect_timeout_secs = 10
/// request_timeout_secs = 20
/// accept_invalid_certs = true
/// user_agent = "Mozilla/5.0"
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub transport: TransportSettings,
    /// Used when `--max-pages` is not given
    pub max_pages: Option<i64>,
}
/// Loads `config.toml` from [home_dir]. A missing file means defaults.
pub fn load_config() -> Result<Config, ConfigError> {
    let config_path = home_dir()?.join("config.toml");
    if !config_path.exists() {
        debug!(?config_path, "No config file, using defaults");
        return Ok(Config::default());
    }
    let config_content = std::fs::read_to_string(&config_path)?;
    let config = toml::from_str(&config_content)?;
    debug!(?config_path, ?config, "Loaded config");
    Ok(config)
}

/// `$S3VIEWER_HOME` or `~/.s3viewer`
fn home_dir() -> Result<PathBuf, ConfigError> {
    if let Some(dir) = std::env::var_os("S3VIEWER_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home_dir = std::env::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
    Ok(home_dir.join(".s3viewer"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config() {
        let config: Config = toml::from_str(
            r#"
max_pages = 5

[transport]
request_timeout_secs = 20
"#,
        )
        .unwrap();
        assert_eq!(config.max_pages, Some(5));
        assert_eq!(config.transport.request_timeout_secs, 20);
        assert_eq!(config.transport.connect_timeout_secs, 30);
        assert!(config.transport.accept_invalid_certs);
    }

    #[test]
    fn empty_config_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }
}
