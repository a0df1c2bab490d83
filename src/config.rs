// Site configuration options
use crate::catalog::Coordinates;
use crate::locale::Locale;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub center: Coordinates,
    pub zoom: u8,
    pub marker_icon: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: Coordinates {
                lat: 10.224,
                lng: 103.965,
            },
            zoom: 10,
            marker_icon: "https://maps.google.com/mapfiles/ms/icons/blue-dot.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub supported: bool,
    // How the simulated permission prompt is answered
    pub grant_on_request: bool,
    pub icon: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            supported: true,
            grant_on_request: true,
            icon: "https://via.placeholder.com/32?text=PQ".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub default_locale: Locale,
    // Used when an item has no text for the active locale
    pub fallback_locale: Locale,
    // None keeps the logs in memory
    pub storage_dir: Option<PathBuf>,
    pub chat_reply_delay_ms: u64,
    pub content_latency_ms: u64,
    pub share_base_url: String,
    pub currency_symbol: String,
    pub map: MapConfig,
    pub notifications: NotificationConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_locale: Locale::En,
            fallback_locale: Locale::En,
            storage_dir: None,
            chat_reply_delay_ms: 1000,
            content_latency_ms: 0,
            share_base_url: "https://twitter.com/intent/tweet".to_string(),
            currency_symbol: "$".to_string(),
            map: MapConfig::default(),
            notifications: NotificationConfig::default(),
        }
    }
}

impl SiteConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn chat_reply_delay(&self) -> Duration {
        Duration::from_millis(self.chat_reply_delay_ms)
    }

    pub fn content_latency(&self) -> Duration {
        Duration::from_millis(self.content_latency_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = SiteConfig::from_json_str("{}").unwrap();
        assert_eq!(config.default_locale, Locale::En);
        assert_eq!(config.fallback_locale, Locale::En);
        assert_eq!(config.chat_reply_delay(), Duration::from_secs(1));
        assert_eq!(config.map.zoom, 10);
        assert!(config.storage_dir.is_none());
    }

    #[test]
    fn test_partial_override() {
        let config = SiteConfig::from_json_str(
            r#"{"default_locale":"vi","map":{"zoom":12},"notifications":{"grant_on_request":false}}"#,
        )
        .unwrap();
        assert_eq!(config.default_locale, Locale::Vi);
        assert_eq!(config.map.zoom, 12);
        assert_eq!(config.map.center.lat, 10.224);
        assert!(config.notifications.supported);
        assert!(!config.notifications.grant_on_request);
    }

    #[test]
    fn test_unknown_locale_rejected() {
        assert!(matches!(
            SiteConfig::from_json_str(r#"{"default_locale":"fr"}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        std::fs::write(&path, r#"{"currency_symbol":"₫"}"#).unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.currency_symbol, "₫");

        assert!(matches!(
            SiteConfig::load(dir.path().join("missing.json")),
            Err(ConfigError::Read { .. })
        ));
    }
}
