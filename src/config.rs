use crate::fetch::range::RangeToken;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which presentation the widget renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Summary cards plus a minimal trend sparkline.
    Sparkline,
    /// Summary cards plus the stacked views/visitors bar chart.
    Chart,
}

impl DisplayMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sparkline => "sparkline",
            Self::Chart => "chart",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sparkline" => Some(Self::Sparkline),
            "chart" => Some(Self::Chart),
            _ => None,
        }
    }
}

/// Application configuration loaded from environment variables or TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Upstream analytics API key. Empty means unconfigured: the widget
    /// renders a setup notice instead of fetching.
    #[serde(default)]
    pub api_key: String,
    /// Domain whose traffic the widget shows. Empty means unconfigured.
    #[serde(default)]
    pub domain: String,
    #[serde(default = "default_display_mode")]
    pub display_mode: DisplayMode,
    /// Range used when a request does not carry a valid override token.
    #[serde(default = "default_range")]
    pub default_range: RangeToken,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Payload cache TTL in seconds (default: 600). 0 = no caching.
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    /// Upstream request timeout in seconds (default: 12).
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    /// Origin of the host page embedding the widget, for CORS restrictions.
    /// If not set, widget routes allow any origin.
    #[serde(default)]
    pub embed_origin: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

const fn default_display_mode() -> DisplayMode {
    DisplayMode::Sparkline
}

const fn default_range() -> RangeToken {
    RangeToken::SevenDays
}

fn default_api_url() -> String {
    "https://api.withcabin.com/v1/analytics".to_string()
}

const fn default_cache_ttl_secs() -> u64 {
    600
}

const fn default_fetch_timeout_secs() -> u64 {
    12
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            api_key: String::new(),
            domain: String::new(),
            display_mode: default_display_mode(),
            default_range: default_range(),
            api_url: default_api_url(),
            cache_ttl_secs: default_cache_ttl_secs(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            embed_origin: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults.
    ///
    /// Environment variables override file values:
    /// - `CABIN_HOST` → host
    /// - `CABIN_PORT` → port
    /// - `CABIN_API_KEY` → api_key
    /// - `CABIN_DOMAIN` → domain
    /// - `CABIN_DISPLAY_MODE` → display_mode
    /// - `CABIN_DEFAULT_RANGE` → default_range
    /// - `CABIN_API_URL` → api_url
    /// - `CABIN_CACHE_TTL` → cache_ttl_secs
    /// - `CABIN_FETCH_TIMEOUT` → fetch_timeout_secs
    /// - `CABIN_EMBED_ORIGIN` → embed_origin
    pub fn load(config_path: Option<&Path>) -> Self {
        let mut config =
            config_path.map_or_else(Self::default, |path| match std::fs::read_to_string(path) {
                Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                    tracing::warn!("Failed to parse config file: {e}, using defaults");
                    Self::default()
                }),
                Err(e) => {
                    tracing::warn!("Failed to read config file: {e}, using defaults");
                    Self::default()
                }
            });

        // Environment variable overrides
        if let Ok(host) = std::env::var("CABIN_HOST") {
            config.host = host;
        }
        if let Ok(port) = std::env::var("CABIN_PORT") {
            if let Ok(p) = port.parse() {
                config.port = p;
            }
        }
        if let Ok(key) = std::env::var("CABIN_API_KEY") {
            // API keys never contain whitespace; strip stray copy-paste.
            config.api_key = key.split_whitespace().collect();
        }
        if let Ok(domain) = std::env::var("CABIN_DOMAIN") {
            config.domain = domain;
        }
        if let Ok(mode) = std::env::var("CABIN_DISPLAY_MODE") {
            if let Some(m) = DisplayMode::parse(&mode) {
                config.display_mode = m;
            }
        }
        if let Ok(range) = std::env::var("CABIN_DEFAULT_RANGE") {
            if let Some(r) = RangeToken::parse(&range) {
                config.default_range = r;
            }
        }
        if let Ok(url) = std::env::var("CABIN_API_URL") {
            config.api_url = url;
        }
        if let Ok(val) = std::env::var("CABIN_CACHE_TTL") {
            if let Ok(t) = val.parse() {
                config.cache_ttl_secs = t;
            }
        }
        if let Ok(val) = std::env::var("CABIN_FETCH_TIMEOUT") {
            if let Ok(t) = val.parse() {
                config.fetch_timeout_secs = t;
            }
        }
        if let Ok(origin) = std::env::var("CABIN_EMBED_ORIGIN") {
            config.embed_origin = Some(origin);
        }

        config
    }
}
