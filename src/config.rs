//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub font: FontConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8501
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// What to do when the font cannot be fetched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontFallback {
    /// Abort startup
    #[default]
    Fail,
    /// Continue with the browser's default sans-serif font
    System,
}

impl std::str::FromStr for FontFallback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fail" => Ok(FontFallback::Fail),
            "system" => Ok(FontFallback::System),
            other => Err(format!("unknown font fallback: {}", other)),
        }
    }
}

/// Font bootstrap configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FontConfig {
    /// Local font file, checked before downloading
    #[serde(default = "default_font_path")]
    pub path: PathBuf,

    #[serde(default = "default_font_url")]
    pub url: String,

    /// Family name the charts and the page refer to
    #[serde(default = "default_font_family")]
    pub family: String,

    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    #[serde(default)]
    pub fallback: FontFallback,
}

fn default_font_path() -> PathBuf {
    PathBuf::from("NanumGothic.ttf")
}

fn default_font_url() -> String {
    "https://github.com/google/fonts/raw/main/ofl/nanumgothic/NanumGothic-Regular.ttf".to_string()
}

fn default_font_family() -> String {
    "NanumGothic".to_string()
}

fn default_fetch_timeout() -> u64 {
    30
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            path: default_font_path(),
            url: default_font_url(),
            family: default_font_family(),
            fetch_timeout_secs: default_fetch_timeout(),
            fallback: FontFallback::default(),
        }
    }
}

impl FontConfig {
    /// Config for a font file at `path`, other fields default
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    pub fn fetch_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "snowdash=info,tower_http=info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    ///
    /// Runs before logging is initialized, so problems are reported on stderr.
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("snowdash").join("config.toml")),
            Some(PathBuf::from("/etc/snowdash/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => return config,
                    Err(e) => eprintln!("warning: {}", e),
                }
            }
        }

        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Server overrides
        if let Ok(host) = std::env::var("SNOWDASH_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("SNOWDASH_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        // Font overrides
        if let Ok(path) = std::env::var("SNOWDASH_FONT_PATH") {
            self.font.path = PathBuf::from(path);
        }
        if let Ok(url) = std::env::var("SNOWDASH_FONT_URL") {
            self.font.url = url;
        }
        if let Ok(fallback) = std::env::var("SNOWDASH_FONT_FALLBACK") {
            if let Ok(f) = fallback.parse() {
                self.font.fallback = f;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("SNOWDASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SNOWDASH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Snowdash Configuration
#
# Environment variables override these settings:
# - SNOWDASH_HOST
# - SNOWDASH_PORT
# - SNOWDASH_FONT_PATH
# - SNOWDASH_FONT_URL
# - SNOWDASH_FONT_FALLBACK
# - SNOWDASH_LOG_LEVEL
# - SNOWDASH_LOG_FORMAT

[server]
# Dashboard host
host = "0.0.0.0"

# Dashboard port
port = 8501

[font]
# Local font file; downloaded from `url` when missing
path = "NanumGothic.ttf"

# Where to download the font from
url = "https://github.com/google/fonts/raw/main/ofl/nanumgothic/NanumGothic-Regular.ttf"

# Family name used by the charts and the page
family = "NanumGothic"

# Download timeout in seconds
fetch_timeout_secs = 30

# On download failure: "fail" (abort startup) or "system" (browser default font)
fallback = "fail"

[logging]
# Log filter, e.g. "info" or "snowdash=debug,tower_http=info"
level = "snowdash=info,tower_http=info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8501);
        assert_eq!(config.font.path, PathBuf::from("NanumGothic.ttf"));
        assert_eq!(config.font.fallback, FontFallback::Fail);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config = Config::parse(&generate_default_config()).unwrap();
        let defaults = Config::default();

        assert_eq!(config.server.addr(), defaults.server.addr());
        assert_eq!(config.font.url, defaults.font.url);
        assert_eq!(config.font.family, defaults.font.family);
        assert_eq!(config.font.fetch_timeout_secs, defaults.font.fetch_timeout_secs);
        assert_eq!(config.logging.level, defaults.logging.level);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = Config::parse(
            r#"
            [font]
            path = "/tmp/fonts/custom.ttf"
            fallback = "system"
            "#,
        )
        .unwrap();

        assert_eq!(config.font.path, PathBuf::from("/tmp/fonts/custom.ttf"));
        assert_eq!(config.font.fallback, FontFallback::System);
        assert_eq!(config.font.family, "NanumGothic");
        assert_eq!(config.server.port, 8501);
    }

    #[test]
    fn test_invalid_fallback_rejected() {
        assert!(Config::parse("[font]\nfallback = \"maybe\"\n").is_err());
        assert!("maybe".parse::<FontFallback>().is_err());
        assert_eq!("SYSTEM".parse::<FontFallback>(), Ok(FontFallback::System));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/snowdash.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    // The only test touching SNOWDASH_* variables; keep it that way, the
    // process environment is shared between test threads.
    #[test]
    fn test_env_overrides() {
        const VARS: [&str; 7] = [
            "SNOWDASH_HOST",
            "SNOWDASH_PORT",
            "SNOWDASH_FONT_PATH",
            "SNOWDASH_FONT_URL",
            "SNOWDASH_FONT_FALLBACK",
            "SNOWDASH_LOG_LEVEL",
            "SNOWDASH_LOG_FORMAT",
        ];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9000\n\n[font]\nfallback = \"fail\"\n").unwrap();

        std::env::set_var("SNOWDASH_HOST", "127.0.0.1");
        std::env::set_var("SNOWDASH_PORT", "9100");
        std::env::set_var("SNOWDASH_FONT_PATH", "/srv/fonts/Nanum.ttf");
        std::env::set_var("SNOWDASH_FONT_URL", "http://fonts.internal/Nanum.ttf");
        std::env::set_var("SNOWDASH_FONT_FALLBACK", "system");
        std::env::set_var("SNOWDASH_LOG_LEVEL", "snowdash=debug");
        std::env::set_var("SNOWDASH_LOG_FORMAT", "json");

        let config = Config::load_with_env(&path).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.font.path, PathBuf::from("/srv/fonts/Nanum.ttf"));
        assert_eq!(config.font.url, "http://fonts.internal/Nanum.ttf");
        assert_eq!(config.font.fallback, FontFallback::System);
        assert_eq!(config.logging.level, "snowdash=debug");
        assert_eq!(config.logging.format, "json");

        // Unparseable values keep what the file says
        for var in VARS {
            std::env::remove_var(var);
        }
        std::env::set_var("SNOWDASH_PORT", "not-a-port");
        std::env::set_var("SNOWDASH_FONT_FALLBACK", "maybe");

        let config = Config::load_with_env(&path).unwrap();
        for var in VARS {
            std::env::remove_var(var);
        }

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.font.fallback, FontFallback::Fail);
        assert_eq!(config.font.path, PathBuf::from("NanumGothic.ttf"));
    }
}
