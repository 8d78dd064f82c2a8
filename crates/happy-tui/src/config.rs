// ABOUTME: Configuration file handling.
// ABOUTME: TOML config with env var and .env support; CLI flags win over everything.

use std::path::{Path, PathBuf};
use std::time::Duration;

use happy_client::{
    default_session_id, FileSessionStorage, MemoryStorage, SessionStorage, DEFAULT_BASE_URL,
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Session id that keeps state in memory only.
pub const EPHEMERAL_SESSION: &str = "none";

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// Session id; defaults to the parent process id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Directory holding session files; defaults to the runtime/temp dir.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl SessionConfig {
    pub fn session_id(&self) -> String {
        self.id.clone().unwrap_or_else(default_session_id)
    }

    pub fn is_ephemeral(&self) -> bool {
        self.id.as_deref() == Some(EPHEMERAL_SESSION)
    }

    pub fn file_storage(&self) -> FileSessionStorage {
        FileSessionStorage::for_session(self.dir.as_deref(), &self.session_id())
    }

    /// Storage backing this session: in memory for `none`, a file otherwise.
    pub fn open_storage(&self) -> Box<dyn SessionStorage> {
        if self.is_ephemeral() {
            Box::new(MemoryStorage::new())
        } else {
            Box::new(self.file_storage())
        }
    }
}

/// Values given on the command line.
#[derive(Debug, Default, Clone)]
pub struct Overrides<'a> {
    pub api_url: Option<&'a str>,
    pub session: Option<&'a str>,
}

impl Config {
    /// Load config with precedence: CLI > env > .env > file > defaults
    pub fn load(overrides: &Overrides<'_>) -> Result<Self> {
        // Load .env file if present (silently ignore if missing)
        let _ = dotenvy::dotenv();

        let config = Self::load_from_file(&Self::config_path()?)?;
        config.with_overrides(|key| std::env::var(key).ok(), overrides)
    }

    /// Layer environment values and CLI overrides on top of `self`, then validate.
    pub fn with_overrides(
        mut self,
        env: impl Fn(&str) -> Option<String>,
        overrides: &Overrides<'_>,
    ) -> Result<Self> {
        if let Some(url) = env("HAPPY_THOUGHTS_API_URL") {
            self.api.base_url = url;
        }
        if let Some(secs) = env("HAPPY_THOUGHTS_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) => self.api.timeout_secs = secs,
                Err(_) => {
                    tracing::warn!(value = %secs, "Ignoring invalid HAPPY_THOUGHTS_TIMEOUT_SECS")
                }
            }
        }
        if let Some(id) = env("HAPPY_THOUGHTS_SESSION") {
            self.session.id = Some(id);
        }
        if let Some(dir) = env("HAPPY_THOUGHTS_SESSION_DIR") {
            self.session.dir = Some(PathBuf::from(dir));
        }

        if let Some(url) = overrides.api_url {
            self.api.base_url = url.to_string();
        }
        if let Some(id) = overrides.session {
            self.session.id = Some(id.to_string());
        }

        self.api.base_url = normalize_base_url(&self.api.base_url)?;
        Ok(self)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AppError::Config("Could not find config directory".to_string()))?;
        Ok(config_dir.join("happy-thoughts").join("config.toml"))
    }
}

/// Accept `host`, `host:port` or a full http(s) URL; return it without a trailing slash.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(AppError::Config("api.base_url is empty".into()));
    }

    let with_scheme = if raw.contains("://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    };

    let url = Url::parse(&with_scheme)
        .map_err(|e| AppError::Config(format!("Invalid API URL '{}': {}", raw, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::Config(format!(
            "API URL must use http or https, got '{}'",
            url.scheme()
        )));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_api_config_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "https://wen-happy-thoughts-api.onrender.com");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_zero_timeout_is_clamped() {
        let config = ApiConfig {
            timeout_secs: 0,
            ..ApiConfig::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(1));
    }

    #[test]
    fn test_default_config_toml() {
        let toml = toml::to_string_pretty(&Config::default()).unwrap();
        assert!(toml.contains("[api]"));
        assert!(toml.contains("base_url = \"https://wen-happy-thoughts-api.onrender.com\""));
        assert!(toml.contains("timeout_secs = 30"));
        assert!(!toml.contains("id ="));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from_file(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[session]\nid = \"work\"\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.api, ApiConfig::default());
        assert_eq!(config.session.id.as_deref(), Some("work"));
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\nbase_url = 3").unwrap();
        assert!(matches!(
            Config::load_from_file(&path),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_rendered_config_reloads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.api.timeout_secs = 5;
        config.session.dir = Some(dir.path().join("sessions"));

        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(Config::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_env_overrides_file() {
        let env = env_from(&[
            ("HAPPY_THOUGHTS_API_URL", "http://localhost:8080/"),
            ("HAPPY_THOUGHTS_TIMEOUT_SECS", "7"),
            ("HAPPY_THOUGHTS_SESSION", "tab-2"),
            ("HAPPY_THOUGHTS_SESSION_DIR", "/tmp/happy"),
        ]);
        let config = Config::default()
            .with_overrides(env, &Overrides::default())
            .unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.timeout_secs, 7);
        assert_eq!(config.session.id.as_deref(), Some("tab-2"));
        assert_eq!(config.session.dir, Some(PathBuf::from("/tmp/happy")));
    }

    #[test]
    fn test_invalid_timeout_env_is_ignored() {
        let env = env_from(&[("HAPPY_THOUGHTS_TIMEOUT_SECS", "soon")]);
        let config = Config::default()
            .with_overrides(env, &Overrides::default())
            .unwrap();
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_cli_overrides_env() {
        let env = env_from(&[
            ("HAPPY_THOUGHTS_API_URL", "http://from-env:1"),
            ("HAPPY_THOUGHTS_SESSION", "env-session"),
        ]);
        let overrides = Overrides {
            api_url: Some("http://from-cli:2"),
            session: Some("cli-session"),
        };
        let config = Config::default().with_overrides(env, &overrides).unwrap();
        assert_eq!(config.api.base_url, "http://from-cli:2");
        assert_eq!(config.session.id.as_deref(), Some("cli-session"));
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("example.com").unwrap(),
            "https://example.com"
        );
        assert_eq!(
            normalize_base_url(" http://localhost:3000/ ").unwrap(),
            "http://localhost:3000"
        );
        assert_eq!(
            normalize_base_url("https://example.com/api/").unwrap(),
            "https://example.com/api"
        );
        assert!(normalize_base_url("").is_err());
        assert!(normalize_base_url("ftp://example.com").is_err());
    }

    #[test]
    fn test_ephemeral_session() {
        let session = SessionConfig {
            id: Some(EPHEMERAL_SESSION.to_string()),
            dir: None,
        };
        assert!(session.is_ephemeral());
        assert!(!SessionConfig::default().is_ephemeral());
    }

    #[test]
    fn test_file_storage_uses_configured_dir() {
        let dir = TempDir::new().unwrap();
        let session = SessionConfig {
            id: Some("abc".to_string()),
            dir: Some(dir.path().to_path_buf()),
        };
        assert_eq!(session.file_storage().path(), dir.path().join("abc.json"));
    }
}
