//! Client configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use volunteer_api::{Endpoints, DEFAULT_BASE_URL};

use crate::error::CoreError;
use crate::Result;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the marketplace API
    pub api_base_url: String,
    /// Path to the local key-value database
    pub database_path: PathBuf,
    /// Per-request timeout
    pub request_timeout_secs: u64,
    /// Events shown per page in the activity feed
    pub page_size: usize,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            api_base_url: DEFAULT_BASE_URL.to_string(),
            database_path: data_dir.join("volunteer.db"),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("volunteer"))
            .unwrap_or_else(|| PathBuf::from(".volunteer"))
    }

    /// Read a TOML config file. Missing keys take their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&raw)
            .map_err(|e| CoreError::Config(format!("{}: {e}", path.display())))?;

        config.validate()?;
        Ok(config)
    }

    /// Defaults overlaid with `VOLUNTEER_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("VOLUNTEER_API_URL") {
            self.api_base_url = url;
        }
        if let Some(path) = lookup("VOLUNTEER_DB_PATH") {
            self.database_path = PathBuf::from(path);
        }
        if let Some(raw) = lookup("VOLUNTEER_TIMEOUT_SECS") {
            self.request_timeout_secs = raw.trim().parse().map_err(|_| {
                CoreError::Config(format!("VOLUNTEER_TIMEOUT_SECS is not a number: {raw}"))
            })?;
        }
        if let Some(raw) = lookup("VOLUNTEER_PAGE_SIZE") {
            self.page_size = raw.trim().parse().map_err(|_| {
                CoreError::Config(format!("VOLUNTEER_PAGE_SIZE is not a number: {raw}"))
            })?;
        }

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        Endpoints::new(&self.api_base_url).map_err(|e| CoreError::Config(e.to_string()))?;

        if self.request_timeout_secs == 0 {
            return Err(CoreError::Config(
                "request timeout must be at least one second".to_string(),
            ));
        }
        if self.page_size == 0 {
            return Err(CoreError::Config("page size must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::new(PathBuf::from("/tmp/data"));
        assert_eq!(config.api_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.database_path, PathBuf::from("/tmp/data/volunteer.db"));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.page_size, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("VOLUNTEER_API_URL", "http://localhost:3000"),
            ("VOLUNTEER_PAGE_SIZE", "5"),
        ]
        .into_iter()
        .collect();

        let config = Config::new(PathBuf::from("/tmp"))
            .with_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert_eq!(config.page_size, 5);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_bad_overrides_are_rejected() {
        let err = Config::new(PathBuf::from("/tmp"))
            .with_overrides(|key| (key == "VOLUNTEER_TIMEOUT_SECS").then(|| "soon".to_string()))
            .unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));

        let err = Config::new(PathBuf::from("/tmp"))
            .with_overrides(|key| (key == "VOLUNTEER_API_URL").then(|| "nowhere".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("Invalid URL"));

        let err = Config::new(PathBuf::from("/tmp"))
            .with_overrides(|key| (key == "VOLUNTEER_PAGE_SIZE").then(|| "0".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("page size"));
    }

    #[test]
    fn test_load_toml_with_partial_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("volunteer.toml");
        std::fs::write(
            &path,
            "api_base_url = \"https://api.example.org\"\npage_size = 20\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.api_base_url, "https://api.example.org");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "page_size = [").unwrap();

        assert!(matches!(Config::load(&path), Err(CoreError::Config(_))));
    }
}
