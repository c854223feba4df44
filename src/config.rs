//! Settings file for the gateway.
//!
//! Settings are read from `mockgate.yaml`. Every field is optional.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use crate::catalog::MockCatalog;
use crate::gateway::{Gateway, DEFAULT_BASE_URL, DEFAULT_USER_AGENT};
use crate::profile::Profile;

/// Default settings file names to search for.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["mockgate.yaml", ".mockgate.yaml"];

/// Gateway settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Base URL for requests that do not override it
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Transport timeout in milliseconds (default: 10000)
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Profile to use when MOCKGATE_ENV is unset
    #[serde(default)]
    pub profile: Option<String>,
    /// Catalog file replacing the built-in fixtures. Relative paths are
    /// resolved against the settings file's directory.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            profile: None,
            catalog: None,
        }
    }
}

impl Settings {
    /// Parse settings from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let mut settings: Settings = serde_yaml::from_str(&content)?;

        if let Some(dir) = path.parent() {
            settings.catalog = settings
                .catalog
                .take()
                .map(|c| if c.is_relative() { dir.join(c) } else { c });
        }
        Ok(settings)
    }

    /// Load from an explicit path, else a discovered file, else defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::parse_file(path);
        }
        match discover_config() {
            Some(path) => {
                tracing::debug!(path = %path.display(), "using settings file");
                Self::parse_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Profile from MOCKGATE_ENV, falling back to the settings file.
    pub fn resolve_profile(&self) -> Profile {
        Profile::from_env_or(self.profile.as_deref())
    }

    /// The configured catalog, or the built-in one.
    pub fn load_catalog(&self) -> anyhow::Result<Arc<MockCatalog>> {
        match &self.catalog {
            Some(path) => {
                let catalog = MockCatalog::parse_file(path).map_err(|e| {
                    anyhow::anyhow!("catalog {}: {}", path.display(), e)
                })?;
                Ok(Arc::new(catalog))
            }
            None => Ok(MockCatalog::builtin()),
        }
    }

    /// Build a gateway with the HTTP transport.
    pub fn build_gateway(&self) -> anyhow::Result<Gateway> {
        let profile = self.resolve_profile();
        tracing::debug!(%profile, mocking = profile.mocking_enabled(), "resolved profile");

        let gateway = Gateway::builder()
            .base_url(self.base_url.clone())
            .mocking(profile.mocking_enabled())
            .catalog(self.load_catalog()?)
            .user_agent(self.user_agent.clone())
            .timeout(self.timeout())
            .build()?;
        Ok(gateway)
    }
}

/// Look for a settings file in the current directory, then in the user's
/// config directory.
pub fn discover_config() -> Option<PathBuf> {
    for name in DEFAULT_CONFIG_NAMES {
        let path = PathBuf::from(name);
        if path.exists() {
            return Some(path);
        }
    }

    ProjectDirs::from("", "", "mockgate")
        .map(|dirs| dirs.config_dir().join("mockgate.yaml"))
        .filter(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, "https://dummyjson.com");
        assert_eq!(settings.timeout(), Duration::from_secs(10));
        assert!(settings.user_agent.starts_with("mockgate/"));
        assert!(settings.catalog.is_none());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let settings: Settings = serde_yaml::from_str("timeout_ms: 250\n").unwrap();
        assert_eq!(settings.timeout(), Duration::from_millis(250));
        assert_eq!(settings.base_url, "https://dummyjson.com");
    }

    #[test]
    fn test_relative_catalog_resolved_against_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mockgate.yaml");
        fs::write(&path, "catalog: fixtures/catalog.yaml\nprofile: test\n").unwrap();

        let settings = Settings::parse_file(&path).unwrap();
        assert_eq!(
            settings.catalog,
            Some(dir.path().join("fixtures/catalog.yaml"))
        );
        assert_eq!(settings.profile.as_deref(), Some("test"));
    }

    #[test]
    fn test_load_catalog_default_is_builtin() {
        let catalog = Settings::default().load_catalog().unwrap();
        assert!(catalog.is_mocked("/todos"));
    }

    #[test]
    fn test_load_catalog_reports_path_on_error() {
        let settings = Settings {
            catalog: Some(PathBuf::from("/nonexistent/catalog.yaml")),
            ..Default::default()
        };
        let err = settings.load_catalog().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/catalog.yaml"));
    }
}
