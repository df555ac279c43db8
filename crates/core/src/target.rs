//! Store target resolution
//!
//! A store is addressed either by an INI configuration file or by a storage
//! URI. For the configuration-file form, the path is resolved in order:
//! `$H3_CONFIG`, `./config.ini`, `~/.h3/config.ini`, and finally the bare
//! `config.ini` literal when no home directory is known.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "H3_CONFIG";

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Per-user configuration directory under the home directory
pub const CONFIG_DIR_NAME: &str = ".h3";

/// What the store is initialized with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreTarget {
    /// INI configuration file selecting a driver and its parameters
    ConfigFile(PathBuf),
    /// Storage URI such as `file:///tmp/h3`
    Uri(String),
}

impl StoreTarget {
    /// Build a URI target, rejecting an empty value
    pub fn uri(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(Error::Usage("A storage URI is required (-s <uri>)".into()));
        }
        Ok(Self::Uri(value))
    }
}

impl std::fmt::Display for StoreTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreTarget::ConfigFile(path) => write!(f, "{}", path.display()),
            StoreTarget::Uri(uri) => write!(f, "{uri}"),
        }
    }
}

/// Inputs to configuration file resolution
///
/// Captured once from the process environment, or built by hand in tests.
#[derive(Debug, Clone, Default)]
pub struct ConfigLookup {
    /// Value of `H3_CONFIG`
    pub env_value: Option<String>,
    /// Current working directory
    pub cwd: Option<PathBuf>,
    /// Home directory
    pub home: Option<PathBuf>,
}

impl ConfigLookup {
    /// Capture the lookup inputs from the running process
    pub fn from_process() -> Self {
        Self {
            env_value: std::env::var(CONFIG_ENV).ok(),
            cwd: std::env::current_dir().ok(),
            home: dirs::home_dir(),
        }
    }

    /// Resolve the configuration file path (first match wins)
    pub fn resolve(&self) -> PathBuf {
        if let Some(value) = self.env_value.as_deref().filter(|v| !v.is_empty()) {
            tracing::debug!(path = value, "configuration file from {CONFIG_ENV}");
            return PathBuf::from(value);
        }

        if let Some(cwd) = &self.cwd
            && is_file_like(&cwd.join(CONFIG_FILE_NAME))
        {
            tracing::debug!("configuration file from working directory");
            return PathBuf::from(CONFIG_FILE_NAME);
        }

        match &self.home {
            Some(home) => home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME),
            None => PathBuf::from(CONFIG_FILE_NAME),
        }
    }
}

/// Exists and is not a directory
fn is_file_like(path: &Path) -> bool {
    std::fs::metadata(path).is_ok_and(|m| !m.is_dir())
}

/// Resolve the configuration file target for the running process
pub fn resolve_config_path() -> PathBuf {
    ConfigLookup::from_process().resolve()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lookup(env: Option<&str>, cwd: &Path, home: Option<&Path>) -> ConfigLookup {
        ConfigLookup {
            env_value: env.map(String::from),
            cwd: Some(cwd.to_path_buf()),
            home: home.map(Path::to_path_buf),
        }
    }

    #[test]
    fn test_env_wins_over_cwd_and_home() {
        let cwd = TempDir::new().unwrap();
        std::fs::write(cwd.path().join(CONFIG_FILE_NAME), "[H3]\n").unwrap();
        let home = TempDir::new().unwrap();

        let resolved = lookup(Some("/etc/h3/custom.ini"), cwd.path(), Some(home.path())).resolve();
        assert_eq!(resolved, PathBuf::from("/etc/h3/custom.ini"));
    }

    #[test]
    fn test_empty_env_is_ignored() {
        let cwd = TempDir::new().unwrap();
        let home = TempDir::new().unwrap();

        let resolved = lookup(Some(""), cwd.path(), Some(home.path())).resolve();
        assert_eq!(resolved, home.path().join(".h3").join("config.ini"));
    }

    #[test]
    fn test_cwd_wins_over_home() {
        let cwd = TempDir::new().unwrap();
        std::fs::write(cwd.path().join(CONFIG_FILE_NAME), "[H3]\n").unwrap();
        let home = TempDir::new().unwrap();

        let resolved = lookup(None, cwd.path(), Some(home.path())).resolve();
        assert_eq!(resolved, PathBuf::from("config.ini"));
    }

    #[test]
    fn test_cwd_directory_is_skipped() {
        let cwd = TempDir::new().unwrap();
        std::fs::create_dir(cwd.path().join(CONFIG_FILE_NAME)).unwrap();
        let home = TempDir::new().unwrap();

        let resolved = lookup(None, cwd.path(), Some(home.path())).resolve();
        assert_eq!(resolved, home.path().join(".h3").join("config.ini"));
    }

    #[test]
    fn test_no_home_falls_back_to_literal() {
        let cwd = TempDir::new().unwrap();
        let resolved = lookup(None, cwd.path(), None).resolve();
        assert_eq!(resolved, PathBuf::from("config.ini"));
    }

    #[test]
    fn test_uri_target_rejects_empty() {
        assert!(matches!(StoreTarget::uri(""), Err(Error::Usage(_))));
        assert!(matches!(StoreTarget::uri("  "), Err(Error::Usage(_))));
        assert_eq!(
            StoreTarget::uri("file:///tmp/h3").unwrap(),
            StoreTarget::Uri("file:///tmp/h3".into())
        );
    }

    #[test]
    fn test_target_display() {
        assert_eq!(
            StoreTarget::ConfigFile(PathBuf::from("config.ini")).to_string(),
            "config.ini"
        );
        assert_eq!(
            StoreTarget::Uri("redis://127.0.0.1:6379".into()).to_string(),
            "redis://127.0.0.1:6379"
        );
    }
}
