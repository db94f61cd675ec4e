use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const APP_NAME: &str = "splunk-app-audit";

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub username: Option<String>,
    /// Off by default: internal Splunk management ports commonly run on
    /// self-signed certificates.
    pub verify_tls: bool,
    pub timeout_secs: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Config::default();

        // 1. Load from Config File (Global)
        if let Some(config_path) = Self::global_path() {
            config.merge_file(&config_path)?;
        }

        // 2. Load from Environment Variables
        config.apply_env(|key| env::var(key).ok());

        Ok(config)
    }

    pub fn global_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().join("config.toml"))
    }

    fn merge_file(&mut self, config_path: &Path) -> Result<()> {
        if !config_path.exists() {
            return Ok(());
        }

        info!("Loading config from: {:?}", config_path);
        let content = std::fs::read_to_string(config_path)
            .context(format!("Failed to read config file at {:?}", config_path))?;

        // Handle parsing errors gracefully
        match toml::from_str::<FileConfig>(&content) {
            Ok(file_config) => self.merge(file_config),
            Err(e) => warn!("Failed to parse config.toml: {}", e),
        }
        Ok(())
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("SPLUNK_USERNAME") {
            self.username = Some(val);
        }
        if let Some(val) = lookup("SPLUNK_VERIFY_TLS") {
            self.verify_tls = val.parse().unwrap_or(false);
        }
        if let Some(val) = lookup("SPLUNK_TIMEOUT_SECS") {
            match val.parse() {
                Ok(secs) => self.timeout_secs = Some(secs),
                Err(e) => warn!("Ignoring SPLUNK_TIMEOUT_SECS={:?}: {}", val, e),
            }
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn merge(&mut self, other: FileConfig) {
        if let Some(v) = other.username {
            self.username = Some(v);
        }
        if let Some(v) = other.verify_tls {
            self.verify_tls = v;
        }
        if let Some(v) = other.timeout_secs {
            self.timeout_secs = Some(v);
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct FileConfig {
    pub username: Option<String>,
    pub verify_tls: Option<bool>,
    pub timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Reads an existing file, falling back to an empty config when the file
    /// is absent or unparseable.
    pub fn read_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content).unwrap_or_default())
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let toml_string = toml::to_string(self)?;
        std::fs::write(path, toml_string)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_merge_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "username = \"auditor\"\nverify_tls = true\n").unwrap();

        let mut config = Config::default();
        config.merge_file(&path).unwrap();

        assert_eq!(config.username.as_deref(), Some("auditor"));
        assert!(config.verify_tls);
        assert!(config.timeout().is_none());
    }

    #[test]
    fn test_merge_file_ignores_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "verify_tls = [").unwrap();

        let mut config = Config::default();
        config.merge_file(&path).unwrap();
        assert!(!config.verify_tls);
    }

    #[test]
    fn test_merge_file_missing_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.merge_file(&dir.path().join("absent.toml")).unwrap();
        assert!(config.username.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("SPLUNK_USERNAME", "svc_audit"),
            ("SPLUNK_VERIFY_TLS", "true"),
            ("SPLUNK_TIMEOUT_SECS", "15"),
        ]
        .into_iter()
        .collect();

        let mut config = Config {
            username: Some("from_file".to_string()),
            ..Config::default()
        };
        config.apply_env(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.username.as_deref(), Some("svc_audit"));
        assert!(config.verify_tls);
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_env_bad_values() {
        let mut config = Config {
            verify_tls: true,
            timeout_secs: Some(30),
            ..Config::default()
        };
        config.apply_env(|key| match key {
            "SPLUNK_VERIFY_TLS" => Some("yes please".to_string()),
            "SPLUNK_TIMEOUT_SECS" => Some("soon".to_string()),
            _ => None,
        });

        assert!(!config.verify_tls);
        assert_eq!(config.timeout_secs, Some(30));
    }

    #[test]
    fn test_file_config_write_preserves_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let file_config = FileConfig {
            username: Some("admin".to_string()),
            verify_tls: Some(false),
            timeout_secs: Some(10),
        };
        file_config.write(&path).unwrap();

        let read_back = FileConfig::read_or_default(&path).unwrap();
        assert_eq!(read_back.username.as_deref(), Some("admin"));
        assert_eq!(read_back.verify_tls, Some(false));
        assert_eq!(read_back.timeout_secs, Some(10));
    }
}
