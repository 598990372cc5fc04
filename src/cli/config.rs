//! Configuration file handling
//!
//! The config file is a single JSON object. Every field is optional:
//!
//! ```json
//! {
//!   "database_path": "./sqli-lab.db",
//!   "http": { "host": "127.0.0.1", "port": 3001, "cors_origins": [] }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::http_server::HttpServerConfig;
use crate::store::IN_MEMORY;

use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// SQLite database file, or `:memory:` for a throwaway database
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// HTTP listener settings
    #[serde(default)]
    pub http: HttpServerConfig,
}

fn default_database_path() -> String {
    "./sqli-lab.db".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            http: HttpServerConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent
    pub fn load_or_default(path: &Path) -> CliResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.database_path.trim().is_empty() {
            return Err(CliError::config_error("database_path must not be empty"));
        }

        if self.http.port == 0 {
            return Err(CliError::config_error("http.port must be > 0"));
        }

        if self.http.host.trim().is_empty() {
            return Err(CliError::config_error("http.host must not be empty"));
        }

        Ok(())
    }

    /// Whether the database lives only in memory
    pub fn is_in_memory(&self) -> bool {
        self.database_path == IN_MEMORY
    }

    /// Database path as a filesystem path
    pub fn database_file(&self) -> &Path {
        Path::new(&self.database_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
        let path = dir.path().join("sqli-lab.json");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "{}");

        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.http.port, 3001);
        assert!(!config.is_in_memory());
    }

    #[test]
    fn test_partial_http_section() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"database_path": ":memory:", "http": {"port": 8080}}"#);

        let config = Config::load(&path).unwrap();
        assert!(config.is_in_memory());
        assert_eq!(config.http.port, 8080);
        assert_eq!(config.http.host, "127.0.0.1");
    }

    #[test]
    fn test_zero_port_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"http": {"port": 0}}"#);

        let err = Config::load(&path).unwrap_err();
        assert_eq!(err.code_str(), "SQLI_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_invalid_json_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "{ not json");

        let err = Config::load(&path).unwrap_err();
        assert!(err.message().starts_with("Invalid config JSON"));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_or_default(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());

        assert!(Config::load(&dir.path().join("absent.json")).is_err());
    }
}
