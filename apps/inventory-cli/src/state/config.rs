//! # Configuration State
//!
//! Stores application configuration resolved at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command-line flags (`--db`)
//! 2. Environment variables (`INVENTORY_*`)
//! 3. Defaults (this file)
//!
//! Configuration is read-only after startup.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use inventory_db::DbConfig;

/// Database file name inside the platform data directory.
pub const DB_FILE_NAME: &str = "inventory.db";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Explicit database path. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,

    /// Pool size limit
    pub max_connections: u32,

    /// How long to wait for a connection before giving up
    pub connect_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: None,
            max_connections: 4,
            connect_timeout: Duration::from_secs(30),
        }
    }
}

impl AppConfig {
    /// Creates an AppConfig from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `INVENTORY_DB_PATH`: Database file path
    /// - `INVENTORY_MAX_CONNECTIONS`: Pool size limit
    /// - `INVENTORY_CONNECT_TIMEOUT_SECS`: Connection timeout in seconds
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let mut config = AppConfig::default();

        if let Some(path) = lookup("INVENTORY_DB_PATH").filter(|p| !p.trim().is_empty()) {
            config.database_path = Some(PathBuf::from(path));
        }

        if let Some(raw) = lookup("INVENTORY_MAX_CONNECTIONS") {
            config.max_connections = match raw.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(AppError::config(format!(
                        "INVENTORY_MAX_CONNECTIONS must be a positive integer, got '{}'",
                        raw
                    )))
                }
            };
        }

        if let Some(raw) = lookup("INVENTORY_CONNECT_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|_| {
                AppError::config(format!(
                    "INVENTORY_CONNECT_TIMEOUT_SECS must be a number of seconds, got '{}'",
                    raw
                ))
            })?;
            config.connect_timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Applies the `--db` flag on top of the environment.
    pub fn with_database_path(mut self, path: Option<PathBuf>) -> Self {
        if path.is_some() {
            self.database_path = path;
        }
        self
    }

    /// Determines the database file path.
    ///
    /// ## Platform-Specific Defaults
    /// - **macOS**: `~/Library/Application Support/com.inventory.inventory-manager/inventory.db`
    /// - **Windows**: `%APPDATA%\inventory\inventory-manager\data\inventory.db`
    /// - **Linux**: `~/.local/share/inventory-manager/inventory.db`
    pub fn resolve_database_path(&self) -> AppResult<PathBuf> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }

        let proj_dirs = ProjectDirs::from("com", "inventory", "inventory-manager")
            .ok_or_else(|| AppError::config("Could not determine app data directory"))?;

        let data_dir = proj_dirs.data_dir();

        // Create directory if it doesn't exist
        std::fs::create_dir_all(data_dir).map_err(|e| {
            AppError::config(format!("Could not create {}: {}", data_dir.display(), e))
        })?;

        Ok(data_dir.join(DB_FILE_NAME))
    }

    /// Builds the store configuration.
    pub fn db_config(&self) -> AppResult<DbConfig> {
        Ok(DbConfig::new(self.resolve_database_path()?)
            .max_connections(self.max_connections)
            .connect_timeout(self.connect_timeout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("INVENTORY_DB_PATH", "/tmp/shop.db"),
            ("INVENTORY_MAX_CONNECTIONS", "8"),
            ("INVENTORY_CONNECT_TIMEOUT_SECS", "3"),
        ]))
        .unwrap();

        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/shop.db")));
        assert_eq!(config.max_connections, 8);
        assert_eq!(config.connect_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_bad_env_values() {
        let err =
            AppConfig::from_lookup(lookup(&[("INVENTORY_MAX_CONNECTIONS", "0")])).unwrap_err();
        assert_eq!(err.code, ErrorCode::Config);

        let err = AppConfig::from_lookup(lookup(&[("INVENTORY_CONNECT_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Config);
    }

    #[test]
    fn test_flag_beats_env() {
        let config = AppConfig::from_lookup(lookup(&[("INVENTORY_DB_PATH", "/tmp/env.db")]))
            .unwrap()
            .with_database_path(Some(PathBuf::from("/tmp/flag.db")));
        assert_eq!(config.resolve_database_path().unwrap(), PathBuf::from("/tmp/flag.db"));

        let config = config.with_database_path(None);
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/flag.db")));
    }
}
