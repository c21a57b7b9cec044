//! Store configuration.

use serde::Deserialize;

/// Environment variable holding the database directory.
pub const DATA_DIR_ENV: &str = "DATA_DIR";

/// Configuration for opening a [`RocksStore`](crate::RocksStore).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoreConfig {
    /// Database directory.
    #[serde(default = "StoreConfig::default_path")]
    pub path: String,

    /// Create the database if it does not exist yet.
    #[serde(default = "StoreConfig::default_create_if_missing")]
    pub create_if_missing: bool,
}

impl StoreConfig {
    fn default_path() -> String {
        "/data".to_string()
    }

    const fn default_create_if_missing() -> bool {
        true
    }

    /// Configuration for the given directory, with other fields defaulted.
    #[must_use]
    pub fn at(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Load configuration from the process environment.
    ///
    /// Reads `DATA_DIR`, falling back to `/data`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    #[must_use]
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup(DATA_DIR_ENV)
            .filter(|path| !path.is_empty())
            .map_or_else(Self::default, |path| Self::at(path))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            create_if_missing: Self::default_create_if_missing(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.path, "/data");
        assert!(config.create_if_missing);
    }

    #[test]
    fn from_vars_reads_data_dir() {
        let config = StoreConfig::from_vars(|key| {
            (key == "DATA_DIR").then(|| "/tmp/find-or-error".to_string())
        });
        assert_eq!(config, StoreConfig::at("/tmp/find-or-error"));
    }

    #[test]
    fn from_vars_falls_back_to_default() {
        assert_eq!(StoreConfig::from_vars(|_| None), StoreConfig::default());
        assert_eq!(
            StoreConfig::from_vars(|_| Some(String::new())),
            StoreConfig::default()
        );
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: StoreConfig = serde_json::from_str(r#"{ "path": "/srv/db" }"#).unwrap();
        assert_eq!(config.path, "/srv/db");
        assert!(config.create_if_missing);

        let config: StoreConfig =
            serde_json::from_str(r#"{ "create_if_missing": false }"#).unwrap();
        assert_eq!(config.path, "/data");
        assert!(!config.create_if_missing);
    }
}
