use std::path::PathBuf;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_or_default};

/// Where uploads live on disk and the URL prefix they are served under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageConfig {
    pub root: PathBuf,
    pub public_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("storage/app/public"),
            public_url: "/storage".to_string(),
        }
    }
}

/// - `STORAGE_ROOT` (default `storage/app/public`)
/// - `STORAGE_PUBLIC_URL` (default `/storage`)
#[cfg(feature = "config")]
impl FromEnv for StorageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            root: PathBuf::from(env_or_default("STORAGE_ROOT", "storage/app/public")),
            public_url: env_or_default("STORAGE_PUBLIC_URL", "/storage"),
        })
    }
}

#[cfg(all(test, feature = "config"))]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_from_env_defaults() {
        temp_env::with_vars(
            [("STORAGE_ROOT", None::<&str>), ("STORAGE_PUBLIC_URL", None)],
            || {
                assert_eq!(StorageConfig::from_env().unwrap(), StorageConfig::default());
            },
        );
    }

    #[test]
    fn test_storage_config_from_env_custom() {
        temp_env::with_vars(
            [
                ("STORAGE_ROOT", Some("/var/lib/portfolio")),
                ("STORAGE_PUBLIC_URL", Some("https://cdn.example.com")),
            ],
            || {
                let config = StorageConfig::from_env().unwrap();
                assert_eq!(config.root, PathBuf::from("/var/lib/portfolio"));
                assert_eq!(config.public_url, "https://cdn.example.com");
            },
        );
    }
}
