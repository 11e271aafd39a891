//! Configuration management for imgnpy.
//!
//! Configuration is loaded from the platform config directory
//! (`imgnpy/config.toml`) when present. Every section falls back to its
//! `Default`, so an empty or partial file is valid.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for imgnpy.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Conversion defaults
    pub convert: ConvertConfig,

    /// Candidate discovery settings
    pub discovery: DiscoveryConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// - macOS: ~/Library/Application Support/com.imgnpy.imgnpy/config.toml
    /// - Linux: ~/.config/imgnpy/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\imgnpy\config\config.toml
    ///
    /// Falls back to ~/.imgnpy/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "imgnpy", "imgnpy")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".imgnpy").join("config.toml")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.convert.grayscale);
        assert!(!config.convert.resize);
        assert_eq!(config.convert.resize_filter, ResizeFilter::CatmullRom);
        assert_eq!(config.convert.on_collision, CollisionPolicy::Overwrite);
        assert_eq!(config.discovery.extensions.len(), 6);
        assert_eq!(config.limits.max_file_size_mb, None);
        assert_eq!(config.limits.max_image_dimension, None);
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.logging.level, "info");
        assert!(config.discovery.extensions.contains(&"tiff".to_string()));
    }

    #[test]
    fn test_partial_toml_overrides_section() {
        let config = Config::from_toml(
            r#"
            [convert]
            grayscale = true
            resize_filter = "lanczos3"
            on_collision = "reject"
            "#,
        )
        .unwrap();
        assert!(config.convert.grayscale);
        assert!(!config.convert.resize);
        assert_eq!(config.convert.resize_filter, ResizeFilter::Lanczos3);
        assert_eq!(config.convert.on_collision, CollisionPolicy::Reject);
        assert_eq!(config.limits.max_image_dimension, None);
    }

    #[test]
    fn test_unknown_filter_is_parse_error() {
        let err = Config::from_toml("[convert]\nresize_filter = \"bilinear\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_limits_are_opt_in() {
        let config = Config::from_toml(
            "[limits]\nmax_image_dimension = 4096\nmax_file_size_mb = 18000000000000\n",
        )
        .unwrap();
        assert_eq!(config.limits.max_image_dimension, Some(4096));
        assert_eq!(config.limits.max_file_size_mb, Some(18_000_000_000_000));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[discovery]\nextensions = [\"png\"]\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.discovery.extensions, vec!["png".to_string()]);
    }

    #[test]
    fn test_load_from_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }

    #[test]
    fn test_default_path_ends_with_config_toml() {
        assert!(Config::default_path().ends_with("config.toml"));
    }
}
