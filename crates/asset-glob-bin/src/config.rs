//! Loading of the `assets.toml` configuration file.

use std::path::{Path, PathBuf};

use asset_glob::WalkConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The file that is picked up from the working directory when no
/// configuration file is passed explicitly.
pub const DEFAULT_CONFIG_FILE: &str = "assets.toml";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid value for a field.
    #[error("Invalid value for field {0}: {1}")]
    InvalidValue(String, String),
}

#[derive(Error, Debug)]
pub enum LoadError {
    /// IO error while reading configuration file.
    #[error("IO error while reading configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing configuration file.
    #[error("Error parsing configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Error validating configuration.
    #[error("Error validating configuration: {0}")]
    ValidationError(#[from] ValidationError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct AssetsConfig {
    /// The glob patterns to resolve, in order. A leading `!` excludes.
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Configuration of the directory walker.
    #[serde(default, skip_serializing_if = "WalkConfig::is_default")]
    pub walk: WalkConfig,

    #[serde(skip)]
    pub loaded_from: Option<PathBuf>,
}

impl AssetsConfig {
    /// Loads the configuration from `path`, or from [`DEFAULT_CONFIG_FILE`]
    /// if it exists in the working directory. Without either the default
    /// configuration is returned.
    pub fn load(path: Option<&Path>) -> Result<Self, LoadError> {
        match path {
            Some(path) => Self::from_path(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_path(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Self::default()),
        }
    }

    /// Reads and validates the configuration file at `path`.
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let contents = fs_err::read_to_string(path)?;
        let mut config = Self::from_toml(&contents)?;
        tracing::debug!("loaded configuration from {}", path.display());
        config.loaded_from = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parses and validates a configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self, LoadError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.walk.threads == 0 {
            return Err(ValidationError::InvalidValue(
                "walk.threads".to_string(),
                "The number of walker threads must be greater than 0".to_string(),
            ));
        }

        if let Some(pattern) = self.patterns.iter().find(|p| p.is_empty() || *p == "!") {
            return Err(ValidationError::InvalidValue(
                "patterns".to_string(),
                format!("'{pattern}' is not a glob pattern"),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{AssetsConfig, LoadError, ValidationError};
    use asset_glob::WalkConfig;
    use fs_err as fs;
    use tempfile::tempdir;

    #[test]
    fn parse_full_config() {
        let config = AssetsConfig::from_toml(
            r#"
            patterns = ["src/**/*.rs", "!src/generated/**"]

            [walk]
            threads = 3
            follow-links = true
            max-depth = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.patterns, vec!["src/**/*.rs", "!src/generated/**"]);
        assert_eq!(
            config.walk,
            WalkConfig {
                threads: 3,
                follow_links: true,
                max_depth: Some(8),
            }
        );
    }

    #[test]
    fn walk_table_is_optional() {
        let config = AssetsConfig::from_toml(r#"patterns = ["*.go"]"#).unwrap();
        assert!(config.walk.is_default());
    }

    #[test]
    fn reject_unknown_keys() {
        let err = AssetsConfig::from_toml(r#"globs = ["*.go"]"#).unwrap_err();
        assert!(matches!(err, LoadError::ParseError(_)), "{err:?}");
    }

    #[test]
    fn reject_invalid_values() {
        let err = AssetsConfig::from_toml("[walk]\nthreads = 0").unwrap_err();
        assert!(matches!(
            err,
            LoadError::ValidationError(ValidationError::InvalidValue(ref field, _)) if field == "walk.threads"
        ));

        let err = AssetsConfig::from_toml(r#"patterns = ["*.go", "!"]"#).unwrap_err();
        assert!(matches!(err, LoadError::ValidationError(_)), "{err:?}");
    }

    #[test]
    fn remembers_where_it_was_loaded_from() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("assets.toml");
        fs::write(&path, r#"patterns = ["**"]"#).unwrap();

        let config = AssetsConfig::load(Some(&path)).unwrap();
        assert_eq!(config.loaded_from.as_deref(), Some(path.as_path()));
        assert_eq!(config.patterns, vec!["**"]);
    }
}
