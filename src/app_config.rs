//! Runtime configuration.
//!
//! The collection lives in a single data file. Its location defaults to
//! [`DEFAULT_DATA_FILE`] in the working directory and can be overridden
//! through the [`DATA_FILE_ENV`] environment variable or, for the console
//! binary, the `--data-file` flag.

use std::path::{Path, PathBuf};

/// File name used when nothing else is configured.
pub const DEFAULT_DATA_FILE: &str = "books_collection.store";

/// Environment variable that overrides the data file location.
pub const DATA_FILE_ENV: &str = "BOOK_COLLECTION_FILE";

/// Earliest publication year accepted by the desktop book form.
pub const MIN_FORM_YEAR: i32 = 1000;

/// Latest publication year accepted by the desktop book form.
pub const MAX_FORM_YEAR: i32 = 2025;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_file: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
        }
    }
}

impl AppConfig {
    pub fn with_data_file(path: impl AsRef<Path>) -> Self {
        Self {
            data_file: path.as_ref().to_path_buf(),
        }
    }

    /// Builds the configuration from [`DATA_FILE_ENV`], falling back to the default.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(DATA_FILE_ENV).ok())
    }

    // Blank values are treated as unset.
    fn from_env_value(value: Option<String>) -> Self {
        match value {
            Some(path) if !path.trim().is_empty() => Self::with_data_file(path.trim()),
            _ => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_value_overrides_default() {
        let config = AppConfig::from_env_value(Some(" /tmp/shelf.store ".to_string()));
        assert_eq!(config.data_file, PathBuf::from("/tmp/shelf.store"));
    }

    #[test]
    fn test_blank_env_value_is_ignored() {
        assert_eq!(AppConfig::from_env_value(Some("   ".to_string())), AppConfig::default());
        assert_eq!(AppConfig::from_env_value(None), AppConfig::default());
    }
}
