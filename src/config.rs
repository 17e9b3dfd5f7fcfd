//! Analyzer configuration.
//!
//! Stored as JSON. Every field has a default, so an empty object (or no file
//! at all) yields the bundled dictionaries with the standard window size.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "cjkseg";
const CONFIG_FILE: &str = "config.json";

/// Default scan window capacity, in characters.
pub const DEFAULT_WINDOW_CAPACITY: usize = 4096;

/// Smallest accepted window. The scan pass keeps a 48-character tail in
/// reserve before shifting, so the window must be comfortably larger.
pub const MIN_WINDOW_CAPACITY: usize = 64;

/// Default number of cached query trees before the cache is cleared.
pub const DEFAULT_QUERY_CACHE_LIMIT: usize = 1200;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Keep only the longest lexeme among lexemes that contain one another
    pub longest_match: bool,

    /// Longest-match mode used when segmenting query phrases
    pub query_longest_match: bool,

    /// Scan window capacity in characters
    pub window_capacity: usize,

    /// Replacement for the bundled main dictionary (must be readable)
    pub main_dictionary: Option<PathBuf>,

    /// Replacement for the bundled quantifier dictionary (must be readable)
    pub quantifier_dictionary: Option<PathBuf>,

    /// Replacement for the bundled stop-word list (must be readable)
    pub stopword_dictionary: Option<PathBuf>,

    /// Extra word lists appended to the main dictionary (skipped if unreadable)
    pub user_dictionaries: Vec<PathBuf>,

    /// Extra stop-word lists (skipped if unreadable)
    pub user_stopwords: Vec<PathBuf>,

    /// Query tree cache size limit
    pub query_cache_limit: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            longest_match: true,
            query_longest_match: false,
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            main_dictionary: None,
            quantifier_dictionary: None,
            stopword_dictionary: None,
            user_dictionaries: Vec::new(),
            user_stopwords: Vec::new(),
            query_cache_limit: DEFAULT_QUERY_CACHE_LIMIT,
        }
    }
}

impl AnalyzerConfig {
    /// Load config from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load config from the default location, or return defaults if not found.
    pub fn load_default() -> Result<Self> {
        match get_config_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_json(content: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Window capacity with the lower bound applied.
    pub fn effective_window_capacity(&self) -> usize {
        self.window_capacity.max(MIN_WINDOW_CAPACITY)
    }
}

/// Path of the default config file (`<config dir>/cjkseg/config.json`).
pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = AnalyzerConfig::from_json("{}").unwrap();
        assert_eq!(config, AnalyzerConfig::default());
        assert!(config.longest_match);
        assert!(!config.query_longest_match);
        assert_eq!(config.window_capacity, 4096);
        assert_eq!(config.query_cache_limit, 1200);
    }

    #[test]
    fn test_partial_json() {
        let config = AnalyzerConfig::from_json(
            r#"{"longest_match": false, "user_dictionaries": ["/a.dic", "/b.dic"]}"#,
        )
        .unwrap();
        assert!(!config.longest_match);
        assert_eq!(config.user_dictionaries.len(), 2);
        assert!(config.main_dictionary.is_none());
    }

    #[test]
    fn test_window_capacity_floor() {
        let config = AnalyzerConfig {
            window_capacity: 8,
            ..AnalyzerConfig::default()
        };
        assert_eq!(config.effective_window_capacity(), MIN_WINDOW_CAPACITY);
    }

    #[test]
    fn test_load_missing_file() {
        let err = AnalyzerConfig::load(Path::new("/nonexistent/config.json")).unwrap_err();
        assert!(matches!(err, Error::ConfigIo { .. }));
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        let err = AnalyzerConfig::load(&path).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
