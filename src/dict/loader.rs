//! Word-list loading.
//!
//! Dictionary files are plain UTF-8 text with one word per line. Surrounding
//! whitespace is trimmed and blank lines are skipped. Words are normalized
//! with the same folding the scanners apply to input text, so a dictionary
//! entry written in full-width or upper case still matches.

use super::trie::Trie;
use crate::error::{Error, Result};
use crate::utils::regularize;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Iterate over the words of a word list.
pub fn parse_words(content: &str) -> impl Iterator<Item = &str> {
    content
        .strip_prefix('\u{FEFF}')
        .unwrap_or(content)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
}

/// Insert a single normalized word, returning `true` if it was new.
pub fn insert_word(trie: &mut Trie, word: &str) -> bool {
    trie.insert_chars(word.trim().chars().map(regularize))
}

/// Insert every word of a word list, returning how many were new.
pub fn load_str(trie: &mut Trie, content: &str) -> usize {
    parse_words(content)
        .filter(|word| insert_word(trie, word))
        .count()
}

/// Load a word list that must be present.
pub fn load_required(trie: &mut Trie, path: &Path) -> Result<usize> {
    let content = fs::read_to_string(path).map_err(|source| Error::Dictionary {
        path: path.to_path_buf(),
        source,
    })?;
    let added = load_str(trie, &content);
    debug!(path = %path.display(), added, "loaded dictionary");
    Ok(added)
}

/// Load an optional word list; failures are logged and skipped.
pub fn load_optional(trie: &mut Trie, path: &Path) -> usize {
    match fs::read_to_string(path) {
        Ok(content) => {
            let added = load_str(trie, &content);
            debug!(path = %path.display(), added, "loaded user dictionary");
            added
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping unreadable user dictionary");
            0
        }
    }
}
