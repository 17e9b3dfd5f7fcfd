//! Vocabulary storage: the main word trie, the quantifier (unit) trie and the
//! stop-word trie.
//!
//! ## Sharing
//!
//! A [`Dictionary`] is built once and shared by every segmentation session,
//! usually through [`Dictionary::global`]. The quantifier and stop-word tries
//! are frozen after construction. The main trie accepts new words at runtime
//! through [`Dictionary::add_words`]; it sits behind an `RwLock` so a lookup
//! sees a given path either before or after an insert, never half built.
//!
//! Scanners never take the lock per character. A scan pass acquires a
//! [`Lexicon`] once and releases it when the pass ends.

pub mod loader;
pub mod trie;

pub use trie::{Hit, NodeId, Trie};

use crate::config::AnalyzerConfig;
use crate::error::{Error, Result};
use crate::utils::regularize;
use std::path::Path;
use std::sync::{Arc, OnceLock, PoisonError, RwLock, RwLockReadGuard};
use tracing::info;

const BUILTIN_MAIN: &str = include_str!("../../resources/main.dic");
const BUILTIN_QUANTIFIERS: &str = include_str!("../../resources/quantifier.dic");
const BUILTIN_STOP_WORDS: &str = include_str!("../../resources/stopword.dic");

static GLOBAL: OnceLock<Arc<Dictionary>> = OnceLock::new();

/// Word counts of each trie, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordCounts {
    pub main: usize,
    pub quantifiers: usize,
    pub stop_words: usize,
}

/// The three vocabularies used by segmentation.
#[derive(Debug)]
pub struct Dictionary {
    main: RwLock<Trie>,
    quantifiers: Trie,
    stop_words: Trie,
}

impl Dictionary {
    /// Dictionary made of the bundled word lists only.
    pub fn builtin() -> Self {
        let mut main = Trie::new();
        let mut quantifiers = Trie::new();
        let mut stop_words = Trie::new();
        loader::load_str(&mut main, BUILTIN_MAIN);
        loader::load_str(&mut quantifiers, BUILTIN_QUANTIFIERS);
        loader::load_str(&mut stop_words, BUILTIN_STOP_WORDS);
        Self::assemble(main, quantifiers, stop_words)
    }

    /// Build the dictionary described by `config`.
    ///
    /// A configured replacement for a bundled word list is required: failing
    /// to read it aborts with [`Error::Dictionary`]. User dictionaries and
    /// user stop-word lists are optional and skipped with a warning.
    pub fn load(config: &AnalyzerConfig) -> Result<Self> {
        let mut main = Self::load_base(config.main_dictionary.as_deref(), BUILTIN_MAIN)?;
        let quantifiers =
            Self::load_base(config.quantifier_dictionary.as_deref(), BUILTIN_QUANTIFIERS)?;
        let mut stop_words =
            Self::load_base(config.stopword_dictionary.as_deref(), BUILTIN_STOP_WORDS)?;

        for path in &config.user_dictionaries {
            loader::load_optional(&mut main, path);
        }
        for path in &config.user_stopwords {
            loader::load_optional(&mut stop_words, path);
        }

        Ok(Self::assemble(main, quantifiers, stop_words))
    }

    fn load_base(path: Option<&Path>, builtin: &str) -> Result<Trie> {
        let mut trie = Trie::new();
        match path {
            Some(path) => {
                loader::load_required(&mut trie, path)?;
            }
            None => {
                loader::load_str(&mut trie, builtin);
            }
        }
        Ok(trie)
    }

    /// Dictionary built from in-memory word lists.
    pub fn from_words<M, Q, S>(main: M, quantifiers: Q, stop_words: S) -> Self
    where
        M: IntoIterator,
        M::Item: AsRef<str>,
        Q: IntoIterator,
        Q::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        fn build<I>(words: I) -> Trie
        where
            I: IntoIterator,
            I::Item: AsRef<str>,
        {
            let mut trie = Trie::new();
            for word in words {
                loader::insert_word(&mut trie, word.as_ref());
            }
            trie
        }

        Self::assemble(build(main), build(quantifiers), build(stop_words))
    }

    fn assemble(main: Trie, quantifiers: Trie, stop_words: Trie) -> Self {
        info!(
            main = main.len(),
            quantifiers = quantifiers.len(),
            stop_words = stop_words.len(),
            "dictionary ready"
        );
        Self {
            main: RwLock::new(main),
            quantifiers,
            stop_words,
        }
    }

    /// Make `dictionary` the process-wide instance.
    ///
    /// Fails with [`Error::AlreadyInitialized`] once a global dictionary exists,
    /// including one created implicitly by [`Dictionary::global`].
    pub fn install(dictionary: Dictionary) -> Result<Arc<Dictionary>> {
        let dictionary = Arc::new(dictionary);
        GLOBAL
            .set(Arc::clone(&dictionary))
            .map_err(|_| Error::AlreadyInitialized)?;
        Ok(dictionary)
    }

    /// The process-wide dictionary, built from the bundled word lists on
    /// first use unless one was installed earlier.
    pub fn global() -> Arc<Dictionary> {
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Dictionary::builtin())))
    }

    /// Add one word to the main vocabulary. Returns `true` if it was new.
    pub fn add_word(&self, word: &str) -> bool {
        let mut main = self.main.write().unwrap_or_else(PoisonError::into_inner);
        loader::insert_word(&mut main, word)
    }

    /// Add several words to the main vocabulary, returning how many were new.
    pub fn add_words<I>(&self, words: I) -> usize
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut main = self.main.write().unwrap_or_else(PoisonError::into_inner);
        words
            .into_iter()
            .filter(|word| loader::insert_word(&mut main, word.as_ref()))
            .count()
    }

    /// Read view over all three tries, held for the duration of a scan pass.
    pub fn read(&self) -> Lexicon<'_> {
        Lexicon {
            main: self.main.read().unwrap_or_else(PoisonError::into_inner),
            quantifiers: &self.quantifiers,
            stop_words: &self.stop_words,
        }
    }

    /// Whether `word` (after normalization) is in the main vocabulary.
    pub fn contains_word(&self, word: &str) -> bool {
        self.read().main().contains_chars(&normalized(word))
    }

    /// Whether `word` (after normalization) is a quantifier/unit word.
    pub fn is_quantifier(&self, word: &str) -> bool {
        self.quantifiers.contains_chars(&normalized(word))
    }

    /// Whether `word` (after normalization) is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains_chars(&normalized(word))
    }

    pub fn word_counts(&self) -> WordCounts {
        WordCounts {
            main: self.read().main().len(),
            quantifiers: self.quantifiers.len(),
            stop_words: self.stop_words.len(),
        }
    }
}

fn normalized(word: &str) -> Vec<char> {
    word.chars().map(regularize).collect()
}

/// Borrowed view of a [`Dictionary`] for one scan pass.
///
/// Holding a `Lexicon` blocks runtime insertions into the main vocabulary, so
/// it must not outlive the pass that created it.
pub struct Lexicon<'a> {
    main: RwLockReadGuard<'a, Trie>,
    quantifiers: &'a Trie,
    stop_words: &'a Trie,
}

impl Lexicon<'_> {
    pub fn main(&self) -> &Trie {
        &self.main
    }

    pub fn quantifiers(&self) -> &Trie {
        self.quantifiers
    }

    pub fn stop_words(&self) -> &Trie {
        self.stop_words
    }

    /// Whether the character span is a stop word.
    pub fn is_stop_word(&self, chars: &[char]) -> bool {
        self.stop_words.contains_chars(chars)
    }
}
