use super::context::ScanContext;
use super::lexeme::Lexeme;
use super::scanner::{default_scanners, Scanner};
use super::window::{CharSource, StrSource};
use crate::config::{AnalyzerConfig, DEFAULT_WINDOW_CAPACITY};
use crate::dict::Dictionary;
use crate::error::Result;
use std::sync::Arc;
use tracing::debug;

/// Streaming segmentation session over one character source.
///
/// Pull lexemes with [`Segmenter::next_lexeme`] (or iterate) until the source
/// is exhausted. Lexemes arrive in order of absolute begin, longer first when
/// two start at the same position. A session is single-threaded; run one
/// session per input to segment in parallel.
pub struct Segmenter<S> {
    source: S,
    dictionary: Arc<Dictionary>,
    context: ScanContext,
    scanners: Vec<Box<dyn Scanner>>,
    longest_match: bool,
}

impl<S: CharSource> Segmenter<S> {
    pub fn new(source: S, dictionary: Arc<Dictionary>, longest_match: bool) -> Self {
        Self::with_capacity(source, dictionary, longest_match, DEFAULT_WINDOW_CAPACITY)
    }

    /// Session with a custom window capacity (raised to the minimum if smaller).
    pub fn with_capacity(
        source: S,
        dictionary: Arc<Dictionary>,
        longest_match: bool,
        capacity: usize,
    ) -> Self {
        Self {
            source,
            dictionary,
            context: ScanContext::new(capacity),
            scanners: default_scanners(),
            longest_match,
        }
    }

    pub fn from_config(source: S, dictionary: Arc<Dictionary>, config: &AnalyzerConfig) -> Self {
        Self::with_capacity(
            source,
            dictionary,
            config.longest_match,
            config.effective_window_capacity(),
        )
    }

    pub fn longest_match(&self) -> bool {
        self.longest_match
    }

    pub fn window_capacity(&self) -> usize {
        self.context.capacity()
    }

    /// Next lexeme, or `None` once the source is exhausted.
    ///
    /// An error reading the source leaves the session in an unspecified
    /// state; discard it or [`reset`](Self::reset) it with a new source.
    pub fn next_lexeme(&mut self) -> Result<Option<Lexeme>> {
        loop {
            if let Some(lexeme) = self.context.take_lexeme() {
                return Ok(Some(lexeme));
            }
            if self.context.refill(&mut self.source)? == 0 {
                return Ok(None);
            }
            self.scan();
        }
    }

    /// One pass over the window.
    fn scan(&mut self) {
        let lexicon = self.dictionary.read();
        let available = self.context.available();

        let mut scanned = 0;
        for cursor in 0..available {
            self.context.seek(cursor);
            let mut locked = false;
            for scanner in &mut self.scanners {
                if scanner.advance(&mut self.context, &lexicon) {
                    locked = true;
                    if cursor + 1 == self.context.capacity() {
                        debug!(
                            scanner = scanner.name(),
                            offset = self.context.offset(),
                            "match cut at full window"
                        );
                    }
                }
            }
            scanned += 1;
            if self.context.can_release(locked) {
                break;
            }
        }
        drop(lexicon);

        for scanner in &mut self.scanners {
            scanner.reset();
        }
        let offset = self.context.offset();
        let excluded = self.context.finish_pass(scanned, self.longest_match);
        debug!(
            offset,
            available,
            scanned,
            excluded,
            pending = self.context.pending().len(),
            "scan pass"
        );
    }

    /// Reuse the session (and its window) for a new source.
    pub fn reset(&mut self, source: S) {
        self.source = source;
        self.context.reset();
        for scanner in &mut self.scanners {
            scanner.reset();
        }
    }
}

impl<S: CharSource> Iterator for Segmenter<S> {
    type Item = Result<Lexeme>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_lexeme().transpose()
    }
}

/// Segment a whole string with a fresh session.
pub fn segment_text(text: &str, dictionary: &Arc<Dictionary>, longest_match: bool) -> Vec<Lexeme> {
    let mut segmenter = Segmenter::new(StrSource::new(text), Arc::clone(dictionary), longest_match);
    let mut lexemes = Vec::new();
    // A string source never fails
    while let Ok(Some(lexeme)) = segmenter.next_lexeme() {
        lexemes.push(lexeme);
    }
    lexemes
}
