use super::lexeme::{Lexeme, LexemeType};
use super::pending::PendingList;
use super::window::{CharSource, CharWindow};
use crate::dict::Lexicon;
use crate::error::Result;
use crate::utils::{classify, CharClass};

/// Characters at the end of a full window that a pass may leave unscanned.
///
/// Once the cursor enters this tail and no scanner holds the window, the pass
/// stops so the next refill can slide the tail to the front.
pub const TAIL_RESERVE: usize = 48;

/// Mutable state of one segmentation session.
#[derive(Debug)]
pub struct ScanContext {
    window: CharWindow,
    cursor: usize,
    current: char,
    class: CharClass,
    /// Characters scanned by the last pass
    scanned: usize,
    /// Absolute stream position of the window's first character
    offset: usize,
    pending: PendingList,
    /// Window end of the most recent NUMBER lexeme of this pass
    last_number_end: Option<usize>,
}

impl ScanContext {
    pub fn new(capacity: usize) -> Self {
        Self {
            window: CharWindow::new(capacity),
            cursor: 0,
            current: '\0',
            class: CharClass::Other,
            scanned: 0,
            offset: 0,
            pending: PendingList::new(),
            last_number_end: None,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Normalized character under the cursor.
    pub fn current_char(&self) -> char {
        self.current
    }

    pub fn current_class(&self) -> CharClass {
        self.class
    }

    /// Valid characters of the window.
    pub fn chars(&self) -> &[char] {
        self.window.chars()
    }

    pub fn available(&self) -> usize {
        self.window.available()
    }

    pub fn capacity(&self) -> usize {
        self.window.capacity()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The cursor is on the last valid character of the window.
    pub fn is_window_consumed(&self) -> bool {
        self.cursor + 1 == self.window.available()
    }

    pub fn last_number_end(&self) -> Option<usize> {
        self.last_number_end
    }

    pub fn pending(&self) -> &PendingList {
        &self.pending
    }

    /// Queue a lexeme covering window positions `first..=last`.
    ///
    /// Stop words are dropped here and never reach the pending list. Returns
    /// whether the lexeme was queued.
    pub fn emit(&mut self, lexicon: &Lexicon<'_>, first: usize, last: usize, kind: LexemeType) -> bool {
        let lexeme = Lexeme::spanning(self.offset, first, last, kind);
        if lexicon.is_stop_word(&self.window.chars()[first..=last]) {
            return false;
        }
        if kind == LexemeType::Number {
            self.last_number_end = Some(last + 1);
        }
        self.pending.insert(lexeme)
    }

    /// Carry the unscanned tail forward and top the window up.
    pub(crate) fn refill<S: CharSource + ?Sized>(&mut self, source: &mut S) -> Result<usize> {
        let available = self.window.refill(source, self.scanned)?;
        self.scanned = 0;
        Ok(available)
    }

    pub(crate) fn seek(&mut self, cursor: usize) {
        self.cursor = cursor;
        self.current = self.window.chars()[cursor];
        self.class = classify(self.current);
    }

    /// Whether the pass may stop after the current character, given whether
    /// any scanner still holds the window.
    pub(crate) fn can_release(&self, locked: bool) -> bool {
        let available = self.window.available();
        !locked
            && self.window.is_full()
            && self.cursor + 1 < available
            && self.cursor + TAIL_RESERVE > available
    }

    pub(crate) fn finish_pass(&mut self, scanned: usize, longest_match: bool) -> usize {
        self.scanned = scanned;
        self.offset += scanned;
        self.last_number_end = None;
        if longest_match {
            self.pending.exclude_overlaps()
        } else {
            0
        }
    }

    /// Next pending lexeme with its text filled in from the window.
    pub(crate) fn take_lexeme(&mut self) -> Option<Lexeme> {
        let mut lexeme = self.pending.pop_first()?;
        lexeme.fill_text(self.window.chars());
        Some(lexeme)
    }

    pub fn reset(&mut self) {
        self.window.clear();
        self.cursor = 0;
        self.current = '\0';
        self.class = CharClass::Other;
        self.scanned = 0;
        self.offset = 0;
        self.pending.clear();
        self.last_number_end = None;
    }
}
