//! Character-class scanners.
//!
//! Every scanner sees every character of a pass, in a fixed order, and
//! reports after each one whether it still needs the window held in place.
//! The engine ORs those answers: a window may only slide when all scanners
//! have released it.

pub mod cjk;
pub mod letter;
pub mod quantifier;

pub use cjk::CjkScanner;
pub use letter::LetterScanner;
pub use quantifier::QuantifierScanner;

use super::context::ScanContext;
use super::lexeme::LexemeType;
use crate::dict::{Hit, Lexicon, Trie};

pub trait Scanner: Send {
    /// Process the character under the cursor.
    ///
    /// Returns `true` while a multi-character match is still in flight.
    fn advance(&mut self, ctx: &mut ScanContext, lexicon: &Lexicon<'_>) -> bool;

    /// Drop all in-flight state at the end of a pass.
    fn reset(&mut self);

    fn name(&self) -> &'static str;
}

/// Scanners in the order they run on each character.
///
/// The letter scanner goes first so a number it closes at the cursor is
/// already queued when the quantifier scanner looks for a following unit.
pub fn default_scanners() -> Vec<Box<dyn Scanner>> {
    vec![
        Box::new(LetterScanner::new()),
        Box::new(QuantifierScanner::new()),
        Box::new(CjkScanner::new()),
    ]
}

/// Inclusive window span of a run in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Run {
    pub start: usize,
    pub end: usize,
}

/// What the current character does to a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RunStep {
    /// Starts a run or extends the open one
    Extend,
    /// Extends an open run but never starts one
    Join,
    /// Keeps an open run alive without moving its end
    Bridge,
    /// Closes the open run
    Stop,
}

/// Feed one character to a greedy run, emitting the run when it closes or
/// when the window runs out.
pub(crate) fn scan_run(
    run: &mut Option<Run>,
    step: RunStep,
    ctx: &mut ScanContext,
    lexicon: &Lexicon<'_>,
    kind: LexemeType,
) {
    let cursor = ctx.cursor();
    match (run.as_mut(), step) {
        (None, RunStep::Extend) => {
            *run = Some(Run {
                start: cursor,
                end: cursor,
            })
        }
        (Some(open), RunStep::Extend | RunStep::Join) => open.end = cursor,
        (Some(open), RunStep::Stop) => {
            ctx.emit(lexicon, open.start, open.end, kind);
            *run = None;
        }
        _ => {}
    }

    if ctx.is_window_consumed() {
        if let Some(open) = run.take() {
            ctx.emit(lexicon, open.start, open.end, kind);
        }
    }
}

/// In-flight dictionary matches of one scanner.
#[derive(Debug, Default)]
pub(crate) struct HitTracker {
    hits: Vec<Hit>,
}

impl HitTracker {
    /// Advance every in-flight hit by the character under the cursor, then
    /// try a fresh match starting at the cursor. Each word ending here is
    /// emitted as `kind`.
    pub fn step(&mut self, ctx: &mut ScanContext, lexicon: &Lexicon<'_>, trie: &Trie, kind: LexemeType) {
        let cursor = ctx.cursor();

        let mut i = 0;
        while i < self.hits.len() {
            let hit = trie.match_continue(ctx.chars(), cursor, &self.hits[i]);
            if hit.is_match() {
                ctx.emit(lexicon, hit.begin(), cursor, kind);
            }
            if hit.is_prefix() {
                self.hits[i] = hit;
                i += 1;
            } else {
                self.hits.swap_remove(i);
            }
        }

        let hit = trie.match_one(ctx.chars(), cursor);
        if hit.is_match() {
            ctx.emit(lexicon, cursor, cursor, kind);
        }
        if hit.is_prefix() {
            self.hits.push(hit);
        }
    }

    pub fn clear(&mut self) {
        self.hits.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}
