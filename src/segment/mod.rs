//! Streaming segmentation.
//!
//! ## Data flow
//!
//! ```text
//! CharSource ──refill──▶ CharWindow ──per char──▶ Letter ▶ Quantifier ▶ CJK
//!                                                     │
//!                                     emit (stop words dropped)
//!                                                     ▼
//!                        caller ◀──pop── PendingList (sorted, deduplicated)
//! ```
//!
//! A pass scans the window one character at a time. It may stop inside the
//! last 48 characters of a full window, but only while no scanner holds a
//! multi-character match, so a word is never cut by the next refill. The
//! unscanned tail is carried to the front of the window before new input is
//! read.

pub mod context;
pub mod lexeme;
pub mod pending;
pub mod scanner;
pub mod segmenter;
pub mod window;

pub use context::ScanContext;
pub use lexeme::{Lexeme, LexemeType};
pub use pending::PendingList;
pub use scanner::Scanner;
pub use segmenter::{segment_text, Segmenter};
pub use window::{CharSource, CharWindow, ReadSource, StrSource};
