//! # cjkseg - Streaming CJK Dictionary Segmenter
//!
//! cjkseg splits mixed Chinese, Japanese, Korean and Latin text into
//! lexemes by forward dictionary matching, and turns query phrases into
//! boolean queries that keep every dictionary reading of the phrase.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`dict`] - Word tries (main, quantifier, stop words) and loading
//! - [`segment`] - Character window, scanners and the segmenter session
//! - [`query`] - Ambiguity tree and boolean query construction
//! - [`config`] - Analyzer configuration
//! - [`output`] - Result formatting for the command line
//! - [`utils`] - Character classes and normalization
//!
//! ## Quick Start
//!
//! ```
//! use cjkseg::{segment_text, Dictionary, QueryBuilder};
//! use std::sync::Arc;
//!
//! let dict = Arc::new(Dictionary::from_words(
//!     ["银河", "九天"],
//!     ["米"],
//!     ["的"],
//! ));
//!
//! for lexeme in segment_text("银河的九天", &dict, true) {
//!     println!("{lexeme}");
//! }
//!
//! let builder = QueryBuilder::new(dict, false);
//! assert_eq!(builder.build("title", "银河").to_string(), "title:银河");
//! ```

pub mod config;
pub mod dict;
pub mod error;
pub mod output;
pub mod query;
pub mod segment;
pub mod utils;

pub use config::AnalyzerConfig;
pub use dict::Dictionary;
pub use error::{Error, Result};
pub use query::{Occur, QueryBuilder, QueryNode};
pub use segment::{segment_text, Lexeme, LexemeType, Segmenter};
