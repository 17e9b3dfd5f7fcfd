//! Utility functions shared by the dictionary and the scanners.
//!
//! ## Key Functions
//!
//! ```
//! use cjkseg::utils::{classify, regularize, CharClass};
//!
//! assert_eq!(regularize('Ｗ'), 'w');
//! assert_eq!(classify('银'), CharClass::Han);
//! ```

pub mod chars;

pub use chars::*;
