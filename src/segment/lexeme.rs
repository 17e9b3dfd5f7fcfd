use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Semantic type of an emitted lexeme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LexemeType {
    /// Dictionary word (or single Kana/Hangul character)
    NormalWord,
    /// Arabic or Chinese numeral run
    Number,
    /// Measurement unit directly following a number
    NumberUnit,
    /// Latin letters, optionally mixed with digits and connectors
    LatinToken,
}

impl LexemeType {
    pub fn as_str(self) -> &'static str {
        match self {
            LexemeType::NormalWord => "NORMAL_WORD",
            LexemeType::Number => "NUMBER",
            LexemeType::NumberUnit => "NUMBER_UNIT",
            LexemeType::LatinToken => "LATIN_TOKEN",
        }
    }
}

impl fmt::Display for LexemeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One segmentation result.
///
/// `begin` is relative to the scan window that produced the lexeme and
/// `offset` is the absolute stream position of that window, so the absolute
/// span is `offset + begin .. offset + begin + length`. The text is filled in
/// when the lexeme leaves the pending list and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexeme {
    offset: usize,
    begin: usize,
    length: usize,
    text: String,
    #[serde(rename = "type")]
    kind: LexemeType,
}

impl Lexeme {
    pub fn new(offset: usize, begin: usize, length: usize, kind: LexemeType) -> Self {
        Self {
            offset,
            begin,
            length,
            text: String::new(),
            kind,
        }
    }

    /// Lexeme covering the inclusive window positions `first..=last`.
    ///
    /// # Panics
    ///
    /// Panics if `last` precedes `first`.
    pub fn spanning(offset: usize, first: usize, last: usize, kind: LexemeType) -> Self {
        assert!(
            last >= first,
            "lexeme ends at {last} before it begins at {first}"
        );
        Self::new(offset, first, last - first + 1, kind)
    }

    /// Lexeme with its text already set, mainly for building query trees by hand.
    pub fn with_text(offset: usize, begin: usize, text: &str, kind: LexemeType) -> Self {
        Self {
            offset,
            begin,
            length: text.chars().count(),
            text: text.to_string(),
            kind,
        }
    }

    pub(crate) fn fill_text(&mut self, window: &[char]) {
        self.text = window[self.begin..self.begin + self.length].iter().collect();
    }

    /// Start of the scan window this lexeme was produced in.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Start relative to the scan window.
    pub fn begin(&self) -> usize {
        self.begin
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> LexemeType {
        self.kind
    }

    pub fn abs_begin(&self) -> usize {
        self.offset + self.begin
    }

    pub fn abs_end(&self) -> usize {
        self.offset + self.begin + self.length
    }

    /// Whether this lexeme's span fully contains `other`'s.
    pub fn contains(&self, other: &Lexeme) -> bool {
        self.abs_begin() <= other.abs_begin() && self.abs_end() >= other.abs_end()
    }

    /// Containment in either direction. Partial intersection is not overlap.
    pub fn overlaps(&self, other: &Lexeme) -> bool {
        self.contains(other) || other.contains(self)
    }

    /// Stream order: absolute begin ascending, longer first on ties.
    ///
    /// Two lexemes with the same span compare equal whatever their type.
    pub fn position_cmp(&self, other: &Lexeme) -> Ordering {
        self.abs_begin()
            .cmp(&other.abs_begin())
            .then_with(|| other.length.cmp(&self.length))
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} : {} : {}",
            self.abs_begin(),
            self.abs_end(),
            self.text,
            self.kind
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_span() {
        let lexeme = Lexeme::new(4096, 10, 3, LexemeType::NormalWord);
        assert_eq!(lexeme.abs_begin(), 4106);
        assert_eq!(lexeme.abs_end(), 4109);
    }

    #[test]
    fn test_spanning() {
        let lexeme = Lexeme::spanning(0, 2, 4, LexemeType::Number);
        assert_eq!(lexeme.begin(), 2);
        assert_eq!(lexeme.length(), 3);
    }

    #[test]
    #[should_panic(expected = "before it begins")]
    fn test_spanning_rejects_negative_length() {
        Lexeme::spanning(0, 5, 4, LexemeType::Number);
    }

    #[test]
    fn test_position_order() {
        let long = Lexeme::new(0, 2, 5, LexemeType::NormalWord);
        let short = Lexeme::new(0, 2, 2, LexemeType::NormalWord);
        let later = Lexeme::new(0, 3, 9, LexemeType::NormalWord);
        assert_eq!(long.position_cmp(&short), Ordering::Less);
        assert_eq!(short.position_cmp(&later), Ordering::Less);
        assert_eq!(
            long.position_cmp(&Lexeme::new(0, 2, 5, LexemeType::LatinToken)),
            Ordering::Equal
        );
    }

    #[test]
    fn test_overlap_is_containment() {
        // 小毛驴: 小毛 and 毛驴 intersect but neither contains the other
        let whole = Lexeme::new(0, 0, 3, LexemeType::NormalWord);
        let head = Lexeme::new(0, 0, 2, LexemeType::NormalWord);
        let tail = Lexeme::new(0, 1, 2, LexemeType::NormalWord);
        assert!(whole.overlaps(&head));
        assert!(tail.overlaps(&whole));
        assert!(!head.overlaps(&tail));
    }

    #[test]
    fn test_fill_text_and_display() {
        let window: Vec<char> = "疑是银河落九天".chars().collect();
        let mut lexeme = Lexeme::new(100, 2, 2, LexemeType::NormalWord);
        lexeme.fill_text(&window);
        assert_eq!(lexeme.text(), "银河");
        assert_eq!(lexeme.to_string(), "102-104 : 银河 : NORMAL_WORD");
    }

    #[test]
    fn test_serialize_type_name() {
        let lexeme = Lexeme::with_text(0, 0, "2000", LexemeType::Number);
        let json = serde_json::to_string(&lexeme).unwrap();
        assert!(json.contains(r#""type":"NUMBER""#));
        assert!(json.contains(r#""length":4"#));
    }
}
