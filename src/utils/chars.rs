//! Character classification and normalization for the scanners.
//!
//! Every character entering the scan window is normalized once
//! (full-width ASCII folded to half-width, ASCII upper case folded to lower
//! case) and then classified so that each scanner can decide cheaply whether
//! the character belongs to the run it is tracking.

/// Character class as seen by the scanners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// ASCII digit `0-9`
    Arabic,
    /// ASCII letter (after normalization always lower case)
    Letter,
    /// CJK ideograph (unified, extension A, compatibility)
    Han,
    /// Hiragana, Katakana or Hangul
    KanaHangul,
    /// Anything else: punctuation, whitespace, unsupported scripts
    Other,
}

/// Connectors that may appear inside a mixed letter/digit token (`c++`, `a@b.com`).
const LETTER_CONNECTORS: [char; 7] = ['#', '&', '+', '-', '.', '@', '_'];

/// Separators tolerated inside an Arabic number run (`1,000.5`).
const NUMBER_CONNECTORS: [char; 2] = [',', '.'];

/// Chinese numerals, financial numerals and magnitude characters.
const CJK_NUMERALS: &str = "〇一二两三四五六七八九十零壹贰叁肆伍陆柒捌玖拾百千万亿佰仟萬億兆卅廿";

/// Classify a (normalized) character.
pub fn classify(ch: char) -> CharClass {
    match ch {
        '0'..='9' => CharClass::Arabic,
        'a'..='z' | 'A'..='Z' => CharClass::Letter,
        '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{F900}'..='\u{FAFF}' => {
            CharClass::Han
        }
        '\u{3040}'..='\u{309F}'   // Hiragana
        | '\u{30A0}'..='\u{30FF}' // Katakana
        | '\u{31F0}'..='\u{31FF}' // Katakana phonetic extensions
        | '\u{1100}'..='\u{11FF}' // Hangul Jamo
        | '\u{3130}'..='\u{318F}' // Hangul compatibility Jamo
        | '\u{AC00}'..='\u{D7AF}' // Hangul syllables
        | '\u{FF66}'..='\u{FFDC}' // half-width Katakana and Hangul
        => CharClass::KanaHangul,
        _ => CharClass::Other,
    }
}

/// Fold full-width ASCII to half-width and upper case ASCII to lower case.
///
/// The ideographic space U+3000 becomes a plain space.
#[inline]
pub fn regularize(ch: char) -> char {
    match ch {
        '\u{3000}' => ' ',
        '\u{FF01}'..='\u{FF5E}' => {
            // Full-width forms sit at a fixed distance from their ASCII counterparts
            char::from_u32(ch as u32 - 0xFEE0)
                .map(|half| half.to_ascii_lowercase())
                .unwrap_or(ch)
        }
        'A'..='Z' => ch.to_ascii_lowercase(),
        _ => ch,
    }
}

#[inline]
pub fn is_letter_connector(ch: char) -> bool {
    LETTER_CONNECTORS.contains(&ch)
}

#[inline]
pub fn is_number_connector(ch: char) -> bool {
    NUMBER_CONNECTORS.contains(&ch)
}

/// Whether `ch` belongs to the Chinese numeral set recognized by the quantifier scanner.
#[inline]
pub fn is_cjk_numeral(ch: char) -> bool {
    CJK_NUMERALS.contains(ch)
}

/// Remove every whitespace character, including the ideographic space.
///
/// Query phrases are segmented as one continuous string, so spacing typed
/// by a user must not split or alter the phrase.
pub fn strip_spaces(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
