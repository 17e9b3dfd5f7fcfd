use super::{HitTracker, Scanner};
use crate::dict::Lexicon;
use crate::segment::context::ScanContext;
use crate::segment::lexeme::LexemeType;
use crate::utils::CharClass;

/// Dictionary words over CJK characters.
///
/// Emits every main-dictionary word ending at the cursor, so overlapping
/// words of different lengths all come out. Kana and Hangul characters are
/// additionally emitted one character at a time.
#[derive(Debug, Default)]
pub struct CjkScanner {
    hits: HitTracker,
}

impl CjkScanner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scanner for CjkScanner {
    fn advance(&mut self, ctx: &mut ScanContext, lexicon: &Lexicon<'_>) -> bool {
        match ctx.current_class() {
            CharClass::Han => {
                self.hits.step(ctx, lexicon, lexicon.main(), LexemeType::NormalWord);
            }
            CharClass::KanaHangul => {
                self.hits.step(ctx, lexicon, lexicon.main(), LexemeType::NormalWord);
                let cursor = ctx.cursor();
                ctx.emit(lexicon, cursor, cursor, LexemeType::NormalWord);
            }
            // Words never cross a script boundary
            _ => self.hits.clear(),
        }

        if ctx.is_window_consumed() {
            self.hits.clear();
        }
        !self.hits.is_empty()
    }

    fn reset(&mut self) {
        self.hits.clear();
    }

    fn name(&self) -> &'static str {
        "cjk"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict::Dictionary;
    use crate::segment::window::StrSource;

    /// Run the scanner alone over `text` and return the pending spans.
    fn scan(dict: &Dictionary, text: &str) -> Vec<(usize, usize)> {
        let lexicon = dict.read();
        let mut ctx = ScanContext::new(64);
        ctx.refill(&mut StrSource::new(text)).unwrap();
        let mut scanner = CjkScanner::new();
        for cursor in 0..ctx.available() {
            ctx.seek(cursor);
            scanner.advance(&mut ctx, &lexicon);
        }
        ctx.pending()
            .iter()
            .map(|l| (l.begin(), l.length()))
            .collect()
    }

    #[test]
    fn test_overlapping_words() {
        let dict = Dictionary::from_words(
            ["疑是", "银河", "落九天", "九天", "疑是银河落九天"],
            Vec::<&str>::new(),
            Vec::<&str>::new(),
        );
        assert_eq!(
            scan(&dict, "疑是银河落九天"),
            vec![(0, 7), (0, 2), (2, 2), (4, 3), (5, 2)]
        );
    }

    #[test]
    fn test_words_stop_at_script_boundary() {
        let dict = Dictionary::from_words(["银河", "河水"], Vec::<&str>::new(), Vec::<&str>::new());
        assert_eq!(scan(&dict, "银x河水"), vec![(2, 2)]);
    }

    #[test]
    fn test_kana_hangul_single_characters() {
        let dict = Dictionary::from_words(["カメラ"], Vec::<&str>::new(), Vec::<&str>::new());
        assert_eq!(
            scan(&dict, "カメラ한"),
            vec![(0, 3), (0, 1), (1, 1), (2, 1), (3, 1)]
        );
    }

    #[test]
    fn test_lock_while_prefix_in_flight() {
        let dict = Dictionary::from_words(["问世间情为何物"], Vec::<&str>::new(), Vec::<&str>::new());
        let lexicon = dict.read();
        let mut ctx = ScanContext::new(64);
        ctx.refill(&mut StrSource::new("问世间情为何物。")).unwrap();
        let mut scanner = CjkScanner::new();
        let mut locks = Vec::new();
        for cursor in 0..ctx.available() {
            ctx.seek(cursor);
            locks.push(scanner.advance(&mut ctx, &lexicon));
        }
        assert_eq!(locks, vec![true, true, true, true, true, true, false, false]);
        assert_eq!(ctx.pending().len(), 1);
    }
}
