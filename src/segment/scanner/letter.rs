use super::{scan_run, Run, RunStep, Scanner};
use crate::dict::Lexicon;
use crate::segment::context::ScanContext;
use crate::segment::lexeme::LexemeType;
use crate::utils::{is_letter_connector, is_number_connector, CharClass};

/// Latin letters and Arabic digits.
///
/// Three greedy runs share the character stream and deliberately overlap:
/// letters only, digits only (tolerating `,` and `.` inside the number), and
/// letters mixed with digits (tolerating `# & + - . @ _`). For `windows2000`
/// that gives `windows`, `2000` and `windows2000`.
#[derive(Debug, Default)]
pub struct LetterScanner {
    letters: Option<Run>,
    arabic: Option<Run>,
    mixed: Option<Run>,
}

impl LetterScanner {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scanner for LetterScanner {
    fn advance(&mut self, ctx: &mut ScanContext, lexicon: &Lexicon<'_>) -> bool {
        let class = ctx.current_class();
        let ch = ctx.current_char();

        let letters = match class {
            CharClass::Letter => RunStep::Extend,
            _ => RunStep::Stop,
        };
        let arabic = match class {
            CharClass::Arabic => RunStep::Extend,
            CharClass::Other if is_number_connector(ch) => RunStep::Bridge,
            _ => RunStep::Stop,
        };
        let mixed = match class {
            CharClass::Arabic | CharClass::Letter => RunStep::Extend,
            CharClass::Other if is_letter_connector(ch) => RunStep::Join,
            _ => RunStep::Stop,
        };

        scan_run(&mut self.letters, letters, ctx, lexicon, LexemeType::LatinToken);
        scan_run(&mut self.arabic, arabic, ctx, lexicon, LexemeType::Number);
        scan_run(&mut self.mixed, mixed, ctx, lexicon, LexemeType::LatinToken);

        self.letters.is_some() || self.arabic.is_some() || self.mixed.is_some()
    }

    fn reset(&mut self) {
        self.letters = None;
        self.arabic = None;
        self.mixed = None;
    }

    fn name(&self) -> &'static str {
        "letter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dict::Dictionary;
    use crate::segment::window::StrSource;

    fn scan(text: &str) -> Vec<(usize, usize, LexemeType)> {
        let dict = Dictionary::from_words(Vec::<&str>::new(), Vec::<&str>::new(), ["is"]);
        let lexicon = dict.read();
        let mut ctx = ScanContext::new(64);
        ctx.refill(&mut StrSource::new(text)).unwrap();
        let mut scanner = LetterScanner::new();
        for cursor in 0..ctx.available() {
            ctx.seek(cursor);
            scanner.advance(&mut ctx, &lexicon);
        }
        ctx.pending()
            .iter()
            .map(|l| (l.begin(), l.length(), l.kind()))
            .collect()
    }

    #[test]
    fn test_three_overlapping_runs() {
        assert_eq!(
            scan("windows2000 is shit"),
            vec![
                (0, 11, LexemeType::LatinToken),
                (0, 7, LexemeType::LatinToken),
                (7, 4, LexemeType::Number),
                (15, 4, LexemeType::LatinToken),
            ]
        );
    }

    #[test]
    fn test_number_connectors() {
        // A comma ends the mixed run; the trailing dot never joins the number
        assert_eq!(
            scan("1,024.5."),
            vec![
                (0, 7, LexemeType::Number),
                (0, 1, LexemeType::LatinToken),
                (2, 6, LexemeType::LatinToken),
            ]
        );
    }

    #[test]
    fn test_mixed_connectors() {
        assert_eq!(
            scan("c++ a@b.com"),
            vec![
                (0, 3, LexemeType::LatinToken),
                (0, 1, LexemeType::LatinToken),
                (4, 7, LexemeType::LatinToken),
                (4, 1, LexemeType::LatinToken),
                (6, 1, LexemeType::LatinToken),
                (8, 3, LexemeType::LatinToken),
            ]
        );
    }

    #[test]
    fn test_runs_flush_at_window_end() {
        assert_eq!(
            scan("abc123"),
            vec![
                (0, 6, LexemeType::LatinToken),
                (0, 3, LexemeType::LatinToken),
                (3, 3, LexemeType::Number),
            ]
        );
    }

    #[test]
    fn test_reset_clears_all_runs() {
        let mut scanner = LetterScanner {
            letters: Some(Run { start: 0, end: 1 }),
            arabic: Some(Run { start: 2, end: 3 }),
            mixed: Some(Run { start: 0, end: 3 }),
        };
        scanner.reset();
        assert!(scanner.letters.is_none());
        assert!(scanner.arabic.is_none());
        assert!(scanner.mixed.is_none());
    }
}
