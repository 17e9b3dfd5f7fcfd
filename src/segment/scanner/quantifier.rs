use super::{scan_run, HitTracker, Run, RunStep, Scanner};
use crate::dict::Lexicon;
use crate::segment::context::ScanContext;
use crate::segment::lexeme::LexemeType;
use crate::utils::{is_cjk_numeral, CharClass};

/// Chinese numerals and the units that follow numbers.
///
/// Numeral runs (`壹万零捌佰`) become NUMBER lexemes. Unit words from the
/// quantifier dictionary become NUMBER_UNIT lexemes, but a unit match is only
/// attempted right after a number: while a numeral run is open, while a unit
/// match is in flight, or when a NUMBER lexeme ends exactly at the cursor.
#[derive(Debug, Default)]
pub struct QuantifierScanner {
    numeral: Option<Run>,
    units: HitTracker,
}

impl QuantifierScanner {
    pub fn new() -> Self {
        Self::default()
    }

    fn scan_numeral(&mut self, ctx: &mut ScanContext, lexicon: &Lexicon<'_>) {
        let step = if ctx.current_class() == CharClass::Han && is_cjk_numeral(ctx.current_char()) {
            RunStep::Extend
        } else {
            RunStep::Stop
        };
        scan_run(&mut self.numeral, step, ctx, lexicon, LexemeType::Number);
    }

    fn needs_unit_scan(&self, ctx: &ScanContext) -> bool {
        self.numeral.is_some()
            || !self.units.is_empty()
            || ctx.last_number_end() == Some(ctx.cursor())
    }

    fn scan_unit(&mut self, ctx: &mut ScanContext, lexicon: &Lexicon<'_>) {
        if !self.needs_unit_scan(ctx) {
            return;
        }
        if ctx.current_class() == CharClass::Han {
            self.units
                .step(ctx, lexicon, lexicon.quantifiers(), LexemeType::NumberUnit);
        } else {
            self.units.clear();
        }
        if ctx.is_window_consumed() {
            self.units.clear();
        }
    }
}

impl Scanner for QuantifierScanner {
    fn advance(&mut self, ctx: &mut ScanContext, lexicon: &Lexicon<'_>) -> bool {
        self.scan_numeral(ctx, lexicon);
        self.scan_unit(ctx, lexicon);
        self.numeral.is_some() || !self.units.is_empty()
    }

    fn reset(&mut self) {
        self.numeral = None;
        self.units.clear();
    }

    fn name(&self) -> &'static str {
        "quantifier"
    }
}
