#![no_main]

use arbitrary::Arbitrary;
use cjkseg::segment::{ReadSource, Segmenter};
use cjkseg::Dictionary;
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;
use std::sync::{Arc, OnceLock};

#[derive(Debug, Arbitrary)]
struct Input {
    data: Vec<u8>,
    capacity: u16,
    longest: bool,
}

fn dictionary() -> Arc<Dictionary> {
    static DICT: OnceLock<Arc<Dictionary>> = OnceLock::new();
    Arc::clone(DICT.get_or_init(|| Arc::new(Dictionary::builtin())))
}

fuzz_target!(|input: Input| {
    // Arbitrary bytes (possibly invalid UTF-8) through a small window
    let source = ReadSource::new(Cursor::new(input.data));
    let segmenter =
        Segmenter::with_capacity(source, dictionary(), input.longest, input.capacity as usize);

    let mut previous: Option<(usize, usize)> = None;
    for lexeme in segmenter {
        let Ok(lexeme) = lexeme else { break };
        assert!(lexeme.length() > 0);
        assert_eq!(lexeme.text().chars().count(), lexeme.length());
        let current = (lexeme.abs_begin(), lexeme.length());
        if let Some((begin, length)) = previous {
            assert!(
                begin < current.0 || (begin == current.0 && length > current.1),
                "out of order: ({begin}, {length}) then {current:?}"
            );
        }
        previous = Some(current);
    }
});
