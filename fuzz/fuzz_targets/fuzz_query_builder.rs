#![no_main]

use cjkseg::{Dictionary, QueryBuilder};
use libfuzzer_sys::fuzz_target;
use std::sync::{Arc, OnceLock};

fn builder() -> &'static QueryBuilder {
    static BUILDER: OnceLock<QueryBuilder> = OnceLock::new();
    BUILDER.get_or_init(|| QueryBuilder::new(Arc::new(Dictionary::builtin()), false))
}

fuzz_target!(|phrase: &str| {
    // Keeps each run fast; the tree itself grows linearly with the phrase
    if phrase.chars().count() > 512 {
        return;
    }
    let query = builder().build("f", phrase);
    let _ = query.to_string();
    for term in query.terms() {
        assert!(!term.is_empty());
    }
});
