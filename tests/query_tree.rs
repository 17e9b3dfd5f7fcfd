//! Query construction from ambiguous phrases.

use cjkseg::query::QueryBranch;
use cjkseg::{segment_text, Dictionary, Occur, QueryBuilder, QueryNode};
use std::sync::Arc;

fn dictionary() -> Arc<Dictionary> {
    Arc::new(Dictionary::from_words(
        [
            "飞流直下三千尺",
            "飞流",
            "三千",
            "海岸线",
            "海岸",
            "岸线",
            "很长",
            "唐朝",
            "诗人",
            "李白",
        ],
        Vec::<&str>::new(),
        ["的"],
    ))
}

#[test]
fn test_compound_or_decomposition() {
    let builder = QueryBuilder::new(dictionary(), false);
    let query = builder.build("content", "飞流直下三千尺");
    assert_eq!(
        query.to_string(),
        "(content:飞流直下三千尺 OR (content:飞流 AND content:三千))"
    );

    // Spacing inside the phrase changes nothing
    let spaced = builder.build("content", "飞流直下 三千尺");
    assert_eq!(spaced, query);
    assert_eq!(builder.cache_len(), 1);
}

#[test]
fn test_longest_match_keeps_only_compound() {
    let builder = QueryBuilder::new(dictionary(), true);
    assert_eq!(
        builder.build("content", "飞流直下三千尺"),
        QueryNode::term("content", "飞流直下三千尺")
    );
}

#[test]
fn test_alternatives_then_following_word() {
    let builder = QueryBuilder::new(dictionary(), false);
    assert_eq!(
        builder.build("f", "海岸线很长").to_string(),
        "((f:海岸线 OR f:海岸 OR f:岸线) AND f:很长)"
    );
}

#[test]
fn test_latin_decomposition() {
    let builder = QueryBuilder::new(dictionary(), false);
    assert_eq!(
        builder.build("f", "windows2000").to_string(),
        "(f:windows2000 OR (f:windows AND f:2000))"
    );
}

#[test]
fn test_stop_words_drop_out_of_queries() {
    let builder = QueryBuilder::new(dictionary(), false);
    assert_eq!(builder.build("t", "李白的诗人").to_string(), "(t:李白 AND t:诗人)");
    assert!(builder.build("t", "的").is_empty());
}

#[test]
fn test_query_matches_either_reading() {
    let query = QueryBuilder::new(dictionary(), false).build("f", "飞流直下三千尺");
    let compound = |_: &str, text: &str| text == "飞流直下三千尺";
    let parts = |_: &str, text: &str| text == "飞流" || text == "三千";
    let neither = |_: &str, text: &str| text == "三千";
    assert!(query.matches(&compound));
    assert!(query.matches(&parts));
    assert!(!query.matches(&neither));
}

#[test]
fn test_tree_from_segmenter_output() {
    let lexemes = segment_text("唐朝诗人李白", &dictionary(), false);
    let root = QueryBranch::from_lexemes(&lexemes);
    assert_eq!(
        root.to_query("t").to_string(),
        "(t:唐朝 AND t:诗人 AND t:李白)"
    );
    assert_eq!(root.to_queries("t").len(), 3);
}

#[test]
fn test_multi_field_phrase() {
    let builder = QueryBuilder::new(dictionary(), false);
    assert_eq!(
        builder.build_multi_field(&["title", "body"], "唐朝诗人").to_string(),
        "((title:唐朝 AND title:诗人) OR (body:唐朝 AND body:诗人))"
    );
}

#[test]
fn test_multi_field_clauses() {
    let builder = QueryBuilder::new(dictionary(), false);
    let query = builder.build_clauses(
        &["title", "author", "body"],
        &["唐朝", "李白"],
        &[Occur::Should, Occur::Must, Occur::MustNot],
    );
    assert_eq!(query.to_string(), "(author:李白 AND NOT body:李白)");

    let any = builder.build_clauses(&["title", "body"], &["唐朝", "李白"], &[]);
    assert_eq!(any.to_string(), "(title:唐朝 OR body:李白)");
}

#[test]
fn test_empty_phrases() {
    let builder = QueryBuilder::new(dictionary(), false);
    assert!(builder.build("f", "").is_empty());
    assert!(builder.build("f", "   ").is_empty());
    assert!(builder.build_multi_field(&["a", "b"], "").is_empty());
    let query = builder.build_clauses(&["a", "b"], &["", "李白"], &[Occur::Must, Occur::Should]);
    assert_eq!(query.to_string(), "b:李白");
}

#[test]
fn test_overlapping_words_keep_query_small() {
    let text = "天地玄黄宇宙洪荒日月盈昃辰宿列张寒来暑往秋收冬藏闰余成岁律吕调阳云腾致雨露结为霜金生丽水玉出昆冈剑号巨阙珠称夜光果珍李柰菜重芥姜";
    let chars: Vec<char> = text.chars().collect();
    let bigrams: Vec<String> = chars.windows(2).map(|pair| pair.iter().collect()).collect();
    let dict = Arc::new(Dictionary::from_words(
        bigrams.iter().map(String::as_str),
        Vec::<&str>::new(),
        Vec::<&str>::new(),
    ));
    let builder = QueryBuilder::new(dict, false);

    let query = builder.build("f", text);
    let terms = query.terms();
    assert_eq!(terms.len(), bigrams.len());
    for bigram in &bigrams {
        assert!(terms.contains(&bigram.as_str()), "missing {bigram}");
    }
}
