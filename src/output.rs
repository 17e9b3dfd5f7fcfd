//! Output formatting for segmentation results and query trees

use crate::query::QueryNode;
use crate::segment::Lexeme;
use serde::Serialize;
use std::io::{self, Write};
use std::path::Path;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Standard output stream, colored only when requested (and a terminal).
pub fn stdout(color: bool) -> StandardStream {
    let choice = if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    StandardStream::stdout(choice)
}

/// Print lexemes one per line as `begin-end TYPE text`.
///
/// With a path, a heading line names the file first.
pub fn write_lexemes<W: WriteColor>(
    out: &mut W,
    path: Option<&Path>,
    lexemes: &[Lexeme],
) -> io::Result<()> {
    if let Some(path) = path {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
        writeln!(out, "{}", path.display())?;
        out.reset()?;
    }

    for lexeme in lexemes {
        write_lexeme(out, lexeme)?;
    }

    Ok(())
}

/// Print a single lexeme line.
pub fn write_lexeme<W: WriteColor>(out: &mut W, lexeme: &Lexeme) -> io::Result<()> {
    // Span
    out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(out, "{}-{}", lexeme.abs_begin(), lexeme.abs_end())?;
    out.reset()?;
    write!(out, " ")?;

    // Type
    out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
    write!(out, "{:<11}", lexeme.kind().as_str())?;
    out.reset()?;
    write!(out, " ")?;

    // Text
    out.set_color(ColorSpec::new().set_bold(true))?;
    write!(out, "{}", lexeme.text())?;
    out.reset()?;
    writeln!(out)
}

#[derive(Serialize)]
struct LexemeRecord<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    file: Option<&'a str>,
    begin: usize,
    end: usize,
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

/// Print lexemes as JSON lines.
pub fn write_lexemes_json<W: Write>(
    out: &mut W,
    path: Option<&Path>,
    lexemes: &[Lexeme],
) -> io::Result<()> {
    for lexeme in lexemes {
        write_lexeme_json(out, path, lexeme)?;
    }
    Ok(())
}

pub fn write_lexeme_json<W: Write>(out: &mut W, path: Option<&Path>, lexeme: &Lexeme) -> io::Result<()> {
    let record = LexemeRecord {
        file: path.and_then(Path::to_str),
        begin: lexeme.abs_begin(),
        end: lexeme.abs_end(),
        kind: lexeme.kind().as_str(),
        text: lexeme.text(),
    };
    serde_json::to_writer(&mut *out, &record)?;
    writeln!(out)
}

/// Print a query as an indented tree, one operator or term per line.
pub fn write_query_tree<W: WriteColor>(out: &mut W, query: &QueryNode) -> io::Result<()> {
    write_query_node(out, query, 0)
}

fn write_query_node<W: WriteColor>(out: &mut W, node: &QueryNode, depth: usize) -> io::Result<()> {
    let indent = "  ".repeat(depth);
    match node {
        QueryNode::Term { field, text } => {
            write!(out, "{indent}")?;
            out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
            write!(out, "{field}")?;
            out.reset()?;
            write!(out, ":")?;
            out.set_color(ColorSpec::new().set_bold(true))?;
            write!(out, "{text}")?;
            out.reset()?;
            writeln!(out)
        }
        QueryNode::And(nodes) | QueryNode::Or(nodes) => {
            let op = if matches!(node, QueryNode::And(_)) { "AND" } else { "OR" };
            write!(out, "{indent}")?;
            out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true))?;
            writeln!(out, "{op}")?;
            out.reset()?;
            for child in nodes {
                write_query_node(out, child, depth + 1)?;
            }
            Ok(())
        }
        QueryNode::Not(inner) => {
            write!(out, "{indent}")?;
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
            writeln!(out, "NOT")?;
            out.reset()?;
            write_query_node(out, inner, depth + 1)
        }
        QueryNode::Empty => {
            out.set_color(ColorSpec::new().set_dimmed(true))?;
            writeln!(out, "{indent}(matches nothing)")?;
            out.reset()
        }
    }
}

/// Trie state of one word, as reported by `cjkseg words`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordReport<'a> {
    pub word: &'a str,
    pub is_word: bool,
    pub is_prefix: bool,
    pub is_quantifier: bool,
    pub is_stop_word: bool,
}

pub fn write_word_reports<W: WriteColor>(out: &mut W, reports: &[WordReport<'_>]) -> io::Result<()> {
    for report in reports {
        out.set_color(ColorSpec::new().set_bold(true))?;
        write!(out, "{}", report.word)?;
        out.reset()?;

        let flags = [
            ("word", report.is_word),
            ("prefix", report.is_prefix),
            ("quantifier", report.is_quantifier),
            ("stopword", report.is_stop_word),
        ];
        let mut any = false;
        for (name, set) in flags {
            if set {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                write!(out, " {name}")?;
                out.reset()?;
                any = true;
            }
        }
        if !any {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
            write!(out, " unknown")?;
            out.reset()?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::LexemeType;
    use termcolor::Buffer;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Buffer) -> io::Result<()>,
    {
        let mut buf = Buffer::no_color();
        f(&mut buf).unwrap();
        String::from_utf8(buf.into_inner()).unwrap()
    }

    #[test]
    fn test_write_lexemes() {
        let lexemes = vec![
            Lexeme::with_text(0, 0, "windows", LexemeType::LatinToken),
            Lexeme::with_text(0, 7, "2000", LexemeType::Number),
        ];
        let text = render(|out| write_lexemes(out, Some(Path::new("a.txt")), &lexemes));
        assert_eq!(
            text,
            "a.txt\n0-7 LATIN_TOKEN windows\n7-11 NUMBER      2000\n"
        );
    }

    #[test]
    fn test_write_lexemes_json() {
        let lexemes = vec![Lexeme::with_text(4, 1, "银河", LexemeType::NormalWord)];
        let mut out = Vec::new();
        write_lexemes_json(&mut out, None, &lexemes).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"begin\":5,\"end\":7,\"type\":\"NORMAL_WORD\",\"text\":\"银河\"}\n"
        );
    }

    #[test]
    fn test_write_query_tree() {
        let query = QueryNode::Or(vec![
            QueryNode::term("t", "关键字"),
            QueryNode::And(vec![QueryNode::term("t", "关键"), QueryNode::term("t", "字")]),
        ]);
        let text = render(|out| write_query_tree(out, &query));
        assert_eq!(text, "OR\n  t:关键字\n  AND\n    t:关键\n    t:字\n");
    }

    #[test]
    fn test_write_word_reports() {
        let reports = [
            WordReport {
                word: "银河",
                is_word: true,
                is_prefix: false,
                is_quantifier: false,
                is_stop_word: false,
            },
            WordReport {
                word: "zz",
                is_word: false,
                is_prefix: false,
                is_quantifier: false,
                is_stop_word: false,
            },
        ];
        let text = render(|out| write_word_reports(out, &reports));
        assert_eq!(text, "银河 word\nzz unknown\n");
    }
}
