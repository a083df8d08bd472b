//! Inline emphasis markup (`<strong>olive oil</strong>`) as styled spans.

use super::metrics::FontStyle;

const OPEN_TAGS: [&str; 2] = ["<strong>", "<b>"];
const CLOSE_TAGS: [&str; 2] = ["</strong>", "</b>"];

/// A run of text with a single style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub emphasized: bool,
}

impl Span {
    pub fn style(&self) -> FontStyle {
        if self.emphasized {
            FontStyle::Bold
        } else {
            FontStyle::Normal
        }
    }
}

/// A word or a whitespace run, carrying the style of the span it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub style: FontStyle,
}

impl Token {
    pub fn is_whitespace(&self) -> bool {
        self.text.chars().all(char::is_whitespace)
    }
}

/// Find the next delimiter at or after `from`, case-insensitively.
/// Returns (byte offset, tag length, opens emphasis).
fn next_delimiter(source: &str, from: usize) -> Option<(usize, usize, bool)> {
    let lower = source[from..].to_ascii_lowercase();
    OPEN_TAGS
        .iter()
        .map(|tag| (tag, true))
        .chain(CLOSE_TAGS.iter().map(|tag| (tag, false)))
        .filter_map(|(tag, opens)| lower.find(tag).map(|at| (from + at, tag.len(), opens)))
        .min_by_key(|(at, _, _)| *at)
}

/// Split `source` into alternating plain/emphasized spans.
///
/// Empty spans are omitted. Unbalanced tags are tolerated: an opening tag
/// without a close emphasizes the rest of the string, and a stray close tag
/// is dropped.
pub fn parse_spans(source: &str) -> Vec<Span> {
    fn push(text: &str, emphasized: bool, spans: &mut Vec<Span>) {
        if text.is_empty() {
            return;
        }
        match spans.last_mut() {
            Some(last) if last.emphasized == emphasized => last.text.push_str(text),
            _ => spans.push(Span {
                text: text.to_string(),
                emphasized,
            }),
        }
    }

    let mut spans = Vec::new();
    let mut emphasized = false;
    let mut cursor = 0;

    while let Some((at, len, opens)) = next_delimiter(source, cursor) {
        push(&source[cursor..at], emphasized, &mut spans);
        emphasized = opens;
        cursor = at + len;
    }
    push(&source[cursor..], emphasized, &mut spans);

    spans
}

/// The text of `source` with every emphasis delimiter removed.
pub fn strip_emphasis(source: &str) -> String {
    parse_spans(source).into_iter().map(|span| span.text).collect()
}

/// Split spans into word and whitespace tokens, so spacing between words
/// and across emphasis boundaries survives wrapping unchanged.
pub fn tokenize(spans: &[Span]) -> Vec<Token> {
    let mut tokens = Vec::new();
    for span in spans {
        let style = span.style();
        let mut current = String::new();
        let mut in_whitespace = false;

        for c in span.text.chars() {
            if !current.is_empty() && c.is_whitespace() != in_whitespace {
                tokens.push(Token {
                    text: std::mem::take(&mut current),
                    style,
                });
            }
            in_whitespace = c.is_whitespace();
            current.push(c);
        }
        if !current.is_empty() {
            tokens.push(Token {
                text: current,
                style,
            });
        }
    }
    tokens
}
