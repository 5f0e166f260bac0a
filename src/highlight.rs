//! # Highlighter
//!
//! Renders an annotated document as HTML for display. Chord annotations become
//! clickable spans whose `data-chord` attribute carries the trimmed chord text,
//! which is what a [`ChordPlayer`](crate::playback::ChordPlayer) receives.
//!
//! ## Markup
//! ```text
//! {comment: Verse}  ->  <span class="brace">{</span><span class="comment-label">comment:</span>
//!                       <span class="comment-value">Verse</span><span class="brace">}</span>
//! [Am7]             ->  <span class="chord" data-chord="Am7"><span class="bracket">[</span>
//!                       <span class="chord-text">Am7</span><span class="bracket">]</span></span>
//! ```
//!
//! Unclosed braces and brackets are rendered as literal punctuation.

use once_cell::sync::Lazy;
use regex::Regex;
use std::ops::Range;

static COMMENT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\{comment:[^}]*\}").expect("valid regex"));

/// A `[...]` annotation found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordSpan {
    /// Byte range of the whole annotation, brackets included.
    pub range: Range<usize>,
    /// Bracket content, trimmed.
    pub symbol: String,
}

pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        push_escaped(&mut out, c);
    }
    out
}

fn push_escaped(out: &mut String, c: char) {
    match c {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        _ => out.push(c),
    }
}

/// Every bracket annotation in `text`, in document order.
pub fn chord_spans(text: &str) -> Vec<ChordSpan> {
    let mut spans = Vec::new();
    let mut i = 0;
    while let Some(open) = text[i..].find('[').map(|p| p + i) {
        let Some(close) = text[open..].find(']').map(|p| p + open) else {
            break;
        };
        spans.push(ChordSpan {
            range: open..close + 1,
            symbol: text[open + 1..close].trim().to_string(),
        });
        i = close + 1;
    }
    spans
}

fn push_comment(out: &mut String, matched: &str) {
    let colon = matched.find(':').unwrap_or(0);
    let value = &matched[colon + 1..matched.len() - 1];
    let core = value.trim();
    let leading = &value[..value.len() - value.trim_start().len()];
    let trailing = &value[value.trim_end().len()..];

    out.push_str(r#"<span class="brace">{</span>"#);
    out.push_str(r#"<span class="comment-label">"#);
    out.push_str(&escape_html(&matched[1..colon + 1]));
    out.push_str("</span>");
    out.push_str(&escape_html(leading));
    out.push_str(r#"<span class="comment-value">"#);
    out.push_str(&escape_html(core));
    out.push_str("</span>");
    out.push_str(&escape_html(trailing));
    out.push_str(r#"<span class="brace">}</span>"#);
}

fn push_chord(out: &mut String, inner: &str) {
    out.push_str(r#"<span class="chord" data-chord=""#);
    out.push_str(&escape_html(inner.trim()));
    out.push_str(r#""><span class="bracket">[</span><span class="chord-text">"#);
    out.push_str(&escape_html(inner));
    out.push_str(r#"</span><span class="bracket">]</span></span>"#);
}

/// Render an annotated document as highlighted HTML.
pub fn highlight_chordpro(text: &str) -> String {
    let mut out = String::with_capacity(text.len() * 2);
    let mut i = 0;

    while i < text.len() {
        let rest = &text[i..];
        let Some(c) = rest.chars().next() else {
            break;
        };

        match c {
            '{' => {
                if let Some(found) = COMMENT_REGEX.find(rest) {
                    push_comment(&mut out, found.as_str());
                    i += found.end();
                    continue;
                }
                out.push_str(r#"<span class="brace">{</span>"#);
            }
            '}' => out.push_str(r#"<span class="brace">}</span>"#),
            '[' => {
                if let Some(close) = rest.find(']') {
                    push_chord(&mut out, &rest[1..close]);
                    i += close + 1;
                    continue;
                }
                out.push_str(r#"<span class="bracket">[</span>"#);
            }
            ']' => out.push_str(r#"<span class="bracket">]</span>"#),
            _ => push_escaped(&mut out, c),
        }
        i += c.len_utf8();
    }

    out
}
