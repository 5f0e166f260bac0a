//! # Chord Tokenizer
//!
//! Splits raw lines into positioned tokens and recovers chords written without
//! whitespace between them (`Am-G`, `CGD`, `Gx2`).
//!
//! Offsets are character columns in the source line, which is what the
//! line merger needs to drop a chord above the right lyric character.

use crate::chord::{is_chord_token, is_pure_chord, CONNECTOR_PREFIX_REGEX};
use log::trace;

/// Longest prefix tried when looking for a chord inside a jammed fragment.
pub const MAX_CHORD_LEN: usize = 12;

/// A token and its character column within the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub offset: usize,
}

impl Token {
    pub fn new(text: impl Into<String>, offset: usize) -> Self {
        Self {
            text: text.into(),
            offset,
        }
    }
}

/// Whitespace-delimited tokens of `line` with their character offsets.
pub fn line_tokens(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut start = 0;

    for (column, c) in line.chars().enumerate() {
        if c.is_whitespace() {
            if !current.is_empty() {
                tokens.push(Token::new(std::mem::take(&mut current), start));
            }
        } else {
            if current.is_empty() {
                start = column;
            }
            current.push(c);
        }
    }
    if !current.is_empty() {
        tokens.push(Token::new(current, start));
    }

    tokens
}

/// Split a token of jammed chords and connectors into its parts.
///
/// Greedy longest match: at each position the longest chord of up to
/// [`MAX_CHORD_LEN`] characters is taken, otherwise a connector. When neither
/// matches, the token cannot be decomposed and is returned unchanged as a
/// single element.
///
/// Concatenating a successful split reproduces the input exactly.
///
/// # Examples
/// ```
/// use chordsheet::tokenizer::split_jammed_chords;
///
/// assert_eq!(split_jammed_chords("Am-G"), vec!["Am", "-", "G"]);
/// assert_eq!(split_jammed_chords("road"), vec!["road"]);
/// ```
pub fn split_jammed_chords(token: &str) -> Vec<String> {
    if token.chars().any(char::is_whitespace) {
        let pieces: Vec<String> = token
            .split_whitespace()
            .flat_map(split_jammed_chords)
            .collect();
        if !pieces.is_empty() && pieces.iter().all(|p| is_chord_token(p)) {
            return pieces;
        }
        return vec![token.to_string()];
    }

    if token.is_empty() || is_chord_token(token) {
        return vec![token.to_string()];
    }

    let bounds: Vec<usize> = token
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(token.len()))
        .collect();
    let char_count = bounds.len() - 1;

    let mut pieces = Vec::new();
    let mut pos = 0;
    while pos < char_count {
        let max_len = MAX_CHORD_LEN.min(char_count - pos);
        let longest_chord = (1..=max_len)
            .rev()
            .find(|&len| is_pure_chord(&token[bounds[pos]..bounds[pos + len]]));

        if let Some(len) = longest_chord {
            pieces.push(token[bounds[pos]..bounds[pos + len]].to_string());
            pos += len;
            continue;
        }

        match CONNECTOR_PREFIX_REGEX.find(&token[bounds[pos]..]) {
            Some(found) => {
                pieces.push(found.as_str().to_string());
                pos += found.as_str().chars().count();
            }
            None => {
                trace!("cannot split {:?} at column {}", token, pos);
                return vec![token.to_string()];
            }
        }
    }

    trace!("split {:?} into {:?}", token, pieces);
    pieces
}

/// Tokens of a chord line, with jammed chords expanded in place.
///
/// Returns `None` unless every token is a chord or connector (after
/// splitting) and at least one of them is a chord.
pub fn chord_line_tokens(line: &str) -> Option<Vec<Token>> {
    let mut expanded = Vec::new();

    for token in line_tokens(line) {
        if is_chord_token(&token.text) {
            expanded.push(token);
            continue;
        }

        let pieces = split_jammed_chords(&token.text);
        if !pieces.iter().all(|p| is_chord_token(p)) {
            return None;
        }
        let mut offset = token.offset;
        for piece in pieces {
            let width = piece.chars().count();
            expanded.push(Token::new(piece, offset));
            offset += width;
        }
    }

    if expanded.iter().any(|t| is_pure_chord(&t.text)) {
        Some(expanded)
    } else {
        None
    }
}

pub fn is_chord_line(line: &str) -> bool {
    chord_line_tokens(line).is_some()
}
