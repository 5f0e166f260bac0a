//! # Line Merger
//!
//! Folds a chord line into the lyric line below it, placing each chord as an
//! inline `[chord]` annotation at the column it was written over.
//!
//! ```text
//! G       D        Em
//! Walking down the road
//! ```
//! becomes `[G]Walking [D]down the [Em]road`.

use crate::chord::is_pure_chord;
use crate::tokenizer::{chord_line_tokens, line_tokens, Token};

/// Chords of a chord line with their columns. Connectors are dropped.
pub fn extract_chord_positions(chord_line: &str) -> Vec<Token> {
    chord_line_tokens(chord_line)
        .unwrap_or_else(|| line_tokens(chord_line))
        .into_iter()
        .filter(|t| is_pure_chord(&t.text))
        .collect()
}

/// Insert the chords of `chord_line` into `lyric_line`.
///
/// A chord whose column falls inside the lyric goes in at that exact column.
/// Chords at or beyond the end of the lyric are appended in left-to-right
/// order. Trailing whitespace of the result is stripped.
pub fn merge_chords_and_lyrics(chord_line: &str, lyric_line: &str) -> String {
    let chords = extract_chord_positions(chord_line);
    let lyric: Vec<char> = lyric_line.chars().collect();

    let (inline, trailing): (Vec<&Token>, Vec<&Token>) =
        chords.iter().partition(|t| t.offset < lyric.len());

    let mut merged = String::with_capacity(lyric_line.len() + chords.len() * 4);
    let mut pending = inline.iter().peekable();
    for (column, c) in lyric.iter().enumerate() {
        while let Some(chord) = pending.next_if(|t| t.offset == column) {
            push_annotation(&mut merged, &chord.text);
        }
        merged.push(*c);
    }
    for chord in trailing {
        push_annotation(&mut merged, &chord.text);
    }

    merged.trim_end().to_string()
}

fn push_annotation(out: &mut String, chord: &str) {
    out.push('[');
    out.push_str(chord);
    out.push(']');
}
