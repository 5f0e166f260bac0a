use crate::chord::{is_no_chord, is_pure_chord, ROOT_PATTERN};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

pub const SHARP_NOTES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];
pub const FLAT_NOTES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

static ROOT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^({})(.*)$", ROOT_PATTERN)).expect("valid regex"));

static BRACKET_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]").expect("valid regex"));

static NON_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").expect("valid regex"));

/// Note name to semitone offset from C.
///
/// Both spellings of every black key map to the same index, as do the
/// double enharmonics `B#`, `Cb`, `E#` and `Fb`.
pub fn note_to_semitone(note: &str) -> Option<u8> {
    let index = match note {
        "C" | "B#" => 0,
        "C#" | "Db" => 1,
        "D" => 2,
        "D#" | "Eb" => 3,
        "E" | "Fb" => 4,
        "F" | "E#" => 5,
        "F#" | "Gb" => 6,
        "G" => 7,
        "G#" | "Ab" => 8,
        "A" => 9,
        "A#" | "Bb" => 10,
        "B" | "Cb" => 11,
        _ => return None,
    };
    Some(index)
}

/// Spell a semitone offset from C, wrapping into `0..12`.
pub fn semitone_to_note(semitone: i32, prefer_flat: bool) -> &'static str {
    let index = semitone.rem_euclid(12) as usize;
    if prefer_flat {
        FLAT_NOTES[index]
    } else {
        SHARP_NOTES[index]
    }
}

/// Transpose a single note name by `steps` semitones.
///
/// `prefer_flat` picks the spelling; `None` infers it from the note itself
/// (flats stay flats, everything else is spelled with sharps). Unknown
/// notes come back unchanged.
///
/// # Examples
/// ```
/// use chordsheet::transpose::transpose_note;
///
/// assert_eq!(transpose_note("C", 1, None), "C#");
/// assert_eq!(transpose_note("Bb", 1, None), "B");
/// assert_eq!(transpose_note("A", 1, Some(true)), "Bb");
/// assert_eq!(transpose_note("B#", -1, None), "B");
/// ```
pub fn transpose_note(note: &str, steps: i32, prefer_flat: Option<bool>) -> String {
    let normalized: String = note
        .chars()
        .filter(|c| matches!(c, 'A'..='G' | 'a'..='g' | '#'))
        .collect();
    let mut chars = normalized.chars();
    let Some(first) = chars.next() else {
        return note.to_string();
    };
    let formatted: String = std::iter::once(first.to_ascii_uppercase())
        .chain(chars.map(|c| if c == 'B' { 'b' } else { c }))
        .collect();

    let Some(index) = note_to_semitone(&formatted) else {
        return note.to_string();
    };

    let has_flat = formatted[1..].contains('b');
    let has_sharp = formatted.contains('#');
    let flat = prefer_flat.unwrap_or(has_flat && !has_sharp);

    semitone_to_note(i32::from(index) + steps, flat).to_string()
}

/// Transpose a chord symbol's root and slash basses, keeping the rest.
///
/// # Examples
/// ```
/// use chordsheet::transpose::transpose_chord_symbol;
///
/// assert_eq!(transpose_chord_symbol("C#m7/G", 2, false), "D#m7/A");
/// assert_eq!(transpose_chord_symbol("Bbmaj7", 2, false), "Cmaj7");
/// assert_eq!(transpose_chord_symbol("N.C.", 5, false), "N.C.");
/// ```
pub fn transpose_chord_symbol(symbol: &str, steps: i32, force_flats: bool) -> String {
    if steps == 0 && !force_flats {
        return symbol.to_string();
    }

    symbol
        .split('/')
        .map(|part| transpose_segment(part, steps, force_flats))
        .collect::<Vec<_>>()
        .join("/")
}

fn transpose_segment(part: &str, steps: i32, force_flats: bool) -> String {
    let core = part.trim();
    if core.is_empty() || is_no_chord(core) {
        return part.to_string();
    }
    let Some(caps) = ROOT_REGEX.captures(core) else {
        return part.to_string();
    };

    let start = part.len() - part.trim_start().len();
    let end = start + core.len();
    let root = &caps[1];
    let suffix = &caps[2];

    let prefer_flat = if force_flats {
        Some(true)
    } else if root.contains('#') {
        Some(false)
    } else if root.len() > 1 && root.ends_with('b') {
        Some(true)
    } else {
        None
    };

    format!(
        "{}{}{}{}",
        &part[..start],
        transpose_note(root, steps, prefer_flat),
        suffix,
        &part[end..]
    )
}

fn transpose_bracket_content(inner: &str, steps: i32, force_flats: bool) -> String {
    let mut out = String::with_capacity(inner.len() + 4);
    let mut last = 0;
    for token in NON_WHITESPACE.find_iter(inner) {
        out.push_str(&inner[last..token.start()]);
        if is_pure_chord(token.as_str()) {
            out.push_str(&transpose_chord_symbol(token.as_str(), steps, force_flats));
        } else {
            out.push_str(token.as_str());
        }
        last = token.end();
    }
    out.push_str(&inner[last..]);
    out
}

/// Transpose every `[...]` chord annotation in an annotated document.
///
/// Only bracket contents change; every other character is copied as is.
/// Grouped brackets (`[C - G x2]`) transpose each chord and keep the rest.
/// With `steps == 0` and `force_flats == false` the text is returned
/// unchanged.
///
/// Always transpose from the untransposed base document: round trips with
/// mixed spellings are only exact relative to that base.
pub fn apply_transpose(text: &str, steps: i32, force_flats: bool) -> String {
    if steps == 0 && !force_flats {
        return text.to_string();
    }
    debug!("transposing by {} (flats: {})", steps, force_flats);

    BRACKET_REGEX
        .replace_all(text, |caps: &regex::Captures| {
            format!("[{}]", transpose_bracket_content(&caps[1], steps, force_flats))
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_note_table_enharmonics() {
        assert_eq!(note_to_semitone("B#"), note_to_semitone("C"));
        assert_eq!(note_to_semitone("Cb"), note_to_semitone("B"));
        assert_eq!(note_to_semitone("E#"), note_to_semitone("F"));
        assert_eq!(note_to_semitone("Fb"), note_to_semitone("E"));
        assert_eq!(note_to_semitone("Db"), Some(1));
        assert_eq!(note_to_semitone("H"), None);
    }

    #[test]
    fn test_semitone_wraps_negative() {
        assert_eq!(semitone_to_note(-1, false), "B");
        assert_eq!(semitone_to_note(13, true), "Db");
        assert_eq!(semitone_to_note(-14, true), "Bb");
    }

    #[rstest]
    #[case("C", 1, None, "C#")]
    #[case("C", -1, None, "B")]
    #[case("Eb", 2, None, "F")]
    #[case("Eb", 3, None, "Gb")]
    #[case("F#", 1, None, "G")]
    #[case("F#", 0, Some(true), "Gb")]
    #[case("G", 1, Some(true), "Ab")]
    #[case("A#", 1, Some(true), "B")]
    #[case("bb", 2, None, "C")]
    #[case("H", 3, None, "H")]
    #[case("", 3, None, "")]
    fn test_transpose_note(
        #[case] note: &str,
        #[case] steps: i32,
        #[case] prefer_flat: Option<bool>,
        #[case] expected: &str,
    ) {
        assert_eq!(transpose_note(note, steps, prefer_flat), expected);
    }

    #[rstest]
    #[case("C#m7/G", 2, false, "D#m7/A")]
    #[case("Am7", 3, false, "Cm7")]
    #[case("D/F#/A", 2, false, "E/G#/B")]
    #[case("Bbmaj7", 1, false, "Bmaj7")]
    #[case("Ebsus4", 1, false, "Esus4")]
    #[case("Gadd9", 1, true, "Abadd9")]
    #[case("C#m", 0, true, "Dbm")]
    #[case("Em(add9)", 2, false, "F#m(add9)")]
    #[case("N.C.", 4, false, "N.C.")]
    #[case("G7b9", 5, false, "C7b9")]
    fn test_transpose_chord_symbol(
        #[case] symbol: &str,
        #[case] steps: i32,
        #[case] force_flats: bool,
        #[case] expected: &str,
    ) {
        assert_eq!(transpose_chord_symbol(symbol, steps, force_flats), expected);
    }

    #[test]
    fn test_apply_transpose_only_touches_brackets() {
        let doc = "{comment: Verse 1}\n[G]Walking [D]down the [Em]road to C";
        assert_eq!(
            apply_transpose(doc, 2, false),
            "{comment: Verse 1}\n[A]Walking [E]down the [F#m]road to C"
        );
    }

    #[test]
    fn test_apply_transpose_grouped_brackets() {
        assert_eq!(apply_transpose("[C - G x2]", 2, false), "[D - A x2]");
        assert_eq!(apply_transpose("[ Am  F ]", -2, true), "[ Gm  Eb ]");
    }

    #[test]
    fn test_apply_transpose_leaves_non_chords() {
        assert_eq!(apply_transpose("[hello] [C", 1, false), "[hello] [C");
    }

    #[test]
    fn test_zero_steps_is_identity() {
        let doc = "[C#]one [Bb]two";
        assert_eq!(apply_transpose(doc, 0, false), doc);
    }

    #[test]
    fn test_idempotent_after_zero_offset() {
        let doc = "[C]Amazing [F]grace how [C/E]sweet the [G7]sound";
        for steps in -11..=11 {
            for flats in [false, true] {
                let once = apply_transpose(doc, steps, flats);
                assert_eq!(apply_transpose(&once, 0, flats), once, "steps {}", steps);
            }
        }
    }

    #[test]
    fn test_round_trip_with_sharps() {
        let doc = "[C]one [C#m7/G#]two [F#sus4]three [B/D#]four";
        for steps in 1..12 {
            let up = apply_transpose(doc, steps, false);
            let down = apply_transpose(&up, -steps, false);
            assert_eq!(down, doc, "steps {}", steps);
        }
    }

    #[test]
    fn test_round_trip_with_flats() {
        let doc = "[Bb]one [Ebmaj7/G]two [Ab]three [Dbm]four";
        for steps in 1..12 {
            let up = apply_transpose(doc, steps, true);
            let down = apply_transpose(&up, (12 - steps) % 12, true);
            assert_eq!(down, doc, "steps {}", steps);
        }
    }
}
