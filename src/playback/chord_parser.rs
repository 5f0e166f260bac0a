//! Chord symbol voicing for sample playback
//!
//! Resolves chord symbols (C, Am, G7, D/F#, etc.) to the guitar samples that
//! are actually available, so a click on a chord can be strummed.

use super::types::ChordVoicing;
use crate::chord::{is_no_chord, ROOT_PATTERN};
use crate::transpose::{note_to_semitone, SHARP_NOTES};
use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

/// Guitar samples on disk, in sharp spelling.
pub const SAMPLE_NOTES: &[&str] = &[
    "A2", "A#2", "A3", "A#3", "A4", "A#4", "B2", "B3", "B4", "C3", "C4", "C5", "C#3", "C#4",
    "C#5", "D2", "D3", "D4", "D5", "D#2", "D#3", "D#4", "E2", "E3", "E4", "F2", "F3", "F4",
    "F#2", "F#3", "F#4", "G2", "G3", "G4", "G#2", "G#3", "G#4",
];

const LOWEST_OCTAVE: i32 = 2;
const HIGHEST_OCTAVE: i32 = 5;

static ROOT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!("^({})(.*)$", ROOT_PATTERN)).expect("valid regex"));

/// Intervals above the root for a chord quality.
///
/// # Supported Chord Types
/// - **Major**: ``, `maj`, `M` → root, major 3rd, perfect 5th
/// - **Minor**: `m`, `min`, `-` → root, minor 3rd, perfect 5th
/// - **Dominant 7th**: `7` → adds minor 7th
/// - **Major 7th**: `maj7`, `M7`, `Δ`, `Δ7` → adds major 7th
/// - **Minor 7th**: `m7`, `min7`, `-7`
/// - **Diminished / half-diminished**: `dim`, `dim7`, `m7b5`
/// - **Augmented**: `aug`, `+`
/// - **Sus**: `sus`, `sus4`, `sus2`, `7sus4`
/// - **Sixths, adds, ninths, power chords**: `6`, `m6`, `add9`, `2`, `9`, `maj9`, `m9`, `5`
///
/// Anything else falls back to a triad (minor when the quality starts with
/// `m` but not `maj`), with a minor 7th when a `7` appears.
pub fn quality_intervals(quality: &str) -> Vec<u8> {
    match quality {
        "" | "maj" | "M" => vec![0, 4, 7],
        "m" | "min" | "-" => vec![0, 3, 7],
        "7" => vec![0, 4, 7, 10],
        "maj7" | "M7" | "Δ" | "Δ7" => vec![0, 4, 7, 11],
        "m7" | "min7" | "-7" => vec![0, 3, 7, 10],
        "dim" | "°" => vec![0, 3, 6],
        "dim7" | "°7" => vec![0, 3, 6, 9],
        "m7b5" | "ø" => vec![0, 3, 6, 10],
        "aug" | "+" => vec![0, 4, 8],
        "sus" | "sus4" => vec![0, 5, 7],
        "sus2" => vec![0, 2, 7],
        "7sus4" | "7sus" => vec![0, 5, 7, 10],
        "6" => vec![0, 4, 7, 9],
        "m6" => vec![0, 3, 7, 9],
        "add9" | "2" => vec![0, 4, 7, 14],
        "9" => vec![0, 4, 7, 10, 14],
        "maj9" | "M9" => vec![0, 4, 7, 11, 14],
        "m9" | "min9" => vec![0, 3, 7, 10, 14],
        "5" => vec![0, 7],
        _ => {
            let minor = quality.starts_with('m') && !quality.starts_with("maj");
            let mut intervals = if minor { vec![0, 3, 7] } else { vec![0, 4, 7] };
            if quality.contains('7') {
                intervals.push(10);
            }
            intervals
        }
    }
}

/// Pitch classes (0 = C) of a chord and of its slash bass.
///
/// Returns `None` for `N.C.` and anything without a recognisable root.
///
/// # Examples
/// ```
/// use chordsheet::playback::parse_chord_symbol;
///
/// // A minor: A, C, E
/// assert_eq!(parse_chord_symbol("Am"), Some((vec![9, 0, 4], None)));
///
/// // G7 over B
/// assert_eq!(parse_chord_symbol("G7/B"), Some((vec![7, 11, 2, 5], Some(11))));
/// ```
pub fn parse_chord_symbol(symbol: &str) -> Option<(Vec<u8>, Option<u8>)> {
    let symbol = symbol.trim();
    if symbol.is_empty() || is_no_chord(symbol) {
        return None;
    }

    let mut parts = symbol.split('/');
    let main = parts.next()?;
    let bass = parts.next().and_then(|b| root_semitone(b.trim()).map(|(pc, _)| pc));

    let (root, quality) = root_semitone(main)?;
    let quality = match quality.find('(') {
        Some(paren) => &quality[..paren],
        None => quality,
    };

    let pitch_classes = quality_intervals(quality)
        .into_iter()
        .map(|interval| (root + interval) % 12)
        .collect();
    Some((pitch_classes, bass))
}

fn root_semitone(part: &str) -> Option<(u8, &str)> {
    let caps = ROOT_REGEX.captures(part)?;
    let root = caps.get(1)?;
    let rest = caps.get(2)?;
    Some((note_to_semitone(root.as_str())?, rest.as_str()))
}

fn is_sample_available(note: &str) -> bool {
    SAMPLE_NOTES.contains(&note)
}

/// Closest octave of `pitch_class` with a sample, searching the preferred
/// octave first, then +1, -1, +2, -2.
pub fn find_available_octave(pitch_class: u8, preferred_octave: i32) -> Option<String> {
    let name = SHARP_NOTES[usize::from(pitch_class % 12)];
    [0, 1, -1, 2, -2]
        .iter()
        .map(|offset| preferred_octave + offset)
        .filter(|octave| (LOWEST_OCTAVE..=HIGHEST_OCTAVE).contains(octave))
        .map(|octave| format!("{}{}", name, octave))
        .find(|note| is_sample_available(note))
}

/// Resolve a chord symbol to available samples.
///
/// The root is voiced around octave 3 and the upper tones around octave 4;
/// a slash bass goes in octave 2 (or 3). Returns `None` when nothing is
/// playable.
pub fn voice_chord(symbol: &str) -> Option<ChordVoicing> {
    let Some((pitch_classes, bass)) = parse_chord_symbol(symbol) else {
        warn!("cannot parse chord {:?}", symbol);
        return None;
    };

    let mut notes: Vec<String> = Vec::new();
    for (index, pitch_class) in pitch_classes.into_iter().enumerate() {
        let octave = if index == 0 { 3 } else { 4 };
        if let Some(note) = find_available_octave(pitch_class, octave) {
            if !notes.contains(&note) {
                notes.push(note);
            }
        }
    }

    if notes.is_empty() {
        warn!("no playable notes for chord {:?}", symbol);
        return None;
    }

    let bass = bass.and_then(|pc| find_available_octave(pc, 2).or_else(|| find_available_octave(pc, 3)));

    Some(ChordVoicing {
        symbol: symbol.trim().to_string(),
        notes,
        bass,
    })
}
