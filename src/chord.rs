//! # Chord Classifier
//!
//! Decides whether a token is a chord symbol, a connector, or neither.
//!
//! ## Chord Grammar
//! ```text
//! N.C. | NC                                   (no chord, case-insensitive)
//! root   [A-G] (# | b)?
//! quality  maj | min | dim | aug | sus | add | mmaj | madd | m | M | Δ
//! extension  digits
//! sus<digits>  add<digits>
//! altered  ([#b+-] (5|7|9|11|13))*
//! bass   /root (/root)?
//! note   "(" free text ")"
//! ```
//!
//! The grammar is deliberately permissive. It accepts what real-world chord
//! charts contain and does not validate harmony, so `Cmaj7sus4add9` is a chord.
//!
//! ## Connectors
//! Filler that may appear on a chord line but is never a chord itself:
//! dash/tilde runs (`--`, `~`), colon/pipe runs (`|`, `:|`) and repeat
//! markers (`x2`, `X4`).

use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern shared by the whole-token matcher and the transposer's root parser.
pub(crate) const ROOT_PATTERN: &str = r"[A-G](?:#|b)?";

pub(crate) const NO_CHORD_PATTERN: &str = r"(?i:N\.?C\.?)";

static CHORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        r"^(?:{nc}|{root}(?:maj|min|dim|aug|sus|add|mmaj|madd|m|M|Δ)?(?:\d+)?(?:sus\d+)?(?:add\d+)?(?:[#b+\-](?:5|7|9|11|13))*(?:/{root}(?:/{root})?)?(?:\([^)]+\))?)$",
        nc = NO_CHORD_PATTERN,
        root = ROOT_PATTERN,
    );
    Regex::new(&pattern).expect("chord grammar is a valid regex")
});

static NO_CHORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^{}$", NO_CHORD_PATTERN)).expect("no-chord pattern is a valid regex")
});

static CONNECTOR_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-–—~]+|[:|]+|[xX]\d+)$").expect("connector pattern is a valid regex"));

/// Anchored at the start only, so the tokenizer can peel a connector off the
/// front of a jammed fragment.
pub(crate) static CONNECTOR_PREFIX_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[-–—~]+|[:|]+|[xX]\d+)").expect("connector pattern is a valid regex"));

/// True iff the whole token matches the chord grammar.
///
/// # Examples
/// ```
/// use chordsheet::chord::is_pure_chord;
///
/// assert!(is_pure_chord("Am7"));
/// assert!(is_pure_chord("Am7/G"));
/// assert!(is_pure_chord("N.C."));
/// assert!(!is_pure_chord("xyz"));
/// assert!(!is_pure_chord("x4"));
/// ```
pub fn is_pure_chord(token: &str) -> bool {
    CHORD_REGEX.is_match(token)
}

/// True for dash/tilde runs, colon/pipe runs and `x<digits>` repeat markers.
pub fn is_connector(token: &str) -> bool {
    CONNECTOR_REGEX.is_match(token)
}

/// A token allowed on a chord line: a chord or a connector.
pub fn is_chord_token(token: &str) -> bool {
    is_pure_chord(token) || is_connector(token)
}

/// The `N.C.` marker, which has no root to transpose or voice.
pub fn is_no_chord(token: &str) -> bool {
    NO_CHORD_REGEX.is_match(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("C")]
    #[case("Am")]
    #[case("Am7")]
    #[case("Am7/G")]
    #[case("C#m7/G")]
    #[case("Bbmaj7")]
    #[case("Dsus4")]
    #[case("Esus2/F#")]
    #[case("Cadd9")]
    #[case("G7#9")]
    #[case("C7b9#11")]
    #[case("D/F#/A")]
    #[case("Em(add9)")]
    #[case("FΔ7")]
    #[case("Cmmaj7")]
    #[case("N.C.")]
    #[case("NC")]
    #[case("n.c")]
    fn test_pure_chords(#[case] token: &str) {
        assert!(is_pure_chord(token), "{} should be a chord", token);
    }

    #[rstest]
    #[case("xyz")]
    #[case("x4")]
    #[case("H")]
    #[case("am")]
    #[case("Walking")]
    #[case("Am7/")]
    #[case("C()")]
    #[case("")]
    #[case("-")]
    fn test_not_chords(#[case] token: &str) {
        assert!(!is_pure_chord(token), "{} should not be a chord", token);
    }

    #[test]
    fn test_connectors() {
        assert!(is_connector("-"));
        assert!(is_connector("---"));
        assert!(is_connector("~~"));
        assert!(is_connector("–"));
        assert!(is_connector("|"));
        assert!(is_connector(":|"));
        assert!(is_connector("||:"));
        assert!(is_connector("x2"));
        assert!(is_connector("X12"));

        assert!(!is_connector("x"));
        assert!(!is_connector("-|"));
        assert!(!is_connector("G"));
    }

    #[test]
    fn test_chord_token_accepts_both() {
        assert!(is_chord_token("G"));
        assert!(is_chord_token("x4"));
        assert!(is_chord_token("|"));
        assert!(!is_chord_token("road"));
    }

    #[test]
    fn test_no_chord_marker() {
        assert!(is_no_chord("N.C."));
        assert!(is_no_chord("nc"));
        assert!(!is_no_chord("N.C.7"));
        assert!(!is_no_chord("C"));
    }
}
