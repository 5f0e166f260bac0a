//! # Section Detector
//!
//! Recognises structural labels such as `Verse 2:`, `[Chorus]` or `(Pre chorus)`
//! and normalises them to a canonical name.
//!
//! ## Cleaning
//! 1. Trim and drop trailing `:` / `-` punctuation, so `[Chorus]:` still
//!    reads as a wrapped heading. A heading fully wrapped in `[...]` or
//!    `(...)` loses the wrapper; otherwise leading `[`/`(` runs are dropped,
//!    and trailing `]`/`)` runs are dropped when no matching opener is left inside the heading.
//! 2. Trailing `:` / `-` punctuation left inside the wrapper is removed.
//! 3. A space is inserted at letter/digit boundaries (`Verse2` -> `Verse 2`),
//!    except next to an `x`, so repeat markers like `x2` stay intact.
//!
//! ## Matching
//! The cleaned heading is tested against [`SECTION_MATCHERS`] in order; the
//! first hit wins and any remaining text becomes a suffix (`Verse 2`,
//! `Chorus (acoustic)`).

use once_cell::sync::Lazy;
use regex::Regex;

/// Ordered `(pattern, canonical name)` pairs.
///
/// Order is load-bearing: every pattern is anchored at the start, and the
/// multi-word labels (`Pre-Chorus`, `To Chorus`) have their own anchored
/// patterns so a bare `chorus` matcher never claims them.
pub const SECTION_MATCHERS: &[(&str, &str)] = &[
    (r"(?i)^verse\b", "Verse"),
    (r"(?i)^chorus\b", "Chorus"),
    (r"(?i)^pre[\s-]*chorus\b", "Pre-Chorus"),
    (r"(?i)^bridge\b", "Bridge"),
    (r"(?i)^intro\b", "Intro"),
    (r"(?i)^outro\b", "Outro"),
    (r"(?i)^instrumental\b", "Instrumental"),
    (r"(?i)^interlude\b", "Interlude"),
    (r"(?i)^solo\b", "Solo"),
    (r"(?i)^riff\b", "Riff"),
    (r"(?i)^ad[\s-]*lib\b", "Adlib"),
    (r"(?i)^tag\b", "Tag"),
    (r"(?i)^refrain\b", "Refrain"),
    (r"(?i)^prelude\b", "Prelude"),
    (r"(?i)^ending\b", "Ending"),
    (r"(?i)^coda\b", "Coda"),
    (r"(?i)^to\s+chorus\b", "To Chorus"),
];

static COMPILED_MATCHERS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    SECTION_MATCHERS
        .iter()
        .map(|(pattern, canonical)| {
            (
                Regex::new(pattern).expect("section matcher is a valid regex"),
                *canonical,
            )
        })
        .collect()
});

static TRAILING_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*[:\-]+\s*$").expect("valid regex"));

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Detect a section heading and return its canonical label.
///
/// # Examples
/// ```
/// use chordsheet::section::detect_section;
///
/// assert_eq!(detect_section("Verse 2:").as_deref(), Some("Verse 2"));
/// assert_eq!(detect_section("[Chorus]").as_deref(), Some("Chorus"));
/// assert_eq!(detect_section("hello"), None);
/// ```
pub fn detect_section(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let outer = TRAILING_PUNCTUATION.replace(trimmed, "");
    let unwrapped = strip_wrappers(outer.trim());
    let without_punct = TRAILING_PUNCTUATION.replace(unwrapped, "");
    let cleaned = space_letter_digit_boundaries(&without_punct);
    let cleaned = cleaned.trim();

    COMPILED_MATCHERS.iter().find_map(|(regex, canonical)| {
        let found = regex.find(cleaned)?;
        let suffix = cleaned[found.end()..].trim();
        let name = if suffix.is_empty() {
            (*canonical).to_string()
        } else {
            format!("{} {}", canonical, suffix)
        };
        Some(WHITESPACE_RUN.replace_all(&name, " ").trim().to_string())
    })
}

fn is_fully_wrapped(s: &str, open: char, close: char) -> bool {
    let Some(inner) = s.strip_prefix(open).and_then(|rest| rest.strip_suffix(close)) else {
        return false;
    };
    !inner.is_empty() && !inner.contains(close)
}

fn strip_wrappers(trimmed: &str) -> &str {
    if is_fully_wrapped(trimmed, '[', ']') || is_fully_wrapped(trimmed, '(', ')') {
        return trimmed[1..trimmed.len() - 1].trim();
    }

    let mut rest = trimmed.trim_start_matches(['[', '(']);
    loop {
        let unmatched = match rest.chars().last() {
            Some(']') => !rest.contains('['),
            Some(')') => !rest.contains('('),
            _ => false,
        };
        if !unmatched {
            break;
        }
        rest = &rest[..rest.len() - 1];
    }
    rest.trim()
}

/// Insert a space between adjacent letters and digits in either order,
/// leaving pairs that involve `x`/`X` alone.
fn space_letter_digit_boundaries(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev: Option<char> = None;
    for c in s.chars() {
        if let Some(p) = prev {
            let boundary = (p.is_ascii_alphabetic() && c.is_ascii_digit())
                || (p.is_ascii_digit() && c.is_ascii_alphabetic());
            let involves_x = matches!(p, 'x' | 'X') || matches!(c, 'x' | 'X');
            if boundary && !involves_x {
                out.push(' ');
            }
        }
        out.push(c);
        prev = Some(c);
    }
    out
}
