//! # Document Converter
//!
//! One pass over the input lines with one line of lookahead, turning a
//! plain-text chord sheet into inline annotations.
//!
//! ## Line Kinds
//! - **blank**: runs collapse to a single blank line
//! - **section**: `{comment: <label>}`, preceded by a blank separator
//! - **tab line**: kept verbatim (right-trimmed) so columns still line up.
//!   Checked before chord lines, since an empty string line like
//!   `B|-----------|` also tokenizes as a chord plus connectors.
//! - **chord line**: merged into the next non-blank line, or emitted on its
//!   own when followed by another chord line, a tab line, a section, or nothing
//! - **plain text**: whitespace runs collapsed, trimmed
//!
//! Leading and trailing blank lines are dropped from the result.

use crate::chord::is_pure_chord;
use crate::merge::merge_chords_and_lyrics;
use crate::section::detect_section;
use crate::tokenizer::{self, chord_line_tokens};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

static TAB_STRING_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[A-Ga-g][#b]?\s*\|").expect("valid regex"));

static TAB_CHARACTERS_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\s\-0-9|/hpsbrv~]+$").expect("valid regex"));

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

/// Options that change the converter's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConvertOptions {
    /// `[C G Am]` instead of `[C][G][Am]` for standalone chord lines.
    pub group_chords: bool,
}

/// Guitar tab or ASCII diagram line, e.g. `e|---0---3--|` or `--5h7--`.
pub fn is_tab_line(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return false;
    }
    TAB_STRING_PREFIX.is_match(line) || line.contains("-|-") || TAB_CHARACTERS_ONLY.is_match(trimmed)
}

/// Chord line that is not a tab line.
fn is_chord_line(line: &str) -> bool {
    !is_tab_line(line) && tokenizer::is_chord_line(line)
}

/// Render a standalone chord line.
fn standalone_chords(line: &str, options: ConvertOptions) -> String {
    let tokens = chord_line_tokens(line).unwrap_or_default();
    if options.group_chords {
        let joined: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        format!("[{}]", joined.join(" "))
    } else {
        tokens
            .iter()
            .filter(|t| is_pure_chord(&t.text))
            .map(|t| format!("[{}]", t.text))
            .collect()
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Collects output lines, collapsing blank runs.
#[derive(Default)]
struct Output {
    lines: Vec<String>,
}

impl Output {
    fn push(&mut self, line: String) {
        if line.is_empty() && self.lines.last().map_or(false, String::is_empty) {
            return;
        }
        self.lines.push(line);
    }

    fn push_blank(&mut self) {
        self.push(String::new());
    }

    fn ends_with_blank(&self) -> bool {
        self.lines.last().map_or(true, String::is_empty)
    }

    fn finish(self) -> String {
        let start = self.lines.iter().position(|l| !l.is_empty());
        let end = self.lines.iter().rposition(|l| !l.is_empty());
        match (start, end) {
            (Some(start), Some(end)) => self.lines[start..=end].join("\n"),
            _ => String::new(),
        }
    }
}

/// Convert a plain-text chord sheet into the annotated document.
///
/// # Example
/// ```
/// use chordsheet::convert::{convert_to_chordpro, ConvertOptions};
///
/// let source = "Verse 1\nG       D        Em\nWalking down the road\n";
/// let annotated = convert_to_chordpro(source, ConvertOptions::default());
/// assert_eq!(annotated, "{comment: Verse 1}\n[G]Walking [D]down the [Em]road");
/// ```
pub fn convert_to_chordpro(text: &str, options: ConvertOptions) -> String {
    let normalized = text.replace("\r\n", "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();
    let mut output = Output::default();

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i];

        if is_blank(line) {
            output.push_blank();
            i += 1;
            continue;
        }

        if let Some(label) = detect_section(line) {
            debug!("line {}: section {:?}", i + 1, label);
            if !output.ends_with_blank() {
                output.push_blank();
            }
            output.push(format!("{{comment: {}}}", label));
            i += 1;
            while i < lines.len() && is_blank(lines[i]) {
                i += 1;
            }
            continue;
        }

        if is_tab_line(line) {
            debug!("line {}: tab line", i + 1);
            output.push(line.trim_end().to_string());
            i += 1;
            continue;
        }

        if is_chord_line(line) {
            let mut next = i + 1;
            while next < lines.len() && is_blank(lines[next]) {
                next += 1;
            }
            let standalone = match lines.get(next) {
                None => true,
                Some(next_line) => {
                    is_chord_line(next_line)
                        || is_tab_line(next_line)
                        || detect_section(next_line).is_some()
                }
            };

            if standalone {
                debug!("line {}: standalone chord line", i + 1);
                output.push(standalone_chords(line, options));
                i += 1;
            } else {
                debug!("line {}: chord line merged with line {}", i + 1, next + 1);
                output.push(merge_chords_and_lyrics(line, lines[next]));
                i = next + 1;
            }
            continue;
        }

        output.push(WHITESPACE_RUN.replace_all(line, " ").trim().to_string());
        i += 1;
    }

    output.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(text: &str) -> String {
        convert_to_chordpro(text, ConvertOptions::default())
    }

    fn convert_grouped(text: &str) -> String {
        convert_to_chordpro(text, ConvertOptions { group_chords: true })
    }

    #[test]
    fn test_verse_example() {
        let source = "Verse 1\nG       D        Em\nWalking down the road";
        assert_eq!(
            convert(source),
            "{comment: Verse 1}\n[G]Walking [D]down the [Em]road"
        );
    }

    #[test]
    fn test_section_gets_blank_separator() {
        let source = "Hello there\n[Chorus]\nSing along";
        assert_eq!(convert(source), "Hello there\n\n{comment: Chorus}\nSing along");
    }

    #[test]
    fn test_blank_lines_after_section_are_skipped() {
        let source = "Chorus:\n\n\nC\nla la";
        assert_eq!(convert(source), "{comment: Chorus}\n[C]la la");
    }

    #[test]
    fn test_blank_runs_collapse() {
        let source = "\n\none\n\n\n\ntwo\n\n";
        assert_eq!(convert(source), "one\n\ntwo");
    }

    #[test]
    fn test_chord_line_followed_by_chord_line() {
        let source = "C  G\nAm F\nWords here";
        assert_eq!(convert(source), "[C][G]\n[Am]Wor[F]ds here");
    }

    #[test]
    fn test_chord_line_before_section_stands_alone() {
        let source = "Intro\nC G Am F\nVerse\nHello";
        assert_eq!(
            convert(source),
            "{comment: Intro}\n[C][G][Am][F]\n\n{comment: Verse}\nHello"
        );
    }

    #[test]
    fn test_last_chord_line_stands_alone() {
        assert_eq!(convert("words\nG D"), "words\n[G][D]");
    }

    #[test]
    fn test_lookahead_skips_blank_lines() {
        let source = "G     C\n\nHello world";
        assert_eq!(convert(source), "[G]Hello [C]world");
    }

    #[test]
    fn test_grouped_standalone_chords() {
        assert_eq!(convert_grouped("C  G - Am x2"), "[C G - Am x2]");
        assert_eq!(convert("C  G - Am x2"), "[C][G][Am]");
    }

    #[test]
    fn test_jammed_standalone_chords() {
        assert_eq!(convert("Am-G C"), "[Am][G][C]");
    }

    #[test]
    fn test_tab_lines_are_verbatim() {
        let source = "e|---0---3---|  \nB|---1-------|\n  --5h7--  ";
        assert_eq!(
            convert(source),
            "e|---0---3---|\nB|---1-------|\n  --5h7--"
        );
    }

    #[test]
    fn test_tab_block_with_empty_strings() {
        let source = "e|---0---3---|\nB|-----------|\nG|---0-------|\nD|-----------|\nA|-----------|\nE|---3-------|";
        assert_eq!(convert(source), source);
    }

    #[test]
    fn test_chord_line_above_tab_stands_alone() {
        let source = "Am    G\ne|---0---3---|\nB|-----------|";
        assert_eq!(convert(source), "[Am][G]\ne|---0---3---|\nB|-----------|");
        assert_eq!(
            convert_grouped("Am    G\n\nE|---3-------|"),
            "[Am G]\n\nE|---3-------|"
        );
    }

    #[test]
    fn test_plain_text_whitespace_collapsed() {
        assert_eq!(convert("  So    many   spaces  "), "So many spaces");
    }

    #[test]
    fn test_crlf_input() {
        assert_eq!(convert("Verse\r\nC\r\nHi"), "{comment: Verse}\n[C]Hi");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(convert(""), "");
        assert_eq!(convert("\n\n  \n"), "");
    }

    #[test]
    fn test_tab_line_detection() {
        assert!(is_tab_line("e|---0---|"));
        assert!(is_tab_line("G |--2--|"));
        assert!(is_tab_line("x-|-x"));
        assert!(is_tab_line("--5h7p5--/9"));
        assert!(!is_tab_line("Walking down the road"));
        assert!(!is_tab_line("   "));
        assert!(is_tab_line("B|-----------|"));
        assert!(!is_chord_line("B|-----------|"));
        assert!(is_chord_line("Am-G C"));
    }
}
