//! View-model for an interactive editor.
//!
//! Holds the raw input, the untransposed base document and the transpose
//! state. The displayed text is recomputed from the base on every request,
//! so stepping the offset up and down never accumulates spelling drift.

use crate::config::{check_transpose_range, Config, MAX_TRANSPOSE, MIN_TRANSPOSE};
use crate::convert::{convert_to_chordpro, ConvertOptions};
use crate::error::Result;
use crate::highlight::highlight_chordpro;
use crate::transpose::apply_transpose;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransposeState {
    pub steps: i32,
    pub prefer_flats: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    input: String,
    base: String,
    options: ConvertOptions,
    transpose: TransposeState,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            input: String::new(),
            base: String::new(),
            options: ConvertOptions {
                group_chords: config.group_chords,
            },
            transpose: TransposeState {
                steps: config.transpose_steps.clamp(MIN_TRANSPOSE, MAX_TRANSPOSE),
                prefer_flats: config.use_flats,
            },
        }
    }

    /// Replace the input text. Rebuilds the base document and resets the
    /// offset to 0.
    pub fn set_input(&mut self, text: &str) {
        self.input = text.to_string();
        self.base = convert_to_chordpro(text, self.options);
        self.transpose.steps = 0;
    }

    pub fn clear(&mut self) {
        self.set_input("");
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// The untransposed annotated document.
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn transpose_state(&self) -> TransposeState {
        self.transpose
    }

    pub fn transpose_up(&mut self) -> bool {
        self.step_transpose(1)
    }

    pub fn transpose_down(&mut self) -> bool {
        self.step_transpose(-1)
    }

    fn step_transpose(&mut self, delta: i32) -> bool {
        let next = self.transpose.steps + delta;
        if !(MIN_TRANSPOSE..=MAX_TRANSPOSE).contains(&next) {
            return false;
        }
        self.transpose.steps = next;
        true
    }

    pub fn set_transpose(&mut self, steps: i32) -> Result<()> {
        check_transpose_range(steps)?;
        self.transpose.steps = steps;
        Ok(())
    }

    pub fn toggle_flats(&mut self) -> bool {
        self.transpose.prefer_flats = !self.transpose.prefer_flats;
        self.transpose.prefer_flats
    }

    /// Changing the grouping re-converts the current input.
    pub fn set_group_chords(&mut self, group_chords: bool) {
        self.options.group_chords = group_chords;
        self.base = convert_to_chordpro(&self.input, self.options);
    }

    /// The displayed document: the base transposed by the current state.
    pub fn output(&self) -> String {
        apply_transpose(&self.base, self.transpose.steps, self.transpose.prefer_flats)
    }

    pub fn highlighted(&self) -> String {
        highlight_chordpro(&self.output())
    }

    /// `+3`, `0`, `-2`
    pub fn transpose_label(&self) -> String {
        if self.transpose.steps > 0 {
            format!("+{}", self.transpose.steps)
        } else {
            self.transpose.steps.to_string()
        }
    }

    pub fn can_copy(&self) -> bool {
        !self.output().trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SheetError;

    const SONG: &str = "Verse 1\nG       D        Em\nWalking down the road";

    #[test]
    fn test_output_follows_transpose_state() {
        let mut session = Session::new(Config::default());
        session.set_input(SONG);
        assert_eq!(session.output(), session.base());

        assert!(session.transpose_up());
        assert!(session.transpose_up());
        assert_eq!(
            session.output(),
            "{comment: Verse 1}\n[A]Walking [E]down the [F#m]road"
        );
        assert_eq!(session.transpose_label(), "+2");
    }

    #[test]
    fn test_stepping_back_restores_base() {
        let mut session = Session::new(Config::default());
        session.set_input("[placeholder]\nBb    Eb\nHello world");
        let base = session.output();
        for _ in 0..5 {
            session.transpose_up();
        }
        session.toggle_flats();
        for _ in 0..5 {
            session.transpose_down();
        }
        session.toggle_flats();
        assert_eq!(session.output(), base);
    }

    #[test]
    fn test_transpose_is_clamped() {
        let mut session = Session::new(Config::default());
        for _ in 0..11 {
            assert!(session.transpose_down());
        }
        assert!(!session.transpose_down());
        assert_eq!(session.transpose_state().steps, -11);
        assert_eq!(session.transpose_label(), "-11");
    }

    #[test]
    fn test_set_transpose_validates() {
        let mut session = Session::new(Config::default());
        assert!(matches!(
            session.set_transpose(12),
            Err(SheetError::TransposeOutOfRange(12))
        ));
        session.set_transpose(-4).unwrap();
        assert_eq!(session.transpose_state().steps, -4);
    }

    #[test]
    fn test_new_input_resets_offset() {
        let mut session = Session::new(Config {
            transpose_steps: 3,
            ..Config::default()
        });
        assert_eq!(session.transpose_state().steps, 3);
        session.set_input(SONG);
        assert_eq!(session.transpose_state().steps, 0);
    }

    #[test]
    fn test_flats_toggle() {
        let mut session = Session::new(Config::default());
        session.set_input("C# F#\nla la la");
        assert!(session.toggle_flats());
        assert_eq!(session.output(), "[Db]la [Gb]la la");
    }

    #[test]
    fn test_group_chords_reconverts() {
        let mut session = Session::new(Config::default());
        session.set_input("C G Am");
        assert_eq!(session.base(), "[C][G][Am]");
        session.set_group_chords(true);
        assert_eq!(session.base(), "[C G Am]");
    }

    #[test]
    fn test_clear_and_can_copy() {
        let mut session = Session::new(Config::default());
        session.set_input(SONG);
        assert!(session.can_copy());
        assert!(session.highlighted().contains(r#"data-chord="Em""#));
        session.clear();
        assert!(!session.can_copy());
        assert_eq!(session.input(), "");
    }
}
