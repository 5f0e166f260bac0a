//! # Playback Module
//!
//! The seam between highlighted chord annotations and whatever makes sound.
//!
//! ## Purpose
//! A click on a highlighted chord hands its `data-chord` text to a
//! [`ChordPlayer`]. The crate does not synthesise audio; it resolves symbols to
//! the guitar samples a player should trigger.
//!
//! ## Sub-modules
//! - `types` - [`ChordVoicing`] and sample file naming
//! - `chord_parser` - chord symbol to pitch classes and available samples
//!
//! ## Example
//! ```rust
//! use chordsheet::playback::{ChordPlayer, VoicingPlayer};
//!
//! let mut player = VoicingPlayer::default();
//! player.play("Am").unwrap();
//!
//! assert_eq!(player.played[0].notes, vec!["A3", "C4", "E4"]);
//! assert!(player.play("N.C.").is_err());
//! ```

mod chord_parser;
mod types;

pub use chord_parser::{
    find_available_octave, parse_chord_symbol, quality_intervals, voice_chord, SAMPLE_NOTES,
};
pub use types::{sample_file, ChordVoicing};

use crate::error::{Result, SheetError};

/// Something that can play a chord symbol taken from an annotation.
///
/// Implementations decide how a symbol becomes sound. A symbol they cannot
/// handle is reported as [`SheetError::Playback`] and must not affect later
/// calls.
pub trait ChordPlayer {
    fn play(&mut self, symbol: &str) -> Result<()>;
}

/// Records the voicing of every played chord instead of sounding it.
#[derive(Debug, Default)]
pub struct VoicingPlayer {
    pub played: Vec<ChordVoicing>,
}

impl ChordPlayer for VoicingPlayer {
    fn play(&mut self, symbol: &str) -> Result<()> {
        let voicing =
            voice_chord(symbol).ok_or_else(|| SheetError::Playback(symbol.trim().to_string()))?;
        self.played.push(voicing);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::chord_spans;

    #[test]
    fn test_player_receives_annotation_symbols() {
        let doc = "[G]Walking [ D/F# ]down the [Em]road";
        let mut player = VoicingPlayer::default();
        for span in chord_spans(doc) {
            player.play(&span.symbol).unwrap();
        }

        let symbols: Vec<&str> = player.played.iter().map(|v| v.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["G", "D/F#", "Em"]);
        assert_eq!(player.played[1].bass.as_deref(), Some("F#2"));
    }

    #[test]
    fn test_failed_play_does_not_poison_player() {
        let mut player = VoicingPlayer::default();
        assert!(matches!(player.play("x2"), Err(SheetError::Playback(_))));
        player.play("C").unwrap();
        assert_eq!(player.played.len(), 1);
    }

    #[test]
    fn test_sample_files() {
        let voicing = voice_chord("D/F#").unwrap();
        assert_eq!(
            voicing.sample_files(),
            vec!["Fs2.mp3", "D3.mp3", "Fs4.mp3", "A4.mp3"]
        );
    }

    #[test]
    fn test_notes_follow_chord_tones() {
        // D4 is the fifth, listed after the third even though B4 sounds higher
        let voicing = voice_chord("G/B").unwrap();
        assert_eq!(voicing.notes, vec!["G3", "B4", "D4"]);
        assert_eq!(voicing.sample_files(), vec!["B2.mp3", "G3.mp3", "B4.mp3", "D4.mp3"]);
    }

    #[test]
    fn test_voicing_serializes_camel_case() {
        let voicing = voice_chord("C").unwrap();
        let json = serde_json::to_string(&voicing).unwrap();
        assert_eq!(json, r#"{"symbol":"C","notes":["C3","E4","G4"]}"#);
    }
}
