//! Playback data type definitions

use serde::Serialize;

/// A chord symbol resolved to playable guitar samples.
///
/// # Fields
/// - `symbol`: the chord symbol as clicked (trimmed bracket content)
/// - `notes`: sample note names in chord-tone order, root first
///   (e.g. `["G3", "B4", "D4"]` for `G/B`)
/// - `bass`: slash-bass sample, played just before the strum
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChordVoicing {
    pub symbol: String,
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bass: Option<String>,
}

impl ChordVoicing {
    /// File names of the samples to trigger, bass first.
    pub fn sample_files(&self) -> Vec<String> {
        self.bass
            .iter()
            .chain(self.notes.iter())
            .map(|note| sample_file(note))
            .collect()
    }
}

/// Sample file for a note name: `C#3` -> `Cs3.mp3`.
pub fn sample_file(note: &str) -> String {
    format!("{}.mp3", note.replace('#', "s"))
}
