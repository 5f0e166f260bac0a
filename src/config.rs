//! Conversion and transposition options.
//!
//! Options can come from a YAML file with kebab-case keys, every key optional:
//!
//! ```yaml
//! group-chords: true
//! use-flats: false
//! transpose-steps: -2
//! ```

use crate::error::{Result, SheetError};
use serde::Deserialize;
use std::path::Path;

pub const MIN_TRANSPOSE: i32 = -11;
pub const MAX_TRANSPOSE: i32 = 11;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Config {
    /// Emit standalone chord lines as one bracket (`[C G Am]`) instead of
    /// one bracket per chord.
    pub group_chords: bool,
    /// Spell transposed roots with flats.
    pub use_flats: bool,
    /// Semitone offset, `-11..=11`.
    pub transpose_steps: i32,
}

/// Raw config for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawConfig {
    group_chords: Option<bool>,
    use_flats: Option<bool>,
    transpose_steps: Option<i32>,
}

impl Config {
    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| SheetError::Config(e.to_string()))?;

        let defaults = Self::default();
        let transpose_steps = raw.transpose_steps.unwrap_or(defaults.transpose_steps);
        check_transpose_range(transpose_steps)?;

        Ok(Self {
            group_chords: raw.group_chords.unwrap_or(defaults.group_chords),
            use_flats: raw.use_flats.unwrap_or(defaults.use_flats),
            transpose_steps,
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| SheetError::io(e, path.to_path_buf()))?;
        Self::from_yaml(&content)
    }
}

pub fn check_transpose_range(steps: i32) -> Result<()> {
    if (MIN_TRANSPOSE..=MAX_TRANSPOSE).contains(&steps) {
        Ok(())
    } else {
        Err(SheetError::TransposeOutOfRange(steps))
    }
}
