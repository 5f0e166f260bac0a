//! # Error Types
//!
//! The text transforms in this crate (conversion, transposition, highlighting)
//! are total over any input string and never fail. Errors only come from the
//! surrounding shell: loading configuration, reading and writing files, and
//! handing chord symbols to a playback backend.
//!
//! ## Usage
//! ```rust
//! use chordsheet::{Config, SheetError};
//!
//! match Config::from_yaml("transpose-steps: 14") {
//!     Ok(config) => println!("{:?}", config),
//!     Err(SheetError::TransposeOutOfRange(steps)) => {
//!         eprintln!("cannot transpose by {}", steps);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SheetError>;

#[derive(Error, Debug)]
pub enum SheetError {
    /// Invalid configuration document.
    ///
    /// # Example
    /// ```
    /// # use chordsheet::SheetError;
    /// let err = SheetError::Config("expected a mapping".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: expected a mapping");
    /// ```
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Transposition offset outside `-11..=11`.
    #[error("Transpose offset {0} is out of range (-11 to 11)")]
    TransposeOutOfRange(i32),

    /// File could not be read or written.
    #[error("IO error at {path:?}: {source}")]
    Io {
        source: std::io::Error,
        path: Option<PathBuf>,
    },

    /// A playback backend could not handle a chord symbol.
    #[error("Cannot play chord: {0}")]
    Playback(String),
}

impl SheetError {
    pub fn io(source: std::io::Error, path: impl Into<Option<PathBuf>>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }
}

impl From<std::io::Error> for SheetError {
    fn from(e: std::io::Error) -> Self {
        Self::Io {
            source: e,
            path: None,
        }
    }
}
