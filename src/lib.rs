pub mod chord;
pub mod config;
pub mod convert;
pub mod error;
pub mod highlight;
pub mod merge;
pub mod playback;
pub mod section;
pub mod session;
pub mod tokenizer;
pub mod transpose;

pub use chord::{is_chord_token, is_pure_chord};
pub use config::Config;
pub use convert::{convert_to_chordpro, ConvertOptions};
pub use error::*;
pub use highlight::{chord_spans, highlight_chordpro, ChordSpan};
pub use merge::merge_chords_and_lyrics;
pub use section::detect_section;
pub use session::{Session, TransposeState};
pub use tokenizer::split_jammed_chords;
pub use transpose::{apply_transpose, transpose_chord_symbol, transpose_note};

/// Convert a plain-text chord sheet to annotated text.
/// This is the main entry point for the library.
pub fn convert(source: &str, config: &Config) -> String {
    let base = convert_to_chordpro(
        source,
        ConvertOptions {
            group_chords: config.group_chords,
        },
    );
    apply_transpose(&base, config.transpose_steps, config.use_flats)
}

/// Convert and render as highlighted HTML
pub fn render_html(source: &str, config: &Config) -> String {
    highlight_chordpro(&convert(source, config))
}
