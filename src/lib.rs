//! Scale and chord analysis for the Western 12-tone system.
//!
//! A [`Scale`] carries one octave of key states and the equivalent
//! interval pattern, optionally anchored on a tonic. On top of that sit
//! the circle-of-fifths rotations ([`sharpen`], [`flatten`], [`rotate`]),
//! the interval and triad classifiers, the accidental-minimizing speller,
//! and a catalog of common scales and chords.

pub mod chords;
pub mod error;
pub mod notes;
pub mod pretty;
pub mod quality;
pub mod scale;
pub mod spelling;
pub mod transforms;

pub use chords::{common_chords, compare_chords, find_chords, Chord};
pub use error::TheoryError;
pub use notes::{alternate_name, normalize_note_name, PitchClass, NOTE_NAMES};
pub use pretty::{degree_numeral, ScaleReport, NUMERALS};
pub use quality::{
    degree_in_scale, interval_quality, scale_degree_qualities, triad_quality, IntervalSize,
    Quality,
};
pub use scale::{common_scales, Keyboard, Scale, DIATONIC_MODES};
pub use spelling::{spell, spell_plain};
pub use transforms::{
    adjacent_scales, flatten, fold_pentatonic, rename_to_matching_mode,
    rename_to_matching_scale, rotate, sharpen,
};

fn anchored(input: &str, tonic: Option<&str>) -> Result<Scale, TheoryError> {
    let parsed = Scale::parse(input)?;
    match tonic {
        Some(name) => parsed.with_tonic_name(name),
        None => Ok(parsed),
    }
}

/// Describe a scale given by name or interval pattern.
/// This is the main entry point for the library.
pub fn describe(input: &str, tonic: Option<&str>) -> Result<String, TheoryError> {
    let scale = anchored(input, tonic)?;
    pretty::describe(&scale)
}

/// Build the structured report for a scale given by name or pattern.
pub fn analyze(input: &str, tonic: Option<&str>) -> Result<ScaleReport, TheoryError> {
    let scale = anchored(input, tonic)?;
    pretty::report(&scale)
}
