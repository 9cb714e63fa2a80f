//! Accidental spelling for anchored scales.
//!
//! Canonical names are sharp-biased, which repeats letters in flat-leaning
//! keys: C# major comes out as `C# D# F F# G# A B C`. Rewriting crowded
//! accidentals to their flat alternates recovers `Db Eb F Gb Ab A B C`,
//! which uses every letter once. The rewrite is a greedy walk, not a
//! global search, but it is deterministic.

use crate::error::TheoryError;
use crate::notes::{alternate_name, PitchClass};
use crate::scale::Scale;

/// Spell out the notes with the canonical sharp-biased names.
pub fn spell_plain(scale: &Scale) -> Result<Vec<&'static str>, TheoryError> {
    let tonic = scale
        .tonic()
        .ok_or(TheoryError::MissingTonic { operation: "spell" })?;
    Ok(scale
        .degree_semitones()
        .iter()
        .map(|&offset| tonic.transpose(i32::from(offset)).name())
        .collect())
}

/// Spell out the notes, rewriting accidentals to avoid repeated letters.
///
/// Two rewrites are tried: one that leaves the tonic's spelling alone and
/// one that lets the tonic go flat as well. Whichever covers strictly more
/// distinct letter names wins; ties keep the tonic as given.
pub fn spell(scale: &Scale) -> Result<Vec<&'static str>, TheoryError> {
    let tonic = scale
        .tonic()
        .ok_or(TheoryError::MissingTonic { operation: "spell" })?;
    let pitches: Vec<PitchClass> = scale
        .degree_semitones()
        .iter()
        .map(|&offset| tonic.transpose(i32::from(offset)))
        .collect();
    let base: Vec<&'static str> = pitches.iter().map(|p| p.name()).collect();

    let minimal = rewrite(&pitches, base.clone(), false);
    let maximal = rewrite(&pitches, base, true);

    if letter_count(&maximal) > letter_count(&minimal) {
        Ok(maximal)
    } else {
        Ok(minimal)
    }
}

/// Swap a note for its flat alternate when it crowds its predecessor.
/// A note two semitones or closer above the previous one is crowding it;
/// the tonic's predecessor is the last note, cyclically.
fn rewrite(
    pitches: &[PitchClass],
    mut names: Vec<&'static str>,
    rewrite_tonic: bool,
) -> Vec<&'static str> {
    let count = names.len();
    let start = usize::from(!rewrite_tonic);
    for i in start..count {
        let previous = pitches[(i + count - 1) % count];
        if previous.distance_to(pitches[i]) <= 2 {
            if let Some(flat) = alternate_name(names[i]) {
                names[i] = flat;
            }
        }
    }
    names
}

fn letter_count(names: &[&str]) -> usize {
    let mut letters: Vec<u8> = names.iter().filter_map(|name| name.bytes().next()).collect();
    letters.sort_unstable();
    letters.dedup();
    letters.len()
}
