//! Rotation of scales around the circle of fifths.

use crate::error::TheoryError;
use crate::notes::PitchClass;
use crate::scale::{common_scales, Keyboard, Scale, DIATONIC_MODES};

fn require_tonic(scale: &Scale, operation: &'static str) -> Result<PitchClass, TheoryError> {
    scale.tonic().ok_or(TheoryError::MissingTonic { operation })
}

/// Rotate the 12-periodic key pattern left and re-close the octave.
fn rotate_keyboard(keyboard: &Keyboard, shift: usize) -> Keyboard {
    let mut rotated = [false; 13];
    for (i, slot) in rotated.iter_mut().enumerate().take(12) {
        *slot = keyboard[(shift + i) % 12];
    }
    rotated[12] = rotated[0];
    rotated
}

fn reanchor(keyboard: &Keyboard, from: &Scale, tonic: PitchClass) -> Result<Scale, TheoryError> {
    let mut scale = Scale::from_keyboard(keyboard)?.with_tonic(tonic);
    if let Some(name) = from.name() {
        scale = scale.with_name(name);
    }
    Ok(scale)
}

/// Rename a scale to the diatonic mode its interval pattern matches, if any.
/// Non-diatonic scales and unmatched patterns keep their current name.
pub fn rename_to_matching_mode(scale: Scale) -> Scale {
    if scale.is_diatonic() {
        for mode in DIATONIC_MODES {
            if let Some(reference) = common_scales().get(mode) {
                if scale.intervals() == reference.intervals() {
                    return scale.with_name(mode);
                }
            }
        }
    }
    scale
}

/// Rename against the whole reference table, first match in name order.
pub fn rename_to_matching_scale(scale: Scale) -> Scale {
    for (name, reference) in common_scales() {
        if scale.intervals() == reference.intervals() {
            return scale.with_name(name.clone());
        }
    }
    scale
}

/// Rotate a scale clockwise around the circle of fifths.
///
/// Each turn finds the first active degree at or above the perfect fourth,
/// restarts the pattern there, and nudges the tonic up by that degree's
/// offset from the fourth. The result is renamed to a matching diatonic
/// mode when there is one.
pub fn sharpen(scale: &Scale, turns: u32) -> Result<Scale, TheoryError> {
    let mut tonic = require_tonic(scale, "sharpen")?;
    let mut current = scale.clone();
    for _ in 0..turns {
        let keyboard = current.keyboard();
        // Index 12 is always active, so the search cannot fail.
        let nudge = keyboard[5..].iter().position(|&k| k).unwrap_or(7);
        let rotated = rotate_keyboard(keyboard, 5 + nudge);
        tonic = tonic.transpose(nudge as i32);
        current = reanchor(&rotated, &current, tonic)?;
    }
    Ok(rename_to_matching_mode(current))
}

/// Rotate a scale counter-clockwise around the circle of fifths.
///
/// The mirror of [`sharpen`]: scan down from the perfect fifth for the
/// first active degree and nudge the tonic down by its offset below the
/// fifth.
pub fn flatten(scale: &Scale, turns: u32) -> Result<Scale, TheoryError> {
    let mut tonic = require_tonic(scale, "flatten")?;
    let mut current = scale.clone();
    for _ in 0..turns {
        let keyboard = current.keyboard();
        // Index 0 is always active, so the search cannot fail.
        let nudge = keyboard[..8].iter().rev().position(|&k| k).unwrap_or(7);
        let rotated = rotate_keyboard(keyboard, 7 - nudge);
        tonic = tonic.transpose(-(nudge as i32));
        current = reanchor(&rotated, &current, tonic)?;
    }
    Ok(rename_to_matching_mode(current))
}

/// Rotate a scale around the circle of fifths.
/// Positive turns sharpen, negative turns flatten, zero is the identity.
pub fn rotate(scale: &Scale, turns: i32) -> Result<Scale, TheoryError> {
    require_tonic(scale, "rotate")?;
    match turns {
        0 => Ok(scale.clone()),
        t if t > 0 => sharpen(scale, t as u32),
        t => flatten(scale, t.unsigned_abs()),
    }
}

/// The circle-of-fifths neighborhood of a scale, brightest first: `turns`
/// sharpenings down to one, the scale itself, then one to `turns`
/// flattenings.
pub fn adjacent_scales(scale: &Scale, turns: u32) -> Result<Vec<Scale>, TheoryError> {
    require_tonic(scale, "rotate")?;
    let mut scales = Vec::with_capacity(turns as usize * 2 + 1);
    for turn in (1..=turns).rev() {
        scales.push(sharpen(scale, turn)?);
    }
    scales.push(scale.clone());
    for turn in 1..=turns {
        scales.push(flatten(scale, turn)?);
    }
    Ok(scales)
}

/// Thin a heptatonic scale down to a pentatonic one by merging away its 3rd
/// and 6th degrees, a pleasantly non-functional harmony. Returns `None` for
/// non-heptatonic input.
pub fn fold_pentatonic(scale: &Scale) -> Option<Scale> {
    if !scale.is_heptatonic() {
        return None;
    }
    let steps = scale.intervals();
    let folded = [
        steps[0],
        steps[1] + steps[2],
        steps[3],
        steps[4] + steps[5],
        steps[6],
    ];
    let mut thin = Scale::from_steps(&folded).ok()?;
    if let Some(tonic) = scale.tonic() {
        thin = thin.with_tonic(tonic);
    }
    if let Some(name) = scale.name() {
        thin = thin.with_name(format!("Pentatonic {name}"));
    }
    Some(thin)
}
