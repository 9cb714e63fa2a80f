//! # Interval & Triad Classification
//!
//! Classifies pairs and triples of pitch classes by harmonic quality.
//!
//! The heart of the module is a fixed table mapping each interval size
//! (unison through octave) to the semitone distances that realize it and
//! the quality each distance carries. A semitone distance alone is
//! ambiguous (6 semitones is an augmented fourth or a diminished fifth),
//! so [`interval_quality`] resolves it in order of available context:
//!
//! 1. an explicit size hint (compound sizes fold onto simple ones);
//! 2. the sizes implied by the notes' degree numbers in a supplied scale;
//! 3. a context-free scan of the whole table, keeping the match with the
//!    lowest [`Quality`] ordinal.
//!
//! Triads are classified from their two stacked thirds alone: no fifth
//! check is involved, so the rule extends to degrees of arbitrary scales.

use std::fmt;

use serde::Serialize;

use crate::error::TheoryError;
use crate::notes::PitchClass;
use crate::scale::Scale;

/// Harmonic quality of an interval or chord.
///
/// The declaration order is load-bearing: the context-free resolution path
/// breaks ties by the lowest variant, so Diminished outranks Augmented,
/// which outranks Major, and so on. Compatibility with that ordering
/// matters more than its musical principle, so it stays as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Diminished,
    Augmented,
    Major,
    Minor,
    Perfect,
    Unknown,
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Quality::Diminished => "Diminished",
            Quality::Augmented => "Augmented",
            Quality::Major => "Major",
            Quality::Minor => "Minor",
            Quality::Perfect => "Perfect",
            Quality::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// Interval size as a 1-based degree span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalSize {
    Unison,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Octave,
    Ninth,
    Tenth,
    Eleventh,
    Twelfth,
    Thirteenth,
    Unknown,
}

impl IntervalSize {
    /// Fold a compound size onto its simple equivalent: a tenth is a third
    /// an octave up.
    pub fn simple(self) -> Self {
        match self {
            Self::Ninth => Self::Second,
            Self::Tenth => Self::Third,
            Self::Eleventh => Self::Fourth,
            Self::Twelfth => Self::Fifth,
            Self::Thirteenth => Self::Sixth,
            other => other,
        }
    }

    /// The size spanned by a 1-based degree span. Spans past the
    /// thirteenth keep folding by sevens.
    pub fn from_degree_span(span: usize) -> Self {
        match span {
            0 => Self::Unknown,
            1 => Self::Unison,
            2 => Self::Second,
            3 => Self::Third,
            4 => Self::Fourth,
            5 => Self::Fifth,
            6 => Self::Sixth,
            7 => Self::Seventh,
            8 => Self::Octave,
            9 => Self::Ninth,
            10 => Self::Tenth,
            11 => Self::Eleventh,
            12 => Self::Twelfth,
            13 => Self::Thirteenth,
            wide => Self::from_degree_span((wide - 2) % 7 + 2),
        }
    }
}

impl fmt::Display for IntervalSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IntervalSize::Unison => "Unison",
            IntervalSize::Second => "Second",
            IntervalSize::Third => "Third",
            IntervalSize::Fourth => "Fourth",
            IntervalSize::Fifth => "Fifth",
            IntervalSize::Sixth => "Sixth",
            IntervalSize::Seventh => "Seventh",
            IntervalSize::Octave => "Octave",
            IntervalSize::Ninth => "Ninth",
            IntervalSize::Tenth => "Tenth",
            IntervalSize::Eleventh => "Eleventh",
            IntervalSize::Twelfth => "Twelfth",
            IntervalSize::Thirteenth => "Thirteenth",
            IntervalSize::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// Which semitone distances realize each interval size, and with what
/// quality. Distances are upward and octave-wrapped, so they live in
/// `[0, 11]`.
const QUALITY_TABLE: [(IntervalSize, &[(u8, Quality)]); 8] = [
    (
        IntervalSize::Unison,
        &[(0, Quality::Perfect), (1, Quality::Augmented)],
    ),
    (
        IntervalSize::Second,
        &[
            (0, Quality::Diminished),
            (1, Quality::Minor),
            (2, Quality::Major),
            (3, Quality::Augmented),
        ],
    ),
    (
        IntervalSize::Third,
        &[
            (2, Quality::Diminished),
            (3, Quality::Minor),
            (4, Quality::Major),
            (5, Quality::Augmented),
        ],
    ),
    (
        IntervalSize::Fourth,
        &[
            (4, Quality::Diminished),
            (5, Quality::Perfect),
            (6, Quality::Augmented),
        ],
    ),
    (
        IntervalSize::Fifth,
        &[
            (6, Quality::Diminished),
            (7, Quality::Perfect),
            (8, Quality::Augmented),
        ],
    ),
    (
        IntervalSize::Sixth,
        &[
            (7, Quality::Diminished),
            (8, Quality::Minor),
            (9, Quality::Major),
            (10, Quality::Augmented),
        ],
    ),
    (
        IntervalSize::Seventh,
        &[
            (9, Quality::Diminished),
            (10, Quality::Minor),
            (11, Quality::Major),
        ],
    ),
    (
        IntervalSize::Octave,
        &[(11, Quality::Diminished), (0, Quality::Perfect)],
    ),
];

fn table_lookup(size: IntervalSize, distance: u8) -> Option<Quality> {
    QUALITY_TABLE
        .iter()
        .find(|(s, _)| *s == size)
        .and_then(|(_, entries)| {
            entries
                .iter()
                .find(|(d, _)| *d == distance)
                .map(|(_, q)| *q)
        })
}

/// 1-based degree of a pitch class within a scale's active degrees, or
/// `None` if the pitch is not in the scale.
pub fn degree_in_scale(note: PitchClass, scale: &Scale) -> Result<Option<usize>, TheoryError> {
    let tonic = scale.tonic().ok_or(TheoryError::MissingTonic {
        operation: "number the degrees of",
    })?;
    Ok(scale
        .degree_semitones()
        .iter()
        .position(|&offset| tonic.transpose(i32::from(offset)) == note)
        .map(|index| index + 1))
}

/// Classify the interval between two pitch classes.
///
/// The distance is taken upward from `low`, wrapping past the octave when
/// `high` sits below it. Resolution tries, in order: the explicit size
/// hint, the degree numbers in the supplied scale, and finally a scan of
/// the whole table for the distance. Each step falls through on a miss;
/// a distance nothing matches yields `(Unknown, Unknown)`.
///
/// ```
/// use modal::{interval_quality, IntervalSize, PitchClass, Quality};
///
/// let c = PitchClass::parse("C").unwrap();
/// let g = PitchClass::parse("G").unwrap();
/// assert_eq!(
///     interval_quality(c, g, None, Some(IntervalSize::Fifth)),
///     (Quality::Perfect, IntervalSize::Fifth)
/// );
/// ```
pub fn interval_quality(
    low: PitchClass,
    high: PitchClass,
    scale: Option<&Scale>,
    hint: Option<IntervalSize>,
) -> (Quality, IntervalSize) {
    let distance = low.distance_to(high);

    if let Some(size) = hint {
        let size = size.simple();
        if let Some(quality) = table_lookup(size, distance) {
            return (quality, size);
        }
    }

    if let Some(context) = scale {
        if context.has_tonic() {
            let degrees = (degree_in_scale(low, context), degree_in_scale(high, context));
            if let (Ok(Some(lo)), Ok(Some(hi))) = degrees {
                let size = IntervalSize::from_degree_span(lo.abs_diff(hi) + 1).simple();
                if let Some(quality) = table_lookup(size, distance) {
                    return (quality, size);
                }
            }
        }
    }

    // Best-effort guess: scan the table and keep the first match with the
    // lowest quality ordinal.
    let mut best: Option<(Quality, IntervalSize)> = None;
    for (size, entries) in QUALITY_TABLE.iter() {
        for (d, quality) in entries.iter() {
            if *d == distance && best.map_or(true, |(q, _)| *quality < q) {
                best = Some((*quality, *size));
            }
        }
    }
    best.unwrap_or((Quality::Unknown, IntervalSize::Unknown))
}

/// Classify a three-note chord by its two stacked thirds.
///
/// Major is a major third under a minor one, Minor the reverse, Diminished
/// two minor thirds, Augmented two major thirds. Anything whose stacked
/// pairs do not both resolve as major or minor thirds is `Unknown`.
pub fn triad_quality(
    low: PitchClass,
    mid: PitchClass,
    high: PitchClass,
    scale: Option<&Scale>,
) -> Quality {
    let lower = interval_quality(low, mid, scale, Some(IntervalSize::Third));
    let upper = interval_quality(mid, high, scale, Some(IntervalSize::Third));
    match (lower, upper) {
        ((Quality::Major, IntervalSize::Third), (Quality::Minor, IntervalSize::Third)) => {
            Quality::Major
        }
        ((Quality::Minor, IntervalSize::Third), (Quality::Major, IntervalSize::Third)) => {
            Quality::Minor
        }
        ((Quality::Minor, IntervalSize::Third), (Quality::Minor, IntervalSize::Third)) => {
            Quality::Diminished
        }
        ((Quality::Major, IntervalSize::Third), (Quality::Major, IntervalSize::Third)) => {
            Quality::Augmented
        }
        _ => Quality::Unknown,
    }
}

/// The triad quality built on each scale degree from stacked thirds:
/// degrees i, i+2, and i+4, wrapping past the octave. This works for any
/// degree count, not just heptatonic scales.
pub fn scale_degree_qualities(scale: &Scale) -> Vec<Quality> {
    let offsets = scale.degree_semitones();
    let count = offsets.len();
    // Distances are anchor-invariant, so a pattern-only scale is measured
    // from pitch class zero.
    let anchor = scale.tonic().unwrap_or(PitchClass::new(0));
    (0..count)
        .map(|i| {
            let low = anchor.transpose(i32::from(offsets[i]));
            let mid = anchor.transpose(i32::from(offsets[(i + 2) % count]));
            let high = anchor.transpose(i32::from(offsets[(i + 4) % count]));
            triad_quality(low, mid, high, Some(scale))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scale::Scale;

    fn pc(name: &str) -> PitchClass {
        PitchClass::parse(name).unwrap()
    }

    fn c_major() -> Scale {
        Scale::parse("Major").unwrap().with_tonic_name("C").unwrap()
    }

    #[test]
    fn test_hinted_lookup() {
        assert_eq!(
            interval_quality(pc("C"), pc("G"), None, Some(IntervalSize::Fifth)),
            (Quality::Perfect, IntervalSize::Fifth)
        );
        assert_eq!(
            interval_quality(pc("C"), pc("E"), None, Some(IntervalSize::Third)),
            (Quality::Major, IntervalSize::Third)
        );
        assert_eq!(
            interval_quality(pc("E"), pc("G"), None, Some(IntervalSize::Third)),
            (Quality::Minor, IntervalSize::Third)
        );
        assert_eq!(
            interval_quality(pc("C"), pc("F#"), None, Some(IntervalSize::Fourth)),
            (Quality::Augmented, IntervalSize::Fourth)
        );
    }

    #[test]
    fn test_compound_hints_fold() {
        assert_eq!(
            interval_quality(pc("C"), pc("E"), None, Some(IntervalSize::Tenth)),
            (Quality::Major, IntervalSize::Third)
        );
        assert_eq!(IntervalSize::from_degree_span(9), IntervalSize::Ninth);
        assert_eq!(IntervalSize::Ninth.simple(), IntervalSize::Second);
        assert_eq!(IntervalSize::from_degree_span(14), IntervalSize::Seventh);
    }

    #[test]
    fn test_scale_context_sets_the_size() {
        let scale = c_major();
        // C up to B spans seven letter degrees, so eleven semitones reads
        // as a major seventh rather than a guess.
        assert_eq!(
            interval_quality(pc("C"), pc("B"), Some(&scale), None),
            (Quality::Major, IntervalSize::Seventh)
        );
        assert_eq!(
            interval_quality(pc("D"), pc("A"), Some(&scale), None),
            (Quality::Perfect, IntervalSize::Fifth)
        );
    }

    #[test]
    fn test_context_free_guess_prefers_low_ordinals() {
        // Six semitones reads as a diminished fifth, not an augmented
        // fourth, because Diminished has the lower ordinal.
        assert_eq!(
            interval_quality(pc("C"), pc("F#"), None, None),
            (Quality::Diminished, IntervalSize::Fifth)
        );
        // Seven semitones falls to the same rule and guesses a diminished
        // sixth. Odd, but the ordering is part of the contract.
        assert_eq!(
            interval_quality(pc("C"), pc("G"), None, None),
            (Quality::Diminished, IntervalSize::Sixth)
        );
    }

    #[test]
    fn test_quality_ordering() {
        assert!(Quality::Diminished < Quality::Augmented);
        assert!(Quality::Augmented < Quality::Major);
        assert!(Quality::Major < Quality::Minor);
        assert!(Quality::Minor < Quality::Perfect);
        assert!(Quality::Perfect < Quality::Unknown);
    }

    #[test]
    fn test_degree_in_scale() {
        let scale = c_major();
        assert_eq!(degree_in_scale(pc("C"), &scale).unwrap(), Some(1));
        assert_eq!(degree_in_scale(pc("E"), &scale).unwrap(), Some(3));
        assert_eq!(degree_in_scale(pc("B"), &scale).unwrap(), Some(7));
        assert_eq!(degree_in_scale(pc("F#"), &scale).unwrap(), None);

        let bare = Scale::parse("Major").unwrap();
        assert!(matches!(
            degree_in_scale(pc("C"), &bare),
            Err(TheoryError::MissingTonic { .. })
        ));
    }

    #[test]
    fn test_triad_quality() {
        assert_eq!(
            triad_quality(pc("C"), pc("E"), pc("G"), None),
            Quality::Major
        );
        assert_eq!(
            triad_quality(pc("D"), pc("F"), pc("A"), None),
            Quality::Minor
        );
        assert_eq!(
            triad_quality(pc("B"), pc("D"), pc("F"), None),
            Quality::Diminished
        );
        assert_eq!(
            triad_quality(pc("C"), pc("E"), pc("G#"), None),
            Quality::Augmented
        );
        // C-F-G: neither stacked pair is a major or minor third.
        assert_eq!(
            triad_quality(pc("C"), pc("F"), pc("G"), None),
            Quality::Unknown
        );
    }

    #[test]
    fn test_major_scale_degree_qualities() {
        let qualities = scale_degree_qualities(&c_major());
        assert_eq!(
            qualities,
            vec![
                Quality::Major,
                Quality::Minor,
                Quality::Minor,
                Quality::Major,
                Quality::Major,
                Quality::Minor,
                Quality::Diminished,
            ]
        );
    }

    #[test]
    fn test_whole_tone_degrees_are_augmented() {
        let whole_tone = Scale::from_intervals("222222").unwrap();
        let qualities = scale_degree_qualities(&whole_tone);
        assert_eq!(qualities.len(), 6);
        assert!(qualities.iter().all(|&q| q == Quality::Augmented));
    }

    #[test]
    fn test_degree_qualities_without_tonic() {
        // Anchor-free patterns classify identically to their anchored form.
        let bare = Scale::parse("Aeolian").unwrap();
        let anchored = Scale::parse("Aeolian").unwrap().with_tonic_name("A").unwrap();
        assert_eq!(
            scale_degree_qualities(&bare),
            scale_degree_qualities(&anchored)
        );
    }
}
