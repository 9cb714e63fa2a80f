//! Common chords as keyboard shapes.
//!
//! A chord is a run of key states rooted on its lowest note, so shapes are
//! directly comparable with the per-degree windows a [`Scale`] exposes.
//! The catalog builds every chord from stacked thirds:
//!
//! - **Triads**: Diminished/Minor/Major/Augmented 5th from two thirds
//! - **Sevenths**: Major, Minor, Dominant, Diminished, Half-diminished,
//!   Minor Major, Augmented Major, Augmented, Diminished Major, plus the
//!   flat-five dominants
//!
//! The third shapes themselves (2, 3, 4, or 5 semitones) are catalog
//! entries too, which is what the stacking shorthand builds on.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;

use crate::error::TheoryError;
use crate::scale::Scale;
use crate::spelling::spell;

/// A chord as a root-relative keyboard shape, with optional name and root
/// labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chord {
    name: Option<String>,
    root: Option<String>,
    keys: Vec<bool>,
}

impl Chord {
    /// A bare root, the seed every shape grows from.
    pub fn root_only() -> Self {
        Self {
            name: None,
            root: None,
            keys: vec![true],
        }
    }

    /// Stack semitone steps above the root: `[4, 3]` is a major triad.
    pub fn from_steps(steps: &[u8]) -> Self {
        let mut chord = Self::root_only();
        for &step in steps {
            chord.push_step(step);
        }
        chord
    }

    /// Append a note some semitones above the current top.
    pub fn push_step(&mut self, step: u8) {
        for _ in 1..step {
            self.keys.push(false);
        }
        self.keys.push(true);
    }

    /// Stack another chord on top, fusing its root with the current top.
    pub fn extend_with(&mut self, other: &Chord) {
        self.keys.extend(other.keys.iter().skip(1));
    }

    /// Rebind the name label.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Rebind the root label.
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// The chord's name, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The spelled root, if one is bound.
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// The root-relative key states.
    pub fn keyboard(&self) -> &[bool] {
        &self.keys
    }

    /// `"<root> <name>"`, falling back to the raw shape.
    pub fn label(&self) -> String {
        let name = match &self.name {
            Some(name) => name.clone(),
            None => self
                .keys
                .iter()
                .map(|&k| if k { '1' } else { '0' })
                .collect(),
        };
        match &self.root {
            Some(root) => format!("{root} {name}"),
            None => name,
        }
    }
}

/// Chords sort by root, then span, then name, then shape, which keeps
/// catalog listings stable.
impl Ord for Chord {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.root, self.keys.len(), &self.name, &self.keys).cmp(&(
            &other.root,
            other.keys.len(),
            &other.name,
            &other.keys,
        ))
    }
}

impl PartialOrd for Chord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// How much of each shape's pressed keys the two shapes share.
///
/// Returns `(shared / lhs pressed, shared / rhs pressed)`; a left value of
/// 1.0 means the left shape is entirely contained in the right one. The
/// shorter shape is treated as zero-padded.
pub fn compare_chords(lhs: &[bool], rhs: &[bool]) -> (f64, f64) {
    let lhs_pressed = lhs.iter().filter(|&&k| k).count();
    let rhs_pressed = rhs.iter().filter(|&&k| k).count();
    let shared = lhs
        .iter()
        .zip(rhs.iter())
        .filter(|(&a, &b)| a && b)
        .count();
    (
        shared as f64 / lhs_pressed as f64,
        shared as f64 / rhs_pressed as f64,
    )
}

/// Every pressed key of `shape` is also pressed in `window`.
fn fits_within(shape: &[bool], window: &[bool]) -> bool {
    shape
        .iter()
        .enumerate()
        .all(|(i, &k)| !k || window.get(i).copied().unwrap_or(false))
}

/// The read-only catalog of common chords, built on first use; safe for
/// concurrent readers.
pub fn common_chords() -> &'static BTreeMap<&'static str, Chord> {
    static TABLE: OnceLock<BTreeMap<&'static str, Chord>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table: BTreeMap<&'static str, Chord> = BTreeMap::new();

        for (name, step) in [
            ("Diminished 3rd", 2u8),
            ("Minor 3rd", 3),
            ("Major 3rd", 4),
            ("Augmented 3rd", 5),
        ] {
            table.insert(name, Chord::from_steps(&[step]).with_name(name));
        }

        let stacked: [(&'static str, &[&str]); 15] = [
            ("Diminished 5th", &["Minor 3rd", "Minor 3rd"]),
            ("Minor 5th", &["Minor 3rd", "Major 3rd"]),
            ("Major 5th", &["Major 3rd", "Minor 3rd"]),
            ("Augmented 5th", &["Major 3rd", "Major 3rd"]),
            ("Major 7th", &["Major 5th", "Major 3rd"]),
            ("Minor 7th", &["Minor 5th", "Minor 3rd"]),
            ("Dominant 7th", &["Major 5th", "Minor 3rd"]),
            ("Diminished 7th", &["Diminished 5th", "Minor 3rd"]),
            ("Half-diminished 7th", &["Diminished 5th", "Major 3rd"]),
            ("Minor Major 7th", &["Minor 5th", "Major 3rd"]),
            ("Augmented Major 7th", &["Augmented 5th", "Major 3rd"]),
            ("Augmented 7th", &["Augmented 5th", "Diminished 3rd"]),
            ("Diminished Major 7th", &["Diminished 5th", "Augmented 3rd"]),
            ("Dominant 7th b5", &["Major 3rd", "Diminished 3rd", "Major 3rd"]),
            ("Major 7th b5", &["Major 3rd", "Diminished 3rd", "Augmented 3rd"]),
        ];

        for (name, parts) in stacked {
            let mut chord = Chord::root_only();
            for &part in parts {
                if let Some(known) = table.get(part).cloned() {
                    chord.extend_with(&known);
                }
            }
            table.insert(name, chord.with_name(name));
        }

        table
    })
}

/// Every common chord fully contained in the scale, rooted on each spelled
/// degree, in stable order.
pub fn find_chords(scale: &Scale) -> Result<Vec<Chord>, TheoryError> {
    let names = spell(scale)?;
    let windows = scale.degree_keyboards();
    let mut found = BTreeSet::new();
    for (root, window) in names.iter().zip(windows.iter()) {
        for chord in common_chords().values() {
            if fits_within(chord.keyboard(), window) {
                found.insert(chord.clone().with_root(*root));
            }
        }
    }
    Ok(found.into_iter().collect())
}
