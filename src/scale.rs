//! # Scale Representation
//!
//! A scale is one abstract cyclic structure with two equivalent encodings:
//!
//! - **keyboard**: 13 key states covering one octave inclusive of the
//!   repeated tonic, so `WWHWWWH` becomes
//!   `(1,0,1,0,1,1,0,1,0,1,0,1,1)`.
//! - **intervals**: the semitone gaps between consecutive active keys,
//!   summing to exactly 12, so the same scale is `2212221`.
//!
//! A [`Scale`] stores whichever encoding it was built from and derives the
//! other on first access, caching it for the lifetime of the value. The
//! conversion is lossless in both directions.
//!
//! A scale may also carry a tonic (anchoring the pattern to an absolute
//! pitch) and a name. Rotation, spelling, and degree numbering all require
//! the tonic; a pattern-only scale supports everything else.
//!
//! The [`common_scales`] table holds the named reference scales (the seven
//! diatonic modes and friends), built once at first use and read-only
//! afterwards.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use crate::error::TheoryError;
use crate::notes::PitchClass;

/// One octave of key states, tonic repeated at both ends.
pub type Keyboard = [bool; 13];

/// The seven diatonic mode names, brightest first.
pub const DIATONIC_MODES: [&str; 7] = [
    "Lydian",
    "Ionian",
    "Mixolydian",
    "Dorian",
    "Aeolian",
    "Phrygian",
    "Locrian",
];

/// Normalize a `WWHWWWH`-style pattern into raw semitone steps.
///
/// Accepts `w`/`W` for a whole step, `h`/`H` for a half step, and digits
/// 1-9; fails unless the steps span exactly one octave.
pub fn normalize_intervals(pattern: &str) -> Result<Vec<u8>, TheoryError> {
    let mut steps = Vec::new();
    for c in pattern.chars() {
        match c {
            'w' | 'W' => steps.push(2),
            'h' | 'H' => steps.push(1),
            '1'..='9' => steps.push(c as u8 - b'0'),
            _ => {
                return Err(TheoryError::InvalidPattern {
                    pattern: pattern.to_string(),
                    message: format!("unexpected character '{c}'"),
                })
            }
        }
    }
    let total: u32 = steps.iter().map(|&s| u32::from(s)).sum();
    if total != 12 {
        return Err(TheoryError::InvalidPattern {
            pattern: pattern.to_string(),
            message: format!("steps span {total} semitones, expected 12"),
        });
    }
    Ok(steps)
}

fn intervals_to_keyboard(steps: &[u8]) -> Keyboard {
    let mut keyboard = [false; 13];
    keyboard[0] = true;
    let mut at = 0usize;
    for &step in steps {
        at += step as usize;
        keyboard[at] = true;
    }
    keyboard
}

fn keyboard_to_intervals(keyboard: &Keyboard) -> Vec<u8> {
    let mut steps = Vec::new();
    let mut previous = 0usize;
    for at in 1..keyboard.len() {
        if keyboard[at] {
            steps.push((at - previous) as u8);
            previous = at;
        }
    }
    steps
}

fn title_case_words(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(|c| c.to_lowercase()))
                    .collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A 12-tone scale, optionally anchored on a tonic.
///
/// ```
/// use modal::Scale;
///
/// let ionian = Scale::from_intervals("WWHWWWH").unwrap();
/// assert_eq!(ionian.interval_string(), "2212221");
/// assert!(ionian.is_diatonic());
/// ```
#[derive(Debug, Clone)]
pub struct Scale {
    name: Option<String>,
    tonic: Option<PitchClass>,
    keyboard: OnceLock<Keyboard>,
    intervals: OnceLock<Vec<u8>>,
}

impl Scale {
    fn seeded_with_intervals(steps: Vec<u8>) -> Self {
        let intervals = OnceLock::new();
        let _ = intervals.set(steps);
        Self {
            name: None,
            tonic: None,
            keyboard: OnceLock::new(),
            intervals,
        }
    }

    /// Build a scale from a `WWHWWWH`-style interval pattern.
    pub fn from_intervals(pattern: &str) -> Result<Self, TheoryError> {
        Ok(Self::seeded_with_intervals(normalize_intervals(pattern)?))
    }

    /// Build a scale from raw interval steps rather than a pattern string.
    pub fn from_steps(steps: &[u8]) -> Result<Self, TheoryError> {
        let pattern = || steps.iter().map(|s| s.to_string()).collect::<String>();
        if steps.iter().any(|&s| s == 0) {
            return Err(TheoryError::InvalidPattern {
                pattern: pattern(),
                message: "every step must be at least one semitone".to_string(),
            });
        }
        let total: u32 = steps.iter().map(|&s| u32::from(s)).sum();
        if total != 12 {
            return Err(TheoryError::InvalidPattern {
                pattern: pattern(),
                message: format!("steps span {total} semitones, expected 12"),
            });
        }
        Ok(Self::seeded_with_intervals(steps.to_vec()))
    }

    /// Build a scale from 13 key states.
    ///
    /// The tonic must be active at index 0 and again at index 12.
    pub fn from_keyboard(keys: &[bool]) -> Result<Self, TheoryError> {
        if keys.len() != 13 {
            return Err(TheoryError::InvalidKeyboard {
                message: format!("expected 13 key states, got {}", keys.len()),
            });
        }
        if !keys[0] || !keys[12] {
            return Err(TheoryError::InvalidKeyboard {
                message: "the tonic must be active at both ends of the octave".to_string(),
            });
        }
        let mut keyboard = [false; 13];
        keyboard.copy_from_slice(keys);
        let cell = OnceLock::new();
        let _ = cell.set(keyboard);
        Ok(Self {
            name: None,
            tonic: None,
            keyboard: cell,
            intervals: OnceLock::new(),
        })
    }

    /// Look up a named reference scale, falling back to interval-pattern
    /// parsing: `"Dorian"`, `"harmonic minor"`, and `"WWHWWWH"` all work.
    pub fn parse(text: &str) -> Result<Self, TheoryError> {
        if let Some(known) = common_scales().get(&title_case_words(text)) {
            return Ok(known.clone());
        }
        Self::from_intervals(text)
    }

    /// Rebind the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Anchor the pattern on an absolute pitch.
    pub fn with_tonic(mut self, tonic: PitchClass) -> Self {
        self.tonic = Some(tonic);
        self
    }

    /// Anchor the pattern on a tonic given by note name.
    pub fn with_tonic_name(self, name: &str) -> Result<Self, TheoryError> {
        let tonic = PitchClass::parse(name)?;
        Ok(self.with_tonic(tonic))
    }

    /// The scale's name, if it has one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The tonic, if the pattern is anchored.
    pub fn tonic(&self) -> Option<PitchClass> {
        self.tonic
    }

    /// Whether the pattern is anchored on an absolute pitch.
    pub fn has_tonic(&self) -> bool {
        self.tonic.is_some()
    }

    /// The 13-key octave view.
    ///
    /// Derived from the interval view on first access and cached. The fill
    /// is idempotent, so the accessor is safe for concurrent readers.
    pub fn keyboard(&self) -> &Keyboard {
        self.keyboard.get_or_init(|| {
            // Constructors always seed one of the two representations.
            let steps = self
                .intervals
                .get()
                .expect("scale constructed with neither representation");
            intervals_to_keyboard(steps)
        })
    }

    /// The semitone gaps between consecutive degrees, summing to 12.
    ///
    /// Derived from the keyboard view on first access and cached.
    pub fn intervals(&self) -> &[u8] {
        self.intervals
            .get_or_init(|| {
                let keyboard = self
                    .keyboard
                    .get()
                    .expect("scale constructed with neither representation");
                keyboard_to_intervals(keyboard)
            })
            .as_slice()
    }

    /// The interval view as digits, e.g. `"2212221"`.
    pub fn interval_string(&self) -> String {
        self.intervals().iter().map(|s| s.to_string()).collect()
    }

    /// Number of degrees in the scale, the closing tonic excluded.
    pub fn degree_count(&self) -> usize {
        self.keyboard()[..12].iter().filter(|&&k| k).count()
    }

    /// Whether the scale has exactly `n` degrees.
    pub fn is_n_tatonic(&self, n: usize) -> bool {
        self.degree_count() == n
    }

    /// Whether the scale has seven degrees.
    pub fn is_heptatonic(&self) -> bool {
        self.is_n_tatonic(7)
    }

    /// Whether the scale has five degrees.
    pub fn is_pentatonic(&self) -> bool {
        self.is_n_tatonic(5)
    }

    /// Whether this is a diatonic scale: heptatonic, and its two half-steps
    /// are separated by at least two whole-steps on both sides of the cycle.
    pub fn is_diatonic(&self) -> bool {
        let steps = self.intervals();
        if steps.len() != 7 || steps.iter().any(|&s| s != 1 && s != 2) {
            return false;
        }
        let halves: Vec<usize> = steps
            .iter()
            .enumerate()
            .filter(|(_, &s)| s == 1)
            .map(|(i, _)| i)
            .collect();
        if halves.len() != 2 {
            return false;
        }
        // Whole-steps strictly between the half-steps, going each way round.
        let forward = halves[1] - halves[0] - 1;
        let backward = 5 - forward;
        forward >= 2 && backward >= 2
    }

    /// Semitone offsets of the active degrees, closing tonic excluded.
    pub fn degree_semitones(&self) -> Vec<u8> {
        self.keyboard()[..12]
            .iter()
            .enumerate()
            .filter(|(_, &k)| k)
            .map(|(i, _)| i as u8)
            .collect()
    }

    /// A 13-key window of the octave-doubled keyboard rooted at each degree.
    ///
    /// These are the shapes that chords are matched against.
    pub fn degree_keyboards(&self) -> Vec<Vec<bool>> {
        let octave = &self.keyboard()[..12];
        let doubled: Vec<bool> = octave.iter().chain(octave.iter()).copied().collect();
        self.degree_semitones()
            .iter()
            .map(|&at| doubled[at as usize..at as usize + 13].to_vec())
            .collect()
    }
}

/// Two scales are equal when they cover the same keys from the same tonic;
/// the name is a label, not part of the identity.
impl PartialEq for Scale {
    fn eq(&self, other: &Self) -> bool {
        self.tonic == other.tonic && self.keyboard() == other.keyboard()
    }
}

impl Eq for Scale {}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match &self.name {
            Some(name) => name.clone(),
            None => self.interval_string(),
        };
        match self.tonic {
            Some(tonic) => write!(f, "{} {}", tonic, label),
            None => write!(f, "{}", label),
        }
    }
}

/// The read-only table of named reference scales, keyed by title-cased
/// name. Built once on first use; safe for concurrent readers.
pub fn common_scales() -> &'static BTreeMap<String, Scale> {
    static TABLE: OnceLock<BTreeMap<String, Scale>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let entries: [(&str, &str); 16] = [
            ("Ionian", "WWHWWWH"),
            ("Dorian", "WHWWWHW"),
            ("Phrygian", "HWWWHWW"),
            ("Lydian", "WWWHWWH"),
            ("Mixolydian", "WWHWWHW"),
            ("Aeolian", "WHWWHWW"),
            ("Locrian", "HWWHWWW"),
            ("Major", "Ionian"),
            ("Harmonic Major 1", "2212131"),
            ("Harmonic Major 2", "2213121"),
            ("Minor", "Aeolian"),
            ("Natural Minor", "Minor"),
            ("Melodic Minor", "2122221"),
            ("Harmonic Minor", "2122131"),
            ("Cursed 1", "WHWHWHWH"),
            ("Cursed 2", "HWHWHWHW"),
        ];
        // Aliases point at other entries; chase them down to a pattern.
        let raw: BTreeMap<&str, &str> = entries.iter().copied().collect();
        let mut table = BTreeMap::new();
        for (name, mut pattern) in entries {
            while let Some(&next) = raw.get(pattern) {
                pattern = next;
            }
            let scale = Scale::from_intervals(pattern)
                .expect("reference scale patterns are valid")
                .with_name(name);
            table.insert(name.to_string(), scale);
        }
        table
    })
}
