//! Human-readable scale reports.
//!
//! Turns a scale into spelled notes, roman-numeral degree labels, and the
//! list of common chords it contains, either as a serializable
//! [`ScaleReport`] or as the fixed text block [`describe`] renders.

use serde::Serialize;

use crate::chords::find_chords;
use crate::error::TheoryError;
use crate::notes::PitchClass;
use crate::quality::{scale_degree_qualities, Quality};
use crate::scale::Scale;
use crate::spelling::spell;
use crate::transforms::rename_to_matching_scale;

/// Roman numerals for degree labels.
pub const NUMERALS: [&str; 13] = [
    "i", "ii", "iii", "iv", "v", "vi", "vii", "viii", "ix", "x", "xi", "xii", "xiii",
];

/// Roman-numeral notation for a 1-based degree with a harmonic quality:
/// lowercase for minor, uppercase for major, `*` marks diminished, `+`
/// marks augmented, and unknowns fall back to `"<n>?"`. Degrees past the
/// thirteenth stay arabic.
pub fn degree_numeral(degree: usize, quality: Quality) -> String {
    if quality == Quality::Unknown {
        return format!("{degree}?");
    }
    let numeral = match degree.checked_sub(1).and_then(|i| NUMERALS.get(i)) {
        Some(numeral) => (*numeral).to_string(),
        None => degree.to_string(),
    };
    match quality {
        Quality::Minor => numeral.to_lowercase(),
        Quality::Major => numeral.to_uppercase(),
        Quality::Diminished => format!("{}*", numeral.to_lowercase()),
        Quality::Augmented => format!("{}+", numeral.to_uppercase()),
        _ => numeral,
    }
}

/// A structured description of a scale: its spelled notes, degree
/// numerals, and the common chords it contains.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleReport {
    pub name: String,
    pub intervals: String,
    pub notes: Vec<String>,
    pub degrees: Vec<String>,
    pub chords: Vec<String>,
}

/// Build a report. A pattern-only scale is anchored on C first, and an
/// unnamed scale picks up the name of a matching reference scale.
pub fn report(scale: &Scale) -> Result<ScaleReport, TheoryError> {
    let anchored = if scale.has_tonic() {
        scale.clone()
    } else {
        scale.clone().with_tonic(PitchClass::new(0))
    };
    let notes = spell(&anchored)?;
    let named = if anchored.name().is_some() {
        anchored
    } else {
        rename_to_matching_scale(anchored)
    };

    let degrees: Vec<String> = scale_degree_qualities(&named)
        .iter()
        .enumerate()
        .map(|(i, &quality)| degree_numeral(i + 1, quality))
        .collect();
    let chords: Vec<String> = find_chords(&named)?
        .iter()
        .map(|chord| chord.label())
        .collect();

    let label = match named.name() {
        Some(name) => name.to_string(),
        None => named.interval_string(),
    };
    Ok(ScaleReport {
        // The displayed tonic uses the spelled name, which may be flat.
        name: format!("{} {}", notes[0], label),
        intervals: named.interval_string(),
        notes: notes.iter().map(|n| (*n).to_string()).collect(),
        degrees,
        chords,
    })
}

/// Render the report as a fixed text block: the nice name and intervals,
/// a padded row of notes, and a padded row of degree numerals.
pub fn describe(scale: &Scale) -> Result<String, TheoryError> {
    let report = report(scale)?;
    let notes = report
        .notes
        .iter()
        .map(|n| pad(n, 4))
        .collect::<Vec<_>>()
        .join(" ");
    let degrees = report
        .degrees
        .iter()
        .map(|d| pad(d, 4))
        .collect::<Vec<_>>()
        .join(" ");
    Ok(format!(
        "{} ({})\n      notes: {}\n    degrees: {}\n",
        report.name, report.intervals, notes, degrees
    ))
}

fn pad(text: &str, width: usize) -> String {
    let add = width.saturating_sub(text.len());
    let left = add / 2;
    let right = add - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degree_numerals() {
        assert_eq!(degree_numeral(1, Quality::Major), "I");
        assert_eq!(degree_numeral(2, Quality::Minor), "ii");
        assert_eq!(degree_numeral(7, Quality::Diminished), "vii*");
        assert_eq!(degree_numeral(3, Quality::Augmented), "III+");
        assert_eq!(degree_numeral(4, Quality::Unknown), "4?");
        assert_eq!(degree_numeral(14, Quality::Major), "14");
    }

    #[test]
    fn test_report_for_c_major() {
        let scale = Scale::parse("Major")
            .unwrap()
            .with_tonic_name("C")
            .unwrap();
        let report = report(&scale).unwrap();
        assert_eq!(report.name, "C Major");
        assert_eq!(report.intervals, "2212221");
        assert_eq!(report.notes, vec!["C", "D", "E", "F", "G", "A", "B"]);
        assert_eq!(
            report.degrees,
            vec!["I", "ii", "iii", "IV", "V", "vi", "vii*"]
        );
        assert!(report.chords.contains(&"G Dominant 7th".to_string()));
    }

    #[test]
    fn test_report_anchors_and_renames_bare_patterns() {
        let bare = Scale::from_intervals("WWHWWWH").unwrap();
        let report = report(&bare).unwrap();
        // Anchored on C, and the pattern is recognized as Ionian.
        assert_eq!(report.name, "C Ionian");
        assert_eq!(report.notes[0], "C");
    }

    #[test]
    fn test_describe_layout() {
        let scale = Scale::parse("Dorian")
            .unwrap()
            .with_tonic_name("D")
            .unwrap();
        let text = describe(&scale).unwrap();
        assert!(text.starts_with("D Dorian (2122212)\n"));
        assert!(text.contains("notes:"));
        assert!(text.contains("degrees:"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_pad_centers() {
        assert_eq!(pad("C", 4), " C  ");
        assert_eq!(pad("C#", 4), " C# ");
        assert_eq!(pad("vii*", 4), "vii*");
        assert_eq!(pad("toolong", 4), "toolong");
    }
}
