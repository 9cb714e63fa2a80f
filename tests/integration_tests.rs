//! Integration tests for the modal library
//!
//! Exercises the public surface end to end: construction, rotation around
//! the circle of fifths, classification, spelling, and reporting.

use modal::{
    analyze, describe, find_chords, fold_pentatonic, interval_quality, rotate,
    scale_degree_qualities, spell, triad_quality, IntervalSize, PitchClass, Quality, Scale,
    TheoryError,
};

fn anchored(name: &str, tonic: &str) -> Scale {
    Scale::parse(name).unwrap().with_tonic_name(tonic).unwrap()
}

fn pc(name: &str) -> PitchClass {
    PitchClass::parse(name).unwrap()
}

#[test]
fn test_ionian_construction() {
    let ionian = Scale::from_intervals("WWHWWWH").unwrap();
    let expected = [
        true, false, true, false, true, true, false, true, false, true, false, true, true,
    ];
    assert_eq!(ionian.keyboard(), &expected);
    assert_eq!(ionian.interval_string(), "2212221");
}

#[test]
fn test_representations_round_trip() {
    for pattern in ["2212221", "1221222", "23232", "2122131", "13131111"] {
        let scale = Scale::from_intervals(pattern).unwrap();
        let back = Scale::from_keyboard(scale.keyboard()).unwrap();
        assert_eq!(back.interval_string(), pattern, "pattern {pattern}");
        assert_eq!(back.keyboard(), scale.keyboard());
    }
}

#[test]
fn test_invalid_inputs_are_rejected() {
    assert!(matches!(
        Scale::from_intervals("2212222"),
        Err(TheoryError::InvalidPattern { .. })
    ));
    assert!(matches!(
        Scale::from_intervals("WWqWWWH"),
        Err(TheoryError::InvalidPattern { .. })
    ));
    assert!(matches!(
        Scale::from_keyboard(&[true, false, true]),
        Err(TheoryError::InvalidKeyboard { .. })
    ));
    assert!(matches!(
        Scale::parse("Major").unwrap().with_tonic_name("Q"),
        Err(TheoryError::UnknownNoteName(_))
    ));
}

#[test]
fn test_tonic_dependent_operations_fail_without_tonic() {
    let bare = Scale::parse("Locrian").unwrap();
    assert!(matches!(
        rotate(&bare, 1),
        Err(TheoryError::MissingTonic { .. })
    ));
    assert!(matches!(spell(&bare), Err(TheoryError::MissingTonic { .. })));
}

#[test]
fn test_sharpening_seven_turns_closes_the_circle() {
    let rotated = rotate(&anchored("Locrian", "C"), 7).unwrap();
    assert_eq!(rotated.tonic(), Some(pc("C#")));
    assert_eq!(rotated.name(), Some("Locrian"));
    assert_eq!(
        rotated.interval_string(),
        Scale::parse("Locrian").unwrap().interval_string()
    );
    assert_eq!(
        rotated.keyboard(),
        Scale::parse("Locrian").unwrap().keyboard()
    );
}

#[test]
fn test_flattening_seven_turns_closes_the_circle() {
    let rotated = rotate(&anchored("Locrian", "C"), -7).unwrap();
    assert_eq!(rotated.tonic(), Some(pc("B")));
    assert_eq!(rotated.name(), Some("Locrian"));
    assert_eq!(
        rotated.intervals(),
        Scale::parse("Locrian").unwrap().intervals()
    );
}

#[test]
fn test_locrian_six_turns_is_lydian() {
    let rotated = rotate(&anchored("Locrian", "C"), 6).unwrap();
    let lydian = anchored("Lydian", "C");
    assert_eq!(rotated, lydian);
    assert_eq!(rotated.keyboard(), lydian.keyboard());
    assert_eq!(rotated.intervals(), lydian.intervals());
    assert_eq!(rotated.name(), Some("Lydian"));
    assert_eq!(rotated.tonic(), Some(pc("C")));
}

#[test]
fn test_sharpen_then_flatten_is_identity() {
    let scale = anchored("Dorian", "D");
    for turns in 1..=7 {
        let there = rotate(&scale, turns).unwrap();
        let back = rotate(&there, -turns).unwrap();
        assert_eq!(back, scale, "turns {turns}");
    }
}

#[test]
fn test_major_scale_triads() {
    let scale = anchored("Major", "C");
    // C-E-G, D-F-A, and B-D-F: the textbook I, ii, and vii chords.
    assert_eq!(
        triad_quality(pc("C"), pc("E"), pc("G"), Some(&scale)),
        Quality::Major
    );
    assert_eq!(
        triad_quality(pc("D"), pc("F"), pc("A"), Some(&scale)),
        Quality::Minor
    );
    assert_eq!(
        triad_quality(pc("B"), pc("D"), pc("F"), Some(&scale)),
        Quality::Diminished
    );

    assert_eq!(
        scale_degree_qualities(&scale),
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
fn test_interval_quality_resolution_order() {
    // A hint wins.
    assert_eq!(
        interval_quality(pc("C"), pc("F#"), None, Some(IntervalSize::Fourth)),
        (Quality::Augmented, IntervalSize::Fourth)
    );
    // Scale context decides between enharmonic readings.
    let scale = anchored("Major", "C");
    assert_eq!(
        interval_quality(pc("C"), pc("B"), Some(&scale), None),
        (Quality::Major, IntervalSize::Seventh)
    );
    // Without context, the lowest quality ordinal wins the guess.
    assert_eq!(
        interval_quality(pc("C"), pc("F#"), None, None),
        (Quality::Diminished, IntervalSize::Fifth)
    );
}

#[test]
fn test_spelling_is_deterministic() {
    let scale = anchored("WWHWHWHH", "C#");
    let expected = vec!["Db", "Eb", "F", "Gb", "Ab", "A", "B", "C"];
    assert_eq!(spell(&scale).unwrap(), expected);
    assert_eq!(spell(&scale).unwrap(), expected);
}

#[test]
fn test_find_chords_in_a_minor() {
    let chords = find_chords(&anchored("Minor", "A")).unwrap();
    let labels: Vec<String> = chords.iter().map(|c| c.label()).collect();
    assert!(labels.contains(&"A Minor 5th".to_string()));
    assert!(labels.contains(&"C Major 5th".to_string()));
    assert!(labels.contains(&"B Diminished 5th".to_string()));
    assert!(labels.contains(&"G Dominant 7th".to_string()));
}

#[test]
fn test_fold_pentatonic_from_heptatonic() {
    let folded = fold_pentatonic(&anchored("Dorian", "D")).unwrap();
    assert_eq!(folded.interval_string(), "23232");
    assert_eq!(folded.name(), Some("Pentatonic Dorian"));
    assert_eq!(folded.tonic(), Some(pc("D")));
}

#[test]
fn test_describe_entry_point() {
    let text = describe("Major", Some("C")).unwrap();
    assert!(text.starts_with("C Major (2212221)\n"));
    assert!(text.contains("notes:"));
    assert!(text.contains("degrees:"));

    assert!(matches!(
        describe("2212222", Some("C")),
        Err(TheoryError::InvalidPattern { .. })
    ));
}

#[test]
fn test_analyze_entry_point() {
    let report = analyze("Dorian", Some("D")).unwrap();
    assert_eq!(report.name, "D Dorian");
    assert_eq!(report.intervals, "2122212");
    assert_eq!(report.notes, vec!["D", "E", "F", "G", "A", "B", "C"]);
    assert_eq!(report.degrees[0], "i");
    assert!(!report.chords.is_empty());

    // Reports serialize for the CLI's YAML mode.
    let yaml = serde_yaml::to_string(&report).unwrap();
    assert!(yaml.contains("name: D Dorian"));
    assert!(yaml.contains("2122212"));
    assert!(yaml.contains("degrees:"));
}

#[test]
fn test_named_scales_share_patterns_with_aliases() {
    let major = Scale::parse("Major").unwrap();
    let ionian = Scale::parse("Ionian").unwrap();
    assert_eq!(major, ionian);
    assert_eq!(major.name(), Some("Major"));

    let minor = Scale::parse("Minor").unwrap();
    let aeolian = Scale::parse("Aeolian").unwrap();
    assert_eq!(minor.intervals(), aeolian.intervals());
}
