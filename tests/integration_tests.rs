//! Integration tests for chordkit
//!
//! Exercises the public API end to end: construction, transposition, lyrics and
//! chord documents on disk.

use std::io::Write;

use chordkit::{load_file, process, Chord, ChordError, Interval, Pitch, PitchSpec};

fn pitches(names: &[&str]) -> Vec<Pitch> {
    names.iter().map(|n| n.parse().unwrap()).collect()
}

#[test]
fn test_construct_from_names() {
    let chord = Chord::new(["a#3", "g4", "f#5"]).unwrap();
    assert_eq!(chord.pitches(), pitches(&["A#3", "G4", "F#5"]).as_slice());
}

#[test]
fn test_construct_preserves_order_and_count() {
    let specs = ["g5", "c3", "c3", "e-4", "b2", "f##4"];
    let chord = Chord::new(specs).unwrap();
    assert_eq!(chord.len(), specs.len());
    for (pitch, spec) in chord.pitches().iter().zip(specs) {
        assert_eq!(*pitch, spec.parse::<Pitch>().unwrap());
    }
}

#[test]
fn test_transpose_c_major_by_minor_second() {
    let chord = Chord::new(["c4", "e4", "g4"]).unwrap();
    let transposed = chord.transpose("m2").unwrap();
    assert_eq!(transposed.pitches(), pitches(&["D-4", "F4", "A-4"]).as_slice());
}

#[test]
fn test_transpose_leaves_receiver_unchanged() {
    let chord: Chord = "C4 E4 G4".parse().unwrap();
    let before = chord.pitches().to_vec();
    let transposed = chord.transpose("M3").unwrap();
    assert_ne!(transposed.pitches(), before.as_slice());
    assert_eq!(chord.pitches(), before.as_slice());
}

#[test]
fn test_double_transposition_composes() {
    let chord: Chord = "D3 F#3 A3 C4".parse().unwrap();
    let up: Interval = "P4".parse().unwrap();
    let down: Interval = "M-2".parse().unwrap();
    let stepwise = chord.transpose(up).unwrap().transpose(down).unwrap();
    let combined = chord.transpose(up + down).unwrap();
    assert_eq!(stepwise.pitches(), combined.pitches());
    assert_eq!(combined.to_string(), "F3 A3 C4 E-4");
}

#[test]
fn test_add_lyric_is_append_only() {
    let mut chord: Chord = "C4 E4 G4".parse().unwrap();
    for (i, text) in ["a-", "-men", "glo-", "-ri-", "-a"].iter().enumerate() {
        let previous = chord.lyrics().to_vec();
        chord.add_lyric(text);
        assert_eq!(chord.lyrics().len(), i + 1);
        assert_eq!(&chord.lyrics()[..i], previous.as_slice());
    }
}

#[test]
fn test_quarter_length_round_trip() {
    let mut chord = Chord::new([0, 4, 7]).unwrap();
    let value = 1.333_333_333_333_333_3;
    chord.set_quarter_length(value).unwrap();
    assert_eq!(chord.quarter_length(), value);
}

#[test]
fn test_non_positive_quarter_length_is_value_error() {
    let mut chord = Chord::new([PitchSpec::from("c4")]).unwrap();
    match chord.set_quarter_length(-1.0) {
        Err(ChordError::ValueError(message)) => assert!(message.contains("-1")),
        other => panic!("expected value error, got {:?}", other),
    }
    assert_eq!(chord.quarter_length(), 1.0);
}

#[test]
fn test_parse_error_names_the_input() {
    match Chord::new(["c4", "h#2"]) {
        Err(ChordError::ParseError { input, .. }) => assert_eq!(input, "h#2"),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_load_document_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "pitches: [c4, e4, g4]").unwrap();
    writeln!(file, "transpose: P5").unwrap();
    writeln!(file, "lyrics: [sing]").unwrap();

    let chord = load_file(file.path()).unwrap();
    assert_eq!(chord.to_string(), "G4 B4 D5");
    assert_eq!(chord.lyric(), Some("sing"));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_file(dir.path().join("missing.yaml"));
    assert!(matches!(result, Err(ChordError::Io(_))));
}

#[test]
fn test_process_output_reloads() {
    let output = process("pitches: [c4, e4, g4]\ntranspose: m2\nquarter-length: 2\n").unwrap();
    let chord = chordkit::parse_document(&output).unwrap();
    assert_eq!(chord.to_string(), "D-4 F4 A-4");
    assert_eq!(chord.quarter_length(), 2.0);
}

#[test]
fn test_transpose_by_extreme_semitone_counts_fails_cleanly() {
    let chord: Chord = "C4 E4 G4".parse().unwrap();
    for semitones in [i32::MIN, i32::MAX] {
        match chord.transpose(semitones) {
            Err(ChordError::ValueError(message)) => assert!(message.contains("octave")),
            other => panic!("expected value error for {}, got {:?}", semitones, other),
        }
    }
    assert_eq!(chord.to_string(), "C4 E4 G4");
}

#[test]
fn test_huge_interval_name_is_parse_error() {
    let chord: Chord = "C4".parse().unwrap();
    assert!(matches!(chord.transpose("M2000000001"), Err(ChordError::ParseError { .. })));
    assert!(matches!("M2000000001".parse::<Interval>(), Err(ChordError::ParseError { .. })));
}

#[test]
fn test_lowest_octave_survives_process() {
    let output = process("pitches: [d0, b-0]\ntranspose: M-2\n").unwrap();
    let chord = chordkit::parse_document(&output).unwrap();
    assert_eq!(chord.to_string(), "C0 A-0");

    assert!(matches!(
        process("pitches: [c0]\ntranspose: -1\n"),
        Err(ChordError::ValueError(_))
    ));
    assert!(matches!(
        Chord::with_default_octave(["c"], -1),
        Err(ChordError::ValueError(_))
    ));
}

#[test]
fn test_process_keeps_raw_lyrics() {
    let output = process("pitches: [c4]\nlyrics: [{text: -ing, identifier: chorus}]\n").unwrap();
    let chord = chordkit::parse_document(&output).unwrap();
    assert_eq!(chord.lyric(), Some("-ing"));
    assert_eq!(chord.lyrics()[0].identifier.as_deref(), Some("chorus"));
}
