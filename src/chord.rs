//! # Chord
//!
//! A chord is an ordered list of pitches sounding together, sharing one duration.
//!
//! ## Structure
//! ```text
//! Chord
//!   ├── pitches: Vec<Pitch>   (construction order, duplicates allowed, may be empty)
//!   ├── duration: Duration    (quarter length, always > 0)
//!   ├── lyrics: Vec<Lyric>    (append order, numbered from 1)
//!   └── volume: Volume
//! ```
//!
//! ## Construction
//! Each pitch can be given as:
//! - a name: `"a#3"`, `"B-4"`, `"eb5"`, `"C"` (no octave means octave 4)
//! - a [`Pitch`] value
//! - an integer: 0-11 is a pitch class at the default octave, 12-127 a MIDI note number
//!
//! ```
//! use chordkit::Chord;
//!
//! let chord = Chord::new(["a#3", "g4", "f#5"])?;
//! assert_eq!(chord.to_string(), "A#3 G4 F#5");
//! # Ok::<(), chordkit::ChordError>(())
//! ```
//!
//! ## Transposition
//! [`Chord::transpose`] never touches the receiver. It returns a new chord with every
//! pitch moved by the interval, the same duration and volume, and no lyrics.
//!
//! ```
//! use chordkit::Chord;
//!
//! let c_major = Chord::new(["c4", "e4", "g4"])?;
//! let d_flat_major = c_major.transpose("m2")?;
//! assert_eq!(d_flat_major.to_string(), "D-4 F4 A-4");
//! assert_eq!(c_major.to_string(), "C4 E4 G4");
//! # Ok::<(), chordkit::ChordError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::duration::Duration;
use crate::error::ChordError;
use crate::interval::IntervalSpec;
use crate::lyric::Lyric;
use crate::pitch::{Pitch, DEFAULT_OCTAVE};
use crate::volume::Volume;

/// One pitch specification for [`Chord::new`]
#[derive(Debug, Clone, PartialEq)]
pub enum PitchSpec {
    Name(String),
    Pitch(Pitch),
    Number(i64),
}

impl PitchSpec {
    /// Resolve to a pitch, placing octave-less names and pitch classes in `default_octave`
    pub fn resolve(&self, default_octave: i8) -> Result<Pitch, ChordError> {
        match self {
            PitchSpec::Name(name) => Pitch::parse_with_octave(name, default_octave),
            PitchSpec::Pitch(pitch) => Ok(*pitch),
            PitchSpec::Number(n @ 0..=11) => Pitch::from_pitch_class(*n as u8, default_octave),
            PitchSpec::Number(n @ 12..=127) => Pitch::from_midi(*n as u8),
            PitchSpec::Number(n) => Err(ChordError::parse(
                n.to_string(),
                "integer pitches must be a pitch class (0-11) or a MIDI note number (12-127)",
            )),
        }
    }
}

impl From<&str> for PitchSpec {
    fn from(name: &str) -> Self {
        PitchSpec::Name(name.to_string())
    }
}

impl From<String> for PitchSpec {
    fn from(name: String) -> Self {
        PitchSpec::Name(name)
    }
}

impl From<&String> for PitchSpec {
    fn from(name: &String) -> Self {
        PitchSpec::Name(name.clone())
    }
}

impl From<Pitch> for PitchSpec {
    fn from(pitch: Pitch) -> Self {
        PitchSpec::Pitch(pitch)
    }
}

impl From<&Pitch> for PitchSpec {
    fn from(pitch: &Pitch) -> Self {
        PitchSpec::Pitch(*pitch)
    }
}

impl From<i32> for PitchSpec {
    fn from(n: i32) -> Self {
        PitchSpec::Number(n as i64)
    }
}

impl From<i64> for PitchSpec {
    fn from(n: i64) -> Self {
        PitchSpec::Number(n)
    }
}

impl From<u8> for PitchSpec {
    fn from(n: u8) -> Self {
        PitchSpec::Number(n as i64)
    }
}

/// Simultaneous pitches with a shared duration
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Chord {
    pitches: Vec<Pitch>,
    duration: Duration,
    lyrics: Vec<Lyric>,
    volume: Volume,
}

impl Chord {
    /// Build a chord from pitch specifications.
    ///
    /// # Errors
    /// Returns [`ChordError::ParseError`] for the first specification that cannot be read.
    pub fn new<I, S>(specs: I) -> Result<Self, ChordError>
    where
        I: IntoIterator<Item = S>,
        S: Into<PitchSpec>,
    {
        Self::with_default_octave(specs, DEFAULT_OCTAVE)
    }

    /// Like [`Chord::new`], with a different octave for names and pitch classes that lack one
    pub fn with_default_octave<I, S>(specs: I, default_octave: i8) -> Result<Self, ChordError>
    where
        I: IntoIterator<Item = S>,
        S: Into<PitchSpec>,
    {
        let pitches = specs
            .into_iter()
            .map(|spec| spec.into().resolve(default_octave))
            .collect::<Result<Vec<Pitch>, ChordError>>()?;
        debug!("Built chord with {} pitches", pitches.len());
        Ok(Self::from_pitches(pitches))
    }

    pub fn from_pitches(pitches: Vec<Pitch>) -> Self {
        Self {
            pitches,
            ..Self::default()
        }
    }

    /// Pitches in construction order
    pub fn pitches(&self) -> &[Pitch] {
        &self.pitches
    }

    pub fn len(&self) -> usize {
        self.pitches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pitches.is_empty()
    }

    pub fn pitch_names(&self) -> Vec<String> {
        self.pitches.iter().map(Pitch::name_with_octave).collect()
    }

    /// Pitch class of each pitch, in order, duplicates kept
    pub fn pitch_classes(&self) -> Vec<u8> {
        self.pitches.iter().map(Pitch::pitch_class).collect()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = duration;
    }

    pub fn quarter_length(&self) -> f64 {
        self.duration.quarter_length()
    }

    /// Set the length in quarter notes.
    ///
    /// # Errors
    /// Returns [`ChordError::ValueError`] if the length is not a positive finite number;
    /// the chord keeps its previous duration.
    pub fn set_quarter_length(&mut self, quarter_length: f64) -> Result<(), ChordError> {
        self.duration.set_quarter_length(quarter_length)
    }

    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    pub fn volume_mut(&mut self) -> &mut Volume {
        &mut self.volume
    }

    pub fn lyrics(&self) -> &[Lyric] {
        &self.lyrics
    }

    /// Text of the first lyric, if any
    pub fn lyric(&self) -> Option<&str> {
        self.lyrics.first().map(|lyric| lyric.text.as_str())
    }

    /// Append a lyric, numbered after the existing ones
    pub fn add_lyric(&mut self, text: &str) {
        let number = self.lyrics.len() + 1;
        self.lyrics.push(Lyric::new(text, number));
    }

    /// Append an already built lyric, renumbering it after the existing ones
    pub fn append_lyric(&mut self, mut lyric: Lyric) {
        lyric.number = self.lyrics.len() + 1;
        self.lyrics.push(lyric);
    }

    pub fn clear_lyrics(&mut self) {
        self.lyrics.clear();
    }

    /// Return a new chord with every pitch transposed by the interval.
    ///
    /// The interval can be a name ("m2", "P-5"), a semitone count, or an [`Interval`](crate::Interval).
    ///
    /// # Errors
    /// - [`ChordError::ParseError`] if the interval cannot be read
    /// - [`ChordError::ValueError`] if a pitch cannot be spelled after transposition
    pub fn transpose<S: Into<IntervalSpec>>(&self, spec: S) -> Result<Chord, ChordError> {
        let interval = spec.into().resolve()?;
        let pitches = self
            .pitches
            .iter()
            .map(|pitch| pitch.transpose(&interval))
            .collect::<Result<Vec<Pitch>, ChordError>>()?;
        debug!("Transposed chord {} by {}", self, interval);

        Ok(Chord {
            pitches,
            duration: self.duration,
            lyrics: Vec::new(),
            volume: self.volume.clone(),
        })
    }

    /// Return a copy with pitches ordered from lowest to highest.
    /// Enharmonic pitches keep their relative order.
    pub fn sorted_ascending(&self) -> Chord {
        let mut sorted = self.clone();
        sorted.pitches.sort_by_key(Pitch::midi);
        sorted
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pitch_names().join(" "))
    }
}

impl FromStr for Chord {
    type Err = ChordError;

    /// Parse whitespace-separated pitch names, e.g. "C4 E4 G4"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Chord::new(s.split_whitespace())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interval::Interval;

    fn chord(names: &str) -> Chord {
        names.parse().unwrap()
    }

    #[test]
    fn test_construct_preserves_order() {
        let c = Chord::new(["a#3", "g4", "f#5"]).unwrap();
        let expected: Vec<Pitch> = ["A#3", "G4", "F#5"].iter().map(|n| n.parse().unwrap()).collect();
        assert_eq!(c.pitches(), expected.as_slice());
    }

    #[test]
    fn test_construct_keeps_duplicates() {
        let c = Chord::new(["c4", "e4", "c4"]).unwrap();
        assert_eq!(c.len(), 3);
        assert_eq!(c.pitch_names(), vec!["C4", "E4", "C4"]);
    }

    #[test]
    fn test_construct_mixed_specs() {
        let e4: Pitch = "E4".parse().unwrap();
        let specs = vec![PitchSpec::from(0), PitchSpec::from(e4), PitchSpec::from("g"), PitchSpec::from(72)];
        let c = Chord::new(specs).unwrap();
        assert_eq!(c.to_string(), "C4 E4 G4 C5");
    }

    #[test]
    fn test_default_octave() {
        let c = Chord::with_default_octave(vec![PitchSpec::from(7), PitchSpec::from("b-")], 2).unwrap();
        assert_eq!(c.to_string(), "G2 B-2");
    }

    #[test]
    fn test_empty_chord() {
        let c = Chord::new(Vec::<PitchSpec>::new()).unwrap();
        assert!(c.is_empty());
        assert_eq!(c.to_string(), "");
        assert!(c.transpose("M3").unwrap().is_empty());
    }

    #[test]
    fn test_construct_rejects_bad_specs() {
        assert!(matches!(Chord::new(["c4", "q4"]), Err(ChordError::ParseError { .. })));
        assert!(matches!(Chord::new([-1]), Err(ChordError::ParseError { .. })));
        assert!(matches!(Chord::new([128]), Err(ChordError::ParseError { .. })));
    }

    #[test]
    fn test_transpose_minor_second() {
        let c = Chord::new(["c4", "e4", "g4"]).unwrap();
        let t = c.transpose("m2").unwrap();
        assert_eq!(t, chord("D-4 F4 A-4"));
    }

    #[test]
    fn test_transpose_does_not_mutate() {
        let mut c = chord("C4 E4 G4");
        c.add_lyric("la");
        let before = c.clone();
        let _ = c.transpose("P5").unwrap();
        assert_eq!(c, before);
    }

    #[test]
    fn test_transpose_keeps_duration_and_drops_lyrics() {
        let mut c = chord("C4 E4 G4");
        c.set_quarter_length(2.5).unwrap();
        c.volume_mut().set_velocity(90);
        c.add_lyric("ah");

        let t = c.transpose(-12).unwrap();
        assert_eq!(t.to_string(), "C3 E3 G3");
        assert_eq!(t.quarter_length(), 2.5);
        assert_eq!(t.volume().velocity(), Some(90));
        assert!(t.lyrics().is_empty());
    }

    #[test]
    fn test_transpose_composes() {
        let c = chord("C4 E4 G4 B-4");
        for (a, b) in [("m2", "m2"), ("M3", "P-5"), ("A4", "d5"), ("M9", "m-3")] {
            let i1: Interval = a.parse().unwrap();
            let i2: Interval = b.parse().unwrap();
            let stepwise = c.transpose(i1).unwrap().transpose(i2).unwrap();
            let combined = c.transpose(i1 + i2).unwrap();
            assert_eq!(stepwise.pitches(), combined.pitches(), "{} then {}", a, b);
        }
    }

    #[test]
    fn test_transpose_semitones_matches_midi() {
        let c = chord("C4 E4 G4");
        for semitones in -14..=14 {
            let t = c.transpose(semitones).unwrap();
            let shifted: Vec<i32> = c.pitches().iter().map(|p| p.midi() + semitones).collect();
            let actual: Vec<i32> = t.pitches().iter().map(Pitch::midi).collect();
            assert_eq!(actual, shifted);
        }
    }

    #[test]
    fn test_transpose_bad_interval() {
        let c = chord("C4");
        assert!(matches!(c.transpose("X9"), Err(ChordError::ParseError { .. })));
    }

    #[test]
    fn test_quarter_length_round_trip() {
        let mut c = chord("C4 E4");
        let third = 1.0 + 1.0 / 3.0;
        c.set_quarter_length(third).unwrap();
        assert_eq!(c.quarter_length(), third);
        assert!(c.set_quarter_length(0.0).is_err());
        assert_eq!(c.quarter_length(), third);
    }

    #[test]
    fn test_add_lyric_appends() {
        let mut c = chord("C4");
        assert_eq!(c.lyric(), None);
        c.add_lyric("hel-");
        c.add_lyric("-lo");
        let first = c.lyrics()[0].clone();
        c.add_lyric("world");

        assert_eq!(c.lyrics().len(), 3);
        assert_eq!(c.lyrics()[0], first);
        assert_eq!(c.lyrics()[2].number, 3);
        assert_eq!(c.lyric(), Some("hel"));

        c.clear_lyrics();
        assert!(c.lyrics().is_empty());
    }

    #[test]
    fn test_sorted_ascending() {
        let c = chord("G4 C4 E5 C#4 D-4");
        let sorted = c.sorted_ascending();
        assert_eq!(sorted.to_string(), "C4 C#4 D-4 G4 E5");
        assert_eq!(c.to_string(), "G4 C4 E5 C#4 D-4");
    }

    #[test]
    fn test_pitch_classes() {
        assert_eq!(chord("C4 E-4 G4 C5").pitch_classes(), vec![0, 3, 7, 0]);
    }

    #[test]
    fn test_display_round_trips() {
        let c = chord("a#3 g4 f#5 B--2");
        assert_eq!(chord(&c.to_string()), c);
    }

    #[test]
    fn test_lowest_octave_round_trips() {
        let c = chord("C0 B-0 C#0 c-1 B##0");
        assert_eq!(c.to_string(), "C0 B-0 C#0 C-1 B##0");
        assert_eq!(chord(&c.to_string()), c);
        assert_eq!(c.pitches()[0].midi(), 12);
        assert_eq!(c.pitches()[3].midi(), 23);
    }

    #[test]
    fn test_negative_default_octave_is_value_error() {
        assert!(matches!(
            Chord::with_default_octave(["c"], -1),
            Err(ChordError::ValueError(_))
        ));
        assert!(matches!(
            Chord::with_default_octave([PitchSpec::Number(0)], -1),
            Err(ChordError::ValueError(_))
        ));
        assert_eq!(Chord::with_default_octave(["c"], 0).unwrap().to_string(), "C0");
    }

    #[test]
    fn test_transpose_by_extreme_semitones_is_value_error() {
        let c = chord("C4 E4 G4");
        for semitones in [i32::MIN, i32::MAX, i32::MIN + 1, i32::MAX - 1] {
            assert!(
                matches!(c.transpose(semitones), Err(ChordError::ValueError(_))),
                "expected value error for {}",
                semitones
            );
        }
        assert!(matches!(chord("C0").transpose("m-2"), Err(ChordError::ValueError(_))));
        assert!(matches!(chord("C0").transpose(-1), Err(ChordError::ValueError(_))));
    }

    #[test]
    fn test_append_lyric_keeps_syllabic_and_identifier() {
        let mut c = chord("C4");
        c.add_lyric("la");
        c.append_lyric(Lyric::raw("-ing", 7).with_identifier("verse"));
        assert_eq!(c.lyrics()[1].text, "-ing");
        assert_eq!(c.lyrics()[1].number, 2);
        assert_eq!(c.lyrics()[1].identifier.as_deref(), Some("verse"));
    }
}
