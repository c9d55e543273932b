//! # Chord Documents
//!
//! A small YAML format describing one chord, used by the command line tool.
//!
//! ```yaml
//! pitches: [c4, e4, g4]     # names, pitch classes (0-11) or MIDI numbers
//! quarter-length: 1.5
//! default-octave: 4         # for names and pitch classes without an octave
//! lyrics: [hel-, -lo, {text: -ing, syllabic: single, identifier: verse}]
//! velocity: 90
//! transpose: m2             # interval name or semitone count
//! ```
//!
//! The transposition is applied before lyrics and velocity, so lyrics listed in the
//! document end up on the transposed chord. Writing a chord back with [`to_yaml`]
//! produces a document without `transpose` that loads to the same chord.
//!
//! A lyric entry is either hyphen-marked text or a mapping with `text`, `syllabic`
//! (`single`, `begin`, `middle`, `end`) and `identifier`. [`to_yaml`] writes the
//! mapping form only for lyrics the hyphen form cannot reproduce, such as a raw
//! `-ing` or a lyric carrying an identifier.

use std::fs;
use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::chord::{Chord, PitchSpec};
use crate::duration::Duration;
use crate::error::ChordError;
use crate::interval::IntervalSpec;
use crate::lyric::{Lyric, Syllabic};
use crate::pitch::DEFAULT_OCTAVE;

/// A pitch entry: a number or a name
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawPitchSpec {
    Number(i64),
    Name(String),
}

impl From<RawPitchSpec> for PitchSpec {
    fn from(raw: RawPitchSpec) -> Self {
        match raw {
            RawPitchSpec::Number(n) => PitchSpec::Number(n),
            RawPitchSpec::Name(name) => PitchSpec::Name(name),
        }
    }
}

/// A transposition entry: a semitone count or an interval name
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawInterval {
    Semitones(i32),
    Name(String),
}

impl From<RawInterval> for IntervalSpec {
    fn from(raw: RawInterval) -> Self {
        match raw {
            RawInterval::Semitones(n) => IntervalSpec::Semitones(n),
            RawInterval::Name(name) => IntervalSpec::Name(name),
        }
    }
}

/// A lyric entry: hyphen-marked text or the full lyric fields
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawLyric {
    Text(String),
    Detailed {
        text: String,
        #[serde(default)]
        syllabic: Syllabic,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        identifier: Option<String>,
    },
}

impl RawLyric {
    fn from_lyric(lyric: &Lyric) -> Self {
        let raw_text = lyric.raw_text();
        if Lyric::new(&raw_text, lyric.number) == *lyric {
            RawLyric::Text(raw_text)
        } else {
            RawLyric::Detailed {
                text: lyric.text.clone(),
                syllabic: lyric.syllabic,
                identifier: lyric.identifier.clone(),
            }
        }
    }

    fn into_lyric(self, number: usize) -> Lyric {
        match self {
            RawLyric::Text(text) => Lyric::new(&text, number),
            RawLyric::Detailed { text, syllabic, identifier } => Lyric {
                text,
                number,
                syllabic,
                identifier,
            },
        }
    }
}

/// Chord document as read from YAML
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ChordDocument {
    #[serde(default)]
    pub pitches: Vec<RawPitchSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quarter_length: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_octave: Option<i8>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lyrics: Vec<RawLyric>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transpose: Option<RawInterval>,
}

impl ChordDocument {
    /// Describe an existing chord
    pub fn from_chord(chord: &Chord) -> Self {
        Self {
            pitches: chord
                .pitch_names()
                .into_iter()
                .map(RawPitchSpec::Name)
                .collect(),
            quarter_length: Some(chord.quarter_length()),
            default_octave: None,
            lyrics: chord.lyrics().iter().map(RawLyric::from_lyric).collect(),
            velocity: chord.volume().velocity().map(i32::from),
            transpose: None,
        }
    }

    /// Build the chord this document describes
    pub fn into_chord(self) -> Result<Chord, ChordError> {
        let default_octave = self.default_octave.unwrap_or(DEFAULT_OCTAVE);
        let mut chord = Chord::with_default_octave(self.pitches, default_octave)?;

        if let Some(quarter_length) = self.quarter_length {
            chord.set_duration(Duration::try_from(quarter_length)?);
        }
        if let Some(transpose) = self.transpose {
            chord = chord.transpose(transpose)?;
        }
        if let Some(velocity) = self.velocity {
            chord.volume_mut().set_velocity(velocity);
        }
        for (index, raw) in self.lyrics.into_iter().enumerate() {
            chord.append_lyric(raw.into_lyric(index + 1));
        }

        Ok(chord)
    }
}

/// Parse a YAML chord document into a chord
pub fn parse_document(source: &str) -> Result<Chord, ChordError> {
    let document: ChordDocument = if source.trim().is_empty() {
        ChordDocument::default()
    } else {
        serde_yaml::from_str(source).map_err(|e| ChordError::DocumentError(e.to_string()))?
    };
    debug!("Parsed chord document with {} pitches", document.pitches.len());
    document.into_chord()
}

/// Read and parse a chord document from disk
pub fn load_file(path: impl AsRef<Path>) -> Result<Chord, ChordError> {
    let source = fs::read_to_string(path.as_ref())?;
    parse_document(&source)
}

/// Serialize a chord as a YAML chord document
pub fn to_yaml(chord: &Chord) -> Result<String, ChordError> {
    serde_yaml::to_string(&ChordDocument::from_chord(chord))
        .map_err(|e| ChordError::DocumentError(e.to_string()))
}
