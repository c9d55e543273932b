//! # Pitch
//!
//! A pitch is a spelled tone: a diatonic step (C-B), an accidental and an octave.
//!
//! ## Spelling
//! - Sharps are written `#`, `##`, `###`
//! - Flats are written `-`, `--`, `---` (a lowercase `b` after the step is also read as a flat)
//! - Octave numbers follow scientific pitch notation: C4 is middle C (MIDI 60)
//! - The octave number **changes at C**, so B3 is one semitone below C4
//! - Octaves start at 0. A name like `C-1` always means C-flat in octave 1, so
//!   pitches in negative octaves are rejected with a `ValueError`
//!
//! Two pitches are equal only when they are spelled the same way. C#4 and D-4 sound
//! the same (see [`Pitch::is_enharmonic`]) but are different pitches.
//!
//! ## Transposition
//! [`Pitch::transpose`] moves the step by the interval's staff steps, then picks the
//! accidental that makes the MIDI number move by exactly the interval's semitones.
//! C4 up a minor second is D-4, not C#4.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::error::ChordError;
use crate::interval::Interval;

/// Octave used when a pitch name or pitch class carries no octave of its own.
pub const DEFAULT_OCTAVE: i8 = 4;

/// Lowest octave a pitch can be written in
pub const MIN_OCTAVE: i8 = 0;

fn check_octave(octave: i64) -> Result<i8, ChordError> {
    i8::try_from(octave)
        .ok()
        .filter(|o| *o >= MIN_OCTAVE)
        .ok_or_else(|| {
            ChordError::ValueError(format!(
                "octave {} is outside the supported range {}..={}",
                octave,
                MIN_OCTAVE,
                i8::MAX
            ))
        })
}

/// MIDI number of a natural step in an octave
fn natural_midi(step: Step, octave: i64) -> i64 {
    (octave + 1) * 12 + step.semitones() as i64
}

/// Diatonic step names C through B
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Step {
    #[default]
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Step {
    const ALL: [Step; 7] = [Step::C, Step::D, Step::E, Step::F, Step::G, Step::A, Step::B];

    /// Position within the octave, C = 0 through B = 6
    pub fn index(self) -> i32 {
        match self {
            Step::C => 0,
            Step::D => 1,
            Step::E => 2,
            Step::F => 3,
            Step::G => 4,
            Step::A => 5,
            Step::B => 6,
        }
    }

    /// Step for a diatonic index; wraps around the octave
    pub fn from_index(index: i32) -> Step {
        Self::ALL[index.rem_euclid(7) as usize]
    }

    /// Semitones above C
    pub fn semitones(self) -> i32 {
        match self {
            Step::C => 0,
            Step::D => 2,
            Step::E => 4,
            Step::F => 5,
            Step::G => 7,
            Step::A => 9,
            Step::B => 11,
        }
    }

    /// Parse a step letter (case-insensitive)
    pub fn from_char(c: char) -> Option<Step> {
        match c.to_ascii_uppercase() {
            'C' => Some(Step::C),
            'D' => Some(Step::D),
            'E' => Some(Step::E),
            'F' => Some(Step::F),
            'G' => Some(Step::G),
            'A' => Some(Step::A),
            'B' => Some(Step::B),
            _ => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Step::C => "C",
            Step::D => "D",
            Step::E => "E",
            Step::F => "F",
            Step::G => "G",
            Step::A => "A",
            Step::B => "B",
        })
    }
}

/// Accidentals from triple flat to triple sharp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Accidental {
    TripleFlat,
    DoubleFlat,
    Flat,
    #[default]
    Natural,
    Sharp,
    DoubleSharp,
    TripleSharp,
}

impl Accidental {
    /// Alteration in semitones (-3 to +3)
    pub fn alter(self) -> i32 {
        match self {
            Accidental::TripleFlat => -3,
            Accidental::DoubleFlat => -2,
            Accidental::Flat => -1,
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::DoubleSharp => 2,
            Accidental::TripleSharp => 3,
        }
    }

    /// Accidental for an alteration, `None` beyond three sharps or flats
    pub fn from_alter(alter: i32) -> Option<Accidental> {
        match alter {
            -3 => Some(Accidental::TripleFlat),
            -2 => Some(Accidental::DoubleFlat),
            -1 => Some(Accidental::Flat),
            0 => Some(Accidental::Natural),
            1 => Some(Accidental::Sharp),
            2 => Some(Accidental::DoubleSharp),
            3 => Some(Accidental::TripleSharp),
            _ => None,
        }
    }

    /// Parse the accidental part of a pitch name.
    /// Accepts "", "#", "##", "###", "-", "--", "---", "b", "bb", "bbb".
    pub fn from_symbol(symbol: &str) -> Option<Accidental> {
        let count = symbol.chars().count() as i32;
        if count > 3 {
            return None;
        }
        if symbol.chars().all(|c| c == '#') {
            Accidental::from_alter(count)
        } else if symbol.chars().all(|c| c == '-') || symbol.chars().all(|c| c == 'b') {
            Accidental::from_alter(-count)
        } else {
            None
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Accidental::TripleFlat => "---",
            Accidental::DoubleFlat => "--",
            Accidental::Flat => "-",
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::DoubleSharp => "##",
            Accidental::TripleSharp => "###",
        }
    }
}

impl fmt::Display for Accidental {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Default spelling for each pitch class: sharps for C# F# G#, flats for E- B-
fn spell_pitch_class(pitch_class: u8) -> (Step, Accidental) {
    match pitch_class % 12 {
        0 => (Step::C, Accidental::Natural),
        1 => (Step::C, Accidental::Sharp),
        2 => (Step::D, Accidental::Natural),
        3 => (Step::E, Accidental::Flat),
        4 => (Step::E, Accidental::Natural),
        5 => (Step::F, Accidental::Natural),
        6 => (Step::F, Accidental::Sharp),
        7 => (Step::G, Accidental::Natural),
        8 => (Step::G, Accidental::Sharp),
        9 => (Step::A, Accidental::Natural),
        10 => (Step::B, Accidental::Flat),
        11 => (Step::B, Accidental::Natural),
        _ => unreachable!(),
    }
}

/// A spelled pitch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pitch {
    step: Step,
    accidental: Accidental,
    octave: i8,
}

impl Default for Pitch {
    fn default() -> Self {
        Self {
            step: Step::C,
            accidental: Accidental::Natural,
            octave: DEFAULT_OCTAVE,
        }
    }
}

impl Pitch {
    /// # Errors
    /// Returns [`ChordError::ValueError`] for octaves below [`MIN_OCTAVE`].
    pub fn new(step: Step, accidental: Accidental, octave: i8) -> Result<Self, ChordError> {
        let octave = check_octave(octave as i64)?;
        Ok(Self { step, accidental, octave })
    }

    /// Pitch for a MIDI note number, spelled with the default sharp/flat table.
    /// Numbers 0-11 sit in octave -1 and are rejected.
    ///
    /// ```
    /// use chordkit::Pitch;
    /// assert_eq!(Pitch::from_midi(61)?.to_string(), "C#4");
    /// assert_eq!(Pitch::from_midi(70)?.to_string(), "B-4");
    /// assert!(Pitch::from_midi(11).is_err());
    /// # Ok::<(), chordkit::ChordError>(())
    /// ```
    pub fn from_midi(midi: u8) -> Result<Self, ChordError> {
        let (step, accidental) = spell_pitch_class(midi % 12);
        let octave = check_octave((midi / 12) as i64 - 1)?;
        Ok(Self { step, accidental, octave })
    }

    /// Pitch for a pitch class (0 = C, 11 = B) placed in the given octave
    pub fn from_pitch_class(pitch_class: u8, octave: i8) -> Result<Self, ChordError> {
        let (step, accidental) = spell_pitch_class(pitch_class);
        Self::new(step, accidental, octave)
    }

    /// Parse a pitch name, using `default_octave` when the name has no octave number.
    pub fn parse_with_octave(s: &str, default_octave: i8) -> Result<Self, ChordError> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let first = chars
            .next()
            .ok_or_else(|| ChordError::parse(s, "empty pitch name"))?;
        let step = Step::from_char(first)
            .ok_or_else(|| ChordError::parse(s, format!("unknown step '{}'", first)))?;

        // Everything up to the first digit is the accidental, the rest is the octave
        let rest = chars.as_str();
        let digits_at = rest.find(|c: char| c.is_ascii_digit()).unwrap_or(rest.len());
        let (accidental_text, octave_text) = rest.split_at(digits_at);

        let accidental = Accidental::from_symbol(accidental_text).ok_or_else(|| {
            ChordError::parse(s, format!("unknown accidental '{}'", accidental_text))
        })?;
        let octave = if octave_text.is_empty() {
            default_octave
        } else {
            octave_text
                .parse::<i8>()
                .map_err(|_| ChordError::parse(s, format!("invalid octave '{}'", octave_text)))?
        };

        Self::new(step, accidental, octave)
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn accidental(&self) -> Accidental {
        self.accidental
    }

    pub fn octave(&self) -> i8 {
        self.octave
    }

    /// Alteration in semitones from the natural step
    pub fn alter(&self) -> i32 {
        self.accidental.alter()
    }

    /// MIDI note number (C4 = 60). Can fall outside 0-127 for extreme octaves.
    pub fn midi(&self) -> i32 {
        (self.octave as i32 + 1) * 12 + self.step.semitones() + self.accidental.alter()
    }

    /// Pitch class 0-11, C = 0
    pub fn pitch_class(&self) -> u8 {
        self.midi().rem_euclid(12) as u8
    }

    /// Number of diatonic steps above C0
    pub fn diatonic_number(&self) -> i32 {
        self.octave as i32 * 7 + self.step.index()
    }

    /// Frequency in Hz, equal temperament with A4 = 440
    pub fn frequency(&self) -> f64 {
        440.0 * 2f64.powf((self.midi() - 69) as f64 / 12.0)
    }

    /// Name without octave, e.g. "C#" or "B-"
    pub fn name(&self) -> String {
        format!("{}{}", self.step, self.accidental)
    }

    /// Name with octave, e.g. "C#4"
    pub fn name_with_octave(&self) -> String {
        format!("{}{}{}", self.step, self.accidental, self.octave)
    }

    /// True when both pitches sound the same, regardless of spelling
    pub fn is_enharmonic(&self, other: &Pitch) -> bool {
        self.midi() == other.midi()
    }

    /// Transpose by an interval, returning a new pitch.
    ///
    /// # Errors
    /// Returns [`ChordError::ValueError`] when the result would need more than
    /// three sharps or flats, or an octave outside [`MIN_OCTAVE`]..=127.
    pub fn transpose(&self, interval: &Interval) -> Result<Pitch, ChordError> {
        // i64 so that any pair of i32 offsets adds without overflow
        let target = self.diatonic_number() as i64 + interval.staff_steps() as i64;
        let step = Step::from_index(target.rem_euclid(7) as i32);
        let octave_number = target.div_euclid(7);
        let octave = check_octave(octave_number)?;

        let natural = natural_midi(step, octave_number);
        let alter = self.midi() as i64 + interval.semitones() as i64 - natural;
        let accidental = i32::try_from(alter)
            .ok()
            .and_then(Accidental::from_alter)
            .ok_or_else(|| {
                ChordError::ValueError(format!(
                    "transposing {} by {} needs an alteration of {} semitones",
                    self, interval, alter
                ))
            })?;

        let transposed = Pitch { step, accidental, octave };
        debug!("Transposed {} by {} to {}", self, interval, transposed);
        Ok(transposed)
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name_with_octave())
    }
}

impl FromStr for Pitch {
    type Err = ChordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pitch::parse_with_octave(s, DEFAULT_OCTAVE)
    }
}
