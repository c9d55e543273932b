//! # Intervals
//!
//! An interval is stored as two signed distances:
//! - **staff steps**: how many letter names to move (a second is 1, a fifth is 4)
//! - **semitones**: how far the sound moves
//!
//! Keeping both lets transposition spell results correctly: a minor second and an
//! augmented unison are both one semitone, but C up a minor second is D-, while C up
//! an augmented unison is C#.
//!
//! ## Names
//! `<quality><number>`, with `-` before the number for descending intervals:
//! `P1 m2 M2 m3 M3 P4 A4 d5 P5 m6 M6 m7 M7 P8 M9 ... P-5 m-2`.
//! A leading `-` (`-P5`) is accepted when parsing. Repeated `A`/`d` letters give
//! doubly, triply... augmented and diminished intervals.

use std::fmt;
use std::ops::{Add, Neg};
use std::str::FromStr;

use crate::error::ChordError;
use crate::pitch::Pitch;

/// Semitones of the major/perfect interval for each simple staff-step count
const REFERENCE_SEMITONES: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

/// Staff steps of the default spelling for each semitone count within an octave
/// (P1 m2 M2 m3 M3 P4 d5 P5 m6 M6 m7 M7)
const DEFAULT_STAFF_STEPS: [i32; 12] = [0, 1, 1, 2, 2, 3, 4, 4, 5, 5, 6, 6];

fn is_perfect_type(simple_steps: i32) -> bool {
    matches!(simple_steps, 0 | 3 | 4)
}

/// Interval quality
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    Perfect,
    Major,
    Minor,
    /// Augmented by the given count (1 = augmented, 2 = doubly augmented)
    Augmented(u64),
    /// Diminished by the given count (1 = diminished, 2 = doubly diminished)
    Diminished(u64),
}

impl Quality {
    fn parse(letters: &str) -> Option<Quality> {
        match letters {
            "P" | "p" => Some(Quality::Perfect),
            "M" => Some(Quality::Major),
            "m" => Some(Quality::Minor),
            _ if !letters.is_empty() && letters.chars().all(|c| c == 'A' || c == 'a') => {
                Some(Quality::Augmented(letters.len() as u64))
            }
            _ if !letters.is_empty() && letters.chars().all(|c| c == 'd') => {
                Some(Quality::Diminished(letters.len() as u64))
            }
            _ => None,
        }
    }

    /// Offset in semitones from the major/perfect reference, `None` if the quality
    /// does not apply to this kind of interval (e.g. a major fifth)
    fn offset(self, perfect_type: bool) -> Option<i64> {
        match (self, perfect_type) {
            (Quality::Perfect, true) => Some(0),
            (Quality::Major, false) => Some(0),
            (Quality::Minor, false) => Some(-1),
            (Quality::Augmented(n), _) => i64::try_from(n).ok(),
            (Quality::Diminished(n), true) => i64::try_from(n).ok().map(|n| -n),
            (Quality::Diminished(n), false) => i64::try_from(n).ok().map(|n| -n - 1),
            _ => None,
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Quality::Perfect => write!(f, "P"),
            Quality::Major => write!(f, "M"),
            Quality::Minor => write!(f, "m"),
            // Counts past quadruple are written as e.g. "A^7" rather than seven letters
            Quality::Augmented(n) if *n > 4 => write!(f, "A^{}", n),
            Quality::Diminished(n) if *n > 4 => write!(f, "d^{}", n),
            Quality::Augmented(n) => write!(f, "{}", "A".repeat(*n as usize)),
            Quality::Diminished(n) => write!(f, "{}", "d".repeat(*n as usize)),
        }
    }
}

/// A directed musical interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Interval {
    staff_steps: i32,
    semitones: i32,
}

impl Interval {
    pub fn new(staff_steps: i32, semitones: i32) -> Self {
        Self { staff_steps, semitones }
    }

    /// Interval for a semitone count, spelled P1 m2 M2 m3 M3 P4 d5 P5 m6 M6 m7 M7
    /// within the octave. Negative counts give descending intervals.
    ///
    /// ```
    /// use chordkit::Interval;
    /// assert_eq!(Interval::from_semitones(3).name(), "m3");
    /// assert_eq!(Interval::from_semitones(-7).name(), "P-5");
    /// assert_eq!(Interval::from_semitones(14).name(), "M9");
    /// ```
    pub fn from_semitones(semitones: i32) -> Self {
        let magnitude = semitones.unsigned_abs();
        // at most 2^31 / 12 * 7 + 6 steps, well inside i32
        let octaves = (magnitude / 12) as i32;
        let steps = DEFAULT_STAFF_STEPS[(magnitude % 12) as usize] + octaves * 7;
        Self::new(steps * semitones.signum(), semitones)
    }

    /// Interval from one pitch to another
    pub fn between(from: &Pitch, to: &Pitch) -> Self {
        Self::new(
            to.diatonic_number() - from.diatonic_number(),
            to.midi() - from.midi(),
        )
    }

    pub fn staff_steps(&self) -> i32 {
        self.staff_steps
    }

    pub fn semitones(&self) -> i32 {
        self.semitones
    }

    pub fn is_descending(&self) -> bool {
        self.staff_steps < 0 || (self.staff_steps == 0 && self.semitones < 0)
    }

    /// Signed generic number: 2 for an ascending second, -2 for a descending one
    pub fn generic(&self) -> i64 {
        let number = self.staff_steps.unsigned_abs() as i64 + 1;
        if self.is_descending() { -number } else { number }
    }

    pub fn quality(&self) -> Quality {
        let direction: i64 = if self.is_descending() { -1 } else { 1 };
        let steps = self.staff_steps.unsigned_abs() as i64;
        let simple = steps % 7;
        let reference = REFERENCE_SEMITONES[simple as usize] as i64 + (steps / 7) * 12;
        let diff = self.semitones as i64 * direction - reference;

        if is_perfect_type(simple as i32) {
            match diff {
                0 => Quality::Perfect,
                d if d > 0 => Quality::Augmented(d as u64),
                d => Quality::Diminished((-d) as u64),
            }
        } else {
            match diff {
                0 => Quality::Major,
                -1 => Quality::Minor,
                d if d > 0 => Quality::Augmented(d as u64),
                d => Quality::Diminished((-d - 1) as u64),
            }
        }
    }

    /// Directed name, e.g. "m2", "P-5"
    pub fn name(&self) -> String {
        let sign = if self.is_descending() { "-" } else { "" };
        format!("{}{}{}", self.quality(), sign, self.generic().abs())
    }

    /// Same interval in the opposite direction.
    /// Like integer negation, this overflows for `i32::MIN` distances.
    pub fn reverse(&self) -> Self {
        -*self
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Add for Interval {
    type Output = Interval;

    fn add(self, other: Interval) -> Interval {
        Interval::new(
            self.staff_steps + other.staff_steps,
            self.semitones + other.semitones,
        )
    }
}

impl Neg for Interval {
    type Output = Interval;

    fn neg(self) -> Interval {
        Interval::new(-self.staff_steps, -self.semitones)
    }
}

impl FromStr for Interval {
    type Err = ChordError;

    /// Parse an interval name ("m2", "P-5", "-M3", "AA4") or a plain semitone count ("7").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(semitones) = trimmed.parse::<i32>() {
            return Ok(Interval::from_semitones(semitones));
        }

        let (mut descending, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };

        let number_at = body
            .find(|c: char| c.is_ascii_digit() || c == '-')
            .ok_or_else(|| ChordError::parse(s, "missing interval number"))?;
        let (letters, mut number_text) = body.split_at(number_at);
        if let Some(rest) = number_text.strip_prefix('-') {
            if descending {
                return Err(ChordError::parse(s, "direction given twice"));
            }
            descending = true;
            number_text = rest;
        }

        let quality = Quality::parse(letters)
            .ok_or_else(|| ChordError::parse(s, format!("unknown quality '{}'", letters)))?;
        let number = number_text
            .parse::<i32>()
            .ok()
            .filter(|n| *n >= 1)
            .ok_or_else(|| ChordError::parse(s, format!("invalid interval number '{}'", number_text)))?;

        let steps = number - 1;
        let simple = steps % 7;
        if steps == 0 && matches!(quality, Quality::Diminished(_)) {
            return Err(ChordError::parse(s, "a unison cannot be diminished"));
        }
        let offset = quality.offset(is_perfect_type(simple)).ok_or_else(|| {
            ChordError::parse(s, format!("quality '{}' does not apply to a {}", quality, number))
        })?;
        let semitones = REFERENCE_SEMITONES[simple as usize] as i64 + (steps as i64 / 7) * 12 + offset;
        let semitones = i32::try_from(semitones)
            .map_err(|_| ChordError::parse(s, format!("interval {} is too large", number)))?;

        let direction = if descending { -1 } else { 1 };
        Ok(Interval::new(steps * direction, semitones * direction))
    }
}

/// Anything that can name an interval: a name, a semitone count or an [`Interval`].
#[derive(Debug, Clone, PartialEq)]
pub enum IntervalSpec {
    Name(String),
    Semitones(i32),
    Interval(Interval),
}

impl IntervalSpec {
    pub fn resolve(&self) -> Result<Interval, ChordError> {
        match self {
            IntervalSpec::Name(name) => name.parse(),
            IntervalSpec::Semitones(semitones) => Ok(Interval::from_semitones(*semitones)),
            IntervalSpec::Interval(interval) => Ok(*interval),
        }
    }
}

impl From<&str> for IntervalSpec {
    fn from(name: &str) -> Self {
        IntervalSpec::Name(name.to_string())
    }
}

impl From<String> for IntervalSpec {
    fn from(name: String) -> Self {
        IntervalSpec::Name(name)
    }
}

impl From<i32> for IntervalSpec {
    fn from(semitones: i32) -> Self {
        IntervalSpec::Semitones(semitones)
    }
}

impl From<Interval> for IntervalSpec {
    fn from(interval: Interval) -> Self {
        IntervalSpec::Interval(interval)
    }
}

impl From<&Interval> for IntervalSpec {
    fn from(interval: &Interval) -> Self {
        IntervalSpec::Interval(*interval)
    }
}
