//! Durations measured in quarter notes.

use log::debug;

use crate::error::ChordError;

/// Tolerance used when matching a quarter length against note types
const EPSILON: f64 = 1e-9;

/// Note types from breve down to sixty-fourth
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationType {
    Breve,
    Whole,
    Half,
    Quarter,
    Eighth,
    Sixteenth,
    ThirtySecond,
    SixtyFourth,
}

impl DurationType {
    const ALL: [DurationType; 8] = [
        DurationType::Breve,
        DurationType::Whole,
        DurationType::Half,
        DurationType::Quarter,
        DurationType::Eighth,
        DurationType::Sixteenth,
        DurationType::ThirtySecond,
        DurationType::SixtyFourth,
    ];

    /// Undotted length in quarter notes
    pub fn quarter_length(&self) -> f64 {
        match self {
            DurationType::Breve => 8.0,
            DurationType::Whole => 4.0,
            DurationType::Half => 2.0,
            DurationType::Quarter => 1.0,
            DurationType::Eighth => 0.5,
            DurationType::Sixteenth => 0.25,
            DurationType::ThirtySecond => 0.125,
            DurationType::SixtyFourth => 0.0625,
        }
    }

    /// MusicXML-style type name
    pub fn type_name(&self) -> &'static str {
        match self {
            DurationType::Breve => "breve",
            DurationType::Whole => "whole",
            DurationType::Half => "half",
            DurationType::Quarter => "quarter",
            DurationType::Eighth => "eighth",
            DurationType::Sixteenth => "16th",
            DurationType::ThirtySecond => "32nd",
            DurationType::SixtyFourth => "64th",
        }
    }
}

/// Length of a musical event in quarter notes. Always finite and greater than zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Duration {
    quarter_length: f64,
}

impl Default for Duration {
    fn default() -> Self {
        Self { quarter_length: 1.0 }
    }
}

fn check_quarter_length(quarter_length: f64) -> Result<f64, ChordError> {
    if quarter_length.is_finite() && quarter_length > 0.0 {
        Ok(quarter_length)
    } else {
        Err(ChordError::ValueError(format!(
            "quarter length must be positive, got {}",
            quarter_length
        )))
    }
}

impl Duration {
    pub fn new(quarter_length: f64) -> Result<Self, ChordError> {
        Ok(Self {
            quarter_length: check_quarter_length(quarter_length)?,
        })
    }

    /// Duration of a note type with up to any number of dots.
    /// Each dot adds half of the previous value: a dotted quarter is 1.5.
    pub fn from_type(duration_type: DurationType, dots: u8) -> Self {
        let base = duration_type.quarter_length();
        let quarter_length = base * (2.0 - 0.5f64.powi(dots as i32));
        Self { quarter_length }
    }

    pub fn quarter_length(&self) -> f64 {
        self.quarter_length
    }

    /// Replace the length. On error the previous length is kept.
    pub fn set_quarter_length(&mut self, quarter_length: f64) -> Result<(), ChordError> {
        self.quarter_length = check_quarter_length(quarter_length)?;
        debug!("Set quarter length to {}", quarter_length);
        Ok(())
    }

    /// Note type and dot count (0-2) that spell this length exactly,
    /// or `None` for lengths such as 4/3 that need a tuplet or a tie.
    pub fn components(&self) -> Option<(DurationType, u8)> {
        DurationType::ALL.iter().find_map(|duration_type| {
            (0..=2u8).find_map(|dots| {
                let candidate = Duration::from_type(*duration_type, dots).quarter_length;
                ((candidate - self.quarter_length).abs() < EPSILON).then_some((*duration_type, dots))
            })
        })
    }

    /// Type name of this duration, "complex" when no single note type matches
    pub fn type_name(&self) -> &'static str {
        self.components()
            .map(|(duration_type, _)| duration_type.type_name())
            .unwrap_or("complex")
    }

    pub fn dots(&self) -> u8 {
        self.components().map(|(_, dots)| dots).unwrap_or(0)
    }
}

impl TryFrom<f64> for Duration {
    type Error = ChordError;

    fn try_from(quarter_length: f64) -> Result<Self, Self::Error> {
        Duration::new(quarter_length)
    }
}
