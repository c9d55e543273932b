//! Lyric syllables attached to a chord.
//!
//! Hyphens mark where a syllable sits within a word:
//! - "hel-" begins a word
//! - "-lo" ends a word
//! - "-la-" sits in the middle
//! - anything else is a single-syllable word

use std::fmt;

use serde::{Deserialize, Serialize};

/// Position of a syllable within its word
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Syllabic {
    #[default]
    Single,
    Begin,
    Middle,
    End,
}

impl Syllabic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Syllabic::Single => "single",
            Syllabic::Begin => "begin",
            Syllabic::Middle => "middle",
            Syllabic::End => "end",
        }
    }
}

/// A numbered lyric line entry
#[derive(Debug, Clone, PartialEq)]
pub struct Lyric {
    pub text: String,
    /// 1-based verse/line number
    pub number: usize,
    pub syllabic: Syllabic,
    pub identifier: Option<String>,
}

impl Lyric {
    /// Create a lyric, reading hyphen markers into [`Syllabic`]
    pub fn new(text: &str, number: usize) -> Self {
        let starts = text.starts_with('-');
        let ends = text.ends_with('-');
        let (syllabic, text) = if starts && ends && text.len() >= 3 {
            (Syllabic::Middle, &text[1..text.len() - 1])
        } else if starts && text.len() >= 2 {
            (Syllabic::End, &text[1..])
        } else if ends && text.len() >= 2 {
            (Syllabic::Begin, &text[..text.len() - 1])
        } else {
            (Syllabic::Single, text)
        };

        Self {
            text: text.to_string(),
            number,
            syllabic,
            identifier: None,
        }
    }

    /// Create a lyric that keeps its text verbatim, hyphens included
    pub fn raw(text: &str, number: usize) -> Self {
        Self {
            text: text.to_string(),
            number,
            syllabic: Syllabic::Single,
            identifier: None,
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Text with hyphen markers restored
    pub fn raw_text(&self) -> String {
        match self.syllabic {
            Syllabic::Single => self.text.clone(),
            Syllabic::Begin => format!("{}-", self.text),
            Syllabic::Middle => format!("-{}-", self.text),
            Syllabic::End => format!("-{}", self.text),
        }
    }
}

impl fmt::Display for Lyric {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}
