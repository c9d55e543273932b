//! # Error Types
//!
//! This module defines all error types for chordkit.
//!
//! ## Error Types
//! - `ParseError` - A pitch or interval specification could not be parsed
//! - `ValueError` - A value is out of range (non-positive duration, unspellable accidental)
//! - `DocumentError` - Invalid YAML chord document
//! - `Io` - Reading a chord document from disk failed
//!
//! ## Usage
//! ```rust
//! use chordkit::{Chord, ChordError};
//!
//! match Chord::new(["c4", "x9"]) {
//!     Ok(chord) => println!("{}", chord),
//!     Err(ChordError::ParseError { input, message }) => {
//!         eprintln!("Could not read '{}': {}", input, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChordError {
    /// A pitch or interval specification could not be parsed.
    ///
    /// # Example
    /// ```
    /// # use chordkit::ChordError;
    /// let err = ChordError::ParseError {
    ///     input: "h4".to_string(),
    ///     message: "unknown step 'h'".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Cannot parse 'h4': unknown step 'h'");
    /// ```
    #[error("Cannot parse '{input}': {message}")]
    ParseError { input: String, message: String },

    /// A value is outside the range the model accepts.
    ///
    /// # Example
    /// ```
    /// # use chordkit::ChordError;
    /// let err = ChordError::ValueError("quarter length must be positive, got 0".to_string());
    /// assert_eq!(err.to_string(), "Invalid value: quarter length must be positive, got 0");
    /// ```
    #[error("Invalid value: {0}")]
    ValueError(String),

    /// Invalid chord document.
    #[error("Invalid chord document: {0}")]
    DocumentError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChordError {
    pub(crate) fn parse(input: impl Into<String>, message: impl Into<String>) -> Self {
        ChordError::ParseError {
            input: input.into(),
            message: message.into(),
        }
    }
}
