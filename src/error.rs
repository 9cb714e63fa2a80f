//! # Error Types
//!
//! This module defines all error types for the library.
//!
//! Every failure is raised synchronously at the violated precondition. All
//! computations here are pure and deterministic, so nothing is retried.
//! Classifier results of `Unknown` quality are ordinary values, not errors:
//! they mean "not enough context to classify", which is a valid answer.
//!
//! ## Usage
//! ```rust
//! use modal::{Scale, TheoryError};
//!
//! match Scale::from_intervals("2212222") {
//!     Ok(scale) => println!("{}", scale),
//!     Err(TheoryError::InvalidPattern { pattern, message }) => {
//!         eprintln!("Bad pattern '{}': {}", pattern, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TheoryError {
    /// Interval pattern outside the `[wWhH1-9]` alphabet, or whose steps do
    /// not span exactly one octave.
    ///
    /// # Example
    /// ```
    /// # use modal::TheoryError;
    /// let err = TheoryError::InvalidPattern {
    ///     pattern: "2212222".to_string(),
    ///     message: "steps span 13 semitones, expected 12".to_string(),
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Invalid interval pattern '2212222': steps span 13 semitones, expected 12"
    /// );
    /// ```
    #[error("Invalid interval pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Keyboard vector of the wrong length, or missing the tonic at either
    /// end of the octave.
    #[error("Invalid keyboard: {message}")]
    InvalidKeyboard { message: String },

    /// A tonic-dependent operation (rotation, spelling, degree numbering)
    /// was invoked on a pattern-only scale.
    ///
    /// # Example
    /// ```
    /// # use modal::TheoryError;
    /// let err = TheoryError::MissingTonic { operation: "spell" };
    /// assert_eq!(err.to_string(), "Cannot spell a scale without a tonic");
    /// ```
    #[error("Cannot {operation} a scale without a tonic")]
    MissingTonic { operation: &'static str },

    /// A note name the naming table cannot resolve.
    #[error("Unknown note name '{0}'")]
    UnknownNoteName(String),
}
