//! Error types for the puzzle engine, with error codes and helpful messages.
//!
//! # Error Codes
//!
//! - C001: `InvalidTileCount` (Tile count outside 2-6)
//! - C002: `InvalidLetterCount` (Letter selection is not exactly nine letters)
//!
//! A missing word list is deliberately *not* an error: the dictionary loads as
//! empty and the game keeps running. See [`crate::word_dictionary`].
//!
//! # Examples
//!
//! ```
//! use countdown::errors::CountdownError;
//! use countdown::shapes::ShapeTable;
//!
//! match ShapeTable::global().lookup(7) {
//!     Err(e) => {
//!         assert_eq!(e.code(), "C001");
//!         println!("{}", e.display_detailed());
//!     }
//!     Ok(_) => unreachable!(),
//! }
//! ```

use crate::shapes::{MAX_TILES, MIN_TILES};
use crate::word_dictionary::MAX_LETTERS;

/// Errors surfaced synchronously to callers of the shape table and the dictionary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CountdownError {
    #[error("Invalid tile count {tile_count} (must be between {min} and {max})", min = MIN_TILES, max = MAX_TILES)]
    InvalidTileCount { tile_count: usize },

    #[error("Expected exactly {expected} letters, found {found}", expected = MAX_LETTERS)]
    InvalidLetterCount { found: usize },
}

impl CountdownError {
    /// Returns the error code for this error variant
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            CountdownError::InvalidTileCount { .. } => "C001",
            CountdownError::InvalidLetterCount { .. } => "C002",
        }
    }

    /// Returns a short description of this error type (for documentation)
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            CountdownError::InvalidTileCount { .. } => "Tile count outside 2-6",
            CountdownError::InvalidLetterCount { .. } => "Letter selection is not exactly nine letters",
        }
    }

    /// Returns detailed explanation of this error type (for documentation)
    #[must_use]
    pub fn details(&self) -> &'static str {
        match self {
            CountdownError::InvalidTileCount { .. } => "Equation shapes exist only for 2 to 6 number tiles. A single tile needs no operator and the game never deals more than six.",
            CountdownError::InvalidLetterCount { .. } => "Word queries work on a full round of nine letters. Shorter words are found by choosing subsets of those nine, so the selection itself must not be shorter or longer.",
        }
    }

    /// Returns a helpful suggestion for this error
    #[must_use]
    pub fn help(&self) -> Option<&'static str> {
        match self {
            CountdownError::InvalidTileCount { .. } => Some("Pass a tile count between 2 and 6 inclusive"),
            CountdownError::InvalidLetterCount { found: 0 } => Some("No letters were given; supply nine letters such as 'rtsucmope'"),
            CountdownError::InvalidLetterCount { .. } => Some("Supply exactly nine letters, e.g. 'rtsucmope'"),
        }
    }

    /// Formats the error with code and optional help text
    #[must_use]
    pub fn display_detailed(&self) -> String {
        format_error_with_code_and_help(&self.to_string(), self.code(), self.help())
    }
}

/// Helper function to format error messages with code and optional help text
pub(crate) fn format_error_with_code_and_help(base_msg: &str, code: &str, help: Option<&str>) -> String {
    if let Some(help_text) = help {
        format!("{base_msg} ({code})\n{help_text}")
    } else {
        format!("{base_msg} ({code})")
    }
}
