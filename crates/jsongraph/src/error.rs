//! Parse failure types.
//!
//! Every grammar violation is a [`GrammarError`]; stream-source faults are
//! wrapped as [`ParseError::Io`] with the original `std::io::Error` kept as
//! the cause. A failed parse never yields a partially built value.

use std::fmt;
use std::io;

use thiserror::Error;

/// A violation of the JSON value grammar, raised at the point of detection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarError {
    /// What the parser was looking for, e.g. `"',' or ']'"`.
    pub expected: &'static str,
    /// The offending character, or `None` at end of input.
    pub found: Option<char>,
    /// Absolute position of the fault: a byte offset in buffer mode, an
    /// approximate character count in stream mode.
    pub position: usize,
    /// The enclosing `[from, to)` parse window. Absent in stream mode.
    pub window: Option<(usize, usize)>,
    /// Bounded input text around the fault. Absent in stream mode.
    pub snippet: Option<String>,
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.found {
            Some(c) => write!(f, "unexpected character {c:?}")?,
            None => f.write_str("unexpected end of input")?,
        }
        write!(f, " (expected {}) at {}", self.expected, self.position)?;
        if let Some((from, to)) = self.window {
            write!(f, " in [{from},{to})")?;
        }
        if let Some(snippet) = &self.snippet {
            write!(f, " near '...{snippet}...'")?;
        }
        Ok(())
    }
}

impl std::error::Error for GrammarError {}

/// Any failure while parsing JSON input.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input violated the value grammar.
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    /// The underlying character source faulted during a read.
    #[error("I/O failure while parsing near position {position}")]
    Io {
        /// Approximate position reached when the source faulted.
        position: usize,
        /// The original fault.
        #[source]
        source: io::Error,
    },
}

impl ParseError {
    /// The position the failure was detected at.
    pub fn position(&self) -> usize {
        match self {
            Self::Grammar(e) => e.position,
            Self::Io { position, .. } => *position,
        }
    }

    /// The grammar error, when this is one.
    pub fn as_grammar(&self) -> Option<&GrammarError> {
        match self {
            Self::Grammar(e) => Some(e),
            Self::Io { .. } => None,
        }
    }
}
