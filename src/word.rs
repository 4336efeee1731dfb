use crate::WORD_LENGTH;
use crate::error::SolverError;
use std::fmt;
use std::str::FromStr;

/// A dictionary word: exactly [`WORD_LENGTH`] ASCII letters, stored lower-case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word([u8; WORD_LENGTH]);

impl Word {
    /// Parse and case-normalise a word, rejecting wrong lengths and non-letters.
    pub fn parse(text: &str) -> Result<Self, SolverError> {
        let found = text.chars().count();
        if found != WORD_LENGTH {
            return Err(SolverError::LengthMismatch {
                expected: WORD_LENGTH,
                found,
            });
        }
        let mut letters = [0u8; WORD_LENGTH];
        for (slot, c) in letters.iter_mut().zip(text.chars()) {
            if !c.is_ascii_alphabetic() {
                return Err(SolverError::InvalidLetter(c));
            }
            *slot = c.to_ascii_lowercase() as u8;
        }
        Ok(Self(letters))
    }

    #[must_use]
    pub fn letters(&self) -> &[u8; WORD_LENGTH] {
        &self.0
    }

    #[must_use]
    pub fn letter(&self, position: usize) -> u8 {
        self.0[position]
    }
}

impl FromStr for Word {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}
