use thiserror::Error;

/// Everything that can abort a guessing session.
///
/// None of these are retried: the guessing policy is deterministic, so a
/// failed session stays failed. Other sessions are unaffected because each
/// one owns its own candidate store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("the dictionary contains no words")]
    EmptyDictionary,
    #[error("expected a word of {expected} letters, got {found}")]
    LengthMismatch { expected: usize, found: usize },
    #[error("'{0}' is not a letter")]
    InvalidLetter(char),
    #[error("no valid guess left in the dictionary after {rounds} rounds (is the secret in the dictionary?)")]
    DictionaryExhausted { rounds: usize },
    #[error("the secret word has already been found")]
    AlreadySolved,
}
