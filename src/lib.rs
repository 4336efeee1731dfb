// Library interface for wordle-guesser
// This allows integration tests to access internal modules

pub mod cli;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod solver;
pub mod store;
pub mod word;
pub mod wordbank;

/// Letters per word. Every word the crate handles has exactly this length.
pub const WORD_LENGTH: usize = 5;

// Re-export commonly used items for easier testing
pub use error::SolverError;
pub use game_state::{
    GameInterface, GameOptions, GuessSession, OPENERS, RoundReport, SessionState, game_loop,
};
pub use solver::{Feedback, RoundFeedback, get_feedback};
pub use store::CandidateStore;
pub use word::Word;
pub use wordbank::{choose_secret, load_wordbank_from_file, load_wordbank_from_str};
