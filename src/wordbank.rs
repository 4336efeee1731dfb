use crate::debug_log;
use crate::error::SolverError;
use crate::word::Word;
use rand::Rng;
use rand::seq::SliceRandom;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

const DATA_DIR_NAME: &str = "wordle-guesser";
const WORDBANK_FILE_NAME: &str = "words.txt";

/// Split on whitespace and keep every token that parses as a [`Word`].
/// Duplicates are kept in file order.
pub fn load_wordbank_from_str(data: &str) -> Vec<Word> {
    data.split_whitespace()
        .filter_map(|token| match Word::parse(token) {
            Ok(word) => Some(word),
            Err(e) => {
                debug_log!("Skipping token '{}': {}", token, e);
                None
            }
        })
        .collect()
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<Word>> {
    let data = fs::read_to_string(path)?;
    Ok(load_wordbank_from_str(&data))
}

/// `<data dir>/wordle-guesser/words.txt`, if the platform has a data dir.
#[must_use]
pub fn default_wordbank_path() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join(DATA_DIR_NAME).join(WORDBANK_FILE_NAME))
}

/// Pick the secret for a game.
///
/// A single character (after trimming) means "any word": one is drawn
/// uniformly from `dictionary`. Anything else is taken as the secret
/// itself. Membership in the dictionary is not required, only warned about.
pub fn choose_secret<R: Rng + ?Sized>(
    dictionary: &[Word],
    input: &str,
    rng: &mut R,
) -> Result<Word, SolverError> {
    let input = input.trim();
    if input.chars().count() == 1 {
        return dictionary
            .choose(rng)
            .copied()
            .ok_or(SolverError::EmptyDictionary);
    }
    let secret = Word::parse(input)?;
    if !dictionary.contains(&secret) {
        log::warn!("Secret '{secret}' is not in the dictionary; the guesser may not find it");
    }
    Ok(secret)
}
