use crate::WORD_LENGTH;
use crate::debug_log;
use crate::error::SolverError;
use crate::word::Word;

fn letter_bit(letter: u8) -> u32 {
    1 << (letter - b'a')
}

/// Working dictionary for one guessing session.
///
/// Every entry owns [`WORD_LENGTH`] cells, one per position. Feedback never
/// removes a word; it blocks cells whose letter has been proven wrong at that
/// position. A word with any blocked cell can no longer be guessed, but it
/// keeps its index and stays readable through [`CandidateStore::candidate_at`].
///
/// Alongside the cells the store keeps, per position, the letters proven
/// wrong there, so words outside the dictionary can be checked too.
#[derive(Debug, Clone)]
pub struct CandidateStore {
    words: Vec<Word>,
    blocked: Vec<bool>,
    ruled_out: [u32; WORD_LENGTH],
}

impl CandidateStore {
    pub fn load(words: Vec<Word>) -> Result<Self, SolverError> {
        if words.is_empty() {
            return Err(SolverError::EmptyDictionary);
        }
        let blocked = vec![false; words.len() * WORD_LENGTH];
        Ok(Self {
            words,
            blocked,
            ruled_out: [0; WORD_LENGTH],
        })
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.words.len()
    }

    /// # Panics
    /// If `index` is not below [`CandidateStore::size`].
    #[must_use]
    pub fn candidate_at(&self, index: usize) -> Word {
        debug_assert!(index < self.size(), "entry {index} out of range");
        self.words[index]
    }

    /// The dictionary as loaded, without block markers.
    #[must_use]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Mark entry `index` unusable at `position`, where `letter` is proven wrong.
    /// Only that one cell changes; [`CandidateStore::rule_out`] and
    /// [`CandidateStore::pin`] are the dictionary-wide forms.
    pub fn block_position(&mut self, index: usize, position: usize, letter: u8) {
        debug_assert!(position < WORD_LENGTH);
        debug_assert_eq!(self.words[index].letter(position), letter);
        self.blocked[index * WORD_LENGTH + position] = true;
    }

    /// # Panics
    /// If `index` is out of range. In debug builds also if `position` is not
    /// below [`WORD_LENGTH`], which would otherwise read the next entry's cell.
    #[must_use]
    pub fn is_blocked(&self, index: usize, position: usize) -> bool {
        debug_assert!(index < self.size(), "entry {index} out of range");
        debug_assert!(position < WORD_LENGTH, "position {position} out of range");
        self.blocked[index * WORD_LENGTH + position]
    }

    /// Whether entry `index` can still be guessed.
    ///
    /// # Panics
    /// If `index` is not below [`CandidateStore::size`].
    #[must_use]
    pub fn is_viable(&self, index: usize) -> bool {
        debug_assert!(index < self.size(), "entry {index} out of range");
        let start = index * WORD_LENGTH;
        !self.blocked[start..start + WORD_LENGTH].iter().any(|&b| b)
    }

    /// Whether `word` avoids every letter proven wrong at its position.
    #[must_use]
    pub fn admits(&self, word: &Word) -> bool {
        word.letters()
            .iter()
            .zip(self.ruled_out.iter())
            .all(|(&letter, &mask)| mask & letter_bit(letter) == 0)
    }

    /// `letter` cannot occupy `position`: block it there in every entry.
    pub fn rule_out(&mut self, position: usize, letter: u8) {
        self.block_where(position, |c| c == letter);
        self.ruled_out[position] |= letter_bit(letter);
    }

    /// `position` must hold `letter`: block every entry with anything else there.
    pub fn pin(&mut self, position: usize, letter: u8) {
        self.block_where(position, |c| c != letter);
        self.ruled_out[position] |= !letter_bit(letter) & ((1 << 26) - 1);
    }

    fn block_where(&mut self, position: usize, wrong: impl Fn(u8) -> bool) {
        let mut count = 0usize;
        for index in 0..self.words.len() {
            let letter = self.words[index].letter(position);
            if wrong(letter) && !self.is_blocked(index, position) {
                self.block_position(index, position, letter);
                count += 1;
            }
        }
        debug_log!("Blocked {} cells at position {}", count, position);
    }

    /// Number of entries with no blocked cell.
    #[must_use]
    pub fn viable_count(&self) -> usize {
        (0..self.words.len()).filter(|&i| self.is_viable(i)).count()
    }
}
