use crate::WORD_LENGTH;
use crate::word::Word;

/// Verdict for a single guess position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feedback {
    /// Right letter, right position.
    Exact,
    /// Letter occurs in the secret, but not here.
    Present,
    Absent,
}

impl Feedback {
    /// Character shown in the marker row beneath a guess.
    #[must_use]
    pub fn marker(self) -> char {
        match self {
            Feedback::Present => '*',
            Feedback::Exact | Feedback::Absent => ' ',
        }
    }
}

/// Feedback for one round: a verdict per position, plus where each Present
/// letter was found in the secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundFeedback {
    pub verdicts: [Feedback; WORD_LENGTH],
    /// `(guess position, secret position)` for every Present verdict, in guess order.
    pub placements: Vec<(usize, usize)>,
}

impl RoundFeedback {
    #[must_use]
    pub fn is_win(&self) -> bool {
        self.verdicts.iter().all(|&v| v == Feedback::Exact)
    }

    #[must_use]
    pub fn exact_count(&self) -> usize {
        self.verdicts.iter().filter(|&&v| v == Feedback::Exact).count()
    }
}

/// Score `guess` against `secret`.
///
/// Exact positions are settled first. Each remaining guess letter then takes
/// the first unconsumed secret position holding the same letter, so a letter
/// is never marked Present more often than the secret has it to spare.
#[must_use]
pub fn get_feedback(guess: &Word, secret: &Word) -> RoundFeedback {
    let mut verdicts = [Feedback::Absent; WORD_LENGTH];
    let mut secret_left: [Option<u8>; WORD_LENGTH] = [None; WORD_LENGTH];
    let mut placements = Vec::new();

    // First pass: exact matches
    for i in 0..WORD_LENGTH {
        if guess.letter(i) == secret.letter(i) {
            verdicts[i] = Feedback::Exact;
        } else {
            secret_left[i] = Some(secret.letter(i));
        }
    }

    // Second pass: misplaced letters
    for w in 0..WORD_LENGTH {
        if verdicts[w] == Feedback::Exact {
            continue;
        }
        let letter = guess.letter(w);
        if let Some(p) = secret_left.iter().position(|&c| c == Some(letter)) {
            verdicts[w] = Feedback::Present;
            secret_left[p] = None;
            placements.push((w, p));
        }
    }

    RoundFeedback {
        verdicts,
        placements,
    }
}
