use crate::error::SolverError;
use crate::solver::{Feedback, RoundFeedback, get_feedback};
use crate::store::CandidateStore;
use crate::word::Word;
use crate::wordbank::choose_secret;
use crate::{WORD_LENGTH, debug_log, info_log};
use rand::Rng;

/// Fixed opening guesses. Together they cover 25 distinct letters.
pub const OPENERS: [&str; 5] = ["chunk", "fjord", "gymps", "vibex", "waltz"];

#[must_use]
pub fn default_openers() -> Vec<Word> {
    OPENERS.iter().filter_map(|w| Word::parse(w).ok()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Secret known, nothing guessed yet.
    Seeded,
    Guessing,
    /// The last guess was the secret. Terminal.
    Solved,
}

/// One played round, as handed to the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundReport {
    /// 1-based.
    pub round: usize,
    pub guess: Word,
    pub verdicts: [Feedback; WORD_LENGTH],
    pub solved: bool,
}

impl RoundReport {
    /// Guess letters as displayed: upper-case where Exact.
    #[must_use]
    pub fn display_letters(&self) -> [char; WORD_LENGTH] {
        let mut letters = [' '; WORD_LENGTH];
        for (i, slot) in letters.iter_mut().enumerate() {
            let c = self.guess.letter(i) as char;
            *slot = if self.verdicts[i] == Feedback::Exact {
                c.to_ascii_uppercase()
            } else {
                c
            };
        }
        letters
    }

    #[must_use]
    pub fn markers(&self) -> [char; WORD_LENGTH] {
        self.verdicts.map(Feedback::marker)
    }
}

/// State of a single game: the secret, the session's own candidate store and
/// the guess-selection cursors.
///
/// Guesses come from the openers first, in order. The first opener that is
/// no longer admissible ends the opener phase; after that the dictionary is
/// scanned front to back. A word is admissible when none of its letters has
/// been proven wrong at its position and it differs from the previous guess.
#[derive(Debug, Clone)]
pub struct GuessSession {
    secret: Word,
    store: CandidateStore,
    openers: Vec<Word>,
    /// `None` once the opener phase is over.
    next_opener: Option<usize>,
    scan_cursor: usize,
    previous: Option<Word>,
    round: usize,
    resolved: [bool; WORD_LENGTH],
    state: SessionState,
}

impl GuessSession {
    /// Start a session with the default openers.
    #[must_use]
    pub fn new(secret: Word, store: CandidateStore) -> Self {
        Self::with_openers(secret, store, default_openers())
    }

    /// Start a session. `store` must be fresh: block markers from another
    /// session would reject words this one still needs.
    #[must_use]
    pub fn with_openers(secret: Word, store: CandidateStore, openers: Vec<Word>) -> Self {
        Self {
            secret,
            store,
            openers,
            next_opener: Some(0),
            scan_cursor: 0,
            previous: None,
            round: 1,
            resolved: [false; WORD_LENGTH],
            state: SessionState::Seeded,
        }
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn secret(&self) -> &Word {
        &self.secret
    }

    /// Number of the next round to be played.
    #[must_use]
    pub fn round(&self) -> usize {
        self.round
    }

    #[must_use]
    pub fn store(&self) -> &CandidateStore {
        &self.store
    }

    /// Positions already matched exactly.
    #[must_use]
    pub fn resolved_positions(&self) -> &[bool; WORD_LENGTH] {
        &self.resolved
    }

    fn is_repeat(&self, word: &Word) -> bool {
        self.previous.as_ref() == Some(word)
    }

    fn is_admissible(&self, word: &Word) -> bool {
        self.store.admits(word) && !self.is_repeat(word)
    }

    /// Advance the selection cursors to the next admissible guess.
    fn next_guess(&mut self) -> Result<Word, SolverError> {
        if let Some(index) = self.next_opener {
            if let Some(&opener) = self.openers.get(index) {
                if self.is_admissible(&opener) {
                    self.next_opener = Some(index + 1);
                    return Ok(opener);
                }
                debug_log!("Opener '{}' rejected, switching to dictionary scan", opener);
            }
            self.next_opener = None;
        }

        while self.scan_cursor < self.store.size() {
            let index = self.scan_cursor;
            self.scan_cursor += 1;
            let word = self.store.candidate_at(index);
            if self.store.is_viable(index) && !self.is_repeat(&word) {
                return Ok(word);
            }
        }

        Err(SolverError::DictionaryExhausted {
            rounds: self.round - 1,
        })
    }

    /// Carry one round of feedback into the store.
    fn propagate(&mut self, guess: &Word, feedback: &RoundFeedback) {
        for i in 0..WORD_LENGTH {
            let letter = guess.letter(i);
            if feedback.verdicts[i] == Feedback::Exact {
                if !self.resolved[i] {
                    self.store.pin(i, letter);
                    self.resolved[i] = true;
                }
            } else {
                self.store.rule_out(i, letter);
            }
        }

        // The Present letter is ruled out where it was guessed and pinned
        // where the secret holds it.
        for &(w, p) in &feedback.placements {
            let letter = guess.letter(w);
            self.store.rule_out(w, letter);
            self.store.pin(p, letter);
        }
    }

    /// Pick a guess, score it against the secret and narrow the store.
    pub fn play_round(&mut self) -> Result<RoundReport, SolverError> {
        if self.state == SessionState::Solved {
            return Err(SolverError::AlreadySolved);
        }
        self.state = SessionState::Guessing;

        let guess = self.next_guess()?;
        let feedback = get_feedback(&guess, &self.secret);
        self.propagate(&guess, &feedback);

        let report = RoundReport {
            round: self.round,
            guess,
            verdicts: feedback.verdicts,
            solved: feedback.is_win(),
        };
        info_log!(
            "Round {}: guessed '{}', {} exact, {} present, {} words still viable",
            report.round,
            guess,
            feedback.exact_count(),
            feedback.placements.len(),
            self.store.viable_count()
        );

        self.previous = Some(guess);
        self.round += 1;
        if report.solved {
            self.state = SessionState::Solved;
        }
        Ok(report)
    }

    /// Play rounds until the secret is found, handing each report to
    /// `on_round`. Returns the number of rounds played.
    pub fn solve<F>(&mut self, mut on_round: F) -> Result<usize, SolverError>
    where
        F: FnMut(&RoundReport),
    {
        loop {
            let report = self.play_round()?;
            on_round(&report);
            if report.solved {
                return Ok(report.round);
            }
        }
    }
}

/// How the shell talks to the guesser: where secrets come from and where
/// rounds are shown.
pub trait GameInterface {
    /// Raw secret input for the next game. `None` once input is exhausted.
    fn read_secret(&mut self) -> Option<String>;
    fn display_session_start(&mut self, secret: &Word);
    fn display_round(&mut self, report: &RoundReport);
    fn display_solved(&mut self, rounds: usize);
    fn display_error(&mut self, error: &SolverError);
}

#[derive(Debug, Clone)]
pub struct GameOptions {
    pub games: usize,
    pub use_openers: bool,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            games: 3,
            use_openers: true,
        }
    }
}

/// Play up to `options.games` independent games against `wordbank`.
///
/// Every game builds its own store from `wordbank`, so one game's block
/// markers never reach the next. A failed game is reported through the
/// interface and the loop moves on.
pub fn game_loop<R, I>(
    wordbank: &[Word],
    options: &GameOptions,
    rng: &mut R,
    interface: &mut I,
) -> Vec<Result<usize, SolverError>>
where
    R: Rng + ?Sized,
    I: GameInterface + ?Sized,
{
    let mut results = Vec::with_capacity(options.games);
    for game in 1..=options.games {
        let Some(input) = interface.read_secret() else {
            debug_log!("Input closed before game {}", game);
            break;
        };
        let result = play_game(wordbank, &input, options, rng, interface);
        match &result {
            Ok(rounds) => {
                info_log!("Game {} solved in {} rounds", game, rounds);
            }
            Err(e) => {
                log::error!("Game {game} aborted: {e}");
                interface.display_error(e);
            }
        }
        results.push(result);
    }
    results
}

fn play_game<R, I>(
    wordbank: &[Word],
    input: &str,
    options: &GameOptions,
    rng: &mut R,
    interface: &mut I,
) -> Result<usize, SolverError>
where
    R: Rng + ?Sized,
    I: GameInterface + ?Sized,
{
    let secret = choose_secret(wordbank, input, rng)?;
    let store = CandidateStore::load(wordbank.to_vec())?;
    let openers = if options.use_openers {
        default_openers()
    } else {
        Vec::new()
    };
    let mut session = GuessSession::with_openers(secret, store, openers);

    interface.display_session_start(session.secret());
    let rounds = session.solve(|report| interface.display_round(report))?;
    interface.display_solved(rounds);
    Ok(rounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordbank::{EMBEDDED_WORDBANK, load_wordbank_from_str};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn words(list: &[&str]) -> Vec<Word> {
        list.iter().map(|w| Word::parse(w).unwrap()).collect()
    }

    fn session(dictionary: &[&str], secret: &str, openers: &[&str]) -> GuessSession {
        let store = CandidateStore::load(words(dictionary)).unwrap();
        GuessSession::with_openers(Word::parse(secret).unwrap(), store, words(openers))
    }

    fn play_out(session: &mut GuessSession) -> Vec<RoundReport> {
        let mut reports = Vec::new();
        session.solve(|r| reports.push(r.clone())).unwrap();
        reports
    }

    #[derive(Default)]
    struct RecordingInterface {
        inputs: Vec<String>,
        started: Vec<Word>,
        rounds: Vec<RoundReport>,
        solved: Vec<usize>,
        errors: Vec<SolverError>,
    }

    impl GameInterface for RecordingInterface {
        fn read_secret(&mut self) -> Option<String> {
            if self.inputs.is_empty() {
                None
            } else {
                Some(self.inputs.remove(0))
            }
        }
        fn display_session_start(&mut self, secret: &Word) {
            self.started.push(*secret);
        }
        fn display_round(&mut self, report: &RoundReport) {
            self.rounds.push(report.clone());
        }
        fn display_solved(&mut self, rounds: usize) {
            self.solved.push(rounds);
        }
        fn display_error(&mut self, error: &SolverError) {
            self.errors.push(error.clone());
        }
    }

    #[test]
    fn test_leading_consonant_eliminated_one_round_at_a_time() {
        let mut session = session(&["bream", "cream", "fream", "gream", "dream"], "dream", &[]);
        assert_eq!(session.state(), SessionState::Seeded);

        let reports = play_out(&mut session);
        assert_eq!(reports.len(), 5);
        for report in &reports[..4] {
            assert_eq!(report.verdicts[0], Feedback::Absent);
            assert!(report.verdicts[1..].iter().all(|&v| v == Feedback::Exact));
            assert!(!report.solved);
        }
        assert!(reports[4].solved);
        assert_eq!(reports[4].guess.to_string(), "dream");
        assert_eq!(session.state(), SessionState::Solved);
    }

    #[test]
    fn test_secret_first_in_dictionary_solves_in_one_round() {
        let mut session = session(&["dream", "bream", "cream", "fream", "gream"], "dream", &[]);
        let reports = play_out(&mut session);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].display_letters(), ['D', 'R', 'E', 'A', 'M']);
        assert_eq!(session.resolved_positions(), &[true; WORD_LENGTH]);
    }

    #[test]
    fn test_openers_used_in_order_until_one_is_invalid() {
        let mut session = session(&["gamer", "bream", "dream"], "dream", &OPENERS);
        let reports = play_out(&mut session);
        assert_eq!(reports[0].guess.to_string(), "chunk");
        assert_eq!(reports[1].guess.to_string(), "fjord");
        // fjord places d at position 0, so gymps is rejected and the scan
        // skips gamer and bream for the same reason.
        assert_eq!(reports[2].guess.to_string(), "dream");
        assert_eq!(reports.len(), 3);
    }

    #[test]
    fn test_all_openers_used_when_still_admissible() {
        let dictionary = ["fjord"];
        let mut session = session(&dictionary, "fjord", &["chunk", "gymps", "fjord"]);
        let reports = play_out(&mut session);
        let guesses: Vec<String> = reports.iter().map(|r| r.guess.to_string()).collect();
        assert_eq!(guesses, vec!["chunk", "gymps", "fjord"]);
    }

    #[test]
    fn test_round_display() {
        let mut session = session(&["sores", "dream"], "dream", &[]);
        let report = session.play_round().unwrap();
        assert_eq!(report.round, 1);
        assert_eq!(report.display_letters(), ['s', 'o', 'r', 'e', 's']);
        assert_eq!(report.markers(), [' ', ' ', '*', '*', ' ']);
        assert_eq!(session.round(), 2);
        assert_eq!(session.state(), SessionState::Guessing);
    }

    #[test]
    fn test_present_pins_the_secret_position() {
        let mut session = session(&["sores", "raven", "dream"], "dream", &[]);
        session.play_round().unwrap();
        // r is now pinned to position 1, so raven is blocked there
        assert!(session.store().is_blocked(1, 1));
        assert!(!session.store().is_blocked(1, 0));
        assert!(!session.store().is_viable(1));
        assert!(session.store().is_viable(2));
    }

    #[test]
    fn test_dictionary_exhausted_when_secret_missing() {
        let mut session = session(&["crane", "slate"], "dream", &[]);
        let report = session.play_round().unwrap();
        assert_eq!(report.guess.to_string(), "crane");
        assert_eq!(
            session.play_round(),
            Err(SolverError::DictionaryExhausted { rounds: 1 })
        );
    }

    #[test]
    fn test_play_after_solved_fails() {
        let mut session = session(&["dream"], "dream", &[]);
        assert!(session.play_round().unwrap().solved);
        assert_eq!(session.play_round(), Err(SolverError::AlreadySolved));
    }

    #[test]
    fn test_previous_guess_is_not_admissible() {
        let mut session = session(&["dream"], "dream", &[]);
        let word = Word::parse("dream").unwrap();
        assert!(session.is_admissible(&word));
        session.previous = Some(word);
        assert!(!session.is_admissible(&word));
    }

    #[test]
    fn test_soundness_and_termination_over_embedded_wordbank() {
        let dictionary = load_wordbank_from_str(EMBEDDED_WORDBANK);
        let bound = OPENERS.len() + dictionary.len();

        for &secret in &dictionary {
            let store = CandidateStore::load(dictionary.clone()).unwrap();
            let mut session = GuessSession::new(secret, store);
            let mut exact_seen = [false; WORD_LENGTH];

            loop {
                let before = session.store().clone();
                let report = session.play_round().unwrap();

                // a guess never uses a letter already proven wrong at its position
                assert!(before.admits(&report.guess), "{secret}: {}", report.guess);

                // the secret is never blocked
                assert!(session.store().admits(&secret));
                for index in 0..dictionary.len() {
                    if dictionary[index] == secret {
                        assert!(session.store().is_viable(index));
                    }
                }

                // exact positions stay exact
                for i in 0..WORD_LENGTH {
                    if exact_seen[i] {
                        assert_eq!(report.verdicts[i], Feedback::Exact);
                    }
                    exact_seen[i] |= report.verdicts[i] == Feedback::Exact;
                }

                assert!(report.round <= bound);
                if report.solved {
                    assert_eq!(report.guess, secret);
                    break;
                }
            }
        }
    }

    #[test]
    fn test_game_loop_plays_independent_games() {
        let dictionary = words(&["bream", "cream", "dream"]);
        let mut interface = RecordingInterface {
            inputs: vec!["dream".into(), "dream".into()],
            ..Default::default()
        };
        let options = GameOptions {
            games: 2,
            use_openers: false,
        };
        let mut rng = StdRng::seed_from_u64(1);
        let results = game_loop(&dictionary, &options, &mut rng, &mut interface);

        // the second game sees the same fresh dictionary, so it takes as long
        assert_eq!(results, vec![Ok(3), Ok(3)]);
        assert_eq!(interface.solved, vec![3, 3]);
        assert_eq!(interface.rounds.len(), 6);
        assert_eq!(interface.started, words(&["dream", "dream"]));
        let solved: Vec<bool> = interface.rounds.iter().map(|r| r.solved).collect();
        assert_eq!(solved, vec![false, false, true, false, false, true]);
        assert!(interface.errors.is_empty());
    }

    #[test]
    fn test_game_loop_reports_errors_and_continues() {
        let dictionary = words(&["crane", "slate"]);
        let mut interface = RecordingInterface {
            inputs: vec!["dreams".into(), "r".into()],
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let results = game_loop(&dictionary, &GameOptions::default(), &mut rng, &mut interface);

        assert_eq!(results.len(), 2);
        assert!(matches!(
            results[0],
            Err(SolverError::LengthMismatch { found: 6, .. })
        ));
        assert!(results[1].is_ok());
        assert_eq!(interface.errors.len(), 1);
        assert!(dictionary.contains(&interface.started[0]));
    }

    #[test]
    fn test_game_loop_stops_when_input_closes() {
        let dictionary = words(&["crane"]);
        let mut interface = RecordingInterface::default();
        let mut rng = StdRng::seed_from_u64(0);
        let results = game_loop(&dictionary, &GameOptions::default(), &mut rng, &mut interface);
        assert!(results.is_empty());
    }

    #[test]
    fn test_game_loop_empty_dictionary() {
        let mut interface = RecordingInterface {
            inputs: vec!["dream".into()],
            ..Default::default()
        };
        let mut rng = StdRng::seed_from_u64(0);
        let results = game_loop(&[], &GameOptions::default(), &mut rng, &mut interface);
        assert_eq!(results, vec![Err(SolverError::EmptyDictionary)]);
        assert!(interface.started.is_empty());
    }
}
