use crate::WORD_LENGTH;
use crate::error::SolverError;
use crate::game_state::{GameInterface, GameOptions, RoundReport};
use crate::word::Word;
use clap::Parser;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Guesses a secret Wordle word from a dictionary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a whitespace-delimited dictionary file
    #[arg(short = 'i', long = "input")]
    pub wordbank_path: Option<String>,

    /// Number of games to play
    #[arg(short = 'g', long = "games", default_value_t = 3)]
    pub games: usize,

    /// Seed for picking random secrets
    #[arg(long)]
    pub seed: Option<u64>,

    /// Go straight to the dictionary scan instead of the fixed openers
    #[arg(long = "no-openers")]
    pub no_openers: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    #[must_use]
    pub fn game_options(&self) -> GameOptions {
        GameOptions {
            games: self.games,
            use_openers: !self.no_openers,
        }
    }
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

const RULE: &str = "-----------------------------------------------------------";
const INDENT: &str = "       ";

fn spaced(chars: &[char; WORD_LENGTH]) -> String {
    chars.iter().map(|c| format!("{c} ")).collect()
}

/// `    1. s o R E s `
#[must_use]
pub fn format_guess_row(report: &RoundReport) -> String {
    format!("{:5}. {}", report.round, spaced(&report.display_letters()))
}

/// `*` beneath every Present letter of [`format_guess_row`].
#[must_use]
pub fn format_marker_row(report: &RoundReport) -> String {
    format!("{INDENT}{}", spaced(&report.markers()))
}

#[must_use]
pub fn format_secret_header(secret: &Word) -> String {
    let letters: [char; WORD_LENGTH] = std::array::from_fn(|i| secret.letter(i) as char);
    format!("{INDENT}{}", spaced(&letters))
}

pub fn display_wordbank_loaded(source: &str, count: usize) {
    println!("Using {source} with {count} words.");
}

/// Reads whitespace-separated secrets from `reader`, one per game, and
/// prints to stdout. Blank lines are skipped.
pub struct CliInterface<R: BufRead> {
    reader: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: VecDeque::new(),
        }
    }

    fn next_token(&mut self) -> Option<String> {
        while self.pending.is_empty() {
            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => self
                    .pending
                    .extend(line.split_whitespace().map(str::to_owned)),
                Err(e) => {
                    log::error!("Failed to read secret: {e}");
                    return None;
                }
            }
        }
        self.pending.pop_front()
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn read_secret(&mut self) -> Option<String> {
        println!("{RULE}");
        println!();
        print!("Enter a secret word or just r to choose one at random: ");
        let _ = io::stdout().flush();
        self.next_token()
    }

    fn display_session_start(&mut self, secret: &Word) {
        println!("Trying to find secret word:");
        println!("{}", format_secret_header(secret));
        println!();
    }

    fn display_round(&mut self, report: &RoundReport) {
        println!("{}", format_guess_row(report));
        println!("{}", format_marker_row(report));
    }

    fn display_solved(&mut self, rounds: usize) {
        println!();
        println!("Got it! ({rounds} guesses)");
    }

    fn display_error(&mut self, error: &SolverError) {
        println!("Could not play this game: {error}");
    }
}
