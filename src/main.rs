use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;
use std::process::ExitCode;
use wordle_guesser::cli::{CliInterface, display_wordbank_loaded, parse_cli};
use wordle_guesser::logging::init_logging;
use wordle_guesser::wordbank::{
    EMBEDDED_WORDBANK, default_wordbank_path, load_wordbank_from_file, load_wordbank_from_str,
};
use wordle_guesser::{Word, game_loop, info_log};

fn load_wordbank(path: Option<&str>) -> io::Result<(Vec<Word>, String)> {
    if let Some(path) = path {
        return Ok((load_wordbank_from_file(path)?, format!("file {path}")));
    }
    if let Some(path) = default_wordbank_path()
        && path.is_file()
    {
        let words = load_wordbank_from_file(&path)?;
        return Ok((words, format!("file {}", path.display())));
    }
    Ok((
        load_wordbank_from_str(EMBEDDED_WORDBANK),
        "the built-in word bank".to_string(),
    ))
}

fn main() -> ExitCode {
    let cli = parse_cli();
    init_logging(cli.verbose);

    let (wordbank, source) = match load_wordbank(cli.wordbank_path.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Failed to load word bank: {e}");
            return ExitCode::FAILURE;
        }
    };
    display_wordbank_loaded(&source, wordbank.len());

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    info_log!("Playing {} games", cli.games);

    let stdin = io::stdin();
    let mut interface = CliInterface::new(stdin.lock());
    let results = game_loop(&wordbank, &cli.game_options(), &mut rng, &mut interface);

    println!("Done");
    if results.iter().any(Result::is_err) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
