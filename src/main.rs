use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;

use countdown::errors::CountdownError;
use countdown::shapes::ShapeTable;
use countdown::word_dictionary::{DictionarySource, WordDictionary};

/// Countdown puzzle engine: equation shapes, word search and conundrums
#[derive(Parser, Debug)]
#[command(author, about, long_about = None, version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"))]
struct Cli {
    /// Path to the compressed word list (defaults to $COUNTDOWN_WORDLIST or data/wordlist.dat)
    #[arg(short, long, global = true)]
    wordlist: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the postfix equation shapes for a tile count (2-6)
    Shapes { tiles: usize },

    /// List every word that can be made from nine letters
    Words { letters: String },

    /// Solve a conundrum: the single word using all nine letters
    Conundrum { letters: String },

    /// Deal a random conundrum
    RandomConundrum {
        /// Seed for a reproducible pick
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

/// Entry point of the countdown CLI.
///
/// Delegates to [`try_main`] and prints any error with its code and help text.
fn main() -> ExitCode {
    countdown::log::init_from_env();

    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(countdown_err) = e.downcast_ref::<CountdownError>() {
                eprintln!("Error: {}", countdown_err.display_detailed());
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let source = match cli.wordlist {
        Some(path) => DictionarySource::Path(path),
        None => DictionarySource::from_env(),
    };

    match cli.command {
        Command::Shapes { tiles } => {
            for template in ShapeTable::global().lookup(tiles)? {
                println!("{template}");
            }
        }
        Command::Words { letters } => {
            let dictionary = WordDictionary::new(source);
            let letters: Vec<char> = letters.to_lowercase().chars().collect();

            let t_solve = Instant::now();
            let results = dictionary.solve(&letters)?;
            let solve_secs = t_solve.elapsed().as_secs_f64();

            for result in &results {
                println!("{result}");
            }
            eprintln!(
                "{} words from {} dictionary lines in {:.3}s",
                results.len(),
                dictionary.general_line_count() + dictionary.single_solution_count(),
                solve_secs
            );
        }
        Command::Conundrum { letters } => {
            let dictionary = WordDictionary::new(source);
            let letters: Vec<char> = letters.chars().collect();
            match dictionary.solve_single_solution(&letters)? {
                Some(word) => println!("{word}"),
                None => eprintln!("No conundrum uses exactly those letters"),
            }
        }
        Command::RandomConundrum { seed } => {
            let dictionary = WordDictionary::new(source);
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            match dictionary.random_single_solution(&mut rng) {
                Some(word) => println!("{}", word.into_iter().collect::<String>()),
                None => eprintln!("The word list has no conundrums"),
            }
        }
    }

    Ok(())
}
