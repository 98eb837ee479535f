//! `word_dictionary` — the anagram dictionary behind the letters and conundrum rounds.
//!
//! The word list is a raw DEFLATE stream of lowercase lines. Each line groups
//! the words sharing one letter multiset, e.g. `acts cats scat.`, and is stored
//! under its sorted-letters key (`acst`). Lines that are a single nine-letter
//! word have exactly one solution and go to a separate table used for the
//! conundrum round; everything else goes to the general table.
//!
//! Loading happens on a background thread started by [`WordDictionary::new`].
//! Every query waits for that load to finish and then reads the tables, which
//! never change again.
//!
//! A word list that cannot be found is not an error: the dictionary is simply
//! empty.
//!
//! # Example
//!
//! ```
//! use std::io::Write;
//! use countdown::word_dictionary::{DictionarySource, WordDictionary};
//!
//! let mut encoder = flate2::write::DeflateEncoder::new(Vec::new(), flate2::Compression::default());
//! encoder.write_all(b"acts cats.computers.")?;
//! let dictionary = WordDictionary::new(DictionarySource::Bytes(encoder.finish()?));
//!
//! let letters: Vec<char> = "rtsucmope".chars().collect();
//! assert_eq!(dictionary.solve_single_solution(&letters)?, Some("COMPUTERS".to_string()));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use flate2::read::DeflateDecoder;
use itertools::Itertools;
use log::{debug, error, info, warn};
use rand::Rng;

use crate::errors::CountdownError;
use crate::letters::{self, decode, decode_string, sorted_key, LetterCase, WORD_SEPARATOR};
use crate::line_reader::LineReader;

/// Shortest word the letters round accepts.
pub const MIN_LETTERS: usize = 4;
/// Letters dealt per round, and the length of a conundrum.
pub const MAX_LETTERS: usize = 9;

/// Environment variable overriding the word-list path.
pub const WORDLIST_ENV: &str = "COUNTDOWN_WORDLIST";

const DEFAULT_WORDLIST: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/wordlist.dat");

/// Where the compressed word list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DictionarySource {
    /// A file on disk. A missing file yields an empty dictionary.
    Path(PathBuf),
    /// Compressed word-list bytes already in memory.
    Bytes(Vec<u8>),
}

impl DictionarySource {
    /// `$COUNTDOWN_WORDLIST` if set, otherwise `data/wordlist.dat` in the crate directory.
    #[must_use]
    pub fn from_env() -> Self {
        match std::env::var_os(WORDLIST_ENV) {
            Some(path) => DictionarySource::Path(PathBuf::from(path)),
            None => DictionarySource::Path(PathBuf::from(DEFAULT_WORDLIST)),
        }
    }

    /// Open the raw (still compressed) stream; `Ok(None)` if the file does not exist.
    fn open(self) -> io::Result<Option<Box<dyn Read + Send>>> {
        match self {
            DictionarySource::Path(path) => match File::open(&path) {
                Ok(file) => {
                    debug!("Reading word list from {}", path.display());
                    Ok(Some(Box::new(file)))
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    info!("No word list at {}; dictionary will be empty", path.display());
                    Ok(None)
                }
                Err(e) => Err(io::Error::new(
                    e.kind(),
                    format!("failed to open word list '{}': {}", path.display(), e),
                )),
            },
            DictionarySource::Bytes(bytes) => Ok(Some(Box::new(Cursor::new(bytes)))),
        }
    }
}

impl Default for DictionarySource {
    fn default() -> Self {
        Self::from_env()
    }
}

/// A word found by [`WordDictionary::solve`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordResult {
    pub word: String,
}

impl WordResult {
    fn from_bytes(bytes: &[u8]) -> Self {
        WordResult { word: decode_string(bytes, LetterCase::Lower) }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.word.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.word.is_empty()
    }
}

impl fmt::Display for WordResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.word)
    }
}

/// The two lookup tables, keyed by sorted letters. Values are raw lines.
#[derive(Debug, Default)]
struct WordTables {
    general: HashMap<String, Box<[u8]>>,
    single_solution: HashMap<String, Box<[u8]>>,
}

impl WordTables {
    fn load(source: DictionarySource) -> WordTables {
        let start = Instant::now();

        let raw = match source.open() {
            Ok(Some(raw)) => raw,
            Ok(None) => return WordTables::default(),
            Err(e) => {
                warn!("{e}; dictionary will be empty");
                return WordTables::default();
            }
        };

        let tables = WordTables::read(DeflateDecoder::new(raw));
        info!(
            "Loaded {} word lines and {} conundrums in {:.3}s",
            tables.general.len(),
            tables.single_solution.len(),
            start.elapsed().as_secs_f64()
        );
        tables
    }

    /// Build the tables from an already decompressed stream.
    fn read(decompressed: impl Read) -> WordTables {
        let mut tables = WordTables::default();
        for line in LineReader::new(decompressed) {
            match line {
                Ok(line) => tables.insert_line(line),
                Err(e) => {
                    warn!(
                        "Stopped reading word list after {} entries: {e}",
                        tables.general.len() + tables.single_solution.len()
                    );
                    break;
                }
            }
        }
        tables
    }

    fn insert_line(&mut self, line: Vec<u8>) {
        if line.is_empty() {
            return;
        }

        let key_len = key_length(&line);
        let key = sorted_key(decode(&line[..key_len], LetterCase::Lower));

        let table = if key_len == MAX_LETTERS && key_len == line.len() {
            &mut self.single_solution
        } else {
            &mut self.general
        };

        match table.entry(key) {
            Entry::Occupied(mut slot) => {
                debug!("Duplicate word-list key '{}'; keeping the later line", slot.key());
                slot.insert(line.into_boxed_slice());
            }
            Entry::Vacant(slot) => {
                slot.insert(line.into_boxed_slice());
            }
        }
    }
}

/// Byte length of the first word on a line.
///
/// Two words of at least [`MIN_LETTERS`] plus a separator never fit in
/// `2 * MIN_LETTERS` bytes, so shorter lines hold one word and need no scan.
fn key_length(line: &[u8]) -> usize {
    if line.len() > MIN_LETTERS * 2 {
        line[MIN_LETTERS..]
            .iter()
            .position(|&b| b == WORD_SEPARATOR)
            .map_or(line.len(), |p| p + MIN_LETTERS)
    } else {
        line.len()
    }
}

fn push_words(line: Option<&[u8]>, results: &mut Vec<WordResult>) {
    if let Some(line) = line {
        results.extend(letters::words(line).map(WordResult::from_bytes));
    }
}

fn check_letters(letters: &[char]) -> Result<(), CountdownError> {
    if letters.len() == MAX_LETTERS {
        Ok(())
    } else {
        Err(CountdownError::InvalidLetterCount { found: letters.len() })
    }
}

/// Anagram dictionary, loaded in the background.
///
/// Construction returns at once. Queries block until the load has finished;
/// after that the dictionary is read-only and can be shared across threads
/// (e.g. behind an `Arc`).
#[derive(Debug)]
pub struct WordDictionary {
    tables: OnceLock<WordTables>,
    loader: Mutex<Option<JoinHandle<WordTables>>>,
}

impl WordDictionary {
    /// Start loading `source` on a background thread.
    #[must_use]
    pub fn new(source: DictionarySource) -> Self {
        let spawned = thread::Builder::new()
            .name("word-list-loader".to_string())
            .spawn(move || WordTables::load(source));

        match spawned {
            Ok(handle) => WordDictionary {
                tables: OnceLock::new(),
                loader: Mutex::new(Some(handle)),
            },
            Err(e) => {
                error!("Could not start word-list loader thread: {e}; dictionary will be empty");
                WordDictionary {
                    tables: OnceLock::from(WordTables::default()),
                    loader: Mutex::new(None),
                }
            }
        }
    }

    /// Load from the configured location (see [`DictionarySource::from_env`]).
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(DictionarySource::from_env())
    }

    /// The loaded tables, waiting for the loader thread the first time.
    ///
    /// The first caller joins the loader and publishes its result; concurrent
    /// callers block inside the same `OnceLock` initialisation.
    fn tables(&self) -> &WordTables {
        self.tables.get_or_init(|| {
            let handle = self
                .loader
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
            match handle.map(JoinHandle::join) {
                Some(Ok(tables)) => tables,
                Some(Err(_)) => {
                    error!("Word-list loader panicked; dictionary will be empty");
                    WordTables::default()
                }
                None => WordTables::default(),
            }
        })
    }

    /// Block until the word list has been loaded.
    pub fn wait_until_loaded(&self) {
        self.tables();
    }

    /// Whether queries would run without waiting for the loader.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        if self.tables.get().is_some() {
            return true;
        }
        self.loader
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(JoinHandle::is_finished)
    }

    /// Every dictionary word that can be made from `letters`, longest first.
    ///
    /// Each subset of 9 down to [`MIN_LETTERS`] positions is looked up. Subsets
    /// picking different copies of a repeated letter produce the same words
    /// again; duplicates are kept.
    ///
    /// # Errors
    ///
    /// [`CountdownError::InvalidLetterCount`] unless exactly nine letters are given.
    pub fn solve(&self, letters: &[char]) -> Result<Vec<WordResult>, CountdownError> {
        check_letters(letters)?;
        let tables = self.tables();
        let mut results = Vec::new();

        for k in (MIN_LETTERS..=MAX_LETTERS).rev() {
            for selection in letters.iter().copied().combinations(k) {
                let key = sorted_key(selection);
                push_words(tables.general.get(&key).map(|line| &line[..]), &mut results);
                if k == MAX_LETTERS {
                    push_words(tables.single_solution.get(&key).map(|line| &line[..]), &mut results);
                }
            }
        }

        debug!("{} words for '{}'", results.len(), letters.iter().collect::<String>());
        Ok(results)
    }

    /// The single word using all nine `letters`, in uppercase, if it is a conundrum.
    ///
    /// Letters may be given in either case.
    ///
    /// # Errors
    ///
    /// [`CountdownError::InvalidLetterCount`] unless exactly nine letters are given.
    pub fn solve_single_solution(&self, letters: &[char]) -> Result<Option<String>, CountdownError> {
        check_letters(letters)?;
        let key = sorted_key(letters.iter().copied());
        Ok(self
            .tables()
            .single_solution
            .get(&key)
            .map(|line| decode_string(line, LetterCase::Upper)))
    }

    /// A conundrum picked uniformly at random, in uppercase; `None` if there are none.
    pub fn random_single_solution<R: Rng>(&self, rng: &mut R) -> Option<Vec<char>> {
        let single_solution = &self.tables().single_solution;
        if single_solution.is_empty() {
            return None;
        }
        let index = rng.random_range(0..single_solution.len());
        single_solution
            .values()
            .nth(index)
            .map(|line| decode(line, LetterCase::Upper))
    }

    /// Whether the conundrum round can be played.
    #[must_use]
    pub fn has_single_solution_words(&self) -> bool {
        !self.tables().single_solution.is_empty()
    }

    /// Number of lines in the general table.
    #[must_use]
    pub fn general_line_count(&self) -> usize {
        self.tables().general.len()
    }

    /// Number of conundrum words.
    #[must_use]
    pub fn single_solution_count(&self) -> usize {
        self.tables().single_solution.len()
    }
}
