//! Where words come from.
//!
//! A [`WordSource`] supplies the dictionary of playable words and chooses
//! the secret word of each game. How the words are fetched and how the
//! secret is chosen is up to the implementation; the session only relies on
//! the secret being drawn from the dictionary.

use std::path::{Path, PathBuf};

use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};
#[cfg(feature = "serde")]
use serde::Deserialize;

use crate::{Dictionary, FetchError, Word};

/// Supplies the dictionary and the secret word.
pub trait WordSource {
    /// Produces the dictionary of valid five letter words.
    fn load_dictionary(&mut self) -> Result<Dictionary, FetchError>;

    /// Chooses the secret word for a new game from `dictionary`.
    fn pick_secret(&mut self, dictionary: &Dictionary) -> Result<Word, FetchError>;
}

/// How a source chooses secret words.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pick {
    /// A random word each game.
    Random,
    /// A reproducible sequence of words from the given seed.
    Seeded(u64),
    /// The same word all day: the day number indexes into the dictionary.
    Daily(u64),
    /// Always this word. It must be in the dictionary.
    Fixed(Word),
}

impl Default for Pick {
    fn default() -> Self {
        Pick::Random
    }
}

#[derive(Debug)]
struct Picker {
    pick: Pick,
    rng: StdRng,
}

impl Picker {
    fn new(pick: Pick) -> Self {
        let rng = match pick {
            Pick::Seeded(seed) => StdRng::seed_from_u64(seed),
            _ => StdRng::from_entropy(),
        };
        Picker { pick, rng }
    }

    fn pick(&mut self, dictionary: &Dictionary) -> Result<Word, FetchError> {
        if dictionary.is_empty() {
            return Err(FetchError::Empty);
        }

        let index = match self.pick {
            Pick::Random | Pick::Seeded(_) => self.rng.gen_range(0..dictionary.len()),
            Pick::Daily(day) => (day % dictionary.len() as u64) as usize,
            Pick::Fixed(word) => {
                return if dictionary.contains(&word) {
                    Ok(word)
                } else {
                    Err(FetchError::NoSecret(word))
                };
            }
        };

        dictionary.get(index).ok_or(FetchError::Empty)
    }
}

/// A source backed by a list of words held in memory.
///
/// # Examples
///
/// ```rust
/// use wordle_core::{Pick, StaticSource, WordSource};
///
/// let mut source = StaticSource::new(["hazel", "raven", "audio"])
///     .pick(Pick::Fixed("raven".parse()?));
///
/// let dictionary = source.load_dictionary()?;
/// assert_eq!(dictionary.len(), 3);
/// assert_eq!(&*source.pick_secret(&dictionary)?, "RAVEN");
/// #
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct StaticSource {
    words: Vec<String>,
    picker: Picker,
}

impl StaticSource {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        StaticSource {
            words: words.into_iter().map(Into::into).collect(),
            picker: Picker::new(Pick::default()),
        }
    }

    /// Sets how secret words are chosen.
    pub fn pick(self, pick: Pick) -> Self {
        StaticSource {
            picker: Picker::new(pick),
            ..self
        }
    }
}

impl WordSource for StaticSource {
    fn load_dictionary(&mut self) -> Result<Dictionary, FetchError> {
        let dictionary = Dictionary::from_entries(&self.words);
        if dictionary.is_empty() {
            return Err(FetchError::Empty);
        }
        Ok(dictionary)
    }

    fn pick_secret(&mut self, dictionary: &Dictionary) -> Result<Word, FetchError> {
        self.picker.pick(dictionary)
    }
}

/// A source that reads its word list from a file each time it loads.
///
/// The file holds either one word per line or, with the `serde` feature,
/// JSON: a plain array of words, or a word-finder style response of the
/// shape `{"word_pages": [{"word_list": [{"word": "..."}]}]}`.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    picker: Picker,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        FileSource {
            path: path.as_ref().to_path_buf(),
            picker: Picker::new(Pick::default()),
        }
    }

    /// Sets how secret words are chosen.
    pub fn pick(self, pick: Pick) -> Self {
        FileSource {
            picker: Picker::new(pick),
            ..self
        }
    }
}

impl WordSource for FileSource {
    fn load_dictionary(&mut self) -> Result<Dictionary, FetchError> {
        debug!("loading word list from {}", self.path.display());
        let contents = std::fs::read_to_string(&self.path)?;
        let dictionary = parse_word_list(&contents)?;
        if dictionary.is_empty() {
            return Err(FetchError::Empty);
        }
        info!(
            "loaded {} words from {}",
            dictionary.len(),
            self.path.display()
        );
        Ok(dictionary)
    }

    fn pick_secret(&mut self, dictionary: &Dictionary) -> Result<Word, FetchError> {
        self.picker.pick(dictionary)
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(crate = "serde_crate", untagged)]
enum WordListJson {
    Plain(Vec<String>),
    Pages { word_pages: Vec<WordPage> },
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(crate = "serde_crate")]
struct WordPage {
    word_list: Vec<WordEntry>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(crate = "serde_crate")]
struct WordEntry {
    word: String,
}

/// Parses the contents of a word list file, see [`FileSource`].
pub fn parse_word_list(contents: &str) -> Result<Dictionary, FetchError> {
    let trimmed = contents.trim_start();
    if let Some(res) = parse_json(trimmed) {
        return res;
    }
    Ok(trimmed.lines().map(str::trim).collect())
}

#[cfg(feature = "serde")]
fn parse_json(contents: &str) -> Option<Result<Dictionary, FetchError>> {
    if !contents.starts_with('[') && !contents.starts_with('{') {
        return None;
    }

    let parsed = serde_json::from_str::<WordListJson>(contents).map(|json| match json {
        WordListJson::Plain(words) => Dictionary::from_entries(words),
        WordListJson::Pages { word_pages } => word_pages
            .into_iter()
            .flat_map(|page| page.word_list)
            .map(|entry| entry.word)
            .collect(),
    });
    Some(parsed.map_err(Into::into))
}

#[cfg(not(feature = "serde"))]
fn parse_json(_contents: &str) -> Option<Result<Dictionary, FetchError>> {
    None
}
