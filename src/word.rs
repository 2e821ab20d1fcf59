//! Words and the dictionary they are checked against.

use std::{
    fmt::{Debug, Display},
    ops::Deref,
    str::FromStr,
};

use itertools::Itertools;
use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{PuzzleError, WORD_LENGTH};

/// A five letter word.
///
/// Construction normalizes to uppercase and rejects anything that is not
/// exactly five ASCII letters, so every instance is a well-formed guess.
/// Whether the word is actually in the dictionary is a separate question
/// answered by [`Dictionary::contains()`].
///
/// # Examples
///
/// ```rust
/// # use std::ops::Deref;
/// use wordle_core::Word;
///
/// let hazel: Word = "hazel".parse()?;
/// assert_eq!(hazel.deref(), "HAZEL");
///
/// assert!("haze".parse::<Word>().is_err());
/// assert!("haz3l".parse::<Word>().is_err());
/// #
/// # Ok::<_, wordle_core::PuzzleError>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", try_from = "String", into = "String")
)]
pub struct Word {
    letters: [u8; WORD_LENGTH],
}

impl Word {
    /// Builds a word from five letters, normalizing them to uppercase.
    pub fn from_letters(letters: &[char]) -> Result<Self, PuzzleError> {
        let invalid = || PuzzleError::InvalidWord(letters.iter().collect());

        if letters.len() != WORD_LENGTH {
            return Err(invalid());
        }

        let mut res = [0_u8; WORD_LENGTH];
        for (slot, &c) in res.iter_mut().zip(letters) {
            if !c.is_ascii_alphabetic() {
                return Err(invalid());
            }
            *slot = c.to_ascii_uppercase() as u8;
        }

        Ok(Word { letters: res })
    }

    /// Returns the letter at `position`, or `None` past the end.
    pub fn letter(&self, position: usize) -> Option<char> {
        self.letters.get(position).map(|&b| b as char)
    }

    /// Iterates over the letters in order.
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.letters.iter().map(|&b| b as char)
    }

    /// Counts how many times `letter` occurs in this word.
    pub fn count(&self, letter: char) -> usize {
        self.letters().filter(|&c| c == letter).count()
    }
}

impl FromStr for Word {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let letters: Vec<char> = s.trim().chars().collect();
        Word::from_letters(&letters).map_err(|_| PuzzleError::InvalidWord(s.to_string()))
    }
}

impl TryFrom<String> for Word {
    type Error = PuzzleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Word> for String {
    fn from(word: Word) -> Self {
        word.deref().to_string()
    }
}

impl Deref for Word {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        // Only ever holds ASCII uppercase letters.
        std::str::from_utf8(&self.letters).unwrap_or_default()
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.deref())
    }
}

impl Debug for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Word({})", self.deref())
    }
}

/// The set of words a guess may be.
///
/// The dictionary is read-only once built and is meant to be shared, for
/// instance behind an [`Arc`](std::sync::Arc).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dictionary {
    words: Vec<Word>,
}

impl Dictionary {
    /// Builds a dictionary from raw entries.
    ///
    /// Entries that are not five ASCII letters are skipped. Duplicates and
    /// case differences collapse into one word.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut skipped = 0_usize;
        let words: Vec<Word> = entries
            .into_iter()
            .filter_map(|entry| match entry.as_ref().parse::<Word>() {
                Ok(word) => Some(word),
                Err(_) => {
                    skipped += 1;
                    None
                }
            })
            .sorted_unstable()
            .dedup()
            .collect();

        if skipped > 0 {
            debug!("skipped {} dictionary entries that are not five letters", skipped);
        }

        Dictionary { words }
    }

    /// Returns true if `word` may be guessed.
    pub fn contains(&self, word: &Word) -> bool {
        self.words.binary_search(word).is_ok()
    }

    /// Returns the word at `index` in sorted order.
    pub fn get(&self, index: usize) -> Option<Word> {
        self.words.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Word> {
        self.words.iter()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Dictionary {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Dictionary::from_entries(iter)
    }
}
