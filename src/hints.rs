//! Per-letter hints for the on-screen keyboard.

use std::collections::BTreeMap;

use crate::{Grade, Word};

/// The best grade seen so far for each guessed letter.
///
/// Hints only ever improve: a letter known to be [`Grade::Correct`]
/// somewhere is never shown as merely present or absent again, even if a
/// later guess puts it in the wrong place.
///
/// # Examples
///
/// ```rust
/// use wordle_core::{evaluate, Grade, KeyboardHints, Word};
///
/// let secret: Word = "hazel".parse()?;
/// let mut hints = KeyboardHints::new();
///
/// let raven: Word = "raven".parse()?;
/// hints.record(&raven, &evaluate(&secret, &raven));
/// let audio: Word = "audio".parse()?;
/// hints.record(&audio, &evaluate(&secret, &audio));
///
/// assert_eq!(hints.get('A'), Some(Grade::Correct));
/// assert_eq!(hints.get('R'), Some(Grade::Absent));
/// assert_eq!(hints.get('Z'), None);
/// #
/// # Ok::<_, wordle_core::PuzzleError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyboardHints {
    inner: BTreeMap<char, Grade>,
}

impl KeyboardHints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges the grades of one scored attempt.
    pub fn record(&mut self, word: &Word, grades: &[Grade]) {
        for (letter, &grade) in word.letters().zip(grades) {
            self.inner
                .entry(letter)
                .and_modify(|known| *known = known.best(grade))
                .or_insert(grade);
        }
    }

    /// Returns the best grade seen for `letter`, if it was ever guessed.
    pub fn get(&self, letter: char) -> Option<Grade> {
        self.inner.get(&letter.to_ascii_uppercase()).copied()
    }

    /// Iterates over guessed letters in alphabetical order.
    pub fn iter(&self) -> impl Iterator<Item = (char, Grade)> + '_ {
        self.inner.iter().map(|(&c, &g)| (c, g))
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
