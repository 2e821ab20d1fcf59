//! Scoring a guess against the secret word.

use std::fmt::Display;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Word, WORD_LENGTH};

/// A "grade" that indicates the correctness of a letter in a guess.
///
/// The ordering puts the most informative grade first, so the best of
/// several grades is their minimum.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", rename_all = "lowercase")
)]
pub enum Grade {
    /// The letter is in the secret word at this position.
    Correct,

    /// The letter is in the secret word, but somewhere else.
    Present,

    /// The letter is not in the secret word, or every copy of it is
    /// already accounted for by other letters of the guess.
    Absent,
}

impl Grade {
    /// Returns the more informative of two grades.
    pub fn best(self, other: Grade) -> Grade {
        self.min(other)
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Grade::Correct => "correct",
            Grade::Present => "present",
            Grade::Absent => "absent",
        };
        write!(f, "{}", s)
    }
}

/// Scores `guess` against `secret`.
///
/// Exact matches are graded first and consume their letter of the secret.
/// The remaining letters then claim unconsumed copies from left to right,
/// so the function never returns more [`Grade::Correct`] and
/// [`Grade::Present`] grades for a letter than the secret word holds. For
/// instance, guessing `LABEL` against `HAZEL` grades the final `L` as
/// correct and the first as absent.
///
/// # Examples
///
/// ```rust
/// use wordle_core::{evaluate, Grade::*, Word};
///
/// let secret: Word = "hazel".parse()?;
/// assert_eq!(
///     evaluate(&secret, &"raven".parse()?),
///     [Absent, Correct, Absent, Correct, Absent]
/// );
/// assert_eq!(
///     evaluate(&secret, &"audio".parse()?),
///     [Present, Absent, Absent, Absent, Absent]
/// );
/// #
/// # Ok::<_, wordle_core::PuzzleError>(())
/// ```
pub fn evaluate(secret: &Word, guess: &Word) -> [Grade; WORD_LENGTH] {
    let mut res = [Grade::Absent; WORD_LENGTH];
    let mut consumed = [false; WORD_LENGTH];

    // exact matches get priority over everything else
    for (i, (g, s)) in guess.letters().zip(secret.letters()).enumerate() {
        if g == s {
            res[i] = Grade::Correct;
            consumed[i] = true;
        }
    }

    for (i, g) in guess.letters().enumerate() {
        if res[i] == Grade::Correct {
            continue;
        }

        let unused = secret
            .letters()
            .enumerate()
            .position(|(j, s)| s == g && !consumed[j]);

        if let Some(j) = unused {
            consumed[j] = true;
            res[i] = Grade::Present;
        }
    }

    res
}

/// Returns true if every grade is [`Grade::Correct`].
pub fn is_solved(grades: &[Grade]) -> bool {
    grades.iter().all(|&g| g == Grade::Correct)
}
