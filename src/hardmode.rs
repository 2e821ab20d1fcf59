//! Hard mode rules.
//!
//! On hard mode every new guess has to use what earlier attempts revealed:
//! letters graded [`Grade::Correct`] must stay in place, and letters graded
//! [`Grade::Present`] must appear somewhere.

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::{Grade, Word};

/// The single rule a hard mode guess broke.
///
/// The `Display` text is the message shown to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HardModeViolation {
    /// A letter known to be correct was moved or replaced. `position` is
    /// zero-indexed.
    #[error("{} letter must be {letter}", ordinal(.position + 1))]
    PositionMismatch { position: usize, letter: char },

    /// A letter known to be in the word is missing from the guess.
    #[error("Guess must contain {letter}")]
    MissingLetter { letter: char },
}

fn ordinal(n: usize) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

/// Checks `guess` against what earlier attempts revealed.
///
/// Correct letters are checked first, in position order, then present
/// letters. The first broken rule is the one reported.
pub fn validate(
    guess: &Word,
    correct: &BTreeMap<usize, char>,
    present: &BTreeSet<char>,
) -> Result<(), HardModeViolation> {
    for (&position, &letter) in correct {
        if guess.letter(position) != Some(letter) {
            return Err(HardModeViolation::PositionMismatch { position, letter });
        }
    }

    for &letter in present {
        if guess.count(letter) == 0 {
            return Err(HardModeViolation::MissingLetter { letter });
        }
    }

    Ok(())
}

/// Everything earlier attempts revealed that a hard mode guess must honor.
///
/// Knowledge only accumulates: once a letter is known to be correct or
/// present it stays that way for the rest of the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Constraints {
    correct: BTreeMap<usize, char>,
    present: BTreeSet<char>,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds the grades of every scored attempt into a set of constraints.
    pub fn from_attempts<'a, I>(attempts: I) -> Self
    where
        I: IntoIterator<Item = (&'a Word, &'a [Grade])>,
    {
        let mut res = Self::new();
        for (word, grades) in attempts {
            res.record(word, grades);
        }
        res
    }

    /// Learns from one scored attempt.
    pub fn record(&mut self, word: &Word, grades: &[Grade]) {
        for (i, (letter, grade)) in word.letters().zip(grades).enumerate() {
            match grade {
                Grade::Correct => {
                    self.correct.insert(i, letter);
                }
                Grade::Present => {
                    self.present.insert(letter);
                }
                Grade::Absent => {}
            }
        }
    }

    /// Checks `guess` against these constraints, see [`validate()`].
    pub fn check(&self, guess: &Word) -> Result<(), HardModeViolation> {
        validate(guess, &self.correct, &self.present)
    }

    /// Known correct letters, keyed by zero-indexed position.
    pub fn correct(&self) -> &BTreeMap<usize, char> {
        &self.correct
    }

    /// Letters known to be somewhere in the word.
    pub fn present(&self) -> &BTreeSet<char> {
        &self.present
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::evaluate;

    fn w(s: &str) -> Word {
        s.parse().unwrap()
    }

    fn after(secret: &str, guesses: &[&str]) -> Constraints {
        let secret = w(secret);
        let mut constraints = Constraints::new();
        for guess in guesses {
            let guess = w(guess);
            constraints.record(&guess, &evaluate(&secret, &guess));
        }
        constraints
    }

    macro_rules! hardmode_test {
        ($fn_name:ident[$answer:expr, after $prior:expr => $( [$guess:expr, $expected:expr] );*]) => {
            #[test]
            fn $fn_name() {
                let constraints = after($answer, &$prior);
                $(
                    assert_eq!(constraints.check(&w($guess)), $expected, "guess {}", $guess);
                )*
            }
        };
    }

    use HardModeViolation::*;

    hardmode_test! { present_letter_required["hazel", after ["audio"] =>
        ["bring", Err(MissingLetter { letter: 'A' })];
        ["pasta", Ok(())]]
    }

    hardmode_test! { correct_checked_before_present["hazel", after ["audio", "raven"] =>
        ["quilt", Err(PositionMismatch { position: 1, letter: 'A' })];
        ["pacts", Err(PositionMismatch { position: 3, letter: 'E' })];
        ["hazel", Ok(())]]
    }

    // Taken from the hardmode behavior of Wordle 218.
    hardmode_test! { wordle_crimp_props["crimp", after ["props"] =>
        ["pinup", Err(PositionMismatch { position: 1, letter: 'R' })];
        ["primp", Ok(())]]
    }

    hardmode_test! { wordle_crimp_lints_limit["crimp", after ["lints", "limit"] =>
        ["lipid", Err(MissingLetter { letter: 'M' })];
        ["minis", Ok(())]]
    }

    hardmode_test! { knowledge_is_cumulative["right", after ["allay", "tough", "might"] =>
        ["sight", Ok(())];
        ["tight", Ok(())];
        ["spits", Err(PositionMismatch { position: 1, letter: 'I' })]]
    }

    #[test]
    fn from_attempts_matches_recording_one_by_one() {
        let secret = w("hazel");
        let scored: Vec<(Word, [Grade; 5])> = ["audio", "raven"]
            .iter()
            .map(|g| {
                let guess = w(g);
                (guess, evaluate(&secret, &guess))
            })
            .collect();

        let folded = Constraints::from_attempts(scored.iter().map(|(g, r)| (g, &r[..])));
        assert_eq!(folded, after("hazel", &["audio", "raven"]));
        assert_eq!(folded.correct().get(&1), Some(&'A'));
        assert_eq!(folded.correct().get(&3), Some(&'E'));
        assert!(folded.present().contains(&'A'));
        assert_eq!(
            folded.check(&w("quilt")),
            Err(PositionMismatch { position: 1, letter: 'A' })
        );
        assert_eq!(Constraints::from_attempts(std::iter::empty()), Constraints::new());
    }

    #[test]
    fn violation_messages() {
        assert_eq!(
            PositionMismatch { position: 1, letter: 'A' }.to_string(),
            "2nd letter must be A"
        );
        assert_eq!(
            PositionMismatch { position: 4, letter: 'L' }.to_string(),
            "5th letter must be L"
        );
        assert_eq!(MissingLetter { letter: 'A' }.to_string(), "Guess must contain A");
    }

    #[test]
    fn ordinals() {
        let got: Vec<_> = (1..=5).map(ordinal).collect();
        assert_eq!(got, ["1st", "2nd", "3rd", "4th", "5th"]);
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(22), "22nd");
    }

    #[test]
    fn free_function_matches_contract() {
        let correct = BTreeMap::from([(2, 'A')]);
        let present = BTreeSet::from(['E']);
        assert_eq!(
            validate(&w("bored"), &correct, &present),
            Err(PositionMismatch { position: 2, letter: 'A' })
        );
        assert_eq!(
            validate(&w("bravo"), &correct, &present),
            Err(MissingLetter { letter: 'E' })
        );
        assert_eq!(validate(&w("trace"), &correct, &present), Ok(()));
    }
}
