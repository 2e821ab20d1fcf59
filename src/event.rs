//! What a session tells the outside world.
//!
//! A [`Session`](crate::Session) never calls into the UI. Every state change
//! is queued as an [`Event`] stamped with the logical time it happened at,
//! and front ends either drain the queue or hand the session an
//! [`Observer`].

use std::{fmt::Display, time::Duration};

use crate::{Grade, HardModeViolation, Outcome, SubmitError, Word, WORD_LENGTH};

/// A state change of a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// A letter was typed into the open attempt.
    LetterEntered {
        attempt: usize,
        position: usize,
        letter: char,
    },

    /// The last letter of the open attempt was erased.
    LetterRemoved { attempt: usize, position: usize },

    /// A submission was turned away. The transient invalid flag is now set.
    Rejected(SubmitError),

    /// The transient invalid flag cleared.
    InvalidCleared,

    /// A guess was accepted and its reveal began.
    Accepted { attempt: usize, word: Word },

    /// One letter of a scored attempt became visible.
    LetterRevealed {
        attempt: usize,
        position: usize,
        letter: char,
        grade: Grade,
    },

    /// Every letter of an attempt is visible and keyboard hints include it.
    AttemptScored {
        attempt: usize,
        word: Word,
        grades: [Grade; WORD_LENGTH],
    },

    /// The game is over.
    Ended(Outcome),

    /// A message for the player.
    Notice(Notice),

    /// A new game started, discarding everything before it.
    Reset,
}

/// Messages meant for a notifier such as [`Toasts`](crate::Toasts).
///
/// The `Display` text is what the player sees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    NotEnoughLetters,
    NotInWordList,
    HardMode(HardModeViolation),
    /// The player found the word.
    Splendid,
    /// The player ran out of attempts. Carries the secret word.
    Reveal(Word),
    /// No word list is loaded, so nothing can be played.
    Unavailable,
}

impl From<&SubmitError> for Notice {
    fn from(err: &SubmitError) -> Self {
        match err {
            SubmitError::TooShort => Notice::NotEnoughLetters,
            SubmitError::NotInWordList(_) => Notice::NotInWordList,
            SubmitError::HardMode(v) => Notice::HardMode(*v),
        }
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::NotEnoughLetters => write!(f, "Not enough letters"),
            Notice::NotInWordList => write!(f, "Not in word list"),
            Notice::HardMode(v) => write!(f, "{}", v),
            Notice::Splendid => write!(f, "Splendid!"),
            Notice::Reveal(word) => write!(f, "{}", word),
            Notice::Unavailable => write!(f, "Word list unavailable"),
        }
    }
}

/// Something that reacts to session events.
///
/// Closures taking `(Duration, &Event)` are observers too.
pub trait Observer {
    /// Called once per event, in the order the events happened.
    fn observe(&mut self, at: Duration, event: &Event);
}

impl<F> Observer for F
where
    F: FnMut(Duration, &Event),
{
    fn observe(&mut self, at: Duration, event: &Event) {
        self(at, event)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn notice_text() {
        let word: Word = "hazel".parse().unwrap();
        let cases = [
            (Notice::from(&SubmitError::TooShort), "Not enough letters"),
            (Notice::from(&SubmitError::NotInWordList(word)), "Not in word list"),
            (
                Notice::from(&SubmitError::HardMode(HardModeViolation::MissingLetter {
                    letter: 'A',
                })),
                "Guess must contain A",
            ),
            (Notice::Splendid, "Splendid!"),
            (Notice::Reveal(word), "HAZEL"),
        ];

        for (notice, text) in cases {
            assert_eq!(notice.to_string(), text);
        }
    }

    #[test]
    fn closures_observe() {
        let mut seen = Vec::new();
        {
            let mut observer = |at: Duration, event: &Event| seen.push((at, event.clone()));
            observer.observe(Duration::ZERO, &Event::Reset);
        }
        assert_eq!(seen, [(Duration::ZERO, Event::Reset)]);
    }
}
