#![doc = include_str!("../README.md")]

// Required to rename serde
#[cfg(feature = "serde")]
extern crate serde_crate as serde;

use thiserror::Error;

pub mod word;
pub use word::{Dictionary, Word};

pub mod grade;
pub use grade::{evaluate, Grade};

pub mod hardmode;
pub use hardmode::{Constraints, HardModeViolation};

pub mod hints;
pub use hints::KeyboardHints;

pub mod reveal;
pub use reveal::{RevealSequencer, RevealStep};

pub mod event;
pub use event::{Event, Notice, Observer};

pub mod toast;
pub use toast::Toasts;

pub mod source;
pub use source::{FileSource, Pick, StaticSource, WordSource};

pub mod config;
pub use config::{Preferences, Rules};

pub mod session;
pub use session::{Attempt, Outcome, Phase, Session, SubmitOutcome};

/// The number of letters in every Wordle word.
pub const WORD_LENGTH: usize = 5;

/// The canonical number of attempts a player gets.
pub const MAX_ATTEMPTS: usize = 6;

/// A [`Result`](std::result::Result) defaulting to [`WordleError`].
pub type Result<T, E = WordleError> = std::result::Result<T, E>;

/// The errors that `wordle_core` can produce.
#[derive(Debug, Error)]
pub enum WordleError {
    #[error("puzzle encountered error")]
    Puzzle {
        #[from]
        kind: PuzzleError,
    },

    #[error("guess was rejected")]
    Submit {
        #[from]
        kind: SubmitError,
    },

    #[error("word list is unavailable")]
    Fetch {
        #[from]
        kind: FetchError,
    },

    #[error("general IO error")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("trouble serializing or deserializing preferences")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PuzzleError {
    /// The string provided when constructing a [`Word`] is not five ASCII
    /// letters.
    #[error("the string \"{0}\" is not a five letter word")]
    InvalidWord(String),
}

/// Reasons a submitted guess is turned away without consuming an attempt.
///
/// The `Display` text of each variant is the message shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// The open attempt does not hold five letters yet.
    #[error("Not enough letters")]
    TooShort,

    /// The guess is not in the dictionary, or no dictionary is loaded.
    #[error("Not in word list")]
    NotInWordList(Word),

    /// Hard mode is on and the guess ignores a revealed hint.
    #[error("{0}")]
    HardMode(#[from] HardModeViolation),
}

/// The dictionary could not be produced by a [`WordSource`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not read the word list")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("could not parse the word list")]
    Json(#[from] serde_json::Error),

    #[error("the word list contains no five letter words")]
    Empty,

    #[error("the word {0} is not in the word list")]
    NoSecret(Word),
}
