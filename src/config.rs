//! Session rules and player preferences.

#[cfg(feature = "serde")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::MAX_ATTEMPTS;

/// The fixed rules of a session, chosen when it is built.
///
/// Like most configuration in this crate, the setters consume the existing
/// [`Rules`] and return a new one.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use wordle_core::Rules;
///
/// let rules = Rules::new()
///     .max_attempts(8)
///     .reveal_delay(Duration::ZERO);
///
/// assert_eq!(rules.max_attempts, 8);
/// assert_eq!(rules.invalid_window, Duration::from_millis(600));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", default)
)]
pub struct Rules {
    /// How many attempts the player gets.
    pub max_attempts: usize,
    /// Time between revealing consecutive letters of an attempt.
    pub reveal_delay: Duration,
    /// How long a rejected submission keeps the invalid flag set.
    pub invalid_window: Duration,
    /// How long a notification stays before fading.
    pub toast_lifetime: Duration,
    /// How long a notification takes to fade out.
    pub toast_fade: Duration,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            max_attempts: MAX_ATTEMPTS,
            reveal_delay: Duration::from_millis(400),
            invalid_window: Duration::from_millis(600),
            toast_lifetime: Duration::from_millis(3000),
            toast_fade: Duration::from_millis(300),
        }
    }
}

impl Rules {
    /// Creates the canonical rules.
    ///
    /// Defaults:
    /// 1. six attempts
    /// 2. 400ms between revealed letters
    /// 3. 600ms of invalid flag after a rejected submission
    /// 4. notifications shown for 3s and faded over 300ms
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how many attempts the player gets. At least one is always kept.
    pub fn max_attempts(self, n: usize) -> Self {
        Rules {
            max_attempts: n.max(1),
            ..self
        }
    }

    pub fn reveal_delay(self, delay: Duration) -> Self {
        Rules {
            reveal_delay: delay,
            ..self
        }
    }

    pub fn invalid_window(self, window: Duration) -> Self {
        Rules {
            invalid_window: window,
            ..self
        }
    }

    pub fn toasts(self, lifetime: Duration, fade: Duration) -> Self {
        Rules {
            toast_lifetime: lifetime,
            toast_fade: fade,
            ..self
        }
    }
}

/// Flags the player can toggle between games.
///
/// The engine only reads these; it is handed a copy on every
/// [`submit()`](crate::Session::submit()).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate", default)
)]
pub struct Preferences {
    /// Revealed hints must be used in subsequent guesses.
    pub hard_mode: bool,
}

impl Preferences {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hard(self) -> Self {
        Preferences { hard_mode: true }
    }

    pub fn easy(self) -> Self {
        Preferences { hard_mode: false }
    }
}

#[cfg(feature = "serde")]
impl Preferences {
    /// Reads preferences from a JSON file, falling back to the defaults if
    /// the file does not exist yet.
    pub fn load(path: impl AsRef<Path>) -> crate::Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes preferences to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> crate::Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builder_overrides() {
        let rules = Rules::new()
            .max_attempts(0)
            .invalid_window(Duration::from_millis(10))
            .toasts(Duration::from_millis(1), Duration::from_millis(2));
        assert_eq!(rules.max_attempts, 1);
        assert_eq!(rules.invalid_window, Duration::from_millis(10));
        assert_eq!(rules.reveal_delay, Duration::from_millis(400));
        assert_eq!(rules.toast_fade, Duration::from_millis(2));
    }

    #[test]
    fn preference_toggles() {
        assert!(!Preferences::new().hard_mode);
        assert!(Preferences::new().hard().hard_mode);
        assert!(!Preferences::new().hard().easy().hard_mode);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn preferences_round_trip_through_a_file() {
        let dir = std::env::temp_dir().join(format!("wordle_core_prefs_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("prefs.json");
        let _ = std::fs::remove_file(&path);

        assert_eq!(Preferences::load(&path).unwrap(), Preferences::default());

        Preferences::new().hard().save(&path).unwrap();
        assert!(Preferences::load(&path).unwrap().hard_mode);

        std::fs::write(&path, "{}").unwrap();
        assert!(!Preferences::load(&path).unwrap().hard_mode);

        std::fs::write(&path, "not json").unwrap();
        assert!(Preferences::load(&path).is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
