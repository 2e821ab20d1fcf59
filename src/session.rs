//! The game itself: attempts, turn transitions and the logical clock.

use std::{sync::Arc, time::Duration};

use log::{debug, info, warn};

use crate::{
    evaluate,
    grade::is_solved,
    reveal::{RevealSequencer, RevealStep},
    Constraints, Dictionary, Event, FetchError, Grade, KeyboardHints, Notice, Observer,
    Preferences, Rules, SubmitError, Word, WordSource, WORD_LENGTH,
};

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The player found the word using `attempts` attempts.
    Won { attempts: usize },
    /// The player ran out of attempts.
    Lost { secret: Word },
}

/// Where a session is in its turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// The open attempt has fewer than five letters.
    AwaitingInput,
    /// The open attempt has five letters and may be submitted.
    Ready,
    /// A guess was accepted and its letters are being revealed. Input and
    /// submissions are ignored until the reveal completes.
    Scoring,
    /// The game is over. Every mutating operation is a no-op.
    Ended(Outcome),
}

/// What a call to [`Session::submit()`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The guess consumed attempt `attempt` and its reveal started.
    Accepted {
        attempt: usize,
        grades: [Grade; WORD_LENGTH],
    },
    /// Nothing happened because the game is over or a reveal is running.
    Ignored,
}

/// One row of the board.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Attempt {
    letters: String,
    grades: Option<[Grade; WORD_LENGTH]>,
    revealed: usize,
}

impl Attempt {
    /// The letters typed so far, uppercase.
    pub fn letters(&self) -> &str {
        &self.letters
    }

    /// The grades of this attempt once it has been accepted.
    ///
    /// Grades are set all at once on acceptance, even though observers see
    /// them one letter at a time; see [`revealed()`](Attempt::revealed()).
    pub fn grades(&self) -> Option<&[Grade; WORD_LENGTH]> {
        self.grades.as_ref()
    }

    /// How many letters of this attempt have been revealed.
    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn is_scored(&self) -> bool {
        self.grades.is_some()
    }

    /// The submitted word, once the attempt holds five letters.
    pub fn word(&self) -> Option<Word> {
        self.letters.parse().ok()
    }
}

/// A single game of Wordle.
///
/// The session owns the board and drives every transition. It never sleeps
/// and never reads a clock: the caller moves logical time forward with
/// [`advance()`](Session::advance()), which releases staggered reveal steps
/// and clears the transient invalid flag. State changes are queued as
/// [`Event`]s, see [`drain_events()`](Session::drain_events()).
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use wordle_core::{Outcome, Pick, Preferences, Rules, Session, StaticSource};
///
/// let mut source = StaticSource::new(["hazel", "raven"]).pick(Pick::Fixed("hazel".parse()?));
/// let mut session = Session::start(&mut source, Rules::default());
///
/// for c in "hazel".chars() {
///     session.append_letter(c);
/// }
/// session.submit(Preferences::default())?;
///
/// // letters are revealed 400ms apart, then the game ends
/// session.advance(Duration::from_millis(2000));
/// assert_eq!(session.outcome(), Some(Outcome::Won { attempts: 1 }));
/// #
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Session {
    rules: Rules,
    dictionary: Option<Arc<Dictionary>>,
    secret: Option<Word>,
    attempts: Vec<Attempt>,
    hints: KeyboardHints,
    constraints: Constraints,
    reveal: RevealSequencer,
    scoring: Option<usize>,
    outcome: Option<Outcome>,
    invalid_until: Option<Duration>,
    now: Duration,
    events: Vec<(Duration, Event)>,
}

impl Session {
    /// Creates a session with an already loaded dictionary and secret word.
    pub fn new(dictionary: Arc<Dictionary>, secret: Word, rules: Rules) -> Self {
        if !dictionary.contains(&secret) {
            warn!("secret word {} is not in the dictionary", secret);
        }

        let mut session = Self::empty(rules);
        session.dictionary = Some(dictionary);
        session.secret = Some(secret);
        info!("new game with {} attempts", session.rules.max_attempts);
        session
    }

    /// Loads the dictionary from `source` and starts a game.
    ///
    /// If the source fails, the session still exists but cannot be played:
    /// every submission is rejected with [`SubmitError::NotInWordList`]
    /// until [`reload()`](Session::reload()) succeeds.
    pub fn start(source: &mut dyn WordSource, rules: Rules) -> Self {
        let mut session = Self::empty(rules);
        if let Err(e) = session.load(source) {
            session.fail(&e);
        }
        session
    }

    fn empty(rules: Rules) -> Self {
        Session {
            attempts: vec![Attempt::default(); rules.max_attempts],
            reveal: RevealSequencer::new(rules.reveal_delay),
            rules,
            dictionary: None,
            secret: None,
            hints: KeyboardHints::new(),
            constraints: Constraints::new(),
            scoring: None,
            outcome: None,
            invalid_until: None,
            now: Duration::ZERO,
            events: Vec::new(),
        }
    }

    fn load(&mut self, source: &mut dyn WordSource) -> Result<(), FetchError> {
        let dictionary = match self.dictionary.clone() {
            Some(d) => d,
            None => {
                let d = Arc::new(source.load_dictionary()?);
                self.dictionary = Some(d.clone());
                d
            }
        };

        self.secret = Some(source.pick_secret(&dictionary)?);
        info!(
            "new game with {} attempts and {} words",
            self.rules.max_attempts,
            dictionary.len()
        );
        Ok(())
    }

    fn fail(&mut self, e: &FetchError) {
        warn!("word list unavailable: {}", e);
        self.dictionary = None;
        self.secret = None;
        self.emit(self.now, Event::Notice(Notice::Unavailable));
    }

    /// Starts a new game with a fresh secret word.
    ///
    /// Pending reveal steps and timers of the old game are discarded, so
    /// nothing from it can leak into the new one. If no dictionary is
    /// loaded yet, this tries to load one first.
    pub fn reset(&mut self, source: &mut dyn WordSource) -> Result<(), FetchError> {
        self.reveal.cancel_all();
        self.attempts = vec![Attempt::default(); self.rules.max_attempts];
        self.hints = KeyboardHints::new();
        self.constraints = Constraints::new();
        self.scoring = None;
        self.outcome = None;
        self.invalid_until = None;
        self.emit(self.now, Event::Reset);

        self.load(source).map_err(|e| {
            self.fail(&e);
            e
        })
    }

    /// Fetches the dictionary again and starts a new game.
    pub fn reload(&mut self, source: &mut dyn WordSource) -> Result<(), FetchError> {
        self.dictionary = None;
        self.reset(source)
    }

    /// Returns true if a dictionary and a secret word are loaded.
    pub fn is_available(&self) -> bool {
        self.dictionary.is_some() && self.secret.is_some()
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// The shared dictionary, if one is loaded.
    pub fn dictionary(&self) -> Option<&Arc<Dictionary>> {
        self.dictionary.as_ref()
    }

    fn open_index(&self) -> Option<usize> {
        self.attempts.iter().position(|a| !a.is_scored())
    }

    fn locked(&self) -> bool {
        self.outcome.is_some() || self.scoring.is_some()
    }

    pub fn phase(&self) -> Phase {
        if let Some(outcome) = self.outcome {
            return Phase::Ended(outcome);
        }
        if self.scoring.is_some() {
            return Phase::Scoring;
        }
        match self.open_index() {
            Some(i) if self.attempts[i].letters.len() == WORD_LENGTH => Phase::Ready,
            _ => Phase::AwaitingInput,
        }
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Every row of the board, scored or not.
    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    /// The letters of the open attempt.
    pub fn current_input(&self) -> &str {
        self.open_index()
            .map_or("", |i| self.attempts[i].letters.as_str())
    }

    pub fn hints(&self) -> &KeyboardHints {
        &self.hints
    }

    /// What fully revealed attempts require of a hard mode guess.
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// True for a short while after a rejected submission.
    pub fn is_invalid(&self) -> bool {
        self.invalid_until.is_some()
    }

    pub fn can_backspace(&self) -> bool {
        !self.locked() && !self.current_input().is_empty()
    }

    pub fn can_submit(&self) -> bool {
        self.phase() == Phase::Ready
    }

    /// The current logical time.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Types one letter into the open attempt.
    ///
    /// Returns false and does nothing if the letter is not an ASCII letter,
    /// the attempt is full, a reveal is running, or the game is over.
    pub fn append_letter(&mut self, letter: char) -> bool {
        if self.locked() || !letter.is_ascii_alphabetic() {
            return false;
        }

        let attempt = match self.open_index() {
            Some(i) => i,
            None => return false,
        };

        let letters = &mut self.attempts[attempt].letters;
        if letters.len() >= WORD_LENGTH {
            return false;
        }

        let letter = letter.to_ascii_uppercase();
        letters.push(letter);
        let position = letters.len() - 1;
        self.emit(
            self.now,
            Event::LetterEntered {
                attempt,
                position,
                letter,
            },
        );
        true
    }

    /// Erases the last letter of the open attempt.
    pub fn remove_last_letter(&mut self) -> bool {
        if !self.can_backspace() {
            return false;
        }

        let attempt = match self.open_index() {
            Some(i) => i,
            None => return false,
        };

        self.attempts[attempt].letters.pop();
        let position = self.attempts[attempt].letters.len();
        self.emit(self.now, Event::LetterRemoved { attempt, position });
        true
    }

    /// Submits the open attempt.
    ///
    /// The checks run in a fixed order and the first failure is reported:
    /// too few letters, not in the dictionary, and then, if `preferences`
    /// turn hard mode on, a hard mode violation. A rejection never consumes
    /// an attempt; it queues a notice and sets the invalid flag for
    /// [`Rules::invalid_window`].
    ///
    /// An accepted guess is scored at once and its reveal starts. While the
    /// reveal runs, and after the game ends, submissions are ignored.
    pub fn submit(&mut self, preferences: Preferences) -> Result<SubmitOutcome, SubmitError> {
        if self.locked() {
            debug!("ignoring submission in phase {:?}", self.phase());
            return Ok(SubmitOutcome::Ignored);
        }

        let attempt = match self.open_index() {
            Some(i) => i,
            None => return Ok(SubmitOutcome::Ignored),
        };

        let word = match self.attempts[attempt].word() {
            Some(word) => word,
            None => return Err(self.reject(SubmitError::TooShort)),
        };

        let known = match (&self.dictionary, self.secret) {
            (Some(dictionary), Some(secret)) if dictionary.contains(&word) => Some(secret),
            _ => None,
        };

        let secret = match known {
            Some(secret) => secret,
            None => return Err(self.reject(SubmitError::NotInWordList(word))),
        };

        if preferences.hard_mode {
            if let Err(violation) = self.constraints.check(&word) {
                return Err(self.reject(violation.into()));
            }
        }

        let grades = evaluate(&secret, &word);
        debug!("attempt {} accepted: {} {:?}", attempt, word, grades);

        self.attempts[attempt].grades = Some(grades);
        self.scoring = Some(attempt);
        self.emit(self.now, Event::Accepted { attempt, word });
        self.reveal.start(self.now, attempt, word, grades);
        self.pump();

        Ok(SubmitOutcome::Accepted { attempt, grades })
    }

    fn reject(&mut self, err: SubmitError) -> SubmitError {
        debug!("submission rejected: {}", err);
        self.invalid_until = Some(self.now.saturating_add(self.rules.invalid_window));
        self.emit(self.now, Event::Rejected(err.clone()));
        self.emit(self.now, Event::Notice(Notice::from(&err)));
        err
    }

    /// Moves logical time forward to `now`, applying everything that came
    /// due in between in the order it came due.
    ///
    /// Time never runs backwards; an earlier `now` is ignored.
    pub fn advance(&mut self, now: Duration) {
        if now < self.now {
            return;
        }
        self.now = now;
        self.pump();
    }

    /// Returns when the next pending timer fires, if any is pending.
    pub fn next_deadline(&self) -> Option<Duration> {
        match (self.invalid_until, self.reveal.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn pump(&mut self) {
        loop {
            let invalid = self.invalid_until.filter(|&t| t <= self.now);
            let reveal = self.reveal.next_deadline().filter(|&t| t <= self.now);

            match (invalid, reveal) {
                (Some(at), next) if next.map_or(true, |r| at <= r) => {
                    self.invalid_until = None;
                    self.emit(at, Event::InvalidCleared);
                }
                (_, Some(_)) => match self.reveal.poll(self.now) {
                    Some((at, step)) => self.apply(at, step),
                    None => break,
                },
                _ => break,
            }
        }
    }

    fn apply(&mut self, at: Duration, step: RevealStep) {
        match step {
            RevealStep::Letter {
                attempt,
                position,
                letter,
                grade,
            } => {
                self.attempts[attempt].revealed = position + 1;
                self.emit(
                    at,
                    Event::LetterRevealed {
                        attempt,
                        position,
                        letter,
                        grade,
                    },
                );
            }
            RevealStep::Complete {
                attempt,
                word,
                grades,
            } => self.complete(at, attempt, word, grades),
        }
    }

    fn complete(&mut self, at: Duration, attempt: usize, word: Word, grades: [Grade; WORD_LENGTH]) {
        self.scoring = None;
        self.hints.record(&word, &grades);
        self.constraints.record(&word, &grades);
        self.emit(
            at,
            Event::AttemptScored {
                attempt,
                word,
                grades,
            },
        );

        if is_solved(&grades) {
            self.end(
                at,
                Outcome::Won {
                    attempts: attempt + 1,
                },
                Notice::Splendid,
            );
        } else if self.open_index().is_none() {
            // only reachable with a secret loaded, since a guess was accepted
            if let Some(secret) = self.secret {
                self.end(at, Outcome::Lost { secret }, Notice::Reveal(secret));
            }
        }
    }

    fn end(&mut self, at: Duration, outcome: Outcome, notice: Notice) {
        info!("game over: {:?}", outcome);
        self.outcome = Some(outcome);
        self.emit(at, Event::Ended(outcome));
        self.emit(at, Event::Notice(notice));
    }

    fn emit(&mut self, at: Duration, event: Event) {
        self.events.push((at, event));
    }

    /// Takes every event queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<(Duration, Event)> {
        std::mem::take(&mut self.events)
    }

    /// Feeds every queued event to `observer`, oldest first.
    pub fn dispatch(&mut self, observer: &mut dyn Observer) {
        for (at, event) in self.drain_events() {
            observer.observe(at, &event);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{HardModeViolation, Pick, StaticSource};

    const WORDS: &[&str] = &[
        "hazel", "audio", "raven", "label", "quilt", "bring", "pasta", "pacts", "crane", "moist",
        "lurid", "fjord", "gypsy",
    ];

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn session(secret: &str) -> Session {
        let mut source = StaticSource::new(WORDS.iter().copied())
            .pick(Pick::Fixed(secret.parse().unwrap()));
        Session::start(&mut source, Rules::default())
    }

    fn type_word(session: &mut Session, word: &str) {
        for c in word.chars() {
            session.append_letter(c);
        }
    }

    fn guess(session: &mut Session, word: &str, hard: bool) -> Result<SubmitOutcome, SubmitError> {
        type_word(session, word);
        let prefs = if hard {
            Preferences::new().hard()
        } else {
            Preferences::new()
        };
        session.submit(prefs)
    }

    /// Lets a running reveal finish.
    fn finish_reveal(session: &mut Session) {
        while let Some(deadline) = session.next_deadline() {
            session.advance(deadline);
        }
    }

    #[test]
    fn huge_timings_saturate_instead_of_overflowing() {
        let dictionary = Arc::new(Dictionary::from_entries(WORDS));
        let rules = Rules::new()
            .invalid_window(Duration::MAX)
            .reveal_delay(Duration::MAX);
        let mut s = Session::new(dictionary, "hazel".parse().unwrap(), rules);

        s.advance(ms(10));
        assert_eq!(s.submit(Preferences::new()), Err(SubmitError::TooShort));
        assert!(s.is_invalid());
        assert_eq!(s.next_deadline(), Some(Duration::MAX));

        assert!(matches!(
            guess(&mut s, "raven", false),
            Ok(SubmitOutcome::Accepted { attempt: 0, .. })
        ));
        assert_eq!(s.attempts()[0].revealed(), 1);

        s.advance(Duration::MAX);
        assert!(!s.is_invalid());
        assert_eq!(s.attempts()[0].revealed(), 5);
        assert_eq!(s.phase(), Phase::AwaitingInput);
    }

    #[test]
    fn typing_and_erasing() {
        let mut s = session("hazel");
        assert!(!s.can_backspace());
        assert!(!s.remove_last_letter());
        assert!(!s.append_letter('1'));

        type_word(&mut s, "audios");
        assert_eq!(s.current_input(), "AUDIO");
        assert_eq!(s.phase(), Phase::Ready);
        assert!(s.can_submit());

        assert!(s.remove_last_letter());
        assert_eq!(s.current_input(), "AUDI");
        assert_eq!(s.phase(), Phase::AwaitingInput);

        let entered = s
            .drain_events()
            .into_iter()
            .filter(|(_, e)| matches!(e, Event::LetterEntered { .. }))
            .count();
        assert_eq!(entered, 5);
    }

    #[test]
    fn too_short_is_transient() {
        let mut s = session("hazel");
        type_word(&mut s, "haz");
        assert_eq!(s.submit(Preferences::new()), Err(SubmitError::TooShort));
        assert!(s.is_invalid());
        assert_eq!(s.current_input(), "HAZ");
        assert!(s.attempts().iter().all(|a| !a.is_scored()));

        s.advance(ms(599));
        assert!(s.is_invalid());
        s.advance(ms(600));
        assert!(!s.is_invalid());

        let events: Vec<_> = s.drain_events().into_iter().map(|(_, e)| e).collect();
        assert!(events.contains(&Event::Notice(Notice::NotEnoughLetters)));
        assert_eq!(events.last(), Some(&Event::InvalidCleared));
    }

    #[test]
    fn unknown_words_are_rejected() {
        let mut s = session("hazel");
        let res = guess(&mut s, "zzzzz", false);
        assert_eq!(res, Err(SubmitError::NotInWordList("zzzzz".parse().unwrap())));
        assert_eq!(s.phase(), Phase::Ready);
    }

    #[test]
    fn accepted_guess_locks_until_revealed() {
        let mut s = session("hazel");
        let res = guess(&mut s, "raven", false).unwrap();
        assert!(matches!(res, SubmitOutcome::Accepted { attempt: 0, .. }));
        assert_eq!(s.phase(), Phase::Scoring);
        assert_eq!(s.attempts()[0].revealed(), 1);

        // locked while scoring
        assert!(!s.append_letter('a'));
        assert_eq!(s.submit(Preferences::new()), Ok(SubmitOutcome::Ignored));
        assert!(s.hints().is_empty());

        s.advance(ms(1600));
        assert_eq!(s.attempts()[0].revealed(), 5);
        assert_eq!(s.phase(), Phase::Scoring);

        s.advance(ms(2000));
        assert_eq!(s.phase(), Phase::AwaitingInput);
        assert_eq!(s.hints().get('A'), Some(Grade::Correct));
        assert!(s.append_letter('a'));
        assert_eq!(s.attempts()[1].letters(), "A");
    }

    #[test]
    fn hard_mode_checks_correct_before_present() {
        let mut s = session("hazel");
        guess(&mut s, "audio", true).unwrap();
        finish_reveal(&mut s);

        assert_eq!(
            guess(&mut s, "bring", true),
            Err(SubmitError::HardMode(HardModeViolation::MissingLetter { letter: 'A' }))
        );
        // the same guess is fine on easy mode
        assert!(matches!(
            s.submit(Preferences::new()),
            Ok(SubmitOutcome::Accepted { attempt: 1, .. })
        ));
        finish_reveal(&mut s);

        guess(&mut s, "raven", true).unwrap();
        finish_reveal(&mut s);

        assert_eq!(
            guess(&mut s, "pacts", true),
            Err(SubmitError::HardMode(HardModeViolation::PositionMismatch {
                position: 3,
                letter: 'E'
            }))
        );
    }

    #[test]
    fn reset_discards_pending_reveal() {
        let mut s = session("hazel");
        guess(&mut s, "hazel", false).unwrap();
        s.advance(ms(500));
        s.drain_events();

        let mut source = StaticSource::new(WORDS.iter().copied()).pick(Pick::Fixed("raven".parse().unwrap()));
        s.reset(&mut source).unwrap();
        s.advance(ms(10_000));

        assert_eq!(s.phase(), Phase::AwaitingInput);
        assert_eq!(s.outcome(), None);
        let events: Vec<_> = s.drain_events().into_iter().map(|(_, e)| e).collect();
        assert_eq!(events, [Event::Reset]);
    }

    #[test]
    fn unavailable_dictionary_rejects_everything() {
        let mut broken = StaticSource::new(["nope"]);
        let mut s = Session::start(&mut broken, Rules::default());
        assert!(!s.is_available());

        assert!(matches!(
            guess(&mut s, "hazel", false),
            Err(SubmitError::NotInWordList(_))
        ));

        let mut fixed = StaticSource::new(WORDS.iter().copied()).pick(Pick::Fixed("hazel".parse().unwrap()));
        s.reload(&mut fixed).unwrap();
        assert!(s.is_available());
        assert_eq!(s.current_input(), "");
        assert!(guess(&mut s, "hazel", false).is_ok());
    }

    #[test]
    fn failed_reset_reports_and_degrades() {
        let mut s = session("hazel");
        let mut broken = StaticSource::new(["hazel"]).pick(Pick::Fixed("zzzzz".parse().unwrap()));
        assert!(s.reset(&mut broken).is_err());
        assert!(!s.is_available());
        let events: Vec<_> = s.drain_events().into_iter().map(|(_, e)| e).collect();
        assert_eq!(events, [Event::Reset, Event::Notice(Notice::Unavailable)]);
    }
}
