//! Staggered disclosure of a scored attempt.
//!
//! The grades of an attempt are known the moment it is accepted. The
//! sequencer only decides *when* observers get to see each of them: one
//! letter at a time, left to right, a fixed delay apart, followed by a
//! completion step once the last letter has been shown.

use std::{collections::VecDeque, time::Duration};

use log::trace;

use crate::{Grade, Word, WORD_LENGTH};

/// Identifies one started reveal so it can be cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RevealToken(u64);

/// One scheduled piece of a reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealStep {
    /// The letter at `position` of attempt `attempt` becomes visible.
    Letter {
        attempt: usize,
        position: usize,
        letter: char,
        grade: Grade,
    },

    /// Every letter of `attempt` is visible.
    Complete {
        attempt: usize,
        word: Word,
        grades: [Grade; WORD_LENGTH],
    },
}

#[derive(Clone, Debug)]
struct Scheduled {
    at: Duration,
    token: RevealToken,
    step: RevealStep,
}

/// Schedules and releases reveal steps against a logical clock.
///
/// Nothing here sleeps. The owner asks for due steps with
/// [`poll()`](RevealSequencer::poll()) whenever its clock moves, which keeps
/// the sequencer equally usable with wall-clock time and with simulated
/// time in tests. Steps are released one per call and strictly in order,
/// even when the clock jumps past several deadlines at once.
#[derive(Clone, Debug)]
pub struct RevealSequencer {
    delay: Duration,
    next_token: u64,
    pending: VecDeque<Scheduled>,
}

impl RevealSequencer {
    /// Creates a sequencer that waits `delay` between consecutive letters.
    pub fn new(delay: Duration) -> Self {
        RevealSequencer {
            delay,
            next_token: 0,
            pending: VecDeque::new(),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedules the reveal of an attempt starting at `now`.
    ///
    /// Letter `i` becomes due at `now + i * delay` and the completion step
    /// one more delay after the last letter. A reveal started while another
    /// is pending is queued behind it.
    pub fn start(
        &mut self,
        now: Duration,
        attempt: usize,
        word: Word,
        grades: [Grade; WORD_LENGTH],
    ) -> RevealToken {
        let token = RevealToken(self.next_token);
        self.next_token += 1;

        let start = self
            .pending
            .back()
            .map_or(now, |last| last.at.max(now).saturating_add(self.delay));

        for (position, (letter, &grade)) in word.letters().zip(grades.iter()).enumerate() {
            self.pending.push_back(Scheduled {
                at: start.saturating_add(self.delay.saturating_mul(position as u32)),
                token,
                step: RevealStep::Letter {
                    attempt,
                    position,
                    letter,
                    grade,
                },
            });
        }

        self.pending.push_back(Scheduled {
            at: start.saturating_add(self.delay.saturating_mul(WORD_LENGTH as u32)),
            token,
            step: RevealStep::Complete {
                attempt,
                word,
                grades,
            },
        });

        trace!("scheduled reveal {:?} of attempt {} at {:?}", token, attempt, start);
        token
    }

    /// Releases the next step that is due at `now`, with its due time.
    pub fn poll(&mut self, now: Duration) -> Option<(Duration, RevealStep)> {
        match self.pending.front() {
            Some(next) if next.at <= now => self.pending.pop_front().map(|s| (s.at, s.step)),
            _ => None,
        }
    }

    /// Returns when the next step becomes due, if any is pending.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.front().map(|s| s.at)
    }

    /// Returns true while any step is still pending.
    pub fn is_active(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Discards every pending step of one reveal.
    pub fn cancel(&mut self, token: RevealToken) {
        self.pending.retain(|s| s.token != token);
    }

    /// Discards every pending step.
    pub fn cancel_all(&mut self) {
        if !self.pending.is_empty() {
            trace!("discarding {} pending reveal steps", self.pending.len());
        }
        self.pending.clear();
    }
}
