//! Short-lived notifications.

use std::time::Duration;

use log::debug;

use crate::{Event, Notice, Observer, Rules};

/// One notification on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub notice: Notice,
    /// Set once the toast starts fading out.
    pub fading: bool,
    fade_at: Duration,
}

/// A notifier that shows every [`Notice`] for a while, fades it out and then
/// drops it.
///
/// Like a session, it runs on a logical clock: call
/// [`advance()`](Toasts::advance()) with the current time to expire old
/// toasts.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use wordle_core::{Event, Notice, Observer, Rules, Toasts};
///
/// let mut toasts = Toasts::new(&Rules::default());
/// toasts.observe(Duration::ZERO, &Event::Notice(Notice::NotEnoughLetters));
/// assert_eq!(toasts.visible().count(), 1);
///
/// toasts.advance(Duration::from_millis(3300));
/// assert_eq!(toasts.visible().count(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct Toasts {
    lifetime: Duration,
    fade: Duration,
    next_id: u64,
    toasts: Vec<Toast>,
}

impl Toasts {
    pub fn new(rules: &Rules) -> Self {
        Toasts {
            lifetime: rules.toast_lifetime,
            fade: rules.toast_fade,
            next_id: 0,
            toasts: Vec::new(),
        }
    }

    /// Shows a notice and returns the id of its toast.
    pub fn show(&mut self, now: Duration, notice: Notice) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        debug!("toast {}: {}", id, notice);
        self.toasts.push(Toast {
            id,
            notice,
            fading: false,
            fade_at: now.saturating_add(self.lifetime),
        });
        id
    }

    /// Starts fading a toast early, as when the player dismisses it.
    pub fn close(&mut self, now: Duration, id: u64) {
        if let Some(toast) = self.toasts.iter_mut().find(|t| t.id == id && !t.fading) {
            toast.fading = true;
            toast.fade_at = now;
        }
    }

    /// Fades and removes toasts whose time is up.
    pub fn advance(&mut self, now: Duration) {
        let fade = self.fade;
        for toast in self.toasts.iter_mut() {
            if now >= toast.fade_at {
                toast.fading = true;
            }
        }
        self.toasts.retain(|t| now < t.fade_at.saturating_add(fade));
    }

    /// Returns when the next toast changes state, if any are showing.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.toasts
            .iter()
            .map(|t| {
                if t.fading {
                    t.fade_at.saturating_add(self.fade)
                } else {
                    t.fade_at
                }
            })
            .min()
    }

    /// Toasts currently on screen, oldest first.
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter()
    }
}

impl Observer for Toasts {
    fn observe(&mut self, at: Duration, event: &Event) {
        if let Event::Notice(notice) = event {
            self.show(at, notice.clone());
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn huge_lifetimes_saturate() {
        let mut toasts = Toasts::new(&Rules::new().toasts(Duration::MAX, Duration::MAX));
        let id = toasts.show(ms(10), Notice::Splendid);
        assert_eq!(toasts.next_deadline(), Some(Duration::MAX));

        toasts.close(ms(20), id);
        toasts.advance(ms(20));
        assert_eq!(toasts.next_deadline(), Some(Duration::MAX));
        assert_eq!(toasts.visible().count(), 1);
    }

    #[test]
    fn toasts_fade_then_disappear() {
        let mut toasts = Toasts::new(&Rules::default());
        toasts.observe(ms(0), &Event::Notice(Notice::NotInWordList));
        toasts.observe(ms(1000), &Event::Notice(Notice::Splendid));
        toasts.observe(ms(1000), &Event::Reset);
        assert_eq!(toasts.visible().count(), 2);
        assert_eq!(toasts.next_deadline(), Some(ms(3000)));

        toasts.advance(ms(3000));
        let fading: Vec<_> = toasts.visible().map(|t| t.fading).collect();
        assert_eq!(fading, [true, false]);
        assert_eq!(toasts.next_deadline(), Some(ms(3300)));

        toasts.advance(ms(3300));
        let left: Vec<_> = toasts.visible().map(|t| t.notice.clone()).collect();
        assert_eq!(left, [Notice::Splendid]);

        toasts.advance(ms(4300));
        assert_eq!(toasts.visible().count(), 0);
        assert_eq!(toasts.next_deadline(), None);
    }

    #[test]
    fn closing_fades_immediately() {
        let mut toasts = Toasts::new(&Rules::default());
        let id = toasts.show(ms(5000), Notice::Unavailable);
        toasts.close(ms(5100), id);
        assert!(toasts.visible().all(|t| t.fading));
        toasts.advance(ms(5400));
        assert_eq!(toasts.visible().count(), 0);
    }
}
