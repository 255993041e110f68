use std::time::{Duration, Instant};

/// A single resettable countdown to the next simulation step.
///
/// At most one deadline exists at a time: arming an armed ticker keeps the
/// existing deadline, and changing the period replaces it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Ticker {
    period: Duration,
    deadline: Option<Instant>,
}

impl Ticker {
    pub(crate) fn new(period: Duration) -> Ticker {
        Ticker {
            period,
            deadline: None,
        }
    }

    pub(crate) fn period(&self) -> Duration {
        self.period
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Schedule the next tick one period after `now`, unless one is already
    /// scheduled
    pub(crate) fn arm(&mut self, now: Instant) {
        if self.deadline.is_none() {
            self.deadline = Some(now + self.period);
        }
    }

    pub(crate) fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Change the period.  A pending tick is rescheduled to one new period
    /// after `now`.
    pub(crate) fn set_period(&mut self, period: Duration, now: Instant) {
        self.period = period;
        if self.deadline.is_some() {
            self.deadline = Some(now + period);
        }
    }

    /// How long until the next tick is due, or `None` if none is scheduled
    pub(crate) fn remaining(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// If a tick is due at `now`, consume it and return `true`
    pub(crate) fn fire(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(d) if d <= now => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
