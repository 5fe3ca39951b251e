use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::bandwidth::{Bitrate, DataSize};

/// Byte counter over a trailing time window.
///
/// The reported rate is the window total over the full window length, so
/// a quiet spell inside the window lowers the rate instead of shrinking
/// the measurement interval.
#[derive(Debug)]
pub(crate) struct RateCounter {
    window: Duration,
    total: DataSize,
    samples: VecDeque<(Instant, DataSize)>,
    /// Newest sample time seen so far. Defines the window floor below
    /// which incoming samples are discarded.
    newest: Option<Instant>,
}

impl RateCounter {
    pub(crate) fn new(window: Duration) -> Self {
        RateCounter {
            window,
            total: DataSize::ZERO,
            samples: VecDeque::new(),
            newest: None,
        }
    }

    /// Record bytes at `now`. A sample that predates the current window
    /// entirely is discarded.
    pub(crate) fn update(&mut self, size: DataSize, now: Instant) {
        if let Some(newest) = self.newest {
            if newest.saturating_duration_since(now) > self.window {
                return;
            }
        }

        self.total += size;
        self.samples.push_back((now, size));
        self.newest = Some(self.newest.map_or(now, |n| n.max(now)));

        if let Some(newest) = self.newest {
            self.purge_old(newest);
        }
    }

    /// Current rate over the window ending at `now`.
    pub(crate) fn rate(&mut self, now: Instant) -> Bitrate {
        self.purge_old(now);

        self.total / self.window
    }

    /// Drop samples older than `now - window` and deduct them from the
    /// running total.
    fn purge_old(&mut self, now: Instant) {
        while let Some((front_t, _)) = self.samples.front() {
            if now.duration_since(*front_t) <= self.window {
                break;
            }
            if let Some((_, size)) = self.samples.pop_front() {
                self.total = self.total.saturating_sub(size);
            }
        }
    }
}
