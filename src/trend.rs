use std::time::Instant;

use crate::bandwidth::Bitrate;

/// EWMA (Exponentially Weighted Moving Average) over an instantaneous
/// bitrate signal.
///
/// Each accepted observation moves the average by a fixed fraction of its
/// distance to the observation:
///
/// avg = avg + coefficient * (x - avg)
///
/// The first observation seeds the average outright so the smoothed value
/// carries no artificial zero bias on startup.
#[derive(Debug)]
pub(crate) struct TrendSmoother {
    coefficient: f64,
    last_at: Option<Instant>,
    avg: Option<f64>,
}

impl TrendSmoother {
    pub(crate) fn new(coefficient: f64) -> Self {
        TrendSmoother {
            coefficient,
            last_at: None,
            avg: None,
        }
    }

    /// Fold a new observation into the average.
    pub(crate) fn update(&mut self, rate: Bitrate, now: Instant) {
        let value = rate.as_f64();

        let Some(last) = self.last_at else {
            self.last_at = Some(now);
            self.avg = Some(value);
            return;
        };

        if now < last {
            // Time moved backwards, ignore the observation.
            return;
        }

        self.last_at = Some(now);

        let avg = self.avg.unwrap_or(value);
        self.avg = Some(avg + self.coefficient * (value - avg));
    }

    /// The current smoothed bitrate. Zero before the first observation.
    pub(crate) fn value(&self) -> Bitrate {
        self.avg.map(Bitrate::from).unwrap_or(Bitrate::ZERO)
    }
}
