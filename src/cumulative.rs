use std::time::Instant;

use crate::bandwidth::{Bitrate, DataSize};

/// Summary of the feedback-confirmed packets accumulated since the last
/// reset.
///
/// Sent and received extremes are tracked independently since reordering
/// means the two timelines do not move in lockstep.
#[derive(Debug, Default)]
pub(crate) struct CumulativeResult {
    num_packets: u32,
    total_size: DataSize,
    first_sent_at: Option<Instant>,
    last_sent_at: Option<Instant>,
    first_received_at: Option<Instant>,
    last_received_at: Option<Instant>,
}

impl CumulativeResult {
    pub(crate) fn add_packet(&mut self, size: DataSize, sent_at: Instant, received_at: Instant) {
        self.first_sent_at = Some(self.first_sent_at.map_or(sent_at, |t| t.min(sent_at)));
        self.last_sent_at = Some(self.last_sent_at.map_or(sent_at, |t| t.max(sent_at)));
        self.first_received_at =
            Some(self.first_received_at.map_or(received_at, |t| t.min(received_at)));
        self.last_received_at =
            Some(self.last_received_at.map_or(received_at, |t| t.max(received_at)));

        self.num_packets += 1;
        self.total_size += size;
    }

    pub(crate) fn reset(&mut self) {
        *self = CumulativeResult::default();
    }

    pub(crate) fn num_packets(&self) -> u32 {
        self.num_packets
    }

    pub(crate) fn total_size(&self) -> DataSize {
        self.total_size
    }

    /// When the current batch began, i.e. the earliest send timestamp seen
    /// since the last reset. `None` while the batch is empty.
    pub(crate) fn started_at(&self) -> Option<Instant> {
        self.first_sent_at
    }

    /// Realized bitrate over the send timeline of the batch. `None` when
    /// the batch is empty or spans no measurable time.
    pub(crate) fn send_bitrate(&self) -> Option<Bitrate> {
        let first = self.first_sent_at?;
        let last = self.last_sent_at?;

        let span = last.duration_since(first);
        if span.is_zero() {
            return None;
        }

        Some(self.total_size / span)
    }

    /// Realized bitrate over the receive timeline of the batch. `None`
    /// when the batch is empty or spans no measurable time.
    pub(crate) fn receive_bitrate(&self) -> Option<Bitrate> {
        let first = self.first_received_at?;
        let last = self.last_received_at?;

        let span = last.duration_since(first);
        if span.is_zero() {
            return None;
        }

        Some(self.total_size / span)
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use super::*;

    #[test]
    fn first_packet_seeds_all_extremes() {
        let now = Instant::now();
        let mut result = CumulativeResult::default();

        result.add_packet(DataSize::bytes(1000), now, now + Duration::from_millis(40));

        assert_eq!(result.num_packets(), 1);
        assert_eq!(result.total_size(), DataSize::bytes(1000));
        assert_eq!(result.started_at(), Some(now));
        assert!(
            result.send_bitrate().is_none(),
            "a single packet spans no time and yields no bitrate"
        );
        assert!(result.receive_bitrate().is_none());
    }

    #[test]
    fn extremes_widen_independently() {
        let now = Instant::now();
        let mut result = CumulativeResult::default();

        // Received out of order relative to sending.
        result.add_packet(DataSize::bytes(1000), now, now + Duration::from_millis(80));
        result.add_packet(
            DataSize::bytes(1000),
            now + Duration::from_millis(20),
            now + Duration::from_millis(50),
        );

        assert_eq!(result.first_sent_at, Some(now));
        assert_eq!(result.last_sent_at, Some(now + Duration::from_millis(20)));
        assert_eq!(
            result.first_received_at,
            Some(now + Duration::from_millis(50))
        );
        assert_eq!(
            result.last_received_at,
            Some(now + Duration::from_millis(80))
        );
    }

    #[test]
    fn bitrates_over_known_spans() {
        let now = Instant::now();
        let mut result = CumulativeResult::default();

        result.add_packet(DataSize::bytes(1000), now, now + Duration::from_millis(50));
        result.add_packet(
            DataSize::bytes(1000),
            now + Duration::from_millis(100),
            now + Duration::from_millis(150),
        );

        // 2000 bytes over 100ms on both timelines.
        assert_eq!(result.send_bitrate().map(|b| b.as_u64()), Some(160_000));
        assert_eq!(result.receive_bitrate().map(|b| b.as_u64()), Some(160_000));
    }

    #[test]
    fn reset_clears_and_the_next_packet_reseeds() {
        let now = Instant::now();
        let mut result = CumulativeResult::default();

        result.add_packet(DataSize::bytes(1000), now, now + Duration::from_millis(40));
        result.reset();

        assert_eq!(result.num_packets(), 0);
        assert_eq!(result.total_size(), DataSize::ZERO);
        assert_eq!(result.started_at(), None);

        let later = now + Duration::from_secs(10);
        result.add_packet(DataSize::bytes(500), later, later + Duration::from_millis(40));

        assert_eq!(
            result.started_at(),
            Some(later),
            "a reseeded batch must not remember pre-reset extremes"
        );
        assert_eq!(result.num_packets(), 1);
    }
}
