use std::time::{Duration, Instant};

use crate::bandwidth::Bitrate;
use crate::cumulative::CumulativeResult;
use crate::feedback::TransportFeedback;
use crate::ledger::{SentInfo, SentLedger};
use crate::rate_counter::RateCounter;
use crate::trend::TrendSmoother;

const SEND_RATE_WINDOW: Duration = Duration::from_millis(1000);
const SEND_RATE_TREND_SMOOTHING: f64 = 0.15;

/// How many sequence numbers a sent packet stays resolvable for.
const MAX_SENT_INFO_AGE: u64 = 2000;

/// A feedback batch younger than this, or smaller than the packet
/// minimum, is carried over to the next report instead of evaluated.
const EVALUATION_MIN_ELAPSED: Duration = Duration::from_millis(100);
const EVALUATION_MIN_PACKETS: u32 = 20;

/// A batch this old at feedback time is dropped as stale.
const CUMULATIVE_MAX_AGE: Duration = Duration::from_millis(5000);

/// Minimum spacing of available-bitrate change events. Not consulted
/// until the bitrate decision below drives events.
#[allow(dead_code)]
const AVAILABLE_BITRATE_EVENT_INTERVAL: Duration = Duration::from_millis(2000);

const DEFAULT_RTT: Duration = Duration::from_millis(100);

/// Send-side bandwidth estimator fed by transport-wide feedback.
///
/// Tracks every outgoing packet, correlates it against the feedback
/// reports describing which packets arrived and when, and derives the
/// bitrate signals a sender uses to decide how much it may transmit.
///
/// All time is passed in from the outside; the estimator itself never
/// reads a clock and performs no I/O. Every operation runs to completion
/// on the calling thread.
#[derive(Debug)]
pub struct SenderBandwidthEstimator {
    initial_available_bitrate: Bitrate,
    available_bitrate: Bitrate,
    /// Latest RTT reported by the caller. Input to the bitrate decision
    /// once that is built out.
    #[allow(dead_code)]
    rtt: Duration,
    /// When the last available-bitrate event fired. Throttles event
    /// emission once the bitrate decision drives events.
    #[allow(dead_code)]
    last_available_bitrate_event_at: Option<Instant>,
    sent_ledger: SentLedger,
    send_rate: RateCounter,
    send_rate_trend: TrendSmoother,
    cumulative_result: CumulativeResult,
}

impl SenderBandwidthEstimator {
    /// Create an estimator that publishes `initial_available_bitrate`
    /// once the transport connects.
    pub fn new(initial_available_bitrate: Bitrate) -> Self {
        SenderBandwidthEstimator {
            initial_available_bitrate,
            available_bitrate: Bitrate::ZERO,
            rtt: DEFAULT_RTT,
            last_available_bitrate_event_at: None,
            sent_ledger: SentLedger::new(MAX_SENT_INFO_AGE),
            send_rate: RateCounter::new(SEND_RATE_WINDOW),
            send_rate_trend: TrendSmoother::new(SEND_RATE_TREND_SMOOTHING),
            cumulative_result: CumulativeResult::default(),
        }
    }

    /// The transport is connected (or reconnected). Re-arms the published
    /// available bitrate with the initial value.
    pub fn transport_connected(&mut self, now: Instant) {
        self.available_bitrate = self.initial_available_bitrate;
        self.last_available_bitrate_event_at = Some(now);

        debug!(
            "Transport connected, available bitrate {}",
            self.available_bitrate
        );
    }

    /// The transport is gone. Quiesces the estimator without destroying
    /// it: the published bitrate drops to zero and pending packet state
    /// is discarded.
    pub fn transport_disconnected(&mut self) {
        self.available_bitrate = Bitrate::ZERO;

        debug!(
            "Transport disconnected, dropping {} sent packet records",
            self.sent_ledger.len()
        );

        self.sent_ledger.clear();
        self.cumulative_result.reset();
    }

    /// Register an outgoing packet. Must be called once per packet
    /// carrying a transport-wide sequence number, in send order.
    ///
    /// `sent_info.sent_at` doubles as the current time for this path.
    pub fn rtp_packet_sent(&mut self, sent_info: SentInfo) {
        let now = sent_info.sent_at;
        let size = sent_info.size;
        let wide_seq = sent_info.wide_seq;

        self.sent_ledger.insert(sent_info);

        self.send_rate.update(size, now);

        let send_rate = self.send_rate.rate(now);
        self.send_rate_trend.update(send_rate, now);

        trace!("Sent packet {} ({}), send rate {}", wide_seq, size, send_rate);
    }

    /// Process a transport-wide feedback report.
    ///
    /// Results are matched against the sent-packet ledger and folded into
    /// the current batch. Once the batch is both old enough and large
    /// enough, it is evaluated and cleared; otherwise it carries over to
    /// the next report.
    pub fn receive_rtcp_transport_feedback(&mut self, feedback: &TransportFeedback, now: Instant) {
        // Batch age is read once up front. The packets added below must
        // not move the evaluation gate for this same report.
        let elapsed = self
            .cumulative_result
            .started_at()
            .map(|at| now.saturating_duration_since(at));

        if let Some(elapsed) = elapsed {
            if elapsed > CUMULATIVE_MAX_AGE {
                debug!("Dropping stale feedback batch ({:?} old)", elapsed);
                self.cumulative_result.reset();
            }
        }

        for result in &feedback.results {
            let Some(received_at) = result.received_at else {
                continue;
            };

            let Some(info) = self.sent_ledger.get(result.wide_seq) else {
                warn!(
                    "Feedback for wide seq {} not present in sent infos",
                    result.wide_seq
                );
                continue;
            };

            self.cumulative_result
                .add_packet(info.size, info.sent_at, received_at);
        }

        let too_early = match elapsed {
            Some(elapsed) => elapsed < EVALUATION_MIN_ELAPSED,
            // An empty batch has no age for the threshold to undercut.
            None => false,
        };

        if too_early || self.cumulative_result.num_packets() < EVALUATION_MIN_PACKETS {
            return;
        }

        let send_bitrate = self
            .cumulative_result
            .send_bitrate()
            .unwrap_or(Bitrate::ZERO);
        let receive_bitrate = self
            .cumulative_result
            .receive_bitrate()
            .unwrap_or(Bitrate::ZERO);
        let current_send_rate = self.send_rate.rate(now);
        let send_rate_trend = self.send_rate_trend.value();

        debug!(
            "Feedback batch: {} packets / {}, send {}, receive {}, current send rate {}, trend {}",
            self.cumulative_result.num_packets(),
            self.cumulative_result.total_size(),
            send_bitrate,
            receive_bitrate,
            current_send_rate,
            send_rate_trend
        );

        // TODO: Derive an available bitrate update from these figures and
        // emit the change event, throttled by
        // AVAILABLE_BITRATE_EVENT_INTERVAL.

        self.cumulative_result.reset();
    }

    /// Update the round-trip time estimate. The value replaces the
    /// previous one outright.
    pub fn update_rtt(&mut self, rtt: Duration) {
        self.rtt = rtt;
    }

    /// The currently published available bitrate. Zero unless the
    /// transport is connected.
    pub fn available_bitrate(&self) -> Bitrate {
        self.available_bitrate
    }

    /// Push the next available-bitrate change event out by restarting its
    /// spacing interval at `now`.
    pub fn reschedule_next_available_bitrate_event(&mut self, now: Instant) {
        self.last_available_bitrate_event_at = Some(now);
    }
}
