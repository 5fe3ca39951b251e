//! Send-side bandwidth estimation for real-time media transport.
//!
//! This is a [Sans I/O][sansio] estimator: it is not doing any network talking and has
//! no internal threads or async tasks. It also never reads a clock. All operations
//! happen from calls of the public API, and every time-driven entry point takes the
//! current time as an [`Instant`][std::time::Instant] argument. Given the same sequence
//! of calls and timestamps the estimator behaves the same, which makes it deterministic
//! and replayable.
//!
//! The estimator tracks every outgoing packet ([`SentInfo`]), correlates packets
//! against transport-wide feedback reports ([`TransportFeedback`]) describing which
//! packets the remote end received and when, and derives the bitrate signals a sender
//! uses to decide how much it may transmit. It stays correct under packet loss,
//! reordering, feedback gaps and u16 sequence number wrap, which are its normal
//! operating regime rather than error cases: no public operation returns a `Result`,
//! anomalies are absorbed and logged.
//!
//! # Usage
//!
//! ```
//! use std::time::{Duration, Instant};
//! use sendside_bwe::{Bitrate, DataSize, PacketResult, SenderBandwidthEstimator};
//! use sendside_bwe::{SentInfo, TransportFeedback};
//!
//! let mut bwe = SenderBandwidthEstimator::new(Bitrate::kbps(600));
//!
//! let now = Instant::now();
//! bwe.transport_connected(now);
//! assert_eq!(bwe.available_bitrate(), Bitrate::kbps(600));
//!
//! // Register every outgoing packet carrying a transport-wide seq.
//! bwe.rtp_packet_sent(SentInfo {
//!     wide_seq: 1,
//!     size: DataSize::bytes(1200),
//!     sent_at: now,
//!     is_probation: false,
//! });
//!
//! // Later, a decoded feedback report tells us what arrived when.
//! let mut feedback = TransportFeedback::default();
//! feedback.results.push(PacketResult {
//!     wide_seq: 1,
//!     received_at: Some(now + Duration::from_millis(40)),
//! });
//!
//! bwe.receive_rtcp_transport_feedback(&feedback, now + Duration::from_millis(60));
//! ```
//!
//! # What the caller provides
//!
//! * A monotonic clock. The crate never calls [`Instant::now`][std::time::Instant::now]
//!   outside of tests.
//! * RTCP parsing. [`TransportFeedback`] is the already-decoded report, with the
//!   report's wire reference time mapped onto the caller's [`Instant`][std::time::Instant]
//!   timeline.
//! * A consumer for the published available bitrate, e.g. an encoder bitrate
//!   controller.
//!
//! [sansio]: https://sans-io.readthedocs.io

#![forbid(unsafe_code)]
#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod bandwidth;
mod cumulative;
mod estimator;
mod feedback;
mod ledger;
mod rate_counter;
mod seq;
mod trend;

pub use bandwidth::{Bitrate, DataSize};
pub use estimator::SenderBandwidthEstimator;
pub use feedback::{PacketResult, TransportFeedback};
pub use ledger::SentInfo;
