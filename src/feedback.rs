use std::time::Instant;

/// The per-packet outcome carried by a transport-wide feedback report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacketResult {
    /// Transport-wide sequence number as it appeared on the wire.
    pub wide_seq: u16,
    /// When the remote end received the packet, on the local monotonic
    /// timeline. `None` when the report marks the packet as not received.
    ///
    /// Mapping the report's wire reference time onto the local timeline is
    /// the RTCP parser's job.
    pub received_at: Option<Instant>,
}

impl PacketResult {
    /// Whether the remote end reported this packet as received.
    pub fn received(&self) -> bool {
        self.received_at.is_some()
    }
}

/// A decoded transport-wide feedback report.
///
/// Holds one [`PacketResult`] per packet the report covers, in the order
/// the report listed them. Built up by the RTCP parser and handed to
/// [`SenderBandwidthEstimator::receive_rtcp_transport_feedback`][recv].
///
/// [recv]: crate::SenderBandwidthEstimator::receive_rtcp_transport_feedback
#[derive(Debug, Clone, Default)]
pub struct TransportFeedback {
    /// The per-packet results, in report order.
    pub results: Vec<PacketResult>,
}
