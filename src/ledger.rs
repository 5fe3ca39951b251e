use std::collections::BTreeMap;
use std::time::Instant;

use crate::bandwidth::DataSize;
use crate::seq::{extend_u16, SeqNo};

/// Metadata for one sent packet, registered via
/// [`SenderBandwidthEstimator::rtp_packet_sent`][crate::SenderBandwidthEstimator::rtp_packet_sent].
///
/// The caller populates the record in full. No field is validated.
#[derive(Debug, Clone, Copy)]
pub struct SentInfo {
    /// Transport-wide sequence number as written on the wire.
    pub wide_seq: u16,
    /// Size on the wire, including any framing that counts toward the
    /// transmission rate.
    pub size: DataSize,
    /// When the packet was handed to the transport.
    pub sent_at: Instant,
    /// Whether the packet was sent purely to probe for capacity rather
    /// than carrying media.
    pub is_probation: bool,
}

/// Recently sent packets, ordered by extended sequence number.
///
/// Retention is bounded by sequence number age, not time: an insert evicts
/// everything more than `max_age` sequence numbers behind it. Feedback
/// referencing evicted numbers resolves to nothing.
#[derive(Debug)]
pub(crate) struct SentLedger {
    max_age: u64,
    /// Highest extended seq inserted so far. Reference for extending the
    /// 16 bit wire numbers in subsequent inserts and lookups.
    last_seq: Option<SeqNo>,
    entries: BTreeMap<SeqNo, SentInfo>,
}

impl SentLedger {
    pub(crate) fn new(max_age: u64) -> Self {
        SentLedger {
            max_age,
            last_seq: None,
            entries: BTreeMap::new(),
        }
    }

    /// Record a sent packet. A packet re-sent under the same wide seq
    /// replaces the previous record.
    pub(crate) fn insert(&mut self, info: SentInfo) {
        let seq: SeqNo = extend_u16(self.last_seq.map(|s| *s), info.wide_seq).into();

        // Evict entries that have aged out of the window before inserting.
        let floor: SeqNo = (*seq).saturating_sub(self.max_age - 1).into();
        self.entries = self.entries.split_off(&floor);

        self.entries.insert(seq, info);
        self.last_seq = Some(self.last_seq.map_or(seq, |l| l.max(seq)));
    }

    /// Look up a wire sequence number from a feedback report.
    pub(crate) fn get(&self, wide_seq: u16) -> Option<&SentInfo> {
        let seq: SeqNo = extend_u16(self.last_seq.map(|s| *s), wide_seq).into();

        self.entries.get(&seq)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.last_seq = None;
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
