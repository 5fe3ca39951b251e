use std::fmt;
use std::ops::Deref;

/// A 64 bit extended sequence number. Contrary to the 16 bit wire counter
/// this is monotonically increasing, which makes ordering and age
/// comparisons trivially wrap-safe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct SeqNo(u64);

impl Deref for SeqNo {
    type Target = u64;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<u64> for SeqNo {
    fn from(v: u64) -> Self {
        SeqNo(v)
    }
}

impl fmt::Display for SeqNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// "extend" a 16 bit sequence number into a 64 bit by using the knowledge
/// of the previous such sequence number.
pub(crate) fn extend_u16(prev_ext_seq: Option<u64>, seq: u16) -> u64 {
    const MAX: u64 = 2_u64.pow(16); // 65_536
    const HALF: u64 = MAX / 2; // 32_768
    const BITS: usize = 16;
    const ROC_MASK: i64 = (u64::MAX >> BITS) as i64;

    // We define the index of the SRTP packet corresponding to a given
    // ROC and RTP sequence number to be the 48-bit quantity
    //       i = 2^16 * ROC + SEQ.
    //
    // https://tools.ietf.org/html/rfc3711#appendix-A
    //

    let seq = seq as u64;

    if prev_ext_seq.is_none() {
        // No wrap-around so far.
        return seq;
    }

    let prev_index = prev_ext_seq.unwrap();
    let roc = (prev_index >> BITS) as i64; // how many wrap-arounds.
    let prev_seq = prev_index & (MAX - 1); // 0xffff

    let v = if prev_seq < HALF {
        if seq > HALF + prev_seq {
            (roc - 1) & ROC_MASK
        } else {
            roc
        }
    } else if prev_seq > seq + HALF {
        (roc + 1) & ROC_MASK
    } else {
        roc
    };

    if v < 0 {
        return 0;
    }

    (v as u64) * MAX + seq
}
