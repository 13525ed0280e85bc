//! Shared protocol types.

use crate::codec::Item;

/// The update mode sent with wholesale attribute writes and expression
/// updates. The service defines other modes; this client only issues this
/// one.
pub const UPDATE_MODE_CREATE_OR_REPLACE: &str = "CreateOrReplaceAttributes";

/// A record to append to a stream.
///
/// When `shard_id` is set the record goes to that shard; otherwise the
/// service picks one by hashing `partition_key`.
#[derive(Debug, Clone, Default)]
pub struct Record {
    /// The record payload.
    pub data: bytes::Bytes,
    /// Opaque client metadata stored alongside the payload.
    pub client_info: Option<bytes::Bytes>,
    /// Explicit target shard.
    pub shard_id: Option<u32>,
    /// Partition key for server-side shard selection.
    pub partition_key: Option<String>,
}

/// The reference point from which a shard read begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekPosition {
    /// The first record at or after a wall-clock time.
    Time {
        /// Seconds since the Unix epoch. Sub-second resolution is fixed at
        /// zero on the wire.
        seconds: u64,
    },
    /// The record with a given sequence number.
    Sequence {
        /// The starting sequence number.
        number: u64,
    },
    /// The tail of the shard (only records appended after the seek).
    Latest,
    /// The oldest retained record.
    Earliest,
}

impl SeekPosition {
    /// Returns the wire name of this seek type.
    #[must_use]
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Time { .. } => "TIME",
            Self::Sequence { .. } => "SEQUENCE",
            Self::Latest => "LATEST",
            Self::Earliest => "EARLIEST",
        }
    }
}

/// A segmented parallel scan slice: which segment of how many.
///
/// The wire contract requires both fields or neither; pairing them in one
/// type keeps half-specified scans unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentRange {
    /// Total number of segments the scan is split into.
    pub total: u32,
    /// Zero-based index of the segment this scan covers.
    pub index: u32,
}

/// What an item update carries: wholesale attributes or an update
/// expression. The two are mutually exclusive on the wire.
#[derive(Debug, Clone)]
pub enum UpdateKind {
    /// Replace-or-create the given attributes.
    Attributes(Item),
    /// Apply an opaque update expression.
    Expression(String),
}
