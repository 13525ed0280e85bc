//! Request body structs.
//!
//! One explicit serde struct per remote function, `PascalCase` field naming
//! to match the wire protocol. Optional fields are omitted entirely when
//! absent rather than sent as null or empty, which several of the service's
//! handlers require.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::types::{Record, SeekPosition, UPDATE_MODE_CREATE_OR_REPLACE};

/// Body for `GetItem`.
///
/// The attribute list travels as a single comma-joined string, not a JSON
/// array.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemBody {
    /// Comma-joined attribute names to fetch.
    pub attributes_to_get: String,
}

/// Body for `GetItems`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetItemsBody {
    /// Comma-joined attribute names to fetch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_get: Option<String>,

    /// Opaque server-side filter expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_expression: Option<String>,

    /// Continuation marker from a previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<String>,

    /// Restrict the scan to one sharding-key partition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sharding_key: Option<String>,

    /// Maximum number of items per page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,

    /// Total segment count for a parallel scan. Always paired with
    /// `Segment`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_segment: Option<u32>,

    /// Zero-based segment index for a parallel scan.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<u32>,

    /// Inclusive sort-key range start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_key_range_start: Option<String>,

    /// Exclusive sort-key range end.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_key_range_end: Option<String>,
}

/// Body for `PutItem`, shared with the wholesale-attribute update path
/// (which sets `update_mode`).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutItemBody {
    /// The encoded item (tagged wire attributes).
    pub item: Map<String, Value>,

    /// Update mode, set only on the update-through-put path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_mode: Option<&'static str>,

    /// Opaque conditional-write predicate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<String>,
}

/// Body for the expression form of `UpdateItem`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateItemBody {
    /// The opaque update expression.
    pub update_expression: String,

    /// Always [`UPDATE_MODE_CREATE_OR_REPLACE`] for this client.
    pub update_mode: &'static str,

    /// Opaque conditional-write predicate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition_expression: Option<String>,
}

impl UpdateItemBody {
    /// Build the expression-update body.
    #[must_use]
    pub fn new(expression: impl Into<String>, condition: Option<String>) -> Self {
        Self {
            update_expression: expression.into(),
            update_mode: UPDATE_MODE_CREATE_OR_REPLACE,
            condition_expression: condition,
        }
    }
}

/// Body for `CreateStream`.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateStreamBody {
    /// Number of shards to create the stream with.
    pub shard_count: u32,
    /// Retention period, in hours.
    pub retention_period_hours: u32,
}

/// A single record inside a `PutRecords` body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct WireRecord {
    /// Base64-encoded payload.
    #[serde(with = "crate::b64")]
    pub data: bytes::Bytes,

    /// Base64-encoded client metadata.
    #[serde(with = "crate::b64::option", skip_serializing_if = "Option::is_none")]
    pub client_info: Option<bytes::Bytes>,

    /// Explicit target shard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shard_id: Option<u32>,

    /// Partition key for server-side shard selection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_key: Option<String>,
}

impl From<Record> for WireRecord {
    fn from(record: Record) -> Self {
        Self {
            data: record.data,
            client_info: record.client_info,
            shard_id: record.shard_id,
            partition_key: record.partition_key,
        }
    }
}

/// Body for `PutRecords`. Record order is preserved; the response reports
/// per-record results in the same order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct PutRecordsBody {
    /// The records to append, in delivery order.
    pub records: Vec<WireRecord>,
}

/// Body for `SeekShard`.
///
/// `Type` selects which of the optional fields travel: SEQUENCE carries
/// `StartingSequenceNumber`; TIME carries `TimestampSec` plus a
/// `TimestampNSec` fixed at zero; LATEST and EARLIEST carry nothing else.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SeekShardBody {
    /// The seek type name.
    #[serde(rename = "Type")]
    pub seek_type: &'static str,

    /// Starting sequence number (SEQUENCE only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_sequence_number: Option<u64>,

    /// Seconds since the Unix epoch (TIME only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp_sec: Option<u64>,

    /// Sub-second field, always zero (TIME only).
    #[serde(rename = "TimestampNSec", skip_serializing_if = "Option::is_none")]
    pub timestamp_nsec: Option<u64>,
}

impl From<SeekPosition> for SeekShardBody {
    fn from(position: SeekPosition) -> Self {
        let mut body = Self {
            seek_type: position.wire_name(),
            starting_sequence_number: None,
            timestamp_sec: None,
            timestamp_nsec: None,
        };
        match position {
            SeekPosition::Time { seconds } => {
                body.timestamp_sec = Some(seconds);
                body.timestamp_nsec = Some(0);
            }
            SeekPosition::Sequence { number } => {
                body.starting_sequence_number = Some(number);
            }
            SeekPosition::Latest | SeekPosition::Earliest => {}
        }
        body
    }
}

/// Body for `GetRecords`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GetRecordsBody {
    /// Shard location to read from, as returned by `SeekShard` or a
    /// previous `GetRecords`.
    pub location: String,
    /// Maximum number of records to return.
    pub limit: u64,
}
