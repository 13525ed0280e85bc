//! Typed operation outputs.
//!
//! Stream outputs deserialize structurally from the response JSON
//! (`PascalCase` wire names). Item outputs are produced by the response
//! decoders, which run raw tagged attributes through the codec first.

use serde::Deserialize;

use crate::codec::Item;

/// Output of `GetItem`: the decoded attributes.
#[derive(Debug, Clone, Default)]
pub struct GetItemOutput {
    /// Attribute name to decoded value.
    pub item: Item,
}

/// A pagination protocol anomaly: a non-final page whose continuation
/// marker cannot make forward progress.
///
/// Commonly caused by a single item exceeding the service's response-size
/// ceiling. The page's items are still usable; a cursor must stop instead
/// of re-issuing the same marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanAnomaly {
    /// The marker the request was issued with.
    pub sent_marker: String,
    /// The marker the response came back with.
    pub returned_marker: String,
}

/// Output of one `GetItems` page.
#[derive(Debug, Clone, Default)]
pub struct GetItemsOutput {
    /// Decoded items in this page.
    pub items: Vec<Item>,
    /// Continuation marker for the next page.
    pub next_marker: String,
    /// Whether this page is the last one.
    pub last: bool,
    /// Set when the page violates the marker-progress invariant.
    pub anomaly: Option<ScanAnomaly>,
}

/// Per-record result inside a `PutRecords` response, in request order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PutRecordResult {
    /// Sequence number assigned to the record.
    pub sequence_number: u64,
    /// Shard the record landed in.
    #[serde(rename = "ShardId")]
    pub shard_id: u32,
    /// Zero on success; a service error code otherwise.
    pub error_code: i32,
    /// Error detail for failed records.
    pub error_message: Option<String>,
}

/// Output of `PutRecords`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PutRecordsOutput {
    /// Number of records the service rejected.
    pub failed_record_count: u64,
    /// Per-record results, ordered as the request's records were.
    pub records: Vec<PutRecordResult>,
}

/// Output of `SeekShard`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SeekShardOutput {
    /// Opaque shard location to pass to `GetRecords`.
    pub location: String,
}

/// A record read from a shard.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StreamRecord {
    /// Arrival time, seconds since the Unix epoch.
    pub arrival_time_sec: u64,
    /// Arrival time, sub-second nanoseconds.
    #[serde(rename = "ArrivalTimeNSec")]
    pub arrival_time_nsec: u64,
    /// Sequence number within the shard.
    pub sequence_number: u64,
    /// Client metadata stored with the record.
    #[serde(with = "crate::b64::option")]
    pub client_info: Option<bytes::Bytes>,
    /// Partition key the record was appended with.
    pub partition_key: Option<String>,
    /// The record payload.
    #[serde(with = "crate::b64")]
    pub data: bytes::Bytes,
}

/// Output of `GetRecords`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct GetRecordsOutput {
    /// Location to pass to the next `GetRecords` call.
    pub next_location: String,
    /// Milliseconds this reader lags behind the shard tail.
    #[serde(rename = "MSecBehindLatest")]
    pub msec_behind_latest: u64,
    /// Records this reader lags behind the shard tail.
    pub records_behind_latest: u64,
    /// The records read.
    pub records: Vec<StreamRecord>,
}
