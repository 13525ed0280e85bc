//! Caller-facing input types, one per container operation.
//!
//! Paths are relative to the container root. Optional fields that are `None`
//! are omitted from the wire body entirely.

use std::collections::HashMap;

use crate::codec::Item;
use crate::types::{Record, SeekPosition, SegmentRange, UpdateKind};

/// Input for listing objects under the container.
#[derive(Debug, Clone, Default)]
pub struct ListBucketInput {
    /// Key prefix to filter by; empty lists the whole container.
    pub path: String,
}

/// Input for reading a plain object.
#[derive(Debug, Clone, Default)]
pub struct GetObjectInput {
    /// Object path.
    pub path: String,
}

/// Input for writing a plain object.
#[derive(Debug, Clone, Default)]
pub struct PutObjectInput {
    /// Object path.
    pub path: String,
    /// Raw object body, passed through untouched.
    pub body: bytes::Bytes,
}

/// Input for the `ObjectSet` function.
#[derive(Debug, Clone, Default)]
pub struct SetObjectInput {
    /// Object path.
    pub path: String,
    /// Raw function body, passed through untouched.
    pub body: bytes::Bytes,
}

/// Input for deleting a plain object.
#[derive(Debug, Clone, Default)]
pub struct DeleteObjectInput {
    /// Object path.
    pub path: String,
}

/// Input for `GetItem`.
#[derive(Debug, Clone, Default)]
pub struct GetItemInput {
    /// Item path.
    pub path: String,
    /// Names of the attributes to fetch.
    pub attribute_names: Vec<String>,
}

/// Input for `GetItems`. Also the unit of state a scan cursor advances.
#[derive(Debug, Clone, Default)]
pub struct GetItemsInput {
    /// Directory path to scan.
    pub path: String,
    /// Names of the attributes to fetch; empty omits the field.
    pub attribute_names: Vec<String>,
    /// Opaque server-side filter expression.
    pub filter: Option<String>,
    /// Continuation marker; `None` starts a fresh scan.
    pub marker: Option<String>,
    /// Restrict the scan to one sharding-key partition.
    pub sharding_key: Option<String>,
    /// Maximum number of items per page.
    pub limit: Option<u64>,
    /// Segmented parallel-scan slice.
    pub segments: Option<SegmentRange>,
    /// Inclusive sort-key range start.
    pub sort_key_range_start: Option<String>,
    /// Exclusive sort-key range end.
    pub sort_key_range_end: Option<String>,
}

/// Input for `PutItem`.
#[derive(Debug, Clone, Default)]
pub struct PutItemInput {
    /// Item path.
    pub path: String,
    /// The attributes to write.
    pub attributes: Item,
    /// Opaque conditional-write predicate.
    pub condition: Option<String>,
}

/// Input for the bulk `PutItems` operation.
///
/// Each entry becomes an independent `PutItem` at `path/<key>`; failures are
/// collected per key without aborting the batch.
#[derive(Debug, Clone, Default)]
pub struct PutItemsInput {
    /// Directory path the items live under.
    pub path: String,
    /// Item key to attributes.
    pub items: HashMap<String, Item>,
    /// Conditional-write predicate applied to every item.
    pub condition: Option<String>,
}

/// Input for `UpdateItem`.
#[derive(Debug, Clone)]
pub struct UpdateItemInput {
    /// Item path.
    pub path: String,
    /// Wholesale attributes or an update expression.
    pub update: UpdateKind,
    /// Opaque conditional-write predicate.
    pub condition: Option<String>,
}

/// Input for `CreateStream`.
#[derive(Debug, Clone, Default)]
pub struct CreateStreamInput {
    /// Stream path.
    pub path: String,
    /// Number of shards.
    pub shard_count: u32,
    /// Retention period, in hours.
    pub retention_period_hours: u32,
}

/// Input for the compound stream-delete operation.
#[derive(Debug, Clone, Default)]
pub struct DeleteStreamInput {
    /// Stream path.
    pub path: String,
}

/// Input for `PutRecords`.
#[derive(Debug, Clone, Default)]
pub struct PutRecordsInput {
    /// Stream path.
    pub path: String,
    /// Records to append, in delivery order.
    pub records: Vec<Record>,
}

/// Input for `SeekShard`.
#[derive(Debug, Clone)]
pub struct SeekShardInput {
    /// Shard path (stream path plus shard id).
    pub path: String,
    /// Where to start reading from.
    pub position: SeekPosition,
}

/// Input for `GetRecords`.
#[derive(Debug, Clone, Default)]
pub struct GetRecordsInput {
    /// Shard path (stream path plus shard id).
    pub path: String,
    /// Location returned by `SeekShard` or a previous `GetRecords`.
    pub location: String,
    /// Maximum number of records to return.
    pub limit: u64,
}
