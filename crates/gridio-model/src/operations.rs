//! Remote function enum.
//!
//! Every dispatched call names its remote function in the
//! `X-v3io-function` request header; plain object reads/writes/deletes do
//! not carry the header at all.

use std::fmt;

/// All remote functions the client dispatches by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Set an object with function semantics (as opposed to a plain PUT).
    ObjectSet,
    /// Put (insert or replace) an item's attributes.
    PutItem,
    /// Update an item via an update expression.
    UpdateItem,
    /// Get a single item's attributes.
    GetItem,
    /// Scan items under a path, paginated by marker.
    GetItems,
    /// Create a stream with a fixed shard count.
    CreateStream,
    /// Append records to a stream.
    PutRecords,
    /// Read records from a shard location.
    GetRecords,
    /// Resolve a shard location from a seek position.
    SeekShard,
}

impl Operation {
    /// Returns the remote function name string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ObjectSet => "ObjectSet",
            Self::PutItem => "PutItem",
            Self::UpdateItem => "UpdateItem",
            Self::GetItem => "GetItem",
            Self::GetItems => "GetItems",
            Self::CreateStream => "CreateStream",
            Self::PutRecords => "PutRecords",
            Self::GetRecords => "GetRecords",
            Self::SeekShard => "SeekShard",
        }
    }

    /// Parse a function name string into an `Operation`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ObjectSet" => Some(Self::ObjectSet),
            "PutItem" => Some(Self::PutItem),
            "UpdateItem" => Some(Self::UpdateItem),
            "GetItem" => Some(Self::GetItem),
            "GetItems" => Some(Self::GetItems),
            "CreateStream" => Some(Self::CreateStream),
            "PutRecords" => Some(Self::PutRecords),
            "GetRecords" => Some(Self::GetRecords),
            "SeekShard" => Some(Self::SeekShard),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_roundtrip_all_function_names() {
        let ops = [
            Operation::ObjectSet,
            Operation::PutItem,
            Operation::UpdateItem,
            Operation::GetItem,
            Operation::GetItems,
            Operation::CreateStream,
            Operation::PutRecords,
            Operation::GetRecords,
            Operation::SeekShard,
        ];
        for op in ops {
            assert_eq!(Operation::from_name(op.as_str()), Some(op), "failed for {op}");
        }
    }

    #[test]
    fn test_should_reject_unknown_function_name() {
        assert_eq!(Operation::from_name("DeleteItem"), None);
        assert_eq!(Operation::from_name(""), None);
    }
}
