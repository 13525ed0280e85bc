//! Response envelope and per-operation decoders.
//!
//! Decoders turn raw response bytes into typed outputs. Item-shaped
//! payloads pass through the attribute codec with the container's decode
//! policy; stream payloads deserialize structurally. A malformed body is a
//! [`ClientError::MalformedResponse`] — the request already happened and is
//! never retried here.

use bytes::Bytes;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use gridio_model::output::{GetItemOutput, GetItemsOutput, ScanAnomaly};
use gridio_model::{DecodeMode, RawItem, decode_item};

use crate::error::ClientError;

/// A call's result: the raw response body plus the typed output decoded
/// from it. Dropping the envelope releases the body.
#[derive(Debug, Clone)]
pub struct Response<T> {
    /// Raw response body bytes, as received.
    pub body: Bytes,
    /// The typed output decoded from `body`.
    pub output: T,
}

impl<T> Response<T> {
    /// Consume the envelope, keeping only the typed output.
    #[must_use]
    pub fn into_output(self) -> T {
        self.output
    }
}

/// Deserialize a structural JSON response body.
pub(crate) fn decode_json<T: DeserializeOwned>(
    operation: &'static str,
    body: &[u8],
) -> Result<T, ClientError> {
    serde_json::from_slice(body).map_err(|source| ClientError::malformed(operation, source))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct RawGetItemResponse {
    item: RawItem,
}

pub(crate) fn decode_get_item(body: &[u8], mode: DecodeMode) -> Result<GetItemOutput, ClientError> {
    let raw: RawGetItemResponse = decode_json("GetItem", body)?;
    let item = decode_item(&raw.item, mode).map_err(|source| ClientError::malformed("GetItem", source))?;
    Ok(GetItemOutput { item })
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct RawGetItemsResponse {
    items: Vec<RawItem>,
    next_marker: String,
    last_item_included: String,
}

/// Decode one `GetItems` page.
///
/// `sent_marker` is the marker the request was issued with; a non-final
/// page whose `NextMarker` is empty or unchanged cannot make forward
/// progress and is flagged as a [`ScanAnomaly`] (commonly a single item
/// exceeding the service's response-size ceiling). The page itself is still
/// returned.
pub(crate) fn decode_get_items(
    body: &[u8],
    mode: DecodeMode,
    sent_marker: &str,
) -> Result<GetItemsOutput, ClientError> {
    let raw: RawGetItemsResponse = decode_json("GetItems", body)?;

    let last = raw.last_item_included == "TRUE";
    let anomaly = if !last && (raw.next_marker.is_empty() || raw.next_marker == sent_marker) {
        tracing::warn!(
            next_marker = %raw.next_marker,
            sent_marker = %sent_marker,
            "non-final GetItems page cannot advance; likely an item larger than the response size limit"
        );
        Some(ScanAnomaly {
            sent_marker: sent_marker.to_owned(),
            returned_marker: raw.next_marker.clone(),
        })
    } else {
        None
    };

    let mut items = Vec::with_capacity(raw.items.len());
    for raw_item in &raw.items {
        let item =
            decode_item(raw_item, mode).map_err(|source| ClientError::malformed("GetItems", source))?;
        items.push(item);
    }

    Ok(GetItemsOutput {
        items,
        next_marker: raw.next_marker,
        last,
        anomaly,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridio_model::AttributeValue;

    #[test]
    fn test_should_decode_get_item_response() {
        let body = br#"{"Item": {"age": {"N": "30"}, "name": {"S": "foo"}}}"#;
        let output = decode_get_item(body, DecodeMode::Lenient).unwrap();
        assert_eq!(output.item["age"], AttributeValue::Int(30));
        assert_eq!(output.item["name"], AttributeValue::Str("foo".to_owned()));
    }

    #[test]
    fn test_should_fail_on_unparseable_get_item_body() {
        let err = decode_get_item(b"not json", DecodeMode::Lenient).unwrap_err();
        assert!(matches!(
            err,
            ClientError::MalformedResponse { operation, .. } if operation == "GetItem"
        ));
    }

    #[test]
    fn test_should_decode_final_get_items_page() {
        let body = br#"{
            "Items": [{"age": {"N": "1"}}, {"age": {"N": "2"}}],
            "NextMarker": "",
            "LastItemIncluded": "TRUE"
        }"#;
        let output = decode_get_items(body, DecodeMode::Lenient, "").unwrap();
        assert!(output.last);
        assert!(output.anomaly.is_none());
        assert_eq!(output.items.len(), 2);
    }

    #[test]
    fn test_should_flag_non_advancing_marker_as_anomaly() {
        let body = br#"{
            "Items": [{"age": {"N": "1"}}],
            "NextMarker": "m1",
            "LastItemIncluded": "FALSE"
        }"#;
        let output = decode_get_items(body, DecodeMode::Lenient, "m1").unwrap();
        assert!(!output.last);
        let anomaly = output.anomaly.expect("anomaly expected");
        assert_eq!(anomaly.sent_marker, "m1");
        assert_eq!(anomaly.returned_marker, "m1");
        // The partial page is still delivered.
        assert_eq!(output.items.len(), 1);
    }

    #[test]
    fn test_should_flag_empty_marker_on_non_final_page() {
        let body = br#"{"Items": [], "NextMarker": "", "LastItemIncluded": "FALSE"}"#;
        let output = decode_get_items(body, DecodeMode::Lenient, "m0").unwrap();
        assert!(output.anomaly.is_some());
    }

    #[test]
    fn test_should_accept_advancing_marker() {
        let body = br#"{"Items": [], "NextMarker": "m2", "LastItemIncluded": "FALSE"}"#;
        let output = decode_get_items(body, DecodeMode::Lenient, "m1").unwrap();
        assert!(output.anomaly.is_none());
        assert_eq!(output.next_marker, "m2");
    }

    #[test]
    fn test_should_propagate_item_decode_failures() {
        let body = br#"{
            "Items": [{"bad": {"N": "zzz"}}],
            "NextMarker": "",
            "LastItemIncluded": "TRUE"
        }"#;
        let err = decode_get_items(body, DecodeMode::Lenient, "").unwrap_err();
        assert!(matches!(
            err,
            ClientError::MalformedResponse { operation, .. } if operation == "GetItems"
        ));
    }
}
