//! Request builders.
//!
//! One builder per operation, each producing the method, container-relative
//! path, fixed header set, and serialized body for the transport to
//! execute. Dispatched functions carry the `Content-Type` and
//! `X-v3io-function` header pair; plain object operations carry no headers
//! at all. Header sets are operation constants, never caller-configurable.

use bytes::Bytes;
use http::{HeaderMap, HeaderValue, Method, header};
use serde::Serialize;

use gridio_model::body::{
    CreateStreamBody, GetItemBody, GetItemsBody, GetRecordsBody, PutItemBody, PutRecordsBody,
    SeekShardBody, UpdateItemBody, WireRecord,
};
use gridio_model::input::{
    CreateStreamInput, DeleteObjectInput, GetItemInput, GetItemsInput, GetObjectInput,
    GetRecordsInput, PutObjectInput, PutRecordsInput, SeekShardInput, SetObjectInput,
};
use gridio_model::types::UPDATE_MODE_CREATE_OR_REPLACE;
use gridio_model::{Item, Operation, encode_item};

use crate::error::ClientError;

/// The function-dispatch header name.
pub(crate) const FUNCTION_HEADER: &str = "x-v3io-function";

/// An assembled request, relative to a container root.
#[derive(Debug, Clone)]
pub(crate) struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// The fixed header pair for a dispatched function.
fn dispatch_headers(operation: Operation) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(2);
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(FUNCTION_HEADER, HeaderValue::from_static(operation.as_str()));
    headers
}

fn json_body<T: Serialize>(operation: Operation, body: &T) -> Result<Bytes, ClientError> {
    serde_json::to_vec(body)
        .map(Bytes::from)
        .map_err(|source| ClientError::serialize(operation.as_str(), source))
}

pub(crate) fn get_object(input: &GetObjectInput) -> ApiRequest {
    ApiRequest {
        method: Method::GET,
        path: input.path.clone(),
        headers: HeaderMap::new(),
        body: Bytes::new(),
    }
}

pub(crate) fn put_object(input: &PutObjectInput) -> ApiRequest {
    ApiRequest {
        method: Method::PUT,
        path: input.path.clone(),
        headers: HeaderMap::new(),
        body: input.body.clone(),
    }
}

pub(crate) fn delete_object(input: &DeleteObjectInput) -> ApiRequest {
    ApiRequest {
        method: Method::DELETE,
        path: input.path.clone(),
        headers: HeaderMap::new(),
        body: Bytes::new(),
    }
}

pub(crate) fn set_object(input: &SetObjectInput) -> ApiRequest {
    ApiRequest {
        method: Method::PUT,
        path: input.path.clone(),
        headers: dispatch_headers(Operation::ObjectSet),
        body: input.body.clone(),
    }
}

pub(crate) fn get_item(input: &GetItemInput) -> Result<ApiRequest, ClientError> {
    let body = GetItemBody {
        attributes_to_get: input.attribute_names.join(","),
    };
    Ok(ApiRequest {
        method: Method::PUT,
        path: input.path.clone(),
        headers: dispatch_headers(Operation::GetItem),
        body: json_body(Operation::GetItem, &body)?,
    })
}

pub(crate) fn get_items(input: &GetItemsInput) -> Result<ApiRequest, ClientError> {
    let body = GetItemsBody {
        attributes_to_get: if input.attribute_names.is_empty() {
            None
        } else {
            Some(input.attribute_names.join(","))
        },
        filter_expression: input.filter.clone(),
        marker: input.marker.clone(),
        sharding_key: input.sharding_key.clone(),
        limit: input.limit,
        total_segment: input.segments.map(|s| s.total),
        segment: input.segments.map(|s| s.index),
        sort_key_range_start: input.sort_key_range_start.clone(),
        sort_key_range_end: input.sort_key_range_end.clone(),
    };
    Ok(ApiRequest {
        method: Method::PUT,
        path: input.path.clone(),
        headers: dispatch_headers(Operation::GetItems),
        body: json_body(Operation::GetItems, &body)?,
    })
}

/// Build a `PutItem` request. The update-through-put path passes
/// `Some(update_mode)`; plain puts pass `None`.
pub(crate) fn put_item(
    path: &str,
    attributes: &Item,
    condition: Option<&str>,
    update_mode: Option<&'static str>,
) -> Result<ApiRequest, ClientError> {
    let body = PutItemBody {
        item: encode_item(attributes)?,
        update_mode,
        condition_expression: condition.map(str::to_owned),
    };
    Ok(ApiRequest {
        method: Method::PUT,
        path: path.to_owned(),
        headers: dispatch_headers(Operation::PutItem),
        body: json_body(Operation::PutItem, &body)?,
    })
}

pub(crate) fn update_item_expression(
    path: &str,
    expression: &str,
    condition: Option<&str>,
) -> Result<ApiRequest, ClientError> {
    let body = UpdateItemBody::new(expression, condition.map(str::to_owned));
    Ok(ApiRequest {
        method: Method::POST,
        path: path.to_owned(),
        headers: dispatch_headers(Operation::UpdateItem),
        body: json_body(Operation::UpdateItem, &body)?,
    })
}

pub(crate) fn create_stream(input: &CreateStreamInput) -> Result<ApiRequest, ClientError> {
    let body = CreateStreamBody {
        shard_count: input.shard_count,
        retention_period_hours: input.retention_period_hours,
    };
    Ok(ApiRequest {
        method: Method::POST,
        path: input.path.clone(),
        headers: dispatch_headers(Operation::CreateStream),
        body: json_body(Operation::CreateStream, &body)?,
    })
}

pub(crate) fn put_records(input: PutRecordsInput) -> Result<ApiRequest, ClientError> {
    let body = PutRecordsBody {
        records: input.records.into_iter().map(WireRecord::from).collect(),
    };
    Ok(ApiRequest {
        method: Method::POST,
        path: input.path,
        headers: dispatch_headers(Operation::PutRecords),
        body: json_body(Operation::PutRecords, &body)?,
    })
}

pub(crate) fn seek_shard(input: &SeekShardInput) -> Result<ApiRequest, ClientError> {
    let body = SeekShardBody::from(input.position);
    Ok(ApiRequest {
        method: Method::POST,
        path: input.path.clone(),
        headers: dispatch_headers(Operation::SeekShard),
        body: json_body(Operation::SeekShard, &body)?,
    })
}

pub(crate) fn get_records(input: &GetRecordsInput) -> Result<ApiRequest, ClientError> {
    let body = GetRecordsBody {
        location: input.location.clone(),
        limit: input.limit,
    };
    Ok(ApiRequest {
        method: Method::POST,
        path: input.path.clone(),
        headers: dispatch_headers(Operation::GetRecords),
        body: json_body(Operation::GetRecords, &body)?,
    })
}

/// Re-exported so the wholesale-update path in the container can name the
/// mode it injects.
pub(crate) const UPDATE_MODE: &str = UPDATE_MODE_CREATE_OR_REPLACE;

#[cfg(test)]
mod tests {
    use super::*;
    use gridio_model::AttributeValue;
    use gridio_model::types::{SeekPosition, SegmentRange};

    fn header(request: &ApiRequest, name: &str) -> Option<String> {
        request
            .headers
            .get(name)
            .map(|v| v.to_str().unwrap().to_owned())
    }

    #[test]
    fn test_should_dispatch_get_item_as_put_with_function_header() {
        let request = get_item(&GetItemInput {
            path: "emd/item0".to_owned(),
            attribute_names: vec!["age".to_owned(), "name".to_owned()],
        })
        .unwrap();

        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.path, "emd/item0");
        assert_eq!(header(&request, "content-type").as_deref(), Some("application/json"));
        assert_eq!(header(&request, FUNCTION_HEADER).as_deref(), Some("GetItem"));
        assert_eq!(
            request.body.as_ref(),
            br#"{"AttributesToGet":"age,name"}"#
        );
    }

    #[test]
    fn test_should_omit_unset_get_items_fields() {
        let request = get_items(&GetItemsInput {
            path: "emd/".to_owned(),
            attribute_names: vec!["*".to_owned()],
            limit: Some(10),
            ..GetItemsInput::default()
        })
        .unwrap();

        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["AttributesToGet"], "*");
        assert_eq!(body["Limit"], 10);
        assert!(body.get("Marker").is_none());
        assert!(body.get("FilterExpression").is_none());
        assert!(body.get("TotalSegment").is_none());
    }

    #[test]
    fn test_should_send_both_segment_fields_together() {
        let request = get_items(&GetItemsInput {
            path: "emd/".to_owned(),
            segments: Some(SegmentRange { total: 4, index: 1 }),
            ..GetItemsInput::default()
        })
        .unwrap();

        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["TotalSegment"], 4);
        assert_eq!(body["Segment"], 1);
    }

    #[test]
    fn test_should_wrap_encoded_item_in_put_item_body() {
        let mut item = Item::new();
        item.insert("age".to_owned(), AttributeValue::Int(30));

        let request = put_item("emd/item0", &item, Some("exists(age)"), None).unwrap();

        assert_eq!(request.method, Method::PUT);
        assert_eq!(header(&request, FUNCTION_HEADER).as_deref(), Some("PutItem"));
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["Item"]["age"]["N"], "30");
        assert_eq!(body["ConditionExpression"], "exists(age)");
        assert!(body.get("UpdateMode").is_none());
    }

    #[test]
    fn test_should_inject_update_mode_on_wholesale_update() {
        let mut item = Item::new();
        item.insert("age".to_owned(), AttributeValue::Int(31));

        let request = put_item("emd/item0", &item, None, Some(UPDATE_MODE)).unwrap();

        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["UpdateMode"], "CreateOrReplaceAttributes");
        assert!(body.get("ConditionExpression").is_none());
    }

    #[test]
    fn test_should_post_expression_update() {
        let request = update_item_expression("emd/item0", "SET a=1", None).unwrap();

        assert_eq!(request.method, Method::POST);
        assert_eq!(header(&request, FUNCTION_HEADER).as_deref(), Some("UpdateItem"));
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["UpdateExpression"], "SET a=1");
        assert_eq!(body["UpdateMode"], "CreateOrReplaceAttributes");
    }

    #[test]
    fn test_should_build_seek_shard_time_body() {
        let request = seek_shard(&SeekShardInput {
            path: "stream/0".to_owned(),
            position: SeekPosition::Time { seconds: 100 },
        })
        .unwrap();

        assert_eq!(
            request.body.as_ref(),
            br#"{"Type":"TIME","TimestampSec":100,"TimestampNSec":0}"#
        );
    }

    #[test]
    fn test_should_leave_plain_object_requests_undispatched() {
        let request = get_object(&GetObjectInput {
            path: "files/blob".to_owned(),
        });
        assert_eq!(request.method, Method::GET);
        assert!(request.headers.is_empty());
        assert!(request.body.is_empty());

        let request = delete_object(&DeleteObjectInput {
            path: "files/blob".to_owned(),
        });
        assert_eq!(request.method, Method::DELETE);
        assert!(request.headers.is_empty());
    }

    #[test]
    fn test_should_dispatch_set_object_function() {
        let request = set_object(&SetObjectInput {
            path: "files/blob".to_owned(),
            body: Bytes::from_static(b"{}"),
        });
        assert_eq!(request.method, Method::PUT);
        assert_eq!(header(&request, FUNCTION_HEADER).as_deref(), Some("ObjectSet"));
    }
}
