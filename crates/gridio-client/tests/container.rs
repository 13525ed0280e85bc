//! End-to-end container tests over a scripted transport.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use bytes::Bytes;

use gridio_client::model::input::{
    CreateStreamInput, DeleteStreamInput, GetItemInput, GetItemsInput, GetObjectInput,
    GetRecordsInput, PutItemInput, PutItemsInput, PutRecordsInput, SeekShardInput, UpdateItemInput,
};
use gridio_client::model::types::{Record, SeekPosition, UpdateKind};
use gridio_client::model::{AttributeValue, DecodeMode, Item};
use gridio_client::{
    ClientConfig, ClientError, Container, Transport, TransportError, TransportRequest,
    TransportResponse,
};

/// Transport that pops scripted responses and records every request.
#[derive(Debug, Default)]
struct MockTransport {
    responses: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push_ok(&self, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(TransportResponse {
                status: http::StatusCode::OK,
                body: Bytes::from(body.to_owned()),
            }));
    }

    fn push_status_err(&self, status: http::StatusCode) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(TransportError::Status {
                status,
                message: "scripted failure".to_owned(),
            }));
    }

    fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Connect("no scripted response".to_owned())))
    }
}

fn container(transport: &Arc<MockTransport>) -> Container {
    Container::new(
        Arc::clone(transport) as Arc<dyn Transport>,
        &ClientConfig::new("localhost:8081"),
        "datalake",
    )
}

fn item(entries: &[(&str, AttributeValue)]) -> Item {
    entries
        .iter()
        .map(|(name, value)| ((*name).to_owned(), value.clone()))
        .collect()
}

#[tokio::test]
async fn test_should_put_item_with_tagged_attributes() {
    let transport = MockTransport::new();
    transport.push_ok("{}");
    let container = container(&transport);

    container
        .put_item(&PutItemInput {
            path: "emd/item0".to_owned(),
            attributes: item(&[
                ("age", AttributeValue::Int(30)),
                ("name", AttributeValue::from("foo")),
            ]),
            condition: None,
        })
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, http::Method::PUT);
    assert_eq!(requests[0].url, "http://localhost:8081/datalake/emd/item0");
    assert_eq!(
        requests[0].headers.get("x-v3io-function").unwrap(),
        "PutItem"
    );

    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["Item"]["age"]["N"], "30");
    assert_eq!(body["Item"]["name"]["S"], "foo");
}

#[tokio::test]
async fn test_should_get_item_and_decode_attributes() {
    let transport = MockTransport::new();
    transport.push_ok(r#"{"Item": {"age": {"N": "30"}, "ratio": {"N": "1.5E+00"}}}"#);
    let container = container(&transport);

    let response = container
        .get_item(&GetItemInput {
            path: "emd/item0".to_owned(),
            attribute_names: vec!["age".to_owned(), "ratio".to_owned()],
        })
        .await
        .unwrap();

    assert_eq!(response.output.item["age"], AttributeValue::Int(30));
    assert_eq!(response.output.item["ratio"], AttributeValue::Float(1.5));

    let requests = transport.requests();
    assert_eq!(
        requests[0].body.as_ref(),
        br#"{"AttributesToGet":"age,ratio"}"#
    );
}

#[tokio::test]
async fn test_should_fail_strict_decode_of_unrecognized_tag() {
    let transport = MockTransport::new();
    transport.push_ok(r#"{"Item": {"flag": {"BOOL": "true"}}}"#);
    let config = ClientConfig::new("localhost:8081").with_decode_mode(DecodeMode::Strict);
    let container = Container::new(
        Arc::clone(&transport) as Arc<dyn Transport>,
        &config,
        "datalake",
    );

    let err = container
        .get_item(&GetItemInput {
            path: "emd/item0".to_owned(),
            attribute_names: vec!["flag".to_owned()],
        })
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::MalformedResponse { operation, .. } if operation == "GetItem"
    ));
}

#[tokio::test]
async fn test_should_exhaust_cursor_on_final_page() {
    let transport = MockTransport::new();
    transport.push_ok(
        r#"{"Items": [{"id": {"N": "1"}}], "NextMarker": "m1", "LastItemIncluded": "FALSE"}"#,
    );
    transport.push_ok(
        r#"{"Items": [{"id": {"N": "2"}}], "NextMarker": "", "LastItemIncluded": "TRUE"}"#,
    );
    let container = container(&transport);

    let mut cursor = container.items_cursor(GetItemsInput {
        path: "emd/".to_owned(),
        ..GetItemsInput::default()
    });

    let page1 = cursor.next_page().await.unwrap().unwrap();
    assert_eq!(page1[0]["id"], AttributeValue::Int(1));
    assert!(!cursor.is_exhausted());

    let page2 = cursor.next_page().await.unwrap().unwrap();
    assert_eq!(page2[0]["id"], AttributeValue::Int(2));
    assert!(cursor.is_exhausted());

    // Terminal state is idempotent: no further requests are issued.
    assert_eq!(cursor.next_page().await.unwrap(), None);
    assert_eq!(cursor.next_page().await.unwrap(), None);
    assert_eq!(transport.request_count(), 2);

    // The second fetch carried the first page's marker.
    let requests = transport.requests();
    let body1: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body1.get("Marker").is_none());
    let body2: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(body2["Marker"], "m1");
}

#[tokio::test]
async fn test_should_stop_cursor_on_non_advancing_marker() {
    let transport = MockTransport::new();
    transport.push_ok(
        r#"{"Items": [{"id": {"N": "1"}}], "NextMarker": "", "LastItemIncluded": "FALSE"}"#,
    );
    let container = container(&transport);

    let mut cursor = container.items_cursor(GetItemsInput {
        path: "emd/".to_owned(),
        ..GetItemsInput::default()
    });

    // The partial page is still delivered.
    let page = cursor.next_page().await.unwrap().unwrap();
    assert_eq!(page.len(), 1);

    // The cursor stops instead of re-issuing the same marker.
    assert!(cursor.is_exhausted());
    let anomaly = cursor.anomaly().expect("anomaly expected");
    assert_eq!(anomaly.returned_marker, "");
    assert_eq!(cursor.next_page().await.unwrap(), None);
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_should_poison_cursor_on_transport_failure() {
    let transport = MockTransport::new();
    transport.push_status_err(http::StatusCode::INTERNAL_SERVER_ERROR);
    let container = container(&transport);

    let mut cursor = container.items_cursor(GetItemsInput {
        path: "emd/".to_owned(),
        ..GetItemsInput::default()
    });

    let err = cursor.next_page().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));

    // Poisoned: later advances fail without new requests.
    let err = cursor.next_page().await.unwrap_err();
    assert!(matches!(err, ClientError::CursorPoisoned));
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_should_stream_items_across_pages() {
    let transport = MockTransport::new();
    transport.push_ok(
        r#"{"Items": [{"id": {"N": "1"}}, {"id": {"N": "2"}}], "NextMarker": "m1", "LastItemIncluded": "FALSE"}"#,
    );
    transport.push_ok(
        r#"{"Items": [{"id": {"N": "3"}}], "NextMarker": "", "LastItemIncluded": "TRUE"}"#,
    );
    let container = container(&transport);

    let mut cursor = container.items_cursor(GetItemsInput {
        path: "emd/".to_owned(),
        ..GetItemsInput::default()
    });

    let mut ids = Vec::new();
    while let Some(item) = cursor.next_item().await.unwrap() {
        ids.push(item["id"].as_int().unwrap());
    }
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_should_collect_per_key_failures_in_put_items() {
    let transport = MockTransport::new();
    // Only the two encodable items reach the transport.
    transport.push_ok("{}");
    transport.push_ok("{}");
    let container = container(&transport);

    let mut items = std::collections::HashMap::new();
    items.insert("a".to_owned(), item(&[("v", AttributeValue::Int(1))]));
    items.insert(
        "b".to_owned(),
        item(&[("v", AttributeValue::Float(f64::NAN))]),
    );
    items.insert("c".to_owned(), item(&[("v", AttributeValue::Int(3))]));

    let output = container
        .put_items(&PutItemsInput {
            path: "emd".to_owned(),
            items,
            condition: None,
        })
        .await;

    assert!(!output.success);
    assert_eq!(output.errors.len(), 1);
    assert!(matches!(output.errors["b"], ClientError::Encode(_)));

    // Items before and after the failing one were still attempted.
    assert_eq!(transport.request_count(), 2);
    let mut urls: Vec<String> = transport.requests().iter().map(|r| r.url.clone()).collect();
    urls.sort();
    assert_eq!(
        urls,
        vec![
            "http://localhost:8081/datalake/emd/a".to_owned(),
            "http://localhost:8081/datalake/emd/c".to_owned(),
        ]
    );
}

#[tokio::test]
async fn test_should_update_item_with_wholesale_attributes() {
    let transport = MockTransport::new();
    transport.push_ok("{}");
    let container = container(&transport);

    container
        .update_item(&UpdateItemInput {
            path: "emd/item0".to_owned(),
            update: UpdateKind::Attributes(item(&[("age", AttributeValue::Int(31))])),
            condition: None,
        })
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].method, http::Method::PUT);
    assert_eq!(
        requests[0].headers.get("x-v3io-function").unwrap(),
        "PutItem"
    );
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["UpdateMode"], "CreateOrReplaceAttributes");
    assert_eq!(body["Item"]["age"]["N"], "31");
}

#[tokio::test]
async fn test_should_update_item_with_expression() {
    let transport = MockTransport::new();
    transport.push_ok("{}");
    let container = container(&transport);

    container
        .update_item(&UpdateItemInput {
            path: "emd/item0".to_owned(),
            update: UpdateKind::Expression("SET age=32".to_owned()),
            condition: Some("age == 31".to_owned()),
        })
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests[0].method, http::Method::POST);
    assert_eq!(
        requests[0].headers.get("x-v3io-function").unwrap(),
        "UpdateItem"
    );
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert_eq!(body["UpdateExpression"], "SET age=32");
    assert_eq!(body["ConditionExpression"], "age == 31");
}

#[tokio::test]
async fn test_should_create_stream_and_append_records() {
    let transport = MockTransport::new();
    transport.push_ok("{}");
    transport.push_ok(
        r#"{"FailedRecordCount": 0, "Records": [{"SequenceNumber": 1, "ShardId": 2}]}"#,
    );
    let container = container(&transport);

    container
        .create_stream(&CreateStreamInput {
            path: "streams/clicks/".to_owned(),
            shard_count: 8,
            retention_period_hours: 24,
        })
        .await
        .unwrap();

    let response = container
        .put_records(PutRecordsInput {
            path: "streams/clicks/".to_owned(),
            records: vec![Record {
                data: Bytes::from_static(&[0x41, 0x42]),
                client_info: None,
                shard_id: Some(2),
                partition_key: Some("k".to_owned()),
            }],
        })
        .await
        .unwrap();

    assert_eq!(response.output.failed_record_count, 0);
    assert_eq!(response.output.records[0].shard_id, 2);

    let requests = transport.requests();
    assert_eq!(
        requests[0].body.as_ref(),
        br#"{"ShardCount":8,"RetentionPeriodHours":24}"#
    );
    let body: serde_json::Value = serde_json::from_slice(&requests[1].body).unwrap();
    assert_eq!(body["Records"][0]["Data"], "QUI=");
    assert_eq!(body["Records"][0]["ShardId"], 2);
    assert_eq!(body["Records"][0]["PartitionKey"], "k");
    assert!(body["Records"][0].get("ClientInfo").is_none());
}

#[tokio::test]
async fn test_should_seek_shard_and_read_records() {
    let transport = MockTransport::new();
    transport.push_ok(r#"{"Location": "AQAB"}"#);
    transport.push_ok(
        r#"{
            "NextLocation": "AQAC",
            "MSecBehindLatest": 0,
            "RecordsBehindLatest": 0,
            "Records": [{"SequenceNumber": 7, "Data": "QUI="}]
        }"#,
    );
    let container = container(&transport);

    let seek = container
        .seek_shard(&SeekShardInput {
            path: "streams/clicks/2".to_owned(),
            position: SeekPosition::Earliest,
        })
        .await
        .unwrap();
    assert_eq!(seek.output.location, "AQAB");

    let records = container
        .get_records(&GetRecordsInput {
            path: "streams/clicks/2".to_owned(),
            location: seek.output.location.clone(),
            limit: 100,
        })
        .await
        .unwrap();
    assert_eq!(records.output.next_location, "AQAC");
    assert_eq!(records.output.records[0].data.as_ref(), b"AB");

    let requests = transport.requests();
    assert_eq!(requests[0].body.as_ref(), br#"{"Type":"EARLIEST"}"#);
    assert_eq!(
        requests[1].body.as_ref(),
        br#"{"Location":"AQAB","Limit":100}"#
    );
}

#[tokio::test]
async fn test_should_delete_stream_and_collect_shard_failures() {
    let transport = MockTransport::new();
    transport.push_ok(
        r#"<ListBucketResult>
            <Name>datalake</Name>
            <Contents><Key>streams/clicks/0</Key><Size>10</Size></Contents>
            <Contents><Key>streams/clicks/1</Key><Size>10</Size></Contents>
        </ListBucketResult>"#,
    );
    transport.push_ok(""); // delete shard 0
    transport.push_status_err(http::StatusCode::INTERNAL_SERVER_ERROR); // delete shard 1
    transport.push_ok(""); // delete the stream directory
    let container = container(&transport);

    let output = container
        .delete_stream(&DeleteStreamInput {
            path: "streams/clicks".to_owned(),
        })
        .await
        .unwrap();

    assert!(!output.fully_deleted());
    assert_eq!(output.deleted, vec!["streams/clicks/0".to_owned()]);
    assert_eq!(output.failures.len(), 1);
    assert_eq!(output.failures[0].key, "streams/clicks/1");

    let requests = transport.requests();
    assert_eq!(requests.len(), 4);
    assert_eq!(requests[0].method, http::Method::GET);
    assert_eq!(
        requests[0].url,
        "http://localhost:8081/datalake?prefix=streams/clicks"
    );
    assert_eq!(requests[1].method, http::Method::DELETE);
    // The sweep ends by deleting the stream's directory object.
    assert_eq!(
        requests[3].url,
        "http://localhost:8081/datalake/streams/clicks/"
    );
}

#[tokio::test]
async fn test_should_pass_object_bodies_through_untouched() {
    let transport = MockTransport::new();
    transport.push_ok("raw object bytes");
    let container = container(&transport);

    let body = container
        .get_object(&GetObjectInput {
            path: "files/blob".to_owned(),
        })
        .await
        .unwrap();

    assert_eq!(body.as_ref(), b"raw object bytes");
    let requests = transport.requests();
    assert!(requests[0].headers.is_empty());
}

#[tokio::test]
async fn test_should_propagate_transport_status_errors_verbatim() {
    let transport = MockTransport::new();
    transport.push_status_err(http::StatusCode::CONFLICT);
    let container = container(&transport);

    let err = container
        .put_item(&PutItemInput {
            path: "emd/item0".to_owned(),
            attributes: item(&[("v", AttributeValue::Int(1))]),
            condition: Some("not exists(v)".to_owned()),
        })
        .await
        .unwrap_err();

    match err {
        ClientError::Transport(TransportError::Status { status, .. }) => {
            assert_eq!(status, http::StatusCode::CONFLICT);
        }
        other => panic!("expected transport status error, got {other:?}"),
    }
    // One request, no retry.
    assert_eq!(transport.request_count(), 1);
}
