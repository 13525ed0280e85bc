//! Container facade.
//!
//! A [`Container`] binds a cluster address and container alias into a URI
//! prefix and exposes the per-resource operations: plain objects, typed
//! items, and streams. Every call issues exactly one request through the
//! transport and waits for it; the two compound operations (`put_items`,
//! `delete_stream`) issue a bounded sequence, sequentially.

use std::collections::HashMap;
use std::fmt;
use std::fmt::Write as _;
use std::sync::Arc;

use bytes::Bytes;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use gridio_model::input::{
    CreateStreamInput, DeleteObjectInput, DeleteStreamInput, GetItemInput, GetItemsInput,
    GetObjectInput, GetRecordsInput, ListBucketInput, PutItemInput, PutItemsInput, PutObjectInput,
    PutRecordsInput, SeekShardInput, SetObjectInput, UpdateItemInput,
};
use gridio_model::output::{
    GetItemOutput, GetItemsOutput, GetRecordsOutput, PutRecordsOutput, SeekShardOutput,
};
use gridio_model::types::UpdateKind;
use gridio_model::DecodeMode;

use crate::config::ClientConfig;
use crate::cursor::ItemsCursor;
use crate::error::ClientError;
use crate::listing::{self, ListBucketOutput};
use crate::request::{self, ApiRequest};
use crate::response::{self, Response};
use crate::transport::{Transport, TransportRequest, TransportResponse};

/// Characters percent-encoded in the listing prefix query value. Path
/// separators stay raw; the service expects them.
const QUERY_SET: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'#').add(b'<').add(b'>');

/// Aggregated result of a bulk `put_items` call.
///
/// `success` is false if any single item failed; the per-key detail is in
/// `errors`. Items after a failed one are still attempted.
#[derive(Debug, Default)]
pub struct PutItemsOutput {
    /// True only if every item was written.
    pub success: bool,
    /// Item key to the failure that stopped it.
    pub errors: HashMap<String, ClientError>,
}

/// One shard object that could not be deleted during `delete_stream`.
#[derive(Debug)]
pub struct ShardDeleteFailure {
    /// The shard object's key.
    pub key: String,
    /// Why its deletion failed.
    pub error: ClientError,
}

/// Result of the compound `delete_stream` operation.
///
/// Per-shard outcomes are collected rather than swallowed; the caller
/// decides whether partial deletion counts as success.
#[derive(Debug, Default)]
pub struct DeleteStreamOutput {
    /// Keys of the shard objects that were deleted.
    pub deleted: Vec<String>,
    /// Shard objects that could not be deleted.
    pub failures: Vec<ShardDeleteFailure>,
}

impl DeleteStreamOutput {
    /// True if every shard object was deleted.
    #[must_use]
    pub fn fully_deleted(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Per-container handle over an established transport.
#[derive(Clone)]
pub struct Container {
    transport: Arc<dyn Transport>,
    alias: String,
    uri_prefix: String,
    decode_mode: DecodeMode,
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("alias", &self.alias)
            .field("uri_prefix", &self.uri_prefix)
            .field("decode_mode", &self.decode_mode)
            .finish_non_exhaustive()
    }
}

impl Container {
    /// Open a container handle named `alias` on the configured cluster.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, config: &ClientConfig, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        Self {
            uri_prefix: format!("http://{}/{}", config.cluster_url, alias),
            transport,
            alias,
            decode_mode: config.decode_mode,
        }
    }

    fn path_uri(&self, path: &str) -> String {
        format!("{}/{}", self.uri_prefix, path)
    }

    async fn dispatch(&self, request: ApiRequest) -> Result<TransportResponse, ClientError> {
        tracing::debug!(
            container = %self.alias,
            method = %request.method,
            path = %request.path,
            "sending request"
        );
        let response = self
            .transport
            .send(TransportRequest {
                url: self.path_uri(&request.path),
                method: request.method,
                headers: request.headers,
                body: request.body,
            })
            .await?;
        Ok(response)
    }

    /// List object keys under the container, optionally filtered by prefix.
    pub async fn list_bucket(
        &self,
        input: &ListBucketInput,
    ) -> Result<Response<ListBucketOutput>, ClientError> {
        let mut url = self.uri_prefix.clone();
        if !input.path.is_empty() {
            url.push_str("?prefix=");
            let _ = write!(url, "{}", utf8_percent_encode(&input.path, QUERY_SET));
        }
        tracing::debug!(container = %self.alias, prefix = %input.path, "listing bucket");

        let response = self
            .transport
            .send(TransportRequest {
                method: http::Method::GET,
                url,
                headers: http::HeaderMap::new(),
                body: Bytes::new(),
            })
            .await?;

        let output = listing::decode_list_bucket(&response.body)
            .map_err(|source| ClientError::malformed("ListBucket", source))?;
        Ok(Response {
            body: response.body,
            output,
        })
    }

    /// Read a plain object's bytes.
    pub async fn get_object(&self, input: &GetObjectInput) -> Result<Bytes, ClientError> {
        let response = self.dispatch(request::get_object(input)).await?;
        Ok(response.body)
    }

    /// Write a plain object.
    pub async fn put_object(&self, input: &PutObjectInput) -> Result<(), ClientError> {
        self.dispatch(request::put_object(input)).await?;
        Ok(())
    }

    /// Invoke the `ObjectSet` function on an object path.
    pub async fn set_object(&self, input: &SetObjectInput) -> Result<(), ClientError> {
        self.dispatch(request::set_object(input)).await?;
        Ok(())
    }

    /// Delete a plain object.
    pub async fn delete_object(&self, input: &DeleteObjectInput) -> Result<(), ClientError> {
        self.dispatch(request::delete_object(input)).await?;
        Ok(())
    }

    /// Fetch one item's attributes.
    pub async fn get_item(&self, input: &GetItemInput) -> Result<Response<GetItemOutput>, ClientError> {
        let response = self.dispatch(request::get_item(input)?).await?;
        let output = response::decode_get_item(&response.body, self.decode_mode)?;
        Ok(Response {
            body: response.body,
            output,
        })
    }

    /// Fetch one page of an item scan.
    ///
    /// Most callers want [`Container::items_cursor`] instead, which drives
    /// the marker across pages.
    pub async fn get_items(
        &self,
        input: &GetItemsInput,
    ) -> Result<Response<GetItemsOutput>, ClientError> {
        let sent_marker = input.marker.clone().unwrap_or_default();
        let response = self.dispatch(request::get_items(input)?).await?;
        let output = response::decode_get_items(&response.body, self.decode_mode, &sent_marker)?;
        Ok(Response {
            body: response.body,
            output,
        })
    }

    /// A cursor over all pages of an item scan, starting from the marker in
    /// `input` (or the beginning when unset).
    #[must_use]
    pub fn items_cursor(&self, input: GetItemsInput) -> ItemsCursor {
        ItemsCursor::new(self.clone(), input)
    }

    /// Write an item's attributes.
    pub async fn put_item(&self, input: &PutItemInput) -> Result<(), ClientError> {
        let request = request::put_item(
            &input.path,
            &input.attributes,
            input.condition.as_deref(),
            None,
        )?;
        self.dispatch(request).await?;
        Ok(())
    }

    /// Write several items, one `PutItem` per entry at `path/<key>`.
    ///
    /// Failures are collected per key and do not stop the batch; a local
    /// encode failure means no request was sent for that key.
    pub async fn put_items(&self, input: &PutItemsInput) -> PutItemsOutput {
        let mut output = PutItemsOutput {
            success: true,
            errors: HashMap::new(),
        };

        for (key, attributes) in &input.items {
            let path = format!("{}/{}", input.path, key);
            let result = match request::put_item(&path, attributes, input.condition.as_deref(), None)
            {
                Ok(request) => self.dispatch(request).await.map(|_| ()),
                Err(error) => Err(error),
            };

            if let Err(error) = result {
                tracing::debug!(container = %self.alias, item = %key, error = %error, "put_items entry failed");
                output.success = false;
                output.errors.insert(key.clone(), error);
            }
        }

        output
    }

    /// Update an item: wholesale attributes or an update expression.
    pub async fn update_item(&self, input: &UpdateItemInput) -> Result<(), ClientError> {
        let request = match &input.update {
            UpdateKind::Attributes(attributes) => request::put_item(
                &input.path,
                attributes,
                input.condition.as_deref(),
                Some(request::UPDATE_MODE),
            )?,
            UpdateKind::Expression(expression) => request::update_item_expression(
                &input.path,
                expression,
                input.condition.as_deref(),
            )?,
        };
        self.dispatch(request).await?;
        Ok(())
    }

    /// Create a stream.
    pub async fn create_stream(&self, input: &CreateStreamInput) -> Result<(), ClientError> {
        self.dispatch(request::create_stream(input)?).await?;
        Ok(())
    }

    /// Delete a stream: list its shard objects, delete each, then delete
    /// the stream's directory object.
    ///
    /// Per-shard failures are collected in the output and do not stop the
    /// sweep. Listing failures and a failed directory delete are hard
    /// errors.
    pub async fn delete_stream(
        &self,
        input: &DeleteStreamInput,
    ) -> Result<DeleteStreamOutput, ClientError> {
        let listing = self
            .list_bucket(&ListBucketInput {
                path: input.path.clone(),
            })
            .await?;

        let mut output = DeleteStreamOutput::default();
        for entry in &listing.output.entries {
            match self
                .delete_object(&DeleteObjectInput {
                    path: entry.key.clone(),
                })
                .await
            {
                Ok(()) => output.deleted.push(entry.key.clone()),
                Err(error) => {
                    tracing::warn!(container = %self.alias, shard = %entry.key, error = %error, "failed to delete shard object");
                    output.failures.push(ShardDeleteFailure {
                        key: entry.key.clone(),
                        error,
                    });
                }
            }
        }

        // The stream's directory object itself.
        let directory = format!("{}/", input.path.trim_end_matches('/'));
        self.delete_object(&DeleteObjectInput { path: directory })
            .await?;

        Ok(output)
    }

    /// Append records to a stream, preserving caller order.
    pub async fn put_records(
        &self,
        input: PutRecordsInput,
    ) -> Result<Response<PutRecordsOutput>, ClientError> {
        let response = self.dispatch(request::put_records(input)?).await?;
        let output = response::decode_json("PutRecords", &response.body)?;
        Ok(Response {
            body: response.body,
            output,
        })
    }

    /// Resolve a shard location from a seek position.
    pub async fn seek_shard(
        &self,
        input: &SeekShardInput,
    ) -> Result<Response<SeekShardOutput>, ClientError> {
        let response = self.dispatch(request::seek_shard(input)?).await?;
        let output = response::decode_json("SeekShard", &response.body)?;
        Ok(Response {
            body: response.body,
            output,
        })
    }

    /// Read records from a shard location.
    pub async fn get_records(
        &self,
        input: &GetRecordsInput,
    ) -> Result<Response<GetRecordsOutput>, ClientError> {
        let response = self.dispatch(request::get_records(input)?).await?;
        let output = response::decode_json("GetRecords", &response.body)?;
        Ok(Response {
            body: response.body,
            output,
        })
    }
}
