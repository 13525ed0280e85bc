//! Client for the gridio data-grid HTTP API.
//!
//! A container on the service holds three kinds of resources: plain
//! objects, typed-attribute items, and append-only sharded streams. All of
//! them are driven over HTTP with JSON bodies; every dispatched function
//! names itself in an `X-v3io-function` request header.
//!
//! This crate provides:
//!
//! - **Transport seam**: the [`Transport`] trait the embedder implements;
//!   connection management, TLS, auth, retries, and timeouts live there
//! - **Container facade**: [`Container`], binding a cluster address and
//!   container alias into per-resource operations
//! - **Pagination cursor**: [`ItemsCursor`], driving item scans across
//!   pages with forward-progress protection
//! - **Decoders**: typed outputs for every operation, with the attribute
//!   codec from [`gridio_model`] underneath
//!
//! Calls are sequential request/response: each operation issues one request
//! (the compound `put_items`/`delete_stream` a bounded sequence) and waits
//! for it. Errors are never retried at this layer.

pub mod config;
pub mod container;
pub mod cursor;
pub mod error;
pub mod listing;
mod request;
mod response;
pub mod transport;

pub use config::ClientConfig;
pub use container::{Container, DeleteStreamOutput, PutItemsOutput, ShardDeleteFailure};
pub use cursor::ItemsCursor;
pub use error::ClientError;
pub use listing::{ListBucketOutput, ListEntry, XmlError};
pub use response::Response;
pub use transport::{Transport, TransportError, TransportRequest, TransportResponse};

// The wire model, re-exported so embedders depend on one crate.
pub use gridio_model as model;
