//! Wire model for the gridio data-grid protocol.
//!
//! This crate defines the tagged attribute-value codec, the remote function
//! enum, and the request/response types the client crate assembles into
//! HTTP calls. The protocol is JSON with `PascalCase` field names; every
//! dispatched function is named in an `X-v3io-function` request header.
#![allow(missing_docs)]

pub mod attribute_value;
mod b64;
pub mod body;
pub mod codec;
pub mod error;
pub mod input;
pub mod operations;
pub mod output;
pub mod types;

pub use attribute_value::{AttributeValue, format_exponential};
pub use codec::{DecodeMode, Item, RawItem, decode_item, encode_item, item_from_json};
pub use error::CodecError;
pub use operations::Operation;
pub use types::{Record, SeekPosition, SegmentRange, UpdateKind};
