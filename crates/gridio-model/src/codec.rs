//! Item-level attribute encode/decode.
//!
//! `{"age": 30, "name": "foo"}` travels as
//! `{"age": {"N": "30"}, "name": {"S": "foo"}}`. Encoding dispatches on the
//! typed value; decoding inspects tags in a fixed priority order (numeric,
//! then string, then binary) and parses numeric text as integer first with a
//! float fallback.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::attribute_value::{AttributeValue, json_kind};
use crate::error::CodecError;

/// A decoded item: attribute name to typed value.
pub type Item = HashMap<String, AttributeValue>;

/// An item as received on the wire: attribute name to raw tag map.
pub type RawItem = HashMap<String, HashMap<String, String>>;

/// Policy for wire attributes that carry no recognized type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    /// Drop unrecognized attributes from the decoded item.
    ///
    /// This matches the service's historical clients and is the default.
    #[default]
    Lenient,
    /// Fail decoding with [`CodecError::UnrecognizedTags`].
    Strict,
}

/// Encode a typed item into its tagged wire object.
///
/// # Errors
///
/// Returns [`CodecError::UnsupportedType`] naming the attribute if a value
/// has no wire representation (currently only non-finite floats). Nothing is
/// partially encoded on failure.
pub fn encode_item(item: &Item) -> Result<Map<String, Value>, CodecError> {
    let mut wire = Map::new();
    for (name, value) in item {
        let (tag, text) = value
            .wire_parts()
            .map_err(|kind| CodecError::UnsupportedType {
                attribute: name.clone(),
                kind,
            })?;
        let mut tagged = Map::with_capacity(1);
        tagged.insert(tag.to_owned(), Value::String(text));
        wire.insert(name.clone(), Value::Object(tagged));
    }
    Ok(wire)
}

/// Decode a wire item into typed attribute values.
///
/// Tag priority is numeric, then string, then binary; an attribute carrying
/// several tags decodes from the highest-priority one. Attributes with no
/// recognized tag are handled per `mode`.
///
/// # Errors
///
/// Returns [`CodecError::MalformedNumber`] or [`CodecError::MalformedBinary`]
/// when a tag's payload does not parse, and [`CodecError::UnrecognizedTags`]
/// under [`DecodeMode::Strict`].
pub fn decode_item(raw: &RawItem, mode: DecodeMode) -> Result<Item, CodecError> {
    let mut item = Item::with_capacity(raw.len());

    for (name, tags) in raw {
        if let Some(number) = tags.get("N") {
            let value = if let Ok(int) = number.parse::<i64>() {
                AttributeValue::Int(int)
            } else if let Ok(float) = number.parse::<f64>() {
                AttributeValue::Float(float)
            } else {
                return Err(CodecError::MalformedNumber {
                    attribute: name.clone(),
                    value: number.clone(),
                });
            };
            item.insert(name.clone(), value);
        } else if let Some(string) = tags.get("S") {
            item.insert(name.clone(), AttributeValue::Str(string.clone()));
        } else if let Some(binary) = tags.get("B") {
            use base64::Engine;
            let decoded = base64::engine::general_purpose::STANDARD
                .decode(binary)
                .map_err(|source| CodecError::MalformedBinary {
                    attribute: name.clone(),
                    source,
                })?;
            item.insert(name.clone(), AttributeValue::Bytes(bytes::Bytes::from(decoded)));
        } else if mode == DecodeMode::Strict {
            return Err(CodecError::UnrecognizedTags {
                attribute: name.clone(),
            });
        }
    }

    Ok(item)
}

/// Build a typed item from a loosely-typed JSON object.
///
/// Convenience for callers holding `serde_json` data. Scalars convert per
/// [`AttributeValue::try_from`]; any other kind fails naming the attribute.
///
/// # Errors
///
/// Returns [`CodecError::UnsupportedType`] for the first attribute whose
/// value is a boolean, null, array, or object.
pub fn item_from_json(attributes: &Map<String, Value>) -> Result<Item, CodecError> {
    let mut item = Item::with_capacity(attributes.len());
    for (name, value) in attributes {
        let converted =
            AttributeValue::try_from(value).map_err(|_| CodecError::UnsupportedType {
                attribute: name.clone(),
                kind: json_kind(value),
            })?;
        item.insert(name.clone(), converted);
    }
    Ok(item)
}
