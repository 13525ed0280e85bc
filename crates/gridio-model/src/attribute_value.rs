//! Typed attribute values and their tagged wire form.
//!
//! The service stores item attributes as single-tag JSON objects:
//! `{"N": "30"}` for numbers (always string-encoded), `{"S": "foo"}` for
//! strings, and `{"B": "<base64>"}` for binary payloads. Exactly one tag is
//! present per attribute on the wire. Floats are encoded in exponential
//! notation to match the historical producer byte-for-byte.

use std::fmt;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::CodecError;

/// A decoded item attribute value.
///
/// Numbers arrive on the wire as text under a single `N` tag; decoding tries
/// integer first and falls back to float, so `Int` and `Float` are distinct
/// variants here even though the wire does not distinguish them.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// UTF-8 string value.
    Str(String),
    /// Binary value (base64-encoded on the wire).
    Bytes(bytes::Bytes),
}

impl AttributeValue {
    /// Returns the integer if this is an `Int` variant.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float if this is a `Float` variant.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the string if this is a `Str` variant.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the payload if this is a `Bytes` variant.
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the wire type tag this value encodes under.
    #[must_use]
    pub fn type_descriptor(&self) -> &'static str {
        match self {
            Self::Int(_) | Self::Float(_) => "N",
            Self::Str(_) => "S",
            Self::Bytes(_) => "B",
        }
    }

    /// Returns the wire tag and string-encoded payload for this value.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnsupportedType`]-shaped information (kind only;
    /// the caller attaches the attribute name) for non-finite floats, which
    /// have no parseable wire representation.
    pub(crate) fn wire_parts(&self) -> Result<(&'static str, String), &'static str> {
        match self {
            Self::Int(n) => Ok(("N", n.to_string())),
            Self::Float(f) => {
                if f.is_finite() {
                    Ok(("N", format_exponential(*f)))
                } else {
                    Err("non-finite float")
                }
            }
            Self::Str(s) => Ok(("S", s.clone())),
            Self::Bytes(b) => {
                use base64::Engine;
                Ok(("B", base64::engine::general_purpose::STANDARD.encode(b)))
            }
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{{N: {n}}}"),
            Self::Float(x) => write!(f, "{{N: {x}}}"),
            Self::Str(s) => write!(f, "{{S: {s}}}"),
            Self::Bytes(b) => write!(f, "{{B: {} bytes}}", b.len()),
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<i32> for AttributeValue {
    fn from(n: i32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for AttributeValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<bytes::Bytes> for AttributeValue {
    fn from(b: bytes::Bytes) -> Self {
        Self::Bytes(b)
    }
}

impl From<Vec<u8>> for AttributeValue {
    fn from(b: Vec<u8>) -> Self {
        Self::Bytes(bytes::Bytes::from(b))
    }
}

/// Converts a JSON value into an attribute value.
///
/// Integral numbers become `Int`, other numbers `Float`, strings `Str`.
/// JSON has no binary kind; byte attributes are constructed directly via
/// [`AttributeValue::from`]. Booleans, nulls, arrays, and objects have no
/// tagged wire form and are rejected.
impl TryFrom<&serde_json::Value> for AttributeValue {
    type Error = CodecError;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Self::Int(i))
                } else if let Some(f) = n.as_f64() {
                    Ok(Self::Float(f))
                } else {
                    Err(CodecError::UnsupportedType {
                        attribute: String::new(),
                        kind: "out-of-range number",
                    })
                }
            }
            serde_json::Value::String(s) => Ok(Self::Str(s.clone())),
            other => Err(CodecError::UnsupportedType {
                attribute: String::new(),
                kind: json_kind(other),
            }),
        }
    }
}

/// Returns a short name for a JSON value's kind, for error messages.
#[must_use]
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl Serialize for AttributeValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let (tag, text) = self
            .wire_parts()
            .map_err(|kind| serde::ser::Error::custom(format!("unsupported attribute value: {kind}")))?;
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(tag, &text)?;
        map.end()
    }
}

/// Format a float the way the service's historical producer does.
///
/// Shortest round-trip mantissa, upper-case `E`, explicit exponent sign,
/// and at least two exponent digits: `1.5E+00`, `-2.5E-03`, `1E+02`.
/// The exponent convention is a wire contract; the service echoes these
/// strings back and other clients parse them.
#[must_use]
pub fn format_exponential(value: f64) -> String {
    let formatted = format!("{value:E}");
    // `{:E}` yields a bare exponent ("1.5E0"); rewrite it as signed
    // two-digit ("1.5E+00").
    match formatted.rsplit_once('E') {
        Some((mantissa, exponent)) => {
            let exp: i32 = exponent.parse().unwrap_or(0);
            format!("{mantissa}E{exp:+03}")
        }
        None => formatted,
    }
}
