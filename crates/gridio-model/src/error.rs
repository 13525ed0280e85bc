//! Attribute codec errors.

/// Errors produced while converting attributes to or from their tagged wire
/// form.
///
/// Encode-side errors (`UnsupportedType`) fire before any request is sent;
/// decode-side errors (`MalformedNumber`, `MalformedBinary`,
/// `UnrecognizedTags`) mean the service returned an attribute this client
/// cannot interpret.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The attribute value has no tagged wire representation.
    #[error("unsupported attribute type for '{attribute}': {kind}")]
    UnsupportedType {
        /// Name of the offending attribute.
        attribute: String,
        /// Human-readable description of the observed value kind.
        kind: &'static str,
    },

    /// An `N`-tagged attribute parsed as neither integer nor float.
    #[error("value for '{attribute}' is not an integer or float: '{value}'")]
    MalformedNumber {
        /// Name of the offending attribute.
        attribute: String,
        /// The raw numeric text as received.
        value: String,
    },

    /// A `B`-tagged attribute carried invalid base64.
    #[error("binary value for '{attribute}' is not valid base64")]
    MalformedBinary {
        /// Name of the offending attribute.
        attribute: String,
        /// The underlying base64 decode failure.
        #[source]
        source: base64::DecodeError,
    },

    /// An attribute carried none of the recognized type tags.
    ///
    /// Only raised under [`DecodeMode::Strict`](crate::codec::DecodeMode);
    /// lenient decoding drops the attribute instead.
    #[error("attribute '{attribute}' carries no recognized type tag")]
    UnrecognizedTags {
        /// Name of the offending attribute.
        attribute: String,
    },
}
