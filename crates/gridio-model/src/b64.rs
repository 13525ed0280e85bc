//! Serde helpers for base64-encoded binary fields.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serializer};

pub(crate) fn serialize<S: Serializer>(data: &bytes::Bytes, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&STANDARD.encode(data))
}

pub(crate) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bytes::Bytes, D::Error> {
    let encoded = String::deserialize(deserializer)?;
    STANDARD
        .decode(&encoded)
        .map(bytes::Bytes::from)
        .map_err(serde::de::Error::custom)
}

/// Same as the parent module, for `Option<Bytes>` fields.
pub(crate) mod option {
    use super::{Deserialize, Deserializer, STANDARD, Serializer};
    use base64::Engine;

    pub(crate) fn serialize<S: Serializer>(
        data: &Option<bytes::Bytes>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match data {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub(crate) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<bytes::Bytes>, D::Error> {
        let encoded = Option::<String>::deserialize(deserializer)?;
        encoded
            .map(|text| {
                STANDARD
                    .decode(&text)
                    .map(bytes::Bytes::from)
                    .map_err(serde::de::Error::custom)
            })
            .transpose()
    }
}
