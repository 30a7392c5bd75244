//! Message payloads and codec selection.
//!
//! [`marshal`] and [`unmarshal`] pick an encoding for one message:
//! - with a codec, the payload goes through the codec's structural model
//! - without one, bytes and text pass through untouched and structured
//!   values are encoded as CBOR
//!
//! CBOR is self-describing, so anything serde can encode decodes again.

use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};
use tracing::trace;

use crate::codecs::Codec;
use crate::error::{CodecError, DecodingError, EncodingError};

/// A single message payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload<T> {
    /// Raw bytes, sent as-is when no codec is active.
    Bytes(Vec<u8>),
    /// UTF-8 text, sent as its bytes when no codec is active.
    Text(String),
    /// A structured value.
    Value(T),
}

/// Payload that never carries a structured value.
pub type RawPayload = Payload<()>;

/// Which [`Payload`] variant a decode should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadShape {
    Bytes,
    Text,
    Value,
}

impl<T> Payload<T> {
    pub fn shape(&self) -> PayloadShape {
        match self {
            Self::Bytes(_) => PayloadShape::Bytes,
            Self::Text(_) => PayloadShape::Text,
            Self::Value(_) => PayloadShape::Value,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Vec<u8>> for Payload<T> {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl<T> From<String> for Payload<T> {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl<T> From<&str> for Payload<T> {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl<T: Serialize> Serialize for Payload<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bytes(bytes) => serializer.serialize_bytes(bytes),
            Self::Text(text) => serializer.serialize_str(text),
            Self::Value(value) => value.serialize(serializer),
        }
    }
}

/// Encode a message.
///
/// A missing message is rejected before any codec or fallback runs.
pub fn marshal<T: Serialize>(
    codec: Option<&dyn Codec>,
    msg: Option<&Payload<T>>,
) -> Result<Vec<u8>, EncodingError> {
    let Some(msg) = msg else {
        return Err(EncodingError::NilMessage);
    };

    if let Some(codec) = codec {
        trace!(codec = codec.name(), "encoding message with codec");
        let codec_err = |source: CodecError| EncodingError::Codec {
            codec: codec.name().to_string(),
            source,
        };
        let value = serde_json::to_value(msg).map_err(|e| codec_err(e.into()))?;
        return codec.marshal(&value).map_err(codec_err);
    }

    match msg {
        Payload::Bytes(bytes) => Ok(bytes.clone()),
        Payload::Text(text) => Ok(text.as_bytes().to_vec()),
        Payload::Value(value) => {
            trace!("encoding structured message with CBOR fallback");
            serde_cbor::to_vec(value).map_err(EncodingError::Binary)
        }
    }
}

/// Decode a message into the requested shape.
///
/// Without a codec this mirrors [`marshal`]: bytes are copied, text is
/// validated as UTF-8 and structured values use the binary fallback.
pub fn unmarshal<T: DeserializeOwned>(
    codec: Option<&dyn Codec>,
    data: &[u8],
    shape: PayloadShape,
) -> Result<Payload<T>, DecodingError> {
    if let Some(codec) = codec {
        trace!(codec = codec.name(), ?shape, "decoding message with codec");
        let codec_err = |source: CodecError| DecodingError::Codec {
            codec: codec.name().to_string(),
            source,
        };
        let value = codec.unmarshal(data).map_err(codec_err)?;
        let payload = match shape {
            PayloadShape::Bytes => serde_json::from_value(value).map(Payload::Bytes),
            PayloadShape::Text => serde_json::from_value(value).map(Payload::Text),
            PayloadShape::Value => serde_json::from_value(value).map(Payload::Value),
        };
        return payload.map_err(|e| codec_err(e.into()));
    }

    match shape {
        PayloadShape::Bytes => Ok(Payload::Bytes(data.to_vec())),
        PayloadShape::Text => Ok(Payload::Text(String::from_utf8(data.to_vec())?)),
        PayloadShape::Value => serde_cbor::from_slice(data)
            .map(Payload::Value)
            .map_err(DecodingError::Binary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::JsonCodec;
    use serde::Deserialize;
    use serde_json::Value;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Order {
        id: u64,
        lines: Vec<(String, u32)>,
        note: Option<String>,
    }

    fn order() -> Order {
        Order {
            id: 42,
            lines: vec![("widget".into(), 2), ("gadget".into(), 1)],
            note: None,
        }
    }

    const JSON: &dyn Codec = &JsonCodec;
    const FAILING: &dyn Codec = &Failing;

    struct Failing;

    impl Codec for Failing {
        fn name(&self) -> &str {
            "failing"
        }

        fn marshal(&self, _value: &Value) -> Result<Vec<u8>, CodecError> {
            Err(CodecError::custom("encoder exploded"))
        }

        fn unmarshal(&self, _data: &[u8]) -> Result<Value, CodecError> {
            Err(CodecError::custom("decoder exploded"))
        }
    }

    #[test]
    fn nil_message_fails_without_codec() {
        let err = marshal::<()>(None, None).unwrap_err();
        assert!(matches!(err, EncodingError::NilMessage));
    }

    #[test]
    fn nil_message_fails_with_codec() {
        let err = marshal::<()>(Some(JSON), None).unwrap_err();
        assert!(matches!(err, EncodingError::NilMessage));
    }

    #[test]
    fn bytes_pass_through_unchanged() {
        let raw = vec![0u8, 159, 146, 150, 255];
        let encoded = marshal(None, Some(&RawPayload::Bytes(raw.clone()))).unwrap();
        assert_eq!(encoded, raw);
    }

    #[test]
    fn text_encodes_as_utf8_and_decodes_back() {
        let text = "naïve café ☕";
        let encoded = marshal(None, Some(&RawPayload::from(text))).unwrap();
        assert_eq!(encoded, text.as_bytes());

        let decoded: RawPayload = unmarshal(None, &encoded, PayloadShape::Text).unwrap();
        assert_eq!(decoded, Payload::Text(text.to_string()));
    }

    #[test]
    fn structured_value_roundtrips_through_cbor_fallback() {
        let encoded = marshal(None, Some(&Payload::Value(order()))).unwrap();
        let decoded: Payload<Order> = unmarshal(None, &encoded, PayloadShape::Value).unwrap();
        assert_eq!(decoded.into_value(), Some(order()));
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(tag = "type", rename_all = "snake_case")]
    enum Event {
        Created { id: u64 },
        Cancelled { id: u64, reason: String },
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sparse {
        id: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        note: Option<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        tags: Vec<String>,
    }

    fn roundtrip_without_codec<T>(value: T) -> T
    where
        T: Serialize + DeserializeOwned,
    {
        let encoded = marshal(None, Some(&Payload::Value(value))).unwrap();
        let decoded: Payload<T> = unmarshal(None, &encoded, PayloadShape::Value).unwrap();
        decoded.into_value().unwrap()
    }

    #[test]
    fn untyped_value_roundtrips_without_codec() {
        let value = serde_json::json!({"a": [1, {"b": null}], "c": "d"});
        assert_eq!(roundtrip_without_codec(value.clone()), value);
    }

    #[test]
    fn tagged_enum_roundtrips_without_codec() {
        let events = vec![
            Event::Created { id: 1 },
            Event::Cancelled {
                id: 1,
                reason: "duplicate".into(),
            },
        ];
        for event in events {
            assert_eq!(roundtrip_without_codec(event.clone()), event);
        }
    }

    #[test]
    fn skipped_fields_roundtrip_without_codec() {
        let sparse = Sparse {
            id: 9,
            note: None,
            tags: vec![],
        };
        assert_eq!(roundtrip_without_codec(sparse.clone()), sparse);

        let full = Sparse {
            id: 9,
            note: Some("fragile".into()),
            tags: vec!["priority".into()],
        };
        assert_eq!(roundtrip_without_codec(full.clone()), full);
    }

    #[test]
    fn bytes_decode_without_codec_keeps_input() {
        let decoded: RawPayload = unmarshal(None, b"\x01\x02", PayloadShape::Bytes).unwrap();
        assert_eq!(decoded, Payload::Bytes(vec![1, 2]));
    }

    #[test]
    fn invalid_utf8_text_is_rejected() {
        let err = unmarshal::<()>(None, &[0xc3u8, 0x28], PayloadShape::Text).unwrap_err();
        assert!(matches!(err, DecodingError::InvalidUtf8(_)));
    }

    #[test]
    fn truncated_binary_is_rejected() {
        let encoded = marshal(None, Some(&Payload::Value(order()))).unwrap();
        let err = unmarshal::<Order>(None, &encoded[..3], PayloadShape::Value).unwrap_err();
        assert!(matches!(err, DecodingError::Binary(_)));
    }

    #[test]
    fn codec_takes_precedence_over_fallback() {
        let encoded = marshal(Some(JSON), Some(&RawPayload::from("hi"))).unwrap();
        assert_eq!(encoded, b"\"hi\"");

        let encoded = marshal(Some(JSON), Some(&Payload::Value(order()))).unwrap();
        let decoded: Payload<Order> =
            unmarshal(Some(JSON), &encoded, PayloadShape::Value).unwrap();
        assert_eq!(decoded, Payload::Value(order()));
    }

    #[test]
    fn codec_bytes_roundtrip() {
        let payload = RawPayload::Bytes(vec![7, 8, 9]);
        let encoded = marshal(Some(JSON), Some(&payload)).unwrap();
        let decoded: RawPayload = unmarshal(Some(JSON), &encoded, PayloadShape::Bytes).unwrap();
        assert_eq!(decoded, payload);
    }

    #[test]
    fn codec_encode_failure_propagates() {
        let err = marshal(Some(FAILING), Some(&RawPayload::from("x"))).unwrap_err();
        match err {
            EncodingError::Codec { codec, source } => {
                assert_eq!(codec, "failing");
                assert_eq!(source.to_string(), "encoder exploded");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn codec_decode_failure_propagates() {
        let err = unmarshal::<()>(Some(FAILING), b"{}", PayloadShape::Text).unwrap_err();
        assert!(matches!(err, DecodingError::Codec { codec, .. } if codec == "failing"));
    }

    #[test]
    fn codec_shape_mismatch_is_a_decode_error() {
        let err = unmarshal::<Order>(Some(JSON), b"\"text\"", PayloadShape::Value).unwrap_err();
        assert!(matches!(err, DecodingError::Codec { .. }));
    }

    #[test]
    fn shape_reports_variant() {
        assert_eq!(RawPayload::from("a").shape(), PayloadShape::Text);
        assert_eq!(RawPayload::Bytes(vec![]).shape(), PayloadShape::Bytes);
        assert_eq!(Payload::Value(1u8).shape(), PayloadShape::Value);
    }
}
