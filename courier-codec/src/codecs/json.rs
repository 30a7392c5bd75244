use serde_json::Value;

use super::Codec;
use crate::error::CodecError;

/// JSON codec backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    pub const NAME: &'static str = "json";
}

impl Codec for JsonCodec {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn marshal(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(value)?)
    }

    fn unmarshal(&self, data: &[u8]) -> Result<Value, CodecError> {
        Ok(serde_json::from_slice(data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encodes_compact_json() {
        let bytes = JsonCodec.marshal(&json!({"topic": "orders"})).unwrap();
        assert_eq!(bytes, br#"{"topic":"orders"}"#);
    }

    #[test]
    fn rejects_malformed_input() {
        let err = JsonCodec.unmarshal(b"{not json").unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
    }
}
