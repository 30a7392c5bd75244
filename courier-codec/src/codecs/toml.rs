use serde_json::Value;

use super::Codec;
use crate::error::CodecError;

/// TOML codec backed by the `toml` crate.
///
/// TOML documents are tables, so only object values can be encoded.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlCodec;

impl TomlCodec {
    pub const NAME: &'static str = "toml";
}

impl Codec for TomlCodec {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn marshal(&self, value: &Value) -> Result<Vec<u8>, CodecError> {
        if !value.is_object() {
            return Err(CodecError::custom("toml can only encode tables"));
        }
        Ok(::toml::to_string(value)?.into_bytes())
    }

    fn unmarshal(&self, data: &[u8]) -> Result<Value, CodecError> {
        let text = std::str::from_utf8(data)?;
        Ok(::toml::from_str(text)?)
    }
}
