//! The codec trait and the built-in codecs.

mod json;
mod toml;

pub use self::json::JsonCodec;
pub use self::toml::TomlCodec;

use serde_json::Value;

use crate::error::CodecError;

/// A pluggable strategy for converting a structured value to and from bytes.
///
/// Codecs work on [`serde_json::Value`], the structural data model shared by
/// every codec, so they can be stored as trait objects in a
/// [`CodecRegistry`](crate::CodecRegistry).
pub trait Codec: Send + Sync {
    /// Registry name of this codec (e.g. "json").
    fn name(&self) -> &str;

    /// Encode a structured value.
    fn marshal(&self, value: &Value) -> Result<Vec<u8>, CodecError>;

    /// Decode bytes into a structured value.
    fn unmarshal(&self, data: &[u8]) -> Result<Value, CodecError>;
}
