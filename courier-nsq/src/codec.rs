//! Per-transport message encoding.

use std::fmt;
use std::sync::Arc;

use courier_codec::{Codec, CodecRegistry, Payload, PayloadShape, marshal, unmarshal};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Result;

/// The codec a transport encodes its messages with.
///
/// Holds at most one codec, resolved once from a [`CodecRegistry`]. With no
/// codec, payloads use the raw and binary fallbacks.
#[derive(Clone, Default)]
pub struct MessageCodec {
    codec: Option<Arc<dyn Codec>>,
}

impl MessageCodec {
    pub fn new(codec: Option<Arc<dyn Codec>>) -> Self {
        Self { codec }
    }

    /// Resolve `name` against `registry`. `None` selects the fallbacks.
    pub fn from_registry(registry: &CodecRegistry, name: Option<&str>) -> Result<Self> {
        let codec = registry.resolve(name)?;
        debug!(codec = name.unwrap_or("fallback"), "Resolved message codec");
        Ok(Self::new(codec))
    }

    /// Name of the active codec, if any.
    pub fn codec_name(&self) -> Option<&str> {
        self.codec.as_deref().map(|c| c.name())
    }

    pub fn encode<T: Serialize>(&self, msg: &Payload<T>) -> Result<Vec<u8>> {
        Ok(marshal(self.codec.as_deref(), Some(msg))?)
    }

    pub fn decode<T: DeserializeOwned>(&self, data: &[u8], shape: PayloadShape) -> Result<Payload<T>> {
        Ok(unmarshal(self.codec.as_deref(), data, shape)?)
    }
}

impl fmt::Debug for MessageCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageCodec")
            .field("codec", &self.codec_name())
            .finish()
    }
}
