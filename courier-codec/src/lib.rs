//! Message codecs for courier.
//!
//! This crate turns message payloads into bytes and back. A payload is
//! encoded with an optional [`Codec`] picked from a [`CodecRegistry`]; when
//! no codec is active, bytes and text pass through and structured values use
//! a binary fallback.
//!
//! # Key Types
//!
//! - [`Codec`] - Trait implemented by pluggable codecs
//! - [`CodecRegistry`] - Explicit name-keyed codec lookup
//! - [`Payload`] - Bytes, text or a structured value
//! - [`marshal`] / [`unmarshal`] - Codec selection with fallback

pub mod codecs;
pub mod error;
pub mod payload;
pub mod registry;

// Re-exports
pub use codecs::{Codec, JsonCodec, TomlCodec};
pub use error::{CodecError, DecodingError, EncodingError};
pub use payload::{Payload, PayloadShape, RawPayload, marshal, unmarshal};
pub use registry::CodecRegistry;
