//! Error types for the NSQ transport.

use courier_codec::{CodecError, DecodingError, EncodingError};
use courier_observe::TracerError;

/// Error type for NSQ transport operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid or unreadable configuration.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Codec lookup failed.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("encode error: {0}")]
    Encode(#[from] EncodingError),

    #[error("decode error: {0}")]
    Decode(#[from] DecodingError),

    #[error("tracer error: {0}")]
    Tracer(#[from] TracerError),
}

/// Result type alias for NSQ transport operations.
pub type Result<T> = std::result::Result<T, Error>;
