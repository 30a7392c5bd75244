//! Error types for message encoding.

use thiserror::Error;

/// Errors raised inside a codec implementation.
#[derive(Error, Debug)]
pub enum CodecError {
    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML serialization error
    #[error("TOML encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    /// TOML deserialization error
    #[error("TOML decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),

    /// Payload bytes were not valid UTF-8 for a text based codec
    #[error("invalid UTF-8 in payload: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// No codec registered under the requested name
    #[error("unknown codec: {0}")]
    UnknownCodec(String),

    /// Custom error with message
    #[error("{0}")]
    Custom(String),
}

impl CodecError {
    /// Create a custom error with a message
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}

/// Errors returned by [`marshal`](crate::marshal).
#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("message is nil")]
    NilMessage,

    #[error("{codec} codec failed to encode message: {source}")]
    Codec {
        codec: String,
        #[source]
        source: CodecError,
    },

    #[error("binary encoding failed: {0}")]
    Binary(#[source] serde_cbor::Error),
}

/// Errors returned by [`unmarshal`](crate::unmarshal).
#[derive(Error, Debug)]
pub enum DecodingError {
    #[error("{codec} codec failed to decode message: {source}")]
    Codec {
        codec: String,
        #[source]
        source: CodecError,
    },

    #[error("payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("binary decoding failed: {0}")]
    Binary(#[source] serde_cbor::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nil_message_display() {
        assert_eq!(EncodingError::NilMessage.to_string(), "message is nil");
    }

    #[test]
    fn codec_failure_keeps_source() {
        use std::error::Error as _;

        let err = EncodingError::Codec {
            codec: "json".to_string(),
            source: CodecError::custom("boom"),
        };
        assert!(err.to_string().starts_with("json codec failed"));
        assert_eq!(err.source().map(|s| s.to_string()), Some("boom".into()));
    }

    #[test]
    fn unknown_codec_names_the_codec() {
        let err = CodecError::UnknownCodec("yaml".into());
        assert!(err.to_string().contains("yaml"));
    }
}
