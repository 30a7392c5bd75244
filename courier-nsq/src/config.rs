//! Configuration for the NSQ transport.

use std::path::Path;

use courier_codec::CodecRegistry;
use courier_observe::{TraceProvider, TracerConfig};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec::MessageCodec;
use crate::error::{Error, Result};
use crate::transport::NsqTransport;

/// Broker settings, read from TOML.
///
/// ```toml
/// endpoint = "127.0.0.1:4150"
/// codec = "json"
///
/// [tracing]
/// exporter = "zipkin"
/// endpoint = "http://zipkin:9411/api/v2/spans"
/// sample_ratio = 0.1
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// nsqd TCP address.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Registered codec name. Absent means raw/binary fallback encoding.
    #[serde(default)]
    pub codec: Option<String>,

    #[serde(default)]
    pub tracing: TracerConfig,
}

fn default_endpoint() -> String {
    "127.0.0.1:4150".to_string()
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            codec: None,
            tracing: TracerConfig::default(),
        }
    }
}

impl BrokerConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading broker config");
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_codec(mut self, codec: impl Into<String>) -> Self {
        self.codec = Some(codec.into());
        self
    }

    /// Resolve the configured codec against `registry`.
    pub fn message_codec(&self, registry: &CodecRegistry) -> Result<MessageCodec> {
        MessageCodec::from_registry(registry, self.codec.as_deref())
    }

    /// Build the tracer provider described by the `[tracing]` table.
    pub fn tracer_provider(&self) -> Result<TraceProvider> {
        self.tracing.build_provider().map_err(Error::from)
    }

    /// Transport metadata for `operation` on the configured endpoint.
    pub fn transport(&self, operation: impl Into<String>) -> NsqTransport {
        NsqTransport::new(self.endpoint.clone(), operation)
    }
}
