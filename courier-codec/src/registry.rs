//! Explicit, name-keyed codec registry.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::codecs::{Codec, JsonCodec, TomlCodec};
use crate::error::CodecError;

/// Name-keyed set of codecs owned by whoever needs them.
///
/// There is no process-wide registry: build one, register codecs in a known
/// order, and hand it to the transport.
#[derive(Clone, Default)]
pub struct CodecRegistry {
    codecs: BTreeMap<String, Arc<dyn Codec>>,
}

impl CodecRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in codecs, registered as `json`
    /// then `toml`.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(JsonCodec));
        registry.register(Arc::new(TomlCodec));
        registry
    }

    /// Register a codec under its own name.
    ///
    /// Returns the codec previously registered under that name, if any.
    pub fn register(&mut self, codec: Arc<dyn Codec>) -> Option<Arc<dyn Codec>> {
        let name = codec.name().to_string();
        debug!(codec = %name, "registering codec");
        self.codecs.insert(name, codec)
    }

    /// Look up a codec by name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Codec>> {
        self.codecs.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.codecs.contains_key(name)
    }

    /// Registered codec names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.codecs.keys().map(String::as_str).collect()
    }

    /// Resolve an optional codec name.
    ///
    /// `None` means "no codec" and resolves to `Ok(None)`, which selects the
    /// fallback encodings. A name that is not registered is an error.
    pub fn resolve(&self, name: Option<&str>) -> Result<Option<Arc<dyn Codec>>, CodecError> {
        match name {
            None => Ok(None),
            Some(name) => self
                .get(name)
                .map(Some)
                .ok_or_else(|| CodecError::UnknownCodec(name.to_string())),
        }
    }
}

impl fmt::Debug for CodecRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodecRegistry")
            .field("codecs", &self.names())
            .finish()
    }
}
