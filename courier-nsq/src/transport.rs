//! Transport metadata reported to the host framework.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::header::{Header, HeaderCarrier};

/// Name of a transport implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Kind(&'static str);

impl Kind {
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// The NSQ transport kind.
pub const KIND_NSQ: Kind = Kind::new("nsq");

/// A service instance a client may be routed to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    pub address: String,
    pub metadata: HashMap<String, String>,
}

impl Node {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            metadata: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Narrows the candidate nodes a client selects from.
pub type SelectFilter = Arc<dyn Fn(&[Node]) -> Vec<Node> + Send + Sync>;

/// Read-only transport description exposed to the host framework.
pub trait Transporter: Send + Sync {
    fn kind(&self) -> Kind;

    fn endpoint(&self) -> &str;

    /// Operation (topic or handler) this transport is serving.
    fn operation(&self) -> &str;

    fn request_header(&self) -> &dyn Header;

    fn reply_header(&self) -> &dyn Header;

    /// Filters applied when selecting nodes on the client side.
    fn select_filters(&self) -> &[SelectFilter];
}

/// Transport metadata for an NSQ publish or consume.
#[derive(Clone, Default)]
pub struct NsqTransport {
    endpoint: String,
    operation: String,
    request_header: HeaderCarrier,
    reply_header: HeaderCarrier,
    filters: Vec<SelectFilter>,
}

impl NsqTransport {
    pub fn new(endpoint: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            operation: operation.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_filter(mut self, filter: SelectFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Mutable request headers, for propagators that inject into them.
    pub fn request_header_mut(&mut self) -> &mut HeaderCarrier {
        &mut self.request_header
    }

    pub fn reply_header_mut(&mut self) -> &mut HeaderCarrier {
        &mut self.reply_header
    }

    /// Run every select filter over `nodes`, in registration order.
    pub fn select(&self, nodes: &[Node]) -> Vec<Node> {
        self.filters
            .iter()
            .fold(nodes.to_vec(), |candidates, filter| filter(&candidates))
    }
}

impl Transporter for NsqTransport {
    fn kind(&self) -> Kind {
        KIND_NSQ
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn operation(&self) -> &str {
        &self.operation
    }

    fn request_header(&self) -> &dyn Header {
        &self.request_header
    }

    fn reply_header(&self) -> &dyn Header {
        &self.reply_header
    }

    fn select_filters(&self) -> &[SelectFilter] {
        &self.filters
    }
}

impl fmt::Debug for NsqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NsqTransport")
            .field("endpoint", &self.endpoint)
            .field("operation", &self.operation)
            .field("filters", &self.filters.len())
            .finish()
    }
}
