//! NSQ transport glue for courier.
//!
//! NSQ frames carry a body and nothing else, so this crate covers what sits
//! around the wire client: transport metadata, a header carrier that holds
//! no data, and the codec binding used for message bodies.
//!
//! # Key Types
//!
//! - [`NsqTransport`] - Transport metadata reported to the host framework
//! - [`HeaderCarrier`] - Always-empty header carrier
//! - [`MessageCodec`] - Codec selection for message bodies
//! - [`BrokerConfig`] - TOML configuration, including the `[tracing]` table

pub mod codec;
pub mod config;
pub mod error;
pub mod header;
pub mod transport;

// Re-exports
pub use codec::MessageCodec;
pub use config::BrokerConfig;
pub use error::{Error, Result};
pub use header::{Header, HeaderCarrier};
pub use transport::{KIND_NSQ, Kind, Node, NsqTransport, SelectFilter, Transporter};
