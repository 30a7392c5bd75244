//! Observability and tracing infrastructure for courier.
//!
//! This crate provides OpenTelemetry-based tracing with support for:
//! - Ratio sampling that respects the parent's sampling decision
//! - Optional export to Jaeger (OTLP) or Zipkin collectors
//! - Integration with the tracing ecosystem

pub mod config;
pub mod error;
pub mod exporter;
pub mod provider;
pub mod tracer;

pub use config::TracerConfig;
pub use error::TracerError;
pub use exporter::ExporterKind;
pub use provider::{
    ServiceIdentity, TraceProvider, TracerProviderBuilder, UNKNOWN_VERSION, attributes,
    new_tracer_provider,
};
pub use tracer::{TracingGuard, current_span_id, current_trace_id, init_tracing};
