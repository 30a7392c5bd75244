//! Error types for tracer setup.

use crate::exporter::ExporterKind;

/// Error type for tracer construction and installation.
#[derive(Debug, thiserror::Error)]
pub enum TracerError {
    /// The requested exporter name is not one we can build.
    #[error("exporter type not supported: {0}")]
    UnsupportedExporter(String),

    /// The exporter client could not be constructed.
    #[error("failed to build {kind} exporter for {endpoint}: {reason}")]
    ExporterBuild {
        kind: ExporterKind,
        endpoint: String,
        reason: String,
    },

    /// Flushing or shutting down the provider failed.
    #[error("failed to shutdown tracer provider: {0}")]
    Shutdown(#[from] opentelemetry::trace::TraceError),

    /// Failed to set global subscriber.
    #[error("failed to set global subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing_subscriber::util::TryInitError),
}
