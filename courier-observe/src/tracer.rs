//! Tracing setup and configuration.
//!
//! This module provides:
//! - Global `tracing` subscriber installation backed by a [`TraceProvider`]
//! - A guard that flushes spans on shutdown
//! - Lookups of the active trace and span ids for log correlation

use opentelemetry::trace::{SpanId, TraceContextExt, TraceId};
use tracing_opentelemetry::OpenTelemetrySpanExt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry};

use crate::config::TracerConfig;
use crate::error::TracerError;
use crate::provider::TraceProvider;

/// Guard that shuts down tracing when dropped.
///
/// This guard holds the tracer provider and ensures
/// proper shutdown when the guard is dropped.
pub struct TracingGuard {
    provider: Option<TraceProvider>,
}

impl TracingGuard {
    /// The provider backing the global subscriber.
    pub fn provider(&self) -> Option<&TraceProvider> {
        self.provider.as_ref()
    }

    /// Shutdown the tracer and flush pending spans.
    pub fn shutdown(&mut self) {
        if let Some(provider) = self.provider.take()
            && let Err(e) = provider.shutdown()
        {
            tracing::warn!("failed to shutdown tracer provider: {e}");
        }
    }
}

impl Drop for TracingGuard {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Initialize the global tracing subscriber with OpenTelemetry.
///
/// The provider is built from `config` and also installed as the global
/// OpenTelemetry provider. `RUST_LOG` overrides `config.log_filter`.
///
/// Returns a guard that must be kept alive for the duration of the program.
/// When the guard is dropped, tracing is shut down and pending spans are flushed.
///
/// # Errors
///
/// Returns an error if the provider cannot be built or the global subscriber
/// has already been set.
pub fn init_tracing(config: &TracerConfig) -> Result<TracingGuard, TracerError> {
    let provider = config.build_provider()?;
    let tracer = provider.tracer(config.service_name.clone());

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);

    Registry::default()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(otel_layer)
        .try_init()?;

    provider.install_global();

    Ok(TracingGuard {
        provider: Some(provider),
    })
}

/// Get the current trace ID if inside an active span.
///
/// Returns `None` if:
/// - Not inside any span
/// - The span doesn't have OpenTelemetry context
/// - The trace ID is invalid (all zeros)
#[must_use]
pub fn current_trace_id() -> Option<TraceId> {
    let context = tracing::Span::current().context();
    let span_ref = context.span();
    let span_context = span_ref.span_context();

    span_context.is_valid().then(|| span_context.trace_id())
}

/// Get the current span ID if inside an active span.
#[must_use]
pub fn current_span_id() -> Option<SpanId> {
    let context = tracing::Span::current().context();
    let span_ref = context.span();
    let span_context = span_ref.span_context();

    span_context.is_valid().then(|| span_context.span_id())
}
