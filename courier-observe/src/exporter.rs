//! Span exporter selection.

use std::fmt;
use std::str::FromStr;

use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::runtime;
use opentelemetry_sdk::trace::Builder;
use tokio::runtime::Handle;

use crate::error::TracerError;

/// Span exporters that can be attached to a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExporterKind {
    /// Jaeger collector, reached over OTLP/gRPC.
    Jaeger,
    /// Zipkin v2 HTTP endpoint.
    Zipkin,
}

impl ExporterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jaeger => "jaeger",
            Self::Zipkin => "zipkin",
        }
    }

    fn build_error(self, endpoint: &str, reason: impl fmt::Display) -> TracerError {
        TracerError::ExporterBuild {
            kind: self,
            endpoint: endpoint.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Build the exporter for `endpoint` and attach it to `builder` as a
    /// batching span processor.
    ///
    /// Both exporters spawn onto the Tokio runtime. Outside of one this
    /// returns [`TracerError::ExporterBuild`].
    pub(crate) fn attach(
        self,
        builder: Builder,
        endpoint: &str,
        service_name: &str,
    ) -> Result<Builder, TracerError> {
        Handle::try_current().map_err(|e| self.build_error(endpoint, e))?;

        match self {
            Self::Jaeger => {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_tonic()
                    .with_endpoint(endpoint)
                    .build()
                    .map_err(|e| self.build_error(endpoint, e))?;
                Ok(builder.with_batch_exporter(exporter, runtime::Tokio))
            }
            Self::Zipkin => {
                let exporter = opentelemetry_zipkin::new_pipeline()
                    .with_service_name(service_name)
                    .with_collector_endpoint(endpoint)
                    .with_http_client(reqwest::Client::new())
                    .init_exporter()
                    .map_err(|e| self.build_error(endpoint, e))?;
                Ok(builder.with_batch_exporter(exporter, runtime::Tokio))
            }
        }
    }
}

impl fmt::Display for ExporterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExporterKind {
    type Err = TracerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jaeger" => Ok(Self::Jaeger),
            "zipkin" => Ok(Self::Zipkin),
            other => Err(TracerError::UnsupportedExporter(other.to_string())),
        }
    }
}
