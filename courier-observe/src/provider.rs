//! Tracer provider construction.
//!
//! A provider is built once at startup from a service identity, a sampling
//! ratio and an optional exporter. Without an endpoint the provider still
//! samples spans but exports them nowhere.

use std::fmt;

use opentelemetry::KeyValue;
use opentelemetry::global;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::{Sampler, Tracer, TracerProvider};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::TracerError;
use crate::exporter::ExporterKind;

/// Version reported when the caller does not provide one.
pub const UNKNOWN_VERSION: &str = "x.x.x";

/// Resource attribute names attached to every provider.
pub mod attributes {
    pub const SERVICE_NAME: &str = "service.name";
    pub const SERVICE_INSTANCE_ID: &str = "service.instance.id";
    pub const SERVICE_VERSION: &str = "service.version";
}

/// The service identity recorded on a provider's resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceIdentity {
    pub name: String,
    pub instance_id: String,
    pub version: String,
}

impl ServiceIdentity {
    /// Fill in a generated instance id and the placeholder version where
    /// the caller left them empty.
    pub fn resolve(
        name: impl Into<String>,
        instance_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        let mut instance_id = instance_id.into();
        if instance_id.is_empty() {
            instance_id = Uuid::now_v7().to_string();
        }
        let mut version = version.into();
        if version.is_empty() {
            version = UNKNOWN_VERSION.to_string();
        }
        Self {
            name: name.into(),
            instance_id,
            version,
        }
    }

    fn resource(&self) -> Resource {
        Resource::new([
            KeyValue::new(attributes::SERVICE_NAME, self.name.clone()),
            KeyValue::new(attributes::SERVICE_INSTANCE_ID, self.instance_id.clone()),
            KeyValue::new(attributes::SERVICE_VERSION, self.version.clone()),
        ])
    }
}

/// Fluent builder for a [`TraceProvider`].
#[derive(Debug, Clone)]
pub struct TracerProviderBuilder {
    exporter: String,
    endpoint: String,
    service_name: String,
    instance_id: String,
    version: String,
    sample_ratio: f64,
}

impl TracerProviderBuilder {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            exporter: String::new(),
            endpoint: String::new(),
            service_name: service_name.into(),
            instance_id: String::new(),
            version: String::new(),
            sample_ratio: 1.0,
        }
    }

    /// Exporter name, only consulted when an endpoint is set.
    #[must_use]
    pub fn exporter(mut self, name: impl Into<String>) -> Self {
        self.exporter = name.into();
        self
    }

    /// Collector endpoint. Empty disables export.
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn instance_id(mut self, instance_id: impl Into<String>) -> Self {
        self.instance_id = instance_id.into();
        self
    }

    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Fraction of root traces to sample, in `[0, 1]`.
    #[must_use]
    pub fn sample_ratio(mut self, ratio: f64) -> Self {
        self.sample_ratio = ratio;
        self
    }

    /// Build the provider.
    ///
    /// # Errors
    ///
    /// Fails when an endpoint is set and the exporter name is unsupported or
    /// the exporter cannot be constructed. An empty endpoint never fails.
    ///
    /// Attaching an exporter spawns its batch worker onto the current Tokio
    /// runtime, so building with an endpoint outside a runtime fails.
    pub fn build(self) -> Result<TraceProvider, TracerError> {
        let identity = ServiceIdentity::resolve(self.service_name, self.instance_id, self.version);
        let ratio = clamp_ratio(self.sample_ratio);

        let mut builder = TracerProvider::builder()
            .with_sampler(Sampler::ParentBased(Box::new(Sampler::TraceIdRatioBased(ratio))))
            .with_resource(identity.resource());

        let mut exporter = None;
        if self.endpoint.is_empty() {
            debug!(
                service = %identity.name,
                "no trace endpoint configured; spans are sampled but not exported"
            );
        } else {
            let kind: ExporterKind = self.exporter.parse()?;
            builder = kind.attach(builder, &self.endpoint, &identity.name)?;
            exporter = Some(kind);
        }

        info!(
            service = %identity.name,
            instance = %identity.instance_id,
            version = %identity.version,
            exporter = exporter.as_ref().map(ExporterKind::as_str).unwrap_or("none"),
            ratio,
            "tracer provider built"
        );

        Ok(TraceProvider {
            provider: builder.build(),
            identity,
            exporter,
            sample_ratio: ratio,
        })
    }
}

/// Build a tracer provider from positional settings.
///
/// Equivalent to [`TracerProviderBuilder`] with every field set.
pub fn new_tracer_provider(
    exporter: &str,
    endpoint: &str,
    service_name: &str,
    instance_id: &str,
    version: &str,
    sample_ratio: f64,
) -> Result<TraceProvider, TracerError> {
    TracerProviderBuilder::new(service_name)
        .exporter(exporter)
        .endpoint(endpoint)
        .instance_id(instance_id)
        .version(version)
        .sample_ratio(sample_ratio)
        .build()
}

fn clamp_ratio(ratio: f64) -> f64 {
    if ratio.is_nan() {
        warn!("sample ratio is NaN; sampling disabled");
        return 0.0;
    }
    let clamped = ratio.clamp(0.0, 1.0);
    if clamped != ratio {
        warn!(ratio, clamped, "sample ratio outside [0, 1]; clamped");
    }
    clamped
}

/// A built tracer provider and the settings it was built with.
///
/// The provider owns its batching queue. Call [`TraceProvider::shutdown`]
/// before exit to flush buffered spans.
#[derive(Clone)]
pub struct TraceProvider {
    provider: TracerProvider,
    identity: ServiceIdentity,
    exporter: Option<ExporterKind>,
    sample_ratio: f64,
}

impl TraceProvider {
    /// Get a tracer for an instrumentation scope.
    pub fn tracer(&self, name: impl Into<String>) -> Tracer {
        self.provider.tracer(name.into())
    }

    /// The underlying SDK provider.
    pub fn provider(&self) -> &TracerProvider {
        &self.provider
    }

    pub fn identity(&self) -> &ServiceIdentity {
        &self.identity
    }

    /// The attached exporter, or `None` when spans are not exported.
    pub fn exporter(&self) -> Option<ExporterKind> {
        self.exporter
    }

    pub fn sample_ratio(&self) -> f64 {
        self.sample_ratio
    }

    /// Make this provider the process-wide OpenTelemetry provider.
    ///
    /// Replaces any provider installed earlier. The global handle to the
    /// replaced provider is released; it shuts down with its last handle.
    pub fn install_global(&self) {
        let _previous = global::set_tracer_provider(self.provider.clone());
        debug!(service = %self.identity.name, "installed global tracer provider");
    }

    /// Flush pending spans and shut the provider down.
    pub fn shutdown(&self) -> Result<(), TracerError> {
        self.provider.shutdown()?;
        Ok(())
    }
}

impl fmt::Debug for TraceProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceProvider")
            .field("identity", &self.identity)
            .field("exporter", &self.exporter)
            .field("sample_ratio", &self.sample_ratio)
            .finish_non_exhaustive()
    }
}
