//! Configuration for the tracer provider.

use serde::{Deserialize, Serialize};

use crate::error::TracerError;
use crate::provider::{TraceProvider, TracerProviderBuilder};

/// Tracing settings, usually read from the `[tracing]` table of a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TracerConfig {
    /// Exporter name ("jaeger" or "zipkin").
    #[serde(default = "default_exporter")]
    pub exporter: String,

    /// Collector endpoint. Empty means spans are not exported.
    #[serde(default)]
    pub endpoint: String,

    /// Service name for spans.
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Service instance id. Generated when empty.
    #[serde(default)]
    pub instance_id: String,

    /// Service version. "x.x.x" when empty.
    #[serde(default)]
    pub version: String,

    /// Sample rate (0.0 to 1.0).
    #[serde(default = "default_sample_ratio")]
    pub sample_ratio: f64,

    /// `tracing-subscriber` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_exporter() -> String {
    "jaeger".to_string()
}

fn default_service_name() -> String {
    "courier".to_string()
}

fn default_sample_ratio() -> f64 {
    1.0
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            exporter: default_exporter(),
            endpoint: String::new(),
            service_name: default_service_name(),
            instance_id: String::new(),
            version: String::new(),
            sample_ratio: default_sample_ratio(),
            log_filter: default_log_filter(),
        }
    }
}

impl TracerConfig {
    #[must_use]
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }

    /// Export to `endpoint` using the named exporter.
    #[must_use]
    pub fn with_exporter(mut self, exporter: impl Into<String>, endpoint: impl Into<String>) -> Self {
        self.exporter = exporter.into();
        self.endpoint = endpoint.into();
        self
    }

    #[must_use]
    pub fn with_sample_ratio(mut self, ratio: f64) -> Self {
        self.sample_ratio = ratio;
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Build a provider from these settings.
    pub fn build_provider(&self) -> Result<TraceProvider, TracerError> {
        TracerProviderBuilder::new(self.service_name.clone())
            .exporter(self.exporter.clone())
            .endpoint(self.endpoint.clone())
            .instance_id(self.instance_id.clone())
            .version(self.version.clone())
            .sample_ratio(self.sample_ratio)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracer_config_has_sensible_defaults() {
        let config = TracerConfig::default();

        assert_eq!(config.exporter, "jaeger");
        assert!(config.endpoint.is_empty());
        assert_eq!(config.service_name, "courier");
        assert!((config.sample_ratio - 1.0).abs() < f64::EPSILON);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: TracerConfig = toml::from_str(r#"service_name = "billing""#).unwrap();
        assert_eq!(config.service_name, "billing");
        assert_eq!(config, TracerConfig::default().with_service_name("billing"));
    }

    #[test]
    fn builder_methods_set_fields() {
        let config = TracerConfig::default()
            .with_exporter("zipkin", "http://zipkin:9411/api/v2/spans")
            .with_sample_ratio(0.25)
            .with_version("3.1.0");

        assert_eq!(config.exporter, "zipkin");
        assert_eq!(config.endpoint, "http://zipkin:9411/api/v2/spans");
        assert_eq!(config.version, "3.1.0");
    }

    #[test]
    fn build_provider_without_endpoint() {
        let provider = TracerConfig::default().with_version("").build_provider().unwrap();
        assert!(provider.exporter().is_none());
        assert_eq!(provider.identity().version, "x.x.x");
    }
}
