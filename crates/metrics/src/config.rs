//! Declarative metrics configuration.
//!
//! The configuration document declares a central `dimensions` list plus
//! `system_metrics` and `model_metrics` groups, each split into `counter`,
//! `gauge`, and `histogram` lists:
//!
//! ```json
//! {
//!   "dimensions": ["model_name", "model_version", "hostname"],
//!   "system_metrics": {
//!     "gauge": [
//!       { "name": "queue_time", "unit": "Milliseconds", "dimensions": ["hostname"] }
//!     ]
//!   },
//!   "model_metrics": {
//!     "gauge": [
//!       { "name": "inference_latency", "unit": "Microseconds",
//!         "dimensions": ["model_name", "model_version", "hostname"] }
//!     ]
//!   }
//! }
//! ```
//!
//! A parse or validation failure yields an error and no partial
//! configuration; startup code decides whether to continue without metrics.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::handle::{LogMetric, MetricType};
use crate::registry::{MetricNamespace, MetricRegistry};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum MetricsConfigError {
    #[error("Failed to read metrics configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse metrics configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid metrics configuration: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// Document shape
// ---------------------------------------------------------------------------

/// One metric declaration: name, unit, and the dimension names it is
/// recorded against (values supplied per observation, in this order).
#[derive(Debug, Clone, Deserialize)]
pub struct MetricSpec {
    pub name: String,
    pub unit: String,
    pub dimensions: Vec<String>,
}

/// Metric declarations of one group, keyed by aggregation kind.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricGroup {
    #[serde(default)]
    pub counter: Vec<MetricSpec>,
    #[serde(default)]
    pub gauge: Vec<MetricSpec>,
    #[serde(default)]
    pub histogram: Vec<MetricSpec>,
}

impl MetricGroup {
    /// Iterate all declarations in the group together with their kind.
    fn specs(&self) -> impl Iterator<Item = (MetricType, &MetricSpec)> {
        self.counter
            .iter()
            .map(|s| (MetricType::Counter, s))
            .chain(self.gauge.iter().map(|s| (MetricType::Gauge, s)))
            .chain(self.histogram.iter().map(|s| (MetricType::Histogram, s)))
    }
}

/// The full metrics configuration document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricsConfig {
    /// Central dimension-name vocabulary; every metric dimension must be
    /// declared here.
    #[serde(default)]
    pub dimensions: Vec<String>,

    /// Metrics measured by the serving frontend itself.
    #[serde(default)]
    pub system_metrics: MetricGroup,

    /// Metrics measured per model.
    #[serde(default)]
    pub model_metrics: MetricGroup,
}

impl MetricsConfig {
    /// Parse and validate a configuration document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, MetricsConfigError> {
        let config: MetricsConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MetricsConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// All metric declarations across both groups.
    pub fn all_specs(&self) -> impl Iterator<Item = (MetricType, &MetricSpec)> {
        self.system_metrics.specs().chain(self.model_metrics.specs())
    }

    fn validate(&self) -> Result<(), MetricsConfigError> {
        let mut seen = std::collections::HashSet::new();
        for name in &self.dimensions {
            if name.is_empty() {
                return Err(MetricsConfigError::Invalid(
                    "Dimension names under the central \"dimensions\" key must not be empty"
                        .to_string(),
                ));
            }
            if !seen.insert(name.as_str()) {
                return Err(MetricsConfigError::Invalid(format!(
                    "Dimension name \"{name}\" declared more than once under the central \
                     \"dimensions\" key"
                )));
            }
        }

        for (_, spec) in self.all_specs() {
            if spec.name.is_empty() {
                return Err(MetricsConfigError::Invalid(
                    "Metric declarations require a non-empty \"name\"".to_string(),
                ));
            }

            let mut metric_dims = std::collections::HashSet::new();
            for dim in &spec.dimensions {
                if !seen.contains(dim.as_str()) {
                    return Err(MetricsConfigError::Invalid(format!(
                        "Dimension \"{dim}\" of metric {} is not declared under the central \
                         \"dimensions\" key",
                        spec.name
                    )));
                }
                if !metric_dims.insert(dim.as_str()) {
                    return Err(MetricsConfigError::Invalid(format!(
                        "Dimensions of metric {} must be unique",
                        spec.name
                    )));
                }
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Registry population
// ---------------------------------------------------------------------------

/// Register one log-mode sink per declared metric into `namespace`.
///
/// Registration is last-write-wins, so re-populating after a config reload
/// simply replaces the previous sinks.
pub fn populate_registry(
    registry: &MetricRegistry,
    namespace: MetricNamespace,
    config: &MetricsConfig,
) {
    for (metric_type, spec) in config.all_specs() {
        let sink = LogMetric::new(
            spec.name.clone(),
            metric_type,
            spec.unit.clone(),
            spec.dimensions.clone(),
        );
        registry.register(namespace, spec.name.clone(), Arc::new(sink));
    }
    tracing::debug!(
        dimensions = config.dimensions.len(),
        metrics = config.all_specs().count(),
        "Metric registry populated",
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
