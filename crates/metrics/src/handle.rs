//! Metric sink trait, handle alias, and the log-mode sink.

use std::sync::Arc;

// ---------------------------------------------------------------------------
// MetricType
// ---------------------------------------------------------------------------

/// The aggregation kind of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricType {
    Counter,
    Gauge,
    Histogram,
}

impl MetricType {
    /// Lowercase name as it appears in the metrics configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricType::Counter => "counter",
            MetricType::Gauge => "gauge",
            MetricType::Histogram => "histogram",
        }
    }
}

// ---------------------------------------------------------------------------
// MetricError
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum MetricError {
    #[error("Metric {metric} expects {expected} dimension values, got {actual}")]
    DimensionMismatch {
        metric: String,
        expected: usize,
        actual: usize,
    },

    #[error("Metric sink failed: {0}")]
    Sink(String),
}

// ---------------------------------------------------------------------------
// MetricSink
// ---------------------------------------------------------------------------

/// A named, dimensioned measurement sink.
///
/// Implementations decide where a recorded value goes (log line, in-memory
/// aggregate, exporter). Recording must be cheap and non-blocking — it runs
/// inline on the job-completion path.
pub trait MetricSink: Send + Sync {
    fn name(&self) -> &str;

    fn metric_type(&self) -> MetricType;

    /// Unit label attached to emitted values, e.g. `"Microseconds"`.
    fn unit(&self) -> &str;

    /// Ordered dimension names; `record` expects values in this order.
    fn dimension_names(&self) -> &[String];

    /// Record one observation against a concrete dimension-value tuple.
    fn record(&self, dimension_values: &[String], value: f64) -> Result<(), MetricError>;
}

/// A resolved, reusable reference to a metric sink.
///
/// Resolved once from the registry and cached; cheap to clone.
pub type MetricHandle = Arc<dyn MetricSink>;

// ---------------------------------------------------------------------------
// LogMetric
// ---------------------------------------------------------------------------

/// Log-mode sink: each recorded value becomes one structured tracing event.
///
/// This is the default sink registered from the metrics configuration when
/// no exporter backend is wired in.
pub struct LogMetric {
    name: String,
    metric_type: MetricType,
    unit: String,
    dimension_names: Vec<String>,
}

impl LogMetric {
    pub fn new(
        name: impl Into<String>,
        metric_type: MetricType,
        unit: impl Into<String>,
        dimension_names: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            metric_type,
            unit: unit.into(),
            dimension_names,
        }
    }
}

impl MetricSink for LogMetric {
    fn name(&self) -> &str {
        &self.name
    }

    fn metric_type(&self) -> MetricType {
        self.metric_type
    }

    fn unit(&self) -> &str {
        &self.unit
    }

    fn dimension_names(&self) -> &[String] {
        &self.dimension_names
    }

    fn record(&self, dimension_values: &[String], value: f64) -> Result<(), MetricError> {
        if dimension_values.len() != self.dimension_names.len() {
            return Err(MetricError::DimensionMismatch {
                metric: self.name.clone(),
                expected: self.dimension_names.len(),
                actual: dimension_values.len(),
            });
        }

        // One "name:value|unit|dim=val,..." pair per event, mirroring the
        // dimension order declared in the configuration.
        let dimensions = self
            .dimension_names
            .iter()
            .zip(dimension_values)
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join(",");

        tracing::info!(
            target: "inferd::metrics",
            metric = %self.name,
            metric_type = self.metric_type.as_str(),
            unit = %self.unit,
            %dimensions,
            value,
            "Metric recorded",
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn latency_metric() -> LogMetric {
        LogMetric::new(
            "inference_latency",
            MetricType::Gauge,
            "Microseconds",
            vec!["model_name".into(), "model_version".into(), "hostname".into()],
        )
    }

    #[test]
    fn record_with_matching_dimensions() {
        let metric = latency_metric();
        let dims = vec!["resnet".into(), "1.0".into(), "host-a".into()];
        assert!(metric.record(&dims, 1234.5).is_ok());
    }

    #[test]
    fn record_with_wrong_dimension_count_fails() {
        let metric = latency_metric();
        let dims = vec!["resnet".into()];
        assert_matches!(
            metric.record(&dims, 1.0),
            Err(MetricError::DimensionMismatch {
                expected: 3,
                actual: 1,
                ..
            })
        );
    }

    #[test]
    fn accessors_expose_configuration() {
        let metric = latency_metric();
        assert_eq!(metric.name(), "inference_latency");
        assert_eq!(metric.metric_type(), MetricType::Gauge);
        assert_eq!(metric.unit(), "Microseconds");
        assert_eq!(metric.dimension_names().len(), 3);
    }
}
