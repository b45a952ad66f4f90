//! Frontend metrics: sinks, the dual-namespace registry, and the
//! declarative metrics configuration.
//!
//! Metric sinks are registered once at startup (see [`config`]) and looked
//! up by name afterwards. A missing metric is a normal condition — callers
//! hold an `Option<MetricHandle>` and skip recording when it is `None`, so
//! the system runs fine with partial or no metrics configured.

pub mod config;
pub mod handle;
pub mod metric_names;
pub mod registry;

pub use handle::{LogMetric, MetricError, MetricHandle, MetricSink, MetricType};
pub use registry::{MetricNamespace, MetricRegistry};
