//! Well-known frontend metric name and dimension constants.
//!
//! These are the canonical names used in the metrics configuration file and
//! resolved by the completion dispatcher at job-creation time.

/// End-to-end inference latency in microseconds (submission to completion).
pub const METRIC_INFERENCE_LATENCY: &str = "inference_latency";

/// Queue latency in microseconds (submission to worker dispatch).
pub const METRIC_QUEUE_LATENCY: &str = "queue_latency";

/// Queue time in whole milliseconds, aggregated per host rather than per
/// model.
pub const METRIC_QUEUE_TIME: &str = "queue_time";

/// Dimension value used in place of an unpinned model version.
pub const DIMENSION_DEFAULT_VERSION: &str = "default";

/// First dimension value of the host-level queue-time tuple.
pub const DIMENSION_HOST: &str = "Host";
