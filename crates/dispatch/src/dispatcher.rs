//! Completion dispatcher: formats a finished job's outcome, hands it to the
//! job's delivery channel, and records latency metrics.
//!
//! A dispatcher is constructed at job creation and consumed exactly once at
//! completion, by either [`CompletionDispatcher::deliver`] (success) or
//! [`CompletionDispatcher::deliver_error`] (failure). Both take `self` by
//! value, so double delivery is a compile error rather than a runtime bug.
//!
//! Metric handles are resolved from the registry once, up front. A name with
//! no registered sink resolves to `None` and silently disables that one
//! metric for the job — the frontend is designed to run with partial or no
//! metrics configured.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use inferd_core::job::{Job, JobCommand};
use inferd_core::model::ModelCatalog;
use inferd_metrics::metric_names::{
    DIMENSION_DEFAULT_VERSION, DIMENSION_HOST, METRIC_INFERENCE_LATENCY, METRIC_QUEUE_LATENCY,
    METRIC_QUEUE_TIME,
};
use inferd_metrics::{MetricHandle, MetricNamespace, MetricRegistry};

use crate::channel::{DeliveryChannel, DispatchError};
use crate::response::FormattedResponse;

const CONTENT_TYPE_JSON: &str = "application/json";

/// Map a status code onto the delivery channel's status enumeration.
///
/// The enumeration lacks a distinct "entity too large" code; "insufficient
/// storage" (507) is its nearest analog for HTTP 413.
fn remap_status(status: u16) -> u16 {
    if status == 413 {
        507
    } else {
        status
    }
}

// ---------------------------------------------------------------------------
// CompletionDispatcher
// ---------------------------------------------------------------------------

/// Delivers one job's outcome through its delivery channel, exactly once.
pub struct CompletionDispatcher {
    job: Job,
    channel: DeliveryChannel,
    catalog: Arc<dyn ModelCatalog>,
    inference_latency: Option<MetricHandle>,
    queue_latency: Option<MetricHandle>,
    queue_time: Option<MetricHandle>,
    latency_dimensions: Vec<String>,
    queue_time_dimensions: Vec<String>,
}

impl CompletionDispatcher {
    /// Bind a job to its delivery channel and resolve its metric handles.
    ///
    /// The dimension tuples are fixed here: `(model, version-or-"default",
    /// host)` for the two latency metrics, `("Host", host)` for queue time.
    pub fn new(
        job: Job,
        channel: DeliveryChannel,
        registry: &MetricRegistry,
        catalog: Arc<dyn ModelCatalog>,
        host_name: &str,
    ) -> Self {
        let latency_dimensions = vec![
            job.model_name().to_string(),
            job.model_version()
                .unwrap_or(DIMENSION_DEFAULT_VERSION)
                .to_string(),
            host_name.to_string(),
        ];
        let queue_time_dimensions = vec![DIMENSION_HOST.to_string(), host_name.to_string()];

        Self {
            channel,
            catalog,
            inference_latency: registry.lookup(MetricNamespace::Local, METRIC_INFERENCE_LATENCY),
            queue_latency: registry.lookup(MetricNamespace::Local, METRIC_QUEUE_LATENCY),
            queue_time: registry.lookup(MetricNamespace::Local, METRIC_QUEUE_TIME),
            latency_dimensions,
            queue_time_dimensions,
            job,
        }
    }

    /// Deliver the job's successful outcome.
    ///
    /// Formatting depends on the job's command kind; the formatted outcome
    /// goes to a live connection as-is, while a deferred awaiter receives
    /// only the raw `body` bytes.
    pub fn deliver(
        self,
        body: Vec<u8>,
        content_type: Option<&str>,
        status_code: u16,
        status_phrase: Option<&str>,
        headers: HashMap<String, String>,
    ) {
        match self.job.command() {
            JobCommand::Predict => {
                self.deliver_inference(body, content_type, status_code, status_phrase, headers)
            }
            JobCommand::Describe => {
                self.deliver_description(body, content_type, status_code, status_phrase, headers)
            }
        }
    }

    /// Deliver a failure outcome signaled by the scheduler or a worker.
    ///
    /// No metrics are recorded on this path; latency and queue-time metrics
    /// are success-path only.
    pub fn deliver_error(self, status_code: u16, message: &str) {
        if self.job.command() == JobCommand::Predict {
            tracing::debug!(
                queue_wait_ns = self.job.queue_wait().map(|d| d.as_nanos() as u64),
                total_ns = self.job.begin().elapsed().as_nanos() as u64,
                model = self.job.model_name(),
                "Inference job failed",
            );
        }
        send_error_outcome(self.channel, remap_status(status_code), message);
    }

    // -- PREDICT --------------------------------------------------------------

    fn deliver_inference(
        self,
        body: Vec<u8>,
        content_type: Option<&str>,
        status_code: u16,
        status_phrase: Option<&str>,
        headers: HashMap<String, String>,
    ) {
        let completed = self.job.completed().unwrap_or_else(Instant::now);
        let infer_time = completed - self.job.begin();
        let queue_wait = self
            .job
            .queue_wait()
            .expect("inference job delivered before being scheduled");

        tracing::debug!(
            queue_wait_ns = queue_wait.as_nanos() as u64,
            backend_ns = (infer_time - queue_wait).as_nanos() as u64,
            model = self.job.model_name(),
            "Inference job completed",
        );
        self.record_latency_metrics(infer_time, queue_wait);

        match self.channel {
            DeliveryChannel::Live(sender) => {
                let mut response = FormattedResponse::new(status_code, status_phrase)
                    .with_headers(headers)
                    .with_body(body);
                // Unlike DESCRIBE, no content type is forced here; the raw
                // payload keeps whatever type the worker declared.
                if let Some(ct) = content_type.filter(|ct| !ct.is_empty()) {
                    response.content_type = Some(ct.to_string());
                }
                sender.send_success(response);
            }
            DeliveryChannel::Deferred(handle) => handle.resolve(body),
        }
    }

    /// Record the three latency metrics, each behind its own error boundary
    /// so one misbehaving sink cannot suppress the others or block delivery.
    fn record_latency_metrics(&self, infer_time: Duration, queue_wait: Duration) {
        let infer_us = infer_time.as_nanos() as f64 / 1_000.0;
        let queue_us = queue_wait.as_nanos() as f64 / 1_000.0;
        let queue_ms = queue_wait.as_millis() as f64;

        if let Some(metric) = &self.inference_latency {
            if let Err(e) = metric.record(&self.latency_dimensions, infer_us) {
                tracing::error!(
                    metric = METRIC_INFERENCE_LATENCY,
                    error = %e,
                    "Failed to record frontend metric",
                );
            }
        }
        if let Some(metric) = &self.queue_latency {
            if let Err(e) = metric.record(&self.latency_dimensions, queue_us) {
                tracing::error!(
                    metric = METRIC_QUEUE_LATENCY,
                    error = %e,
                    "Failed to record frontend metric",
                );
            }
        }
        if let Some(metric) = &self.queue_time {
            if let Err(e) = metric.record(&self.queue_time_dimensions, queue_ms) {
                tracing::error!(
                    metric = METRIC_QUEUE_TIME,
                    error = %e,
                    "Failed to record frontend metric",
                );
            }
        }
    }

    // -- DESCRIBE -------------------------------------------------------------

    fn deliver_description(
        self,
        body: Vec<u8>,
        content_type: Option<&str>,
        status_code: u16,
        status_phrase: Option<&str>,
        headers: HashMap<String, String>,
    ) {
        let mut descriptions = match self
            .catalog
            .describe(self.job.model_name(), self.job.model_version())
        {
            Ok(descriptions) => descriptions,
            Err(e) => {
                // Lookup failures never propagate past this boundary; the
                // caller observes a well-formed 404 outcome instead.
                tracing::debug!(
                    model = self.job.model_name(),
                    version = self.job.model_version(),
                    error = %e,
                    "Model description lookup failed",
                );
                send_error_outcome(self.channel, 404, &e.to_string());
                return;
            }
        };

        if !body.is_empty() && descriptions.len() == 1 {
            descriptions[0].set_customized_metadata(&body);
        }

        let mut payload = match serde_json::to_vec_pretty(&descriptions) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(
                    model = self.job.model_name(),
                    error = %e,
                    "Failed to serialize model description",
                );
                send_error_outcome(self.channel, 500, "Failed to serialize model description");
                return;
            }
        };
        payload.push(b'\n');

        let content_type = match content_type {
            Some(ct) if !ct.is_empty() => ct.to_string(),
            _ => CONTENT_TYPE_JSON.to_string(),
        };
        let response = FormattedResponse::new(status_code, status_phrase)
            .with_content_type(content_type)
            .with_headers(headers)
            .with_body(payload);

        match self.channel {
            DeliveryChannel::Live(sender) => sender.send_success(response),
            DeliveryChannel::Deferred(handle) => handle.resolve(body),
        }
    }
}

/// Hand a failure outcome to the delivery channel.
fn send_error_outcome(channel: DeliveryChannel, status: u16, message: &str) {
    match channel {
        DeliveryChannel::Live(sender) => sender.send_error(status, message),
        DeliveryChannel::Deferred(handle) => handle.reject(DispatchError::Upstream {
            status,
            message: message.to_string(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
