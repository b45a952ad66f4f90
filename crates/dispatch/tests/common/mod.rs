//! Shared fakes for dispatch behavior tests: an instrumented live sender,
//! recording/failing metric sinks, and a canned model catalog.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use inferd_core::error::CoreError;
use inferd_core::model::{ModelCatalog, ModelDescription};
use inferd_dispatch::{FormattedResponse, LiveSender};
use inferd_metrics::{MetricError, MetricSink, MetricType};

// ---------------------------------------------------------------------------
// RecordingSender
// ---------------------------------------------------------------------------

/// What a live connection observed, if anything.
#[derive(Debug)]
pub enum SentOutcome {
    Success(FormattedResponse),
    Error { status: u16, message: String },
}

/// Live sender that captures the single outcome handed to it.
pub struct RecordingSender {
    outcome: Arc<Mutex<Option<SentOutcome>>>,
}

impl RecordingSender {
    pub fn new() -> (Self, Arc<Mutex<Option<SentOutcome>>>) {
        let outcome = Arc::new(Mutex::new(None));
        (
            Self {
                outcome: Arc::clone(&outcome),
            },
            outcome,
        )
    }
}

impl LiveSender for RecordingSender {
    fn send_success(self: Box<Self>, response: FormattedResponse) {
        *self.outcome.lock().unwrap() = Some(SentOutcome::Success(response));
    }

    fn send_error(self: Box<Self>, status: u16, message: &str) {
        *self.outcome.lock().unwrap() = Some(SentOutcome::Error {
            status,
            message: message.to_string(),
        });
    }
}

/// Unwrap the success outcome captured by a [`RecordingSender`].
pub fn sent_success(outcome: &Arc<Mutex<Option<SentOutcome>>>) -> FormattedResponse {
    match outcome.lock().unwrap().take() {
        Some(SentOutcome::Success(response)) => response,
        other => panic!("expected a success outcome, got {other:?}"),
    }
}

/// Unwrap the error outcome captured by a [`RecordingSender`].
pub fn sent_error(outcome: &Arc<Mutex<Option<SentOutcome>>>) -> (u16, String) {
    match outcome.lock().unwrap().take() {
        Some(SentOutcome::Error { status, message }) => (status, message),
        other => panic!("expected an error outcome, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Metric sinks
// ---------------------------------------------------------------------------

/// Sink that appends every observation to a shared log.
pub struct RecordingSink {
    name: String,
    dimension_names: Vec<String>,
    records: Arc<Mutex<Vec<(Vec<String>, f64)>>>,
}

impl RecordingSink {
    pub fn new(name: &str, dimension_names: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            dimension_names: dimension_names.iter().map(|d| d.to_string()).collect(),
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Shared handle to the observation log.
    pub fn records(&self) -> Arc<Mutex<Vec<(Vec<String>, f64)>>> {
        Arc::clone(&self.records)
    }
}

impl MetricSink for RecordingSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn metric_type(&self) -> MetricType {
        MetricType::Gauge
    }

    fn unit(&self) -> &str {
        "Unitless"
    }

    fn dimension_names(&self) -> &[String] {
        &self.dimension_names
    }

    fn record(&self, dimension_values: &[String], value: f64) -> Result<(), MetricError> {
        self.records
            .lock()
            .unwrap()
            .push((dimension_values.to_vec(), value));
        Ok(())
    }
}

/// Sink that rejects every observation.
pub struct FailingSink {
    name: String,
}

impl FailingSink {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl MetricSink for FailingSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn metric_type(&self) -> MetricType {
        MetricType::Gauge
    }

    fn unit(&self) -> &str {
        "Unitless"
    }

    fn dimension_names(&self) -> &[String] {
        &[]
    }

    fn record(&self, _dimension_values: &[String], _value: f64) -> Result<(), MetricError> {
        Err(MetricError::Sink("sink offline".to_string()))
    }
}

// ---------------------------------------------------------------------------
// StaticCatalog
// ---------------------------------------------------------------------------

/// Catalog that serves a canned answer.
pub enum StaticCatalog {
    Descriptions(Vec<ModelDescription>),
    ModelMissing,
    VersionMissing,
}

impl StaticCatalog {
    pub fn empty() -> Arc<Self> {
        Arc::new(StaticCatalog::Descriptions(Vec::new()))
    }

    pub fn single(description: ModelDescription) -> Arc<Self> {
        Arc::new(StaticCatalog::Descriptions(vec![description]))
    }
}

impl ModelCatalog for StaticCatalog {
    fn describe(
        &self,
        model_name: &str,
        version: Option<&str>,
    ) -> Result<Vec<ModelDescription>, CoreError> {
        match self {
            StaticCatalog::Descriptions(descriptions) => Ok(descriptions.clone()),
            StaticCatalog::ModelMissing => Err(CoreError::ModelNotFound {
                model: model_name.to_string(),
            }),
            StaticCatalog::VersionMissing => Err(CoreError::ModelVersionNotFound {
                model: model_name.to_string(),
                version: version.unwrap_or("default").to_string(),
            }),
        }
    }
}
