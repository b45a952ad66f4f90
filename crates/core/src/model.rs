//! Model description records and the catalog lookup seam.
//!
//! [`ModelDescription`] is the unit of a DESCRIBE response. Field names are
//! serialized in camelCase because the JSON array shape is the one
//! externally observable byte-level contract of the frontend.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// WorkerStatus
// ---------------------------------------------------------------------------

/// Status of one worker process currently serving a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerStatus {
    /// Worker identifier assigned by the worker manager.
    pub id: String,

    /// Lifecycle status, e.g. `"READY"` or `"UNLOADING"`.
    pub status: String,

    /// When the worker process was started (UTC).
    pub start_time: Timestamp,

    /// Resident memory of the worker process in bytes.
    pub memory_usage: u64,
}

// ---------------------------------------------------------------------------
// ModelDescription
// ---------------------------------------------------------------------------

/// Description of one registered model version.
///
/// Constructed via [`ModelDescription::new`] and enriched with the builder
/// methods before being serialized into a DESCRIBE response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDescription {
    pub model_name: String,

    pub model_version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_url: Option<String>,

    /// Backend runtime executing the model, e.g. `"python"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,

    pub min_workers: u32,

    pub max_workers: u32,

    pub batch_size: u32,

    /// Maximum time in milliseconds a batch is held open before dispatch.
    pub max_batch_delay_ms: u32,

    /// Aggregate model status, e.g. `"Healthy"`.
    pub status: String,

    #[serde(default)]
    pub workers: Vec<WorkerStatus>,

    /// Opaque, model-supplied metadata attached at completion time when the
    /// worker returned a payload alongside the description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customized_metadata: Option<String>,
}

impl ModelDescription {
    /// Create a description with only the required identity fields.
    pub fn new(model_name: impl Into<String>, model_version: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            model_version: model_version.into(),
            model_url: None,
            runtime: None,
            min_workers: 0,
            max_workers: 0,
            batch_size: 1,
            max_batch_delay_ms: 100,
            status: "Healthy".to_string(),
            workers: Vec::new(),
            customized_metadata: None,
        }
    }

    /// Set the archive URL the model was loaded from.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.model_url = Some(url.into());
        self
    }

    /// Set the backend runtime name.
    pub fn with_runtime(mut self, runtime: impl Into<String>) -> Self {
        self.runtime = Some(runtime.into());
        self
    }

    /// Set the worker scaling bounds.
    pub fn with_workers(mut self, min: u32, max: u32) -> Self {
        self.min_workers = min;
        self.max_workers = max;
        self
    }

    /// Attach the opaque customized-metadata payload.
    ///
    /// The payload is carried as an opaque string; non-UTF-8 bytes are
    /// replaced rather than rejected since the field is informational.
    pub fn set_customized_metadata(&mut self, payload: &[u8]) {
        self.customized_metadata = Some(String::from_utf8_lossy(payload).into_owned());
    }
}

// ---------------------------------------------------------------------------
// ModelCatalog
// ---------------------------------------------------------------------------

/// Read-only lookup into the model registry.
///
/// Implemented by the registry subsystem; the completion dispatcher only
/// consumes it when formatting DESCRIBE responses.
pub trait ModelCatalog: Send + Sync {
    /// Describe a model, or one specific version of it when `version` is
    /// given.
    ///
    /// Fails with [`CoreError::ModelNotFound`] /
    /// [`CoreError::ModelVersionNotFound`] when the identity is unknown.
    fn describe(
        &self,
        model_name: &str,
        version: Option<&str>,
    ) -> Result<Vec<ModelDescription>, CoreError>;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
