//! One unit of submitted inference or model-description work, tracked from
//! creation through completion.
//!
//! A [`Job`] carries three monotonic timestamps: `created_at` (submission),
//! `scheduled_at` (dispatch to a worker), and `completed_at` (result ready).
//! Each is set at most once and the three are strictly ordered. Violating
//! either rule is a programming error in the scheduler and panics instead of
//! being silently tolerated.

use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// JobCommand
// ---------------------------------------------------------------------------

/// The kind of work a job asks a worker to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobCommand {
    /// Run inference; the response body is the raw model output.
    Predict,
    /// Describe the model; the response body is a JSON description array.
    Describe,
}

// ---------------------------------------------------------------------------
// Job
// ---------------------------------------------------------------------------

/// An immutable record of model identity, command kind, and job timing.
///
/// Owned by the scheduler until completion, at which point it is handed to
/// the completion dispatcher together with the job's delivery channel.
#[derive(Debug, Clone)]
pub struct Job {
    model_name: String,
    model_version: Option<String>,
    command: JobCommand,
    created_at: Instant,
    scheduled_at: Option<Instant>,
    completed_at: Option<Instant>,
}

impl Job {
    /// Create a job submitted now.
    pub fn new(
        model_name: impl Into<String>,
        model_version: Option<String>,
        command: JobCommand,
    ) -> Self {
        Self::created_at(model_name, model_version, command, Instant::now())
    }

    /// Create a job with an explicit submission instant.
    pub fn created_at(
        model_name: impl Into<String>,
        model_version: Option<String>,
        command: JobCommand,
        created_at: Instant,
    ) -> Self {
        Self {
            model_name: model_name.into(),
            model_version,
            command,
            created_at,
            scheduled_at: None,
            completed_at: None,
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn model_version(&self) -> Option<&str> {
        self.model_version.as_deref()
    }

    pub fn command(&self) -> JobCommand {
        self.command
    }

    pub fn begin(&self) -> Instant {
        self.created_at
    }

    pub fn scheduled(&self) -> Option<Instant> {
        self.scheduled_at
    }

    pub fn completed(&self) -> Option<Instant> {
        self.completed_at
    }

    /// Mark the job as dispatched to a worker, now.
    ///
    /// # Panics
    ///
    /// Panics if the job was already scheduled.
    pub fn mark_scheduled(&mut self) {
        self.mark_scheduled_at(Instant::now());
    }

    /// Mark the job as dispatched at an explicit instant.
    ///
    /// # Panics
    ///
    /// Panics if the job was already scheduled or if `at` precedes
    /// `created_at`.
    pub fn mark_scheduled_at(&mut self, at: Instant) {
        assert!(
            self.scheduled_at.is_none(),
            "job for model {} scheduled twice",
            self.model_name
        );
        assert!(
            at >= self.created_at,
            "job for model {} scheduled before it was created",
            self.model_name
        );
        self.scheduled_at = Some(at);
    }

    /// Mark the job as completed, now.
    ///
    /// # Panics
    ///
    /// Panics if the job was already completed.
    pub fn mark_completed(&mut self) {
        self.mark_completed_at(Instant::now());
    }

    /// Mark the job as completed at an explicit instant.
    ///
    /// # Panics
    ///
    /// Panics if the job was already completed or if `at` precedes the
    /// scheduling instant (or creation, when never scheduled).
    pub fn mark_completed_at(&mut self, at: Instant) {
        assert!(
            self.completed_at.is_none(),
            "job for model {} completed twice",
            self.model_name
        );
        let floor = self.scheduled_at.unwrap_or(self.created_at);
        assert!(
            at >= floor,
            "job for model {} completed before it was scheduled",
            self.model_name
        );
        self.completed_at = Some(at);
    }

    /// Time the job spent waiting in the queue (`scheduled_at - created_at`).
    ///
    /// `None` until the job has been scheduled.
    pub fn queue_wait(&self) -> Option<Duration> {
        self.scheduled_at.map(|s| s - self.created_at)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
