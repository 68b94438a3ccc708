//! Run summary and reporting
//!
//! This module defines structures for tracking and reporting extraction runs.

use crate::domain::{EdflowError, ErrorCategory, RecordKind};
use std::time::Duration;

/// Summary of one extraction run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Records delivered per kind, in completion order
    pub delivered: Vec<(RecordKind, usize)>,

    /// Kinds that failed, with the reason
    pub errors: Vec<RunError>,

    /// Duration of the run
    pub duration: Duration,

    /// Whether batches were printed instead of delivered
    pub dry_run: bool,
}

impl RunSummary {
    /// Create a new empty run summary
    pub fn new(dry_run: bool) -> Self {
        Self {
            delivered: Vec::new(),
            errors: Vec::new(),
            duration: Duration::ZERO,
            dry_run,
        }
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a kind that completed
    pub fn record_delivered(&mut self, kind: RecordKind, count: usize) {
        self.delivered.push((kind, count));
    }

    /// Add an error
    pub fn add_error(&mut self, error: RunError) {
        self.errors.push(error);
    }

    /// Records delivered for `kind`, if it completed
    pub fn delivered_for(&self, kind: RecordKind) -> Option<usize> {
        self.delivered
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, count)| *count)
    }

    /// Total records delivered across all kinds
    pub fn total_records(&self) -> usize {
        self.delivered.iter().map(|(_, count)| count).sum()
    }

    /// Check if every configured kind completed
    pub fn is_successful(&self) -> bool {
        self.errors.is_empty()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            kinds_completed = self.delivered.len(),
            kinds_failed = self.errors.len(),
            total_records = self.total_records(),
            duration_ms = self.duration.as_millis() as u64,
            dry_run = self.dry_run,
            "Run completed"
        );

        for (kind, count) in &self.delivered {
            tracing::info!(kind = %kind, records = count, "Kind completed");
        }

        if !self.errors.is_empty() {
            tracing::warn!(error_count = self.errors.len(), "Run completed with errors");
            for error in &self.errors {
                tracing::warn!(
                    kind = %error.kind,
                    category = %error.category,
                    retryable = error.retryable,
                    message = %error.message,
                    "Run error"
                );
            }
        }
    }
}

/// A record kind that failed during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunError {
    pub kind: RecordKind,
    pub category: ErrorCategory,
    pub retryable: bool,
    pub message: String,
}

impl RunError {
    pub fn new(kind: RecordKind, error: &EdflowError) -> Self {
        Self {
            kind,
            category: error.category(),
            retryable: error.is_retryable(),
            message: error.to_string(),
        }
    }
}
