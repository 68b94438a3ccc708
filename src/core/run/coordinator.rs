//! Run coordinator - one extraction run across all configured record kinds
//!
//! Each kind is queried on its own pooled connection, transformed and handed
//! to the upload sink. Kinds run concurrently and fail independently: a bad
//! radiology query does not hold back the visitor batch.

use crate::config::EdflowConfig;
use crate::core::query::{
    execute_consult_query, execute_lab_query, execute_radiology_query, execute_visitor_query,
    QueryConnection,
};
use crate::core::run::sink::{UploadBatch, UploadSink};
use crate::core::run::summary::{RunError, RunSummary};
use crate::core::transform::{
    transform_consult_orders, transform_lab_orders, transform_radiology_orders, transform_visitors,
};
use crate::domain::{EdflowError, RecordKind, Result};
use async_trait::async_trait;
use chrono_tz::Tz;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Hands out open connections, one per query
#[async_trait]
pub trait ConnectionSource: Send + Sync {
    /// Obtains a connection for exclusive use by one query
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::DatabaseError::ConnectionFailed`] if no
    /// connection could be obtained.
    async fn connection(&self) -> Result<Box<dyn QueryConnection>>;
}

/// Settings for one run, taken from the configuration
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Configured kinds and their queries, in run order
    pub queries: Vec<(RecordKind, String)>,

    /// Upper bound for each query
    pub timeout: Duration,

    /// Time zone wall-clock times are interpreted in
    pub location: Tz,

    pub dry_run: bool,
}

impl RunSettings {
    /// Builds run settings from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns [`EdflowError::Configuration`] if the time zone is unknown.
    pub fn from_config(config: &EdflowConfig) -> Result<Self> {
        let location = config
            .transform
            .location()
            .map_err(EdflowError::Configuration)?;

        Ok(Self {
            queries: config.queries.configured(),
            timeout: config.queries.timeout(),
            location,
            dry_run: config.application.dry_run,
        })
    }
}

/// Run coordinator
pub struct RunCoordinator {
    settings: RunSettings,
    source: Arc<dyn ConnectionSource>,
    sink: Arc<dyn UploadSink>,
}

impl RunCoordinator {
    pub fn new(
        settings: RunSettings,
        source: Arc<dyn ConnectionSource>,
        sink: Arc<dyn UploadSink>,
    ) -> Self {
        Self {
            settings,
            source,
            sink,
        }
    }

    /// Execute one run
    ///
    /// Never fails as a whole: every per-kind failure is recorded in the
    /// returned summary.
    pub async fn execute_run(&self) -> RunSummary {
        let start_time = Instant::now();
        let mut summary = RunSummary::new(self.settings.dry_run);

        tracing::info!(
            kinds = self.settings.queries.len(),
            sink = self.sink.name(),
            dry_run = self.settings.dry_run,
            "Starting extraction run"
        );

        let runs = self
            .settings
            .queries
            .iter()
            .map(|(kind, sql)| async move { (*kind, self.run_kind(*kind, sql).await) });
        let outcomes = futures::future::join_all(runs).await;

        for (kind, outcome) in outcomes {
            match outcome {
                Ok(count) => summary.record_delivered(kind, count),
                Err(e) => {
                    let context = format!("{kind} extraction failed");
                    crate::log_error_with_context!(&e, context.as_str());
                    summary.add_error(RunError::new(kind, &e));
                }
            }
        }

        summary.with_duration(start_time.elapsed())
    }

    /// Extracts, transforms and delivers one kind; returns the record count
    async fn run_kind(&self, kind: RecordKind, sql: &str) -> Result<usize> {
        let connection = self.source.connection().await?;
        let connection = connection.as_ref();
        let timeout = self.settings.timeout;
        let location = self.settings.location;

        let batch = match kind {
            RecordKind::Visitor => {
                let raws = execute_visitor_query(connection, sql, timeout).await?;
                UploadBatch::new(kind, &transform_visitors(&raws, location)?)?
            }
            RecordKind::Radiology => {
                let raws = execute_radiology_query(connection, sql, timeout).await?;
                UploadBatch::new(kind, &transform_radiology_orders(&raws, location)?)?
            }
            RecordKind::Lab => {
                let raws = execute_lab_query(connection, sql, timeout).await?;
                UploadBatch::new(kind, &transform_lab_orders(&raws, location)?)?
            }
            RecordKind::Consult => {
                let raws = execute_consult_query(connection, sql, timeout).await?;
                UploadBatch::new(kind, &transform_consult_orders(&raws, location)?)?
            }
        };

        if batch.is_empty() {
            tracing::info!(kind = %kind, "No records, nothing to deliver");
            return Ok(0);
        }

        self.sink.deliver(&batch).await?;
        Ok(batch.record_count())
    }
}
