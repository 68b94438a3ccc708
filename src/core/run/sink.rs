//! Upload sinks
//!
//! A sink receives one serialized batch per record kind and either delivers
//! it whole or fails. Two sinks are provided: [`DirectorySink`] writes each
//! batch to a spool directory for a separate uploader to pick up, and
//! [`StdoutSink`] prints batches for dry runs.

use crate::domain::{EdflowError, RecordKind, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One serialized batch of public records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadBatch {
    kind: RecordKind,
    record_count: usize,
    body: Vec<u8>,
}

#[derive(Serialize)]
struct Payload<'a, T> {
    kind: RecordKind,
    records: &'a [T],
}

impl UploadBatch {
    /// Serializes `records` as `{"kind": ..., "records": [...]}`
    ///
    /// # Errors
    ///
    /// Returns [`EdflowError::Serialization`] if a record cannot be encoded.
    pub fn new<T: Serialize>(kind: RecordKind, records: &[T]) -> Result<Self> {
        let body = serde_json::to_vec(&Payload { kind, records })?;
        Ok(Self {
            kind,
            record_count: records.len(),
            body,
        })
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }

    /// The JSON payload
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// Destination for serialized batches
#[async_trait]
pub trait UploadSink: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Delivers the batch
    ///
    /// # Errors
    ///
    /// Returns [`EdflowError::Sink`] if the batch was not delivered. A failed
    /// delivery leaves nothing partially visible at the destination.
    async fn deliver(&self, batch: &UploadBatch) -> Result<()>;
}

/// Writes each batch to `<directory>/<kind>-<timestamp>.json`
#[derive(Debug, Clone)]
pub struct DirectorySink {
    directory: PathBuf,
}

impl DirectorySink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn file_name(kind: RecordKind) -> String {
        format!(
            "{}-{}.json",
            kind,
            chrono::Utc::now().format("%Y%m%dT%H%M%S%.3fZ")
        )
    }
}

#[async_trait]
impl UploadSink for DirectorySink {
    fn name(&self) -> &str {
        "directory"
    }

    async fn deliver(&self, batch: &UploadBatch) -> Result<()> {
        let sink_error = |action: &str, path: &Path, e: std::io::Error| {
            EdflowError::Sink(format!("Failed to {action} {}: {e}", path.display()))
        };

        tokio::fs::create_dir_all(&self.directory)
            .await
            .map_err(|e| sink_error("create directory", &self.directory, e))?;

        let target = self.directory.join(Self::file_name(batch.kind()));
        let partial = target.with_extension("json.partial");

        tokio::fs::write(&partial, batch.body())
            .await
            .map_err(|e| sink_error("write", &partial, e))?;

        if let Err(e) = tokio::fs::rename(&partial, &target).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(sink_error("rename", &partial, e));
        }

        tracing::info!(
            kind = %batch.kind(),
            records = batch.record_count(),
            path = %target.display(),
            "Batch written"
        );
        Ok(())
    }
}

/// Prints each batch to standard output instead of delivering it
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

#[async_trait]
impl UploadSink for StdoutSink {
    fn name(&self) -> &str {
        "stdout"
    }

    async fn deliver(&self, batch: &UploadBatch) -> Result<()> {
        let body = String::from_utf8_lossy(batch.body());
        println!("{body}");
        tracing::info!(
            kind = %batch.kind(),
            records = batch.record_count(),
            "Dry run: batch printed, not uploaded"
        );
        Ok(())
    }
}
