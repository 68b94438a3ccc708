//! Extraction runs
//!
//! - [`coordinator`] - Runs every configured kind and collects the outcome
//! - [`sink`] - Where serialized batches go
//! - [`summary`] - Per-run reporting

pub mod coordinator;
pub mod sink;
pub mod summary;

pub use coordinator::{ConnectionSource, RunCoordinator, RunSettings};
pub use sink::{DirectorySink, StdoutSink, UploadBatch, UploadSink};
pub use summary::{RunError, RunSummary};
