//! Integration tests for a complete extraction run
//!
//! The coordinator runs against scripted in-memory connections and writes
//! batches to a temporary spool directory.

use async_trait::async_trait;
use edflow::core::query::{required_columns, QueryConnection, ResultSet, SqlValue};
use edflow::core::run::{
    ConnectionSource, DirectorySink, RunCoordinator, RunSettings, StdoutSink,
};
use edflow::domain::{DatabaseError, ErrorCategory, RecordKind, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

/// Answers each SQL text with its scripted result set
#[derive(Clone, Default)]
struct Scripted(HashMap<String, ResultSet>);

#[async_trait]
impl QueryConnection for Scripted {
    async fn fetch(&self, sql: &str) -> std::result::Result<ResultSet, DatabaseError> {
        self.0
            .get(sql)
            .cloned()
            .ok_or_else(|| DatabaseError::QueryFailed(format!("relation does not exist: {sql}")))
    }
}

#[async_trait]
impl ConnectionSource for Scripted {
    async fn connection(&self) -> Result<Box<dyn QueryConnection>> {
        Ok(Box::new(self.clone()))
    }
}

fn text(s: &str) -> SqlValue {
    SqlValue::Text(s.to_string())
}

fn visitor_result() -> ResultSet {
    let columns: Vec<String> = required_columns(RecordKind::Visitor)
        .into_iter()
        .map(String::from)
        .collect();
    let row = columns
        .iter()
        .map(|c| match c.as_str() {
            "sehid" => SqlValue::Integer(1001),
            "sehmutid" => SqlValue::Integer(1),
            "locatie" => text("AMC"),
            "afdeling" => text("SEH"),
            "binnenkomstdatum" => text("2024-03-01"),
            "binnenkomsttijd" => text("23:50"),
            "triagetijd" => text("00:05"),
            "geboortedatum" => text("1990-05-17"),
            _ => SqlValue::Null,
        })
        .collect();

    ResultSet {
        columns,
        rows: vec![row],
    }
}

fn lab_result() -> ResultSet {
    ResultSet {
        columns: ["SEHID", "ORDERNR", "STATUS", "STARTDATUMTIJD", "EINDDATUMTIJD"]
            .map(String::from)
            .to_vec(),
        rows: vec![vec![
            SqlValue::Integer(1001),
            SqlValue::Integer(42),
            text("afgerond"),
            text("2024-03-02 00:20:00"),
            SqlValue::Null,
        ]],
    }
}

fn empty_result(kind: RecordKind) -> ResultSet {
    ResultSet {
        columns: required_columns(kind).into_iter().map(String::from).collect(),
        rows: vec![],
    }
}

fn settings(queries: &[(RecordKind, &str)]) -> RunSettings {
    RunSettings {
        queries: queries
            .iter()
            .map(|(kind, sql)| (*kind, sql.to_string()))
            .collect(),
        timeout: Duration::from_secs(5),
        location: chrono_tz::Europe::Amsterdam,
        dry_run: false,
    }
}

/// Parses every batch file in `dir`, keyed by its kind
fn batches(dir: &Path) -> HashMap<String, Value> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .map(|path| {
            let body: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
            (body["kind"].as_str().unwrap().to_string(), body)
        })
        .collect()
}

#[tokio::test]
async fn test_run_writes_one_batch_per_non_empty_kind() {
    let spool = TempDir::new().unwrap();
    let mut scripted = Scripted::default();
    scripted.0.insert("visitors".to_string(), visitor_result());
    scripted.0.insert("lab".to_string(), lab_result());
    scripted
        .0
        .insert("radiology".to_string(), empty_result(RecordKind::Radiology));

    let coordinator = RunCoordinator::new(
        settings(&[
            (RecordKind::Visitor, "visitors"),
            (RecordKind::Radiology, "radiology"),
            (RecordKind::Lab, "lab"),
        ]),
        Arc::new(scripted),
        Arc::new(DirectorySink::new(spool.path())),
    );

    let summary = coordinator.execute_run().await;

    assert!(summary.is_successful(), "errors: {:?}", summary.errors);
    assert_eq!(summary.delivered_for(RecordKind::Visitor), Some(1));
    assert_eq!(summary.delivered_for(RecordKind::Radiology), Some(0));
    assert_eq!(summary.delivered_for(RecordKind::Lab), Some(1));
    assert_eq!(summary.total_records(), 2);

    let batches = batches(spool.path());
    assert_eq!(batches.len(), 2);
    assert!(!batches.contains_key("radiology"));

    let visitor = &batches["visitor"]["records"][0];
    assert_eq!(visitor["bezoeknummer"], 1001);
    assert_eq!(visitor["dt_binnenkomst"], "2024-03-01T23:50:00+01:00");
    assert_eq!(visitor["dt_triage"], "2024-03-02T00:05:00+01:00");
    assert_eq!(visitor["leeftijd"], "3");
    assert_eq!(visitor["is_vervallen"], false);
    assert!(visitor.get("kamer").is_none());

    let lab = &batches["lab"]["records"][0];
    assert_eq!(lab["ordernummer"], 42);
    assert_eq!(lab["dt_start"], "2024-03-02T00:20:00+01:00");
    assert!(lab.get("dt_eind").is_none());
}

#[tokio::test]
async fn test_failing_kind_does_not_block_others() {
    let spool = TempDir::new().unwrap();
    let mut scripted = Scripted::default();
    scripted.0.insert("visitors".to_string(), visitor_result());
    scripted.0.insert(
        "consult".to_string(),
        ResultSet {
            columns: vec!["sehid".to_string(), "status".to_string()],
            rows: vec![],
        },
    );

    let coordinator = RunCoordinator::new(
        settings(&[
            (RecordKind::Visitor, "visitors"),
            (RecordKind::Consult, "consult"),
            (RecordKind::Lab, "missing table"),
        ]),
        Arc::new(scripted),
        Arc::new(DirectorySink::new(spool.path())),
    );

    let summary = coordinator.execute_run().await;

    assert!(!summary.is_successful());
    assert_eq!(summary.delivered_for(RecordKind::Visitor), Some(1));
    assert_eq!(summary.errors.len(), 2);

    let consult = summary
        .errors
        .iter()
        .find(|e| e.kind == RecordKind::Consult)
        .unwrap();
    assert_eq!(consult.category, ErrorCategory::Configuration);
    assert!(!consult.retryable);
    assert!(consult.message.contains("ordernr"));

    let lab = summary
        .errors
        .iter()
        .find(|e| e.kind == RecordKind::Lab)
        .unwrap();
    assert_eq!(lab.category, ErrorCategory::Database);
    assert!(lab.retryable);

    assert_eq!(batches(spool.path()).len(), 1);
}

#[tokio::test]
async fn test_unwritable_spool_is_a_sink_error() {
    let dir = TempDir::new().unwrap();
    let not_a_directory = dir.path().join("spool");
    std::fs::write(&not_a_directory, "occupied").unwrap();
    let mut scripted = Scripted::default();
    scripted.0.insert("lab".to_string(), lab_result());

    let coordinator = RunCoordinator::new(
        settings(&[(RecordKind::Lab, "lab")]),
        Arc::new(scripted),
        Arc::new(DirectorySink::new(&not_a_directory)),
    );

    let summary = coordinator.execute_run().await;

    assert_eq!(summary.errors.len(), 1);
    assert_eq!(summary.errors[0].category, ErrorCategory::Sink);
    assert!(!summary.errors[0].retryable);
}

#[tokio::test]
async fn test_dry_run_writes_nothing_to_the_spool() {
    let spool = TempDir::new().unwrap();
    let mut scripted = Scripted::default();
    scripted.0.insert("visitors".to_string(), visitor_result());
    let mut dry = settings(&[(RecordKind::Visitor, "visitors")]);
    dry.dry_run = true;

    let coordinator = RunCoordinator::new(dry, Arc::new(scripted), Arc::new(StdoutSink));

    let summary = coordinator.execute_run().await;

    assert!(summary.dry_run);
    assert!(summary.is_successful());
    assert_eq!(summary.delivered_for(RecordKind::Visitor), Some(1));
    assert!(batches(spool.path()).is_empty());
}
