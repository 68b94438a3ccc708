//! Integration tests for name-based column binding
//!
//! These run the public query entry points against an in-memory
//! `QueryConnection`, the way a hospital's database would answer an
//! operator-authored query.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use edflow::core::query::{
    execute_consult_query, execute_lab_query, execute_radiology_query, execute_visitor_query,
    required_columns, QueryConnection, ResultSet, SqlValue,
};
use edflow::domain::{
    DatabaseError, EdflowError, RawConsultOrder, RawLabOrder, RawRadiologyOrder, RawVisitor,
    RecordKind,
};
use std::collections::HashMap;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

struct MemoryConnection(ResultSet);

#[async_trait]
impl QueryConnection for MemoryConnection {
    async fn fetch(&self, _sql: &str) -> Result<ResultSet, DatabaseError> {
        Ok(self.0.clone())
    }
}

fn text(s: &str) -> SqlValue {
    SqlValue::Text(s.to_string())
}

fn timestamp(y: i32, m: u32, d: u32, h: u32, min: u32, sec: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|day| day.and_hms_opt(h, min, sec))
        .unwrap()
}

/// A visitor row keyed by canonical column name, a distinct value per column
fn visitor_values() -> HashMap<&'static str, SqlValue> {
    HashMap::from([
        ("sehid", SqlValue::Integer(1001)),
        ("sehmutid", SqlValue::Integer(7)),
        ("locatie", text("AMC")),
        ("afdeling", text("SEH")),
        ("aangemaakt", SqlValue::Timestamp(timestamp(2024, 3, 1, 9, 28, 13))),
        ("binnenkomstdatum", text("2024-03-01")),
        ("binnenkomsttijd", text("09:30")),
        ("triagetijd", text("09:45:00")),
        ("naarkamertijd", text("09:52")),
        ("eerstecontacttijd", text("10:05")),
        ("artsklaartijd", text("11:40")),
        ("gereedopnametijd", text("12:10")),
        ("vertrektijd", text("12:35")),
        ("eindtijd", text("12:50")),
        ("mutatieeindtijd", text("13:05")),
        ("mutatiestatus", text("afgesloten")),
        ("kamer", text("K3")),
        ("bed", text("B2")),
        ("ingangsklacht", text("pijn op de borst")),
        ("specialisme", text("CAR")),
        ("triage", text("oranje")),
        ("vervoerder", text("ambulance")),
        ("geboortedatum", text("1990-05-17")),
        ("opnameafdeling", text("CCU")),
        ("opnamespecialisme", text("CARD-INT")),
        ("herkomst", text("thuis")),
        ("ontslagbestemming", text("opname")),
        ("vervallen", SqlValue::Boolean(true)),
    ])
}

fn expected_visitor() -> RawVisitor {
    RawVisitor {
        visit_number: 1001,
        mutation_id: 7,
        location: "AMC".to_string(),
        department: "SEH".to_string(),
        registered_at: Some(timestamp(2024, 3, 1, 9, 28, 13)),
        arrival_date: "2024-03-01".to_string(),
        arrival_time: "09:30".to_string(),
        triage_time: "09:45:00".to_string(),
        to_room_time: "09:52".to_string(),
        seen_by_physician_time: "10:05".to_string(),
        physician_done_time: "11:40".to_string(),
        ready_for_admission_time: "12:10".to_string(),
        departure_time: "12:35".to_string(),
        end_time: "12:50".to_string(),
        mutation_end_time: "13:05".to_string(),
        mutation_status: "afgesloten".to_string(),
        room: "K3".to_string(),
        bed: "B2".to_string(),
        complaint: "pijn op de borst".to_string(),
        specialty: "CAR".to_string(),
        urgency: "oranje".to_string(),
        transporter: "ambulance".to_string(),
        birth_date: Some(timestamp(1990, 5, 17, 0, 0, 0)),
        admission_department: "CCU".to_string(),
        admission_specialty: "CARD-INT".to_string(),
        origin: "thuis".to_string(),
        discharge_destination: "opname".to_string(),
        cancelled: true,
    }
}

/// Lays out `values` under `columns`, matching names case-insensitively
///
/// Columns without a value are extras and carry a numeric the driver could
/// not map.
fn result_set(columns: &[String], values: &HashMap<&'static str, SqlValue>) -> ResultSet {
    let row = columns
        .iter()
        .map(|c| {
            values
                .get(c.to_lowercase().as_str())
                .cloned()
                .unwrap_or(SqlValue::Unsupported("numeric".to_string()))
        })
        .collect();

    ResultSet {
        columns: columns.to_vec(),
        rows: vec![row],
    }
}

/// Capitalizes the first letter, e.g. `Sehid`
fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Distinct column orderings of `names`, each with extra columns mixed in
fn layouts(names: &[&str]) -> Vec<Vec<String>> {
    let n = names.len();

    let mut reversed: Vec<String> = names.iter().rev().map(|c| c.to_uppercase()).collect();
    reversed.insert(3, "ignoreme".to_string());
    reversed.push("AlsoIgnored".to_string());

    let mut rotated: Vec<String> = names.iter().map(|c| title_case(c)).collect();
    rotated.rotate_left(n / 3 + 1);
    rotated.insert(0, "extra_first".to_string());

    let mut interleaved: Vec<String> = names
        .iter()
        .skip(1)
        .step_by(2)
        .chain(names.iter().step_by(2))
        .map(|c| c.to_string())
        .collect();
    interleaved.insert(n / 2, "EXTRA_MIDDLE".to_string());

    // 5 is coprime with 28 and 7, so this visits each index once
    let mut strided: Vec<String> = (0..n)
        .map(|i| names[(i * 5 + 2) % n].to_string())
        .collect();
    strided.insert(0, "x1".to_string());
    strided.insert(n / 2, "x2".to_string());
    strided.push("x3".to_string());

    vec![reversed, rotated, interleaved, strided]
}

#[tokio::test]
async fn test_visitor_binding_ignores_order_case_and_extras() {
    let names = required_columns(RecordKind::Visitor);

    for columns in layouts(&names) {
        let connection = MemoryConnection(result_set(&columns, &visitor_values()));

        let visitors = execute_visitor_query(&connection, "SELECT ...", TIMEOUT)
            .await
            .unwrap();

        assert_eq!(visitors, vec![expected_visitor()], "columns: {columns:?}");
    }
}

#[tokio::test]
async fn test_unmappable_extra_column_is_not_bound() {
    let mut columns: Vec<String> = required_columns(RecordKind::Visitor)
        .into_iter()
        .map(String::from)
        .collect();
    columns.push("score".to_string());
    let connection = MemoryConnection(result_set(&columns, &visitor_values()));

    let visitors = execute_visitor_query(&connection, "q", TIMEOUT).await.unwrap();

    assert_eq!(visitors, vec![expected_visitor()]);
}

#[tokio::test]
async fn test_unmappable_only_column_reports_missing_columns() {
    let columns = vec!["hello".to_string()];
    let connection = MemoryConnection(result_set(&columns, &HashMap::new()));

    let error = execute_visitor_query(&connection, "SELECT 1.5 AS hello", TIMEOUT)
        .await
        .unwrap_err();

    match error {
        EdflowError::Selection(selection) => {
            assert_eq!(selection.missing, required_columns(RecordKind::Visitor));
            assert_eq!(selection.got, columns);
        }
        other => panic!("expected a selection error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unmappable_bound_column_is_a_scan_error() {
    let columns: Vec<String> = required_columns(RecordKind::Visitor)
        .into_iter()
        .map(String::from)
        .collect();
    let mut values = visitor_values();
    values.insert("kamer", SqlValue::Unsupported("uuid".to_string()));
    let connection = MemoryConnection(result_set(&columns, &values));

    let error = execute_visitor_query(&connection, "q", TIMEOUT).await.unwrap_err();

    assert!(
        matches!(error, EdflowError::Scan { ref column, ref message } if column == "kamer" && message.contains("uuid"))
    );
}

#[tokio::test]
async fn test_visitor_nulls_become_zero_values() {
    let columns: Vec<String> = required_columns(RecordKind::Visitor)
        .into_iter()
        .map(String::from)
        .collect();
    let values: HashMap<&'static str, SqlValue> = required_columns(RecordKind::Visitor)
        .into_iter()
        .map(|name| (name, SqlValue::Null))
        .collect();
    let connection = MemoryConnection(result_set(&columns, &values));

    let visitors = execute_visitor_query(&connection, "q", TIMEOUT).await.unwrap();

    assert_eq!(visitors, vec![Default::default()]);
}

#[tokio::test]
async fn test_missing_columns_are_reported_in_registry_order() {
    let columns: Vec<String> = required_columns(RecordKind::Visitor)
        .into_iter()
        .filter(|c| *c != "kamer" && *c != "sehid")
        .map(String::from)
        .collect();
    let connection = MemoryConnection(result_set(&columns, &visitor_values()));

    let error = execute_visitor_query(&connection, "q", TIMEOUT)
        .await
        .unwrap_err();

    match error {
        EdflowError::Selection(selection) => {
            assert_eq!(selection.missing, vec!["sehid", "kamer"]);
            assert_eq!(selection.got, columns);
        }
        other => panic!("expected a selection error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_duplicate_columns_are_rejected_before_missing_ones() {
    let connection = MemoryConnection(ResultSet {
        columns: vec!["sehid".to_string(), "SEHID".to_string()],
        rows: vec![],
    });

    let error = execute_lab_query(&connection, "q", TIMEOUT).await.unwrap_err();

    assert!(matches!(error, EdflowError::DuplicateColumns(_)));
}

fn order_values() -> HashMap<&'static str, SqlValue> {
    HashMap::from([
        ("sehid", SqlValue::Integer(1001)),
        ("ordernr", SqlValue::Integer(55)),
        ("status", text("aangevraagd")),
        ("startdatumtijd", SqlValue::Timestamp(timestamp(2024, 3, 1, 10, 0, 0))),
        ("einddatumtijd", text("2024-03-01 10:45:30")),
        ("module", text("CT")),
        ("specialisme", text("NEU")),
    ])
}

#[tokio::test]
async fn test_order_queries_bind_by_name() {
    let start = Some(timestamp(2024, 3, 1, 10, 0, 0));
    let end = Some(timestamp(2024, 3, 1, 10, 45, 30));
    let names = [
        "sehid",
        "ordernr",
        "status",
        "startdatumtijd",
        "einddatumtijd",
        "module",
        "specialisme",
    ];

    for columns in layouts(&names) {
        let connection = MemoryConnection(result_set(&columns, &order_values()));

        let radiology = execute_radiology_query(&connection, "q", TIMEOUT).await.unwrap();
        let lab = execute_lab_query(&connection, "q", TIMEOUT).await.unwrap();
        let consult = execute_consult_query(&connection, "q", TIMEOUT).await.unwrap();

        assert_eq!(
            radiology,
            vec![RawRadiologyOrder {
                visit_number: 1001,
                order_number: 55,
                status: "aangevraagd".to_string(),
                start,
                end,
                module: "CT".to_string(),
            }],
            "columns: {columns:?}"
        );
        assert_eq!(
            lab,
            vec![RawLabOrder {
                visit_number: 1001,
                order_number: 55,
                status: "aangevraagd".to_string(),
                start,
                end,
            }],
            "columns: {columns:?}"
        );
        assert_eq!(
            consult,
            vec![RawConsultOrder {
                visit_number: 1001,
                order_number: 55,
                status: "aangevraagd".to_string(),
                start,
                end,
                specialty: "NEU".to_string(),
            }],
            "columns: {columns:?}"
        );
    }
}

#[tokio::test]
async fn test_unconvertible_value_names_the_column() {
    let columns = ["sehid", "ordernr", "status", "startdatumtijd", "einddatumtijd"]
        .map(String::from)
        .to_vec();
    let row = vec![
        SqlValue::Text("not a number".to_string()),
        SqlValue::Integer(1),
        SqlValue::Null,
        SqlValue::Null,
        SqlValue::Null,
    ];
    let connection = MemoryConnection(ResultSet {
        columns,
        rows: vec![row],
    });

    let error = execute_lab_query(&connection, "q", TIMEOUT).await.unwrap_err();

    assert!(matches!(error, EdflowError::Scan { ref column, .. } if column == "sehid"));
}

struct Hanging;

#[async_trait]
impl QueryConnection for Hanging {
    async fn fetch(&self, _sql: &str) -> Result<ResultSet, DatabaseError> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn test_query_timeout() {
    let timeout = Duration::from_millis(50);

    let error = execute_consult_query(&Hanging, "SELECT pg_sleep(600)", timeout)
        .await
        .unwrap_err();

    assert_eq!(error, EdflowError::Database(DatabaseError::Timeout(timeout)));
    assert!(error.is_retryable());
}
