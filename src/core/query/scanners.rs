//! Column registries and query entry points for the four record kinds
//!
//! The column names here are the contract with hospital IT staff: every
//! query must return each of them exactly once, under any letter case, in
//! any order.

use crate::core::query::executor::{execute, QueryConnection};
use crate::core::query::registry::{ColumnDefinition, ColumnRegistry, Setter};
use crate::domain::{
    RawConsultOrder, RawLabOrder, RawRadiologyOrder, RawVisitor, RecordKind, Result,
};
use std::time::Duration;

static VISITOR_COLUMNS: [ColumnDefinition<RawVisitor>; 28] = [
    ColumnDefinition {
        name: "sehid",
        setter: Setter::Integer(|r, v| r.visit_number = v),
    },
    ColumnDefinition {
        name: "sehmutid",
        setter: Setter::Integer(|r, v| r.mutation_id = v),
    },
    ColumnDefinition {
        name: "locatie",
        setter: Setter::Text(|r, v| r.location = v),
    },
    ColumnDefinition {
        name: "afdeling",
        setter: Setter::Text(|r, v| r.department = v),
    },
    ColumnDefinition {
        name: "aangemaakt",
        setter: Setter::Timestamp(|r, v| r.registered_at = v),
    },
    ColumnDefinition {
        name: "binnenkomstdatum",
        setter: Setter::Text(|r, v| r.arrival_date = v),
    },
    ColumnDefinition {
        name: "binnenkomsttijd",
        setter: Setter::Text(|r, v| r.arrival_time = v),
    },
    ColumnDefinition {
        name: "triagetijd",
        setter: Setter::Text(|r, v| r.triage_time = v),
    },
    ColumnDefinition {
        name: "naarkamertijd",
        setter: Setter::Text(|r, v| r.to_room_time = v),
    },
    ColumnDefinition {
        name: "eerstecontacttijd",
        setter: Setter::Text(|r, v| r.seen_by_physician_time = v),
    },
    ColumnDefinition {
        name: "artsklaartijd",
        setter: Setter::Text(|r, v| r.physician_done_time = v),
    },
    ColumnDefinition {
        name: "gereedopnametijd",
        setter: Setter::Text(|r, v| r.ready_for_admission_time = v),
    },
    ColumnDefinition {
        name: "vertrektijd",
        setter: Setter::Text(|r, v| r.departure_time = v),
    },
    ColumnDefinition {
        name: "eindtijd",
        setter: Setter::Text(|r, v| r.end_time = v),
    },
    ColumnDefinition {
        name: "mutatieeindtijd",
        setter: Setter::Text(|r, v| r.mutation_end_time = v),
    },
    ColumnDefinition {
        name: "mutatiestatus",
        setter: Setter::Text(|r, v| r.mutation_status = v),
    },
    ColumnDefinition {
        name: "kamer",
        setter: Setter::Text(|r, v| r.room = v),
    },
    ColumnDefinition {
        name: "bed",
        setter: Setter::Text(|r, v| r.bed = v),
    },
    ColumnDefinition {
        name: "ingangsklacht",
        setter: Setter::Text(|r, v| r.complaint = v),
    },
    ColumnDefinition {
        name: "specialisme",
        setter: Setter::Text(|r, v| r.specialty = v),
    },
    ColumnDefinition {
        name: "triage",
        setter: Setter::Text(|r, v| r.urgency = v),
    },
    ColumnDefinition {
        name: "vervoerder",
        setter: Setter::Text(|r, v| r.transporter = v),
    },
    ColumnDefinition {
        name: "geboortedatum",
        setter: Setter::Timestamp(|r, v| r.birth_date = v),
    },
    ColumnDefinition {
        name: "opnameafdeling",
        setter: Setter::Text(|r, v| r.admission_department = v),
    },
    ColumnDefinition {
        name: "opnamespecialisme",
        setter: Setter::Text(|r, v| r.admission_specialty = v),
    },
    ColumnDefinition {
        name: "herkomst",
        setter: Setter::Text(|r, v| r.origin = v),
    },
    ColumnDefinition {
        name: "ontslagbestemming",
        setter: Setter::Text(|r, v| r.discharge_destination = v),
    },
    ColumnDefinition {
        name: "vervallen",
        setter: Setter::Boolean(|r, v| r.cancelled = v),
    },
];

/// Columns required from the visitor query
pub static VISITOR_REGISTRY: ColumnRegistry<RawVisitor> =
    ColumnRegistry::new(RecordKind::Visitor, &VISITOR_COLUMNS);

static RADIOLOGY_COLUMNS: [ColumnDefinition<RawRadiologyOrder>; 6] = [
    ColumnDefinition {
        name: "sehid",
        setter: Setter::Integer(|r, v| r.visit_number = v),
    },
    ColumnDefinition {
        name: "ordernr",
        setter: Setter::Integer(|r, v| r.order_number = v),
    },
    ColumnDefinition {
        name: "status",
        setter: Setter::Text(|r, v| r.status = v),
    },
    ColumnDefinition {
        name: "startdatumtijd",
        setter: Setter::Timestamp(|r, v| r.start = v),
    },
    ColumnDefinition {
        name: "einddatumtijd",
        setter: Setter::Timestamp(|r, v| r.end = v),
    },
    ColumnDefinition {
        name: "module",
        setter: Setter::Text(|r, v| r.module = v),
    },
];

/// Columns required from the radiology order query
pub static RADIOLOGY_REGISTRY: ColumnRegistry<RawRadiologyOrder> =
    ColumnRegistry::new(RecordKind::Radiology, &RADIOLOGY_COLUMNS);

static LAB_COLUMNS: [ColumnDefinition<RawLabOrder>; 5] = [
    ColumnDefinition {
        name: "sehid",
        setter: Setter::Integer(|r, v| r.visit_number = v),
    },
    ColumnDefinition {
        name: "ordernr",
        setter: Setter::Integer(|r, v| r.order_number = v),
    },
    ColumnDefinition {
        name: "status",
        setter: Setter::Text(|r, v| r.status = v),
    },
    ColumnDefinition {
        name: "startdatumtijd",
        setter: Setter::Timestamp(|r, v| r.start = v),
    },
    ColumnDefinition {
        name: "einddatumtijd",
        setter: Setter::Timestamp(|r, v| r.end = v),
    },
];

/// Columns required from the lab order query
pub static LAB_REGISTRY: ColumnRegistry<RawLabOrder> =
    ColumnRegistry::new(RecordKind::Lab, &LAB_COLUMNS);

static CONSULT_COLUMNS: [ColumnDefinition<RawConsultOrder>; 6] = [
    ColumnDefinition {
        name: "sehid",
        setter: Setter::Integer(|r, v| r.visit_number = v),
    },
    ColumnDefinition {
        name: "ordernr",
        setter: Setter::Integer(|r, v| r.order_number = v),
    },
    ColumnDefinition {
        name: "status",
        setter: Setter::Text(|r, v| r.status = v),
    },
    ColumnDefinition {
        name: "startdatumtijd",
        setter: Setter::Timestamp(|r, v| r.start = v),
    },
    ColumnDefinition {
        name: "einddatumtijd",
        setter: Setter::Timestamp(|r, v| r.end = v),
    },
    ColumnDefinition {
        name: "specialisme",
        setter: Setter::Text(|r, v| r.specialty = v),
    },
];

/// Columns required from the consult order query
pub static CONSULT_REGISTRY: ColumnRegistry<RawConsultOrder> =
    ColumnRegistry::new(RecordKind::Consult, &CONSULT_COLUMNS);

/// Runs the visitor query
pub async fn execute_visitor_query<C: QueryConnection + ?Sized>(
    connection: &C,
    sql: &str,
    timeout: Duration,
) -> Result<Vec<RawVisitor>> {
    execute(connection, sql, timeout, &VISITOR_REGISTRY).await
}

/// Runs the radiology order query
pub async fn execute_radiology_query<C: QueryConnection + ?Sized>(
    connection: &C,
    sql: &str,
    timeout: Duration,
) -> Result<Vec<RawRadiologyOrder>> {
    execute(connection, sql, timeout, &RADIOLOGY_REGISTRY).await
}

/// Runs the lab order query
pub async fn execute_lab_query<C: QueryConnection + ?Sized>(
    connection: &C,
    sql: &str,
    timeout: Duration,
) -> Result<Vec<RawLabOrder>> {
    execute(connection, sql, timeout, &LAB_REGISTRY).await
}

/// Runs the consult order query
pub async fn execute_consult_query<C: QueryConnection + ?Sized>(
    connection: &C,
    sql: &str,
    timeout: Duration,
) -> Result<Vec<RawConsultOrder>> {
    execute(connection, sql, timeout, &CONSULT_REGISTRY).await
}

/// Required column names for `kind`, in declaration order
pub fn required_columns(kind: RecordKind) -> Vec<&'static str> {
    match kind {
        RecordKind::Visitor => VISITOR_REGISTRY.names().collect(),
        RecordKind::Radiology => RADIOLOGY_REGISTRY.names().collect(),
        RecordKind::Lab => LAB_REGISTRY.names().collect(),
        RecordKind::Consult => CONSULT_REGISTRY.names().collect(),
    }
}
