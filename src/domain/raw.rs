//! Raw records as scanned from the hospital database
//!
//! Fields hold exactly what the operator's query returned. A database null
//! has already collapsed to the field's zero value: an empty string, zero,
//! `false`, or `None` for timestamps. Date and time-of-day fragments stay
//! strings here; turning them into instants is the transform layer's job.

use chrono::NaiveDateTime;
use serde::Serialize;

/// One mutation on an emergency-department visit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawVisitor {
    pub visit_number: i64,
    pub mutation_id: i64,
    pub location: String,
    pub department: String,

    /// Registration instant, as a wall clock without zone
    pub registered_at: Option<NaiveDateTime>,

    pub arrival_date: String,
    pub arrival_time: String,
    pub triage_time: String,
    pub to_room_time: String,
    pub seen_by_physician_time: String,
    pub physician_done_time: String,
    pub ready_for_admission_time: String,
    pub departure_time: String,
    pub end_time: String,
    pub mutation_end_time: String,
    pub mutation_status: String,

    pub room: String,
    pub bed: String,
    pub complaint: String,
    pub specialty: String,
    pub urgency: String,
    pub transporter: String,
    pub birth_date: Option<NaiveDateTime>,
    pub admission_department: String,
    pub admission_specialty: String,
    pub origin: String,
    pub discharge_destination: String,
    pub cancelled: bool,
}

/// A radiology order placed during a visit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawRadiologyOrder {
    pub visit_number: i64,
    pub order_number: i64,
    pub status: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub module: String,
}

/// A laboratory order placed during a visit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawLabOrder {
    pub visit_number: i64,
    pub order_number: i64,
    pub status: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

/// A consult requested from another specialty during a visit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawConsultOrder {
    pub visit_number: i64,
    pub order_number: i64,
    pub status: String,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub specialty: String,
}
