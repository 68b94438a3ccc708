//! Public records as uploaded to the integration endpoint
//!
//! These mirror the raw records with absolute, zone-aware timestamps and
//! derived fields. Field names on the wire follow the endpoint's JSON
//! contract; empty optional values are omitted.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Timestamp as sent to the endpoint (RFC 3339 with the local offset)
pub type Timestamp = DateTime<FixedOffset>;

/// One mutation on an emergency-department visit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visitor {
    #[serde(rename = "code_locatie")]
    pub location: String,
    #[serde(rename = "code_afdeling")]
    pub department: String,
    #[serde(rename = "bezoeknummer")]
    pub visit_number: i64,
    #[serde(rename = "mutatie_id")]
    pub mutation_id: i64,
    #[serde(rename = "kamer", default, skip_serializing_if = "String::is_empty")]
    pub room: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bed: String,

    /// Age at arrival, in decades
    #[serde(rename = "leeftijd", default, skip_serializing_if = "String::is_empty")]
    pub age_bucket: String,

    #[serde(rename = "dt_aangemeld", default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<Timestamp>,
    #[serde(rename = "dt_binnenkomst", default, skip_serializing_if = "Option::is_none")]
    pub arrival: Option<Timestamp>,
    #[serde(rename = "dt_triage", default, skip_serializing_if = "Option::is_none")]
    pub triage: Option<Timestamp>,
    #[serde(rename = "dt_naar_kamer", default, skip_serializing_if = "Option::is_none")]
    pub to_room: Option<Timestamp>,
    #[serde(rename = "dt_bij_arts", default, skip_serializing_if = "Option::is_none")]
    pub seen_by_physician: Option<Timestamp>,
    #[serde(rename = "dt_arts_klaar", default, skip_serializing_if = "Option::is_none")]
    pub physician_done: Option<Timestamp>,
    #[serde(rename = "dt_gereed_opname", default, skip_serializing_if = "Option::is_none")]
    pub ready_for_admission: Option<Timestamp>,
    #[serde(rename = "dt_vertrek", default, skip_serializing_if = "Option::is_none")]
    pub departure: Option<Timestamp>,
    #[serde(rename = "dt_einde", default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Timestamp>,
    #[serde(rename = "dt_mutatie_einde", default, skip_serializing_if = "Option::is_none")]
    pub mutation_end: Option<Timestamp>,
    #[serde(rename = "code_mutatiestatus", default, skip_serializing_if = "String::is_empty")]
    pub mutation_status: String,
    #[serde(rename = "is_vervallen")]
    pub cancelled: bool,

    #[serde(rename = "code_ingangsklacht", default, skip_serializing_if = "String::is_empty")]
    pub complaint: String,
    #[serde(rename = "code_urgentie", default, skip_serializing_if = "String::is_empty")]
    pub urgency: String,
    #[serde(rename = "code_specialisme", default, skip_serializing_if = "String::is_empty")]
    pub specialty: String,
    #[serde(rename = "code_herkomst", default, skip_serializing_if = "String::is_empty")]
    pub origin: String,
    #[serde(rename = "code_vervoerder", default, skip_serializing_if = "String::is_empty")]
    pub transporter: String,
    #[serde(rename = "code_ontslagbestemming", default, skip_serializing_if = "String::is_empty")]
    pub discharge_destination: String,
    #[serde(rename = "code_opnameafdeling", default, skip_serializing_if = "String::is_empty")]
    pub admission_department: String,
    #[serde(rename = "code_opnamespecialisme", default, skip_serializing_if = "String::is_empty")]
    pub admission_specialty: String,
}

/// A radiology order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RadiologyOrder {
    #[serde(rename = "bezoeknummer")]
    pub visit_number: i64,
    #[serde(rename = "ordernummer")]
    pub order_number: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(rename = "dt_start", default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Timestamp>,
    #[serde(rename = "dt_eind", default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub module: String,
}

/// A laboratory order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabOrder {
    #[serde(rename = "bezoeknummer")]
    pub visit_number: i64,
    #[serde(rename = "ordernummer")]
    pub order_number: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(rename = "dt_start", default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Timestamp>,
    #[serde(rename = "dt_eind", default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Timestamp>,
}

/// A consult order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsultOrder {
    #[serde(rename = "bezoeknummer")]
    pub visit_number: i64,
    #[serde(rename = "ordernummer")]
    pub order_number: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(rename = "dt_start", default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Timestamp>,
    #[serde(rename = "dt_eind", default, skip_serializing_if = "Option::is_none")]
    pub end: Option<Timestamp>,
    #[serde(rename = "code_specialisme", default, skip_serializing_if = "String::is_empty")]
    pub specialty: String,
}
