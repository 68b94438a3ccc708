//! Record kinds
//!
//! edflow extracts exactly four fixed record shapes. Each kind has its own
//! column registry, query and upload batch.

use crate::domain::{EdflowError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four record kinds extracted from the hospital database
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    /// Emergency-department visit mutations
    Visitor,
    /// Radiology orders
    Radiology,
    /// Laboratory orders
    Lab,
    /// Consult orders
    Consult,
}

impl RecordKind {
    /// All kinds, in the order a run processes them
    pub const ALL: [RecordKind; 4] = [
        RecordKind::Visitor,
        RecordKind::Radiology,
        RecordKind::Lab,
        RecordKind::Consult,
    ];

    /// Lowercase name used in configuration, logs and payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::Visitor => "visitor",
            RecordKind::Radiology => "radiology",
            RecordKind::Lab => "lab",
            RecordKind::Consult => "consult",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = EdflowError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "visitor" | "visitors" => Ok(Self::Visitor),
            "radiology" | "radiologie" => Ok(Self::Radiology),
            "lab" => Ok(Self::Lab),
            "consult" => Ok(Self::Consult),
            _ => Err(EdflowError::Configuration(format!(
                "Invalid record kind: {s}. Expected one of: visitor, radiology, lab, consult"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_kind_from_str() {
        assert_eq!(RecordKind::from_str("visitor").unwrap(), RecordKind::Visitor);
        assert_eq!(RecordKind::from_str("Radiologie").unwrap(), RecordKind::Radiology);
        assert_eq!(RecordKind::from_str("LAB").unwrap(), RecordKind::Lab);
        assert_eq!(RecordKind::from_str("consult").unwrap(), RecordKind::Consult);
        assert!(RecordKind::from_str("pharmacy").is_err());
    }

    #[test]
    fn test_record_kind_display_round_trips() {
        for kind in RecordKind::ALL {
            assert_eq!(RecordKind::from_str(&kind.to_string()).unwrap(), kind);
        }
    }
}
