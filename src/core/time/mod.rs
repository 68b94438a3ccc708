//! Time derivation for emergency-department workflow stages

pub mod derive;

pub use derive::{derive_absolute, derive_relative, localize, normalize_date, parse_time_of_day};
