//! Domain models and types for edflow.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Record kinds** ([`RecordKind`]) naming the four extracted shapes
//! - **Raw records** ([`RawVisitor`], [`RawRadiologyOrder`], [`RawLabOrder`],
//!   [`RawConsultOrder`]) as scanned from the database
//! - **Public records** ([`Visitor`], [`RadiologyOrder`], [`LabOrder`],
//!   [`ConsultOrder`]) as uploaded
//! - **Error types** ([`EdflowError`], [`SelectionError`], [`FormatError`],
//!   [`DatabaseError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, EdflowError>`]:
//!
//! ```rust
//! use edflow::domain::{EdflowError, RecordKind, Result};
//! use std::str::FromStr;
//!
//! fn example() -> Result<RecordKind> {
//!     // Errors are automatically converted using the ? operator
//!     let kind = RecordKind::from_str("visitor")?;
//!     Ok(kind)
//! }
//! ```

pub mod errors;
pub mod kind;
pub mod public;
pub mod raw;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{DatabaseError, EdflowError, ErrorCategory, FormatError, SelectionError};
pub use kind::RecordKind;
pub use public::{ConsultOrder, LabOrder, RadiologyOrder, Timestamp, Visitor};
pub use raw::{RawConsultOrder, RawLabOrder, RawRadiologyOrder, RawVisitor};
pub use result::Result;
