//! Raw-to-public record transformation
//!
//! - [`visitor`] - Visitor rows with derived stage timestamps and age bucket
//! - [`orders`] - Radiology, lab and consult orders
//!
//! Transformations are pure: the same raw record and location always give
//! the same public record.

pub mod orders;
pub mod visitor;

pub use orders::{
    transform_consult_order, transform_consult_orders, transform_lab_order, transform_lab_orders,
    transform_radiology_order, transform_radiology_orders,
};
pub use visitor::{transform_visitor, transform_visitors};
