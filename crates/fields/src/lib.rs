//! `tally-fields` — typed prediction fields.
//!
//! Every extracted datum carries a value, a confidence score, an optional
//! polygon and a `reconstructed` flag. Raw predictions come in as
//! `serde_json::Value` records; coercion never fails, it degrades to an
//! empty field instead.

pub mod aggregate;
pub mod field;
pub mod geometry;
pub mod raw;
pub mod tax;

pub use aggregate::{confidence_product, value_sum, Scored, Valued};
pub use field::{AmountField, DateField, Field, FieldValue, TextField};
pub use geometry::{Point, Polygon};
pub use tax::TaxLine;
