//! `tally-recon` — reconciliation of extracted document fields.
//!
//! Pure engine crate: receives raw predictions, returns typed documents
//! with consistency checklists and reconstructed totals.
//! No network or persistence.

pub mod checks;
pub mod config;
pub mod documents;
pub mod engine;
pub mod error;
pub mod model;
pub mod mrz;
pub mod reconstruct;

#[cfg(test)]
mod testutil;

pub use checks::TaxCheck;
pub use config::ReconConfig;
pub use documents::{Invoice, Passport, Receipt};
pub use engine::reconcile;
pub use error::ReconError;
pub use model::{Checklist, TaxTotals};
pub use mrz::{checksum, MrzCheck};
pub use reconstruct::{reconstruct, ReconstructionStep};
