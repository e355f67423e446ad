use std::collections::BTreeMap;

use serde::Serialize;
use tally_fields::{AmountField, TaxLine};

// ---------------------------------------------------------------------------
// Capability set
// ---------------------------------------------------------------------------

/// The tax lines and totals of a document.
///
/// The engine reads and replaces fields only through this trait, so any
/// document carrying taxes and totals can be reconciled.
pub trait TaxTotals {
    fn taxes(&self) -> &[TaxLine];
    fn taxes_mut(&mut self) -> &mut [TaxLine];

    fn total_tax(&self) -> &AmountField;
    fn total_tax_mut(&mut self) -> &mut AmountField;

    /// Tax-exclusive total.
    fn total_excl(&self) -> &AmountField;
    fn total_excl_mut(&mut self) -> &mut AmountField;

    /// Tax-inclusive total.
    fn total_incl(&self) -> &AmountField;
    fn total_incl_mut(&mut self) -> &mut AmountField;
}

// ---------------------------------------------------------------------------
// Checklist
// ---------------------------------------------------------------------------

/// Named outcomes of the consistency checks run on one document.
///
/// Filled once while the document is built; read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Checklist(BTreeMap<String, bool>);

impl Checklist {
    pub(crate) fn record(&mut self, name: &str, passed: bool) {
        self.0.insert(name.to_string(), passed);
    }

    /// Outcome of `name`, `None` if that check was not run.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.get(name).copied()
    }

    pub fn all_passed(&self) -> bool {
        self.0.values().all(|passed| *passed)
    }

    /// Outcomes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(name, passed)| (name.as_str(), *passed))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
