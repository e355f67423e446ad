//! Minimal document used by unit tests.

use tally_fields::{AmountField, TaxLine};

use crate::model::TaxTotals;

#[derive(Debug, Clone, Default)]
pub struct Totals {
    pub taxes: Vec<TaxLine>,
    pub total_tax: AmountField,
    pub total_excl: AmountField,
    pub total_incl: AmountField,
}

/// `(rate, value, confidence)` triples.
pub fn taxes(lines: &[(f64, f64, f64)]) -> Vec<TaxLine> {
    lines
        .iter()
        .map(|(rate, value, confidence)| TaxLine::new(Some(*value), Some(*rate), *confidence))
        .collect()
}

pub fn amount(value: f64, confidence: f64) -> AmountField {
    AmountField::new(Some(value), confidence)
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

/// Case count for property tests; `PROPTEST_CASES` overrides it for soak runs.
pub fn property_config() -> proptest::test_runner::Config {
    proptest::test_runner::Config {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..proptest::test_runner::Config::default()
    }
}

impl TaxTotals for Totals {
    fn taxes(&self) -> &[TaxLine] {
        &self.taxes
    }
    fn taxes_mut(&mut self) -> &mut [TaxLine] {
        &mut self.taxes
    }
    fn total_tax(&self) -> &AmountField {
        &self.total_tax
    }
    fn total_tax_mut(&mut self) -> &mut AmountField {
        &mut self.total_tax
    }
    fn total_excl(&self) -> &AmountField {
        &self.total_excl
    }
    fn total_excl_mut(&mut self) -> &mut AmountField {
        &mut self.total_excl
    }
    fn total_incl(&self) -> &AmountField {
        &self.total_incl
    }
    fn total_incl_mut(&mut self) -> &mut AmountField {
        &mut self.total_incl
    }
}
