//! Consistency checks between tax lines and document totals.
//!
//! Each check is a pure predicate over the extracted values. A passing
//! check counts as corroboration: every field it validated is raised to
//! full confidence by [`TaxCheck::corroborate`].

use std::fmt;

use tally_fields::{value_sum, AmountField, TaxLine};

use crate::config::ToleranceConfig;
use crate::model::TaxTotals;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxCheck {
    /// Rates and tax amounts imply the tax-inclusive total.
    TaxesMatchTotalIncl,
    /// Rates and tax amounts imply the tax-exclusive total.
    TaxesMatchTotalExcl,
    /// `taxes + total_excl == total_incl`.
    TaxesPlusTotalExclMatchTotalIncl,
}

impl TaxCheck {
    pub const ALL: [TaxCheck; 3] = [
        Self::TaxesMatchTotalIncl,
        Self::TaxesMatchTotalExcl,
        Self::TaxesPlusTotalExclMatchTotalIncl,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::TaxesMatchTotalIncl => "taxes_match_total_incl",
            Self::TaxesMatchTotalExcl => "taxes_match_total_excl",
            Self::TaxesPlusTotalExclMatchTotalIncl => "taxes_plus_total_excl_match_total_incl",
        }
    }

    pub fn evaluate<D: TaxTotals + ?Sized>(&self, doc: &D, tolerance: &ToleranceConfig) -> bool {
        match self {
            Self::TaxesMatchTotalIncl => {
                taxes_match_total_incl(doc.taxes(), doc.total_incl(), tolerance.rate_slack)
            }
            Self::TaxesMatchTotalExcl => {
                taxes_match_total_excl(doc.taxes(), doc.total_excl(), tolerance.rate_slack)
            }
            Self::TaxesPlusTotalExclMatchTotalIncl => taxes_plus_total_excl_match_total_incl(
                doc.taxes(),
                doc.total_excl(),
                doc.total_incl(),
                tolerance.sum_slack,
            ),
        }
    }

    /// Raise every field this check validates to confidence 1.0.
    pub fn corroborate<D: TaxTotals + ?Sized>(&self, doc: &mut D) {
        for tax in doc.taxes_mut() {
            tax.corroborate();
        }
        doc.total_tax_mut().corroborate();
        match self {
            Self::TaxesMatchTotalIncl => doc.total_incl_mut().corroborate(),
            Self::TaxesMatchTotalExcl => doc.total_excl_mut().corroborate(),
            Self::TaxesPlusTotalExclMatchTotalIncl => {
                doc.total_excl_mut().corroborate();
                doc.total_incl_mut().corroborate();
            }
        }
    }
}

impl fmt::Display for TaxCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Relative slack shrinking as the tax total grows.
pub(crate) fn relative_epsilon(total_vat: f64) -> f64 {
    1.0 / (100.0 * total_vat)
}

/// `expected·(1−ε) − slack ≤ reconstructed ≤ expected·(1+ε) + slack`
pub(crate) fn within_tolerance(reconstructed: f64, expected: f64, total_vat: f64, slack: f64) -> bool {
    let eps = relative_epsilon(total_vat);
    expected * (1.0 - eps) - slack <= reconstructed && reconstructed <= expected * (1.0 + eps) + slack
}

/// Sum of `per_line(value, rate)` over all lines. `None` as soon as a line
/// lacks a value or has no usable rate.
fn sum_by_rate(taxes: &[TaxLine], per_line: impl Fn(f64, f64) -> f64) -> Option<f64> {
    let mut sum = 0.0;
    for tax in taxes {
        let (Some(value), Some(rate)) = (tax.value, tax.rate) else {
            return None;
        };
        if rate == 0.0 {
            return None;
        }
        sum += per_line(value, rate);
    }
    Some(sum)
}

fn rate_based_match(
    taxes: &[TaxLine],
    target: &AmountField,
    slack: f64,
    per_line: impl Fn(f64, f64) -> f64,
) -> bool {
    if taxes.is_empty() {
        return false;
    }
    let Some(expected) = target.value else {
        return false;
    };
    let Some(reconstructed) = sum_by_rate(taxes, per_line) else {
        return false;
    };
    // Every line has a value at this point.
    let total_vat = value_sum(taxes);
    if total_vat <= 0.0 {
        return false;
    }
    within_tolerance(reconstructed, expected, total_vat, slack)
}

/// Each line's amount plus the base its rate implies should add up to
/// the tax-inclusive total.
pub fn taxes_match_total_incl(taxes: &[TaxLine], total_incl: &AmountField, slack: f64) -> bool {
    rate_based_match(taxes, total_incl, slack, |value, rate| value + 100.0 * value / rate)
}

/// The bases implied by each line's rate should add up to the
/// tax-exclusive total.
pub fn taxes_match_total_excl(taxes: &[TaxLine], total_excl: &AmountField, slack: f64) -> bool {
    rate_based_match(taxes, total_excl, slack, |value, rate| 100.0 * value / rate)
}

/// Rates play no part here; lines without an amount are skipped.
pub fn taxes_plus_total_excl_match_total_incl(
    taxes: &[TaxLine],
    total_excl: &AmountField,
    total_incl: &AmountField,
    slack: f64,
) -> bool {
    let (Some(excl), Some(incl)) = (total_excl.value, total_incl.value) else {
        return false;
    };
    if taxes.is_empty() {
        return false;
    }
    let total_vat = value_sum(taxes.iter().filter(|t| t.value.is_some()));
    if total_vat <= 0.0 {
        return false;
    }
    (incl - (total_vat + excl)).abs() <= slack
}
