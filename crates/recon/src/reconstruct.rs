//! Fill in missing totals from the ones that were extracted.
//!
//! Each step looks at the document and proposes a brand-new field; the
//! pipeline assigns it. A step never overwrites a field that already has
//! a value, and skips silently when its inputs are missing.

use std::fmt;

use tally_fields::{confidence_product, value_sum, AmountField, TaxLine};

use crate::model::TaxTotals;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconstructionStep {
    TotalTaxFromTaxLines,
    TotalExclFromTccAndTaxes,
    TotalInclFromTaxesPlusExcl,
    TotalTaxFromInclAndExcl,
}

impl ReconstructionStep {
    /// Execution order. Later steps may consume earlier results.
    pub const PIPELINE: [ReconstructionStep; 4] = [
        Self::TotalTaxFromTaxLines,
        Self::TotalExclFromTccAndTaxes,
        Self::TotalInclFromTaxesPlusExcl,
        Self::TotalTaxFromInclAndExcl,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::TotalTaxFromTaxLines => "total_tax_from_tax_lines",
            Self::TotalExclFromTccAndTaxes => "total_excl_from_tcc_and_taxes",
            Self::TotalInclFromTaxesPlusExcl => "total_incl_from_taxes_plus_excl",
            Self::TotalTaxFromInclAndExcl => "total_tax_from_incl_and_excl",
        }
    }

    /// The field this step would produce, if any.
    pub fn propose<D: TaxTotals + ?Sized>(&self, doc: &D) -> Option<AmountField> {
        match self {
            Self::TotalTaxFromTaxLines => total_tax_from_tax_lines(doc),
            Self::TotalExclFromTccAndTaxes => total_excl_from_tcc_and_taxes(doc),
            Self::TotalInclFromTaxesPlusExcl => total_incl_from_taxes_plus_excl(doc),
            Self::TotalTaxFromInclAndExcl => total_tax_from_incl_and_excl(doc),
        }
    }

    fn target<'a, D: TaxTotals + ?Sized>(&self, doc: &'a mut D) -> &'a mut AmountField {
        match self {
            Self::TotalTaxFromTaxLines | Self::TotalTaxFromInclAndExcl => doc.total_tax_mut(),
            Self::TotalExclFromTccAndTaxes => doc.total_excl_mut(),
            Self::TotalInclFromTaxesPlusExcl => doc.total_incl_mut(),
        }
    }
}

impl fmt::Display for ReconstructionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Run every step in order. Returns the steps that assigned a field.
pub fn reconstruct<D: TaxTotals + ?Sized>(doc: &mut D) -> Vec<ReconstructionStep> {
    let mut applied = Vec::new();
    for step in ReconstructionStep::PIPELINE {
        if let Some(field) = step.propose(&*doc) {
            log::debug!(
                "{step}: value={:?} confidence={}",
                field.value,
                field.confidence
            );
            *step.target(doc) = field;
            applied.push(step);
        }
    }
    applied
}

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// Sum of the amounts that were read; missing amounts count as zero.
fn tax_amounts(taxes: &[TaxLine]) -> f64 {
    value_sum(taxes.iter().filter(|t| t.value.is_some()))
}

/// Only a strictly positive sum is kept.
pub fn total_tax_from_tax_lines<D: TaxTotals + ?Sized>(doc: &D) -> Option<AmountField> {
    let taxes = doc.taxes();
    if taxes.is_empty() || !doc.total_tax().is_empty() {
        return None;
    }
    let value = tax_amounts(taxes);
    if value <= 0.0 {
        return None;
    }
    Some(AmountField::reconstructed(value, confidence_product(taxes)))
}

/// `total_incl − Σ taxes`, whatever its sign.
pub fn total_excl_from_tcc_and_taxes<D: TaxTotals + ?Sized>(doc: &D) -> Option<AmountField> {
    let taxes = doc.taxes();
    let incl = doc.total_incl();
    let total_incl = incl.value?;
    if taxes.is_empty() || !doc.total_excl().is_empty() {
        return None;
    }
    Some(AmountField::reconstructed(
        total_incl - tax_amounts(taxes),
        confidence_product(taxes) * incl.confidence,
    ))
}

/// `Σ taxes + total_excl`.
pub fn total_incl_from_taxes_plus_excl<D: TaxTotals + ?Sized>(doc: &D) -> Option<AmountField> {
    let taxes = doc.taxes();
    let excl = doc.total_excl();
    let total_excl = excl.value?;
    if taxes.is_empty() || !doc.total_incl().is_empty() {
        return None;
    }
    Some(AmountField::reconstructed(
        tax_amounts(taxes) + total_excl,
        confidence_product(taxes) * excl.confidence,
    ))
}

/// `total_incl − total_excl`. Zero is kept here, unlike the tax-line sum.
pub fn total_tax_from_incl_and_excl<D: TaxTotals + ?Sized>(doc: &D) -> Option<AmountField> {
    if !doc.total_tax().is_empty() {
        return None;
    }
    let (incl, excl) = (doc.total_incl(), doc.total_excl());
    let value = incl.value? - excl.value?;
    if value < 0.0 {
        return None;
    }
    Some(AmountField::reconstructed(
        value,
        incl.confidence * excl.confidence,
    ))
}
