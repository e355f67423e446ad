use serde::Serialize;
use serde_json::Value;
use tally_fields::{AmountField, DateField, TaxLine, TextField};

use super::{field, field_any, record, warn_if_not_object};
use crate::checks::TaxCheck;
use crate::config::ReconConfig;
use crate::engine::reconcile;
use crate::error::ReconError;
use crate::model::{Checklist, TaxTotals};

/// A till receipt. Receipts print no tax-exclusive total, so
/// `total_excl` is only ever reconstructed.
#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub date: DateField,
    pub time: TextField,
    pub supplier: TextField,
    pub category: TextField,
    pub taxes: Vec<TaxLine>,
    pub total_tax: AmountField,
    pub total_excl: AmountField,
    pub total_incl: AmountField,
    pub checklist: Checklist,
}

impl Receipt {
    pub const CHECKS: [TaxCheck; 1] = [TaxCheck::TaxesMatchTotalIncl];

    pub fn from_prediction(prediction: &Value) -> Self {
        Self::from_prediction_with(prediction, &ReconConfig::default())
    }

    pub fn from_prediction_with(prediction: &Value, config: &ReconConfig) -> Self {
        warn_if_not_object("receipt", prediction);
        let mut receipt = Self {
            date: field(prediction, "date"),
            time: field(prediction, "time"),
            supplier: field(prediction, "supplier"),
            category: field(prediction, "category"),
            taxes: TaxLine::list_from_json(Some(record(prediction, "taxes"))),
            total_tax: field(prediction, "total_tax"),
            total_excl: AmountField::default(),
            total_incl: field_any(prediction, &["total_incl", "total_amount"]),
            checklist: Checklist::default(),
        };
        receipt.checklist = reconcile(&mut receipt, &Self::CHECKS, config);
        receipt
    }

    pub fn from_json_str(input: &str) -> Result<Self, ReconError> {
        let prediction: Value = serde_json::from_str(input)?;
        Ok(Self::from_prediction(&prediction))
    }
}

impl TaxTotals for Receipt {
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn only_rate_check_is_reported() {
        let receipt = Receipt::from_prediction(&json!({
            "taxes": [{"value": 2.0, "rate": 10, "confidence": 0.5}],
            "total_incl": {"value": 22.0, "confidence": 0.4},
        }));
        assert_eq!(receipt.checklist.len(), 1);
        assert_eq!(receipt.checklist.get("taxes_match_total_incl"), Some(true));
        assert_eq!(receipt.checklist.get("taxes_match_total_excl"), None);
    }

    #[test]
    fn excl_is_reconstructed_even_if_predicted() {
        let receipt = Receipt::from_prediction(&json!({
            "taxes": [{"value": 2.0, "rate": 10, "confidence": 0.5}],
            "total_excl": {"value": 99.0, "confidence": 0.9},
            "total_amount": {"value": 22.0, "confidence": 0.4},
        }));
        assert_eq!(receipt.total_incl.value, Some(22.0));
        assert_eq!(receipt.total_excl.value, Some(20.0));
        assert!(receipt.total_excl.reconstructed);
    }

    #[test]
    fn unavailable_total_incl_falls_back_to_total_amount() {
        let receipt = Receipt::from_prediction(&json!({
            "taxes": [{"value": 2.0, "rate": 10, "confidence": 0.5}],
            "total_incl": {"value": "N/A"},
            "total_amount": {"value": 22.0, "confidence": 0.4},
        }));
        assert_eq!(receipt.total_incl.value, Some(22.0));
        assert_eq!(receipt.checklist.get("taxes_match_total_incl"), Some(true));
        assert_eq!(receipt.total_excl.value, Some(20.0));
    }
}
