use serde::Serialize;
use serde_json::Value;
use tally_fields::{AmountField, DateField, TaxLine, TextField};

use super::{field, record, warn_if_not_object};
use crate::checks::TaxCheck;
use crate::config::ReconConfig;
use crate::engine::reconcile;
use crate::error::ReconError;
use crate::model::{Checklist, TaxTotals};

#[derive(Debug, Clone, Serialize)]
pub struct Invoice {
    pub invoice_number: TextField,
    pub date: DateField,
    pub due_date: DateField,
    pub supplier: TextField,
    pub customer: TextField,
    pub taxes: Vec<TaxLine>,
    pub total_tax: AmountField,
    pub total_excl: AmountField,
    pub total_incl: AmountField,
    pub checklist: Checklist,
}

impl Invoice {
    pub const CHECKS: [TaxCheck; 3] = TaxCheck::ALL;

    pub fn from_prediction(prediction: &Value) -> Self {
        Self::from_prediction_with(prediction, &ReconConfig::default())
    }

    pub fn from_prediction_with(prediction: &Value, config: &ReconConfig) -> Self {
        warn_if_not_object("invoice", prediction);
        let mut invoice = Self {
            invoice_number: field(prediction, "invoice_number"),
            date: field(prediction, "date"),
            due_date: field(prediction, "due_date"),
            supplier: field(prediction, "supplier"),
            customer: field(prediction, "customer"),
            taxes: TaxLine::list_from_json(Some(record(prediction, "taxes"))),
            total_tax: field(prediction, "total_tax"),
            total_excl: field(prediction, "total_excl"),
            total_incl: field(prediction, "total_incl"),
            checklist: Checklist::default(),
        };
        invoice.checklist = reconcile(&mut invoice, &Self::CHECKS, config);
        invoice
    }

    pub fn from_json_str(input: &str) -> Result<Self, ReconError> {
        let prediction: Value = serde_json::from_str(input)?;
        Ok(Self::from_prediction(&prediction))
    }
}

impl TaxTotals for Invoice {
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
