use serde::Serialize;
use serde_json::Value;

use crate::geometry::Polygon;
use crate::raw;

/// Tax code sentinel emitted when no category was printed.
const NO_CODE: &str = "None";

/// One tax amount with its rate, category code and taxable base.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaxLine {
    pub value: Option<f64>,
    pub confidence: f64,
    pub reconstructed: bool,
    /// Percentage, e.g. `20.0` for 20 %.
    pub rate: Option<f64>,
    pub code: Option<String>,
    pub basis: Option<f64>,
    #[serde(skip_serializing_if = "Polygon::is_empty")]
    pub polygon: Polygon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_id: Option<usize>,
}

impl TaxLine {
    /// Build from a raw record such as
    /// `{"value": 10.99, "rate": 20, "code": "TVA", "base": 54.95, "confidence": 0.5}`.
    ///
    /// Rate, code and basis are read independently of the amount.
    pub fn from_record(record: &Value, value_key: &str) -> Self {
        let rate = raw::present(record, "rate").and_then(raw::to_f64);
        let code = raw::present(record, "code")
            .and_then(Value::as_str)
            .filter(|c| *c != NO_CODE)
            .map(str::to_string);
        let basis = raw::present(record, "base").and_then(raw::to_f64);

        let value = raw::present(record, value_key).and_then(raw::to_f64);
        let (confidence, polygon, page_id) = match value {
            Some(_) => (
                raw::confidence(record),
                Polygon::from_record(record),
                raw::page_id(record),
            ),
            None => (0.0, Polygon::default(), None),
        };

        Self {
            value,
            confidence,
            reconstructed: false,
            rate,
            code,
            basis,
            polygon,
            page_id,
        }
    }

    /// A tax line from typed values.
    pub fn new(value: Option<f64>, rate: Option<f64>, confidence: f64) -> Self {
        Self {
            confidence: if value.is_some() { confidence } else { 0.0 },
            value,
            rate,
            ..Self::default()
        }
    }

    /// Parse every record of a `taxes` array; anything else gives no lines.
    pub fn list_from_json(raw: Option<&Value>) -> Vec<Self> {
        raw.and_then(Value::as_array)
            .map(|records| {
                records
                    .iter()
                    .map(|r| Self::from_record(r, "value"))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn corroborate(&mut self) {
        if self.value.is_some() {
            self.confidence = 1.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn full_tax_record() {
        let record = json!({
            "value": 10.99,
            "rate": 20,
            "code": "TVA",
            "base": 54.95,
            "confidence": 0.5,
            "polygon": [[0.1, 0.1], [0.2, 0.2]],
        });
        let tax = TaxLine::from_record(&record, "value");
        assert_eq!(tax.value, Some(10.99));
        assert_eq!(tax.rate, Some(20.0));
        assert_eq!(tax.code.as_deref(), Some("TVA"));
        assert_eq!(tax.basis, Some(54.95));
        assert_eq!(tax.confidence, 0.5);
        assert_eq!(tax.polygon.points.len(), 2);
    }

    #[test]
    fn sentinel_rate_and_code() {
        let tax = TaxLine::from_record(
            &json!({"value": 2.0, "rate": "N/A", "code": "None", "confidence": 0.4}),
            "value",
        );
        assert_eq!(tax.rate, None);
        assert_eq!(tax.code, None);
        assert_eq!(tax.value, Some(2.0));

        let na_code = TaxLine::from_record(&json!({"value": 2.0, "code": "N/A"}), "value");
        assert_eq!(na_code.code, None);
    }

    #[test]
    fn missing_amount_keeps_rate() {
        let tax = TaxLine::from_record(
            &json!({"value": "N/A", "rate": 5.5, "confidence": 0.7, "polygon": [[0.0, 0.0]]}),
            "value",
        );
        assert_eq!(tax.value, None);
        assert_eq!(tax.rate, Some(5.5));
        assert_eq!(tax.confidence, 0.0);
        assert!(tax.polygon.is_empty());
    }

    #[test]
    fn list_from_non_array_is_empty() {
        assert!(TaxLine::list_from_json(None).is_empty());
        assert!(TaxLine::list_from_json(Some(&json!("N/A"))).is_empty());
        let taxes = TaxLine::list_from_json(Some(&json!([
            {"value": 1.0, "rate": 10, "confidence": 0.9},
            {"value": 2.0, "rate": 20, "confidence": 0.8},
        ])));
        assert_eq!(taxes.len(), 2);
        assert_eq!(taxes[1].rate, Some(20.0));
    }
}
