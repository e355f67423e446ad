use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::geometry::Polygon;
use crate::raw;

/// A value type a [`Field`] can hold.
pub trait FieldValue: Clone {
    /// Coerce a raw (non-missing) prediction value. `None` on type mismatch.
    fn from_json(raw: &Value) -> Option<Self>;

    /// Equality used by field comparison.
    fn same_as(&self, other: &Self) -> bool;
}

impl FieldValue for f64 {
    fn from_json(raw: &Value) -> Option<Self> {
        raw::to_f64(raw)
    }

    fn same_as(&self, other: &Self) -> bool {
        self == other
    }
}

impl FieldValue for String {
    fn from_json(raw: &Value) -> Option<Self> {
        match raw {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Case-insensitive.
    fn same_as(&self, other: &Self) -> bool {
        self.to_lowercase() == other.to_lowercase()
    }
}

impl FieldValue for NaiveDate {
    fn from_json(raw: &Value) -> Option<Self> {
        NaiveDate::parse_from_str(raw.as_str()?.trim(), "%Y-%m-%d").ok()
    }

    fn same_as(&self, other: &Self) -> bool {
        self == other
    }
}

/// One extracted datum.
///
/// Invariant: a field without a value has zero confidence and no polygon.
/// The constructors uphold it; code that writes the public members
/// directly is expected to do the same.
#[derive(Debug, Clone, Serialize)]
pub struct Field<T> {
    pub value: Option<T>,
    pub confidence: f64,
    /// True when the value was computed rather than read from the document.
    pub reconstructed: bool,
    #[serde(skip_serializing_if = "Polygon::is_empty")]
    pub polygon: Polygon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_id: Option<usize>,
}

pub type AmountField = Field<f64>;
pub type TextField = Field<String>;
pub type DateField = Field<NaiveDate>;

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self {
            value: None,
            confidence: 0.0,
            reconstructed: false,
            polygon: Polygon::default(),
            page_id: None,
        }
    }
}

impl<T: FieldValue> Field<T> {
    /// Build from a raw record, reading the value under `value_key`.
    pub fn from_record(record: &Value, value_key: &str) -> Self {
        let Some(raw_value) = raw::present(record, value_key) else {
            return Self::default();
        };
        let Some(value) = T::from_json(raw_value) else {
            log::debug!("discarding uncoercible value under '{value_key}': {raw_value}");
            return Self::default();
        };
        Self {
            value: Some(value),
            confidence: raw::confidence(record),
            reconstructed: false,
            polygon: Polygon::from_record(record),
            page_id: raw::page_id(record),
        }
    }
}

impl<T> Field<T> {
    /// An extracted field, for callers that already hold typed values.
    pub fn new(value: Option<T>, confidence: f64) -> Self {
        match value {
            Some(v) => Self {
                value: Some(v),
                confidence,
                ..Self::default()
            },
            None => Self::default(),
        }
    }

    /// A field computed by the engine. Carries no position.
    pub fn reconstructed(value: T, confidence: f64) -> Self {
        Self {
            value: Some(value),
            confidence,
            reconstructed: true,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// Raise confidence to certainty after an external cross-check.
    /// Empty fields stay at zero.
    pub fn corroborate(&mut self) {
        if self.value.is_some() {
            self.confidence = 1.0;
        }
    }
}

impl<T: FieldValue> PartialEq for Field<T> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.value, &other.value) {
            (None, None) => true,
            (Some(a), Some(b)) => a.same_as(b),
            _ => false,
        }
    }
}
