//! Documents assembled from raw predictions.
//!
//! A prediction is a JSON object mapping field names to raw records.
//! Building a document reads every field, runs its checks and then its
//! reconstruction, in that order.

mod invoice;
mod passport;
mod receipt;

pub use invoice::Invoice;
pub use passport::{Passport, MRZ_VALID, MRZ_VALID_SURNAME};
pub use receipt::Receipt;

use serde_json::Value;
use tally_fields::raw::present;
use tally_fields::{Field, FieldValue};

static MISSING: Value = Value::Null;

/// Raw record stored under `key`, or JSON `null`.
fn record<'a>(prediction: &'a Value, key: &str) -> &'a Value {
    prediction.get(key).unwrap_or(&MISSING)
}

/// Field stored under `key`, its value under the record's `"value"`.
fn field<T: FieldValue>(prediction: &Value, key: &str) -> Field<T> {
    Field::from_record(record(prediction, key), "value")
}

/// Field under the first of `keys` whose record holds a value.
fn field_any<T: FieldValue>(prediction: &Value, keys: &[&str]) -> Field<T> {
    keys.iter()
        .find_map(|key| prediction.get(*key).filter(|r| present(r, "value").is_some()))
        .map(|r| Field::from_record(r, "value"))
        .unwrap_or_default()
}

/// Every record of the array stored under `key`.
fn field_list<T: FieldValue>(prediction: &Value, key: &str) -> Vec<Field<T>> {
    record(prediction, key)
        .as_array()
        .map(|records| records.iter().map(|r| Field::from_record(r, "value")).collect())
        .unwrap_or_default()
}

fn warn_if_not_object(kind: &str, prediction: &Value) {
    if !prediction.is_object() {
        log::warn!("{kind} prediction is not a JSON object; every field will be empty");
    }
}
