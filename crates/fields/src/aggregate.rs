//! Reductions over sequences of fields.

use crate::field::Field;
use crate::tax::TaxLine;

/// Anything carrying a confidence score.
pub trait Scored {
    fn confidence(&self) -> f64;
}

/// Anything carrying a numeric value.
pub trait Valued {
    fn amount(&self) -> Option<f64>;
}

impl<T> Scored for Field<T> {
    fn confidence(&self) -> f64 {
        self.confidence
    }
}

impl Valued for Field<f64> {
    fn amount(&self) -> Option<f64> {
        self.value
    }
}

impl Scored for TaxLine {
    fn confidence(&self) -> f64 {
        self.confidence
    }
}

impl Valued for TaxLine {
    fn amount(&self) -> Option<f64> {
        self.value
    }
}

/// Product of confidences, starting at 1.0.
///
/// Fail-closed: a non-finite confidence anywhere makes the product 0.0.
pub fn confidence_product<'a, S, I>(fields: I) -> f64
where
    S: Scored + 'a,
    I: IntoIterator<Item = &'a S>,
{
    let mut product = 1.0;
    for field in fields {
        let c = field.confidence();
        if !c.is_finite() {
            return 0.0;
        }
        product *= c;
    }
    product
}

/// Sum of values. All-or-nothing: a single empty value makes the sum 0.0.
///
/// Callers wanting "sum of what is there" filter first.
pub fn value_sum<'a, V, I>(fields: I) -> f64
where
    V: Valued + 'a,
    I: IntoIterator<Item = &'a V>,
{
    let mut sum = 0.0;
    for field in fields {
        match field.amount() {
            Some(v) => sum += v,
            None => return 0.0,
        }
    }
    sum
}
