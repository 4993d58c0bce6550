//! Fortran namelist rendering of parameter values.
//!
//! | value                  | written as                      |
//! |------------------------|---------------------------------|
//! | `Float(1.0)`           | `1.00000000000000000000e+00`    |
//! | `Text("'Eggleton'")`   | `'Eggleton'` (verbatim)         |
//! | `Integer(42)`          | `42`                            |
//! | `Boolean(true)`        | `.true.`                        |
//!
//! Text is written verbatim: quote it yourself if the namelist expects a string.
use std::fmt;

use crate::quantity::{Quantity, Value};
use crate::stellarlog_errors::StellarLogError;

/// Digits after the decimal point of a real written to an inlist.
const FLOAT_DIGITS: usize = 20;

/// A value that can be written to an inlist.
#[derive(Debug, Clone, PartialEq)]
pub enum InlistValue {
    Float(f64),
    Text(String),
    Integer(i64),
    Boolean(bool),
}

/// Scientific notation with a signed, at least two-digit exponent (`1.5e-07`).
fn format_float(x: f64) -> String {
    let digits = FLOAT_DIGITS;
    let raw = format!("{x:.digits$e}");
    match raw.split_once('e') {
        Some((mantissa, exponent)) => match exponent.parse::<i32>() {
            Ok(e) => {
                let sign = if e < 0 { '-' } else { '+' };
                format!("{mantissa}e{sign}{:02}", e.abs())
            }
            Err(_) => raw,
        },
        // NaN and infinities have no exponent
        None => raw.to_lowercase(),
    }
}

/// Text written after `=` for `value`.
pub fn format_value(value: &InlistValue) -> String {
    match value {
        InlistValue::Float(x) => format_float(*x),
        InlistValue::Text(s) => s.clone(),
        InlistValue::Integer(i) => i.to_string(),
        InlistValue::Boolean(true) => ".true.".to_string(),
        InlistValue::Boolean(false) => ".false.".to_string(),
    }
}

impl fmt::Display for InlistValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_value(self))
    }
}

impl From<f64> for InlistValue {
    fn from(x: f64) -> Self {
        InlistValue::Float(x)
    }
}

impl From<i64> for InlistValue {
    fn from(i: i64) -> Self {
        InlistValue::Integer(i)
    }
}

impl From<bool> for InlistValue {
    fn from(b: bool) -> Self {
        InlistValue::Boolean(b)
    }
}

impl From<&str> for InlistValue {
    fn from(s: &str) -> Self {
        InlistValue::Text(s.to_string())
    }
}

impl From<Value> for InlistValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Int(i) => InlistValue::Integer(i),
            Value::Float(x) => InlistValue::Float(x),
            Value::Text(s) => InlistValue::Text(s),
        }
    }
}

/// Only scalars can be written back; a column has no inlist representation.
impl TryFrom<Quantity> for InlistValue {
    type Error = StellarLogError;

    fn try_from(quantity: Quantity) -> Result<Self, Self::Error> {
        match quantity {
            Quantity::Scalar(v) => Ok(v.into()),
            Quantity::Series(c) => Err(StellarLogError::InvalidParameterType(format!(
                "column of {} values",
                c.len()
            ))),
        }
    }
}

#[cfg(test)]
mod value_format_test {
    use super::*;
    use crate::quantity::Column;

    #[test]
    fn test_float_digits() {
        assert_eq!(
            format_value(&InlistValue::Float(1.0)),
            "1.00000000000000000000e+00"
        );
        assert_eq!(
            format_value(&InlistValue::Float(-0.125)),
            "-1.25000000000000000000e-01"
        );
        assert_eq!(
            format_value(&InlistValue::Float(6.02e123)),
            format!("{:.20e}", 6.02e123).replace("e123", "e+123")
        );
        assert_eq!(format_value(&InlistValue::Float(f64::NAN)), "nan");
    }

    #[test]
    fn test_other_tags() {
        assert_eq!(format_value(&"'Eggleton'".into()), "'Eggleton'");
        assert_eq!(format_value(&InlistValue::Integer(-42)), "-42");
        assert_eq!(format_value(&true.into()), ".true.");
        assert_eq!(format_value(&false.into()), ".false.");
    }

    #[test]
    fn test_from_quantity() {
        assert_eq!(
            InlistValue::try_from(Quantity::Scalar(Value::Float(0.02))),
            Ok(InlistValue::Float(0.02))
        );
        assert!(matches!(
            InlistValue::try_from(Quantity::Series(Column::Int(vec![1, 2]))),
            Err(StellarLogError::InvalidParameterType(_))
        ));
    }
}
