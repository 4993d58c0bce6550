//! # Scalars, columns and resolved quantities
//!
//! Every value read from a history, a profile, a results file or a sample ends up in one of
//! three shapes:
//!
//! - [`Value`] – a single scalar (one header entry, one metadata entry, one cell),
//! - [`Column`] – a typed, ordered sequence of cells (one body column),
//! - [`Quantity`] – what a key lookup hands back: either a scalar or a whole column.
//!
//! Numbers written by Fortran may carry a `D` exponent marker (`1.0D+00`); [`parse_real`]
//! normalizes it before parsing.
//!
//! ## Log / antilog
//! -----------------
//! [`Quantity::antilog`] and [`Quantity::log10`] implement the base-10 transforms used by
//! [`crate::key_resolver::resolve`]. Both always produce real values, whatever the stored type.
use std::fmt;
use std::ops::Range;

use itertools::Itertools;

use crate::stellarlog_errors::StellarLogError;

/// Parse a real number, accepting Fortran `D`/`d` exponent markers.
///
/// Return
/// ----------
/// * `Some(f64)` if the token (lower-cased, `d` replaced by `e`) is a valid float.
pub fn parse_real(token: &str) -> Option<f64> {
    token.to_lowercase().replace('d', "e").parse::<f64>().ok()
}

/// A single scalar as stored in a header, a metadata map or a body cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Infer the type of a raw token: integer first, then real, then text.
    ///
    /// Surrounding double quotes are stripped from text tokens.
    pub fn infer(token: &str) -> Value {
        if let Ok(i) = token.parse::<i64>() {
            return Value::Int(i);
        }
        if let Some(f) = parse_real(token) {
            return Value::Float(f);
        }
        Value::Text(token.trim_matches('"').to_string())
    }

    /// Numeric view of the value, `None` for text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Text(_) => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(s) => write!(f, "{s}"),
        }
    }
}

/// A typed column of a tabular body.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Int(Vec<i64>),
    Float(Vec<f64>),
    Text(Vec<String>),
}

impl Column {
    /// Build the narrowest column able to hold every value.
    ///
    /// All integers give an [`Column::Int`], all numbers a [`Column::Float`], anything else
    /// falls back to [`Column::Text`].
    pub fn from_values(values: Vec<Value>) -> Column {
        if values.iter().all(|v| matches!(v, Value::Int(_))) {
            Column::Int(values.iter().filter_map(Value::as_i64).collect())
        } else if values.iter().all(|v| v.as_f64().is_some()) {
            Column::Float(values.iter().filter_map(Value::as_f64).collect())
        } else {
            Column::Text(values.iter().map(|v| v.to_string()).collect())
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Int(v) => v.len(),
            Column::Float(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cell at `index`, if any.
    pub fn get(&self, index: usize) -> Option<Value> {
        match self {
            Column::Int(v) => v.get(index).copied().map(Value::Int),
            Column::Float(v) => v.get(index).copied().map(Value::Float),
            Column::Text(v) => v.get(index).cloned().map(Value::Text),
        }
    }

    /// New column holding the cells at `indices`, in the given order.
    ///
    /// Panics
    /// ----------
    /// * If an index is out of bounds; callers check indices against the body length.
    pub fn take(&self, indices: &[usize]) -> Column {
        match self {
            Column::Int(v) => Column::Int(indices.iter().map(|&i| v[i]).collect()),
            Column::Float(v) => Column::Float(indices.iter().map(|&i| v[i]).collect()),
            Column::Text(v) => Column::Text(indices.iter().map(|&i| v[i].clone()).collect()),
        }
    }

    /// New column over a contiguous range of rows.
    pub fn slice(&self, range: Range<usize>) -> Column {
        match self {
            Column::Int(v) => Column::Int(v[range].to_vec()),
            Column::Float(v) => Column::Float(v[range].to_vec()),
            Column::Text(v) => Column::Text(v[range].to_vec()),
        }
    }

    pub fn as_ints(&self) -> Option<&[i64]> {
        match self {
            Column::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Real-valued copy of the column, `None` for text columns.
    pub fn to_f64(&self) -> Option<Vec<f64>> {
        match self {
            Column::Int(v) => Some(v.iter().map(|&i| i as f64).collect()),
            Column::Float(v) => Some(v.clone()),
            Column::Text(_) => None,
        }
    }

    /// Concatenate columns end to end, widening to the common type.
    pub fn concat<I>(columns: I) -> Column
    where
        I: IntoIterator<Item = Column>,
    {
        let columns = columns.into_iter().collect_vec();
        let values = columns
            .iter()
            .flat_map(|c| (0..c.len()).filter_map(move |i| c.get(i)))
            .collect_vec();
        if values.is_empty() {
            // keep the type of the inputs when every input is empty
            return match columns.first() {
                Some(Column::Int(_)) => Column::Int(Vec::new()),
                Some(Column::Text(_)) => Column::Text(Vec::new()),
                _ => Column::Float(Vec::new()),
            };
        }
        Column::from_values(values)
    }
}

/// Result of a key lookup: a single scalar or a whole column.
#[derive(Debug, Clone, PartialEq)]
pub enum Quantity {
    Scalar(Value),
    Series(Column),
}

impl Quantity {
    /// Raise 10 to the quantity, element-wise.
    ///
    /// Arguments
    /// -----------------
    /// * `name` – Stored name, reported if the quantity is not numeric.
    pub fn antilog(&self, name: &str) -> Result<Quantity, StellarLogError> {
        self.map_real(name, |x| 10f64.powf(x))
    }

    /// Base-10 logarithm of the quantity, element-wise.
    pub fn log10(&self, name: &str) -> Result<Quantity, StellarLogError> {
        self.map_real(name, f64::log10)
    }

    fn map_real<F>(&self, name: &str, f: F) -> Result<Quantity, StellarLogError>
    where
        F: Fn(f64) -> f64,
    {
        let non_numeric = || StellarLogError::NonNumericQuantity(name.to_string());
        match self {
            Quantity::Scalar(v) => Ok(Quantity::Scalar(Value::Float(f(
                v.as_f64().ok_or_else(non_numeric)?,
            )))),
            Quantity::Series(c) => Ok(Quantity::Series(Column::Float(
                c.to_f64()
                    .ok_or_else(non_numeric)?
                    .into_iter()
                    .map(f)
                    .collect(),
            ))),
        }
    }

    /// Real-valued view: a scalar gives a single element.
    pub fn to_f64_vec(&self) -> Option<Vec<f64>> {
        match self {
            Quantity::Scalar(v) => v.as_f64().map(|x| vec![x]),
            Quantity::Series(c) => c.to_f64(),
        }
    }

    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            Quantity::Scalar(v) => Some(v),
            Quantity::Series(_) => None,
        }
    }

    pub fn as_series(&self) -> Option<&Column> {
        match self {
            Quantity::Series(c) => Some(c),
            Quantity::Scalar(_) => None,
        }
    }
}

#[cfg(test)]
mod quantity_test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_real_fortran_exponent() {
        assert_eq!(parse_real("1.0d0"), Some(1.0));
        assert_eq!(parse_real("2.5D+01"), Some(25.0));
        assert_eq!(parse_real("-3.0E-02"), Some(-0.03));
        assert_eq!(parse_real("abc"), None);
    }

    #[test]
    fn test_infer_value() {
        assert_eq!(Value::infer("42"), Value::Int(42));
        assert_eq!(Value::infer("1.5D0"), Value::Float(1.5));
        assert_eq!(
            Value::infer("\"r12115\""),
            Value::Text("r12115".to_string())
        );
    }

    #[test]
    fn test_column_from_values_widens() {
        assert_eq!(
            Column::from_values(vec![Value::Int(1), Value::Int(2)]),
            Column::Int(vec![1, 2])
        );
        assert_eq!(
            Column::from_values(vec![Value::Int(1), Value::Float(2.5)]),
            Column::Float(vec![1.0, 2.5])
        );
    }

    #[test]
    fn test_concat_keeps_order() {
        let c = Column::concat(vec![Column::Int(vec![1, 2]), Column::Int(vec![]), Column::Int(vec![3])]);
        assert_eq!(c, Column::Int(vec![1, 2, 3]));
        assert_eq!(
            Column::concat(vec![Column::Int(vec![]), Column::Int(vec![])]),
            Column::Int(vec![])
        );
    }

    #[test]
    fn test_antilog_and_log10() {
        let q = Quantity::Series(Column::Int(vec![0, 1, 2]));
        let lin = q.antilog("log_x").unwrap().to_f64_vec().unwrap();
        assert_relative_eq!(lin[0], 1.0);
        assert_relative_eq!(lin[1], 10.0);
        assert_relative_eq!(lin[2], 100.0);

        let s = Quantity::Scalar(Value::Float(1000.0));
        let log_s = s.log10("x").unwrap().to_f64_vec().unwrap();
        assert_relative_eq!(log_s[0], 3.0, epsilon = 1e-12);

        let t = Quantity::Scalar(Value::Text("abc".into()));
        assert_eq!(
            t.log10("date"),
            Err(StellarLogError::NonNumericQuantity("date".into()))
        );
    }
}
