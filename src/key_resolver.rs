//! # Name resolution with log / antilog fallback
//!
//! MESA writes some quantities in linear form and others as base-10 logarithms, and the
//! choice differs between a history, a profile and a results file. [`resolve`] lets a caller
//! ask for either form and serves whichever is stored.
//!
//! ## Rule
//! -----------------
//! Sources are visited in order. For each source, the first matching branch wins:
//!
//! 1. `key` stored as-is → returned unchanged,
//! 2. `log_<key>` stored → `10^value`,
//! 3. `log<key>` stored → `10^value`,
//! 4. `key = log_<name>` and `name` stored → `log10(value)`,
//! 5. `key = log<name>` and `name` stored → `log10(value)`.
//!
//! Only when no source satisfies any branch does the lookup fail with
//! [`StellarLogError::KeyNotFound`].
//!
//! ## See also
//! ------------
//! * [`crate::history::EvolutionLog::get`] – body first, then header.
//! * [`crate::astero::sample_record::SampleRecord::get`] – metadata fallback.
//! * [`crate::astero::results_reader::OptimizerResults::get`] – results columns.
use log::trace;

use crate::quantity::Quantity;
use crate::stellarlog_errors::StellarLogError;

/// A named collection of scalars or columns that can take part in key resolution.
pub trait ColumnSource {
    /// The stored quantity called `name`, if any.
    fn fetch(&self, name: &str) -> Option<Quantity>;
}

/// Resolve `key` against `sources`, visited in order.
///
/// Arguments
/// -----------------
/// * `sources` – Ordered sources; a later source is only tried once every branch failed on
///   the earlier ones.
/// * `key` – Requested name, linear or logarithmic.
///
/// Return
/// ----------
/// * The stored quantity, or its antilog / log10 depending on the branch that matched.
/// * [`StellarLogError::KeyNotFound`] if nothing matches.
/// * [`StellarLogError::NonNumericQuantity`] if a transform is needed on a text quantity.
pub fn resolve(sources: &[&dyn ColumnSource], key: &str) -> Result<Quantity, StellarLogError> {
    for (i, source) in sources.iter().enumerate() {
        if let Some(quantity) = source.fetch(key) {
            trace!("{key}: exact match in source {i}");
            return Ok(quantity);
        }

        for stored in [format!("log_{key}"), format!("log{key}")] {
            if let Some(quantity) = source.fetch(&stored) {
                trace!("{key}: antilog of {stored} in source {i}");
                return quantity.antilog(&stored);
            }
        }

        for prefix in ["log_", "log"] {
            if let Some(stored) = key.strip_prefix(prefix) {
                if let Some(quantity) = source.fetch(stored) {
                    trace!("{key}: log10 of {stored} in source {i}");
                    return quantity.log10(stored);
                }
            }
        }
    }

    Err(StellarLogError::KeyNotFound(key.to_string()))
}

#[cfg(test)]
mod key_resolver_test {
    use std::collections::HashMap;

    use super::*;
    use crate::quantity::{Column, Value};
    use approx::assert_relative_eq;

    struct MapSource(HashMap<String, Quantity>);

    impl ColumnSource for MapSource {
        fn fetch(&self, name: &str) -> Option<Quantity> {
            self.0.get(name).cloned()
        }
    }

    fn source(entries: &[(&str, Quantity)]) -> MapSource {
        MapSource(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    fn first(q: Quantity) -> f64 {
        q.to_f64_vec().unwrap()[0]
    }

    #[test]
    fn test_exact_match_wins() {
        let s = source(&[
            ("dt", Quantity::Scalar(Value::Float(5.0))),
            ("log_dt", Quantity::Scalar(Value::Float(1.0))),
        ]);
        assert_eq!(
            resolve(&[&s], "dt").unwrap(),
            Quantity::Scalar(Value::Float(5.0))
        );
    }

    #[test]
    fn test_antilog_branches() {
        let s = source(&[
            ("log_dt", Quantity::Series(Column::Float(vec![1.0, 2.0]))),
            ("logL", Quantity::Scalar(Value::Float(0.5))),
        ]);
        let dt = resolve(&[&s], "dt").unwrap().to_f64_vec().unwrap();
        assert_relative_eq!(dt[0], 10.0);
        assert_relative_eq!(dt[1], 100.0);
        assert_relative_eq!(first(resolve(&[&s], "L").unwrap()), 10f64.powf(0.5));
    }

    #[test]
    fn test_log_branches() {
        let s = source(&[
            ("star_mass", Quantity::Scalar(Value::Float(100.0))),
            ("R", Quantity::Scalar(Value::Int(1000))),
        ]);
        assert_relative_eq!(
            first(resolve(&[&s], "log_star_mass").unwrap()),
            2.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(first(resolve(&[&s], "logR").unwrap()), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_earlier_source_wins_on_any_branch() {
        let body = source(&[("log_Teff", Quantity::Scalar(Value::Float(4.0)))]);
        let header = source(&[("Teff", Quantity::Scalar(Value::Float(5772.0)))]);
        assert_relative_eq!(
            first(resolve(&[&body, &header], "Teff").unwrap()),
            10000.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_missing_key() {
        let s = source(&[("age", Quantity::Scalar(Value::Float(1.0)))]);
        assert_eq!(
            resolve(&[&s], "mass"),
            Err(StellarLogError::KeyNotFound("mass".to_string()))
        );
    }
}
