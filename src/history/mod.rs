//! # Evolutionary logs (histories and profiles)
//!
//! A MESA history (one row per time step) or profile (one row per mesh point) is a pair:
//!
//! - a [`Header`] of scalars describing the whole run or model,
//! - a [`Body`] of equal-length named columns, in file order.
//!
//! [`EvolutionLog`] wraps that pair and serves lookups through
//! [`crate::key_resolver::resolve`], searching the body before the header, so both
//! `log["dt"]`-style and `log["log_dt"]`-style requests work whichever form MESA wrote.
//!
//! ## Loading
//! -----------------
//! - [`load_history`] / [`load_profile`] – standard MESA text layout.
//! - [`load_history_pruned`] – history with restarts removed (see [`pruning`]).
//! - [`load_log_with`] – any [`LogDecoder`].
//!
//! ## Example
//! -----------------
//! ```rust,no_run
//! use camino::Utf8Path;
//! use stellarlog::history::load_history_pruned;
//!
//! # fn demo() -> Result<(), stellarlog::stellarlog_errors::StellarLogError> {
//! let history = load_history_pruned(Utf8Path::new("LOGS/history.data"))?;
//! let dt = history.get("dt")?; // served from `log_dt` if only that is stored
//! let last_ten = history.select(history.len() - 10..history.len())?;
//! # Ok(()) }
//! ```
pub mod display;
pub mod layout;
pub mod mesa_reader;
pub mod pruning;

use std::ops::Range;
use std::sync::Arc;

use camino::Utf8Path;
use log::debug;

use crate::constants::{RowIndex, SEQUENCE_KEY};
use crate::key_resolver::{resolve, ColumnSource};
use crate::quantity::{Column, Quantity, Value};
use crate::stellarlog_errors::StellarLogError;
use layout::HistoryLayout;
use mesa_reader::{LogDecoder, MesaTextDecoder};

/// Scalars describing a whole run or model, in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Header {
    entries: Vec<(String, Value)>,
}

impl Header {
    pub fn new(entries: Vec<(String, Value)>) -> Self {
        Header { entries }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ColumnSource for Header {
    fn fetch(&self, name: &str) -> Option<Quantity> {
        self.get(name).cloned().map(Quantity::Scalar)
    }
}

/// Named columns of equal length; row order is file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Body {
    names: Vec<String>,
    columns: Vec<Column>,
    n_rows: usize,
}

impl Body {
    /// Build a body from named columns.
    ///
    /// Return
    /// ----------
    /// * [`StellarLogError::RaggedColumns`] if the columns differ in length.
    pub fn new(columns: Vec<(String, Column)>) -> Result<Self, StellarLogError> {
        let n_rows = columns.first().map(|(_, c)| c.len()).unwrap_or(0);
        if let Some((name, column)) = columns.iter().find(|(_, c)| c.len() != n_rows) {
            return Err(StellarLogError::RaggedColumns {
                name: name.clone(),
                len: column.len(),
                expected: n_rows,
            });
        }
        let (names, columns) = columns.into_iter().unzip();
        Ok(Body {
            names,
            columns,
            n_rows,
        })
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| &self.columns[i])
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.n_rows
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    /// One row as `(name, value)` pairs, `None` past the end.
    pub fn row(&self, index: RowIndex) -> Option<Vec<(&str, Value)>> {
        if index >= self.n_rows {
            return None;
        }
        Some(
            self.names
                .iter()
                .zip(&self.columns)
                .filter_map(|(n, c)| c.get(index).map(|v| (n.as_str(), v)))
                .collect(),
        )
    }

    /// New body holding the rows at `indices`, in the given order.
    pub(crate) fn take(&self, indices: &[RowIndex]) -> Body {
        Body {
            names: self.names.clone(),
            columns: self.columns.iter().map(|c| c.take(indices)).collect(),
            n_rows: indices.len(),
        }
    }

    fn slice(&self, range: Range<RowIndex>) -> Body {
        Body {
            names: self.names.clone(),
            n_rows: range.len(),
            columns: self.columns.iter().map(|c| c.slice(range.clone())).collect(),
        }
    }
}

impl ColumnSource for Body {
    fn fetch(&self, name: &str) -> Option<Quantity> {
        self.column(name).cloned().map(Quantity::Series)
    }
}

/// Row sub-selection for [`EvolutionLog::select`].
#[derive(Debug, Clone, PartialEq)]
pub enum RowSelection {
    Index(RowIndex),
    Range(Range<RowIndex>),
}

impl From<RowIndex> for RowSelection {
    fn from(index: RowIndex) -> Self {
        RowSelection::Index(index)
    }
}

impl From<Range<RowIndex>> for RowSelection {
    fn from(range: Range<RowIndex>) -> Self {
        RowSelection::Range(range)
    }
}

/// A history or a profile: a shared header and a body.
///
/// Selections share the header of the log they come from; only the body is copied.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionLog {
    header: Arc<Header>,
    body: Body,
}

impl EvolutionLog {
    pub fn new(header: Header, body: Body) -> Self {
        EvolutionLog {
            header: Arc::new(header),
            body,
        }
    }

    pub fn header(&self) -> &Header {
        &self.header
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Number of body rows.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Look `key` up in the body, then in the header, with log / antilog fallback.
    ///
    /// Arguments
    /// -----------------
    /// * `key` – Column or header name, e.g. `"star_age"`, `"dt"`, `"log_Teff"`.
    ///
    /// Return
    /// ----------
    /// * A [`Quantity::Series`] for body columns, a [`Quantity::Scalar`] for header entries.
    /// * [`StellarLogError::KeyNotFound`] if neither source resolves the key.
    pub fn get(&self, key: &str) -> Result<Quantity, StellarLogError> {
        resolve(&[&self.body as &dyn ColumnSource, self.header.as_ref()], key)
    }

    /// New log over a single row or a contiguous range of rows.
    ///
    /// Return
    /// ----------
    /// * [`StellarLogError::IndexOutOfRange`] if the selection reaches past the last row.
    pub fn select<S>(&self, selection: S) -> Result<EvolutionLog, StellarLogError>
    where
        S: Into<RowSelection>,
    {
        let len = self.len();
        let range = match selection.into() {
            RowSelection::Index(index) if index < len => index..index + 1,
            RowSelection::Index(index) => {
                return Err(StellarLogError::IndexOutOfRange { index, len });
            }
            RowSelection::Range(range) => range,
        };
        if range.end > len || range.start > range.end {
            return Err(StellarLogError::IndexOutOfRange {
                index: range.end.saturating_sub(1).max(range.start),
                len,
            });
        }
        Ok(EvolutionLog {
            header: Arc::clone(&self.header),
            body: self.body.slice(range),
        })
    }

    /// Copy of the log with restarts removed, keyed on `model_number`.
    pub fn pruned(&self) -> Result<EvolutionLog, StellarLogError> {
        self.pruned_by(SEQUENCE_KEY)
    }

    /// Copy of the log with restarts removed, keyed on the integer column `key`.
    ///
    /// Return
    /// ----------
    /// * [`StellarLogError::KeyNotFound`] if the body has no such column.
    /// * [`StellarLogError::InvalidSequenceKey`] if the column does not hold integers.
    pub fn pruned_by(&self, key: &str) -> Result<EvolutionLog, StellarLogError> {
        let keys = self
            .body
            .column(key)
            .ok_or_else(|| StellarLogError::KeyNotFound(key.to_string()))?
            .as_ints()
            .ok_or_else(|| StellarLogError::InvalidSequenceKey(key.to_string()))?;
        let kept = pruning::prune_indices(keys);
        Ok(EvolutionLog {
            header: Arc::clone(&self.header),
            body: self.body.take(&kept),
        })
    }
}

/// Read `path` and decode it with `decoder`.
pub fn load_log_with(
    path: &Utf8Path,
    decoder: &dyn LogDecoder,
) -> Result<EvolutionLog, StellarLogError> {
    let text = std::fs::read_to_string(path)?;
    let (header, body) = decoder.decode(&text)?;
    debug!("loaded {path}: {} rows", body.len());
    Ok(EvolutionLog::new(header, body))
}

/// Load a MESA history in the standard text layout.
pub fn load_history(path: &Utf8Path) -> Result<EvolutionLog, StellarLogError> {
    load_log_with(path, &MesaTextDecoder::default())
}

/// Load a MESA history and remove restarts and retries.
///
/// Only the last row written for each model number is kept, and rows beyond the model
/// number of the last row are dropped.
pub fn load_history_pruned(path: &Utf8Path) -> Result<EvolutionLog, StellarLogError> {
    load_history_pruned_with(path, &HistoryLayout::default())
}

/// Load a history in a custom layout and prune it on the layout's sequence key.
pub fn load_history_pruned_with(
    path: &Utf8Path,
    layout: &HistoryLayout,
) -> Result<EvolutionLog, StellarLogError> {
    load_log_with(path, &MesaTextDecoder::new(layout.clone()))?.pruned_by(&layout.sequence_key)
}

/// Load a MESA profile in the standard text layout.
pub fn load_profile(path: &Utf8Path) -> Result<EvolutionLog, StellarLogError> {
    load_log_with(path, &MesaTextDecoder::default())
}

#[cfg(test)]
mod evolution_log_test {
    use super::*;
    use approx::assert_relative_eq;

    fn history(model_numbers: Vec<i64>) -> EvolutionLog {
        let n = model_numbers.len();
        let header = Header::new(vec![
            ("initial_mass".into(), Value::Float(1.0)),
            ("log_R_initial".into(), Value::Float(0.0)),
        ]);
        let body = Body::new(vec![
            ("model_number".into(), Column::Int(model_numbers)),
            (
                "log_dt".into(),
                Column::Float((0..n).map(|i| i as f64).collect()),
            ),
            (
                "star_age".into(),
                Column::Float((0..n).map(|i| 10f64.powi(i as i32)).collect()),
            ),
        ])
        .unwrap();
        EvolutionLog::new(header, body)
    }

    #[test]
    fn test_ragged_body() {
        assert_eq!(
            Body::new(vec![
                ("a".into(), Column::Int(vec![1, 2])),
                ("b".into(), Column::Int(vec![1])),
            ]),
            Err(StellarLogError::RaggedColumns {
                name: "b".into(),
                len: 1,
                expected: 2
            })
        );
    }

    #[test]
    fn test_get_body_then_header() {
        let log = history(vec![1, 2, 3]);
        let dt = log.get("dt").unwrap().to_f64_vec().unwrap();
        assert_relative_eq!(dt[2], 100.0);
        let log_age = log.get("log_star_age").unwrap().to_f64_vec().unwrap();
        assert_relative_eq!(log_age[1], 1.0, epsilon = 1e-12);
        assert_eq!(
            log.get("initial_mass").unwrap(),
            Quantity::Scalar(Value::Float(1.0))
        );
        assert_relative_eq!(
            log.get("R_initial").unwrap().to_f64_vec().unwrap()[0],
            1.0
        );
        assert_eq!(
            log.get("luminosity"),
            Err(StellarLogError::KeyNotFound("luminosity".into()))
        );
    }

    #[test]
    fn test_select_shares_header() {
        let log = history(vec![1, 2, 3, 4]);
        let sub = log.select(1..3).unwrap();
        assert_eq!(sub.len(), 2);
        assert!(Arc::ptr_eq(&sub.header, &log.header));
        assert_eq!(
            sub.get("model_number").unwrap(),
            Quantity::Series(Column::Int(vec![2, 3]))
        );

        let one = log.select(3).unwrap();
        assert_eq!(one.len(), 1);
        assert_eq!(
            log.select(4),
            Err(StellarLogError::IndexOutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn test_select_last_position() {
        let log = history(vec![1, 2]);
        assert_eq!(
            log.select(usize::MAX),
            Err(StellarLogError::IndexOutOfRange {
                index: usize::MAX,
                len: 2
            })
        );
        assert!(history(vec![]).select(0).is_err());
    }

    #[test]
    fn test_pruned_log() {
        let log = history(vec![1, 2, 3, 2, 3, 4]);
        let pruned = log.pruned().unwrap();
        assert_eq!(
            pruned.get("model_number").unwrap(),
            Quantity::Series(Column::Int(vec![1, 2, 3, 4]))
        );
        assert_eq!(
            pruned.get("log_dt").unwrap(),
            Quantity::Series(Column::Float(vec![0.0, 3.0, 4.0, 5.0]))
        );
        assert_eq!(pruned.pruned().unwrap(), pruned);
    }

    #[test]
    fn test_pruned_by_non_integer_key() {
        let log = history(vec![1, 2]);
        assert_eq!(
            log.pruned_by("star_age"),
            Err(StellarLogError::InvalidSequenceKey("star_age".into()))
        );
        assert_eq!(
            log.pruned_by("step"),
            Err(StellarLogError::KeyNotFound("step".into()))
        );
    }
}
