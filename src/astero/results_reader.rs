//! # Optimizer results table
//!
//! The results file of an `astero` search (`simplex_results.data`, `scan_grid_results.data`,
//! ...) is a whitespace-separated table:
//!
//! ```text
//! line 0        title
//! line 1        column names
//! line 2..n-4   one row per model
//! last 4 lines  summary, ignored
//! ```
//!
//! Simplex searches append a nameless column describing the simplex step; when rows carry
//! one more token than there are names, that column is called `step_type`.
//!
//! Cells are typed per column (integer, real with Fortran `D` exponents, or text). Column
//! names are kept as written.
use camino::Utf8Path;
use log::{debug, warn};

use crate::constants::{RESULTS_FOOTER_LINES, STEP_TYPE_COLUMN};
use crate::history::Body;
use crate::key_resolver::{resolve, ColumnSource};
use crate::quantity::{Column, Quantity, Value};
use crate::stellarlog_errors::StellarLogError;

/// Columns of an optimizer results file.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerResults {
    body: Body,
}

impl OptimizerResults {
    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Number of models.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Column `key`, with log / antilog fallback.
    pub fn get(&self, key: &str) -> Result<Quantity, StellarLogError> {
        resolve(&[self as &dyn ColumnSource], key)
    }
}

impl ColumnSource for OptimizerResults {
    fn fetch(&self, name: &str) -> Option<Quantity> {
        self.body.fetch(name)
    }
}

/// Parse the text of an optimizer results file.
///
/// Return
/// ----------
/// * [`StellarLogError::MalformedResults`] if the names line is missing or a row does not
///   match the number of columns.
pub fn parse_results(text: &str) -> Result<OptimizerResults, StellarLogError> {
    let lines: Vec<&str> = text.lines().collect();

    let mut names: Vec<String> = lines
        .get(1)
        .ok_or_else(|| StellarLogError::MalformedResults("missing column names line".into()))?
        .split_whitespace()
        .map(str::to_string)
        .collect();

    let end = lines.len().saturating_sub(RESULTS_FOOTER_LINES);
    let rows: Vec<Vec<&str>> = lines
        .get(2..end.max(2))
        .unwrap_or_default()
        .iter()
        .map(|l| l.split_whitespace().collect::<Vec<_>>())
        .filter(|tokens| !tokens.is_empty())
        .collect();

    if let Some(first) = rows.first() {
        if first.len() == names.len() + 1 {
            warn!("results rows have one nameless column, naming it {STEP_TYPE_COLUMN}");
            names.push(STEP_TYPE_COLUMN.to_string());
        }
    }

    let mut cells: Vec<Vec<Value>> = vec![Vec::with_capacity(rows.len()); names.len()];
    for (i, row) in rows.iter().enumerate() {
        if row.len() != names.len() {
            return Err(StellarLogError::MalformedResults(format!(
                "row {} has {} values for {} columns",
                i + 1,
                row.len(),
                names.len()
            )));
        }
        for (column, token) in cells.iter_mut().zip(row) {
            column.push(Value::infer(token));
        }
    }

    let body = Body::new(
        names
            .into_iter()
            .zip(cells.into_iter().map(Column::from_values))
            .collect(),
    )?;
    debug!(
        "parsed optimizer results: {} models, {} columns",
        body.len(),
        body.names().len()
    );
    Ok(OptimizerResults { body })
}

/// Read and parse an optimizer results file.
pub fn load_astero_results(path: &Utf8Path) -> Result<OptimizerResults, StellarLogError> {
    let text = std::fs::read_to_string(path)?;
    parse_results(&text)
}
