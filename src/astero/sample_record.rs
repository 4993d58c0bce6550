//! One parsed astero sample: four degree tables and the scalar metadata.
use std::collections::BTreeMap;

use crate::constants::{Category, CATEGORY_KEY, N_CATEGORIES, TABLE_COLUMNS};
use crate::key_resolver::{resolve, ColumnSource};
use crate::quantity::{Column, Quantity, Value};
use crate::stellarlog_errors::StellarLogError;

/// One row of a degree table.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRow {
    /// Radial order `n` of the mode.
    pub count: i64,
    pub chi2term: f64,
    pub freq: f64,
    pub corr: f64,
    pub obs: f64,
    pub sigma: f64,
    pub log_e: f64,
}

impl SampleRow {
    /// Cell of the column called `name` (see [`TABLE_COLUMNS`]).
    pub fn field(&self, name: &str) -> Option<Value> {
        match name {
            "count" => Some(Value::Int(self.count)),
            "chi2term" => Some(Value::Float(self.chi2term)),
            "freq" => Some(Value::Float(self.freq)),
            "corr" => Some(Value::Float(self.corr)),
            "obs" => Some(Value::Float(self.obs)),
            "sigma" => Some(Value::Float(self.sigma)),
            "logE" => Some(Value::Float(self.log_e)),
            _ => None,
        }
    }
}

pub type SampleTable = Vec<SampleRow>;

impl ColumnSource for BTreeMap<String, f64> {
    fn fetch(&self, name: &str) -> Option<Quantity> {
        self.get(name).map(|&v| Quantity::Scalar(Value::Float(v)))
    }
}

/// Tables for degrees 0 to 3 and metadata of a single sample.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleRecord {
    tables: [SampleTable; N_CATEGORIES],
    metadata: BTreeMap<String, f64>,
}

impl SampleRecord {
    pub fn new(tables: [SampleTable; N_CATEGORIES], metadata: BTreeMap<String, f64>) -> Self {
        SampleRecord { tables, metadata }
    }

    /// Table of degree `category`, `None` outside `0..=3`.
    pub fn table(&self, category: Category) -> Option<&[SampleRow]> {
        self.tables.get(category as usize).map(Vec::as_slice)
    }

    pub fn metadata(&self) -> &BTreeMap<String, f64> {
        &self.metadata
    }

    /// Every table row with its degree, degree 0 first.
    pub fn rows(&self) -> impl Iterator<Item = (Category, &SampleRow)> {
        self.tables
            .iter()
            .enumerate()
            .flat_map(|(l, table)| table.iter().map(move |row| (l as Category, row)))
    }

    /// Look up `key` in the sample.
    ///
    /// - `"category"` – degree of every row, degree 0 first,
    /// - a table column (`count`, `chi2term`, `freq`, `corr`, `obs`, `sigma`, `logE`) –
    ///   that column across the four tables, degree 0 first,
    /// - anything else – the metadata entry, with the usual log / antilog fallback.
    ///
    /// Return
    /// ----------
    /// * [`StellarLogError::KeyNotFound`] if the metadata cannot resolve the key.
    pub fn get(&self, key: &str) -> Result<Quantity, StellarLogError> {
        if key == CATEGORY_KEY {
            return Ok(Quantity::Series(Column::Int(
                self.rows().map(|(l, _)| l as i64).collect(),
            )));
        }
        if key == TABLE_COLUMNS[0] {
            return Ok(Quantity::Series(Column::Int(
                self.rows().map(|(_, row)| row.count).collect(),
            )));
        }
        if TABLE_COLUMNS.contains(&key) {
            return Ok(Quantity::Series(Column::Float(
                self.rows()
                    .filter_map(|(_, row)| row.field(key).and_then(|v| v.as_f64()))
                    .collect(),
            )));
        }
        resolve(&[&self.metadata], key)
    }
}

#[cfg(test)]
mod sample_record_test {
    use super::*;
    use approx::assert_relative_eq;

    fn row(count: i64, freq: f64) -> SampleRow {
        SampleRow {
            count,
            chi2term: 0.1,
            freq,
            corr: 0.0,
            obs: freq,
            sigma: 0.1,
            log_e: -5.0,
        }
    }

    fn record() -> SampleRecord {
        SampleRecord::new(
            [
                vec![row(10, 1000.0), row(11, 1100.0)],
                vec![],
                vec![row(9, 950.0)],
                vec![],
            ],
            BTreeMap::from([("chi2".to_string(), 2.0), ("log_age".to_string(), 9.0)]),
        )
    }

    #[test]
    fn test_get_category_column() {
        assert_eq!(
            record().get("category").unwrap(),
            Quantity::Series(Column::Int(vec![0, 0, 2]))
        );
    }

    #[test]
    fn test_get_table_columns() {
        let r = record();
        assert_eq!(
            r.get("freq").unwrap(),
            Quantity::Series(Column::Float(vec![1000.0, 1100.0, 950.0]))
        );
        assert_eq!(
            r.get("count").unwrap(),
            Quantity::Series(Column::Int(vec![10, 11, 9]))
        );
    }

    #[test]
    fn test_empty_tables_keep_column_type() {
        let r = SampleRecord::default();
        assert_eq!(
            r.get("count").unwrap(),
            Quantity::Series(Column::Int(vec![]))
        );
        assert_eq!(r.get("category").unwrap(), Quantity::Series(Column::Int(vec![])));
        assert_eq!(r.get("freq").unwrap(), Quantity::Series(Column::Float(vec![])));
    }

    #[test]
    fn test_table_by_degree() {
        let r = record();
        assert_eq!(r.table(0).map(<[SampleRow]>::len), Some(2));
        assert_eq!(r.table(2), Some(&[row(9, 950.0)][..]));
        assert!(r.table(3).is_some_and(<[SampleRow]>::is_empty));
        assert_eq!(r.table(4), None);
        assert_eq!(r.table(Category::MAX), None);
    }

    #[test]
    fn test_get_metadata() {
        let r = record();
        assert_eq!(
            r.get("chi2").unwrap(),
            Quantity::Scalar(Value::Float(2.0))
        );
        assert_relative_eq!(
            r.get("age").unwrap().to_f64_vec().unwrap()[0],
            1.0e9,
            max_relative = 1e-12
        );
        assert_eq!(
            r.get("Teff"),
            Err(StellarLogError::KeyNotFound("Teff".into()))
        );
    }
}
