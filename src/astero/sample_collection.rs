//! # Collections of astero samples
//!
//! [`SampleCollection`] keeps samples in load order and answers the same keys as
//! [`SampleRecord::get`] for every member at once, so a caller can pull e.g. `chi2` for all
//! the models of an optimizer run without building a combined table.
//!
//! ## Indexing
//! -----------------
//! - by position – [`SampleCollection::record`] or `collection[i]`,
//! - by contiguous range – [`SampleCollection::slice`], a new collection,
//! - by name – [`SampleCollection::get`], one quantity per member.
//!
//! ## Export
//! -----------------
//! [`SampleCollection::write_csv`] writes every table row of every member, tagged with the
//! member position and the degree.
use std::ops::{Index, Range};

use camino::Utf8Path;
use log::debug;
use serde::Serialize;

use super::sample_parser::load_astero_sample;
use super::sample_record::SampleRecord;
use crate::constants::{Category, RowIndex};
use crate::quantity::{Column, Quantity};
use crate::stellarlog_errors::StellarLogError;

/// Ordered samples, typically the models of one optimizer run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SampleCollection {
    samples: Vec<SampleRecord>,
}

/// One exported table row.
#[derive(Debug, Serialize)]
struct CsvRow {
    sample: RowIndex,
    category: Category,
    count: i64,
    chi2term: f64,
    freq: f64,
    corr: f64,
    obs: f64,
    sigma: f64,
    #[serde(rename = "logE")]
    log_e: f64,
}

impl SampleCollection {
    pub fn new(samples: Vec<SampleRecord>) -> Self {
        SampleCollection { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SampleRecord> {
        self.samples.iter()
    }

    /// Sample at `index`, if any.
    pub fn record(&self, index: RowIndex) -> Option<&SampleRecord> {
        self.samples.get(index)
    }

    /// New collection over `range`, in the same order.
    ///
    /// Return
    /// ----------
    /// * [`StellarLogError::IndexOutOfRange`] if the range reaches past the last sample.
    pub fn slice(&self, range: Range<RowIndex>) -> Result<SampleCollection, StellarLogError> {
        let len = self.len();
        match self.samples.get(range.clone()) {
            Some(samples) => Ok(SampleCollection::new(samples.to_vec())),
            None => Err(StellarLogError::IndexOutOfRange {
                index: range.end.saturating_sub(1).max(range.start),
                len,
            }),
        }
    }

    /// `key` looked up in every sample, in collection order.
    ///
    /// Return
    /// ----------
    /// * One [`Quantity`] per sample: a series for table keys, a scalar for metadata.
    /// * The first lookup error, e.g. [`StellarLogError::KeyNotFound`] if a sample lacks
    ///   the metadata entry.
    pub fn get(&self, key: &str) -> Result<Vec<Quantity>, StellarLogError> {
        self.samples.iter().map(|s| s.get(key)).collect()
    }

    /// `key` looked up in every sample and joined end to end into one column.
    pub fn get_concat(&self, key: &str) -> Result<Column, StellarLogError> {
        let columns = self
            .get(key)?
            .into_iter()
            .map(|q| match q {
                Quantity::Series(c) => c,
                Quantity::Scalar(v) => Column::from_values(vec![v]),
            })
            .collect::<Vec<_>>();
        Ok(Column::concat(columns))
    }

    /// Write every table row of every sample to a CSV file.
    ///
    /// Columns: `sample, category, count, chi2term, freq, corr, obs, sigma, logE`.
    pub fn write_csv(&self, path: &Utf8Path) -> Result<(), StellarLogError> {
        let mut writer = csv::Writer::from_path(path)?;
        let mut n_rows = 0;
        for (sample, record) in self.samples.iter().enumerate() {
            for (category, row) in record.rows() {
                writer.serialize(CsvRow {
                    sample,
                    category,
                    count: row.count,
                    chi2term: row.chi2term,
                    freq: row.freq,
                    corr: row.corr,
                    obs: row.obs,
                    sigma: row.sigma,
                    log_e: row.log_e,
                })?;
                n_rows += 1;
            }
        }
        writer.flush()?;
        debug!("wrote {n_rows} rows of {} samples to {path}", self.len());
        Ok(())
    }
}

impl Index<RowIndex> for SampleCollection {
    type Output = SampleRecord;

    fn index(&self, index: RowIndex) -> &SampleRecord {
        &self.samples[index]
    }
}

impl FromIterator<SampleRecord> for SampleCollection {
    fn from_iter<I: IntoIterator<Item = SampleRecord>>(iter: I) -> Self {
        SampleCollection::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a SampleCollection {
    type Item = &'a SampleRecord;
    type IntoIter = std::slice::Iter<'a, SampleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

/// Read and parse several sample files, in the given order.
///
/// Return
/// ----------
/// * The collection, or the first read / parse error.
pub fn load_astero_samples<P>(paths: &[P]) -> Result<SampleCollection, StellarLogError>
where
    P: AsRef<Utf8Path>,
{
    let samples = paths
        .iter()
        .map(|p| load_astero_sample(p.as_ref()))
        .collect::<Result<SampleCollection, _>>()?;
    debug!("loaded {} astero samples", samples.len());
    Ok(samples)
}
