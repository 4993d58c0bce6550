//! # Astero sample file grammar
//!
//! A sample file written by MESA's `astero` optimizers mixes three kinds of lines:
//!
//! ```text
//!   chi2          1.2345678901234567D+01      <- metadata: name tokens, then a real
//!   l=1                                       <- degree marker
//!   3  0.1  100.5  0.02  100.4  0.01  -5.0    <- 7 tokens: a frequency table row
//! ```
//!
//! - A line whose first token starts with `l=` switches the active degree to the trailing
//!   digit of that token.
//! - A line of exactly seven tokens is a table row for the active degree:
//!   `count chi2term freq corr obs sigma logE`.
//! - Any other non-blank line is metadata: the last token is the value, the preceding tokens
//!   joined by single spaces are the name.
//!
//! Reals may use Fortran `D`/`d` exponent markers. The active degree starts at 0 and is the
//! only state of the scan; it is threaded through a fold over the lines.
//!
//! ## Errors
//! -----------------
//! Any invalid line aborts the whole record with [`StellarLogError::MalformedSample`],
//! carrying the 1-based line number and a [`ParseSampleError`].
use std::collections::BTreeMap;

use camino::Utf8Path;
use log::{debug, trace};
use nom::{
    character::complete::i64 as integer, combinator::all_consuming, number::complete::double,
    Parser,
};
use thiserror::Error;

use super::sample_record::{SampleRecord, SampleRow, SampleTable};
use crate::constants::{Category, CATEGORY_MARKER, N_CATEGORIES, TABLE_ROW_TOKENS};
use crate::quantity::parse_real;
use crate::stellarlog_errors::StellarLogError;

/// Line-level parsing errors of a sample file.
///
/// Variants
/// -----------------
/// * `InvalidCount` – First token of a table row is not an integer.
/// * `InvalidReal` – One of the six real tokens of a table row is not a number.
/// * `InvalidCategory` – A degree marker does not end with a digit in `0..=3`.
/// * `InvalidMetadataValue` – Last token of a metadata line is not a number.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseSampleError {
    #[error("invalid count: {0}")]
    InvalidCount(String),
    #[error("invalid real value: {0}")]
    InvalidReal(String),
    #[error("invalid degree marker: {0}")]
    InvalidCategory(String),
    #[error("invalid metadata value: {0}")]
    InvalidMetadataValue(String),
}

/// One classified line of a sample file.
#[derive(Debug, Clone, PartialEq)]
enum SampleLine {
    Category(Category),
    Row(SampleRow),
    Metadata(String, f64),
}

/// Accumulator of the line fold.
struct ScanState {
    category: Category,
    tables: [SampleTable; N_CATEGORIES],
    metadata: BTreeMap<String, f64>,
}

fn normalize_exponent(token: &str) -> String {
    token.replace(['D', 'd'], "e")
}

fn parse_count(token: &str) -> Result<i64, ParseSampleError> {
    all_consuming(integer)
        .parse(token)
        .map(|(_, n)| n)
        .map_err(|_: nom::Err<nom::error::Error<&str>>| {
            ParseSampleError::InvalidCount(token.to_string())
        })
}

fn parse_row_real(token: &str) -> Result<f64, ParseSampleError> {
    let normalized = normalize_exponent(token);
    let result = all_consuming(double)
        .parse(normalized.as_str())
        .map(|(_, x)| x)
        .map_err(|_: nom::Err<nom::error::Error<&str>>| {
            ParseSampleError::InvalidReal(token.to_string())
        });
    result
}

fn parse_category(token: &str) -> Result<Category, ParseSampleError> {
    token
        .chars()
        .last()
        .and_then(|c| c.to_digit(10))
        .map(|d| d as Category)
        .filter(|&d| (d as usize) < N_CATEGORIES)
        .ok_or_else(|| ParseSampleError::InvalidCategory(token.to_string()))
}

fn parse_row(tokens: &[&str]) -> Result<SampleRow, ParseSampleError> {
    let count = parse_count(tokens[0])?;
    let reals = tokens[1..]
        .iter()
        .map(|t| parse_row_real(t))
        .collect::<Result<Vec<f64>, _>>()?;
    Ok(SampleRow {
        count,
        chi2term: reals[0],
        freq: reals[1],
        corr: reals[2],
        obs: reals[3],
        sigma: reals[4],
        log_e: reals[5],
    })
}

/// Classify a non-blank line by its tokens.
fn classify(tokens: &[&str]) -> Result<SampleLine, ParseSampleError> {
    let (last, name) = match tokens.split_last() {
        Some(split) => split,
        None => return Err(ParseSampleError::InvalidMetadataValue(String::new())),
    };

    if tokens[0].starts_with(CATEGORY_MARKER) {
        return parse_category(tokens[0]).map(SampleLine::Category);
    }
    if tokens.len() == TABLE_ROW_TOKENS {
        return parse_row(tokens).map(SampleLine::Row);
    }

    let value = parse_real(last)
        .ok_or_else(|| ParseSampleError::InvalidMetadataValue(last.to_string()))?;
    Ok(SampleLine::Metadata(name.join(" "), value))
}

/// Parse the text of a sample file into a [`SampleRecord`].
///
/// Arguments
/// -----------------
/// * `text` – Whole file content.
///
/// Return
/// ----------
/// * A record with four degree tables (possibly empty) and the metadata map.
/// * [`StellarLogError::MalformedSample`] on the first invalid line; no partial record.
pub fn parse_sample(text: &str) -> Result<SampleRecord, StellarLogError> {
    let init = ScanState {
        category: 0,
        tables: Default::default(),
        metadata: BTreeMap::new(),
    };

    let state = text
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.split_whitespace().collect::<Vec<_>>()))
        .filter(|(_, tokens)| !tokens.is_empty())
        .try_fold(init, |mut state, (line, tokens)| {
            let kind = classify(&tokens)
                .map_err(|source| StellarLogError::MalformedSample { line, source })?;
            trace!("sample line {line}: {kind:?}");
            match kind {
                SampleLine::Category(category) => state.category = category,
                SampleLine::Row(row) => state.tables[state.category as usize].push(row),
                SampleLine::Metadata(name, value) => {
                    state.metadata.insert(name, value);
                }
            }
            Ok::<_, StellarLogError>(state)
        })?;

    debug!(
        "parsed sample: rows per degree {:?}, {} metadata entries",
        state.tables.iter().map(Vec::len).collect::<Vec<_>>(),
        state.metadata.len()
    );
    Ok(SampleRecord::new(state.tables, state.metadata))
}

/// Read and parse one sample file.
pub fn load_astero_sample(path: &Utf8Path) -> Result<SampleRecord, StellarLogError> {
    let text = std::fs::read_to_string(path)?;
    parse_sample(&text)
}
