//! # MESA history / profile text decoder
//!
//! Turns the text of a `history.data` or `profileN.data` file into a [`Header`] and a
//! [`Body`]. The line layout is described by [`HistoryLayout`].
//!
//! Header values may be quoted strings (`"r24.08.1"`); quoted tokens are kept whole even if
//! they contain spaces. Body cells are inferred as integers, reals (Fortran `D` exponents
//! accepted) or text, and every column is typed independently.
//!
//! Other decoders (binary outputs, GYRE files, ...) plug in through [`LogDecoder`].
use log::debug;
use nom::{
    branch::alt,
    bytes::complete::{take_till1, take_until},
    character::complete::{char, multispace0, multispace1},
    combinator::all_consuming,
    multi::separated_list0,
    sequence::delimited,
    IResult, Parser,
};

use super::{layout::HistoryLayout, Body, Header};
use crate::quantity::{Column, Value};
use crate::stellarlog_errors::StellarLogError;

/// Decoder from raw file text to a (header, body) pair.
pub trait LogDecoder {
    fn decode(&self, text: &str) -> Result<(Header, Body), StellarLogError>;
}

/// Decoder for the standard MESA text layout.
#[derive(Debug, Clone, Default)]
pub struct MesaTextDecoder {
    pub layout: HistoryLayout,
}

impl MesaTextDecoder {
    pub fn new(layout: HistoryLayout) -> Self {
        MesaTextDecoder { layout }
    }
}

fn quoted(input: &str) -> IResult<&str, &str> {
    delimited(char('"'), take_until("\""), char('"')).parse(input)
}

fn bare(input: &str) -> IResult<&str, &str> {
    take_till1(|c: char| c.is_whitespace()).parse(input)
}

/// Split a line on whitespace, keeping double-quoted tokens whole.
fn tokens(input: &str) -> IResult<&str, Vec<&str>> {
    all_consuming(delimited(
        multispace0,
        separated_list0(multispace1, alt((quoted, bare))),
        multispace0,
    ))
    .parse(input)
}

fn line_tokens<'a>(
    lines: &[&'a str],
    index: usize,
    what: &str,
) -> Result<Vec<&'a str>, StellarLogError> {
    let line = lines.get(index).ok_or_else(|| StellarLogError::MalformedLog {
        line: index + 1,
        reason: format!("missing {what} line"),
    })?;
    tokens(line)
        .map(|(_, t)| t)
        .map_err(|_| StellarLogError::MalformedLog {
            line: index + 1,
            reason: format!("cannot split {what} line"),
        })
}

impl LogDecoder for MesaTextDecoder {
    fn decode(&self, text: &str) -> Result<(Header, Body), StellarLogError> {
        let layout = &self.layout;
        let lines: Vec<&str> = text.lines().collect();

        let header_names = line_tokens(&lines, layout.header_names_line, "header names")?;
        let header_values = line_tokens(&lines, layout.header_values_line, "header values")?;
        if header_names.len() != header_values.len() {
            return Err(StellarLogError::MalformedLog {
                line: layout.header_values_line + 1,
                reason: format!(
                    "{} header names but {} values",
                    header_names.len(),
                    header_values.len()
                ),
            });
        }
        let header = Header::new(
            header_names
                .iter()
                .zip(&header_values)
                .map(|(name, value)| (name.to_string(), Value::infer(value)))
                .collect(),
        );

        let names = line_tokens(&lines, layout.column_names_line, "column names")?;
        let mut cells: Vec<Vec<Value>> = vec![Vec::new(); names.len()];

        for (offset, line) in lines
            .iter()
            .enumerate()
            .skip(layout.first_data_line)
            .filter(|(_, l)| !l.trim().is_empty())
        {
            let row: Vec<&str> = line.split_whitespace().collect();
            if row.len() != names.len() {
                return Err(StellarLogError::MalformedLog {
                    line: offset + 1,
                    reason: format!("{} values for {} columns", row.len(), names.len()),
                });
            }
            for (column, token) in cells.iter_mut().zip(row) {
                column.push(Value::infer(token));
            }
        }

        let body = Body::new(
            names
                .iter()
                .map(|n| n.to_string())
                .zip(cells.into_iter().map(Column::from_values))
                .collect(),
        )?;

        debug!(
            "decoded MESA log: {} header entries, {} columns, {} rows",
            header.len(),
            body.names().len(),
            body.len()
        );
        Ok((header, body))
    }
}
