use thiserror::Error;

use crate::astero::sample_parser::ParseSampleError;

#[derive(Error, Debug)]
pub enum StellarLogError {
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Parameter not found in inlist: {0}")]
    ParameterNotFound(String),

    #[error("Invalid parameter type: {0}")]
    InvalidParameterType(String),

    #[error("Malformed sample at line {line}: {source}")]
    MalformedSample {
        line: usize,
        source: ParseSampleError,
    },

    #[error("Malformed evolutionary log at line {line}: {reason}")]
    MalformedLog { line: usize, reason: String },

    #[error("Column {name} has {len} rows, expected {expected}")]
    RaggedColumns {
        name: String,
        len: usize,
        expected: usize,
    },

    #[error("Sequence key column must hold integers: {0}")]
    InvalidSequenceKey(String),

    #[error("Malformed optimizer results: {0}")]
    MalformedResults(String),

    #[error("Quantity is not numeric: {0}")]
    NonNumericQuantity(String),

    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid reader parameter: {0}")]
    InvalidReaderParameter(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
}

impl PartialEq for StellarLogError {
    fn eq(&self, other: &Self) -> bool {
        use StellarLogError::*;
        match (self, other) {
            (KeyNotFound(a), KeyNotFound(b)) => a == b,
            (ParameterNotFound(a), ParameterNotFound(b)) => a == b,
            (InvalidParameterType(a), InvalidParameterType(b)) => a == b,
            (
                MalformedSample {
                    line: la,
                    source: sa,
                },
                MalformedSample {
                    line: lb,
                    source: sb,
                },
            ) => la == lb && sa == sb,
            (
                MalformedLog {
                    line: la,
                    reason: ra,
                },
                MalformedLog {
                    line: lb,
                    reason: rb,
                },
            ) => la == lb && ra == rb,
            (
                RaggedColumns {
                    name: na,
                    len: la,
                    expected: ea,
                },
                RaggedColumns {
                    name: nb,
                    len: lb,
                    expected: eb,
                },
            ) => na == nb && la == lb && ea == eb,
            (InvalidSequenceKey(a), InvalidSequenceKey(b)) => a == b,
            (MalformedResults(a), MalformedResults(b)) => a == b,
            (NonNumericQuantity(a), NonNumericQuantity(b)) => a == b,
            (
                IndexOutOfRange {
                    index: ia,
                    len: la,
                },
                IndexOutOfRange {
                    index: ib,
                    len: lb,
                },
            ) => ia == ib && la == lb,
            (InvalidReaderParameter(a), InvalidReaderParameter(b)) => a == b,

            // foreign payloads are not comparable: same variant is enough
            (IoError(_), IoError(_)) => true,
            (CsvError(_), CsvError(_)) => true,

            _ => false,
        }
    }
}
