//! Line layout of a MESA history/profile text file.
//!
//! ```text
//! line 0   column numbers of the header
//! line 1   header names
//! line 2   header values
//! line 3   (blank)
//! line 4   column numbers of the body
//! line 5   body column names
//! line 6.. body rows
//! ```
//!
//! [`HistoryLayout::default`] matches the layout above; use [`HistoryLayout::builder`] for
//! files written by patched `run_star_extras` or older releases.
use crate::constants::{
    COLUMN_NAMES_LINE, FIRST_DATA_LINE, HEADER_NAMES_LINE, HEADER_VALUES_LINE, SEQUENCE_KEY,
};
use crate::stellarlog_errors::StellarLogError;

/// 0-based line numbers of each part of the file, and the pruning key.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryLayout {
    pub header_names_line: usize,
    pub header_values_line: usize,
    pub column_names_line: usize,
    pub first_data_line: usize,
    /// Column used by [`crate::history::EvolutionLog::pruned`].
    pub sequence_key: String,
}

impl HistoryLayout {
    pub fn builder() -> HistoryLayoutBuilder {
        HistoryLayoutBuilder::new()
    }
}

impl Default for HistoryLayout {
    fn default() -> Self {
        HistoryLayout {
            header_names_line: HEADER_NAMES_LINE,
            header_values_line: HEADER_VALUES_LINE,
            column_names_line: COLUMN_NAMES_LINE,
            first_data_line: FIRST_DATA_LINE,
            sequence_key: SEQUENCE_KEY.to_string(),
        }
    }
}

/// Builder for [`HistoryLayout`], validated by [`HistoryLayoutBuilder::build`].
#[derive(Debug, Clone)]
pub struct HistoryLayoutBuilder {
    layout: HistoryLayout,
}

impl Default for HistoryLayoutBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryLayoutBuilder {
    /// Create a new builder initialized with the standard MESA layout.
    pub fn new() -> Self {
        Self {
            layout: HistoryLayout::default(),
        }
    }

    pub fn header_names_line(mut self, v: usize) -> Self {
        self.layout.header_names_line = v;
        self
    }
    pub fn header_values_line(mut self, v: usize) -> Self {
        self.layout.header_values_line = v;
        self
    }
    pub fn column_names_line(mut self, v: usize) -> Self {
        self.layout.column_names_line = v;
        self
    }
    pub fn first_data_line(mut self, v: usize) -> Self {
        self.layout.first_data_line = v;
        self
    }
    pub fn sequence_key(mut self, v: impl Into<String>) -> Self {
        self.layout.sequence_key = v.into();
        self
    }

    /// Validate and return the layout.
    ///
    /// Return
    /// ----------
    /// * [`StellarLogError::InvalidReaderParameter`] if header names and values share a line,
    ///   if body rows do not start after the column names, or if the sequence key is empty.
    pub fn build(self) -> Result<HistoryLayout, StellarLogError> {
        let l = &self.layout;

        if l.header_names_line == l.header_values_line {
            return Err(StellarLogError::InvalidReaderParameter(
                "header names and values must be on distinct lines".into(),
            ));
        }
        if l.first_data_line <= l.column_names_line {
            return Err(StellarLogError::InvalidReaderParameter(
                "first_data_line must come after column_names_line".into(),
            ));
        }
        if [l.header_names_line, l.header_values_line].contains(&l.column_names_line) {
            return Err(StellarLogError::InvalidReaderParameter(
                "column names cannot share a line with the header".into(),
            ));
        }
        if l.sequence_key.trim().is_empty() {
            return Err(StellarLogError::InvalidReaderParameter(
                "sequence_key must not be empty".into(),
            ));
        }

        Ok(self.layout)
    }
}
