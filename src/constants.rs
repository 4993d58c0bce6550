//! # Constants and type definitions for stellarlog
//!
//! This module centralizes the **fixed names**, **file layout defaults** and **common type
//! definitions** shared by the history, astero and inlist modules.
//!
//! ## Overview
//!
//! - Name of the restart-prone sequence column used to prune histories
//! - Column names of the per-degree frequency tables of an astero sample
//! - Default line layout of a MESA history/profile text file
//! - Core type aliases used across the crate

// -------------------------------------------------------------------------------------------------
// Evolutionary logs
// -------------------------------------------------------------------------------------------------

/// Column identifying a simulation step in a history; may repeat or decrease after a restart.
pub const SEQUENCE_KEY: &str = "model_number";

/// Default 0-based line of the header names in a MESA history/profile.
pub const HEADER_NAMES_LINE: usize = 1;

/// Default 0-based line of the header values.
pub const HEADER_VALUES_LINE: usize = 2;

/// Default 0-based line of the body column names.
pub const COLUMN_NAMES_LINE: usize = 5;

/// Default 0-based line of the first body row.
pub const FIRST_DATA_LINE: usize = 6;

// -------------------------------------------------------------------------------------------------
// Astero samples
// -------------------------------------------------------------------------------------------------

/// Number of multipole degrees tabulated in a sample file (l = 0, 1, 2, 3).
pub const N_CATEGORIES: usize = 4;

/// Key returning the degree of every table row.
pub const CATEGORY_KEY: &str = "category";

/// Table columns of a sample file, in file order.
pub const TABLE_COLUMNS: [&str; 7] = ["count", "chi2term", "freq", "corr", "obs", "sigma", "logE"];

/// Token count of a table row in a sample file.
pub const TABLE_ROW_TOKENS: usize = TABLE_COLUMNS.len();

/// Marker opening a degree section in a sample file (`l= 2`).
pub const CATEGORY_MARKER: &str = "l=";

/// Name given to the trailing nameless column of simplex results files.
pub const STEP_TYPE_COLUMN: &str = "step_type";

/// Number of trailing summary lines closing an optimizer results file.
pub const RESULTS_FOOTER_LINES: usize = 4;

// -------------------------------------------------------------------------------------------------
// Inlists
// -------------------------------------------------------------------------------------------------

/// Start of a Fortran namelist comment.
pub const COMMENT_MARKER: char = '!';

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Multipole degree of a frequency table (0 to 3).
pub type Category = u8;

/// Position of a row inside a body or a collection.
pub type RowIndex = usize;
