//! # MESA inlists
//!
//! Inlists are Fortran namelist files of `name = value` lines with `!` comments.
//!
//! - [`value_format`] – how a value is written after `=`.
//! - [`editor`] – locating a parameter and rewriting its line.
pub mod editor;
pub mod value_format;

pub use editor::{apply_assignments, update_inlist};
pub use value_format::{format_value, InlistValue};
