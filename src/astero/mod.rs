//! # Outputs of MESA's `astero` optimizers
//!
//! ```text
//!  sample_NNNN.data ──► sample_parser ──► SampleRecord ──┐
//!  sample_NNNN.data ──► sample_parser ──► SampleRecord ──┼──► SampleCollection
//!                                                        ┘
//!  *_results.data   ──► results_reader ──► OptimizerResults
//! ```
//!
//! - [`sample_parser`] – grammar of a single sample file.
//! - [`sample_record`] – one sample: degree tables and metadata.
//! - [`sample_collection`] – many samples queried together.
//! - [`results_reader`] – the summary table of a whole search.
pub mod results_reader;
pub mod sample_collection;
pub mod sample_parser;
pub mod sample_record;

pub use results_reader::{load_astero_results, OptimizerResults};
pub use sample_collection::{load_astero_samples, SampleCollection};
pub use sample_parser::{load_astero_sample, parse_sample};
pub use sample_record::{SampleRecord, SampleRow};
