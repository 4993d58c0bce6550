pub mod astero;
pub mod constants;
pub mod history;
pub mod inlist;
pub mod key_resolver;
pub mod quantity;
pub mod stellarlog_errors;

pub use astero::{
    load_astero_results, load_astero_sample, load_astero_samples, OptimizerResults,
    SampleCollection, SampleRecord,
};
pub use history::{
    load_history, load_history_pruned, load_profile, EvolutionLog, RowSelection,
};
pub use inlist::{update_inlist, InlistValue};
pub use quantity::{Column, Quantity, Value};
pub use stellarlog_errors::StellarLogError;
