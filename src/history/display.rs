//! Text summary of an [`EvolutionLog`].
//!
//! ```text
//! EvolutionLog
//! Header:
//!             version_number = r24.08.1
//!                initial_mass = 1
//! Column names:
//!  model_number    star_age      log_dt
//! ```
//!
//! Header names are right-aligned on 26 characters. Column names are right-aligned on the
//! longest name plus one and packed into rows of at most 80 characters.
use std::fmt;

use super::EvolutionLog;

const HEADER_NAME_WIDTH: usize = 26;
const LINE_WIDTH: usize = 80;

impl fmt::Display for EvolutionLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "EvolutionLog")?;
        writeln!(f, "Header:")?;
        let name_width = HEADER_NAME_WIDTH;
        for (name, value) in self.header().iter() {
            writeln!(f, "{name:>name_width$} = {value}")?;
        }

        writeln!(f, "Column names:")?;
        let names = self.body().names();
        let width = names.iter().map(|n| n.len()).max().unwrap_or(0) + 1;
        let per_line = (LINE_WIDTH / width).max(1);
        for (i, name) in names.iter().enumerate() {
            write!(f, "{name:>width$}")?;
            if (i + 1) % per_line == 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod display_test {
    use crate::history::{Body, EvolutionLog, Header};
    use crate::quantity::{Column, Value};

    #[test]
    fn test_display_layout() {
        let log = EvolutionLog::new(
            Header::new(vec![("initial_mass".into(), Value::Float(1.5))]),
            Body::new(vec![
                ("model_number".into(), Column::Int(vec![1])),
                ("log_dt".into(), Column::Float(vec![-5.0])),
            ])
            .unwrap(),
        );
        let expected = "EvolutionLog\n\
                        Header:\n              initial_mass = 1.5\n\
                        Column names:\n model_number       log_dt";
        assert_eq!(log.to_string(), expected);
    }
}
