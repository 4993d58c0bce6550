//! # In-place inlist updates
//!
//! [`update_inlist`] rewrites the values of named parameters in a MESA inlist, keeping every
//! other line byte for byte.
//!
//! ## Matching
//! -----------------
//! Comments (from the first `!`) are ignored while searching. A line matches a parameter if
//! one of its whitespace-separated tokens equals the parameter name, so `initial_mass = 1`
//! matches but `initial_mass=1` does not. When several lines match, only the **first** is
//! updated, even if it sits in a different namelist.
//!
//! ## Rewriting
//! -----------------
//! The matched line is cut after its first `=` and completed with a space, the formatted
//! value and a newline; a trailing comment on that line is dropped.
//!
//! The file is read once and written once. Nothing is written if any parameter is missing.
//! The write itself is not atomic.
use camino::Utf8Path;
use log::{debug, warn};

use super::value_format::{format_value, InlistValue};
use crate::constants::COMMENT_MARKER;
use crate::stellarlog_errors::StellarLogError;

/// Index of every line whose comment-free part has `name` as a token.
fn matching_lines(search_lines: &[&str], name: &str) -> Vec<usize> {
    search_lines
        .iter()
        .enumerate()
        .filter(|(_, line)| line.split_whitespace().any(|token| token == name))
        .map(|(i, _)| i)
        .collect()
}

/// `line` up to and including its first `=`, then the formatted value.
fn replace_value(line: &str, name: &str, value: &InlistValue) -> Result<String, StellarLogError> {
    let equals = line
        .find('=')
        .ok_or_else(|| StellarLogError::ParameterNotFound(name.to_string()))?;
    Ok(format!("{} {}\n", &line[..=equals], format_value(value)))
}

/// Apply `assignments` to the text of an inlist.
///
/// Arguments
/// -----------------
/// * `text` – Whole inlist content.
/// * `assignments` – `(name, value)` pairs, applied in order; a later pair wins if two
///   names resolve to the same line.
///
/// Return
/// ----------
/// * The updated text.
/// * [`StellarLogError::ParameterNotFound`] if a name matches no line, or matches a line
///   without `=`.
pub fn apply_assignments<I, K>(text: &str, assignments: I) -> Result<String, StellarLogError>
where
    I: IntoIterator<Item = (K, InlistValue)>,
    K: AsRef<str>,
{
    let mut lines: Vec<String> = text.split_inclusive('\n').map(str::to_string).collect();
    let search_lines: Vec<&str> = text
        .split_inclusive('\n')
        .map(|line| line.split(COMMENT_MARKER).next().unwrap_or(""))
        .collect();

    for (name, value) in assignments {
        let name = name.as_ref();
        let matches = matching_lines(&search_lines, name);
        let Some(&index) = matches.first() else {
            return Err(StellarLogError::ParameterNotFound(name.to_string()));
        };
        if matches.len() > 1 {
            warn!(
                "{name} appears on {} lines, only line {} is updated",
                matches.len(),
                index + 1
            );
        }
        lines[index] = replace_value(&lines[index], name, &value)?;
        debug!("{name} = {value} (line {})", index + 1);
    }

    Ok(lines.concat())
}

/// Update parameter values in the inlist at `path`.
///
/// ```rust,no_run
/// use camino::Utf8Path;
/// use stellarlog::inlist::{update_inlist, InlistValue};
///
/// # fn demo() -> Result<(), stellarlog::stellarlog_errors::StellarLogError> {
/// update_inlist(
///     Utf8Path::new("inlist_project"),
///     [
///         ("initial_mass", InlistValue::Float(1.2)),
///         ("use_Ledoux_criterion", InlistValue::Boolean(true)),
///     ],
/// )?;
/// # Ok(()) }
/// ```
pub fn update_inlist<I, K>(path: &Utf8Path, assignments: I) -> Result<(), StellarLogError>
where
    I: IntoIterator<Item = (K, InlistValue)>,
    K: AsRef<str>,
{
    let text = std::fs::read_to_string(path)?;
    let updated = apply_assignments(&text, assignments)?;
    std::fs::write(path, updated)?;
    Ok(())
}

#[cfg(test)]
mod editor_test {
    use super::*;

    const INLIST: &str = "\
&controls
  ! initial_mass = 3.0
  initial_mass = 0.5 ! comment
  initial_z = 0.02
  use_Ledoux_criterion = .false.
/ ! end of controls
";

    #[test]
    fn test_replace_and_drop_comment() {
        let out = apply_assignments(INLIST, [("initial_mass", InlistValue::Float(1.0))]).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[1], "  ! initial_mass = 3.0");
        assert_eq!(lines[2], "  initial_mass = 1.00000000000000000000e+00");
        assert_eq!(lines[5], "/ ! end of controls");
        assert_eq!(out.lines().count(), INLIST.lines().count());
    }

    #[test]
    fn test_several_types() {
        let out = apply_assignments(
            INLIST,
            vec![
                ("use_Ledoux_criterion".to_string(), true.into()),
                ("initial_z".to_string(), InlistValue::Text("2d-2".into())),
            ],
        )
        .unwrap();
        assert!(out.contains("  use_Ledoux_criterion = .true.\n"));
        assert!(out.contains("  initial_z = 2d-2\n"));
    }

    #[test]
    fn test_first_match_wins() {
        let text = "x = 1\nx = 2\n";
        let out = apply_assignments(text, [("x", InlistValue::Integer(5))]).unwrap();
        assert_eq!(out, "x = 5\nx = 2\n");
    }

    #[test]
    fn test_last_write_wins_on_same_line() {
        let text = "x = 1\n";
        let out = apply_assignments(
            text,
            [("x", InlistValue::Integer(5)), ("x", InlistValue::Integer(7))],
        )
        .unwrap();
        assert_eq!(out, "x = 7\n");
    }

    #[test]
    fn test_missing_parameter() {
        assert_eq!(
            apply_assignments(INLIST, [("initial_y", InlistValue::Float(0.28))]),
            Err(StellarLogError::ParameterNotFound("initial_y".into()))
        );
        // only in a comment
        assert_eq!(
            apply_assignments("! x = 1\n", [("x", InlistValue::Integer(1))]),
            Err(StellarLogError::ParameterNotFound("x".into()))
        );
    }

    #[test]
    fn test_last_line_without_newline() {
        let out = apply_assignments("a = 1\nb = 2", [("b", InlistValue::Integer(3))]).unwrap();
        assert_eq!(out, "a = 1\nb = 3\n");
    }
}
