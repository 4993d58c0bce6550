//! # Restoring a monotonic history after restarts
//!
//! When MESA backs up, retries or is restarted from a photo, the history keeps the rows of
//! the abandoned attempt and appends the new ones, so `model_number` repeats or goes
//! backwards. Pruning keeps, for every model number, the row written **last**, and drops
//! rows beyond the model number the run finally ended on.
//!
//! ## Passes
//! -----------------
//! 1. **Truncate** – drop rows whose key exceeds the key of the last row.
//! 2. **Reverse scan** – walking from the end, keep a row the first time its key is seen.
//! 3. **Re-reverse** – put the kept rows back in file order.
//! 4. **Guard** – drop any kept row whose key does not exceed the previous kept key.
//!
//! On restart-shaped histories (segments that each restart below the previous end) the
//! guard never fires. It only matters for arbitrary orderings, where it keeps the output
//! strictly increasing without reordering rows.
//!
//! Pruning never fails and is idempotent.
use std::collections::HashSet;

use log::debug;

use crate::constants::RowIndex;

/// Indices of the rows kept by pruning a sequence of keys, in increasing order.
///
/// Arguments
/// -----------------
/// * `keys` – Sequence key of every row, in file order.
///
/// Return
/// ----------
/// * Row indices whose keys are strictly increasing; empty for an empty input.
pub fn prune_indices(keys: &[i64]) -> Vec<RowIndex> {
    let Some(&last) = keys.last() else {
        return Vec::new();
    };

    let truncated: Vec<RowIndex> = (0..keys.len()).filter(|&i| keys[i] <= last).collect();

    let mut seen = HashSet::with_capacity(truncated.len());
    let mut kept_reversed = Vec::with_capacity(truncated.len());
    for &i in truncated.iter().rev() {
        if seen.insert(keys[i]) {
            kept_reversed.push(i);
        }
    }

    let mut kept = kept_reversed;
    kept.reverse();

    let n_dedup = kept.len();
    let mut previous: Option<i64> = None;
    kept.retain(|&i| match previous {
        Some(p) if keys[i] <= p => false,
        _ => {
            previous = Some(keys[i]);
            true
        }
    });
    if kept.len() != n_dedup {
        debug!(
            "pruning guard dropped {} out-of-order rows",
            n_dedup - kept.len()
        );
    }

    debug!(
        "pruned history from {} to {} rows ({} beyond last model)",
        keys.len(),
        kept.len(),
        keys.len() - truncated.len()
    );
    kept
}
