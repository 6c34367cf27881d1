//! Debug snapshot.
//!
//! `stats()` produces a read-only read of a moment in time (spec §4.6). It
//! must not mutate predictor state; every field here is computed from an
//! immutable borrow of the tables.

use serde::Serialize;

/// Per-table summary. Averages are computed only over valid entries; an
/// empty table reports zero for both averages rather than `NaN`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct TableStats {
    /// Number of currently valid (allocated) slots.
    pub valid_count: usize,
    /// Mean `age` across valid slots, or `0.0` if none are valid.
    pub average_age: f64,
    /// Number of valid slots whose `useful` bit is set.
    pub useful_count: usize,
    /// Mean `counter` across valid slots, or `0.0` if none are valid.
    pub average_counter: f64,
}

/// Full predictor snapshot returned by `TagePredictor::stats`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Stats {
    /// Total `update` invocations since construction or the last `reset`
    /// (spec §3, "Branch counter"); saturates rather than wraps.
    pub total_branches: u64,
    /// Per-table summary, indexed `0..8` (index 0 is the base table).
    pub tables: [TableStats; crate::constants::NUM_TABLES],
}

impl TableStats {
    pub(crate) fn from_table(table: &crate::table::Table) -> Self {
        let mut valid_count = 0usize;
        let mut useful_count = 0usize;
        let mut age_sum = 0u64;
        let mut counter_sum = 0u64;

        for (_, entry) in table.valid_entries() {
            valid_count += 1;
            age_sum += u64::from(entry.age);
            counter_sum += u64::from(entry.counter);
            if entry.useful {
                useful_count += 1;
            }
        }

        let (average_age, average_counter) = if valid_count == 0 {
            (0.0, 0.0)
        } else {
            (
                age_sum as f64 / valid_count as f64,
                counter_sum as f64 / valid_count as f64,
            )
        };

        Self {
            valid_count,
            average_age,
            useful_count,
            average_counter,
        }
    }
}
