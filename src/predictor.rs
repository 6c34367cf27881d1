//! Lookup engine, trainer, replacement policy, aging FSM, and lifecycle —
//! the `TagePredictor` itself (spec §4, §4.6).

use crate::constants::{AGING_INTERVAL, ALLOC_TABLE, BASE_TABLE, HISTORY_LENGTHS, NUM_TABLES};
use crate::entry::Entry;
use crate::hash::{idx, tag};
use crate::history::{HistoryBank, clamp_ctx};
use crate::stats::{Stats, TableStats};
use crate::table::Table;

/// A tagged-geometric-history-length conditional branch predictor.
///
/// Construct with [`TagePredictor::new`] (aging enabled) or
/// [`TagePredictor::with_aging`] to control whether `update` automatically
/// triggers [`TagePredictor::age_all`] at the configured interval.
pub struct TagePredictor {
    tables: [Table; NUM_TABLES],
    history: HistoryBank,
    branch_counter: u64,
    aging_enabled: bool,
}

impl TagePredictor {
    /// Constructs a fresh predictor with aging enabled (spec §4.6,
    /// "Construct").
    pub fn new() -> Self {
        Self::with_aging(true)
    }

    /// Constructs a fresh predictor, explicitly choosing whether `update`
    /// automatically triggers periodic aging. Used by the spec's own
    /// allocation seed test, which isolates allocation behavior from aging.
    pub fn with_aging(aging_enabled: bool) -> Self {
        let tables = std::array::from_fn(|i| {
            if i == BASE_TABLE {
                Table::new_base()
            } else {
                Table::new_history(HISTORY_LENGTHS[i])
            }
        });

        Self {
            tables,
            history: HistoryBank::new(),
            branch_counter: 0,
            aging_enabled,
        }
    }

    /// Predicts whether the branch at `pc` will be taken under context
    /// `ctx`, returning `(taken, confidence)` where `confidence` is `0`
    /// (base fallback), `1` (mid-range history-table match), or `2`
    /// (saturated history-table match). Read-only: predicting never
    /// mutates predictor state (spec §4.2).
    pub fn predict(&self, pc: u64, ctx: u8) -> (bool, u8) {
        let ctx = clamp_ctx(ctx);
        let history = self.history.get(ctx);
        let t = tag(pc);

        if let Some((_winner, entry)) = self.find_hit(pc, history, t, ctx as u8) {
            let confidence = if matches!(entry.counter, 0 | 1 | 6 | 7) {
                2
            } else {
                1
            };
            return (entry.predicts_taken(), confidence);
        }

        let base_idx = idx(pc, 0, 0);
        let base_entry = self.tables[BASE_TABLE].get(base_idx);
        (base_entry.predicts_taken(), 0)
    }

    /// Trains the predictor with the actual outcome of the branch at `pc`
    /// under context `ctx`, then advances that context's history register
    /// and ticks the aging FSM (spec §4.3).
    pub fn update(&mut self, pc: u64, ctx: u8, taken: bool) {
        let ctx = clamp_ctx(ctx);
        let history = self.history.get(ctx);
        let t = tag(pc);

        // Step 1: train the base table unconditionally.
        let base_idx = idx(pc, 0, 0);
        self.tables[BASE_TABLE].get_mut(base_idx).train(taken);

        // Step 2: locate the prior winner among history tables.
        let matched = self.find_hit_index(pc, history, t, ctx as u8);

        // Step 3: update the match, or allocate a new entry in table 1.
        match matched {
            Some((i, k)) => {
                let entry = self.tables[i].get_mut(k);
                entry.train(taken);
                entry.useful = true;
                entry.age = 0;
            }
            None => {
                let k1 = idx(pc, history, HISTORY_LENGTHS[ALLOC_TABLE]);
                let victim = self.tables[ALLOC_TABLE].find_victim(k1);
                let was_free = !self.tables[ALLOC_TABLE].is_valid(victim);
                tracing::trace!(
                    pc,
                    ctx,
                    tag = t,
                    victim,
                    was_free,
                    "allocating history-table entry"
                );
                self.tables[ALLOC_TABLE].allocate(victim, Entry::allocate(t, ctx as u8, taken));
            }
        }

        // Step 4: shift history for this context only.
        self.history.shift_in(ctx, taken);

        // Step 5: tick aging.
        self.branch_counter = self.branch_counter.saturating_add(1);
        if self.aging_enabled && self.branch_counter >= AGING_INTERVAL {
            self.age_all();
            self.branch_counter = 0;
        }
    }

    /// Alias for [`TagePredictor::update`] (spec §4.7): pipeline flushing
    /// on misprediction is the caller's responsibility and lives outside
    /// this model.
    pub fn on_mispredict(&mut self, pc: u64, ctx: u8, actual_taken: bool) {
        self.update(pc, ctx, actual_taken);
    }

    /// Unconditionally saturating-increments `age` on every valid entry in
    /// tables 1..7 (spec §4.5). Table 0 is never aged. Unlike the
    /// automatic trigger inside `update`, this always runs, regardless of
    /// whether aging is enabled.
    pub fn age_all(&mut self) {
        let mut saturated = 0usize;
        let mut touched = 0usize;
        for table in &mut self.tables[ALLOC_TABLE..] {
            saturated += table.age_all();
            touched += table.valid_count();
        }
        tracing::debug!(touched, saturated, "aged all history tables");
    }

    /// Clears history tables and history registers; zeroes the branch
    /// counter. The base table is left untouched (spec §4.6, "Reset").
    pub fn reset(&mut self) {
        for table in &mut self.tables[ALLOC_TABLE..] {
            table.clear_validity();
        }
        self.history.reset();
        self.branch_counter = 0;
        tracing::info!("predictor reset: history tables and registers cleared");
    }

    /// Produces a read-only snapshot of predictor state (spec §4.6,
    /// "Stats"). Never mutates state.
    pub fn stats(&self) -> Stats {
        Stats {
            total_branches: self.branch_counter,
            tables: std::array::from_fn(|i| TableStats::from_table(&self.tables[i])),
        }
    }

    /// Scans tables 7 down to 1 for a tag+context match, returning the
    /// matching table index and slot index (the winner: the longest
    /// history with a hit, since the scan starts from the longest table
    /// and stops at the first match).
    fn find_hit_index(&self, pc: u64, history: u64, t: u16, ctx: u8) -> Option<(usize, u16)> {
        for i in (ALLOC_TABLE..NUM_TABLES).rev() {
            let k = idx(pc, history, HISTORY_LENGTHS[i]);
            if !self.tables[i].is_valid(k) {
                continue;
            }
            let entry = self.tables[i].get(k);
            if entry.tag == t && entry.context == ctx {
                return Some((i, k));
            }
        }
        None
    }

    /// Same search as [`TagePredictor::find_hit_index`], returning the
    /// winning table index and a copy of its entry for the read-only
    /// prediction path.
    fn find_hit(&self, pc: u64, history: u64, t: u16, ctx: u8) -> Option<(usize, Entry)> {
        self.find_hit_index(pc, history, t, ctx)
            .map(|(i, k)| (i, self.tables[i].get(k)))
    }
}

impl Default for TagePredictor {
    fn default() -> Self {
        Self::new()
    }
}

/// `TagePredictor` intentionally does not derive `Debug`: its tables are
/// large fixed-size arrays whose full dump is rarely useful and would
/// dominate any derived output. Use `stats()` for an inspectable summary.
impl std::fmt::Debug for TagePredictor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagePredictor")
            .field("branch_counter", &self.branch_counter)
            .field("aging_enabled", &self.aging_enabled)
            .finish_non_exhaustive()
    }
}
