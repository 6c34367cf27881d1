//! Entry record.
//!
//! Packs one tagged prediction slot. Spec §3 describes this as a 24 logical
//! bit hardware word; there is no test that exercises a packed bitfield
//! layout, so it is represented as a plain struct with natural machine-width
//! fields (spec §9, re-architecture guidance).

use crate::constants::{MAX_AGE, MAX_COUNTER, NEUTRAL_COUNTER};

/// One slot in a table.
///
/// Tables 1..7 use every field; table 0 never reads or writes `tag`,
/// `context`, `age`, or `useful` (spec invariant 4).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Entry {
    /// Partial PC fingerprint, history-table collision detection only.
    pub tag: u16,
    /// Saturating confidence counter in `0..=7`; `>= 4` predicts taken.
    pub counter: u8,
    /// Hardware context id in `0..=7`, history-table only.
    pub context: u8,
    /// Set when this entry has supplied a training outcome.
    pub useful: bool,
    /// Last observed direction at this slot.
    pub taken: bool,
    /// Saturating LRU age in `0..=7`; higher is staler.
    pub age: u8,
}

impl Entry {
    /// A freshly constructed base-table entry: neutral counter, not-taken,
    /// untouched age/useful bits (spec §3 lifecycle, §9 ambiguity 1).
    pub fn base_default() -> Self {
        Self {
            tag: 0,
            counter: NEUTRAL_COUNTER,
            context: 0,
            useful: false,
            taken: false,
            age: 0,
        }
    }

    /// A freshly allocated history-table entry (spec §4.3 step 3, "no
    /// match" branch).
    pub fn allocate(tag: u16, context: u8, taken: bool) -> Self {
        Self {
            tag,
            counter: NEUTRAL_COUNTER,
            context,
            useful: false,
            taken,
            age: 0,
        }
    }

    /// Whether this entry currently predicts taken.
    pub fn predicts_taken(&self) -> bool {
        self.counter >= crate::constants::TAKEN_THRESHOLD
    }

    /// Saturating-increments or -decrements `counter` per the observed
    /// outcome, and records `taken` (spec §4.3 steps 1 and 3, "matched").
    pub fn train(&mut self, taken: bool) {
        self.counter = saturating_step(self.counter, taken, MAX_COUNTER);
        self.taken = taken;
    }

    /// Saturating-increments `age`, clamped at `MAX_AGE` (spec §4.5).
    pub fn age_one(&mut self) {
        if self.age < MAX_AGE {
            self.age += 1;
        }
    }
}

/// Saturating increment (on `true`) or decrement (on `false`) of a counter
/// bounded in `0..=max`.
fn saturating_step(counter: u8, increment: bool, max: u8) -> u8 {
    if increment {
        if counter < max { counter + 1 } else { counter }
    } else if counter > 0 {
        counter - 1
    } else {
        0
    }
}
