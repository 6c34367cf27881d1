//! Table: a fixed-size array of entries plus a validity bitmap and a wired
//! history length (spec §3, "Tables").

use crate::constants::{LRU_SEARCH_WIDTH, TABLE_SIZE};
use crate::entry::Entry;

/// One of the eight tables. Table 0 is the base table (`history_len == 0`,
/// every slot permanently valid); tables 1..7 are history tables.
#[derive(Clone, Debug)]
pub struct Table {
    entries: Vec<Entry>,
    /// `valid[k]` is the logical validity bit for slot `k`. Represented as
    /// a plain per-slot flag rather than a packed word array: spec §9
    /// explicitly does not require bit-packing unless a test exercises the
    /// layout, and none does.
    valid: Vec<bool>,
    history_len: u32,
}

impl Table {
    /// Constructs the base table: fully valid, every entry at its default
    /// lifecycle value.
    pub fn new_base() -> Self {
        Self {
            entries: vec![Entry::base_default(); TABLE_SIZE],
            valid: vec![true; TABLE_SIZE],
            history_len: 0,
        }
    }

    /// Constructs an empty history table with the given wired history
    /// length.
    pub fn new_history(history_len: u32) -> Self {
        Self {
            entries: vec![Entry::default(); TABLE_SIZE],
            valid: vec![false; TABLE_SIZE],
            history_len,
        }
    }

    /// The wired history length of this table (0 for the base table).
    pub fn history_len(&self) -> u32 {
        self.history_len
    }

    /// Whether slot `k` holds an allocated (or, for the base table,
    /// permanently resident) entry.
    pub fn is_valid(&self, k: u16) -> bool {
        self.valid[k as usize]
    }

    /// Reads the entry at slot `k`, regardless of validity.
    pub fn get(&self, k: u16) -> Entry {
        self.entries[k as usize]
    }

    /// Mutably borrows the entry at slot `k`.
    pub fn get_mut(&mut self, k: u16) -> &mut Entry {
        &mut self.entries[k as usize]
    }

    /// Overwrites slot `k` with `entry` and marks it valid. History tables
    /// only — the base table's validity never changes after construction.
    pub fn allocate(&mut self, k: u16, entry: Entry) {
        self.entries[k as usize] = entry;
        self.valid[k as usize] = true;
    }

    /// Saturating-increments `age` on every valid slot. A no-op on the
    /// base table in practice, since callers never invoke this on table 0
    /// (spec §4.5: "Table 0 is never aged").
    pub fn age_all(&mut self) -> usize {
        let mut already_saturated = 0;
        for (k, entry) in self.entries.iter_mut().enumerate() {
            if self.valid[k] {
                if entry.age == crate::constants::MAX_AGE {
                    already_saturated += 1;
                }
                entry.age_one();
            }
        }
        already_saturated
    }

    /// Clears every validity bit. History tables only — callers must never
    /// call this on the base table (spec §4.6, "Reset").
    pub fn clear_validity(&mut self) {
        self.valid.fill(false);
    }

    /// Number of currently valid slots.
    pub fn valid_count(&self) -> usize {
        self.valid.iter().filter(|&&v| v).count()
    }

    /// Iterates `(index, entry)` over every currently valid slot.
    pub fn valid_entries(&self) -> impl Iterator<Item = (u16, &Entry)> {
        self.entries
            .iter()
            .enumerate()
            .filter(move |(k, _)| self.valid[*k])
            .map(|(k, e)| (k as u16, e))
    }

    /// Local 4-way replacement search starting at preferred index `k`
    /// (spec §4.4). Examines candidates at `(k + offset) mod N` for
    /// `offset in 0..LRU_SEARCH_WIDTH` and returns the slot to allocate
    /// into: the first free candidate in ascending offset order, or — if
    /// all four are occupied — the one with the largest `age`, ties
    /// broken by the smallest offset.
    pub fn find_victim(&self, k: u16) -> u16 {
        let n = self.entries.len() as u16;
        let mut best_occupied: Option<(u16, u8)> = None;

        for offset in 0..LRU_SEARCH_WIDTH as u16 {
            let candidate = (k + offset) % n;
            if !self.valid[candidate as usize] {
                return candidate;
            }
            let age = self.entries[candidate as usize].age;
            if best_occupied.is_none_or(|(_, best_age)| age > best_age) {
                best_occupied = Some((candidate, age));
            }
        }

        // All four candidates were occupied; `best_occupied` is always set
        // in that case because LRU_SEARCH_WIDTH > 0.
        best_occupied
            .map(|(candidate, _)| candidate)
            .unwrap_or(k)
    }
}
