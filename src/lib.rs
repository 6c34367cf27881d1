//! Software reference model of a TAGE-family conditional branch predictor.
//!
//! This crate implements a cycle-accurate model of a tagged
//! geometric-history-length (TAGE) predictor: a base bimodal table plus
//! seven tagged history tables of increasing history length, a
//! longest-match-wins lookup (`predict`), a trainer with local 4-way LRU
//! allocation (`update`), and a periodic aging FSM (`age_all`). The model is
//! deterministic and holds no fallible operations — every method returns
//! plain values, never `Result`.
//!
//! The entry point is [`TagePredictor`]; [`Stats`] and [`TableStats`] give a
//! read-only snapshot of predictor state for monitoring and tests.

/// Synthesis-time constants describing the fixed hardware layout.
pub mod constants;
/// Entry lifecycle: the fields, construction, training, and aging of a
/// single table slot.
pub mod entry;
/// Pure index/tag hash functions of the program counter and history.
pub mod hash;
/// Per-context history registers.
pub mod history;
/// The predictor itself: lookup, trainer, replacement, aging, lifecycle.
pub mod predictor;
/// Debug snapshot types returned by `TagePredictor::stats`.
pub mod stats;
/// A single table: its entries, validity bits, wired history length, and
/// local replacement search.
pub mod table;

/// The predictor type; see the crate documentation for an overview.
pub use crate::predictor::TagePredictor;
/// Read-only predictor snapshot.
pub use crate::stats::{Stats, TableStats};
