//! Hash unit.
//!
//! Two pure functions of the program counter and (for indexing) the current
//! history register. Both are deterministic and side-effect free — see
//! spec §4.1.

/// Mask covering the bottom 10 bits, the width of every table index.
const INDEX_MASK: u64 = 0x3FF;

/// Mask covering the bottom 13 bits, the width of a tag.
const TAG_MASK: u64 = 0x1FFF;

/// Computes the table index for `pc` given the context's current history
/// register and the target table's wired history length.
///
/// `history_len == 0` is the base-table path: the fold is never entered and
/// the PC slice is returned directly (spec §8, "Boundaries").
pub fn idx(pc: u64, history: u64, history_len: u32) -> u16 {
    let pc_slice = (pc >> 12) & INDEX_MASK;
    if history_len == 0 {
        return pc_slice as u16;
    }

    let mask = if history_len >= 64 {
        u64::MAX
    } else {
        (1u64 << history_len) - 1
    };
    let mut h = history & mask;
    while h > INDEX_MASK {
        h = (h & INDEX_MASK) ^ (h >> 10);
    }

    ((pc_slice ^ h) & INDEX_MASK) as u16
}

/// Computes the 13-bit tag for `pc`. The tag bit range (22..35) does not
/// overlap the index slice's bit range (12..22).
pub fn tag(pc: u64) -> u16 {
    ((pc >> 22) & TAG_MASK) as u16
}
