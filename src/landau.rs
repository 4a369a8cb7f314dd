//! Landau's function L(n) for n up to 64.
//!
//! L(n) is the maximal order of an element of the symmetric group S_n,
//! equivalently the largest least common multiple of any partition of n.
//! Generator permutations are required to reach exactly this order, which
//! maximizes the period of the state walk.

/// L(n) for `0 <= n <= 64`.
pub const LANDAU: [u32; 65] = [
    1,         1,         2,         3,         4, //
    6,         6,         12,        15,        20, //
    30,        30,        60,        60,        84, //
    105,       140,       210,       210,       420, //
    420,       420,       420,       840,       840, //
    1_260,     1_260,     1_540,     2_310,     2_520, //
    4_620,     4_620,     5_460,     5_460,     9_240, //
    9_240,     13_860,    13_860,    16_380,    16_380, //
    27_720,    30_030,    32_760,    60_060,    60_060, //
    60_060,    60_060,    120_120,   120_120,   180_180, //
    180_180,   180_180,   180_180,   360_360,   360_360, //
    360_360,   360_360,   471_240,   471_240,   556_920, //
    1_021_020, 1_021_020, 1_141_140, 1_141_140, 2_042_040,
];

/// Look up L(n).
///
/// # Panics
///
/// Panics if `n > 64`.
#[inline]
#[must_use]
pub const fn landau(n: usize) -> u32 {
    assert!(n < LANDAU.len(), "Landau table covers only n <= 64");
    LANDAU[n]
}
