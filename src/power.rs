//! Cached powers of a permutation.
//!
//! The walk multiplies the state by a generator raised to a state-dependent
//! exponent on every step. Recomputing `p^e` each time would cost `O(e)`
//! compositions, so all powers up to the order are materialized once: the
//! table keeps composing `p` into itself until the identity recurs, which it
//! must because the group is finite.

use crate::perm::Perm;
use crate::tracing_helpers::trace_log;

/// All powers `p^0 .. p^(ord(p)-1)` of a permutation, plus its order.
///
/// # Invariants
///
/// - `order() >= 1` and equals the number of cached powers.
/// - `get(0)` is the identity on `p`'s symbols; `get(i)` is `p` composed with
///   itself `i` times; `get(order() - 1)` composed with `p` is the identity.
pub struct PowerTable {
    /// `powers[i]` is `p^i`.
    powers: Vec<Perm>,

    /// Least `k >= 1` with `p^k` equal to the identity.
    order: u32,
}

impl PowerTable {
    /// Build the table of all powers of `p`.
    ///
    /// Allocates `ord(p)` permutations of `p.size()` bytes each; everything
    /// after construction is lookups.
    #[must_use]
    pub fn new(p: &Perm) -> Self {
        let mut powers = vec![Perm::identity(p.size())];

        let mut q = p.clone();
        while !q.is_identity() {
            powers.push(q.clone());
            q.compose_assign(p);
        }

        let order = powers.len() as u32;
        trace_log!(size = p.size(), order, "power table built");

        Self { powers, order }
    }

    /// The order of the underlying permutation.
    #[inline]
    #[must_use]
    pub fn order(&self) -> u32 {
        self.order
    }

    /// The `e`-th power of the underlying permutation.
    ///
    /// Exponents must already be reduced modulo [`order`](Self::order).
    ///
    /// # Panics
    ///
    /// Panics if `e >= order()`.
    #[inline]
    #[must_use]
    pub fn get(&self, e: usize) -> &Perm {
        debug_assert!(e < self.powers.len(), "exponent {e} >= order {}", self.order);
        &self.powers[e]
    }
}
