//! The core Cayley walk engine.
//!
//! [`Cayley`] owns a pair of maximal-order generator permutations (as power
//! tables), the current permutation, and a 32-entry delay line of past
//! outputs. A step multiplies the current permutation by one of the two
//! generators -- they alternate -- raised to an exponent read from the delay
//! line, so the walk's direction depends on output history and the state
//! never settles into either generator's cyclic subgroup.
//!
//! The engine is size-parametric (any `2 <= n <= 64`) and produces no output
//! words itself; an output variant such as [`crate::Cayley32`] extracts words
//! from the current permutation and feeds them back through
//! [`whiten`](Cayley::whiten).
//!
//! Engines are single-threaded. Two engines are fully independent; one
//! engine must not be shared across threads without external exclusion.

use crate::Error;
use crate::biguint::BigUint;
use crate::landau::landau;
use crate::perm::Perm;
use crate::power::PowerTable;
use crate::source::SeedSource;
use crate::tracing_helpers::debug_log;

/// Number of entries in the delay line.
pub const DELAY: usize = 32;

/// Delay line at construction. Fixed nonzero constants; outputs overwrite
/// them one per step.
const DELAY_SEED: [u64; DELAY] = [
    0x57ea_5e79_bb7b_58dc,
    0x0319_8e23_9ff8_ba7d,
    0x7779_bd2a_eb66_6379,
    0x5de2_cf0e_0487_81c3,
    0x89fa_ecea_cabe_7821,
    0xbf5a_9b43_b4e5_50ae,
    0x24e3_7a69_6814_c67e,
    0x45e1_9926_9f6a_d385,
    0xf1df_54ec_42d8_fba8,
    0x089f_4173_5277_a11d,
    0x602c_3888_033e_dae0,
    0xc71f_ee18_8d41_a646,
    0x3791_21f4_7085_af73,
    0x9419_d15d_410b_8eeb,
    0x7607_44f2_6b4c_05b0,
    0x3c68_c1fb_83c9_a47e,
    0xa10d_29f0_1e2f_225e,
    0x3979_2d6f_9700_f5cb,
    0xf501_6c43_b32d_066c,
    0x692d_0a2c_bcc0_83c0,
    0x229b_fc31_ea3b_eeff,
    0xe9e6_fd8b_bf40_33b8,
    0x74e8_c4ad_7bd9_5bd0,
    0xeedb_9ced_e270_c79b,
    0x9abd_1906_822b_22ac,
    0x3b57_c645_8e33_0f89,
    0x7fc8_519d_fd26_353d,
    0x2874_406c_d5a5_4ba0,
    0x9fe7_daf9_3fe5_77a2,
    0x83d1_c7bb_3d29_cd1f,
    0xbb2d_2cbb_6848_3f3d,
    0x39af_233d_4029_46ec,
];

/// The Cayley walk over S_n: generator pair, current permutation, delay line.
///
/// # Invariants
///
/// - Both generators have order exactly L(n) ([`landau`]) and share no fixed
///   point.
/// - `tail < DELAY`; the generator-parity bit is per instance and alternates
///   on every step.
pub struct Cayley {
    /// Order of both generators, L(n).
    order: u32,

    /// Power tables for the generator pair.
    gens: [PowerTable; 2],

    /// Current permutation.
    cur: Perm,

    /// Circular buffer of the last [`DELAY`] raw outputs.
    delay: [u64; DELAY],

    /// Index of the oldest delay-line entry.
    tail: usize,

    /// Which generator the next step multiplies by.
    parity: usize,
}

impl Cayley {
    /// Build an engine with pseudo-randomly chosen generators.
    ///
    /// Rejection-samples a uniform permutation for the first generator and an
    /// odd one for the second until both have order exactly L(n) and share no
    /// fixed point, then draws a uniform random initial permutation. The
    /// source is not retained.
    ///
    /// # Errors
    ///
    /// [`Error::DomainViolation`] if `n` is outside `2..=64`, or if `n` is 3:
    /// the order-3 elements of S_3 are all even, so no odd generator of
    /// maximal order exists and selection could not terminate.
    pub fn with_random_generators<R: SeedSource>(n: usize, rng: &mut R) -> Result<Self, Error> {
        if !(2..=crate::perm::MAX_SIZE).contains(&n) {
            return Err(Error::DomainViolation("engine size outside 2..=64"));
        }

        if n == 3 {
            return Err(Error::DomainViolation(
                "S_3 has no odd element of maximal order",
            ));
        }

        let order = landau(n);
        let gens = Self::choose_generators(n, order, rng);

        let mut cur = Perm::identity(n);
        cur.randomize(rng);

        Ok(Self {
            order,
            gens,
            cur,
            delay: DELAY_SEED,
            tail: 0,
            parity: 0,
        })
    }

    /// Build an engine from fixed generators given as reverse lexicographic
    /// ranks, with the initial permutation selected by `seed` (reduced
    /// modulo n!).
    ///
    /// # Errors
    ///
    /// [`Error::DomainViolation`] if `n` is outside `2..=64` or either
    /// generator's order is not exactly L(n).
    pub fn with_fixed_generators(
        n: usize,
        rank0: &BigUint,
        rank1: &BigUint,
        seed: &BigUint,
    ) -> Result<Self, Error> {
        if !(2..=crate::perm::MAX_SIZE).contains(&n) {
            return Err(Error::DomainViolation("engine size outside 2..=64"));
        }

        let order = landau(n);
        let g0 = PowerTable::new(&Perm::from_rank(n, rank0)?);
        let g1 = PowerTable::new(&Perm::from_rank(n, rank1)?);

        if g0.order() != order || g1.order() != order {
            return Err(Error::DomainViolation(
                "fixed generators must have maximal order",
            ));
        }

        let cur = Perm::from_rank(n, seed)?;

        Ok(Self {
            order,
            gens: [g0, g1],
            cur,
            delay: DELAY_SEED,
            tail: 0,
            parity: 0,
        })
    }

    /// Rejection-sample a generator pair of order exactly `order` with no
    /// common fixed point.
    ///
    /// Maximal-order elements are dense enough in S_n for the order checks to
    /// terminate quickly, and a shared fixed point between two of them is
    /// rare, so the outer loop almost never repeats.
    fn choose_generators<R: SeedSource>(n: usize, order: u32, rng: &mut R) -> [PowerTable; 2] {
        let mut p = Perm::identity(n);

        loop {
            let g0 = loop {
                p.randomize(rng);
                let table = PowerTable::new(&p);
                if table.order() == order {
                    break table;
                }
            };

            let g1 = loop {
                p.randomize_odd(rng);
                let table = PowerTable::new(&p);
                if table.order() == order {
                    break table;
                }
            };

            let a = g0.get(1);
            let b = g1.get(1);
            let shared = (0..n).any(|i| a.get(i) as usize == i && b.get(i) as usize == i);

            if !shared {
                debug_log!(size = n, order, "generator pair selected");
                break [g0, g1];
            }

            debug_log!(size = n, "generator pair shares a fixed point, retrying");
        }
    }

    /// Advance the state by one step.
    ///
    /// Reads the exponent from the oldest delay-line entry, multiplies the
    /// current permutation by the active generator raised to it, and flips
    /// the generator parity. The `mod order` reduction is very slightly
    /// biased (the order does not divide 2^64); the bias stays below 2^-43
    /// for every supported size and is kept for reproducibility.
    #[inline]
    pub fn step(&mut self) {
        let e = (self.delay[self.tail] % u64::from(self.order)) as usize;
        self.cur.compose_assign(self.gens[self.parity].get(e));
        self.parity ^= 1;
    }

    /// Push a raw output word through the delay line and return it XORed
    /// with the oldest retained value.
    #[inline]
    pub fn whiten(&mut self, raw: u64) -> u64 {
        self.delay[self.tail] = raw;
        self.tail = (self.tail + 1) % DELAY;
        raw ^ self.delay[self.tail]
    }

    /// Number of symbols being permuted.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.cur.size()
    }

    /// Order of the generators, L(n).
    #[inline]
    #[must_use]
    pub fn order(&self) -> u32 {
        self.order
    }

    /// Generator `i` (0 or 1).
    ///
    /// # Panics
    ///
    /// Panics if `i > 1`.
    #[must_use]
    pub fn generator(&self, i: usize) -> &Perm {
        assert!(i < 2, "generator index must be 0 or 1");
        self.gens[i].get(1)
    }

    /// The current permutation.
    #[inline]
    #[must_use]
    pub fn current(&self) -> &Perm {
        &self.cur
    }
}
