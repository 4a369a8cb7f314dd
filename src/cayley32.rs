//! The 64-bit output variant over S_32.
//!
//! [`Cayley32`] wraps the core [`Cayley`] engine at permutation size 32 and
//! turns each state into a 64-bit word: the image entries are multiplied by
//! 32 fixed odd keys, the products XORed together, and the result whitened
//! through the engine's delay line.
//!
//! Two constructions are provided, mirroring the two seeding variants:
//! [`from_seed`](Cayley32::from_seed) uses a fixed generator pair and an
//! integer seed, so output streams are reproducible across processes;
//! [`from_source`](Cayley32::from_source) draws fresh generators from an
//! external uniform source. The fixed generators and keys are public, so
//! neither variant is cryptographically secure; deployments wanting
//! obscurity should substitute private constants of the same shape.

use crate::Error;
use crate::biguint::BigUint;
use crate::engine::Cayley;
use crate::source::SeedSource;

/// Permutation size of this variant.
pub const PERM_SIZE: usize = 32;

/// Reverse lexicographic ranks (hex) of the fixed generator pair.
///
/// Both unrank to permutations of order L(32) = 5460 with no common fixed
/// point.
pub const GENERATOR_RANKS: [&str; 2] = [
    "350F1C2036E12600512A8400920E",
    "EEDC82EE2D472B430D13E5066CD5B",
];

/// Output mixing keys, one per image entry.
///
/// Entries 22-31 repeat entries 0-9; the repetition is kept bit-for-bit so
/// that output streams match the reference constants.
const MIX_KEYS: [u64; PERM_SIZE] = [
    0x0d7e_11b4_4d8e_8161,
    0x3d43_a82e_494a_9972,
    0x71b9_41e4_c155_7ec7,
    0x56bf_3455_9248_d37c,
    0x445d_b487_64d3_c5c8,
    0xd2b9_6a4b_a16b_5c56,
    0xb2bb_aa12_7223_e3da,
    0x3232_fd66_9cd2_918e,
    0x331d_3d1b_d619_e971,
    0x74b3_6806_4429_5539,
    0xb491_addf_b1af_0f5b,
    0xa3ca_a645_5b31_3d54,
    0xb625_7e45_a726_fa52,
    0xd413_cd54_747f_43b1,
    0x7068_73ee_b358_3e05,
    0x3fd0_d37b_7f24_589c,
    0xc04c_b886_d76a_bce0,
    0x3ecf_dec3_d519_aedd,
    0xbb4f_1bcc_b25c_3e51,
    0xb1b8_0c55_0732_d50f,
    0x7c50_15c7_95b5_c8c2,
    0xb2d8_1907_06c7_70a8,
    0x0d7e_11b4_4d8e_8161,
    0x3d43_a82e_494a_9972,
    0x71b9_41e4_c155_7ec7,
    0x56bf_3455_9248_d37c,
    0x445d_b487_64d3_c5c8,
    0xd2b9_6a4b_a16b_5c56,
    0xb2bb_aa12_7223_e3da,
    0x3232_fd66_9cd2_918e,
    0x331d_3d1b_d619_e971,
    0x74b3_6806_4429_5539,
];

/// A 64-bit pseudorandom generator over S_32.
///
/// # Example
///
/// ```rust,ignore
/// use cayley::{BigUint, Cayley32};
///
/// let seed = BigUint::from_hex("99999")?;
/// let mut rng = Cayley32::from_seed(&seed)?;
/// let words: Vec<u64> = (0..4).map(|_| rng.next_u64()).collect();
/// ```
pub struct Cayley32 {
    engine: Cayley,
}

impl Cayley32 {
    /// Build from the fixed generator pair, with the initial permutation
    /// selected by `seed` (reduced modulo 32!).
    ///
    /// Identically seeded instances produce identical output streams.
    ///
    /// # Errors
    ///
    /// [`Error::DomainViolation`] only if the embedded constants were
    /// tampered with; with the shipped values this cannot fail for any seed.
    pub fn from_seed(seed: &BigUint) -> Result<Self, Error> {
        let rank0 = BigUint::from_hex(GENERATOR_RANKS[0])?;
        let rank1 = BigUint::from_hex(GENERATOR_RANKS[1])?;

        Ok(Self {
            engine: Cayley::with_fixed_generators(PERM_SIZE, &rank0, &rank1, seed)?,
        })
    }

    /// Build with pseudo-randomly chosen generators and initial permutation,
    /// both drawn from `rng`.
    ///
    /// The source is consumed only during construction.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature matches
    /// [`Cayley::with_random_generators`].
    pub fn from_source<R: SeedSource>(rng: &mut R) -> Result<Self, Error> {
        Ok(Self {
            engine: Cayley::with_random_generators(PERM_SIZE, rng)?,
        })
    }

    /// Generate the next pseudorandom 64-bit word.
    ///
    /// Steps the walk, mixes the permutation image through the keyed
    /// XOR-of-products, and whitens the result against the delay line. The
    /// multiplies are ordinary wrapping 64-bit products.
    #[must_use]
    pub fn next_u64(&mut self) -> u64 {
        self.engine.step();

        let image = self.engine.current().image();
        let mut num = 0u64;
        for (&m, &key) in image.iter().zip(&MIX_KEYS) {
            num ^= u64::from(m).wrapping_mul(key);
        }

        self.engine.whiten(num)
    }

    /// The underlying engine, for inspection.
    #[inline]
    #[must_use]
    pub fn engine(&self) -> &Cayley {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landau::landau;

    fn seeded(hex: &str) -> Cayley32 {
        Cayley32::from_seed(&BigUint::from_hex(hex).unwrap()).unwrap()
    }

    // ==================== Construction ====================

    #[test]
    fn test_fixed_generators_are_maximal_order() {
        let rng = seeded("99999");
        assert_eq!(rng.engine().order(), landau(PERM_SIZE));
        assert_eq!(rng.engine().size(), PERM_SIZE);
    }

    #[test]
    fn test_fixed_generators_share_no_fixed_point() {
        let rng = seeded("0");
        let g0 = rng.engine().generator(0);
        let g1 = rng.engine().generator(1);

        for i in 0..PERM_SIZE {
            assert!(!(g0.get(i) as usize == i && g1.get(i) as usize == i));
        }
    }

    #[test]
    fn test_generator_ranks_round_trip() {
        let rng = seeded("0");

        for (i, hex) in GENERATOR_RANKS.iter().enumerate() {
            let rank = rng.engine().generator(i).rank();
            assert_eq!(rank.to_hex(), *hex);
        }
    }

    #[test]
    fn test_seed_selects_initial_permutation() {
        let rng = seeded("99999");
        let expect =
            crate::Perm::from_rank(PERM_SIZE, &BigUint::from_hex("99999").unwrap()).unwrap();
        assert_eq!(rng.engine().current(), &expect);
    }

    // ==================== Output stream ====================

    #[test]
    fn test_identical_seeds_agree() {
        let mut a = seeded("99999");
        let mut b = seeded("99999");

        for k in 0..1024 {
            assert_eq!(a.next_u64(), b.next_u64(), "output {k}");
        }
    }

    #[test]
    fn test_different_seeds_disagree() {
        let mut a = seeded("99999");
        let mut b = seeded("9999A");

        let wa: Vec<u64> = (0..64).map(|_| a.next_u64()).collect();
        let wb: Vec<u64> = (0..64).map(|_| b.next_u64()).collect();
        assert_ne!(wa, wb);
    }

    #[test]
    fn test_instances_are_independent() {
        // Interleaving a second engine must not perturb the first; the
        // generator-parity bit is per instance.
        let mut alone = seeded("1234");
        let expect: Vec<u64> = (0..64).map(|_| alone.next_u64()).collect();

        let mut a = seeded("1234");
        let mut b = seeded("FEDC");
        let mut got = Vec::with_capacity(64);
        for _ in 0..64 {
            got.push(a.next_u64());
            let _ = b.next_u64();
        }

        assert_eq!(got, expect);
    }

    #[test]
    fn test_random_generator_variant_is_deterministic() {
        let mut sa = crate::Mt64::new(0x99999);
        let mut sb = crate::Mt64::new(0x99999);

        let mut a = Cayley32::from_source(&mut sa).unwrap();
        let mut b = Cayley32::from_source(&mut sb).unwrap();

        assert_eq!(a.engine().order(), landau(PERM_SIZE));
        for k in 0..256 {
            assert_eq!(a.next_u64(), b.next_u64(), "output {k}");
        }
    }

    #[test]
    fn test_output_is_not_stuck() {
        let mut rng = seeded("99999");
        let words: Vec<u64> = (0..256).map(|_| rng.next_u64()).collect();

        // All distinct would be expected of 256 draws from 2^64.
        let mut sorted = words.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), words.len());
    }
}
