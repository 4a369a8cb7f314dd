//! Property-based tests for the `perm` module.
//!
//! The bijection invariant and the rank round trip are the load-bearing
//! properties: generator constants are expressed as ranks, so an unrank/rank
//! disagreement would silently change every output stream.

use cayley::{BigUint, Perm, SeedSource};
use proptest::prelude::*;

// ============================================================================
//  Strategies and helpers
// ============================================================================

/// SplitMix64; cheap deterministic source for sampling tests.
struct SplitMix(u64);

impl SeedSource for SplitMix {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }
}

/// A uniformly random permutation of the given size.
fn perm(n: usize) -> impl Strategy<Value = Perm> {
    any::<u64>().prop_map(move |seed| {
        let mut p = Perm::identity(n);
        p.randomize(&mut SplitMix(seed));
        p
    })
}

/// n! for small n.
fn factorial(n: usize) -> u64 {
    (1..=n as u64).product()
}

/// All image values 0..n appear exactly once.
fn is_bijective(p: &Perm) -> bool {
    let mut seen = [false; 64];
    for &m in p.image() {
        if seen[m as usize] {
            return false;
        }
        seen[m as usize] = true;
    }
    p.image().len() == seen.iter().filter(|&&s| s).count()
}

/// Inversion-count parity: 1 for odd permutations.
fn parity(p: &Perm) -> usize {
    let m = p.image();
    let mut inversions = 0;

    for i in 0..m.len() {
        for j in 0..i {
            if m[j] > m[i] {
                inversions += 1;
            }
        }
    }

    inversions % 2
}

// ============================================================================
//  Bijection invariant
// ============================================================================

proptest! {
    /// Uniform sampling preserves bijectivity at every size.
    #[test]
    fn randomize_is_bijective(n in 1usize..=64, seed in any::<u64>()) {
        let mut p = Perm::identity(n);
        p.randomize(&mut SplitMix(seed));
        prop_assert!(is_bijective(&p));
    }

    /// Odd sampling preserves bijectivity at every size.
    #[test]
    fn randomize_odd_is_bijective(n in 2usize..=64, seed in any::<u64>()) {
        let mut p = Perm::identity(n);
        p.randomize_odd(&mut SplitMix(seed));
        prop_assert!(is_bijective(&p));
    }

    /// Unranking always produces a bijection, for ranks far beyond n!.
    #[test]
    fn from_rank_is_bijective(n in 1usize..=64, raw in any::<u64>()) {
        let p = Perm::from_rank(n, &BigUint::from(raw)).unwrap();
        prop_assert!(is_bijective(&p));
    }

    /// Composition of bijections is a bijection of the same size.
    #[test]
    fn compose_is_bijective(a in perm(16), b in perm(16)) {
        let mut ab = a.clone();
        ab.compose_assign(&b);
        prop_assert_eq!(ab.size(), 16);
        prop_assert!(is_bijective(&ab));
    }
}

// ============================================================================
//  Rank bijection
// ============================================================================

proptest! {
    /// from_rank(n, r).rank() = r for every r in [0, n!).
    #[test]
    fn rank_round_trip(n in 1usize..=20, raw in any::<u64>()) {
        let r = raw % factorial(n);
        let p = Perm::from_rank(n, &BigUint::from(r)).unwrap();

        prop_assert_eq!(p.rank_u64(), r);
        prop_assert_eq!(p.rank(), BigUint::from(r));
    }

    /// Ranking then unranking is the identity on permutations.
    #[test]
    fn unrank_round_trip(p in perm(12)) {
        let back = Perm::from_rank(12, &p.rank()).unwrap();
        prop_assert_eq!(back, p);
    }

    /// Ranks at or above n! select the same permutation as their residue.
    #[test]
    fn rank_is_reduced(n in 2usize..=12, raw in any::<u64>()) {
        let nfact = factorial(n);
        let r = raw % nfact;
        let shifted = Perm::from_rank(n, &BigUint::from(r + nfact)).unwrap();
        let direct = Perm::from_rank(n, &BigUint::from(r)).unwrap();
        prop_assert_eq!(shifted, direct);
    }

    /// Distinct ranks give distinct permutations.
    #[test]
    fn rank_is_injective(n in 3usize..=10, a in any::<u64>(), b in any::<u64>()) {
        let (a, b) = (a % factorial(n), b % factorial(n));
        prop_assume!(a != b);

        let pa = Perm::from_rank(n, &BigUint::from(a)).unwrap();
        let pb = Perm::from_rank(n, &BigUint::from(b)).unwrap();
        prop_assert_ne!(pa, pb);
    }
}

// ============================================================================
//  Group structure
// ============================================================================

proptest! {
    /// Composition is associative.
    #[test]
    fn compose_associative(a in perm(10), b in perm(10), c in perm(10)) {
        let mut ab_c = a.clone();
        ab_c.compose_assign(&b);
        ab_c.compose_assign(&c);

        let mut bc = b.clone();
        bc.compose_assign(&c);
        let mut a_bc = a.clone();
        a_bc.compose_assign(&bc);

        prop_assert_eq!(ab_c, a_bc);
    }

    /// The identity is neutral on both sides.
    #[test]
    fn identity_is_neutral(p in perm(10)) {
        let id = Perm::identity(10);

        let mut left = id.clone();
        left.compose_assign(&p);
        prop_assert_eq!(&left, &p);

        let mut right = p.clone();
        right.compose_assign(&id);
        prop_assert_eq!(&right, &p);
    }
}

// ============================================================================
//  Odd sampling
// ============================================================================

proptest! {
    /// Every sampled odd permutation has inversion parity 1.
    #[test]
    fn randomize_odd_is_odd(n in 2usize..=64, seed in any::<u64>()) {
        let mut p = Perm::identity(n);
        p.randomize_odd(&mut SplitMix(seed));
        prop_assert_eq!(parity(&p), 1);
    }

    /// Odd sampling is independent of the prior state.
    #[test]
    fn randomize_odd_ignores_start(n in 2usize..=32, seed in any::<u64>(), start in any::<u64>()) {
        let mut a = Perm::identity(n);
        a.randomize(&mut SplitMix(start));
        a.randomize_odd(&mut SplitMix(seed));

        let mut b = Perm::identity(n);
        b.randomize_odd(&mut SplitMix(seed));

        prop_assert_eq!(a, b);
    }
}
