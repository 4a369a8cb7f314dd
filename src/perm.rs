//! Permutations of up to 64 symbols.
//!
//! A [`Perm`] maps `i` to `map[i]` for `i` in `0..n`, with the invariant that
//! the image array is a bijection on `{0..n-1}`. Entries are 8-bit so a
//! permutation of 64 symbols occupies a single cache line, which keeps
//! composition in the generator's inner loop cheap.
//!
//! Besides composition and random sampling, the type carries a bijection
//! between permutations and their *reverse lexicographic rank* in `[0, n!)`,
//! computed both ways with the mixed-radix method of Hall and Knuth
//! ("Combinatorial analysis and computers", Amer. Math. Monthly 72(2), 1965).
//! Ranks are how generator permutations are expressed as fixed constants and
//! how a seed integer selects the initial state.

use std::fmt;

use crate::Error;
use crate::biguint::BigUint;
use crate::source::SeedSource;

/// Maximum number of symbols a permutation may act on.
pub const MAX_SIZE: usize = 64;

/// A permutation of `{0..n-1}`, `1 <= n <= 64`.
///
/// # Invariants
///
/// - `1 <= size() <= MAX_SIZE`
/// - The image array is a bijection: every value in `0..size()` appears
///   exactly once.
///
/// # Example
///
/// ```rust,ignore
/// use cayley::Perm;
///
/// let p = Perm::from_image(&[1, 0, 3, 2]);
/// let q = Perm::from_image(&[2, 3, 0, 1]);
///
/// let mut pq = p.clone();
/// pq.compose_assign(&q);
/// assert_eq!(pq.image(), &[3, 2, 1, 0]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Perm {
    /// Image array: `i` maps to `map[i]`.
    map: Box<[u8]>,
}

impl Perm {
    /// The identity permutation on `n` symbols.
    ///
    /// # Panics
    ///
    /// Panics if `n` is 0 or exceeds [`MAX_SIZE`].
    #[must_use]
    pub fn identity(n: usize) -> Self {
        assert!(
            (1..=MAX_SIZE).contains(&n),
            "permutation size {n} outside 1..={MAX_SIZE}"
        );

        Self {
            map: (0..n as u8).collect(),
        }
    }

    /// Build a permutation from an explicit image array.
    ///
    /// The caller is trusted to supply a bijection; this is checked in debug
    /// builds only.
    ///
    /// # Panics
    ///
    /// Panics if the image is empty or longer than [`MAX_SIZE`]; debug-panics
    /// if it is not a bijection.
    #[must_use]
    pub fn from_image(image: &[u8]) -> Self {
        assert!(
            (1..=MAX_SIZE).contains(&image.len()),
            "permutation size {} outside 1..={MAX_SIZE}",
            image.len()
        );

        let p = Self { map: image.into() };
        p.debug_assert_valid();
        p
    }

    /// Build the permutation with the given reverse lexicographic rank.
    ///
    /// Inverse of [`rank`](Self::rank). `rank` is reduced modulo `n!` first,
    /// so any magnitude is accepted.
    ///
    /// # Errors
    ///
    /// [`Error::DomainViolation`] if `n` is 0 or exceeds [`MAX_SIZE`].
    pub fn from_rank(n: usize, rank: &BigUint) -> Result<Self, Error> {
        if !(1..=MAX_SIZE).contains(&n) {
            return Err(Error::DomainViolation("permutation size outside 1..=64"));
        }

        let mut factorial = Vec::with_capacity(n);
        factorial.push(BigUint::from(1u32));
        for i in 1..n {
            let f = factorial[i - 1].mul_u32(i as u32);
            factorial.push(f);
        }

        let nfactorial = factorial[n - 1].mul_u32(n as u32);
        let mut m = rank.rem(&nfactorial);

        // Mixed-radix digits: c[i] = m / i!, then m reduced mod i!.
        let mut c = vec![0u32; n];
        for i in (1..n).rev() {
            let (q, r) = m.div_rem(&factorial[i]);
            c[i] = q.to_u32();
            m = r;
        }

        // Spend the digits against the shrinking candidate list.
        let mut candidates: Vec<u8> = (0..n as u8).collect();
        let mut map = vec![0u8; n];
        for i in (0..n).rev() {
            map[i] = candidates.remove(c[i] as usize);
        }

        let p = Self {
            map: map.into_boxed_slice(),
        };
        p.debug_assert_valid();
        Ok(p)
    }

    /// The reverse lexicographic rank, in `[0, n!)`.
    ///
    /// Inverse of [`from_rank`](Self::from_rank): the rank is
    /// `sum c_i * i!` where `c_i` counts earlier entries smaller than entry
    /// `i`.
    #[must_use]
    pub fn rank(&self) -> BigUint {
        let mut num = BigUint::zero();
        let mut factorial = BigUint::from(1u32);

        for i in 1..self.size() {
            factorial = factorial.mul_u32(i as u32);

            let count = (0..i).filter(|&j| self.map[j] < self.map[i]).count() as u32;
            if count > 0 {
                num.add_assign(&factorial.mul_u32(count));
            }
        }

        num
    }

    /// The reverse lexicographic rank as a machine word.
    ///
    /// Only valid for `size() <= 20`; `21!` overflows a `u64`.
    #[must_use]
    pub fn rank_u64(&self) -> u64 {
        debug_assert!(self.size() <= 20, "rank_u64: {}! overflows u64", self.size());

        let mut num = 0u64;
        let mut factorial = 1u64;

        for i in 1..self.size() {
            factorial *= i as u64;

            let count = (0..i).filter(|&j| self.map[j] < self.map[i]).count() as u64;
            num += count * factorial;
        }

        num
    }

    /// Number of symbols being permuted.
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.map.len()
    }

    /// Image of symbol `i`.
    ///
    /// # Panics
    ///
    /// Debug-panics if `i >= size()`.
    #[inline]
    #[must_use]
    pub fn get(&self, i: usize) -> u8 {
        debug_assert!(i < self.size(), "get: index out of bounds");
        self.map[i]
    }

    /// The full image array.
    #[inline]
    #[must_use]
    pub fn image(&self) -> &[u8] {
        &self.map
    }

    /// True iff this is the identity permutation.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.map.iter().enumerate().all(|(i, &m)| m == i as u8)
    }

    /// Post-compose with `q`: afterwards `self` maps `i` to `q[self[i]]`
    /// ("first self, then q").
    ///
    /// # Panics
    ///
    /// Panics if the sizes differ.
    pub fn compose_assign(&mut self, q: &Self) {
        assert_eq!(
            self.size(),
            q.size(),
            "compose_assign: size mismatch"
        );

        for m in &mut self.map {
            *m = q.map[*m as usize];
        }
    }

    /// Shuffle into a uniformly random permutation.
    ///
    /// Fisher-Yates over the current image; every permutation of `{0..n-1}`
    /// is equally likely regardless of the starting state.
    pub fn randomize<R: SeedSource + ?Sized>(&mut self, rng: &mut R) {
        let n = self.size();

        for i in 0..n - 1 {
            let j = (rng.next_u64() % (n - i) as u64) as usize + i;
            self.map.swap(i, j);
        }
    }

    /// Shuffle into a uniformly random *odd* permutation.
    ///
    /// Resets to the identity, runs Fisher-Yates over all but the last pair
    /// while counting effective swaps, then transposes the last two entries
    /// if the swap count came out even. Every odd permutation is equally
    /// likely.
    ///
    /// # Panics
    ///
    /// Panics if `size() < 2`; no odd permutations exist below two symbols.
    pub fn randomize_odd<R: SeedSource + ?Sized>(&mut self, rng: &mut R) {
        let n = self.size();
        assert!(n >= 2, "randomize_odd: no odd permutations of {n} symbols");

        for (i, m) in self.map.iter_mut().enumerate() {
            *m = i as u8;
        }

        let mut swaps = 0usize;
        for i in 0..n - 2 {
            let j = (rng.next_u64() % (n - i) as u64) as usize + i;

            if i != j {
                self.map.swap(i, j);
                swaps += 1;
            }
        }

        if swaps % 2 == 0 {
            self.map.swap(n - 2, n - 1);
        }
    }

    /// Verify the bijection invariant (debug builds only).
    ///
    /// # Panics
    ///
    /// If any image value is out of range or repeated.
    #[cfg(debug_assertions)]
    pub fn debug_assert_valid(&self) {
        let mut seen = [false; MAX_SIZE];

        for &m in &self.map {
            let m = m as usize;
            assert!(m < self.size(), "image value {m} out of range");
            assert!(!seen[m], "image value {m} repeated");
            seen[m] = true;
        }
    }

    /// Verify the bijection invariant (no-op in release builds).
    #[inline]
    #[cfg(not(debug_assertions))]
    pub fn debug_assert_valid(&self) {}
}

impl fmt::Display for Perm {
    /// The image as a comma-separated list: `"2, 4, 0, 3, 1"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, m) in self.map.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{m}")?;
        }
        Ok(())
    }
}
