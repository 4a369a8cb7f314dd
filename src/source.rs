//! External uniform-64 sources.
//!
//! Generator selection and initial-state sampling consume uniformly
//! distributed 64-bit words from an outside source. The source is only used
//! while seeding; the output path never touches it.

/// A source of uniformly distributed 64-bit words.
///
/// The canonical implementation is MT19937-64 ([`rand_mt::Mt64`]); any
/// high-quality generator will do. Implementors are called repeatedly and
/// never retained past seeding.
pub trait SeedSource {
    /// The next uniformly distributed 64-bit word.
    fn next_u64(&mut self) -> u64;
}

impl SeedSource for rand_mt::Mt64 {
    #[inline]
    fn next_u64(&mut self) -> u64 {
        rand_mt::Mt64::next_u64(self)
    }
}
