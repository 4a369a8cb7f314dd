//! # Cayley
//!
//! A pseudorandom number generator whose state is an element of the symmetric
//! group S_n and whose step function is a walk on a Cayley graph of that
//! group.
//!
//! Each step multiplies the current permutation by one of two alternating,
//! precomputed generators raised to a state-dependent exponent. The output is
//! a 64-bit word obtained from the permutation image by a keyed mix, then
//! whitened through a delay line of previous outputs.
//!
//! ## Design
//!
//! - Generators are permutations of maximal order (Landau's function L(n)),
//!   with no common fixed point, so the walk is not confined to either cyclic
//!   subgroup and the state period is as long as the group allows.
//! - All powers of each generator are cached up front ([`PowerTable`]), so a
//!   step is one table lookup plus n byte lookups.
//! - Exponents are drawn from a 32-entry delay line of past outputs, which
//!   injects 32 rounds of history into every output word.
//!
//! ## Performance
//!
//! - A permutation of up to 64 symbols is a single cache line of 8-bit
//!   entries, so composition in the inner loop stays in L1.
//! - [`BigUint`] arithmetic is used only while seeding (ranking and unranking
//!   permutations); the output path is pure 64-bit integer code.
//!
//! ## Example
//!
//! ```rust,ignore
//! use cayley::{BigUint, Cayley32};
//!
//! let seed = BigUint::from_hex("99999")?;
//! let mut rng = Cayley32::from_seed(&seed)?;
//! let word = rng.next_u64();
//! ```

pub mod biguint;
pub mod cayley32;
pub mod engine;
pub mod landau;
pub mod perm;
pub mod power;
pub mod source;
mod tracing_helpers;

pub use biguint::BigUint;
pub use cayley32::Cayley32;
pub use engine::Cayley;
pub use perm::Perm;
pub use power::PowerTable;
pub use source::SeedSource;

/// The canonical uniform-64 collaborator, MT19937-64.
pub use rand_mt::Mt64;

use std::fmt;

/// Errors reported at the crate's input boundaries.
///
/// Everything else -- composing permutations of different sizes, looking up a
/// power at or beyond the order, dividing by zero -- is a caller contract
/// violation and panics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A character outside `[0-9A-Fa-f]` in a hex string.
    InvalidHexDigit(char),

    /// A domain constraint violated by an input value: a permutation size
    /// outside the supported range, or a fixed generator whose order is not
    /// maximal.
    DomainViolation(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHexDigit(c) => write!(f, "invalid hex digit {c:?}"),

            Self::DomainViolation(what) => write!(f, "domain violation: {what}"),
        }
    }
}

impl std::error::Error for Error {}

/// Install a console `tracing` subscriber filtered by `RUST_LOG`.
///
/// Safe to call multiple times; only the first call takes effect. Compiled to
/// a no-op unless the crate is built with the `tracing` feature.
pub fn init_tracing() {
    #[cfg(feature = "tracing")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init();
    }
}
