//! # randomizer
//!
//! Weighted random selection in O(1) per draw.
//!
//! Built on [Vose's alias method](https://en.wikipedia.org/wiki/Alias_method):
//! an O(n) pass turns the weights into a probability table and an alias
//! table, after which every sample costs two uniform draws and one branch, no
//! matter how many outcomes there are.
//!
//! Three ways in:
//!
//! 1. **Typed** with [`RandomizerBuilder`]: add entries, then
//!    [`prepare`](RandomizerBuilder::prepare) consumes the builder and returns
//!    an immutable [`Sampler`]. Sampling an unprepared table or adding to a
//!    prepared one does not compile.
//! 2. **Single handle** with [`Randomizer`]: the same lifecycle on one value,
//!    checked at runtime ([`RandomizerError::Frozen`],
//!    [`RandomizerError::NotPrepared`]).
//! 3. **Compile-time enums** with the [`WeightedEnum`] derive macro.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use randomizer::RandomizerBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = RandomizerBuilder::new();
//! builder
//!     .add(1.6, "Red")?
//!     .add(4.4, "Green")?
//!     .add_many([(14.0, "Blue")])?;
//! let colours = builder.prepare()?;
//!
//! let one = colours.sample();           // &&str
//! let three = colours.sample_many(3)?;  // Vec<&&str>
//! # Ok(()) }
//! ```
//!
//! ## Quick start (enum + macro)
//!
//! ```rust,ignore
//! use randomizer::WeightedEnum;
//!
//! #[derive(Copy, Clone, Debug, WeightedEnum)]
//! enum Loot {
//!     #[weight(60)]  Common,
//!     #[weight(30)]  Uncommon,
//!     #[weight(9.5)] Rare,
//!     #[weight(1/2)] Legendary,
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let table = Loot::sampler()?;
//! let item = table.sample_owned();
//! # Ok(()) }
//! ```
//!
//! ## Random sources
//! The source is chosen when the builder is created and used for both draws
//! of every sample: [`FastRandom`] (default, thread-local generator),
//! [`SecureRandom`] (operating system CSPRNG), [`SeededRandom`] (any seeded
//! `rand` generator, for reproducible runs) or your own [`RandomSource`].
//!
//! ## Gotchas
//! * Weights must be finite and strictly positive. NaN/∞ are rejected by
//!   `add`; zero and negative weights by `prepare`.
//! * Entries cannot be changed or removed. Rebuild to change the distribution.

mod alias;
mod builder;
mod error;
mod randomizer;
mod sampler;
mod source;

pub use alias::AliasTable;
pub use builder::{RandomizerBuilder, WeightedEntry};
pub use error::{PrepareError, RandomizerError};
pub use randomizer::Randomizer;
pub use sampler::Sampler;
pub use source::{FastRandom, RandomSource, SecureRandom, SeededRandom, SourceKind};

/// Derive macro imported from `randomizer_macros`.
/// See the crate-level example for usage.
pub use randomizer_macros::WeightedEnum;

/// Trait implemented by the `WeightedEnum` derive macro.
///
/// Each variant and its weight is exposed via [`WeightedEnum::ENTRIES`],
/// which enables building a ready-to-sample [`Sampler`].
pub trait WeightedEnum: Sized + 'static {
    /// All `(weight, variant)` pairs, in declaration order.
    const ENTRIES: &'static [(f64, Self)];

    /// Build a [`Sampler`] over the variants.
    ///
    /// # Errors
    /// See [`RandomizerBuilder::prepare`]: a non-finite, zero or negative
    /// weight is rejected.
    fn sampler() -> Result<Sampler<Self>, RandomizerError>
    where
        Self: Copy,
    {
        Sampler::from_pairs(Self::ENTRIES.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_pairs() {
        let s = Sampler::from_pairs([(1.0, "a"), (3.0, "b")]).unwrap();
        assert!(["a", "b"].contains(s.sample()));
    }
}
