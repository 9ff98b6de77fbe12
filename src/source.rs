//! Uniform random sources consumed by the sampler.
//!
//! A source is picked once, when the builder is created, and is then used for
//! both draws of every sample. Swapping the source never touches the table
//! construction or the sampling code.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use rand::rngs::OsRng;
use rand::{Rng, TryRngCore};

/// A supplier of independent uniform draws.
///
/// Each method call counts as exactly one draw.
pub trait RandomSource {
    /// A value in `[0, 1)`.
    fn uniform(&self) -> f64;

    /// An index in `[0, n)`. `n` is never zero.
    fn index(&self, n: usize) -> usize {
        // `uniform() < 1` keeps this below `n`, the `min` guards rounding.
        ((self.uniform() * n as f64) as usize).min(n - 1)
    }
}

/// Fast, non-cryptographic draws from the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct FastRandom;

impl RandomSource for FastRandom {
    #[inline]
    fn uniform(&self) -> f64 {
        rand::rng().random()
    }

    #[inline]
    fn index(&self, n: usize) -> usize {
        rand::rng().random_range(0..n)
    }
}

/// Draws straight from the operating system's CSPRNG. Slower per call.
///
/// # Panics
/// A draw panics if the operating system cannot supply entropy, the same way
/// `rand::rng()` panics when it cannot seed itself. Both draws go through
/// infallible [`RandomSource`] methods, so there is no error to return.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureRandom;

impl RandomSource for SecureRandom {
    fn uniform(&self) -> f64 {
        OsRng.unwrap_err().random()
    }

    fn index(&self, n: usize) -> usize {
        OsRng.unwrap_err().random_range(0..n)
    }
}

/// Adapts any `rand` generator, typically a seeded one, for reproducible runs.
///
/// Interior mutability makes this `!Sync`; give each thread its own.
#[derive(Debug)]
pub struct SeededRandom<R> {
    rng: RefCell<R>,
}

impl<R: Rng> SeededRandom<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng: RefCell::new(rng),
        }
    }

    pub fn into_inner(self) -> R {
        self.rng.into_inner()
    }
}

impl<R: Rng> RandomSource for SeededRandom<R> {
    fn uniform(&self) -> f64 {
        self.rng.borrow_mut().random()
    }

    fn index(&self, n: usize) -> usize {
        self.rng.borrow_mut().random_range(0..n)
    }
}

/// Runtime choice between the two stock sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SourceKind {
    #[default]
    Fast,
    Secure,
}

impl SourceKind {
    pub fn into_source(self) -> Box<dyn RandomSource + Send + Sync> {
        match self {
            SourceKind::Fast => Box::new(FastRandom),
            SourceKind::Secure => Box::new(SecureRandom),
        }
    }
}

impl<S: RandomSource + ?Sized> RandomSource for &S {
    #[inline]
    fn uniform(&self) -> f64 {
        (**self).uniform()
    }

    #[inline]
    fn index(&self, n: usize) -> usize {
        (**self).index(n)
    }
}

impl<S: RandomSource + ?Sized> RandomSource for Box<S> {
    #[inline]
    fn uniform(&self) -> f64 {
        (**self).uniform()
    }

    #[inline]
    fn index(&self, n: usize) -> usize {
        (**self).index(n)
    }
}

impl<S: RandomSource + ?Sized> RandomSource for Rc<S> {
    #[inline]
    fn uniform(&self) -> f64 {
        (**self).uniform()
    }

    #[inline]
    fn index(&self, n: usize) -> usize {
        (**self).index(n)
    }
}

impl<S: RandomSource + ?Sized> RandomSource for Arc<S> {
    #[inline]
    fn uniform(&self) -> f64 {
        (**self).uniform()
    }

    #[inline]
    fn index(&self, n: usize) -> usize {
        (**self).index(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn check_ranges<S: RandomSource>(source: &S) {
        for n in [1usize, 2, 7, 1000] {
            for _ in 0..500 {
                let u = source.uniform();
                assert!((0.0..1.0).contains(&u), "u={u}");
                assert!(source.index(n) < n);
            }
        }
    }

    #[test]
    fn stock_sources_stay_in_range() {
        check_ranges(&FastRandom);
        check_ranges(&SecureRandom);
        check_ranges(&SeededRandom::new(Pcg32::seed_from_u64(1)));
        check_ranges(&SourceKind::Secure.into_source());
    }

    #[test]
    fn seeded_is_reproducible() {
        let a = SeededRandom::new(Pcg32::seed_from_u64(7));
        let b = SeededRandom::new(Pcg32::seed_from_u64(7));
        for _ in 0..100 {
            assert_eq!(a.uniform(), b.uniform());
            assert_eq!(a.index(13), b.index(13));
        }
    }

    struct Fixed(f64);

    impl RandomSource for Fixed {
        fn uniform(&self) -> f64 {
            self.0
        }
    }

    #[test]
    fn default_index_never_reaches_n() {
        assert_eq!(Fixed(0.0).index(5), 0);
        assert_eq!(Fixed(1.0 - f64::EPSILON).index(5), 4);
        assert_eq!(Fixed(0.5).index(1), 0);
    }
}
