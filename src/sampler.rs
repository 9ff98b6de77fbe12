use rand::Rng;

use crate::alias::AliasTable;
use crate::builder::RandomizerBuilder;
use crate::error::RandomizerError;
use crate::source::{FastRandom, RandomSource};

/// A frozen weighted distribution. Every draw is O(1).
///
/// Produced by [`RandomizerBuilder::prepare`]. Nothing here takes `&mut self`,
/// so a sampler with a `Sync` source can be shared between threads as is.
#[derive(Debug, Clone)]
pub struct Sampler<T, S = FastRandom> {
    table: AliasTable,
    outcomes: Vec<T>,
    source: S,
}

impl<T> Sampler<T, FastRandom> {
    /// One-shot constructor from `(weight, outcome)` pairs.
    ///
    /// # Errors
    /// Anything [`RandomizerBuilder::add_many`] or
    /// [`RandomizerBuilder::prepare`] can report.
    pub fn from_pairs<I>(pairs: I) -> Result<Self, RandomizerError>
    where
        I: IntoIterator<Item = (f64, T)>,
    {
        let mut builder = RandomizerBuilder::new();
        builder.add_many(pairs)?;
        Ok(builder.prepare()?)
    }
}

impl<T, S: RandomSource> Sampler<T, S> {
    pub(crate) fn new(table: AliasTable, outcomes: Vec<T>, source: S) -> Self {
        debug_assert_eq!(table.len(), outcomes.len());
        Self {
            table,
            outcomes,
            source,
        }
    }

    /// Index (in insertion order) of a weighted draw.
    #[inline]
    pub fn sample_index(&self) -> usize {
        self.table.sample_index(&self.source)
    }

    /// Sample an outcome **by reference**.
    #[inline]
    pub fn sample(&self) -> &T {
        &self.outcomes[self.sample_index()]
    }

    /// Sample an outcome **by value** (clones the chosen element).
    #[inline]
    pub fn sample_owned(&self) -> T
    where
        T: Clone,
    {
        self.sample().clone()
    }

    /// `count` independent draws, with replacement, in draw order.
    ///
    /// # Errors
    /// [`RandomizerError::InvalidCount`] if `count` is zero.
    pub fn sample_many(&self, count: usize) -> Result<Vec<&T>, RandomizerError> {
        check_count(count)?;
        Ok((0..count).map(|_| self.sample()).collect())
    }

    /// Owned variant of [`sample_many`](Self::sample_many).
    pub fn sample_many_owned(&self, count: usize) -> Result<Vec<T>, RandomizerError>
    where
        T: Clone,
    {
        check_count(count)?;
        Ok((0..count).map(|_| self.sample_owned()).collect())
    }

    /// Endless stream of draws.
    pub fn sample_iter(&self) -> impl Iterator<Item = &T> + '_ {
        std::iter::repeat_with(move || self.sample())
    }

    /// Sample with a caller-supplied generator.
    ///
    /// This skips the source fixed at construction: neither draw touches
    /// [`source`](Self::source). Use it when the caller owns the generator,
    /// e.g. a seeded one per worker thread.
    #[inline]
    pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R) -> &T {
        &self.outcomes[self.table.sample_index_with(rng)]
    }

    /// Outcomes in insertion order.
    pub fn outcomes(&self) -> &[T] {
        &self.outcomes
    }

    pub fn table(&self) -> &AliasTable {
        &self.table
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// Always `false`: an empty builder cannot be prepared.
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

pub(crate) fn check_count(count: usize) -> Result<(), RandomizerError> {
    if count == 0 {
        return Err(RandomizerError::InvalidCount { count });
    }
    Ok(())
}
