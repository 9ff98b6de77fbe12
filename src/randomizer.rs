//! A single handle that is filled, prepared once, then only sampled.
//!
//! This is the dynamic counterpart of [`RandomizerBuilder`] + [`Sampler`]:
//! the phase is checked at runtime and misuse is reported as
//! [`RandomizerError::Frozen`] or [`RandomizerError::NotPrepared`].

use crate::builder::{RandomizerBuilder, WeightedEntry};
use crate::error::RandomizerError;
use crate::sampler::{Sampler, check_count};
use crate::source::{FastRandom, RandomSource, SecureRandom, SourceKind};

#[derive(Debug, Clone)]
enum Phase<T, S> {
    Open(RandomizerBuilder<T, S>),
    Prepared(Sampler<T, S>),
}

/// Weighted randomizer with the classic add / prepare / sample lifecycle.
///
/// ```rust,ignore
/// use randomizer::Randomizer;
///
/// let mut colours = Randomizer::new();
/// colours.add(1.6, "Red")?.add(4.4, "Green")?.add(14.0, "Blue")?;
/// colours.prepare()?;
/// let one = colours.sample()?;
/// let three = colours.sample_many(3)?;
/// ```
#[derive(Debug, Clone)]
pub struct Randomizer<T, S = FastRandom> {
    // Only `None` while `prepare` moves the builder into a sampler.
    phase: Option<Phase<T, S>>,
}

impl<T> Randomizer<T, FastRandom> {
    pub fn new() -> Self {
        Self::with_source(FastRandom)
    }
}

impl<T> Default for Randomizer<T, FastRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Randomizer<T, SecureRandom> {
    pub fn secure() -> Self {
        Self::with_source(SecureRandom)
    }
}

impl<T> Randomizer<T, Box<dyn RandomSource + Send + Sync>> {
    /// Pick the fast or secure source at runtime.
    pub fn from_kind(kind: SourceKind) -> Self {
        Self::with_source(kind.into_source())
    }
}

impl<T, S: RandomSource> Randomizer<T, S> {
    pub fn with_source(source: S) -> Self {
        Self {
            phase: Some(Phase::Open(RandomizerBuilder::with_source(source))),
        }
    }

    fn builder_mut(&mut self) -> Result<&mut RandomizerBuilder<T, S>, RandomizerError> {
        match &mut self.phase {
            Some(Phase::Open(builder)) => Ok(builder),
            _ => Err(RandomizerError::Frozen),
        }
    }

    fn sampler(&self) -> Result<&Sampler<T, S>, RandomizerError> {
        match &self.phase {
            Some(Phase::Prepared(sampler)) => Ok(sampler),
            _ => Err(RandomizerError::NotPrepared),
        }
    }

    /// # Errors
    /// [`RandomizerError::Frozen`] once prepared, otherwise as
    /// [`RandomizerBuilder::add`].
    pub fn add(&mut self, weight: f64, outcome: T) -> Result<&mut Self, RandomizerError> {
        self.builder_mut()?.add(weight, outcome)?;
        Ok(self)
    }

    pub fn add_many<I>(&mut self, pairs: I) -> Result<&mut Self, RandomizerError>
    where
        I: IntoIterator<Item = (f64, T)>,
    {
        self.builder_mut()?.add_many(pairs)?;
        Ok(self)
    }

    pub fn add_entries<I>(&mut self, entries: I) -> Result<&mut Self, RandomizerError>
    where
        I: IntoIterator<Item = WeightedEntry<T>>,
    {
        self.builder_mut()?.add_entries(entries)?;
        Ok(self)
    }

    /// Build the alias table and freeze the randomizer.
    ///
    /// # Errors
    /// * [`RandomizerError::Frozen`] if already prepared; the existing table
    ///   is kept as is.
    /// * Anything [`RandomizerBuilder::prepare`] reports; the randomizer then
    ///   stays open and can be fixed and prepared again.
    pub fn prepare(&mut self) -> Result<&mut Self, RandomizerError> {
        match self.phase.take() {
            Some(Phase::Open(builder)) => match builder.prepare() {
                Ok(sampler) => {
                    self.phase = Some(Phase::Prepared(sampler));
                    Ok(self)
                }
                Err(err) => {
                    let (builder, error) = err.into_parts();
                    self.phase = Some(Phase::Open(builder));
                    Err(error)
                }
            },
            other => {
                self.phase = other;
                Err(RandomizerError::Frozen)
            }
        }
    }

    pub fn is_prepared(&self) -> bool {
        matches!(self.phase, Some(Phase::Prepared(_)))
    }

    /// Number of entries, prepared or not.
    pub fn len(&self) -> usize {
        match &self.phase {
            Some(Phase::Open(builder)) => builder.len(),
            Some(Phase::Prepared(sampler)) => sampler.len(),
            None => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// # Errors
    /// [`RandomizerError::NotPrepared`] before [`prepare`](Self::prepare).
    pub fn sample(&self) -> Result<&T, RandomizerError> {
        Ok(self.sampler()?.sample())
    }

    /// # Errors
    /// [`RandomizerError::InvalidCount`] for `count == 0`, checked before
    /// [`RandomizerError::NotPrepared`].
    pub fn sample_many(&self, count: usize) -> Result<Vec<&T>, RandomizerError> {
        check_count(count)?;
        self.sampler()?.sample_many(count)
    }

    /// Hand over the frozen state as a typed [`Sampler`].
    ///
    /// # Errors
    /// [`RandomizerError::NotPrepared`] before [`prepare`](Self::prepare).
    pub fn into_sampler(self) -> Result<Sampler<T, S>, RandomizerError> {
        match self.phase {
            Some(Phase::Prepared(sampler)) => Ok(sampler),
            _ => Err(RandomizerError::NotPrepared),
        }
    }
}

impl<T: From<usize>, S: RandomSource> Randomizer<T, S> {
    /// Add an entry whose outcome is its zero-based insertion index.
    pub fn add_weight(&mut self, weight: f64) -> Result<&mut Self, RandomizerError> {
        self.builder_mut()?.add_weight(weight)?;
        Ok(self)
    }

    pub fn add_weights<I>(&mut self, weights: I) -> Result<&mut Self, RandomizerError>
    where
        I: IntoIterator<Item = f64>,
    {
        self.builder_mut()?.add_weights(weights)?;
        Ok(self)
    }
}
