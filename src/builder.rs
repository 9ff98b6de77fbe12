use crate::alias::AliasTable;
use crate::error::{PrepareError, RandomizerError};
use crate::sampler::Sampler;
use crate::source::{FastRandom, RandomSource, SecureRandom};

/// A weight and the outcome it stands for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedEntry<T> {
    pub weight: f64,
    pub outcome: T,
}

impl<T> WeightedEntry<T> {
    pub fn new(weight: f64, outcome: T) -> Self {
        Self { weight, outcome }
    }
}

/// Append-only collection of weighted outcomes, turned into a [`Sampler`] by
/// [`prepare`](Self::prepare).
///
/// There is no way to change or remove an entry. A different distribution
/// needs a new builder.
///
/// ```rust,ignore
/// use randomizer::RandomizerBuilder;
///
/// let mut builder = RandomizerBuilder::new();
/// builder
///     .add(1.6, "Red")?
///     .add(4.4, "Green")?
///     .add(14.0, "Blue")?;
/// let sampler = builder.prepare()?;
/// let colour = sampler.sample(); // &&str
/// ```
#[derive(Debug, Clone)]
pub struct RandomizerBuilder<T, S = FastRandom> {
    weights: Vec<f64>,
    outcomes: Vec<T>,
    source: S,
}

impl<T> RandomizerBuilder<T, FastRandom> {
    pub fn new() -> Self {
        Self::with_source(FastRandom)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            weights: Vec::with_capacity(capacity),
            outcomes: Vec::with_capacity(capacity),
            source: FastRandom,
        }
    }
}

impl<T> RandomizerBuilder<T, SecureRandom> {
    /// Builder whose sampler draws from the operating system's CSPRNG.
    pub fn secure() -> Self {
        Self::with_source(SecureRandom)
    }
}

impl<T> Default for RandomizerBuilder<T, FastRandom> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> RandomizerBuilder<T, S> {
    pub fn with_source(source: S) -> Self {
        Self {
            weights: Vec::new(),
            outcomes: Vec::new(),
            source,
        }
    }

    /// Append one entry.
    ///
    /// # Errors
    /// [`RandomizerError::InvalidWeight`] if `weight` is NaN or infinite.
    /// Zero and negative weights are accepted here and rejected by
    /// [`prepare`](Self::prepare).
    pub fn add(&mut self, weight: f64, outcome: T) -> Result<&mut Self, RandomizerError> {
        check_weight(self.weights.len(), weight)?;
        self.weights.push(weight);
        self.outcomes.push(outcome);
        Ok(self)
    }

    /// Append many `(weight, outcome)` pairs, in order.
    ///
    /// Either every pair is appended or, on the first invalid weight, none.
    pub fn add_many<I>(&mut self, pairs: I) -> Result<&mut Self, RandomizerError>
    where
        I: IntoIterator<Item = (f64, T)>,
    {
        let pairs = pairs.into_iter();
        let (lower, _) = pairs.size_hint();
        let mut weights = Vec::with_capacity(lower);
        let mut outcomes = Vec::with_capacity(lower);
        for (weight, outcome) in pairs {
            check_weight(self.weights.len() + weights.len(), weight)?;
            weights.push(weight);
            outcomes.push(outcome);
        }
        self.weights.append(&mut weights);
        self.outcomes.append(&mut outcomes);
        Ok(self)
    }

    /// Like [`add_many`](Self::add_many), for [`WeightedEntry`] values.
    pub fn add_entries<I>(&mut self, entries: I) -> Result<&mut Self, RandomizerError>
    where
        I: IntoIterator<Item = WeightedEntry<T>>,
    {
        self.add_many(entries.into_iter().map(|e| (e.weight, e.outcome)))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// The entries added so far, in insertion order.
    pub fn entries(&self) -> impl ExactSizeIterator<Item = WeightedEntry<&T>> + '_ {
        self.weights
            .iter()
            .zip(&self.outcomes)
            .map(|(&weight, outcome)| WeightedEntry { weight, outcome })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Build the alias table and freeze everything into a [`Sampler`]. O(n).
    ///
    /// # Errors
    /// * [`RandomizerError::InvalidDistribution`] for an empty builder.
    /// * [`RandomizerError::InvalidWeight`] for a zero or negative weight.
    ///
    /// On error nothing has been built and the builder comes back inside the
    /// [`PrepareError`].
    pub fn prepare(self) -> Result<Sampler<T, S>, PrepareError<T, S>>
    where
        S: RandomSource,
    {
        let table = AliasTable::new(&self.weights);
        match table {
            Ok(table) => Ok(Sampler::new(table, self.outcomes, self.source)),
            Err(error) => Err(PrepareError::new(self, error)),
        }
    }
}

impl<T: From<usize>, S> RandomizerBuilder<T, S> {
    /// Append an entry whose outcome is its zero-based insertion index.
    pub fn add_weight(&mut self, weight: f64) -> Result<&mut Self, RandomizerError> {
        let index = self.weights.len();
        self.add(weight, T::from(index))
    }

    /// Bulk [`add_weight`](Self::add_weight). All-or-nothing, like
    /// [`add_many`](Self::add_many).
    pub fn add_weights<I>(&mut self, weights: I) -> Result<&mut Self, RandomizerError>
    where
        I: IntoIterator<Item = f64>,
    {
        let start = self.weights.len();
        let pairs: Vec<(f64, T)> = weights
            .into_iter()
            .enumerate()
            .map(|(i, w)| (w, T::from(start + i)))
            .collect();
        self.add_many(pairs)
    }
}

fn check_weight(index: usize, weight: f64) -> Result<(), RandomizerError> {
    if weight.is_finite() {
        Ok(())
    } else {
        Err(RandomizerError::InvalidWeight { index, weight })
    }
}
