use std::fmt;

use crate::builder::RandomizerBuilder;

/// Everything that can go wrong while filling, preparing or sampling.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RandomizerError {
    /// A weight is NaN, infinite, zero or negative.
    #[error("invalid weight at index {index}: {weight}")]
    InvalidWeight { index: usize, weight: f64 },
    /// The weights as a whole cannot form a distribution (no entries).
    #[error("invalid distribution: {0}")]
    InvalidDistribution(&'static str),
    #[error("randomizer must be prepared before sampling")]
    NotPrepared,
    #[error("randomizer is prepared and can no longer be modified")]
    Frozen,
    #[error("sample count must be positive, got {count}")]
    InvalidCount { count: usize },
}

/// A failed [`RandomizerBuilder::prepare`].
///
/// The builder is handed back untouched so the caller can add entries and try
/// again.
pub struct PrepareError<T, S> {
    builder: RandomizerBuilder<T, S>,
    error: RandomizerError,
}

impl<T, S> PrepareError<T, S> {
    pub(crate) fn new(builder: RandomizerBuilder<T, S>, error: RandomizerError) -> Self {
        Self { builder, error }
    }

    pub fn error(&self) -> &RandomizerError {
        &self.error
    }

    pub fn into_builder(self) -> RandomizerBuilder<T, S> {
        self.builder
    }

    pub fn into_parts(self) -> (RandomizerBuilder<T, S>, RandomizerError) {
        (self.builder, self.error)
    }
}

impl<T, S> From<PrepareError<T, S>> for RandomizerError {
    fn from(err: PrepareError<T, S>) -> Self {
        err.error
    }
}

impl<T, S> fmt::Debug for PrepareError<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrepareError")
            .field("error", &self.error)
            .field("entries", &self.builder.len())
            .finish()
    }
}

impl<T, S> fmt::Display for PrepareError<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to prepare randomizer: {}", self.error)
    }
}

impl<T, S> std::error::Error for PrepareError<T, S> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
