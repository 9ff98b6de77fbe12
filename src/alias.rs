//! Vose's alias method for O(1) sampling from a discrete distribution.

use std::collections::VecDeque;

use rand::Rng;

use crate::error::RandomizerError;
use crate::source::RandomSource;

/// Alias table for discrete distribution sampling.
///
/// Column `i` keeps outcome `i` with probability `prob[i]` and hands the rest
/// of its mass to `alias[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct AliasTable {
    prob: Vec<f64>,
    alias: Vec<usize>,
}

impl AliasTable {
    /// Construct an alias table from strictly positive weights. O(n).
    ///
    /// The weights are read, never modified; normalisation happens on a copy.
    ///
    /// # Errors
    /// * [`RandomizerError::InvalidDistribution`] if `weights` is empty.
    /// * [`RandomizerError::InvalidWeight`] for the first weight that is not a
    ///   finite number greater than zero.
    pub fn new(weights: &[f64]) -> Result<Self, RandomizerError> {
        let n = weights.len();
        if n == 0 {
            return Err(RandomizerError::InvalidDistribution("no entries"));
        }

        let mut max = 0.0f64;
        for (index, &weight) in weights.iter().enumerate() {
            if !(weight > 0.0 && weight.is_finite()) {
                return Err(RandomizerError::InvalidWeight { index, weight });
            }
            max = max.max(weight);
        }

        // Relative to the largest weight every term is in (0, 1], so the sum
        // lies in [1, n] and neither it nor the division below can overflow.
        let mut scaled: Vec<f64> = weights.iter().map(|&w| w / max).collect();
        let sum: f64 = scaled.iter().sum();

        // Mean of the scaled weights is 1.
        let scale = n as f64 / sum;
        for p in &mut scaled {
            *p *= scale;
        }

        // Exact columns, and anything left over at the end, keep probability 1
        // and alias themselves.
        let mut prob = vec![1.0f64; n];
        let mut alias: Vec<usize> = (0..n).collect();

        let mut underfull = VecDeque::with_capacity(n);
        let mut overfull = VecDeque::with_capacity(n);
        for (i, &p) in scaled.iter().enumerate() {
            if p > 1.0 {
                overfull.push_back(i);
            } else if p < 1.0 {
                underfull.push_back(i);
            }
        }

        while let (Some(&u), Some(&o)) = (underfull.front(), overfull.front()) {
            underfull.pop_front();
            overfull.pop_front();

            prob[u] = scaled[u];
            alias[u] = o;
            scaled[o] -= 1.0 - scaled[u];

            if scaled[o] > 1.0 {
                overfull.push_back(o);
            } else if scaled[o] < 1.0 {
                underfull.push_back(o);
            }
        }

        // Whatever remains in either queue is rounding error; those columns
        // are already full.
        Ok(Self { prob, alias })
    }

    /// Draw a single index in O(1): exactly one `index` and one `uniform`
    /// draw from `source`.
    #[inline]
    pub fn sample_index<S: RandomSource + ?Sized>(&self, source: &S) -> usize {
        let i = source.index(self.prob.len());
        let r = source.uniform();
        if r < self.prob[i] { i } else { self.alias[i] }
    }

    /// Same as [`sample_index`](Self::sample_index) with a plain `rand`
    /// generator, bypassing any [`RandomSource`].
    #[inline]
    pub fn sample_index_with<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let i = rng.random_range(0..self.prob.len());
        let r: f64 = rng.random();
        if r < self.prob[i] { i } else { self.alias[i] }
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.prob
    }

    pub fn aliases(&self) -> &[usize] {
        &self.alias
    }

    pub fn len(&self) -> usize {
        self.prob.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prob.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    /// Probability mass each outcome receives from the table, summed over all
    /// columns.
    fn implied_distribution(table: &AliasTable) -> Vec<f64> {
        let n = table.len();
        let mut mass = vec![0.0; n];
        for i in 0..n {
            mass[i] += table.prob[i] / n as f64;
            mass[table.alias[i]] += (1.0 - table.prob[i]) / n as f64;
        }
        mass
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(matches!(
            AliasTable::new(&[]),
            Err(RandomizerError::InvalidDistribution(_))
        ));
        assert!(matches!(
            AliasTable::new(&[1.0, 0.0]),
            Err(RandomizerError::InvalidWeight { index: 1, .. })
        ));
        assert!(matches!(
            AliasTable::new(&[-0.1, 0.2]),
            Err(RandomizerError::InvalidWeight { index: 0, .. })
        ));
        assert!(matches!(
            AliasTable::new(&[1.0, f64::NAN]),
            Err(RandomizerError::InvalidWeight { index: 1, .. })
        ));
        assert!(matches!(
            AliasTable::new(&[f64::INFINITY]),
            Err(RandomizerError::InvalidWeight { index: 0, .. })
        ));
    }

    #[test]
    fn extreme_magnitudes_normalise() {
        let table = AliasTable::new(&[f64::from_bits(1)]).unwrap();
        assert_eq!(table.probabilities(), &[1.0]);

        let table = AliasTable::new(&[1e-310, 1e-310]).unwrap();
        assert_eq!(table.probabilities(), &[1.0, 1.0]);

        // The plain sum overflows to infinity.
        let table = AliasTable::new(&[f64::MAX, f64::MAX]).unwrap();
        assert_eq!(table.probabilities(), &[1.0, 1.0]);

        let table = AliasTable::new(&[f64::MAX, f64::MAX / 2.0, f64::MAX / 2.0]).unwrap();
        let mass = implied_distribution(&table);
        for (m, want) in mass.iter().zip([0.5, 0.25, 0.25]) {
            assert!((m - want).abs() < 1e-12, "mass={mass:?}");
        }

        let table = AliasTable::new(&[f64::MAX, f64::from_bits(1)]).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.probabilities()[1] < 1e-300);
    }

    #[test]
    fn table_reproduces_weights() {
        let weights = [1.6, 4.4, 14.0, 0.25, 3.0, 3.0, 9.75];
        let table = AliasTable::new(&weights).unwrap();
        let sum: f64 = weights.iter().sum();

        for (i, (&w, m)) in weights.iter().zip(implied_distribution(&table)).enumerate() {
            assert!((w / sum - m).abs() < 1e-12, "i={i} want={} got={m}", w / sum);
        }
        assert!(table.prob.iter().all(|p| (0.0..=1.0).contains(p)));
        assert!(table.alias.iter().all(|&a| a < weights.len()));
    }

    #[test]
    fn exact_columns_are_self_aliased() {
        let table = AliasTable::new(&[2.0, 2.0, 2.0]).unwrap();
        assert_eq!(table.probabilities(), &[1.0, 1.0, 1.0]);
        assert_eq!(table.aliases(), &[0, 1, 2]);
    }

    #[test]
    fn overfull_column_is_reclassified() {
        // Column 0 starts overfull, donates to 1, turns underfull and then
        // borrows from 3 like any other underfull column.
        let weights = [3.0, 0.5, 0.5, 4.0];
        let table = AliasTable::new(&weights).unwrap();
        assert_eq!(table.aliases(), &[3, 0, 3, 3]);
        assert_eq!(table.probabilities(), &[0.75, 0.25, 0.25, 1.0]);

        let mass = implied_distribution(&table);
        for (w, m) in weights.iter().zip(mass) {
            assert!((w / 8.0 - m).abs() < 1e-12);
        }
    }

    #[test]
    fn roughly_matches_distribution() {
        let weights = [1.0, 2.0, 3.0, 4.0];
        let alias = AliasTable::new(&weights).unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let draws = 20_000usize;
        let mut counts = vec![0usize; weights.len()];
        for _ in 0..draws {
            counts[alias.sample_index_with(&mut rng)] += 1;
        }

        let sum_w: f64 = weights.iter().sum();
        for (i, &c) in counts.iter().enumerate() {
            let p = weights[i] / sum_w;
            let emp = c as f64 / draws as f64;
            assert!((emp - p).abs() < 0.02, "i={i} emp={emp} p={p}");
        }
    }

    #[test]
    fn degenerate_singleton() {
        let alias = AliasTable::new(&[5.0]).unwrap();
        let mut rng = rand::rng();
        for _ in 0..1000 {
            assert_eq!(alias.sample_index_with(&mut rng), 0);
        }
    }
}
