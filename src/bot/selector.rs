//! Exploration-range move selection

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::weights::ColumnWeights;
use crate::{Error, Result};

/// Picks uniformly among the legal columns whose weight lies within
/// `exploration_range` of the best legal weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveSelector {
    exploration_range: f64,
}

impl MoveSelector {
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] for a negative or non-finite range.
    pub fn new(exploration_range: f64) -> Result<Self> {
        if !exploration_range.is_finite() || exploration_range < 0.0 {
            return Err(Error::InvalidConfiguration {
                message: format!(
                    "exploration range must be finite and non-negative, got {exploration_range}"
                ),
            });
        }
        Ok(Self { exploration_range })
    }

    /// A selector that only ever plays arg-max columns
    pub fn greedy() -> Self {
        Self {
            exploration_range: 0.0,
        }
    }

    pub fn exploration_range(&self) -> f64 {
        self.exploration_range
    }

    /// Legal columns with `weights[c] >= max - exploration_range`, in ascending order.
    pub fn candidates(&self, weights: &ColumnWeights, legal_columns: &[usize]) -> Vec<usize> {
        let Some(max_weight) = legal_columns
            .iter()
            .map(|&c| weights[c])
            .max_by(|a, b| a.total_cmp(b))
        else {
            return Vec::new();
        };
        let threshold = max_weight - self.exploration_range;
        legal_columns
            .iter()
            .copied()
            .filter(|&c| weights[c] >= threshold)
            .collect()
    }

    /// Choose a column uniformly from the candidate set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoLegalMove`] when `legal_columns` is empty.
    pub fn select(
        &self,
        weights: &ColumnWeights,
        legal_columns: &[usize],
        rng: &mut impl Rng,
    ) -> Result<usize> {
        let candidates = self.candidates(weights, legal_columns);
        if candidates.is_empty() {
            return Err(Error::NoLegalMove);
        }
        Ok(candidates[rng.random_range(0..candidates.len())])
    }
}
