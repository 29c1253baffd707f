//! Generator configuration.

use crate::policy::WeightPolicy;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Parameters for building a [`crate::Grid`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridConfig {
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    /// Seed for the collapse RNG. A fixed seed and fixed dimensions
    /// reproduce the full resolution sequence.
    pub seed: u64,
    /// Candidate weighting used by every cell re-evaluation.
    pub weights: WeightPolicy,
}

impl GridConfig {
    /// Configuration with the given dimensions, seed 0 and default weights.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            seed: 0,
            weights: WeightPolicy::default(),
        }
    }

    /// Creates a new builder for `GridConfig`.
    #[must_use]
    pub fn builder() -> GridConfigBuilder {
        GridConfigBuilder::default()
    }
}

/// Builder for [`GridConfig`].
#[derive(Debug, Default)]
pub struct GridConfigBuilder {
    width: usize,
    height: usize,
    seed: u64,
    weights: Option<WeightPolicy>,
}

impl GridConfigBuilder {
    /// Sets the number of columns.
    #[must_use]
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Sets the number of rows.
    #[must_use]
    pub fn height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    /// Sets the seed for the collapse RNG.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Overrides the candidate weighting.
    #[must_use]
    pub fn weights(mut self, weights: WeightPolicy) -> Self {
        self.weights = Some(weights);
        self
    }

    /// Builds the `GridConfig` instance.
    #[must_use]
    pub fn build(self) -> GridConfig {
        GridConfig {
            width: self.width,
            height: self.height,
            seed: self.seed,
            weights: self.weights.unwrap_or_default(),
        }
    }
}
