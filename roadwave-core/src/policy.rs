//! Tunable weighting for the candidate distribution.

use roadwave_tiles::TileFlags;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Weight curve applied whenever a cell re-evaluates its candidates.
///
/// The defaults reproduce the stock look of the generator: grass-dominated
/// fields with sparse roads that resist clustering, favoring long straight
/// runs over dead ends.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WeightPolicy {
    /// Baseline weight of the grass candidate.
    pub grass_weight: f32,
    /// Exponent of the road density falloff: the base road weight at `n`
    /// resolved road neighbors is `(n + 1)^-road_falloff`.
    pub road_falloff: f32,
    /// Multiplier for through pieces, i.e. variants whose connectors form an
    /// opposite pair or all four sides (the two straights and the cross).
    pub through_bonus: f32,
    /// Multiplier for single-connector dead-end pieces.
    pub stub_penalty: f32,
}

impl Default for WeightPolicy {
    fn default() -> Self {
        Self {
            grass_weight: 40.0,
            road_falloff: 3.0,
            through_bonus: 10.0,
            stub_penalty: 0.1,
        }
    }
}

impl WeightPolicy {
    /// Base weight of every road candidate at the given count of resolved
    /// road neighbors.
    ///
    /// Monotonically decreasing in the neighbor count and saturating toward
    /// zero, never negative.
    #[must_use]
    pub fn road_base_weight(&self, road_neighbors: usize) -> f32 {
        (road_neighbors as f32 + 1.0).powf(-self.road_falloff)
    }

    /// Weight of one road variant at the given neighbor density.
    #[must_use]
    pub fn road_weight(&self, flags: TileFlags, road_neighbors: usize) -> f32 {
        self.road_base_weight(road_neighbors) * self.shape_multiplier(flags)
    }

    fn shape_multiplier(&self, flags: TileFlags) -> f32 {
        let connectors = flags.connectors();
        let through = connectors == (TileFlags::CONNECTS_LEFT | TileFlags::CONNECTS_RIGHT)
            || connectors == (TileFlags::CONNECTS_TOP | TileFlags::CONNECTS_BOTTOM)
            || connectors == TileFlags::CONNECTS_ALL;

        if through {
            self.through_bonus
        } else if connectors.count() == 1 {
            self.stub_penalty
        } else {
            1.0
        }
    }
}
