//! A single grid cell and its candidate distribution.

use crate::{neighbors::Neighbors, policy::WeightPolicy, CollapseError};
use log::trace;
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use roadwave_tiles::{catalog, Direction, TileFlags, TileId};

/// Entropy sentinel for a cell whose candidate list has emptied.
///
/// An empty distribution has no defined Shannon entropy; this sentinel keeps
/// the ordering total (no NaN from a zero-weight division) and sorts the
/// contradicted cell to the front of the worklist so the next tick surfaces
/// it instead of leaving it buried.
pub const CONTRADICTION_ENTROPY: f32 = f32::NEG_INFINITY;

/// One weighted entry in a cell's candidate distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Relative weight; strictly positive while the owning cell is
    /// unresolved.
    pub weight: f32,
    /// Catalog id of the variant.
    pub state: TileId,
}

/// A grid cell holding a probability distribution over variants until
/// resolved.
///
/// A cell transitions `Unresolved -> Resolved` exactly once. The resolved
/// variant never changes afterwards, and the candidate list and entropy stop
/// being meaningful.
#[derive(Debug, Clone, Default)]
pub struct Tile {
    position: (usize, usize),
    candidates: Vec<Candidate>,
    entropy: f32,
    resolved: Option<TileId>,
}

impl Tile {
    pub(crate) fn new(x: usize, y: usize) -> Self {
        Self {
            position: (x, y),
            candidates: Vec::new(),
            entropy: 0.0,
            resolved: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn resolved_at(x: usize, y: usize, state: TileId) -> Self {
        Self {
            position: (x, y),
            candidates: Vec::new(),
            entropy: 0.0,
            resolved: Some(state),
        }
    }

    /// Grid coordinates of this cell.
    #[must_use]
    pub const fn position(&self) -> (usize, usize) {
        self.position
    }

    /// Returns true once the cell has resolved to a single variant.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// The resolved variant, or `None` while the cell is still a
    /// distribution.
    #[must_use]
    pub const fn resolved_state(&self) -> Option<TileId> {
        self.resolved
    }

    /// Returns true if the cell is unresolved and no feasible candidates
    /// remain, meaning it can never resolve.
    #[must_use]
    pub fn is_contradicted(&self) -> bool {
        self.resolved.is_none() && self.candidates.is_empty()
    }

    /// The current candidate distribution, in seeding order.
    ///
    /// Empty once the cell has resolved.
    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Shannon entropy (bits) over the normalized candidate weights.
    ///
    /// Exactly `0.0` with a single candidate, [`CONTRADICTION_ENTROPY`] with
    /// none.
    #[must_use]
    pub const fn entropy(&self) -> f32 {
        self.entropy
    }

    /// Sum of all candidate weights.
    #[must_use]
    pub fn total_weight(&self) -> f32 {
        self.candidates.iter().map(|c| c.weight).sum()
    }

    /// Recomputes the candidate distribution from the current neighbor state.
    ///
    /// Seeds grass plus every road variant weighted by the policy, then
    /// enforces road continuity against each resolved neighbor: an exposed
    /// connector on the shared edge demands the reciprocal connector, and a
    /// non-connecting edge forbids one. Unresolved or absent neighbors impose
    /// no constraint. Resolved cells ignore the call; their state is
    /// terminal.
    pub(crate) fn update(&mut self, neighbors: &Neighbors<'_>, policy: &WeightPolicy) {
        if self.resolved.is_some() {
            return;
        }

        let table = catalog();
        let road_neighbors = neighbors.resolved_road_count();

        let mut result = Vec::with_capacity(table.len());
        result.push(Candidate {
            weight: policy.grass_weight,
            state: roadwave_tiles::catalog::GRASS,
        });
        for (id, state) in table.road_states() {
            result.push(Candidate {
                weight: policy.road_weight(state.flags, road_neighbors),
                state: id,
            });
        }

        for direction in Direction::ALL {
            let Some(resolved) = neighbors.get(direction).and_then(Tile::resolved_state) else {
                continue;
            };
            let neighbor_flags = table.flags(resolved);
            // Connector the neighbor exposes on the shared edge, and the
            // reciprocal connector this cell would have to expose back.
            let toward_us = direction.opposite().connector();
            let toward_them = direction.connector();

            if neighbor_flags.contains(TileFlags::IS_ROAD.union(toward_us)) {
                result.retain(|candidate| table.flags(candidate.state).contains(toward_them));
            } else {
                result.retain(|candidate| {
                    let flags = table.flags(candidate.state);
                    !flags.contains(TileFlags::IS_ROAD.union(toward_them))
                });
            }
        }

        self.candidates = result;
        self.entropy = shannon_entropy(&self.candidates);
        trace!(
            "cell {:?} re-evaluated: {} candidates, entropy {}",
            self.position,
            self.candidates.len(),
            self.entropy
        );
    }

    /// Resolves the cell to a single variant by a weighted random draw.
    ///
    /// # Errors
    ///
    /// [`CollapseError::NoCandidates`] when the candidate list is empty, and
    /// [`CollapseError::WeightedChoice`] when the weights do not form a valid
    /// distribution.
    pub(crate) fn collapse<R: Rng>(&mut self, rng: &mut R) -> Result<TileId, CollapseError> {
        if self.candidates.is_empty() {
            let (x, y) = self.position;
            return Err(CollapseError::NoCandidates { x, y });
        }

        let weights = WeightedIndex::new(self.candidates.iter().map(|c| c.weight))?;
        let chosen = self.candidates[weights.sample(rng)].state;

        self.resolved = Some(chosen);
        // The distribution is dead weight from here on.
        self.candidates = Vec::new();
        self.entropy = 0.0;
        Ok(chosen)
    }
}

/// Shannon entropy (bits) of the normalized candidate weights.
fn shannon_entropy(candidates: &[Candidate]) -> f32 {
    match candidates.len() {
        0 => CONTRADICTION_ENTROPY,
        1 => 0.0,
        _ => {
            let total: f32 = candidates.iter().map(|c| c.weight).sum();
            candidates
                .iter()
                .map(|candidate| {
                    let probability = candidate.weight / total;
                    -probability * probability.log2()
                })
                .sum()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use roadwave_tiles::catalog::{GRASS, ROAD_HOR, ROAD_VERT};

    fn seeded_tile() -> Tile {
        let mut tile = Tile::new(0, 0);
        tile.update(&Neighbors::default(), &WeightPolicy::default());
        tile
    }

    #[test]
    fn entropy_of_uniform_pair_is_one_bit() {
        let pair = [
            Candidate {
                weight: 1.0,
                state: TileId(0),
            },
            Candidate {
                weight: 1.0,
                state: TileId(1),
            },
        ];
        assert!((shannon_entropy(&pair) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn entropy_of_weighted_pair() {
        // p = 1/4 and 3/4: H = -(1/4 log2 1/4 + 3/4 log2 3/4) = 0.8112929
        let pair = [
            Candidate {
                weight: 1.0,
                state: TileId(0),
            },
            Candidate {
                weight: 3.0,
                state: TileId(1),
            },
        ];
        assert!((shannon_entropy(&pair) - 0.811_292_9).abs() < 1e-5);
    }

    #[test]
    fn entropy_edge_cases_are_explicit() {
        let single = [Candidate {
            weight: 7.5,
            state: TileId(0),
        }];
        assert_eq!(shannon_entropy(&single), 0.0);

        let empty_entropy = shannon_entropy(&[]);
        assert!(empty_entropy.is_infinite() && empty_entropy.is_sign_negative());
        assert!(!empty_entropy.is_nan());
    }

    #[test]
    fn unconstrained_update_seeds_grass_and_all_roads() {
        let tile = seeded_tile();
        assert!(!tile.is_resolved());
        assert_eq!(tile.candidates().len(), 16);
        assert!(tile.entropy() > 0.0);

        let grass = tile.candidates()[0];
        assert_eq!(grass.state, GRASS);
        assert!((grass.weight - 40.0).abs() < f32::EPSILON);
        assert!(tile.candidates().iter().all(|c| c.weight > 0.0));
        // grass 40 + through 3x10 + plain 8x1 + dead ends 4x0.1
        assert!((tile.total_weight() - 78.4).abs() < 1e-4);
    }

    #[test]
    fn resolved_road_neighbor_demands_the_reciprocal_connector() {
        let right = Tile::resolved_at(1, 0, ROAD_HOR);
        let neighbors = Neighbors {
            right: Some(&right),
            ..Neighbors::default()
        };

        let mut tile = Tile::new(0, 0);
        tile.update(&neighbors, &WeightPolicy::default());

        // Only road pieces exposing a right-edge connector survive; grass is
        // out.
        assert_eq!(tile.candidates().len(), 8);
        let table = catalog();
        assert!(tile.candidates().iter().all(|c| {
            table
                .flags(c.state)
                .contains(TileFlags::IS_ROAD | TileFlags::CONNECTS_RIGHT)
        }));
    }

    #[test]
    fn resolved_grass_neighbor_forbids_a_dangling_stub() {
        let right = Tile::resolved_at(1, 0, GRASS);
        let neighbors = Neighbors {
            right: Some(&right),
            ..Neighbors::default()
        };

        let mut tile = Tile::new(0, 0);
        tile.update(&neighbors, &WeightPolicy::default());

        // Grass plus the road pieces without a right-edge connector.
        assert_eq!(tile.candidates().len(), 8);
        let table = catalog();
        assert!(tile
            .candidates()
            .iter()
            .any(|candidate| candidate.state == GRASS));
        assert!(!tile.candidates().iter().any(|c| {
            table
                .flags(c.state)
                .contains(TileFlags::IS_ROAD | TileFlags::CONNECTS_RIGHT)
        }));
    }

    #[test]
    fn opposing_constraints_intersect() {
        // A road pointing at us from the right, grass above: survivors need a
        // right connector and must not have a top connector.
        let right = Tile::resolved_at(1, 1, ROAD_HOR);
        let up = Tile::resolved_at(0, 0, GRASS);
        let neighbors = Neighbors {
            right: Some(&right),
            up: Some(&up),
            ..Neighbors::default()
        };

        let mut tile = Tile::new(0, 1);
        tile.update(&neighbors, &WeightPolicy::default());

        let table = catalog();
        assert!(!tile.candidates().is_empty());
        for candidate in tile.candidates() {
            let flags = table.flags(candidate.state);
            assert!(flags.contains(TileFlags::CONNECTS_RIGHT));
            assert!(!flags.contains(TileFlags::CONNECTS_TOP));
        }
    }

    #[test]
    fn update_after_resolution_is_ignored() {
        let mut tile = seeded_tile();
        let mut rng = StdRng::seed_from_u64(3);
        let chosen = tile.collapse(&mut rng).expect("non-empty candidates");

        tile.update(&Neighbors::default(), &WeightPolicy::default());
        assert_eq!(tile.resolved_state(), Some(chosen));
        assert!(tile.candidates().is_empty());
    }

    #[test]
    fn collapse_on_empty_candidates_fails_explicitly() {
        let mut tile = Tile::new(4, 2);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            tile.collapse(&mut rng),
            Err(CollapseError::NoCandidates { x: 4, y: 2 })
        );
        assert!(tile.is_contradicted());
    }

    #[test]
    fn collapse_is_deterministic_for_a_fixed_seed() {
        let draw = |seed: u64| {
            let mut tile = seeded_tile();
            let mut rng = StdRng::seed_from_u64(seed);
            tile.collapse(&mut rng).expect("non-empty candidates")
        };
        assert_eq!(draw(42), draw(42));
    }

    #[test]
    fn collapse_respects_a_forced_candidate() {
        let right = Tile::resolved_at(1, 0, ROAD_VERT);
        let neighbors = Neighbors {
            right: Some(&right),
            ..Neighbors::default()
        };

        // A vertical road to the right presents no left-edge connector, so
        // every right-connecting road piece is removed but grass survives.
        let mut tile = Tile::new(0, 0);
        tile.update(&neighbors, &WeightPolicy::default());
        assert!(tile.candidates().iter().any(|c| c.state == GRASS));

        let mut rng = StdRng::seed_from_u64(11);
        let chosen = tile.collapse(&mut rng).expect("non-empty candidates");
        assert!(tile.is_resolved());
        assert_eq!(tile.resolved_state(), Some(chosen));
    }
}
