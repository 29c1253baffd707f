//! Core resolution engine for the incremental road/grass tilemap generator.
//!
//! Each cell of a [`Grid`] holds a weighted probability distribution over the
//! variant catalog from [`roadwave_tiles`]. Cells resolve one at a time in
//! ascending order of Shannon entropy: every [`Grid::tick`] collapses the
//! most certain unresolved cell to a single variant and re-evaluates its
//! orthogonal neighbors under the road-continuity constraints.
//!
//! The engine is single-threaded and synchronous; presentation, input and
//! persistence live in external collaborators that only read cell state.

use rand::distributions::WeightedError;
use thiserror::Error;

/// Generator configuration and its builder.
pub mod config;
/// Cell storage, the entropy-ordered worklist and the tick loop.
pub mod grid;
/// Transient four-directional neighbor views.
pub mod neighbors;
/// Tunable candidate weighting.
pub mod policy;
/// A single grid cell and its candidate distribution.
pub mod tile;

pub use crate::config::{GridConfig, GridConfigBuilder};
pub use crate::grid::{Grid, TickOutcome};
pub use crate::neighbors::Neighbors;
pub use crate::policy::WeightPolicy;
pub use crate::tile::{Candidate, Tile, CONTRADICTION_ENTROPY};

/// Errors raised while building a [`Grid`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// Both dimensions must be at least one cell.
    #[error("grid dimensions must be non-zero (got {0}x{1})")]
    ZeroDimension(usize, usize),
}

/// Errors raised while resolving a single cell.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CollapseError {
    /// The candidate list was empty; the cell is contradicted and can never
    /// resolve.
    #[error("no feasible candidates remain at ({x}, {y})")]
    NoCandidates {
        /// Column of the contradicted cell.
        x: usize,
        /// Row of the contradicted cell.
        y: usize,
    },
    /// The candidate weights did not form a valid distribution.
    #[error("weighted selection error: {0}")]
    WeightedChoice(#[from] WeightedError),
}
