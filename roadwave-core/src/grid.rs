//! The tilemap core: cell storage and the entropy-ordered worklist.

use crate::{
    config::GridConfig, neighbors::Neighbors, policy::WeightPolicy, tile::Tile, GridError,
};
use float_ord::FloatOrd;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use roadwave_tiles::TileId;

/// Result of a single [`Grid::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// One cell resolved and its neighbors were re-evaluated.
    Collapsed {
        /// Column of the resolved cell.
        x: usize,
        /// Row of the resolved cell.
        y: usize,
        /// The variant it resolved to.
        state: TileId,
    },
    /// The lowest-entropy cell had no feasible candidates left. It has been
    /// dropped from the worklist and stays permanently unresolved.
    Contradiction {
        /// Column of the stalled cell.
        x: usize,
        /// Row of the stalled cell.
        y: usize,
    },
    /// Every cell has left the worklist; the grid no longer changes.
    Complete,
}

/// Owns the `width x height` cells and drives one resolve-and-propagate step
/// per [`Grid::tick`].
///
/// Cells are created once at construction and never added or removed. The
/// worklist holds every unresolved cell, ascending by entropy; it shrinks by
/// exactly one entry per non-complete tick.
#[derive(Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Tile>,
    /// Indices of unresolved cells, ascending by entropy. Stable sorting
    /// keeps row-major construction order among equal entropies, making the
    /// tie-break deterministic.
    worklist: Vec<usize>,
    policy: WeightPolicy,
    rng: StdRng,
}

impl Grid {
    /// Builds a fully seeded, fully unresolved grid.
    ///
    /// Every cell gets its initial distribution from an `update` against the
    /// pristine board; with nothing resolved yet the seeding order is
    /// irrelevant.
    ///
    /// # Errors
    ///
    /// [`GridError::ZeroDimension`] if either dimension is zero.
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        let GridConfig {
            width,
            height,
            seed,
            weights,
        } = config;
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension(width, height));
        }

        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(Tile::new(x, y));
            }
        }

        let mut grid = Self {
            width,
            height,
            cells,
            worklist: (0..width * height).collect(),
            policy: weights,
            rng: StdRng::seed_from_u64(seed),
        };

        for index in 0..grid.cells.len() {
            grid.refresh_cell(index);
        }
        grid.sort_worklist();

        info!("seeded {width}x{height} grid (seed {seed})");
        Ok(grid)
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// The cell at the given coordinates, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<&Tile> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    /// Iterates all cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter()
    }

    /// Number of cells still awaiting resolution.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.worklist.len()
    }

    /// Returns true once the worklist is empty and further ticks are no-ops.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.worklist.is_empty()
    }

    /// Builds a fresh view of the four orthogonal neighbors of `(x, y)`.
    ///
    /// Out-of-grid positions are absent entries, never an error.
    #[must_use]
    pub fn neighbors(&self, x: usize, y: usize) -> Neighbors<'_> {
        Neighbors {
            up: y.checked_sub(1).and_then(|up_y| self.get(x, up_y)),
            left: x.checked_sub(1).and_then(|left_x| self.get(left_x, y)),
            down: self.get(x, y + 1),
            right: self.get(x + 1, y),
        }
    }

    /// Advances resolution by exactly one cell.
    ///
    /// Selects the unresolved cell with the lowest entropy, collapses it,
    /// re-evaluates its up-to-four neighbors against the more constrained
    /// board and re-sorts the worklist. A contradicted head cell is reported
    /// and dropped instead. No-ops once the grid is complete.
    pub fn tick(&mut self) -> TickOutcome {
        let Some(&index) = self.worklist.first() else {
            return TickOutcome::Complete;
        };
        let (x, y) = self.cells[index].position();

        let outcome = match self.cells[index].collapse(&mut self.rng) {
            Ok(state) => {
                debug!("collapsed ({x}, {y}) to {state:?}");
                TickOutcome::Collapsed { x, y, state }
            }
            Err(error) => {
                warn!("cell ({x}, {y}) stalled: {error}");
                TickOutcome::Contradiction { x, y }
            }
        };

        if matches!(outcome, TickOutcome::Collapsed { .. }) {
            let affected: Vec<usize> = self
                .neighbors(x, y)
                .iter()
                .flatten()
                .map(|neighbor| {
                    let (nx, ny) = neighbor.position();
                    ny * self.width + nx
                })
                .collect();
            for neighbor_index in affected {
                self.refresh_cell(neighbor_index);
            }
        }

        self.worklist.remove(0);
        self.sort_worklist();
        outcome
    }

    /// Re-runs `update` on one cell against its current neighbor view.
    fn refresh_cell(&mut self, index: usize) {
        let (x, y) = self.cells[index].position();
        // Take the cell out so the view over the rest of the board can be
        // borrowed while the cell mutates; the view never includes the cell
        // itself.
        let mut cell = std::mem::take(&mut self.cells[index]);
        cell.update(&self.neighbors(x, y), &self.policy);
        self.cells[index] = cell;
    }

    fn sort_worklist(&mut self) {
        let cells = &self.cells;
        self.worklist
            .sort_by_key(|&index| FloatOrd(cells[index].entropy()));
    }
}
