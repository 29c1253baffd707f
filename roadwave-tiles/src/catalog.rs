//! The fixed road/grass variant table.
//!
//! The catalog enumerates two decorative ground variants and fifteen road
//! pieces covering every non-empty combination of the four edge connectors.
//! Full coverage matters: whatever mix of demanded and forbidden edges a
//! cell's resolved neighbors impose, at least one variant remains feasible.

use crate::types::{TileFlags, TileId, TileState};
use once_cell::sync::Lazy;

/// Plain grass, no connectors.
pub const GRASS: TileId = TileId(0);
/// Flower patch, no connectors. Catalog-only; never seeded as a candidate.
pub const FLOWERS: TileId = TileId(1);
/// West dead end of a horizontal road.
pub const ROAD_END_LEFT: TileId = TileId(2);
/// Horizontal through segment.
pub const ROAD_HOR: TileId = TileId(3);
/// East dead end of a horizontal road.
pub const ROAD_END_RIGHT: TileId = TileId(4);
/// North dead end of a vertical road.
pub const ROAD_END_TOP: TileId = TileId(5);
/// Vertical through segment.
pub const ROAD_VERT: TileId = TileId(6);
/// South dead end of a vertical road.
pub const ROAD_END_BOTTOM: TileId = TileId(7);
/// Corner turning between the bottom and right edges.
pub const ROAD_CORNER_TOP_LEFT: TileId = TileId(8);
/// T-junction open to the left, bottom and right.
pub const ROAD_TEE_TOP: TileId = TileId(9);
/// Corner turning between the bottom and left edges.
pub const ROAD_CORNER_TOP_RIGHT: TileId = TileId(10);
/// T-junction open to the top, bottom and right.
pub const ROAD_TEE_LEFT: TileId = TileId(11);
/// Four-way crossing.
pub const ROAD_CROSS: TileId = TileId(12);
/// T-junction open to the top, bottom and left.
pub const ROAD_TEE_RIGHT: TileId = TileId(13);
/// Corner turning between the top and right edges.
pub const ROAD_CORNER_BOTTOM_LEFT: TileId = TileId(14);
/// T-junction open to the left, top and right.
pub const ROAD_TEE_BOTTOM: TileId = TileId(15);
/// Corner turning between the top and left edges.
pub const ROAD_CORNER_BOTTOM_RIGHT: TileId = TileId(16);

/// The full variant table, indexed by [`TileId`].
///
/// Built once at first use and never mutated afterwards; variants compare by
/// id.
#[derive(Debug)]
pub struct TileCatalog {
    states: Vec<TileState>,
}

impl TileCatalog {
    fn build() -> Self {
        use TileFlags as F;

        let road = F::IS_ROAD;
        let mut states = Vec::new();
        let mut add = |atlas: (u32, u32), flags: TileFlags| {
            states.push(TileState { atlas, flags });
        };

        add((0, 0), F::NONE); // GRASS
        add((2, 2), F::NONE); // FLOWERS

        add((5, 0), road | F::CONNECTS_RIGHT); // ROAD_END_LEFT
        add((6, 0), road | F::CONNECTS_LEFT | F::CONNECTS_RIGHT); // ROAD_HOR
        add((7, 0), road | F::CONNECTS_LEFT); // ROAD_END_RIGHT

        add((4, 1), road | F::CONNECTS_BOTTOM); // ROAD_END_TOP
        add((4, 2), road | F::CONNECTS_TOP | F::CONNECTS_BOTTOM); // ROAD_VERT
        add((4, 3), road | F::CONNECTS_TOP); // ROAD_END_BOTTOM

        add((5, 1), road | F::CONNECTS_BOTTOM | F::CONNECTS_RIGHT); // ROAD_CORNER_TOP_LEFT
        add(
            (6, 1),
            road | F::CONNECTS_LEFT | F::CONNECTS_BOTTOM | F::CONNECTS_RIGHT,
        ); // ROAD_TEE_TOP
        add((7, 1), road | F::CONNECTS_LEFT | F::CONNECTS_BOTTOM); // ROAD_CORNER_TOP_RIGHT

        add(
            (5, 2),
            road | F::CONNECTS_TOP | F::CONNECTS_BOTTOM | F::CONNECTS_RIGHT,
        ); // ROAD_TEE_LEFT
        add((6, 2), road | F::CONNECTS_ALL); // ROAD_CROSS
        add(
            (7, 2),
            road | F::CONNECTS_TOP | F::CONNECTS_BOTTOM | F::CONNECTS_LEFT,
        ); // ROAD_TEE_RIGHT

        add((5, 3), road | F::CONNECTS_TOP | F::CONNECTS_RIGHT); // ROAD_CORNER_BOTTOM_LEFT
        add(
            (6, 3),
            road | F::CONNECTS_LEFT | F::CONNECTS_TOP | F::CONNECTS_RIGHT,
        ); // ROAD_TEE_BOTTOM
        add((7, 3), road | F::CONNECTS_LEFT | F::CONNECTS_TOP); // ROAD_CORNER_BOTTOM_RIGHT

        Self { states }
    }

    /// The variant for the given id, or `None` if the id is out of range.
    #[must_use]
    pub fn get(&self, id: TileId) -> Option<&TileState> {
        self.states.get(id.0)
    }

    /// The flags of the given variant. Unknown ids report no capabilities.
    #[must_use]
    pub fn flags(&self, id: TileId) -> TileFlags {
        self.get(id).map_or(TileFlags::NONE, |state| state.flags)
    }

    /// Number of variants in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if the table holds no variants.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// All variants paired with their ids, in id order.
    pub fn states(&self) -> impl Iterator<Item = (TileId, &TileState)> {
        self.states
            .iter()
            .enumerate()
            .map(|(index, state)| (TileId(index), state))
    }

    /// The road-flagged subset of the table, in id order.
    pub fn road_states(&self) -> impl Iterator<Item = (TileId, &TileState)> {
        self.states().filter(|(_, state)| state.is_road())
    }
}

/// Returns the process-wide catalog, built on first use.
#[must_use]
pub fn catalog() -> &'static TileCatalog {
    static CATALOG: Lazy<TileCatalog> = Lazy::new(TileCatalog::build);
    &CATALOG
}
