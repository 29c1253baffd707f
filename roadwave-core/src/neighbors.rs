//! Transient four-directional view of adjacent cells.

use crate::tile::Tile;
use roadwave_tiles::{catalog, Direction, TileFlags};

/// Read-only references to the orthogonal neighbors of one cell.
///
/// Absent entries are positions outside the grid. The view never owns its
/// tiles; it is rebuilt from coordinates on every query and must not be
/// cached.
#[derive(Debug, Clone, Copy, Default)]
pub struct Neighbors<'a> {
    /// The cell above, toward decreasing y.
    pub up: Option<&'a Tile>,
    /// The cell to the left, toward decreasing x.
    pub left: Option<&'a Tile>,
    /// The cell below, toward increasing y.
    pub down: Option<&'a Tile>,
    /// The cell to the right, toward increasing x.
    pub right: Option<&'a Tile>,
}

impl<'a> Neighbors<'a> {
    /// The neighbor in the given direction, if inside the grid.
    #[must_use]
    pub const fn get(&self, direction: Direction) -> Option<&'a Tile> {
        match direction {
            Direction::Up => self.up,
            Direction::Left => self.left,
            Direction::Down => self.down,
            Direction::Right => self.right,
        }
    }

    /// Iterates the four slots in fixed (up, left, down, right) order.
    pub fn iter(&self) -> impl Iterator<Item = Option<&'a Tile>> {
        [self.up, self.left, self.down, self.right].into_iter()
    }

    /// Number of neighbors that have resolved to a road variant.
    #[must_use]
    pub fn resolved_road_count(&self) -> usize {
        self.iter()
            .flatten()
            .filter_map(Tile::resolved_state)
            .filter(|&id| catalog().flags(id).contains(TileFlags::IS_ROAD))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadwave_tiles::catalog::{GRASS, ROAD_HOR, ROAD_VERT};

    #[test]
    fn road_count_ignores_unresolved_absent_and_grass() {
        let road_a = Tile::resolved_at(0, 0, ROAD_HOR);
        let road_b = Tile::resolved_at(1, 0, ROAD_VERT);
        let grass = Tile::resolved_at(2, 0, GRASS);
        let pending = Tile::new(3, 0);

        let neighbors = Neighbors {
            up: Some(&road_a),
            left: Some(&road_b),
            down: Some(&grass),
            right: Some(&pending),
        };
        assert_eq!(neighbors.resolved_road_count(), 2);

        assert_eq!(Neighbors::default().resolved_road_count(), 0);
    }

    #[test]
    fn get_matches_the_named_slots() {
        let tile = Tile::new(1, 1);
        let neighbors = Neighbors {
            up: Some(&tile),
            ..Neighbors::default()
        };
        assert!(neighbors.get(Direction::Up).is_some());
        assert!(neighbors.get(Direction::Down).is_none());
        assert_eq!(neighbors.iter().flatten().count(), 1);
    }
}
