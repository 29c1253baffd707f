//! Static catalog of tile variants for the road/grass tilemap generator.
//!
//! Every drawable variant is a [`TileState`]: an atlas coordinate (opaque to
//! the resolution engine) plus a [`TileFlags`] bitset describing which edges
//! carry a road connector. Variants are identified by small integer
//! [`TileId`]s into the process-wide [`TileCatalog`], which is built once and
//! never mutated.

pub mod catalog;
pub mod types;

pub use crate::catalog::{catalog, TileCatalog};
pub use crate::types::{Direction, TileFlags, TileId, TileState};
