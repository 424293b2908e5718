//! Unit-cell topology lookup tables.
//!
//! The corner order is x-major: corner `i` has offset `(i >> 2 & 1, i >> 1 & 1, i & 1)`.
//!
//! ```text
//! Corner:  0      1      2      3      4      5      6      7
//! Offset: (0,0,0)(0,0,1)(0,1,0)(0,1,1)(1,0,0)(1,0,1)(1,1,0)(1,1,1)
//! ```
//!
//! Every edge joins two corners that differ in exactly one axis.

use crate::types::Point3;

/// Number of corners of a cell.
pub const CORNER_COUNT: usize = 8;

/// Number of edges of a cell.
pub const EDGE_COUNT: usize = 12;

/// Integer offset of each corner from the cell origin.
pub const CORNER_OFFSETS: [(usize, usize, usize); CORNER_COUNT] = [
    (0, 0, 0),
    (0, 0, 1),
    (0, 1, 0),
    (0, 1, 1),
    (1, 0, 0),
    (1, 0, 1),
    (1, 1, 0),
    (1, 1, 1),
];

/// Corner index pairs for the 12 cell edges.
pub const EDGES: [(usize, usize); EDGE_COUNT] = [
    (0, 1),
    (0, 2),
    (0, 4),
    (1, 3),
    (1, 5),
    (2, 3),
    (2, 6),
    (3, 7),
    (4, 5),
    (4, 6),
    (5, 7),
    (6, 7),
];

/// Centre of the unit cell in cell-local space.
pub const CELL_CENTER: Point3 = Point3::splat(0.5);

/// Offset of a corner as a vector in cell-local space.
///
/// The index is taken modulo [`CORNER_COUNT`].
#[inline]
pub fn corner_offset(corner: usize) -> Point3 {
    let (x, y, z) = CORNER_OFFSETS[corner & 7];
    Point3::new(x as f64, y as f64, z as f64)
}

/// Unit direction from the cell centre towards a corner.
#[inline]
pub fn corner_direction(corner: usize) -> Point3 {
    (corner_offset(corner) - CELL_CENTER).normalize()
}

/// Convert a corner offset tuple back to its corner index.
///
/// This is the inverse of indexing [`CORNER_OFFSETS`].
#[inline]
pub const fn index_from_offset(offset: (usize, usize, usize)) -> usize {
    ((offset.0 & 1) << 2) | ((offset.1 & 1) << 1) | (offset.2 & 1)
}
