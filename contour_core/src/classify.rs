//! Per-cell inside/outside and crossing classification.

use crate::topology::{corner_offset, CORNER_COUNT, EDGES};
use crate::types::{CellCoord, Point3};

/// Inside flags and crossing flags for the 8 corners of one cell.
///
/// Bit `i` of each mask refers to corner `i`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellClassification {
    inside: u8,
    crossing: u8,
}

impl CellClassification {
    /// Classify a cell from its 8 corner distances (in corner order).
    ///
    /// A corner is inside when its distance is `<= 0`. A corner is crossing when
    /// at least one of its edges joins it to a corner on the other side.
    pub fn from_distances(distances: &[f64; CORNER_COUNT]) -> Self {
        let mut inside = 0u8;
        for (i, &d) in distances.iter().enumerate() {
            if d <= 0.0 {
                inside |= 1 << i;
            }
        }
        Self::from_inside_mask(inside)
    }

    /// Classify a cell from a precomputed inside mask.
    pub fn from_inside_mask(inside: u8) -> Self {
        let mut crossing = 0u8;
        if inside != 0 && inside != u8::MAX {
            for &(a, b) in &EDGES {
                if (inside >> a & 1) != (inside >> b & 1) {
                    crossing |= (1 << a) | (1 << b);
                }
            }
        }
        Self { inside, crossing }
    }

    /// Bit mask of inside corners.
    #[inline]
    pub const fn inside_mask(&self) -> u8 {
        self.inside
    }

    /// Bit mask of crossing corners.
    #[inline]
    pub const fn crossing_mask(&self) -> u8 {
        self.crossing
    }

    /// Bit mask of corners that are both inside and crossing.
    #[inline]
    pub const fn candidate_mask(&self) -> u8 {
        self.inside & self.crossing
    }

    /// Number of inside corners.
    #[inline]
    pub const fn inside_count(&self) -> u32 {
        self.inside.count_ones()
    }

    /// True when every corner is inside or every corner is outside.
    ///
    /// Such cells contain no surface and emit no geometry.
    #[inline]
    pub const fn is_trivial(&self) -> bool {
        self.inside == 0 || self.inside == u8::MAX
    }

    /// Whether corner `i` is inside. False for indices past the last corner.
    #[inline]
    pub const fn is_inside(&self, corner: usize) -> bool {
        mask_bit(self.inside, corner)
    }

    /// Whether corner `i` touches a sign-changing edge. False for indices past
    /// the last corner.
    #[inline]
    pub const fn is_crossing(&self, corner: usize) -> bool {
        mask_bit(self.crossing, corner)
    }

    /// Whether corner `i` can take part in a cluster (inside and crossing).
    /// False for indices past the last corner.
    #[inline]
    pub const fn is_candidate(&self, corner: usize) -> bool {
        mask_bit(self.candidate_mask(), corner)
    }

    /// Inside flags as an array.
    pub fn inside_flags(&self) -> [bool; CORNER_COUNT] {
        core::array::from_fn(|i| self.is_inside(i))
    }

    /// Crossing flags as an array.
    pub fn crossing_flags(&self) -> [bool; CORNER_COUNT] {
        core::array::from_fn(|i| self.is_crossing(i))
    }

    /// Indices of the inside corners, ascending.
    pub fn inside_corners(&self) -> impl Iterator<Item = usize> + '_ {
        (0..CORNER_COUNT).filter(move |&i| self.is_inside(i))
    }

    /// Indices of the sign-changing edges, ascending.
    pub fn crossing_edges(&self) -> impl Iterator<Item = usize> + '_ {
        (0..EDGES.len()).filter(move |&e| {
            let (a, b) = EDGES[e];
            self.is_inside(a) != self.is_inside(b)
        })
    }
}

#[inline]
const fn mask_bit(mask: u8, corner: usize) -> bool {
    corner < CORNER_COUNT && mask >> corner & 1 == 1
}

/// An inside corner reported by the debug enumeration query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsideCorner {
    /// Cell the corner was classified in.
    pub cell: CellCoord,
    /// Corner index within the cell.
    pub corner: usize,
    /// World-space position of the corner sample.
    pub position: Point3,
}

impl InsideCorner {
    /// Build the record for corner `corner` of `cell`.
    #[inline]
    pub fn new(cell: CellCoord, corner: usize) -> Self {
        Self {
            cell,
            corner,
            position: cell.to_point() + corner_offset(corner),
        }
    }
}
