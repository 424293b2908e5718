//! Storage abstraction for distance samples.
//!
//! The extractor only needs the grid extent and a way to read a sample, so
//! callers can extract from their own storage without copying into a
//! [`VoxelField`](crate::field::VoxelField).

use crate::error::{ContourError, Result};
use crate::field::FieldExtent;
use crate::topology::{CORNER_COUNT, CORNER_OFFSETS};
use crate::types::{CellCoord, VoxelCoord};

/// Trait for types that provide signed-distance samples on a regular grid.
///
/// Implementors must return `Some` for every coordinate inside
/// [`SampleProvider::extent`].
pub trait SampleProvider {
    /// Number of samples along each axis.
    fn extent(&self) -> FieldExtent;

    /// The signed distance at a sample coordinate.
    ///
    /// # Returns
    /// * `Some(distance)` - The sample value
    /// * `None` - If the coordinate is outside the grid
    fn distance(&self, coord: VoxelCoord) -> Option<f64>;

    /// The distances at the 8 corners of a cell, in corner order.
    ///
    /// # Errors
    /// Returns `CoordOutOfBounds` for the first corner outside the grid.
    #[inline]
    fn cell_distances(&self, cell: CellCoord) -> Result<[f64; CORNER_COUNT]> {
        let mut out = [0.0; CORNER_COUNT];
        for (slot, &offset) in out.iter_mut().zip(CORNER_OFFSETS.iter()) {
            let coord = cell.corner(offset);
            *slot = self
                .distance(coord)
                .ok_or(ContourError::CoordOutOfBounds {
                    x: coord.x,
                    y: coord.y,
                    z: coord.z,
                    extent: self.extent(),
                })?;
        }
        Ok(out)
    }
}

impl<T: SampleProvider + ?Sized> SampleProvider for &T {
    #[inline]
    fn extent(&self) -> FieldExtent {
        (**self).extent()
    }

    #[inline]
    fn distance(&self, coord: VoxelCoord) -> Option<f64> {
        (**self).distance(coord)
    }
}
