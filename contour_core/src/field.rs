//! Regular 3D grid of signed-distance samples.
//!
//! Memory layout: `voxels[(x * size_y + y) * size_z + z]`, so z varies fastest,
//! matching the order in which the extractor walks the grid.

use core::fmt;

use crate::error::{ContourError, Result};
use crate::traits::SampleProvider;
use crate::types::VoxelCoord;

/// Minimum number of samples along each axis. Fewer leaves no cells.
pub const MIN_AXIS_SAMPLES: usize = 2;

/// Largest sample count whose buffer fits in an allocation.
pub const MAX_SAMPLES: usize = isize::MAX as usize / core::mem::size_of::<Voxel>();

/// Number of samples along each axis of a field (immutable after construction).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldExtent {
    /// Samples along x.
    pub x: usize,
    /// Samples along y.
    pub y: usize,
    /// Samples along z.
    pub z: usize,
}

impl FieldExtent {
    /// Create a new extent. Call [`FieldExtent::validate`] before use.
    #[inline]
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Extent with the same number of samples on every axis.
    #[inline]
    pub const fn cube(size: usize) -> Self {
        Self::new(size, size, size)
    }

    /// Reject any axis with fewer than [`MIN_AXIS_SAMPLES`] samples, and any
    /// extent whose sample buffer could not be addressed.
    ///
    /// # Errors
    /// * `InvalidExtent` - An axis has fewer than two samples
    /// * `ExtentTooLarge` - The sample count exceeds [`MAX_SAMPLES`]
    pub fn validate(&self) -> Result<()> {
        for (axis, size) in [('x', self.x), ('y', self.y), ('z', self.z)] {
            if size < MIN_AXIS_SAMPLES {
                return Err(ContourError::InvalidExtent { axis, size });
            }
        }
        match self.checked_sample_count() {
            Some(_) => Ok(()),
            None => Err(ContourError::ExtentTooLarge {
                x: self.x,
                y: self.y,
                z: self.z,
            }),
        }
    }

    /// Total number of samples, or `None` if it exceeds [`MAX_SAMPLES`].
    #[inline]
    pub const fn checked_sample_count(&self) -> Option<usize> {
        let count = match self.x.checked_mul(self.y) {
            Some(xy) => xy.checked_mul(self.z),
            None => None,
        };
        match count {
            Some(n) if n <= MAX_SAMPLES => Some(n),
            _ => None,
        }
    }

    /// Total number of samples (x * y * z).
    ///
    /// Saturates at `usize::MAX` for extents [`FieldExtent::validate`] rejects.
    #[inline]
    pub const fn sample_count(&self) -> usize {
        self.x.saturating_mul(self.y).saturating_mul(self.z)
    }

    /// Number of cells along each axis (one less than the sample count).
    #[inline]
    pub const fn cell_counts(&self) -> (usize, usize, usize) {
        (
            self.x.saturating_sub(1),
            self.y.saturating_sub(1),
            self.z.saturating_sub(1),
        )
    }

    /// Total number of cells.
    #[inline]
    pub const fn cell_count(&self) -> usize {
        let (cx, cy, cz) = self.cell_counts();
        cx.saturating_mul(cy).saturating_mul(cz)
    }

    /// Whether a sample coordinate lies inside the field.
    #[inline]
    pub const fn contains(&self, coord: VoxelCoord) -> bool {
        coord.x < self.x && coord.y < self.y && coord.z < self.z
    }

    /// Flat storage index of a coordinate, or `None` if it is outside the field
    /// or the extent is too large to address.
    #[inline]
    pub const fn flat_index(&self, coord: VoxelCoord) -> Option<usize> {
        match self.checked_sample_count() {
            // Bounded by the sample count, so the arithmetic cannot overflow
            Some(_) if self.contains(coord) => {
                Some((coord.x * self.y + coord.y) * self.z + coord.z)
            }
            _ => None,
        }
    }

    /// Inverse of [`FieldExtent::flat_index`].
    ///
    /// Returns `None` for an index past the last sample.
    #[inline]
    pub const fn coord_of(&self, index: usize) -> Option<VoxelCoord> {
        match self.checked_sample_count() {
            Some(n) if index < n => Some(VoxelCoord::new(
                index / (self.y * self.z),
                (index / self.z) % self.y,
                index % self.z,
            )),
            _ => None,
        }
    }

    fn out_of_bounds(&self, coord: VoxelCoord) -> ContourError {
        ContourError::CoordOutOfBounds {
            x: coord.x,
            y: coord.y,
            z: coord.z,
            extent: *self,
        }
    }
}

impl fmt::Display for FieldExtent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.x, self.y, self.z)
    }
}

impl Default for FieldExtent {
    fn default() -> Self {
        Self::cube(MIN_AXIS_SAMPLES)
    }
}

/// One signed-distance sample. `distance <= 0` is inside the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Voxel {
    /// Signed distance to the surface.
    pub distance: f64,
}

impl Voxel {
    /// Create a new Voxel.
    #[inline]
    pub const fn new(distance: f64) -> Self {
        Self { distance }
    }

    /// Whether the sample lies inside (or on) the surface.
    #[inline]
    pub fn is_inside(&self) -> bool {
        self.distance <= 0.0
    }
}

/// Dense grid of [`Voxel`] samples with a fixed, validated extent.
///
/// The core only reads the field. Populating it is left to external
/// initializers through [`VoxelField::set`], [`VoxelField::fill_with`] or the
/// constructors.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelField {
    extent: FieldExtent,
    voxels: Box<[Voxel]>,
}

impl VoxelField {
    /// Create a field with every sample set to zero.
    ///
    /// # Errors
    /// Returns `InvalidExtent` if any axis has fewer than two samples.
    pub fn new(extent: FieldExtent) -> Result<Self> {
        Self::filled(extent, 0.0)
    }

    /// Create a field with every sample set to `distance`.
    pub fn filled(extent: FieldExtent, distance: f64) -> Result<Self> {
        extent.validate()?;
        Ok(Self {
            extent,
            voxels: vec![Voxel::new(distance); extent.sample_count()].into_boxed_slice(),
        })
    }

    /// Create a field by evaluating `f` at every sample coordinate.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let field = VoxelField::from_fn(FieldExtent::cube(16), |c| {
    ///     (c.to_point() - Point3::splat(7.5)).length() - 5.0
    /// })?;
    /// ```
    pub fn from_fn<F>(extent: FieldExtent, f: F) -> Result<Self>
    where
        F: FnMut(VoxelCoord) -> f64,
    {
        let mut field = Self::new(extent)?;
        field.fill_with(f);
        Ok(field)
    }

    /// Create a field from raw distances in storage order (z fastest, then y, then x).
    ///
    /// # Errors
    /// Returns `SampleCountMismatch` if `distances.len()` differs from the extent.
    pub fn from_samples(extent: FieldExtent, distances: Vec<f64>) -> Result<Self> {
        extent.validate()?;
        if distances.len() != extent.sample_count() {
            return Err(ContourError::SampleCountMismatch {
                expected: extent.sample_count(),
                got: distances.len(),
            });
        }
        Ok(Self {
            extent,
            voxels: distances.into_iter().map(Voxel::new).collect(),
        })
    }

    /// The field extent.
    #[inline]
    pub fn extent(&self) -> FieldExtent {
        self.extent
    }

    /// All samples in storage order.
    #[inline]
    pub fn samples(&self) -> &[Voxel] {
        &self.voxels
    }

    /// The sample at a coordinate, or `None` if it is outside the field.
    #[inline]
    pub fn voxel(&self, x: usize, y: usize, z: usize) -> Option<&Voxel> {
        self.extent
            .flat_index(VoxelCoord::new(x, y, z))
            .map(|idx| &self.voxels[idx])
    }

    /// The distance at a coordinate, or `None` if it is outside the field.
    #[inline]
    pub fn try_get(&self, x: usize, y: usize, z: usize) -> Option<f64> {
        self.voxel(x, y, z).map(|v| v.distance)
    }

    /// The distance at a coordinate.
    ///
    /// # Errors
    /// Returns `CoordOutOfBounds` if the coordinate is outside the field.
    #[inline]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Result<f64> {
        let coord = VoxelCoord::new(x, y, z);
        self.try_get(x, y, z)
            .ok_or_else(|| self.extent.out_of_bounds(coord))
    }

    /// Overwrite the distance at a coordinate.
    ///
    /// # Errors
    /// Returns `CoordOutOfBounds` if the coordinate is outside the field.
    pub fn set(&mut self, x: usize, y: usize, z: usize, distance: f64) -> Result<()> {
        let coord = VoxelCoord::new(x, y, z);
        let idx = self
            .extent
            .flat_index(coord)
            .ok_or_else(|| self.extent.out_of_bounds(coord))?;
        self.voxels[idx].distance = distance;
        Ok(())
    }

    /// Overwrite every sample with `f(coord)`.
    pub fn fill_with<F>(&mut self, mut f: F)
    where
        F: FnMut(VoxelCoord) -> f64,
    {
        let extent = self.extent;
        for (idx, voxel) in self.voxels.iter_mut().enumerate() {
            if let Some(coord) = extent.coord_of(idx) {
                voxel.distance = f(coord);
            }
        }
    }

    /// Reject fields containing NaN or infinite samples.
    ///
    /// A NaN sample would silently classify as outside.
    pub fn validate(&self) -> Result<()> {
        let bad = self
            .voxels
            .iter()
            .position(|v| !v.distance.is_finite())
            .and_then(|idx| self.extent.coord_of(idx));
        match bad {
            Some(c) => Err(ContourError::NonFiniteSample {
                x: c.x,
                y: c.y,
                z: c.z,
            }),
            None => Ok(()),
        }
    }

    /// Number of samples that lie inside the surface.
    pub fn inside_count(&self) -> usize {
        self.voxels.iter().filter(|v| v.is_inside()).count()
    }
}

impl SampleProvider for VoxelField {
    #[inline]
    fn extent(&self) -> FieldExtent {
        self.extent
    }

    #[inline]
    fn distance(&self, coord: VoxelCoord) -> Option<f64> {
        self.try_get(coord.x, coord.y, coord.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_validate() {
        assert!(FieldExtent::new(2, 2, 2).validate().is_ok());
        assert!(FieldExtent::new(5, 3, 9).validate().is_ok());
        assert_eq!(
            FieldExtent::new(2, 1, 2).validate(),
            Err(ContourError::InvalidExtent { axis: 'y', size: 1 })
        );
        assert_eq!(
            FieldExtent::new(0, 0, 0).validate(),
            Err(ContourError::InvalidExtent { axis: 'x', size: 0 })
        );
    }

    #[test]
    fn test_extent_counts() {
        let extent = FieldExtent::new(4, 3, 2);
        assert_eq!(extent.sample_count(), 24);
        assert_eq!(extent.cell_counts(), (3, 2, 1));
        assert_eq!(extent.cell_count(), 6);
        assert_eq!(extent.to_string(), "4x3x2");
    }

    #[test]
    fn test_flat_index_roundtrip() {
        let extent = FieldExtent::new(4, 3, 5);
        for idx in 0..extent.sample_count() {
            let coord = extent.coord_of(idx).unwrap();
            assert_eq!(extent.flat_index(coord), Some(idx));
        }
        assert_eq!(extent.coord_of(60), None);
        assert_eq!(extent.flat_index(VoxelCoord::new(4, 0, 0)), None);
        assert_eq!(extent.flat_index(VoxelCoord::new(0, 0, 1)), Some(1));
        assert_eq!(extent.flat_index(VoxelCoord::new(1, 0, 0)), Some(15));
    }

    #[test]
    fn test_new_field_is_zero() {
        let field = VoxelField::new(FieldExtent::cube(2)).unwrap();
        assert_eq!(field.samples().len(), 8);
        assert!(field.samples().iter().all(|v| v.distance == 0.0));
        assert_eq!(field.inside_count(), 8);
    }

    #[test]
    fn test_new_field_rejects_flat_extent() {
        let err = VoxelField::new(FieldExtent::new(2, 2, 1)).unwrap_err();
        assert_eq!(err, ContourError::InvalidExtent { axis: 'z', size: 1 });
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_oversized_extent_is_rejected() {
        let extent = FieldExtent::new(1 << 32, 1 << 32, 2);
        let err = VoxelField::new(extent).unwrap_err();
        assert_eq!(
            err,
            ContourError::ExtentTooLarge {
                x: 1 << 32,
                y: 1 << 32,
                z: 2
            }
        );
        assert!(VoxelField::from_fn(extent, |_| 1.0).is_err());
        assert!(VoxelField::from_samples(extent, Vec::new()).is_err());
    }

    #[test]
    fn test_extent_overflow_is_checked() {
        let huge = FieldExtent::new(usize::MAX, 2, 2);
        assert_eq!(huge.checked_sample_count(), None);
        assert_eq!(huge.sample_count(), usize::MAX);
        assert!(matches!(
            huge.validate(),
            Err(ContourError::ExtentTooLarge { .. })
        ));
        // Indexing an unaddressable extent yields nothing instead of wrapping
        assert_eq!(huge.flat_index(VoxelCoord::new(1, 1, 1)), None);
        assert_eq!(huge.coord_of(0), None);

        // Fits in usize but not in an allocation
        let wide = FieldExtent::new(MAX_SAMPLES, 2, 2);
        assert!(wide.validate().is_err());
        assert!(FieldExtent::cube(64).validate().is_ok());
    }

    #[test]
    fn test_get_set() {
        let mut field = VoxelField::new(FieldExtent::new(3, 2, 2)).unwrap();
        field.set(2, 1, 0, 4.5).unwrap();
        assert_eq!(field.get(2, 1, 0), Ok(4.5));
        assert_eq!(field.try_get(2, 1, 1), Some(0.0));
        assert_eq!(field.try_get(3, 0, 0), None);

        let err = field.set(0, 2, 0, 1.0).unwrap_err();
        assert!(matches!(err, ContourError::CoordOutOfBounds { y: 2, .. }));
        assert!(field.get(0, 0, 2).is_err());
    }

    #[test]
    fn test_from_fn_matches_coordinates() {
        let field = VoxelField::from_fn(FieldExtent::new(3, 4, 5), |c| {
            (c.x * 100 + c.y * 10 + c.z) as f64
        })
        .unwrap();
        assert_eq!(field.get(2, 3, 4), Ok(234.0));
        assert_eq!(field.get(1, 0, 2), Ok(102.0));
    }

    #[test]
    fn test_from_samples() {
        let samples: Vec<f64> = (0..8).map(|i| i as f64).collect();
        let field = VoxelField::from_samples(FieldExtent::cube(2), samples).unwrap();
        assert_eq!(field.get(0, 0, 1), Ok(1.0));
        assert_eq!(field.get(1, 0, 0), Ok(4.0));

        let err = VoxelField::from_samples(FieldExtent::cube(2), vec![0.0; 7]).unwrap_err();
        assert_eq!(
            err,
            ContourError::SampleCountMismatch {
                expected: 8,
                got: 7
            }
        );
    }

    #[test]
    fn test_validate_rejects_nan() {
        let mut field = VoxelField::new(FieldExtent::cube(2)).unwrap();
        assert!(field.validate().is_ok());
        field.set(1, 0, 1, f64::NAN).unwrap();
        assert_eq!(
            field.validate(),
            Err(ContourError::NonFiniteSample { x: 1, y: 0, z: 1 })
        );
    }

    #[test]
    fn test_voxel_inside_boundary() {
        assert!(Voxel::new(0.0).is_inside());
        assert!(Voxel::new(-1.0).is_inside());
        assert!(!Voxel::new(1e-12).is_inside());
    }
}
