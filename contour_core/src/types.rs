//! Core geometric types for contour_core.
//!
//! Provides the vector, texture-coordinate and grid-coordinate types used by
//! the field, the classifier and the mesh buffers.

use core::ops::{Add, Div, Mul, Neg, Sub};

/// A 3D point (or vector) with named fields.
///
/// Provides arithmetic operations and conversions to/from arrays and tuples.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
    /// Z coordinate.
    pub z: f64,
}

impl Point3 {
    /// The zero vector.
    pub const ZERO: Self = Self::splat(0.0);

    /// Create a new Point3.
    #[inline]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Create a Point3 with all components set to the same value.
    #[inline]
    pub const fn splat(v: f64) -> Self {
        Self { x: v, y: v, z: v }
    }

    /// Convert to an array.
    #[inline]
    pub const fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Dot product with another point (treating both as vectors).
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product with another point (treating both as vectors).
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Squared length of the vector.
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// Length (magnitude) of the vector.
    #[inline]
    pub fn length(self) -> f64 {
        libm::sqrt(self.length_squared())
    }

    /// Euclidean distance to another point.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    /// Normalize the vector to unit length.
    /// Returns the zero vector if the length is zero.
    #[inline]
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            Self::ZERO
        } else {
            self / len
        }
    }

    /// Component-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        Self {
            x: self.x.min(other.x),
            y: self.y.min(other.y),
            z: self.z.min(other.z),
        }
    }

    /// Component-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        Self {
            x: self.x.max(other.x),
            y: self.y.max(other.y),
            z: self.z.max(other.z),
        }
    }

    /// True if every component is finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl From<[f64; 3]> for Point3 {
    #[inline]
    fn from(arr: [f64; 3]) -> Self {
        Self {
            x: arr[0],
            y: arr[1],
            z: arr[2],
        }
    }
}

impl From<Point3> for [f64; 3] {
    #[inline]
    fn from(p: Point3) -> Self {
        p.as_array()
    }
}

impl From<(f64, f64, f64)> for Point3 {
    #[inline]
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Self { x, y, z }
    }
}

impl From<Point3> for (f64, f64, f64) {
    #[inline]
    fn from(p: Point3) -> Self {
        (p.x, p.y, p.z)
    }
}

impl Add for Point3 {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Point3 {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f64> for Point3 {
    type Output = Self;

    #[inline]
    fn mul(self, scalar: f64) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
            z: self.z * scalar,
        }
    }
}

impl Mul<Point3> for f64 {
    type Output = Point3;

    #[inline]
    fn mul(self, point: Point3) -> Point3 {
        point * self
    }
}

impl Div<f64> for Point3 {
    type Output = Self;

    #[inline]
    fn div(self, scalar: f64) -> Self {
        Self {
            x: self.x / scalar,
            y: self.y / scalar,
            z: self.z / scalar,
        }
    }
}

impl Neg for Point3 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

/// A texture coordinate attached to an emitted vertex.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Uv {
    /// Horizontal texture coordinate.
    pub u: f64,
    /// Vertical texture coordinate.
    pub v: f64,
}

impl Uv {
    /// The origin of texture space. Every emitted vertex currently uses it.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Create a new Uv.
    #[inline]
    pub const fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }

    /// Convert to an array.
    #[inline]
    pub const fn as_array(&self) -> [f64; 2] {
        [self.u, self.v]
    }
}

impl From<Uv> for (f64, f64) {
    #[inline]
    fn from(uv: Uv) -> Self {
        (uv.u, uv.v)
    }
}

/// Integer coordinates of a sample (voxel) in the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VoxelCoord {
    /// X index.
    pub x: usize,
    /// Y index.
    pub y: usize,
    /// Z index.
    pub z: usize,
}

impl VoxelCoord {
    /// Create a new VoxelCoord.
    #[inline]
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Convert to an array.
    #[inline]
    pub const fn as_array(&self) -> [usize; 3] {
        [self.x, self.y, self.z]
    }

    /// World-space position of the sample (one unit per sample).
    #[inline]
    pub fn to_point(self) -> Point3 {
        Point3::new(self.x as f64, self.y as f64, self.z as f64)
    }
}

impl From<[usize; 3]> for VoxelCoord {
    #[inline]
    fn from(arr: [usize; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}

/// Origin (minimum corner) of a unit cell in the field.
///
/// A cell at `(x, y, z)` spans the samples `(x..=x+1, y..=y+1, z..=z+1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellCoord {
    /// X index of the cell origin.
    pub x: usize,
    /// Y index of the cell origin.
    pub y: usize,
    /// Z index of the cell origin.
    pub z: usize,
}

impl CellCoord {
    /// Create a new CellCoord.
    #[inline]
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Convert to an array.
    #[inline]
    pub const fn as_array(&self) -> [usize; 3] {
        [self.x, self.y, self.z]
    }

    /// Sample coordinate of this cell's corner at the given unit offset.
    #[inline]
    pub const fn corner(&self, offset: (usize, usize, usize)) -> VoxelCoord {
        VoxelCoord::new(self.x + offset.0, self.y + offset.1, self.z + offset.2)
    }

    /// World-space position of the cell origin.
    #[inline]
    pub fn to_point(self) -> Point3 {
        Point3::new(self.x as f64, self.y as f64, self.z as f64)
    }
}

impl From<[usize; 3]> for CellCoord {
    #[inline]
    fn from(arr: [usize; 3]) -> Self {
        Self::new(arr[0], arr[1], arr[2])
    }
}
