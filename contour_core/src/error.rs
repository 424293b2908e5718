//! Error types for contour_core operations.

use thiserror::Error;

use crate::field::FieldExtent;

/// Errors that can occur while building a field or extracting a surface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContourError {
    /// A field axis has fewer than two samples, so the field has no cells.
    #[error("invalid field extent: axis {axis} has {size} samples, at least 2 are required")]
    InvalidExtent {
        /// The offending axis (`'x'`, `'y'` or `'z'`).
        axis: char,
        /// Number of samples along that axis.
        size: usize,
    },

    /// The extent has more samples than a buffer can hold.
    #[error("field extent {x}x{y}x{z} has too many samples to store")]
    ExtentTooLarge {
        /// Samples along x.
        x: usize,
        /// Samples along y.
        y: usize,
        /// Samples along z.
        z: usize,
    },

    /// A sample coordinate lies outside the field.
    #[error("sample coordinate ({x}, {y}, {z}) is outside field extent {extent}")]
    CoordOutOfBounds {
        /// X index.
        x: usize,
        /// Y index.
        y: usize,
        /// Z index.
        z: usize,
        /// Extent of the field that was indexed.
        extent: FieldExtent,
    },

    /// A sample buffer does not match the field extent.
    #[error("sample count mismatch: expected {expected} samples, got {got}")]
    SampleCountMismatch {
        /// Number of samples the extent requires.
        expected: usize,
        /// Number of samples provided.
        got: usize,
    },

    /// A sample is NaN or infinite.
    #[error("non-finite distance sample at ({x}, {y}, {z})")]
    NonFiniteSample {
        /// X index.
        x: usize,
        /// Y index.
        y: usize,
        /// Z index.
        z: usize,
    },

    /// Mesh buffers disagree in length (UVs not parallel to vertices, or a
    /// partial triangle).
    #[error("mesh buffer length mismatch: {vertices} vertices, {uvs} uvs, {indices} indices")]
    BufferLengthMismatch {
        /// Number of vertices.
        vertices: usize,
        /// Number of UVs.
        uvs: usize,
        /// Number of triangle indices.
        indices: usize,
    },

    /// A triangle index points past the end of the vertex buffer.
    #[error("triangle index {index} out of range for {vertex_count} vertices")]
    TriangleIndexOutOfRange {
        /// The offending index.
        index: u32,
        /// Number of vertices in the buffer.
        vertex_count: usize,
    },

    /// Appending would produce vertex indices beyond the `u32` range.
    #[error("mesh index overflow: {vertex_count} vertices exceed the u32 index range")]
    IndexOverflow {
        /// Vertex count the append would have reached.
        vertex_count: usize,
    },
}

/// Result type alias for contour_core operations.
pub type Result<T> = std::result::Result<T, ContourError>;
