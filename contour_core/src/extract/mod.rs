//! Surface extraction over a whole field.
//!
//! Walks every cell of a field (x outermost, z innermost), classifies it,
//! clusters its candidate corners and writes the resulting triangles into
//! [`MeshBuffers`](crate::mesh::MeshBuffers) according to the configured
//! [`BufferPolicy`](crate::config::BufferPolicy).
//!
//! # Example
//!
//! ```ignore
//! use contour_core::extract::SurfaceExtractor;
//! use contour_core::mesh::MeshBuffers;
//!
//! let extractor = SurfaceExtractor::default();
//! let mut mesh = MeshBuffers::new();
//!
//! // Called whenever the field changes
//! let stats = extractor.rebuild(&field, &mut mesh)?;
//! println!("{} triangles", stats.triangles);
//! ```

mod algorithm;

pub use algorithm::{cell_coords, extract, rebuild, ExtractionStats, SurfaceExtractor};
