//! # contour_core
//!
//! Surface extraction from signed-distance samples on a regular 3D grid.
//!
//! Each unit cell of the grid is classified corner by corner (a sample with
//! `distance <= 0` is inside), corners touching a sign-changing edge are
//! clustered into triangles with their two nearest inside neighbours, and each
//! emitted vertex is the corner pushed along the centre-to-corner direction by
//! its own distance sample.
//!
//! The crate is a pure computation from a field to mesh buffers. It does no
//! rendering, no I/O, and never populates a field itself.
//!
//! ## Modules
//!
//! - [`types`]: Geometric types (Point3, Uv, VoxelCoord, CellCoord)
//! - [`topology`]: Corner offsets and edge table of a unit cell
//! - [`field`]: The sample grid (VoxelField, FieldExtent, Voxel)
//! - [`traits`]: Storage abstraction (SampleProvider)
//! - [`classify`]: Per-cell inside and crossing flags
//! - [`cluster`]: Corner clustering and vertex placement
//! - [`extract`]: Whole-field extraction (SurfaceExtractor)
//! - [`mesh`]: Output buffers (MeshBuffers, MeshStats)
//! - [`config`]: Extraction policies
//! - [`error`]: Error types
//!
//! ## Usage
//!
//! ```ignore
//! use contour_core::prelude::*;
//!
//! let mut field = VoxelField::new(FieldExtent::cube(2))?;
//! field.set(0, 0, 0, 5.0)?;
//! field.set(1, 0, 0, 5.0)?;
//!
//! let mut mesh = MeshBuffers::new();
//! let stats = SurfaceExtractor::default().rebuild(&field, &mut mesh)?;
//! assert_eq!(stats.triangles, 2);
//! ```
//!
//! ## Buffer policy
//!
//! By default every non-trivial cell is appended to the output. The legacy
//! behaviour, where each non-trivial cell replaces the buffers and only the
//! last one survives, is available through [`BufferPolicy::OverwritePerCell`]
//! or [`ExtractionConfig::legacy`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classify;
pub mod cluster;
pub mod config;
pub mod error;
pub mod extract;
pub mod field;
pub mod mesh;
pub mod topology;
pub mod traits;
pub mod types;

/// Prelude module for convenient imports.
///
/// Provides the most commonly used types and functions.
pub mod prelude {
    pub use crate::classify::{CellClassification, InsideCorner};
    pub use crate::cluster::{cluster_cell, displace_corner, nearest_pair, Cluster, NearestPair};
    pub use crate::config::{BufferPolicy, DegeneratePolicy, ExtractionConfig};
    pub use crate::error::{ContourError, Result};
    pub use crate::extract::{extract, rebuild, ExtractionStats, SurfaceExtractor};
    pub use crate::field::{FieldExtent, Voxel, VoxelField};
    pub use crate::mesh::{MeshBuffers, MeshStats};
    pub use crate::traits::SampleProvider;
    pub use crate::types::{CellCoord, Point3, Uv, VoxelCoord};
}

// Re-export everything at crate root for convenience
pub use classify::{CellClassification, InsideCorner};
pub use cluster::{
    add_corner, cluster_cell, displace_corner, emit_clusters, nearest_pair, CellClusters, Cluster,
    NearestPair, FALLBACK_CORNER,
};
pub use config::{BufferPolicy, DegeneratePolicy, ExtractionConfig};
pub use error::{ContourError, Result};
pub use extract::{cell_coords, extract, rebuild, ExtractionStats, SurfaceExtractor};
pub use field::{FieldExtent, Voxel, VoxelField, MAX_SAMPLES, MIN_AXIS_SAMPLES};
pub use mesh::{CellMesh, MeshBuffers, MeshStats, Triangle};
pub use topology::{
    corner_direction, corner_offset, index_from_offset, CELL_CENTER, CORNER_COUNT,
    CORNER_OFFSETS, EDGES, EDGE_COUNT,
};
pub use traits::SampleProvider;
pub use types::{CellCoord, Point3, Uv, VoxelCoord};

#[cfg(test)]
mod integration_tests {
    use super::*;

    /// Sphere field sampled into a VoxelField
    fn sphere_field(size: usize, radius: f64) -> VoxelField {
        let center = Point3::splat((size - 1) as f64 * 0.5);
        VoxelField::from_fn(FieldExtent::cube(size), |c| {
            (c.to_point() - center).length() - radius
        })
        .unwrap()
    }

    #[test]
    fn test_sphere_mesh_bounds() {
        let field = sphere_field(12, 3.5);
        let mesh = extract(&field).unwrap();

        assert!(mesh.triangle_count() > 0, "Should generate triangles for sphere");
        assert!(mesh.validate().is_ok());

        // Vertices stay within one unit of the sampled grid
        let (lo, hi) = mesh.bounding_box().unwrap();
        assert!(lo.x >= -1.0 && lo.y >= -1.0 && lo.z >= -1.0);
        assert!(hi.x <= 12.0 && hi.y <= 12.0 && hi.z <= 12.0);
    }

    #[test]
    fn test_sphere_outside_grid_is_empty() {
        // Sphere far smaller than a sample spacing and off-grid: every sample outside
        let field = VoxelField::from_fn(FieldExtent::cube(6), |c| {
            (c.to_point() - Point3::splat(2.5)).length() - 0.1
        })
        .unwrap();
        let (mesh, stats) = SurfaceExtractor::default().extract_with_stats(&field).unwrap();
        assert!(mesh.is_empty());
        assert_eq!(stats.trivial_cells, 125);
    }

    #[test]
    fn test_stats_match_buffers() {
        let field = sphere_field(10, 3.0);
        let (mesh, stats) = SurfaceExtractor::default().extract_with_stats(&field).unwrap();
        assert_eq!(stats.triangles, mesh.triangle_count());
        assert_eq!(stats.vertices, mesh.vertex_count());
        assert_eq!(stats.vertices, stats.triangles * 3);
        assert_eq!(stats.cells_visited, stats.trivial_cells + stats.surface_cells);
        assert_eq!(stats.cells_visited, 9 * 9 * 9);
    }

    #[test]
    fn test_mesh_stats_on_extraction() {
        let field = sphere_field(10, 3.0);
        let mesh = extract(&field).unwrap();
        let stats = MeshStats::from_buffers(&mesh);
        assert_eq!(stats.triangle_count, mesh.triangle_count());
        assert!(stats.surface_area > 0.0);
        assert!(stats.surface_area.is_finite());
    }
}
