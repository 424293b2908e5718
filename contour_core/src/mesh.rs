//! Output mesh buffers.
//!
//! [`MeshBuffers`] is what the renderer consumes: positions, a parallel list of
//! UVs and a flat list of triangle indices (every 3 consecutive indices form
//! one triangle). [`CellMesh`] has the same shape but holds one cell's
//! contribution with indices starting at 0.

use crate::error::{ContourError, Result};
use crate::types::{Point3, Uv};

/// A triangle represented by three vertices.
pub type Triangle = [Point3; 3];

/// One cell's vertices, UVs and cell-local triangle indices.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellMesh {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// One UV per vertex.
    pub uvs: Vec<Uv>,
    /// Indices into `vertices`, three per triangle.
    pub triangles: Vec<u32>,
}

impl CellMesh {
    /// Create an empty cell mesh with room for `vertices` vertices.
    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            uvs: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(vertices),
        }
    }

    /// True when the cell emitted nothing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }
}

/// Vertex, UV and index buffers for an extracted surface.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshBuffers {
    /// Vertex positions.
    pub vertices: Vec<Point3>,
    /// One UV per vertex.
    pub uvs: Vec<Uv>,
    /// Indices into `vertices`, three per triangle.
    pub triangles: Vec<u32>,
}

impl MeshBuffers {
    /// Create empty buffers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of complete triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// True when there are no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Remove all data, keeping the allocations.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.uvs.clear();
        self.triangles.clear();
    }

    /// Append a cell's contribution, offsetting its indices by the current vertex count.
    ///
    /// # Errors
    /// Returns `IndexOverflow` if an offset index would not fit in a `u32`.
    /// The buffers are left unchanged in that case.
    pub fn append(&mut self, cell: CellMesh) -> Result<()> {
        let overflow = || ContourError::IndexOverflow {
            vertex_count: self.vertices.len().saturating_add(cell.vertices.len()),
        };
        let base = u32::try_from(self.vertices.len()).map_err(|_| overflow())?;
        let shifted = cell
            .triangles
            .iter()
            .map(|&i| i.checked_add(base))
            .collect::<Option<Vec<u32>>>()
            .ok_or_else(overflow)?;

        self.vertices.extend(cell.vertices);
        self.uvs.extend(cell.uvs);
        self.triangles.extend(shifted);
        Ok(())
    }

    /// Replace the whole contents with a cell's contribution.
    pub fn replace_with(&mut self, cell: CellMesh) {
        self.vertices = cell.vertices;
        self.uvs = cell.uvs;
        self.triangles = cell.triangles;
    }

    /// The vertices of triangle `i`, or `None` if it does not exist or
    /// references a missing vertex.
    pub fn triangle(&self, i: usize) -> Option<Triangle> {
        let idx = self.triangles.get(i * 3..i * 3 + 3)?;
        Some([
            *self.vertices.get(idx[0] as usize)?,
            *self.vertices.get(idx[1] as usize)?,
            *self.vertices.get(idx[2] as usize)?,
        ])
    }

    /// Iterate all resolvable triangles in order.
    pub fn iter_triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.triangle_count()).filter_map(move |i| self.triangle(i))
    }

    /// Check the buffer invariants: one UV per vertex, whole triangles only,
    /// and every index pointing at a vertex.
    pub fn validate(&self) -> Result<()> {
        if self.uvs.len() != self.vertices.len() || self.triangles.len() % 3 != 0 {
            return Err(ContourError::BufferLengthMismatch {
                vertices: self.vertices.len(),
                uvs: self.uvs.len(),
                indices: self.triangles.len(),
            });
        }
        if let Some(&index) = self
            .triangles
            .iter()
            .find(|&&i| i as usize >= self.vertices.len())
        {
            return Err(ContourError::TriangleIndexOutOfRange {
                index,
                vertex_count: self.vertices.len(),
            });
        }
        Ok(())
    }

    /// Axis-aligned bounds of the vertices, or `None` if there are none.
    pub fn bounding_box(&self) -> Option<(Point3, Point3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
        )
    }

    /// Positions flattened to `f32` triples for GPU upload.
    pub fn positions_f32(&self) -> Vec<[f32; 3]> {
        self.vertices
            .iter()
            .map(|v| [v.x as f32, v.y as f32, v.z as f32])
            .collect()
    }

    /// UVs flattened to `f32` pairs for GPU upload.
    pub fn uvs_f32(&self) -> Vec<[f32; 2]> {
        self.uvs.iter().map(|uv| [uv.u as f32, uv.v as f32]).collect()
    }
}

/// Mesh statistics after extraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshStats {
    /// Total number of triangles.
    pub triangle_count: usize,
    /// Number of vertices.
    pub vertex_count: usize,
    /// Sum of triangle areas. Degenerate triangles contribute zero.
    pub surface_area: f64,
    /// Bounding box minimum.
    pub bbox_min: Point3,
    /// Bounding box maximum.
    pub bbox_max: Point3,
}

impl MeshStats {
    /// Compute statistics from mesh buffers.
    pub fn from_buffers(mesh: &MeshBuffers) -> Self {
        let surface_area = mesh
            .iter_triangles()
            .map(|tri| (tri[1] - tri[0]).cross(tri[2] - tri[0]).length() * 0.5)
            .sum();
        let (bbox_min, bbox_max) = mesh
            .bounding_box()
            .unwrap_or((Point3::ZERO, Point3::ZERO));

        Self {
            triangle_count: mesh.triangle_count(),
            vertex_count: mesh.vertex_count(),
            surface_area,
            bbox_min,
            bbox_max,
        }
    }
}
