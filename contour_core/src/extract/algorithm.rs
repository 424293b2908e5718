//! Cell walk and buffer accumulation.

use log::{debug, trace};

use crate::classify::{CellClassification, InsideCorner};
use crate::cluster::{cluster_cell, emit_clusters};
use crate::config::{BufferPolicy, ExtractionConfig};
use crate::error::Result;
use crate::field::FieldExtent;
use crate::mesh::{CellMesh, MeshBuffers};
use crate::traits::SampleProvider;
use crate::types::CellCoord;

/// Counters collected during one extraction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExtractionStats {
    /// Cells classified.
    pub cells_visited: usize,
    /// Cells with all corners inside or all outside.
    pub trivial_cells: usize,
    /// Cells that went through clustering.
    pub surface_cells: usize,
    /// Seeds that had fewer than two candidate neighbours.
    pub degenerate_clusters: usize,
    /// Triangles in the destination after the pass.
    pub triangles: usize,
    /// Vertices in the destination after the pass.
    pub vertices: usize,
}

/// Every cell origin of a field, x outermost and z innermost.
pub fn cell_coords(extent: FieldExtent) -> impl Iterator<Item = CellCoord> {
    let (cx, cy, cz) = extent.cell_counts();
    (0..cx).flat_map(move |x| {
        (0..cy).flat_map(move |y| (0..cz).map(move |z| CellCoord::new(x, y, z)))
    })
}

/// Result of processing one cell.
enum CellOutcome {
    Trivial,
    Surface { mesh: CellMesh, degenerate: usize },
}

/// Extracts a triangle mesh from a signed-distance field.
///
/// The extractor holds only its configuration; it can be reused across
/// fields and calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceExtractor {
    config: ExtractionConfig,
}

impl SurfaceExtractor {
    /// Create an extractor with the given configuration.
    #[inline]
    pub const fn new(config: ExtractionConfig) -> Self {
        Self { config }
    }

    /// The extractor configuration.
    #[inline]
    pub const fn config(&self) -> ExtractionConfig {
        self.config
    }

    /// Classify one cell.
    ///
    /// # Errors
    /// Returns `CoordOutOfBounds` if the provider lacks a corner sample.
    pub fn classify_cell<P: SampleProvider>(
        &self,
        provider: &P,
        cell: CellCoord,
    ) -> Result<CellClassification> {
        let distances = provider.cell_distances(cell)?;
        Ok(CellClassification::from_distances(&distances))
    }

    /// One cell's contribution with cell-local indices (starting at 0).
    ///
    /// Trivial cells yield an empty mesh.
    pub fn extract_cell<P: SampleProvider>(&self, provider: &P, cell: CellCoord) -> Result<CellMesh> {
        Ok(match self.process_cell(provider, cell)? {
            CellOutcome::Trivial => CellMesh::default(),
            CellOutcome::Surface { mesh, .. } => mesh,
        })
    }

    fn process_cell<P: SampleProvider>(&self, provider: &P, cell: CellCoord) -> Result<CellOutcome> {
        let distances = provider.cell_distances(cell)?;
        let classification = CellClassification::from_distances(&distances);
        if classification.is_trivial() {
            return Ok(CellOutcome::Trivial);
        }

        trace!(
            "cell {:?}: {} inside, crossing mask {:08b}",
            cell.as_array(),
            classification.inside_count(),
            classification.crossing_mask()
        );

        let clusters = cluster_cell(&classification, self.config.degenerate_policy);
        if clusters.degenerate_seeds() > 0 {
            debug!(
                "cell {:?}: {} degenerate cluster(s), policy {:?}",
                cell.as_array(),
                clusters.degenerate_seeds(),
                self.config.degenerate_policy
            );
        }

        Ok(CellOutcome::Surface {
            mesh: emit_clusters(&clusters, cell, &distances),
            degenerate: clusters.degenerate_seeds(),
        })
    }

    /// Extract the surface into `destination`, replacing its contents.
    ///
    /// # Arguments
    /// * `provider` - The field to read (must not change during the call)
    /// * `destination` - Buffers to overwrite with the new mesh
    ///
    /// # Errors
    /// * `InvalidExtent` / `ExtentTooLarge` - The extent is rejected by
    ///   [`FieldExtent::validate`]; the destination is left untouched
    /// * `CoordOutOfBounds` - The provider lacks a sample inside its extent
    /// * `IndexOverflow` - The accumulated mesh outgrows `u32` indices
    pub fn rebuild<P: SampleProvider>(
        &self,
        provider: &P,
        destination: &mut MeshBuffers,
    ) -> Result<ExtractionStats> {
        let extent = provider.extent();
        extent.validate()?;

        destination.clear();
        let mut stats = ExtractionStats::default();

        for cell in cell_coords(extent) {
            stats.cells_visited += 1;
            match self.process_cell(provider, cell)? {
                CellOutcome::Trivial => stats.trivial_cells += 1,
                CellOutcome::Surface { mesh, degenerate } => {
                    stats.surface_cells += 1;
                    stats.degenerate_clusters += degenerate;
                    match self.config.buffer_policy {
                        BufferPolicy::Accumulate => destination.append(mesh)?,
                        BufferPolicy::OverwritePerCell => destination.replace_with(mesh),
                    }
                }
            }
        }

        stats.triangles = destination.triangle_count();
        stats.vertices = destination.vertex_count();

        debug!(
            "extracted {} triangles from {} field: {} surface cells, {} trivial, {} degenerate clusters",
            stats.triangles, extent, stats.surface_cells, stats.trivial_cells, stats.degenerate_clusters
        );

        Ok(stats)
    }

    /// Extract the surface into new buffers.
    pub fn extract<P: SampleProvider>(&self, provider: &P) -> Result<MeshBuffers> {
        self.extract_with_stats(provider).map(|(mesh, _)| mesh)
    }

    /// Extract the surface into new buffers, returning the pass counters too.
    pub fn extract_with_stats<P: SampleProvider>(
        &self,
        provider: &P,
    ) -> Result<(MeshBuffers, ExtractionStats)> {
        let mut mesh = MeshBuffers::new();
        let stats = self.rebuild(provider, &mut mesh)?;
        Ok((mesh, stats))
    }

    /// Every inside corner of every cell, in walk order.
    ///
    /// A sample shared by several cells is reported once per cell. Intended
    /// for debug visualizers that mark inside samples.
    pub fn inside_corners<P: SampleProvider>(&self, provider: &P) -> Result<Vec<InsideCorner>> {
        let extent = provider.extent();
        extent.validate()?;

        let mut out = Vec::new();
        for cell in cell_coords(extent) {
            let classification = self.classify_cell(provider, cell)?;
            out.extend(
                classification
                    .inside_corners()
                    .map(|corner| InsideCorner::new(cell, corner)),
            );
        }
        Ok(out)
    }
}

/// Extract a field with the default configuration.
pub fn extract<P: SampleProvider>(provider: &P) -> Result<MeshBuffers> {
    SurfaceExtractor::default().extract(provider)
}

/// Rebuild `destination` from a field with the default configuration.
pub fn rebuild<P: SampleProvider>(provider: &P, destination: &mut MeshBuffers) -> Result<ExtractionStats> {
    SurfaceExtractor::default().rebuild(provider, destination)
}
