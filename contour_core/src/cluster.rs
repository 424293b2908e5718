//! Corner clustering and vertex placement.
//!
//! Each inside, crossing corner that has not yet been used seeds one triangle
//! together with its two nearest inside, crossing neighbours. Seeds are visited
//! in ascending corner order and every corner of an emitted triangle is marked
//! processed so it cannot seed another triangle in the same cell.
//!
//! # Example
//!
//! ```ignore
//! use contour_core::classify::CellClassification;
//! use contour_core::cluster::cluster_cell;
//! use contour_core::config::DegeneratePolicy;
//!
//! let classification = CellClassification::from_distances(&distances);
//! let clusters = cluster_cell(&classification, DegeneratePolicy::FallbackToCornerZero);
//! for cluster in clusters.iter() {
//!     println!("triangle over corners {:?}", cluster.corners);
//! }
//! ```

use crate::classify::CellClassification;
use crate::config::DegeneratePolicy;
use crate::mesh::CellMesh;
use crate::topology::{corner_direction, corner_offset, CORNER_COUNT};
use crate::types::{CellCoord, Point3, Uv};

/// Corner used for an unfilled neighbour slot under
/// [`DegeneratePolicy::FallbackToCornerZero`].
pub const FALLBACK_CORNER: usize = 0;

/// The two nearest candidate corners to a seed, if that many exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NearestPair {
    /// The closest candidate.
    pub first: Option<usize>,
    /// The second closest candidate.
    pub second: Option<usize>,
}

impl NearestPair {
    /// True when fewer than two neighbours were found.
    #[inline]
    pub const fn is_degenerate(&self) -> bool {
        self.first.is_none() || self.second.is_none()
    }
}

/// Find the two candidate corners nearest to `seed`, excluding the seed.
///
/// Candidates are scanned in ascending index order and only a strictly
/// smaller distance displaces a slot, so among equal distances the corner
/// seen first wins.
pub fn nearest_pair(classification: &CellClassification, seed: usize) -> NearestPair {
    let origin = corner_offset(seed);
    let mut first: Option<(usize, f64)> = None;
    let mut second: Option<(usize, f64)> = None;

    for corner in 0..CORNER_COUNT {
        if corner == seed || !classification.is_candidate(corner) {
            continue;
        }
        let distance = corner_offset(corner).distance(origin);

        if first.map_or(true, |(_, best)| distance < best) {
            second = first;
            first = Some((corner, distance));
        } else if second.map_or(true, |(_, best)| distance < best) {
            second = Some((corner, distance));
        }
    }

    NearestPair {
        first: first.map(|(c, _)| c),
        second: second.map(|(c, _)| c),
    }
}

/// One emitted triangle, as corner indices in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cluster {
    /// `[nearest, second nearest, seed]`.
    pub corners: [usize; 3],
    /// True when a neighbour slot was filled by [`FALLBACK_CORNER`].
    pub degenerate: bool,
}

impl Cluster {
    /// The seed corner that anchored this triangle.
    #[inline]
    pub const fn seed(&self) -> usize {
        self.corners[2]
    }
}

/// The clusters formed in one cell, stored without allocation.
///
/// A cell has at most one seed per corner, so 8 slots always suffice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellClusters {
    clusters: [Cluster; CORNER_COUNT],
    len: usize,
    degenerate_seeds: usize,
}

impl CellClusters {
    /// Number of triangles formed.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// True when no triangle was formed.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Seeds that had fewer than two neighbours, whatever the policy did with them.
    #[inline]
    pub const fn degenerate_seeds(&self) -> usize {
        self.degenerate_seeds
    }

    /// The formed clusters, in emission order.
    #[inline]
    pub fn as_slice(&self) -> &[Cluster] {
        &self.clusters[..self.len]
    }

    /// Iterate the formed clusters in emission order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Cluster> {
        self.as_slice().iter()
    }

    fn push(&mut self, cluster: Cluster) {
        self.clusters[self.len] = cluster;
        self.len += 1;
    }
}

impl<'a> IntoIterator for &'a CellClusters {
    type Item = &'a Cluster;
    type IntoIter = core::slice::Iter<'a, Cluster>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Group the candidate corners of a classified cell into triangles.
///
/// # Arguments
/// * `classification` - Inside and crossing flags of the cell
/// * `policy` - What to do with a seed that has fewer than two neighbours
///
/// # Returns
/// The clusters in emission order. Trivial cells yield no clusters.
pub fn cluster_cell(classification: &CellClassification, policy: DegeneratePolicy) -> CellClusters {
    let mut out = CellClusters::default();
    if classification.is_trivial() {
        return out;
    }

    let mut processed = [false; CORNER_COUNT];

    for seed in 0..CORNER_COUNT {
        if !classification.is_candidate(seed) || processed[seed] {
            continue;
        }

        let pair = nearest_pair(classification, seed);
        let degenerate = pair.is_degenerate();
        if degenerate {
            out.degenerate_seeds += 1;
        }

        let (c1, c2) = match (pair.first, pair.second, policy) {
            (Some(c1), Some(c2), _) => (c1, c2),
            (first, second, DegeneratePolicy::FallbackToCornerZero) => (
                first.unwrap_or(FALLBACK_CORNER),
                second.unwrap_or(FALLBACK_CORNER),
            ),
            (_, _, DegeneratePolicy::Skip) => {
                processed[seed] = true;
                continue;
            }
        };

        processed[c1] = true;
        processed[c2] = true;
        processed[seed] = true;

        out.push(Cluster {
            corners: [c1, c2, seed],
            degenerate,
        });
    }

    out
}

/// Position of an emitted vertex for a cell corner.
///
/// The corner's world position is pushed along the direction from the cell
/// centre to the corner by the corner's signed distance:
/// `origin + offset + distance * normalize(offset - 0.5)`.
#[inline]
pub fn displace_corner(cell: CellCoord, corner: usize, distance: f64) -> Point3 {
    let world = cell.to_point() + corner_offset(corner);
    world + distance * corner_direction(corner)
}

/// Append the vertex for `corner` to a cell mesh.
///
/// Pushes the displaced position, a zero UV and the next sequential index.
/// The corner index is taken modulo [`CORNER_COUNT`], as in [`corner_offset`].
/// Cell meshes are small (at most 24 vertices), so the index fits in a `u32`.
pub fn add_corner(mesh: &mut CellMesh, cell: CellCoord, corner: usize, distances: &[f64; CORNER_COUNT]) {
    let corner = corner % CORNER_COUNT;
    let index = mesh.vertices.len() as u32;
    mesh.vertices.push(displace_corner(cell, corner, distances[corner]));
    mesh.uvs.push(Uv::ZERO);
    mesh.triangles.push(index);
}

/// Emit every cluster of a cell into a fresh [`CellMesh`].
pub fn emit_clusters(
    clusters: &CellClusters,
    cell: CellCoord,
    distances: &[f64; CORNER_COUNT],
) -> CellMesh {
    let mut mesh = CellMesh::with_capacity(clusters.len() * 3);
    for cluster in clusters {
        for &corner in &cluster.corners {
            add_corner(&mut mesh, cell, corner, distances);
        }
    }
    mesh
}
