//! Property-based tests over random fields and inside masks.

use contour_core::{
    cell_coords, cluster_cell, corner_direction, corner_offset, extract, CellClassification,
    CellCoord, DegeneratePolicy, ExtractionConfig, FieldExtent, MeshBuffers, SampleProvider,
    SurfaceExtractor, VoxelField, CORNER_OFFSETS, EDGES,
};
use proptest::prelude::*;

/// Random field of 2..=5 samples per axis with distances in [-2, 2]
fn arb_field() -> impl Strategy<Value = VoxelField> {
    (2usize..=5, 2usize..=5, 2usize..=5).prop_flat_map(|(x, y, z)| {
        let extent = FieldExtent::new(x, y, z);
        prop::collection::vec(-2.0f64..2.0, extent.sample_count()).prop_map(move |samples| {
            VoxelField::from_samples(extent, samples).expect("sample count matches extent")
        })
    })
}

fn arb_policy() -> impl Strategy<Value = DegeneratePolicy> {
    prop_oneof![
        Just(DegeneratePolicy::FallbackToCornerZero),
        Just(DegeneratePolicy::Skip),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Crossing flags are exactly the endpoints of sign-changing edges
    #[test]
    fn crossing_matches_edge_scan(distances in prop::array::uniform8(-1.0f64..1.0)) {
        let c = CellClassification::from_distances(&distances);
        let inside = distances.map(|d| d <= 0.0);
        prop_assert_eq!(c.inside_flags(), inside);

        if c.is_trivial() {
            prop_assert_eq!(c.crossing_mask(), 0);
        } else {
            let mut expected = [false; 8];
            for &(a, b) in &EDGES {
                if inside[a] != inside[b] {
                    expected[a] = true;
                    expected[b] = true;
                }
            }
            prop_assert_eq!(c.crossing_flags(), expected);
        }
    }

    /// Uniform cells never produce clusters, under either policy
    #[test]
    fn trivial_cells_emit_nothing(inside in any::<bool>(), policy in arb_policy()) {
        let mask = if inside { u8::MAX } else { 0 };
        let c = CellClassification::from_inside_mask(mask);
        prop_assert!(cluster_cell(&c, policy).is_empty());
    }

    /// Each cluster consumes its seed, so no seed appears twice in a cell
    #[test]
    fn cluster_count_bounded_by_candidates(mask in 1u8..u8::MAX, policy in arb_policy()) {
        let c = CellClassification::from_inside_mask(mask);
        let clusters = cluster_cell(&c, policy);
        prop_assert!(clusters.len() >= 1 || policy == DegeneratePolicy::Skip);
        prop_assert!(clusters.len() <= c.candidate_mask().count_ones() as usize);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Accumulated buffers are well-formed with sequential indices
    #[test]
    fn accumulated_buffers_are_valid(field in arb_field()) {
        let mesh = extract(&field).unwrap();
        prop_assert!(mesh.validate().is_ok());
        prop_assert_eq!(mesh.vertex_count(), mesh.triangle_count() * 3);
        for (i, &index) in mesh.triangles.iter().enumerate() {
            prop_assert_eq!(index as usize, i);
        }
    }

    /// Every accumulated vertex obeys the displacement law exactly
    #[test]
    fn vertices_follow_displacement_law(field in arb_field()) {
        let extractor = SurfaceExtractor::default();
        let mesh = extractor.extract(&field).unwrap();

        let mut expected = Vec::with_capacity(mesh.vertex_count());
        for cell in cell_coords(field.extent()) {
            let distances = field.cell_distances(cell).unwrap();
            let c = CellClassification::from_distances(&distances);
            for cluster in cluster_cell(&c, DegeneratePolicy::FallbackToCornerZero).iter() {
                for &corner in &cluster.corners {
                    expected.push(
                        cell.to_point()
                            + corner_offset(corner)
                            + distances[corner] * corner_direction(corner),
                    );
                }
            }
        }
        prop_assert_eq!(mesh.vertices, expected);
    }

    /// Rebuilding the same field twice gives identical buffers
    #[test]
    fn rebuild_is_idempotent(field in arb_field(), legacy in any::<bool>()) {
        let config = if legacy { ExtractionConfig::legacy() } else { ExtractionConfig::default() };
        let extractor = SurfaceExtractor::new(config);

        let mut mesh = MeshBuffers::new();
        let first = extractor.rebuild(&field, &mut mesh).unwrap();
        let snapshot = mesh.clone();
        let second = extractor.rebuild(&field, &mut mesh).unwrap();

        prop_assert_eq!(first, second);
        prop_assert_eq!(snapshot, mesh);
    }

    /// Overwrite mode never holds more than one cell's worth of output
    #[test]
    fn overwrite_holds_single_cell(field in arb_field()) {
        let legacy = SurfaceExtractor::new(ExtractionConfig::legacy());
        let mesh = legacy.extract(&field).unwrap();
        prop_assert!(mesh.triangle_count() <= 8);

        let last = cell_coords(field.extent())
            .filter(|&cell| !legacy.classify_cell(&field, cell).unwrap().is_trivial())
            .last();
        match last {
            Some(cell) => {
                let expected = legacy.extract_cell(&field, cell).unwrap();
                prop_assert_eq!(mesh.vertices, expected.vertices);
                prop_assert_eq!(mesh.triangles, expected.triangles);
            }
            None => prop_assert!(mesh.is_empty()),
        }
    }

    /// Only samples that differ in sign from a neighbour can move the mesh
    #[test]
    fn sign_uniform_field_is_empty(value in 0.0f64..3.0, negate in any::<bool>()) {
        let d = if negate { -value } else { value };
        let field = VoxelField::filled(FieldExtent::new(3, 4, 2), d).unwrap();
        prop_assert!(extract(&field).unwrap().is_empty());
    }
}

#[test]
fn cell_corners_stay_inside_field() {
    let extent = FieldExtent::new(3, 2, 4);
    for cell in cell_coords(extent) {
        for &offset in &CORNER_OFFSETS {
            assert!(extent.contains(cell.corner(offset)));
        }
    }
    assert!(!extent.contains(CellCoord::new(2, 0, 0).corner(CORNER_OFFSETS[4])));
}
