//! Surface Extraction Demo
//!
//! This demo shows the rebuild trigger of contour_core end to end:
//! 1. Fill a voxel field with a built-in shape
//! 2. Rebuild the mesh with the accumulating buffer policy
//! 3. Rebuild again with the legacy per-cell overwrite policy
//! 4. Print mesh statistics for both
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run --release --bin extract_demo -- sphere 32
//! ```
//!
//! Shapes: `pattern` (the fixed 2x2x2 field), `sphere`, `plane`.

mod fields;

use std::env;
use std::process;

use instant::Instant;
use log::{info, warn};

use contour_core::{
    ExtractionConfig, ExtractionStats, MeshBuffers, MeshStats, SurfaceExtractor, VoxelField,
};

use fields::FieldShape;

/// Default edge length for the sized shapes.
const DEFAULT_SIZE: usize = 24;

fn main() {
    // Initialize logging
    env_logger::init();

    println!("═══════════════════════════════════════════════════════════════");
    println!("          Contour Surface Extraction");
    println!("═══════════════════════════════════════════════════════════════");
    println!();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    let shape = match args.get(1) {
        Some(name) => FieldShape::parse(name).unwrap_or_else(|| {
            eprintln!("Unknown shape '{}'. Expected pattern, sphere or plane.", name);
            process::exit(1);
        }),
        None => {
            println!("{}", usage(&args));
            println!();
            println!("Using default: pattern");
            println!();
            FieldShape::Pattern
        }
    };
    let size = match args.get(2).map(|s| s.parse::<usize>()) {
        Some(Ok(size)) => size,
        Some(Err(e)) => {
            warn!("ignoring size argument: {}", e);
            DEFAULT_SIZE
        }
        None => DEFAULT_SIZE,
    };

    // =========================================================================
    // Step 1: Initialize the field
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 1: Initialize Field                                    │");
    println!("└─────────────────────────────────────────────────────────────┘");

    let start = Instant::now();
    let field = match shape.build(size) {
        Ok(field) => field,
        Err(e) => {
            eprintln!("Error building {} field: {}", shape.name(), e);
            process::exit(1);
        }
    };
    let init_time = start.elapsed();

    if let Err(e) = field.validate() {
        eprintln!("Field rejected: {}", e);
        process::exit(1);
    }

    println!("  Shape:           {}", shape.name());
    println!("  Extent:          {}", field.extent());
    println!("  Cells:           {}", field.extent().cell_count());
    println!("  Inside samples:  {}", field.inside_count());
    println!("  Init time:       {:.3}ms", init_time.as_secs_f64() * 1e3);
    println!();

    // =========================================================================
    // Step 2: Rebuild (accumulate)
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 2: Rebuild, Accumulating Every Cell                    │");
    println!("└─────────────────────────────────────────────────────────────┘");

    let mut mesh = MeshBuffers::new();
    let accumulate = run_rebuild(&field, ExtractionConfig::default(), &mut mesh);
    print_mesh_stats(&mesh);

    // =========================================================================
    // Step 3: Rebuild (legacy overwrite)
    // =========================================================================
    println!("┌─────────────────────────────────────────────────────────────┐");
    println!("│ Step 3: Rebuild, Overwriting Per Cell (legacy)              │");
    println!("└─────────────────────────────────────────────────────────────┘");

    let mut legacy_mesh = MeshBuffers::new();
    let legacy = run_rebuild(&field, ExtractionConfig::legacy(), &mut legacy_mesh);
    print_mesh_stats(&legacy_mesh);

    // =========================================================================
    // Summary
    // =========================================================================
    println!("═══════════════════════════════════════════════════════════════");
    println!("  Accumulate kept {} triangles, overwrite kept {}.",
             accumulate.triangles, legacy.triangles);
    if accumulate.surface_cells > 1 {
        println!("  Overwrite discards all but the last of {} surface cells.",
                 accumulate.surface_cells);
    }
    println!("═══════════════════════════════════════════════════════════════");
}

/// Usage line, naming the program from argv when it is present.
fn usage(args: &[String]) -> String {
    let program = args.first().map_or("extract_demo", String::as_str);
    format!("Usage: {} [pattern|sphere|plane] [size]", program)
}

/// Rebuild `mesh` from `field`, print pass counters and return them.
fn run_rebuild(field: &VoxelField, config: ExtractionConfig, mesh: &mut MeshBuffers) -> ExtractionStats {
    let extractor = SurfaceExtractor::new(config);

    let start = Instant::now();
    let stats = match extractor.rebuild(field, mesh) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("Error extracting surface: {}", e);
            process::exit(1);
        }
    };
    let elapsed = start.elapsed();
    info!("rebuild with {:?} took {:?}", config, elapsed);

    println!("  Surface cells:   {}", stats.surface_cells);
    println!("  Trivial cells:   {}", stats.trivial_cells);
    println!("  Degenerate:      {}", stats.degenerate_clusters);
    println!("  Time:            {:.3}ms", elapsed.as_secs_f64() * 1e3);
    if elapsed.as_secs_f64() > 0.0 {
        println!("  Throughput:      {:.0} cells/sec",
                 stats.cells_visited as f64 / elapsed.as_secs_f64());
    }
    stats
}

fn print_mesh_stats(mesh: &MeshBuffers) {
    if let Err(e) = mesh.validate() {
        warn!("mesh buffers inconsistent: {}", e);
    }

    let stats = MeshStats::from_buffers(mesh);
    println!("  Triangle count:  {}", stats.triangle_count);
    println!("  Vertex count:    {}", stats.vertex_count);
    println!("  Surface area:    {:.4}", stats.surface_area);
    println!("  Bounding box:    ({:.2}, {:.2}, {:.2}) → ({:.2}, {:.2}, {:.2})",
             stats.bbox_min.x, stats.bbox_min.y, stats.bbox_min.z,
             stats.bbox_max.x, stats.bbox_max.y, stats.bbox_max.z);
    println!();
}
