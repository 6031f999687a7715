//! Cave generation library
//!
//! Seeded cellular-automaton caves meshed with marching squares.
//! [`generate_map`] runs the whole pipeline for one request; the modules
//! expose each stage for tools and tests.

pub mod cave;
pub mod error;
pub mod marching;
pub mod params;
pub mod seeds;
pub mod tilemap;

use log::info;

pub use cave::{CaveGrid, SmoothingMode, Tile};
pub use error::{CaveError, Result};
pub use marching::{Mesh, MeshStats, SquareGrid, Vec3};
pub use params::{CavePreset, CaveParams};
pub use seeds::CaveSeed;

/// Output of one generation request.
#[derive(Clone, Debug)]
pub struct CaveMap {
    /// Seed that reproduces this map
    pub seed: CaveSeed,
    /// Smoothed grid before any meshing border is added
    pub grid: CaveGrid,
    pub mesh: Mesh,
    pub stats: MeshStats,
}

/// Generate a grid, build its dual grid and triangulate it.
///
/// Parameters are validated before anything is allocated.
pub fn generate_map(params: &CaveParams) -> Result<CaveMap> {
    let (seed, grid) = cave::generate(params)?;

    let meshed = cave::add_border(&grid, params.border_size);
    let mut squares = SquareGrid::build(&meshed, params.cell_size);
    let mesh = marching::triangulate(&mut squares);
    let stats = MeshStats::collect(&squares, &mesh);

    info!(
        "Generated {}x{} cave (seed {}): {:.1}% wall, {} vertices, {} triangles",
        grid.width,
        grid.height,
        seed,
        grid.wall_fraction() * 100.0,
        stats.vertex_count,
        stats.triangle_count
    );

    Ok(CaveMap { seed, grid, mesh, stats })
}
