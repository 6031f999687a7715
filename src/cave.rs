//! Cellular-automaton cave grids
//!
//! A grid starts as seeded noise (each interior cell is wall with
//! probability `fill_percent`), then a few smoothing passes pull every cell
//! toward the majority of its 8 neighbours. The outer ring is always wall,
//! so the finished cave is closed.
//!
//! Smoothing rule per cell, with out-of-bounds neighbours counted as wall:
//! - more than 4 wall neighbours: wall
//! - fewer than 4: open
//! - exactly 4: unchanged

use log::debug;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::params::CaveParams;
use crate::seeds::CaveSeed;
use crate::tilemap::Tilemap;

/// Neighbour count at which a cell keeps its previous state.
const TIE_COUNT: u8 = 4;

/// A single grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Tile {
    #[default]
    Open = 0,
    Wall = 1,
}

impl Tile {
    pub fn from_bit(bit: u8) -> Self {
        if bit == 0 {
            Tile::Open
        } else {
            Tile::Wall
        }
    }

    pub fn as_bit(self) -> u8 {
        self as u8
    }

    pub fn is_wall(self) -> bool {
        self == Tile::Wall
    }
}

/// Occupancy grid: `Wall` = 1, `Open` = 0.
pub type CaveGrid = Tilemap<Tile>;

/// How a smoothing pass sees neighbours that were already updated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingMode {
    /// Every cell reads the grid as it was at the start of the pass.
    #[default]
    Buffered,
    /// Cells are rewritten in scan order (x outer, y inner) and later cells
    /// see earlier results. Kept for reproducing legacy maps.
    InPlace,
}

impl Tilemap<Tile> {
    pub fn wall_count(&self) -> usize {
        self.as_slice().iter().filter(|tile| tile.is_wall()).count()
    }

    /// Fraction of cells that are wall (0.0 for an empty grid).
    pub fn wall_fraction(&self) -> f32 {
        if self.is_empty() {
            return 0.0;
        }
        self.wall_count() as f32 / self.len() as f32
    }

    /// Grid as 0/1 rows, bottom row first.
    pub fn to_bits(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|tile| tile.as_bit()).collect())
            .collect()
    }
}

/// Seeded noise fill. Border cells are forced to wall without consuming a
/// draw; interior cells draw from `0..100` in x-outer, y-inner order.
pub fn random_fill<R: Rng + ?Sized>(width: usize, height: usize, fill_percent: u32, rng: &mut R) -> CaveGrid {
    Tilemap::from_fn(width, height, |x, y| {
        if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
            Tile::Wall
        } else if rng.gen_range(0..100u32) < fill_percent {
            Tile::Wall
        } else {
            Tile::Open
        }
    })
}

/// Count wall cells among the 8 neighbours of (x, y). Cells outside the
/// grid count as wall, which grows walls inward from the edges.
pub fn surrounding_wall_count(grid: &CaveGrid, x: usize, y: usize) -> u8 {
    let mut count = 0;
    for ny in y as i64 - 1..=y as i64 + 1 {
        for nx in x as i64 - 1..=x as i64 + 1 {
            if nx == x as i64 && ny == y as i64 {
                continue;
            }
            if grid.in_bounds(nx, ny) {
                count += grid.get(nx as usize, ny as usize).as_bit();
            } else {
                count += 1;
            }
        }
    }
    count
}

fn next_tile(wall_neighbours: u8, current: Tile) -> Tile {
    match wall_neighbours.cmp(&TIE_COUNT) {
        std::cmp::Ordering::Greater => Tile::Wall,
        std::cmp::Ordering::Less => Tile::Open,
        std::cmp::Ordering::Equal => current,
    }
}

/// Run one smoothing pass over the grid.
pub fn smooth(grid: &mut CaveGrid, mode: SmoothingMode) {
    match mode {
        SmoothingMode::Buffered => {
            let snapshot = grid.clone();
            let width = grid.width;
            grid.as_mut_slice()
                .par_chunks_mut(width.max(1))
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, tile) in row.iter_mut().enumerate() {
                        *tile = next_tile(surrounding_wall_count(&snapshot, x, y), *tile);
                    }
                });
        }
        SmoothingMode::InPlace => {
            for x in 0..grid.width {
                for y in 0..grid.height {
                    let count = surrounding_wall_count(grid, x, y);
                    let tile = grid.get_mut(x, y);
                    *tile = next_tile(count, *tile);
                }
            }
        }
    }
}

/// Fill and smooth a grid from an injected random stream.
///
/// Dimensions and fill percent are assumed valid; see [`CaveParams::validate`].
pub fn generate_grid<R: Rng + ?Sized>(
    width: usize,
    height: usize,
    fill_percent: u32,
    smoothing_iterations: usize,
    mode: SmoothingMode,
    rng: &mut R,
) -> CaveGrid {
    let mut grid = random_fill(width, height, fill_percent, rng);
    debug!("Filled {}x{} grid: {:.1}% wall", width, height, grid.wall_fraction() * 100.0);

    for pass in 0..smoothing_iterations {
        smooth(&mut grid, mode);
        debug!("Smoothing pass {}/{}: {:.1}% wall", pass + 1, smoothing_iterations, grid.wall_fraction() * 100.0);
    }

    grid
}

/// Validate the request, resolve its seed and produce the smoothed grid.
/// The returned seed reproduces the grid when pinned.
pub fn generate(params: &CaveParams) -> Result<(CaveSeed, CaveGrid)> {
    params.validate()?;

    let seed = CaveSeed::resolve(params.seed, params.use_random_seed);
    let mut rng = seed.rng();
    let grid = generate_grid(
        params.width,
        params.height,
        params.fill_percent,
        params.smoothing_iterations,
        params.smoothing_mode,
        &mut rng,
    );
    Ok((seed, grid))
}

/// Surround the grid with `border_size` rings of solid wall.
pub fn add_border(grid: &CaveGrid, border_size: usize) -> CaveGrid {
    if border_size == 0 {
        return grid.clone();
    }
    let width = grid.width + border_size * 2;
    let height = grid.height + border_size * 2;
    Tilemap::from_fn(width, height, |x, y| {
        let inside_x = x >= border_size && x < border_size + grid.width;
        let inside_y = y >= border_size && y < border_size + grid.height;
        if inside_x && inside_y {
            *grid.get(x - border_size, y - border_size)
        } else {
            Tile::Wall
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn assert_border_is_wall(grid: &CaveGrid) {
        for (x, y, tile) in grid.iter() {
            if grid.is_border(x, y) {
                assert_eq!(*tile, Tile::Wall, "border cell ({x}, {y}) is open");
            }
        }
    }

    /// 5x5 grid with a wall border and the given interior walls.
    fn framed_grid(interior_walls: &[(usize, usize)]) -> CaveGrid {
        framed_grid_sized(5, interior_walls)
    }

    fn framed_grid_sized(size: usize, interior_walls: &[(usize, usize)]) -> CaveGrid {
        Tilemap::from_fn(size, size, |x, y| {
            if x == 0 || y == 0 || x + 1 == size || y + 1 == size || interior_walls.contains(&(x, y)) {
                Tile::Wall
            } else {
                Tile::Open
            }
        })
    }

    #[test]
    fn test_border_is_wall_after_every_pass() {
        for seed in [1u64, 7, 12345] {
            for fill in [0, 30, 48, 70, 100] {
                for mode in [SmoothingMode::Buffered, SmoothingMode::InPlace] {
                    let mut rng = CaveSeed(seed).rng();
                    let mut grid = random_fill(23, 17, fill, &mut rng);
                    assert_border_is_wall(&grid);
                    for _ in 0..6 {
                        smooth(&mut grid, mode);
                        assert_border_is_wall(&grid);
                    }
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_grid() {
        let params = CaveParams { width: 40, height: 30, seed: CaveSeed(99), ..CaveParams::default() };
        let (seed_a, grid_a) = generate(&params).unwrap();
        let (seed_b, grid_b) = generate(&params).unwrap();
        assert_eq!(seed_a, CaveSeed(99));
        assert_eq!(seed_a, seed_b);
        assert_eq!(grid_a, grid_b);
    }

    #[test]
    fn test_different_seeds_differ() {
        let a = generate(&CaveParams { seed: CaveSeed(1), ..CaveParams::default() }).unwrap().1;
        let b = generate(&CaveParams { seed: CaveSeed(2), ..CaveParams::default() }).unwrap().1;
        assert_ne!(a, b);
    }

    #[test]
    fn test_random_seed_is_reported_and_reproducible() {
        let params = CaveParams { width: 20, height: 20, use_random_seed: true, ..CaveParams::default() };
        let (seed, grid) = generate(&params).unwrap();

        let pinned = CaveParams { seed, use_random_seed: false, ..params };
        let (_, replay) = generate(&pinned).unwrap();
        assert_eq!(grid, replay);
    }

    #[test]
    fn test_invalid_request_rejected() {
        assert!(generate(&CaveParams { width: 0, ..CaveParams::default() }).is_err());
        assert!(generate(&CaveParams { fill_percent: 250, ..CaveParams::default() }).is_err());
    }

    #[test]
    fn test_fill_extremes() {
        let mut rng = CaveSeed(3).rng();
        let empty = random_fill(10, 8, 0, &mut rng);
        for (x, y, tile) in empty.iter() {
            assert_eq!(tile.is_wall(), empty.is_border(x, y));
        }

        let full = random_fill(10, 8, 100, &mut rng);
        assert_eq!(full.wall_count(), 80);
    }

    #[test]
    fn test_injected_stream_drives_fill() {
        // A constant zero stream always draws 0, which is below any positive fill.
        let mut zeros = StepRng::new(0, 0);
        let grid = random_fill(6, 6, 1, &mut zeros);
        assert_eq!(grid.wall_count(), 36);

        let mut zeros = StepRng::new(0, 0);
        let grid = random_fill(6, 6, 0, &mut zeros);
        assert_eq!(grid.wall_count(), 20);
    }

    #[test]
    fn test_out_of_bounds_counts_as_wall() {
        let grid = Tilemap::new_with(3, 3, Tile::Open);
        assert_eq!(surrounding_wall_count(&grid, 0, 0), 5);
        assert_eq!(surrounding_wall_count(&grid, 1, 0), 3);
        assert_eq!(surrounding_wall_count(&grid, 1, 1), 0);
    }

    #[test]
    fn test_tie_keeps_cell_unchanged() {
        let walls = [(1, 1), (2, 1), (3, 1), (1, 2)];

        let mut open_centre = framed_grid(&walls);
        assert_eq!(surrounding_wall_count(&open_centre, 2, 2), 4);
        smooth(&mut open_centre, SmoothingMode::Buffered);
        assert_eq!(*open_centre.get(2, 2), Tile::Open);

        let mut walls_with_centre = walls.to_vec();
        walls_with_centre.push((2, 2));
        let mut wall_centre = framed_grid(&walls_with_centre);
        assert_eq!(surrounding_wall_count(&wall_centre, 2, 2), 4);
        smooth(&mut wall_centre, SmoothingMode::Buffered);
        assert_eq!(*wall_centre.get(2, 2), Tile::Wall);
    }

    #[test]
    fn test_tie_keeps_cell_unchanged_in_place() {
        // Walls only after (3, 3) in scan order; the earlier neighbours
        // (2, 2), (2, 3), (2, 4) and (3, 2) stay open during the pass.
        let walls = [(4, 2), (4, 3), (4, 4), (3, 4)];

        let mut open_centre = framed_grid_sized(7, &walls);
        assert_eq!(surrounding_wall_count(&open_centre, 3, 3), 4);
        smooth(&mut open_centre, SmoothingMode::InPlace);
        assert_eq!(*open_centre.get(3, 3), Tile::Open);
        for (x, y) in [(2, 2), (2, 3), (2, 4), (3, 2)] {
            assert_eq!(*open_centre.get(x, y), Tile::Open);
        }

        let mut walls_with_centre = walls.to_vec();
        walls_with_centre.push((3, 3));
        let mut wall_centre = framed_grid_sized(7, &walls_with_centre);
        assert_eq!(surrounding_wall_count(&wall_centre, 3, 3), 4);
        smooth(&mut wall_centre, SmoothingMode::InPlace);
        assert_eq!(*wall_centre.get(3, 3), Tile::Wall);
    }

    #[test]
    fn test_majority_rule() {
        // Lone wall in open space disappears; lone hole in rock fills in.
        let mut speck = framed_grid(&[(2, 2)]);
        smooth(&mut speck, SmoothingMode::Buffered);
        assert_eq!(*speck.get(2, 2), Tile::Open);

        let all_interior: Vec<_> = (1..4).flat_map(|x| (1..4).map(move |y| (x, y))).filter(|&c| c != (2, 2)).collect();
        let mut hole = framed_grid(&all_interior);
        smooth(&mut hole, SmoothingMode::Buffered);
        assert_eq!(*hole.get(2, 2), Tile::Wall);
    }

    #[test]
    fn test_in_place_sees_earlier_updates() {
        // (2, 2) has 4 wall neighbours at the start of the pass. Scanning in
        // place, (1, 1) and (1, 3) turn to wall first and tip it over.
        let walls = [(1, 2), (2, 1), (2, 3), (3, 3)];

        let mut buffered = framed_grid(&walls);
        smooth(&mut buffered, SmoothingMode::Buffered);
        assert_eq!(*buffered.get(2, 2), Tile::Open);

        let mut in_place = framed_grid(&walls);
        smooth(&mut in_place, SmoothingMode::InPlace);
        assert_eq!(*in_place.get(2, 2), Tile::Wall);
    }

    #[test]
    fn test_add_border_wraps_grid() {
        let grid = Tilemap::new_with(3, 2, Tile::Open);
        let bordered = add_border(&grid, 2);
        assert_eq!((bordered.width, bordered.height), (7, 6));
        assert_eq!(bordered.wall_count(), 7 * 6 - 3 * 2);
        assert_eq!(*bordered.get(2, 2), Tile::Open);
        assert_eq!(*bordered.get(1, 2), Tile::Wall);
        assert_eq!(add_border(&grid, 0), grid);
    }

    #[test]
    fn test_bits_view() {
        let grid = framed_grid(&[]);
        let bits = grid.to_bits();
        assert_eq!(bits[0], vec![1, 1, 1, 1, 1]);
        assert_eq!(bits[2], vec![1, 0, 0, 0, 1]);
        assert_eq!(Tile::from_bit(1), Tile::Wall);
        assert_eq!(Tile::from_bit(0), Tile::Open);
    }
}
