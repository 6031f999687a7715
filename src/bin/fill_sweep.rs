//! Compare cave density across fill percentages
//! Generates one map per fill value with a fixed seed and prints a table of
//! wall coverage and mesh size, so smoothing settings can be tuned by eye.

use std::error::Error;

use cave_generator::{generate_map, CaveParams, CaveSeed, SmoothingMode};

const WIDTH: usize = 96;
const HEIGHT: usize = 64;
const SEED: u64 = 42;
const FILLS: [u32; 9] = [30, 35, 40, 45, 48, 50, 55, 60, 65];

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    println!("Sweeping fill percent on a {}x{} map (seed {})...", WIDTH, HEIGHT, SEED);

    for mode in [SmoothingMode::Buffered, SmoothingMode::InPlace] {
        println!();
        println!("{:?} smoothing", mode);
        println!("{:>5} {:>8} {:>9} {:>10} {:>8}", "fill", "wall %", "vertices", "triangles", "saddles");

        for fill_percent in FILLS {
            let params = CaveParams {
                width: WIDTH,
                height: HEIGHT,
                fill_percent,
                seed: CaveSeed::from(SEED),
                smoothing_mode: mode,
                ..CaveParams::default()
            };
            let map = generate_map(&params)?;
            let saddles = map.stats.configurations[5] + map.stats.configurations[10];

            println!(
                "{:>5} {:>8.1} {:>9} {:>10} {:>8}",
                fill_percent,
                map.grid.wall_fraction() * 100.0,
                map.stats.vertex_count,
                map.stats.triangle_count,
                saddles
            );
        }
    }

    Ok(())
}
