use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use cave_generator::{generate_map, CaveParams, CavePreset, CaveSeed, SmoothingMode};

#[derive(Parser, Debug)]
#[command(name = "cave_generator")]
#[command(about = "Generate cellular-automaton caves and mesh them with marching squares")]
struct Args {
    /// Load parameters from a JSON file (command-line flags override it)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start from a preset: open, balanced, dense or labyrinth
    #[arg(short, long)]
    preset: Option<CavePreset>,

    /// Width of the grid in cells
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the grid in cells
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Numeric seed
    #[arg(short, long, conflicts_with = "seed_text")]
    seed: Option<u64>,

    /// Text seed, hashed into a numeric one
    #[arg(long)]
    seed_text: Option<String>,

    /// Ignore any pinned seed and draw a fresh one
    #[arg(short, long)]
    random_seed: bool,

    /// Chance (0-100) that an interior cell starts as wall
    #[arg(short, long)]
    fill: Option<u32>,

    /// Number of smoothing passes
    #[arg(short = 'i', long)]
    smoothing: Option<usize>,

    /// World-space size of one cell
    #[arg(long)]
    cell_size: Option<f32>,

    /// Solid wall margin added around the grid before meshing
    #[arg(short, long)]
    border: Option<usize>,

    /// Smooth in place, letting later cells see earlier updates
    #[arg(long)]
    in_place: bool,

    /// Print the resolved parameters as JSON and exit
    #[arg(long)]
    print_params: bool,

    /// Print the seed and mesh statistics as JSON instead of a summary
    #[arg(long)]
    json: bool,
}

impl Args {
    fn resolve_params(&self) -> Result<CaveParams, Box<dyn Error>> {
        let mut params = match (&self.config, self.preset) {
            (Some(path), _) => CaveParams::load_json(path)?,
            (None, Some(preset)) => preset.params(),
            (None, None) => CaveParams::default(),
        };

        if let (Some(_), Some(preset)) = (&self.config, self.preset) {
            let preset_params = preset.params();
            params.fill_percent = preset_params.fill_percent;
            params.smoothing_iterations = preset_params.smoothing_iterations;
        }
        if let Some(width) = self.width {
            params.width = width;
        }
        if let Some(height) = self.height {
            params.height = height;
        }
        if let Some(seed) = self.seed {
            params.seed = seed.into();
        }
        if let Some(text) = &self.seed_text {
            params.seed = CaveSeed::from_text(text);
        }
        if self.random_seed {
            params.use_random_seed = true;
        }
        if let Some(fill) = self.fill {
            params.fill_percent = fill;
        }
        if let Some(smoothing) = self.smoothing {
            params.smoothing_iterations = smoothing;
        }
        if let Some(cell_size) = self.cell_size {
            params.cell_size = cell_size;
        }
        if let Some(border) = self.border {
            params.border_size = border;
        }
        if self.in_place {
            params.smoothing_mode = SmoothingMode::InPlace;
        }

        Ok(params)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();
    let params = args.resolve_params()?;

    if args.print_params {
        println!("{}", serde_json::to_string_pretty(&params)?);
        return Ok(());
    }

    if !args.json {
        println!("Map size: {}x{} (cell size {})", params.width, params.height, params.cell_size);
        println!(
            "Fill {}%, {} smoothing passes ({:?})",
            params.fill_percent, params.smoothing_iterations, params.smoothing_mode
        );
    }

    let map = generate_map(&params)?;

    if args.json {
        let report = serde_json::json!({ "seed": map.seed, "stats": map.stats });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Seed: {}", map.seed);
    println!("Walls: {} cells ({:.1}%)", map.grid.wall_count(), map.grid.wall_fraction() * 100.0);
    println!("Mesh: {} vertices, {} triangles", map.stats.vertex_count, map.stats.triangle_count);
    println!("Square configurations:");
    for (configuration, count) in map.stats.configurations.iter().enumerate() {
        if *count > 0 {
            println!("  {:>2} ({:04b}): {}", configuration, configuration, count);
        }
    }

    Ok(())
}
