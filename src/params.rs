//! Cave generation parameters and configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::cave::SmoothingMode;
use crate::error::{CaveError, Result};
use crate::marching::node_capacity;
use crate::seeds::CaveSeed;

/// Cave shape preset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CavePreset {
    /// Wide chambers, thin walls
    Open,
    /// Mixed chambers and walls
    #[default]
    Balanced,
    /// Narrow passages through mostly solid rock
    Dense,
    /// Rough, barely smoothed tunnels
    Labyrinth,
}

impl CavePreset {
    pub fn all() -> &'static [Self] {
        &[Self::Open, Self::Balanced, Self::Dense, Self::Labyrinth]
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Open => "Wide chambers, thin walls",
            Self::Balanced => "Mixed chambers and walls",
            Self::Dense => "Narrow passages through solid rock",
            Self::Labyrinth => "Rough, barely smoothed tunnels",
        }
    }

    /// Default parameters with this preset's fill and smoothing.
    pub fn params(&self) -> CaveParams {
        let (fill_percent, smoothing_iterations) = match self {
            Self::Open => (40, 5),
            Self::Balanced => (48, 5),
            Self::Dense => (55, 5),
            Self::Labyrinth => (45, 1),
        };
        CaveParams {
            fill_percent,
            smoothing_iterations,
            ..CaveParams::default()
        }
    }
}

impl std::fmt::Display for CavePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Balanced => write!(f, "balanced"),
            Self::Dense => write!(f, "dense"),
            Self::Labyrinth => write!(f, "labyrinth"),
        }
    }
}

impl std::str::FromStr for CavePreset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|preset| preset.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown preset '{s}' (expected open, balanced, dense or labyrinth)"))
    }
}

/// Everything one generation request needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveParams {
    /// Grid cells along x
    pub width: usize,

    /// Grid cells along y (world z)
    pub height: usize,

    /// Chance (0-100) that an interior cell starts as wall
    pub fill_percent: u32,

    /// Seed used when `use_random_seed` is off
    pub seed: CaveSeed,

    /// Draw a fresh seed for every request
    pub use_random_seed: bool,

    /// Number of cellular-automaton smoothing passes
    pub smoothing_iterations: usize,

    /// World-space edge length of one grid cell
    pub cell_size: f32,

    /// Solid wall margin added around the smoothed grid before meshing
    pub border_size: usize,

    /// How a smoothing pass reads neighbours
    pub smoothing_mode: SmoothingMode,
}

impl Default for CaveParams {
    fn default() -> Self {
        Self {
            width: 64,
            height: 48,
            fill_percent: 48,
            seed: CaveSeed::default(),
            use_random_seed: false,
            smoothing_iterations: 5,
            cell_size: 1.0,
            border_size: 0,
            smoothing_mode: SmoothingMode::default(),
        }
    }
}

impl CaveParams {
    /// Reject anything the pipeline cannot honour. Fill percent is rejected
    /// rather than clamped so typos don't silently produce a solid map.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(CaveError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.fill_percent > 100 {
            return Err(CaveError::FillPercentOutOfRange(self.fill_percent));
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(CaveError::InvalidCellSize(self.cell_size));
        }

        match node_capacity(self.meshed_width(), self.meshed_height()) {
            Some(_) => Ok(()),
            None => Err(CaveError::GridTooLarge {
                width: self.width,
                height: self.height,
            }),
        }
    }

    /// Width of the grid handed to the mesher, border included.
    pub fn meshed_width(&self) -> usize {
        self.width.saturating_add(self.border_size.saturating_mul(2))
    }

    /// Height of the grid handed to the mesher, border included.
    pub fn meshed_height(&self) -> usize {
        self.height.saturating_add(self.border_size.saturating_mul(2))
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load parameters from a JSON file. Missing fields take their defaults.
    pub fn load_json(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| CaveError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }
}
