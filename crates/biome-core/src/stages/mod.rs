//! Stage catalogue.
//!
//! Every stage mutates the grid in place. Stages that consult neighbors take
//! a snapshot on entry so their reads never see their own writes.
//!
//! Randomness: each stage receives one 64-bit seed from the run's master
//! generator. Block-parallel stages derive one generator per row band from
//! `(stage seed, band index)`, which keeps results independent of the order
//! (or thread) in which bands are processed.

pub mod islands;
pub mod oceans;
pub mod temperature;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, GeneratorConfig};
use crate::grid::{BiomeGrid, BlockBand};
use temperature::TemperatureTable;

// ── Stage descriptor ─────────────────────────────────────────────────────────

/// One entry of the pipeline schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum Stage {
    /// Reset every cell to ocean. Operates on the whole grid.
    Oceans,
    /// Seed sparse land blocks.
    FirstIslands { zoom: usize },
    /// Re-roll the neighbourhood of existing land at a finer resolution.
    AddIslands { zoom: usize },
    /// Break up blocks whose four neighbours are all ocean.
    RemoveTooMuchOcean { zoom: usize },
    /// Mark ocean blocks away from any coast.
    AddDeepOcean { zoom: usize },
    /// Replace land with a temperature sub-biome.
    AddTemperatures { zoom: usize },
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Oceans                     => "Oceans",
            Stage::FirstIslands { .. }        => "First Islands",
            Stage::AddIslands { .. }          => "Add Islands",
            Stage::RemoveTooMuchOcean { .. }  => "Remove Too Much Ocean",
            Stage::AddDeepOcean { .. }        => "Add Deep Ocean",
            Stage::AddTemperatures { .. }     => "Add Temperatures",
        }
    }

    /// Block size this stage writes. [`Stage::Oceans`] covers the whole grid.
    pub fn zoom(&self, grid_size: usize) -> usize {
        match *self {
            Stage::Oceans => grid_size,
            Stage::FirstIslands { zoom }
            | Stage::AddIslands { zoom }
            | Stage::RemoveTooMuchOcean { zoom }
            | Stage::AddDeepOcean { zoom }
            | Stage::AddTemperatures { zoom } => zoom,
        }
    }

    /// Distance between visited block origins. Add Islands visits every other block.
    pub fn step(&self, grid_size: usize) -> usize {
        match *self {
            Stage::AddIslands { zoom } => zoom.saturating_mul(2),
            _ => self.zoom(grid_size),
        }
    }

    /// Display label, e.g. `"Add Islands (2048)"`.
    pub fn label(&self, grid_size: usize) -> String {
        format!("{} ({})", self.name(), self.zoom(grid_size))
    }

    /// Run the stage against `grid`.
    ///
    /// The schedule must already have passed [`GeneratorConfig::validate`].
    pub fn apply(&self, grid: &mut BiomeGrid, params: &StageParams, seed: u64) {
        match *self {
            Stage::Oceans => oceans::oceans(grid),
            Stage::FirstIslands { zoom } => {
                islands::first_islands(grid, zoom, params.land_probability, seed)
            }
            Stage::AddIslands { zoom } => {
                islands::add_islands(grid, zoom, params.add_land_probability, seed)
            }
            Stage::RemoveTooMuchOcean { zoom } => {
                oceans::remove_too_much_ocean(grid, zoom, params.remove_ocean_probability, seed)
            }
            Stage::AddDeepOcean { zoom } => oceans::add_deep_ocean(grid, zoom),
            Stage::AddTemperatures { zoom } => {
                temperature::add_temperatures(grid, zoom, &params.temperatures, seed)
            }
        }
    }

    /// The original island-only pipeline for a `grid_size` map.
    ///
    /// First Islands runs at a quarter of the map, then two halvings of Add
    /// Islands, then Remove Too Much Ocean at the finest of those zooms.
    pub fn classic_schedule(grid_size: usize) -> Vec<Stage> {
        let pixel = grid_size / 4;
        vec![
            Stage::Oceans,
            Stage::FirstIslands { zoom: pixel },
            Stage::AddIslands { zoom: pixel / 2 },
            Stage::AddIslands { zoom: pixel / 4 },
            Stage::RemoveTooMuchOcean { zoom: pixel / 4 },
        ]
    }

    /// Classic schedule followed by two more island refinements, deep ocean
    /// and temperatures.
    pub fn extended_schedule(grid_size: usize) -> Vec<Stage> {
        let pixel = grid_size / 4;
        let mut stages = Self::classic_schedule(grid_size);
        stages.extend([
            Stage::AddIslands { zoom: pixel / 8 },
            Stage::AddIslands { zoom: pixel / 16 },
            Stage::AddDeepOcean { zoom: pixel / 16 },
            Stage::AddTemperatures { zoom: pixel / 16 },
        ]);
        stages
    }
}

// ── Resolved parameters ──────────────────────────────────────────────────────

/// Stage constants resolved from a validated [`GeneratorConfig`].
#[derive(Debug, Clone)]
pub struct StageParams {
    pub land_probability: f64,
    pub add_land_probability: f64,
    pub remove_ocean_probability: f64,
    pub temperatures: TemperatureTable,
}

impl StageParams {
    pub fn from_config(config: &GeneratorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            land_probability: config.land_probability,
            add_land_probability: config.add_land_probability,
            remove_ocean_probability: config.remove_ocean_probability,
            temperatures: TemperatureTable::new(&config.temperature_weights)?,
        })
    }
}

// ── Band helpers ─────────────────────────────────────────────────────────────

/// Generator for one row band of a block-parallel stage.
pub(crate) fn band_rng(stage_seed: u64, band_index: usize) -> StdRng {
    let mixed = stage_seed ^ (band_index as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    StdRng::seed_from_u64(mixed)
}

/// Visit every `zoom`-row band of `grid`, in parallel with the `threading` feature.
pub(crate) fn for_each_band<F>(grid: &mut BiomeGrid, zoom: usize, f: F)
where
    F: Fn(BlockBand<'_>) + Send + Sync,
{
    #[cfg(feature = "threading")]
    {
        use rayon::prelude::*;
        grid.par_bands_mut(zoom).for_each(f);
    }
    #[cfg(not(feature = "threading"))]
    {
        grid.bands_mut(zoom).for_each(f);
    }
}

/// Visit bands bottom-up, for checking that results do not depend on band order.
#[cfg(test)]
pub(crate) fn for_each_band_reversed<F>(grid: &mut BiomeGrid, zoom: usize, f: F)
where
    F: Fn(BlockBand<'_>),
{
    let bands: Vec<BlockBand<'_>> = grid.bands_mut(zoom).collect();
    bands.into_iter().rev().for_each(f);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_use_stage_zoom() {
        assert_eq!(Stage::Oceans.label(16384), "Oceans (16384)");
        assert_eq!(Stage::AddIslands { zoom: 2048 }.label(16384), "Add Islands (2048)");
        assert_eq!(
            Stage::RemoveTooMuchOcean { zoom: 1024 }.label(16384),
            "Remove Too Much Ocean (1024)"
        );
    }

    #[test]
    fn add_islands_steps_two_blocks() {
        assert_eq!(Stage::AddIslands { zoom: 4 }.step(16), 8);
        assert_eq!(Stage::FirstIslands { zoom: 4 }.step(16), 4);
        assert_eq!(Stage::Oceans.step(16), 16);
        assert_eq!(Stage::AddIslands { zoom: usize::MAX }.step(16), usize::MAX);
    }

    #[test]
    fn classic_schedule_matches_reference_zooms() {
        let stages = Stage::classic_schedule(16384);
        assert_eq!(
            stages,
            vec![
                Stage::Oceans,
                Stage::FirstIslands { zoom: 4096 },
                Stage::AddIslands { zoom: 2048 },
                Stage::AddIslands { zoom: 1024 },
                Stage::RemoveTooMuchOcean { zoom: 1024 },
            ]
        );
    }

    #[test]
    fn extended_schedule_extends_classic_and_never_coarsens() {
        let classic = Stage::classic_schedule(16384);
        let extended = Stage::extended_schedule(16384);
        assert_eq!(&extended[..classic.len()], classic.as_slice());
        assert_eq!(extended.last(), Some(&Stage::AddTemperatures { zoom: 256 }));
        for pair in extended.windows(2) {
            assert!(pair[1].zoom(16384) <= pair[0].zoom(16384), "{pair:?}");
        }
    }

    #[test]
    fn stage_serializes_with_tag() {
        let json = serde_json::to_string(&Stage::AddDeepOcean { zoom: 256 }).unwrap();
        assert_eq!(json, r#"{"stage":"add_deep_ocean","zoom":256}"#);
        let back: Stage = serde_json::from_str(r#"{"stage":"oceans"}"#).unwrap();
        assert_eq!(back, Stage::Oceans);
    }

    #[test]
    fn band_generators_differ_per_band() {
        use rand::Rng;
        let a: u64 = band_rng(7, 0).gen();
        let b: u64 = band_rng(7, 1).gen();
        let again: u64 = band_rng(7, 0).gen();
        assert_ne!(a, b);
        assert_eq!(a, again);
    }
}
