//! Temperature classification of land blocks.

use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;

use crate::biome::Biome;
use crate::config::{ConfigError, TemperatureWeights};
use crate::grid::{BiomeGrid, BlockBand};
use super::{band_rng, for_each_band};

/// Sub-biomes in the order their weights appear in [`TemperatureWeights`].
const CLIMATES: [Biome; 3] = [Biome::Warm, Biome::Cold, Biome::Freezing];

/// Weighted choice over [`Biome::Warm`], [`Biome::Cold`] and [`Biome::Freezing`].
#[derive(Debug, Clone)]
pub struct TemperatureTable {
    index: WeightedIndex<f64>,
}

impl TemperatureTable {
    pub fn new(weights: &TemperatureWeights) -> Result<Self, ConfigError> {
        let index = WeightedIndex::new([weights.warm, weights.cold, weights.freezing])?;
        Ok(Self { index })
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Biome {
        CLIMATES[self.index.sample(rng)]
    }
}

/// Replace every land block with a temperature sub-biome. Other blocks are untouched.
pub fn add_temperatures(grid: &mut BiomeGrid, zoom: usize, table: &TemperatureTable, seed: u64) {
    for_each_band(grid, zoom, |band| add_temperatures_band(band, table, seed));
}

fn add_temperatures_band(mut band: BlockBand<'_>, table: &TemperatureTable, seed: u64) {
    let mut rng = band_rng(seed, band.index());
    for col in band.block_cols() {
        // Each block is visited once, so the live value is still the stage-entry value.
        if band.get(col) == Biome::Land {
            band.fill_block(col, table.sample(&mut rng));
        }
    }
}
