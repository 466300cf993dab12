//! Ocean stages: base fill, open-ocean breakup and deep water.

use rand::Rng;

use crate::biome::Biome;
use crate::grid::{BiomeGrid, BlockBand};
use crate::neighbors::neighbors_satisfy;
use super::{band_rng, for_each_band};

fn is_ocean(b: Biome) -> bool {
    b == Biome::Ocean
}

/// Reset the whole grid to ocean.
pub fn oceans(grid: &mut BiomeGrid) {
    grid.fill(Biome::Ocean);
}

/// Re-roll every block whose in-bounds neighbours are all ocean in the
/// snapshot: land with probability `remove_probability`, ocean otherwise.
///
/// The block's own value is not consulted, so an isolated land block
/// surrounded by ocean is re-rolled as well.
pub fn remove_too_much_ocean(grid: &mut BiomeGrid, zoom: usize, remove_probability: f64, seed: u64) {
    let snapshot = grid.clone();
    for_each_band(grid, zoom, |band| {
        remove_too_much_ocean_band(&snapshot, band, zoom, remove_probability, seed)
    });
}

fn remove_too_much_ocean_band(
    snapshot: &BiomeGrid,
    mut band: BlockBand<'_>,
    zoom: usize,
    remove_probability: f64,
    seed: u64,
) {
    let mut rng = band_rng(seed, band.index());
    let row = band.row();
    for col in band.block_cols() {
        if neighbors_satisfy(snapshot, row, col, zoom, is_ocean) {
            let biome = if rng.gen_bool(remove_probability) { Biome::Land } else { Biome::Ocean };
            band.fill_block(col, biome);
        }
    }
}

/// Mark ocean blocks whose in-bounds neighbours are all ocean as deep ocean.
pub fn add_deep_ocean(grid: &mut BiomeGrid, zoom: usize) {
    let snapshot = grid.clone();
    for_each_band(grid, zoom, |mut band| {
        let row = band.row();
        for col in band.block_cols() {
            if snapshot.get(row, col) == Biome::Ocean
                && neighbors_satisfy(&snapshot, row, col, zoom, is_ocean)
            {
                band.fill_block(col, Biome::DeepOcean);
            }
        }
    });
}
