//! Land seeding and coastline refinement.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::biome::Biome;
use crate::grid::{BiomeGrid, BlockBand};
use super::{band_rng, for_each_band};

/// Turn each `zoom` block into land with probability `land_probability`.
///
/// Blocks that lose the draw keep whatever they held.
pub fn first_islands(grid: &mut BiomeGrid, zoom: usize, land_probability: f64, seed: u64) {
    for_each_band(grid, zoom, |band| first_islands_band(band, land_probability, seed));
}

fn first_islands_band(mut band: BlockBand<'_>, land_probability: f64, seed: u64) {
    let mut rng = band_rng(seed, band.index());
    for col in band.block_cols() {
        if rng.gen_bool(land_probability) {
            band.fill_block(col, Biome::Land);
        }
    }
}

/// Roughen coastlines around existing land.
///
/// Visits every `2·zoom` origin. Where the snapshot holds land there, the 4×4
/// neighbourhood of `zoom` sub-blocks at offsets `-zoom, 0, +zoom, +2·zoom`
/// (rows × columns) is re-rolled: each sub-block independently becomes land
/// with probability `add_probability`, otherwise ocean.
///
/// Sub-blocks whose origin falls outside `[0, N - zoom]` are skipped without
/// consuming a draw. Neighbourhoods of adjacent origins overlap, so origins
/// are processed in row-major order from a single generator and later
/// sub-blocks overwrite earlier ones.
pub fn add_islands(grid: &mut BiomeGrid, zoom: usize, add_probability: f64, seed: u64) {
    let snapshot = grid.clone();
    let size = grid.size();
    let last = size - zoom;
    let mut rng = StdRng::seed_from_u64(seed);

    for i in (0..size).step_by(zoom * 2) {
        for j in (0..size).step_by(zoom * 2) {
            if snapshot.get(i, j) != Biome::Land {
                continue;
            }
            for k in sub_block_origins(i, zoom, last) {
                for m in sub_block_origins(j, zoom, last) {
                    let biome = if rng.gen_bool(add_probability) { Biome::Land } else { Biome::Ocean };
                    grid.fill_block(k, m, zoom, biome);
                }
            }
        }
    }
}

/// In-range sub-block origins along one axis, in ascending order.
fn sub_block_origins(origin: usize, zoom: usize, last: usize) -> impl Iterator<Item = usize> {
    [
        origin.checked_sub(zoom),
        Some(origin),
        Some(origin + zoom),
        Some(origin + zoom * 2),
    ]
    .into_iter()
    .flatten()
    .filter(move |&k| k <= last)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::for_each_band_reversed;

    #[test]
    fn sub_block_origins_clip_both_edges() {
        let at_top: Vec<usize> = sub_block_origins(0, 4, 12).collect();
        assert_eq!(at_top, vec![0, 4, 8]);
        let interior: Vec<usize> = sub_block_origins(8, 2, 14).collect();
        assert_eq!(interior, vec![6, 8, 10, 12]);
        let at_bottom: Vec<usize> = sub_block_origins(8, 4, 12).collect();
        assert_eq!(at_bottom, vec![4, 8, 12]);
    }

    #[test]
    fn first_islands_certain_land_covers_grid() {
        let mut grid = BiomeGrid::new(16);
        first_islands(&mut grid, 8, 1.0, 3);
        assert!(grid.cells().iter().all(|&b| b == Biome::Land));
    }

    #[test]
    fn first_islands_zero_probability_leaves_grid() {
        let mut grid = BiomeGrid::new(16);
        grid.fill_block(0, 0, 8, Biome::Cold);
        let before = grid.clone();
        first_islands(&mut grid, 4, 0.0, 3);
        assert_eq!(grid, before);
    }

    #[test]
    fn first_islands_writes_uniform_blocks() {
        let mut grid = BiomeGrid::new(64);
        first_islands(&mut grid, 8, 0.5, 11);
        for r in (0..64).step_by(8) {
            for c in (0..64).step_by(8) {
                assert!(grid.is_block_uniform(r, c, 8), "block ({r}, {c})");
            }
        }
        let land = grid.counts().get(Biome::Land);
        assert!(land > 0 && land < 64 * 64, "expected a mix of land and ocean, got {land} land cells");
    }

    #[test]
    fn first_islands_does_not_depend_on_band_order() {
        let mut forward = BiomeGrid::new(64);
        first_islands(&mut forward, 4, 0.3, 17);

        let mut reversed = BiomeGrid::new(64);
        for_each_band_reversed(&mut reversed, 4, |band| first_islands_band(band, 0.3, 17));

        assert_eq!(forward, reversed);
    }

    #[test]
    fn add_islands_ignores_ocean_origins() {
        let mut grid = BiomeGrid::new(16);
        add_islands(&mut grid, 4, 1.0, 5);
        assert!(grid.cells().iter().all(|&b| b == Biome::Ocean));
    }

    #[test]
    fn add_islands_grows_land_around_a_seed() {
        let mut grid = BiomeGrid::new(32);
        grid.fill_block(8, 8, 8, Biome::Land);
        add_islands(&mut grid, 4, 1.0, 5);
        // Origin (8, 8) sees land; its neighbourhood spans rows/cols 4..20.
        for r in 0..32 {
            for c in 0..32 {
                let inside = (4..20).contains(&r) && (4..20).contains(&c);
                let expected = if inside { Biome::Land } else { Biome::Ocean };
                assert_eq!(grid.get(r, c), expected, "cell ({r}, {c})");
            }
        }
    }

    #[test]
    fn add_islands_reads_snapshot_not_own_writes() {
        // Origin (0, 0) is land and re-rolls (0..12) to ocean. Origin (8, 8)
        // was land in the snapshot and must still be processed even though
        // the first neighbourhood overwrote its top-left cell.
        let mut grid = BiomeGrid::new(16);
        grid.fill(Biome::Land);
        add_islands(&mut grid, 4, 0.0, 9);
        assert!(grid.cells().iter().all(|&b| b == Biome::Ocean));
    }

    #[test]
    fn add_islands_clips_at_last_row_and_column() {
        let size = 32;
        let zoom = 4;
        let mut grid = BiomeGrid::new(size);
        let seed_origin = size - 2 * zoom;
        grid.fill_block(seed_origin, seed_origin, 2 * zoom, Biome::Land);

        add_islands(&mut grid, zoom, 1.0, 21);

        // Offsets -zoom, 0, +zoom are written; +2·zoom would start at `size` and is skipped.
        let lo = seed_origin - zoom;
        for r in 0..size {
            for c in 0..size {
                let inside = r >= lo && c >= lo;
                let expected = if inside { Biome::Land } else { Biome::Ocean };
                assert_eq!(grid.get(r, c), expected, "cell ({r}, {c})");
            }
        }
        assert_eq!(grid.cells().len(), size * size);
    }

    #[test]
    fn add_islands_skipped_blocks_consume_no_draws() {
        // Corner seed: the -zoom candidates are skipped, so the 9 in-range
        // sub-blocks take the first 9 draws of the stage generator in order.
        let zoom = 2;
        let mut corner = BiomeGrid::new(16);
        corner.fill_block(0, 0, 4, Biome::Land);
        add_islands(&mut corner, zoom, 0.5, 77);

        let mut rng = StdRng::seed_from_u64(77);
        for k in [0, 2, 4] {
            for m in [0, 2, 4] {
                let expected = if rng.gen_bool(0.5) { Biome::Land } else { Biome::Ocean };
                assert_eq!(corner.get(k, m), expected, "sub-block ({k}, {m})");
            }
        }
    }

    #[test]
    fn add_islands_is_deterministic_per_seed() {
        let mut a = BiomeGrid::new(64);
        a.fill_block(16, 16, 16, Biome::Land);
        let mut b = a.clone();
        add_islands(&mut a, 4, 0.5, 1234);
        add_islands(&mut b, 4, 0.5, 1234);
        assert_eq!(a, b);
    }
}
