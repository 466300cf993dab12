//! Pipeline orchestrator: runs the configured stage schedule in order.

use std::time::Instant;

use log::{debug, info, log_enabled, Level};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{ConfigError, GeneratorConfig};
use crate::grid::BiomeGrid;
use crate::legend::Legend;
use crate::stages::StageParams;

// ── Diagnostic hook ──────────────────────────────────────────────────────────

/// Receives the grid after each completed stage.
///
/// Purely observational: the grid is lent immutably and the next stage starts
/// once the observer returns.
pub trait StageObserver {
    fn stage_completed(&mut self, label: &str, grid: &BiomeGrid);
}

impl<F> StageObserver for F
where
    F: FnMut(&str, &BiomeGrid),
{
    fn stage_completed(&mut self, label: &str, grid: &BiomeGrid) {
        self(label, grid)
    }
}

/// Observer that ignores every stage.
pub struct NoopObserver;

impl StageObserver for NoopObserver {
    fn stage_completed(&mut self, _label: &str, _grid: &BiomeGrid) {}
}

// ── Output ───────────────────────────────────────────────────────────────────

/// Result of one generation run.
pub struct BiomeMap {
    pub grid: BiomeGrid,
    /// Seed that reproduces this map.
    pub seed: u64,
    pub generation_time_ms: u64,
}

impl BiomeMap {
    /// Colors for exactly the codes present in the grid.
    pub fn legend(&self) -> Legend {
        Legend::for_grid(&self.grid)
    }
}

// ── Orchestrator ─────────────────────────────────────────────────────────────

/// Validated configuration plus the stage constants derived from it.
#[derive(Debug, Clone)]
pub struct BiomeMapGenerator {
    config: GeneratorConfig,
    params: StageParams,
}

impl BiomeMapGenerator {
    /// Validate `config`. Nothing is generated if this fails.
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let params = StageParams::from_config(&config)?;
        Ok(Self { config, params })
    }

    /// Run the full schedule.
    pub fn generate(&self) -> BiomeMap {
        self.generate_with(&mut NoopObserver)
    }

    /// Run the full schedule, reporting each stage to `observer`.
    ///
    /// The master generator is seeded once per run and hands one seed to each
    /// stage in schedule order, so a fixed seed reproduces the grid exactly.
    pub fn generate_with<O: StageObserver + ?Sized>(&self, observer: &mut O) -> BiomeMap {
        let started = Instant::now();
        let size = self.config.size;
        let seed = self.config.seed.unwrap_or_else(rand::random);
        let mut master = StdRng::seed_from_u64(seed);

        info!(
            "generating {size}×{size} biome map: {} stages, seed {seed}",
            self.config.stages.len()
        );

        let mut grid = BiomeGrid::new(size);
        for stage in &self.config.stages {
            let stage_seed: u64 = master.gen();
            let label = stage.label(size);
            let stage_started = Instant::now();

            stage.apply(&mut grid, &self.params, stage_seed);

            if log_enabled!(Level::Debug) {
                let counts = grid.counts();
                debug!(
                    "{label}: {} ms, land fraction {:.4}",
                    stage_started.elapsed().as_millis(),
                    counts.land_fraction()
                );
            }
            observer.stage_completed(&label, &grid);
        }

        let generation_time_ms = started.elapsed().as_millis() as u64;
        info!("biome map complete in {generation_time_ms} ms");

        BiomeMap { grid, seed, generation_time_ms }
    }
}
