//! Multi-scale biome map synthesis.
//!
//! An all-ocean grid is refined by an ordered schedule of stochastic stages
//! (island seeding, coastline roughening, open-ocean breakup, deep ocean,
//! temperatures), each writing uniform square blocks at a zoom no coarser
//! than the previous stage.

pub mod biome;
pub mod config;
pub mod generator;
pub mod grid;
pub mod legend;
pub mod neighbors;
pub mod stages;

pub use biome::Biome;
pub use config::{ConfigError, GeneratorConfig, TemperatureWeights};
pub use generator::{BiomeMap, BiomeMapGenerator, StageObserver};
pub use grid::{BiomeCounts, BiomeGrid};
pub use legend::Legend;
pub use stages::Stage;
