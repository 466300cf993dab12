//! Generator configuration and its up-front validation.

use rand::distributions::WeightedError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stages::Stage;

// ── Reference constants ──────────────────────────────────────────────────────

/// Default grid side length.
pub const DEFAULT_SIZE: usize = 16_384;
/// Default probability that First Islands turns a block into land.
pub const DEFAULT_LAND_PROBABILITY: f64 = 0.1;
/// Default probability that an Add Islands sub-block becomes land.
pub const DEFAULT_ADD_LAND_PROBABILITY: f64 = DEFAULT_LAND_PROBABILITY * 5.0;
/// Default probability that Remove Too Much Ocean writes land.
pub const DEFAULT_REMOVE_OCEAN_PROBABILITY: f64 = 0.5;

/// Tolerance when checking that temperature weights sum to one.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

// ── Errors ───────────────────────────────────────────────────────────────────

/// Configuration problems. All are detected before any stage runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid size {0} must be a positive power of two whose square fits in memory")]
    InvalidSize(usize),
    #[error("stage schedule is empty")]
    EmptySchedule,
    #[error("stage {index} ({stage}): zoom must be positive")]
    ZeroZoom { index: usize, stage: &'static str },
    #[error("stage {index} ({stage}): step {step} exceeds grid size {size}")]
    ZoomTooLarge { index: usize, stage: &'static str, step: usize, size: usize },
    #[error("stage {index} ({stage}): step {step} does not divide grid size {size}")]
    ZoomNotDivisor { index: usize, stage: &'static str, step: usize, size: usize },
    #[error("stage {index} ({stage}): zoom {zoom} is coarser than the preceding zoom {previous}")]
    ZoomIncreases { index: usize, stage: &'static str, zoom: usize, previous: usize },
    #[error("{name} = {value} is outside [0, 1]")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    #[error("temperature weight {name} = {value} is outside [0, 1]")]
    WeightOutOfRange { name: &'static str, value: f64 },
    #[error("temperature weights sum to {sum}, expected 1")]
    WeightsDoNotSum { sum: f64 },
    #[error("temperature weights rejected: {0}")]
    Weights(#[from] WeightedError),
    #[error("invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

// ── Temperature weights ──────────────────────────────────────────────────────

/// Relative frequency of each temperature sub-biome among land blocks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureWeights {
    pub warm: f64,
    pub cold: f64,
    pub freezing: f64,
}

impl Default for TemperatureWeights {
    fn default() -> Self {
        Self {
            warm: 4.0 / 6.0,
            cold: 1.0 / 6.0,
            freezing: 1.0 / 6.0,
        }
    }
}

impl TemperatureWeights {
    pub fn sum(&self) -> f64 {
        self.warm + self.cold + self.freezing
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("warm", self.warm), ("cold", self.cold), ("freezing", self.freezing)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::WeightOutOfRange { name, value });
            }
        }
        let sum = self.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightsDoNotSum { sum });
        }
        Ok(())
    }
}

// ── Generator configuration ──────────────────────────────────────────────────

/// Everything a generation run needs. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Grid side length, a power of two.
    pub size: usize,
    /// Ordered stage schedule; zooms must never increase.
    pub stages: Vec<Stage>,
    pub land_probability: f64,
    pub add_land_probability: f64,
    pub remove_ocean_probability: f64,
    pub temperature_weights: TemperatureWeights,
    /// Fixed seed for reproducible runs. `None` draws a fresh one.
    pub seed: Option<u64>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self::extended(DEFAULT_SIZE)
    }
}

impl GeneratorConfig {
    /// Full pipeline including deep ocean and temperatures.
    pub fn extended(size: usize) -> Self {
        Self {
            size,
            stages: Stage::extended_schedule(size),
            land_probability: DEFAULT_LAND_PROBABILITY,
            add_land_probability: DEFAULT_ADD_LAND_PROBABILITY,
            remove_ocean_probability: DEFAULT_REMOVE_OCEAN_PROBABILITY,
            temperature_weights: TemperatureWeights::default(),
            seed: None,
        }
    }

    /// Land/ocean-only pipeline.
    pub fn classic(size: usize) -> Self {
        Self {
            stages: Stage::classic_schedule(size),
            ..Self::extended(size)
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parse a JSON document and validate the result.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every constraint the stages rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let size = self.size;
        if !size.is_power_of_two() || size.checked_mul(size).is_none() {
            return Err(ConfigError::InvalidSize(size));
        }
        if self.stages.is_empty() {
            return Err(ConfigError::EmptySchedule);
        }

        let mut previous = size;
        for (index, stage) in self.stages.iter().enumerate() {
            let name = stage.name();
            let zoom = stage.zoom(size);
            let step = stage.step(size);
            if zoom == 0 {
                return Err(ConfigError::ZeroZoom { index, stage: name });
            }
            if step > size {
                return Err(ConfigError::ZoomTooLarge { index, stage: name, step, size });
            }
            if size % step != 0 {
                return Err(ConfigError::ZoomNotDivisor { index, stage: name, step, size });
            }
            if zoom > previous {
                return Err(ConfigError::ZoomIncreases { index, stage: name, zoom, previous });
            }
            previous = zoom;
        }

        for (name, value) in [
            ("land_probability", self.land_probability),
            ("add_land_probability", self.add_land_probability),
            ("remove_ocean_probability", self.remove_ocean_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange { name, value });
            }
        }

        self.temperature_weights.validate()
    }
}
