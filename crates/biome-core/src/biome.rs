use serde::{Deserialize, Serialize};

/// Per-cell classification code.
///
/// Variants are declared in ascending code order; the discriminant is the
/// stable code stored in the grid. Colors live in [`crate::legend`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Biome {
    Ocean = 0,
    Land = 1,
    Warm = 2,
    Cold = 3,
    Freezing = 4,
    DeepOcean = 5,
}

impl Biome {
    /// Every variant, in code order.
    pub const ALL: [Biome; 6] = [
        Biome::Ocean,
        Biome::Land,
        Biome::Warm,
        Biome::Cold,
        Biome::Freezing,
        Biome::DeepOcean,
    ];

    /// Number of distinct codes.
    pub const COUNT: usize = Self::ALL.len();

    #[inline]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Biome::code`]. Returns `None` for codes outside the enumeration.
    pub fn from_code(code: u8) -> Option<Biome> {
        Self::ALL.get(code as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Biome::Ocean     => "Ocean",
            Biome::Land      => "Land",
            Biome::Warm      => "Warm",
            Biome::Cold      => "Cold",
            Biome::Freezing  => "Freezing",
            Biome::DeepOcean => "Deep Ocean",
        }
    }

    /// True for the temperature-derived land sub-biomes.
    pub fn is_temperate_land(self) -> bool {
        matches!(self, Biome::Warm | Biome::Cold | Biome::Freezing)
    }

    /// True for both ocean depths.
    pub fn is_water(self) -> bool {
        matches!(self, Biome::Ocean | Biome::DeepOcean)
    }
}

impl std::fmt::Display for Biome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
