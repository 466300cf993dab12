//! Display colors for classification codes.
//!
//! Kept apart from [`Biome`] so a palette change cannot touch classification.

use serde::Serialize;

use crate::biome::Biome;
use crate::grid::BiomeGrid;

/// Classification code → RGB.
pub fn biome_color(biome: Biome) -> [u8; 3] {
    match biome {
        Biome::Ocean     => [  1,   0, 112], // #010070
        Biome::Land      => [142, 179,  95], // #8EB35F
        Biome::Warm      => [214, 186, 110], // sand
        Biome::Cold      => [ 96, 140, 104], // taiga green
        Biome::Freezing  => [232, 240, 245], // snow
        Biome::DeepOcean => [  0,   0,  64], // #000040
    }
}

/// `#RRGGBB` form of a color.
pub fn hex(color: [u8; 3]) -> String {
    format!("#{:02X}{:02X}{:02X}", color[0], color[1], color[2])
}

/// One row of a [`Legend`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub biome: Biome,
    pub color: [u8; 3],
    /// Cells holding this code in the grid the legend was built for.
    pub cells: usize,
}

/// Color key handed to renderers alongside the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Legend {
    entries: Vec<LegendEntry>,
}

impl Legend {
    /// Entries for exactly the codes present in `grid`, in code order.
    pub fn for_grid(grid: &BiomeGrid) -> Self {
        let counts = grid.counts();
        let entries = counts
            .present()
            .map(|biome| LegendEntry { biome, color: biome_color(biome), cells: counts[biome] })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    /// Color for `biome`, if it appears in this legend.
    pub fn color_of(&self, biome: Biome) -> Option<[u8; 3]> {
        self.entries.iter().find(|e| e.biome == biome).map(|e| e.color)
    }
}
