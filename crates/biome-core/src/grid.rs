use std::ops::{Index, IndexMut};

use crate::biome::Biome;

/// Square classification grid, row-major, one [`Biome`] per cell.
///
/// The only way to build one is [`BiomeGrid::new`], which yields an
/// all-ocean grid; stages then overwrite cells in uniform square blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiomeGrid {
    data: Vec<Biome>,
    size: usize,
}

impl BiomeGrid {
    /// Allocate a `size × size` grid filled with [`Biome::Ocean`].
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![Biome::Ocean; size * size],
            size,
        }
    }

    /// Side length in cells.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row-major cell slice, length `size²`.
    #[inline]
    pub fn cells(&self) -> &[Biome] {
        &self.data
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Biome {
        self.data[row * self.size + col]
    }

    /// Overwrite every cell with `biome`.
    pub fn fill(&mut self, biome: Biome) {
        self.data.fill(biome);
    }

    /// Write a uniform `block × block` square whose top-left corner is `(row, col)`.
    ///
    /// # Panics
    ///
    /// If the square extends past the grid edge. Stages clip or skip
    /// out-of-range blocks before calling this.
    pub fn fill_block(&mut self, row: usize, col: usize, block: usize, biome: Biome) {
        assert!(
            row + block <= self.size && col + block <= self.size,
            "block ({row}, {col}) of size {block} exceeds {n}×{n} grid",
            n = self.size
        );
        for r in row..row + block {
            let start = r * self.size + col;
            self.data[start..start + block].fill(biome);
        }
    }

    /// True if every cell of the `block × block` square at `(row, col)` equals its top-left cell.
    pub fn is_block_uniform(&self, row: usize, col: usize, block: usize) -> bool {
        let first = self.get(row, col);
        (row..row + block).all(|r| {
            let start = r * self.size + col;
            self.data[start..start + block].iter().all(|&b| b == first)
        })
    }

    /// Tally of cells per classification code.
    pub fn counts(&self) -> BiomeCounts {
        let mut counts = BiomeCounts::default();
        for &b in &self.data {
            counts[b] += 1;
        }
        counts
    }

    /// Split the grid into horizontal bands of `zoom` full rows.
    ///
    /// Bands cover disjoint memory, so each can be written independently.
    pub fn bands_mut(&mut self, zoom: usize) -> impl Iterator<Item = BlockBand<'_>> + '_ {
        let size = self.size;
        self.data
            .chunks_mut(zoom * size)
            .enumerate()
            .map(move |(index, cells)| BlockBand { cells, size, zoom, index })
    }

    /// Parallel counterpart of [`BiomeGrid::bands_mut`].
    #[cfg(feature = "threading")]
    pub fn par_bands_mut(
        &mut self,
        zoom: usize,
    ) -> impl rayon::iter::IndexedParallelIterator<Item = BlockBand<'_>> + '_ {
        use rayon::prelude::*;
        let size = self.size;
        self.data
            .par_chunks_mut(zoom * size)
            .enumerate()
            .map(move |(index, cells)| BlockBand { cells, size, zoom, index })
    }
}

// ── Row bands ────────────────────────────────────────────────────────────────

/// A horizontal strip of `zoom` grid rows, borrowed mutably from a [`BiomeGrid`].
pub struct BlockBand<'a> {
    cells: &'a mut [Biome],
    size: usize,
    zoom: usize,
    index: usize,
}

impl BlockBand<'_> {
    /// Position of this band counted in blocks from the top.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Grid row of the band's first line.
    #[inline]
    pub fn row(&self) -> usize {
        self.index * self.zoom
    }

    /// Top-left column of every block in the band.
    pub fn block_cols(&self) -> impl Iterator<Item = usize> {
        (0..self.size).step_by(self.zoom)
    }

    /// Top-left cell of the block starting at `col`.
    #[inline]
    pub fn get(&self, col: usize) -> Biome {
        self.cells[col]
    }

    /// Write the `zoom × zoom` block starting at `col`.
    pub fn fill_block(&mut self, col: usize, biome: Biome) {
        assert!(col + self.zoom <= self.size, "block column {col} exceeds band width {}", self.size);
        for r in 0..self.zoom {
            let start = r * self.size + col;
            self.cells[start..start + self.zoom].fill(biome);
        }
    }
}

// ── Statistics ───────────────────────────────────────────────────────────────

/// Number of cells holding each code, indexed by [`Biome`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BiomeCounts([usize; Biome::COUNT]);

impl BiomeCounts {
    pub fn get(&self, biome: Biome) -> usize {
        self.0[biome.code() as usize]
    }

    pub fn total(&self) -> usize {
        self.0.iter().sum()
    }

    /// Codes with at least one cell, in code order.
    pub fn present(&self) -> impl Iterator<Item = Biome> + '_ {
        Biome::ALL.into_iter().filter(|&b| self.get(b) > 0)
    }

    /// Fraction of cells that are not water. Zero for an empty grid.
    pub fn land_fraction(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let water: usize = Biome::ALL.iter().filter(|b| b.is_water()).map(|&b| self.get(b)).sum();
        (total - water) as f64 / total as f64
    }
}

impl Index<Biome> for BiomeCounts {
    type Output = usize;

    fn index(&self, biome: Biome) -> &usize {
        &self.0[biome.code() as usize]
    }
}

impl IndexMut<Biome> for BiomeCounts {
    fn index_mut(&mut self, biome: Biome) -> &mut usize {
        &mut self.0[biome.code() as usize]
    }
}
