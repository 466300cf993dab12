//! Four-neighbor block test shared by the ocean stages.

use crate::biome::Biome;
use crate::grid::BiomeGrid;

/// Test the blocks one `zoom` above, below, left and right of `(row, col)`.
///
/// Only neighbors inside the grid are consulted; a missing neighbor neither
/// passes nor fails. The predicate sees each neighbor's top-left cell, which
/// stands for the whole block since blocks are written uniformly. Returns
/// `true` iff every consulted neighbor satisfies `predicate` (so a block with
/// no in-bounds neighbor yields `true`).
///
/// `snapshot` must be the grid as it was when the calling stage began.
pub fn neighbors_satisfy<P>(snapshot: &BiomeGrid, row: usize, col: usize, zoom: usize, predicate: P) -> bool
where
    P: Fn(Biome) -> bool,
{
    let last = snapshot.size().saturating_sub(zoom);

    let up    = (row > 0).then(|| (row.saturating_sub(zoom), col));
    let down  = (row < last).then(|| (row + zoom, col));
    let left  = (col > 0).then(|| (row, col.saturating_sub(zoom)));
    let right = (col < last).then(|| (row, col + zoom));

    [up, down, left, right]
        .into_iter()
        .flatten()
        .all(|(r, c)| predicate(snapshot.get(r, c)))
}
