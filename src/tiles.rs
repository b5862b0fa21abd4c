//! Carves the output image into the rectangular tiles the worker pool
//! consumes.  Tiles are laid out on a square grid; each one is handed
//! to exactly one worker, and together they cover every pixel exactly
//! once.

use config::RenderConfig;

/// A half-open pixel rectangle, `[x0, x1) × [y0, y1)`.  One unit of
/// work for the pool.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Tile {
    /// Leftmost column, inclusive.
    pub x0: usize,
    /// Rightmost column, exclusive.
    pub x1: usize,
    /// Top row, inclusive.
    pub y0: usize,
    /// Bottom row, exclusive.
    pub y1: usize,
}

impl Tile {
    /// Number of pixels inside the tile.
    pub fn area(&self) -> usize {
        (self.x1 - self.x0) * (self.y1 - self.y0)
    }
}

/// Splits the image into a `side × side` grid of tiles, where `side`
/// is the square root of the configured block count.  When `side` does
/// not divide an image dimension evenly, the last band along that axis
/// absorbs the remainder, so the union of all tiles is always the full
/// image.
pub fn partition(cfg: &RenderConfig) -> Vec<Tile> {
    let side = cfg.grid_side();
    let tile_width = cfg.img_width / side;
    let tile_height = cfg.img_height / side;

    let mut tiles = Vec::with_capacity(side * side);
    for i in 0..side {
        let x0 = i * tile_width;
        let x1 = if i + 1 == side { cfg.img_width } else { x0 + tile_width };
        for j in 0..side {
            let y0 = j * tile_height;
            let y1 = if j + 1 == side { cfg.img_height } else { y0 + tile_height };
            tiles.push(Tile { x0, x1, y0, y1 });
        }
    }
    tiles
}
