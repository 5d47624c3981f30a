//! Axis mirroring applied before rendering.

use image::imageops;

use super::grid::PixelGrid;

/// Which axes to reflect the grid across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MirrorMode {
    #[default]
    None,
    /// Flip left-right: `(x, y)` reads from `(W-1-x, y)`.
    X,
    /// Flip top-bottom: `(x, y)` reads from `(x, H-1-y)`.
    Y,
    /// Both axes.
    XY,
}

impl MirrorMode {
    pub fn name(&self) -> &'static str {
        match self {
            MirrorMode::None => "none",
            MirrorMode::X => "x",
            MirrorMode::Y => "y",
            MirrorMode::XY => "xy",
        }
    }

    /// Parse a mode name as used in config files (`none`, `x`, `y`, `xy`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "none" => Some(MirrorMode::None),
            "x" => Some(MirrorMode::X),
            "y" => Some(MirrorMode::Y),
            "xy" | "yx" => Some(MirrorMode::XY),
            _ => None,
        }
    }
}

/// Mirror a grid. `MirrorMode::None` hands the input back untouched; every
/// other mode writes into a fresh buffer.
pub fn mirror(grid: PixelGrid, mode: MirrorMode) -> PixelGrid {
    match mode {
        MirrorMode::None => grid,
        MirrorMode::X => PixelGrid::from_buffer(imageops::flip_horizontal(grid.buffer())),
        MirrorMode::Y => PixelGrid::from_buffer(imageops::flip_vertical(grid.buffer())),
        MirrorMode::XY => PixelGrid::from_buffer(imageops::rotate180(grid.buffer())),
    }
}
