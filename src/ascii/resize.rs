//! Aspect-correcting resize from source pixels to character cells.

use image::imageops::{self, FilterType};

use super::grid::PixelGrid;

/// Terminal characters are roughly twice as tall as they are wide.
pub const CHAR_ASPECT_DIVISOR: u64 = 2;

/// Output height in rows for a source of `src_width` x `src_height` drawn
/// `target_width` characters wide.
///
/// Computed as `floor(src_height * target_width / src_width / 2)`.
/// Returns 0 when the source has no width, so callers never divide by zero.
pub fn target_height(src_width: u32, src_height: u32, target_width: u32) -> u32 {
    if src_width == 0 {
        return 0;
    }
    let h = (src_height as u64 * target_width as u64) / src_width as u64 / CHAR_ASPECT_DIVISOR;
    h.min(u32::MAX as u64) as u32
}

/// Resize `grid` to `target_width` columns, halving the height to
/// compensate for the character cell aspect.
///
/// Uses Lanczos3 resampling. Both downscaling and upscaling go through the
/// same filter. A degenerate result (zero rows or zero columns) is returned
/// as an empty grid instead of being handed to the resampler.
pub fn resize_for_terminal(grid: &PixelGrid, target_width: u32) -> PixelGrid {
    let height = target_height(grid.width(), grid.height(), target_width);

    if grid.is_empty() || target_width == 0 || height == 0 {
        log::debug!(
            "resize of {}x{} to width {} is degenerate, producing {}x{}",
            grid.width(),
            grid.height(),
            target_width,
            target_width,
            height
        );
        return PixelGrid::new(target_width, height);
    }

    let resized = imageops::resize(grid.buffer(), target_width, height, FilterType::Lanczos3);
    PixelGrid::from_buffer(resized)
}
