//! The pixel grid every pipeline stage consumes and produces.

use image::{DynamicImage, ImageBuffer, Rgba};

/// Backing storage: 16 bits per channel, alpha carried but ignored.
pub type Rgba16Buffer = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// A width x height grid of RGB(A) samples.
///
/// Each transform stage builds a new grid; grids are never shared mutably
/// between stages.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    buffer: Rgba16Buffer,
}

impl PixelGrid {
    /// Create an all-black grid.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buffer: ImageBuffer::from_pixel(width, height, Rgba([0, 0, 0, u16::MAX])),
        }
    }

    /// Build a grid from 8-bit RGB values produced by `f(x, y)`.
    ///
    /// 8-bit values are widened to 16 bits the same way decoders do
    /// (`v * 257`), so `0xff` maps to `0xffff`.
    pub fn from_fn_rgb8<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> [u8; 3],
    {
        let buffer = ImageBuffer::from_fn(width, height, |x, y| {
            let [r, g, b] = f(x, y);
            Rgba([widen(r), widen(g), widen(b), u16::MAX])
        });
        Self { buffer }
    }

    /// Convert any decoded image into a grid.
    pub fn from_image(image: DynamicImage) -> Self {
        Self {
            buffer: image.into_rgba16(),
        }
    }

    pub fn from_buffer(buffer: Rgba16Buffer) -> Self {
        Self { buffer }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// True when the grid has no pixels (zero width or zero height).
    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// Raw 16-bit RGB at `(x, y)`. Panics when out of bounds.
    pub fn rgb(&self, x: u32, y: u32) -> [u16; 3] {
        let Rgba([r, g, b, _]) = *self.buffer.get_pixel(x, y);
        [r, g, b]
    }

    /// 8-bit RGB at `(x, y)`, the high byte of each channel.
    pub fn rgb8(&self, x: u32, y: u32) -> [u8; 3] {
        self.rgb(x, y).map(|c| (c >> 8) as u8)
    }

    pub fn buffer(&self) -> &Rgba16Buffer {
        &self.buffer
    }
}

fn widen(v: u8) -> u16 {
    v as u16 * 257
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_black() {
        let grid = PixelGrid::new(3, 2);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.rgb(2, 1), [0, 0, 0]);
    }

    #[test]
    fn test_from_fn_rgb8_widens_channels() {
        let grid = PixelGrid::from_fn_rgb8(1, 1, |_, _| [255, 128, 0]);
        assert_eq!(grid.rgb(0, 0), [0xffff, 128 * 257, 0]);
        assert_eq!(grid.rgb8(0, 0), [255, 128, 0]);
    }

    #[test]
    fn test_empty_grid() {
        assert!(PixelGrid::new(0, 5).is_empty());
        assert!(PixelGrid::new(5, 0).is_empty());
        assert!(!PixelGrid::new(1, 1).is_empty());
    }
}
