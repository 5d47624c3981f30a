//! Pixel to glyph classification by luminance.

use super::charset::{GlyphIndex, RAMP_LEN};

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Result of classifying one pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified {
    pub glyph: GlyphIndex,
    /// The pixel's own colour, reduced to 8 bits per channel.
    pub native: Rgb,
}

/// Luminance of 16-bit channels using the ITU-R BT.601 weights, normalised
/// to `[0, 1]`.
///
/// The weighted sum uses integer coefficients scaled by 1000
/// (299 + 587 + 114 = 1000) so pure white lands exactly on 1.0.
pub fn luminance(r: u16, g: u16, b: u16) -> f64 {
    let weighted = 299 * r as u64 + 587 * g as u64 + 114 * b as u64;
    weighted as f64 / (1000 * u16::MAX as u64) as f64
}

/// Map a luminance value to a ramp level.
///
/// `floor(l * (RAMP_LEN - 1))`, clamped to the ramp at both ends so
/// `l == 1.0`, values above 1 and negative or NaN input stay in range.
pub fn glyph_for_luminance(l: f64) -> GlyphIndex {
    let scaled = (l * (RAMP_LEN - 1) as f64).floor();
    if scaled.is_nan() || scaled <= 0.0 {
        return GlyphIndex::DARKEST;
    }
    GlyphIndex::saturating(scaled as usize)
}

/// Classify a pixel given its 16-bit channels.
pub fn classify(r: u16, g: u16, b: u16) -> Classified {
    Classified {
        glyph: glyph_for_luminance(luminance(r, g, b)),
        native: Rgb::new((r >> 8) as u8, (g >> 8) as u8, (b >> 8) as u8),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: u16 = u16::MAX;

    #[test]
    fn test_black_is_darkest() {
        let c = classify(0, 0, 0);
        assert_eq!(c.glyph, GlyphIndex::DARKEST);
        assert_eq!(c.native, Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_white_is_brightest() {
        let c = classify(MAX, MAX, MAX);
        assert_eq!(c.glyph, GlyphIndex::BRIGHTEST);
        assert_eq!(c.native, Rgb::new(255, 255, 255));
    }

    #[test]
    fn test_primary_luminance_order() {
        // Green contributes most, then red, then blue.
        let red = luminance(MAX, 0, 0);
        let green = luminance(0, MAX, 0);
        let blue = luminance(0, 0, MAX);
        assert!(green > red);
        assert!(red > blue);
    }

    #[test]
    fn test_pure_green_level() {
        // 0.587 * 7 = 4.109
        assert_eq!(classify(0, MAX, 0).glyph.get(), 4);
    }

    #[test]
    fn test_out_of_range_luminance_is_clamped() {
        assert_eq!(glyph_for_luminance(-0.5), GlyphIndex::DARKEST);
        assert_eq!(glyph_for_luminance(1.0), GlyphIndex::BRIGHTEST);
        assert_eq!(glyph_for_luminance(3.0), GlyphIndex::BRIGHTEST);
        assert_eq!(glyph_for_luminance(f64::NAN), GlyphIndex::DARKEST);
    }

    #[test]
    fn test_native_colour_uses_high_byte() {
        let c = classify(0x12ff, 0xab00, 0x0001);
        assert_eq!(c.native, Rgb::new(0x12, 0xab, 0x00));
    }

    #[test]
    fn test_grey_ramp_is_monotonic() {
        let mut last = GlyphIndex::DARKEST;
        for v in (0..=MAX).step_by(97) {
            let glyph = classify(v, v, v).glyph;
            assert!(glyph >= last, "glyph decreased at {}", v);
            last = glyph;
        }
    }
}
