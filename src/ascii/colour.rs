//! Colour policies for rendered glyphs.

use rand::Rng;

use super::charset::{GlyphIndex, RAMP_LEN};
use super::classify::{Classified, Rgb};

/// How glyphs are coloured. Chosen once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColourMode {
    /// Plain glyphs, no escape sequences
    Monochrome,
    /// Each channel snapped to 0 or 255 (8 possible colours)
    #[default]
    Posterized,
    /// The pixel's own colour
    Colourful,
    /// One random colour per glyph level, rerolled every frame
    Random,
}

impl ColourMode {
    pub fn name(&self) -> &'static str {
        match self {
            ColourMode::Monochrome => "monochrome",
            ColourMode::Posterized => "posterized",
            ColourMode::Colourful => "colourful",
            ColourMode::Random => "random",
        }
    }

    /// Parse a mode name as used in config files. Accepts the US spellings too.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "monochrome" | "mono" => Some(ColourMode::Monochrome),
            "posterized" | "posterised" => Some(ColourMode::Posterized),
            "colourful" | "colorful" => Some(ColourMode::Colourful),
            "random" => Some(ColourMode::Random),
            _ => None,
        }
    }

    /// Whether rendering in this mode emits colour escapes.
    pub fn is_coloured(&self) -> bool {
        !matches!(self, ColourMode::Monochrome)
    }
}

/// Number of output levels per channel when posterizing.
pub const POSTER_LEVELS: u32 = 2;

/// Snap one 8-bit channel to one of [`POSTER_LEVELS`] evenly spaced values.
///
/// With two levels: `0..=127` becomes 0 and `128..=255` becomes 255.
pub fn posterize_channel(c: u8) -> u8 {
    let bucket = c as u32 / (256 / POSTER_LEVELS);
    let step = 255 / (POSTER_LEVELS - 1);
    (bucket * step) as u8
}

pub fn posterize(rgb: Rgb) -> Rgb {
    Rgb::new(
        posterize_channel(rgb.r),
        posterize_channel(rgb.g),
        posterize_channel(rgb.b),
    )
}

/// One colour per glyph level, used by [`ColourMode::Random`].
///
/// Regenerated once before each frame and left alone while that frame
/// renders, so every pixel on the same level shares a colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RandomColourMap {
    colours: [Rgb; RAMP_LEN],
}

impl RandomColourMap {
    /// Draw a fresh map from `rng`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut map = Self::default();
        map.regenerate(rng);
        map
    }

    /// Replace every entry with an independent uniformly random colour.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for colour in self.colours.iter_mut() {
            *colour = Rgb::new(rng.gen(), rng.gen(), rng.gen());
        }
    }

    pub fn get(&self, glyph: GlyphIndex) -> Rgb {
        self.colours[glyph.get()]
    }

    pub fn colours(&self) -> &[Rgb; RAMP_LEN] {
        &self.colours
    }
}

/// Colour to draw a classified pixel with, or `None` for monochrome.
pub fn display_colour(
    mode: ColourMode,
    pixel: &Classified,
    random: &RandomColourMap,
) -> Option<Rgb> {
    match mode {
        ColourMode::Monochrome => None,
        ColourMode::Posterized => Some(posterize(pixel.native)),
        ColourMode::Colourful => Some(pixel.native),
        ColourMode::Random => Some(random.get(pixel.glyph)),
    }
}
