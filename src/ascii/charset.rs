//! The fixed glyph ramp used for brightness levels.

/// Glyph ramp ordered from darkest (space) to brightest (`#`).
/// Works well on dark terminals.
pub const GLYPH_RAMP: [u8; RAMP_LEN] = *b" .:-=+*#";

/// Number of brightness levels in [`GLYPH_RAMP`].
pub const RAMP_LEN: usize = 8;

/// Index into the glyph ramp, always in `0..RAMP_LEN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GlyphIndex(u8);

impl GlyphIndex {
    /// The darkest level (a space).
    pub const DARKEST: GlyphIndex = GlyphIndex(0);
    /// The brightest level.
    pub const BRIGHTEST: GlyphIndex = GlyphIndex(RAMP_LEN as u8 - 1);

    /// Build an index, clamping anything past the end to the brightest level.
    pub fn saturating(index: usize) -> Self {
        GlyphIndex(index.min(RAMP_LEN - 1) as u8)
    }

    pub fn get(self) -> usize {
        self.0 as usize
    }

    /// The ramp character for this level.
    pub fn glyph(self) -> u8 {
        GLYPH_RAMP[self.0 as usize]
    }
}
