//! Image to text-art rendering pipeline.
//!
//! Stages, in the order a picture flows through them:
//!
//! 1. **Resize** - scale to the target character width, halving the height
//!    for the ~2:1 character cell
//! 2. **Mirror** - optional flip across X, Y or both
//! 3. **Classify** - BT.601 luminance to one of 8 ramp levels
//! 4. **Colour** - monochrome, posterized, native or per-level random colour
//! 5. **Render** - assemble the [`Frame`] text with per-glyph escapes

mod charset;
mod classify;
mod colour;
mod grid;
mod mirror;
mod render;
mod resize;

pub use charset::{GlyphIndex, GLYPH_RAMP, RAMP_LEN};
pub use classify::{classify, glyph_for_luminance, luminance, Classified, Rgb};
pub use colour::{
    display_colour, posterize, posterize_channel, ColourMode, RandomColourMap, POSTER_LEVELS,
};
pub use grid::{PixelGrid, Rgba16Buffer};
pub use mirror::{mirror, MirrorMode};
pub use render::{push_fg, render_frame, Frame, Units, RESET};
pub use resize::{resize_for_terminal, target_height, CHAR_ASPECT_DIVISOR};
