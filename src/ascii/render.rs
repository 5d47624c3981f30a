//! Frame assembly: grid in, coloured text out.

use std::fmt::{self, Write as _};

use super::classify::{classify, Rgb};
use super::colour::{display_colour, ColourMode, RandomColourMap};
use super::grid::PixelGrid;

/// ANSI reset of all attributes.
pub const RESET: &str = "\x1b[0m";

/// Append a 24-bit foreground colour escape: `ESC[38;2;R;G;Bm`.
pub fn push_fg(out: &mut String, rgb: Rgb) {
    // Writing to a String cannot fail.
    let _ = write!(out, "\x1b[38;2;{};{};{}m", rgb.r, rgb.g, rgb.b);
}

/// One fully rendered block of text art.
///
/// Every coloured glyph carries its own colour escape and reset, so the
/// text can be cut between any two glyphs without leaking colour into the
/// terminal.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    text: String,
    rows: usize,
    columns: usize,
}

impl Frame {
    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// True when the frame has nothing to type.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Split the frame into typing units: one visible character together
    /// with the escapes that wrap it.
    pub fn units(&self) -> Units<'_> {
        Units { rest: &self.text }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Iterator over the typing units of a [`Frame`].
///
/// A unit is any leading escape sequences, one character, and a directly
/// following reset.
pub struct Units<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Units<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        let mut end = 0;
        while let Some(len) = escape_len(&self.rest[end..]) {
            end += len;
        }
        if let Some(c) = self.rest[end..].chars().next() {
            end += c.len_utf8();
        }
        if self.rest[end..].starts_with(RESET) {
            end += RESET.len();
        }

        let (unit, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(unit)
    }
}

/// Length of a CSI escape sequence (`ESC [ ... final`) at the start of `s`.
fn escape_len(s: &str) -> Option<usize> {
    let body = s.strip_prefix("\x1b[")?;
    let end = body.find(|c: char| ('\x40'..='\x7e').contains(&c))?;
    Some(2 + end + 1)
}

/// Render `grid` row by row into a [`Frame`].
///
/// Monochrome emits bare glyphs. Every other mode wraps each glyph in a
/// colour escape and a reset. Each row ends with `\n`. An empty grid yields
/// an empty frame.
pub fn render_frame(grid: &PixelGrid, mode: ColourMode, random: &RandomColourMap) -> Frame {
    if grid.is_empty() {
        return Frame::default();
    }

    let per_glyph = if mode.is_coloured() {
        // "\x1b[38;2;255;255;255m" + glyph + reset
        19 + 1 + RESET.len()
    } else {
        1
    };
    let mut text =
        String::with_capacity((grid.width() as usize * per_glyph + 1) * grid.height() as usize);

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let [r, g, b] = grid.rgb(x, y);
            let pixel = classify(r, g, b);
            let glyph = pixel.glyph.glyph() as char;

            match display_colour(mode, &pixel, random) {
                None => text.push(glyph),
                Some(rgb) => {
                    push_fg(&mut text, rgb);
                    text.push(glyph);
                    text.push_str(RESET);
                }
            }
        }
        text.push('\n');
    }

    Frame {
        text,
        rows: grid.height() as usize,
        columns: grid.width() as usize,
    }
}
