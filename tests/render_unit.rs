//! Unit tests for the rendering pipeline.
//!
//! These tests exercise the public API end to end without a terminal:
//! - Aspect-correcting resize
//! - Mirroring
//! - Luminance classification
//! - Colour modes and escape sequence structure

use ascii_typewriter::ascii::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Count colour-set escapes (`ESC[38;2;`) and resets (`ESC[0m`) in `text`.
fn escape_counts(text: &str) -> (usize, usize) {
    (text.matches("\x1b[38;2;").count(), text.matches(RESET).count())
}

/// Visible characters (everything but escape sequences and newlines).
fn visible(text: &str) -> String {
    let mut out = String::new();
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for c in chars.by_ref() {
                if c == 'm' {
                    break;
                }
            }
        } else if c != '\n' {
            out.push(c);
        }
    }
    out
}

fn gradient(width: u32, height: u32) -> PixelGrid {
    PixelGrid::from_fn_rgb8(width, height, |x, y| {
        let v = ((x + y) * 255 / (width + height - 2).max(1)) as u8;
        [v, v / 2, 255 - v]
    })
}

// ==================== Resize Tests ====================

#[test]
fn test_resize_height_fixtures() {
    for (w, h, target, expected) in [(100, 100, 80, 40), (200, 100, 80, 20), (50, 300, 25, 75)] {
        let resized = resize_for_terminal(&PixelGrid::new(w, h), target);
        assert_eq!(resized.width(), target);
        assert_eq!(resized.height(), expected, "({}, {}, {})", w, h, target);
    }
}

#[test]
fn test_resize_zero_source_width_does_not_panic() {
    let resized = resize_for_terminal(&PixelGrid::new(0, 10), 80);
    assert!(resized.is_empty());
    let frame = render_frame(&resized, ColourMode::Colourful, &RandomColourMap::default());
    assert!(frame.is_empty());
}

// ==================== Mirror Tests ====================

#[test]
fn test_mirror_x_on_three_pixel_row() {
    // [A, B, C] -> [C, B, A]
    let a = [255, 0, 0];
    let b = [0, 255, 0];
    let c = [0, 0, 255];
    let row = [a, b, c];
    let grid = PixelGrid::from_fn_rgb8(3, 1, |x, _| row[x as usize]);
    let mirrored = mirror(grid, MirrorMode::X);
    assert_eq!(mirrored.rgb8(0, 0), c);
    assert_eq!(mirrored.rgb8(1, 0), b);
    assert_eq!(mirrored.rgb8(2, 0), a);
}

#[test]
fn test_mirror_twice_restores_original() {
    let grid = gradient(7, 5);
    for mode in [MirrorMode::X, MirrorMode::Y, MirrorMode::XY] {
        assert_eq!(mirror(mirror(grid.clone(), mode), mode), grid);
    }
}

#[test]
fn test_mirror_keeps_dimensions() {
    let grid = gradient(7, 5);
    for mode in [MirrorMode::None, MirrorMode::X, MirrorMode::Y, MirrorMode::XY] {
        let mirrored = mirror(grid.clone(), mode);
        assert_eq!((mirrored.width(), mirrored.height()), (7, 5));
    }
}

// ==================== Classification Tests ====================

#[test]
fn test_luminance_monotonic_over_channels() {
    // Raising any single channel never lowers the glyph.
    let steps: Vec<u16> = (0..=u16::MAX).step_by(4369).collect();
    for &base in &steps {
        for channel in 0..3 {
            let mut last = GlyphIndex::DARKEST;
            for &v in &steps {
                let mut rgb = [base; 3];
                rgb[channel] = v;
                let glyph = classify(rgb[0], rgb[1], rgb[2]).glyph;
                if v >= base {
                    assert!(glyph >= last);
                    last = glyph;
                }
            }
        }
    }
}

#[test]
fn test_every_glyph_level_reachable() {
    let mut seen = [false; RAMP_LEN];
    for v in 0..=255u8 {
        let wide = v as u16 * 257;
        seen[classify(wide, wide, wide).glyph.get()] = true;
    }
    assert!(seen.iter().all(|&s| s));
}

// ==================== Frame Tests ====================

#[test]
fn test_black_square_monochrome_scenario() {
    // 2x2 black resized to width 2 -> 2 columns, 1 row (2*2/2/2 = 1)
    let grid = PixelGrid::from_fn_rgb8(2, 2, |_, _| [0, 0, 0]);
    let resized = resize_for_terminal(&grid, 2);
    let frame = render_frame(&resized, ColourMode::Monochrome, &RandomColourMap::default());
    let darkest = GLYPH_RAMP[0] as char;
    for line in frame.as_str().lines() {
        assert!(line.chars().all(|c| c == darkest));
    }
    assert!(frame.as_str().ends_with('\n'));
}

#[test]
fn test_black_monochrome_two_rows() {
    // Unresized 2x2 black grid: two rows of the darkest glyph
    let grid = PixelGrid::from_fn_rgb8(2, 2, |_, _| [0, 0, 0]);
    let frame = render_frame(&grid, ColourMode::Monochrome, &RandomColourMap::default());
    assert_eq!(frame.as_str(), "  \n  \n");
}

#[test]
fn test_monochrome_has_no_escapes() {
    let frame = render_frame(&gradient(12, 6), ColourMode::Monochrome, &RandomColourMap::default());
    assert!(!frame.as_str().contains('\x1b'));
    assert_eq!(frame.as_str().lines().count(), 6);
    assert!(frame.as_str().lines().all(|l| l.len() == 12));
}

#[test]
fn test_coloured_modes_wrap_every_glyph() {
    let grid = gradient(12, 6);
    let mut rng = StdRng::seed_from_u64(11);
    let random = RandomColourMap::generate(&mut rng);

    for mode in [ColourMode::Posterized, ColourMode::Colourful, ColourMode::Random] {
        let frame = render_frame(&grid, mode, &random);
        let glyphs = visible(frame.as_str()).chars().count();
        assert_eq!(glyphs, 12 * 6);
        assert_eq!(escape_counts(frame.as_str()), (glyphs, glyphs), "{:?}", mode);
        assert_eq!(frame.as_str().matches('\n').count(), 6);
    }
}

#[test]
fn test_posterized_uses_only_eight_colours() {
    let frame = render_frame(&gradient(30, 10), ColourMode::Posterized, &RandomColourMap::default());
    for seq in frame.as_str().split("\x1b[38;2;").skip(1) {
        let params = seq.split('m').next().unwrap();
        for channel in params.split(';') {
            assert!(channel == "0" || channel == "255", "unexpected channel {}", channel);
        }
    }
}

#[test]
fn test_random_mode_same_glyph_same_colour() {
    let mut rng = StdRng::seed_from_u64(5);
    let random = RandomColourMap::generate(&mut rng);
    let frame = render_frame(&gradient(20, 10), ColourMode::Random, &random);

    for unit in frame.units().filter(|u| u.starts_with('\x1b')) {
        let glyph = visible(unit).chars().next().unwrap();
        let index = GLYPH_RAMP.iter().position(|&g| g as char == glyph).unwrap();
        let expected = random.colours()[index];
        let mut prefix = String::new();
        push_fg(&mut prefix, expected);
        assert!(unit.starts_with(&prefix));
    }
}

#[test]
fn test_units_reassemble_frame() {
    let frame = render_frame(&gradient(9, 4), ColourMode::Colourful, &RandomColourMap::default());
    assert_eq!(frame.units().collect::<String>(), frame.as_str());
    assert_eq!(frame.units().count(), 9 * 4 + 4);
}
