//! Image loading: files, folders and the built-in default picture.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::ascii::PixelGrid;

/// Name that selects the built-in picture instead of a file.
pub const DEFAULT_IMAGE: &str = "default";

/// Extensions picked up when scanning a folder.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Size of the built-in test card.
const TEST_CARD_WIDTH: u32 = 160;
const TEST_CARD_HEIGHT: u32 = 120;

/// Errors that can occur while loading images.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode '{}': {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("'{}' is not a directory", .0.display())]
    NotADirectory(PathBuf),
}

/// Anything that can turn a path into pixels.
pub trait ImageSource {
    fn load(&self, path: &Path) -> Result<PixelGrid, SourceError>;
}

/// Loads PNG and JPEG files from disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileSource;

impl ImageSource for FileSource {
    fn load(&self, path: &Path) -> Result<PixelGrid, SourceError> {
        load_image(path)
    }
}

/// Decode an image file, or build the test card for [`DEFAULT_IMAGE`].
pub fn load_image(path: &Path) -> Result<PixelGrid, SourceError> {
    if path.as_os_str().is_empty() || path == Path::new(DEFAULT_IMAGE) {
        return Ok(test_card());
    }

    let decoded = image::open(path).map_err(|e| match e {
        image::ImageError::IoError(source) => SourceError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => SourceError::Decode {
            path: path.to_path_buf(),
            source: other,
        },
    })?;

    log::debug!(
        "decoded {} ({}x{})",
        path.display(),
        decoded.width(),
        decoded.height()
    );
    Ok(PixelGrid::from_image(decoded))
}

/// Load the picture for single-image playback.
///
/// A picture that cannot be loaded is logged and gives `None`, which ends
/// the run without a frame.
pub fn load_single<I: ImageSource + ?Sized>(source: &I, path: &Path) -> Option<PixelGrid> {
    match source.load(path) {
        Ok(image) => Some(image),
        Err(e) => {
            log::error!("{}", e);
            None
        }
    }
}

/// List the image files directly inside `dir`, sorted by name.
///
/// Subdirectories and files without a `.jpg`, `.jpeg` or `.png` extension
/// (any case) are left out.
pub fn images_in_folder(dir: &Path) -> Result<Vec<PathBuf>, SourceError> {
    if !dir.is_dir() {
        return Err(SourceError::NotADirectory(dir.to_path_buf()));
    }

    let io_err = |e| SourceError::Io {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut images = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if entry.file_type().map_err(io_err)?.is_dir() {
            continue;
        }
        let path = entry.path();
        if has_image_extension(&path) {
            images.push(path);
        }
    }
    images.sort();

    log::debug!("found {} images in {}", images.len(), dir.display());
    Ok(images)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_ascii_lowercase();
            IMAGE_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

/// The built-in picture: a hue sweep left to right fading to black at the
/// bottom, with a bright disc in the middle.
pub fn test_card() -> PixelGrid {
    let w = TEST_CARD_WIDTH as f32;
    let h = TEST_CARD_HEIGHT as f32;
    let radius = h * 0.3;

    PixelGrid::from_fn_rgb8(TEST_CARD_WIDTH, TEST_CARD_HEIGHT, |x, y| {
        let dx = x as f32 - w / 2.0;
        let dy = y as f32 - h / 2.0;
        if (dx * dx + dy * dy).sqrt() < radius {
            return [255, 255, 255];
        }

        let hue = x as f32 / w * 6.0;
        let fade = 1.0 - y as f32 / h;
        let [r, g, b] = hue_to_rgb(hue);
        [
            (r * fade * 255.0) as u8,
            (g * fade * 255.0) as u8,
            (b * fade * 255.0) as u8,
        ]
    })
}

/// Fully saturated colour for a hue in `[0, 6)`.
fn hue_to_rgb(hue: f32) -> [f32; 3] {
    let f = hue.fract();
    match hue as u32 {
        0 => [1.0, f, 0.0],
        1 => [1.0 - f, 1.0, 0.0],
        2 => [0.0, 1.0, f],
        3 => [0.0, 1.0 - f, 1.0],
        4 => [f, 0.0, 1.0],
        _ => [1.0, 0.0, 1.0 - f],
    }
}
