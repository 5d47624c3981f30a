//! Playback of one image or a folder of images.
//!
//! The [`Player`] ties the pipeline together: resize, mirror, render, then
//! hand the frame to the [`Typewriter`]. It owns the random colour map and
//! rerolls it before every frame when the colour mode is
//! [`ColourMode::Random`].

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::ascii::{
    mirror, render_frame, resize_for_terminal, ColourMode, Frame, PixelGrid, RandomColourMap,
};
use crate::config::RenderConfig;
use crate::source::ImageSource;
use crate::typewriter::{CancelToken, Sleeper, ThreadSleeper, TypeOutcome, Typewriter};

/// Pause after each frame in loop and folder modes.
pub const FRAME_PAUSE: Duration = Duration::from_secs(1);

/// Errors that end playback.
#[derive(Debug, Error)]
pub enum PlayError {
    #[error("Failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Summary of a finished playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayOutcome {
    /// Frames typed to completion
    pub frames: usize,
    /// Images that failed to load and were skipped
    pub skipped: usize,
    /// Playback was stopped through the cancel token
    pub cancelled: bool,
}

/// Renders images and types them to a sink.
pub struct Player<W: Write, S: Sleeper = ThreadSleeper> {
    config: RenderConfig,
    typewriter: Typewriter<S>,
    sink: W,
    palette: RandomColourMap,
    rng: StdRng,
    cancel: CancelToken,
    pause: Duration,
}

impl<W: Write> Player<W, ThreadSleeper> {
    pub fn new(config: RenderConfig, sink: W, cancel: CancelToken) -> Self {
        Self::with_parts(
            config,
            sink,
            Typewriter::new(config.print_speed),
            StdRng::from_entropy(),
            cancel,
        )
    }
}

impl<W: Write, S: Sleeper> Player<W, S> {
    /// Build a player from explicit parts, for custom sleepers or a seeded RNG.
    pub fn with_parts(
        config: RenderConfig,
        sink: W,
        typewriter: Typewriter<S>,
        rng: StdRng,
        cancel: CancelToken,
    ) -> Self {
        Self {
            config,
            typewriter,
            sink,
            palette: RandomColourMap::default(),
            rng,
            cancel,
            pause: FRAME_PAUSE,
        }
    }

    /// Override the pause between frames.
    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    pub fn sink(&self) -> &W {
        &self.sink
    }

    pub fn into_sink(self) -> W {
        self.sink
    }

    pub fn typewriter(&self) -> &Typewriter<S> {
        &self.typewriter
    }

    /// The colour map used for the most recent frame.
    pub fn palette(&self) -> &RandomColourMap {
        &self.palette
    }

    /// Render an already resized grid into a frame.
    ///
    /// Rerolls the random colour map first when in random mode, so each
    /// call sees one consistent map.
    pub fn render(&mut self, resized: PixelGrid) -> Frame {
        if self.config.colour_mode == ColourMode::Random {
            self.palette.regenerate(&mut self.rng);
        }
        let grid = mirror(resized, self.config.mirror_mode);
        let frame = render_frame(&grid, self.config.colour_mode, &self.palette);
        log::debug!("rendered {}x{} frame", frame.columns(), frame.rows());
        frame
    }

    /// Play a single picture.
    ///
    /// Without loop mode the frame is typed once and the call returns. In
    /// loop mode the frame is typed, followed by a blank line and a pause,
    /// over and over until the cancel token is set.
    pub fn play_single(&mut self, image: &PixelGrid) -> Result<PlayOutcome, PlayError> {
        let resized = resize_for_terminal(image, self.config.width);
        let mut outcome = PlayOutcome::default();

        if !self.config.loop_mode {
            let frame = self.render(resized);
            if self.type_frame(&frame)? {
                outcome.frames += 1;
            } else {
                outcome.cancelled = true;
            }
            return Ok(outcome);
        }

        loop {
            let frame = self.render(resized.clone());
            if !self.type_frame(&frame)? {
                outcome.cancelled = true;
                return Ok(outcome);
            }
            outcome.frames += 1;
            if !self.separate()? {
                outcome.cancelled = true;
                return Ok(outcome);
            }
        }
    }

    /// Play every path in order, loading each through `source`.
    ///
    /// Images that fail to load are skipped without output or pause. After
    /// the last image playback stops, or starts over in loop mode. A loop
    /// pass that produces no frame at all ends playback rather than
    /// spinning.
    pub fn play_sequence<I: ImageSource + ?Sized>(
        &mut self,
        paths: &[PathBuf],
        source: &I,
    ) -> Result<PlayOutcome, PlayError> {
        let mut outcome = PlayOutcome::default();

        loop {
            let frames_before = outcome.frames;

            for path in paths {
                if self.cancel.is_cancelled() {
                    outcome.cancelled = true;
                    return Ok(outcome);
                }

                let image = match source.load(path) {
                    Ok(image) => image,
                    Err(e) => {
                        log::warn!("skipping {}: {}", path.display(), e);
                        outcome.skipped += 1;
                        continue;
                    }
                };

                let resized = resize_for_terminal(&image, self.config.width);
                let frame = self.render(resized);
                if !self.type_frame(&frame)? {
                    outcome.cancelled = true;
                    return Ok(outcome);
                }
                outcome.frames += 1;
                if !self.separate()? {
                    outcome.cancelled = true;
                    return Ok(outcome);
                }
            }

            if !self.config.loop_mode {
                return Ok(outcome);
            }
            if outcome.frames == frames_before {
                log::warn!("no image in the sequence could be shown, stopping");
                return Ok(outcome);
            }
        }
    }

    /// Type a frame, returning `false` if cancelled part way.
    fn type_frame(&mut self, frame: &Frame) -> io::Result<bool> {
        let outcome = self
            .typewriter
            .type_frame(frame, &mut self.sink, &self.cancel)?;
        Ok(outcome == TypeOutcome::Finished)
    }

    /// Blank separator line and inter-frame pause. `false` if cancelled.
    fn separate(&mut self) -> io::Result<bool> {
        self.sink.write_all(b"\n")?;
        self.sink.flush()?;
        Ok(self.typewriter.pause(self.pause, &self.cancel))
    }
}
