//! Paced, character-by-character output.
//!
//! A [`Typewriter`] writes a [`Frame`] to a sink one unit at a time, sleeping
//! between units so the text appears at a fixed characters-per-second rate.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::ascii::Frame;

/// Shortest sleep worth asking the OS for. Shorter per-unit intervals are
/// accumulated until they add up to this.
pub const MIN_SLEEP: Duration = Duration::from_millis(1);

/// Pause slices are capped at this so cancellation is noticed promptly.
const PAUSE_SLICE: Duration = Duration::from_millis(50);

/// Something that can block the current thread for a while.
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

/// Sleeps with [`std::thread::sleep`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Shared flag used to stop typing and looping from another thread
/// (typically a Ctrl+C handler).
#[derive(Debug, Default, Clone)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// How a typing run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeOutcome {
    /// Every unit was written
    Finished,
    /// Stopped early; the count is how many units were written
    Cancelled(usize),
}

/// Per-unit interval for a rate in characters per second.
///
/// Returns `None` for a rate of zero, meaning "as fast as possible".
pub fn char_interval(chars_per_second: u32) -> Option<Duration> {
    if chars_per_second == 0 {
        return None;
    }
    Some(Duration::from_secs(1) / chars_per_second)
}

/// Writes frames at a steady pace.
pub struct Typewriter<S: Sleeper = ThreadSleeper> {
    interval: Option<Duration>,
    sleeper: S,
}

impl Typewriter<ThreadSleeper> {
    /// Typewriter that really sleeps.
    pub fn new(chars_per_second: u32) -> Self {
        Self::with_sleeper(chars_per_second, ThreadSleeper)
    }
}

impl<S: Sleeper> Typewriter<S> {
    pub fn with_sleeper(chars_per_second: u32, sleeper: S) -> Self {
        Self {
            interval: char_interval(chars_per_second),
            sleeper,
        }
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Type `frame` into `sink`, checking `cancel` before every unit.
    ///
    /// Each unit (a glyph plus its escapes) is written whole, so stopping
    /// never leaves a half-written escape sequence behind. Intervals shorter
    /// than [`MIN_SLEEP`] are owed and paid back in one sleep once they add
    /// up.
    pub fn type_frame<W: Write>(
        &mut self,
        frame: &Frame,
        sink: &mut W,
        cancel: &CancelToken,
    ) -> io::Result<TypeOutcome> {
        let Some(interval) = self.interval else {
            if cancel.is_cancelled() {
                return Ok(TypeOutcome::Cancelled(0));
            }
            sink.write_all(frame.as_str().as_bytes())?;
            sink.flush()?;
            return Ok(TypeOutcome::Finished);
        };

        let mut owed = Duration::ZERO;
        let mut written = 0;

        for unit in frame.units() {
            if cancel.is_cancelled() {
                sink.flush()?;
                return Ok(TypeOutcome::Cancelled(written));
            }
            sink.write_all(unit.as_bytes())?;
            written += 1;

            owed += interval;
            if owed >= MIN_SLEEP {
                sink.flush()?;
                self.sleeper.sleep(owed);
                owed = Duration::ZERO;
            }
        }

        sink.flush()?;
        if !owed.is_zero() {
            self.sleeper.sleep(owed);
        }
        Ok(TypeOutcome::Finished)
    }

    /// Sleep for `duration` in short slices, returning early (and `false`)
    /// once `cancel` is set.
    pub fn pause(&mut self, duration: Duration, cancel: &CancelToken) -> bool {
        let mut remaining = duration;
        while !remaining.is_zero() {
            if cancel.is_cancelled() {
                return false;
            }
            let slice = remaining.min(PAUSE_SLICE);
            self.sleeper.sleep(slice);
            remaining -= slice;
        }
        !cancel.is_cancelled()
    }
}
