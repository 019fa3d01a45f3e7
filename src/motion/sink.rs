//! Display sinks receiving annotated frames.

use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::error::Result;

/// What the sink wants the loop to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkSignal {
    Continue,
    /// External quit request (e.g. ESC in an interactive viewer)
    Quit,
}

/// Renders frames and reports the quit signal once per iteration
pub trait DisplaySink {
    fn show(&mut self, frame: &RgbImage) -> Result<SinkSignal>;
}

/// Writes every shown frame as `frame_NNNNN.png` into a directory
pub struct PngSequenceSink {
    dir: PathBuf,
    frame_index: usize,
    max_frames: Option<usize>,
}

impl PngSequenceSink {
    /// Create the sink, creating the output directory if needed.
    /// `max_frames` acts as the quit signal once that many frames were shown.
    pub fn new(dir: impl AsRef<Path>, max_frames: Option<usize>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            frame_index: 0,
            max_frames,
        })
    }

    fn frame_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("frame_{:05}.png", index))
    }
}

impl DisplaySink for PngSequenceSink {
    fn show(&mut self, frame: &RgbImage) -> Result<SinkSignal> {
        if limit_reached(self.frame_index, self.max_frames) {
            return Ok(SinkSignal::Quit);
        }
        let path = self.frame_path(self.frame_index);
        frame.save(&path)?;
        self.frame_index += 1;
        Ok(quit_after(self.frame_index, self.max_frames))
    }
}

/// Discards frames; optionally quits after a frame limit
#[derive(Debug, Default)]
pub struct NullSink {
    shown: usize,
    max_frames: Option<usize>,
}

impl NullSink {
    pub fn new(max_frames: Option<usize>) -> Self {
        Self {
            shown: 0,
            max_frames,
        }
    }
}

impl DisplaySink for NullSink {
    fn show(&mut self, _frame: &RgbImage) -> Result<SinkSignal> {
        if limit_reached(self.shown, self.max_frames) {
            return Ok(SinkSignal::Quit);
        }
        self.shown += 1;
        Ok(quit_after(self.shown, self.max_frames))
    }
}

fn limit_reached(shown: usize, max_frames: Option<usize>) -> bool {
    max_frames.is_some_and(|max| shown >= max)
}

fn quit_after(shown: usize, max_frames: Option<usize>) -> SinkSignal {
    if limit_reached(shown, max_frames) {
        SinkSignal::Quit
    } else {
        SinkSignal::Continue
    }
}
