//! Frame sources feeding the detection loop.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::error::{Error, Result};

/// File extensions decoded by [`ImageSequenceSource`]
const FRAME_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "ppm"];

/// A sequence of color frames with fixed geometry
pub trait FrameSource {
    /// Next frame, or `Ok(None)` once the stream is exhausted
    fn next_frame(&mut self) -> Result<Option<RgbImage>>;
}

impl<S: FrameSource + ?Sized> FrameSource for Box<S> {
    fn next_frame(&mut self) -> Result<Option<RgbImage>> {
        (**self).next_frame()
    }
}

/// Reads image files from a directory in file-name order.
///
/// A frame that fails to decode ends the stream; there is no retry.
pub struct ImageSequenceSource {
    pending: VecDeque<PathBuf>,
}

impl ImageSequenceSource {
    /// Open a directory of frames. Fails if it is missing, unreadable or
    /// holds no frame files.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        let entries = std::fs::read_dir(&dir).map_err(|e| Error::SourceOpen {
            source_name: dir.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut frames: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && is_frame_file(path))
            .collect();
        frames.sort();

        if frames.is_empty() {
            return Err(Error::SourceOpen {
                source_name: dir.display().to_string(),
                reason: "no frame images found".to_string(),
            });
        }

        log::info!("Opened {} frames from {}", frames.len(), dir.display());
        Ok(Self { pending: frames.into() })
    }
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> Result<Option<RgbImage>> {
        let Some(path) = self.pending.pop_front() else {
            return Ok(None);
        };

        match image::open(&path) {
            Ok(decoded) => Ok(Some(decoded.to_rgb8())),
            Err(e) => {
                log::warn!("Frame read failed at {}: {}; ending stream", path.display(), e);
                self.pending.clear();
                Ok(None)
            }
        }
    }
}

fn is_frame_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| FRAME_EXTENSIONS.iter().any(|f| f.eq_ignore_ascii_case(ext)))
}

/// Adapts any iterator of frames into a source
pub struct IterSource<I> {
    frames: I,
}

impl<I> IterSource<I>
where
    I: Iterator<Item = RgbImage>,
{
    pub fn new(frames: impl IntoIterator<Item = RgbImage, IntoIter = I>) -> Self {
        Self {
            frames: frames.into_iter(),
        }
    }
}

impl<I> FrameSource for IterSource<I>
where
    I: Iterator<Item = RgbImage>,
{
    fn next_frame(&mut self) -> Result<Option<RgbImage>> {
        Ok(self.frames.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_missing_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let result = ImageSequenceSource::open(dir.path().join("nope"));
        assert!(matches!(result, Err(Error::SourceOpen { .. })));
    }

    #[test]
    fn test_empty_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a frame").unwrap();
        assert!(ImageSequenceSource::open(dir.path()).is_err());
    }

    #[test]
    fn test_reads_frames_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        for (name, value) in [("b.png", 200u8), ("a.png", 10u8)] {
            RgbImage::from_pixel(4, 3, Rgb([value; 3]))
                .save(dir.path().join(name))
                .unwrap();
        }

        let mut source = ImageSequenceSource::open(dir.path()).unwrap();
        let first = source.next_frame().unwrap().unwrap();
        assert_eq!(first.get_pixel(0, 0)[0], 10);
        let second = source.next_frame().unwrap().unwrap();
        assert_eq!(second.get_pixel(0, 0)[0], 200);
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_frame_ends_stream() {
        let dir = tempfile::tempdir().unwrap();
        RgbImage::from_pixel(4, 3, Rgb([0; 3]))
            .save(dir.path().join("0.png"))
            .unwrap();
        std::fs::write(dir.path().join("1.png"), b"garbage").unwrap();
        RgbImage::from_pixel(4, 3, Rgb([0; 3]))
            .save(dir.path().join("2.png"))
            .unwrap();

        let mut source = ImageSequenceSource::open(dir.path()).unwrap();
        assert!(source.next_frame().unwrap().is_some());
        assert!(source.next_frame().unwrap().is_none());
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_boxed_source() {
        let frames = vec![RgbImage::new(2, 2)];
        let mut source: Box<dyn FrameSource> = Box::new(IterSource::new(frames));
        assert!(source.next_frame().unwrap().is_some());
        assert!(source.next_frame().unwrap().is_none());
    }

    #[test]
    fn test_iter_source() {
        let frames = vec![RgbImage::new(2, 2), RgbImage::new(2, 2)];
        let mut source = IterSource::new(frames);
        assert!(source.next_frame().unwrap().is_some());
        assert!(source.next_frame().unwrap().is_some());
        assert!(source.next_frame().unwrap().is_none());
    }
}
