//! Crate-wide error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::params::Roi;

/// Errors raised by the motion detector, tone generator and playback paths
#[derive(Debug, Error)]
pub enum Error {
    /// The frame source could not be opened (fatal at startup)
    #[error("failed to open frame source {source_name}: {reason}")]
    SourceOpen { source_name: String, reason: String },

    /// The ROI does not fit inside a frame of the given size
    #[error("ROI {roi:?} does not fit inside a {width}x{height} frame")]
    RoiOutOfBounds { roi: Roi, width: u32, height: u32 },

    /// Consecutive frames changed geometry
    #[error("frame size changed from {expected:?} to {actual:?}")]
    FrameSizeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("failed to load label font: {0}")]
    Font(String),

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("unknown note '{0}'")]
    UnknownNote(String),

    #[error("config error in {path}: {reason}")]
    Config { path: PathBuf, reason: String },

    #[error("audio playback error: {0}")]
    Playback(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Wav(#[from] hound::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
