//! motion_tones library - ROI motion detection and procedural piano tones

pub mod audio;
pub mod config;
pub mod error;
pub mod motion;
pub mod params;
pub mod tone;

pub use error::{Error, Result};
