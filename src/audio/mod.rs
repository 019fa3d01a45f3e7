//! Note playback for auditioning generated tones.

mod clip;
mod system;

// Re-export public types
pub use clip::{resample_linear, ClipOrigin, NoteClip};
pub use system::PlaybackSystem;
