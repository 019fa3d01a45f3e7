//! Parameter definitions with physical units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Physical units (pixels, seconds, Hz, etc.)
//! - Documented ranges and meanings
//! - A `validate()` check where combinations can be invalid

mod motion;
mod playback;
mod tone;

// Re-export all types
pub use motion::{MotionParams, Roi};
pub use playback::PlaybackParams;
pub use tone::{tone_constants, ToneOutput, ToneParams};
