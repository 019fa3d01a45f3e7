//! ROI motion detection.
//!
//! Frame source → grayscale + blur → difference against the previous frame →
//! threshold → median filter → ROI pixel count → overlay → display sink.

mod camera;
mod detector;
pub mod filters;
pub mod overlay;
mod sink;
mod source;
mod system;

// Re-export public types
#[cfg(feature = "camera")]
pub use camera::CameraSource;
pub use camera::open_camera;
pub use detector::{DetectorState, FrameAnalysis, MotionDetector};
pub use sink::{DisplaySink, NullSink, PngSequenceSink, SinkSignal};
pub use source::{FrameSource, ImageSequenceSource, IterSource};
pub use system::{MotionSystem, RunSummary, StopReason};
