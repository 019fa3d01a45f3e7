//! Frame-differencing motion detector with an explicit state machine.

use image::{GrayImage, RgbImage};

use super::filters::{
    count_nonzero_in_roi, difference_mask, gaussian_blur, median_filter, to_grayscale,
};
use super::overlay::{blend_fill, draw_outline, TextOverlay, GREEN, RED, WHITE};
use crate::error::{Error, Result};
use crate::params::MotionParams;

/// Position of the score label (baseline-left, pixels)
const LABEL_ORIGIN: (u32, u32) = (10, 30);

/// Score label font size (pixels per em)
const LABEL_FONT_SIZE: f32 = 24.0;

/// Detector lifecycle
///
/// `Bootstrap` until a reference frame exists, then `Idle` or
/// `MotionDetected` per frame. `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorState {
    Bootstrap,
    Idle,
    MotionDetected,
    Stopped,
}

impl DetectorState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DetectorState::Stopped)
    }
}

/// Result of processing one frame
#[derive(Debug, Clone)]
pub struct FrameAnalysis {
    /// State reached after this frame
    pub state: DetectorState,

    /// Changed ROI pixels; `None` for the bootstrap frame
    pub motion_score: Option<u32>,

    /// Input frame with ROI and score overlays drawn
    pub annotated: RgbImage,
}

/// Compares each frame against the previous one inside a fixed ROI
pub struct MotionDetector {
    params: MotionParams,
    /// Last preprocessed frame; `None` before the first frame
    previous: Option<GrayImage>,
    state: DetectorState,
    label: TextOverlay,
}

impl MotionDetector {
    /// Create a detector, rejecting invalid parameters
    pub fn new(params: MotionParams) -> Result<Self> {
        params.validate().map_err(Error::InvalidParams)?;
        Ok(Self {
            params,
            previous: None,
            state: DetectorState::Bootstrap,
            label: TextOverlay::new(LABEL_FONT_SIZE)?,
        })
    }

    pub fn params(&self) -> &MotionParams {
        &self.params
    }

    pub fn state(&self) -> DetectorState {
        self.state
    }

    /// Enter the terminal state
    pub fn stop(&mut self) {
        self.state = DetectorState::Stopped;
    }

    /// Grayscale + blur, the representation kept as reference
    pub fn preprocess(&self, frame: &RgbImage) -> GrayImage {
        gaussian_blur(&to_grayscale(frame), self.params.blur_kernel)
    }

    /// Filtered binary change mask between two preprocessed frames
    pub fn motion_mask(&self, current: &GrayImage, previous: &GrayImage) -> GrayImage {
        let mask = difference_mask(current, previous, self.params.diff_threshold);
        median_filter(&mask, self.params.median_kernel)
    }

    /// Idle / MotionDetected decision for a score (strictly greater than threshold)
    pub fn classify(&self, motion_score: u32) -> DetectorState {
        if motion_score > self.params.motion_pixel_threshold {
            DetectorState::MotionDetected
        } else {
            DetectorState::Idle
        }
    }

    /// Process one frame: the detector's single transition function.
    ///
    /// The first frame only becomes the reference. Every later frame is
    /// differenced against the reference, scored, annotated and then
    /// replaces it.
    pub fn analyze(&mut self, frame: &RgbImage) -> Result<FrameAnalysis> {
        if self.state.is_terminal() {
            return Ok(FrameAnalysis {
                state: DetectorState::Stopped,
                motion_score: None,
                annotated: frame.clone(),
            });
        }

        let (width, height) = frame.dimensions();
        let roi = self.params.roi;
        if !roi.fits_within(width, height) {
            return Err(Error::RoiOutOfBounds { roi, width, height });
        }

        let current = self.preprocess(frame);
        let mut annotated = frame.clone();

        let Some(previous) = self.previous.take() else {
            draw_outline(&mut annotated, &roi, GREEN, self.params.outline_thickness);
            self.previous = Some(current);
            self.state = DetectorState::Bootstrap;
            return Ok(FrameAnalysis {
                state: DetectorState::Bootstrap,
                motion_score: None,
                annotated,
            });
        };

        if previous.dimensions() != current.dimensions() {
            let expected = previous.dimensions();
            // Keep the old reference so a later well-sized frame can still compare
            self.previous = Some(previous);
            return Err(Error::FrameSizeMismatch {
                expected,
                actual: current.dimensions(),
            });
        }

        let mask = self.motion_mask(&current, &previous);
        let motion_score = count_nonzero_in_roi(&mask, &roi);
        let state = self.classify(motion_score);

        match state {
            DetectorState::MotionDetected => {
                blend_fill(&mut annotated, &roi, RED, self.params.overlay_alpha)
            }
            _ => draw_outline(&mut annotated, &roi, GREEN, self.params.outline_thickness),
        }
        let label = format!("motion_pixels={}", motion_score);
        self.label.draw(&mut annotated, &label, LABEL_ORIGIN.0, LABEL_ORIGIN.1, WHITE);

        self.previous = Some(current);
        self.state = state;

        Ok(FrameAnalysis {
            state,
            motion_score: Some(motion_score),
            annotated,
        })
    }
}
