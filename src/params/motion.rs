//! Motion detection parameters.

use std::fmt;
use std::str::FromStr;

/// Rectangular region of interest in frame pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roi {
    /// Left edge (pixels)
    pub x: u32,

    /// Top edge (pixels)
    pub y: u32,

    /// Width (pixels)
    pub width: u32,

    /// Height (pixels)
    pub height: u32,
}

impl Roi {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Number of pixels covered (upper bound for the motion score)
    pub fn area(&self) -> u32 {
        self.width * self.height
    }

    /// Exclusive right edge
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Whether the whole rectangle lies inside a `width` x `height` frame
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x.checked_add(self.width).is_some_and(|r| r <= width)
            && self.y.checked_add(self.height).is_some_and(|b| b <= height)
    }

    pub fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

impl Default for Roi {
    fn default() -> Self {
        Self::new(200, 120, 300, 220)
    }
}

impl fmt::Display for Roi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{},{}", self.x, self.y, self.width, self.height)
    }
}

/// Parses `X,Y,W,H`
impl FromStr for Roi {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split(',')
            .map(|p| p.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| format!("invalid ROI '{}': {}", s, e))?;

        match parts.as_slice() {
            [x, y, w, h] => Ok(Roi::new(*x, *y, *w, *h)),
            _ => Err(format!("ROI must be X,Y,W,H, got '{}'", s)),
        }
    }
}

/// Frame differencing and decision parameters
#[derive(Debug, Clone)]
pub struct MotionParams {
    /// Capture device index used when no frame directory is given
    pub source_index: u32,

    /// Region examined for motion
    pub roi: Roi,

    /// Minimum motion score (changed ROI pixels) that is NOT yet motion.
    /// Motion is reported when the score is strictly greater.
    pub motion_pixel_threshold: u32,

    /// Per-pixel intensity difference above which a pixel counts as changed (0-255)
    pub diff_threshold: u8,

    /// Gaussian blur kernel size applied before differencing (odd, 1 = off)
    pub blur_kernel: u32,

    /// Median filter kernel size applied to the binary mask (odd, 1 = off)
    pub median_kernel: u32,

    /// Opacity of the filled ROI when motion is detected (0.0-1.0)
    pub overlay_alpha: f32,

    /// Outline thickness when idle (pixels)
    pub outline_thickness: u32,
}

impl Default for MotionParams {
    fn default() -> Self {
        Self {
            source_index: 0,
            roi: Roi::default(),
            motion_pixel_threshold: 800,
            diff_threshold: 25,
            blur_kernel: 5,
            median_kernel: 5,
            overlay_alpha: 0.35,
            outline_thickness: 2,
        }
    }
}

impl MotionParams {
    /// Smoothing disabled; the mask is the raw thresholded difference
    pub fn unfiltered() -> Self {
        Self {
            blur_kernel: 1,
            median_kernel: 1,
            ..Self::default()
        }
    }

    /// Validate configuration (odd kernels, non-empty ROI, alpha range)
    pub fn validate(&self) -> Result<(), String> {
        if self.roi.width == 0 || self.roi.height == 0 {
            return Err(format!("ROI must be non-empty, got {}", self.roi));
        }
        if self.blur_kernel == 0 || self.blur_kernel % 2 == 0 {
            return Err(format!(
                "blur kernel must be odd and positive, got {}",
                self.blur_kernel
            ));
        }
        if self.median_kernel == 0 || self.median_kernel % 2 == 0 {
            return Err(format!(
                "median kernel must be odd and positive, got {}",
                self.median_kernel
            ));
        }
        if !(0.0..=1.0).contains(&self.overlay_alpha) {
            return Err(format!(
                "overlay alpha must be in [0, 1], got {}",
                self.overlay_alpha
            ));
        }
        Ok(())
    }
}
