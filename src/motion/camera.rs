//! Live capture devices as frame sources (`camera` feature).

use super::source::FrameSource;
use crate::error::Result;

#[cfg(feature = "camera")]
pub use device::CameraSource;

/// Open capture device `index` as a boxed frame source.
///
/// Without the `camera` feature this always fails with `SourceOpen`.
pub fn open_camera(index: u32) -> Result<Box<dyn FrameSource>> {
    #[cfg(feature = "camera")]
    {
        Ok(Box::new(CameraSource::open(index)?))
    }

    #[cfg(not(feature = "camera"))]
    {
        Err(crate::error::Error::SourceOpen {
            source_name: format!("camera {}", index),
            reason: "built without the `camera` feature".to_string(),
        })
    }
}

#[cfg(feature = "camera")]
mod device {
    use image::RgbImage;
    use opencv::{
        core::Mat,
        imgproc,
        prelude::*,
        videoio::{self, VideoCapture},
    };

    use super::FrameSource;
    use crate::error::{Error, Result};

    /// Frames from a webcam, converted from BGR to RGB
    pub struct CameraSource {
        index: u32,
        capture: VideoCapture,
        frame: Mat,
    }

    impl CameraSource {
        /// Open the device; failure is fatal at startup
        pub fn open(index: u32) -> Result<Self> {
            let open_error = |reason: String| Error::SourceOpen {
                source_name: format!("camera {}", index),
                reason,
            };

            let capture = VideoCapture::new(index as i32, videoio::CAP_ANY)
                .map_err(|e| open_error(e.to_string()))?;
            if !capture.is_opened().map_err(|e| open_error(e.to_string()))? {
                return Err(open_error("device not available".to_string()));
            }

            log::info!("Opened camera {}", index);
            Ok(Self {
                index,
                capture,
                frame: Mat::default(),
            })
        }

        fn read_rgb(&mut self) -> opencv::Result<Option<RgbImage>> {
            if !self.capture.read(&mut self.frame)? || self.frame.empty() {
                return Ok(None);
            }

            let mut rgb = Mat::default();
            imgproc::cvt_color(&self.frame, &mut rgb, imgproc::COLOR_BGR2RGB, 0)?;
            let (width, height) = (rgb.cols() as u32, rgb.rows() as u32);
            Ok(RgbImage::from_raw(width, height, rgb.data_bytes()?.to_vec()))
        }
    }

    impl FrameSource for CameraSource {
        fn next_frame(&mut self) -> Result<Option<RgbImage>> {
            match self.read_rgb() {
                Ok(Some(frame)) => Ok(Some(frame)),
                Ok(None) => {
                    log::warn!("Camera {} returned no frame; ending stream", self.index);
                    Ok(None)
                }
                Err(e) => {
                    log::warn!("Camera {} read failed: {}; ending stream", self.index, e);
                    Ok(None)
                }
            }
        }
    }
}
