//! Detection loop tying a frame source, the detector and a display sink.

use super::detector::{DetectorState, MotionDetector};
use super::sink::{DisplaySink, SinkSignal};
use super::source::FrameSource;
use crate::error::Result;

/// Why the loop reached `Stopped`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    SourceExhausted,
    QuitRequested,
}

/// Counters accumulated over a run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Frames pulled from the source (bootstrap frame included)
    pub frames: usize,

    /// Frames classified as motion
    pub motion_frames: usize,

    /// Highest motion score seen
    pub max_score: u32,

    pub stop_reason: Option<StopReason>,
}

/// Owns the detector together with its frame source and display sink
pub struct MotionSystem<S, D> {
    detector: MotionDetector,
    source: S,
    sink: D,
    summary: RunSummary,
}

impl<S, D> MotionSystem<S, D>
where
    S: FrameSource,
    D: DisplaySink,
{
    pub fn new(detector: MotionDetector, source: S, sink: D) -> Self {
        Self {
            detector,
            source,
            sink,
            summary: RunSummary::default(),
        }
    }

    pub fn state(&self) -> DetectorState {
        self.detector.state()
    }

    pub fn summary(&self) -> &RunSummary {
        &self.summary
    }

    /// Pull, analyze and show one frame; returns the resulting state.
    ///
    /// Returns `Stopped` once the source is exhausted or the sink asks to
    /// quit; further calls are no-ops.
    pub fn step(&mut self) -> Result<DetectorState> {
        if self.detector.state().is_terminal() {
            return Ok(DetectorState::Stopped);
        }

        let Some(frame) = self.source.next_frame()? else {
            return Ok(self.stop(StopReason::SourceExhausted));
        };
        self.summary.frames += 1;

        let before = self.detector.state();
        let analysis = self.detector.analyze(&frame)?;

        if let Some(score) = analysis.motion_score {
            self.summary.max_score = self.summary.max_score.max(score);
            log::debug!(
                "frame {}: motion_pixels={} -> {:?}",
                self.summary.frames,
                score,
                analysis.state
            );
        }
        if analysis.state == DetectorState::MotionDetected {
            self.summary.motion_frames += 1;
        }
        if before != analysis.state && before != DetectorState::Bootstrap {
            log::info!(
                "frame {}: {:?} -> {:?}",
                self.summary.frames,
                before,
                analysis.state
            );
        }

        match self.sink.show(&analysis.annotated)? {
            SinkSignal::Continue => Ok(analysis.state),
            SinkSignal::Quit => Ok(self.stop(StopReason::QuitRequested)),
        }
    }

    /// Step until `Stopped`
    pub fn run(&mut self) -> Result<RunSummary> {
        while !self.step()?.is_terminal() {}
        log::info!(
            "Stopped after {} frames ({} with motion, max score {})",
            self.summary.frames,
            self.summary.motion_frames,
            self.summary.max_score
        );
        Ok(self.summary.clone())
    }

    fn stop(&mut self, reason: StopReason) -> DetectorState {
        log::info!("Detection stopped: {:?}", reason);
        self.detector.stop();
        self.summary.stop_reason = Some(reason);
        DetectorState::Stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motion::{IterSource, NullSink};
    use crate::params::{MotionParams, Roi};
    use image::{Rgb, RgbImage};

    fn solid(value: u8) -> RgbImage {
        RgbImage::from_pixel(64, 48, Rgb([value; 3]))
    }

    fn detector() -> MotionDetector {
        MotionDetector::new(MotionParams {
            roi: Roi::new(8, 8, 32, 24),
            motion_pixel_threshold: 50,
            ..MotionParams::default()
        })
        .unwrap()
    }

    #[test]
    fn test_state_sequence() {
        let frames = vec![solid(0), solid(0), solid(255), solid(255)];
        let mut system =
            MotionSystem::new(detector(), IterSource::new(frames), NullSink::new(None));

        assert_eq!(system.step().unwrap(), DetectorState::Bootstrap);
        assert_eq!(system.step().unwrap(), DetectorState::Idle);
        assert_eq!(system.step().unwrap(), DetectorState::MotionDetected);
        assert_eq!(system.step().unwrap(), DetectorState::Idle);
        assert_eq!(system.step().unwrap(), DetectorState::Stopped);
        assert_eq!(system.step().unwrap(), DetectorState::Stopped);
        assert_eq!(
            system.summary().stop_reason,
            Some(StopReason::SourceExhausted)
        );
    }

    #[test]
    fn test_quit_signal_stops_loop() {
        let frames = (0..10).map(|i| solid(if i % 2 == 0 { 0 } else { 255 }));
        let mut system =
            MotionSystem::new(detector(), IterSource::new(frames), NullSink::new(Some(3)));

        let summary = system.run().unwrap();
        assert_eq!(summary.frames, 3);
        assert_eq!(summary.stop_reason, Some(StopReason::QuitRequested));
        assert_eq!(system.state(), DetectorState::Stopped);
    }

    #[test]
    fn test_summary_counts_motion() {
        let frames = vec![solid(0), solid(255), solid(0), solid(0)];
        let mut system =
            MotionSystem::new(detector(), IterSource::new(frames), NullSink::new(None));

        let summary = system.run().unwrap();
        assert_eq!(summary.frames, 4);
        assert_eq!(summary.motion_frames, 2);
        assert_eq!(summary.max_score, 32 * 24);
    }

    #[test]
    fn test_boxed_source_and_zero_limit() {
        let frames = vec![solid(0), solid(255)];
        let source: Box<dyn FrameSource> = Box::new(IterSource::new(frames));
        let mut system = MotionSystem::new(detector(), source, NullSink::new(Some(0)));

        let summary = system.run().unwrap();
        assert_eq!(summary.frames, 1);
        assert_eq!(summary.stop_reason, Some(StopReason::QuitRequested));
    }

    #[test]
    fn test_empty_source_stops_immediately() {
        let mut system = MotionSystem::new(
            detector(),
            IterSource::new(Vec::<RgbImage>::new()),
            NullSink::new(None),
        );
        let summary = system.run().unwrap();
        assert_eq!(summary.frames, 0);
        assert_eq!(summary.stop_reason, Some(StopReason::SourceExhausted));
    }
}
