//! Blocking note playback on the default output device.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SampleFormat, SizedSample};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use super::clip::{resample_linear, NoteClip};
use crate::error::{Error, Result};
use crate::params::PlaybackParams;

/// Poll interval while waiting for the stream to drain
const DRAIN_POLL: Duration = Duration::from_millis(10);

/// Extra time allowed for the device buffer after the last sample
const DRAIN_TAIL: Duration = Duration::from_millis(100);

/// Audio output handle for auditioning note clips
pub struct PlaybackSystem {
    device: cpal::Device,
    config: cpal::SupportedStreamConfig,
    params: PlaybackParams,
}

impl PlaybackSystem {
    /// Open the default output device
    pub fn new(params: PlaybackParams) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| Error::Playback("No audio output device found".to_string()))?;

        let config = device
            .default_output_config()
            .map_err(|e| Error::Playback(format!("Failed to get audio config: {}", e)))?;

        log::info!(
            "Audio: {} @ {}Hz, {} channels",
            device.name().unwrap_or_else(|_| "Unknown".to_string()),
            config.sample_rate().0,
            config.channels()
        );

        Ok(Self {
            device,
            config,
            params,
        })
    }

    /// Play a clip and block until it has been handed to the device
    pub fn play(&self, clip: &NoteClip) -> Result<()> {
        let device_rate = self.config.sample_rate().0;
        let samples = resample_linear(
            &clip.to_f32(self.params.gain()),
            clip.sample_rate_hz,
            device_rate,
        );
        let total = samples.len();
        let samples = Arc::new(samples);
        let cursor = Arc::new(AtomicUsize::new(0));

        log::info!(
            "Playing note: {} (index: {}, {:.2} s)",
            clip.note.name,
            clip.note.index(),
            clip.duration_s()
        );

        let stream_config: cpal::StreamConfig = self.config.config();
        let stream = match self.config.sample_format() {
            SampleFormat::F32 => self.build_stream::<f32>(&stream_config, &samples, &cursor),
            SampleFormat::I16 => self.build_stream::<i16>(&stream_config, &samples, &cursor),
            SampleFormat::U16 => self.build_stream::<u16>(&stream_config, &samples, &cursor),
            other => {
                return Err(Error::Playback(format!(
                    "Unsupported sample format {:?}",
                    other
                )))
            }
        }?;

        stream
            .play()
            .map_err(|e| Error::Playback(format!("Failed to start audio stream: {}", e)))?;

        let deadline =
            Instant::now() + Duration::from_secs_f64(clip.duration_s()) + Duration::from_secs(1);
        while cursor.load(Ordering::Relaxed) < total && Instant::now() < deadline {
            thread::sleep(DRAIN_POLL);
        }
        thread::sleep(DRAIN_TAIL);
        Ok(())
    }

    fn build_stream<T>(
        &self,
        config: &cpal::StreamConfig,
        samples: &Arc<Vec<f32>>,
        cursor: &Arc<AtomicUsize>,
    ) -> Result<cpal::Stream>
    where
        T: SizedSample + FromSample<f32>,
    {
        let channels = config.channels.max(1) as usize;
        let samples = Arc::clone(samples);
        let cursor = Arc::clone(cursor);

        self.device
            .build_output_stream(
                config,
                move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                    for frame in data.chunks_mut(channels) {
                        let index = cursor.fetch_add(1, Ordering::Relaxed);
                        // Safety limiter: hard clip to ±1.0
                        let value = samples.get(index).copied().unwrap_or(0.0).clamp(-1.0, 1.0);
                        for out in frame.iter_mut() {
                            *out = T::from_sample(value);
                        }
                    }
                },
                |err| log::error!("Audio stream error: {}", err),
                None,
            )
            .map_err(|e| Error::Playback(format!("Failed to build audio stream: {}", e)))
    }
}
