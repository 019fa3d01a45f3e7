//! Mono 16-bit WAV persistence.

use std::path::Path;

use crate::error::{Error, Result};
use crate::params::tone_constants::{BITS_PER_SAMPLE, CHANNELS};

/// WAV header used for every generated note
pub fn note_spec(sample_rate_hz: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: CHANNELS,
        sample_rate: sample_rate_hz,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Write `samples` as a mono 16-bit WAV file.
///
/// The parent directory must already exist. A failed write may leave a
/// partial file behind.
pub fn write_wav(path: impl AsRef<Path>, samples: &[i16], sample_rate_hz: u32) -> Result<()> {
    let mut writer = hound::WavWriter::create(path.as_ref(), note_spec(sample_rate_hz))?;
    {
        let mut sample_writer = writer.get_i16_writer(samples.len() as u32);
        for &sample in samples {
            sample_writer.write_sample(sample);
        }
        sample_writer.flush()?;
    }
    writer.finalize()?;
    Ok(())
}

/// Decoded note file
#[derive(Debug, Clone)]
pub struct WavClip {
    pub spec: hound::WavSpec,
    /// Interleaved samples (one channel for generated notes)
    pub samples: Vec<i16>,
}

impl WavClip {
    /// Duration in seconds
    pub fn duration_s(&self) -> f64 {
        let frames = self.samples.len() / self.spec.channels.max(1) as usize;
        frames as f64 / self.spec.sample_rate as f64
    }
}

/// Read a 16-bit integer WAV file
pub fn read_wav(path: impl AsRef<Path>) -> Result<WavClip> {
    let mut reader = hound::WavReader::open(path.as_ref())?;
    let spec = reader.spec();
    if spec.sample_format != hound::SampleFormat::Int || spec.bits_per_sample != BITS_PER_SAMPLE {
        return Err(Error::Wav(hound::Error::Unsupported));
    }
    let samples = reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(WavClip { spec, samples })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("A.wav");
        let samples: Vec<i16> = vec![0, 1000, -1000, i16::MAX, i16::MIN];

        write_wav(&path, &samples, 44100).unwrap();
        let clip = read_wav(&path).unwrap();

        assert_eq!(clip.spec.channels, 1);
        assert_eq!(clip.spec.bits_per_sample, 16);
        assert_eq!(clip.spec.sample_rate, 44100);
        assert_eq!(clip.samples, samples);

        // 44-byte canonical header + 2 bytes per sample
        let len = std::fs::metadata(&path).unwrap().len();
        assert_eq!(len, 44 + 2 * samples.len() as u64);
    }

    #[test]
    fn test_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("C.wav");
        assert!(write_wav(&path, &[0; 8], 44100).is_err());
    }

    #[test]
    fn test_clip_duration() {
        let clip = WavClip {
            spec: note_spec(44100),
            samples: vec![0; 66150],
        };
        assert!((clip.duration_s() - 1.5).abs() < 1e-12);
    }
}
