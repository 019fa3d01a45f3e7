//! Spectral inspection of rendered notes.

use rustfft::{num_complex::Complex, FftPlanner};
use std::f64::consts::PI;

/// Hann window function for FFT analysis
pub fn hann_window(index: usize, size: usize) -> f64 {
    if size < 2 {
        return 1.0;
    }
    0.5 * (1.0 - ((2.0 * PI * index as f64) / (size as f64 - 1.0)).cos())
}

/// Magnitude spectrum of `samples` (first half, DC included)
pub fn magnitude_spectrum(samples: &[f64]) -> Vec<f64> {
    let size = samples.len();
    if size == 0 {
        return Vec::new();
    }

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(size);

    let mut buffer: Vec<Complex<f64>> = samples
        .iter()
        .enumerate()
        .map(|(i, s)| Complex::new(s * hann_window(i, size), 0.0))
        .collect();
    fft.process(&mut buffer);

    buffer[..size / 2 + 1].iter().map(|c| c.norm()).collect()
}

/// Frequency (Hz) of the strongest spectral peak, with parabolic bin
/// interpolation. `None` for silent or empty input.
pub fn dominant_frequency(samples: &[f64], sample_rate_hz: u32) -> Option<f64> {
    let spectrum = magnitude_spectrum(samples);
    // Skip DC
    let (peak, peak_mag) = spectrum
        .iter()
        .enumerate()
        .skip(1)
        .max_by(|a, b| a.1.total_cmp(b.1))?;
    if *peak_mag <= f64::EPSILON {
        return None;
    }

    let offset = if peak + 1 < spectrum.len() {
        let (l, c, r) = (spectrum[peak - 1], spectrum[peak], spectrum[peak + 1]);
        let denom = l - 2.0 * c + r;
        if denom.abs() > f64::EPSILON {
            0.5 * (l - r) / denom
        } else {
            0.0
        }
    } else {
        0.0
    };

    let bin_hz = sample_rate_hz as f64 / samples.len() as f64;
    Some((peak as f64 + offset) * bin_hz)
}

/// PCM convenience wrapper around [`dominant_frequency`]
pub fn dominant_frequency_pcm(samples: &[i16], sample_rate_hz: u32) -> Option<f64> {
    let floats: Vec<f64> = samples.iter().map(|&s| s as f64 / 32768.0).collect();
    dominant_frequency(&floats, sample_rate_hz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ToneParams;
    use crate::tone::{synthesize, NOTES};

    #[test]
    fn test_hann_window() {
        let size = 1024;

        // Hann window should be 0 at edges, 1 at center
        assert!((hann_window(0, size) - 0.0).abs() < 0.01);
        assert!((hann_window(size - 1, size) - 0.0).abs() < 0.01);
        assert!((hann_window(size / 2, size) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_pure_sine_peak() {
        let rate = 44100;
        let samples: Vec<f64> = (0..8192)
            .map(|i| (2.0 * PI * 1000.0 * i as f64 / rate as f64).sin())
            .collect();
        let hz = dominant_frequency(&samples, rate).unwrap();
        assert!((hz - 1000.0).abs() < 3.0, "measured {}", hz);
    }

    #[test]
    fn test_synthesized_notes_peak_at_fundamental() {
        let params = ToneParams::default();
        for note in NOTES.iter() {
            let samples = synthesize(note.frequency_hz, &params);
            let hz = dominant_frequency(&samples, params.sample_rate_hz).unwrap();
            assert!(
                (hz - note.frequency_hz).abs() < 1.0,
                "{}: expected {} got {}",
                note.name,
                note.frequency_hz,
                hz
            );
        }
    }

    #[test]
    fn test_silence_has_no_peak() {
        assert!(dominant_frequency(&[0.0; 256], 44100).is_none());
        assert!(dominant_frequency(&[], 44100).is_none());
    }
}
