//! Tone synthesis parameters with physical units.

/// Audio constants (compile-time, match the WAV output format)
pub mod tone_constants {
    /// Output channel count (mono)
    pub const CHANNELS: u16 = 1;

    /// Output sample width (bits, signed integer PCM)
    pub const BITS_PER_SAMPLE: u16 = 16;

    /// Full-scale multiplier for float → i16 conversion
    pub const PCM_FULL_SCALE: f64 = 32767.0;

    /// Number of harmonics summed per note (fundamental included)
    pub const HARMONIC_COUNT: usize = 5;
}

use tone_constants::HARMONIC_COUNT;

/// Additive synthesis and envelope parameters
#[derive(Debug, Clone)]
pub struct ToneParams {
    /// Output sample rate (Hz)
    pub sample_rate_hz: u32,

    /// Length of each note (seconds)
    pub duration_s: f64,

    /// Relative amplitude of the fundamental and its 2nd..5th multiples.
    /// Empirical piano-like spectrum, reproduced exactly.
    pub harmonic_amplitudes: [f64; HARMONIC_COUNT],

    /// Linear attack ramp length (seconds)
    /// 0.01 s = 441 samples @ 44.1kHz
    pub attack_s: f64,

    /// Exponential decay rate after the attack (1/seconds)
    /// Formula: envelope = exp(-decay_rate * (t - attack_end))
    pub decay_rate: f64,

    /// Final gain applied before quantization (keeps peaks well below clipping)
    pub output_gain: f64,
}

impl Default for ToneParams {
    fn default() -> Self {
        Self {
            sample_rate_hz: 44100,
            duration_s: 1.5,
            harmonic_amplitudes: [0.5, 0.3, 0.2, 0.1, 0.05],
            attack_s: 0.01,
            decay_rate: 1.5,
            output_gain: 0.3,
        }
    }
}

impl ToneParams {
    /// Total number of samples per note
    pub fn sample_count(&self) -> usize {
        (self.duration_s * self.sample_rate_hz as f64) as usize
    }

    /// Number of samples covered by the attack ramp
    pub fn attack_samples(&self) -> usize {
        (self.attack_s * self.sample_rate_hz as f64) as usize
    }

    /// Validate configuration (positive rate and duration, etc.)
    pub fn validate(&self) -> Result<(), String> {
        if self.sample_rate_hz == 0 {
            return Err("Sample rate must be > 0".to_string());
        }
        if !(self.duration_s.is_finite() && self.duration_s > 0.0) {
            return Err(format!("Duration must be > 0, got {}", self.duration_s));
        }
        if !(self.attack_s.is_finite() && self.attack_s >= 0.0) {
            return Err(format!("Attack time must be >= 0, got {}", self.attack_s));
        }
        if self.attack_s > self.duration_s {
            return Err(format!(
                "Attack time {} exceeds duration {}",
                self.attack_s, self.duration_s
            ));
        }
        if !self.decay_rate.is_finite() || !self.output_gain.is_finite() {
            return Err("Decay rate and output gain must be finite".to_string());
        }
        Ok(())
    }
}

/// Where generated note files are written
#[derive(Debug, Clone)]
pub struct ToneOutput {
    /// Directory receiving `{Note}.wav` files; must exist beforehand
    pub output_dir: String,
}

impl Default for ToneOutput {
    fn default() -> Self {
        Self {
            output_dir: "assets/sounds".to_string(),
        }
    }
}

impl ToneOutput {
    /// WAV file path for a note name
    pub fn note_path(&self, note_name: &str) -> String {
        format!("{}/{}.wav", self.output_dir, note_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sample_counts() {
        let params = ToneParams::default();
        assert_eq!(params.sample_count(), 66150);
        assert_eq!(params.attack_samples(), 441);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_zero_sample_rate_rejected() {
        let params = ToneParams {
            sample_rate_hz: 0,
            ..ToneParams::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_note_path() {
        let output = ToneOutput::default();
        assert_eq!(output.note_path("C#"), "assets/sounds/C#.wav");
    }
}
