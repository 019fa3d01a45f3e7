//! Additive piano-tone synthesis with an attack/decay envelope.
//!
//! Each note is the sum of five harmonics shaped by a short linear attack
//! followed by an exponential decay. The decay clock restarts at the end of
//! the attack, so the first post-attack sample has envelope exp(0) = 1.

use std::f64::consts::PI;

use crate::params::{tone_constants::PCM_FULL_SCALE, ToneParams};

/// Sum of the weighted harmonics of `frequency_hz` at time `time_s`
pub fn harmonic_sum(frequency_hz: f64, time_s: f64, amplitudes: &[f64]) -> f64 {
    amplitudes
        .iter()
        .enumerate()
        .map(|(k, amplitude)| {
            let multiple = (k + 1) as f64;
            amplitude * (2.0 * PI * frequency_hz * multiple * time_s).sin()
        })
        .sum()
}

/// Envelope gain for sample `index`
pub fn envelope(index: usize, params: &ToneParams) -> f64 {
    let attack = params.attack_samples();
    if index < attack {
        // Inclusive 0 → 1 ramp over the attack window
        if attack == 1 {
            0.0
        } else {
            index as f64 / (attack - 1) as f64
        }
    } else {
        let step = sample_period(params);
        let since_attack_s = (index - attack) as f64 * step;
        (-params.decay_rate * since_attack_s).exp()
    }
}

/// Synthesize one note as floating-point samples in roughly [-1, 1]
///
/// Pure function of `frequency_hz` and `params`: repeated calls return
/// bit-identical buffers.
pub fn synthesize(frequency_hz: f64, params: &ToneParams) -> Vec<f64> {
    let count = params.sample_count();
    let step = sample_period(params);

    (0..count)
        .map(|i| {
            let t = i as f64 * step;
            let raw = harmonic_sum(frequency_hz, t, &params.harmonic_amplitudes);
            raw * envelope(i, params) * params.output_gain
        })
        .collect()
}

/// Convert float samples to signed 16-bit PCM (clamped, truncated toward zero)
pub fn quantize(samples: &[f64]) -> Vec<i16> {
    samples.iter().map(|&s| quantize_sample(s)).collect()
}

#[inline]
fn quantize_sample(sample: f64) -> i16 {
    let scaled = sample * PCM_FULL_SCALE;
    scaled.clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

/// Synthesize and quantize in one step
pub fn render_note(frequency_hz: f64, params: &ToneParams) -> Vec<i16> {
    quantize(&synthesize(frequency_hz, params))
}

/// Spacing of the time axis: `duration / count`, so the axis covers [0, duration)
fn sample_period(params: &ToneParams) -> f64 {
    let count = params.sample_count();
    if count == 0 {
        0.0
    } else {
        params.duration_s / count as f64
    }
}
