//! Note clips: pre-rendered WAV when present, synthesized otherwise.

use std::path::{Path, PathBuf};

use crate::params::ToneParams;
use crate::tone::{read_wav, render_note, Note};

/// Where a clip's samples came from
#[derive(Debug, Clone, PartialEq)]
pub enum ClipOrigin {
    File(PathBuf),
    Synthesized,
}

/// Mono 16-bit samples for one note
#[derive(Debug, Clone)]
pub struct NoteClip {
    pub note: Note,
    pub sample_rate_hz: u32,
    pub samples: Vec<i16>,
    pub origin: ClipOrigin,
}

impl NoteClip {
    /// Render the note in memory
    pub fn synthesize(note: Note, params: &ToneParams) -> Self {
        Self {
            note,
            sample_rate_hz: params.sample_rate_hz,
            samples: render_note(note.frequency_hz, params),
            origin: ClipOrigin::Synthesized,
        }
    }

    /// Load `{sounds_dir}/{note}.wav`, falling back to synthesis when the file
    /// is missing or unreadable
    pub fn load_or_synthesize(note: Note, sounds_dir: &Path, params: &ToneParams) -> Self {
        let path = sounds_dir.join(note.file_name());
        if !path.exists() {
            log::warn!("Audio file not found: {}; using generated tone", path.display());
            return Self::synthesize(note, params);
        }

        match read_wav(&path) {
            Ok(clip) => {
                log::info!("Loaded: {} ({:.2} s)", path.display(), clip.duration_s());
                let channels = clip.spec.channels.max(1) as usize;
                let samples = clip.samples.iter().step_by(channels).copied().collect();
                Self {
                    note,
                    sample_rate_hz: clip.spec.sample_rate,
                    samples,
                    origin: ClipOrigin::File(path),
                }
            }
            Err(e) => {
                log::warn!("Failed to load {}: {}; using generated tone", path.display(), e);
                Self::synthesize(note, params)
            }
        }
    }

    pub fn duration_s(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate_hz.max(1) as f64
    }

    /// Samples as floats in [-1, 1] scaled by `gain`
    pub fn to_f32(&self, gain: f32) -> Vec<f32> {
        self.samples
            .iter()
            .map(|&s| (s as f32 / 32768.0) * gain)
            .collect()
    }
}

/// Linear-interpolation resampling from `from_hz` to `to_hz`
pub fn resample_linear(samples: &[f32], from_hz: u32, to_hz: u32) -> Vec<f32> {
    if from_hz == to_hz || samples.is_empty() || from_hz == 0 || to_hz == 0 {
        return samples.to_vec();
    }

    let ratio = from_hz as f64 / to_hz as f64;
    let out_len = (samples.len() as u64 * to_hz as u64 / from_hz as u64) as usize;
    let last = samples.len() - 1;

    (0..out_len)
        .map(|i| {
            let pos = i as f64 * ratio;
            let idx = pos.floor() as usize;
            let frac = (pos - idx as f64) as f32;
            let a = samples[idx.min(last)];
            let b = samples[(idx + 1).min(last)];
            a + (b - a) * frac
        })
        .collect()
}
