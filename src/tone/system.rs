//! Batch rendering of the note table to WAV files.

use std::path::{Path, PathBuf};

use super::fft::dominant_frequency_pcm;
use super::notes::{Note, NOTES};
use super::synthesis::render_note;
use super::wav::write_wav;
use crate::error::{Error, Result};
use crate::params::{ToneOutput, ToneParams};

/// Record of one written note file
#[derive(Debug, Clone)]
pub struct RenderedNote {
    pub note: Note,
    pub path: PathBuf,
    pub sample_count: usize,
}

/// Renders notes with fixed synthesis parameters into an output directory
pub struct ToneGenerator {
    params: ToneParams,
    output: ToneOutput,
}

impl ToneGenerator {
    /// Create a generator, rejecting invalid parameters
    pub fn new(params: ToneParams, output: ToneOutput) -> Result<Self> {
        params.validate().map_err(Error::InvalidParams)?;
        Ok(Self { params, output })
    }

    pub fn params(&self) -> &ToneParams {
        &self.params
    }

    pub fn output_dir(&self) -> &Path {
        Path::new(&self.output.output_dir)
    }

    /// Synthesize one note and write it to `{output_dir}/{name}.wav`
    pub fn generate_note(&self, note: &Note) -> Result<RenderedNote> {
        let path = PathBuf::from(self.output.note_path(note.name));
        log::info!("Generating {} ({:.2} Hz)", path.display(), note.frequency_hz);

        let pcm = render_note(note.frequency_hz, &self.params);
        write_wav(&path, &pcm, self.params.sample_rate_hz)?;

        if log::log_enabled!(log::Level::Debug) {
            if let Some(hz) = dominant_frequency_pcm(&pcm, self.params.sample_rate_hz) {
                log::debug!("{}: measured fundamental {:.2} Hz", note.name, hz);
            }
        }

        Ok(RenderedNote {
            note: *note,
            path,
            sample_count: pcm.len(),
        })
    }

    /// Render the whole twelve-note table in order.
    ///
    /// Stops at the first write failure; files already written are kept.
    pub fn generate_all(&self) -> Result<Vec<RenderedNote>> {
        let dir = self.output_dir();
        if !dir.is_dir() {
            return Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("output directory {} does not exist", dir.display()),
            )));
        }

        NOTES.iter().map(|note| self.generate_note(note)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator_in(dir: &Path) -> ToneGenerator {
        let params = ToneParams {
            duration_s: 0.1,
            ..ToneParams::default()
        };
        let output = ToneOutput {
            output_dir: dir.to_string_lossy().into_owned(),
        };
        ToneGenerator::new(params, output).unwrap()
    }

    #[test]
    fn test_generate_single_note() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator_in(dir.path());

        let rendered = generator.generate_note(&NOTES[9]).unwrap();
        assert_eq!(rendered.path, dir.path().join("A.wav"));
        assert_eq!(rendered.sample_count, 4410);
        assert!(rendered.path.exists());
    }

    #[test]
    fn test_missing_output_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let generator = generator_in(&dir.path().join("missing"));
        assert!(generator.generate_all().is_err());
        assert!(!dir.path().join("missing").exists());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = ToneParams {
            duration_s: -1.0,
            ..ToneParams::default()
        };
        let result = ToneGenerator::new(params, ToneOutput::default());
        assert!(matches!(result, Err(Error::InvalidParams(_))));
    }
}
