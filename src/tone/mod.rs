//! Procedural piano-tone generation.
//!
//! Note table → additive synthesis with envelope → 16-bit quantization →
//! WAV file per note.

mod fft;
mod notes;
mod synthesis;
mod system;
mod wav;

// Re-export public types
pub use fft::{dominant_frequency, dominant_frequency_pcm, hann_window, magnitude_spectrum};
pub use notes::{equal_tempered_frequency, note_name, Note, NOTES, NOTE_COUNT};
pub use synthesis::{envelope, harmonic_sum, quantize, render_note, synthesize};
pub use system::{RenderedNote, ToneGenerator};
pub use wav::{note_spec, read_wav, write_wav, WavClip};
