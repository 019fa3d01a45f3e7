//! The fixed twelve-note table (fourth octave, C4..B4).

use crate::error::{Error, Result};

/// A pitch class and its frequency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    /// Pitch-class label, also used as the output file stem
    pub name: &'static str,

    /// Fundamental frequency (Hz)
    pub frequency_hz: f64,
}

/// Number of pitch classes per octave
pub const NOTE_COUNT: usize = 12;

/// Key index of A4 within the table
const A4_INDEX: usize = 9;

/// A4 reference pitch (Hz)
const A4_HZ: f64 = 440.0;

/// Equal-tempered fourth-octave table, rounded to 0.01 Hz
pub const NOTES: [Note; NOTE_COUNT] = [
    Note { name: "C", frequency_hz: 261.63 },
    Note { name: "C#", frequency_hz: 277.18 },
    Note { name: "D", frequency_hz: 293.66 },
    Note { name: "D#", frequency_hz: 311.13 },
    Note { name: "E", frequency_hz: 329.63 },
    Note { name: "F", frequency_hz: 349.23 },
    Note { name: "F#", frequency_hz: 369.99 },
    Note { name: "G", frequency_hz: 392.00 },
    Note { name: "G#", frequency_hz: 415.30 },
    Note { name: "A", frequency_hz: 440.00 },
    Note { name: "A#", frequency_hz: 466.16 },
    Note { name: "B", frequency_hz: 493.88 },
];

impl Note {
    /// Look up a note by its key index (0 = C .. 11 = B)
    pub fn by_index(index: usize) -> Option<Note> {
        NOTES.get(index).copied()
    }

    /// Look up a note by label, case-insensitive (`"c#"` == `"C#"`)
    pub fn from_name(name: &str) -> Result<Note> {
        let wanted = name.trim();
        NOTES
            .iter()
            .find(|n| n.name.eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| Error::UnknownNote(name.to_string()))
    }

    /// Key index of this note in the table
    pub fn index(&self) -> usize {
        NOTES
            .iter()
            .position(|n| n.name == self.name)
            .unwrap_or_default()
    }

    /// Whether this is a black key (sharp)
    pub fn is_sharp(&self) -> bool {
        self.name.ends_with('#')
    }

    /// File name used for the rendered note
    pub fn file_name(&self) -> String {
        format!("{}.wav", self.name)
    }
}

/// Label for a key index, `"Unknown"` when out of range
pub fn note_name(index: usize) -> &'static str {
    NOTES.get(index).map_or("Unknown", |n| n.name)
}

/// Exact equal-tempered frequency for a key index relative to A4 = 440 Hz
pub fn equal_tempered_frequency(index: usize) -> f64 {
    let semitones = index as f64 - A4_INDEX as f64;
    A4_HZ * 2f64.powf(semitones / NOTE_COUNT as f64)
}
