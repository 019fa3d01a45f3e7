//! Command-line argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use motion_tones::config::Settings;
use motion_tones::params::Roi;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "motion_tones")]
#[command(about = "ROI motion detector and piano tone generator", long_about = None)]
pub struct Args {
    /// TOML config file (defaults to ./motion_tones.toml when present)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the motion detector over a frame directory or a camera
    Detect {
        /// Directory of input frames (read in file-name order); the camera
        /// is used when omitted
        #[arg(long, value_name = "DIR")]
        frames: Option<PathBuf>,

        /// Camera index override
        #[arg(long, value_name = "N", conflicts_with = "frames")]
        source_index: Option<u32>,

        /// Directory receiving annotated frames
        #[arg(long, value_name = "DIR", default_value = "motion_output")]
        output: PathBuf,

        /// Quit after this many frames
        #[arg(long, value_name = "N")]
        max_frames: Option<usize>,

        /// Motion pixel threshold override
        #[arg(long, value_name = "PIXELS")]
        threshold: Option<u32>,

        /// Region of interest override as X,Y,W,H
        #[arg(long, value_name = "X,Y,W,H")]
        roi: Option<Roi>,
    },

    /// Render the twelve-note table to WAV files
    Tones {
        /// Output directory (must already exist)
        #[arg(long, value_name = "DIR")]
        output_dir: Option<String>,

        /// Note length override (seconds)
        #[arg(long, value_name = "SECONDS")]
        duration: Option<f64>,
    },

    /// Play one note through the default audio device
    Play {
        /// Note name, e.g. C, F#, a#
        note: String,

        /// Directory searched for pre-rendered notes
        #[arg(long, value_name = "DIR")]
        sounds_dir: Option<String>,

        /// Master volume (0-100)
        #[arg(long, value_name = "PERCENT")]
        volume: Option<f32>,
    },

    /// Print the note table
    Notes,
}

impl Command {
    /// Apply command-line overrides on top of file/default settings
    pub fn apply_overrides(&self, settings: &mut Settings) {
        match self {
            Command::Detect {
                source_index,
                threshold,
                roi,
                ..
            } => {
                if let Some(index) = source_index {
                    settings.motion.source_index = *index;
                }
                if let Some(threshold) = threshold {
                    settings.motion.motion_pixel_threshold = *threshold;
                }
                if let Some(roi) = roi {
                    settings.motion.roi = *roi;
                }
            }
            Command::Tones {
                output_dir,
                duration,
            } => {
                if let Some(dir) = output_dir {
                    settings.tone_output.output_dir = dir.clone();
                }
                if let Some(duration) = duration {
                    settings.tone.duration_s = *duration;
                }
            }
            Command::Play {
                sounds_dir, volume, ..
            } => {
                if let Some(dir) = sounds_dir {
                    settings.playback.sounds_dir = dir.clone();
                }
                if let Some(volume) = volume {
                    settings.playback.set_master_volume(*volume);
                }
            }
            Command::Notes => {}
        }
    }
}
