//! Optional TOML configuration overlaid onto the parameter defaults.
//!
//! ```toml
//! [motion]
//! source_index = 0
//! roi = [200, 120, 300, 220]
//! motion_pixel_threshold = 800
//!
//! [tone]
//! duration_s = 1.5
//! output_dir = "assets/sounds"
//!
//! [playback]
//! master_volume = 80.0
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::params::{MotionParams, PlaybackParams, Roi, ToneOutput, ToneParams};

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "motion_tones.toml";

/// Effective parameters for every subsystem
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub motion: MotionParams,
    pub tone: ToneParams,
    pub tone_output: ToneOutput,
    pub playback: PlaybackParams,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub motion: MotionSection,
    #[serde(default)]
    pub tone: ToneSection,
    #[serde(default)]
    pub playback: PlaybackSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MotionSection {
    pub source_index: Option<u32>,
    pub roi: Option<[u32; 4]>,
    pub motion_pixel_threshold: Option<u32>,
    pub diff_threshold: Option<u8>,
    pub blur_kernel: Option<u32>,
    pub median_kernel: Option<u32>,
    pub overlay_alpha: Option<f32>,
    pub outline_thickness: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToneSection {
    pub sample_rate_hz: Option<u32>,
    pub duration_s: Option<f64>,
    pub harmonic_amplitudes: Option<[f64; 5]>,
    pub attack_s: Option<f64>,
    pub decay_rate: Option<f64>,
    pub output_gain: Option<f64>,
    pub output_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlaybackSection {
    pub master_volume: Option<f32>,
    pub sounds_dir: Option<String>,
}

impl FileConfig {
    /// Overlay every value present in the file onto `settings`
    pub fn apply(self, settings: &mut Settings) {
        let m = self.motion;
        let motion = &mut settings.motion;
        set(&mut motion.source_index, m.source_index);
        if let Some([x, y, w, h]) = m.roi {
            motion.roi = Roi::new(x, y, w, h);
        }
        set(&mut motion.motion_pixel_threshold, m.motion_pixel_threshold);
        set(&mut motion.diff_threshold, m.diff_threshold);
        set(&mut motion.blur_kernel, m.blur_kernel);
        set(&mut motion.median_kernel, m.median_kernel);
        set(&mut motion.overlay_alpha, m.overlay_alpha);
        set(&mut motion.outline_thickness, m.outline_thickness);

        let t = self.tone;
        let tone = &mut settings.tone;
        set(&mut tone.sample_rate_hz, t.sample_rate_hz);
        set(&mut tone.duration_s, t.duration_s);
        set(&mut tone.harmonic_amplitudes, t.harmonic_amplitudes);
        set(&mut tone.attack_s, t.attack_s);
        set(&mut tone.decay_rate, t.decay_rate);
        set(&mut tone.output_gain, t.output_gain);
        set(&mut settings.tone_output.output_dir, t.output_dir);

        let p = self.playback;
        if let Some(volume) = p.master_volume {
            settings.playback.set_master_volume(volume);
        }
        set(&mut settings.playback.sounds_dir, p.sounds_dir);
    }
}

fn set<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

/// Parse a config file
pub fn load_config(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    toml::from_str(&content).map_err(|e| Error::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Explicit path, or `motion_tones.toml` in the working directory if present
pub fn discover_config(explicit: Option<PathBuf>) -> Option<PathBuf> {
    explicit.or_else(|| {
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        local.exists().then_some(local)
    })
}

/// Defaults with the config file (if any) applied
pub fn load_settings(explicit: Option<PathBuf>) -> Result<Settings> {
    let mut settings = Settings::default();
    if let Some(path) = discover_config(explicit) {
        load_config(&path)?.apply(&mut settings);
        log::info!("Loaded config from {}", path.display());
    }
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_overlay() {
        let file: FileConfig = toml::from_str(
            r#"
            [motion]
            source_index = 2
            roi = [0, 0, 100, 50]
            motion_pixel_threshold = 10

            [tone]
            duration_s = 0.5
            output_dir = "out"

            [playback]
            master_volume = 250.0
            "#,
        )
        .unwrap();

        let mut settings = Settings::default();
        file.apply(&mut settings);

        assert_eq!(settings.motion.source_index, 2);
        assert_eq!(settings.motion.roi, Roi::new(0, 0, 100, 50));
        assert_eq!(settings.motion.motion_pixel_threshold, 10);
        assert_eq!(settings.motion.diff_threshold, 25);
        assert_eq!(settings.tone.duration_s, 0.5);
        assert_eq!(settings.tone.sample_rate_hz, 44100);
        assert_eq!(settings.tone_output.output_dir, "out");
        assert_eq!(settings.playback.master_volume, 100.0);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: std::result::Result<FileConfig, _> =
            toml::from_str("[motion]\nroi_size = 3\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.toml");
        std::fs::write(&path, "[tone]\nsample_rate_hz = 22050\n").unwrap();

        let settings = load_settings(Some(path)).unwrap();
        assert_eq!(settings.tone.sample_rate_hz, 22050);
    }
}
