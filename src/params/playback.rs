//! Note playback parameters.

/// Playback configuration for auditioning generated notes
#[derive(Debug, Clone)]
pub struct PlaybackParams {
    /// Master volume (percent, clamped to 0-100)
    pub master_volume: f32,

    /// Directory searched for pre-rendered `{Note}.wav` files
    pub sounds_dir: String,
}

impl Default for PlaybackParams {
    fn default() -> Self {
        Self {
            master_volume: 100.0,
            sounds_dir: "assets/sounds".to_string(),
        }
    }
}

impl PlaybackParams {
    /// Set master volume, clamping to the valid percent range
    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = if volume.is_nan() {
            0.0
        } else {
            volume.clamp(0.0, 100.0)
        };
    }

    /// Linear gain factor derived from the master volume
    pub fn gain(&self) -> f32 {
        self.master_volume.clamp(0.0, 100.0) / 100.0
    }
}
