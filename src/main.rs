//! motion_tones - ROI motion detector and procedural piano tone generator

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

use cli::{Args, Command};
use motion_tones::audio::{NoteClip, PlaybackSystem};
use motion_tones::config::{load_settings, Settings};
use motion_tones::motion::{
    open_camera, FrameSource, ImageSequenceSource, MotionDetector, MotionSystem, PngSequenceSink,
};
use motion_tones::tone::{Note, ToneGenerator, NOTES};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse();

    let mut settings = load_settings(args.config.clone()).context("Failed to load config")?;
    args.command.apply_overrides(&mut settings);

    match &args.command {
        Command::Detect {
            frames,
            output,
            max_frames,
            ..
        } => run_detect(&settings, frames.as_deref(), output, *max_frames),
        Command::Tones { .. } => run_tones(&settings),
        Command::Play { note, .. } => run_play(&settings, note),
        Command::Notes => {
            for (i, note) in NOTES.iter().enumerate() {
                println!("{:>2}  {:<2}  {:>7.2} Hz", i, note.name, note.frequency_hz);
            }
            Ok(())
        }
    }
}

fn run_detect(
    settings: &Settings,
    frames: Option<&Path>,
    output: &Path,
    max_frames: Option<usize>,
) -> Result<()> {
    println!("Motion ROI: {}", settings.motion.roi);
    println!("Threshold: {} pixels\n", settings.motion.motion_pixel_threshold);

    let source: Box<dyn FrameSource> = match frames {
        Some(dir) => Box::new(ImageSequenceSource::open(dir).context("Camera open failed")?),
        None => open_camera(settings.motion.source_index).context("Camera open failed")?,
    };
    let sink = PngSequenceSink::new(output, max_frames)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let detector = MotionDetector::new(settings.motion.clone())?;

    let mut system = MotionSystem::new(detector, source, sink);
    let summary = system.run().context("Motion detection failed")?;

    println!(
        "Processed {} frames ({} with motion). Output saved to {}",
        summary.frames,
        summary.motion_frames,
        output.display()
    );
    Ok(())
}

fn run_tones(settings: &Settings) -> Result<()> {
    println!("Generating piano tones...");

    let generator = ToneGenerator::new(settings.tone.clone(), settings.tone_output.clone())?;
    let rendered = generator
        .generate_all()
        .with_context(|| format!("Failed to write notes to {}", generator.output_dir().display()))?;

    println!("Generated {} note files.", rendered.len());
    Ok(())
}

fn run_play(settings: &Settings, name: &str) -> Result<()> {
    let note = Note::from_name(name)?;
    let clip = NoteClip::load_or_synthesize(
        note,
        Path::new(&settings.playback.sounds_dir),
        &settings.tone,
    );

    let playback = PlaybackSystem::new(settings.playback.clone())?;
    playback.play(&clip)?;
    Ok(())
}
