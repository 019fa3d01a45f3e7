use motion_tones::params::{ToneOutput, ToneParams};
use motion_tones::tone::{read_wav, render_note, ToneGenerator, NOTES};

#[test]
fn test_generates_all_twelve_notes() {
    let dir = tempfile::tempdir().unwrap();
    let params = ToneParams {
        duration_s: 0.25,
        ..ToneParams::default()
    };
    let output = ToneOutput {
        output_dir: dir.path().to_string_lossy().into_owned(),
    };
    let generator = ToneGenerator::new(params.clone(), output).unwrap();

    let rendered = generator.generate_all().unwrap();
    assert_eq!(rendered.len(), 12);

    for (entry, note) in rendered.iter().zip(NOTES.iter()) {
        let path = dir.path().join(format!("{}.wav", note.name));
        assert_eq!(entry.path, path);

        let clip = read_wav(&path).unwrap();
        assert_eq!(clip.spec.channels, 1);
        assert_eq!(clip.spec.bits_per_sample, 16);
        assert_eq!(clip.spec.sample_rate, 44100);
        assert_eq!(clip.samples, render_note(note.frequency_hz, &params));
    }
}

#[test]
fn test_default_output_file_names() {
    let output = ToneOutput::default();
    let names: Vec<String> = NOTES.iter().map(|n| output.note_path(n.name)).collect();
    assert_eq!(names[0], "assets/sounds/C.wav");
    assert_eq!(names[1], "assets/sounds/C#.wav");
    assert_eq!(names[11], "assets/sounds/B.wav");
}

#[test]
fn test_regeneration_is_identical() {
    let dir = tempfile::tempdir().unwrap();
    let params = ToneParams {
        duration_s: 0.1,
        ..ToneParams::default()
    };
    let output = ToneOutput {
        output_dir: dir.path().to_string_lossy().into_owned(),
    };
    let generator = ToneGenerator::new(params, output).unwrap();

    generator.generate_all().unwrap();
    let first = std::fs::read(dir.path().join("G#.wav")).unwrap();
    generator.generate_all().unwrap();
    let second = std::fs::read(dir.path().join("G#.wav")).unwrap();
    assert_eq!(first, second);
}
