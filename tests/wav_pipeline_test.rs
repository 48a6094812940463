mod test_signals;

use std::fs;
use std::path::PathBuf;

use wavfir::config::{OutputConfig, WavfirConfig};
use wavfir::diagnostics::{self, DiagnosticView, OutputFormat};
use wavfir::{AudioBuffer, FilterError, LowpassProcessor, read_wav, write_wav};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("wavfir-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_filter_wav_file_end_to_end() {
    let dir = scratch_dir("pipeline");
    let input_path = dir.join("input.wav");
    let output_path = dir.join("filtered.wav");

    let samples = test_signals::two_tone_pcm(300.0, 3500.0, 9000.0, 8000, 4000);
    write_wav(&input_path, &AudioBuffer::mono(samples, 8000).unwrap()).unwrap();

    let config = WavfirConfig::from_toml_str(
        r#"
[filter]
cutoff_hz = 1000.0
width_hz = 400.0
ripple_db = 60.0
"#,
    )
    .unwrap();

    let input = read_wav(&input_path).unwrap();
    let processor = LowpassProcessor::new(&config.filter, input.sample_rate()).unwrap();
    let result = processor.process(&input).unwrap();
    write_wav(&output_path, &result.filtered_pcm(config.output.clip_mode)).unwrap();

    let output = read_wav(&output_path).unwrap();
    assert_eq!(output.sample_rate(), 8000);
    assert_eq!(output.channels(), 1);
    assert_eq!(output.len(), input.len());

    // Only the 300 Hz tone remains: peak amplitude drops to roughly half
    let peak = output.samples()[500..3500]
        .iter()
        .map(|&s| (s as i32).abs())
        .max()
        .unwrap();
    assert!((8800..=9100).contains(&peak), "peak {}", peak);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_stereo_wav_keeps_layout() {
    let dir = scratch_dir("stereo");
    let path = dir.join("stereo.wav");

    let left = test_signals::sine_pcm(200.0, 4000.0, 16000, 2000);
    let right = test_signals::sine_pcm(6000.0, 4000.0, 16000, 2000);
    let interleaved: Vec<i16> = left.iter().zip(&right).flat_map(|(&l, &r)| [l, r]).collect();
    write_wav(&path, &AudioBuffer::new(interleaved, 2, 16000).unwrap()).unwrap();

    let input = read_wav(&path).unwrap();
    let spec = wavfir::FilterSpec::new(1000.0, 400.0, 60.0);
    let result = wavfir::process_audio(&spec, &input).unwrap();
    let pcm = result.filtered_pcm(Default::default());
    assert_eq!(pcm.channels(), 2);
    assert_eq!(pcm.frames(), 2000);

    let right_rms = test_signals::rms(&result.filtered.channel(1).unwrap()[500..1500]);
    let left_rms = test_signals::rms(&result.filtered.channel(0).unwrap()[500..1500]);
    assert!(right_rms < 1.0, "6 kHz channel rms {}", right_rms);
    assert!(left_rms > 2500.0, "200 Hz channel rms {}", left_rms);

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_non_wav_file_rejected() {
    let dir = scratch_dir("garbage");
    let path = dir.join("not_audio.wav");
    fs::write(&path, b"definitely not a RIFF file").unwrap();

    assert!(matches!(
        read_wav(&path),
        Err(FilterError::UnsupportedFormat(_))
    ));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_diagnostics_written_for_every_view() {
    let dir = scratch_dir("diagnostics");
    let input = AudioBuffer::mono(test_signals::sine_pcm(440.0, 3000.0, 8000, 800), 8000).unwrap();
    let config = WavfirConfig::default();
    let spec = wavfir::FilterSpec::new(1000.0, 400.0, 60.0);
    let result = wavfir::process_audio(&spec, &input).unwrap();

    let written = diagnostics::write_diagnostics(
        &dir,
        &result,
        &DiagnosticView::ALL,
        &OutputConfig {
            response_points: 256,
            ..config.output
        },
        OutputFormat::Json,
    )
    .unwrap();

    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "plot_signal.json",
            "plot_amplitude_response.json",
            "plot_impulse_response.json"
        ]
    );

    let response: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&written[1]).unwrap()).unwrap();
    assert_eq!(response["rows"].as_array().unwrap().len(), 256);

    let impulse: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&written[2]).unwrap()).unwrap();
    assert_eq!(
        impulse["rows"].as_array().unwrap().len(),
        result.taps.len()
    );

    fs::remove_dir_all(&dir).ok();
}
