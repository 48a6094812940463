use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use wavfir::simulation::{NoiseConfig, Tone, apply_noise, generate_tones, to_pcm};
use wavfir::{AudioBuffer, write_wav};

#[derive(Parser, Debug)]
#[command(name = "generate_wav")]
#[command(about = "Generate synthetic 16-bit WAV files for low-pass filter testing")]
struct Args {
    /// Output WAV file
    #[arg(short, long, default_value = "synthetic.wav")]
    output: PathBuf,

    /// TOML signal configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tones: comma-separated "freq:amplitude" pairs (e.g., "440:0.4,3000:0.3")
    #[arg(short, long, default_value = "440:0.4,3000:0.3")]
    tones: String,

    /// Signal duration in seconds
    #[arg(short, long, default_value_t = 1.0)]
    duration: f64,

    /// Sample rate in Hz
    #[arg(long, default_value_t = 44100)]
    sample_rate: u32,

    /// Number of channels (each gets the same signal with independent noise)
    #[arg(long, default_value_t = 1)]
    channels: u16,

    /// AWGN SNR in dB (CLI override)
    #[arg(long)]
    snr: Option<f64>,

    /// Base seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlConfig {
    tone: Option<Vec<Tone>>,
    noise: Option<NoiseSection>,
}

#[derive(Debug, Deserialize)]
struct NoiseSection {
    snr_db: f64,
}

fn parse_tones(s: &str) -> Result<Vec<Tone>> {
    s.split(',')
        .map(|part| {
            let (freq, amp) = part
                .trim()
                .split_once(':')
                .context("Invalid tone format. Use 'freq:amplitude'")?;
            let freq: f64 = freq.trim().parse().context("Invalid tone frequency")?;
            let amp: f64 = amp.trim().parse().context("Invalid tone amplitude")?;
            Ok(Tone::new(freq, amp))
        })
        .collect()
}

fn load_toml_config(path: &PathBuf) -> Result<TomlConfig> {
    let content = fs::read_to_string(path).context("Failed to read config file")?;
    toml::from_str(&content).context("Failed to parse config file")
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    anyhow::ensure!(args.channels > 0, "--channels must be at least 1");

    let toml_config = match &args.config {
        Some(path) => load_toml_config(path)?,
        None => TomlConfig::default(),
    };

    let tones = match toml_config.tone {
        Some(tones) => tones,
        None => parse_tones(&args.tones)?,
    };
    let snr_db = args.snr.or(toml_config.noise.map(|n| n.snr_db));

    let clean = generate_tones(&tones, args.duration, args.sample_rate);

    let channels: Vec<Vec<i16>> = (0..args.channels)
        .map(|c| {
            let mut signal = clean.clone();
            if let Some(snr) = snr_db {
                let mut noise = NoiseConfig::new(snr);
                if let Some(seed) = args.seed {
                    noise = noise.with_seed(seed.wrapping_add(c as u64));
                }
                apply_noise(&mut signal, &noise);
            }
            to_pcm(&signal, i16::MAX as f64)
        })
        .collect();

    let frames = clean.len();
    let mut interleaved = Vec::with_capacity(frames * channels.len());
    for frame in 0..frames {
        interleaved.extend(channels.iter().map(|c| c[frame]));
    }

    let buffer = AudioBuffer::new(interleaved, args.channels, args.sample_rate)?;
    write_wav(&args.output, &buffer)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    log::info!(
        "Wrote {} ({} tone(s), {} frames, {} channel(s){})",
        args.output.display(),
        tones.len(),
        frames,
        args.channels,
        snr_db
            .map(|s| format!(", SNR {} dB", s))
            .unwrap_or_default()
    );

    Ok(())
}
