use anyhow::Context;
use clap::Parser;
use rolling_stats::Stats;
use serde::Serialize;
use std::path::{Path, PathBuf};

use wavfir::config::{FilterSpec, WavfirConfig};
use wavfir::signal_processing::response::gain_db_at;
use wavfir::{LowpassProcessor, read_wav};

#[derive(Parser, Debug)]
#[command(name = "analyze_wav")]
#[command(about = "Report low-pass filter design and signal statistics for WAV files", long_about = None)]
struct Args {
    /// WAV files to analyze
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output format: text, csv, json
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Cutoff frequency in Hz
    #[arg(long)]
    cutoff: Option<f64>,

    /// Transition width in Hz
    #[arg(long)]
    width: Option<f64>,

    /// Stopband attenuation in dB
    #[arg(long)]
    ripple_db: Option<f64>,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Csv,
    Json,
}

#[derive(Debug, Clone, Serialize)]
struct StatsSummary {
    count: usize,
    mean: f64,
    std_dev: f64,
    min: f64,
    max: f64,
}

impl StatsSummary {
    fn from_stats(stats: &Stats<f64>) -> Option<Self> {
        if stats.count == 0 {
            return None;
        }
        Some(Self {
            count: stats.count,
            mean: stats.mean,
            std_dev: stats.std_dev,
            min: stats.min,
            max: stats.max,
        })
    }

    fn from_samples<I: IntoIterator<Item = f64>>(samples: I) -> Option<Self> {
        let mut stats: Stats<f64> = Stats::new();
        for sample in samples {
            stats.update(sample);
        }
        Self::from_stats(&stats)
    }
}

#[derive(Debug, Clone, Serialize)]
struct FileAnalysis {
    filename: String,
    sample_rate: u32,
    channels: u16,
    frames: usize,
    num_taps: usize,
    beta: f64,
    gain_at_cutoff_db: f64,
    original: Option<StatsSummary>,
    filtered: Option<StatsSummary>,
    energy_ratio_db: Option<f64>,
    out_of_range: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl FileAnalysis {
    fn failed(filename: String, error: String) -> Self {
        Self {
            filename,
            sample_rate: 0,
            channels: 0,
            frames: 0,
            num_taps: 0,
            beta: 0.0,
            gain_at_cutoff_db: 0.0,
            original: None,
            filtered: None,
            energy_ratio_db: None,
            out_of_range: 0,
            error: Some(error),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = match &args.config {
        Some(path) => WavfirConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => WavfirConfig::default(),
    };
    if let Some(cutoff) = args.cutoff {
        config.filter.cutoff_hz = cutoff;
    }
    if let Some(width) = args.width {
        config.filter.width_hz = width;
    }
    if let Some(ripple_db) = args.ripple_db {
        config.filter.ripple_db = ripple_db;
    }

    let results: Vec<FileAnalysis> = args
        .files
        .iter()
        .map(|path| analyze_file(path, &config.filter))
        .collect();

    match args.format {
        OutputFormat::Text => print_text(&results, &config.filter),
        OutputFormat::Csv => print_csv(&results),
        OutputFormat::Json => print_json(&results)?,
    }

    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn analyze_file(path: &Path, spec: &FilterSpec) -> FileAnalysis {
    match analyze_file_impl(path, spec) {
        Ok(analysis) => analysis,
        Err(e) => {
            log::warn!("{}: {}", path.display(), e);
            FileAnalysis::failed(file_name(path), e.to_string())
        }
    }
}

fn analyze_file_impl(path: &Path, spec: &FilterSpec) -> anyhow::Result<FileAnalysis> {
    let input = read_wav(path)?;
    let processor = LowpassProcessor::new(spec, input.sample_rate())?;
    let result = processor.process(&input)?;

    let original = input.samples().iter().map(|&s| s as f64);
    let filtered = result.filtered.samples().iter().copied();

    let original_energy: f64 = input.samples().iter().map(|&s| (s as f64).powi(2)).sum();
    let filtered_energy: f64 = result.filtered.samples().iter().map(|s| s * s).sum();
    let energy_ratio_db = (original_energy > 0.0 && filtered_energy > 0.0)
        .then(|| 10.0 * (filtered_energy / original_energy).log10());

    Ok(FileAnalysis {
        filename: file_name(path),
        sample_rate: input.sample_rate(),
        channels: input.channels(),
        frames: input.frames(),
        num_taps: processor.filter().num_taps(),
        beta: processor.filter().beta(),
        gain_at_cutoff_db: gain_db_at(
            processor.filter().taps(),
            input.sample_rate() as f64,
            spec.cutoff_hz,
        ),
        original: StatsSummary::from_samples(original),
        filtered: StatsSummary::from_samples(filtered),
        energy_ratio_db,
        out_of_range: result.filtered.out_of_range_count(),
        error: None,
    })
}

fn print_text(results: &[FileAnalysis], spec: &FilterSpec) {
    println!(
        "Lowpass: cutoff {} Hz, width {} Hz, ripple {} dB",
        spec.cutoff_hz, spec.width_hz, spec.ripple_db
    );
    println!(
        "{:<40} {:>8} {:>4} {:>10} {:>7} {:>8} {:>10} {:>10}",
        "File", "Rate", "Ch", "Frames", "Taps", "Beta", "Cutoff dB", "Energy dB"
    );
    println!("{}", "-".repeat(104));

    for result in results {
        if let Some(ref e) = result.error {
            println!("{:<40} ERROR: {}", result.filename, e);
            continue;
        }
        let energy = result
            .energy_ratio_db
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<40} {:>8} {:>4} {:>10} {:>7} {:>8.4} {:>10.2} {:>10}",
            result.filename,
            result.sample_rate,
            result.channels,
            result.frames,
            result.num_taps,
            result.beta,
            result.gain_at_cutoff_db,
            energy
        );
    }

    for result in results {
        if result.error.is_some() {
            continue;
        }
        if let (Some(orig), Some(filt)) = (&result.original, &result.filtered) {
            eprintln!();
            eprintln!("Sample statistics for {}:", result.filename);
            eprintln!(
                "  Original: mean {:.1}, std dev {:.1}, range {:.0} .. {:.0}",
                orig.mean, orig.std_dev, orig.min, orig.max
            );
            eprintln!(
                "  Filtered: mean {:.1}, std dev {:.1}, range {:.1} .. {:.1}",
                filt.mean, filt.std_dev, filt.min, filt.max
            );
            if result.out_of_range > 0 {
                eprintln!(
                    "  {} filtered samples exceed the 16-bit range",
                    result.out_of_range
                );
            }
        }
    }
}

fn print_csv(results: &[FileAnalysis]) {
    println!(
        "filename,sample_rate,channels,frames,num_taps,beta,gain_at_cutoff_db,original_std,filtered_std,energy_ratio_db,out_of_range,error"
    );
    for result in results {
        let original_std = result
            .original
            .as_ref()
            .map(|s| format!("{:.4}", s.std_dev))
            .unwrap_or_default();
        let filtered_std = result
            .filtered
            .as_ref()
            .map(|s| format!("{:.4}", s.std_dev))
            .unwrap_or_default();
        let energy = result
            .energy_ratio_db
            .map(|v| format!("{:.4}", v))
            .unwrap_or_default();
        let error = result.error.as_deref().unwrap_or("");

        println!(
            "{},{},{},{},{},{:.6},{:.4},{},{},{},{},{}",
            result.filename,
            result.sample_rate,
            result.channels,
            result.frames,
            result.num_taps,
            result.beta,
            result.gain_at_cutoff_db,
            original_std,
            filtered_std,
            energy,
            result.out_of_range,
            error
        );
    }
}

fn print_json(results: &[FileAnalysis]) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(results)?;
    println!("{}", json);
    Ok(())
}
