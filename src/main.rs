use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use wavfir::config::{ClipMode, WavfirConfig};
use wavfir::diagnostics::{self, DiagnosticView, OutputFormat};
use wavfir::{LowpassProcessor, read_wav, write_wav};

#[derive(Parser, Debug)]
#[command(name = "wavfir")]
#[command(about = "Kaiser-windowed FIR low-pass filter for WAV files", long_about = None)]
struct Args {
    /// Input WAV file (16-bit PCM)
    input: PathBuf,

    /// Output WAV file
    #[arg(short = 'o', long, default_value = "filtered.wav")]
    output: PathBuf,

    /// TOML configuration file
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Cutoff frequency in Hz [default: 1000]
    #[arg(long)]
    cutoff: Option<f64>,

    /// Transition width in Hz [default: 50]
    #[arg(long)]
    width: Option<f64>,

    /// Stopband attenuation in dB [default: 60]
    #[arg(long)]
    ripple_db: Option<f64>,

    /// Conversion of out-of-range samples [default: saturate]
    #[arg(long, value_enum)]
    clip: Option<ClipMode>,

    /// Write diagnostic series into this directory
    #[arg(short = 'd', long)]
    diagnostics_dir: Option<PathBuf>,

    /// Diagnostic views to write (comma-separated, default: all)
    #[arg(long, value_enum, value_delimiter = ',')]
    views: Vec<DiagnosticView>,

    /// Diagnostic file format
    #[arg(short = 'f', long, value_enum, default_value = "csv")]
    format: OutputFormat,

    /// Number of amplitude response points [default: 8000]
    #[arg(long)]
    response_points: Option<usize>,

    /// Channel shown in the signal overlay [default: 0]
    #[arg(long)]
    channel: Option<usize>,

    /// Increase output verbosity
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_config(args: &Args) -> anyhow::Result<WavfirConfig> {
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
    if let Some(clip) = args.clip {
        config.output.clip_mode = clip;
    }
    if let Some(points) = args.response_points {
        anyhow::ensure!(points > 0, "--response-points must be at least 1");
        config.output.response_points = points;
    }
    if let Some(channel) = args.channel {
        config.output.overlay_channel = channel;
    }
    Ok(config)
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

    let config = load_config(&args)?;

    let input = read_wav(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    println!("=== wavfir - Kaiser FIR low-pass ===");
    println!(
        "Input: {} ({} Hz, {} channel(s), {} frames)",
        args.input.display(),
        input.sample_rate(),
        input.channels(),
        input.frames()
    );
    println!(
        "Cutoff: {} Hz, width: {} Hz, ripple: {} dB",
        config.filter.cutoff_hz, config.filter.width_hz, config.filter.ripple_db
    );

    let processor = LowpassProcessor::new(&config.filter, input.sample_rate())?;
    println!(
        "Filter: {} taps, beta {:.4}",
        processor.filter().num_taps(),
        processor.filter().beta()
    );

    let result = processor.process(&input)?;

    let pcm = result.filtered_pcm(config.output.clip_mode);
    write_wav(&args.output, &pcm)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    println!("Output: {}", args.output.display());

    if let Some(dir) = &args.diagnostics_dir {
        let views: &[DiagnosticView] = if args.views.is_empty() {
            &DiagnosticView::ALL
        } else {
            &args.views
        };
        let written =
            diagnostics::write_diagnostics(dir, &result, views, &config.output, args.format)
                .context("Failed to write diagnostics")?;
        for path in written {
            println!("Diagnostics: {}", path.display());
        }
    }

    Ok(())
}
