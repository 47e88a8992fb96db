//! # Warpcap CLI
//!
//! Renders one or more CAPTCHA images and writes them as PNG files,
//! base64 data URIs, or JSON manifests.
//!
//! ## Usage
//! ```bash
//! # 480x320, six characters, saved to captcha.png
//! warpcap
//!
//! # Reproducible 320x240 image with eight characters
//! warpcap --resolution 1 --length 8 --seed 42 --output challenge.png
//!
//! # Ten JSON manifests, generated in parallel
//! warpcap --count 10 --format json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use warpcap::captcha::RandomSource;
use warpcap::{Captcha, CaptchaGenerator, ChallengeLength, GeneratorConfig, generate_batch};

/// Output encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// PNG file(s) on disk
    Png,
    /// One `data:image/png;base64,...` line per image on stdout
    DataUri,
    /// One JSON manifest per line on stdout
    Json,
}

/// Warpcap - perspective-warped CAPTCHA image generator
#[derive(Parser, Debug)]
#[command(name = "warpcap")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/warpcap.toml")]
    config: PathBuf,

    /// Display resolution: 0=240x160, 1=320x240, 2=400x240, 3=480x320
    #[arg(short, long, allow_negative_numbers = true)]
    resolution: Option<i64>,

    /// Number of characters in the challenge
    #[arg(short = 'n', long, value_parser = parse_length)]
    length: Option<usize>,

    /// Glyph stroke thickness in pixels
    #[arg(long)]
    thickness: Option<u32>,

    /// Font file for the challenge text (defaults to the embedded face)
    #[arg(long, env = "WARPCAP_FONT")]
    font: Option<PathBuf>,

    /// Seed for reproducible output (random if unset)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of images to generate
    #[arg(long, default_value = "1")]
    count: usize,

    /// Output file for PNG format; indexed when count > 1
    #[arg(short, long, default_value = "captcha.png")]
    output: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "png")]
    format: OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,

    /// Enable JSON logging output
    #[arg(long, default_value = "false")]
    json_logs: bool,
}

fn parse_length(s: &str) -> std::result::Result<usize, String> {
    let len: usize = s.parse().map_err(|e| format!("{}", e))?;
    ChallengeLength::new(len)
        .map(|l| l.get())
        .map_err(|e| e.to_string())
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    init_logging(&args.log_level, args.json_logs)?;

    let config = load_config(&args)?;
    let options = config.options().context("Invalid generator options")?;
    let font = config.font().context("Failed to load font")?;
    let generator = CaptchaGenerator::new(options, font);

    let seed = config
        .seed
        .unwrap_or_else(|| RandomSource::from_entropy().seed());
    info!(
        seed,
        resolution = ?options.resolution,
        length = options.length.get(),
        count = args.count,
        "Generating CAPTCHA"
    );

    let captchas = generate_batch(&generator, seed, args.count)
        .context("CAPTCHA generation failed")?;

    write_output(&captchas, &args)?;

    Ok(())
}

/// File/env configuration with CLI flags layered on top
fn load_config(args: &Args) -> Result<GeneratorConfig> {
    let mut config = GeneratorConfig::load(&args.config)
        .with_context(|| format!("Failed to load config from {}", args.config.display()))?;

    if let Some(resolution) = args.resolution {
        config.resolution = resolution;
    }
    if let Some(length) = args.length {
        config.length = length;
    }
    if let Some(thickness) = args.thickness {
        config.thickness = thickness;
    }
    if let Some(ref font) = args.font {
        config.font_path = Some(font.clone());
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }

    Ok(config)
}

fn write_output(captchas: &[Captcha], args: &Args) -> Result<()> {
    match args.format {
        OutputFormat::Png => {
            for (i, captcha) in captchas.iter().enumerate() {
                let path = if captchas.len() > 1 {
                    indexed_path(&args.output, i)
                } else {
                    args.output.clone()
                };
                let png = captcha.to_png()?;
                std::fs::write(&path, png)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!(path = %path.display(), seed = captcha.seed, "Saved CAPTCHA");
            }
        }
        OutputFormat::DataUri => {
            let mut stdout = std::io::stdout().lock();
            for captcha in captchas {
                writeln!(stdout, "{}", captcha.to_data_uri()?)?;
            }
        }
        OutputFormat::Json => {
            let mut stdout = std::io::stdout().lock();
            for captcha in captchas {
                let line = serde_json::to_string(&captcha.manifest()?)?;
                writeln!(stdout, "{}", line)?;
            }
        }
    }
    Ok(())
}

/// `captcha.png` -> `captcha-3.png`
fn indexed_path(path: &Path, index: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "captcha".to_string());
    let name = match path.extension() {
        Some(ext) => format!("{}-{}.{}", stem, index, ext.to_string_lossy()),
        None => format!("{}-{}", stem, index),
    };
    path.with_file_name(name)
}

/// Initialize structured logging with tracing, on stderr so stdout stays clean
fn init_logging(level: &str, json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }

    Ok(())
}
