use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use anyhow::Context;
use anyhow::Result;
use vibrant_colors_wasm::{extract_vibrant_colors_bytes, ColorFormat, ExtractionConfig, Palette};

/// Print the vibrant colors of one or more images.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Maximum number of colors to report
    #[arg(short = 'n', long, default_value_t = 5)]
    max_colors: usize,

    /// Scale applied to the image before sampling (0 < scale <= 1)
    #[arg(short, long, default_value_t = 0.1)]
    scale: f64,

    /// Minimum saturation percentage a color needs
    #[arg(short = 't', long, default_value_t = 60.0)]
    saturation_threshold: f64,

    /// Output format: hex or rgb
    #[arg(short = 'f', long, default_value = "hex")]
    format: ColorFormat,

    /// Drop colors with brightness below 60
    #[arg(short = 'd', long)]
    exclude_dark: bool,

    /// Skip every (n+1)-th tile diagonal; 0 samples every tile
    #[arg(long, default_value_t = 0)]
    skip_tiles: u32,

    /// Sampling grid is grid x grid tiles
    #[arg(short, long, default_value_t = 6)]
    grid: u32,

    /// Print one JSON object per input
    #[arg(long)]
    json: bool,
}

fn run(input: &Path, config: &ExtractionConfig) -> Result<Palette> {
    let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let palette = extract_vibrant_colors_bytes(&bytes, config)?;
    Ok(palette)
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let config = ExtractionConfig {
        max_colors: args.max_colors,
        sample_scale: args.scale,
        saturation_threshold: args.saturation_threshold,
        color_format: args.format,
        exclude_dark_colors: args.exclude_dark,
        skip_tiles: args.skip_tiles,
        grid_size: args.grid,
    };

    let mut failed = false;
    for input in &args.inputs {
        match run(input, &config) {
            Ok(palette) if args.json => {
                let out = serde_json::json!({
                    "input": input.display().to_string(),
                    "colors": palette.colors,
                    "elapsedTimeMs": palette.elapsed_ms,
                    "suggestedSkipTiles": palette.suggested_skip_tiles,
                });
                println!("{out}");
            }
            Ok(palette) => {
                println!(
                    "{} → {} ({:.2}ms)",
                    input.display(),
                    palette.colors.join(" "),
                    palette.elapsed_ms
                );
            }
            Err(e) => {
                failed = true;
                let kind = e
                    .downcast_ref::<vibrant_colors_wasm::ExtractError>()
                    .map(|e| e.kind())
                    .unwrap_or("IoError");
                eprintln!("{}: {kind}: {e:#}", input.display());
            }
        }
    }

    if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS }
}
