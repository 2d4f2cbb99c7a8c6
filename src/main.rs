use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use post_resizer::config::{OutputConfig, RenderConfig};
use post_resizer::{HistogramNormalization, PostPreset, ScoreConfig, TargetSpec};

/// Smart-crop one image into social post sizes:
/// - scans each crop window for the most detailed region
/// - resamples it to the exact size with Lanczos3
/// - writes per-size PNGs and a ZIP of all of them
#[derive(Parser, Debug)]
#[command(name = "post-resize")]
#[command(about = "🖼️ Resize one image into post sizes with entropy-guided smart crop")]
#[command(long_about = "Resize one image into social-media post sizes. For every target the crop \
window with the most visual information is chosen before resampling, instead of a blind center crop.
Without --preset or --target, renders Square 1080x1080, Portrait 1080x1350 and Story 1080x1920.")]
struct Args {
    /// Source image (PNG, JPEG, WEBP, ...)
    input: PathBuf,

    /// Directory for the outputs
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Built-in preset to render (repeatable)
    #[arg(short, long = "preset", value_enum)]
    presets: Vec<PostPreset>,

    /// Custom target as Name=WIDTHxHEIGHT (repeatable)
    #[arg(short, long = "target", value_parser = parse_target)]
    targets: Vec<TargetSpec>,

    /// File name of the ZIP archive
    #[arg(long = "zip", default_value = "resized_posts.zip")]
    archive_name: String,

    /// Skip the ZIP archive
    #[arg(long)]
    no_zip: bool,

    /// Skip the per-size PNG files
    #[arg(long)]
    no_images: bool,

    /// Render targets one at a time
    #[arg(long)]
    sequential: bool,

    /// Histogram normalization used to score crop windows
    #[arg(long, value_enum, default_value = "density")]
    scoring: HistogramNormalization,

    /// Window positions scored per target
    #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(u32).range(1..))]
    candidates: u32,

    /// Log crop decisions
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let mut render =
        RenderConfig::new(collect_targets(&args.presets, &args.targets), !args.sequential);
    render.scoring = ScoreConfig::default().with_normalization(args.scoring);
    render.max_candidates = args.candidates as usize;
    let output = OutputConfig {
        output_dir: args.output_dir,
        archive_name: args.archive_name,
        write_images: !args.no_images,
        write_archive: !args.no_zip,
    };

    let summary = post_resizer::export_posts(&args.input, &render, &output)
        .with_context(|| format!("resizing {}", args.input.display()))?;

    for path in &summary.written {
        println!("✅ {}", path.display());
    }
    Ok(())
}

/// Presets first, then custom targets; the three default posts when both are empty.
fn collect_targets(presets: &[PostPreset], custom: &[TargetSpec]) -> Vec<TargetSpec> {
    if presets.is_empty() && custom.is_empty() {
        return post_resizer::default_targets();
    }
    presets
        .iter()
        .map(|p| p.to_target())
        .chain(custom.iter().cloned())
        .collect()
}

fn parse_target(s: &str) -> Result<TargetSpec, String> {
    s.parse::<TargetSpec>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_flags_means_default_targets() {
        let targets = collect_targets(&[], &[]);
        assert_eq!(targets, post_resizer::default_targets());
    }

    #[test]
    fn presets_precede_custom_targets() {
        let banner = TargetSpec::new("Banner", 1500, 500).unwrap();
        let targets = collect_targets(&[PostPreset::Story], std::slice::from_ref(&banner));
        let labels: Vec<String> = targets.iter().map(TargetSpec::label).collect();
        assert_eq!(labels, ["Story_1080x1920", "Banner_1500x500"]);
    }

    #[test]
    fn args_parse() {
        let args = Args::try_parse_from([
            "post-resize",
            "in.png",
            "-p",
            "square",
            "-t",
            "Wide=1600x900",
            "--no-zip",
        ])
        .unwrap();
        assert_eq!(args.presets, vec![PostPreset::Square]);
        assert_eq!(args.targets[0].label(), "Wide_1600x900");
        assert!(args.no_zip);
        assert!(!args.sequential);
        assert_eq!(args.scoring, HistogramNormalization::Density);
        assert_eq!(args.candidates, 25);

        let args = Args::try_parse_from([
            "post-resize",
            "in.png",
            "--scoring",
            "raw-density",
            "--candidates",
            "9",
        ])
        .unwrap();
        assert_eq!(args.scoring, HistogramNormalization::RawDensity);
        assert_eq!(args.candidates, 9);
        assert!(Args::try_parse_from(["post-resize", "in.png", "--candidates", "0"]).is_err());

        assert!(Args::try_parse_from(["post-resize", "in.png", "-t", "Wide=0x900"]).is_err());
    }
}
