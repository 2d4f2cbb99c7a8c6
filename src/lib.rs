//! # Post Resizer Library
//!
//! Renders one source image into several social-media post sizes, choosing
//! each crop with an entropy scan instead of a fixed center crop, and writes
//! the results as individual PNGs and/or a single ZIP archive.
//!
//! ## Architecture
//!
//! - `crop_scale` (workspace crate): scoring, crop search and resampling
//! - `config`: render targets and output settings, with validation
//! - `processing`: per-target rendering into a `ResultSet`, output sinks
//! - `archive`: PNG encoding and the ZIP container
//! - `error`: structured errors with context
//!
//! ## Example
//!
//! ```rust,no_run
//! use post_resizer::config::{OutputConfig, RenderConfig};
//! use post_resizer::export_posts;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let summary = export_posts(
//!     "photo.jpg".as_ref(),
//!     &RenderConfig::default(),
//!     &OutputConfig::default(),
//! )?;
//! for path in &summary.written {
//!     println!("{}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use image::DynamicImage;

pub mod archive;
pub mod config;
pub mod error;
pub mod processing;

pub use crop_scale::{
    default_targets, smart_crop_resize, CropScorer, HistogramNormalization, PostPreset,
    ScoreConfig, SmartCropResizer, TargetSpec,
};
pub use error::{ResizeError, ResizeResult};
pub use processing::{render_posts, ResultSet};

use config::{OutputConfig, RenderConfig};
use processing::{ArchiveSink, DirectorySink, SinkSet};

/// What an export run produced.
#[derive(Debug, Clone)]
pub struct ExportSummary {
    /// Labels rendered, in target order.
    pub labels: Vec<String>,
    /// Files written, per-image PNGs first, then the archive.
    pub written: Vec<PathBuf>,
}

/// Decode an image file. Decoding is the codec library's job; failures are
/// reported before any cropping starts.
pub fn load_image(path: &Path) -> ResizeResult<DynamicImage> {
    image::open(path).map_err(|e| ResizeError::decode(path.display().to_string(), e))
}

/// Build the sinks requested by `output`.
pub fn sinks_for(output: &OutputConfig) -> SinkSet {
    let mut sinks = SinkSet::new();
    if output.write_images {
        sinks.push(Box::new(DirectorySink::new(&output.output_dir)));
    }
    if output.write_archive {
        sinks.push(Box::new(ArchiveSink::new(output.archive_path())));
    }
    sinks
}

/// Render `image` for every target and deliver the results.
pub fn export_image(
    image: &DynamicImage,
    render: &RenderConfig,
    output: &OutputConfig,
) -> ResizeResult<ExportSummary> {
    output.validate()?;
    let results = render_posts(image, render)?;
    let labels = results.labels().map(str::to_string).collect();
    let written = sinks_for(output).deliver(&results)?;
    Ok(ExportSummary { labels, written })
}

/// Load `input`, render every target and deliver the results.
pub fn export_posts(
    input: &Path,
    render: &RenderConfig,
    output: &OutputConfig,
) -> ResizeResult<ExportSummary> {
    // Validate before decoding so bad flags fail fast on large inputs.
    render.validate()?;
    output.validate()?;
    let image = load_image(input)?;
    log::info!(
        "loaded {} ({}x{}, {:?})",
        input.display(),
        image.width(),
        image.height(),
        image.color()
    );
    export_image(&image, render, output)
}
