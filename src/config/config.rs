//! # Configuration Module
//!
//! Configuration structures and validation for rendering post sizes. This is
//! the common interface between the CLI and the library: the target list is
//! always passed in explicitly, never read from a global.
//!
//! ## Configuration Parameters
//!
//! | Parameter | Type | Default | Description |
//! |-----------|------|---------|-------------|
//! | `targets` | `Vec<TargetSpec>` | Square, Portrait, Story | Output shapes, in output order |
//! | `parallel` | `bool` | `true` | Render targets concurrently |
//! | `scoring` | `ScoreConfig` | density, 32 bins, contrast 0.01 | How crop windows are scored |
//! | `max_candidates` | `usize` | `25` | Window positions scored per target |
//! | `output_dir` | `PathBuf` | `.` | Where PNGs and the archive are written |
//! | `archive_name` | `String` | `resized_posts.zip` | File name of the ZIP archive |
//! | `write_images` | `bool` | `true` | Write one PNG per target |
//! | `write_archive` | `bool` | `true` | Write the ZIP archive |
//!
//! ## Examples
//!
//! ```rust
//! use post_resizer::config::RenderConfig;
//! use post_resizer::TargetSpec;
//!
//! let mut config = RenderConfig::default();
//! assert_eq!(config.targets.len(), 3);
//!
//! config.targets.push(TargetSpec::new("Banner", 1500, 500).unwrap());
//! assert!(config.validate().is_ok());
//! ```

use std::collections::HashSet;
use std::path::PathBuf;

use crop_scale::smart::DEFAULT_MAX_CANDIDATES;
use crop_scale::{default_targets, CropScorer, ScoreConfig, SmartCropResizer, TargetSpec};

use crate::error::{ResizeError, ResizeResult};

/// Which shapes to render and how.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Output shapes. Result order follows this list.
    pub targets: Vec<TargetSpec>,

    /// Render targets on the rayon pool instead of one after another.
    ///
    /// Output is identical either way; each target only reads the shared
    /// source image and owns its own result buffer.
    pub parallel: bool,

    /// Scoring used to rank crop windows.
    pub scoring: ScoreConfig,

    /// Upper bound on window positions scored per target.
    pub max_candidates: usize,
}

impl Default for RenderConfig {
    /// Square 1080x1080, Portrait 1080x1350, Story 1080x1920, in parallel.
    fn default() -> Self {
        Self::new(default_targets(), true)
    }
}

impl RenderConfig {
    pub fn new(targets: Vec<TargetSpec>, parallel: bool) -> Self {
        Self {
            targets,
            parallel,
            scoring: ScoreConfig::default(),
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }

    /// The resizer every target of this config is rendered with.
    pub fn resizer(&self) -> SmartCropResizer {
        SmartCropResizer::new(CropScorer::new(self.scoring))
            .with_max_candidates(self.max_candidates)
    }

    /// Validates the target list.
    ///
    /// Rejects an empty list and targets whose labels collide, since labels
    /// key the result set and name the output files.
    pub fn validate(&self) -> ResizeResult<()> {
        if self.targets.is_empty() {
            return Err(ResizeError::config(
                "targets",
                "[]",
                "at least one target is required",
            ));
        }

        if self.max_candidates == 0 {
            return Err(ResizeError::config(
                "max_candidates",
                "0",
                "at least one window position must be scored",
            ));
        }
        if self.scoring.bins == 0 {
            return Err(ResizeError::config("scoring.bins", "0", "need at least one bin"));
        }

        let mut seen = HashSet::with_capacity(self.targets.len());
        for target in &self.targets {
            let file = target.file_name();
            if !seen.insert(file.clone()) {
                return Err(ResizeError::duplicate_label(target.label())
                    .with_context(format!("two targets would both write {file}")));
            }
        }
        Ok(())
    }
}

/// Where and how rendered results are written.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub output_dir: PathBuf,
    pub archive_name: String,
    pub write_images: bool,
    pub write_archive: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            archive_name: "resized_posts.zip".to_string(),
            write_images: true,
            write_archive: true,
        }
    }
}

impl OutputConfig {
    pub fn validate(&self) -> ResizeResult<()> {
        if !self.write_images && !self.write_archive {
            return Err(ResizeError::config(
                "output",
                "images=false, archive=false",
                "nothing to write",
            )
            .with_recovery_suggestion("drop --no-images or --no-zip"));
        }
        if self.write_archive {
            let name = self.archive_name.trim();
            if name.is_empty() || name.contains(['/', '\\']) {
                return Err(ResizeError::config(
                    "archive_name",
                    &self.archive_name,
                    "must be a plain file name",
                ));
            }
            if !name.to_lowercase().ends_with(".zip") {
                return Err(ResizeError::config(
                    "archive_name",
                    &self.archive_name,
                    "must end in .zip",
                ));
            }
        }
        Ok(())
    }

    pub fn archive_path(&self) -> PathBuf {
        self.output_dir.join(self.archive_name.trim())
    }
}
