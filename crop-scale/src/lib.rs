// SPDX-License-Identifier: MIT
//! # crop-scale: Entropy-Guided Smart Cropping
//!
//! Fits one image to an exact output size by picking the most informative
//! crop window of the target aspect ratio and resampling it with a
//! windowed-sinc filter.
//!
//! ## Key Components
//!
//! - [`presets`]: target shapes (`TargetSpec`) and the built-in post presets
//! - [`plan`]: crop window sizing and candidate offsets along the reduced axis
//! - [`luma`]: borrowed luminance planes for scoring
//! - [`score`]: `CropScorer`, histogram entropy plus a contrast term
//! - [`cpu`]: RGB crop extraction and SIMD resampling via fast_image_resize
//! - [`smart`]: `SmartCropResizer`, the search tying the pieces together
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use crop_scale::{smart_crop_resize, PostPreset};
//!
//! let img = image::open("photo.jpg").unwrap();
//! let story = PostPreset::Story.size();
//! let out = smart_crop_resize(&img, story.w, story.h).unwrap();
//! assert_eq!(out.dimensions(), (1080, 1920));
//! ```
//!
//! Scoring at most 25 windows per call keeps the cost bounded at 25 passes
//! over the source plus one resample, independent of the crop range.

pub mod cpu;
pub mod error;
pub mod luma;
pub mod plan;
pub mod presets;
pub mod score;
pub mod smart;

pub use error::CropError;
pub use plan::{Axis, CropPlan, CropWindow};
pub use presets::{default_targets, PostPreset, Size, TargetSpec};
pub use score::{CropScorer, HistogramNormalization, ScoreConfig};
pub use smart::{smart_crop_resize, CropOutcome, ScoredOffset, SmartCropResizer};
