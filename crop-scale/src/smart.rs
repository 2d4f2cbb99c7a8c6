// SPDX-License-Identifier: MIT
//! # Smart crop + resize
//!
//! Fits an image to an exact target size without distortion by cropping away
//! the least informative part of the axis that has to shrink:
//!
//! 1. Size the crop window to the target aspect ratio (see [`build_plan`]).
//! 2. If the window already covers the source, resample directly.
//! 3. Otherwise score up to `max_candidates` evenly spaced window positions
//!    on a luminance plane and keep the best one. Ties keep the earliest
//!    (lowest) offset.
//! 4. Crop the RGB working copy at the winning offset and resample it with a
//!    windowed-sinc filter (Lanczos3 by default).
//!
//! Every call is a pure function of `(image, target)`: the source is only
//! read, and no state survives between calls.

use fast_image_resize::{FilterType, Resizer};
use image::{DynamicImage, RgbImage};

use crate::cpu::{crop_and_resample, Staging};
use crate::error::CropError;
use crate::luma::LumaPlane;
use crate::plan::{build_plan, candidate_offsets, Axis, CropPlan, CropWindow};
use crate::presets::Size;
use crate::score::CropScorer;

/// Upper bound on window positions scored per resize.
pub const DEFAULT_MAX_CANDIDATES: usize = 25;

/// One scored window position along the reduction axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoredOffset {
    pub offset: u32,
    pub score: f64,
}

/// Highest-scoring entry; on equal scores the first one encountered wins.
pub fn select_best<I>(scored: I) -> Option<ScoredOffset>
where
    I: IntoIterator<Item = ScoredOffset>,
{
    let mut best: Option<ScoredOffset> = None;
    for candidate in scored {
        match best {
            Some(b) if candidate.score <= b.score => {}
            _ => best = Some(candidate),
        }
    }
    best
}

/// What the resizer decided for one `(source, target)` pair.
#[derive(Clone, Debug)]
pub struct CropOutcome {
    pub plan: CropPlan,
    /// Window that gets resampled.
    pub window: CropWindow,
    /// Every candidate scored, in offset order. Empty on the fast path.
    pub candidates: Vec<ScoredOffset>,
}

impl CropOutcome {
    pub fn is_fast_path(&self) -> bool {
        self.plan.is_fast_path()
    }

    pub fn axis(&self) -> Option<Axis> {
        self.plan.axis
    }

    pub fn best(&self) -> Option<ScoredOffset> {
        select_best(self.candidates.iter().copied())
    }
}

/// Content-aware crop-and-resample to an exact size.
#[derive(Clone, Copy, Debug)]
pub struct SmartCropResizer {
    scorer: CropScorer,
    max_candidates: usize,
    filter: FilterType,
}

impl Default for SmartCropResizer {
    fn default() -> Self {
        Self {
            scorer: CropScorer::default(),
            max_candidates: DEFAULT_MAX_CANDIDATES,
            filter: FilterType::Lanczos3,
        }
    }
}

impl SmartCropResizer {
    pub fn new(scorer: CropScorer) -> Self {
        Self {
            scorer,
            ..Self::default()
        }
    }

    pub fn with_max_candidates(mut self, max_candidates: usize) -> Self {
        self.max_candidates = max_candidates.max(1);
        self
    }

    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    pub fn scorer(&self) -> &CropScorer {
        &self.scorer
    }

    pub fn max_candidates(&self) -> usize {
        self.max_candidates
    }

    /// Resize any decoded image to exactly `target_w` x `target_h`.
    pub fn resize(
        &self,
        image: &DynamicImage,
        target_w: u32,
        target_h: u32,
    ) -> Result<RgbImage, CropError> {
        let rgb = image.to_rgb8();
        self.resize_rgb(&rgb, Size::new(target_w, target_h))
    }

    /// Same as [`resize`](Self::resize) for an RGB image already in hand.
    pub fn resize_rgb(&self, rgb: &RgbImage, target: Size) -> Result<RgbImage, CropError> {
        let outcome = self.plan_rgb(rgb, target)?;
        let mut resizer = Resizer::new();
        let mut staging = Staging::default();
        crop_and_resample(
            &mut resizer,
            rgb,
            outcome.window,
            target,
            self.filter,
            &mut staging,
        )
    }

    /// Decide the crop window without resampling.
    pub fn plan(
        &self,
        image: &DynamicImage,
        target_w: u32,
        target_h: u32,
    ) -> Result<CropOutcome, CropError> {
        self.plan_rgb(&image.to_rgb8(), Size::new(target_w, target_h))
    }

    pub fn plan_rgb(&self, rgb: &RgbImage, target: Size) -> Result<CropOutcome, CropError> {
        let src = Size::new(rgb.width(), rgb.height());
        let plan = build_plan(src, target)?;

        if plan.is_fast_path() {
            log::debug!("smart crop {src} -> {target}: fast path");
            return Ok(CropOutcome {
                plan,
                window: CropWindow::full(src),
                candidates: Vec::new(),
            });
        }

        let luma = LumaPlane::from_rgb(rgb);
        let candidates = self.score_candidates(&luma, &plan);
        let best = select_best(candidates.iter().copied()).unwrap_or(ScoredOffset {
            offset: 0,
            score: 0.0,
        });
        let window = plan.window_at(best.offset);

        log::debug!(
            "smart crop {src} -> {target}: axis {:?}, {} candidates, best offset {} (score {:.4})",
            plan.axis,
            candidates.len(),
            best.offset,
            best.score
        );

        Ok(CropOutcome {
            plan,
            window,
            candidates,
        })
    }

    /// Score each candidate window of `plan` on `luma`, in offset order.
    pub fn score_candidates(&self, luma: &LumaPlane, plan: &CropPlan) -> Vec<ScoredOffset> {
        candidate_offsets(plan.max_offset(), self.max_candidates)
            .into_iter()
            .map(|offset| {
                let region = luma.region(plan.window_at(offset));
                ScoredOffset {
                    offset,
                    score: self.scorer.score(&region),
                }
            })
            .collect()
    }
}

/// [`SmartCropResizer::resize`] with default settings.
pub fn smart_crop_resize(
    image: &DynamicImage,
    target_w: u32,
    target_h: u32,
) -> Result<RgbImage, CropError> {
    SmartCropResizer::default().resize(image, target_w, target_h)
}
