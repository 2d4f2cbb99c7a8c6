// SPDX-License-Identifier: MIT
//! Crop geometry: how large the crop window is, which axis it slides along,
//! and which offsets along that axis get scored.

use crate::error::CropError;
use crate::presets::Size;

/// Axis along which the source is reduced to reach the target ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Source is relatively wider; the window slides left/right.
    X,
    /// Source is relatively taller (or equal); the window slides up/down.
    Y,
}

/// Rectangle in source pixel coordinates.
///
/// Always satisfies `x + w <= src.w` and `y + h <= src.h` for the source it
/// was planned against.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropWindow {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl CropWindow {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn full(src: Size) -> Self {
        Self::new(0, 0, src.w, src.h)
    }

    pub fn size(&self) -> Size {
        Size::new(self.w, self.h)
    }

    pub fn fits_in(&self, src: Size) -> bool {
        self.x.checked_add(self.w).is_some_and(|r| r <= src.w)
            && self.y.checked_add(self.h).is_some_and(|b| b <= src.h)
    }
}

/// Result of matching a source size against a target ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CropPlan {
    pub src: Size,
    pub target: Size,
    /// Crop size, `target` ratio up to truncation.
    pub crop: Size,
    /// `None` when the crop covers the whole source (fast path).
    pub axis: Option<Axis>,
}

impl CropPlan {
    /// Largest valid offset along the reduction axis.
    pub fn max_offset(&self) -> u32 {
        match self.axis {
            Some(Axis::X) => self.src.w - self.crop.w,
            Some(Axis::Y) => self.src.h - self.crop.h,
            None => 0,
        }
    }

    pub fn is_fast_path(&self) -> bool {
        self.axis.is_none()
    }

    /// Window positioned at `offset` along the reduction axis.
    pub fn window_at(&self, offset: u32) -> CropWindow {
        let offset = offset.min(self.max_offset());
        match self.axis {
            Some(Axis::X) => CropWindow::new(offset, 0, self.crop.w, self.crop.h),
            Some(Axis::Y) => CropWindow::new(0, offset, self.crop.w, self.crop.h),
            None => CropWindow::full(self.src),
        }
    }
}

/// Size the crop window for `target`'s aspect ratio inside `src`.
///
/// Dimensions are truncated toward zero, then clamped to the source extent.
pub fn build_plan(src: Size, target: Size) -> Result<CropPlan, CropError> {
    if target.is_empty() {
        return Err(CropError::invalid(
            "target",
            format!("target size must be positive, got {target}"),
        ));
    }
    if src.is_empty() {
        return Err(CropError::invalid(
            "source",
            format!("source image must be non-empty, got {src}"),
        ));
    }

    let target_ratio = target.ratio();
    let src_ratio = src.ratio();

    let (crop, reduce) = if src_ratio > target_ratio {
        let w = (f64::from(src.h) * target_ratio) as u32;
        (Size::new(w.min(src.w), src.h), Axis::X)
    } else {
        let h = (f64::from(src.w) / target_ratio) as u32;
        (Size::new(src.w, h.min(src.h)), Axis::Y)
    };

    if crop.is_empty() {
        return Err(CropError::EmptyCrop {
            src_w: src.w,
            src_h: src.h,
            ratio: target_ratio,
        });
    }

    let axis = if crop == src { None } else { Some(reduce) };
    Ok(CropPlan {
        src,
        target,
        crop,
        axis,
    })
}

/// Evenly spaced integer offsets covering `[0, max_offset]`.
///
/// Yields `min(max_candidates, max_offset + 1)` offsets, truncating each
/// sample toward zero and pinning the last one to `max_offset`. The result is
/// strictly increasing, so no offset is scored twice.
pub fn candidate_offsets(max_offset: u32, max_candidates: usize) -> Vec<u32> {
    let n = (max_offset as usize + 1).min(max_candidates.max(1));
    if n == 1 {
        return vec![0];
    }

    let step = f64::from(max_offset) / (n - 1) as f64;
    let mut offsets: Vec<u32> = (0..n).map(|i| (i as f64 * step) as u32).collect();
    offsets[n - 1] = max_offset;
    offsets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_source_reduces_x() {
        let plan = build_plan(Size::new(2000, 1000), Size::new(1080, 1080)).unwrap();
        assert_eq!(plan.axis, Some(Axis::X));
        assert_eq!(plan.crop, Size::new(1000, 1000));
        assert_eq!(plan.max_offset(), 1000);
    }

    #[test]
    fn tall_source_reduces_y() {
        let plan = build_plan(Size::new(1000, 3000), Size::new(1080, 1350)).unwrap();
        assert_eq!(plan.axis, Some(Axis::Y));
        // 1000 / 0.8 = 1250
        assert_eq!(plan.crop, Size::new(1000, 1250));
        assert_eq!(plan.window_at(1750), CropWindow::new(0, 1750, 1000, 1250));
    }

    #[test]
    fn crop_width_is_truncated() {
        // 1001 * (1080 / 1920) = 563.06.. -> 563
        let plan = build_plan(Size::new(1200, 1001), Size::new(1080, 1920)).unwrap();
        assert_eq!(plan.axis, Some(Axis::X));
        assert_eq!(plan.crop, Size::new(563, 1001));
    }

    #[test]
    fn matching_ratio_takes_fast_path() {
        let plan = build_plan(Size::new(540, 540), Size::new(1080, 1080)).unwrap();
        assert!(plan.is_fast_path());
        assert_eq!(plan.max_offset(), 0);
        assert_eq!(plan.window_at(7), CropWindow::full(Size::new(540, 540)));
    }

    #[test]
    fn rejects_degenerate_sizes() {
        assert!(build_plan(Size::new(0, 10), Size::new(10, 10)).is_err());
        assert!(build_plan(Size::new(10, 10), Size::new(10, 0)).is_err());
        assert!(matches!(
            build_plan(Size::new(3, 1), Size::new(1, 1000)),
            Err(CropError::EmptyCrop { .. })
        ));
    }

    #[test]
    fn offsets_span_range_inclusive() {
        let offsets = candidate_offsets(1000, 25);
        assert_eq!(offsets.len(), 25);
        assert_eq!(offsets[0], 0);
        assert_eq!(offsets[1], 41);
        assert_eq!(offsets[2], 83);
        assert_eq!(offsets[24], 1000);
        assert!(offsets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn offsets_shrink_for_small_ranges() {
        assert_eq!(candidate_offsets(0, 25), vec![0]);
        assert_eq!(candidate_offsets(3, 25), vec![0, 1, 2, 3]);
        assert_eq!(candidate_offsets(24, 25), (0..25).collect::<Vec<_>>());
    }
}
