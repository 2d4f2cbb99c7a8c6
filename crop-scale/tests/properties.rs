//! Property tests for crop geometry and scoring.

mod common;

use common::{flat, grey_noise};
use crop_scale::luma::LumaPlane;
use crop_scale::plan::{build_plan, candidate_offsets};
use crop_scale::{CropScorer, Size, SmartCropResizer};
use proptest::prelude::*;

proptest! {
    #[test]
    fn crop_window_stays_inside_source(
        sw in 1u32..4000, sh in 1u32..4000,
        tw in 1u32..3000, th in 1u32..3000,
    ) {
        let src = Size::new(sw, sh);
        if let Ok(plan) = build_plan(src, Size::new(tw, th)) {
            prop_assert!(plan.crop.w >= 1 && plan.crop.h >= 1);
            for offset in candidate_offsets(plan.max_offset(), 25) {
                let window = plan.window_at(offset);
                prop_assert!(window.fits_in(src), "{:?} outside {}", window, src);
                prop_assert_eq!(window.size(), plan.crop);
            }
        }
    }

    #[test]
    fn crop_keeps_one_full_axis(
        sw in 1u32..4000, sh in 1u32..4000,
        tw in 1u32..3000, th in 1u32..3000,
    ) {
        if let Ok(plan) = build_plan(Size::new(sw, sh), Size::new(tw, th)) {
            prop_assert!(plan.crop.w == sw || plan.crop.h == sh);
        }
    }

    #[test]
    fn offsets_are_bounded_and_increasing(max_offset in 0u32..100_000, n in 1usize..40) {
        let offsets = candidate_offsets(max_offset, n);
        prop_assert_eq!(offsets.len(), n.min(max_offset as usize + 1));
        prop_assert_eq!(offsets[0], 0);
        prop_assert_eq!(*offsets.last().unwrap(), max_offset);
        prop_assert!(offsets.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn uniform_regions_score_zero(
        w in 1u32..64, h in 1u32..64,
        r in any::<u8>(), g in any::<u8>(), b in any::<u8>(),
    ) {
        let plane = LumaPlane::from_rgb(&flat(w, h, [r, g, b]));
        prop_assert_eq!(CropScorer::default().score(&plane.full()), 0.0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn output_is_exact_target_size(
        sw in 1u32..160, sh in 1u32..160,
        tw in 1u32..96, th in 1u32..96,
        seed in 1u32..1000,
    ) {
        let src = grey_noise(sw, sh, seed);
        match SmartCropResizer::default().resize_rgb(&src, Size::new(tw, th)) {
            Ok(out) => prop_assert_eq!(out.dimensions(), (tw, th)),
            Err(e) => prop_assert!(
                matches!(e, crop_scale::CropError::EmptyCrop { .. }),
                "unexpected error {e}"
            ),
        }
    }
}
