// SPDX-License-Identifier: MIT
// CPU crop + resample built on fast_image_resize (SIMD-accelerated).
// RGB8 in -> RGB8 out at exactly the requested size.

use fast_image_resize as fir;
use fir::images::{Image, ImageRef};
use fir::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use image::RgbImage;

use crate::error::CropError;
use crate::plan::CropWindow;
use crate::presets::Size;

const RGB_BYTES: usize = 3;

/// Scratch buffer holding a tightly packed copy of a crop window.
#[derive(Default)]
pub struct Staging {
    pub(crate) buf: Vec<u8>,
}

impl Staging {
    /// Grow the buffer to at least `len` bytes.
    pub fn ensure_len(&mut self, len: usize) {
        if self.buf.len() < len {
            self.buf.resize(len, 0);
        }
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }
}

/// Copy `roi` out of `src` into `staging`, row by row.
///
/// `roi` must lie inside `src`; the staging buffer is truncated to exactly
/// `roi.w * roi.h * 3` bytes.
pub fn compact_crop_to_staging(src: &RgbImage, roi: CropWindow, staging: &mut Staging) {
    let src_pitch = src.width() as usize * RGB_BYTES;
    let row_bytes = roi.w as usize * RGB_BYTES;
    let raw = src.as_raw();

    staging.buf.clear();
    if row_bytes == 0 {
        return;
    }
    staging.ensure_len(row_bytes * roi.h as usize);
    for (r, d) in staging.buf.chunks_exact_mut(row_bytes).enumerate() {
        let row_off = (roi.y as usize + r) * src_pitch + roi.x as usize * RGB_BYTES;
        d.copy_from_slice(&raw[row_off..row_off + row_bytes]);
    }
}

/// Resample a packed RGB buffer of `src` size to exactly `dst` size.
pub fn resample_rgb(
    resizer: &mut Resizer,
    src_rgb: &[u8],
    src: Size,
    dst: Size,
    filter: FilterType,
) -> Result<RgbImage, CropError> {
    let src_view = ImageRef::new(src.w, src.h, src_rgb, PixelType::U8x3)?;
    let mut dst_image = Image::new(dst.w, dst.h, PixelType::U8x3);

    let opts = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(filter));
    resizer.resize(&src_view, &mut dst_image, &opts)?;

    let bytes = dst_image.into_vec();
    let expected = dst.w as usize * dst.h as usize * RGB_BYTES;
    let actual = bytes.len();
    RgbImage::from_raw(dst.w, dst.h, bytes).ok_or(CropError::BufferLength { expected, actual })
}

/// Crop `window` from `src` and resample it to `dst`.
///
/// A window covering the whole source is resampled in place without staging.
pub fn crop_and_resample(
    resizer: &mut Resizer,
    src: &RgbImage,
    window: CropWindow,
    dst: Size,
    filter: FilterType,
    staging: &mut Staging,
) -> Result<RgbImage, CropError> {
    let src_size = Size::new(src.width(), src.height());
    if !window.fits_in(src_size) || window.size().is_empty() {
        return Err(CropError::invalid(
            "window",
            format!("{window:?} is not a non-empty region of {src_size}"),
        ));
    }

    if window == CropWindow::full(src_size) {
        return resample_rgb(resizer, src.as_raw(), src_size, dst, filter);
    }

    compact_crop_to_staging(src, window, staging);
    resample_rgb(resizer, staging.as_slice(), window.size(), dst, filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn gradient(w: u32, h: u32) -> RgbImage {
        RgbImage::from_fn(w, h, |x, y| Rgb([x as u8, y as u8, (x + y) as u8]))
    }

    #[test]
    fn staging_holds_exact_window() {
        let src = gradient(8, 6);
        let mut staging = Staging::default();
        compact_crop_to_staging(&src, CropWindow::new(2, 1, 3, 2), &mut staging);
        assert_eq!(
            staging.as_slice(),
            &[2, 1, 3, 3, 1, 4, 4, 1, 5, 2, 2, 4, 3, 2, 5, 4, 2, 6]
        );
    }

    #[test]
    fn same_size_resample_is_identity() {
        let src = gradient(16, 9);
        let mut resizer = Resizer::new();
        let out = resample_rgb(
            &mut resizer,
            src.as_raw(),
            Size::new(16, 9),
            Size::new(16, 9),
            FilterType::Lanczos3,
        )
        .unwrap();
        assert_eq!(out, src);
    }

    #[test]
    fn output_has_requested_size() {
        let src = gradient(40, 30);
        let mut resizer = Resizer::new();
        let mut staging = Staging::default();
        let out = crop_and_resample(
            &mut resizer,
            &src,
            CropWindow::new(5, 0, 30, 30),
            Size::new(77, 77),
            FilterType::Lanczos3,
            &mut staging,
        )
        .unwrap();
        assert_eq!(out.dimensions(), (77, 77));
    }

    #[test]
    fn rejects_window_outside_source() {
        let src = gradient(10, 10);
        let mut resizer = Resizer::new();
        let mut staging = Staging::default();
        let res = crop_and_resample(
            &mut resizer,
            &src,
            CropWindow::new(5, 0, 6, 10),
            Size::new(4, 4),
            FilterType::Lanczos3,
            &mut staging,
        );
        assert!(matches!(res, Err(CropError::InvalidArgument { .. })));
    }
}
