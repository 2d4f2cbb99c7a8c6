// SPDX-License-Identifier: MIT
//! 8-bit luminance planes used for scoring.
//!
//! The plane is derived once per resize and borrowed window by window, so
//! scoring never copies pixel data.

use image::RgbImage;

use crate::plan::CropWindow;
use crate::presets::Size;

/// ITU-R 601-2 luma in 16.16 fixed point with rounding.
#[inline]
pub fn luma_601(r: u8, g: u8, b: u8) -> u8 {
    let l = u32::from(r) * 19595 + u32::from(g) * 38470 + u32::from(b) * 7471 + 0x8000;
    (l >> 16) as u8
}

/// Owned, tightly packed single-channel plane.
#[derive(Clone, Debug)]
pub struct LumaPlane {
    size: Size,
    data: Vec<u8>,
}

impl LumaPlane {
    pub fn from_rgb(rgb: &RgbImage) -> Self {
        let data = rgb
            .as_raw()
            .chunks_exact(3)
            .map(|px| luma_601(px[0], px[1], px[2]))
            .collect();
        Self {
            size: Size::new(rgb.width(), rgb.height()),
            data,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Borrow a window of the plane. Panics if `window` is out of bounds.
    pub fn region(&self, window: CropWindow) -> LumaRegion<'_> {
        assert!(
            window.fits_in(self.size),
            "window {window:?} outside plane {}",
            self.size
        );
        let stride = self.size.w as usize;
        let start = window.y as usize * stride + window.x as usize;
        let end = if window.h == 0 {
            start
        } else {
            start + (window.h as usize - 1) * stride + window.w as usize
        };
        LumaRegion {
            w: window.w as usize,
            h: window.h as usize,
            stride,
            data: &self.data[start..end],
        }
    }

    pub fn full(&self) -> LumaRegion<'_> {
        self.region(CropWindow::full(self.size))
    }
}

/// Borrowed rectangular view with a row stride.
#[derive(Clone, Copy, Debug)]
pub struct LumaRegion<'a> {
    pub w: usize,
    pub h: usize,
    pub stride: usize,
    pub data: &'a [u8],
}

impl<'a> LumaRegion<'a> {
    pub fn len(&self) -> usize {
        self.w * self.h
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a [u8]> + 'a {
        let (w, stride, data) = (self.w, self.stride, self.data);
        (0..self.h).map(move |y| &data[y * stride..y * stride + w])
    }
}
