//! Common test utilities for the post resizer tests.
#![allow(dead_code)]

use image::{DynamicImage, Rgb, RgbImage};

/// Deterministic xorshift32 noise source.
pub struct Noise(u32);

impl Noise {
    pub fn new(seed: u32) -> Self {
        Self(seed.max(1))
    }

    pub fn next_u8(&mut self) -> u8 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        (x >> 24) as u8
    }
}

/// Colour noise, independent per channel.
pub fn color_noise(width: u32, height: u32, seed: u32) -> RgbImage {
    let mut noise = Noise::new(seed);
    RgbImage::from_fn(width, height, |_, _| {
        Rgb([noise.next_u8(), noise.next_u8(), noise.next_u8()])
    })
}

/// Flat grey for `x < split`, grey noise from `split` on.
pub fn flat_then_noise(width: u32, height: u32, split: u32, seed: u32) -> RgbImage {
    let mut noise = Noise::new(seed);
    RgbImage::from_fn(width, height, |x, _| {
        let v = noise.next_u8();
        if x < split { Rgb([60, 60, 60]) } else { Rgb([v, v, v]) }
    })
}

/// 40x20: mid greys over eight bins on the left, a 0/255 checker on the
/// right. Density and probability scoring pick different windows here.
pub fn greys_then_checker() -> RgbImage {
    RgbImage::from_fn(40, 20, |x, y| {
        let v = if x < 20 {
            100 + 8 * ((x + y) % 8) as u8
        } else if (x + y) % 2 == 0 {
            0
        } else {
            255
        };
        Rgb([v, v, v])
    })
}

pub fn dynamic(img: RgbImage) -> DynamicImage {
    DynamicImage::ImageRgb8(img)
}

/// Sizes used across tests; small enough to keep the suite fast.
pub mod sizes {
    pub const SQUARE: (u32, u32) = (108, 108);
    pub const PORTRAIT: (u32, u32) = (108, 135);
    pub const STORY: (u32, u32) = (108, 192);
}
