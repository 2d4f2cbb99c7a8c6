//! Synthetic image builders shared by the integration tests.
#![allow(dead_code)]

use image::{DynamicImage, Rgb, RgbImage};

/// Deterministic xorshift32 byte stream.
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

/// Grey noise: every pixel has R = G = B, so luma equals the drawn value.
pub fn grey_noise(width: u32, height: u32, seed: u32) -> RgbImage {
    let mut noise = Noise::new(seed);
    RgbImage::from_fn(width, height, |_, _| {
        let v = noise.next_u8();
        Rgb([v, v, v])
    })
}

pub fn flat(width: u32, height: u32, value: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(value))
}

/// Flat colour for `x < split`, grey noise from `split` on.
pub fn flat_then_noise(width: u32, height: u32, split: u32, seed: u32) -> RgbImage {
    let mut noise = Noise::new(seed);
    RgbImage::from_fn(width, height, |x, _| {
        let v = noise.next_u8();
        if x < split { Rgb([128, 128, 128]) } else { Rgb([v, v, v]) }
    })
}

pub fn dynamic(img: RgbImage) -> DynamicImage {
    DynamicImage::ImageRgb8(img)
}
