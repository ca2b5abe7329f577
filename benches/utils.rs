#![allow(unused)]

use coverhue::{texture::Texture, utils::pixel::RGB};
use image::{DynamicImage, Rgba, RgbaImage};
use rand::{Rng, SeedableRng, rngs::StdRng};

pub const BENCH_SEED: u64 = 0x5eed;

/// Smooth hue bands with a noisy band in the middle, closer to cover art than pure noise.
pub fn cover_like_image(size: u32) -> DynamicImage {
    let mut rng = StdRng::seed_from_u64(BENCH_SEED);
    let img = RgbaImage::from_fn(size, size, |x, y| {
        let t = x as f32 / size as f32;
        if (size / 3..2 * size / 3).contains(&y) {
            Rgba([rng.random(), rng.random(), rng.random(), 255])
        } else {
            Rgba([
                (40.0 + 180.0 * t) as u8,
                (30.0 + 60.0 * (1.0 - t)) as u8,
                (200.0 - 120.0 * t) as u8,
                255,
            ])
        }
    });
    DynamicImage::ImageRgba8(img)
}

pub fn canvas(size: u32) -> Texture<RGB> {
    std::hint::black_box(Texture::from_image(&cover_like_image(size)))
}
