use base64::Engine as _;
use image::{DynamicImage, Rgba, RgbaImage};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::utils::{image::encode_png, pixel::RGB};

/// Frame size used by the iterator and sampling checks, deliberately not square.
pub const TEST_WIDTH: usize = 173;
pub const TEST_HEIGHT: usize = 91;

pub const STRONG_BLUE: RGB = RGB::new(20, 20, 200);
pub const MID_GRAY: RGB = RGB::new(128, 128, 128);

pub fn rgba(color: RGB) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}

pub fn solid_image(color: RGB, width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, rgba(color)))
}

/// 10x10, the first 80 pixels in row-major order strong blue, the last 20 gray.
pub fn blue_and_gray() -> DynamicImage {
    let img = RgbaImage::from_fn(10, 10, |x, y| {
        if y * 10 + x < 80 {
            rgba(STRONG_BLUE)
        } else {
            rgba(MID_GRAY)
        }
    });
    DynamicImage::ImageRgba8(img)
}

/// `inner` inside the given pixel rectangle, `outer` everywhere else.
pub fn framed_image(
    width: u32,
    height: u32,
    rect: (u32, u32, u32, u32),
    inner: RGB,
    outer: RGB,
) -> DynamicImage {
    let (rx, ry, rw, rh) = rect;
    let img = RgbaImage::from_fn(width, height, |x, y| {
        if (rx..rx + rw).contains(&x) && (ry..ry + rh).contains(&y) {
            rgba(inner)
        } else {
            rgba(outer)
        }
    });
    DynamicImage::ImageRgba8(img)
}

/// Random opaque noise, reproducible for a given seed.
pub fn noise_image(width: u32, height: u32, seed: u64) -> DynamicImage {
    let mut rng = StdRng::seed_from_u64(seed);
    let img = RgbaImage::from_fn(width, height, |_, _| {
        Rgba([rng.random::<u8>(), rng.random::<u8>(), rng.random::<u8>(), 255])
    });
    DynamicImage::ImageRgba8(img)
}

pub fn data_uri(image: &DynamicImage) -> String {
    let png = encode_png(image).expect("png encoding");
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png)
    )
}

pub fn in_blue_box(color: &RGB) -> bool {
    color.r <= 100 && color.g <= 100 && color.b >= 120
}
