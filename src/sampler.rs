//! Pixel sampling over a bounded working canvas.

use image::{DynamicImage, imageops::FilterType};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    error::{CoverhueError, Result},
    texture::{Texture, TextureRef},
    transform::prelude::*,
    utils::{
        iterator::{GridIterator, Rect},
        num::normalize,
        pixel::RGB,
    },
};

pub const DEFAULT_CANVAS_SIZE: u32 = 150;
pub const MIN_CANVAS_SIZE: u32 = 100;
pub const MAX_CANVAS_SIZE: u32 = 200;
/// Upper bound on focus-weighted draws, one per pixel of the largest canvas.
pub const MAX_SAMPLES: usize = (MAX_CANVAS_SIZE * MAX_CANVAS_SIZE) as usize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSample {
    pub color: RGB,
    pub x: u32,
    pub y: u32,
    pub weight: f32,
    /// Normalised Sobel magnitude at (x, y), `0.0..=1.0`.
    pub edge_weight: Option<f32>,
}

impl PixelSample {
    pub fn new(color: RGB, x: u32, y: u32, weight: f32) -> Self {
        Self {
            color,
            x,
            y,
            weight,
            edge_weight: None,
        }
    }

    /// Base weight, attenuated on flat regions when an edge weight is present.
    #[inline]
    pub fn effective_weight(&self) -> f32 {
        match self.edge_weight {
            Some(edge) => self.weight * (0.5 + 0.5 * edge),
            None => self.weight,
        }
    }
}

/// Focus rectangle in fractions of the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusRegion {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for FocusRegion {
    /// Middle 40% x 40%.
    fn default() -> Self {
        Self {
            x: 0.3,
            y: 0.3,
            width: 0.4,
            height: 0.4,
        }
    }
}

impl FocusRegion {
    /// Pixel rectangle inside a `width` x `height` frame, at least one pixel large.
    pub fn to_rect(&self, width: usize, height: usize) -> Rect {
        let x = ((self.x.clamp(0.0, 1.0) * width as f32) as usize).min(width.saturating_sub(1));
        let y = ((self.y.clamp(0.0, 1.0) * height as f32) as usize).min(height.saturating_sub(1));
        let w = ((self.width.clamp(0.0, 1.0) * width as f32).round() as usize)
            .clamp(1, width - x);
        let h = ((self.height.clamp(0.0, 1.0) * height as f32).round() as usize)
            .clamp(1, height - y);
        Rect::new(x, y, w, h)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusSampling {
    /// Total samples drawn.
    pub samples: usize,
    /// Share of `samples` drawn from the focus region.
    pub focus_fraction: f32,
    pub region: FocusRegion,
    /// Base weight of focus samples, frame samples weigh 1.0.
    pub focus_weight: f32,
    /// Fixed seed for reproducible draws.
    pub seed: Option<u64>,
}

impl Default for FocusSampling {
    fn default() -> Self {
        Self {
            samples: 2000,
            focus_fraction: 0.7,
            region: FocusRegion::default(),
            focus_weight: 1.5,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SamplingStrategy {
    /// Every canvas pixel, weight 1.0.
    #[default]
    Exhaustive,
    /// Random draws biased toward a focus region, edge-weighted.
    FocusWeighted(FocusSampling),
}

#[derive(Debug, Clone, Copy)]
pub struct Sampler {
    canvas_size: u32,
    strategy: SamplingStrategy,
}

impl Default for Sampler {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_SIZE, SamplingStrategy::default())
    }
}

impl Sampler {
    pub fn new(canvas_size: u32, strategy: SamplingStrategy) -> Self {
        Self {
            canvas_size: canvas_size.max(1),
            strategy,
        }
    }

    pub fn canvas_size(&self) -> u32 {
        self.canvas_size
    }

    /// Downscale `image` to fit the working canvas.
    ///
    /// Images already inside the canvas are copied as-is so no new colors get
    /// blended in.
    pub fn canvas(&self, image: &DynamicImage) -> Result<Texture<RGB>> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(CoverhueError::ImageDecode(format!(
                "empty image ({width}x{height})"
            )));
        }

        if width <= self.canvas_size && height <= self.canvas_size {
            return Ok(Texture::from_image(image));
        }

        let resized = image.resize(self.canvas_size, self.canvas_size, FilterType::Triangle);
        Ok(Texture::from_image(&resized))
    }

    pub fn sample(&self, image: &DynamicImage) -> Result<Vec<PixelSample>> {
        Ok(self.sample_texture(&self.canvas(image)?))
    }

    pub fn sample_texture(&self, canvas: &Texture<RGB>) -> Vec<PixelSample> {
        match &self.strategy {
            SamplingStrategy::Exhaustive => exhaustive(canvas),
            SamplingStrategy::FocusWeighted(focus) => focus_weighted(canvas, focus),
        }
    }
}

fn exhaustive(canvas: &Texture<RGB>) -> Vec<PixelSample> {
    let (width, height) = canvas.shape();
    let pixels = canvas.as_ref();
    GridIterator::new(width, height)
        .map(|(x, y, idx)| PixelSample::new(pixels[idx], x as u32, y as u32, 1.0))
        .collect()
}

/// Sobel magnitude of the canvas luminance, normalised by the frame maximum.
pub fn edge_map(canvas: &Texture<RGB>) -> Texture<f32> {
    let shape = canvas.shape();
    let mut edges = LuminanceTransform::auto(shape)
        .pipe(SobelTransform::auto(shape), shape)
        .run(canvas);

    let peak = edges.as_ref().iter().copied().fold(0.0f32, f32::max);
    edges
        .as_mut()
        .iter_mut()
        .for_each(|v| *v = normalize(*v, peak));
    edges
}

fn focus_weighted(canvas: &Texture<RGB>, focus: &FocusSampling) -> Vec<PixelSample> {
    let (width, height) = canvas.shape();
    let total = focus.samples.min(MAX_SAMPLES);
    if width == 0 || height == 0 || total == 0 {
        return Vec::new();
    }

    let edges = edge_map(canvas);
    let region = focus.region.to_rect(width, height);
    let mut rng = match focus.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let focus_count =
        ((total as f32 * focus.focus_fraction.clamp(0.0, 1.0)).round() as usize).min(total);
    let frame = Rect::new(0, 0, width, height);

    let mut draw = |area: Rect, weight: f32| {
        let x = rng.random_range(area.x..area.x + area.width);
        let y = rng.random_range(area.y..area.y + area.height);
        let mut sample = PixelSample::new(*canvas.pixel(x, y), x as u32, y as u32, weight);
        sample.edge_weight = Some(*edges.pixel(x, y));
        sample
    };

    let mut samples = Vec::with_capacity(total);
    samples.extend((0..focus_count).map(|_| draw(region, focus.focus_weight)));
    samples.extend((focus_count..total).map(|_| draw(frame, 1.0)));
    samples
}

#[cfg(test)]
mod tests {
    use super::*;

    fn striped(width: u32, height: u32) -> Texture<RGB> {
        let buffer = (0..width * height)
            .map(|i| {
                if i % width < width / 2 {
                    RGB::new(200, 20, 20)
                } else {
                    RGB::new(20, 20, 200)
                }
            })
            .collect();
        Texture::from_vec(width, height, buffer)
    }

    #[test]
    fn test_exhaustive_visits_every_pixel() {
        let canvas = striped(10, 6);
        let samples = Sampler::default().sample_texture(&canvas);
        assert_eq!(samples.len(), 60);
        assert!(samples.iter().all(|s| s.weight == 1.0 && s.edge_weight.is_none()));
        assert_eq!(samples[13].x, 3);
        assert_eq!(samples[13].y, 1);
    }

    #[test]
    fn test_canvas_downscales_large_images() {
        let image = DynamicImage::new_rgba8(800, 400);
        let canvas = Sampler::new(150, SamplingStrategy::Exhaustive)
            .canvas(&image)
            .unwrap();
        assert_eq!(canvas.shape(), (150, 75));
    }

    #[test]
    fn test_canvas_keeps_small_images() {
        let image = DynamicImage::new_rgba8(10, 10);
        let canvas = Sampler::default().canvas(&image).unwrap();
        assert_eq!(canvas.shape(), (10, 10));
    }

    #[test]
    fn test_empty_image_is_decode_error() {
        let image = DynamicImage::new_rgba8(0, 10);
        assert!(matches!(
            Sampler::default().sample(&image),
            Err(CoverhueError::ImageDecode(_))
        ));
    }

    #[test]
    fn test_focus_region_rect() {
        assert_eq!(FocusRegion::default().to_rect(100, 50), Rect::new(30, 15, 40, 20));
        // degenerate regions still cover a pixel
        let tiny = FocusRegion {
            x: 1.0,
            y: 1.0,
            width: 0.0,
            height: 0.0,
        };
        assert_eq!(tiny.to_rect(10, 10), Rect::new(9, 9, 1, 1));
    }

    #[test]
    fn test_edge_map_is_normalised() {
        let edges = edge_map(&striped(20, 10));
        let peak = edges.as_ref().iter().copied().fold(0.0f32, f32::max);
        assert_eq!(peak, 1.0);
        assert_eq!(*edges.pixel(0, 5), 0.0);
    }

    #[test]
    fn test_focus_draws_are_capped() {
        let sampler = Sampler::new(
            MIN_CANVAS_SIZE,
            SamplingStrategy::FocusWeighted(FocusSampling {
                samples: usize::MAX,
                seed: Some(11),
                ..FocusSampling::default()
            }),
        );
        let samples = sampler.sample_texture(&striped(4, 4));
        assert_eq!(samples.len(), MAX_SAMPLES);
    }

    #[test]
    fn test_effective_weight() {
        let mut sample = PixelSample::new(RGB::WHITE, 0, 0, 2.0);
        assert_eq!(sample.effective_weight(), 2.0);
        sample.edge_weight = Some(0.0);
        assert_eq!(sample.effective_weight(), 1.0);
        sample.edge_weight = Some(1.0);
        assert_eq!(sample.effective_weight(), 2.0);
    }
}
