use std::{cmp::Ordering, collections::HashMap};

use itertools::Itertools;

use crate::{
    color_palette::ColorTables,
    sampler::PixelSample,
    scoring::filter::SampleFilter,
    texture::Texture,
    utils::{num::round_to_multiple, pixel::RGB},
};

/// Channel step used to merge near-duplicate colors into one bucket.
pub const QUANTIZATION_STEP: u8 = 8;

#[inline]
pub fn quantize(color: &RGB) -> RGB {
    RGB::new(
        round_to_multiple(color.r, QUANTIZATION_STEP),
        round_to_multiple(color.g, QUANTIZATION_STEP),
        round_to_multiple(color.b, QUANTIZATION_STEP),
    )
}

/// `0.5..=1.0`, favours saturated buckets without erasing muted ones.
#[inline]
pub fn saturation_factor(color: &RGB) -> f32 {
    0.5 + 0.5 * color.saturation() / 255.0
}

/// Heavier first, then lower packed color so equal weights resolve the same way every run.
#[inline]
fn by_weight_desc(a: &(u32, f32), b: &(u32, f32)) -> Ordering {
    b.1.total_cmp(&a.1).then(a.0.cmp(&b.0))
}

/// Weighted histogram over quantized colors with accent-range bonuses.
///
/// Owned per analysis call; nothing is shared between invocations.
#[derive(Debug, Clone)]
pub struct AccentHistogram<'t> {
    tables: &'t ColorTables,
    filter: SampleFilter,
    buckets: HashMap<u32, f32>,
    total: f32,
}

impl<'t> AccentHistogram<'t> {
    pub fn new(tables: &'t ColorTables, filter: SampleFilter) -> Self {
        Self {
            tables,
            filter,
            buckets: HashMap::new(),
            total: 0.0,
        }
    }

    /// Score one sample, returns whether it passed the filters.
    pub fn add(&mut self, sample: &PixelSample) -> bool {
        if !self.filter.accepts(&sample.color, self.tables) {
            return false;
        }

        let bucket = quantize(&sample.color);
        let weight = sample.effective_weight()
            * self.tables.accent_bonus(&bucket)
            * saturation_factor(&bucket);
        if weight <= 0.0 {
            return true;
        }

        *self.buckets.entry(bucket.to_key()).or_insert(0.0) += weight;
        self.total += weight;
        true
    }

    pub fn extend<'s>(&mut self, samples: impl IntoIterator<Item = &'s PixelSample>) {
        samples.into_iter().for_each(|sample| {
            self.add(sample);
        });
    }

    pub fn bucket_weight(&self, color: &RGB) -> f32 {
        self.buckets
            .get(&quantize(color).to_key())
            .copied()
            .unwrap_or(0.0)
    }

    pub fn total_weight(&self) -> f32 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Buckets with their share of the total weight, heaviest first.
    pub fn ranked(&self) -> Vec<(RGB, f32)> {
        self.buckets
            .iter()
            .map(|(key, weight)| (*key, *weight))
            .sorted_by(by_weight_desc)
            .map(|(key, weight)| (RGB::from_key(key), weight / self.total))
            .collect()
    }

    /// Heaviest bucket and its share of the total weight.
    pub fn winner(&self) -> Option<(RGB, f32)> {
        self.buckets
            .iter()
            .map(|(key, weight)| (*key, *weight))
            .min_by(by_weight_desc)
            .map(|(key, weight)| (RGB::from_key(key), weight / self.total))
    }
}

/// Single most spread-out pixel passing the alpha and brightness checks.
///
/// Confidence is the spread over 255, halved to rank below histogram results.
pub fn max_spread_scan(canvas: &Texture<RGB>, tables: &ColorTables) -> Option<(RGB, f32)> {
    let filter = SampleFilter::BRIGHTNESS_ONLY;
    canvas
        .as_ref()
        .iter()
        .filter(|c| filter.accepts(c, tables) && c.spread() > 0)
        // first pixel wins ties
        .fold(None, |best: Option<RGB>, c| match best {
            Some(b) if b.spread() >= c.spread() => Some(b),
            _ => Some(*c),
        })
        .map(|c| (RGB::new(c.r, c.g, c.b), c.spread() as f32 / 255.0 * 0.5))
}
