use itertools::Itertools;

use crate::{scoring::filter::MIN_ALPHA, texture::Texture, utils::pixel::RGB};

/// Every n-th pixel is counted.
pub const FREQUENCY_STRIDE: usize = 3;

/// Most frequent exact color among opaque, sub-sampled pixels.
///
/// Confidence is the winning count over the counted pixels.
pub fn dominant_by_frequency(canvas: &Texture<RGB>) -> Option<(RGB, f32)> {
    let counts = canvas
        .as_ref()
        .iter()
        .step_by(FREQUENCY_STRIDE)
        .filter(|c| c.a >= MIN_ALPHA)
        .map(|c| RGB::new(c.r, c.g, c.b).to_key())
        .counts();

    let counted: usize = counts.values().sum();
    counts
        .into_iter()
        .min_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)))
        .map(|(key, count)| (RGB::from_key(key), count as f32 / counted as f32))
}
