use coverhue_macros::simd_targets;

use crate::{
    texture::{Shape, TextureMutSlice, TextureRef, TextureSlice},
    transform::traits::TextureTransform,
    utils::iterator::{GridIterator, ParGridIterator},
};

/// 3x3 Sobel gradient magnitude over a luminance texture.
///
/// Borders replicate the nearest in-frame pixel. Output is the raw magnitude,
/// `0.0..=4.0 * sqrt(2)` for luminance inputs in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SobelTransform {
    Seq,
    Par,
}

impl SobelTransform {
    pub fn auto(shape_hint: Shape) -> Self {
        let (width, height) = shape_hint;
        if width * height < 40_000 {
            return SobelTransform::Seq;
        }
        SobelTransform::Par
    }
}

impl TextureTransform for SobelTransform {
    type Input = f32;
    type Output = f32;

    fn apply<'i, 'o>(
        &mut self,
        input: TextureSlice<'i, Self::Input>,
        mut output: TextureMutSlice<'o, Self::Output>,
    ) -> (
        TextureSlice<'i, Self::Input>,
        TextureMutSlice<'o, Self::Output>,
    ) {
        let shape = input.shape();
        match self {
            SobelTransform::Seq => seq_impl(input.as_ref(), output.as_mut(), shape),
            SobelTransform::Par => par_impl(input.as_ref(), output.as_mut(), shape),
        }
        (input, output)
    }

    fn prepare(&mut self, in_shape: Shape, out_shape: Shape) {
        debug_assert_eq!(in_shape, out_shape, "sobel keeps the frame shape");
    }
}

#[inline(always)]
fn magnitude(buf: &[f32], (width, height): Shape, x: usize, y: usize) -> f32 {
    let at = |dx: isize, dy: isize| {
        let sx = (x as isize + dx).clamp(0, width as isize - 1) as usize;
        let sy = (y as isize + dy).clamp(0, height as isize - 1) as usize;
        buf[sy * width + sx]
    };

    let gx = (at(1, -1) + 2.0 * at(1, 0) + at(1, 1)) - (at(-1, -1) + 2.0 * at(-1, 0) + at(-1, 1));
    let gy = (at(-1, 1) + 2.0 * at(0, 1) + at(1, 1)) - (at(-1, -1) + 2.0 * at(0, -1) + at(1, -1));
    (gx * gx + gy * gy).sqrt()
}

#[simd_targets]
fn seq_impl(in_buf: &[f32], out_buf: &mut [f32], shape: Shape) {
    for (x, y, idx) in GridIterator::new(shape.0, shape.1) {
        out_buf[idx] = magnitude(in_buf, shape, x, y);
    }
}

// baseline targets only for the rayon variant
#[simd_targets(baseline)]
fn par_impl(in_buf: &[f32], out_buf: &mut [f32], shape: Shape) {
    use rayon::prelude::*;

    out_buf
        .par_iter_mut()
        .zip(ParGridIterator::new(shape.0, shape.1).par_iter())
        .for_each(|(out, (x, y, _))| *out = magnitude(in_buf, shape, x, y));
}
