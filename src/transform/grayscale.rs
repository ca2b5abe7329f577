use coverhue_macros::simd_targets;

use crate::{
    texture::{Shape, TextureMutSlice, TextureRef, TextureSlice},
    transform::traits::TextureTransform,
    utils::pixel::RGB,
};

/// RGB -> relative luminance in `0.0..=1.0`, alpha ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LuminanceTransform {
    Seq,
    Par,
}

impl LuminanceTransform {
    /// Parallel rows only pay off on frames larger than the working canvas.
    pub fn auto(shape_hint: Shape) -> Self {
        let (width, height) = shape_hint;
        if width < 450 || width * height < 202_500 {
            return LuminanceTransform::Seq;
        }
        LuminanceTransform::Par
    }
}

impl TextureTransform for LuminanceTransform {
    type Input = RGB;
    type Output = f32;

    fn apply<'i, 'o>(
        &mut self,
        input: TextureSlice<'i, Self::Input>,
        mut output: TextureMutSlice<'o, Self::Output>,
    ) -> (
        TextureSlice<'i, Self::Input>,
        TextureMutSlice<'o, Self::Output>,
    ) {
        match self {
            LuminanceTransform::Seq => scalar_impl(input.as_ref(), output.as_mut()),
            LuminanceTransform::Par => {
                scalar_par_impl(input.as_ref(), output.as_mut(), input.width() as usize)
            }
        }
        (input, output)
    }

    fn prepare(&mut self, in_shape: Shape, out_shape: Shape) {
        debug_assert_eq!(in_shape, out_shape, "luminance keeps the frame shape");
    }
}

const SRGB_LUMA_F32: [f32; 3] = [0.2126, 0.7152, 0.0722];

#[inline(always)]
fn luma(pixel: &RGB) -> f32 {
    (pixel.r as f32 * SRGB_LUMA_F32[0]
        + pixel.g as f32 * SRGB_LUMA_F32[1]
        + pixel.b as f32 * SRGB_LUMA_F32[2])
        / 255.0
}

#[simd_targets]
fn scalar_impl(in_buf: &[RGB], out_buf: &mut [f32]) {
    out_buf
        .iter_mut()
        .zip(in_buf)
        .for_each(|(out, pixel)| *out = luma(pixel));
}

// baseline targets only for the rayon variant
#[simd_targets(baseline)]
fn scalar_par_impl(in_buf: &[RGB], out_buf: &mut [f32], width: usize) {
    use rayon::prelude::*;

    out_buf
        .par_chunks_exact_mut(width.max(1))
        .zip(in_buf.par_chunks_exact(width.max(1)))
        .for_each(|(out_row, in_row)| {
            out_row
                .iter_mut()
                .zip(in_row)
                .for_each(|(out, pixel)| *out = luma(pixel));
        });
}
