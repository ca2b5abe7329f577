use crate::texture::{Shape, Texture, TextureMutSlice, TextureRef, TextureSlice};
use crate::transform::traits::TextureTransform;

/// Extension trait that chains two transforms into one.
pub trait PipeableTransform: TextureTransform + Sized {
    /// Chain this transform with `next` through an intermediate texture of `shape`.
    ///
    /// # Example
    /// ```ignore
    /// // RGB -> luminance -> edge magnitude
    /// let mut edges = LuminanceTransform::auto(shape).pipe(SobelTransform::auto(shape), shape);
    /// edges.apply(rgb.as_texture_slice(), magnitude.as_texture_mut_slice());
    /// ```
    fn pipe<T>(self, next: T, shape: Shape) -> Pipeline<Self, T>
    where
        T: TextureTransform<Input = Self::Output>,
        Self::Output: Default + Clone,
    {
        Pipeline {
            t1: self,
            t2: next,
            intermediate: Texture::with_shape(shape),
        }
    }
}

// every TextureTransform is pipeable
impl<T: TextureTransform> PipeableTransform for T {}

/// Two transforms run back to back: A -> B -> C.
///
/// The intermediate B texture is owned here and reused across applications.
pub struct Pipeline<T1, T2>
where
    T1: TextureTransform,
    T2: TextureTransform<Input = T1::Output>,
{
    t1: T1,
    t2: T2,
    intermediate: Texture<T1::Output>,
}

impl<T1, T2> TextureTransform for Pipeline<T1, T2>
where
    T1: TextureTransform,
    T2: TextureTransform<Input = T1::Output>,
{
    type Input = T1::Input;
    type Output = T2::Output;

    #[inline(always)]
    fn apply<'i, 'o>(
        &mut self,
        input: TextureSlice<'i, Self::Input>,
        output: TextureMutSlice<'o, Self::Output>,
    ) -> (
        TextureSlice<'i, Self::Input>,
        TextureMutSlice<'o, Self::Output>,
    ) {
        let (input, _) = self
            .t1
            .apply(input, self.intermediate.as_texture_mut_slice());
        let (_, output) = self.t2.apply(self.intermediate.as_texture_slice(), output);
        (input, output)
    }

    fn prepare(&mut self, in_shape: Shape, out_shape: Shape) {
        let mid = self.intermediate.shape();
        self.t1.prepare(in_shape, mid);
        self.t2.prepare(mid, out_shape);
    }
}
