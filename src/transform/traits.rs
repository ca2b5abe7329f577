use crate::texture::{Shape, Texture, TextureMutSlice, TextureRef, TextureSlice};

/// A per-frame image operation reading one texture and writing another.
///
/// Input and output element types are associated so pipelines only chain
/// transforms whose ends agree.
pub trait TextureTransform: Sized {
    type Input;
    type Output;

    /// Write the transform of `input` into `output`; both are handed back for chaining.
    fn apply<'i, 'o>(
        &mut self,
        input: TextureSlice<'i, Self::Input>,
        output: TextureMutSlice<'o, Self::Output>,
    ) -> (
        TextureSlice<'i, Self::Input>,
        TextureMutSlice<'o, Self::Output>,
    );

    /// Called with the shapes before the first [TextureTransform::apply].
    fn prepare(&mut self, in_shape: Shape, out_shape: Shape);

    /// Prepare and apply into a freshly allocated texture of the input's shape.
    fn run(mut self, input: &Texture<Self::Input>) -> Texture<Self::Output>
    where
        Self::Output: Default + Clone,
    {
        let mut output = Texture::with_shape(input.shape());
        self.prepare(input.shape(), output.shape());
        self.apply(input.as_texture_slice(), output.as_texture_mut_slice());
        output
    }
}
