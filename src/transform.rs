pub mod grayscale;
pub mod pipe;
pub mod sobel;
pub mod traits;

pub mod prelude {
    pub use super::{
        grayscale::LuminanceTransform,
        pipe::{PipeableTransform, Pipeline},
        sobel::SobelTransform,
        traits::TextureTransform,
    };
    pub use crate::texture::prelude::*;
}
