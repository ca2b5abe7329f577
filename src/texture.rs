use image::DynamicImage;

use crate::utils::pixel::RGB;

/// (width, height)
pub type Shape = (usize, usize);

/// Trait defining ops available on Textures with
/// lendable inner buffer
pub trait TextureRef: AsRef<[Self::Inner]> {
    type Inner;

    fn width(&self) -> u32;
    fn height(&self) -> u32;

    #[inline]
    fn shape(&self) -> Shape {
        (self.width() as usize, self.height() as usize)
    }

    /// Pixel at (x, y), row-major.
    #[inline]
    fn pixel(&self, x: usize, y: usize) -> &Self::Inner {
        &self.as_ref()[y * self.width() as usize + x]
    }
}

/// Trait defining ops available on mutable
/// Textures
pub trait TextureMut: TextureRef + AsMut<[Self::Inner]> {}

/// Texture with owned buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Texture<T> {
    width: u32,
    height: u32,
    buffer: Vec<T>,
}

impl<T> AsRef<[T]> for Texture<T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        &self.buffer
    }
}

impl<T> AsMut<[T]> for Texture<T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        &mut self.buffer
    }
}

impl<T> TextureRef for Texture<T> {
    type Inner = T;

    #[inline]
    fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    fn height(&self) -> u32 {
        self.height
    }
}

impl<T> TextureMut for Texture<T> {}

impl<T> Texture<T> {
    /// # Panics
    /// When the buffer length does not match `width * height`.
    pub fn from_vec(width: u32, height: u32, buffer: Vec<T>) -> Self {
        assert_eq!(
            buffer.len(),
            (width * height) as usize,
            "buffers don't match sizes"
        );
        Self {
            width,
            height,
            buffer,
        }
    }

    pub fn as_texture_slice<'s>(&'s self) -> TextureSlice<'s, T> {
        TextureSlice {
            width: self.width,
            height: self.height,
            buffer: &self.buffer,
        }
    }

    pub fn as_texture_mut_slice<'s>(&'s mut self) -> TextureMutSlice<'s, T> {
        TextureMutSlice {
            width: self.width,
            height: self.height,
            buffer: &mut self.buffer,
        }
    }
}

impl<T: Default + Clone> Texture<T> {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            buffer: vec![T::default(); (width * height) as usize],
        }
    }

    pub fn with_shape(shape: Shape) -> Self {
        Self::new(shape.0 as u32, shape.1 as u32)
    }
}

impl Texture<RGB> {
    /// Copies an already decoded image into an RGBA texture.
    pub fn from_image(image: &DynamicImage) -> Self {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let buffer = rgba.pixels().map(|p| RGB::from_u8_array(&p.0)).collect();
        Texture::from_vec(width, height, buffer)
    }
}

/// Texture with borrowed internal buffer
#[derive(Debug, Copy, Clone)]
pub struct TextureSlice<'a, T> {
    width: u32,
    height: u32,
    buffer: &'a [T],
}

impl<T> AsRef<[T]> for TextureSlice<'_, T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.buffer
    }
}

impl<T> TextureRef for TextureSlice<'_, T> {
    type Inner = T;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

#[derive(Debug)]
pub struct TextureMutSlice<'a, T> {
    width: u32,
    height: u32,
    buffer: &'a mut [T],
}

impl<T> AsRef<[T]> for TextureMutSlice<'_, T> {
    #[inline]
    fn as_ref(&self) -> &[T] {
        self.buffer
    }
}

impl<T> AsMut<[T]> for TextureMutSlice<'_, T> {
    #[inline]
    fn as_mut(&mut self) -> &mut [T] {
        self.buffer
    }
}

impl<T> TextureRef for TextureMutSlice<'_, T> {
    type Inner = T;

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

impl<T> TextureMut for TextureMutSlice<'_, T> {}

pub mod prelude {
    pub use super::{Shape, Texture, TextureMut, TextureMutSlice, TextureRef, TextureSlice};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixel_is_row_major() {
        let texture = Texture::from_vec(3, 2, (0..6).collect::<Vec<u8>>());
        assert_eq!(*texture.pixel(0, 0), 0);
        assert_eq!(*texture.pixel(2, 0), 2);
        assert_eq!(*texture.pixel(1, 1), 4);
        assert_eq!(texture.shape(), (3, 2));
    }

    #[test]
    #[should_panic(expected = "buffers don't match sizes")]
    fn test_from_vec_checks_len() {
        Texture::from_vec(2, 2, vec![0u8; 3]);
    }

    #[test]
    fn test_from_image_keeps_alpha() {
        let mut img = image::RgbaImage::new(2, 1);
        img.put_pixel(1, 0, image::Rgba([10, 20, 30, 40]));
        let texture = Texture::from_image(&DynamicImage::ImageRgba8(img));
        assert_eq!(*texture.pixel(1, 0), RGB::from_u8(10, 20, 30, 40));
        assert_eq!(*texture.pixel(0, 0), RGB::from_u8(0, 0, 0, 0));
    }
}
