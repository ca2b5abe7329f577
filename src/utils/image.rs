use std::io::Cursor;

use image::{DynamicImage, ImageFormat, ImageReader};

use crate::error::{CoverhueError, Result};

/// Decode an in-memory image, sniffing the format from its magic bytes.
///
/// Zero-sized images are rejected so nothing downstream has to check.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    let image = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .decode()?;
    ensure_not_empty(image)
}

/// PNG bytes of `image`, used to build data URIs and fixtures.
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}

fn ensure_not_empty(image: DynamicImage) -> Result<DynamicImage> {
    if image.width() == 0 || image.height() == 0 {
        return Err(CoverhueError::ImageDecode(format!(
            "empty image ({}x{})",
            image.width(),
            image.height()
        )));
    }
    Ok(image)
}
