use crate::{
    color_palette::ColorTables, scoring::filter::SampleFilter, texture::Texture,
    utils::pixel::RGB,
};

/// `saturation x brightness`, both normalised, `0.0..=1.0`.
#[inline]
pub fn vibrancy(color: &RGB) -> f32 {
    (color.saturation() / 255.0) * (color.brightness() / 255.0)
}

/// Most vibrant pixel passing the alpha and brightness checks; first pixel wins ties.
pub fn vibrant_dominant(canvas: &Texture<RGB>, tables: &ColorTables) -> Option<(RGB, f32)> {
    let filter = SampleFilter::BRIGHTNESS_ONLY;
    let mut best: Option<(RGB, f32)> = None;

    for color in canvas.as_ref() {
        if !filter.accepts(color, tables) {
            continue;
        }
        let score = vibrancy(color);
        if score > best.map_or(0.0, |(_, s)| s) {
            best = Some((RGB::new(color.r, color.g, color.b), score));
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picks_most_vibrant() {
        let canvas = Texture::from_vec(
            3,
            1,
            vec![
                RGB::new(120, 100, 100),
                RGB::new(230, 30, 30),
                RGB::new(90, 10, 10),
            ],
        );
        let (color, score) = vibrant_dominant(&canvas, &ColorTables::default()).unwrap();
        assert_eq!(color, RGB::new(230, 30, 30));
        assert!(score > vibrancy(&RGB::new(90, 10, 10)));
    }

    #[test]
    fn test_gray_only_has_no_vibrant_color() {
        let canvas = Texture::from_vec(2, 1, vec![RGB::new(100, 100, 100); 2]);
        assert!(vibrant_dominant(&canvas, &ColorTables::default()).is_none());
    }
}
