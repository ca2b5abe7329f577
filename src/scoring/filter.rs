use crate::{color_palette::ColorTables, utils::pixel::RGB};

pub const MIN_ALPHA: u8 = 128;
pub const MAX_BRIGHTNESS: f32 = 240.0;
pub const MIN_BRIGHTNESS: f32 = 15.0;
pub const MIN_SPREAD: u8 = 30;

/// Why a sample was skipped. Checks run in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    Transparent,
    NearWhite,
    NearBlack,
    NearGray,
    SkinTone,
}

/// Unconditional skips applied before a sample is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleFilter {
    pub reject_gray: bool,
    pub reject_skin: bool,
}

impl SampleFilter {
    /// Transparency, brightness and gray checks.
    pub const STANDARD: SampleFilter = SampleFilter {
        reject_gray: true,
        reject_skin: false,
    };

    /// Transparency and brightness only, used by the max-spread scan.
    pub const BRIGHTNESS_ONLY: SampleFilter = SampleFilter {
        reject_gray: false,
        reject_skin: false,
    };

    /// Standard checks plus the skin tone boxes.
    pub const WITH_SKIN: SampleFilter = SampleFilter {
        reject_gray: true,
        reject_skin: true,
    };

    pub fn rejection(&self, color: &RGB, tables: &ColorTables) -> Option<Rejection> {
        if color.a < MIN_ALPHA {
            return Some(Rejection::Transparent);
        }

        let brightness = color.brightness();
        if brightness > MAX_BRIGHTNESS {
            return Some(Rejection::NearWhite);
        }
        if brightness < MIN_BRIGHTNESS {
            return Some(Rejection::NearBlack);
        }

        if self.reject_gray && color.spread() < MIN_SPREAD {
            return Some(Rejection::NearGray);
        }

        if self.reject_skin && tables.is_skin_tone(color) {
            return Some(Rejection::SkinTone);
        }

        None
    }

    #[inline]
    pub fn accepts(&self, color: &RGB, tables: &ColorTables) -> bool {
        self.rejection(color, tables).is_none()
    }
}

impl Default for SampleFilter {
    fn default() -> Self {
        SampleFilter::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reject(filter: SampleFilter, color: RGB) -> Option<Rejection> {
        filter.rejection(&color, &ColorTables::default())
    }

    #[test]
    fn test_rejections_in_order() {
        let f = SampleFilter::WITH_SKIN;
        // transparent wins over everything else
        assert_eq!(reject(f, RGB::from_u8(255, 255, 255, 0)), Some(Rejection::Transparent));
        assert_eq!(reject(f, RGB::from_u8(20, 20, 200, 127)), Some(Rejection::Transparent));
        assert_eq!(reject(f, RGB::new(250, 245, 250)), Some(Rejection::NearWhite));
        assert_eq!(reject(f, RGB::new(5, 10, 20)), Some(Rejection::NearBlack));
        assert_eq!(reject(f, RGB::new(128, 128, 128)), Some(Rejection::NearGray));
        assert_eq!(reject(f, RGB::new(240, 200, 170)), Some(Rejection::SkinTone));
        assert_eq!(reject(f, RGB::new(20, 20, 200)), None);
    }

    #[test]
    fn test_standard_keeps_skin() {
        assert_eq!(reject(SampleFilter::STANDARD, RGB::new(240, 200, 170)), None);
    }

    #[test]
    fn test_brightness_only_keeps_gray() {
        assert_eq!(reject(SampleFilter::BRIGHTNESS_ONLY, RGB::new(128, 128, 128)), None);
        assert_eq!(
            reject(SampleFilter::BRIGHTNESS_ONLY, RGB::new(255, 255, 255)),
            Some(Rejection::NearWhite)
        );
    }

    #[test]
    fn test_alpha_boundary() {
        assert_eq!(reject(SampleFilter::STANDARD, RGB::from_u8(20, 20, 200, 128)), None);
    }
}
