use crate::utils::pixel::RGB;

/// Color used whenever analysis cannot produce one.
pub const DEFAULT_COLOR_HEX: &str = "#063c30";
pub const DEFAULT_COLOR: RGB = RGB::new(0x06, 0x3c, 0x30);

/// Inclusive RGB box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RgbBox {
    pub min: [u8; 3],
    pub max: [u8; 3],
}

impl RgbBox {
    pub const fn new(min: [u8; 3], max: [u8; 3]) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, color: &RGB) -> bool {
        color
            .channels()
            .iter()
            .enumerate()
            .all(|(i, c)| (self.min[i]..=self.max[i]).contains(c))
    }
}

/// A "traditional accent" hue box and the score multiplier it grants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccentRange {
    pub name: &'static str,
    pub bounds: RgbBox,
    pub weight: f32,
}

impl AccentRange {
    pub const fn new(name: &'static str, min: [u8; 3], max: [u8; 3], weight: f32) -> Self {
        Self {
            name,
            bounds: RgbBox::new(min, max),
            weight,
        }
    }

    #[inline]
    pub fn contains(&self, color: &RGB) -> bool {
        self.bounds.contains(color)
    }
}

pub const ACCENT_RANGES: [AccentRange; 7] = [
    AccentRange::new("red", [150, 0, 0], [255, 80, 80], 1.6),
    AccentRange::new("orange", [200, 90, 0], [255, 170, 80], 1.5),
    AccentRange::new("yellow", [200, 180, 0], [255, 255, 100], 1.5),
    AccentRange::new("green", [0, 100, 0], [120, 255, 120], 1.6),
    AccentRange::new("blue", [0, 0, 120], [100, 100, 255], 1.8),
    AccentRange::new("purple", [100, 0, 120], [200, 100, 255], 1.7),
    AccentRange::new("pink", [200, 80, 150], [255, 180, 230], 1.6),
];

/// Light, medium and dark skin approximations.
pub const SKIN_TONE_RANGES: [RgbBox; 3] = [
    RgbBox::new([220, 170, 140], [255, 225, 200]),
    RgbBox::new([180, 120, 80], [230, 180, 150]),
    RgbBox::new([90, 50, 30], [180, 130, 100]),
];

/// Lookup tables injected into the scorer.
///
/// One canonical copy of every hand-tuned table lives here so call sites
/// never carry their own literals.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTables {
    pub accents: Vec<AccentRange>,
    pub skin_tones: Vec<RgbBox>,
}

impl Default for ColorTables {
    fn default() -> Self {
        Self {
            accents: ACCENT_RANGES.to_vec(),
            skin_tones: SKIN_TONE_RANGES.to_vec(),
        }
    }
}

impl ColorTables {
    /// First accent box containing `color`.
    pub fn accent_for(&self, color: &RGB) -> Option<&AccentRange> {
        self.accents.iter().find(|range| range.contains(color))
    }

    /// Score multiplier, 1.0 outside every accent box.
    #[inline]
    pub fn accent_bonus(&self, color: &RGB) -> f32 {
        self.accent_for(color).map_or(1.0, |range| range.weight)
    }

    #[inline]
    pub fn is_skin_tone(&self, color: &RGB) -> bool {
        self.skin_tones.iter().any(|b| b.contains(color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_color_matches_hex() {
        assert_eq!(RGB::from_hex(DEFAULT_COLOR_HEX).unwrap(), DEFAULT_COLOR);
    }

    #[test]
    fn test_blue_accent_weight() {
        let tables = ColorTables::default();
        let blue = tables.accent_for(&RGB::new(24, 24, 200)).unwrap();
        assert_eq!(blue.name, "blue");
        assert_eq!(blue.weight, 1.8);
        assert_eq!(tables.accent_bonus(&RGB::new(128, 128, 128)), 1.0);
    }

    #[test]
    fn test_box_bounds_are_inclusive() {
        let b = RgbBox::new([10, 10, 10], [20, 20, 20]);
        assert!(b.contains(&RGB::new(10, 20, 15)));
        assert!(!b.contains(&RGB::new(9, 20, 15)));
        assert!(!b.contains(&RGB::new(10, 21, 15)));
    }

    #[test]
    fn test_skin_tones() {
        let tables = ColorTables::default();
        assert!(tables.is_skin_tone(&RGB::new(240, 200, 170)));
        assert!(!tables.is_skin_tone(&RGB::new(20, 20, 200)));
    }

    #[test]
    fn test_accent_weights_in_range() {
        for range in ACCENT_RANGES {
            assert!((1.5..=1.8).contains(&range.weight), "{}", range.name);
        }
    }
}
