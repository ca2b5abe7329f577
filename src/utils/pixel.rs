use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

use crate::error::{CoverhueError, Result};

/// 8-bit sRGB color with straight alpha.
#[derive(PartialEq, Eq, Hash, Debug, Clone, Copy, Default)]
pub struct RGB {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl RGB {
    pub const WHITE: RGB = RGB::new(255, 255, 255);
    pub const BLACK: RGB = RGB::new(0, 0, 0);

    /// Opaque color.
    pub const fn new(r: u8, g: u8, b: u8) -> RGB {
        RGB { r, g, b, a: 255 }
    }

    pub const fn from_u8(r: u8, g: u8, b: u8, a: u8) -> RGB {
        RGB { r, g, b, a }
    }

    #[inline]
    pub const fn from_u8_array(rgba: &[u8; 4]) -> RGB {
        RGB::from_u8(rgba[0], rgba[1], rgba[2], rgba[3])
    }

    /// Parses `#rgb` or `#rrggbb`.
    pub fn from_hex(string: &str) -> Result<RGB> {
        let invalid = || CoverhueError::InvalidColor(string.to_string());

        let digits = string.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            3 => {
                // #abc == #aabbcc
                let expand = |idx: usize| channel(&digits[idx..idx + 1]).map(|v| v * 17);
                Ok(RGB::new(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(RGB::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Parses hex notation or the functional `rgb(r, g, b)` / `rgba(r, g, b, a)` forms.
    pub fn parse(string: &str) -> Result<RGB> {
        let trimmed = string.trim();
        if trimmed.starts_with('#') {
            return RGB::from_hex(trimmed);
        }
        parse_functional(trimmed).ok_or_else(|| CoverhueError::InvalidColor(string.to_string()))
    }

    /// Lowercase `#rrggbb`, alpha is dropped.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Packed `0xRRGGBB`, used as a histogram key.
    #[inline]
    pub const fn to_key(&self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    #[inline]
    pub const fn from_key(key: u32) -> RGB {
        RGB::new((key >> 16) as u8, (key >> 8) as u8, key as u8)
    }

    #[inline]
    pub const fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Plain channel average in `0.0..=255.0`.
    #[inline]
    pub fn brightness(&self) -> f32 {
        (self.r as f32 + self.g as f32 + self.b as f32) / 3.0
    }

    #[inline]
    pub fn max_channel(&self) -> u8 {
        self.r.max(self.g).max(self.b)
    }

    #[inline]
    pub fn min_channel(&self) -> u8 {
        self.r.min(self.g).min(self.b)
    }

    /// `max - min` over the color channels.
    #[inline]
    pub fn spread(&self) -> u8 {
        self.max_channel() - self.min_channel()
    }

    /// HSV saturation scaled to `0.0..=255.0`.
    #[inline]
    pub fn saturation(&self) -> f32 {
        let max = self.max_channel();
        if max == 0 {
            return 0.0;
        }
        self.spread() as f32 / max as f32 * 255.0
    }

    /// Rec.601 luma in `0.0..=1.0`.
    pub fn grayscale(&self) -> f32 {
        (0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32) / 255.0
    }

    pub fn to_lab(&self) -> lab::Lab {
        lab::Lab::from_rgb(&self.channels())
    }
}

fn parse_functional(string: &str) -> Option<RGB> {
    let lower = string.to_ascii_lowercase();
    let (body, expects_alpha) = if let Some(rest) = lower.strip_prefix("rgba(") {
        (rest, true)
    } else if let Some(rest) = lower.strip_prefix("rgb(") {
        (rest, false)
    } else {
        return None;
    };

    let body = body.strip_suffix(')')?;
    let parts: Vec<&str> = body.split(',').map(str::trim).collect();
    let expected = if expects_alpha { 4 } else { 3 };
    if parts.len() != expected {
        return None;
    }

    let channel = |s: &str| s.parse::<u8>().ok();
    let (r, g, b) = (channel(parts[0])?, channel(parts[1])?, channel(parts[2])?);
    let a = if expects_alpha {
        let alpha = parts[3].parse::<f32>().ok()?;
        if !(0.0..=1.0).contains(&alpha) {
            return None;
        }
        (alpha * 255.0).round() as u8
    } else {
        255
    };

    Some(RGB::from_u8(r, g, b, a))
}

impl FromStr for RGB {
    type Err = CoverhueError;

    fn from_str(s: &str) -> Result<Self> {
        RGB::parse(s)
    }
}

impl Display for RGB {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_short_and_long() {
        assert_eq!(RGB::from_hex("#fff").unwrap(), RGB::WHITE);
        assert_eq!(RGB::from_hex("#063c30").unwrap(), RGB::new(6, 60, 48));
        assert_eq!(RGB::from_hex("  #ABCDEF ").unwrap(), RGB::new(0xab, 0xcd, 0xef));
    }

    #[test]
    fn test_from_hex_rejects_malformed() {
        for bad in ["", "fff", "#ggg", "#12", "#1234", "#12345g", "red"] {
            assert!(RGB::from_hex(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_parse_functional() {
        assert_eq!(RGB::parse("rgb(20, 20, 200)").unwrap(), RGB::new(20, 20, 200));
        assert_eq!(
            RGB::parse("rgba(1,2,3,0.5)").unwrap(),
            RGB::from_u8(1, 2, 3, 128)
        );
        assert!(RGB::parse("rgb(256, 0, 0)").is_err());
        assert!(RGB::parse("rgb(1, 2)").is_err());
        assert!(RGB::parse("rgba(1, 2, 3, 2.0)").is_err());
    }

    #[test]
    fn test_to_hex_is_zero_padded() {
        assert_eq!(RGB::new(6, 60, 48).to_hex(), "#063c30");
        assert_eq!(RGB::BLACK.to_string(), "#000000");
    }

    #[test]
    fn test_key_round_trip_drops_alpha() {
        let color = RGB::from_u8(12, 34, 56, 7);
        assert_eq!(RGB::from_key(color.to_key()), RGB::new(12, 34, 56));
    }

    #[test]
    fn test_saturation_and_spread() {
        assert_eq!(RGB::new(128, 128, 128).spread(), 0);
        assert_eq!(RGB::new(128, 128, 128).saturation(), 0.0);
        assert_eq!(RGB::new(255, 0, 0).saturation(), 255.0);
        assert_eq!(RGB::BLACK.saturation(), 0.0);
    }
}
