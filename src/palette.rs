//! Tonal palettes derived from a single accent color.
//!
//! Stops below 500 interpolate HSL lightness toward near-white, stops above
//! 500 toward near-black. Hue and saturation are kept, so every channel (and
//! therefore luma) is monotonic across the stop set.

use std::collections::BTreeMap;

use ::palette::{Hsl, IntoColor, Srgb};

use crate::{error::Result, utils::pixel::RGB};

pub const TONE_STOPS: [u16; 12] = [0, 50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 1000];
pub const PRIMARY_STOP: u16 = 500;

/// Lightness reached at stop 0.
const LIGHTEST: f32 = 0.98;
/// Lightness reached at stop 1000.
const DARKEST: f32 = 0.04;
/// Luma above which black text is used.
const LIGHT_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct TonalPalette {
    tones: BTreeMap<u16, RGB>,
}

impl TonalPalette {
    pub fn from_rgb(base: RGB) -> Self {
        let base = RGB::new(base.r, base.g, base.b);
        let hsl: Hsl = Srgb::new(base.r, base.g, base.b)
            .into_format::<f32>()
            .into_color();
        let lightness = hsl.lightness;

        let tones = TONE_STOPS
            .iter()
            .map(|&stop| {
                let tone = match stop {
                    PRIMARY_STOP => base,
                    s if s < PRIMARY_STOP => {
                        let t = (PRIMARY_STOP - s) as f32 / PRIMARY_STOP as f32;
                        let target = LIGHTEST.max(lightness);
                        with_lightness(hsl, lightness + (target - lightness) * t)
                    }
                    s => {
                        let t = (s - PRIMARY_STOP) as f32 / PRIMARY_STOP as f32;
                        let target = DARKEST.min(lightness);
                        with_lightness(hsl, lightness - (lightness - target) * t)
                    }
                };
                (stop, tone)
            })
            .collect();

        Self { tones }
    }

    pub fn get(&self, stop: u16) -> Option<RGB> {
        self.tones.get(&stop).copied()
    }

    /// Stop 500, identical to the base color.
    pub fn primary(&self) -> RGB {
        self.tones[&PRIMARY_STOP]
    }

    pub fn lightest(&self) -> RGB {
        self.tones[&TONE_STOPS[0]]
    }

    pub fn darkest(&self) -> RGB {
        self.tones[&TONE_STOPS[TONE_STOPS.len() - 1]]
    }

    /// Ascending by stop.
    pub fn iter(&self) -> impl Iterator<Item = (u16, RGB)> + '_ {
        self.tones.iter().map(|(stop, color)| (*stop, *color))
    }

}

/// Same hue and saturation, new lightness.
fn with_lightness(hsl: Hsl, lightness: f32) -> RGB {
    let rgb: Srgb = Hsl::new(hsl.hue, hsl.saturation, lightness.clamp(0.0, 1.0)).into_color();
    let rgb = rgb.into_format::<u8>();
    RGB::new(rgb.red, rgb.green, rgb.blue)
}

/// Expand a hex or `rgb()` color into a tonal palette.
pub fn generate_palette(base: &str) -> Result<TonalPalette> {
    Ok(TonalPalette::from_rgb(RGB::parse(base)?))
}

/// Whether black foreground text reads better than white on `color`.
///
/// Malformed colors count as dark.
pub fn is_color_light(color: &str) -> bool {
    RGB::parse(color).is_ok_and(|c| is_rgb_light(&c))
}

#[inline]
pub fn is_rgb_light(color: &RGB) -> bool {
    color.grayscale() > LIGHT_THRESHOLD
}

/// `#rgb`, `#rrggbb`, `rgb(r, g, b)` and `rgba(r, g, b, a)`.
pub fn is_valid_color(color: &str) -> bool {
    RGB::parse(color).is_ok()
}

/// Palette plus the foreground decision derived from its base color.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    pub palette: TonalPalette,
    pub is_light: bool,
}

impl ColorScheme {
    pub fn from_rgb(base: RGB) -> Self {
        Self {
            palette: TonalPalette::from_rgb(base),
            is_light: is_rgb_light(&base),
        }
    }

    pub fn from_color(color: &str) -> Result<Self> {
        Ok(Self::from_rgb(RGB::parse(color)?))
    }

    /// Scheme for `color`, regenerated from `default` when `color` is malformed.
    ///
    /// `None` only when `default` is malformed as well.
    pub fn with_fallback(color: &str, default: &str) -> Option<Self> {
        match Self::from_color(color) {
            Ok(scheme) => Some(scheme),
            Err(err) => {
                log::warn!("{err}, falling back to {default}");
                Self::from_color(default)
                    .inspect_err(|err| log::error!("default color unusable: {err}"))
                    .ok()
            }
        }
    }

    pub fn primary(&self) -> RGB {
        self.palette.primary()
    }

    /// Foreground for text drawn on the primary color.
    pub fn on_primary(&self) -> RGB {
        if self.is_light { RGB::BLACK } else { RGB::WHITE }
    }
}
