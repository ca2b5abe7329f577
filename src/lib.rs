//! Accent color extraction from cover art, tonal palettes and theme CSS.
//!
//! The pipeline is Load → Sample → Score → Palette → CSS; [`session::ThemeSession`]
//! ties it to page context and color-changed events.

pub mod analysis;
pub mod color_palette;
pub mod config;
pub mod error;
pub mod loader;
pub mod palette;
pub mod sampler;
pub mod scoring;
pub mod session;
pub mod texture;
pub mod theme;
pub mod transform;
pub mod utils;

#[cfg(test)]
mod tests;

pub use analysis::{Analyzer, analyze_dominant_color};
pub use palette::{generate_palette, is_color_light, is_valid_color};

pub mod prelude {
    pub use crate::{
        analysis::{Analyzer, analyze_dominant_color},
        color_palette::{ColorTables, DEFAULT_COLOR_HEX},
        config::{AnalysisConfig, ColorMode, Preferences},
        error::{CoverhueError, Result},
        loader::{ImageCache, ImageLoader, LoadStrategy},
        palette::{ColorScheme, TonalPalette, generate_palette, is_color_light, is_valid_color},
        sampler::{FocusSampling, PixelSample, Sampler, SamplingStrategy},
        scoring::{Algorithm, DominantColor},
        session::{AppliedTheme, ColorChanged, PageContext, ThemeSession, ThemeState},
        theme::{PageKind, ThemeMode, render_css},
        transform::prelude::*,
        utils::prelude::*,
    };
}
