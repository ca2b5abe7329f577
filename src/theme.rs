//! CSS custom properties for a resolved color scheme.
//!
//! Only variables and page-scoped blocks are emitted, the host stylesheet
//! decides which elements consume them.

use std::{fmt::Display, str::FromStr};

use itertools::Itertools;

use crate::{
    config::ColorMode,
    error::{CoverhueError, Result},
    palette::{ColorScheme, TONE_STOPS},
    utils::pixel::RGB,
};

pub const VAR_PREFIX: &str = "--coverhue";
pub const PAGE_ATTRIBUTE: &str = "data-coverhue-page";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    StoryInfo,
    General,
    Reading,
}

impl PageKind {
    pub const fn name(&self) -> &'static str {
        match self {
            PageKind::StoryInfo => "story",
            PageKind::General => "general",
            PageKind::Reading => "reading",
        }
    }
}

impl Display for PageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PageKind {
    type Err = CoverhueError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "story" => Ok(PageKind::StoryInfo),
            "general" => Ok(PageKind::General),
            "reading" => Ok(PageKind::Reading),
            other => Err(CoverhueError::Config(format!("unknown page kind {other:?}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// Palette stops picked for surfaces in each mode.
struct Surfaces {
    surface: u16,
    surface_variant: u16,
    on_surface: u16,
    reading_background: u16,
}

impl ThemeMode {
    const fn surfaces(&self) -> Surfaces {
        match self {
            ThemeMode::Light => Surfaces {
                surface: 50,
                surface_variant: 100,
                on_surface: 900,
                reading_background: 0,
            },
            ThemeMode::Dark => Surfaces {
                surface: 900,
                surface_variant: 800,
                on_surface: 50,
                reading_background: 1000,
            },
        }
    }
}

fn var(name: impl Display) -> String {
    format!("{VAR_PREFIX}-{name}")
}

fn rgba(color: RGB, alpha: f32) -> String {
    format!("rgba({}, {}, {}, {alpha})", color.r, color.g, color.b)
}

fn block(selector: &str, declarations: &[(String, String)]) -> String {
    let body = declarations
        .iter()
        .map(|(property, value)| format!("  {property}: {value};"))
        .join("\n");
    format!("{selector} {{\n{body}\n}}\n")
}

/// Render `scheme` as stylesheet text for one page.
pub fn render_css(
    scheme: &ColorScheme,
    page: PageKind,
    mode: ThemeMode,
    color_mode: ColorMode,
) -> String {
    let palette = &scheme.palette;
    let surfaces = mode.surfaces();
    let tone = |stop: u16| palette.get(stop).unwrap_or_else(|| palette.primary());

    let mut root: Vec<(String, String)> = TONE_STOPS
        .iter()
        .map(|stop| (var(stop), tone(*stop).to_hex()))
        .collect();
    root.extend([
        (var("primary"), scheme.primary().to_hex()),
        (var("on-primary"), scheme.on_primary().to_hex()),
        (var("surface"), tone(surfaces.surface).to_hex()),
        (var("surface-variant"), tone(surfaces.surface_variant).to_hex()),
        (var("on-surface"), tone(surfaces.on_surface).to_hex()),
        (var("source"), color_mode.name().to_string()),
    ]);

    let page_selector = format!("[{PAGE_ATTRIBUTE}=\"{page}\"]");
    let page_block = match page {
        PageKind::StoryInfo => vec![
            ("background-color".to_string(), format!("var({})", var("surface"))),
            ("color".to_string(), format!("var({})", var("on-surface"))),
        ],
        PageKind::General => vec![
            ("background-color".to_string(), format!("var({})", var("surface"))),
            ("color".to_string(), format!("var({})", var("on-surface"))),
            ("accent-color".to_string(), format!("var({})", var("primary"))),
        ],
        PageKind::Reading => vec![
            (
                var("reading-background"),
                tone(surfaces.reading_background).to_hex(),
            ),
            ("background-color".to_string(), format!("var({})", var("reading-background"))),
            ("color".to_string(), format!("var({})", var("on-surface"))),
        ],
    };

    let mut css = block(":root", &root);
    css.push_str(&block(&page_selector, &page_block));

    if page == PageKind::StoryInfo {
        // stronger tint when the color came from the cover
        let strength = match color_mode {
            ColorMode::Thumbnail => 0.85,
            ColorMode::Default => 0.6,
        };
        let banner = [(
            "background-image".to_string(),
            format!(
                "linear-gradient(180deg, {} 0%, {} 100%)",
                rgba(scheme.primary(), strength),
                rgba(tone(surfaces.surface), 1.0)
            ),
        )];
        css.push_str(&block(&format!("{page_selector} .coverhue-banner"), &banner));
    }

    css
}
