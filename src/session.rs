//! Per-page theme resolution and the color-changed event flow.
//!
//! All state lives in [`ThemeSession`]; nothing is global.

use crate::{
    analysis::Analyzer,
    config::{AnalysisConfig, ColorMode, Preferences},
    error::{CoverhueError, Result},
    loader::ImageLoader,
    palette::{ColorScheme, is_valid_color},
    scoring::DominantColor,
    theme::{PageKind, ThemeMode, render_css},
};

/// Broadcast whenever the theme color changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorChanged {
    pub color: String,
    /// Live preview, e.g. while a color picker is dragged.
    pub is_preview: bool,
}

impl ColorChanged {
    pub fn preview(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            is_preview: true,
        }
    }

    pub fn commit(color: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            is_preview: false,
        }
    }
}

/// What the host page told us about itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContext {
    pub kind: PageKind,
    pub mode: ThemeMode,
    /// Resolved cover art URL, if the page has one.
    pub cover: Option<String>,
}

impl Default for PageContext {
    fn default() -> Self {
        Self {
            kind: PageKind::General,
            mode: ThemeMode::Light,
            cover: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeState {
    /// Whether the last committed theme came from cover analysis.
    pub thumbnail_applied: bool,
    pub last_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppliedTheme {
    pub scheme: ColorScheme,
    pub css: String,
    /// Set when the color came out of cover analysis.
    pub analysis: Option<DominantColor>,
}

impl AppliedTheme {
    pub fn color(&self) -> String {
        self.scheme.primary().to_hex()
    }
}

pub type Subscriber = Box<dyn FnMut(&ColorChanged) + Send>;

pub struct ThemeSession {
    preferences: Preferences,
    loader: ImageLoader,
    analyzer: Analyzer,
    state: ThemeState,
    last_page: Option<PageContext>,
    subscribers: Vec<Subscriber>,
}

impl ThemeSession {
    pub fn new(config: AnalysisConfig) -> Self {
        let loader = ImageLoader::from_config(&config);
        Self::with_loader(config, loader)
    }

    pub fn with_loader(config: AnalysisConfig, loader: ImageLoader) -> Self {
        Self {
            preferences: config.preferences.clone(),
            loader,
            analyzer: Analyzer::new(config),
            state: ThemeState::default(),
            last_page: None,
            subscribers: Vec::new(),
        }
    }

    pub fn state(&self) -> &ThemeState {
        &self.state
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    pub fn loader(&self) -> &ImageLoader {
        &self.loader
    }

    pub fn subscribe(&mut self, subscriber: Subscriber) {
        self.subscribers.push(subscriber);
    }

    pub fn broadcast(&mut self, event: &ColorChanged) {
        self.subscribers
            .iter_mut()
            .for_each(|subscriber| subscriber(event));
    }

    /// Theme for `page`, or `None` when theming is off for it or the default
    /// color itself is unusable.
    pub fn resolve(&mut self, page: &PageContext) -> Option<AppliedTheme> {
        self.last_page = Some(page.clone());

        if page.kind == PageKind::Reading && self.preferences.disable_on_reading_page {
            log::debug!("theming disabled on reading pages");
            return None;
        }

        let default = self.preferences.default_color.clone();
        if !is_valid_color(&default) {
            log::error!("default color {default:?} is invalid, skipping theme");
            return None;
        }

        let analysis = match self.preferences.color_mode {
            ColorMode::Default => None,
            ColorMode::Thumbnail => self
                .analyze_cover(page.cover.as_deref())
                .inspect_err(|err| log::warn!("cover analysis failed ({err}), using {default}"))
                .ok(),
        };

        let color = analysis.map_or(default.clone(), |result| result.hex());
        let scheme = ColorScheme::with_fallback(&color, &default)?;
        let css = render_css(&scheme, page.kind, page.mode, self.preferences.color_mode);

        self.state = ThemeState {
            thumbnail_applied: analysis.is_some(),
            last_color: Some(scheme.primary().to_hex()),
        };
        self.broadcast(&ColorChanged::commit(scheme.primary().to_hex()));

        Some(AppliedTheme {
            scheme,
            css,
            analysis,
        })
    }

    fn analyze_cover(&self, cover: Option<&str>) -> Result<DominantColor> {
        let source = cover.ok_or(CoverhueError::MissingSource)?;
        let image = self.loader.load(source)?;
        self.analyzer.analyze(&image)
    }

    /// React to a color change coming from the settings UI.
    ///
    /// Previews render straight from the event color and leave state alone;
    /// commits store the color as the new default and resolve the last page again.
    ///
    /// In thumbnail mode the committed color only replaces the fallback: the
    /// last page is analyzed again and its cover color wins whenever analysis
    /// succeeds.
    pub fn handle(&mut self, event: &ColorChanged) -> Option<AppliedTheme> {
        let page = self.last_page.clone().unwrap_or_default();

        if event.is_preview {
            let scheme = ColorScheme::with_fallback(&event.color, &self.preferences.default_color)?;
            let css = render_css(&scheme, page.kind, page.mode, self.preferences.color_mode);
            self.broadcast(event);
            return Some(AppliedTheme {
                scheme,
                css,
                analysis: None,
            });
        }

        if is_valid_color(&event.color) {
            self.preferences.default_color = event.color.clone();
        } else {
            log::warn!("ignoring invalid committed color {:?}", event.color);
        }
        self.resolve(&page)
    }
}
