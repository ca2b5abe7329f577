//! Cover art loading with an ordered list of fallback strategies.

pub mod cache;
pub mod strategy;

use std::{sync::Arc, time::Duration};

use image::DynamicImage;

use crate::{
    config::AnalysisConfig,
    error::{CoverhueError, Result},
    utils::image::decode_image,
};

pub use cache::ImageCache;
pub use strategy::{DataUriStrategy, DirectStrategy, ProxyStrategy};

/// One way of turning a source reference into encoded image bytes.
pub trait LoadStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether this strategy can handle `source` at all.
    fn supports(&self, source: &str) -> bool;

    fn fetch(&self, source: &str) -> Result<Vec<u8>>;
}

pub struct ImageLoader {
    strategies: Vec<Box<dyn LoadStrategy>>,
    cache: ImageCache,
}

impl ImageLoader {
    pub fn new(strategies: Vec<Box<dyn LoadStrategy>>, cache: ImageCache) -> Self {
        Self { strategies, cache }
    }

    /// Direct, then proxy (when configured), then inline data.
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self::new(
            default_strategies(config.fetch_timeout, config.proxy.as_deref()),
            ImageCache::new(config.cache_capacity),
        )
    }

    pub fn cache(&self) -> &ImageCache {
        &self.cache
    }

    /// Decoded image for `source`, served from the cache when possible.
    ///
    /// Only the aggregate failure is reported; individual strategy errors are
    /// logged at debug level.
    pub fn load(&self, source: &str) -> Result<Arc<DynamicImage>> {
        let source = source.trim();
        if source.is_empty() {
            return Err(CoverhueError::MissingSource);
        }

        if let Some(image) = self.cache.get(source) {
            return Ok(image);
        }

        let mut failures = Vec::new();
        for strategy in self.strategies.iter().filter(|s| s.supports(source)) {
            match strategy.fetch(source).and_then(|bytes| decode_image(&bytes)) {
                Ok(image) => {
                    log::debug!("loaded {} via {}", short(source), strategy.name());
                    let image = Arc::new(image);
                    self.cache.insert(source, Arc::clone(&image));
                    return Ok(image);
                }
                Err(err) => {
                    log::debug!("{} failed for {}: {err}", strategy.name(), short(source));
                    failures.push(format!("{}: {err}", strategy.name()));
                }
            }
        }

        if failures.is_empty() {
            failures.push("no strategy accepts this source".to_string());
        }
        Err(CoverhueError::ImageDecode(failures.join("; ")))
    }
}

pub fn default_strategies(timeout: Duration, proxy: Option<&str>) -> Vec<Box<dyn LoadStrategy>> {
    let mut strategies: Vec<Box<dyn LoadStrategy>> = vec![Box::new(DirectStrategy::new(timeout))];
    if let Some(template) = proxy {
        strategies.push(Box::new(ProxyStrategy::new(template, timeout)));
    }
    strategies.push(Box::new(DataUriStrategy));
    strategies
}

/// Data URIs can be huge, keep log lines readable.
fn short(source: &str) -> &str {
    match source.char_indices().nth(64) {
        Some((idx, _)) => &source[..idx],
        None => source,
    }
}
