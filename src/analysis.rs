//! Load → Sample → Score, with the fallback chain and multi-algorithm selection.

use image::DynamicImage;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use crate::{
    config::AnalysisConfig,
    error::{CoverhueError, Result},
    palette::TonalPalette,
    sampler::{Sampler, SamplingStrategy},
    scoring::{
        Algorithm, DominantColor,
        filter::SampleFilter,
        frequency::dominant_by_frequency,
        histogram::{AccentHistogram, max_spread_scan},
        lab::LabRefinement,
        selector::select,
        vibrant::vibrant_dominant,
    },
    texture::Texture,
    utils::{image::decode_image, pixel::RGB},
};

/// Runs the configured algorithms against one image at a time.
///
/// Holds no per-image state; every call builds its own canvas and histogram.
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalysisConfig,
    lab: LabRefinement,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            lab: LabRefinement::default(),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    fn sampler(&self) -> Sampler {
        Sampler::new(self.config.canvas_size, self.config.sampling)
    }

    /// Last step of every chain.
    pub fn default_result(&self) -> DominantColor {
        DominantColor::new(self.config.default_color, 0.0, Algorithm::Default)
    }

    /// One algorithm, including its own fallbacks.
    ///
    /// `Err(AnalysisExhausted)` when nothing in the chain produced a color.
    pub fn run(&self, algorithm: Algorithm, image: &DynamicImage) -> Result<DominantColor> {
        let found = match algorithm {
            Algorithm::Accent => {
                let filter = if self.config.skin_filter {
                    SampleFilter::WITH_SKIN
                } else {
                    SampleFilter::STANDARD
                };
                return self.histogram(image, filter, false);
            }
            Algorithm::Advanced => return self.histogram(image, SampleFilter::WITH_SKIN, true),
            Algorithm::MaxSpread => return self.max_spread(image),
            Algorithm::Default => return Ok(self.default_result()),
            Algorithm::Vibrant => vibrant_dominant(&self.canvas(image)?, &self.config.tables),
            Algorithm::Frequency => dominant_by_frequency(&self.canvas(image)?),
            Algorithm::MaterialYou => vibrant_dominant(&self.canvas(image)?, &self.config.tables)
                .map(|(color, score)| (TonalPalette::from_rgb(color).primary(), score)),
        };

        found
            .map(|(color, confidence)| DominantColor::new(color, confidence, algorithm))
            .ok_or(CoverhueError::AnalysisExhausted)
    }

    fn canvas(&self, image: &DynamicImage) -> Result<Texture<RGB>> {
        self.sampler().canvas(image)
    }

    fn histogram(
        &self,
        image: &DynamicImage,
        filter: SampleFilter,
        refine: bool,
    ) -> Result<DominantColor> {
        let samples = self.sampler().sample(image)?;
        let mut histogram = AccentHistogram::new(&self.config.tables, filter);
        histogram.extend(&samples);

        let algorithm = if refine {
            Algorithm::Advanced
        } else {
            Algorithm::Accent
        };

        let picked = if refine {
            histogram
                .ranked()
                .into_iter()
                .find(|(color, _)| self.lab.passes(color))
        } else {
            histogram.winner()
        };

        match picked {
            Some((color, confidence)) => Ok(DominantColor::new(color, confidence, algorithm)),
            None => {
                log::debug!(
                    "{algorithm}: no usable bucket out of {} samples, scanning for spread",
                    samples.len()
                );
                self.max_spread(image)
            }
        }
    }

    /// Re-sample at the fallback size and take the most spread-out pixel.
    fn max_spread(&self, image: &DynamicImage) -> Result<DominantColor> {
        let canvas = Sampler::new(self.config.fallback_canvas_size, SamplingStrategy::Exhaustive)
            .canvas(image)?;
        max_spread_scan(&canvas, &self.config.tables)
            .map(|(color, confidence)| DominantColor::new(color, confidence, Algorithm::MaxSpread))
            .ok_or(CoverhueError::AnalysisExhausted)
    }

    /// Every preferred algorithm on the rayon pool, then the selector.
    pub fn analyze(&self, image: &DynamicImage) -> Result<DominantColor> {
        let preference = &self.config.algorithms;
        let results: Vec<Result<DominantColor>> = preference
            .par_iter()
            .map(|algorithm| self.run(*algorithm, image))
            .collect();

        select(results, preference)
    }

    /// Never fails: every analysis error turns into the configured default.
    pub fn analyze_or_default(&self, image: Result<&DynamicImage>) -> DominantColor {
        match image.and_then(|image| self.analyze(image)) {
            Ok(result) => result,
            Err(err) => {
                log::warn!(
                    "color analysis failed ({err}), using {}",
                    self.config.default_color.to_hex()
                );
                self.default_result()
            }
        }
    }

    /// Decode then analyze; corrupt bytes yield the default like any other failure.
    pub fn analyze_bytes(&self, bytes: &[u8]) -> DominantColor {
        match decode_image(bytes) {
            Ok(image) => self.analyze_or_default(Ok(&image)),
            Err(err) => self.analyze_or_default(Err(err)),
        }
    }
}

/// Dominant color of an already decoded image with the default configuration.
pub fn analyze_dominant_color(image: &DynamicImage) -> DominantColor {
    Analyzer::default().analyze_or_default(Ok(image))
}
