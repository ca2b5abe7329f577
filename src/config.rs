use std::{
    fmt::Display,
    fs::File,
    io::{Read, Write},
    path::Path,
    str::FromStr,
    time::Duration,
};

use json::{JsonValue, object};

use crate::{
    color_palette::{ColorTables, DEFAULT_COLOR, DEFAULT_COLOR_HEX},
    error::{CoverhueError, Result},
    sampler::{
        DEFAULT_CANVAS_SIZE, FocusRegion, FocusSampling, MAX_CANVAS_SIZE, MAX_SAMPLES,
        MIN_CANVAS_SIZE, SamplingStrategy,
    },
    scoring::Algorithm,
    utils::pixel::RGB,
};

pub const DEFAULT_FALLBACK_CANVAS_SIZE: u32 = 100;
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the theme color comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// The stored default color.
    #[default]
    Default,
    /// Dominant color of the page's cover art.
    Thumbnail,
}

impl ColorMode {
    pub const fn name(&self) -> &'static str {
        match self {
            ColorMode::Default => "default",
            ColorMode::Thumbnail => "thumbnail",
        }
    }
}

impl FromStr for ColorMode {
    type Err = CoverhueError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "default" => Ok(ColorMode::Default),
            "thumbnail" => Ok(ColorMode::Thumbnail),
            other => Err(ConfigError::new(format!("Not recognized color_mode {other:?}")).into()),
        }
    }
}

/// User preferences, owned by whoever persists them.
#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    /// Kept as the raw stored string; an invalid value disables theming.
    pub default_color: String,
    pub color_mode: ColorMode,
    pub disable_on_reading_page: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            default_color: DEFAULT_COLOR_HEX.to_string(),
            color_mode: ColorMode::default(),
            disable_on_reading_page: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Result of the last fallback step.
    pub default_color: RGB,
    /// Working canvas side for the histogram path, `100..=200`.
    pub canvas_size: u32,
    /// Canvas side for the max-spread re-sample.
    pub fallback_canvas_size: u32,
    pub sampling: SamplingStrategy,
    /// Caller preference order for the selector.
    pub algorithms: Vec<Algorithm>,
    /// Reject skin tones in the accent histogram too.
    pub skin_filter: bool,
    pub fetch_timeout: Duration,
    /// Proxy URL template with a `{url}` placeholder.
    pub proxy: Option<String>,
    /// Maximum cached images, unbounded when unset.
    pub cache_capacity: Option<usize>,
    pub preferences: Preferences,
    pub tables: ColorTables,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_color: DEFAULT_COLOR,
            canvas_size: DEFAULT_CANVAS_SIZE,
            fallback_canvas_size: DEFAULT_FALLBACK_CANVAS_SIZE,
            sampling: SamplingStrategy::default(),
            algorithms: vec![Algorithm::Accent, Algorithm::Vibrant],
            skin_filter: false,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            proxy: None,
            cache_capacity: None,
            preferences: Preferences::default(),
            tables: ColorTables::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn to_config(json_string: &str) -> Result<AnalysisConfig> {
        let json = json::parse(json_string)?;
        let defaults = AnalysisConfig::default();

        let default_color = match json["default_color"].as_str() {
            Some(val) => RGB::parse(val)?,
            None if json["default_color"].is_null() => defaults.default_color,
            None => return ConfigError::get("Couldn't parse default_color"),
        };

        let canvas_size = match json["canvas_size"].as_u32() {
            Some(val) => {
                let clamped = val.clamp(MIN_CANVAS_SIZE, MAX_CANVAS_SIZE);
                if clamped != val {
                    log::warn!("canvas_size {val} clamped to {clamped}");
                }
                clamped
            }
            None if json["canvas_size"].is_null() => defaults.canvas_size,
            None => return ConfigError::get("Couldn't parse canvas_size"),
        };

        let fallback_canvas_size = match json["fallback_canvas_size"].as_u32() {
            Some(0) => return ConfigError::get("fallback_canvas_size must be positive"),
            Some(val) => val,
            None if json["fallback_canvas_size"].is_null() => defaults.fallback_canvas_size,
            None => return ConfigError::get("Couldn't parse fallback_canvas_size"),
        };

        let sampling = parse_sampling(&json["sampling"])?;

        let algorithms = if json["algorithms"].is_null() {
            defaults.algorithms
        } else if !json["algorithms"].is_array() || json["algorithms"].is_empty() {
            return ConfigError::get("algorithms should be a non-empty array of names");
        } else {
            let mut algorithms = Vec::with_capacity(json["algorithms"].len());
            for entry in json["algorithms"].members() {
                match entry.as_str() {
                    Some(name) => algorithms.push(name.parse::<Algorithm>()?),
                    None => return ConfigError::get("Couldn't parse algorithms.*"),
                }
            }
            algorithms
        };

        let skin_filter = match json["skin_filter"].as_bool() {
            Some(val) => val,
            None if json["skin_filter"].is_null() => defaults.skin_filter,
            None => return ConfigError::get("Couldn't parse skin_filter"),
        };

        let fetch_timeout = match json["fetch_timeout_ms"].as_u64() {
            Some(val) => Duration::from_millis(val),
            None if json["fetch_timeout_ms"].is_null() => defaults.fetch_timeout,
            None => return ConfigError::get("Couldn't parse fetch_timeout_ms"),
        };

        let proxy = match json["proxy"].as_str() {
            Some(val) if val.contains("{url}") => Some(val.to_string()),
            Some(_) => return ConfigError::get("proxy should contain a {url} placeholder"),
            None if json["proxy"].is_null() => None,
            None => return ConfigError::get("Couldn't parse proxy"),
        };

        let cache_capacity = match json["cache_capacity"].as_usize() {
            Some(val) => Some(val),
            None if json["cache_capacity"].is_null() => None,
            None => return ConfigError::get("Couldn't parse cache_capacity"),
        };

        let preferences = parse_preferences(&json["preferences"])?;

        Ok(AnalysisConfig {
            default_color,
            canvas_size,
            fallback_canvas_size,
            sampling,
            algorithms,
            skin_filter,
            fetch_timeout,
            proxy,
            cache_capacity,
            preferences,
            tables: defaults.tables,
        })
    }

    fn to_json(config: &AnalysisConfig) -> String {
        let mut data = json::JsonValue::new_object();

        data["default_color"] = config.default_color.into();
        data["canvas_size"] = config.canvas_size.into();
        data["fallback_canvas_size"] = config.fallback_canvas_size.into();
        data["sampling"] = config.sampling.into();
        data["algorithms"] = config
            .algorithms
            .iter()
            .map(|a| a.name())
            .collect::<Vec<_>>()
            .into();
        data["skin_filter"] = config.skin_filter.into();
        data["fetch_timeout_ms"] = (config.fetch_timeout.as_millis() as u64).into();
        if let Some(proxy) = &config.proxy {
            data["proxy"] = proxy.as_str().into();
        }
        if let Some(capacity) = config.cache_capacity {
            data["cache_capacity"] = capacity.into();
        }
        data["preferences"] = config.preferences.clone().into();

        data.pretty(2)
    }

    pub fn read_config(path: impl AsRef<Path>) -> Result<AnalysisConfig> {
        let mut file = File::open(path)?;
        let mut buff = String::new();
        let _ = file.read_to_string(&mut buff)?;

        AnalysisConfig::to_config(&buff)
    }

    pub fn write_config(&self, path: impl AsRef<Path>) -> Result {
        let string = AnalysisConfig::to_json(self);
        let mut file = File::create(path)?;
        file.write_all(string.as_bytes())?;
        Ok(())
    }
}

fn parse_sampling(value: &JsonValue) -> Result<SamplingStrategy> {
    if value.is_null() {
        return Ok(SamplingStrategy::default());
    }

    let mode = match value.as_str() {
        Some(mode) => mode,
        None => match value["mode"].as_str() {
            Some(mode) => mode,
            None => return ConfigError::get("Couldn't parse sampling.mode"),
        },
    };

    match mode {
        "exhaustive" => Ok(SamplingStrategy::Exhaustive),
        "focus" => {
            let defaults = FocusSampling::default();
            let samples = match value["samples"].as_usize() {
                Some(val) if val > MAX_SAMPLES => {
                    log::warn!("sampling.samples {val} clamped to {MAX_SAMPLES}");
                    MAX_SAMPLES
                }
                Some(val) => val,
                None if value["samples"].is_null() => defaults.samples,
                None => return ConfigError::get("Couldn't parse sampling.samples"),
            };
            let focus_fraction = match as_fraction(&value["focus_fraction"]) {
                Some(val) if (0.0..=1.0).contains(&val) => val,
                Some(_) => return ConfigError::get("focus_fraction should be in 0..=1"),
                None => defaults.focus_fraction,
            };
            let focus_weight = match as_fraction(&value["focus_weight"]) {
                Some(val) if val >= 0.0 => val,
                Some(_) => return ConfigError::get("focus_weight can't be negative"),
                None => defaults.focus_weight,
            };
            let region = if value["region"].is_null() {
                defaults.region
            } else {
                let field = |name: &str| match as_fraction(&value["region"][name]) {
                    Some(val) => Ok(val),
                    None => Err(ConfigError::new(format!("Couldn't parse sampling.region.{name}"))),
                };
                FocusRegion {
                    x: field("x")?,
                    y: field("y")?,
                    width: field("width")?,
                    height: field("height")?,
                }
            };

            Ok(SamplingStrategy::FocusWeighted(FocusSampling {
                samples,
                focus_fraction,
                region,
                focus_weight,
                seed: value["seed"].as_u64(),
            }))
        }
        _ => ConfigError::get("Not recognized sampling mode"),
    }
}

fn parse_preferences(value: &JsonValue) -> Result<Preferences> {
    let defaults = Preferences::default();
    if value.is_null() {
        return Ok(defaults);
    }

    // stored verbatim, validated when a theme is resolved
    let default_color = match value["default_color"].as_str() {
        Some(val) => val.to_string(),
        None => defaults.default_color,
    };
    let color_mode = match value["color_mode"].as_str() {
        Some(val) => val.parse()?,
        None => defaults.color_mode,
    };
    let disable_on_reading_page = match value["disable_on_reading_page"].as_bool() {
        Some(val) => val,
        None => defaults.disable_on_reading_page,
    };

    Ok(Preferences {
        default_color,
        color_mode,
        disable_on_reading_page,
    })
}

/// Read through f64 so values written by [`fraction`] come back bit-exact.
fn as_fraction(value: &JsonValue) -> Option<f32> {
    value.as_f64().map(|val| val as f32)
}

/// Shortest decimal of `val`, so `0.7` is written as `0.7`.
fn fraction(val: f32) -> JsonValue {
    val.to_string().parse::<f64>().unwrap_or(val as f64).into()
}

impl From<RGB> for JsonValue {
    fn from(rgb: RGB) -> Self {
        rgb.to_hex().into()
    }
}

impl From<SamplingStrategy> for JsonValue {
    fn from(strategy: SamplingStrategy) -> Self {
        match strategy {
            SamplingStrategy::Exhaustive => JsonValue::String(String::from("exhaustive")),
            SamplingStrategy::FocusWeighted(focus) => {
                let mut data = object! {
                    mode: "focus",
                    samples: focus.samples,
                    focus_fraction: fraction(focus.focus_fraction),
                    focus_weight: fraction(focus.focus_weight),
                    region: object! {
                        x: fraction(focus.region.x),
                        y: fraction(focus.region.y),
                        width: fraction(focus.region.width),
                        height: fraction(focus.region.height),
                    },
                };
                if let Some(seed) = focus.seed {
                    data["seed"] = seed.into();
                }
                data
            }
        }
    }
}

impl From<Preferences> for JsonValue {
    fn from(prefs: Preferences) -> Self {
        object! {
            default_color: prefs.default_color,
            color_mode: prefs.color_mode.name(),
            disable_on_reading_page: prefs.disable_on_reading_page,
        }
    }
}

#[derive(Debug)]
pub struct ConfigError {
    msg: String,
}

impl ConfigError {
    fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }

    fn get<T>(msg: &str) -> Result<T> {
        Err(ConfigError::new(msg).into())
    }
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("ConfigParseError {}", self.msg))
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for CoverhueError {
    fn from(err: ConfigError) -> Self {
        CoverhueError::Config(err.to_string())
    }
}
