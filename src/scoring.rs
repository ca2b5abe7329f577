//! Reduce pixel samples to one dominant color.

pub mod filter;
pub mod frequency;
pub mod histogram;
pub mod lab;
pub mod selector;
pub mod vibrant;

use std::{fmt::Display, str::FromStr};

use crate::{error::CoverhueError, utils::pixel::RGB};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// Quantized histogram with accent-range bonuses.
    Accent,
    /// Accent histogram with skin filtering and a LAB gate.
    Advanced,
    /// Maximise saturation x brightness.
    Vibrant,
    /// Plain exact-color frequency.
    Frequency,
    /// Vibrant color pushed through palette generation.
    MaterialYou,
    /// Most spread-out pixel, the histogram fallback.
    MaxSpread,
    /// Configured default color.
    Default,
}

impl Algorithm {
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Accent,
        Algorithm::Advanced,
        Algorithm::Vibrant,
        Algorithm::Frequency,
        Algorithm::MaterialYou,
        Algorithm::MaxSpread,
        Algorithm::Default,
    ];

    pub const fn name(&self) -> &'static str {
        match self {
            Algorithm::Accent => "accent",
            Algorithm::Advanced => "advanced",
            Algorithm::Vibrant => "vibrant",
            Algorithm::Frequency => "frequency",
            Algorithm::MaterialYou => "material-you",
            Algorithm::MaxSpread => "max-spread",
            Algorithm::Default => "default",
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = CoverhueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .into_iter()
            .find(|a| a.name() == s.trim())
            .ok_or_else(|| CoverhueError::Config(format!("unknown algorithm {s:?}")))
    }
}

/// Outcome of one analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DominantColor {
    pub color: RGB,
    /// `0.0..=1.0`
    pub confidence: f32,
    pub algorithm: Algorithm,
}

impl DominantColor {
    pub fn new(color: RGB, confidence: f32, algorithm: Algorithm) -> Self {
        Self {
            color,
            confidence: confidence.clamp(0.0, 1.0),
            algorithm,
        }
    }

    pub fn hex(&self) -> String {
        self.color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_names_round_trip() {
        for algorithm in Algorithm::ALL {
            assert_eq!(algorithm.name().parse::<Algorithm>().unwrap(), algorithm);
        }
        assert!("kmeans".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_confidence_is_clamped() {
        assert_eq!(DominantColor::new(RGB::WHITE, 3.0, Algorithm::Accent).confidence, 1.0);
    }
}
