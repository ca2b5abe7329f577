use crate::utils::pixel::RGB;

/// Perceptual gate on top of the RGB heuristics.
///
/// Candidates must sit inside a lightness band and away from the neutral axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabRefinement {
    pub min_lightness: f32,
    pub max_lightness: f32,
    /// Both |a| and |b| under this means neutral.
    pub neutral_chroma: f32,
}

impl Default for LabRefinement {
    fn default() -> Self {
        Self {
            min_lightness: 20.0,
            max_lightness: 90.0,
            neutral_chroma: 10.0,
        }
    }
}

impl LabRefinement {
    pub fn passes(&self, color: &RGB) -> bool {
        let lab = color.to_lab();
        if lab.l < self.min_lightness || lab.l > self.max_lightness {
            return false;
        }
        !(lab.a.abs() < self.neutral_chroma && lab.b.abs() < self.neutral_chroma)
    }
}
