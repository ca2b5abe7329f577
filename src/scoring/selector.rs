use crate::{
    error::{CoverhueError, Result},
    palette::is_valid_color,
    scoring::{Algorithm, DominantColor},
};

/// Rank of `algorithm` in the caller's preference list, unlisted ones last.
fn preference_rank(preference: &[Algorithm], algorithm: Algorithm) -> usize {
    preference
        .iter()
        .position(|a| *a == algorithm)
        .unwrap_or(preference.len())
}

/// First usable result, ordered by preference then confidence.
///
/// Errors and results whose color fails validation are dropped.
pub fn select(
    results: impl IntoIterator<Item = Result<DominantColor>>,
    preference: &[Algorithm],
) -> Result<DominantColor> {
    let mut usable: Vec<DominantColor> = results
        .into_iter()
        .filter_map(|result| {
            result
                .inspect_err(|err| log::debug!("algorithm dropped: {err}"))
                .ok()
        })
        .filter(|candidate| is_valid_color(&candidate.hex()))
        .collect();

    usable.sort_by(|a, b| {
        preference_rank(preference, a.algorithm)
            .cmp(&preference_rank(preference, b.algorithm))
            .then(b.confidence.total_cmp(&a.confidence))
    });

    usable
        .into_iter()
        .next()
        .ok_or(CoverhueError::AnalysisExhausted)
}
