use thiserror::Error;

/// The main error type for the coverhue crate
#[derive(Debug, Error)]
pub enum CoverhueError {
    /// Image failed to load or decode, including every load strategy failing
    #[error("image decode error: {0}")]
    ImageDecode(String),

    /// No image source could be resolved for the page
    #[error("no image source available")]
    MissingSource,

    /// A color string did not pass format validation
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// Every scoring strategy in the fallback chain came up empty
    #[error("color analysis exhausted every fallback")]
    AnalysisExhausted,

    /// Network fetch failed or timed out
    #[error("fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Error occurred during I/O operations (file read/write)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed
    #[error("config error: {0}")]
    Config(String),
}

impl From<image::ImageError> for CoverhueError {
    fn from(err: image::ImageError) -> Self {
        CoverhueError::ImageDecode(err.to_string())
    }
}

impl From<json::Error> for CoverhueError {
    fn from(err: json::Error) -> Self {
        CoverhueError::Config(err.to_string())
    }
}

// Convenience type alias for Results using CoverhueError
pub type Result<T = ()> = std::result::Result<T, CoverhueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_error_maps_to_decode() {
        let err = image::load_from_memory(b"not an image").unwrap_err();
        assert!(matches!(CoverhueError::from(err), CoverhueError::ImageDecode(_)));
    }
}
