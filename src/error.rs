//! Error type shared by every operation in the crate.
//!
//! All variants are validation failures raised before any pixel work
//! starts, so an `Err` never comes with a partially processed image.

/// Errors returned by buffer construction, parameter validation and the
/// mask / sort operations.
#[derive(Debug, thiserror::Error)]
pub enum PixelError {
    /// Threshold bounds outside `[0, 1]`, non-finite, or `low >= high`.
    #[error("invalid luminance range [{low}, {high}]: expected 0 <= low < high <= 1")]
    InvalidThreshold { low: f64, high: f64 },

    /// Pixelation block size below 1.
    #[error("invalid pixelation block size {0}: expected an integer >= 1")]
    InvalidBlockSize(usize),

    /// Mask and source buffers have different geometry.
    #[error("mask is {}x{} but source is {}x{}", .actual.0, .actual.1, .expected.0, .expected.1)]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    /// Raw bytes or array shape do not describe a canonical RGBA8 buffer.
    #[error("invalid pixel buffer layout: {0}")]
    InvalidLayout(String),

    #[error("scanline executor needs at least one worker")]
    InvalidWorkerCount,

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, PixelError>;

#[cfg(feature = "python")]
impl From<PixelError> for pyo3::PyErr {
    fn from(err: PixelError) -> Self {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
