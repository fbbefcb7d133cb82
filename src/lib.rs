//! p1x
//!
//! Luminance masks and mask-driven pixel sorting for RGBA images, with
//! Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! All operations work on [`PixelBuffer`]: 8-bit RGBA, straight alpha,
//! row-major with an explicit stride. Bindings accept `(height, width, C)`
//! arrays with 1, 3 or 4 channels and return `(height, width, 4)`.
//!
//! ## Effects
//! - **Luminance mask**: white where BT.709 luminance falls in a band,
//!   black elsewhere
//! - **Pixelated mask**: the same test on block-averaged luminance
//! - **Pixel sort**: every horizontal run of white mask pixels is
//!   re-ordered by ascending luminance
//!
//! ```
//! use p1x::{pixel_sort, PixelBuffer, ThresholdRange};
//!
//! let src = PixelBuffer::filled(16, 16, [120, 60, 200, 255]);
//! let range = ThresholdRange::inner(0.2, 0.8)?;
//! let sorted = pixel_sort(&src, &range, 4)?;
//! assert_eq!(sorted.dimensions(), (16, 16));
//! # Ok::<(), p1x::PixelError>(())
//! ```

pub mod config;
pub mod error;
pub mod filters;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{apply, Effect, EffectConfig};
pub use error::{PixelError, Result};
pub use filters::buffer::PixelBuffer;
pub use filters::luminance::{is_in_band, luminance, ThresholdRange};
pub use filters::mask::{generate_pixelated_mask, generate_plain_mask, MASK_BLACK, MASK_WHITE};
pub use filters::pixel_sort::{pixel_sort, sort_by_mask};
pub use filters::scanline::ScanlineExecutor;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::prelude::*;

    use crate::config::{DEFAULT_BLOCK_SIZE, DEFAULT_HIGH, DEFAULT_LOW};
    use crate::filters::buffer::PixelBuffer;
    use crate::filters::luminance::{luminance as luminance_impl, ThresholdRange};
    use crate::filters::mask::generate_pixelated_mask;
    use crate::filters::pixel_sort::{pixel_sort as pixel_sort_impl, sort_by_mask};

    // ========================================================================
    // Luminance
    // ========================================================================

    /// Normalized BT.709 luminance of an RGB triple (0.0-1.0).
    #[pyfunction]
    #[pyo3(name = "luminance")]
    pub fn luminance_py(r: u8, g: u8, b: u8) -> f64 {
        luminance_impl(r, g, b)
    }

    // ========================================================================
    // Luminance Mask
    // ========================================================================

    /// Black/white luminance mask.
    ///
    /// # Arguments
    /// * `image` - (H, W, C) uint8 image with 1, 3 or 4 channels
    /// * `low`, `high` - Band bounds, 0 <= low < high <= 1
    /// * `reversed` - Select luminance outside the band
    /// * `block_size` - Pixelation block edge; 1 disables pixelation
    #[pyfunction]
    #[pyo3(signature = (image, low, high, reversed=false, block_size=1))]
    pub fn luminance_mask<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        low: f64,
        high: f64,
        reversed: bool,
        block_size: usize,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let src = PixelBuffer::from_array(image.as_array())?;
        let range = ThresholdRange::new(low, high, reversed)?;
        let mask = generate_pixelated_mask(&src, &range, block_size)?;
        Ok(mask.to_array().into_pyarray(py))
    }

    // ========================================================================
    // Pixel Sorting
    // ========================================================================

    /// Sort runs of white mask pixels by luminance.
    ///
    /// `mask` must have the same height and width as `image`.
    #[pyfunction]
    pub fn pixel_sort_by_mask<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        mask: PyReadonlyArray3<'py, u8>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let src = PixelBuffer::from_array(image.as_array())?;
        let mask = PixelBuffer::from_array(mask.as_array())?;
        let result = sort_by_mask(&src, &mask)?;
        Ok(result.to_array().into_pyarray(py))
    }

    /// Pixelated mask followed by mask-driven sort.
    #[pyfunction]
    #[pyo3(signature = (
        image,
        low=DEFAULT_LOW,
        high=DEFAULT_HIGH,
        reversed=false,
        block_size=DEFAULT_BLOCK_SIZE,
    ))]
    pub fn pixel_sort<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        low: f64,
        high: f64,
        reversed: bool,
        block_size: usize,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let src = PixelBuffer::from_array(image.as_array())?;
        let range = ThresholdRange::new(low, high, reversed)?;
        let result = pixel_sort_impl(&src, &range, block_size)?;
        Ok(result.to_array().into_pyarray(py))
    }

    // ========================================================================
    // Module Registration
    // ========================================================================

    /// Python module definition
    #[pymodule]
    pub fn p1x(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(luminance_py, m)?)?;
        m.add_function(wrap_pyfunction!(luminance_mask, m)?)?;
        m.add_function(wrap_pyfunction!(pixel_sort_by_mask, m)?)?;
        m.add_function(wrap_pyfunction!(pixel_sort, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::p1x;
