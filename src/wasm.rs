//! WebAssembly exports.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images are
//! flat RGBA byte arrays (length = width * height * 4); errors surface as
//! thrown strings.

use wasm_bindgen::prelude::*;

use crate::error::PixelError;
use crate::filters::buffer::{tight_stride, PixelBuffer};
use crate::filters::luminance::ThresholdRange;
use crate::filters::mask::generate_pixelated_mask;
use crate::filters::pixel_sort::{pixel_sort, sort_by_mask};

fn to_js(err: PixelError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn buffer(data: &[u8], width: usize, height: usize) -> Result<PixelBuffer, JsValue> {
    let stride = tight_stride(width).map_err(to_js)?;
    PixelBuffer::from_raw(width, height, stride, data.to_vec()).map_err(to_js)
}

// ========================================================================
// Luminance Mask
// ========================================================================

/// Luminance mask, pixelated when `block_size > 1`.
///
/// # Arguments
/// * `data` - Flat array of RGBA bytes
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `low`, `high` - Band bounds, 0 <= low < high <= 1
/// * `reversed` - Select luminance outside the band
/// * `block_size` - Pixelation block edge, >= 1
#[wasm_bindgen]
pub fn luminance_mask_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    low: f64,
    high: f64,
    reversed: bool,
    block_size: usize,
) -> Result<Vec<u8>, JsValue> {
    let src = buffer(data, width, height)?;
    let range = ThresholdRange::new(low, high, reversed).map_err(to_js)?;
    let mask = generate_pixelated_mask(&src, &range, block_size).map_err(to_js)?;
    Ok(mask.into_raw())
}

// ========================================================================
// Pixel Sorting
// ========================================================================

/// Sort runs of white `mask` pixels by luminance.
#[wasm_bindgen]
pub fn pixel_sort_by_mask_wasm(
    data: &[u8],
    mask: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<u8>, JsValue> {
    let src = buffer(data, width, height)?;
    let mask = buffer(mask, width, height)?;
    let result = sort_by_mask(&src, &mask).map_err(to_js)?;
    Ok(result.into_raw())
}

/// Pixelated mask followed by mask-driven sort.
#[wasm_bindgen]
pub fn pixel_sort_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    low: f64,
    high: f64,
    reversed: bool,
    block_size: usize,
) -> Result<Vec<u8>, JsValue> {
    let src = buffer(data, width, height)?;
    let range = ThresholdRange::new(low, high, reversed).map_err(to_js)?;
    let result = pixel_sort(&src, &range, block_size).map_err(to_js)?;
    Ok(result.into_raw())
}
