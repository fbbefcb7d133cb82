//! Mask-driven horizontal pixel sorting.
//!
//! Each scanline is scanned left to right for runs of white mask pixels.
//! The source pixels of a run are stable-sorted by ascending luminance and
//! written back over the same span. Everything outside a run is copied
//! through unchanged, alpha included.

use std::time::Instant;

use log::debug;

use super::buffer::{PixelBuffer, CHANNELS};
use super::luminance::{pixel_luminance, ThresholdRange};
use super::mask::generate_pixelated_mask_with;
use super::scanline::ScanlineExecutor;
use crate::error::{PixelError, Result};

#[inline]
fn is_mask_white(px: &[u8]) -> bool {
    px[0] == 255 && px[1] == 255 && px[2] == 255
}

/// Locate the maximal white runs `[l, r)` of one mask row.
fn find_runs(mask_row: &[u8]) -> Vec<(usize, usize)> {
    let width = mask_row.len() / CHANNELS;
    let mut runs = Vec::new();
    let mut l = 0;
    while l < width {
        if !is_mask_white(&mask_row[l * CHANNELS..]) {
            l += 1;
            continue;
        }
        let mut r = l + 1;
        while r < width && is_mask_white(&mask_row[r * CHANNELS..]) {
            r += 1;
        }
        runs.push((l, r));
        l = r;
    }
    runs
}

/// Stable-sort the pixels of `row[l..r)` by luminance, in place.
fn sort_run(row: &mut [u8], l: usize, r: usize) {
    let span = &mut row[l * CHANNELS..r * CHANNELS];
    let mut pixels: Vec<(f64, [u8; 4])> = span
        .chunks_exact(CHANNELS)
        .map(|px| (pixel_luminance(px), [px[0], px[1], px[2], px[3]]))
        .collect();

    pixels.sort_by(|a, b| a.0.total_cmp(&b.0));

    for (dst, (_, px)) in span.chunks_exact_mut(CHANNELS).zip(pixels) {
        dst.copy_from_slice(&px);
    }
}

/// Sort every masked run of `src` by luminance.
///
/// # Arguments
/// * `src` - Source image, left unmodified
/// * `mask` - Same-size mask; pixels with R = G = B = 255 are sorted
///
/// # Returns
/// A new buffer with the same stride as `src`
pub fn sort_by_mask(src: &PixelBuffer, mask: &PixelBuffer) -> Result<PixelBuffer> {
    sort_by_mask_with(&ScanlineExecutor::global(), src, mask)
}

/// [`sort_by_mask`] on an explicit executor.
pub fn sort_by_mask_with(
    executor: &ScanlineExecutor,
    src: &PixelBuffer,
    mask: &PixelBuffer,
) -> Result<PixelBuffer> {
    if !src.same_dimensions(mask) {
        return Err(PixelError::DimensionMismatch {
            expected: src.dimensions(),
            actual: mask.dimensions(),
        });
    }

    let start = Instant::now();
    let mut out = src.clone();
    let stride = out.stride();

    executor.for_each_band_mut(out.as_bytes_mut(), stride, |y, row| {
        for (l, r) in find_runs(mask.row(y)) {
            sort_run(row, l, r);
        }
    });

    debug!(
        "pixel sort {}x{} done in {:?}",
        src.width(),
        src.height(),
        start.elapsed()
    );
    Ok(out)
}

/// Build a pixelated mask for `range` and sort `src` by it.
pub fn pixel_sort(
    src: &PixelBuffer,
    range: &ThresholdRange,
    block_size: usize,
) -> Result<PixelBuffer> {
    pixel_sort_with(&ScanlineExecutor::global(), src, range, block_size)
}

/// [`pixel_sort`] on an explicit executor.
pub fn pixel_sort_with(
    executor: &ScanlineExecutor,
    src: &PixelBuffer,
    range: &ThresholdRange,
    block_size: usize,
) -> Result<PixelBuffer> {
    let mask = generate_pixelated_mask_with(executor, src, range, block_size)?;
    sort_by_mask_with(executor, src, &mask)
}
