//! Luminance masks: plain (per pixel) and pixelated (per block).
//!
//! A mask has the dimensions of its source and only ever contains
//! [`MASK_WHITE`] (pixel is in the band) or [`MASK_BLACK`].
//!
//! ## Pixelation
//!
//! With block size `n > 1` the image is split into a
//! `ceil(w / n) x ceil(h / n)` grid. Edge blocks are clipped to the image.
//! Two passes run over block rows:
//! 1. downscale - mean luminance per block, classified into a grid-sized buffer
//! 2. upscale - each block colour written back over the pixels it covers
//!
//! The second pass reads the whole grid, so it starts only after the first
//! has joined.

use std::time::Instant;

use log::debug;

use super::buffer::{PixelBuffer, CHANNELS};
use super::luminance::{pixel_luminance, ThresholdRange};
use super::scanline::ScanlineExecutor;
use crate::error::{PixelError, Result};

/// Mask colour for "in band".
pub const MASK_WHITE: [u8; 4] = [255, 255, 255, 255];
/// Mask colour for "out of band".
pub const MASK_BLACK: [u8; 4] = [0, 0, 0, 255];

#[inline]
fn mask_color(inside: bool) -> [u8; 4] {
    if inside {
        MASK_WHITE
    } else {
        MASK_BLACK
    }
}

/// Per-pixel luminance mask.
pub fn generate_plain_mask(src: &PixelBuffer, range: &ThresholdRange) -> PixelBuffer {
    generate_plain_mask_with(&ScanlineExecutor::global(), src, range)
}

/// [`generate_plain_mask`] on an explicit executor.
pub fn generate_plain_mask_with(
    executor: &ScanlineExecutor,
    src: &PixelBuffer,
    range: &ThresholdRange,
) -> PixelBuffer {
    let start = Instant::now();
    let width = src.width();
    let mut mask = PixelBuffer::new(width, src.height());
    let stride = mask.stride();

    executor.for_each_band_mut(mask.as_bytes_mut(), stride, |y, row| {
        for (x, px) in src.row(y).chunks_exact(CHANNELS).enumerate() {
            let color = mask_color(range.contains(pixel_luminance(px)));
            row[x * CHANNELS..(x + 1) * CHANNELS].copy_from_slice(&color);
        }
    });

    debug!(
        "luminance mask {}x{} done in {:?}",
        width,
        src.height(),
        start.elapsed()
    );
    mask
}

/// Block-averaged luminance mask.
///
/// # Arguments
/// * `src` - Source image
/// * `range` - Band the block mean is tested against
/// * `block_size` - Block edge in pixels, >= 1 (1 is the same as [`generate_plain_mask`])
pub fn generate_pixelated_mask(
    src: &PixelBuffer,
    range: &ThresholdRange,
    block_size: usize,
) -> Result<PixelBuffer> {
    generate_pixelated_mask_with(&ScanlineExecutor::global(), src, range, block_size)
}

/// [`generate_pixelated_mask`] on an explicit executor.
pub fn generate_pixelated_mask_with(
    executor: &ScanlineExecutor,
    src: &PixelBuffer,
    range: &ThresholdRange,
    block_size: usize,
) -> Result<PixelBuffer> {
    if block_size == 0 {
        return Err(PixelError::InvalidBlockSize(block_size));
    }
    if block_size == 1 {
        return Ok(generate_plain_mask_with(executor, src, range));
    }

    let start = Instant::now();
    let (width, height) = src.dimensions();
    // A block larger than the image covers it entirely either way.
    let n = block_size.min(width.max(height).max(1));
    let grid = downscale_blocks(executor, src, range, n);
    let mask = upscale_blocks(executor, &grid, width, height, n);

    debug!(
        "pixelated luminance mask {}x{} (block {}, grid {}x{}) done in {:?}",
        width,
        height,
        block_size,
        grid.width(),
        grid.height(),
        start.elapsed()
    );
    Ok(mask)
}

/// Classify the mean luminance of every block into a grid-sized buffer.
fn downscale_blocks(
    executor: &ScanlineExecutor,
    src: &PixelBuffer,
    range: &ThresholdRange,
    n: usize,
) -> PixelBuffer {
    let (width, height) = src.dimensions();
    let mut grid = PixelBuffer::new(width.div_ceil(n), height.div_ceil(n));
    let grid_stride = grid.stride();

    executor.for_each_band_mut(grid.as_bytes_mut(), grid_stride, |by, grid_row| {
        let y_start = by * n;
        let y_end = y_start.saturating_add(n).min(height);
        for (bx, cell) in grid_row.chunks_exact_mut(CHANNELS).enumerate() {
            let x_start = bx * n;
            let x_end = x_start.saturating_add(n).min(width);

            let mut total = 0.0f64;
            for y in y_start..y_end {
                let row = src.row(y);
                for px in row[x_start * CHANNELS..x_end * CHANNELS].chunks_exact(CHANNELS) {
                    total += pixel_luminance(px);
                }
            }
            // Clipped blocks still hold at least one pixel.
            let count = (y_end - y_start) * (x_end - x_start);
            let mean = total / count as f64;

            cell.copy_from_slice(&mask_color(range.contains(mean)));
        }
    });

    grid
}

/// Replicate each grid cell over the `n x n` source pixels it covers.
fn upscale_blocks(
    executor: &ScanlineExecutor,
    grid: &PixelBuffer,
    width: usize,
    height: usize,
    n: usize,
) -> PixelBuffer {
    let mut mask = PixelBuffer::new(width, height);
    let stride = mask.stride();

    executor.for_each_band_mut(mask.as_bytes_mut(), stride.saturating_mul(n), |by, band| {
        let cells = grid.row(by);
        for row in band.chunks_exact_mut(stride) {
            for (x, px) in row.chunks_exact_mut(CHANNELS).enumerate() {
                let cell = (x / n) * CHANNELS;
                px.copy_from_slice(&cells[cell..cell + CHANNELS]);
            }
        }
    });

    mask
}
