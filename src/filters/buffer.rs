//! Canonical RGBA8 pixel buffer.
//!
//! Every filter in the crate consumes and produces this layout:
//! - 4 interleaved channels per pixel (R, G, B, A), straight alpha
//! - rows stored top to bottom, `stride >= width * 4` bytes apart
//! - pixel `(x, y)` at byte offset `y * stride + x * 4`
//!
//! Padding bytes past `width * 4` in a row are carried along but never
//! interpreted.

use ndarray::{Array3, ArrayView3};

use crate::error::{PixelError, Result};

/// Bytes per pixel in the canonical layout.
pub const CHANNELS: usize = 4;

/// Bytes in one unpadded row of `width` pixels.
pub fn tight_stride(width: usize) -> Result<usize> {
    width.checked_mul(CHANNELS).ok_or_else(|| {
        PixelError::InvalidLayout(format!("width {width} overflows the row size"))
    })
}

/// Owned RGBA8 image with an explicit row stride.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    stride: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Zeroed buffer with a tight stride of `width * 4`.
    pub fn new(width: usize, height: usize) -> Self {
        let stride = width * CHANNELS;
        Self {
            width,
            height,
            stride,
            data: vec![0u8; stride * height],
        }
    }

    /// Buffer where every pixel is `rgba`.
    pub fn filled(width: usize, height: usize, rgba: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(width * height * CHANNELS);
        for _ in 0..width * height {
            data.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            stride: width * CHANNELS,
            data,
        }
    }

    /// Adopt existing bytes.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `stride` - Bytes between the starts of consecutive rows
    /// * `data` - Exactly `stride * height` bytes
    pub fn from_raw(width: usize, height: usize, stride: usize, data: Vec<u8>) -> Result<Self> {
        let row_bytes = tight_stride(width)?;
        if stride < row_bytes {
            return Err(PixelError::InvalidLayout(format!(
                "stride {stride} is smaller than {row_bytes} bytes for width {width}"
            )));
        }
        let expected = stride.checked_mul(height).ok_or_else(|| {
            PixelError::InvalidLayout(format!("stride {stride} x height {height} overflows"))
        })?;
        if data.len() != expected {
            return Err(PixelError::InvalidLayout(format!(
                "expected {expected} bytes for stride {stride} and height {height}, got {}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    /// Build from an `(height, width, channels)` array.
    ///
    /// Grayscale (1 channel) is replicated into R, G and B. Inputs without
    /// an alpha channel (1 or 3 channels) become fully opaque.
    pub fn from_array(input: ArrayView3<u8>) -> Result<Self> {
        let (height, width, channels) = input.dim();
        if !matches!(channels, 1 | 3 | 4) {
            return Err(PixelError::InvalidLayout(format!(
                "expected 1, 3 or 4 channels, got {channels}"
            )));
        }

        let mut buffer = Self::new(width, height);
        for y in 0..height {
            let row = &mut buffer.data[y * buffer.stride..(y + 1) * buffer.stride];
            for x in 0..width {
                let px = &mut row[x * CHANNELS..(x + 1) * CHANNELS];
                match channels {
                    1 => {
                        let v = input[[y, x, 0]];
                        px.copy_from_slice(&[v, v, v, 255]);
                    }
                    3 => {
                        let (r, g, b) = (input[[y, x, 0]], input[[y, x, 1]], input[[y, x, 2]]);
                        px.copy_from_slice(&[r, g, b, 255]);
                    }
                    _ => {
                        for c in 0..CHANNELS {
                            px[c] = input[[y, x, c]];
                        }
                    }
                }
            }
        }
        Ok(buffer)
    }

    /// Copy into a `(height, width, 4)` array, dropping row padding.
    pub fn to_array(&self) -> Array3<u8> {
        let mut flat = Vec::with_capacity(self.width * self.height * CHANNELS);
        for y in 0..self.height {
            flat.extend_from_slice(self.row(y));
        }
        Array3::from_shape_vec((self.height, self.width, CHANNELS), flat)
            .expect("row bytes always fill height * width * 4")
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn same_dimensions(&self, other: &PixelBuffer) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Raw bytes including any row padding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// The `width * 4` visible bytes of row `y`.
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.width * CHANNELS]
    }

    /// RGBA of pixel `(x, y)`.
    ///
    /// Panics if the coordinate is out of bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let idx = y * self.stride + x * CHANNELS;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }
}
