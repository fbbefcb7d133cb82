//! Pixel filters for the luminance-mask / pixel-sort effect.
//!
//! ## Supported Format
//!
//! | Format | Layout | Type | Description |
//! |--------|--------|------|-------------|
//! | RGBA8 | rows of `stride >= W * 4` bytes | u8 | R, G, B, straight alpha, 0-255 |
//!
//! Binding layers convert `(H, W, C)` arrays with 1, 3 or 4 channels into
//! this layout through [`buffer::PixelBuffer::from_array`].
//!
//! ## Architecture
//!
//! - **Pure inputs** - the source buffer is only ever borrowed; every
//!   operation allocates its own output
//! - **Alpha pass-through** - alpha never affects luminance and is carried
//!   unchanged by sorting
//! - **Row parallel** - all passes fan out over scanlines or block rows
//!   with rayon, one writer per row
//!
//! ## Modules
//!
//! - `buffer` - canonical pixel buffer and array conversion
//! - `luminance` - BT.709 luminance and the threshold band
//! - `scanline` - row-parallel executor
//! - `mask` - plain and pixelated luminance masks
//! - `pixel_sort` - mask-driven run sorting

pub mod buffer;
pub mod luminance;
pub mod scanline;
pub mod mask;
pub mod pixel_sort;
