//! Effect parameters and one-call dispatch.
//!
//! `EffectConfig` deserializes from any serde format, with every field
//! optional. Defaults: band `(0.3, 0.7)`, not reversed, block size 4.

use serde::{Deserialize, Serialize};

use crate::error::{PixelError, Result};
use crate::filters::buffer::PixelBuffer;
use crate::filters::luminance::ThresholdRange;
use crate::filters::mask::{generate_pixelated_mask_with, generate_plain_mask_with};
use crate::filters::pixel_sort::pixel_sort_with;
use crate::filters::scanline::ScanlineExecutor;

pub const DEFAULT_LOW: f64 = 0.3;
pub const DEFAULT_HIGH: f64 = 0.7;
pub const DEFAULT_BLOCK_SIZE: usize = 4;

/// Which output to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    /// Per-pixel mask; `block_size` is ignored.
    #[serde(rename = "lmask")]
    LuminanceMask,
    /// Block-averaged mask.
    #[serde(rename = "plmask")]
    PixelatedMask,
    /// Image sorted by its pixelated mask.
    #[serde(rename = "pixelsort")]
    PixelSort,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    pub low: f64,
    pub high: f64,
    pub reversed: bool,
    pub block_size: usize,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            low: DEFAULT_LOW,
            high: DEFAULT_HIGH,
            reversed: false,
            block_size: DEFAULT_BLOCK_SIZE,
        }
    }
}

impl EffectConfig {
    pub fn threshold_range(&self) -> Result<ThresholdRange> {
        ThresholdRange::new(self.low, self.high, self.reversed)
    }

    /// Check the band and the block size together.
    pub fn validate(&self) -> Result<ThresholdRange> {
        let range = self.threshold_range()?;
        if self.block_size == 0 {
            return Err(PixelError::InvalidBlockSize(self.block_size));
        }
        Ok(range)
    }
}

/// Run `effect` on `src` with rayon's global pool.
pub fn apply(effect: Effect, src: &PixelBuffer, config: &EffectConfig) -> Result<PixelBuffer> {
    apply_with(&ScanlineExecutor::global(), effect, src, config)
}

pub fn apply_with(
    executor: &ScanlineExecutor,
    effect: Effect,
    src: &PixelBuffer,
    config: &EffectConfig,
) -> Result<PixelBuffer> {
    match effect {
        Effect::LuminanceMask => {
            let range = config.threshold_range()?;
            Ok(generate_plain_mask_with(executor, src, &range))
        }
        Effect::PixelatedMask => {
            let range = config.validate()?;
            generate_pixelated_mask_with(executor, src, &range, config.block_size)
        }
        Effect::PixelSort => {
            let range = config.validate()?;
            pixel_sort_with(executor, src, &range, config.block_size)
        }
    }
}
