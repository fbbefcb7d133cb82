//! Luminance model and threshold band.
//!
//! Uses ITU-R BT.709 relative luminance on 8-bit RGB, normalized to
//! 0.0-1.0. Alpha never contributes.
//!
//! ## Band membership
//!
//! | Range    | "in" when             |
//! |----------|-----------------------|
//! | inner    | `low < l < high`      |
//! | outer    | `l <= low \|\| l >= high` |
//!
//! Outer is the exact complement of inner, and the same predicate is
//! used for single pixels and for block averages.

use serde::{Deserialize, Serialize};

use crate::error::{PixelError, Result};

/// ITU-R BT.709 luminosity coefficients
pub const LUMA_R: f64 = 0.2126;
pub const LUMA_G: f64 = 0.7152;
pub const LUMA_B: f64 = 0.0722;

/// Normalized luminance of an RGB triple, 0.0-1.0.
#[inline]
pub fn luminance(r: u8, g: u8, b: u8) -> f64 {
    LUMA_R * (r as f64 / 255.0) + LUMA_G * (g as f64 / 255.0) + LUMA_B * (b as f64 / 255.0)
}

/// Luminance of an RGBA pixel (alpha ignored).
#[inline]
pub fn pixel_luminance(px: &[u8]) -> f64 {
    luminance(px[0], px[1], px[2])
}

/// Validated luminance band.
///
/// Always satisfies `0 <= low < high <= 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRange", into = "RawRange")]
pub struct ThresholdRange {
    low: f64,
    high: f64,
    reversed: bool,
}

#[derive(Serialize, Deserialize)]
struct RawRange {
    low: f64,
    high: f64,
    #[serde(default)]
    reversed: bool,
}

impl TryFrom<RawRange> for ThresholdRange {
    type Error = PixelError;

    fn try_from(raw: RawRange) -> Result<Self> {
        ThresholdRange::new(raw.low, raw.high, raw.reversed)
    }
}

impl From<ThresholdRange> for RawRange {
    fn from(range: ThresholdRange) -> Self {
        RawRange {
            low: range.low,
            high: range.high,
            reversed: range.reversed,
        }
    }
}

impl ThresholdRange {
    /// # Arguments
    /// * `low` - Lower bound, 0.0-1.0
    /// * `high` - Upper bound, 0.0-1.0, strictly above `low`
    /// * `reversed` - Select luminance outside the band instead of inside
    pub fn new(low: f64, high: f64, reversed: bool) -> Result<Self> {
        let valid = low.is_finite()
            && high.is_finite()
            && (0.0..=1.0).contains(&low)
            && (0.0..=1.0).contains(&high)
            && low < high;
        if !valid {
            return Err(PixelError::InvalidThreshold { low, high });
        }
        Ok(Self { low, high, reversed })
    }

    /// Band selecting luminance strictly between `low` and `high`.
    pub fn inner(low: f64, high: f64) -> Result<Self> {
        Self::new(low, high, false)
    }

    /// Band selecting luminance at or outside `low` and `high`.
    pub fn outer(low: f64, high: f64) -> Result<Self> {
        Self::new(low, high, true)
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    pub fn reversed(&self) -> bool {
        self.reversed
    }

    #[inline]
    pub fn contains(&self, luminance: f64) -> bool {
        let inside = self.low < luminance && luminance < self.high;
        inside != self.reversed
    }
}

/// Whether `luminance` is "in" for `range`.
#[inline]
pub fn is_in_band(luminance: f64, range: &ThresholdRange) -> bool {
    range.contains(luminance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_extremes() {
        assert_eq!(luminance(0, 0, 0), 0.0);
        assert!((luminance(255, 255, 255) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_luminance_channel_weights() {
        assert!((luminance(255, 0, 0) - LUMA_R).abs() < 1e-12);
        assert!((luminance(0, 255, 0) - LUMA_G).abs() < 1e-12);
        assert!((luminance(0, 0, 255) - LUMA_B).abs() < 1e-12);
    }

    #[test]
    fn test_pixel_luminance_ignores_alpha() {
        assert_eq!(pixel_luminance(&[40, 80, 120, 0]), pixel_luminance(&[40, 80, 120, 255]));
    }

    #[test]
    fn test_range_validation() {
        assert!(ThresholdRange::inner(0.0, 1.0).is_ok());
        assert!(ThresholdRange::inner(0.5, 0.5).is_err());
        assert!(ThresholdRange::inner(0.6, 0.2).is_err());
        assert!(ThresholdRange::inner(-0.1, 0.5).is_err());
        assert!(ThresholdRange::inner(0.1, 1.5).is_err());
        assert!(ThresholdRange::inner(f64::NAN, 0.5).is_err());
    }

    #[test]
    fn test_inner_band_is_strict() {
        let range = ThresholdRange::inner(0.2, 0.6).unwrap();
        assert!(!is_in_band(0.2, &range));
        assert!(is_in_band(0.2001, &range));
        assert!(is_in_band(0.5999, &range));
        assert!(!is_in_band(0.6, &range));
        assert!(!is_in_band(0.0, &range));
    }

    #[test]
    fn test_outer_band_includes_bounds() {
        let range = ThresholdRange::outer(0.2, 0.6).unwrap();
        assert!(is_in_band(0.2, &range));
        assert!(is_in_band(0.6, &range));
        assert!(is_in_band(0.0, &range));
        assert!(is_in_band(1.0, &range));
        assert!(!is_in_band(0.4, &range));
    }

    #[test]
    fn test_outer_is_complement_of_inner() {
        let inner = ThresholdRange::inner(0.25, 0.75).unwrap();
        let outer = ThresholdRange::outer(0.25, 0.75).unwrap();
        for i in 0..=100 {
            let l = i as f64 / 100.0;
            assert_ne!(inner.contains(l), outer.contains(l), "l = {l}");
        }
    }

    #[test]
    fn test_range_deserialize_validates() {
        let ok: ThresholdRange = serde_json::from_str(r#"{"low":0.1,"high":0.9}"#).unwrap();
        assert!(!ok.reversed());
        let bad = serde_json::from_str::<ThresholdRange>(r#"{"low":0.9,"high":0.1}"#);
        assert!(bad.is_err());
    }
}
