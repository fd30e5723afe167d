//! Transfer functions (OETF/EOTF).
//!
//! Encode/decode curves used by display views and by the gamma-aware
//! inversion kernel.
//!
//! - Pure gamma: 2.2 (legacy CRT approximation), 2.4 (BT.1886 reference)
//! - sRGB: IEC 61966-2-1 piecewise curve
//!
//! # Range
//!
//! Input/output are [0, 1]. Negative values map to 0.

use serde::{Deserialize, Serialize};

/// EOTF for arbitrary gamma: `v^gamma`
///
/// # Example
///
/// ```rust
/// use nande_color::transfer::gamma_eotf;
///
/// let linear = gamma_eotf(0.5, 2.2);
/// assert!((linear - 0.218).abs() < 0.001);
/// ```
#[inline]
pub fn gamma_eotf(v: f32, gamma: f32) -> f32 {
    if v <= 0.0 { 0.0 } else { v.powf(gamma) }
}

/// OETF for arbitrary gamma: `l^(1/gamma)`
#[inline]
pub fn gamma_oetf(l: f32, gamma: f32) -> f32 {
    if l <= 0.0 { 0.0 } else { l.powf(1.0 / gamma) }
}

/// Gamma 2.2 EOTF.
#[inline]
pub fn eotf_22(v: f32) -> f32 {
    gamma_eotf(v, 2.2)
}

/// Gamma 2.2 OETF.
#[inline]
pub fn oetf_22(l: f32) -> f32 {
    gamma_oetf(l, 2.2)
}

/// sRGB EOTF: decodes sRGB to linear light.
///
/// ```rust
/// use nande_color::transfer::srgb_eotf;
///
/// let linear = srgb_eotf(0.5);
/// assert!((linear - 0.214).abs() < 0.01);
/// ```
#[inline]
pub fn srgb_eotf(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB OETF: encodes linear light to sRGB.
#[inline]
pub fn srgb_oetf(l: f32) -> f32 {
    if l <= 0.0031308 {
        l.max(0.0) * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

/// Encoding curve applied by a display view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferFunction {
    /// Identity.
    Linear,
    /// sRGB piecewise curve.
    #[default]
    Srgb,
    /// Pure gamma 2.2.
    Gamma22,
    /// Pure gamma 2.4 (BT.1886).
    Gamma24,
}

impl TransferFunction {
    /// Linear light to encoded.
    #[inline]
    pub fn encode(self, l: f32) -> f32 {
        match self {
            Self::Linear => l,
            Self::Srgb => srgb_oetf(l),
            Self::Gamma22 => gamma_oetf(l, 2.2),
            Self::Gamma24 => gamma_oetf(l, 2.4),
        }
    }

    /// Encoded to linear light.
    #[inline]
    pub fn decode(self, v: f32) -> f32 {
        match self {
            Self::Linear => v,
            Self::Srgb => srgb_eotf(v),
            Self::Gamma22 => gamma_eotf(v, 2.2),
            Self::Gamma24 => gamma_eotf(v, 2.4),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_gamma22_inverse() {
        for v in [0.0, 0.1, 0.5, 0.9, 1.0] {
            assert_abs_diff_eq!(oetf_22(eotf_22(v)), v, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_srgb_segments() {
        assert_abs_diff_eq!(srgb_eotf(0.04), 0.04 / 12.92, epsilon = 1e-7);
        assert_abs_diff_eq!(srgb_oetf(srgb_eotf(0.7)), 0.7, epsilon = 1e-5);
        assert_eq!(srgb_oetf(-0.5), 0.0);
    }

    #[test]
    fn test_enum_dispatch() {
        assert_eq!(TransferFunction::Linear.encode(0.3), 0.3);
        assert_abs_diff_eq!(TransferFunction::Gamma24.encode(1.0), 1.0);
        assert_abs_diff_eq!(
            TransferFunction::Gamma22.decode(0.5),
            eotf_22(0.5),
            epsilon = 1e-7
        );
    }
}
