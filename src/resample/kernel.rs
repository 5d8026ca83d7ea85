use std::f64::consts::PI;

use crate::foundation::error::{OverlayError, OverlayResult};

/// Interpolation kernel used when deriving chroma-sized planes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleKernel {
    /// Nearest neighbour.
    Point,
    /// Triangle filter.
    Bilinear,
    /// Mitchell-Netravali cubic (`b = c = 1/3`).
    #[default]
    Bicubic,
    /// Three-lobe Lanczos.
    Lanczos,
    /// Spline36.
    Spline36,
}

impl ResampleKernel {
    /// Half-width of the kernel in source samples at unit scale.
    pub fn support(self) -> f64 {
        match self {
            Self::Point => 0.5,
            Self::Bilinear => 1.0,
            Self::Bicubic => 2.0,
            Self::Lanczos | Self::Spline36 => 3.0,
        }
    }

    /// Kernel weight at distance `t`.
    pub fn weight(self, t: f64) -> f64 {
        let a = t.abs();
        match self {
            Self::Point => {
                if (-0.5..0.5).contains(&t) {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Bilinear => (1.0 - a).max(0.0),
            Self::Bicubic => mitchell(a, 1.0 / 3.0, 1.0 / 3.0),
            Self::Lanczos => {
                if a >= 3.0 {
                    0.0
                } else {
                    sinc(a) * sinc(a / 3.0)
                }
            }
            Self::Spline36 => spline36(a),
        }
    }
}

impl std::str::FromStr for ResampleKernel {
    type Err = OverlayError;

    fn from_str(s: &str) -> OverlayResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "point" | "nearest" => Ok(Self::Point),
            "bilinear" => Ok(Self::Bilinear),
            "bicubic" => Ok(Self::Bicubic),
            "lanczos" | "lanczos3" => Ok(Self::Lanczos),
            "spline36" => Ok(Self::Spline36),
            other => Err(OverlayError::invalid_argument(format!(
                "unknown resample kernel '{other}'"
            ))),
        }
    }
}

fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

fn mitchell(a: f64, b: f64, c: f64) -> f64 {
    if a < 1.0 {
        ((12.0 - 9.0 * b - 6.0 * c) * a.powi(3)
            + (-18.0 + 12.0 * b + 6.0 * c) * a.powi(2)
            + (6.0 - 2.0 * b))
            / 6.0
    } else if a < 2.0 {
        ((-b - 6.0 * c) * a.powi(3)
            + (6.0 * b + 30.0 * c) * a.powi(2)
            + (-12.0 * b - 48.0 * c) * a
            + (8.0 * b + 24.0 * c))
            / 6.0
    } else {
        0.0
    }
}

fn spline36(a: f64) -> f64 {
    if a < 1.0 {
        ((13.0 / 11.0 * a - 453.0 / 209.0) * a - 3.0 / 209.0) * a + 1.0
    } else if a < 2.0 {
        let t = a - 1.0;
        ((-6.0 / 11.0 * t + 270.0 / 209.0) * t - 156.0 / 209.0) * t
    } else if a < 3.0 {
        let t = a - 2.0;
        ((1.0 / 11.0 * t - 45.0 / 209.0) * t + 26.0 / 209.0) * t
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/resample/kernel.rs"]
mod tests;
