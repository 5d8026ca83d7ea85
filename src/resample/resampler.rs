use rayon::prelude::*;

use crate::foundation::error::{OverlayError, OverlayResult};
use crate::plane::buffer::Plane;
use crate::resample::kernel::ResampleKernel;

/// Sub-pixel siting of subsampled chroma relative to luma.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChromaPlacement {
    /// Chroma centered between the luma samples it covers (MPEG-1 / JPEG).
    #[default]
    Center,
    /// Horizontally co-sited with the left luma sample (MPEG-2).
    #[serde(alias = "mpeg2")]
    Left,
    /// Co-sited with the top-left luma sample on both axes.
    TopLeft,
}

impl ChromaPlacement {
    /// Whether chroma is co-sited on (horizontal, vertical) axes.
    pub fn cosited(self) -> (bool, bool) {
        match self {
            Self::Center => (false, false),
            Self::Left => (true, false),
            Self::TopLeft => (true, true),
        }
    }
}

impl std::str::FromStr for ChromaPlacement {
    type Err = OverlayError;

    fn from_str(s: &str) -> OverlayResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "center" | "mpeg1" | "jpeg" => Ok(Self::Center),
            "left" | "mpeg2" => Ok(Self::Left),
            "top_left" | "topleft" => Ok(Self::TopLeft),
            other => Err(OverlayError::invalid_argument(format!(
                "unknown chroma placement '{other}'"
            ))),
        }
    }
}

/// Options forwarded to a [`PlaneResampler`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResampleHints {
    /// Interpolation kernel.
    pub kernel: ResampleKernel,
    /// Siting of the destination samples when the destination is chroma-sized.
    pub placement: ChromaPlacement,
}

/// Plane resampling collaborator. Implementations must keep the input's sample format.
pub trait PlaneResampler: Send + Sync {
    /// Resample `plane` to `width x height`.
    fn resample(
        &self,
        plane: &Plane,
        width: u32,
        height: u32,
        hints: ResampleHints,
    ) -> OverlayResult<Plane>;
}

/// Separable CPU resampler (horizontal pass, then vertical pass).
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuResampler;

impl PlaneResampler for CpuResampler {
    fn resample(
        &self,
        plane: &Plane,
        width: u32,
        height: u32,
        hints: ResampleHints,
    ) -> OverlayResult<Plane> {
        if (plane.width(), plane.height()) == (width, height) {
            return Ok(plane.clone());
        }
        if (plane.width() == 0 || plane.height() == 0) && width != 0 && height != 0 {
            return Err(OverlayError::invalid_argument(
                "cannot resample an empty plane to a non-empty size",
            ));
        }

        let (cosite_x, cosite_y) = hints.placement.cosited();
        let taps_x = axis_taps(plane.width(), width, hints.kernel, cosite_x);
        let taps_y = axis_taps(plane.height(), height, hints.kernel, cosite_y);

        let src_w = plane.width() as usize;
        let dst_w = (width as usize).max(1);
        let mut tmp = vec![0f64; dst_w * plane.height() as usize];
        tmp.par_chunks_mut(dst_w)
            .enumerate()
            .for_each(|(y, row)| {
                let base = y * src_w;
                for (x, out) in row.iter_mut().enumerate().take(width as usize) {
                    let t = &taps_x[x];
                    *out = t
                        .weights
                        .iter()
                        .zip(&t.indices)
                        .map(|(w, &i)| w * plane.at(base + i))
                        .sum();
                }
            });

        Plane::from_fn(width, height, plane.format(), |x, y| {
            let t = &taps_y[y as usize];
            t.weights
                .iter()
                .zip(&t.indices)
                .map(|(w, &i)| w * tmp[i * dst_w + x as usize])
                .sum()
        })
    }
}

struct Taps {
    indices: Vec<usize>,
    weights: Vec<f64>,
}

// Destination sample `i` maps to source position `(i + 0.5) * scale - 0.5`; co-siting moves it
// left by `(scale - 1) / 2` so it lands on the first covered source sample.
fn axis_taps(src_len: u32, dst_len: u32, kernel: ResampleKernel, cosited: bool) -> Vec<Taps> {
    if src_len == 0 || dst_len == 0 {
        return Vec::new();
    }
    let scale = f64::from(src_len) / f64::from(dst_len);
    let filter_scale = scale.max(1.0);
    let support = kernel.support() * filter_scale;
    let offset = if cosited { -(scale - 1.0) / 2.0 } else { 0.0 };
    let last = i64::from(src_len) - 1;

    (0..dst_len)
        .map(|i| {
            let center = (f64::from(i) + 0.5) * scale - 0.5 + offset;
            let lo = (center - support).floor() as i64;
            let hi = (center + support).ceil() as i64;
            let mut indices = Vec::with_capacity((hi - lo + 1) as usize);
            let mut weights = Vec::with_capacity(indices.capacity());
            for j in lo..=hi {
                let w = kernel.weight((j as f64 - center) / filter_scale);
                if w != 0.0 {
                    indices.push(j.clamp(0, last) as usize);
                    weights.push(w);
                }
            }
            let sum: f64 = weights.iter().sum();
            if sum.abs() > f64::EPSILON {
                weights.iter_mut().for_each(|w| *w /= sum);
            } else {
                indices = vec![(center.round() as i64).clamp(0, last) as usize];
                weights = vec![1.0];
            }
            Taps { indices, weights }
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/resample/resampler.rs"]
mod tests;
