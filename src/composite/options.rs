use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use crate::blend::mode::BlendMode;
use crate::foundation::error::{OverlayError, OverlayResult};
use crate::resample::kernel::ResampleKernel;
use crate::resample::resampler::{ChromaPlacement, ResampleHints};

/// Parameters of one [`composite`](crate::composite) call.
///
/// Deserializes from JSON with every field optional:
///
/// ```json
/// { "mode": "softlight", "opacity": 0.5, "x": 16, "y": 8, "chroma": false }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompositeOptions {
    /// Blend operator.
    pub mode: BlendMode,
    /// Mask scale, clamped into `[0, 1]`.
    pub opacity: f64,
    /// Horizontal offset of the overlay's left edge on the base.
    pub x: i64,
    /// Vertical offset of the overlay's top edge on the base.
    pub y: i64,
    /// Blend the chroma planes of YUV frames. When `false` the base chroma is kept.
    pub chroma: bool,
    /// Derive chroma mask weights from the first mask plane even when the mask has more.
    pub mask_first_plane_only: bool,
    /// Chroma siting used when deriving chroma-sized mask planes.
    pub chroma_placement: ChromaPlacement,
    /// Kernel used when deriving chroma-sized mask planes.
    pub chroma_resampler: ResampleKernel,
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self {
            mode: BlendMode::Normal,
            opacity: 1.0,
            x: 0,
            y: 0,
            chroma: true,
            mask_first_plane_only: false,
            chroma_placement: ChromaPlacement::Center,
            chroma_resampler: ResampleKernel::Bicubic,
        }
    }
}

impl CompositeOptions {
    /// Default options with the mode given by name or alias.
    pub fn with_mode_name(name: &str) -> OverlayResult<Self> {
        Ok(Self {
            mode: name.parse()?,
            ..Self::default()
        })
    }

    /// Parse options from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> OverlayResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| OverlayError::serde(format!("parse composite options JSON: {e}")))
    }

    /// Parse options from a JSON string.
    pub fn from_json_str(s: &str) -> OverlayResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    /// Parse options from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> OverlayResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open composite options JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Opacity clamped into `[0, 1]`. NaN is rejected.
    pub fn clamped_opacity(&self) -> OverlayResult<f64> {
        if self.opacity.is_nan() {
            return Err(OverlayError::invalid_argument("opacity must be a number"));
        }
        Ok(self.opacity.clamp(0.0, 1.0))
    }

    /// Hints forwarded to the chroma resampler.
    pub fn resample_hints(&self) -> ResampleHints {
        ResampleHints {
            kernel: self.chroma_resampler,
            placement: self.chroma_placement,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/options.rs"]
mod tests;
