use crate::foundation::error::{OverlayError, OverlayResult};

/// Sample representation of a plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleType {
    /// Unsigned integer samples.
    Integer,
    /// IEEE-754 floating point samples.
    Float,
}

/// Bit depth plus sample type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SampleFormat {
    /// Integer or float.
    pub sample_type: SampleType,
    /// Bits per sample.
    pub bits: u8,
}

impl SampleFormat {
    /// 8-bit unsigned integer samples.
    pub const U8: Self = Self::int(8);
    /// 10-bit unsigned integer samples.
    pub const U10: Self = Self::int(10);
    /// 16-bit unsigned integer samples.
    pub const U16: Self = Self::int(16);
    /// 32-bit float samples in `[0, 1]`.
    pub const F32: Self = Self {
        sample_type: SampleType::Float,
        bits: 32,
    };

    /// Integer format with `bits` bits per sample. Not validated until used.
    pub const fn int(bits: u8) -> Self {
        Self {
            sample_type: SampleType::Integer,
            bits,
        }
    }

    /// `true` for float samples.
    pub fn is_float(self) -> bool {
        self.sample_type == SampleType::Float
    }

    /// Reject depths the operator catalog has no numeric range for.
    pub fn validate(self) -> OverlayResult<()> {
        match self.sample_type {
            SampleType::Integer if (8..=16).contains(&self.bits) => Ok(()),
            SampleType::Float if self.bits == 32 => Ok(()),
            SampleType::Integer => Err(OverlayError::unsupported_format(format!(
                "{}-bit integer samples (supported: 8..=16)",
                self.bits
            ))),
            SampleType::Float => Err(OverlayError::unsupported_format(format!(
                "{}-bit float samples (supported: 32)",
                self.bits
            ))),
        }
    }

    /// Largest storable integer sample. Meaningless for float formats.
    pub(crate) fn int_peak(self) -> u16 {
        if self.is_float() {
            return 1;
        }
        ((1u32 << u32::from(self.bits.min(16))) - 1) as u16
    }
}

impl std::fmt::Display for SampleFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.sample_type {
            SampleType::Integer => write!(f, "{}-bit int", self.bits),
            SampleType::Float => write!(f, "{}-bit float", self.bits),
        }
    }
}

/// Numeric constants the blend formulas are written against.
///
/// For N-bit integers: `neutral = 2^(N-1)`, `peak = 2^N - 1`, `factor = 2^N`.
/// For float: `neutral = 0.5`, `peak = 1.0`, `factor = 1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeDescriptor {
    /// Mid-grey.
    pub neutral: f64,
    /// Largest representable sample value.
    pub peak: f64,
    /// Scale used by the dodge/burn family.
    pub factor: f64,
}

impl RangeDescriptor {
    /// Derive the range constants for a sample format.
    pub fn for_format(format: SampleFormat) -> OverlayResult<Self> {
        format.validate()?;
        if format.is_float() {
            return Ok(Self {
                neutral: 0.5,
                peak: 1.0,
                factor: 1.0,
            });
        }
        let factor = f64::from(1u32 << u32::from(format.bits));
        Ok(Self {
            neutral: factor / 2.0,
            peak: factor - 1.0,
            factor,
        })
    }
}

/// Color family of a multi-plane image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorFamily {
    /// Single luma plane.
    Gray,
    /// Luma plus two (possibly subsampled) chroma planes.
    Yuv,
    /// Three full-resolution color planes.
    Rgb,
}

/// Chroma plane size relative to luma.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChromaSubsampling {
    /// Full-resolution chroma.
    #[default]
    Yuv444,
    /// Half horizontal resolution.
    Yuv422,
    /// Half horizontal and half vertical resolution.
    Yuv420,
    /// Quarter horizontal resolution. Representable, but not compositable.
    Yuv411,
}

impl ChromaSubsampling {
    /// `(log2 horizontal ratio, log2 vertical ratio)`.
    pub fn shifts(self) -> (u32, u32) {
        match self {
            Self::Yuv444 => (0, 0),
            Self::Yuv422 => (1, 0),
            Self::Yuv420 => (1, 1),
            Self::Yuv411 => (2, 0),
        }
    }

    /// `true` when chroma is reduced along either axis.
    pub fn is_subsampled(self) -> bool {
        self != Self::Yuv444
    }
}

/// Full format descriptor of a [`Frame`](crate::Frame).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct FrameFormat {
    /// Gray / YUV / RGB.
    pub family: ColorFamily,
    /// Only meaningful for YUV; other families always use [`ChromaSubsampling::Yuv444`].
    pub subsampling: ChromaSubsampling,
    /// Sample format shared by every plane.
    pub sample: SampleFormat,
    /// Whether a trailing alpha plane is present.
    pub alpha: bool,
}

impl FrameFormat {
    /// Gray format without alpha.
    pub fn gray(sample: SampleFormat) -> Self {
        Self {
            family: ColorFamily::Gray,
            subsampling: ChromaSubsampling::Yuv444,
            sample,
            alpha: false,
        }
    }

    /// Planar RGB without alpha.
    pub fn rgb(sample: SampleFormat) -> Self {
        Self {
            family: ColorFamily::Rgb,
            subsampling: ChromaSubsampling::Yuv444,
            sample,
            alpha: false,
        }
    }

    /// Planar YUV without alpha.
    pub fn yuv(subsampling: ChromaSubsampling, sample: SampleFormat) -> Self {
        Self {
            family: ColorFamily::Yuv,
            subsampling,
            sample,
            alpha: false,
        }
    }

    /// Same format with an alpha plane.
    pub fn with_alpha(mut self) -> Self {
        self.alpha = true;
        self
    }

    /// Number of color (non-alpha) planes.
    pub fn color_planes(self) -> usize {
        match self.family {
            ColorFamily::Gray => 1,
            ColorFamily::Yuv | ColorFamily::Rgb => 3,
        }
    }

    /// Total number of planes including alpha.
    pub fn plane_count(self) -> usize {
        self.color_planes() + usize::from(self.alpha)
    }

    /// `true` for the U/V planes of a YUV format.
    pub fn is_chroma_plane(self, index: usize) -> bool {
        self.family == ColorFamily::Yuv && (index == 1 || index == 2)
    }

    /// Effective subsampling: YUV uses its own, every other family is 4:4:4.
    pub fn effective_subsampling(self) -> ChromaSubsampling {
        match self.family {
            ColorFamily::Yuv => self.subsampling,
            ColorFamily::Gray | ColorFamily::Rgb => ChromaSubsampling::Yuv444,
        }
    }

    /// Dimensions of plane `index` for a frame of luma size `width x height`.
    pub fn plane_dims(self, index: usize, width: u32, height: u32) -> (u32, u32) {
        if self.is_chroma_plane(index) {
            let (sw, sh) = self.effective_subsampling().shifts();
            (width >> sw, height >> sh)
        } else {
            (width, height)
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plane/format.rs"]
mod tests;
