use smallvec::SmallVec;

use crate::foundation::error::{OverlayError, OverlayResult};
use crate::plane::buffer::Plane;
use crate::plane::format::{ColorFamily, FrameFormat};

pub(crate) type PlaneVec = SmallVec<[Plane; 4]>;

/// Multi-plane image: color planes in role order (Y/U/V, R/G/B or gray), then optional alpha.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    format: FrameFormat,
    planes: PlaneVec,
}

impl Frame {
    /// Assemble a frame, checking plane count, sample formats and chroma/alpha dimensions.
    pub fn new(mut format: FrameFormat, planes: Vec<Plane>) -> OverlayResult<Self> {
        format.sample.validate()?;
        if format.family != ColorFamily::Yuv {
            format.subsampling = Default::default();
        }
        if planes.len() != format.plane_count() {
            return Err(OverlayError::invalid_argument(format!(
                "{:?} frame{} expects {} planes, got {}",
                format.family,
                if format.alpha { " with alpha" } else { "" },
                format.plane_count(),
                planes.len()
            )));
        }

        let (width, height) = (planes[0].width(), planes[0].height());
        let (sw, sh) = format.effective_subsampling().shifts();
        if format.family == ColorFamily::Yuv
            && (width % (1 << sw) != 0 || height % (1 << sh) != 0)
        {
            return Err(OverlayError::invalid_argument(format!(
                "{width}x{height} luma is not divisible by the {:?} chroma ratio",
                format.subsampling
            )));
        }

        for (i, p) in planes.iter().enumerate() {
            if p.format() != format.sample {
                return Err(OverlayError::invalid_argument(format!(
                    "plane {i} is {} but frame is {}",
                    p.format(),
                    format.sample
                )));
            }
            let (ew, eh) = format.plane_dims(i, width, height);
            if (p.width(), p.height()) != (ew, eh) {
                return Err(OverlayError::invalid_argument(format!(
                    "plane {i} is {}x{}, expected {ew}x{eh}",
                    p.width(),
                    p.height()
                )));
            }
        }

        Ok(Self {
            format,
            planes: planes.into_iter().collect(),
        })
    }

    /// Single-plane gray frame.
    pub fn gray(plane: Plane) -> OverlayResult<Self> {
        let format = FrameFormat::gray(plane.format());
        Self::new(format, vec![plane])
    }

    /// Frame where every plane is a constant. `values` holds one value per plane.
    pub fn filled(format: FrameFormat, width: u32, height: u32, values: &[f64]) -> OverlayResult<Self> {
        if values.len() != format.plane_count() {
            return Err(OverlayError::invalid_argument(format!(
                "expected {} fill values, got {}",
                format.plane_count(),
                values.len()
            )));
        }
        let planes = values
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let (w, h) = format.plane_dims(i, width, height);
                Plane::filled(w, h, format.sample, v)
            })
            .collect::<OverlayResult<Vec<_>>>()?;
        Self::new(format, planes)
    }

    pub(crate) fn from_parts_unchecked(format: FrameFormat, planes: PlaneVec) -> Self {
        Self { format, planes }
    }

    /// Format descriptor.
    pub fn format(&self) -> FrameFormat {
        self.format
    }

    /// Luma (or first plane) width.
    pub fn width(&self) -> u32 {
        self.planes[0].width()
    }

    /// Luma (or first plane) height.
    pub fn height(&self) -> u32 {
        self.planes[0].height()
    }

    /// All planes in role order.
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// Plane `index`, if present.
    pub fn plane(&self, index: usize) -> Option<&Plane> {
        self.planes.get(index)
    }

    /// Color planes, excluding alpha.
    pub fn color_planes(&self) -> &[Plane] {
        &self.planes[..self.format.color_planes()]
    }

    /// Alpha plane, if the format carries one.
    pub fn alpha(&self) -> Option<&Plane> {
        if self.format.alpha {
            self.planes.last()
        } else {
            None
        }
    }

    /// Consume into planes.
    pub fn into_planes(self) -> Vec<Plane> {
        self.planes.into_vec()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/plane/frame.rs"]
mod tests;
