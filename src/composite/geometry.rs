use crate::foundation::error::{OverlayError, OverlayResult};
use crate::plane::buffer::Plane;

/// Per-edge sample counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Edges {
    /// Left edge.
    pub left: u32,
    /// Top edge.
    pub top: u32,
    /// Right edge.
    pub right: u32,
    /// Bottom edge.
    pub bottom: u32,
}

impl Edges {
    fn is_zero(self) -> bool {
        self == Self::default()
    }

    fn shifted(self, sx: u32, sy: u32) -> Self {
        Self {
            left: self.left >> sx,
            top: self.top >> sy,
            right: self.right >> sx,
            bottom: self.bottom >> sy,
        }
    }
}

/// Crop then pad amounts that align an overlay onto a base at a given offset.
///
/// Applying `crop` and then `pad` to an overlay-sized plane yields a base-sized plane whose
/// sample `(x + i, y + j)` is overlay sample `(i, j)` wherever both lie in bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlacementGeometry {
    /// Samples removed from the overlay.
    pub crop: Edges,
    /// Samples added around the cropped overlay.
    pub pad: Edges,
}

impl PlacementGeometry {
    /// Geometry for an `overlay_w x overlay_h` overlay whose top-left lands on base `(x, y)`.
    pub fn compute(
        base_w: u32,
        base_h: u32,
        overlay_w: u32,
        overlay_h: u32,
        x: i64,
        y: i64,
    ) -> Self {
        let (left_crop, right_crop, left_pad, right_pad) = axis(base_w, overlay_w, x);
        let (top_crop, bottom_crop, top_pad, bottom_pad) = axis(base_h, overlay_h, y);
        Self {
            crop: Edges {
                left: left_crop,
                top: top_crop,
                right: right_crop,
                bottom: bottom_crop,
            },
            pad: Edges {
                left: left_pad,
                top: top_pad,
                right: right_pad,
                bottom: bottom_pad,
            },
        }
    }

    /// `true` when the overlay already covers the base exactly.
    pub fn is_identity(&self) -> bool {
        self.crop.is_zero() && self.pad.is_zero()
    }

    /// Geometry for a plane subsampled by `(1 << sx, 1 << sy)`.
    pub fn subsampled(&self, sx: u32, sy: u32) -> Self {
        Self {
            crop: self.crop.shifted(sx, sy),
            pad: self.pad.shifted(sx, sy),
        }
    }
}

// Returns (crop_lo, crop_hi, pad_lo, pad_hi) such that pad_lo + kept + pad_hi == base.
fn axis(base: u32, overlay: u32, offset: i64) -> (u32, u32, u32, u32) {
    let (base_i, overlay_i) = (i64::from(base), i64::from(overlay));
    let crop_lo = offset.saturating_neg().clamp(0, overlay_i);
    let crop_hi = offset
        .saturating_add(overlay_i - base_i)
        .clamp(0, overlay_i - crop_lo);
    let kept = overlay_i - crop_lo - crop_hi;
    let pad_lo = offset.clamp(0, base_i - kept);
    let pad_hi = base_i - pad_lo - kept;
    (crop_lo as u32, crop_hi as u32, pad_lo as u32, pad_hi as u32)
}

/// Crop `plane` by `geometry.crop`, then surround it with `pad_value` by `geometry.pad`.
pub fn crop_pad(plane: &Plane, geometry: &PlacementGeometry, pad_value: f64) -> OverlayResult<Plane> {
    let PlacementGeometry { crop, pad } = *geometry;
    let kept_w = plane
        .width()
        .checked_sub(crop.left)
        .and_then(|v| v.checked_sub(crop.right))
        .ok_or_else(|| OverlayError::invalid_argument("horizontal crop exceeds plane width"))?;
    let kept_h = plane
        .height()
        .checked_sub(crop.top)
        .and_then(|v| v.checked_sub(crop.bottom))
        .ok_or_else(|| OverlayError::invalid_argument("vertical crop exceeds plane height"))?;
    let out_w = pad
        .left
        .checked_add(kept_w)
        .and_then(|v| v.checked_add(pad.right))
        .ok_or_else(|| OverlayError::invalid_argument("padded width overflow"))?;
    let out_h = pad
        .top
        .checked_add(kept_h)
        .and_then(|v| v.checked_add(pad.bottom))
        .ok_or_else(|| OverlayError::invalid_argument("padded height overflow"))?;

    let src_w = plane.width() as usize;
    Plane::from_fn(out_w, out_h, plane.format(), |x, y| {
        let inside = x >= pad.left && x < pad.left + kept_w && y >= pad.top && y < pad.top + kept_h;
        if !inside {
            return pad_value;
        }
        let sx = (x - pad.left + crop.left) as usize;
        let sy = (y - pad.top + crop.top) as usize;
        plane.at(sy * src_w + sx)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/composite/geometry.rs"]
mod tests;
