use crate::foundation::error::{OverlayError, OverlayResult};
use crate::plane::buffer::Plane;
use crate::plane::format::RangeDescriptor;

/// Weighted merge: `base * (1 - m / peak) + blended * (m / peak)` per sample.
///
/// All three planes must share dimensions and sample format. A zero weight yields `base`
/// and a full weight yields `blended` exactly, even when the other side is not finite.
pub fn merge_masked(base: &Plane, blended: &Plane, mask: &Plane) -> OverlayResult<Plane> {
    if !base.same_shape(blended) || !base.same_shape(mask) {
        return Err(OverlayError::invalid_argument(format!(
            "merge expects equal planes: base {}x{}, blended {}x{}, mask {}x{}",
            base.width(),
            base.height(),
            blended.width(),
            blended.height(),
            mask.width(),
            mask.height()
        )));
    }
    let peak = RangeDescriptor::for_format(base.format())?.peak;
    let width = base.width() as usize;
    Plane::from_fn(base.width(), base.height(), base.format(), |x, y| {
        let idx = (y as usize) * width + (x as usize);
        let w = mask.at(idx) / peak;
        if w <= 0.0 {
            base.at(idx)
        } else if w >= 1.0 {
            blended.at(idx)
        } else {
            base.at(idx) * (1.0 - w) + blended.at(idx) * w
        }
    })
}

#[cfg(test)]
#[path = "../../tests/unit/composite/merge.rs"]
mod tests;
