use crate::blend::mode::BlendMode;
use crate::blend::ops::kernel;
use crate::foundation::error::{OverlayError, OverlayResult};
use crate::plane::buffer::Plane;
use crate::plane::format::RangeDescriptor;

/// Apply `mode` to every sample pair of `base` and `overlay`, producing a new plane.
///
/// Both planes must share dimensions and sample format. Integer results are rounded half-up
/// and clamped to `[0, peak]`; float results are stored as computed.
///
/// [`BlendMode::Normal`] returns `overlay` unchanged.
pub fn blend_planes(mode: BlendMode, base: &Plane, overlay: &Plane) -> OverlayResult<Plane> {
    if !base.same_shape(overlay) {
        return Err(OverlayError::invalid_argument(format!(
            "blend planes differ: base {}x{} {} vs overlay {}x{} {}",
            base.width(),
            base.height(),
            base.format(),
            overlay.width(),
            overlay.height(),
            overlay.format()
        )));
    }
    let range = RangeDescriptor::for_format(base.format())?;

    // Dispatch once per plane; the row loop only sees a plain fn pointer.
    let Some(f) = kernel(mode) else {
        return Ok(overlay.clone());
    };
    let width = base.width() as usize;
    Plane::from_fn(base.width(), base.height(), base.format(), |x, y| {
        let idx = (y as usize) * width + (x as usize);
        f(base.at(idx), overlay.at(idx), &range)
    })
}

#[cfg(test)]
#[path = "../../tests/unit/blend/apply.rs"]
mod tests;
