use crate::foundation::error::{OverlayError, OverlayResult};
use crate::plane::buffer::Plane;
use crate::plane::format::RangeDescriptor;
use crate::plane::frame::Frame;
use crate::resample::resampler::{PlaneResampler, ResampleHints};

/// One mask plane per color plane of `overlay`, each sized like that overlay plane.
///
/// Without a mask every plane is a constant at peak. With a mask, plane 0 weighs the first
/// color plane; the remaining planes come from the mask's own planes, or are resampled
/// from its first plane when the mask has only one plane or `first_plane_only` is set.
pub(crate) fn resolve_mask_planes(
    mask: Option<&Frame>,
    overlay: &Frame,
    first_plane_only: bool,
    resampler: &dyn PlaneResampler,
    hints: ResampleHints,
) -> OverlayResult<Vec<Plane>> {
    let ov_format = overlay.format();
    let Some(mask) = mask else {
        tracing::debug!("no mask supplied, synthesizing an opaque one");
        let peak = RangeDescriptor::for_format(ov_format.sample)?.peak;
        return overlay
            .color_planes()
            .iter()
            .map(|p| Plane::filled(p.width(), p.height(), p.format(), peak))
            .collect();
    };

    let primary = &mask.planes()[0];
    let own_planes = if first_plane_only {
        1
    } else {
        mask.color_planes().len()
    };

    overlay
        .color_planes()
        .iter()
        .enumerate()
        .map(|(i, target)| {
            let (w, h) = (target.width(), target.height());
            if i < own_planes {
                let p = &mask.planes()[i];
                if (p.width(), p.height()) != (w, h) {
                    return Err(OverlayError::invalid_argument(format!(
                        "mask plane {i} is {}x{} but overlay plane {i} is {w}x{h}",
                        p.width(),
                        p.height()
                    )));
                }
                return Ok(p.clone());
            }
            if (primary.width(), primary.height()) == (w, h) {
                Ok(primary.clone())
            } else {
                resampler.resample(primary, w, h, hints)
            }
        })
        .collect()
}

/// Multiply every mask sample by `opacity` (already clamped into `[0, 1]`).
pub(crate) fn scale_opacity(planes: Vec<Plane>, opacity: f64) -> OverlayResult<Vec<Plane>> {
    if opacity >= 1.0 {
        return Ok(planes);
    }
    planes
        .iter()
        .map(|p| {
            let width = p.width() as usize;
            Plane::from_fn(p.width(), p.height(), p.format(), |x, y| {
                p.at((y as usize) * width + (x as usize)) * opacity
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/composite/mask.rs"]
mod tests;
