use rayon::prelude::*;

use crate::blend::apply::blend_planes;
use crate::composite::geometry::{PlacementGeometry, crop_pad};
use crate::composite::mask::{resolve_mask_planes, scale_opacity};
use crate::composite::merge::merge_masked;
use crate::composite::options::CompositeOptions;
use crate::foundation::error::{OverlayError, OverlayResult};
use crate::plane::buffer::Plane;
use crate::plane::format::{ChromaSubsampling, ColorFamily, RangeDescriptor};
use crate::plane::frame::{Frame, PlaneVec};
use crate::resample::resampler::{CpuResampler, PlaneResampler};

/// Composite `overlay` onto `base` using the built-in [`CpuResampler`] for mask chroma.
///
/// See [`composite_with`].
pub fn composite(
    base: &Frame,
    overlay: &Frame,
    mask: Option<&Frame>,
    opts: &CompositeOptions,
) -> OverlayResult<Frame> {
    composite_with(base, overlay, mask, opts, &CpuResampler)
}

/// Composite `overlay` onto `base`.
///
/// Stages, in order:
/// 1. validate formats, mask and offsets (nothing is read before this passes)
/// 2. resolve one mask plane per overlay color plane (opaque when `mask` is `None`)
/// 3. crop/pad overlay and mask onto the base grid at `(opts.x, opts.y)`
/// 4. scale the mask by the clamped opacity
/// 5. blend each enabled plane, then merge it over the base through the mask
/// 6. carry the base alpha plane through untouched
///
/// The result has the format and dimensions of `base`.
#[tracing::instrument(
    skip_all,
    fields(mode = %opts.mode, opacity = opts.opacity, x = opts.x, y = opts.y)
)]
pub fn composite_with(
    base: &Frame,
    overlay: &Frame,
    mask: Option<&Frame>,
    opts: &CompositeOptions,
    resampler: &dyn PlaneResampler,
) -> OverlayResult<Frame> {
    validate(base, overlay, mask, opts)?;
    let opacity = opts.clamped_opacity()?;
    let format = base.format();

    let mask_planes = resolve_mask_planes(
        mask,
        overlay,
        opts.mask_first_plane_only,
        resampler,
        opts.resample_hints(),
    )?;

    let geometry = PlacementGeometry::compute(
        base.width(),
        base.height(),
        overlay.width(),
        overlay.height(),
        opts.x,
        opts.y,
    );
    let (overlay_planes, mask_planes) = if geometry.is_identity() {
        tracing::debug!("overlay covers base exactly, skipping placement");
        (overlay.color_planes().to_vec(), mask_planes)
    } else {
        tracing::debug!(?geometry, "placing overlay");
        let (sw, sh) = format.effective_subsampling().shifts();
        let place = |i: usize, p: &Plane| {
            let g = if format.is_chroma_plane(i) {
                geometry.subsampled(sw, sh)
            } else {
                geometry
            };
            crop_pad(p, &g, 0.0)
        };
        let ov = overlay
            .color_planes()
            .iter()
            .enumerate()
            .map(|(i, p)| place(i, p))
            .collect::<OverlayResult<Vec<_>>>()?;
        let mk = mask_planes
            .iter()
            .enumerate()
            .map(|(i, p)| place(i, p))
            .collect::<OverlayResult<Vec<_>>>()?;
        (ov, mk)
    };
    let mask_planes = scale_opacity(mask_planes, opacity)?;

    let color = base.color_planes();
    let mut planes = (0..color.len())
        .into_par_iter()
        .map(|i| {
            if format.is_chroma_plane(i) && !opts.chroma {
                return Ok(color[i].clone());
            }
            let blended = blend_planes(opts.mode, &color[i], &overlay_planes[i])?;
            merge_masked(&color[i], &blended, &mask_planes[i])
        })
        .collect::<OverlayResult<Vec<_>>>()?;
    if !opts.chroma && format.family == ColorFamily::Yuv {
        tracing::debug!("chroma disabled, base chroma copied");
    }

    if let Some(alpha) = base.alpha() {
        planes.push(alpha.clone());
    }
    Ok(Frame::from_parts_unchecked(
        format,
        planes.into_iter().collect::<PlaneVec>(),
    ))
}

fn validate(
    base: &Frame,
    overlay: &Frame,
    mask: Option<&Frame>,
    opts: &CompositeOptions,
) -> OverlayResult<()> {
    let bf = base.format();
    let of = overlay.format();
    RangeDescriptor::for_format(bf.sample)?;

    if bf.family != of.family {
        return Err(OverlayError::invalid_argument(format!(
            "color family mismatch: base is {:?}, overlay is {:?}",
            bf.family, of.family
        )));
    }
    if bf.sample != of.sample {
        return Err(OverlayError::invalid_argument(format!(
            "bit depth mismatch: base is {}, overlay is {}",
            bf.sample, of.sample
        )));
    }
    if bf.effective_subsampling() == ChromaSubsampling::Yuv411 {
        return Err(OverlayError::invalid_argument(
            "4:1:1 chroma subsampling is not supported",
        ));
    }
    if bf.effective_subsampling() != of.effective_subsampling() {
        return Err(OverlayError::invalid_argument(format!(
            "chroma subsampling mismatch: base is {:?}, overlay is {:?}",
            bf.subsampling, of.subsampling
        )));
    }

    if let Some(mask) = mask {
        let mf = mask.format();
        if mf.sample != bf.sample {
            return Err(OverlayError::invalid_argument(format!(
                "mask bit depth mismatch: base is {}, mask is {}",
                bf.sample, mf.sample
            )));
        }
        if (mask.width(), mask.height()) != (overlay.width(), overlay.height()) {
            return Err(OverlayError::invalid_argument(format!(
                "mask is {}x{} but overlay is {}x{}",
                mask.width(),
                mask.height(),
                overlay.width(),
                overlay.height()
            )));
        }
    }

    let (sw, sh) = bf.effective_subsampling().shifts();
    if sh > 0 && opts.y % 2 != 0 {
        return Err(OverlayError::invalid_argument(format!(
            "y offset {} must be even for vertically subsampled chroma",
            opts.y
        )));
    }
    if (sw > 0 || sh > 0) && opts.x % 2 != 0 {
        return Err(OverlayError::invalid_argument(format!(
            "x offset {} must be even for subsampled chroma",
            opts.x
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/composite/compositor.rs"]
mod tests;
