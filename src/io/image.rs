use std::path::Path;

use anyhow::Context;
use image::{DynamicImage, ImageBuffer};

use crate::foundation::error::{OverlayError, OverlayResult};
use crate::plane::buffer::{Plane, Samples};
use crate::plane::format::{ColorFamily, FrameFormat, RangeDescriptor, SampleFormat};
use crate::plane::frame::Frame;

/// Split a decoded image into planes.
///
/// 8- and 16-bit gray/RGB (with or without alpha) keep their depth; 32-bit float RGB(A)
/// becomes an `F32` frame.
pub fn frame_from_image(image: &DynamicImage) -> OverlayResult<Frame> {
    let (width, height) = (image.width(), image.height());
    let gray8 = FrameFormat::gray(SampleFormat::U8);
    let rgb8 = FrameFormat::rgb(SampleFormat::U8);
    let gray16 = FrameFormat::gray(SampleFormat::U16);
    let rgb16 = FrameFormat::rgb(SampleFormat::U16);
    let rgbf = FrameFormat::rgb(SampleFormat::F32);

    let (format, interleaved) = match image {
        DynamicImage::ImageLuma8(b) => (gray8, widen(b.as_raw())),
        DynamicImage::ImageLumaA8(b) => (gray8.with_alpha(), widen(b.as_raw())),
        DynamicImage::ImageRgb8(b) => (rgb8, widen(b.as_raw())),
        DynamicImage::ImageRgba8(b) => (rgb8.with_alpha(), widen(b.as_raw())),
        DynamicImage::ImageLuma16(b) => (gray16, Samples::Int(b.as_raw().clone())),
        DynamicImage::ImageLumaA16(b) => (gray16.with_alpha(), Samples::Int(b.as_raw().clone())),
        DynamicImage::ImageRgb16(b) => (rgb16, Samples::Int(b.as_raw().clone())),
        DynamicImage::ImageRgba16(b) => (rgb16.with_alpha(), Samples::Int(b.as_raw().clone())),
        DynamicImage::ImageRgb32F(b) => (rgbf, Samples::Float(b.as_raw().clone())),
        DynamicImage::ImageRgba32F(b) => (rgbf.with_alpha(), Samples::Float(b.as_raw().clone())),
        other => {
            return Err(OverlayError::unsupported_format(format!(
                "image color type {:?}",
                other.color()
            )));
        }
    };

    let channels = format.plane_count();
    let planes = match interleaved {
        Samples::Int(data) => deinterleave(&data, channels)
            .into_iter()
            .map(|p| Plane::from_int(width, height, format.sample, p))
            .collect::<OverlayResult<Vec<_>>>()?,
        Samples::Float(data) => deinterleave(&data, channels)
            .into_iter()
            .map(|p| Plane::from_float(width, height, p))
            .collect::<OverlayResult<Vec<_>>>()?,
    };
    Frame::new(format, planes)
}

/// Interleave a gray or RGB frame back into an image.
///
/// Integer depths other than 8 and 16 are rescaled to 16 bits. Float gray is widened to
/// float RGB since `image` has no float luma buffer. YUV is rejected.
pub fn frame_to_image(frame: &Frame) -> OverlayResult<DynamicImage> {
    let format = frame.format();
    if format.family == ColorFamily::Yuv {
        return Err(OverlayError::unsupported_format(
            "YUV frames have no image representation",
        ));
    }
    let (w, h) = (frame.width(), frame.height());
    let bad = || OverlayError::invalid_argument("frame samples do not fill its dimensions");
    let order: Vec<usize> = (0..format.plane_count()).collect();
    let gray = format.family == ColorFamily::Gray;

    let image = if format.sample.is_float() {
        let order: &[usize] = match (gray, format.alpha) {
            (true, false) => &[0, 0, 0],
            (true, true) => &[0, 0, 0, 1],
            (false, _) => order.as_slice(),
        };
        let data = interleave(frame, order, |v| v as f32);
        if format.alpha {
            DynamicImage::ImageRgba32F(ImageBuffer::from_raw(w, h, data).ok_or_else(bad)?)
        } else {
            DynamicImage::ImageRgb32F(ImageBuffer::from_raw(w, h, data).ok_or_else(bad)?)
        }
    } else if format.sample.bits == 8 {
        let data = interleave(frame, &order, |v| v as u8);
        match (gray, format.alpha) {
            (true, false) => DynamicImage::ImageLuma8(ImageBuffer::from_raw(w, h, data).ok_or_else(bad)?),
            (true, true) => DynamicImage::ImageLumaA8(ImageBuffer::from_raw(w, h, data).ok_or_else(bad)?),
            (false, false) => DynamicImage::ImageRgb8(ImageBuffer::from_raw(w, h, data).ok_or_else(bad)?),
            (false, true) => DynamicImage::ImageRgba8(ImageBuffer::from_raw(w, h, data).ok_or_else(bad)?),
        }
    } else {
        let peak = RangeDescriptor::for_format(format.sample)?.peak;
        let data = interleave(frame, &order, |v| (v * 65535.0 / peak).round() as u16);
        match (gray, format.alpha) {
            (true, false) => DynamicImage::ImageLuma16(ImageBuffer::from_raw(w, h, data).ok_or_else(bad)?),
            (true, true) => DynamicImage::ImageLumaA16(ImageBuffer::from_raw(w, h, data).ok_or_else(bad)?),
            (false, false) => DynamicImage::ImageRgb16(ImageBuffer::from_raw(w, h, data).ok_or_else(bad)?),
            (false, true) => DynamicImage::ImageRgba16(ImageBuffer::from_raw(w, h, data).ok_or_else(bad)?),
        }
    };
    Ok(image)
}

/// Decode an image file into a frame.
pub fn load_frame(path: impl AsRef<Path>) -> OverlayResult<Frame> {
    let path = path.as_ref();
    let image = image::open(path).with_context(|| format!("open image '{}'", path.display()))?;
    let frame = frame_from_image(&image)?;
    tracing::debug!(
        path = %path.display(),
        width = frame.width(),
        height = frame.height(),
        format = %frame.format().sample,
        "loaded frame"
    );
    Ok(frame)
}

/// Encode a frame to an image file; the container is picked from the extension.
pub fn save_frame(frame: &Frame, path: impl AsRef<Path>) -> OverlayResult<()> {
    let path = path.as_ref();
    frame_to_image(frame)?
        .save(path)
        .with_context(|| format!("write image '{}'", path.display()))?;
    Ok(())
}

fn widen(raw: &[u8]) -> Samples {
    Samples::Int(raw.iter().map(|&v| u16::from(v)).collect())
}

fn deinterleave<T: Copy>(data: &[T], channels: usize) -> Vec<Vec<T>> {
    (0..channels)
        .map(|c| data.iter().skip(c).step_by(channels).copied().collect())
        .collect()
}

fn interleave<T>(frame: &Frame, order: &[usize], conv: impl Fn(f64) -> T) -> Vec<T> {
    let planes = frame.planes();
    let len = frame.width() as usize * frame.height() as usize;
    let mut out = Vec::with_capacity(len * order.len());
    for i in 0..len {
        for &p in order {
            out.push(conv(planes[p].at(i)));
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/io/image.rs"]
mod tests;
