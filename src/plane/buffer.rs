use rayon::prelude::*;

use crate::foundation::error::{OverlayError, OverlayResult};
use crate::foundation::math::{checked_area, quantize_float, quantize_int};
use crate::plane::format::SampleFormat;

/// Typed sample storage. Integer depths 8..=16 share `u16` storage.
#[derive(Clone, Debug, PartialEq)]
pub enum Samples {
    /// Unsigned integer samples, each `<= 2^bits - 1`.
    Int(Vec<u16>),
    /// Float samples, nominally in `[0, 1]`.
    Float(Vec<f32>),
}

/// A single-channel 2-D sample grid. Immutable once built; every operation yields a new plane.
#[derive(Clone, Debug, PartialEq)]
pub struct Plane {
    width: u32,
    height: u32,
    format: SampleFormat,
    samples: Samples,
}

impl Plane {
    /// Wrap integer samples (row-major, no padding).
    pub fn from_int(
        width: u32,
        height: u32,
        format: SampleFormat,
        data: Vec<u16>,
    ) -> OverlayResult<Self> {
        format.validate()?;
        if format.is_float() {
            return Err(OverlayError::invalid_argument(format!(
                "integer samples supplied for {format} plane"
            )));
        }
        expect_len(width, height, data.len())?;
        let peak = format.int_peak();
        if let Some(bad) = data.iter().find(|&&v| v > peak) {
            return Err(OverlayError::invalid_argument(format!(
                "sample value {bad} exceeds {format} peak {peak}"
            )));
        }
        Ok(Self {
            width,
            height,
            format,
            samples: Samples::Int(data),
        })
    }

    /// Wrap 32-bit float samples (row-major, no padding).
    pub fn from_float(width: u32, height: u32, data: Vec<f32>) -> OverlayResult<Self> {
        expect_len(width, height, data.len())?;
        Ok(Self {
            width,
            height,
            format: SampleFormat::F32,
            samples: Samples::Float(data),
        })
    }

    /// Constant plane. `value` is quantized to the format.
    pub fn filled(width: u32, height: u32, format: SampleFormat, value: f64) -> OverlayResult<Self> {
        format.validate()?;
        let len = checked_area(width, height)
            .ok_or_else(|| OverlayError::invalid_argument("plane size overflow"))?;
        let samples = if format.is_float() {
            Samples::Float(vec![quantize_float(value); len])
        } else {
            Samples::Int(vec![quantize_int(value, format.int_peak()); len])
        };
        Ok(Self {
            width,
            height,
            format,
            samples,
        })
    }

    /// Build a plane by evaluating `f(x, y)` for every sample, rows in parallel.
    pub fn from_fn<F>(width: u32, height: u32, format: SampleFormat, f: F) -> OverlayResult<Self>
    where
        F: Fn(u32, u32) -> f64 + Sync,
    {
        format.validate()?;
        let len = checked_area(width, height)
            .ok_or_else(|| OverlayError::invalid_argument("plane size overflow"))?;
        let row_len = (width as usize).max(1);
        let samples = if format.is_float() {
            let mut data = vec![0f32; len];
            data.par_chunks_mut(row_len)
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, v) in row.iter_mut().enumerate() {
                        *v = quantize_float(f(x as u32, y as u32));
                    }
                });
            Samples::Float(data)
        } else {
            let peak = format.int_peak();
            let mut data = vec![0u16; len];
            data.par_chunks_mut(row_len)
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, v) in row.iter_mut().enumerate() {
                        *v = quantize_int(f(x as u32, y as u32), peak);
                    }
                });
            Samples::Int(data)
        };
        Ok(Self {
            width,
            height,
            format,
            samples,
        })
    }

    /// Width in samples.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in samples.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sample format.
    pub fn format(&self) -> SampleFormat {
        self.format
    }

    /// Raw storage.
    pub fn samples(&self) -> &Samples {
        &self.samples
    }

    /// Consume into raw storage.
    pub fn into_samples(self) -> Samples {
        self.samples
    }

    /// Sample at `(x, y)` as `f64`, or `None` when out of bounds.
    pub fn get(&self, x: u32, y: u32) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.at((y as usize) * (self.width as usize) + (x as usize)))
    }

    /// Sample at a row-major index. Caller guarantees bounds.
    #[inline]
    pub(crate) fn at(&self, idx: usize) -> f64 {
        match &self.samples {
            Samples::Int(v) => f64::from(v[idx]),
            Samples::Float(v) => f64::from(v[idx]),
        }
    }

    /// `true` when both planes have equal dimensions and sample format.
    pub fn same_shape(&self, other: &Plane) -> bool {
        self.width == other.width && self.height == other.height && self.format == other.format
    }
}

fn expect_len(width: u32, height: u32, len: usize) -> OverlayResult<()> {
    let expected = checked_area(width, height)
        .ok_or_else(|| OverlayError::invalid_argument("plane size overflow"))?;
    if len != expected {
        return Err(OverlayError::invalid_argument(format!(
            "plane expects {width}x{height} = {expected} samples, got {len}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/plane/buffer.rs"]
mod tests;
