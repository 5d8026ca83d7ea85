/// Round half-up and clamp into `[0, peak]` for integer sample storage.
pub(crate) fn quantize_int(v: f64, peak: u16) -> u16 {
    if !v.is_finite() {
        return if v > 0.0 { peak } else { 0 };
    }
    let r = (v + 0.5).floor();
    r.clamp(0.0, f64::from(peak)) as u16
}

/// Float samples are stored unclamped.
pub(crate) fn quantize_float(v: f64) -> f32 {
    v as f32
}

pub(crate) fn checked_area(width: u32, height: u32) -> Option<usize> {
    (width as usize).checked_mul(height as usize)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
