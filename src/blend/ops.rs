//! Closed-form per-sample operators.
//!
//! Every function takes the base sample `x`, the overlay sample `y` and the range constants of
//! the plane, all in the plane's native numeric range. Division guards are part of the
//! contract: the guarded branch value is what the operator returns at that point.

use std::f64::consts::PI;

use crate::blend::mode::BlendMode;
use crate::plane::format::RangeDescriptor;

/// Signature shared by every operator.
pub(crate) type BlendFn = fn(f64, f64, &RangeDescriptor) -> f64;

/// Operator lookup. `None` for pass-through modes.
pub(crate) fn kernel(mode: BlendMode) -> Option<BlendFn> {
    let f: BlendFn = match mode {
        BlendMode::Normal => return None,
        BlendMode::Add => add,
        BlendMode::Average => average,
        BlendMode::Burn => burn,
        BlendMode::Darken => darken,
        BlendMode::Difference => difference,
        BlendMode::Divide => divide,
        BlendMode::Dodge => dodge,
        BlendMode::Exclusion => exclusion,
        BlendMode::Extremity => extremity,
        BlendMode::Freeze => freeze,
        BlendMode::Glow => glow,
        BlendMode::GrainExtract => grain_extract,
        BlendMode::GrainMerge => grain_merge,
        BlendMode::HardLight => hard_light,
        BlendMode::HardMix => hard_mix,
        BlendMode::Heat => heat,
        BlendMode::Interpolation => interpolation,
        BlendMode::Lighten => lighten,
        BlendMode::LinearAdd => linear_add,
        BlendMode::LinearBurn => linear_burn,
        BlendMode::LinearLight => linear_light,
        BlendMode::LinearSubtract => linear_subtract,
        BlendMode::Multiply => multiply,
        BlendMode::Multiply128 => multiply128,
        BlendMode::Negation => negation,
        BlendMode::Overlay => overlay,
        BlendMode::Phoenix => phoenix,
        BlendMode::PinLight => pin_light,
        BlendMode::Reflect => reflect,
        BlendMode::Screen => screen,
        BlendMode::SoftBurn => soft_burn,
        BlendMode::SoftDodge => soft_dodge,
        BlendMode::SoftLight => soft_light,
        BlendMode::SoftLight2 => soft_light2,
        BlendMode::Subtract => subtract,
        BlendMode::VividLight => vivid_light,
    };
    Some(f)
}

pub(crate) fn add(x: f64, y: f64, _: &RangeDescriptor) -> f64 {
    x + y
}

pub(crate) fn average(x: f64, y: f64, _: &RangeDescriptor) -> f64 {
    (x + y) / 2.0
}

pub(crate) fn burn(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    if y <= 0.0 {
        y
    } else {
        r.peak - (r.peak - x) * r.factor / y
    }
}

pub(crate) fn darken(x: f64, y: f64, _: &RangeDescriptor) -> f64 {
    x.min(y)
}

pub(crate) fn difference(x: f64, y: f64, _: &RangeDescriptor) -> f64 {
    (x - y).abs()
}

pub(crate) fn divide(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    if y <= 0.0 { r.peak } else { r.peak * x / y }
}

pub(crate) fn dodge(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    if y >= r.peak {
        y
    } else {
        x * r.factor / (r.peak - y)
    }
}

pub(crate) fn exclusion(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    x + y - 2.0 * x * y / r.peak
}

pub(crate) fn extremity(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    (r.peak - x - y).abs()
}

pub(crate) fn freeze(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    if y <= 0.0 {
        0.0
    } else {
        r.peak - r.peak.min((r.peak - x).powi(2) / y)
    }
}

pub(crate) fn glow(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    if x >= r.peak {
        x
    } else {
        y * y / (r.peak - x)
    }
}

pub(crate) fn grain_extract(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    x - y + r.neutral
}

pub(crate) fn grain_merge(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    x + y - r.neutral
}

pub(crate) fn hard_light(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    if y < r.neutral {
        2.0 * x * y / r.peak
    } else {
        r.peak - 2.0 * (r.peak - y) * (r.peak - x) / r.peak
    }
}

pub(crate) fn hard_mix(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    if x < r.peak - y { 0.0 } else { r.peak }
}

pub(crate) fn heat(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    if x <= 0.0 {
        0.0
    } else {
        r.peak - r.peak.min((r.peak - y).powi(2) / x)
    }
}

pub(crate) fn interpolation(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    r.peak * (0.5 - (PI * x / r.peak).cos() / 4.0 - (PI * y / r.peak).cos() / 4.0)
}

pub(crate) fn lighten(x: f64, y: f64, _: &RangeDescriptor) -> f64 {
    x.max(y)
}

pub(crate) fn linear_add(x: f64, y: f64, _: &RangeDescriptor) -> f64 {
    x.hypot(y)
}

pub(crate) fn linear_burn(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    if x + y < r.peak { 0.0 } else { x + y - r.peak }
}

pub(crate) fn linear_light(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    if x < r.neutral {
        2.0 * y + x - r.peak
    } else {
        2.0 * (y - r.neutral) + x
    }
}

pub(crate) fn linear_subtract(x: f64, y: f64, _: &RangeDescriptor) -> f64 {
    (x * x - y * y).max(0.0).sqrt()
}

pub(crate) fn multiply(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    x * y / r.peak
}

pub(crate) fn multiply128(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    (x - r.neutral) * y / (r.neutral / 4.0) + r.neutral
}

pub(crate) fn negation(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    r.peak - (r.peak - x - y).abs()
}

pub(crate) fn overlay(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    if x < r.neutral {
        2.0 * x * y / r.peak
    } else {
        r.peak - 2.0 * (r.peak - x) * (r.peak - y) / r.peak
    }
}

pub(crate) fn phoenix(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    x.min(y) - x.max(y) + r.peak
}

pub(crate) fn pin_light(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    if y < r.neutral {
        x.min(2.0 * y)
    } else {
        x.max(2.0 * (y - r.neutral))
    }
}

pub(crate) fn reflect(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    if y >= r.peak {
        y
    } else {
        x * x / (r.peak - y)
    }
}

pub(crate) fn screen(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    r.peak - (r.peak - x) * (r.peak - y) / r.peak
}

// Split on the pair average against neutral, then guard the divisor of whichever side runs.
pub(crate) fn soft_burn(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    if x + y < r.peak {
        if x >= r.peak {
            x
        } else {
            y * r.neutral / (r.peak - x)
        }
    } else if y <= 0.0 {
        x
    } else {
        r.peak - (r.peak - x) * r.neutral / y
    }
}

pub(crate) fn soft_dodge(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    if x + y < r.peak {
        if y >= r.peak {
            y
        } else {
            x * r.neutral / (r.peak - y)
        }
    } else if x <= 0.0 {
        y
    } else {
        r.peak - (r.peak - y) * r.neutral / x
    }
}

pub(crate) fn soft_light(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    x / r.peak * (x + 2.0 * y - x * y / r.neutral)
}

pub(crate) fn soft_light2(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    let p = r.peak;
    if y <= r.neutral {
        x - (p - 2.0 * y) * x * (p - x) / (p * p)
    } else {
        let d = if x <= p / 4.0 {
            ((16.0 * x / p - 12.0) * x / p + 4.0) * x
        } else {
            (x * p).sqrt()
        };
        x + (2.0 * y - p) * (d - x) / p
    }
}

pub(crate) fn subtract(x: f64, y: f64, _: &RangeDescriptor) -> f64 {
    x - y
}

pub(crate) fn vivid_light(x: f64, y: f64, r: &RangeDescriptor) -> f64 {
    if y < r.neutral {
        burn(x, 2.0 * y, r)
    } else {
        dodge(x, 2.0 * (y - r.neutral), r)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/ops.rs"]
mod tests;
