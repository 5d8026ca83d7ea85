use super::*;
use crate::plane::format::SampleFormat;

fn r8() -> RangeDescriptor {
    RangeDescriptor::for_format(SampleFormat::U8).unwrap()
}

fn rf() -> RangeDescriptor {
    RangeDescriptor::for_format(SampleFormat::F32).unwrap()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn every_formula_mode_has_a_kernel() {
    for m in BlendMode::ALL {
        assert_eq!(kernel(m).is_some(), !m.is_passthrough(), "{m}");
    }
}

#[test]
fn multiply_and_screen_match_reference_values() {
    let r = r8();
    assert!(close(multiply(100.0, 200.0, &r), 100.0 * 200.0 / 255.0));
    assert!(close(screen(100.0, 200.0, &r), 255.0 - 155.0 * 55.0 / 255.0));
}

#[test]
fn division_guards_return_their_branch_values() {
    let r = r8();
    assert_eq!(burn(40.0, 0.0, &r), 0.0);
    assert_eq!(divide(40.0, 0.0, &r), 255.0);
    assert_eq!(dodge(40.0, 255.0, &r), 255.0);
    assert_eq!(freeze(40.0, 0.0, &r), 0.0);
    assert_eq!(glow(255.0, 40.0, &r), 255.0);
    assert_eq!(heat(0.0, 40.0, &r), 0.0);
    assert_eq!(reflect(40.0, 255.0, &r), 255.0);
}

#[test]
fn dodge_and_burn_use_factor() {
    let r = r8();
    assert!(close(dodge(100.0, 155.0, &r), 256.0));
    assert!(close(burn(155.0, 200.0, &r), 255.0 - 100.0 * 256.0 / 200.0));
}

#[test]
fn hard_mix_thresholds_on_inverse_overlay() {
    let r = r8();
    assert_eq!(hard_mix(100.0, 154.0, &r), 0.0);
    assert_eq!(hard_mix(101.0, 154.0, &r), 255.0);
}

#[test]
fn grain_pair_is_neutral_centered() {
    let r = r8();
    assert_eq!(grain_extract(77.0, 77.0, &r), 128.0);
    assert_eq!(grain_merge(77.0, 128.0, &r), 77.0);
}

#[test]
fn pin_light_switches_at_neutral() {
    let r = r8();
    assert_eq!(pin_light(10.0, 100.0, &r), 10.0);
    assert_eq!(pin_light(10.0, 200.0, &r), 144.0);
}

#[test]
fn linear_light_keys_on_base() {
    let r = r8();
    assert_eq!(linear_light(100.0, 50.0, &r), 200.0 + 100.0 - 255.0);
    assert_eq!(linear_light(200.0, 150.0, &r), 2.0 * 22.0 + 200.0);
}

#[test]
fn interpolation_endpoints() {
    let r = rf();
    assert!(close(interpolation(0.0, 0.0, &r), 0.0));
    assert!(close(interpolation(1.0, 1.0, &r), 1.0));
    assert!(close(interpolation(0.5, 0.5, &r), 0.5));
}

#[test]
fn soft_light_keeps_mid_grey() {
    let r = rf();
    assert!(close(soft_light(0.5, 0.5, &r), 0.5));
    assert!(close(soft_light2(0.3, 0.5, &r), 0.3));
}

#[test]
fn soft_light2_branches() {
    let r = rf();
    // dark backdrop uses the polynomial, bright backdrop the square root
    assert!(close(soft_light2(0.25, 1.0, &r), 0.5));
    assert!(close(soft_light2(0.64, 1.0, &r), 0.8));
    assert!(close(soft_light2(0.5, 0.0, &r), 0.25));
}

#[test]
fn vivid_light_is_burn_then_dodge() {
    let r = rf();
    assert_eq!(vivid_light(0.5, 0.0, &r), 0.0);
    assert!(close(vivid_light(0.5, 0.25, &r), 0.0));
    assert!(close(vivid_light(0.25, 0.75, &r), 0.5));
    assert_eq!(vivid_light(0.25, 1.0, &r), 1.0);
}

#[test]
fn soft_dodge_branches() {
    let r = rf();
    assert!(close(soft_dodge(0.25, 0.5, &r), 0.25));
    assert!(close(soft_dodge(0.75, 0.5, &r), 1.0 - 0.25 / 0.75));
    assert_eq!(soft_dodge(0.0, 1.0, &r), 1.0);
}

#[test]
fn soft_burn_is_soft_dodge_with_roles_swapped() {
    let r = r8();
    for x in (0..=255).step_by(15) {
        for y in (0..=255).step_by(15) {
            let (x, y) = (f64::from(x), f64::from(y));
            assert_eq!(soft_burn(x, y, &r), soft_dodge(y, x, &r), "x={x} y={y}");
        }
    }
}

#[test]
fn commutative_modes_are_symmetric() {
    let r = r8();
    let symmetric: [BlendFn; 8] = [
        add, average, darken, difference, exclusion, lighten, multiply, screen,
    ];
    for f in symmetric {
        for x in (0..=255).step_by(17) {
            for y in (0..=255).step_by(13) {
                let (x, y) = (f64::from(x), f64::from(y));
                assert!(close(f(x, y, &r), f(y, x, &r)));
            }
        }
    }
}

#[test]
fn kernels_stay_finite_over_the_sample_grid() {
    for r in [r8(), rf()] {
        let steps = 32;
        for m in BlendMode::ALL {
            let Some(f) = kernel(m) else { continue };
            for i in 0..=steps {
                for j in 0..=steps {
                    let x = r.peak * f64::from(i) / f64::from(steps);
                    let y = r.peak * f64::from(j) / f64::from(steps);
                    assert!(f(x, y, &r).is_finite(), "{m} at x={x} y={y}");
                }
            }
        }
    }
}

fn check(cases: &[(BlendFn, f64, f64, f64)], r: &RangeDescriptor) {
    for (i, &(f, x, y, want)) in cases.iter().enumerate() {
        let got = f(x, y, r);
        assert!(close(got, want), "case {i}: f({x}, {y}) = {got}, want {want}");
    }
}

#[test]
fn formula_branches_match_reference_values_8bit() {
    let r = r8();
    check(
        &[
            (exclusion, 100.0, 200.0, 143.13725490196077),
            (extremity, 100.0, 200.0, 45.0),
            (extremity, 30.0, 60.0, 165.0),
            (negation, 30.0, 60.0, 90.0),
            (negation, 200.0, 100.0, 210.0),
            (phoenix, 100.0, 200.0, 155.0),
            (multiply128, 200.0, 64.0, 272.0),
            (multiply128, 64.0, 64.0, 0.0),
            (linear_add, 30.0, 40.0, 50.0),
            (linear_burn, 200.0, 100.0, 45.0),
            (linear_burn, 100.0, 100.0, 0.0),
            (linear_subtract, 50.0, 30.0, 40.0),
            (linear_subtract, 30.0, 50.0, 0.0),
            (overlay, 100.0, 200.0, 156.86274509803923),
            (overlay, 200.0, 100.0, 188.13725490196077),
            (hard_light, 200.0, 100.0, 156.86274509803923),
            (hard_light, 100.0, 200.0, 188.13725490196077),
            (divide, 100.0, 200.0, 127.5),
            (freeze, 200.0, 100.0, 224.75),
            (freeze, 100.0, 200.0, 134.875),
            (freeze, 10.0, 100.0, 0.0),
            (heat, 100.0, 200.0, 224.75),
            (glow, 200.0, 100.0, 181.8181818181818),
            (reflect, 200.0, 100.0, 258.06451612903226),
            (soft_burn, 30.0, 60.0, 34.13333333333333),
            (soft_burn, 100.0, 200.0, 155.8),
        ],
        &r,
    );
}

#[test]
fn formula_branches_match_reference_values_float() {
    let r = rf();
    check(
        &[
            (exclusion, 0.25, 0.5, 0.5),
            (extremity, 0.25, 0.5, 0.25),
            (negation, 0.75, 0.5, 0.75),
            (phoenix, 0.25, 0.75, 0.5),
            (multiply128, 0.75, 0.25, 1.0),
            (linear_add, 0.3, 0.4, 0.5),
            (linear_burn, 0.75, 0.5, 0.25),
            (linear_subtract, 0.5, 0.3, 0.4),
            (overlay, 0.25, 0.5, 0.25),
            (overlay, 0.75, 0.5, 0.75),
            (hard_light, 0.75, 0.25, 0.375),
            (hard_light, 0.5, 0.75, 0.75),
            (divide, 0.25, 0.5, 0.5),
            (freeze, 0.75, 0.5, 0.875),
            (heat, 0.5, 0.75, 0.875),
            (glow, 0.5, 0.25, 0.125),
            (reflect, 0.5, 0.25, 1.0 / 3.0),
            (soft_burn, 0.25, 0.25, 1.0 / 6.0),
            (soft_burn, 0.5, 0.75, 2.0 / 3.0),
        ],
        &r,
    );
}
