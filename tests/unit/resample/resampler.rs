use super::*;
use crate::plane::format::SampleFormat;

fn hints(kernel: ResampleKernel, placement: ChromaPlacement) -> ResampleHints {
    ResampleHints { kernel, placement }
}

#[test]
fn identity_size_is_a_copy() {
    let p = Plane::from_fn(6, 4, SampleFormat::U8, |x, y| f64::from(x + y)).unwrap();
    let out = CpuResampler
        .resample(&p, 6, 4, ResampleHints::default())
        .unwrap();
    assert_eq!(out, p);
}

#[test]
fn constant_planes_stay_constant_for_every_kernel() {
    let p = Plane::filled(16, 8, SampleFormat::U10, 700.0).unwrap();
    for kernel in [
        ResampleKernel::Point,
        ResampleKernel::Bilinear,
        ResampleKernel::Bicubic,
        ResampleKernel::Lanczos,
        ResampleKernel::Spline36,
    ] {
        for placement in [
            ChromaPlacement::Center,
            ChromaPlacement::Left,
            ChromaPlacement::TopLeft,
        ] {
            let out = CpuResampler
                .resample(&p, 8, 4, hints(kernel, placement))
                .unwrap();
            assert_eq!((out.width(), out.height()), (8, 4));
            for y in 0..4 {
                for x in 0..8 {
                    assert_eq!(out.get(x, y), Some(700.0), "{kernel:?} {placement:?}");
                }
            }
        }
    }
}

#[test]
fn center_point_halving_box_filters_pairs() {
    let p = Plane::from_fn(4, 1, SampleFormat::F32, |x, _| if x % 2 == 0 { 0.0 } else { 1.0 })
        .unwrap();
    let out = CpuResampler
        .resample(&p, 2, 1, hints(ResampleKernel::Point, ChromaPlacement::Center))
        .unwrap();
    assert!((out.get(0, 0).unwrap() - 0.5).abs() < 1e-6);
    assert!((out.get(1, 0).unwrap() - 0.5).abs() < 1e-6);
}

#[test]
fn cosited_placement_shifts_sampling_onto_even_columns() {
    let ramp = Plane::from_fn(8, 1, SampleFormat::U8, |x, _| f64::from(x * 10)).unwrap();
    let left = CpuResampler
        .resample(&ramp, 4, 1, hints(ResampleKernel::Bilinear, ChromaPlacement::Left))
        .unwrap();
    let center = CpuResampler
        .resample(&ramp, 4, 1, hints(ResampleKernel::Bilinear, ChromaPlacement::Center))
        .unwrap();
    for x in 1..=2u32 {
        assert_eq!(left.get(x, 0), Some(f64::from(x * 20)));
        assert_eq!(center.get(x, 0), Some(f64::from(x * 20 + 5)));
    }
}

#[test]
fn output_keeps_sample_format() {
    let p = Plane::filled(4, 4, SampleFormat::U16, 1.0).unwrap();
    let out = CpuResampler
        .resample(&p, 2, 2, ResampleHints::default())
        .unwrap();
    assert_eq!(out.format(), SampleFormat::U16);
}

#[test]
fn placement_parses_aliases() {
    assert_eq!("mpeg2".parse::<ChromaPlacement>().unwrap(), ChromaPlacement::Left);
    assert_eq!("TopLeft".parse::<ChromaPlacement>().unwrap(), ChromaPlacement::TopLeft);
    assert!("bottom".parse::<ChromaPlacement>().is_err());
}
