use super::*;
use crate::plane::format::{ChromaSubsampling, FrameFormat, SampleFormat};
use crate::resample::resampler::CpuResampler;

fn yuv420(w: u32, h: u32, values: [f64; 3]) -> Frame {
    Frame::filled(
        FrameFormat::yuv(ChromaSubsampling::Yuv420, SampleFormat::U8),
        w,
        h,
        &values,
    )
    .unwrap()
}

#[test]
fn missing_mask_is_opaque_and_overlay_sized() {
    let overlay = yuv420(8, 4, [16.0, 128.0, 128.0]);
    let planes =
        resolve_mask_planes(None, &overlay, false, &CpuResampler, ResampleHints::default())
            .unwrap();
    assert_eq!(planes.len(), 3);
    assert_eq!((planes[0].width(), planes[0].height()), (8, 4));
    assert_eq!((planes[1].width(), planes[1].height()), (4, 2));
    assert_eq!(planes[2].get(3, 1), Some(255.0));
}

#[test]
fn gray_mask_is_resampled_to_chroma_size() {
    let overlay = yuv420(8, 4, [16.0, 128.0, 128.0]);
    let mask = Frame::gray(Plane::filled(8, 4, SampleFormat::U8, 100.0).unwrap()).unwrap();
    let planes = resolve_mask_planes(
        Some(&mask),
        &overlay,
        false,
        &CpuResampler,
        ResampleHints::default(),
    )
    .unwrap();
    assert_eq!((planes[1].width(), planes[1].height()), (4, 2));
    assert_eq!(planes[1].get(0, 0), Some(100.0));
}

#[test]
fn multi_plane_mask_uses_its_own_chroma_unless_first_plane_only() {
    let overlay = yuv420(8, 4, [16.0, 128.0, 128.0]);
    let mask = yuv420(8, 4, [200.0, 10.0, 20.0]);

    let own = resolve_mask_planes(
        Some(&mask),
        &overlay,
        false,
        &CpuResampler,
        ResampleHints::default(),
    )
    .unwrap();
    assert_eq!(own[1].get(0, 0), Some(10.0));
    assert_eq!(own[2].get(0, 0), Some(20.0));

    let broadcast = resolve_mask_planes(
        Some(&mask),
        &overlay,
        true,
        &CpuResampler,
        ResampleHints::default(),
    )
    .unwrap();
    assert_eq!(broadcast[0].get(0, 0), Some(200.0));
    assert_eq!(broadcast[1].get(0, 0), Some(200.0));
    assert_eq!(broadcast[2].get(1, 1), Some(200.0));
}

#[test]
fn mismatched_mask_chroma_is_rejected() {
    let overlay = yuv420(8, 4, [16.0, 128.0, 128.0]);
    let mask = Frame::filled(
        FrameFormat::yuv(ChromaSubsampling::Yuv444, SampleFormat::U8),
        8,
        4,
        &[1.0, 2.0, 3.0],
    )
    .unwrap();
    let err = resolve_mask_planes(
        Some(&mask),
        &overlay,
        false,
        &CpuResampler,
        ResampleHints::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("mask plane 1"));
}

#[test]
fn opacity_scales_every_sample() {
    let planes = vec![Plane::filled(2, 2, SampleFormat::U8, 200.0).unwrap()];
    let scaled = scale_opacity(planes.clone(), 0.5).unwrap();
    assert_eq!(scaled[0].get(1, 1), Some(100.0));
    assert_eq!(scale_opacity(planes.clone(), 1.0).unwrap(), planes);
    assert_eq!(scale_opacity(planes, 0.0).unwrap()[0].get(0, 0), Some(0.0));
}
