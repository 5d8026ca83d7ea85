use super::*;

#[test]
fn empty_json_yields_defaults() {
    let opts = CompositeOptions::from_json_str("{}").unwrap();
    assert_eq!(opts, CompositeOptions::default());
    assert_eq!(opts.mode, BlendMode::Normal);
    assert_eq!(opts.opacity, 1.0);
    assert!(opts.chroma);
}

#[test]
fn json_fields_override_defaults() {
    let opts = CompositeOptions::from_json_str(
        r#"{
            "mode": "colordodge",
            "opacity": 0.25,
            "x": -4,
            "y": 6,
            "chroma": false,
            "mask_first_plane_only": true,
            "chroma_placement": "top_left",
            "chroma_resampler": "lanczos"
        }"#,
    )
    .unwrap();
    assert_eq!(opts.mode, BlendMode::Dodge);
    assert_eq!((opts.x, opts.y), (-4, 6));
    assert!(!opts.chroma);
    assert!(opts.mask_first_plane_only);
    assert_eq!(opts.chroma_placement, ChromaPlacement::TopLeft);
    assert_eq!(opts.resample_hints().kernel, ResampleKernel::Lanczos);
}

#[test]
fn unknown_mode_in_json_is_a_serde_error() {
    let err = CompositeOptions::from_json_str(r#"{ "mode": "glitter" }"#).unwrap_err();
    assert!(matches!(err, OverlayError::Serde(_)));
    assert!(err.to_string().contains("glitter"));
}

#[test]
fn unknown_fields_are_rejected() {
    assert!(CompositeOptions::from_json_str(r#"{ "opactiy": 0.5 }"#).is_err());
}

#[test]
fn mode_name_constructor_reports_invalid_argument() {
    assert_eq!(
        CompositeOptions::with_mode_name("Hard_Light").unwrap().mode,
        BlendMode::HardLight
    );
    let err = CompositeOptions::with_mode_name("nope").unwrap_err();
    assert!(matches!(err, OverlayError::InvalidArgument(_)));
}

#[test]
fn opacity_is_clamped_not_rejected() {
    let mut opts = CompositeOptions::default();
    opts.opacity = 7.0;
    assert_eq!(opts.clamped_opacity().unwrap(), 1.0);
    opts.opacity = -2.0;
    assert_eq!(opts.clamped_opacity().unwrap(), 0.0);
    opts.opacity = f64::NAN;
    assert!(opts.clamped_opacity().is_err());
}

#[test]
fn options_round_trip_through_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("opts.json");
    let opts = CompositeOptions {
        mode: BlendMode::Phoenix,
        opacity: 0.5,
        ..CompositeOptions::default()
    };
    std::fs::write(&path, serde_json::to_string(&opts).unwrap()).unwrap();
    assert_eq!(CompositeOptions::from_path(&path).unwrap(), opts);

    let missing = CompositeOptions::from_path(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(missing, OverlayError::Other(_)));
}
