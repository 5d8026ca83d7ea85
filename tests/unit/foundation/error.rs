use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        OverlayError::invalid_argument("x")
            .to_string()
            .contains("invalid argument:")
    );
    assert!(
        OverlayError::unsupported_format("x")
            .to_string()
            .contains("unsupported format:")
    );
    assert!(
        OverlayError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = OverlayError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn io_errors_convert_through_anyhow() {
    fn open() -> OverlayResult<()> {
        Err(anyhow::anyhow!("missing file"))?;
        Ok(())
    }
    assert!(matches!(open(), Err(OverlayError::Other(_))));
}
