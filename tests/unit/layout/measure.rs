use super::*;

#[test]
fn fixed_advance_counts_chars() {
    let mut m = FixedAdvance::default();
    assert_eq!(m.measure("", 14.0), 0.0);
    assert!((m.measure("abc", 10.0) - 18.0).abs() < 1e-9);
    assert!((m.measure("équ", 10.0) - 18.0).abs() < 1e-9);
}

#[test]
fn config_selects_measurer() {
    let mut m = measure_from_config(&MeasureConfig::FixedAdvance { em: 1.0 }).unwrap();
    assert_eq!(m.measure("ab", 16.0), 32.0);
}

#[test]
fn font_measurer_reports_missing_file() {
    let err = measure_from_config(&MeasureConfig::Font {
        path: "missing/font.ttf".into(),
    })
    .err()
    .unwrap();
    assert!(matches!(err, BlocksError::Other(_)));
}

#[test]
fn font_measurer_rejects_garbage_bytes() {
    assert!(FontMeasure::from_bytes(b"not a font").is_err());
}
