use super::*;

#[test]
fn test_parallel_lists_pair_up() -> Result<(), PhaseError> {
    let registry = PhaseRegistry::from_strings(&["P", "S"], &["#7F0DFF", "#ff00ff"])?;

    assert_eq!(registry.labels().collect::<Vec<_>>(), vec!["P", "S"]);
    assert_eq!(registry.color("S"), Some(Rgb::new(255, 0, 255)));
    assert_eq!(registry.index_of("S"), Some(1));
    assert_eq!(registry.first().label, "P");
    assert!(registry.warnings().is_empty());
    Ok(())
}

#[test]
fn test_mismatch_falls_back_to_default_color() -> Result<(), PhaseError> {
    let registry = PhaseRegistry::from_strings(&["Pp", "Ps", "Ss"], &["#BF0DFF"])?;

    assert_eq!(registry.len(), 3);
    assert!(registry.iter().all(|p| p.color == DEFAULT_PHASE_COLOR));
    assert_eq!(
        registry.warnings(),
        &[ConfigMismatch {
            labels: 3,
            colors: 1
        }]
    );
    Ok(())
}

#[test]
fn test_missing_colors_is_a_mismatch() -> Result<(), PhaseError> {
    let registry = PhaseRegistry::new(vec!["P".into(), "S".into()], Vec::new())?;
    assert_eq!(registry.warnings().len(), 1);
    assert_eq!(registry.color("P"), Some(DEFAULT_PHASE_COLOR));
    Ok(())
}

#[test]
fn test_invalid_label_lists() {
    assert_eq!(
        PhaseRegistry::new(Vec::new(), Vec::new()).unwrap_err(),
        PhaseError::NoLabels
    );
    assert_eq!(
        PhaseRegistry::from_strings(&["P", " "], &["#000000", "#000000"]).unwrap_err(),
        PhaseError::EmptyLabel
    );
    assert_eq!(
        PhaseRegistry::from_strings(&["P", "S", "P"], &["#000000"]).unwrap_err(),
        PhaseError::DuplicateLabel("P".to_string())
    );
}

#[test]
fn test_set_color_by_label() -> Result<(), PhaseError> {
    let mut registry = PhaseRegistry::from_strings(&["P", "S"], &["#7F0DFF", "#FF00FF"])?;
    registry.set_color("S", "#00FF00".parse()?)?;

    assert_eq!(registry.color("S"), Some(Rgb::new(0, 255, 0)));
    assert_eq!(registry.color("P"), Some(DEFAULT_PHASE_COLOR));
    assert_eq!(registry.labels().collect::<Vec<_>>(), vec!["P", "S"]);
    assert_eq!(
        registry.set_color("X", DEFAULT_PHASE_COLOR),
        Err(PhaseError::UnknownLabel("X".to_string()))
    );
    Ok(())
}

#[test]
fn test_color_text() {
    assert_eq!("#7f0dff".parse::<Rgb>(), Ok(DEFAULT_PHASE_COLOR));
    assert_eq!(DEFAULT_PHASE_COLOR.to_string(), "#7F0DFF");
    for bad in ["7F0DFF", "#7F0DF", "#GG0000", "#7F0DFF00", ""] {
        assert!(bad.parse::<Rgb>().is_err(), "{:?} parsed", bad);
    }
}

#[test]
fn test_color_serde() {
    let color: Rgb = serde_json::from_str("\"#BF0DFF\"").unwrap();
    assert_eq!(color, Rgb::new(0xBF, 0x0D, 0xFF));
    assert_eq!(serde_json::to_string(&color).unwrap(), "\"#BF0DFF\"");
    assert!(serde_json::from_str::<Rgb>("\"blue\"").is_err());
}
