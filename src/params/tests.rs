use super::*;
use crate::signal::synthetic::demo_start;

#[test]
fn test_every_param_has_one_group() {
    for group in ParamGroup::ALL {
        let members: Vec<_> = Param::ALL.iter().filter(|p| p.group() == group).collect();
        assert!(!members.is_empty(), "group {} has no member", group);
    }
    assert_eq!(Param::TimeHighpass.group(), ParamGroup::TimeProcessing);
    assert_eq!(Param::MarkerSize.group(), ParamGroup::PickDisplay);
    assert_eq!(Param::SpaceHighpass.to_string(), "processing.space.highpass");
}

#[test]
fn test_defaults_mean_skip() -> Result<(), ParameterError> {
    let snapshot = ParameterStore::new().snapshot();

    assert_eq!(snapshot.selection()?, SelectionParameters::default());
    assert_eq!(snapshot.processing()?, ProcessingParameters::default());
    assert_eq!(snapshot.normalization()?, NormalizationParameters::default());
    assert_eq!(snapshot.marker_size(), DEFAULT_MARKER_SIZE);
    Ok(())
}

#[test]
fn test_unchanged_write_records_nothing() -> Result<(), ParameterError> {
    let mut store = ParameterStore::new();
    assert!(!store.set_text(Param::ValueLimit, "")?);
    assert!(store.pending_changes().is_empty());

    assert!(store.set_text(Param::ValueLimit, "1e-5")?);
    assert!(!store.set_text(Param::ValueLimit, "1e-5")?);
    assert_eq!(store.pending_changes().len(), 1);
    assert!(store.pending_changes().contains(ParamGroup::Normalization));
    Ok(())
}

#[test]
fn test_take_changes_drains() -> Result<(), ParameterError> {
    let mut store = ParameterStore::new();
    store.set_flag(Param::TimeIntegrate, true)?;
    store.set_text(Param::SourceId, "stationA.channel1")?;

    let changes = store.take_changes();
    let groups: Vec<_> = changes.iter().collect();
    assert_eq!(groups, vec![ParamGroup::Selection, ParamGroup::TimeProcessing]);
    assert!(store.take_changes().is_empty());
    Ok(())
}

#[test]
fn test_kind_mismatch_rejected() {
    let mut store = ParameterStore::new();
    let err = store.set_flag(Param::SpaceDecimation, true).unwrap_err();
    assert_eq!(
        err,
        ParameterError::KindMismatch {
            param: Param::SpaceDecimation,
            expected: ParamKind::Text
        }
    );
    assert!(store.pending_changes().is_empty());
}

#[test]
fn test_integer_domains() {
    let mut store = ParameterStore::new();
    assert!(store.set_integer(Param::Palette, 1).is_ok());
    assert!(store.set_integer(Param::Palette, 2).is_err());
    assert!(store.set_integer(Param::MarkerSize, 50).is_ok());
    assert!(store.set_integer(Param::MarkerSize, 0).is_err());
}

#[test]
fn test_selection_parsing() -> Result<(), ParameterError> {
    let mut store = ParameterStore::new();
    store.set_text(Param::SourceId, " stationA.channel1 ")?;
    store.set_text(Param::StartTime, "2021-11-13T01:41:00")?;
    store.set_text(Param::StartDistance, "20_000.0")?;
    store.set_text(Param::EndDistance, "120_000.0")?;

    let selection = store.snapshot().selection()?;
    assert_eq!(selection.source_id, "stationA.channel1");
    assert_eq!(selection.start_time, Some(demo_start()));
    assert_eq!(selection.end_time, None);
    assert_eq!(selection.start_distance, Some(20_000.0));
    assert_eq!(selection.end_distance, Some(120_000.0));
    assert_eq!(selection.bounds().end_distance, Some(120_000.0));
    Ok(())
}

#[test]
fn test_inverted_bounds_are_errors() -> Result<(), ParameterError> {
    let mut store = ParameterStore::new();
    store.set_text(Param::StartDistance, "500")?;
    store.set_text(Param::EndDistance, "100")?;
    assert_eq!(
        store.snapshot().selection().unwrap_err(),
        ParameterError::InvertedBounds {
            start: Param::StartDistance,
            end: Param::EndDistance
        }
    );

    let mut store = ParameterStore::new();
    store.set_text(Param::StartTime, "2021-11-13T01:41:10")?;
    store.set_text(Param::EndTime, "2021-11-13T01:41:00")?;
    assert!(matches!(
        store.snapshot().selection(),
        Err(ParameterError::InvertedBounds { start: Param::StartTime, .. })
    ));
    Ok(())
}

#[test]
fn test_malformed_numbers() -> Result<(), ParameterError> {
    let cases = [
        (Param::SpaceDecimation, "4.5"),
        (Param::SpaceDecimation, "four"),
        (Param::TimeHighpass, "1e"),
        (Param::TimeHighpass, "_1"),
        (Param::TimeHighpass, "inf"),
    ];
    for (param, text) in cases {
        let mut store = ParameterStore::new();
        store.set_text(param, text)?;
        let err = store.snapshot().processing().unwrap_err();
        assert_eq!(err.param(), param, "text {:?}", text);
    }
    Ok(())
}

#[test]
fn test_out_of_range_processing_values() -> Result<(), ParameterError> {
    let mut store = ParameterStore::new();
    store.set_text(Param::TimeDecimation, "0")?;
    assert!(matches!(
        store.snapshot().processing(),
        Err(ParameterError::OutOfRange { param: Param::TimeDecimation, .. })
    ));

    let mut store = ParameterStore::new();
    store.set_text(Param::SpaceHighpass, "-10")?;
    assert!(matches!(
        store.snapshot().processing(),
        Err(ParameterError::OutOfRange { param: Param::SpaceHighpass, .. })
    ));
    Ok(())
}

#[test]
fn test_invalid_timestamp() -> Result<(), ParameterError> {
    let mut store = ParameterStore::new();
    store.set_text(Param::EndTime, "tomorrow")?;
    assert!(matches!(
        store.snapshot().selection(),
        Err(ParameterError::InvalidTimestamp { param: Param::EndTime, .. })
    ));
    Ok(())
}

#[test]
fn test_write_back_is_visible_but_not_a_change() -> Result<(), ParameterError> {
    let mut store = ParameterStore::new();
    store.write_back_normalization(&NormalizationParameters {
        palette: Palette::Viridis,
        linear_threshold: Some(5e-7),
        value_limit: Some(5e-6),
    });

    assert_eq!(store.text(Param::ValueLimit), "5e-6");
    assert_eq!(store.text(Param::LinearThreshold), "5e-7");
    assert!(store.pending_changes().is_empty());

    let normalization = store.snapshot().normalization()?;
    assert_eq!(normalization.value_limit, Some(5e-6));
    assert_eq!(normalization.linear_threshold, Some(5e-7));
    Ok(())
}

#[test]
fn test_snapshot_is_immutable_copy() -> Result<(), ParameterError> {
    let mut store = ParameterStore::new();
    store.set_text(Param::TimeDecimation, "4")?;
    let snapshot = store.snapshot();
    store.set_text(Param::TimeDecimation, "8")?;

    assert_eq!(snapshot.processing()?.time.decimation_factor, Some(4));
    assert_eq!(store.snapshot().processing()?.time.decimation_factor, Some(8));
    Ok(())
}
