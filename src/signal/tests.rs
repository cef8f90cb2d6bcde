use super::*;
use crate::signal::synthetic::{demo_collection, demo_start};
use crate::timefmt::seconds_to_duration;
use ndarray::Array2;

fn ramp_signal(times: usize, distances: usize) -> Signal {
    let data = Array2::from_shape_fn((times, distances), |(i, j)| (i * distances + j) as f64);
    Signal::new(
        data,
        TimeAxis::new(demo_start(), 0.5, times),
        DistanceAxis::new(100.0, 10.0, distances),
    )
    .unwrap()
}

#[test]
fn test_signal_rejects_inconsistent_axes() {
    let data = Array2::<f64>::zeros((3, 4));
    let err = Signal::new(
        data.clone(),
        TimeAxis::new(demo_start(), 1.0, 4),
        DistanceAxis::new(0.0, 1.0, 4),
    )
    .unwrap_err();
    assert!(matches!(err, SourceError::InvalidArray(_)));

    let err = Signal::new(
        data,
        TimeAxis::new(demo_start(), 0.0, 3),
        DistanceAxis::new(0.0, 1.0, 4),
    )
    .unwrap_err();
    assert!(matches!(err, SourceError::InvalidArray(_)));
}

#[test]
fn test_axis_extent_and_values() {
    let signal = ramp_signal(5, 4);
    assert_eq!(signal.time().extent(), 2.0);
    assert_eq!(signal.distance().extent(), 30.0);
    assert_eq!(signal.distance().value(2), 120.0);
    assert_eq!(signal.time().value(2), demo_start() + seconds_to_duration(1.0));
}

#[test]
fn test_select_inclusive_bounds() {
    let array = DataArray::new(ramp_signal(10, 8));
    let bounds = SelectionBounds {
        start_time: Some(demo_start() + seconds_to_duration(1.0)),
        end_time: Some(demo_start() + seconds_to_duration(2.0)),
        start_distance: Some(115.0),
        end_distance: Some(140.0),
    };

    let selected = array.select("ramp", &bounds).unwrap();
    // times 1.0, 1.5, 2.0 and distances 120, 130, 140
    assert_eq!(selected.shape(), (3, 3));
    assert_eq!(selected.distance().start(), 120.0);
    assert_eq!(selected.time().start(), demo_start() + seconds_to_duration(1.0));
    assert_eq!(selected.data()[[0, 0]], (2 * 8 + 2) as f64);
}

#[test]
fn test_select_open_bounds_returns_everything() {
    let array = DataArray::new(ramp_signal(4, 3));
    let selected = array.select("ramp", &SelectionBounds::default()).unwrap();
    assert_eq!(&selected, array.signal());
}

#[test]
fn test_select_outside_coverage_is_empty() {
    let array = DataArray::new(ramp_signal(4, 3));
    let bounds = SelectionBounds {
        start_time: Some(demo_start() + seconds_to_duration(3600.0)),
        ..Default::default()
    };
    let err = array.select("ramp", &bounds).unwrap_err();
    assert_eq!(
        err,
        SourceError::EmptySelection {
            source_id: "ramp".to_string()
        }
    );
}

#[test]
fn test_resolve_dotted_path() {
    let collection = demo_collection().unwrap();

    assert!(collection.resolve("stationA.channel1").is_ok());
    assert!(collection.resolve("stationB.channel1").is_ok());
    assert_eq!(
        collection.resolve("stationA").unwrap_err(),
        SourceError::NotALeaf("stationA".to_string())
    );
    assert_eq!(
        collection.resolve("stationC.channel1").unwrap_err(),
        SourceError::UnknownSource("stationC.channel1".to_string())
    );
}

#[test]
fn test_resolve_ambiguous_sequence() {
    let node = DataNode::mapping([(
        "station",
        DataNode::Sequence(vec![
            DataNode::array(ramp_signal(2, 2)),
            DataNode::array(ramp_signal(3, 2)),
        ]),
    )]);

    assert_eq!(
        node.resolve("station").unwrap_err(),
        SourceError::AmbiguousPath {
            path: "station".to_string(),
            leaves: 2
        }
    );
    // Listing still reports the address once
    assert_eq!(node.codes(), vec!["station".to_string()]);
}

#[test]
fn test_single_array_root_addressed_by_empty_path() {
    let node = DataNode::array(ramp_signal(2, 2));
    assert_eq!(node.codes(), vec![String::new()]);
    assert!(node.select("", &SelectionBounds::default()).is_ok());
}

#[test]
fn test_collection_codes_keep_order() {
    let collection = demo_collection().unwrap();
    assert_eq!(
        collection.codes(),
        vec![
            "stationA.channel1".to_string(),
            "stationA.channel2".to_string(),
            "stationB.channel1".to_string(),
        ]
    );
}

#[test]
fn test_max_abs_ignores_non_finite() {
    let mut data = Array2::from_elem((2, 2), 1.0);
    data[[0, 1]] = -3.0;
    data[[1, 0]] = f64::NAN;
    let signal = Signal::new(
        data,
        TimeAxis::new(demo_start(), 1.0, 2),
        DistanceAxis::new(0.0, 1.0, 2),
    )
    .unwrap();
    assert_eq!(signal.max_abs(), 3.0);
}
