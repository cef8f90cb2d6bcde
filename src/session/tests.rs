use super::*;
use crate::phases::DEFAULT_PHASE_COLOR;
use crate::picks::PickStatus;
use crate::signal::synthetic::{demo_start, synthetic_record, SyntheticEvent, SyntheticLayout};
use crate::signal::DataNode;
use chrono::Duration;
use tempfile::tempdir;

fn small_source() -> DataNode {
    let layout = SyntheticLayout {
        times: 200,
        distances: 40,
        ..Default::default()
    };
    let record = synthetic_record(&layout, &SyntheticEvent::default()).unwrap();
    DataNode::mapping([("fiber", DataNode::mapping([("line", DataNode::array(record))]))])
}

fn session() -> Session<DataNode> {
    let phases = PhaseRegistry::from_strings(&["P", "S"], &["#7F0DFF", "#FF00FF"]).unwrap();
    Session::new(small_source(), phases)
}

fn applied() -> Session<DataNode> {
    let mut session = session();
    session.handle(Action::set_text(Param::SourceId, "fiber.line"));
    let status = session.handle(Action::Apply).clone();
    assert_eq!(status.level, StatusLevel::Info, "{}", status);
    session
}

#[test]
fn test_new_session_defaults() {
    let session = session();
    assert_eq!(session.status(), &StatusMessage::info("Ready"));
    assert_eq!(session.active_phase(), "P");
    assert_eq!(session.canvas_size(), (1080, 720));
    assert_eq!(session.marker_size(), 3);
    assert_eq!(session.codes(), vec!["fiber.line"]);
    assert!(session.image().is_none());
}

#[test]
fn test_phase_mismatch_is_reported() {
    let phases = PhaseRegistry::from_strings(&["Pp", "Ps", "Ss"], &["#BF0DFF"]).unwrap();
    let session = Session::new(small_source(), phases);
    assert_eq!(session.status().level, StatusLevel::Warning);
    assert!(session
        .phases()
        .iter()
        .all(|p| p.color == DEFAULT_PHASE_COLOR));
}

#[test]
fn test_apply_renders_and_writes_back_defaults() {
    let session = applied();
    let image = session.image().unwrap();
    assert_eq!(image.shape(), (200, 40));
    assert!(!session.params().text(Param::ValueLimit).is_empty());
    assert!(!session.params().text(Param::LinearThreshold).is_empty());
    // Write-back does not schedule another normalization
    assert!(session.params().pending_changes().is_empty());
}

#[test]
fn test_second_apply_is_up_to_date() {
    let mut session = applied();
    assert_eq!(session.handle(Action::Apply), &StatusMessage::info("Up to date"));

    session.handle(Action::set_integer(Param::MarkerSize, 8));
    assert_eq!(session.marker_size(), 8);
    assert_eq!(session.handle(Action::Apply), &StatusMessage::info("Up to date"));
}

#[test]
fn test_normalization_change_only_renormalizes() {
    let mut session = applied();
    session.handle(Action::set_integer(Param::Palette, 1));
    session.handle(Action::Apply);

    assert_eq!(session.run_count(Stage::Load), 1);
    assert_eq!(session.run_count(Stage::Process), 1);
    assert_eq!(session.run_count(Stage::Normalize), 2);
}

#[test]
fn test_invalid_input_keeps_session_alive() {
    let mut session = applied();
    assert!(session
        .handle(Action::set_integer(Param::MarkerSize, 99))
        .is_error());
    assert!(session
        .handle(Action::set_flag(Param::SpaceDecimation, true))
        .is_error());

    session.handle(Action::set_text(Param::TimeHighpass, "abc"));
    assert!(session.handle(Action::Apply).is_error());

    session.handle(Action::set_text(Param::TimeHighpass, "1.5"));
    assert!(!session.handle(Action::Apply).is_error());
}

#[test]
fn test_empty_selection_keeps_image() {
    let mut session = applied();
    let image = session.image().cloned();

    session.handle(Action::set_text(Param::StartDistance, "1e9"));
    let status = session.handle(Action::Apply).clone();
    assert!(status.is_error());
    assert!(status.text.contains("Empty selection"));
    assert_eq!(session.image().cloned(), image);
}

#[test]
fn test_pick_actions() {
    let mut session = session();
    let t0 = demo_start();

    session.handle(Action::AddPick {
        time: t0,
        distance: 100.0,
    });
    session.handle(Action::CommitStroke);
    assert!(session.handle(Action::SelectPhase("X".into())).is_error());
    assert!(!session.handle(Action::SelectPhase("S".into())).is_error());
    session.handle(Action::AddPick {
        time: t0 + Duration::seconds(1),
        distance: 100.0,
    });

    let picks: Vec<_> = session
        .picks()
        .iter()
        .map(|p| (p.phase.as_str(), p.status))
        .collect();
    assert_eq!(
        picks,
        vec![("P", PickStatus::Inactive), ("S", PickStatus::Active)]
    );
    assert!(session
        .handle(Action::AddPick {
            time: t0,
            distance: f64::NAN
        })
        .is_error());
    assert_eq!(session.picks().len(), 2);
}

#[test]
fn test_delete_with_stale_selection_fails() {
    let mut session = session();
    for d in [1.0, 2.0, 3.0] {
        session.handle(Action::AddPick {
            time: demo_start(),
            distance: d,
        });
    }
    let selection = session.picks().capture_selection([0, 1]);
    session.handle(Action::AddPick {
        time: demo_start(),
        distance: 4.0,
    });
    assert!(session.handle(Action::DeletePicks(selection)).is_error());
    assert_eq!(session.picks().len(), 4);

    let selection = session.picks().capture_selection([0, 1]);
    assert!(!session.handle(Action::DeletePicks(selection)).is_error());
    let left: Vec<f64> = session.picks().iter().map(|p| p.distance).collect();
    assert_eq!(left, vec![3.0, 4.0]);

    session.handle(Action::ResetPicks);
    assert!(session.picks().is_empty());
}

#[test]
fn test_save_and_load_picks() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("picks.csv");
    let mut session = session();
    session.handle(Action::AddPick {
        time: demo_start(),
        distance: 20_000.0,
    });
    assert!(!session.handle(Action::SavePicks(path.clone())).is_error());

    session.handle(Action::ResetPicks);
    assert!(!session.handle(Action::LoadPicks(path)).is_error());
    assert_eq!(session.picks().len(), 1);
    assert_eq!(
        session.picks().get(0).map(|p| p.status),
        Some(PickStatus::Inactive)
    );

    let missing = dir.path().join("missing.csv");
    assert!(session.handle(Action::LoadPicks(missing)).is_error());
    assert_eq!(session.picks().len(), 1);
}

#[test]
fn test_set_phase_color() {
    let mut session = session();
    let green = Rgb::new(0, 255, 0);
    session.handle(Action::SetPhaseColor {
        label: "S".into(),
        color: green,
    });
    assert_eq!(session.phases().color("S"), Some(green));
    assert!(session
        .handle(Action::SetPhaseColor {
            label: "X".into(),
            color: green
        })
        .is_error());
}

#[test]
fn test_from_config() {
    let config = SessionConfig::from_str(
        "sources = [\"fiber.line\"]\n[phases]\nlabels = [\"Pg\", \"Sg\"]\n[image]\nwidth = 640\n",
    )
    .unwrap();
    let mut session = Session::from_config(small_source(), &config).unwrap();

    assert_eq!(session.canvas_size(), (640, 720));
    assert_eq!(session.active_phase(), "Pg");
    assert_eq!(session.status().level, StatusLevel::Warning);
    assert!(!session.handle(Action::Apply).is_error());
    assert!(session.image().is_some());
}
