#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use racer::simulation::error::SimulationError;
use racer::simulation::track::{Track, TrackData};

const RING_TRACK: &str = r#"{
    "outer_vertices": [[-20, -20], [20, -20], [20, 20], [-20, 20]],
    "inner_vertices": [[-10, -10], [10, -10], [10, 10], [-10, 10]],
    "starting_point": [-12, -15],
    "check_points": [
        [[0, -20], [0, -10]],
        [[10, 0], [20, 0]],
        [[0, 10], [0, 20]],
        [[-20, 0], [-10, 0]]
    ]
}"#;

fn ring_data() -> TrackData {
    serde_json::from_str(RING_TRACK).expect("fixture parses")
}

#[test]
fn test_load_ring_track() {
    let track = Track::from_json(RING_TRACK).expect("valid track");

    assert_eq!(track.outer_vertices().len(), 4);
    assert_eq!(track.inner_vertices().len(), 4);
    assert_eq!(track.checkpoint_count(), 4);
    assert_eq!(track.starting_point().x, -12.0);
    assert_eq!(track.starting_point().y, -15.0);
}

#[test]
fn test_wall_segments_close_both_polygons() {
    let track = Track::from_json(RING_TRACK).expect("valid track");
    let walls = track.wall_segments();

    assert_eq!(walls.len(), 8);
    // Closing edge of the outer polygon
    assert_eq!(walls[3].start, track.outer_vertices()[3]);
    assert_eq!(walls[3].end, track.outer_vertices()[0]);
    // Closing edge of the inner polygon
    assert_eq!(walls[7].start, track.inner_vertices()[3]);
    assert_eq!(walls[7].end, track.inner_vertices()[0]);
}

#[test]
fn test_checkpoints_keep_file_order() {
    let track = Track::from_json(RING_TRACK).expect("valid track");
    let gates = track.checkpoint_segments();

    assert_eq!(gates[0].start.x, 0.0);
    assert_eq!(gates[1].start.x, 10.0);
    assert_eq!(gates[3].end.x, -10.0);
}

#[test]
fn test_missing_starting_point_is_malformed() {
    let mut data = ring_data();
    data.starting_point = None;

    let err = Track::from_data(data).unwrap_err();
    assert!(matches!(err, SimulationError::MalformedTrack(_)));
    assert!(err.to_string().contains("starting_point"));
}

#[test]
fn test_missing_inner_vertices_is_malformed() {
    let json = r#"{
        "outer_vertices": [[0, 0], [1, 0], [1, 1]],
        "starting_point": [0.5, 0.5],
        "check_points": [[[0, 0], [1, 1]]]
    }"#;

    let err = Track::from_json(json).unwrap_err();
    assert!(matches!(err, SimulationError::MalformedTrack(_)));
}

#[test]
fn test_boundary_with_two_vertices_is_malformed() {
    let mut data = ring_data();
    data.outer_vertices = Some(vec![[0.0, 0.0], [1.0, 0.0]]);

    let err = Track::from_data(data).unwrap_err();
    assert!(err.to_string().contains("at least 3 vertices"));
}

#[test]
fn test_checkpoint_with_three_points_is_malformed() {
    let mut data = ring_data();
    data.check_points = Some(vec![vec![[0.0, 0.0], [1.0, 0.0], [2.0, 0.0]]]);

    let err = Track::from_data(data).unwrap_err();
    assert!(matches!(err, SimulationError::MalformedTrack(_)));
}

#[test]
fn test_empty_checkpoint_list_is_malformed() {
    let mut data = ring_data();
    data.check_points = Some(Vec::new());

    assert!(Track::from_data(data).is_err());
}

#[test]
fn test_invalid_json_is_malformed() {
    let err = Track::from_json("{ not json").unwrap_err();
    assert!(matches!(err, SimulationError::MalformedTrack(_)));
}

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join(format!("racer_track_{}.json", std::process::id()));
    std::fs::write(&path, RING_TRACK).expect("write fixture");

    let track = Track::load(&path).expect("load track file");
    assert_eq!(track.checkpoint_count(), 4);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_missing_file_is_io_error() {
    let err = Track::load("definitely/not/here.json").unwrap_err();
    assert!(matches!(err, SimulationError::Io(_)));
}
