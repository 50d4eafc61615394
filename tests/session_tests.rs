#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use racer::simulation::params::Params;
use racer::simulation::session::DrivingSession;
use racer::simulation::track::Track;
use racer::simulation::vehicle::{EliminationCause, StepOutcome};

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

fn create_session() -> DrivingSession {
    let track = Track::from_json(RING_TRACK).expect("valid track");
    DrivingSession::new(track, Params::default()).expect("valid session")
}

#[test]
fn test_session_starts_at_rest() {
    let session = create_session();

    assert_eq!(session.attempts(), 0);
    assert_eq!(session.vehicle().velocity, 0.0);
    assert_eq!(session.vehicle().pos.x, -12.0);
    assert_eq!(session.vehicle().pos.y, -15.0);
    assert!(session.vehicle().brain().is_none());
}

#[test]
fn test_inputs_drive_the_vehicle() {
    let mut session = create_session();
    session.inputs_mut().throttle = true;

    for _ in 0..10 {
        assert_eq!(session.tick(0.1), StepOutcome::Alive);
    }

    assert!(session.vehicle().velocity > 0.0);
    assert!(session.vehicle().pos.x > -12.0);
    assert_eq!(session.vehicle().pos.y, -15.0);
}

#[test]
fn test_steering_input_turns_the_vehicle() {
    let mut session = create_session();
    session.inputs_mut().throttle = true;
    session.inputs_mut().left = true;

    for _ in 0..10 {
        session.tick(0.1);
    }

    assert!(session.vehicle().steering > 0.0);
    assert!(session.vehicle().heading > 0.0);
}

#[test]
fn test_stalled_vehicle_respawns() {
    let mut session = create_session();

    for _ in 0..10 {
        assert_eq!(session.tick(0.5), StepOutcome::Alive);
    }

    let outcome = session.tick(0.5);

    assert!(matches!(
        outcome,
        StepOutcome::Eliminated {
            cause: EliminationCause::StallTimeout,
            ..
        }
    ));
    assert_eq!(session.attempts(), 1);
    assert_eq!(session.vehicle().id, 1);
    assert!(session.vehicle().is_alive());
    assert_eq!(session.vehicle().pos.x, -12.0);

    // The respawned vehicle gets a fresh stall timer
    assert_eq!(session.tick(0.5), StepOutcome::Alive);
}

#[test]
fn test_render_frame_holds_single_vehicle() {
    let mut session = create_session();
    session.tick(0.1);

    let frame = session.render_frame();

    assert_eq!(frame.vehicles.len(), 1);
    assert_eq!(frame.vehicles[0].rays.len(), 7);
    assert_eq!(frame.vehicles[0].body, session.vehicle().body_polygon(1.0));
}
