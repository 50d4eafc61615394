#![allow(missing_docs)]

use racer::simulation::params::Params;
use racer::simulation::track::Track;
use racer::simulation::vehicle::{ManualInputs, StepOutcome, Vehicle};

/// Rectangular track with an inner boundary half its size and one gate
/// across the lower gap, straight ahead of the start pose.
const STRAIGHT_GATE_TRACK: &str = r#"{
    "outer_vertices": [[-40, -20], [40, -20], [40, 20], [-40, 20]],
    "inner_vertices": [[-20, -10], [20, -10], [20, 10], [-20, 10]],
    "starting_point": [-30, -15],
    "check_points": [
        [[-10, -20], [-10, -10]]
    ]
}"#;

#[test]
fn test_straight_run_reaches_checkpoint() {
    let track = Track::from_json(STRAIGHT_GATE_TRACK).expect("valid track");
    let params = Params::default();
    let mut vehicle = Vehicle::manual(0, &track, &params);
    *vehicle.manual_inputs_mut().expect("manual vehicle") = ManualInputs {
        throttle: true,
        ..ManualInputs::default()
    };

    let dt = 0.01;
    let mut time = 0.0;
    let mut previous_fitness = vehicle.fitness;

    while vehicle.checkpoint_index == 0 {
        time += dt;
        assert!(time < 5.0, "gate not reached before the stall timeout");

        let outcome = vehicle.tick(&track, &params, time, dt);
        assert_eq!(outcome, StepOutcome::Alive);
        assert!(vehicle.fitness >= previous_fitness);
        previous_fitness = vehicle.fitness;
    }

    assert_eq!(vehicle.checkpoint_index, 1);
    assert!(vehicle.finished);
    assert!(vehicle.fitness > 20.0);
    assert_eq!(vehicle.heading, 0.0);
    assert!(vehicle.pos.x > -12.0);
}
