#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::f32::consts::{FRAC_PI_2, PI};

use proptest::prelude::*;
use racer::simulation::params::{NUM_RAYS, Params};
use racer::simulation::track::Track;
use racer::simulation::vehicle::{RangeFinder, Vehicle};

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

fn create_test_track() -> Track {
    Track::from_json(RING_TRACK).expect("valid track")
}

fn create_test_params() -> Params {
    Params::default()
}

#[test]
fn test_ray_angles_cover_front_sides_and_rear_corners() {
    let angles = RangeFinder::ray_angles(0.5, 1.0);
    let theta = 0.5f32.atan();

    assert_eq!(angles.len(), NUM_RAYS);
    assert_eq!(angles[0], 0.0);
    assert_eq!(angles[1], theta);
    assert_eq!(angles[2], -theta);
    assert_eq!(angles[3], FRAC_PI_2);
    assert_eq!(angles[4], -FRAC_PI_2);
    assert_eq!(angles[5], PI + theta);
    assert_eq!(angles[6], PI - theta);
}

#[test]
fn test_readings_at_starting_point() {
    let track = create_test_track();
    let params = create_test_params();
    let vehicle = Vehicle::manual(0, &track, &params);

    let reading = RangeFinder.scan(&vehicle, &track, &params);
    let expected = [1.0, 1.0, 1.0, 0.5, 1.0, 0.894_427, 0.894_427];

    for (i, (actual, expected)) in reading.distances.iter().zip(expected).enumerate() {
        assert!(
            (actual - expected).abs() < 1e-3,
            "ray {i}: expected {expected}, got {actual}"
        );
    }
}

#[test]
fn test_hit_points_are_reported() {
    let track = create_test_track();
    let params = create_test_params();
    let vehicle = Vehicle::manual(0, &track, &params);

    let reading = RangeFinder.scan(&vehicle, &track, &params);

    assert!(reading.traces[0].hit.is_none());
    let hit = reading.traces[3].hit.expect("ray towards the outer wall hits");
    assert!((hit.x + 12.0).abs() < 1e-4);
    assert!((hit.y + 20.0).abs() < 1e-4);

    for trace in &reading.traces {
        assert_eq!(trace.start, track.starting_point());
    }
}

#[test]
fn test_ray_length_and_world_scale() {
    let track = create_test_track();
    let params = Params {
        world_scale: 2.0,
        ..create_test_params()
    };
    let vehicle = Vehicle::manual(0, &track, &params);

    assert!((vehicle.pos.x + 6.0).abs() < 1e-6);
    assert!((vehicle.pos.y + 7.5).abs() < 1e-6);

    let reading = RangeFinder.scan(&vehicle, &track, &params);

    // Same wall, twice the ray length in track units
    assert!((reading.distances[3] - 0.25).abs() < 1e-4);
    assert!((reading.distances[5] - 0.447_214).abs() < 1e-3);
}

#[test]
fn test_tick_stores_rays_for_rendering() {
    let track = create_test_track();
    let params = create_test_params();
    let mut vehicle = Vehicle::manual(0, &track, &params);
    assert!(vehicle.rays.is_empty());

    vehicle.tick(&track, &params, 0.01, 0.01);

    assert_eq!(vehicle.rays.len(), NUM_RAYS);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_readings_are_normalised(heading in -PI..PI, dx in -0.9f32..0.9, dy in -4.0f32..3.0) {
        let track = create_test_track();
        let params = create_test_params();
        let mut vehicle = Vehicle::manual(0, &track, &params);
        vehicle.heading = heading;
        vehicle.pos.x += dx;
        vehicle.pos.y += dy;

        let reading = RangeFinder.scan(&vehicle, &track, &params);

        for distance in reading.distances {
            prop_assert!((0.0..=1.0).contains(&distance));
        }
    }
}
