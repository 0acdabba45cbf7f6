// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Integration tests checking the integrator against closed-form motion

use scroll_engine::geometry::Vector2;
use scroll_engine::integration::{integrate, validate_timestep, KinematicState};

const DT: f64 = 1.0 / 60.0;

/// x(t) = x0 + v0*t + 0.5*a*t²
fn closed_form(p0: Vector2, v0: Vector2, a: Vector2, t: f64) -> Vector2 {
    p0 + v0 * t + a * (0.5 * t * t)
}

#[test]
fn test_matches_uniformly_accelerated_motion() {
    let accelerations = [Vector2::ZERO, Vector2::new(0.0, 980.0), Vector2::new(-35.0, 12.5)];
    let velocities = [Vector2::ZERO, Vector2::new(200.0, 0.0), Vector2::new(-15.0, -320.0)];
    let origins = [Vector2::ZERO, Vector2::new(100.0, -50.0)];

    for a in accelerations {
        for v0 in velocities {
            for p0 in origins {
                for n in [0usize, 1, 10, 120] {
                    let mut state = KinematicState::new(p0).with_velocity(v0).with_acceleration(a);
                    for _ in 0..n {
                        integrate(&mut state, DT);
                    }

                    let t = n as f64 * DT;
                    let expected = closed_form(p0, v0, a, t);
                    let error = state.position - expected;
                    assert!(
                        error.x.abs() < 1e-7 && error.y.abs() < 1e-7,
                        "a={} v0={} p0={} n={}: got {}, expected {}",
                        a,
                        v0,
                        p0,
                        n,
                        state.position,
                        expected
                    );

                    let expected_velocity = v0 + a * t;
                    assert!((state.velocity - expected_velocity).x.abs() < 1e-9);
                    assert!((state.velocity - expected_velocity).y.abs() < 1e-9);
                }
            }
        }
    }
}

#[test]
fn test_step_is_reversible() {
    let start = Vector2::new(12.0, 34.0);
    let mut state = KinematicState::new(start)
        .with_velocity(Vector2::new(150.0, -60.0))
        .with_acceleration(Vector2::new(0.0, 980.0));
    let velocity = state.velocity;

    integrate(&mut state, DT);
    integrate(&mut state, -DT);

    assert!((state.position - start).x.abs() < 1e-9);
    assert!((state.position - start).y.abs() < 1e-9);
    assert!((state.velocity - velocity).y.abs() < 1e-9);
}

#[test]
fn test_previous_position_tracks_last_step() {
    let mut state = KinematicState::new(Vector2::new(0.0, 0.0)).with_velocity(Vector2::new(60.0, 0.0));
    integrate(&mut state, DT);
    let before = state.position;
    integrate(&mut state, DT);
    assert_eq!(state.previous_position, before);
    assert!((state.movement().x - 1.0).abs() < 1e-12);
}

#[test]
fn test_resting_state_reports_no_change() {
    let mut state = KinematicState::new(Vector2::new(5.0, 5.0));
    for _ in 0..10 {
        assert!(!integrate(&mut state, DT));
    }
    assert!(!state.position_changed());
}

#[test]
fn test_tick_rates() {
    assert!(validate_timestep(1.0 / 60.0).is_ok());
    assert!(validate_timestep(1.0 / 144.0).is_ok());
    assert!(validate_timestep(0.5).is_err());
    assert!(validate_timestep(0.0).is_err());
}
