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
//! Kinematic integration
//!
//! Entities move under constant acceleration with trapezoidal
//! (average-velocity) integration:
//!
//! ```text
//! v(t + dt) = v(t) + a*dt
//! x(t + dt) = x(t) + 0.5*(v(t) + v(t + dt))*dt
//! ```
//!
//! For constant acceleration this reproduces the closed-form uniformly
//! accelerated motion `x = x0 + v0*t + 0.5*a*t²` up to rounding, and the
//! step is reversible: integrating with `-dt` from the new state restores
//! the old one.
//!
//! # Timestep Guidelines
//!
//! The simulation runs one tick per rendered frame, so `dt = 1 / tick_rate`.
//! - Too small: numerical precision issues and wasted computation
//! - Too large: entities tunnel through thin obstacles
//! - Recommended: 1/30 to 1/144

mod kinematics;

pub use kinematics::{Direction, KinematicState};

use log::warn;

/// Advance `state` by one tick of length `dt`
///
/// Snapshots `previous_position` before moving, then applies the
/// trapezoidal update. Returns whether the position changed, compared
/// exactly. States with `updatable == false` are left untouched.
///
/// # Examples
///
/// ```
/// use scroll_engine::geometry::Vector2;
/// use scroll_engine::integration::{integrate, KinematicState};
///
/// let mut state = KinematicState::new(Vector2::new(0.0, 0.0))
///     .with_velocity(Vector2::new(10.0, 0.0));
/// assert!(integrate(&mut state, 0.5));
/// assert_eq!(state.position, Vector2::new(5.0, 0.0));
/// assert_eq!(state.previous_position, Vector2::new(0.0, 0.0));
/// ```
pub fn integrate(state: &mut KinematicState, dt: f64) -> bool {
    if !state.updatable {
        return false;
    }

    state.previous_position = state.position;

    let final_velocity = state.velocity + state.acceleration * dt;
    let position = state.position + (state.velocity + final_velocity) / 2.0 * dt;

    state.velocity = final_velocity;
    state.position = position;
    state.position_changed = state.previous_position != state.position;

    if !state.position.is_valid() || !state.velocity.is_valid() {
        warn!(
            "Non-finite kinematic state after integration: position {}, velocity {}",
            state.position, state.velocity
        );
    }

    state.position_changed
}

/// Validate a timestep for stability
///
/// Returns a warning message if the timestep might cause numerical issues.
/// Extremely small timesteps may lead to precision loss, while large ones
/// let fast entities skip over obstacles between ticks.
pub fn validate_timestep(dt: f64) -> Result<(), String> {
    if dt <= 0.0 || !dt.is_finite() {
        return Err(format!("Invalid timestep: {}. Must be positive and finite.", dt));
    }

    if dt < 1e-6 {
        return Err(format!(
            "Warning: Timestep {} is extremely small and may cause precision loss. \
            Consider a lower tick rate.",
            dt
        ));
    }

    if dt > 0.1 {
        return Err(format!(
            "Warning: Timestep {} is large and may let entities pass through obstacles. \
            Consider a higher tick rate.",
            dt
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vector2;

    #[test]
    fn test_free_motion() {
        let mut state = KinematicState::new(Vector2::new(1.0, 2.0))
            .with_velocity(Vector2::new(10.0, -20.0));
        integrate(&mut state, 0.1);
        assert!((state.position.x - 2.0).abs() < 1e-12);
        assert!((state.position.y - 0.0).abs() < 1e-12);
        assert_eq!(state.velocity, Vector2::new(10.0, -20.0));
    }

    #[test]
    fn test_constant_acceleration_single_step() {
        let mut state = KinematicState::new(Vector2::ZERO)
            .with_acceleration(Vector2::new(10.0, 0.0));
        integrate(&mut state, 0.1);
        // x = 0.5 * 10 * 0.01
        assert!((state.position.x - 0.05).abs() < 1e-12);
        assert!((state.velocity.x - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_position_changed_flag() {
        let mut state = KinematicState::new(Vector2::new(5.0, 5.0));
        assert!(!integrate(&mut state, 1.0 / 60.0));
        assert!(!state.position_changed());

        state.velocity = Vector2::new(1.0, 0.0);
        assert!(integrate(&mut state, 1.0 / 60.0));
        assert!(state.position_changed());
    }

    #[test]
    fn test_frozen_state_is_skipped() {
        let mut state = KinematicState::new(Vector2::new(5.0, 5.0))
            .with_velocity(Vector2::new(100.0, 100.0));
        state.updatable = false;
        assert!(!integrate(&mut state, 0.1));
        assert_eq!(state.position, Vector2::new(5.0, 5.0));
        assert_eq!(state.velocity, Vector2::new(100.0, 100.0));
    }

    #[test]
    fn test_step_is_reversible() {
        let mut state = KinematicState::new(Vector2::new(3.0, -7.0))
            .with_velocity(Vector2::new(12.0, 4.0))
            .with_acceleration(Vector2::new(-3.0, 9.8));
        integrate(&mut state, 0.25);
        integrate(&mut state, -0.25);
        assert!((state.position.x - 3.0).abs() < 1e-12);
        assert!((state.position.y + 7.0).abs() < 1e-12);
        assert!((state.velocity.x - 12.0).abs() < 1e-12);
        assert!((state.velocity.y - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_timestep_validation() {
        assert!(validate_timestep(1.0 / 60.0).is_ok());
        assert!(validate_timestep(0.0).is_err());
        assert!(validate_timestep(f64::NAN).is_err());
        assert!(validate_timestep(1e-9).unwrap_err().contains("extremely small"));
        assert!(validate_timestep(0.5).unwrap_err().contains("large"));
    }
}
