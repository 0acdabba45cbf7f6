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
//! Kinematic state of a simulated entity

use crate::geometry::{Rect, Vector2};
use crate::hitbox::{Hitbox, HitboxSpec};

/// Direction an entity faces
///
/// Left and right select between mirrored and plain animation sequences;
/// up and down are auxiliary and never chosen by the built-in walkers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Facing left (mirrored sequences)
    #[default]
    Left,
    /// Facing up
    Up,
    /// Facing right
    Right,
    /// Facing down
    Down,
}

/// Position, motion and collision box of one entity
///
/// Velocity and acceleration are caller-controlled; the integrator never
/// clamps them. `previous_position` is the snapshot taken at the start of
/// the last integration step and drives collision back-tracking.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicState {
    /// Logical position
    pub position: Vector2,
    /// Position before the last integration step
    pub previous_position: Vector2,
    /// Velocity in pixels per second
    pub velocity: Vector2,
    /// Acceleration in pixels per second squared
    pub acceleration: Vector2,
    /// Facing direction
    pub facing: Direction,
    /// Whether overlaps with other collidable entities push this one back
    pub collidable: bool,
    /// Whether the integrator advances this state
    pub updatable: bool,
    pub(crate) position_changed: bool,
    hitbox: Hitbox,
}

impl KinematicState {
    /// Create a resting, non-collidable state at `position`
    pub fn new(position: Vector2) -> Self {
        KinematicState {
            position,
            previous_position: position,
            velocity: Vector2::ZERO,
            acceleration: Vector2::ZERO,
            facing: Direction::default(),
            collidable: false,
            updatable: true,
            position_changed: false,
            hitbox: Hitbox::new(HitboxSpec::default()),
        }
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, velocity: Vector2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the constant acceleration
    pub fn with_acceleration(mut self, acceleration: Vector2) -> Self {
        self.acceleration = acceleration;
        self
    }

    /// Set the facing direction
    pub fn with_facing(mut self, facing: Direction) -> Self {
        self.facing = facing;
        self
    }

    /// Mark the state as collidable
    pub fn collidable(mut self) -> Self {
        self.collidable = true;
        self
    }

    /// Set how the hitbox is derived
    pub fn with_hitbox(mut self, spec: HitboxSpec) -> Self {
        self.hitbox.set_spec(spec);
        self
    }

    /// Whether the last integration step moved the entity
    pub fn position_changed(&self) -> bool {
        self.position_changed
    }

    /// Movement over the last tick, including collision corrections
    pub fn movement(&self) -> Vector2 {
        self.position - self.previous_position
    }

    /// Current hitbox
    pub fn hitbox(&self) -> Rect {
        self.hitbox.rect()
    }

    /// Hitbox derivation settings
    pub fn hitbox_spec(&self) -> &HitboxSpec {
        self.hitbox.spec()
    }

    /// Change how the hitbox is derived; takes effect on the next refresh
    pub fn set_hitbox_spec(&mut self, spec: HitboxSpec) {
        self.hitbox.set_spec(spec);
    }

    /// Move both the position and the previous-position snapshot
    ///
    /// Used for scripted displacement that must not read as movement to
    /// the collision resolver.
    pub fn shift(&mut self, offset: Vector2) {
        self.position += offset;
        self.previous_position += offset;
    }

    pub(crate) fn refresh_hitbox(&mut self, visual: Rect) -> Rect {
        self.hitbox.recompute(visual)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_rests() {
        let state = KinematicState::new(Vector2::new(50.0, 200.0));
        assert_eq!(state.previous_position, state.position);
        assert_eq!(state.movement(), Vector2::ZERO);
        assert!(!state.collidable);
        assert!(state.updatable);
        assert_eq!(state.facing, Direction::Left);
    }

    #[test]
    fn test_shift_preserves_movement() {
        let mut state = KinematicState::new(Vector2::new(1.0, 1.0));
        state.position = Vector2::new(3.0, 1.0);
        state.shift(Vector2::new(10.0, 10.0));
        assert_eq!(state.position, Vector2::new(13.0, 11.0));
        assert_eq!(state.movement(), Vector2::new(2.0, 0.0));
    }
}
