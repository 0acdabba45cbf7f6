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
//! Collision resolution
//!
//! The resolver pushes one moving entity out of the obstacles it overlaps.
//! For each overlap it back-projects the mover's trajectory onto the
//! obstacle's near vertical edge to pick the axis of correction:
//!
//! ```text
//! pending = dy / dx
//! y(x)    = x * pending + (top - left * pending)    // line through the mover's top-left
//! ```
//!
//! If the mover, placed where its leading edge would touch the near edge,
//! lies entirely above or below the obstacle, it is snapped vertically;
//! otherwise it is snapped horizontally against that edge. With `dx == 0`
//! the correction is vertical by the sign of `dy`.
//!
//! Obstacles are processed in order with no global solve, so when two
//! corrections conflict the later one wins.

use crate::entity::Entity;
use crate::error::Result;
use crate::geometry::{Rect, Vector2};
use log::debug;

/// Positional correction for one overlapping pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Correction {
    /// No positional change
    None,
    /// Move along x by this amount
    Horizontal(f64),
    /// Move along y by this amount
    Vertical(f64),
}

impl Correction {
    /// Compute the correction for a mover overlapping `obstacle`
    ///
    /// `mover` is the mover's current hitbox and `movement` its displacement
    /// this tick. Overlap is assumed, not checked.
    pub fn between(mover: Rect, movement: Vector2, obstacle: Rect) -> Correction {
        let (dx, dy) = (movement.x, movement.y);

        if dx > 0.0 {
            let crossing = crossing_y(&mover, dy / dx, obstacle.left() - mover.width());
            if clears_vertically(&mover, &obstacle, crossing) {
                vertical(&mover, &obstacle, dy)
            } else {
                Correction::Horizontal(obstacle.left() - mover.width() - mover.left())
            }
        } else if dx < 0.0 {
            let crossing = crossing_y(&mover, dy / dx, obstacle.right());
            if clears_vertically(&mover, &obstacle, crossing) {
                vertical(&mover, &obstacle, dy)
            } else {
                Correction::Horizontal(obstacle.right() - mover.left())
            }
        } else if dy > 0.0 {
            Correction::Vertical(obstacle.top() - mover.height() - mover.top())
        } else if dy < 0.0 {
            Correction::Vertical(obstacle.bottom() - mover.top())
        } else {
            Correction::None
        }
    }

    /// Offset to add to the mover's position
    pub fn offset(&self) -> Vector2 {
        match *self {
            Correction::None => Vector2::ZERO,
            Correction::Horizontal(dx) => Vector2::new(dx, 0.0),
            Correction::Vertical(dy) => Vector2::new(0.0, dy),
        }
    }
}

/// Mover's top edge when its left edge sits at `x` on the trajectory line
fn crossing_y(mover: &Rect, pending: f64, x: f64) -> f64 {
    x * pending + (mover.top() - mover.left() * pending)
}

fn clears_vertically(mover: &Rect, obstacle: &Rect, crossing: f64) -> bool {
    crossing + mover.height() < obstacle.top() || crossing > obstacle.bottom()
}

fn vertical(mover: &Rect, obstacle: &Rect, dy: f64) -> Correction {
    if dy > 0.0 {
        Correction::Vertical(obstacle.top() - mover.height() - mover.top())
    } else {
        Correction::Vertical(obstacle.bottom() - mover.top())
    }
}

/// Resolve `mover` against `obstacles` in order
///
/// Every overlapping pair notifies both sides' collision reactions. Only
/// pairs where both sides are collidable move the mover. Each entity's
/// `collided` flag is updated. Returns whether any overlap was found.
///
/// # Errors
///
/// Propagates a failing collision reaction.
pub fn resolve(mover: &mut Entity, obstacles: &mut [Entity]) -> Result<bool> {
    let mut collided = false;

    for obstacle in obstacles.iter_mut() {
        let overlapping = mover.hitbox().overlaps(&obstacle.hitbox());
        obstacle.set_collided(overlapping);
        if !overlapping {
            continue;
        }
        collided = true;

        if mover.kinematics.collidable && obstacle.kinematics.collidable {
            let correction =
                Correction::between(mover.hitbox(), mover.kinematics.movement(), obstacle.hitbox());
            if correction != Correction::None {
                debug!(
                    "Collision correction {:?} against {:?}",
                    correction,
                    obstacle.id()
                );
            }
            mover.kinematics.position += correction.offset();
            mover.refresh_hitbox();
        }

        mover.notify_collision(obstacle)?;
        obstacle.notify_collision(mover)?;
    }

    mover.set_collided(collided);
    Ok(collided)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pure_horizontal_push_back() {
        let mover = Rect::new(45.0, 100.0, 10.0, 10.0);
        let obstacle = Rect::new(50.0, 90.0, 20.0, 40.0);
        let correction = Correction::between(mover, Vector2::new(5.0, 0.0), obstacle);
        assert_eq!(correction, Correction::Horizontal(-5.0));
        assert_eq!(mover.translated(correction.offset()).right(), obstacle.left());
    }

    #[test]
    fn test_moving_left_snaps_to_right_edge() {
        let mover = Rect::new(65.0, 100.0, 10.0, 10.0);
        let obstacle = Rect::new(50.0, 90.0, 20.0, 40.0);
        let correction = Correction::between(mover, Vector2::new(-5.0, 0.0), obstacle);
        assert_eq!(correction, Correction::Horizontal(5.0));
    }

    #[test]
    fn test_falling_onto_floor_snaps_up() {
        let mover = Rect::new(10.0, 45.0, 10.0, 10.0);
        let floor = Rect::new(0.0, 50.0, 100.0, 20.0);
        let correction = Correction::between(mover, Vector2::new(1.0, 10.0), floor);
        assert_eq!(correction, Correction::Vertical(-5.0));
    }

    #[test]
    fn test_diagonal_from_below_snaps_down() {
        // Rising steeply to the left into a ledge above
        let mover = Rect::new(40.0, 68.0, 10.0, 10.0);
        let ledge = Rect::new(0.0, 50.0, 45.0, 20.0);
        let correction = Correction::between(mover, Vector2::new(-1.0, -8.0), ledge);
        assert_eq!(correction, Correction::Vertical(2.0));
    }

    #[test]
    fn test_vertical_only_movement() {
        let mover = Rect::new(10.0, 60.0, 10.0, 10.0);
        let ceiling = Rect::new(0.0, 50.0, 100.0, 15.0);
        assert_eq!(
            Correction::between(mover, Vector2::new(0.0, -3.0), ceiling),
            Correction::Vertical(5.0)
        );
        assert_eq!(
            Correction::between(mover, Vector2::new(0.0, 3.0), ceiling),
            Correction::Vertical(-20.0)
        );
    }

    #[test]
    fn test_no_movement_no_correction() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let correction = Correction::between(rect, Vector2::ZERO, rect);
        assert_eq!(correction, Correction::None);
        assert_eq!(correction.offset(), Vector2::ZERO);
    }
}
