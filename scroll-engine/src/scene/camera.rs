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
//! Camera
//!
//! The camera offset is added to level coordinates to get screen
//! coordinates. Each axis is handled independently:
//!
//! ```text
//! target <= viewport/2               -> offset = 0
//! target >= level - viewport/2       -> offset = -(level - viewport)
//! otherwise                          -> offset = -(target - viewport/2)
//! ```
//!
//! so the target stays centred except near the level edges, where the view
//! pins to the bounds.

use crate::geometry::Vector2;

/// What the camera tracks
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum CameraMode {
    /// Keep the main character centred
    #[default]
    FollowMainCharacter,
    /// Keep a fixed level location centred
    Fixed(Vector2),
}

/// Camera offset for one axis
fn follow_axis(target: f64, level: f64, viewport: f64) -> f64 {
    let half = viewport / 2.0;
    if target <= half {
        0.0
    } else if target >= level - half {
        -(level - viewport)
    } else {
        -(target - half)
    }
}

/// Camera offset that keeps `target` in view of a `viewport` over a `level`
pub fn follow_offset(target: Vector2, level: Vector2, viewport: Vector2) -> Vector2 {
    Vector2::new(
        follow_axis(target.x, level.x, viewport.x),
        follow_axis(target.y, level.y, viewport.y),
    )
}

/// Viewport position over a level
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    mode: CameraMode,
    level_size: Vector2,
    viewport: Vector2,
    offset: Vector2,
}

impl Camera {
    /// Camera at the level origin following the main character
    pub fn new(level_size: Vector2, viewport: Vector2) -> Self {
        Camera {
            mode: CameraMode::default(),
            level_size,
            viewport,
            offset: Vector2::ZERO,
        }
    }

    /// Tracking mode
    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Change the tracking mode; applies on the next update
    pub fn set_mode(&mut self, mode: CameraMode) {
        self.mode = mode;
    }

    /// Current offset from level to screen coordinates
    pub fn offset(&self) -> Vector2 {
        self.offset
    }

    /// Viewport size
    pub fn viewport(&self) -> Vector2 {
        self.viewport
    }

    /// Level size
    pub fn level_size(&self) -> Vector2 {
        self.level_size
    }

    /// Recompute the offset given the main character's position
    pub fn update(&mut self, main_character: Vector2) -> Vector2 {
        let target = match self.mode {
            CameraMode::FollowMainCharacter => main_character,
            CameraMode::Fixed(location) => location,
        };
        self.offset = follow_offset(target, self.level_size, self.viewport);
        self.offset
    }

    /// Convert a level point to screen coordinates
    pub fn to_screen(&self, point: Vector2) -> Vector2 {
        point + self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEVEL: Vector2 = Vector2::new(2000.0, 600.0);
    const VIEWPORT: Vector2 = Vector2::new(800.0, 600.0);

    #[test]
    fn test_pins_and_centres() {
        assert_eq!(follow_offset(Vector2::new(50.0, 300.0), LEVEL, VIEWPORT).x, 0.0);
        assert_eq!(follow_offset(Vector2::new(1970.0, 300.0), LEVEL, VIEWPORT).x, -1200.0);
        assert_eq!(follow_offset(Vector2::new(1000.0, 300.0), LEVEL, VIEWPORT).x, -600.0);
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        assert_eq!(follow_axis(400.0, 2000.0, 800.0), 0.0);
        assert_eq!(follow_axis(1600.0, 2000.0, 800.0), -1200.0);
        assert_eq!(follow_axis(401.0, 2000.0, 800.0), -1.0);
    }

    #[test]
    fn test_level_equal_to_viewport_never_scrolls() {
        for y in [0.0, 299.0, 300.0, 301.0, 600.0] {
            assert_eq!(follow_axis(y, 600.0, 600.0), 0.0);
        }
    }

    #[test]
    fn test_fixed_mode_ignores_character() {
        let mut camera = Camera::new(LEVEL, VIEWPORT);
        camera.set_mode(CameraMode::Fixed(Vector2::new(1000.0, 0.0)));
        assert_eq!(camera.update(Vector2::new(50.0, 50.0)), Vector2::new(-600.0, 0.0));
        assert_eq!(camera.to_screen(Vector2::new(1000.0, 10.0)), Vector2::new(400.0, 10.0));
    }
}
