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
//! Tiling background layers
//!
//! A background scrolls by its own kinematics and tiles itself: its
//! position is kept within `[-size, 0]` on each axis, and it is drawn as
//! four copies clipped to one tile, which always covers the tile rect.

use super::draw::{DrawCommand, SurfaceSink};
use crate::entity::{Entity, EntityId, BACKGROUND};
use crate::geometry::{Rect, Vector2};

/// One parallax layer
#[derive(Debug, Clone)]
pub struct Background {
    entity: Entity,
    z_index: i32,
    scale: f64,
}

impl Background {
    /// Wrap an entity as a background layer drawn at `z_index`
    ///
    /// Lower z-indices are drawn first.
    pub fn new(entity: Entity, z_index: i32) -> Self {
        Background {
            entity: entity.with_category(BACKGROUND),
            z_index,
            scale: 1.0,
        }
    }

    /// Scale frames so they cover `viewport` times `scalar`
    ///
    /// Frames taller (relative to their width) than the viewport are scaled
    /// to its width, the others to its height.
    pub fn scaled_to_cover(mut self, viewport: Vector2, scalar: f64) -> Self {
        let frame = self.entity.frame_size();
        if frame.x > 0.0 && frame.y > 0.0 && viewport.x > 0.0 {
            self.scale = if frame.y / frame.x <= viewport.y / viewport.x {
                viewport.y * scalar / frame.y
            } else {
                viewport.x * scalar / frame.x
            };
        }
        self
    }

    /// Compositing order key
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Draw scale applied to every frame
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Stable id, if any
    pub fn id(&self) -> Option<EntityId> {
        self.entity.id()
    }

    /// Underlying entity
    pub fn entity(&self) -> &Entity {
        &self.entity
    }

    /// Underlying entity, mutably
    pub fn entity_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }

    /// Unwrap the underlying entity
    pub fn into_entity(self) -> Entity {
        self.entity
    }

    /// Size of one drawn tile
    pub fn tile_size(&self) -> Vector2 {
        self.entity.frame_size() * self.scale
    }

    /// Advance the layer and wrap its position back into one tile
    pub fn update(&mut self, dt: f64) {
        self.entity.update(dt);
        self.wrap();
    }

    fn wrap(&mut self) {
        let tile = self.tile_size();
        let position = self.entity.position();
        let offset = Vector2::new(wrap_axis(position.x, tile.x), wrap_axis(position.y, tile.y));
        if !offset.is_zero() {
            self.entity.shift(offset);
        }
    }

    /// Emit the four clipped tiles of this layer
    ///
    /// The tile rect sits at the camera offset plus the anchor placement of
    /// one tile around the level origin.
    pub fn draw<S: SurfaceSink + ?Sized>(&self, camera_offset: Vector2, sink: &mut S) {
        let tile = self.tile_size();
        let origin = camera_offset + self.entity.anchor.place(Vector2::ZERO, tile);
        let clip = Rect::from_origin_size(origin, tile);
        let frame = self.entity.animation.current_frame().handle;
        let start = origin + self.entity.position();

        for corner in [
            Vector2::ZERO,
            Vector2::new(tile.x, 0.0),
            Vector2::new(0.0, tile.y),
            tile,
        ] {
            sink.submit(DrawCommand::Sprite {
                frame,
                dest: Rect::from_origin_size(start + corner, tile),
                clip: Some(clip),
            });
        }
    }
}

fn wrap_axis(position: f64, size: f64) -> f64 {
    if position > 0.0 {
        -size
    } else if position < -size {
        size
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{AnimationState, FrameSequence, FrameStore};
    use crate::geometry::Anchor;
    use crate::integration::KinematicState;
    use std::sync::Arc;

    fn layer(velocity: Vector2) -> Background {
        let store = Arc::new(
            FrameStore::new().with(FrameSequence::strip("sky", 5, 1, Vector2::new(100.0, 50.0)).unwrap()),
        );
        let entity = Entity::new(
            KinematicState::new(Vector2::ZERO).with_velocity(velocity),
            AnimationState::new(store, "sky").unwrap(),
        );
        Background::new(entity, 1)
    }

    #[test]
    fn test_category_is_background() {
        assert_eq!(layer(Vector2::ZERO).entity().category(), BACKGROUND);
    }

    #[test]
    fn test_wraps_within_one_tile() {
        let mut bg = layer(Vector2::new(-200.0, 30.0));
        for _ in 0..120 {
            bg.update(1.0 / 60.0);
            let p = bg.entity().position();
            assert!((-100.0..=0.0).contains(&p.x), "x out of range: {}", p.x);
            assert!((-50.0..=0.0).contains(&p.y), "y out of range: {}", p.y);
        }
    }

    #[test]
    fn test_draws_four_clipped_tiles() {
        let mut bg = layer(Vector2::ZERO);
        bg.entity_mut().kinematics.position = Vector2::new(-30.0, -10.0);
        let mut commands = Vec::new();
        bg.draw(Vector2::new(-5.0, 0.0), &mut commands);

        assert_eq!(commands.len(), 4);
        let clip = Rect::new(-5.0, 0.0, 100.0, 50.0);
        let expected = [(-35.0, -10.0), (65.0, -10.0), (-35.0, 40.0), (65.0, 40.0)];
        for (command, (x, y)) in commands.iter().zip(expected) {
            assert_eq!(
                *command,
                DrawCommand::Sprite {
                    frame: crate::animation::FrameHandle::new(5),
                    dest: Rect::new(x, y, 100.0, 50.0),
                    clip: Some(clip),
                }
            );
        }
    }

    #[test]
    fn test_anchor_moves_tile_rect() {
        let mut bg = layer(Vector2::ZERO);
        bg.entity_mut().anchor = Anchor::Center;
        let mut commands = Vec::new();
        bg.draw(Vector2::ZERO, &mut commands);
        match commands[0] {
            DrawCommand::Sprite { clip, .. } => assert_eq!(clip, Some(Rect::new(-50.0, -25.0, 100.0, 50.0))),
            _ => panic!("expected a sprite"),
        }
    }

    #[test]
    fn test_cover_scale() {
        let wide = layer(Vector2::ZERO).scaled_to_cover(Vector2::new(800.0, 600.0), 1.0);
        // 100x50 is wider than 4:3, so it is scaled to the viewport height
        assert_eq!(wide.scale(), 12.0);
        assert_eq!(wide.tile_size(), Vector2::new(1200.0, 600.0));
    }
}
