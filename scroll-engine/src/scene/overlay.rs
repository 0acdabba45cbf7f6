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
//! Debug overlays toggled from the keyboard

use super::draw::{DrawCommand, MarkerKind, OutlineKind, SurfaceSink};
use super::input::{InputSnapshot, Key};
use crate::entity::Entity;
use crate::geometry::Vector2;
use log::debug;

/// Edge-triggered on/off switch: flips once per press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggle {
    enabled: bool,
    armed: bool,
}

impl Default for Toggle {
    fn default() -> Self {
        Toggle {
            enabled: false,
            armed: true,
        }
    }
}

impl Toggle {
    /// Whether the switch is on
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Force the switch on or off
    pub fn set(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Feed the held state of the controlling key; returns true on a flip
    pub fn feed(&mut self, held: bool) -> bool {
        if !held {
            self.armed = true;
            return false;
        }
        if self.armed {
            self.armed = false;
            self.enabled = !self.enabled;
            return true;
        }
        false
    }
}

/// Keys controlling the overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayKeys {
    /// Toggles hitbox outlines
    pub hitboxes: Key,
    /// Toggles position markers
    pub positions: Key,
    /// Toggles clickable-region outlines
    pub clickable: Key,
}

impl Default for OverlayKeys {
    fn default() -> Self {
        OverlayKeys {
            hitboxes: Key::Char('h'),
            positions: Key::Char('j'),
            clickable: Key::Char('k'),
        }
    }
}

/// Debug overlay switches
#[derive(Debug, Clone, Default)]
pub struct Overlays {
    /// Key bindings
    pub keys: OverlayKeys,
    /// Hitbox outlines
    pub hitboxes: Toggle,
    /// Position markers
    pub positions: Toggle,
    /// Clickable-region outlines
    pub clickable: Toggle,
}

impl Overlays {
    /// Update the switches from this tick's input
    pub fn listen(&mut self, input: &InputSnapshot) {
        if self.hitboxes.feed(input.is_held(self.keys.hitboxes)) {
            debug!("Hitbox overlay: {}", self.hitboxes.enabled());
        }
        if self.positions.feed(input.is_held(self.keys.positions)) {
            debug!("Position overlay: {}", self.positions.enabled());
        }
        if self.clickable.feed(input.is_held(self.keys.clickable)) {
            debug!("Clickable overlay: {}", self.clickable.enabled());
        }
    }

    /// Whether any overlay is on
    pub fn any(&self) -> bool {
        self.hitboxes.enabled() || self.positions.enabled() || self.clickable.enabled()
    }

    pub(crate) fn draw_entity<S: SurfaceSink + ?Sized>(
        &self,
        entity: &Entity,
        marker: MarkerKind,
        camera_offset: Vector2,
        sink: &mut S,
    ) {
        if self.hitboxes.enabled() {
            sink.submit(DrawCommand::Outline {
                rect: entity.hitbox().translated(camera_offset),
                kind: OutlineKind::Hitbox {
                    collided: entity.collided(),
                },
            });
        }
        if self.positions.enabled() {
            sink.submit(DrawCommand::Marker {
                at: entity.position() + camera_offset,
                kind: marker,
            });
        }
        if self.clickable.enabled() {
            sink.submit(DrawCommand::Outline {
                rect: entity.clickable_region().translated(camera_offset),
                kind: OutlineKind::Clickable(entity.highlight()),
            });
        }
    }
}
