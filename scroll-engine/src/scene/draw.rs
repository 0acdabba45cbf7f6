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
//! Draw commands handed to the renderer
//!
//! The engine never touches pixels. Each frame it emits an ordered list of
//! [`DrawCommand`]s into a [`SurfaceSink`]; the renderer blits them in the
//! order received. All coordinates are screen coordinates.

use crate::animation::FrameHandle;
use crate::entity::PointerHighlight;
use crate::geometry::{Rect, Vector2};

/// An opaque RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Color {
    /// Create a colour from its channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }

    /// Pure blue, the default level backdrop
    pub const BLUE: Color = Color::rgb(0, 0, 255);
}

/// What a debug outline shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutlineKind {
    /// A hitbox; `collided` is set when the last collision pass overlapped it
    Hitbox {
        /// Overlap flag from the last collision pass
        collided: bool,
    },
    /// A clickable region with its pointer highlight
    Clickable(PointerHighlight),
}

/// What a debug marker shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// Logical position of the main character
    MainCharacter,
    /// Logical position of any other entity
    Entity,
}

/// One drawing instruction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Fill the viewport
    Clear {
        /// Fill colour
        color: Color,
    },
    /// Blit a frame scaled into `dest`, optionally clipped
    Sprite {
        /// Frame to blit
        frame: FrameHandle,
        /// Destination rectangle
        dest: Rect,
        /// Only pixels inside this rectangle are drawn
        clip: Option<Rect>,
    },
    /// Stroke a rectangle outline
    Outline {
        /// Rectangle to stroke
        rect: Rect,
        /// What the outline represents
        kind: OutlineKind,
    },
    /// Mark a point
    Marker {
        /// Marked point
        at: Vector2,
        /// What the marker represents
        kind: MarkerKind,
    },
}

/// Receiver of draw commands
pub trait SurfaceSink {
    /// Accept the next command
    fn submit(&mut self, command: DrawCommand);
}

impl SurfaceSink for Vec<DrawCommand> {
    fn submit(&mut self, command: DrawCommand) {
        self.push(command);
    }
}
