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
//! Relative placements

use super::{Rect, Vector2};

/// One of the nine relative placements of a box against another
///
/// For an entity, the anchor says which point of the visual frame sits on
/// the logical position. For a hitbox, it says which point of the hitbox
/// coincides with the same point of the visual bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Anchor {
    /// Top-left corner
    #[default]
    TopLeft,
    /// Middle of the top edge
    TopCenter,
    /// Top-right corner
    TopRight,
    /// Middle of the right edge
    CenterRight,
    /// Bottom-right corner
    BottomRight,
    /// Middle of the bottom edge
    BottomCenter,
    /// Bottom-left corner
    BottomLeft,
    /// Middle of the left edge
    CenterLeft,
    /// Center
    Center,
}

impl Anchor {
    /// All nine placements, clockwise from the top-left corner
    pub const ALL: [Anchor; 9] = [
        Anchor::TopLeft,
        Anchor::TopCenter,
        Anchor::TopRight,
        Anchor::CenterRight,
        Anchor::BottomRight,
        Anchor::BottomCenter,
        Anchor::BottomLeft,
        Anchor::CenterLeft,
        Anchor::Center,
    ];

    /// Fraction of a box's size at which this anchor point lies
    ///
    /// `(0, 0)` is the top-left corner and `(1, 1)` the bottom-right one.
    pub fn factors(&self) -> Vector2 {
        match self {
            Anchor::TopLeft => Vector2::new(0.0, 0.0),
            Anchor::TopCenter => Vector2::new(0.5, 0.0),
            Anchor::TopRight => Vector2::new(1.0, 0.0),
            Anchor::CenterRight => Vector2::new(1.0, 0.5),
            Anchor::BottomRight => Vector2::new(1.0, 1.0),
            Anchor::BottomCenter => Vector2::new(0.5, 1.0),
            Anchor::BottomLeft => Vector2::new(0.0, 1.0),
            Anchor::CenterLeft => Vector2::new(0.0, 0.5),
            Anchor::Center => Vector2::new(0.5, 0.5),
        }
    }

    /// Offset from a box's top-left corner to this anchor point
    pub fn offset(&self, size: Vector2) -> Vector2 {
        size.scale(self.factors())
    }

    /// Anchor point of `rect`
    pub fn point_of(&self, rect: &Rect) -> Vector2 {
        rect.origin + self.offset(rect.size)
    }

    /// Top-left corner of a box of `size` whose anchor point sits on `point`
    pub fn place(&self, point: Vector2, size: Vector2) -> Vector2 {
        point - self.offset(size)
    }
}
