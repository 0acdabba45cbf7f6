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
//! Hitbox calculation
//!
//! A hitbox is derived from an entity's visual bounds every tick. Either it
//! wraps the visual bounds grown by a margin, or it has a fixed size and is
//! pinned to the visual bounds at an anchor point.
//!
//! # Stability
//!
//! Re-deriving a box from floating-point bounds can flip the last bit of a
//! coordinate even when nothing moved. [`Hitbox::recompute`] keeps the
//! previous coordinate on any axis whose source position and size did not
//! change, so an idle entity's box is bit-identical tick after tick.

use crate::error::{EngineError, Result};
use crate::geometry::{Anchor, Rect, Vector2};

/// Per-side hitbox margin
///
/// Follows CSS shorthand: one value for all sides, two values for
/// `[horizontal, vertical]`, four values for `[left, top, right, bottom]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margin {
    /// Left side
    pub left: f64,
    /// Top side
    pub top: f64,
    /// Right side
    pub right: f64,
    /// Bottom side
    pub bottom: f64,
}

impl Margin {
    /// Create a margin from its four sides
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Margin { left, top, right, bottom }
    }

    /// Same value on every side
    pub const fn uniform(value: f64) -> Self {
        Margin::new(value, value, value, value)
    }

    /// One value for left/right and one for top/bottom
    pub const fn symmetric(horizontal: f64, vertical: f64) -> Self {
        Margin::new(horizontal, vertical, horizontal, vertical)
    }

    /// Expand CSS-style shorthand
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidMargin`] unless 1, 2 or 4 values are given.
    pub fn from_shorthand(values: &[f64]) -> Result<Self> {
        match *values {
            [all] => Ok(Margin::uniform(all)),
            [horizontal, vertical] => Ok(Margin::symmetric(horizontal, vertical)),
            [left, top, right, bottom] => Ok(Margin::new(left, top, right, bottom)),
            _ => Err(EngineError::InvalidMargin { len: values.len() }),
        }
    }
}

/// Compute a hitbox from visual bounds
///
/// With a zero `size` the box is `visual` grown by `margin` on every side and
/// `anchor` is ignored. Otherwise the box has exactly `size`, its `anchor`
/// point coincides with the same point of `visual`, and it is then shifted by
/// the margin's left and top components.
///
/// # Examples
///
/// ```
/// use scroll_engine::geometry::{Anchor, Rect, Vector2};
/// use scroll_engine::hitbox::{compute_box, Margin};
///
/// let visual = Rect::new(0.0, 0.0, 100.0, 80.0);
/// let hitbox = compute_box(visual, &Margin::uniform(0.0), Vector2::new(50.0, 50.0), Anchor::Center);
/// assert_eq!(hitbox, Rect::new(25.0, 15.0, 50.0, 50.0));
/// ```
pub fn compute_box(visual: Rect, margin: &Margin, size: Vector2, anchor: Anchor) -> Rect {
    if size.is_zero() {
        return Rect::new(
            visual.left() - margin.left,
            visual.top() - margin.top,
            visual.width() + margin.left + margin.right,
            visual.height() + margin.top + margin.bottom,
        );
    }

    let origin = anchor.place(anchor.point_of(&visual), size);
    Rect::from_origin_size(origin + Vector2::new(margin.left, margin.top), size)
}

/// How an entity's hitbox is derived from its visual bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitboxSpec {
    /// Margin applied around (or offsetting) the box
    pub margin: Margin,
    /// Fixed size, or zero to wrap the visual bounds
    pub size: Vector2,
    /// Placement of a fixed-size box inside the visual bounds
    pub anchor: Anchor,
}

impl HitboxSpec {
    /// Box that wraps the visual bounds
    pub fn fit() -> Self {
        HitboxSpec::default()
    }

    /// Fixed-size box pinned at `anchor`
    pub fn fixed(size: Vector2, anchor: Anchor) -> Self {
        HitboxSpec {
            margin: Margin::default(),
            size,
            anchor,
        }
    }

    /// Replace the margin
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }
}

impl Default for HitboxSpec {
    fn default() -> Self {
        HitboxSpec {
            margin: Margin::default(),
            size: Vector2::ZERO,
            anchor: Anchor::BottomCenter,
        }
    }
}

/// A hitbox together with the inputs it was last derived from
#[derive(Debug, Clone, PartialEq)]
pub struct Hitbox {
    spec: HitboxSpec,
    rect: Rect,
    source: Option<Rect>,
}

impl Hitbox {
    /// Create a hitbox that has not been derived yet
    pub fn new(spec: HitboxSpec) -> Self {
        Hitbox {
            spec,
            rect: Rect::default(),
            source: None,
        }
    }

    /// Current box in level coordinates
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Derivation settings
    pub fn spec(&self) -> &HitboxSpec {
        &self.spec
    }

    /// Change the derivation settings
    ///
    /// The next [`Hitbox::recompute`] derives a fresh box on both axes.
    pub fn set_spec(&mut self, spec: HitboxSpec) {
        self.spec = spec;
        self.source = None;
    }

    /// Re-derive the box from the entity's current visual bounds
    pub fn recompute(&mut self, visual: Rect) -> Rect {
        let fresh = compute_box(visual, &self.spec.margin, self.spec.size, self.spec.anchor);
        let mut next = fresh;

        if let Some(previous) = self.source {
            if previous.origin.x == visual.origin.x
                && previous.size.x == visual.size.x
                && self.rect.size.x == fresh.size.x
            {
                next.origin.x = self.rect.origin.x;
            }
            if previous.origin.y == visual.origin.y
                && previous.size.y == visual.size.y
                && self.rect.size.y == fresh.size.y
            {
                next.origin.y = self.rect.origin.y;
            }
        }

        self.rect = next;
        self.source = Some(visual);
        next
    }
}
