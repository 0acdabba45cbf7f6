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
//! Axis-aligned rectangles

use super::Vector2;

/// Axis-aligned rectangle with a top-left origin
///
/// Used for visual frame bounds, hitboxes and clickable regions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Top-left corner
    pub origin: Vector2,
    /// Width and height
    pub size: Vector2,
}

impl Rect {
    /// Create a rectangle from its left, top, width and height
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Rect {
            origin: Vector2::new(x, y),
            size: Vector2::new(width, height),
        }
    }

    /// Create a rectangle from an origin and a size
    pub const fn from_origin_size(origin: Vector2, size: Vector2) -> Self {
        Rect { origin, size }
    }

    /// Left edge
    pub fn left(&self) -> f64 {
        self.origin.x
    }

    /// Top edge
    pub fn top(&self) -> f64 {
        self.origin.y
    }

    /// Right edge
    pub fn right(&self) -> f64 {
        self.origin.x + self.size.x
    }

    /// Bottom edge
    pub fn bottom(&self) -> f64 {
        self.origin.y + self.size.y
    }

    /// Width
    pub fn width(&self) -> f64 {
        self.size.x
    }

    /// Height
    pub fn height(&self) -> f64 {
        self.size.y
    }

    /// True when either dimension is zero or negative
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Same rectangle moved by `offset`
    pub fn translated(&self, offset: Vector2) -> Rect {
        Rect::from_origin_size(self.origin + offset, self.size)
    }

    /// Half-open containment: `[left, right) x [top, bottom)`
    pub fn contains(&self, point: Vector2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }

    /// Strict interior overlap test
    ///
    /// Rectangles that only share an edge do not overlap, and an empty
    /// rectangle never overlaps anything.
    pub fn overlaps(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect::new(x, y, w, h)
    }

    #[test]
    fn test_edges() {
        let rect = r(10.0, 20.0, 30.0, 40.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.top(), 20.0);
        assert_eq!(rect.right(), 40.0);
        assert_eq!(rect.bottom(), 60.0);
    }

    #[test]
    fn test_contains_is_half_open() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vector2::new(0.0, 0.0)));
        assert!(rect.contains(Vector2::new(5.0, 9.9)));
        assert!(!rect.contains(Vector2::new(10.0, 10.0)));
        assert!(!rect.contains(Vector2::new(-0.1, 5.0)));
    }

    #[test]
    fn test_overlap() {
        let a = r(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&r(5.0, 5.0, 10.0, 10.0)));
        assert!(a.overlaps(&r(2.0, 2.0, 2.0, 2.0)));
        assert!(!a.overlaps(&r(20.0, 20.0, 5.0, 5.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = r(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&r(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&r(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_empty_rect_never_overlaps() {
        let a = r(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&r(5.0, 0.0, 0.0, 10.0)));
        assert!(!r(5.0, 5.0, 0.0, 0.0).overlaps(&a));
    }
}
