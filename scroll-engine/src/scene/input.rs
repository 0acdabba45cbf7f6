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
//! Per-tick input snapshots

use crate::geometry::Vector2;
use std::collections::BTreeSet;

/// Discrete input symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Space bar
    Space,
    /// Return
    Enter,
    /// Escape
    Escape,
    /// A character key, lowercase
    Char(char),
}

/// Symbols held down during one tick
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    held: BTreeSet<Key>,
}

impl InputSnapshot {
    /// Snapshot with nothing held
    pub fn new() -> Self {
        InputSnapshot::default()
    }

    /// Mark `key` as held
    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    /// Mark `key` as released
    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    /// Whether `key` is held
    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Held symbols in order
    pub fn held(&self) -> impl Iterator<Item = Key> + '_ {
        self.held.iter().copied()
    }
}

impl FromIterator<Key> for InputSnapshot {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        InputSnapshot {
            held: iter.into_iter().collect(),
        }
    }
}

/// Pointer button state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PointerButtons {
    /// Primary (usually left) button
    pub primary: bool,
    /// Middle button
    pub middle: bool,
    /// Secondary (usually right) button
    pub secondary: bool,
}

impl PointerButtons {
    /// No button down
    pub const fn none() -> Self {
        PointerButtons {
            primary: false,
            middle: false,
            secondary: false,
        }
    }

    /// Only the primary button down
    pub const fn primary() -> Self {
        PointerButtons {
            primary: true,
            middle: false,
            secondary: false,
        }
    }

    /// Whether any button is down
    pub fn any(&self) -> bool {
        self.primary || self.middle || self.secondary
    }
}

/// Pointer position in screen coordinates plus its buttons
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    /// Position relative to the viewport's top-left corner
    pub position: Vector2,
    /// Buttons held
    pub buttons: PointerButtons,
}

impl PointerState {
    /// Create a pointer state
    pub fn new(position: Vector2, buttons: PointerButtons) -> Self {
        PointerState { position, buttons }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_press_release() {
        let mut input = InputSnapshot::new();
        input.press(Key::Right);
        input.press(Key::Char('h'));
        assert!(input.is_held(Key::Right));
        assert!(!input.is_held(Key::Left));

        input.release(Key::Right);
        assert_eq!(input.held().collect::<Vec<_>>(), vec![Key::Char('h')]);
    }

    #[test]
    fn test_keys_order_arrows_first() {
        let input: InputSnapshot = [Key::Char('a'), Key::Down, Key::Left].into_iter().collect();
        assert_eq!(
            input.held().collect::<Vec<_>>(),
            vec![Key::Left, Key::Down, Key::Char('a')]
        );
    }

    #[test]
    fn test_buttons() {
        assert!(!PointerButtons::none().any());
        assert!(PointerButtons::primary().any());
    }
}
