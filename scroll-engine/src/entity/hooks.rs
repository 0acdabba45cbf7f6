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
//! Entity hooks
//!
//! Per-entity callbacks are a closed set of tagged strategies. Built-in
//! variants cover the walkers, sequence toggles and collision reactions
//! levels actually use; each enum keeps a `Custom` function pointer as an
//! escape hatch so the entity type stays concrete and `Clone`.

use super::actor::Entity;
use crate::error::Result;
use crate::geometry::Vector2;
use crate::integration::Direction;
use crate::scene::PointerButtons;

/// Category of the level's main character
pub const MAIN_CHARACTER: &str = "MainCharacter";

/// Category of background layers
pub const BACKGROUND: &str = "Background";

/// Per-tick logic run before animation and physics
#[derive(Debug, Clone, Copy, Default)]
pub enum Behavior {
    /// Do nothing
    #[default]
    Inert,
    /// Run a function with full access to the entity
    Custom(fn(&mut Entity)),
}

impl Behavior {
    pub(crate) fn run(&self, entity: &mut Entity) {
        if let Behavior::Custom(hook) = self {
            hook(entity);
        }
    }
}

/// Reaction to a held-or-released input symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Built-in walker in one direction, tuned by the entity's [`Gait`]
    Walk(Direction),
    /// Called every tick with whether the symbol is held
    Custom(fn(&mut Entity, bool)),
}

impl InputAction {
    pub(crate) fn apply(&self, entity: &mut Entity, held: bool) -> Result<()> {
        match *self {
            InputAction::Walk(direction) => walk(entity, direction, held),
            InputAction::Custom(hook) => {
                hook(entity, held);
                Ok(())
            }
        }
    }

    /// Sequence names this action may switch to
    pub(crate) fn sequences(&self, gait: &Gait) -> Vec<String> {
        match *self {
            InputAction::Walk(Direction::Left) => vec![
                gait.sequence(&gait.walk, Direction::Left),
                gait.sequence(&gait.idle, Direction::Left),
            ],
            InputAction::Walk(Direction::Right) => vec![gait.walk.clone(), gait.idle.clone()],
            InputAction::Walk(_) => vec![
                gait.walk.clone(),
                gait.idle.clone(),
                gait.sequence(&gait.walk, Direction::Left),
                gait.sequence(&gait.idle, Direction::Left),
            ],
            InputAction::Custom(_) => Vec::new(),
        }
    }
}

fn walk(entity: &mut Entity, direction: Direction, held: bool) -> Result<()> {
    let speed = entity.gait.speed;
    let signed = match direction {
        Direction::Left | Direction::Up => -speed,
        Direction::Right | Direction::Down => speed,
    };
    let current = match direction {
        Direction::Left | Direction::Right => entity.kinematics.velocity.x,
        Direction::Up | Direction::Down => entity.kinematics.velocity.y,
    };

    // Only undo our own velocity; another held key may have replaced it
    if !held && current != signed {
        return Ok(());
    }

    let facing = if held && matches!(direction, Direction::Left | Direction::Right) {
        direction
    } else {
        entity.kinematics.facing
    };
    let base = if held { &entity.gait.walk } else { &entity.gait.idle };
    let name = entity.gait.sequence(base, facing);
    entity.animation.change_sequence(&name)?;

    entity.kinematics.facing = facing;
    let velocity = if held { signed } else { 0.0 };
    match direction {
        Direction::Left | Direction::Right => entity.kinematics.velocity.x = velocity,
        Direction::Up | Direction::Down => entity.kinematics.velocity.y = velocity,
    }
    Ok(())
}

/// Reaction to touching an entity of a given category
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollisionReaction {
    /// Switch the listening entity to this sequence
    SwitchSequence(String),
    /// Called with the listening entity and the entity it touched
    Custom(fn(&mut Entity, &Entity)),
}

impl CollisionReaction {
    pub(crate) fn apply(&self, entity: &mut Entity, other: &Entity) -> Result<()> {
        match self {
            CollisionReaction::SwitchSequence(name) => entity.animation.change_sequence(name),
            CollisionReaction::Custom(hook) => {
                hook(entity, other);
                Ok(())
            }
        }
    }
}

/// Reaction to the pointer resting on an entity
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PointerAction {
    /// Only record hover and click flags
    #[default]
    Ignore,
    /// Toggle between two sequences on a primary click
    ///
    /// After a toggle the entity ignores clicks until its clock reaches
    /// `rearm_after` seconds while hovered.
    ToggleSequence {
        /// Sequence shown when not toggled
        primary: String,
        /// Sequence shown when toggled
        alternate: String,
        /// Seconds before another click is accepted
        rearm_after: f64,
    },
    /// Called with the pointer position and buttons
    Custom(fn(&mut Entity, Vector2, PointerButtons)),
}

impl PointerAction {
    pub(crate) fn apply(&self, entity: &mut Entity, position: Vector2, buttons: PointerButtons) -> Result<()> {
        match self {
            PointerAction::Ignore => Ok(()),
            PointerAction::ToggleSequence {
                primary,
                alternate,
                rearm_after,
            } => {
                if entity.latch.armed && buttons.primary {
                    entity.latch.armed = false;
                    let next = if entity.animation.active_name() == alternate {
                        primary
                    } else {
                        alternate
                    };
                    entity.animation.change_sequence(next)
                } else {
                    if entity.time >= *rearm_after {
                        entity.time = 0.0;
                        entity.latch.armed = true;
                    }
                    Ok(())
                }
            }
            PointerAction::Custom(hook) => {
                hook(entity, position, buttons);
                Ok(())
            }
        }
    }
}

/// Click debouncing state for [`PointerAction::ToggleSequence`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickLatch {
    /// Whether the next primary click is accepted
    pub armed: bool,
}

/// Region of an entity that reacts to the pointer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClickableSpace {
    /// The visual frame bounds
    #[default]
    Sprite,
    /// The hitbox
    Hitbox,
}

/// Tuning for the built-in walkers
#[derive(Debug, Clone, PartialEq)]
pub struct Gait {
    /// Walking speed in pixels per second
    pub speed: f64,
    /// Sequence played while walking
    pub walk: String,
    /// Sequence played while standing
    pub idle: String,
    /// Prefix of mirrored sequences used when facing left
    pub mirror_prefix: String,
}

impl Gait {
    /// Sequence name for `base` when facing `facing`
    pub fn sequence(&self, base: &str, facing: Direction) -> String {
        match facing {
            Direction::Left => format!("{}{}", self.mirror_prefix, base),
            _ => base.to_string(),
        }
    }
}

impl Default for Gait {
    fn default() -> Self {
        Gait {
            speed: 200.0,
            walk: "Walk".to_string(),
            idle: "Idle".to_string(),
            mirror_prefix: "xflip_".to_string(),
        }
    }
}
