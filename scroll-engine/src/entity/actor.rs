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
//! The simulated actor

use super::hooks::{
    Behavior, ClickLatch, ClickableSpace, CollisionReaction, Gait, InputAction, PointerAction,
    MAIN_CHARACTER,
};
use super::id::{EntityId, WorkspaceId};
use crate::animation::AnimationState;
use crate::error::Result;
use crate::geometry::{Anchor, Rect, Vector2};
use crate::integration::{integrate, Direction, KinematicState};
use crate::scene::{InputSnapshot, Key, PointerButtons};
use std::collections::{BTreeMap, HashMap};

/// Pointer highlight recorded for the debug overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointerHighlight {
    /// Not under the pointer
    #[default]
    Idle,
    /// Under the pointer
    Hover,
    /// Under the pointer with the primary button down
    Clicked,
}

/// One simulated actor: kinematics, animation, hitbox and hooks
///
/// # Update pipeline
///
/// [`Entity::update`] runs, in order: the entity clock, the behavior hook,
/// the animation clock, the integrator, the hitbox refresh, and finally
/// clears the transient pointer flags set by dispatch earlier in the tick.
#[derive(Debug, Clone)]
pub struct Entity {
    id: Option<EntityId>,
    category: String,
    /// Motion state and hitbox
    pub kinematics: KinematicState,
    /// Animation playback state
    pub animation: AnimationState,
    /// How the visual frame is placed relative to the logical position
    pub anchor: Anchor,
    /// Per-tick hook
    pub behavior: Behavior,
    /// Which region reacts to the pointer
    pub clickable_space: ClickableSpace,
    /// Tuning for the built-in walkers
    pub gait: Gait,
    /// Seconds accumulated by [`Entity::update`]; pointer actions may reset it
    pub time: f64,
    pub(crate) latch: ClickLatch,
    input_listeners: BTreeMap<Key, InputAction>,
    collision_reactions: HashMap<String, CollisionReaction>,
    pointer_action: PointerAction,
    is_clicked: bool,
    is_hover: bool,
    highlight: PointerHighlight,
    collided: bool,
    owner: Option<WorkspaceId>,
}

impl Entity {
    /// Create an entity with no id, no category and no hooks
    ///
    /// The hitbox is derived immediately so the entity can be hit-tested
    /// before its first update.
    pub fn new(kinematics: KinematicState, animation: AnimationState) -> Self {
        let mut entity = Entity {
            id: None,
            category: String::new(),
            kinematics,
            animation,
            anchor: Anchor::TopLeft,
            behavior: Behavior::Inert,
            clickable_space: ClickableSpace::Sprite,
            gait: Gait::default(),
            time: 0.0,
            latch: ClickLatch::default(),
            input_listeners: BTreeMap::new(),
            collision_reactions: HashMap::new(),
            pointer_action: PointerAction::Ignore,
            is_clicked: false,
            is_hover: false,
            highlight: PointerHighlight::Idle,
            collided: false,
            owner: None,
        };
        entity.refresh_hitbox();
        entity
    }

    /// Create a main character: bottom-center anchor and arrow-key walkers
    pub fn main_character(kinematics: KinematicState, animation: AnimationState) -> Self {
        Entity::new(kinematics, animation)
            .with_category(MAIN_CHARACTER)
            .with_anchor(Anchor::BottomCenter)
            .on_key(Key::Left, InputAction::Walk(Direction::Left))
            .on_key(Key::Right, InputAction::Walk(Direction::Right))
            .on_key(Key::Up, InputAction::Walk(Direction::Up))
            .on_key(Key::Down, InputAction::Walk(Direction::Down))
    }

    /// Set the stable id
    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the category other entities key their collision reactions on
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the anchor and re-derive the hitbox
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self.refresh_hitbox();
        self
    }

    /// Set the per-tick behavior
    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Set which region reacts to the pointer
    pub fn with_clickable_space(mut self, space: ClickableSpace) -> Self {
        self.clickable_space = space;
        self
    }

    /// Set the walker tuning
    pub fn with_gait(mut self, gait: Gait) -> Self {
        self.gait = gait;
        self
    }

    /// Listen to an input symbol, replacing any previous listener for it
    pub fn on_key(mut self, key: Key, action: InputAction) -> Self {
        self.input_listeners.insert(key, action);
        self
    }

    /// React to touching entities of `category`
    pub fn on_collision(mut self, category: impl Into<String>, reaction: CollisionReaction) -> Self {
        self.collision_reactions.insert(category.into(), reaction);
        self
    }

    /// React to the pointer
    pub fn on_pointer(mut self, action: PointerAction) -> Self {
        self.pointer_action = action;
        self
    }

    /// Stable id, if any
    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    pub(crate) fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    /// Category string
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Workspace currently holding this entity
    pub fn owner(&self) -> Option<WorkspaceId> {
        self.owner
    }

    pub(crate) fn set_owner(&mut self, owner: Option<WorkspaceId>) {
        self.owner = owner;
    }

    /// Whether the pointer was over this entity this tick
    pub fn is_hover(&self) -> bool {
        self.is_hover
    }

    /// Whether the entity was clicked this tick
    pub fn is_clicked(&self) -> bool {
        self.is_clicked
    }

    /// Pointer state captured by the last update, for drawing
    pub fn highlight(&self) -> PointerHighlight {
        self.highlight
    }

    /// Whether the last collision pass found an overlap with this entity
    pub fn collided(&self) -> bool {
        self.collided
    }

    pub(crate) fn set_collided(&mut self, collided: bool) {
        self.collided = collided;
    }

    /// Logical position
    pub fn position(&self) -> Vector2 {
        self.kinematics.position
    }

    /// Current hitbox
    pub fn hitbox(&self) -> Rect {
        self.kinematics.hitbox()
    }

    /// Size of the frame currently shown
    pub fn frame_size(&self) -> Vector2 {
        self.animation.current_frame().size
    }

    /// Bounds of the frame currently shown, placed by the anchor
    pub fn visual_bounds(&self) -> Rect {
        let size = self.frame_size();
        Rect::from_origin_size(self.anchor.place(self.kinematics.position, size), size)
    }

    /// Lowest point of the visual footprint, used for depth sorting
    pub fn max_y(&self) -> f64 {
        self.visual_bounds().bottom()
    }

    /// Region hit-tested against the pointer, in level coordinates
    pub fn clickable_region(&self) -> Rect {
        match self.clickable_space {
            ClickableSpace::Sprite => self.visual_bounds(),
            ClickableSpace::Hitbox => self.hitbox(),
        }
    }

    /// Advance the entity by one tick
    pub fn update(&mut self, dt: f64) {
        self.time += dt;
        let behavior = self.behavior;
        behavior.run(self);
        self.animation.advance(dt);
        integrate(&mut self.kinematics, dt);
        self.refresh_hitbox();
        self.clear_pointer_flags();
    }

    /// Re-derive the hitbox and clear pointer flags without advancing time
    pub fn refresh(&mut self) {
        self.refresh_hitbox();
        self.clear_pointer_flags();
    }

    /// Re-derive the hitbox from the current visual bounds
    pub fn refresh_hitbox(&mut self) -> Rect {
        let visual = self.visual_bounds();
        self.kinematics.refresh_hitbox(visual)
    }

    /// Displace the entity without it counting as movement
    pub fn shift(&mut self, offset: Vector2) {
        self.kinematics.shift(offset);
        self.refresh_hitbox();
    }

    /// Feed every listener the state of its input symbol
    ///
    /// # Errors
    ///
    /// Propagates a sequence switch to an unknown name.
    pub fn listen_input(&mut self, input: &InputSnapshot) -> Result<()> {
        if self.input_listeners.is_empty() {
            return Ok(());
        }
        let listeners: Vec<(Key, InputAction)> =
            self.input_listeners.iter().map(|(key, action)| (*key, *action)).collect();
        for (key, action) in listeners {
            action.apply(self, input.is_held(key))?;
        }
        Ok(())
    }

    /// Record that the pointer rests on this entity and run its pointer action
    ///
    /// # Errors
    ///
    /// Propagates a sequence switch to an unknown name.
    pub fn listen_pointer(&mut self, position: Vector2, buttons: PointerButtons) -> Result<()> {
        self.is_hover = true;
        let action = self.pointer_action.clone();
        action.apply(self, position, buttons)?;
        if buttons.primary {
            self.is_clicked = true;
        }
        Ok(())
    }

    /// Run the reaction registered for `other`'s category, if any
    ///
    /// # Errors
    ///
    /// Propagates a sequence switch to an unknown name.
    pub fn notify_collision(&mut self, other: &Entity) -> Result<()> {
        match self.collision_reactions.get(other.category()).cloned() {
            Some(reaction) => reaction.apply(self, other),
            None => Ok(()),
        }
    }

    /// Check that every sequence a hook can switch to exists and fits the
    /// animation's frame limit
    ///
    /// # Errors
    ///
    /// Returns [`UnknownSequence`](crate::error::EngineError::UnknownSequence)
    /// naming the first missing sequence, or
    /// [`InvalidFrameLimit`](crate::error::EngineError::InvalidFrameLimit) for the first one the
    /// frame limit does not fit.
    pub fn validate(&self) -> Result<()> {
        let mut names: Vec<String> = Vec::new();
        for action in self.input_listeners.values() {
            names.extend(action.sequences(&self.gait));
        }
        for reaction in self.collision_reactions.values() {
            if let CollisionReaction::SwitchSequence(name) = reaction {
                names.push(name.clone());
            }
        }
        if let PointerAction::ToggleSequence { primary, alternate, .. } = &self.pointer_action {
            names.push(primary.clone());
            names.push(alternate.clone());
        }

        names
            .iter()
            .try_for_each(|name| self.animation.check_sequence(name))
    }

    fn clear_pointer_flags(&mut self) {
        self.highlight = if self.is_clicked {
            PointerHighlight::Clicked
        } else if self.is_hover {
            PointerHighlight::Hover
        } else {
            PointerHighlight::Idle
        };
        self.is_clicked = false;
        self.is_hover = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{FrameSequence, FrameStore};
    use crate::error::EngineError;
    use crate::hitbox::HitboxSpec;
    use std::sync::Arc;

    const DT: f64 = 1.0 / 60.0;

    fn store() -> Arc<FrameStore> {
        let size = Vector2::new(40.0, 80.0);
        let mut store = FrameStore::new();
        for (name, count) in [("Idle", 4), ("Walk", 6), ("xflip_Idle", 4), ("xflip_Walk", 6)] {
            store.insert(FrameSequence::strip(name, 0, count, size).unwrap());
        }
        store.insert(FrameSequence::strip("chair", 100, 1, Vector2::new(30.0, 30.0)).unwrap());
        store.insert(FrameSequence::strip("negative_chair", 200, 1, Vector2::new(30.0, 30.0)).unwrap());
        Arc::new(store)
    }

    fn hero() -> Entity {
        let kinematics = KinematicState::new(Vector2::new(50.0, 200.0))
            .collidable()
            .with_hitbox(HitboxSpec::fixed(Vector2::new(20.0, 20.0), Anchor::Center));
        Entity::main_character(kinematics, AnimationState::new(store(), "Idle").unwrap())
    }

    fn chair() -> Entity {
        Entity::new(
            KinematicState::new(Vector2::new(100.0, 100.0)),
            AnimationState::new(store(), "chair").unwrap(),
        )
    }

    #[test]
    fn test_visual_bounds_follow_anchor() {
        let entity = hero();
        assert_eq!(entity.visual_bounds(), Rect::new(30.0, 120.0, 40.0, 80.0));
        assert_eq!(entity.max_y(), 200.0);
        assert_eq!(entity.hitbox(), Rect::new(40.0, 150.0, 20.0, 20.0));
        assert_eq!(entity.clickable_region(), entity.visual_bounds());
    }

    #[test]
    fn test_walk_right_then_release() {
        let mut entity = hero();
        let mut input = InputSnapshot::new();
        input.press(Key::Right);
        entity.listen_input(&input).unwrap();
        assert_eq!(entity.kinematics.velocity.x, 200.0);
        assert_eq!(entity.kinematics.facing, Direction::Right);
        assert_eq!(entity.animation.active_name(), "Walk");

        input.release(Key::Right);
        entity.listen_input(&input).unwrap();
        assert_eq!(entity.kinematics.velocity.x, 0.0);
        assert_eq!(entity.animation.active_name(), "Idle");
    }

    #[test]
    fn test_release_keeps_foreign_velocity() {
        let mut entity = hero();
        let mut input = InputSnapshot::new();
        input.press(Key::Left);
        entity.listen_input(&input).unwrap();
        assert_eq!(entity.animation.active_name(), "xflip_Walk");

        // A different source changed the velocity while left was held
        entity.kinematics.velocity.x = 120.0;
        input.release(Key::Left);
        entity.listen_input(&input).unwrap();
        assert_eq!(entity.kinematics.velocity.x, 120.0);
        assert_eq!(entity.animation.active_name(), "xflip_Walk");
    }

    #[test]
    fn test_vertical_walk_keeps_facing() {
        let mut entity = hero();
        entity.kinematics.facing = Direction::Right;
        let mut input = InputSnapshot::new();
        input.press(Key::Down);
        entity.listen_input(&input).unwrap();
        assert_eq!(entity.kinematics.velocity.y, 200.0);
        assert_eq!(entity.kinematics.facing, Direction::Right);
        assert_eq!(entity.animation.active_name(), "Walk");
    }

    #[test]
    fn test_update_moves_and_clears_flags() {
        let mut entity = hero();
        entity.kinematics.velocity = Vector2::new(60.0, 0.0);
        entity.listen_pointer(Vector2::new(50.0, 150.0), PointerButtons::primary()).unwrap();
        assert!(entity.is_hover() && entity.is_clicked());

        entity.update(DT);
        assert!((entity.position().x - 51.0).abs() < 1e-9);
        assert!((entity.time - DT).abs() < 1e-12);
        assert!(!entity.is_hover() && !entity.is_clicked());
        assert_eq!(entity.highlight(), PointerHighlight::Clicked);
        assert!((entity.hitbox().left() - 41.0).abs() < 1e-9);

        entity.update(DT);
        assert_eq!(entity.highlight(), PointerHighlight::Idle);
    }

    #[test]
    fn test_behavior_runs_before_physics() {
        fn push_right(entity: &mut Entity) {
            entity.kinematics.velocity.x = 600.0;
        }
        let mut entity = hero().with_behavior(Behavior::Custom(push_right));
        entity.update(0.1);
        assert!((entity.position().x - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_toggle_sequence_latch() {
        let mut entity = chair().on_pointer(PointerAction::ToggleSequence {
            primary: "chair".to_string(),
            alternate: "negative_chair".to_string(),
            rearm_after: 0.5,
        });
        let at = Vector2::new(110.0, 110.0);

        // Starts disarmed; a click before the clock reaches 0.5s is ignored
        entity.listen_pointer(at, PointerButtons::primary()).unwrap();
        assert_eq!(entity.animation.active_name(), "chair");

        entity.time = 0.5;
        entity.listen_pointer(at, PointerButtons::none()).unwrap();
        assert_eq!(entity.time, 0.0);

        entity.listen_pointer(at, PointerButtons::primary()).unwrap();
        assert_eq!(entity.animation.active_name(), "negative_chair");

        // Disarmed again until the clock passes the threshold
        entity.listen_pointer(at, PointerButtons::primary()).unwrap();
        assert_eq!(entity.animation.active_name(), "negative_chair");
    }

    #[test]
    fn test_collision_reaction_by_category() {
        let mut chair = chair().on_collision(
            MAIN_CHARACTER,
            CollisionReaction::SwitchSequence("negative_chair".to_string()),
        );
        let stranger = Entity::new(
            KinematicState::new(Vector2::ZERO),
            AnimationState::new(store(), "chair").unwrap(),
        );
        chair.notify_collision(&stranger).unwrap();
        assert_eq!(chair.animation.active_name(), "chair");

        chair.notify_collision(&hero()).unwrap();
        assert_eq!(chair.animation.active_name(), "negative_chair");
    }

    #[test]
    fn test_validate_reports_missing_sequence() {
        assert!(hero().validate().is_ok());

        let broken = chair().on_collision(MAIN_CHARACTER, CollisionReaction::SwitchSequence("gone".to_string()));
        assert_eq!(
            broken.validate(),
            Err(EngineError::UnknownSequence { name: "gone".to_string() })
        );

        let walker = chair()
            .with_gait(Gait {
                mirror_prefix: "mirror_".to_string(),
                ..Gait::default()
            })
            .on_key(Key::Left, InputAction::Walk(Direction::Left));
        assert_eq!(
            walker.validate(),
            Err(EngineError::UnknownSequence { name: "mirror_Walk".to_string() })
        );
    }

    #[test]
    fn test_validate_checks_frame_limit_against_targets() {
        let animation = AnimationState::builder(store(), "Walk").frame_limit(6).build().unwrap();
        let walker = Entity::main_character(KinematicState::new(Vector2::new(50.0, 200.0)), animation);
        assert_eq!(
            walker.validate(),
            Err(EngineError::InvalidFrameLimit {
                name: "xflip_Idle".to_string(),
                limit: 6,
                len: 4
            })
        );
    }

    #[test]
    fn test_failed_walk_switch_leaves_state_untouched() {
        let animation = AnimationState::builder(store(), "Walk").frame_limit(6).build().unwrap();
        let mut walker = Entity::main_character(KinematicState::new(Vector2::new(50.0, 200.0)), animation);
        let mut input = InputSnapshot::new();
        input.press(Key::Right);
        walker.listen_input(&input).unwrap();
        assert_eq!(walker.kinematics.velocity.x, 200.0);

        input.release(Key::Right);
        assert!(walker.listen_input(&input).is_err());
        assert_eq!(walker.kinematics.velocity.x, 200.0);
        assert_eq!(walker.animation.active_name(), "Walk");
    }

    #[test]
    fn test_shift_is_not_movement() {
        let mut entity = hero();
        entity.shift(Vector2::new(10.0, 0.0));
        assert_eq!(entity.kinematics.movement(), Vector2::ZERO);
        assert_eq!(entity.hitbox().left(), 50.0);
    }
}
