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
//! Level workspace
//!
//! [`LevelWorkSpace`] owns everything in a level and drives one tick:
//!
//! 1. update the main character
//! 2. update background layers in z-order
//! 3. update foreground entities in depth order
//! 4. recompute the camera offset
//! 5. resolve the main character against the foreground entities
//!
//! Drawing interleaves the main character with the depth-sorted foreground:
//! it is drawn just before the first entity whose visual bottom lies below
//! its own. Pointer hit-testing walks the same order backwards so the
//! front-most region wins.

use super::background::Background;
use super::camera::{Camera, CameraMode};
use super::draw::{Color, DrawCommand, MarkerKind, SurfaceSink};
use super::input::{InputSnapshot, PointerState};
use super::overlay::{OverlayKeys, Overlays};
use crate::collision;
use crate::config::EngineConfig;
use crate::entity::{Entity, EntityId, WorkspaceId};
use crate::error::{EngineError, Result};
use crate::geometry::Vector2;
use log::{debug, info, trace};
use std::collections::HashSet;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A playable level: backgrounds, foreground entities and a main character
#[derive(Debug, Clone)]
pub struct LevelWorkSpace {
    id: WorkspaceId,
    config: EngineConfig,
    level_size: Vector2,
    main_character: Entity,
    backgrounds: Vec<Background>,
    entities: Vec<Entity>,
    backgrounds_sorted: bool,
    entities_sorted: bool,
    camera: Camera,
    backdrop: Color,
    overlays: Overlays,
    registry: Registry,
}

/// Builder for [`LevelWorkSpace`]
#[derive(Debug, Clone)]
pub struct LevelBuilder {
    level_size: Vector2,
    main_character: Entity,
    config: EngineConfig,
    backgrounds: Vec<Background>,
    entities: Vec<Entity>,
    backdrop: Color,
    camera_mode: CameraMode,
    overlay_keys: OverlayKeys,
}

impl LevelBuilder {
    /// Tick rate and viewport
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Add a background layer
    pub fn background(mut self, background: Background) -> Self {
        self.backgrounds.push(background);
        self
    }

    /// Add a foreground entity
    pub fn entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    /// Add several foreground entities
    pub fn entities(mut self, entities: impl IntoIterator<Item = Entity>) -> Self {
        self.entities.extend(entities);
        self
    }

    /// Colour filling the viewport before backgrounds are drawn
    pub fn backdrop(mut self, color: Color) -> Self {
        self.backdrop = color;
        self
    }

    /// What the camera tracks
    pub fn camera_mode(mut self, mode: CameraMode) -> Self {
        self.camera_mode = mode;
        self
    }

    /// Keys toggling the debug overlays
    pub fn overlay_keys(mut self, keys: OverlayKeys) -> Self {
        self.overlay_keys = keys;
        self
    }

    /// Validate everything, register ids and settle the level
    ///
    /// Settling sorts both collections, derives every hitbox without
    /// advancing time, places the camera and runs one collision pass.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration, a hook naming an unknown sequence,
    /// or a duplicate id.
    pub fn build(self) -> Result<LevelWorkSpace> {
        self.config.validate()?;

        let id = WorkspaceId::next();
        let mut registry = Registry::default();

        let mut main_character = self.main_character;
        let mut backgrounds = self.backgrounds;
        let mut entities = self.entities;

        // Claim authored ids before handing out fresh ones
        for explicit in [true, false] {
            if main_character.id().is_some() == explicit {
                registry.register(id, &mut main_character)?;
            }
            for background in &mut backgrounds {
                if background.id().is_some() == explicit {
                    registry.register(id, background.entity_mut())?;
                }
            }
            for entity in &mut entities {
                if entity.id().is_some() == explicit {
                    registry.register(id, entity)?;
                }
            }
        }

        let mut camera = Camera::new(self.level_size, self.config.viewport);
        camera.set_mode(self.camera_mode);

        let mut level = LevelWorkSpace {
            id,
            config: self.config,
            level_size: self.level_size,
            main_character,
            backgrounds,
            entities,
            backgrounds_sorted: false,
            entities_sorted: false,
            camera,
            backdrop: self.backdrop,
            overlays: Overlays {
                keys: self.overlay_keys,
                ..Overlays::default()
            },
            registry,
        };

        level.settle()?;
        info!(
            "{} ready: level {}, viewport {}, {} backgrounds, {} entities",
            level.id,
            level.level_size,
            level.config.viewport,
            level.backgrounds.len(),
            level.entities.len()
        );
        Ok(level)
    }
}

/// Ids in use within one workspace
#[derive(Debug, Clone, Default)]
struct Registry {
    ids: HashSet<EntityId>,
    next_id: u64,
}

impl Registry {
    /// Validate `entity`, give it an id if it has none and claim that id
    fn register(&mut self, owner: WorkspaceId, entity: &mut Entity) -> Result<EntityId> {
        entity.validate()?;
        let id = match entity.id() {
            Some(id) if self.ids.contains(&id) => return Err(EngineError::DuplicateEntity(id)),
            Some(id) => id,
            None => {
                let id = self.allocate();
                entity.assign_id(id);
                id
            }
        };
        self.ids.insert(id);
        entity.set_owner(Some(owner));
        Ok(id)
    }

    fn allocate(&mut self) -> EntityId {
        while self.ids.contains(&EntityId::new(self.next_id)) {
            self.next_id += 1;
        }
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

impl LevelWorkSpace {
    /// Start building a level of `level_size` around `main_character`
    pub fn builder(level_size: Vector2, main_character: Entity) -> LevelBuilder {
        LevelBuilder {
            level_size,
            main_character,
            config: EngineConfig::default(),
            backgrounds: Vec::new(),
            entities: Vec::new(),
            backdrop: Color::BLUE,
            camera_mode: CameraMode::default(),
            overlay_keys: OverlayKeys::default(),
        }
    }

    /// Handle entities use to refer back to this level
    pub fn id(&self) -> WorkspaceId {
        self.id
    }

    /// Configuration the level was built with
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Tick duration in seconds
    pub fn dt(&self) -> f64 {
        self.config.dt()
    }

    /// Level size in pixels
    pub fn level_size(&self) -> Vector2 {
        self.level_size
    }

    /// Camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Current camera offset
    pub fn camera_offset(&self) -> Vector2 {
        self.camera.offset()
    }

    /// Change what the camera tracks and re-place it
    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        self.camera.set_mode(mode);
        self.camera.update(self.main_character.position());
    }

    /// Main character
    pub fn main_character(&self) -> &Entity {
        &self.main_character
    }

    /// Main character, mutably
    pub fn main_character_mut(&mut self) -> &mut Entity {
        &mut self.main_character
    }

    /// Foreground entities in their cached depth order
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Background layers in their cached z-order
    pub fn backgrounds(&self) -> &[Background] {
        &self.backgrounds
    }

    /// Find any entity by id, including the main character and backgrounds
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        if self.main_character.id() == Some(id) {
            return Some(&self.main_character);
        }
        self.entities
            .iter()
            .find(|entity| entity.id() == Some(id))
            .or_else(|| {
                self.backgrounds
                    .iter()
                    .map(Background::entity)
                    .find(|entity| entity.id() == Some(id))
            })
    }

    /// Find any entity by id, mutably
    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        if self.main_character.id() == Some(id) {
            return Some(&mut self.main_character);
        }
        if let Some(entity) = self.entities.iter_mut().find(|entity| entity.id() == Some(id)) {
            return Some(entity);
        }
        self.backgrounds
            .iter_mut()
            .map(Background::entity_mut)
            .find(|entity| entity.id() == Some(id))
    }

    /// Whether an entity with this id lives in the level
    pub fn contains(&self, id: EntityId) -> bool {
        self.registry.ids.contains(&id)
    }

    /// Debug overlay switches
    pub fn overlays(&self) -> &Overlays {
        &self.overlays
    }

    /// Debug overlay switches, mutably
    pub fn overlays_mut(&mut self) -> &mut Overlays {
        &mut self.overlays
    }

    /// Add a foreground entity, assigning an id if it has none
    ///
    /// # Errors
    ///
    /// Fails on a duplicate id or a hook naming an unknown sequence.
    pub fn add_entity(&mut self, mut entity: Entity) -> Result<EntityId> {
        let id = self.registry.register(self.id, &mut entity)?;
        entity.refresh();
        self.entities.push(entity);
        self.entities_sorted = false;
        debug!("{} added to {}", id, self.id);
        Ok(id)
    }

    /// Add a background layer, assigning an id if it has none
    ///
    /// # Errors
    ///
    /// Fails on a duplicate id or a hook naming an unknown sequence.
    pub fn add_background(&mut self, mut background: Background) -> Result<EntityId> {
        let id = self.registry.register(self.id, background.entity_mut())?;
        self.backgrounds.push(background);
        self.backgrounds_sorted = false;
        debug!("Background {} added to {}", id, self.id);
        Ok(id)
    }

    /// Remove a foreground entity or background layer and hand it back
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EntityNotFound`] when neither collection holds
    /// `id`. The main character cannot be removed.
    pub fn remove_entity(&mut self, id: EntityId) -> Result<Entity> {
        let mut removed = if let Some(index) = self.entities.iter().position(|e| e.id() == Some(id)) {
            self.entities_sorted = false;
            self.entities.remove(index)
        } else if let Some(index) = self.backgrounds.iter().position(|b| b.id() == Some(id)) {
            self.backgrounds_sorted = false;
            self.backgrounds.remove(index).into_entity()
        } else {
            return Err(EngineError::EntityNotFound(id));
        };

        removed.set_owner(None);
        self.registry.ids.remove(&id);
        info!("{} removed from {}", id, self.id);
        Ok(removed)
    }

    /// Route this tick's held symbols to every listener
    ///
    /// The level's overlay toggles listen first, then the main character,
    /// the backgrounds and the foreground entities.
    ///
    /// # Errors
    ///
    /// Propagates a failing input action.
    pub fn dispatch_input(&mut self, input: &InputSnapshot) -> Result<()> {
        self.overlays.listen(input);
        self.main_character.listen_input(input)?;
        for background in &mut self.backgrounds {
            background.entity_mut().listen_input(input)?;
        }
        for entity in &mut self.entities {
            entity.listen_input(input)?;
        }
        Ok(())
    }

    /// Deliver the pointer to the front-most entity under it
    ///
    /// Positions are in screen coordinates; clickable regions are shifted by
    /// the camera before testing. Returns the id of the entity hit.
    ///
    /// # Errors
    ///
    /// Propagates a failing pointer action.
    pub fn dispatch_pointer(&mut self, pointer: &PointerState) -> Result<Option<EntityId>> {
        self.sort_caches();
        let offset = self.camera.offset();
        let hits = |entity: &Entity| {
            entity
                .clickable_region()
                .translated(offset)
                .contains(pointer.position)
        };

        let slot = self.main_character_slot();
        let in_front = (slot..self.entities.len()).rev();
        let behind = (0..slot).rev();

        for index in in_front {
            if hits(&self.entities[index]) {
                return self.deliver_pointer(Some(index), pointer);
            }
        }
        if hits(&self.main_character) {
            return self.deliver_pointer(None, pointer);
        }
        for index in behind {
            if hits(&self.entities[index]) {
                return self.deliver_pointer(Some(index), pointer);
            }
        }
        Ok(None)
    }

    fn deliver_pointer(&mut self, index: Option<usize>, pointer: &PointerState) -> Result<Option<EntityId>> {
        let entity = match index {
            Some(index) => &mut self.entities[index],
            None => &mut self.main_character,
        };
        entity.listen_pointer(pointer.position, pointer.buttons)?;
        Ok(entity.id())
    }

    /// Advance the whole level by one tick
    ///
    /// # Errors
    ///
    /// Propagates a failing collision reaction.
    pub fn update_all(&mut self, dt: f64) -> Result<()> {
        trace!("{} tick, dt {}", self.id, dt);

        self.main_character.update(dt);

        self.sort_caches();
        for background in &mut self.backgrounds {
            background.update(dt);
        }
        self.update_foreground(dt);

        self.camera.update(self.main_character.position());
        collision::resolve(&mut self.main_character, &mut self.entities)?;
        Ok(())
    }

    fn update_foreground(&mut self, dt: f64) {
        #[cfg(feature = "parallel")]
        {
            self.entities.par_iter_mut().for_each(|entity| entity.update(dt));
        }

        #[cfg(not(feature = "parallel"))]
        {
            for entity in &mut self.entities {
                entity.update(dt);
            }
        }
    }

    /// Emit this frame's draw commands
    ///
    /// Order: backdrop, background tiles, foreground interleaved with the
    /// main character, then any enabled debug overlays.
    pub fn draw<S: SurfaceSink + ?Sized>(&mut self, sink: &mut S) {
        self.sort_caches();
        let offset = self.camera.offset();

        sink.submit(DrawCommand::Clear { color: self.backdrop });
        for background in &self.backgrounds {
            background.draw(offset, sink);
        }

        let slot = self.main_character_slot();
        for entity in &self.entities[..slot] {
            draw_sprite(entity, offset, sink);
        }
        draw_sprite(&self.main_character, offset, sink);
        for entity in &self.entities[slot..] {
            draw_sprite(entity, offset, sink);
        }

        if self.overlays.any() {
            self.overlays
                .draw_entity(&self.main_character, MarkerKind::MainCharacter, offset, sink);
            for entity in &self.entities {
                self.overlays.draw_entity(entity, MarkerKind::Entity, offset, sink);
            }
        }
    }

    /// Run one full frame: input, pointer, update, draw
    ///
    /// # Errors
    ///
    /// Propagates any hook failure; nothing is drawn in that case.
    pub fn tick<S: SurfaceSink + ?Sized>(
        &mut self,
        input: &InputSnapshot,
        pointer: &PointerState,
        sink: &mut S,
    ) -> Result<()> {
        self.dispatch_input(input)?;
        self.dispatch_pointer(pointer)?;
        self.update_all(self.dt())?;
        self.draw(sink);
        Ok(())
    }

    /// Index of the first foreground entity drawn after the main character
    fn main_character_slot(&self) -> usize {
        let bottom = self.main_character.max_y();
        self.entities
            .iter()
            .position(|entity| entity.max_y() > bottom)
            .unwrap_or(self.entities.len())
    }

    fn sort_caches(&mut self) {
        if !self.backgrounds_sorted {
            self.backgrounds.sort_by_key(Background::z_index);
            self.backgrounds_sorted = true;
            debug!("{} sorted {} backgrounds", self.id, self.backgrounds.len());
        }
        if !self.entities_sorted {
            self.entities.sort_by(|a, b| a.max_y().total_cmp(&b.max_y()));
            self.entities_sorted = true;
            debug!("{} sorted {} entities", self.id, self.entities.len());
        }
    }

    fn settle(&mut self) -> Result<()> {
        self.sort_caches();
        self.main_character.refresh();
        for background in &mut self.backgrounds {
            background.entity_mut().refresh();
        }
        for entity in &mut self.entities {
            entity.refresh();
        }
        self.camera.update(self.main_character.position());
        collision::resolve(&mut self.main_character, &mut self.entities)?;
        Ok(())
    }
}

fn draw_sprite<S: SurfaceSink + ?Sized>(entity: &Entity, offset: Vector2, sink: &mut S) {
    sink.submit(DrawCommand::Sprite {
        frame: entity.animation.current_frame().handle,
        dest: entity.visual_bounds().translated(offset),
        clip: None,
    });
}
