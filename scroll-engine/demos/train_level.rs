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
//! Scripted train-carriage level
//!
//! Builds a level with two parallax backgrounds, invisible boundary walls
//! and rows of chairs, then drives it with a scripted input sequence and
//! logs what the renderer would have received.
//!
//! Run with `RUST_LOG=scroll_engine=debug cargo run --example train_level`.

use log::info;
use scroll_engine::animation::{AnimationState, FrameSequence, FrameStore};
use scroll_engine::entity::{ClickableSpace, CollisionReaction, Entity, PointerAction, MAIN_CHARACTER};
use scroll_engine::geometry::{Anchor, Vector2};
use scroll_engine::hitbox::{HitboxSpec, Margin};
use scroll_engine::integration::KinematicState;
use scroll_engine::logging::{init_logging, LoggingConfig};
use scroll_engine::scene::{
    Background, DrawCommand, InputSnapshot, Key, LevelWorkSpace, PointerButtons, PointerState,
    SurfaceSink,
};
use scroll_engine::{EngineConfig, Result};
use std::sync::Arc;

const CARRIAGE: Vector2 = Vector2::new(2000.0, 600.0);

/// Counts what a renderer would blit
#[derive(Debug, Default)]
struct FrameStats {
    sprites: usize,
    outlines: usize,
    markers: usize,
}

impl SurfaceSink for FrameStats {
    fn submit(&mut self, command: DrawCommand) {
        match command {
            DrawCommand::Clear { .. } => *self = FrameStats::default(),
            DrawCommand::Sprite { .. } => self.sprites += 1,
            DrawCommand::Outline { .. } => self.outlines += 1,
            DrawCommand::Marker { .. } => self.markers += 1,
        }
    }
}

fn frames() -> Result<Arc<FrameStore>> {
    let hero = Vector2::new(48.0, 96.0);
    let chair = Vector2::new(58.0, 115.0);
    let mut store = FrameStore::new();
    store.insert(FrameSequence::strip("bg1", 1, 1, CARRIAGE)?);
    store.insert(FrameSequence::strip("bg2", 2, 1, Vector2::new(800.0, 600.0))?);
    store.insert(FrameSequence::strip("Idle", 10, 4, hero)?);
    store.insert(FrameSequence::strip("Walk", 20, 6, hero)?);
    store.insert(FrameSequence::strip("xflip_Idle", 30, 4, hero)?);
    store.insert(FrameSequence::strip("xflip_Walk", 40, 6, hero)?);
    store.insert(FrameSequence::strip("chair1", 50, 1, chair)?);
    store.insert(FrameSequence::strip("negative_chair1", 51, 1, chair)?);
    store.insert(FrameSequence::strip("wall", 60, 1, Vector2::new(20.0, CARRIAGE.y))?);
    store.insert(FrameSequence::strip("ceiling", 61, 1, Vector2::new(CARRIAGE.x, 120.0))?);
    store.insert(FrameSequence::strip("floor", 62, 1, Vector2::new(CARRIAGE.x, 10.0))?);
    Ok(Arc::new(store))
}

fn boundary(store: &Arc<FrameStore>, at: Vector2, sequence: &str) -> Result<Entity> {
    let animation = AnimationState::builder(Arc::clone(store), sequence).still().build()?;
    Ok(Entity::new(KinematicState::new(at).collidable(), animation).with_category("boundary"))
}

fn chair(store: &Arc<FrameStore>, at: Vector2) -> Result<Entity> {
    let kinematics = KinematicState::new(at)
        .collidable()
        .with_hitbox(HitboxSpec::fit().with_margin(Margin::from_shorthand(&[0.0, -50.0, 0.0, 0.0])?));
    Ok(Entity::new(kinematics, AnimationState::new(Arc::clone(store), "chair1")?)
        .with_category("chair")
        .on_collision(MAIN_CHARACTER, CollisionReaction::SwitchSequence("negative_chair1".to_string()))
        .on_pointer(PointerAction::ToggleSequence {
            primary: "chair1".to_string(),
            alternate: "negative_chair1".to_string(),
            rearm_after: 0.5,
        }))
}

fn build_level(config: EngineConfig) -> Result<LevelWorkSpace> {
    let store = frames()?;

    let sky = Background::new(Entity::new(KinematicState::new(Vector2::ZERO), AnimationState::new(Arc::clone(&store), "bg1")?), 2)
        .scaled_to_cover(config.viewport, 1.0);
    let scenery = Background::new(
        Entity::new(
            KinematicState::new(Vector2::ZERO).with_velocity(Vector2::new(-200.0, 0.0)),
            AnimationState::new(Arc::clone(&store), "bg2")?,
        ),
        1,
    )
    .scaled_to_cover(config.viewport, 1.0);
    let level_size = sky.tile_size();

    let hero = Entity::main_character(
        KinematicState::new(Vector2::new(50.0, 200.0))
            .collidable()
            .with_hitbox(HitboxSpec::fixed(Vector2::new(50.0, 50.0), Anchor::Center)),
        AnimationState::new(Arc::clone(&store), "Idle")?,
    )
    .with_anchor(Anchor::Center)
    .with_clickable_space(ClickableSpace::Hitbox);

    let mut props = vec![
        boundary(&store, Vector2::ZERO, "wall")?,
        boundary(&store, Vector2::ZERO, "ceiling")?,
        boundary(&store, Vector2::new(level_size.x - 20.0, 0.0), "wall")?,
        boundary(&store, Vector2::new(0.0, level_size.y), "floor")?,
    ];
    for i in 0..10 {
        for y in [100.0, 175.0, 350.0, 425.0] {
            props.push(chair(&store, Vector2::new(100.0 + 100.0 * f64::from(i), y))?);
        }
    }

    LevelWorkSpace::builder(level_size, hero)
        .config(config)
        .background(sky)
        .background(scenery)
        .entities(props)
        .build()
}

fn script(tick: u32) -> (InputSnapshot, PointerState) {
    let mut input = InputSnapshot::new();
    match tick {
        0..=119 => input.press(Key::Right),
        120..=179 => input.press(Key::Down),
        180..=299 => {
            input.press(Key::Right);
            input.press(Key::Up);
        }
        300..=302 => input.press(Key::Char('h')),
        _ => input.press(Key::Left),
    }
    let buttons = if tick % 45 == 0 {
        PointerButtons::primary()
    } else {
        PointerButtons::none()
    };
    (input, PointerState::new(Vector2::new(400.0, 300.0), buttons))
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = EngineConfig::from_env()?;
    let mut level = build_level(config)?;
    let mut stats = FrameStats::default();

    for tick in 0..420 {
        let (input, pointer) = script(tick);
        level.tick(&input, &pointer, &mut stats)?;

        if tick % 60 == 0 {
            let hero = level.main_character();
            info!(
                "tick {:>3}: hero at {} playing '{}', camera {}, {} sprites, {} outlines",
                tick,
                hero.position(),
                hero.animation.active_name(),
                level.camera_offset(),
                stats.sprites,
                stats.outlines
            );
        }
    }

    let touched = level
        .entities()
        .iter()
        .filter(|entity| entity.animation.active_name() == "negative_chair1")
        .count();
    info!("{} chairs touched, {} markers in last frame", touched, stats.markers);
    Ok(())
}
