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
//! # Scroll Engine
//!
//! The simulation core of a 2D side-scrolling game: a main character walks
//! a level, bumps into obstacles, and the camera follows it.
//!
//! ## Features
//!
//! - **Kinematics**: constant-acceleration trapezoidal integration
//! - **Animation**: frame sequences with independent playback rate and repeat policies
//! - **Hitboxes**: margin and anchor driven boxes with jitter-free recomputation
//! - **Collisions**: trajectory-projected, axis-snapping resolution with typed reactions
//! - **Scene**: depth-sorted drawing, tiling parallax backgrounds, a bounded follow camera
//! - **Parallelization**: optional Rayon update of foreground entities
//!
//! Rendering, asset loading and windowing stay outside: the engine reads
//! frame sizes from a [`FrameStore`](animation::FrameStore), consumes input
//! snapshots and emits [`DrawCommand`](scene::DrawCommand)s.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use scroll_engine::animation::{AnimationState, FrameSequence, FrameStore};
//! use scroll_engine::entity::Entity;
//! use scroll_engine::geometry::Vector2;
//! use scroll_engine::integration::KinematicState;
//! use scroll_engine::scene::{InputSnapshot, Key, LevelWorkSpace, PointerState};
//!
//! let size = Vector2::new(40.0, 80.0);
//! let mut store = FrameStore::new();
//! for (name, frames) in [("Idle", 4), ("Walk", 6), ("xflip_Idle", 4), ("xflip_Walk", 6)] {
//!     store.insert(FrameSequence::strip(name, 0, frames, size).unwrap());
//! }
//! let store = Arc::new(store);
//!
//! let hero = Entity::main_character(
//!     KinematicState::new(Vector2::new(50.0, 200.0)),
//!     AnimationState::new(store, "Idle").unwrap(),
//! );
//! let mut level = LevelWorkSpace::builder(Vector2::new(2000.0, 600.0), hero)
//!     .build()
//!     .unwrap();
//!
//! let mut input = InputSnapshot::new();
//! input.press(Key::Right);
//! let mut frame = Vec::new();
//! level.tick(&input, &PointerState::default(), &mut frame).unwrap();
//! assert_eq!(level.main_character().animation.active_name(), "Walk");
//! ```

#![warn(missing_docs)]

/// Frame sequences and the animation clock
pub mod animation;

/// Collision resolution
pub mod collision;

/// Engine configuration
pub mod config;

/// Entities and their hooks
pub mod entity;

/// Error types
pub mod error;

/// Planar geometry primitives
pub mod geometry;

/// Hitbox calculation
pub mod hitbox;

/// Kinematic integration
pub mod integration;

/// Logger setup
pub mod logging;

/// Scene graph and per-tick orchestration
pub mod scene;

pub use config::EngineConfig;
pub use entity::{Entity, EntityId};
pub use error::{EngineError, Result};
pub use scene::LevelWorkSpace;
