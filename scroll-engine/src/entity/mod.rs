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
//! Entities
//!
//! An [`Entity`] composes a [`KinematicState`](crate::integration::KinematicState),
//! an [`AnimationState`](crate::animation::AnimationState) and a set of
//! hooks into one simulated actor. Entities are plain values owned by a
//! [`LevelWorkSpace`](crate::scene::LevelWorkSpace); the only link back to
//! the workspace is a [`WorkspaceId`].

mod actor;
mod hooks;
mod id;

pub use actor::{Entity, PointerHighlight};
pub use hooks::{
    Behavior, ClickLatch, ClickableSpace, CollisionReaction, Gait, InputAction, PointerAction,
    BACKGROUND, MAIN_CHARACTER,
};
pub use id::{EntityId, WorkspaceId};
