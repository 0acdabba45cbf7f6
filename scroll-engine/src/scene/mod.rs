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
//! Scene graph
//!
//! The [`LevelWorkSpace`] drives the per-tick pipeline. Its collaborators
//! are kept small: input snapshots come in, draw commands go out.

mod background;
mod camera;
mod draw;
mod input;
mod overlay;
mod workspace;

pub use background::Background;
pub use camera::{follow_offset, Camera, CameraMode};
pub use draw::{Color, DrawCommand, MarkerKind, OutlineKind, SurfaceSink};
pub use input::{InputSnapshot, Key, PointerButtons, PointerState};
pub use overlay::{OverlayKeys, Overlays, Toggle};
pub use workspace::{LevelBuilder, LevelWorkSpace};
