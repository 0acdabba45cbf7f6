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
//! Frame-sequence animation
//!
//! Frames are opaque handles supplied by the external texture store,
//! grouped into named sequences (e.g. `"Walk"`, `"xflip_Idle"`). An
//! [`AnimationState`] plays one sequence at a time at its own frame rate,
//! independent of the simulation tick rate.

mod sequence;
mod clock;

pub use sequence::{Frame, FrameHandle, FrameSequence, FrameStore};
pub use clock::{AnimationBuilder, AnimationState, FrameLimit, RepeatPolicy, DEFAULT_ANIMATION_FPS};
