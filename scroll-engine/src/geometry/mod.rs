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
//! Planar geometry primitives
//!
//! Level coordinates are double-precision pixels with a top-left origin:
//! x grows to the right and y grows downwards.

mod vector;
mod rect;
mod anchor;

pub use vector::Vector2;
pub use rect::Rect;
pub use anchor::Anchor;
