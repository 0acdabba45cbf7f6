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
//! Frame handles, sequences and the shared frame store

use crate::error::{EngineError, Result};
use crate::geometry::Vector2;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Opaque reference to a pre-sliced image owned by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    /// Wrap a renderer-side handle
    pub const fn new(raw: u64) -> Self {
        FrameHandle(raw)
    }

    /// Renderer-side handle value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for FrameHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({})", self.0)
    }
}

/// One visual frame: a handle plus its pixel size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    /// Renderer handle
    pub handle: FrameHandle,
    /// Width and height in pixels
    pub size: Vector2,
}

impl Frame {
    /// Create a frame
    pub fn new(handle: FrameHandle, size: Vector2) -> Self {
        Frame { handle, size }
    }
}

/// Ordered, non-empty list of frames played as one animation
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSequence {
    name: String,
    frames: Vec<Frame>,
}

impl FrameSequence {
    /// Create a sequence
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmptySequence`] when `frames` is empty.
    pub fn new(name: impl Into<String>, frames: Vec<Frame>) -> Result<Self> {
        let name = name.into();
        if frames.is_empty() {
            return Err(EngineError::EmptySequence { name });
        }
        Ok(FrameSequence { name, frames })
    }

    /// Sequence of `count` equally sized frames with consecutive handles
    ///
    /// Mirrors how a horizontal sprite strip is sliced into equal cells.
    pub fn strip(name: impl Into<String>, first_handle: u64, count: usize, size: Vector2) -> Result<Self> {
        let frames = (0..count as u64)
            .map(|i| Frame::new(FrameHandle::new(first_handle + i), size))
            .collect();
        FrameSequence::new(name, frames)
    }

    /// Sequence name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of frames
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// All frames in playback order
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Frame at `index`, if any
    pub fn get(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }
}

/// Named frame sequences, shared read-only by every entity that uses them
///
/// Built once during level loading and then wrapped in an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct FrameStore {
    sequences: HashMap<String, Arc<FrameSequence>>,
}

impl FrameStore {
    /// Create an empty store
    pub fn new() -> Self {
        FrameStore {
            sequences: HashMap::new(),
        }
    }

    /// Add or replace a sequence under its own name
    pub fn insert(&mut self, sequence: FrameSequence) {
        self.sequences
            .insert(sequence.name().to_string(), Arc::new(sequence));
    }

    /// Builder-style [`FrameStore::insert`]
    pub fn with(mut self, sequence: FrameSequence) -> Self {
        self.insert(sequence);
        self
    }

    /// Look a sequence up by name
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownSequence`] when no such sequence exists.
    pub fn get(&self, name: &str) -> Result<&Arc<FrameSequence>> {
        self.sequences
            .get(name)
            .ok_or_else(|| EngineError::UnknownSequence {
                name: name.to_string(),
            })
    }

    /// Whether a sequence with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.sequences.contains_key(name)
    }

    /// Number of sequences
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// True when no sequence is registered
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Iterate over sequence names
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sequences.keys().map(String::as_str)
    }
}
