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
//! Animation clock
//!
//! Converts elapsed time into a frame index:
//!
//! ```text
//! time  += dt
//! frame  = floor(time * fps) + start_frame
//! ```
//!
//! and then normalizes the index against the resolved frame limit using
//! the repeat policy. Playback rate is independent of the simulation tick
//! rate, so an animation can run faster or slower than physics.

use super::sequence::{Frame, FrameSequence, FrameStore};
use crate::error::{EngineError, Result};
use log::debug;
use std::sync::Arc;

/// Default playback rate in frames per second
pub const DEFAULT_ANIMATION_FPS: f64 = 10.0;

/// Slack added before flooring `time * fps`
///
/// Accumulating `dt = 0.1` ten times yields `0.9999999999999999`; without
/// the slack the frame boundary would be missed by one tick.
const FRAME_EPSILON: f64 = 1e-9;

/// How many times an animation repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RepeatPolicy {
    /// Loop forever
    #[default]
    Infinite,
    /// Play once and hold the last frame
    Once,
    /// Loop `count` extra times, then hold the last frame
    Bounded(u32),
}

/// Last frame (exclusive) before an animation repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FrameLimit {
    /// The sequence length
    #[default]
    End,
    /// An absolute frame count
    Absolute(usize),
    /// The sequence length minus this many frames
    FromEnd(usize),
}

impl FrameLimit {
    /// Resolve against a sequence of `len` frames
    ///
    /// Returns `None` when the result falls outside `1..=len`.
    pub fn resolve(&self, len: usize) -> Option<usize> {
        let limit = match *self {
            FrameLimit::End => len,
            FrameLimit::Absolute(limit) => limit,
            FrameLimit::FromEnd(back) => len.checked_sub(back)?,
        };
        (1..=len).contains(&limit).then_some(limit)
    }

    /// Signed encoding: 0 for the end, positive absolute, negative from end
    pub fn raw(&self) -> i64 {
        match *self {
            FrameLimit::End => 0,
            FrameLimit::Absolute(limit) => limit as i64,
            FrameLimit::FromEnd(back) => -(back as i64),
        }
    }
}

impl From<i64> for FrameLimit {
    fn from(raw: i64) -> Self {
        match raw {
            0 => FrameLimit::End,
            n if n > 0 => FrameLimit::Absolute(n as usize),
            n => FrameLimit::FromEnd(n.unsigned_abs() as usize),
        }
    }
}

/// Playback state of one entity's animation
///
/// Invariant: `start_frame <= frame < limit <= sequence length` after every
/// public operation.
#[derive(Debug, Clone)]
pub struct AnimationState {
    store: Arc<FrameStore>,
    active: Arc<FrameSequence>,
    frame: usize,
    start_frame: usize,
    frame_limit: FrameLimit,
    fps: f64,
    time: f64,
    repeat: RepeatPolicy,
    repeats: u32,
    /// When false, [`AnimationState::advance`] does nothing
    pub animated: bool,
}

impl AnimationState {
    /// Play `active` from its first frame with default settings
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownSequence`] when `active` is not in `store`.
    pub fn new(store: Arc<FrameStore>, active: &str) -> Result<Self> {
        AnimationState::builder(store, active).build()
    }

    /// Start configuring an animation
    pub fn builder(store: Arc<FrameStore>, active: impl Into<String>) -> AnimationBuilder {
        AnimationBuilder {
            store,
            active: active.into(),
            frame: 0,
            start_frame: 0,
            frame_limit: FrameLimit::End,
            fps: DEFAULT_ANIMATION_FPS,
            repeat: RepeatPolicy::Infinite,
            animated: true,
        }
    }

    /// Advance the clock by `dt` seconds
    pub fn advance(&mut self, dt: f64) {
        if !self.animated {
            return;
        }
        self.time += dt;
        self.frame = self.frame_at(self.time);
        self.normalize();
    }

    /// Switch to another sequence, keeping the clock where possible
    ///
    /// The start frame and current frame are clamped against the new
    /// sequence's limit. If the current frame had to be reset to the start
    /// frame, the clock restarts at zero.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownSequence`] for a missing sequence and
    /// [`EngineError::InvalidFrameLimit`] when the frame limit does not fit
    /// the new sequence.
    pub fn change_sequence(&mut self, name: &str) -> Result<()> {
        let sequence = Arc::clone(self.store.get(name)?);
        let limit = resolve_limit(self.frame_limit, &sequence)?;

        if !Arc::ptr_eq(&sequence, &self.active) {
            debug!("Animation switches from '{}' to '{}'", self.active.name(), name);
        }
        self.active = sequence;

        if self.start_frame >= limit {
            self.start_frame = limit - 1;
        }
        if self.frame >= limit {
            self.frame = self.start_frame;
            self.time = 0.0;
        }
        Ok(())
    }

    /// Check that [`AnimationState::change_sequence`] to `name` would succeed
    ///
    /// # Errors
    ///
    /// Returns the error the switch itself would return.
    pub fn check_sequence(&self, name: &str) -> Result<()> {
        let sequence = self.store.get(name)?;
        resolve_limit(self.frame_limit, sequence).map(|_| ())
    }

    /// Rewind to the start frame and reset the repeat counter
    pub fn restart(&mut self) {
        self.frame = self.start_frame;
        self.time = 0.0;
        self.repeats = 0;
    }

    /// Replace the repeat policy; the repeat counter starts over
    pub fn set_repeat(&mut self, repeat: RepeatPolicy) {
        self.repeat = repeat;
        self.repeats = 0;
    }

    /// Frame currently shown
    pub fn current_frame(&self) -> &Frame {
        &self.active.frames()[self.frame]
    }

    /// Name of the active sequence
    pub fn active_name(&self) -> &str {
        self.active.name()
    }

    /// Active sequence
    pub fn active_sequence(&self) -> &FrameSequence {
        &self.active
    }

    /// Whether the shared store holds a sequence with this name
    pub fn has_sequence(&self, name: &str) -> bool {
        self.store.contains(name)
    }

    /// Shared frame store
    pub fn store(&self) -> &Arc<FrameStore> {
        &self.store
    }

    /// Current frame index within the active sequence
    pub fn frame_index(&self) -> usize {
        self.frame
    }

    /// Frame that repeats restart from
    pub fn start_frame(&self) -> usize {
        self.start_frame
    }

    /// Frame limit setting
    pub fn frame_limit(&self) -> FrameLimit {
        self.frame_limit
    }

    /// Resolved frame limit for the active sequence
    pub fn limit(&self) -> usize {
        self.frame_limit
            .resolve(self.active.len())
            .unwrap_or(self.active.len())
    }

    /// Playback rate in frames per second
    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Elapsed animation time in seconds
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Repeat policy
    pub fn repeat(&self) -> RepeatPolicy {
        self.repeat
    }

    /// Number of wraps performed under [`RepeatPolicy::Bounded`]
    pub fn repeats(&self) -> u32 {
        self.repeats
    }

    fn frame_at(&self, time: f64) -> usize {
        // Negative times saturate to zero in the cast
        ((time * self.fps + FRAME_EPSILON).floor() as usize).saturating_add(self.start_frame)
    }

    fn normalize(&mut self) {
        let limit = self.limit();
        if self.frame < limit {
            return;
        }

        match self.repeat {
            RepeatPolicy::Infinite => self.wrap(),
            RepeatPolicy::Once => self.hold(limit),
            RepeatPolicy::Bounded(count) => {
                if self.repeats < count {
                    self.wrap();
                    self.repeats += 1;
                } else {
                    self.hold(limit);
                }
            }
        }
    }

    fn wrap(&mut self) {
        self.frame = self.start_frame;
        self.time = 0.0;
    }

    fn hold(&mut self, limit: usize) {
        self.frame = limit - 1;
        // Freeze the clock on the last frame so later advances stay clamped
        self.time = self.frame as f64 / self.fps;
    }
}

/// Builder for [`AnimationState`]
#[derive(Debug, Clone)]
pub struct AnimationBuilder {
    store: Arc<FrameStore>,
    active: String,
    frame: usize,
    start_frame: usize,
    frame_limit: FrameLimit,
    fps: f64,
    repeat: RepeatPolicy,
    animated: bool,
}

impl AnimationBuilder {
    /// Initial frame index
    pub fn frame(mut self, frame: usize) -> Self {
        self.frame = frame;
        self
    }

    /// Frame that repeats restart from
    pub fn start_frame(mut self, start_frame: usize) -> Self {
        self.start_frame = start_frame;
        self
    }

    /// Last frame (exclusive) before repeating
    pub fn frame_limit(mut self, frame_limit: impl Into<FrameLimit>) -> Self {
        self.frame_limit = frame_limit.into();
        self
    }

    /// Playback rate in frames per second
    pub fn fps(mut self, fps: f64) -> Self {
        self.fps = fps;
        self
    }

    /// Repeat policy
    pub fn repeat(mut self, repeat: RepeatPolicy) -> Self {
        self.repeat = repeat;
        self
    }

    /// Never advance; useful for single-image props
    pub fn still(mut self) -> Self {
        self.animated = false;
        self
    }

    /// Validate the settings and build the state
    ///
    /// An initial frame beyond the limit falls back to the start frame.
    ///
    /// # Errors
    ///
    /// Fails on an unknown sequence, a non-positive fps, a frame limit that
    /// does not fit the sequence, or a start frame at or past the limit.
    pub fn build(self) -> Result<AnimationState> {
        if !(self.fps > 0.0 && self.fps.is_finite()) {
            return Err(EngineError::InvalidFps(self.fps));
        }

        let active = Arc::clone(self.store.get(&self.active)?);
        let limit = resolve_limit(self.frame_limit, &active)?;
        if self.start_frame >= limit {
            return Err(EngineError::InvalidStartFrame {
                name: self.active,
                start: self.start_frame,
                limit,
            });
        }

        let frame = if (self.start_frame..limit).contains(&self.frame) {
            self.frame
        } else {
            self.start_frame
        };

        Ok(AnimationState {
            store: self.store,
            active,
            frame,
            start_frame: self.start_frame,
            frame_limit: self.frame_limit,
            fps: self.fps,
            time: (frame - self.start_frame) as f64 / self.fps,
            repeat: self.repeat,
            repeats: 0,
            animated: self.animated,
        })
    }
}

fn resolve_limit(frame_limit: FrameLimit, sequence: &FrameSequence) -> Result<usize> {
    frame_limit
        .resolve(sequence.len())
        .ok_or_else(|| EngineError::InvalidFrameLimit {
            name: sequence.name().to_string(),
            limit: frame_limit.raw(),
            len: sequence.len(),
        })
}
