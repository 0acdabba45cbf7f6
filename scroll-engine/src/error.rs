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
//! Error types
//!
//! Level-authoring mistakes (unknown sequence names, empty sequences,
//! malformed margins) are reported as values so a level fails to load
//! before its tick loop starts. Geometry degeneracies are not errors.

use crate::entity::EntityId;
use thiserror::Error;

/// Errors raised while building or mutating a level
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A frame sequence name was requested that the frame store does not hold
    #[error("unknown animation sequence '{name}'")]
    UnknownSequence {
        /// Requested sequence name
        name: String,
    },

    /// A frame sequence was registered without frames
    #[error("animation sequence '{name}' has no frames")]
    EmptySequence {
        /// Offending sequence name
        name: String,
    },

    /// The frame limit resolves outside `1..=len` for the given sequence
    #[error("frame limit {limit} is invalid for sequence '{name}' of length {len}")]
    InvalidFrameLimit {
        /// Sequence the limit was resolved against
        name: String,
        /// Raw frame limit setting
        limit: i64,
        /// Number of frames in the sequence
        len: usize,
    },

    /// The start frame is not below the resolved frame limit
    #[error("start frame {start} is not below limit {limit} for sequence '{name}'")]
    InvalidStartFrame {
        /// Sequence the start frame was checked against
        name: String,
        /// Requested start frame
        start: usize,
        /// Resolved frame limit
        limit: usize,
    },

    /// Playback rate must be positive and finite
    #[error("animation fps must be positive and finite, got {0}")]
    InvalidFps(f64),

    /// Margins accept 1, 2 or 4 values
    #[error("margin shorthand takes 1, 2 or 4 values, got {len}")]
    InvalidMargin {
        /// Number of values supplied
        len: usize,
    },

    /// The simulation needs at least one tick per second
    #[error("tick rate must be positive, got {0}")]
    InvalidTickRate(u32),

    /// A configuration value could not be parsed
    #[error("invalid value '{value}' for {key}")]
    InvalidConfig {
        /// Configuration key (environment variable name)
        key: String,
        /// Raw value that failed to parse
        value: String,
    },

    /// No entity with this id lives in the level
    #[error("{0} not found")]
    EntityNotFound(EntityId),

    /// Entity ids must be unique within a level
    #[error("{0} is already registered")]
    DuplicateEntity(EntityId),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = EngineError::UnknownSequence { name: "Jump".to_string() };
        assert_eq!(err.to_string(), "unknown animation sequence 'Jump'");

        let err = EngineError::EntityNotFound(EntityId::new(7));
        assert_eq!(err.to_string(), "Entity(7) not found");
    }
}
