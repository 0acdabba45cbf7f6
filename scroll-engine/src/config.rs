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
//! Engine configuration
//!
//! Defaults match a 60 Hz loop on an 800x600 window. Both values can be
//! overridden from the environment:
//!
//! - `SCROLL_ENGINE_TICK_RATE`: ticks per second, e.g. `120`
//! - `SCROLL_ENGINE_VIEWPORT`: viewport size as `WIDTHxHEIGHT`, e.g. `1280x720`

use crate::error::{EngineError, Result};
use crate::geometry::Vector2;
use crate::integration::validate_timestep;
use log::{info, warn};

/// Environment variable overriding the tick rate
pub const TICK_RATE_VAR: &str = "SCROLL_ENGINE_TICK_RATE";

/// Environment variable overriding the viewport size
pub const VIEWPORT_VAR: &str = "SCROLL_ENGINE_VIEWPORT";

/// Simulation and viewport settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Simulation ticks per second; one tick per rendered frame
    pub tick_rate: u32,
    /// Viewport size in pixels
    pub viewport: Vector2,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            tick_rate: 60,
            viewport: Vector2::new(800.0, 600.0),
        }
    }
}

impl EngineConfig {
    /// Defaults overlaid with any environment overrides
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] for a value that does not parse.
    pub fn from_env() -> Result<Self> {
        EngineConfig::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = EngineConfig::default();

        if let Some(raw) = lookup(TICK_RATE_VAR) {
            config.tick_rate = raw.trim().parse().map_err(|_| invalid(TICK_RATE_VAR, &raw))?;
            info!("{} overrides tick rate: {}", TICK_RATE_VAR, config.tick_rate);
        }

        if let Some(raw) = lookup(VIEWPORT_VAR) {
            config.viewport = parse_size(&raw).ok_or_else(|| invalid(VIEWPORT_VAR, &raw))?;
            info!("{} overrides viewport: {}", VIEWPORT_VAR, config.viewport);
        }

        Ok(config)
    }

    /// Set the tick rate
    pub fn with_tick_rate(mut self, tick_rate: u32) -> Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Set the viewport size
    pub fn with_viewport(mut self, viewport: Vector2) -> Self {
        self.viewport = viewport;
        self
    }

    /// Tick duration in seconds
    pub fn dt(&self) -> f64 {
        1.0 / f64::from(self.tick_rate.max(1))
    }

    /// Reject unusable settings and warn about risky ones
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidTickRate`] for a zero tick rate and
    /// [`EngineError::InvalidConfig`] for a non-positive viewport.
    pub fn validate(&self) -> Result<()> {
        if self.tick_rate == 0 {
            return Err(EngineError::InvalidTickRate(self.tick_rate));
        }
        if !(self.viewport.is_valid() && self.viewport.x > 0.0 && self.viewport.y > 0.0) {
            return Err(invalid("viewport", &self.viewport.to_string()));
        }
        if let Err(message) = validate_timestep(self.dt()) {
            warn!("{}", message);
        }
        Ok(())
    }
}

fn invalid(key: &str, value: &str) -> EngineError {
    EngineError::InvalidConfig {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_size(raw: &str) -> Option<Vector2> {
    let (width, height) = raw.trim().split_once(['x', 'X'])?;
    let width: f64 = width.trim().parse().ok()?;
    let height: f64 = height.trim().parse().ok()?;
    (width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite())
        .then(|| Vector2::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.tick_rate, 60);
        assert_eq!(config.viewport, Vector2::new(800.0, 600.0));
        assert!((config.dt() - 1.0 / 60.0).abs() < 1e-15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config =
            EngineConfig::from_lookup(lookup(&[(TICK_RATE_VAR, "120"), (VIEWPORT_VAR, "1280x720")])).unwrap();
        assert_eq!(config.tick_rate, 120);
        assert_eq!(config.viewport, Vector2::new(1280.0, 720.0));
    }

    #[test]
    fn test_malformed_values() {
        assert_eq!(
            EngineConfig::from_lookup(lookup(&[(TICK_RATE_VAR, "fast")])),
            Err(EngineError::InvalidConfig {
                key: TICK_RATE_VAR.to_string(),
                value: "fast".to_string(),
            })
        );
        assert!(EngineConfig::from_lookup(lookup(&[(VIEWPORT_VAR, "800")])).is_err());
        assert!(EngineConfig::from_lookup(lookup(&[(VIEWPORT_VAR, "0x600")])).is_err());
    }

    #[test]
    fn test_validate() {
        assert_eq!(
            EngineConfig::default().with_tick_rate(0).validate(),
            Err(EngineError::InvalidTickRate(0))
        );
        // Risky but allowed: only a warning
        assert!(EngineConfig::default().with_tick_rate(5).validate().is_ok());
        assert!(EngineConfig::default()
            .with_viewport(Vector2::new(-1.0, 600.0))
            .validate()
            .is_err());
    }
}
